// Detail panel composition: selection + topology + logs -> a view model
// the host can draw without further lookups.

use crate::logs::{LogEntry, LogRepository, NO_ANOMALIES_PLACEHOLDER, SeverityCounts, classify, entries_at};
use crate::model::{DeviceType, NodeId, NodeStatus, Topology};
use crate::selection::Selection;
use crate::style::{StatusStyle, badge_for_status, glyph_for_device_type, style_for_status};
use chrono::{DateTime, Local};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelBody<'a> {
    Entries(Vec<LogEntry<'a>>),
    Placeholder(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBadge {
    pub text: &'static str,
    pub style: StatusStyle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelView<'a> {
    pub node_id: NodeId,
    pub label: &'a str,
    pub device_type: DeviceType,
    pub glyph: &'static str,
    pub status: NodeStatus,
    pub badge: StatusBadge,
    pub neighbors: Vec<&'a NodeId>,
    pub counts: SeverityCounts,
    pub body: PanelBody<'a>,
}

/// Read-only view over the static data the panel draws from.
#[derive(Debug, Clone, Copy)]
pub struct DetailPanel<'a> {
    topology: &'a Topology,
    logs: &'a LogRepository,
}

impl<'a> DetailPanel<'a> {
    pub fn new(topology: &'a Topology, logs: &'a LogRepository) -> Self {
        Self { topology, logs }
    }

    /// `None` while idle. Log lines are stamped with `now`.
    pub fn compose(&self, selection: &Selection, now: DateTime<Local>) -> Option<PanelView<'a>> {
        let node_id = selection.node_id()?;
        // Selection only ever holds ids taken from this topology.
        let node = self.topology.node(node_id.as_str())?;

        let (counts, body) = match self.logs.logs_for(node_id.as_str()) {
            Some(blob) => (
                SeverityCounts::tally(classify(blob)),
                PanelBody::Entries(entries_at(blob, now)),
            ),
            None => (
                SeverityCounts::default(),
                PanelBody::Placeholder(NO_ANOMALIES_PLACEHOLDER),
            ),
        };

        Some(PanelView {
            node_id: node.id.clone(),
            label: &node.label,
            device_type: node.device_type,
            glyph: glyph_for_device_type(node.device_type),
            status: node.status,
            badge: StatusBadge {
                text: badge_for_status(node.status),
                style: style_for_status(node.status),
            },
            neighbors: self.topology.neighbors(node_id.as_str()).into_iter().map(|n| &n.id).collect(),
            counts,
            body,
        })
    }
}
