// Per-node log excerpts and the line classifier

use crate::model::NodeId;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::Lines;

/// Shown in place of a log when a node has nothing recorded.
pub const NO_ANOMALIES_PLACEHOLDER: &str = "[INFO] No anomalies detected in log stream.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warn,
    Error,
    Critical,
    Config,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
            Severity::Critical => "critical",
            Severity::Config => "config",
        }
    }
}

// Checked in order; the first token found in a line wins.
const TAG_PRIORITY: [(&str, Severity); 4] = [
    ("[CRITICAL]", Severity::Critical),
    ("[ERROR]", Severity::Error),
    ("[WARN]", Severity::Warn),
    ("[CONFIG]", Severity::Config),
];

/// Severity of a single log line. Lines without a known tag are `Info`.
pub fn classify_line(line: &str) -> Severity {
    TAG_PRIORITY
        .iter()
        .find(|(tag, _)| line.contains(tag))
        .map(|&(_, severity)| severity)
        .unwrap_or(Severity::Info)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifiedLine<'a> {
    pub severity: Severity,
    pub text: &'a str,
}

/// Lazy classification over a log blob, in source order.
/// Clone it to walk the blob again from the start.
#[derive(Debug, Clone)]
pub struct LogLines<'a> {
    lines: Lines<'a>,
}

impl<'a> Iterator for LogLines<'a> {
    type Item = ClassifiedLine<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.lines.next().map(|text| ClassifiedLine {
            severity: classify_line(text),
            text,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.lines.size_hint()
    }
}

pub fn classify(blob: &str) -> LogLines<'_> {
    LogLines {
        lines: blob.lines(),
    }
}

/// A classified line stamped with the wall-clock time it was rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry<'a> {
    pub severity: Severity,
    pub text: &'a str,
    pub timestamp: DateTime<Local>,
}

impl<'a> LogEntry<'a> {
    pub fn stamp(line: ClassifiedLine<'a>, timestamp: DateTime<Local>) -> Self {
        Self {
            severity: line.severity,
            text: line.text,
            timestamp,
        }
    }

    pub fn time_label(&self) -> String {
        self.timestamp.format("%H:%M:%S").to_string()
    }
}

/// Classifies `blob` and stamps every line with `now`.
pub fn entries_at(blob: &str, now: DateTime<Local>) -> Vec<LogEntry<'_>> {
    classify(blob).map(|line| LogEntry::stamp(line, now)).collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub critical: usize,
    pub error: usize,
    pub warn: usize,
    pub config: usize,
    pub info: usize,
}

impl SeverityCounts {
    pub fn tally<'a>(lines: impl IntoIterator<Item = ClassifiedLine<'a>>) -> Self {
        let mut counts = Self::default();
        for line in lines {
            match line.severity {
                Severity::Critical => counts.critical += 1,
                Severity::Error => counts.error += 1,
                Severity::Warn => counts.warn += 1,
                Severity::Config => counts.config += 1,
                Severity::Info => counts.info += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.critical + self.error + self.warn + self.config + self.info
    }

    /// Critical and error lines together.
    pub fn alerts(&self) -> usize {
        self.critical + self.error
    }
}

/// Static node id to raw log blob mapping.
#[derive(Debug, Clone, Default)]
pub struct LogRepository {
    logs: HashMap<NodeId, String>,
}

impl LogRepository {
    pub fn new(logs: HashMap<NodeId, String>) -> Self {
        Self { logs }
    }

    /// The raw blob for `node_id`. `None` is the normal "nothing recorded"
    /// case; a blob with only blank lines counts as nothing recorded.
    pub fn logs_for(&self, node_id: &str) -> Option<&str> {
        self.logs
            .get(node_id)
            .map(String::as_str)
            .filter(|blob| !blob.trim().is_empty())
    }

    pub fn node_ids(&self) -> impl Iterator<Item = &NodeId> {
        self.logs.keys()
    }

    pub fn len(&self) -> usize {
        self.logs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.logs.is_empty()
    }
}
