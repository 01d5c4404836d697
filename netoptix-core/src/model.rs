// Topology model: nodes, links and the adjacency between them

use crate::error::{ConfigError, LinkEnd, Result};
use petgraph::graph::{NodeIndex, UnGraph};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;

macro_rules! string_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

string_id!(NodeId);
string_id!(LinkId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeviceType {
    Router,
    Switch,
    Endpoint,
}

impl DeviceType {
    pub const ALL: [DeviceType; 3] = [DeviceType::Router, DeviceType::Switch, DeviceType::Endpoint];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceType::Router => "router",
            DeviceType::Switch => "switch",
            DeviceType::Endpoint => "endpoint",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeStatus {
    Healthy,
    Warning,
    Critical,
}

impl NodeStatus {
    pub const ALL: [NodeStatus; 3] = [NodeStatus::Healthy, NodeStatus::Warning, NodeStatus::Critical];

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeStatus::Healthy => "healthy",
            NodeStatus::Warning => "warning",
            NodeStatus::Critical => "critical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkCategory {
    #[serde(rename = "primary-path")]
    PrimaryPath,
    #[serde(rename = "algo-128")]
    Algo128,
    #[serde(rename = "algo-129")]
    Algo129,
    #[serde(rename = "algo-130")]
    Algo130,
    #[serde(rename = "access")]
    Access,
}

impl LinkCategory {
    pub const ALL: [LinkCategory; 5] = [
        LinkCategory::PrimaryPath,
        LinkCategory::Algo128,
        LinkCategory::Algo129,
        LinkCategory::Algo130,
        LinkCategory::Access,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LinkCategory::PrimaryPath => "primary-path",
            LinkCategory::Algo128 => "algo-128",
            LinkCategory::Algo129 => "algo-129",
            LinkCategory::Algo130 => "algo-130",
            LinkCategory::Access => "access",
        }
    }
}

/// Fixed diagram coordinate. `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Position) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: NodeId,
    pub label: String,
    pub device_type: DeviceType,
    pub status: NodeStatus,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub id: LinkId,
    pub source_id: NodeId,
    pub target_id: NodeId,
    pub category: LinkCategory,
    #[serde(default)]
    pub animated: bool,
    #[serde(default)]
    pub emphasis: bool,
}

impl Link {
    /// The endpoint opposite `node`, if `node` is on this link.
    pub fn other_end(&self, node: &str) -> Option<&NodeId> {
        if self.source_id == node {
            Some(&self.target_id)
        } else if self.target_id == node {
            Some(&self.source_id)
        } else {
            None
        }
    }
}

/// Immutable, validated set of nodes and links.
#[derive(Debug, Clone)]
pub struct Topology {
    nodes: Vec<Node>,
    links: Vec<Link>,
    node_index: HashMap<NodeId, usize>,
    link_index: HashMap<LinkId, usize>,
    graph: UnGraph<usize, usize>,
}

impl Topology {
    /// Validates the referential invariants and builds the adjacency graph.
    pub fn new(nodes: Vec<Node>, links: Vec<Link>) -> Result<Self> {
        let mut node_index = HashMap::with_capacity(nodes.len());
        let mut graph: UnGraph<usize, usize> = UnGraph::with_capacity(nodes.len(), links.len());

        for (idx, node) in nodes.iter().enumerate() {
            if node_index.insert(node.id.clone(), idx).is_some() {
                return Err(ConfigError::DuplicateNode(node.id.to_string()));
            }
            graph.add_node(idx);
        }

        let mut link_index = HashMap::with_capacity(links.len());
        for (idx, link) in links.iter().enumerate() {
            if link_index.insert(link.id.clone(), idx).is_some() {
                return Err(ConfigError::DuplicateLink(link.id.to_string()));
            }

            let source = *node_index
                .get(&link.source_id)
                .ok_or_else(|| ConfigError::DanglingLink {
                    link: link.id.to_string(),
                    end: LinkEnd::Source,
                    node: link.source_id.to_string(),
                })?;
            let target = *node_index
                .get(&link.target_id)
                .ok_or_else(|| ConfigError::DanglingLink {
                    link: link.id.to_string(),
                    end: LinkEnd::Target,
                    node: link.target_id.to_string(),
                })?;

            if source == target {
                return Err(ConfigError::SelfLoop {
                    link: link.id.to_string(),
                    node: link.source_id.to_string(),
                });
            }

            graph.add_edge(NodeIndex::new(source), NodeIndex::new(target), idx);
        }

        tracing::debug!(
            nodes = nodes.len(),
            links = links.len(),
            "topology validated"
        );

        Ok(Self {
            nodes,
            links,
            node_index,
            link_index,
            graph,
        })
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.node_index.get(id).map(|&idx| &self.nodes[idx])
    }

    pub fn link(&self, id: &str) -> Option<&Link> {
        self.link_index.get(id).map(|&idx| &self.links[idx])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    /// Nodes adjacent to `id`, in node declaration order, without duplicates.
    pub fn neighbors(&self, id: &str) -> Vec<&Node> {
        let Some(&idx) = self.node_index.get(id) else {
            return Vec::new();
        };

        let mut adjacent: Vec<usize> = self
            .graph
            .neighbors(NodeIndex::new(idx))
            .map(|n| self.graph[n])
            .collect();
        adjacent.sort_unstable();
        adjacent.dedup();

        adjacent.into_iter().map(|i| &self.nodes[i]).collect()
    }

    /// Links touching `id`, in link declaration order.
    pub fn links_of(&self, id: &str) -> Vec<&Link> {
        let Some(&idx) = self.node_index.get(id) else {
            return Vec::new();
        };

        let mut attached: Vec<usize> = self
            .graph
            .edges(NodeIndex::new(idx))
            .map(|e| *e.weight())
            .collect();
        attached.sort_unstable();

        attached.into_iter().map(|i| &self.links[i]).collect()
    }
}
