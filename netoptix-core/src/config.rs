// Load-time configuration: parse, validate, and hand back immutable data

use crate::error::{ConfigError, Result};
use crate::logs::LogRepository;
use crate::model::{Link, Node, NodeId, Topology};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// The lab topology shipped with the binary.
pub const BUNDLED_TOPOLOGY: &str = include_str!("../assets/topology.json");

pub const DEFAULT_CONFIG_PATH: &str = "~/.config/netoptix/topology.json";

/// On-disk document shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TopologyConfig {
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(default)]
    pub logs: HashMap<NodeId, String>,
}

/// Validated topology and its logs.
#[derive(Debug, Clone)]
pub struct LoadedTopology {
    pub topology: Topology,
    pub logs: LogRepository,
    pub source: ConfigSource,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Bundled,
    File(PathBuf),
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Bundled => f.write_str("bundled topology"),
            ConfigSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl TopologyConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Checks every invariant and splits the document into its parts.
    pub fn validate(self) -> Result<(Topology, LogRepository)> {
        let topology = Topology::new(self.nodes, self.links)?;

        let mut orphans: Vec<&NodeId> = self
            .logs
            .keys()
            .filter(|id| !topology.contains(id.as_str()))
            .collect();
        orphans.sort();
        if let Some(id) = orphans.first() {
            return Err(ConfigError::OrphanLog(id.to_string()));
        }

        Ok((topology, LogRepository::new(self.logs)))
    }
}

pub fn load_from_str(json: &str, source: ConfigSource) -> Result<LoadedTopology> {
    let (topology, logs) = TopologyConfig::from_json(json)?.validate()?;

    tracing::info!(
        source = %source,
        nodes = topology.nodes().len(),
        links = topology.links().len(),
        logs = logs.len(),
        "topology loaded"
    );

    Ok(LoadedTopology {
        topology,
        logs,
        source,
    })
}

pub fn load_from_path(path: &Path) -> Result<LoadedTopology> {
    let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_str(&json, ConfigSource::File(path.to_path_buf()))
}

pub fn load_bundled() -> Result<LoadedTopology> {
    load_from_str(BUNDLED_TOPOLOGY, ConfigSource::Bundled)
}

pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

/// `explicit` must exist when given; otherwise the user config file is
/// used if present, falling back to the bundled topology.
pub fn resolve_source(explicit: Option<&Path>, user_default: &Path) -> ConfigSource {
    match explicit {
        Some(path) => ConfigSource::File(path.to_path_buf()),
        None if user_default.is_file() => ConfigSource::File(user_default.to_path_buf()),
        None => ConfigSource::Bundled,
    }
}

pub fn load(source: ConfigSource) -> Result<LoadedTopology> {
    match source {
        ConfigSource::Bundled => load_bundled(),
        ConfigSource::File(path) => load_from_path(&path),
    }
}
