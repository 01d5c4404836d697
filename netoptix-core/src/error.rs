use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading a topology. Every variant is fatal to startup.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read topology file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed topology document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate node id '{0}'")]
    DuplicateNode(String),

    #[error("Duplicate link id '{0}'")]
    DuplicateLink(String),

    #[error("Link '{link}' references unknown {end} node '{node}'")]
    DanglingLink {
        link: String,
        end: LinkEnd,
        node: String,
    },

    #[error("Link '{link}' connects node '{node}' to itself")]
    SelfLoop { link: String, node: String },

    #[error("Log entry references unknown node '{0}'")]
    OrphanLog(String),
}

/// Which side of a link a dangling reference was found on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkEnd {
    Source,
    Target,
}

impl std::fmt::Display for LinkEnd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LinkEnd::Source => f.write_str("source"),
            LinkEnd::Target => f.write_str("target"),
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Unknown node '{0}'")]
    UnknownNode(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
