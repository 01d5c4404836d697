pub mod config;
pub mod error;
pub mod logs;
pub mod model;
pub mod panel;
pub mod scene;
pub mod selection;
pub mod style;

pub use config::{ConfigSource, LoadedTopology, TopologyConfig};
pub use error::{ConfigError, SelectionError};
pub use logs::{LogEntry, LogRepository, Severity, classify};
pub use model::{DeviceType, Link, LinkCategory, LinkId, Node, NodeId, NodeStatus, Position, Topology};
pub use panel::{DetailPanel, PanelBody, PanelView};
pub use scene::Scene;
pub use selection::{Selection, SelectionController, SelectionEvent};

use colored::Colorize;

pub fn print_banner() {
    let banner = r#"
    ███╗   ██╗███████╗████████╗ ██████╗ ██████╗ ████████╗██╗██╗  ██╗
    ████╗  ██║██╔════╝╚══██╔══╝██╔═══██╗██╔══██╗╚══██╔══╝██║╚██╗██╔╝
    ██╔██╗ ██║█████╗     ██║   ██║   ██║██████╔╝   ██║   ██║ ╚███╔╝
    ██║╚██╗██║██╔══╝     ██║   ██║   ██║██╔═══╝    ██║   ██║ ██╔██╗
    ██║ ╚████║███████╗   ██║   ╚██████╔╝██║        ██║   ██║██╔╝ ██╗
    ╚═╝  ╚═══╝╚══════╝   ╚═╝    ╚═════╝ ╚═╝        ╚═╝   ╚═╝╚═╝  ╚═╝"#;
    println!("{}", banner.bright_green().bold());
    println!("    {}", "Live Topology Visualization".bright_black());
    println!();
}
