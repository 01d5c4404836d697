use anyhow::{Context, Result, bail};
use chrono::Local;
use colored::{ColoredString, Colorize};
use netoptix_core::config::{
    BUNDLED_TOPOLOGY, DEFAULT_CONFIG_PATH, LoadedTopology, expand_path, load, resolve_source,
};
use netoptix_core::logs::Severity;
use netoptix_core::model::{NodeStatus, Topology};
use netoptix_core::panel::{DetailPanel, PanelBody};
use netoptix_core::scene::resolve_link_style;
use netoptix_core::selection::SelectionController;
use netoptix_core::style::{Rgb, style_for_severity, style_for_status};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::Level;

fn paint(text: &str, rgb: Rgb) -> ColoredString {
    text.truecolor(rgb.r, rgb.g, rgb.b)
}

fn paint_status(status: NodeStatus) -> ColoredString {
    let painted = paint(status.as_str(), style_for_status(status).border_color);
    if status == NodeStatus::Critical {
        painted.bold()
    } else {
        painted
    }
}

fn paint_severity(text: &str, severity: Severity) -> ColoredString {
    let style = style_for_severity(severity);
    let painted = paint(text, style.color);
    if style.bold { painted.bold() } else { painted }
}

fn divider() -> String {
    format!("{}\n", "═".repeat(60).bright_green().bold())
}

/// `-v` count to the most verbose level shown. Warnings are always on.
pub fn verbosity_level(count: u8) -> Level {
    match count {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Loads the explicit file, else the user config, else the bundled lab.
pub fn load_topology(explicit: Option<&Path>) -> Result<LoadedTopology> {
    let explicit = explicit.map(|p| expand_path(&p.to_string_lossy()));
    let source = resolve_source(explicit.as_deref(), &expand_path(DEFAULT_CONFIG_PATH));
    let description = source.to_string();
    load(source).with_context(|| format!("Failed to load {}", description))
}

fn neighbor_list(topology: &Topology, id: &str) -> String {
    let neighbors: Vec<&str> = topology
        .neighbors(id)
        .into_iter()
        .map(|n| n.id.as_str())
        .collect();
    if neighbors.is_empty() {
        "-".to_string()
    } else {
        neighbors.join(", ")
    }
}

pub fn format_show(loaded: &LoadedTopology) -> String {
    let topology = &loaded.topology;
    let mut out = String::new();

    out.push_str(&divider());
    let _ = writeln!(out, "  {} {}", "TOPOLOGY".bright_white().bold(), format!("({})", loaded.source).bright_black());
    out.push_str(&divider());
    out.push('\n');

    let _ = writeln!(out, "{} ({})", "Nodes".bright_blue().bold(), topology.nodes().len());
    for node in topology.nodes() {
        let log_marker = if loaded.logs.logs_for(node.id.as_str()).is_some() {
            "logs".bright_black()
        } else {
            "".normal()
        };
        let _ = writeln!(
            out,
            "  {:<6} {:<8} {:<8} {:<18} {} {}",
            node.id.as_str().bright_white().bold(),
            node.device_type.as_str(),
            paint_status(node.status),
            node.label,
            format!("→ {}", neighbor_list(topology, node.id.as_str())).blue(),
            log_marker,
        );
    }
    out.push('\n');

    let _ = writeln!(out, "{} ({})", "Links".bright_blue().bold(), topology.links().len());
    for link in topology.links() {
        let style = resolve_link_style(link);
        let mut flags = Vec::new();
        if style.animated {
            flags.push("animated");
        }
        if link.emphasis {
            flags.push("emphasis");
        }
        let _ = writeln!(
            out,
            "  {:<12} {} ↔ {}  {} {}",
            link.id.as_str(),
            link.source_id.as_str().bright_white(),
            link.target_id.as_str().bright_white(),
            paint(link.category.as_str(), style.color),
            flags.join(" ").bright_black(),
        );
    }

    out
}

/// The node's log as the detail panel would show it.
pub fn format_logs(loaded: &LoadedTopology, node_id: &str) -> Result<String> {
    let mut controller = SelectionController::new(&loaded.topology);
    controller.select(node_id)?;

    let panel = DetailPanel::new(&loaded.topology, &loaded.logs);
    let Some(view) = panel.compose(controller.current(), Local::now()) else {
        bail!("Node '{}' has no detail view", node_id);
    };

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {} {}  {}",
        view.glyph,
        view.label.bright_white().bold(),
        format!("({})", view.node_id).bright_black(),
        paint(view.badge.text, view.badge.style.border_color).bold(),
    );
    let _ = writeln!(
        out,
        "{} alerts: {}  warnings: {}  lines: {}",
        "→".blue(),
        view.counts.alerts(),
        view.counts.warn,
        view.counts.total()
    );
    out.push('\n');

    match &view.body {
        PanelBody::Placeholder(text) => {
            let _ = writeln!(out, "{}", paint_severity(text, Severity::Info).italic());
        }
        PanelBody::Entries(entries) => {
            for entry in entries {
                let _ = writeln!(
                    out,
                    "{} {}",
                    entry.time_label().bright_black(),
                    paint_severity(entry.text, entry.severity)
                );
            }
        }
    }

    Ok(out)
}

pub fn format_check(loaded: &LoadedTopology) -> String {
    let topology = &loaded.topology;
    let mut out = String::new();
    let _ = writeln!(out, "{} {} is valid", "✓".green().bold(), loaded.source);
    let _ = writeln!(out, "{} Nodes: {}", "→".blue(), topology.nodes().len());
    let _ = writeln!(out, "{} Links: {}", "→".blue(), topology.links().len());
    let _ = writeln!(out, "{} Nodes with logs: {}", "→".blue(), loaded.logs.len());

    let critical: Vec<&str> = topology
        .nodes()
        .iter()
        .filter(|n| n.status == NodeStatus::Critical)
        .map(|n| n.id.as_str())
        .collect();
    if !critical.is_empty() {
        let _ = writeln!(out, "{} Critical: {}", "⚠".yellow().bold(), critical.join(", "));
    }
    out
}

/// Writes the bundled topology to `path`; refuses to clobber without `force`.
pub fn init_topology(path: &Path, force: bool) -> Result<PathBuf> {
    let path = expand_path(&path.to_string_lossy());

    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(&path, BUNDLED_TOPOLOGY)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    tracing::info!(path = %path.display(), "wrote bundled topology");
    Ok(path)
}

pub fn handle_show(topology: Option<&Path>) -> Result<()> {
    let loaded = load_topology(topology)?;
    print!("{}", format_show(&loaded));
    Ok(())
}

pub fn handle_logs(topology: Option<&Path>, node_id: &str) -> Result<()> {
    let loaded = load_topology(topology)?;
    print!("{}", format_logs(&loaded, node_id)?);
    Ok(())
}

pub fn handle_check(topology: Option<&Path>) -> Result<()> {
    let loaded = load_topology(topology)?;
    print!("{}", format_check(&loaded));
    Ok(())
}

pub fn handle_init(path: &Path, force: bool) -> Result<()> {
    let written = init_topology(path, force)?;
    println!("{} NetOptix initialization complete!", "✓".green().bold());
    println!(
        "{} Topology: {}",
        "✓".green().bold(),
        written.display().to_string().bright_white()
    );
    println!(
        "{} Edit it, then run {}",
        "→".blue(),
        "netoptix check".bright_cyan()
    );
    Ok(())
}

pub fn handle_ui(topology: Option<&Path>) -> Result<()> {
    let loaded = load_topology(topology)?;
    netoptix_tui::run(loaded).context("Error running TUI")
}
