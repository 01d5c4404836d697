// Tests for CLI handler helpers

use netoptix::handlers::*;
use netoptix_core::config::{BUNDLED_TOPOLOGY, ConfigSource};
use std::fs;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};
use tracing::Level;

const SMALL_TOPOLOGY: &str = r#"{
  "nodes": [
    {"id": "R1", "label": "Core", "deviceType": "router", "status": "healthy", "position": {"x": 0, "y": 0}},
    {"id": "H1", "label": "Host", "deviceType": "endpoint", "status": "critical", "position": {"x": 100, "y": 0}}
  ],
  "links": [
    {"id": "r1-h1", "sourceId": "R1", "targetId": "H1", "category": "access"}
  ],
  "logs": {
    "R1": "[WARN] fan speed low\n[CRITICAL] PSU failure\nplain line"
  }
}"#;

fn write_topology(json: &str) -> NamedTempFile {
    colored::control::set_override(false);
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", json).unwrap();
    file
}

// ============================================================================
// Loading Tests
// ============================================================================

#[test]
fn test_load_topology_explicit_file() {
    let file = write_topology(SMALL_TOPOLOGY);
    let loaded = load_topology(Some(file.path())).unwrap();

    assert_eq!(loaded.source, ConfigSource::File(file.path().to_path_buf()));
    assert_eq!(loaded.topology.nodes().len(), 2);
    assert_eq!(loaded.logs.len(), 1);
}

#[test]
fn test_load_topology_missing_file_is_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.json");

    let err = load_topology(Some(&missing)).unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("Failed to load"));
    assert!(message.contains("nope.json"));
}

#[test]
fn test_load_topology_reports_dangling_link() {
    let broken = SMALL_TOPOLOGY.replace(r#""targetId": "H1""#, r#""targetId": "H9""#);
    let file = write_topology(&broken);

    let message = format!("{:#}", load_topology(Some(file.path())).unwrap_err());
    assert!(message.contains("Link 'r1-h1' references unknown target node 'H9'"));
}

// ============================================================================
// Output Formatting Tests
// ============================================================================

#[test]
fn test_format_show_lists_nodes_and_links() {
    let file = write_topology(SMALL_TOPOLOGY);
    let loaded = load_topology(Some(file.path())).unwrap();
    let out = format_show(&loaded);

    assert!(out.contains("Nodes (2)"));
    assert!(out.contains("Links (1)"));
    assert!(out.contains("critical"));
    assert!(out.contains("→ H1"));
    assert!(out.contains("r1-h1"));
    assert!(out.contains("access"));
}

#[test]
fn test_format_logs_keeps_order_and_counts() {
    let file = write_topology(SMALL_TOPOLOGY);
    let loaded = load_topology(Some(file.path())).unwrap();
    let out = format_logs(&loaded, "R1").unwrap();

    assert!(out.contains("HEALTHY"));
    assert!(out.contains("alerts: 1  warnings: 1  lines: 3"));
    let warn = out.find("[WARN] fan speed low").unwrap();
    let crit = out.find("[CRITICAL] PSU failure").unwrap();
    let plain = out.find("plain line").unwrap();
    assert!(warn < crit && crit < plain);
}

#[test]
fn test_format_logs_placeholder_without_logs() {
    let file = write_topology(SMALL_TOPOLOGY);
    let loaded = load_topology(Some(file.path())).unwrap();
    let out = format_logs(&loaded, "H1").unwrap();

    assert!(out.contains("CRITICAL"));
    assert!(out.contains("[INFO] No anomalies detected in log stream."));
    assert!(out.contains("lines: 0"));
}

#[test]
fn test_format_logs_unknown_node() {
    let file = write_topology(SMALL_TOPOLOGY);
    let loaded = load_topology(Some(file.path())).unwrap();

    let err = format_logs(&loaded, "Z9").unwrap_err();
    assert!(err.to_string().contains("Z9"));
}

#[test]
fn test_format_check_summary() {
    let file = write_topology(BUNDLED_TOPOLOGY);
    let loaded = load_topology(Some(file.path())).unwrap();
    let out = format_check(&loaded);

    assert!(out.contains("is valid"));
    assert!(out.contains("Nodes: 13"));
    assert!(out.contains("Links: 18"));
    assert!(out.contains("Nodes with logs: 5"));
    assert!(out.contains("Critical: N2"));
}

// ============================================================================
// Init Tests
// ============================================================================

#[test]
fn test_init_writes_bundled_topology() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("nested").join("topology.json");

    let written = init_topology(&target, false).unwrap();
    assert_eq!(written, target);
    assert_eq!(fs::read_to_string(&target).unwrap(), BUNDLED_TOPOLOGY);

    // and it loads back
    let loaded = load_topology(Some(&target)).unwrap();
    assert_eq!(loaded.topology.nodes().len(), 13);
}

#[test]
fn test_init_refuses_to_overwrite() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("topology.json");
    fs::write(&target, "{}").unwrap();

    let err = init_topology(&target, false).unwrap_err();
    assert!(err.to_string().contains("--force"));
    assert_eq!(fs::read_to_string(&target).unwrap(), "{}");
}

#[test]
fn test_init_force_overwrites() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("topology.json");
    fs::write(&target, "{}").unwrap();

    init_topology(&target, true).unwrap();
    assert_eq!(fs::read_to_string(&target).unwrap(), BUNDLED_TOPOLOGY);
}

// ============================================================================
// Verbosity Tests
// ============================================================================

#[test]
fn test_verbosity_levels() {
    assert_eq!(verbosity_level(0), Level::WARN);
    assert_eq!(verbosity_level(1), Level::INFO);
    assert_eq!(verbosity_level(2), Level::DEBUG);
    assert_eq!(verbosity_level(3), Level::TRACE);
    assert_eq!(verbosity_level(9), Level::TRACE);
}
