// Tests for loading and validating topology configuration

use netoptix_core::config::{
    BUNDLED_TOPOLOGY, ConfigSource, TopologyConfig, load, load_bundled, load_from_path,
    load_from_str, resolve_source,
};
use netoptix_core::error::ConfigError;
use netoptix_core::model::{DeviceType, LinkCategory, NodeStatus};
use std::fs;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

fn doc(nodes: &str, links: &str, logs: &str) -> String {
    format!(r#"{{"nodes": [{nodes}], "links": [{links}], "logs": {{{logs}}}}}"#)
}

const NODE_A: &str = r#"{"id": "A", "label": "A", "deviceType": "router", "status": "healthy", "position": {"x": 0, "y": 0}}"#;
const NODE_B: &str = r#"{"id": "B", "label": "B", "deviceType": "endpoint", "status": "critical", "position": {"x": 5.5, "y": -2}}"#;

// ============================================================================
// Bundled Topology Tests
// ============================================================================

#[test]
fn test_bundled_topology_loads() {
    let loaded = load_bundled().unwrap();
    assert_eq!(loaded.source, ConfigSource::Bundled);
    assert_eq!(loaded.topology.nodes().len(), 13);
    assert_eq!(loaded.topology.links().len(), 18);
    assert_eq!(loaded.logs.len(), 5);
}

#[test]
fn test_bundled_topology_invariants() {
    let loaded = load_bundled().unwrap();
    let topology = &loaded.topology;

    for link in topology.links() {
        assert!(topology.node(link.source_id.as_str()).is_some());
        assert!(topology.node(link.target_id.as_str()).is_some());
    }
    for node in topology.nodes() {
        assert!(DeviceType::ALL.contains(&node.device_type));
        assert!(NodeStatus::ALL.contains(&node.status));
    }

    let n2 = topology.node("N2").unwrap();
    assert_eq!(n2.status, NodeStatus::Critical);
    assert_eq!(topology.node("Teq9").unwrap().device_type, DeviceType::Endpoint);
    assert!(topology.links().iter().any(|l| l.emphasis));
    assert!(
        topology
            .links()
            .iter()
            .any(|l| l.category == LinkCategory::Algo130)
    );
}

#[test]
fn test_bundled_logs_cover_only_known_nodes() {
    let loaded = load_bundled().unwrap();
    for id in loaded.logs.node_ids() {
        assert!(loaded.topology.contains(id.as_str()));
    }
    assert!(loaded.logs.logs_for("N2").unwrap().contains("[CRITICAL]"));
    assert!(loaded.logs.logs_for("N5").is_none());
}

// ============================================================================
// Validation Tests
// ============================================================================

#[test]
fn test_minimal_document() {
    let json = format!(r#"{{"nodes": [{NODE_A}]}}"#);
    let loaded = load_from_str(&json, ConfigSource::Bundled).unwrap();
    assert_eq!(loaded.topology.nodes().len(), 1);
    assert!(loaded.topology.links().is_empty());
    assert!(loaded.logs.is_empty());
}

#[test]
fn test_emphasis_defaults_to_false() {
    let json = doc(
        &format!("{NODE_A}, {NODE_B}"),
        r#"{"id": "l", "sourceId": "A", "targetId": "B", "category": "algo-128", "animated": true}"#,
        "",
    );
    let loaded = load_from_str(&json, ConfigSource::Bundled).unwrap();
    let link = loaded.topology.link("l").unwrap();
    assert!(link.animated);
    assert!(!link.emphasis);
}

#[test]
fn test_dangling_link_names_the_reference() {
    let json = doc(
        NODE_A,
        r#"{"id": "bad", "sourceId": "A", "targetId": "ghost", "category": "access", "animated": false}"#,
        "",
    );
    let err = load_from_str(&json, ConfigSource::Bundled).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("bad"));
    assert!(message.contains("ghost"));
}

#[test]
fn test_unknown_category_is_a_config_error() {
    let json = doc(
        &format!("{NODE_A}, {NODE_B}"),
        r#"{"id": "l", "sourceId": "A", "targetId": "B", "category": "algo-999", "animated": false}"#,
        "",
    );
    let err = load_from_str(&json, ConfigSource::Bundled).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_unknown_device_type_is_a_config_error() {
    let json = doc(
        r#"{"id": "A", "label": "A", "deviceType": "firewall", "status": "healthy", "position": {"x": 0, "y": 0}}"#,
        "",
        "",
    );
    assert!(matches!(
        load_from_str(&json, ConfigSource::Bundled),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn test_missing_status_is_a_config_error() {
    let json = doc(
        r#"{"id": "A", "label": "A", "deviceType": "router", "position": {"x": 0, "y": 0}}"#,
        "",
        "",
    );
    assert!(TopologyConfig::from_json(&json).is_err());
}

#[test]
fn test_unknown_top_level_field_is_rejected() {
    let json = format!(r#"{{"nodes": [{NODE_A}], "edges": []}}"#);
    assert!(matches!(
        load_from_str(&json, ConfigSource::Bundled),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn test_log_for_unknown_node_is_rejected() {
    let json = doc(NODE_A, "", r#""Z": "[INFO] hi""#);
    let err = load_from_str(&json, ConfigSource::Bundled).unwrap_err();
    assert!(matches!(err, ConfigError::OrphanLog(id) if id == "Z"));
}

// ============================================================================
// File Loading Tests
// ============================================================================

#[test]
fn test_load_from_path() -> Result<(), Box<dyn std::error::Error>> {
    let mut file = NamedTempFile::new()?;
    write!(file, "{}", doc(&format!("{NODE_A}, {NODE_B}"), "", r#""B": "[ERROR] x""#))?;

    let loaded = load_from_path(file.path())?;
    assert_eq!(loaded.topology.nodes().len(), 2);
    assert_eq!(loaded.source, ConfigSource::File(file.path().to_path_buf()));
    assert_eq!(loaded.logs.logs_for("B"), Some("[ERROR] x"));

    Ok(())
}

#[test]
fn test_load_from_missing_path_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("absent.json");
    let err = load_from_path(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("absent.json"));
}

#[test]
fn test_bundled_text_round_trips_through_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("topology.json");
    fs::write(&path, BUNDLED_TOPOLOGY).unwrap();

    let from_file = load(ConfigSource::File(path)).unwrap();
    let bundled = load_bundled().unwrap();
    assert_eq!(from_file.topology.nodes(), bundled.topology.nodes());
    assert_eq!(from_file.topology.links(), bundled.topology.links());
}

// ============================================================================
// Source Resolution Tests
// ============================================================================

#[test]
fn test_explicit_path_wins() {
    let temp_dir = TempDir::new().unwrap();
    let explicit = temp_dir.path().join("mine.json");
    let user = temp_dir.path().join("user.json");
    fs::write(&user, "{}").unwrap();

    assert_eq!(
        resolve_source(Some(&explicit), &user),
        ConfigSource::File(explicit.clone())
    );
}

#[test]
fn test_user_default_used_when_present() {
    let temp_dir = TempDir::new().unwrap();
    let user = temp_dir.path().join("user.json");
    fs::write(&user, "{}").unwrap();

    assert_eq!(resolve_source(None, &user), ConfigSource::File(user.clone()));
}

#[test]
fn test_falls_back_to_bundled() {
    let temp_dir = TempDir::new().unwrap();
    let user = temp_dir.path().join("user.json");
    assert_eq!(resolve_source(None, &user), ConfigSource::Bundled);
}
