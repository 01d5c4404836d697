// Tests for detail panel composition, including the end-to-end click flow

use chrono::{Local, TimeZone};
use netoptix_core::config::{ConfigSource, load_bundled, load_from_str};
use netoptix_core::logs::{NO_ANOMALIES_PLACEHOLDER, Severity};
use netoptix_core::model::{DeviceType, NodeStatus};
use netoptix_core::panel::{DetailPanel, PanelBody};
use netoptix_core::selection::{Selection, SelectionController};
use netoptix_core::style::{palette, style_for_severity};

const SMALL: &str = r#"{
    "nodes": [
        {"id": "N5", "label": "N5", "deviceType": "router", "status": "healthy", "position": {"x": 0, "y": 0}},
        {"id": "N6", "label": "Edge six", "deviceType": "switch", "status": "warning", "position": {"x": 10, "y": 0}}
    ],
    "links": [
        {"id": "l1", "sourceId": "N5", "targetId": "N6", "category": "access", "animated": false}
    ],
    "logs": {"N5": "[WARN] a\n[INFO] b"}
}"#;

// ============================================================================
// Composition Tests
// ============================================================================

#[test]
fn test_idle_renders_nothing() {
    let loaded = load_bundled().unwrap();
    let panel = DetailPanel::new(&loaded.topology, &loaded.logs);
    assert!(panel.compose(&Selection::Idle, Local::now()).is_none());
}

#[test]
fn test_missing_logs_render_placeholder() {
    let loaded = load_from_str(SMALL, ConfigSource::Bundled).unwrap();
    assert_eq!(loaded.logs.logs_for("N6"), None);

    let panel = DetailPanel::new(&loaded.topology, &loaded.logs);
    let view = panel
        .compose(&Selection::Inspecting("N6".into()), Local::now())
        .unwrap();

    assert_eq!(view.body, PanelBody::Placeholder(NO_ANOMALIES_PLACEHOLDER));
    assert_eq!(view.counts.total(), 0);
    assert_eq!(view.label, "Edge six");
    assert_eq!(view.device_type, DeviceType::Switch);
    assert_eq!(view.badge.text, "WARNING");
    assert_eq!(view.badge.style.border_color, palette::CAUTION);
}

#[test]
fn test_blank_log_blob_renders_placeholder() {
    let json = SMALL.replace(r#""logs": {"N5": "[WARN] a\n[INFO] b"}"#, r#""logs": {"N5": "", "N6": " \n\n"}"#);
    assert_ne!(json, SMALL);
    let loaded = load_from_str(&json, ConfigSource::Bundled).unwrap();
    let panel = DetailPanel::new(&loaded.topology, &loaded.logs);

    for id in ["N5", "N6"] {
        let view = panel
            .compose(&Selection::Inspecting(id.into()), Local::now())
            .unwrap();
        assert_eq!(view.body, PanelBody::Placeholder(NO_ANOMALIES_PLACEHOLDER));
        assert_eq!(view.counts.total(), 0);
    }
}

#[test]
fn test_present_logs_render_classified_entries() {
    let loaded = load_from_str(SMALL, ConfigSource::Bundled).unwrap();
    let panel = DetailPanel::new(&loaded.topology, &loaded.logs);
    let view = panel
        .compose(&Selection::Inspecting("N5".into()), Local::now())
        .unwrap();

    let PanelBody::Entries(entries) = &view.body else {
        panic!("expected entries");
    };
    let severities: Vec<Severity> = entries.iter().map(|e| e.severity).collect();
    assert_eq!(severities, vec![Severity::Warn, Severity::Info]);
    assert_eq!(view.neighbors.len(), 1);
    assert_eq!(view.neighbors[0], "N6");
}

#[test]
fn test_entries_share_the_compose_timestamp() {
    let loaded = load_bundled().unwrap();
    let panel = DetailPanel::new(&loaded.topology, &loaded.logs);
    let now = Local.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    let view = panel.compose(&Selection::Inspecting("N1".into()), now).unwrap();

    let PanelBody::Entries(entries) = view.body else {
        panic!("expected entries");
    };
    assert!(entries.iter().all(|e| e.timestamp == now));
}

// ============================================================================
// End-to-end Scenario
// ============================================================================

#[test]
fn test_click_n2_then_n1_then_dismiss() {
    let loaded = load_bundled().unwrap();
    let mut controller = SelectionController::new(&loaded.topology);
    let panel = DetailPanel::new(&loaded.topology, &loaded.logs);

    // click N2
    controller.select("N2").unwrap();
    assert_eq!(controller.current(), &Selection::Inspecting("N2".into()));

    let view = panel.compose(controller.current(), Local::now()).unwrap();
    assert_eq!(view.status, NodeStatus::Critical);
    assert_eq!(view.badge.text, "CRITICAL");
    assert!(view.badge.style.emphasis_glow);
    assert_eq!(view.badge.style.border_color, palette::ALERT);

    let PanelBody::Entries(entries) = &view.body else {
        panic!("N2 has logs");
    };
    let expected = [
        Severity::Critical,
        Severity::Warn,
        Severity::Config,
        Severity::Info,
        Severity::Info,
        Severity::Info,
        Severity::Error,
    ];
    let got: Vec<Severity> = entries.iter().map(|e| e.severity).collect();
    assert_eq!(got, expected);
    assert!(entries[0].text.starts_with("[CRITICAL] Interface ge-ts11/2"));
    assert!(entries[6].text.starts_with("[ERROR] Neighbor 12.12.1.1"));

    for entry in entries {
        let style = style_for_severity(entry.severity);
        if matches!(entry.severity, Severity::Critical | Severity::Error) {
            assert_eq!(style.color, palette::ALERT);
            assert!(style.bold);
        } else {
            assert_ne!(style.color, palette::ALERT);
        }
    }
    assert_eq!(view.counts.alerts(), 2);

    // click N1 directly
    let event = controller.select("N1").unwrap();
    assert_eq!(event.previous, Selection::Inspecting("N2".into()));
    assert_eq!(controller.current(), &Selection::Inspecting("N1".into()));
    let view = panel.compose(controller.current(), Local::now()).unwrap();
    assert_eq!(view.badge.text, "HEALTHY");

    // dismiss
    controller.dismiss();
    assert_eq!(controller.current(), &Selection::Idle);
    assert!(panel.compose(controller.current(), Local::now()).is_none());
}

#[test]
fn test_endpoint_without_logs_in_bundled_topology() {
    let loaded = load_bundled().unwrap();
    let panel = DetailPanel::new(&loaded.topology, &loaded.logs);
    let view = panel
        .compose(&Selection::Inspecting("Teq9".into()), Local::now())
        .unwrap();
    assert_eq!(view.glyph, "●");
    assert!(matches!(view.body, PanelBody::Placeholder(_)));
    assert_eq!(view.neighbors.len(), 1);
    assert_eq!(view.neighbors[0], "CE");
}
