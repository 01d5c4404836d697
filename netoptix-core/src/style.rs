// Visual encoding: semantic state in, rendering parameters out.
// Every function here is total over its enum and free of side effects.

use crate::logs::Severity;
use crate::model::{DeviceType, LinkCategory, NodeStatus};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Framework-neutral 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rrggbb` or `rrggbb`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Composites this color at `opacity` over `background`.
    pub fn blend_over(self, background: Rgb, opacity: f32) -> Rgb {
        let a = opacity.clamp(0.0, 1.0);
        let mix = |fg: u8, bg: u8| (fg as f32 * a + bg as f32 * (1.0 - a)).round() as u8;
        Rgb::new(
            mix(self.r, background.r),
            mix(self.g, background.g),
            mix(self.b, background.b),
        )
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

pub mod palette {
    use super::Rgb;

    pub const BACKGROUND: Rgb = Rgb::new(0x1a, 0x1a, 0x1a);
    pub const SURFACE: Rgb = Rgb::new(0x2a, 0x2a, 0x2a);
    pub const SUCCESS: Rgb = Rgb::new(0x00, 0xff, 0x00);
    pub const ALERT: Rgb = Rgb::new(0xff, 0x00, 0x00);
    pub const CAUTION: Rgb = Rgb::new(0xff, 0xcc, 0x00);
    pub const INFO: Rgb = Rgb::new(0x00, 0xcc, 0xff);
    pub const NEUTRAL: Rgb = Rgb::new(0x66, 0x66, 0x66);
    pub const MUTED: Rgb = Rgb::new(0x9c, 0xa3, 0xaf);
    pub const TEXT: Rgb = Rgb::new(0xff, 0xff, 0xff);

    pub const ALGO_128: Rgb = Rgb::new(0xa8, 0x55, 0xf7);
    pub const ALGO_129: Rgb = Rgb::new(0xf5, 0x9e, 0x0b);
    pub const ALGO_130: Rgb = Rgb::new(0x10, 0xb9, 0x81);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusStyle {
    pub border_color: Rgb,
    pub emphasis_glow: bool,
}

pub fn style_for_status(status: NodeStatus) -> StatusStyle {
    match status {
        NodeStatus::Critical => StatusStyle {
            border_color: palette::ALERT,
            emphasis_glow: true,
        },
        NodeStatus::Warning => StatusStyle {
            border_color: palette::CAUTION,
            emphasis_glow: false,
        },
        NodeStatus::Healthy => StatusStyle {
            border_color: palette::SUCCESS,
            emphasis_glow: false,
        },
    }
}

/// Badge text shown next to a node's label.
pub fn badge_for_status(status: NodeStatus) -> &'static str {
    match status {
        NodeStatus::Healthy => "HEALTHY",
        NodeStatus::Warning => "WARNING",
        NodeStatus::Critical => "CRITICAL",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CornerRadius {
    Circular,
    Rounded(u16),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeShape {
    pub corner_radius: CornerRadius,
    /// Diameter (or side) in diagram units.
    pub relative_size: u16,
}

impl NodeShape {
    pub fn is_circular(&self) -> bool {
        self.corner_radius == CornerRadius::Circular
    }
}

pub fn shape_for_device_type(device_type: DeviceType) -> NodeShape {
    match device_type {
        DeviceType::Router => NodeShape {
            corner_radius: CornerRadius::Circular,
            relative_size: 60,
        },
        DeviceType::Switch => NodeShape {
            corner_radius: CornerRadius::Rounded(8),
            relative_size: 50,
        },
        DeviceType::Endpoint => NodeShape {
            corner_radius: CornerRadius::Circular,
            relative_size: 40,
        },
    }
}

pub fn glyph_for_device_type(device_type: DeviceType) -> &'static str {
    match device_type {
        DeviceType::Router => "◉",
        DeviceType::Switch => "▣",
        DeviceType::Endpoint => "●",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashPattern {
    Solid,
    /// Alternating drawn/skipped run lengths, in diagram units.
    Dashed { on: u8, off: u8 },
}

impl DashPattern {
    /// Whether the point `distance` units along a stroke is inked,
    /// with the pattern shifted forward by `offset` units.
    pub fn is_inked(&self, distance: f64, offset: f64) -> bool {
        match *self {
            DashPattern::Solid => true,
            DashPattern::Dashed { on, off } => {
                let period = (on as f64 + off as f64).max(1.0);
                (distance - offset).rem_euclid(period) < on as f64
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkStyle {
    pub color: Rgb,
    pub dash_pattern: DashPattern,
    pub stroke_width: f32,
    pub opacity: f32,
    pub animated: bool,
    /// Higher draws later.
    pub z_order: u8,
    pub drop_shadow: bool,
}

pub fn style_for_link_category(category: LinkCategory) -> LinkStyle {
    match category {
        LinkCategory::PrimaryPath => LinkStyle {
            color: palette::INFO,
            dash_pattern: DashPattern::Solid,
            stroke_width: 3.0,
            opacity: 1.0,
            animated: true,
            z_order: 10,
            drop_shadow: false,
        },
        LinkCategory::Algo128 => LinkStyle {
            color: palette::ALGO_128,
            dash_pattern: DashPattern::Dashed { on: 6, off: 4 },
            stroke_width: 1.5,
            opacity: 0.6,
            animated: false,
            z_order: 3,
            drop_shadow: false,
        },
        LinkCategory::Algo129 => LinkStyle {
            color: palette::ALGO_129,
            dash_pattern: DashPattern::Dashed { on: 10, off: 5 },
            stroke_width: 1.5,
            opacity: 0.6,
            animated: false,
            z_order: 2,
            drop_shadow: false,
        },
        LinkCategory::Algo130 => LinkStyle {
            color: palette::ALGO_130,
            dash_pattern: DashPattern::Dashed { on: 3, off: 4 },
            stroke_width: 1.5,
            opacity: 0.6,
            animated: false,
            z_order: 1,
            drop_shadow: false,
        },
        LinkCategory::Access => LinkStyle {
            color: palette::NEUTRAL,
            dash_pattern: DashPattern::Solid,
            stroke_width: 1.0,
            opacity: 0.5,
            animated: false,
            z_order: 0,
            drop_shadow: false,
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeverityStyle {
    pub color: Rgb,
    pub bold: bool,
}

pub fn style_for_severity(severity: Severity) -> SeverityStyle {
    match severity {
        Severity::Critical | Severity::Error => SeverityStyle {
            color: palette::ALERT,
            bold: true,
        },
        Severity::Warn => SeverityStyle {
            color: palette::CAUTION,
            bold: false,
        },
        Severity::Config => SeverityStyle {
            color: palette::INFO,
            bold: false,
        },
        Severity::Info => SeverityStyle {
            color: palette::MUTED,
            bold: false,
        },
    }
}
