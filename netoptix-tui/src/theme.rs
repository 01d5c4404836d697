// Bridges the framework-neutral style types onto ratatui styles

use netoptix_core::logs::Severity;
use netoptix_core::style::{Rgb, StatusStyle, palette, style_for_severity};
use ratatui::style::{Color, Modifier, Style};

pub fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

/// `rgb` at `opacity` over the diagram background.
pub fn faded(rgb: Rgb, opacity: f32) -> Color {
    color(rgb.blend_over(palette::BACKGROUND, opacity))
}

pub fn severity(severity: Severity) -> Style {
    let s = style_for_severity(severity);
    let style = Style::default().fg(color(s.color));
    if s.bold {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

pub fn badge(status: StatusStyle) -> Style {
    let style = Style::default()
        .fg(color(status.border_color))
        .bg(faded(status.border_color, 0.2))
        .add_modifier(Modifier::BOLD);
    if status.emphasis_glow {
        style.add_modifier(Modifier::SLOW_BLINK)
    } else {
        style
    }
}

pub fn muted() -> Style {
    Style::default().fg(color(palette::MUTED))
}

pub fn surface() -> Style {
    Style::default()
        .bg(color(palette::SURFACE))
        .fg(color(palette::TEXT))
}
