use crate::theme;
use netoptix_core::panel::{PanelBody, PanelView};
use netoptix_core::style::palette;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Header lines: badge, device type, neighbours, tag counts.
fn header_lines(view: &PanelView<'_>) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!(" {} ", view.badge.text), theme::badge(view.badge.style)),
            Span::raw("  "),
            Span::styled(view.device_type.as_str().to_string(), theme::muted()),
        ]),
        Line::from(""),
    ];

    let neighbors = if view.neighbors.is_empty() {
        "none".to_string()
    } else {
        view.neighbors
            .iter()
            .map(|id| id.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };
    lines.push(Line::from(vec![
        Span::styled("Links: ", theme::muted()),
        Span::raw(neighbors),
    ]));

    let counts = view.counts;
    lines.push(Line::from(vec![
        Span::styled("Alerts: ", theme::muted()),
        Span::styled(
            counts.alerts().to_string(),
            if counts.alerts() > 0 {
                Style::default()
                    .fg(theme::color(palette::ALERT))
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme::color(palette::SUCCESS))
            },
        ),
        Span::styled("  Warnings: ", theme::muted()),
        Span::styled(
            counts.warn.to_string(),
            Style::default().fg(theme::color(palette::CAUTION)),
        ),
        Span::styled("  Lines: ", theme::muted()),
        Span::raw(counts.total().to_string()),
    ]));

    lines
}

/// One styled line per log entry, or the placeholder.
pub fn log_lines(body: &PanelBody<'_>) -> Vec<Line<'static>> {
    match body {
        PanelBody::Placeholder(text) => vec![Line::from(Span::styled(
            *text,
            theme::muted().add_modifier(Modifier::ITALIC),
        ))],
        PanelBody::Entries(entries) => entries
            .iter()
            .map(|entry| {
                Line::from(vec![
                    Span::styled(format!("{} ", entry.time_label()), theme::muted()),
                    Span::styled(entry.text.to_string(), theme::severity(entry.severity)),
                ])
            })
            .collect(),
    }
}

/// Rows `lines` take once wrapped to `width` columns.
pub fn wrapped_height(lines: &[Line<'_>], width: u16) -> usize {
    let width = width.max(1) as usize;
    lines.iter().map(|line| line.width().max(1).div_ceil(width)).sum()
}

/// Draws the panel with the log scrolled by at most its overflow; returns
/// that overflow so the caller can clamp its scroll offset.
pub fn render(f: &mut Frame, area: Rect, view: &PanelView<'_>, scroll: u16) -> u16 {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} {} ", view.glyph, view.label))
        .title_bottom(Line::from(" x/Esc close ").right_aligned())
        .border_style(Style::default().fg(theme::color(view.badge.style.border_color)))
        .style(theme::surface());

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Header
            Constraint::Length(1), // Section title
            Constraint::Min(1),    // Logs
        ])
        .split(inner);

    f.render_widget(Paragraph::new(header_lines(view)), chunks[0]);

    let title = Paragraph::new(Line::from(vec![
        Span::styled("▸ ", Style::default().fg(theme::color(palette::INFO))),
        Span::styled("System Logs", theme::muted().add_modifier(Modifier::BOLD)),
    ]));
    f.render_widget(title, chunks[1]);

    let lines = log_lines(&view.body);
    let overflow = wrapped_height(&lines, chunks[2].width)
        .saturating_sub(chunks[2].height as usize)
        .min(u16::MAX as usize) as u16;

    let logs = Paragraph::new(lines)
        .block(Block::default().style(Style::default().bg(theme::color(palette::BACKGROUND))))
        .wrap(Wrap { trim: false })
        .scroll((scroll.min(overflow), 0));
    f.render_widget(logs, chunks[2]);

    overflow
}
