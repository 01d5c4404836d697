// Diagram surface: paints the resolved scene onto a braille canvas and maps
// terminal cells back to diagram coordinates for click handling.

use crate::theme;
use netoptix_core::model::Position;
use netoptix_core::scene::{RenderLink, RenderNode, Scene};
use netoptix_core::style::{DashPattern, palette};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    symbols::Marker,
    text::Span,
    widgets::{
        Block, Borders,
        canvas::{Canvas, Circle, Context, Line as CanvasLine, Rectangle},
    },
};

/// Margin around the outermost shapes, in diagram units.
const PADDING: f64 = 40.0;

/// Diagram units per dash-pattern unit on a terminal.
const DASH_SCALE: f64 = 3.0;

/// Length of the sub-segments dashed links are cut into.
const DASH_STEP: f64 = 2.0;

// Symbol used to render traffic particles on animated links
const PARTICLE_SYMBOL: &str = "•";
const PARTICLE_OFFSETS: [f32; 3] = [0.0, 0.33, 0.66];

/// Visible diagram window. Diagram `y` grows downwards, canvas `y` upwards,
/// so the canvas is fed `-y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: [f64; 2],
    pub y: [f64; 2],
}

impl Viewport {
    pub fn fit(scene: &Scene) -> Self {
        match scene.bounds() {
            Some((min, max)) => Self {
                x: [min.x - PADDING, max.x + PADDING],
                y: [min.y - PADDING, max.y + PADDING],
            },
            None => Self {
                x: [0.0, 100.0],
                y: [0.0, 100.0],
            },
        }
    }

    fn canvas_y_bounds(&self) -> [f64; 2] {
        [-self.y[1], -self.y[0]]
    }

    fn width(&self) -> f64 {
        self.x[1] - self.x[0]
    }

    fn height(&self) -> f64 {
        self.y[1] - self.y[0]
    }

    /// Diagram position at the centre of terminal cell `(column, row)`.
    pub fn to_world(&self, area: Rect, column: u16, row: u16) -> Option<Position> {
        if area.width == 0
            || area.height == 0
            || column < area.x
            || row < area.y
            || column >= area.x + area.width
            || row >= area.y + area.height
        {
            return None;
        }

        let fx = (column - area.x) as f64 + 0.5;
        let fy = (row - area.y) as f64 + 0.5;
        Some(Position::new(
            self.x[0] + fx / area.width as f64 * self.width(),
            self.y[0] + fy / area.height as f64 * self.height(),
        ))
    }

    /// Terminal cell containing diagram position `pos`.
    pub fn to_cell(&self, area: Rect, pos: Position) -> Option<(u16, u16)> {
        let fx = (pos.x - self.x[0]) / self.width();
        let fy = (pos.y - self.y[0]) / self.height();
        if !(0.0..1.0).contains(&fx) || !(0.0..1.0).contains(&fy) {
            return None;
        }
        Some((
            area.x + (fx * area.width as f64) as u16,
            area.y + (fy * area.height as f64) as u16,
        ))
    }

    /// Diagram units covered by one terminal cell along its larger side.
    pub fn cell_extent(&self, area: Rect) -> f64 {
        let w = self.width() / area.width.max(1) as f64;
        let h = self.height() / area.height.max(1) as f64;
        w.max(h)
    }
}

/// Per-frame inputs besides the scene itself.
#[derive(Debug, Clone, Copy)]
pub struct DiagramState<'a> {
    pub focused: Option<&'a str>,
    pub selected: Option<&'a str>,
    pub phase: f32,
}

/// Draws the diagram into `area`; returns the inner (hit-testable) rect.
pub fn render(f: &mut Frame, area: Rect, scene: &Scene, viewport: Viewport, state: DiagramState<'_>) -> Rect {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Topology ")
        .border_style(theme::muted());
    let inner = block.inner(area);
    let cell = viewport.cell_extent(inner);

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .background_color(theme::color(palette::BACKGROUND))
        .x_bounds(viewport.x)
        .y_bounds(viewport.canvas_y_bounds())
        .paint(move |ctx| {
            for link in &scene.links {
                draw_link(ctx, link, state.phase, cell);
            }
            ctx.layer();
            for node in &scene.nodes {
                draw_node(ctx, node, &state, cell);
            }
        });

    f.render_widget(canvas, area);
    inner
}

fn segment(ctx: &mut Context<'_>, from: (f64, f64), to: (f64, f64), color: ratatui::style::Color) {
    ctx.draw(&CanvasLine {
        x1: from.0,
        y1: -from.1,
        x2: to.0,
        y2: -to.1,
        color,
    });
}

/// Point at fraction `t` of the way from `start` to `end`.
fn lerp(start: (f64, f64), end: (f64, f64), t: f64) -> (f64, f64) {
    (start.0 + (end.0 - start.0) * t, start.1 + (end.1 - start.1) * t)
}

fn stroke(ctx: &mut Context<'_>, from: (f64, f64), to: (f64, f64), dash: DashPattern, offset: f64, color: ratatui::style::Color) {
    let length = ((to.0 - from.0).powi(2) + (to.1 - from.1).powi(2)).sqrt();
    if length == 0.0 {
        return;
    }

    if dash == DashPattern::Solid {
        segment(ctx, from, to, color);
        return;
    }

    let steps = (length / DASH_STEP).ceil() as usize;
    for i in 0..steps {
        let d0 = i as f64 * DASH_STEP;
        let d1 = (d0 + DASH_STEP).min(length);
        if dash.is_inked((d0 + d1) / 2.0 / DASH_SCALE, offset) {
            segment(ctx, lerp(from, to, d0 / length), lerp(from, to, d1 / length), color);
        }
    }
}

fn draw_link(ctx: &mut Context<'_>, link: &RenderLink, phase: f32, cell: f64) {
    let style = link.style;
    let from = (link.from.x, link.from.y);
    let to = (link.to.x, link.to.y);
    let color = theme::faded(style.color, style.opacity);

    // moving dashes: shift the pattern forward with the animation phase
    let offset = match (style.animated, style.dash_pattern) {
        (true, DashPattern::Dashed { on, off }) => phase as f64 * (on as f64 + off as f64),
        _ => 0.0,
    };

    // unit normal, used for shadow and extra stroke width
    let length = ((to.0 - from.0).powi(2) + (to.1 - from.1).powi(2)).sqrt().max(f64::EPSILON);
    let normal = (-(to.1 - from.1) / length, (to.0 - from.0) / length);
    let shift = |p: (f64, f64), k: f64| (p.0 + normal.0 * cell * k, p.1 + normal.1 * cell * k);

    if style.drop_shadow {
        let shadow = theme::faded(style.color, 0.25);
        stroke(ctx, shift(from, 0.6), shift(to, 0.6), style.dash_pattern, offset, shadow);
    }

    stroke(ctx, from, to, style.dash_pattern, offset, color);
    if style.stroke_width >= 2.5 {
        stroke(ctx, shift(from, 0.25), shift(to, 0.25), style.dash_pattern, offset, color);
    }

    if style.animated {
        let particle = Style::default().fg(theme::color(style.color));
        for &p in &PARTICLE_OFFSETS {
            let t = ((phase + p) % 1.0) as f64;
            let (x, y) = lerp(from, to, t);
            ctx.print(x, -y, Span::styled(PARTICLE_SYMBOL, particle));
        }
    }
}

fn draw_node(ctx: &mut Context<'_>, node: &RenderNode, state: &DiagramState<'_>, cell: f64) {
    let (x, y) = (node.position.x, node.position.y);
    let r = node.radius();
    let border = theme::color(node.status_style.border_color);

    if node.status_style.emphasis_glow {
        let glow = theme::faded(node.status_style.border_color, 0.35);
        for k in [1.0, 2.0] {
            ctx.draw(&Circle {
                x,
                y: -y,
                radius: r + cell * k * 0.5,
                color: glow,
            });
        }
    }

    if node.shape.is_circular() {
        ctx.draw(&Circle {
            x,
            y: -y,
            radius: r,
            color: border,
        });
    } else {
        ctx.draw(&Rectangle {
            x: x - r,
            y: -y - r,
            width: r * 2.0,
            height: r * 2.0,
            color: border,
        });
    }

    let is_selected = state.selected == Some(node.id.as_str());
    let is_focused = state.focused == Some(node.id.as_str());

    if is_selected {
        ctx.draw(&Circle {
            x,
            y: -y,
            radius: r + cell * 1.5,
            color: theme::color(palette::TEXT),
        });
    }

    let mut label_style = Style::default()
        .fg(theme::color(palette::TEXT))
        .add_modifier(Modifier::BOLD);
    if is_focused {
        label_style = label_style.add_modifier(Modifier::REVERSED);
    }
    if is_selected {
        label_style = label_style.add_modifier(Modifier::UNDERLINED);
    }

    let half = node.label.chars().count() as f64 * cell / 2.0;
    ctx.print(x - half, -y, Span::styled(node.label.clone(), label_style));
}
