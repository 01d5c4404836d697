pub mod detail_panel;
pub mod diagram;
pub mod theme;

use anyhow::Result;
use chrono::Local;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use diagram::{DiagramState, Viewport};
use netoptix_core::config::{ConfigSource, LoadedTopology};
use netoptix_core::logs::LogRepository;
use netoptix_core::model::{LinkCategory, Topology};
use netoptix_core::panel::DetailPanel;
use netoptix_core::scene::Scene;
use netoptix_core::selection::{Selection, SelectionController, SelectionEvent};
use netoptix_core::style::{DashPattern, palette, style_for_link_category};
use ratatui::{
    Frame, Terminal,
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use std::cell::Cell;
use std::io;
use std::rc::Rc;
use std::time::Duration;

/// How long the loop waits for input before advancing the animation.
const TICK: Duration = Duration::from_millis(100);
const PHASE_STEP: f32 = 0.05;
const PANEL_WIDTH: u16 = 56;

/// Interactive topology view: one diagram, one detail panel, one selection.
pub struct App {
    topology: Topology,
    logs: LogRepository,
    source: ConfigSource,
    scene: Scene,
    viewport: Viewport,
    controller: SelectionController,
    /// Index into `scene.nodes` for keyboard navigation.
    focus: Option<usize>,
    phase: f32,
    log_scroll: u16,
    /// Largest useful `log_scroll`, as of the last frame.
    max_log_scroll: u16,
    scroll_reset: Rc<Cell<bool>>,
    diagram_area: Rect,
    should_quit: bool,
}

impl App {
    pub fn new(loaded: LoadedTopology) -> Self {
        let LoadedTopology {
            topology,
            logs,
            source,
        } = loaded;

        let scene = Scene::resolve(&topology);
        let viewport = Viewport::fit(&scene);
        let mut controller = SelectionController::new(&topology);

        // A new node starts its log at the top.
        let scroll_reset = Rc::new(Cell::new(false));
        let flag = scroll_reset.clone();
        controller.subscribe(Box::new(move |event: &SelectionEvent| {
            if event.changed() {
                flag.set(true);
            }
            if let Some(id) = event.current.node_id() {
                tracing::info!(node = %id, "inspecting node");
            }
        }));

        Self {
            topology,
            logs,
            source,
            scene,
            viewport,
            controller,
            focus: None,
            phase: 0.0,
            log_scroll: 0,
            max_log_scroll: 0,
            scroll_reset,
            diagram_area: Rect::default(),
            should_quit: false,
        }
    }

    pub fn selection(&self) -> &Selection {
        self.controller.current()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn focused(&self) -> Option<&str> {
        self.focus
            .and_then(|i| self.scene.nodes.get(i))
            .map(|n| n.id.as_str())
    }

    pub fn tick(&mut self) {
        self.phase = (self.phase + PHASE_STEP) % 1.0;
    }

    fn select(&mut self, node_id: &str) {
        if let Err(e) = self.controller.select(node_id) {
            tracing::warn!("{}", e);
            return;
        }
        self.focus = self.scene.nodes.iter().position(|n| n.id == node_id);
        if self.scroll_reset.replace(false) {
            self.log_scroll = 0;
        }
    }

    fn dismiss(&mut self) {
        self.controller.dismiss();
        self.scroll_reset.set(false);
        self.log_scroll = 0;
    }

    fn move_focus(&mut self, forward: bool) {
        let count = self.scene.nodes.len();
        if count == 0 {
            return;
        }
        self.focus = Some(match (self.focus, forward) {
            (None, true) => 0,
            (None, false) => count - 1,
            (Some(i), true) => (i + 1) % count,
            (Some(i), false) => (i + count - 1) % count,
        });
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Esc => {
                if self.selection().is_idle() {
                    self.should_quit = true;
                } else {
                    self.dismiss();
                }
            }
            KeyCode::Char('x') => {
                self.dismiss();
            }
            KeyCode::Tab | KeyCode::Right | KeyCode::Down => {
                self.move_focus(true);
            }
            KeyCode::BackTab | KeyCode::Left | KeyCode::Up => {
                self.move_focus(false);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(id) = self.focused().map(str::to_string) {
                    self.select(&id);
                }
            }
            KeyCode::PageUp => {
                self.log_scroll = self.log_scroll.saturating_sub(10);
            }
            KeyCode::PageDown => {
                self.log_scroll = self.log_scroll.saturating_add(10).min(self.max_log_scroll);
            }
            _ => {}
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }

        let Some(point) = self
            .viewport
            .to_world(self.diagram_area, mouse.column, mouse.row)
        else {
            return;
        };

        let tolerance = self.viewport.cell_extent(self.diagram_area);
        let hit = self
            .scene
            .hit_test(point, tolerance)
            .map(|n| n.id.to_string());
        if let Some(id) = hit {
            self.select(&id);
        }
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            _ => {}
        }
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let header = Line::from(vec![
            Span::styled(
                " ◆ NetOptix ",
                Style::default()
                    .fg(theme::color(palette::SUCCESS))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("Live Topology Visualization", theme::muted()),
            Span::styled(format!("  [{}]", self.source), theme::muted()),
        ]);
        f.render_widget(Paragraph::new(header).style(theme::surface()), area);
    }

    fn render_legend(&self, f: &mut Frame, area: Rect) {
        let mut spans = vec![Span::raw(" ")];
        for category in LinkCategory::ALL {
            let style = style_for_link_category(category);
            let sample = if style.dash_pattern == DashPattern::Solid {
                "━━"
            } else {
                "╍╍"
            };
            spans.push(Span::styled(sample, Style::default().fg(theme::color(style.color))));
            spans.push(Span::styled(format!(" {}  ", category.as_str()), theme::muted()));
        }
        f.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_hints(&self, f: &mut Frame, area: Rect) {
        let key = Style::default().fg(Color::Black).bg(Color::Gray);
        let mut hints = vec![
            Span::styled(" click ", key),
            Span::raw(" Inspect  "),
            Span::styled(" Tab/←→ ", key),
            Span::raw(" Focus  "),
            Span::styled(" Enter ", key),
            Span::raw(" Select  "),
        ];
        if !self.selection().is_idle() {
            hints.extend([
                Span::styled(" Esc/x ", key),
                Span::raw(" Close  "),
                Span::styled(" PgUp/PgDn ", key),
                Span::raw(" Scroll  "),
            ]);
        }
        hints.extend([Span::styled(" q ", key), Span::raw(" Quit")]);

        let paragraph = Paragraph::new(Line::from(hints))
            .style(Style::default().bg(Color::Black).fg(Color::Gray));
        f.render_widget(paragraph, area);
    }
}

pub fn ui(f: &mut Frame, app: &mut App) {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(8),    // Diagram + panel
            Constraint::Length(1), // Legend
            Constraint::Length(1), // Hints bar
        ])
        .split(f.area());

    let panel = DetailPanel::new(&app.topology, &app.logs);
    let view = panel.compose(app.controller.current(), Local::now());

    let main_chunks = if view.is_some() {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(20), Constraint::Length(PANEL_WIDTH)])
            .split(vertical_chunks[1])
    } else {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(100)])
            .split(vertical_chunks[1])
    };

    let state = DiagramState {
        focused: app.focus.and_then(|i| app.scene.nodes.get(i)).map(|n| n.id.as_str()),
        selected: app.controller.current().node_id().map(|id| id.as_str()),
        phase: app.phase,
    };
    let diagram_area = diagram::render(f, main_chunks[0], &app.scene, app.viewport, state);

    let max_log_scroll = match &view {
        Some(view) => detail_panel::render(f, main_chunks[1], view, app.log_scroll),
        None => 0,
    };

    app.render_header(f, vertical_chunks[0]);
    app.render_legend(f, vertical_chunks[2]);
    app.render_hints(f, vertical_chunks[3]);
    app.diagram_area = diagram_area;
    app.max_log_scroll = max_log_scroll;
    app.log_scroll = app.log_scroll.min(max_log_scroll);
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if event::poll(TICK)? {
            app.handle_event(event::read()?);
        } else {
            app.tick();
        }

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}

/// Runs the interactive diagram until the user quits.
pub fn run(loaded: LoadedTopology) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(loaded);
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}
