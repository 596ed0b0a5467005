use std::collections::BTreeMap;
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{
    Block, BorderType, Borders, Clear, Gauge, List, ListItem, ListState, Paragraph, Widget, Wrap,
};
use tracing::{debug, info};

use crate::assets::{AssetResolver, Icon, PLACEHOLDER_ICON};
use crate::catalog::{Catalog, Recipe};
use crate::error::{Error, Result};
use crate::nav::{Route, Router};
use crate::selector::{self, DurationSelector, PrimaryControl, TimerControls, Unit};
use crate::timer::{Phase, TimerController};

pub const NOT_FOUND_MESSAGE: &str = "Cocktail not found";

/// State of one open detail screen. Owns the countdown; dropping the screen
/// releases its tick source.
pub struct DetailScreen {
    id: String,
    recipe: Option<Recipe>,
    selector: DurationSelector,
    timer: TimerController,
}

impl DetailScreen {
    pub fn open(catalog: &Catalog, id: &str, selector: DurationSelector) -> Self {
        let recipe = catalog.find_by_id(id).cloned();
        if recipe.is_none() {
            info!(id, "detail requested for unknown recipe");
        }
        Self {
            id: id.to_string(),
            recipe,
            selector,
            timer: TimerController::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn recipe(&self) -> Option<&Recipe> {
        self.recipe.as_ref()
    }

    pub fn selector(&self) -> &DurationSelector {
        &self.selector
    }

    pub fn selector_mut(&mut self) -> &mut DurationSelector {
        &mut self.selector
    }

    pub fn timer(&self) -> &TimerController {
        &self.timer
    }

    pub fn controls(&self) -> TimerControls {
        TimerControls::for_state(self.timer.phase(), self.selector.total_seconds())
    }

    pub fn press_primary(&mut self, now: Instant) {
        match self.controls().primary {
            PrimaryControl::Start { enabled: true } => {
                self.timer.start(self.selector.total_seconds(), now)
            }
            PrimaryControl::Start { enabled: false } => {
                debug!("start not offered for 00:00");
            }
            PrimaryControl::Resume => self.timer.resume(now),
            PrimaryControl::Stop => self.timer.stop(),
        }
    }

    pub fn interrupt(&mut self) {
        self.timer.interrupt();
    }

    pub fn poll(&mut self, now: Instant) {
        let ticks = self.timer.poll(now);
        if !ticks.is_empty() && self.timer.phase() == Phase::Finished {
            info!(id = %self.id, "countdown finished");
        }
    }
}

#[derive(Debug, Clone)]
enum InputMode {
    Normal,
    PickUnit { unit: Unit, list: ListState },
}

pub struct App {
    catalog: Catalog,
    /// Resolved once at startup; misses are simply absent.
    icons: BTreeMap<String, Icon>,
    router: Router,
    recipe_list: ListState,
    detail: Option<DetailScreen>,
    default_selector: DurationSelector,
    input: InputMode,
    refresh: Duration,
}

impl App {
    pub fn new(
        catalog: Catalog,
        assets: Box<dyn AssetResolver>,
        default_selector: DurationSelector,
        refresh: Duration,
    ) -> Self {
        let mut recipe_list = ListState::default();
        if !catalog.is_empty() {
            recipe_list.select(Some(0));
        }
        let mut icons = BTreeMap::new();
        for r in catalog.recipes() {
            if icons.contains_key(&r.id) {
                continue;
            }
            if let Some(icon) = assets.icon(&r.id) {
                icons.insert(r.id.clone(), icon);
            }
        }
        debug!(resolved = icons.len(), recipes = catalog.len(), "recipe icons loaded");
        Self {
            catalog,
            icons,
            router: Router::new(),
            recipe_list,
            detail: None,
            default_selector,
            input: InputMode::Normal,
            refresh,
        }
    }

    pub fn route(&self) -> &Route {
        self.router.current()
    }

    pub fn detail(&self) -> Option<&DetailScreen> {
        self.detail.as_ref()
    }

    pub fn navigate(&mut self, route: Route) {
        self.router.navigate(route);
        self.sync_screen();
    }

    pub fn navigate_up(&mut self) {
        if self.router.navigate_up() {
            self.sync_screen();
        }
    }

    fn sync_screen(&mut self) {
        self.input = InputMode::Normal;
        match self.router.current().clone() {
            Route::List => {
                // Tears down the detail screen and its countdown.
                self.detail = None;
            }
            Route::Details(id) => {
                self.detail = Some(DetailScreen::open(&self.catalog, &id, self.default_selector));
            }
        }
    }

    fn selected_recipe(&self) -> Option<&Recipe> {
        let idx = self.recipe_list.selected()?;
        self.catalog.get(idx)
    }

    fn select_next_recipe(&mut self) {
        if self.catalog.is_empty() {
            return;
        }
        let i = self.recipe_list.selected().unwrap_or(0);
        let next = (i + 1).min(self.catalog.len().saturating_sub(1));
        self.recipe_list.select(Some(next));
    }

    fn select_prev_recipe(&mut self) {
        if self.catalog.is_empty() {
            return;
        }
        let i = self.recipe_list.selected().unwrap_or(0);
        self.recipe_list.select(Some(i.saturating_sub(1)));
    }

    fn open_selected(&mut self) {
        if let Some(id) = self.selected_recipe().map(|r| r.id.clone()) {
            self.navigate(Route::Details(id));
        }
    }

    fn begin_pick(&mut self, unit: Unit) {
        let Some(d) = self.detail.as_ref() else {
            return;
        };
        let mut list = ListState::default();
        list.select(Some(d.selector().get(unit) as usize));
        self.input = InputMode::PickUnit { unit, list };
    }

    fn apply_pick(&mut self) {
        let InputMode::PickUnit { unit, list } = &self.input else {
            return;
        };
        let unit = *unit;
        let value = list.selected().unwrap_or(0) as u32;
        if let Some(d) = self.detail.as_mut() {
            d.selector_mut().set(unit, value);
            debug!(unit = unit.label(), value, "duration selected");
        }
        self.input = InputMode::Normal;
    }

    /// How long the event loop may sleep before the next redraw or tick.
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        let deadline = self
            .detail
            .as_ref()
            .and_then(|d| d.timer().next_deadline());
        match deadline {
            Some(at) => at.saturating_duration_since(now).min(self.refresh),
            None => self.refresh,
        }
    }

    pub fn on_tick(&mut self, now: Instant) {
        if let Some(d) = self.detail.as_mut() {
            d.poll(now);
        }
    }

    /// Returns `true` when the app should exit.
    pub fn handle_key(&mut self, code: KeyCode, mods: KeyModifiers, now: Instant) -> bool {
        if mods.contains(KeyModifiers::CONTROL) && matches!(code, KeyCode::Char('c')) {
            return true;
        }

        if let InputMode::PickUnit { list, .. } = &mut self.input {
            let last = selector::MAX_UNIT as usize;
            match code {
                KeyCode::Esc => self.input = InputMode::Normal,
                KeyCode::Enter | KeyCode::Char(' ') => self.apply_pick(),
                KeyCode::Down | KeyCode::Char('j') => {
                    let i = list.selected().unwrap_or(0);
                    list.select(Some((i + 1).min(last)));
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    let i = list.selected().unwrap_or(0);
                    list.select(Some(i.saturating_sub(1)));
                }
                KeyCode::PageDown => {
                    let i = list.selected().unwrap_or(0);
                    list.select(Some((i + 10).min(last)));
                }
                KeyCode::PageUp => {
                    let i = list.selected().unwrap_or(0);
                    list.select(Some(i.saturating_sub(10)));
                }
                _ => {}
            }
            return false;
        }

        if matches!(self.router.current(), Route::List) {
            match code {
                KeyCode::Char('q') | KeyCode::Esc => return true,
                KeyCode::Down | KeyCode::Char('j') => self.select_next_recipe(),
                KeyCode::Up | KeyCode::Char('k') => self.select_prev_recipe(),
                KeyCode::Enter => self.open_selected(),
                _ => {}
            }
        } else {
            match code {
                KeyCode::Char('q') => return true,
                KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => self.navigate_up(),
                KeyCode::Char('m') => self.begin_pick(Unit::Minutes),
                KeyCode::Char('s') => self.begin_pick(Unit::Seconds),
                KeyCode::Char(' ') | KeyCode::Enter => {
                    if let Some(d) = self.detail.as_mut() {
                        d.press_primary(now);
                    }
                }
                KeyCode::Char('x') => {
                    if let Some(d) = self.detail.as_mut() {
                        d.interrupt();
                    }
                }
                _ => {}
            }
        }
        false
    }

    pub fn draw(&mut self, f: &mut ratatui::Frame) {
        let size = f.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(2),
            ])
            .split(size);

        self.draw_header(f, chunks[0]);
        match self.router.current() {
            Route::List => self.draw_list(f, chunks[1]),
            Route::Details(_) => self.draw_detail(f, chunks[1]),
        }
        self.draw_footer(f, chunks[2]);

        self.draw_modal(f);
    }

    fn draw_header(&self, f: &mut ratatui::Frame, area: Rect) {
        let now = chrono::Local::now().format("%H:%M:%S").to_string();
        let line = Line::from(vec![
            Span::styled("Cocktails", Style::default().fg(Color::Cyan)),
            Span::raw("  "),
            Span::styled(self.router.current().path(), Style::default().fg(Color::LightBlue)),
            Span::raw("  "),
            Span::styled(now, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(Text::from(line)).block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_type(BorderType::Plain),
        );
        f.render_widget(p, area);
    }

    fn draw_footer(&self, f: &mut ratatui::Frame, area: Rect) {
        let hint = match (&self.input, self.router.current()) {
            (InputMode::PickUnit { .. }, _) => "[j/k] Move  [PgUp/PgDn] Jump  [Enter] Pick  [Esc] Cancel",
            (_, Route::List) => "[j/k] Move  [Enter] Details  [q] Quit",
            (_, Route::Details(_)) => {
                "[m] Minutes  [s] Seconds  [Space] Start/Stop/Resume  [x] Interrupt  [Esc/b] Back  [q] Quit"
            }
        };
        let p = Paragraph::new(hint)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::TOP));
        f.render_widget(p, area);
    }

    fn draw_list(&self, f: &mut ratatui::Frame, area: Rect) {
        let items: Vec<ListItem> = self
            .catalog
            .recipes()
            .map(|r| {
                let icon = self.icons.get(&r.id);
                let mut lines = Vec::new();
                let first = icon
                    .and_then(|i| i.lines.first().cloned())
                    .unwrap_or_else(|| PLACEHOLDER_ICON.to_string());
                lines.push(Line::from(vec![
                    Span::styled(first, Style::default().fg(Color::DarkGray)),
                    Span::raw("  "),
                    Span::styled(r.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
                ]));
                if let Some(icon) = icon {
                    for l in icon.lines.iter().skip(1) {
                        lines.push(Line::styled(l.clone(), Style::default().fg(Color::DarkGray)));
                    }
                }
                ListItem::new(Text::from(lines))
            })
            .collect();
        let list = List::new(items)
            .block(
                Block::default()
                    .title("Cocktails")
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded),
            )
            .highlight_style(Style::default().fg(Color::Black).bg(Color::LightYellow))
            .highlight_symbol("> ");
        let mut state = self.recipe_list.clone();
        f.render_stateful_widget(list, area, &mut state);
    }

    fn draw_detail(&self, f: &mut ratatui::Frame, area: Rect) {
        let Some(d) = self.detail.as_ref() else {
            return;
        };
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);

        let p = Paragraph::new(self.render_recipe(d))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .title("Recipe")
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded),
            );
        f.render_widget(p, cols[0]);

        self.draw_timer_panel(f, cols[1], d);
    }

    fn render_recipe(&self, d: &DetailScreen) -> Text<'static> {
        let Some(recipe) = d.recipe() else {
            return Text::from(vec![
                Line::from(Span::styled(
                    NOT_FOUND_MESSAGE,
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    format!("id: {}", d.id()),
                    Style::default().fg(Color::Gray),
                )),
            ]);
        };

        let mut lines = Vec::new();
        match self.icons.get(&recipe.id) {
            Some(icon) => {
                for l in &icon.lines {
                    lines.push(Line::styled(l.clone(), Style::default().fg(Color::DarkGray)));
                }
            }
            None => lines.push(Line::styled(PLACEHOLDER_ICON, Style::default().fg(Color::DarkGray))),
        }
        lines.push(Line::from(vec![
            Span::styled("Cocktail: ", Style::default().fg(Color::Yellow)),
            Span::styled(recipe.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
        ]));
        lines.push(Line::from(""));
        lines.push(Line::styled("Ingredients", Style::default().fg(Color::Yellow)));
        for ing in &recipe.ingredients {
            lines.push(Line::from(format!("  - {ing}")));
        }
        lines.push(Line::from(""));
        lines.push(Line::styled("Steps", Style::default().fg(Color::Yellow)));
        for step in &recipe.steps {
            lines.push(Line::from(format!("  {step}")));
        }
        Text::from(lines)
    }

    fn draw_timer_panel(&self, f: &mut ratatui::Frame, area: Rect, d: &DetailScreen) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(area);

        let sel = d.selector();
        let selector_line = Line::from(vec![
            Span::styled("Minutes: ", Style::default().fg(Color::Yellow)),
            Span::raw(format!("{:02}", sel.minutes())),
            Span::raw("   "),
            Span::styled("Seconds: ", Style::default().fg(Color::Yellow)),
            Span::raw(format!("{:02}", sel.seconds())),
        ]);
        f.render_widget(
            Paragraph::new(selector_line).block(
                Block::default()
                    .title("Duration")
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded),
            ),
            rows[0],
        );

        let timer = d.timer();
        let gauge = Gauge::default()
            .block(
                Block::default()
                    .title("Timer")
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded),
            )
            .gauge_style(Style::default().fg(Color::Green).bg(Color::DarkGray))
            .ratio(timer.progress(sel.total_seconds()))
            .label(Span::styled(
                timer.formatted_time(),
                Style::default().add_modifier(Modifier::BOLD),
            ));
        f.render_widget(gauge, rows[1]);

        let controls = d.controls();
        let primary_style = match controls.primary {
            PrimaryControl::Start { enabled: false } => Style::default().fg(Color::DarkGray),
            PrimaryControl::Stop => Style::default().fg(Color::Black).bg(Color::LightRed),
            _ => Style::default().fg(Color::Black).bg(Color::LightGreen),
        };
        let phase = match timer.phase() {
            Phase::Idle => "idle",
            Phase::Running => "running",
            Phase::Paused => "paused",
            Phase::Finished => "finished",
        };
        let lines = vec![
            Line::from(vec![
                Span::styled(format!(" {} ", controls.primary.label()), primary_style),
                Span::raw("  "),
                Span::styled(
                    " Interrupt ",
                    Style::default().fg(Color::Black).bg(Color::Gray),
                ),
            ]),
            Line::from(""),
            Line::from(format!("state: {phase}")),
        ];
        f.render_widget(
            Paragraph::new(Text::from(lines)).block(
                Block::default()
                    .title("Controls")
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded),
            ),
            rows[2],
        );
    }

    fn draw_modal(&self, f: &mut ratatui::Frame) {
        let InputMode::PickUnit { unit, list } = &self.input else {
            return;
        };
        let area = centered_rect(30, 60, f.area());
        let shadow = shadow_rect(area, f.area());
        f.render_widget(
            Fill {
                style: Style::default()
                    .bg(Color::Black)
                    .add_modifier(Modifier::DIM),
            },
            shadow,
        );
        f.render_widget(Clear, area);

        let items: Vec<ListItem> = selector::options()
            .map(|v| ListItem::new(format!("{v:02}")))
            .collect();
        let picker = List::new(items)
            .style(Style::default().fg(Color::White).bg(Color::DarkGray))
            .block(
                Block::default()
                    .title(unit.label())
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double),
            )
            .highlight_style(Style::default().fg(Color::Black).bg(Color::LightYellow))
            .highlight_symbol("> ");
        let mut state = list.clone();
        f.render_stateful_widget(picker, area, &mut state);
    }
}

pub fn run_tui(mut app: App, start: Route) -> Result<()> {
    if start != Route::List {
        app.navigate(start);
    }

    let mut stdout = io::stdout();
    enable_raw_mode().map_err(|e| Error::msg(e.to_string()))?;
    execute!(stdout, EnterAlternateScreen, Hide).map_err(|e| Error::msg(e.to_string()))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| Error::msg(e.to_string()))?;
    terminal
        .clear()
        .map_err(|e| Error::msg(format!("tui clear failed: {e}")))?;

    let result = run_loop(&mut terminal, &mut app);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen, Show).ok();

    result
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        app.on_tick(Instant::now());
        terminal
            .draw(|f| app.draw(f))
            .map_err(|e| Error::msg(format!("tui draw failed: {e}")))?;

        let timeout = app.poll_timeout(Instant::now());
        if event::poll(timeout).map_err(|e| Error::msg(e.to_string()))? {
            match event::read().map_err(|e| Error::msg(e.to_string()))? {
                Event::Key(k) => {
                    if k.kind != KeyEventKind::Press {
                        continue;
                    }
                    if app.handle_key(k.code, k.modifiers, Instant::now()) {
                        break;
                    }
                }
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
    }
    info!("leaving terminal ui");
    Ok(())
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r)[1];
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical)[1]
}

fn shadow_rect(inner: Rect, bounds: Rect) -> Rect {
    let max_x = bounds.x.saturating_add(bounds.width);
    let max_y = bounds.y.saturating_add(bounds.height);
    let x = inner.x.saturating_add(1).min(max_x.saturating_sub(1));
    let y = inner.y.saturating_add(1).min(max_y.saturating_sub(1));
    Rect {
        x,
        y,
        width: inner.width.min(max_x.saturating_sub(x)),
        height: inner.height.min(max_y.saturating_sub(y)),
    }
}

struct Fill {
    style: Style,
}

impl Widget for Fill {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for y in area.y..area.y.saturating_add(area.height) {
            for x in area.x..area.x.saturating_add(area.width) {
                buf[(x, y)].set_char(' ').set_style(self.style);
            }
        }
    }
}
