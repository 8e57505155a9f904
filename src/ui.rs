use crate::activity::{
    build_cards, sample_card_styles, sample_records, ActivityRecords, CardStyle, MetricCard,
};
use crate::chart::bucket_index;
use crate::config::ShellConfig;
use crate::nav::{NavStack, Route};
use crate::theme::Theme;
use crate::tooltip::Tooltip;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use log::info;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::io;
use std::time::{Duration, Instant};

mod cards;
mod chart_panel;
mod detail;
mod helpers;

use helpers::{Focus, Hit, PanelRects};

/// Longest the event loop waits for input before re-checking timers
const POLL_INTERVAL: Duration = Duration::from_millis(30);

pub struct App {
    config: ShellConfig,
    theme: Theme,
    records: ActivityRecords,
    cards: Vec<MetricCard>,
    nav: NavStack,
    focus: Focus,

    // Card row
    card_cursor: usize,
    card_scroll: usize,
    cards_visible: usize,

    // Chart
    bar_cursor: usize,
    tooltip: Tooltip,

    // Cached panel rectangles for mouse hit-testing
    cached_rects: PanelRects,

    should_redraw: bool,
    exit: bool,
}

impl App {
    pub fn new(config: ShellConfig) -> Self {
        Self::with_data(config, sample_records(), &sample_card_styles())
    }

    pub fn with_data(config: ShellConfig, records: ActivityRecords, styles: &[CardStyle]) -> Self {
        let cards = build_cards(&records, styles);
        info!(
            "Dashboard initialized with {} activities, {} cards",
            records.len(),
            cards.len()
        );
        Self {
            config,
            theme: Theme,
            records,
            cards,
            nav: NavStack::default(),
            focus: Focus::Cards,
            card_cursor: 0,
            card_scroll: 0,
            cards_visible: 1,
            bar_cursor: 0,
            tooltip: Tooltip::default(),
            cached_rects: PanelRects::default(),
            should_redraw: true,
            exit: false,
        }
    }

    pub fn run(&mut self, terminal: &mut ratatui::DefaultTerminal) -> io::Result<()> {
        self.should_redraw = true;

        while !self.exit {
            // Wake early when the tooltip is due to hide
            let timeout = self
                .tooltip
                .time_until_hide(Instant::now())
                .map_or(POLL_INTERVAL, |left| left.min(POLL_INTERVAL));

            if event::poll(timeout)? {
                while event::poll(Duration::from_millis(0))? {
                    let now = Instant::now();
                    match event::read()? {
                        Event::Key(key) => {
                            if key.kind == KeyEventKind::Press {
                                if self.handle_key_event(key, now) {
                                    self.should_redraw = true;
                                }
                                if self.exit {
                                    return Ok(());
                                }
                            }
                        }
                        Event::Resize(_, _) => {
                            self.should_redraw = true;
                        }
                        Event::Mouse(mouse) => {
                            if self.handle_mouse_event(mouse, now) {
                                self.should_redraw = true;
                            }
                        }
                        Event::FocusGained | Event::FocusLost | Event::Paste(_) => {}
                    }
                }
            }

            if self.tick(Instant::now()) {
                self.should_redraw = true;
            }

            if self.should_redraw {
                terminal.draw(|frame| self.render(frame))?;
                self.should_redraw = false;
            }
        }

        Ok(())
    }

    /// Apply an expired tooltip hide. Returns true when the screen changed.
    fn tick(&mut self, now: Instant) -> bool {
        self.tooltip.tick(now)
    }

    fn handle_key_event(&mut self, key: KeyEvent, now: Instant) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.exit = true;
            return true;
        }

        if let Route::Detail { .. } = self.nav.current() {
            return match key.code {
                KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('q') | KeyCode::Left => {
                    self.go_back()
                }
                _ => false,
            };
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.exit = true;
                true
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = match self.focus {
                    Focus::Cards => Focus::Chart,
                    Focus::Chart => Focus::Cards,
                };
                true
            }
            KeyCode::Left => self.move_cursor(-1),
            KeyCode::Right => self.move_cursor(1),
            KeyCode::Enter | KeyCode::Char(' ') => match self.focus {
                Focus::Cards => self.open_detail(self.card_cursor),
                Focus::Chart => self.select_bar(self.bar_cursor, now),
            },
            _ => false,
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent, now: Instant) -> bool {
        let (x, y) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => match self.cached_rects.find(x, y) {
                Some(Hit::Back) => self.go_back(),
                Some(Hit::Card(i)) => {
                    self.focus = Focus::Cards;
                    self.card_cursor = i;
                    self.open_detail(i)
                }
                Some(Hit::CardRow) => {
                    self.focus = Focus::Cards;
                    true
                }
                Some(Hit::Chart) => {
                    self.focus = Focus::Chart;
                    if let Some(chart) = self.cached_rects.chart {
                        let rel_x = x as f64 - chart.x as f64;
                        self.tap_chart(rel_x, chart.width as f64, now);
                    }
                    true
                }
                None => false,
            },
            MouseEventKind::Down(MouseButton::Right) => {
                if !self.go_back() {
                    self.exit = true;
                }
                true
            }
            MouseEventKind::ScrollUp | MouseEventKind::ScrollLeft => {
                matches!(self.cached_rects.find(x, y), Some(Hit::Card(_) | Hit::CardRow))
                    && self.scroll_cards(-1)
            }
            MouseEventKind::ScrollDown | MouseEventKind::ScrollRight => {
                matches!(self.cached_rects.find(x, y), Some(Hit::Card(_) | Hit::CardRow))
                    && self.scroll_cards(1)
            }
            _ => false,
        }
    }

    /// Map a tap at `x` within a chart `width` wide to a bar and show its tooltip.
    /// Taps outside every bucket leave the tooltip as it is.
    fn tap_chart(&mut self, x: f64, width: f64, now: Instant) -> bool {
        match bucket_index(x, width, self.records.len()) {
            Some(index) => self.select_bar(index, now),
            None => false,
        }
    }

    fn select_bar(&mut self, index: usize, now: Instant) -> bool {
        let Some(record) = self.records.at(index) else {
            return false;
        };
        self.bar_cursor = index;
        self.tooltip.show(record.id, now);
        true
    }

    fn move_cursor(&mut self, delta: isize) -> bool {
        match self.focus {
            Focus::Cards => {
                let Some(next) = step(self.card_cursor, delta, self.cards.len()) else {
                    return false;
                };
                self.card_cursor = next;
                self.ensure_card_visible();
            }
            Focus::Chart => {
                let Some(next) = step(self.bar_cursor, delta, self.records.len()) else {
                    return false;
                };
                self.bar_cursor = next;
            }
        }
        true
    }

    fn scroll_cards(&mut self, delta: isize) -> bool {
        let max = self.cards.len().saturating_sub(self.cards_visible.max(1));
        let next = self.card_scroll.saturating_add_signed(delta).min(max);
        if next == self.card_scroll {
            return false;
        }
        self.card_scroll = next;
        true
    }

    fn ensure_card_visible(&mut self) {
        let visible = self.cards_visible.max(1);
        if self.card_cursor < self.card_scroll {
            self.card_scroll = self.card_cursor;
        } else if self.card_cursor >= self.card_scroll + visible {
            self.card_scroll = self.card_cursor + 1 - visible;
        }
    }

    /// Push the detail page for card `index`. The chart is torn down, so any
    /// tooltip goes with it.
    fn open_detail(&mut self, index: usize) -> bool {
        let Some(card) = self.cards.get(index) else {
            return false;
        };
        self.tooltip.reset();
        self.nav.push(Route::Detail {
            record: card.record,
            gradient: card.gradient,
        });
        true
    }

    fn go_back(&mut self) -> bool {
        self.nav.pop().is_some()
    }

    fn render(&mut self, frame: &mut Frame) {
        self.cached_rects = PanelRects::default();
        let area = frame.area();
        match self.nav.current() {
            Route::Dashboard => self.render_dashboard(frame),
            Route::Detail { record, gradient } => self.render_detail(frame, area, record, gradient),
        }
    }

    fn render_dashboard(&mut self, frame: &mut Frame) {
        let colors = self.theme.colors();
        let area = frame.area();
        helpers::paint_gradient(
            frame.buffer_mut(),
            area,
            crate::theme::Gradient::new(colors.bg_panel, colors.bg_primary),
        );

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(cards::CARD_HEIGHT + 2),
                Constraint::Min(6),
                Constraint::Length(1),
            ])
            .split(area);

        self.render_title_bar(frame, chunks[0], "Dashboard", false);
        self.render_header(frame, chunks[1]);
        self.render_card_row(frame, chunks[2]);
        self.render_activity_chart(frame, chunks[3]);
        self.render_status_bar(frame, chunks[4]);
        self.render_tooltip(frame);
    }

    /// Title bar styled from the shell's chrome config.
    fn render_title_bar(&mut self, frame: &mut Frame, area: Rect, title: &str, with_back: bool) {
        let chrome = self.config.chrome;
        frame
            .buffer_mut()
            .set_style(area, Style::default().bg(chrome.title_bar_bg));

        let title_line = Line::from(Span::styled(
            title.to_string(),
            Style::default()
                .fg(chrome.title_fg)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center);
        frame.render_widget(Paragraph::new(title_line), area);

        if with_back {
            const BACK: &str = " ‹ Back ";
            let back = Rect::new(area.x, area.y, (BACK.chars().count() as u16).min(area.width), 1);
            frame.render_widget(
                Paragraph::new(Span::styled(
                    BACK,
                    Style::default().fg(chrome.back_tint).add_modifier(Modifier::BOLD),
                )),
                back,
            );
            self.cached_rects.back = Some(back);
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let colors = self.theme.colors();
        let today = chrono::Local::now().format("%A, %-d %B").to_string();
        let lines = vec![
            Line::from(Span::styled(
                "Welcome Back,",
                Style::default().fg(colors.text_secondary),
            )),
            Line::from(vec![
                Span::styled(
                    self.config.username.clone(),
                    Style::default()
                        .fg(colors.text_primary)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("  {}", today), Style::default().fg(colors.text_muted)),
            ]),
        ];
        let inner = Rect::new(
            area.x.saturating_add(2),
            area.y,
            area.width.saturating_sub(4),
            area.height,
        );
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let k = Style::default()
            .fg(Color::Rgb(140, 140, 160))
            .add_modifier(Modifier::BOLD);
        let t = Style::default().fg(Color::DarkGray);
        let sep = Span::styled(" │ ", Style::default().fg(Color::Rgb(50, 50, 70)));

        let mut spans: Vec<Span> = Vec::with_capacity(16);
        match self.nav.current() {
            Route::Detail { .. } => {
                spans.extend_from_slice(&[
                    Span::styled("Esc/Backspace/Right-click", k),
                    Span::styled(" back", t),
                ]);
            }
            Route::Dashboard => {
                let enter = match self.focus {
                    Focus::Cards => " open",
                    Focus::Chart => " inspect",
                };
                spans.extend_from_slice(&[
                    Span::styled("Tab", k),
                    Span::styled(" focus", t),
                    sep.clone(),
                    Span::styled("←→", k),
                    Span::styled(" select", t),
                    sep.clone(),
                    Span::styled("Enter/Click", k),
                    Span::styled(enter, t),
                    sep.clone(),
                    Span::styled("q/Esc/Right-click", k),
                    Span::styled(" quit", t),
                ]);
            }
        }

        let status_bar = Paragraph::new(Line::from(spans))
            .style(Style::default().bg(Color::Rgb(15, 15, 25)))
            .alignment(Alignment::Center);
        frame.render_widget(status_bar, area);
    }
}

/// Move `current` by `delta` within `0..len`, clamping at the ends.
fn step(current: usize, delta: isize, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let next = current.saturating_add_signed(delta).min(len - 1);
    (next != current).then_some(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::RecordId;
    use crate::tooltip::TooltipState;
    use ratatui::{backend::TestBackend, Terminal};

    pub(super) fn app() -> App {
        App::new(ShellConfig::default())
    }

    pub(super) fn draw(app: &mut App, width: u16, height: u16) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        terminal
    }

    pub(super) fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buf = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    pub(super) fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    pub(super) fn click(button: MouseButton, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(button),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn id(app: &App, index: usize) -> RecordId {
        app.records.at(index).unwrap().id
    }

    #[test]
    fn test_tap_scenario_from_three_records() {
        let mut app = app();
        let now = Instant::now();

        assert!(app.tap_chart(150.0, 300.0, now));
        assert_eq!(app.tooltip.state(), TooltipState::Visible(id(&app, 1)));

        assert!(!app.tap_chart(305.0, 300.0, now));
        assert_eq!(app.tooltip.state(), TooltipState::Visible(id(&app, 1)));

        assert!(app.tap_chart(0.0, 300.0, now));
        assert_eq!(app.tooltip.visible_record(), Some(id(&app, 0)));
        assert_eq!(app.bar_cursor, 0);
    }

    #[test]
    fn test_tap_on_empty_chart_is_noop() {
        let mut app = App::with_data(
            ShellConfig::default(),
            ActivityRecords::default(),
            &sample_card_styles(),
        );
        assert!(!app.tap_chart(10.0, 300.0, Instant::now()));
        assert_eq!(app.tooltip.state(), TooltipState::Hidden);
        assert!(!app.open_detail(0));
        assert!(!app.move_cursor(1));
    }

    #[test]
    fn test_tooltip_hides_after_delay() {
        let mut app = app();
        let t0 = Instant::now();
        app.tap_chart(250.0, 300.0, t0);
        assert!(!app.tick(t0 + Duration::from_millis(100)));
        app.tap_chart(10.0, 300.0, t0 + Duration::from_millis(400));
        assert!(!app.tick(t0 + Duration::from_millis(600)));
        assert_eq!(app.tooltip.visible_record(), Some(id(&app, 0)));
        assert!(app.tick(t0 + Duration::from_millis(900)));
        assert_eq!(app.tooltip.state(), TooltipState::Hidden);
    }

    #[test]
    fn test_keyboard_navigation_and_detail() {
        let mut app = app();
        let now = Instant::now();
        assert!(app.handle_key_event(key(KeyCode::Right), now));
        assert_eq!(app.card_cursor, 1);
        assert!(app.handle_key_event(key(KeyCode::Enter), now));
        assert!(matches!(
            app.nav.current(),
            Route::Detail { record, .. } if record == id(&app, 1)
        ));

        assert!(app.handle_key_event(key(KeyCode::Esc), now));
        assert_eq!(app.nav.current(), Route::Dashboard);
        assert!(!app.exit);

        app.handle_key_event(key(KeyCode::Tab), now);
        assert_eq!(app.focus, Focus::Chart);
        app.handle_key_event(key(KeyCode::Right), now);
        app.handle_key_event(key(KeyCode::Right), now);
        assert!(!app.handle_key_event(key(KeyCode::Right), now));
        app.handle_key_event(key(KeyCode::Enter), now);
        assert_eq!(app.tooltip.visible_record(), Some(id(&app, 2)));

        app.handle_key_event(key(KeyCode::Char('q')), now);
        assert!(app.exit);
    }

    #[test]
    fn test_opening_detail_tears_down_tooltip() {
        let mut app = app();
        let now = Instant::now();
        app.tap_chart(150.0, 300.0, now);
        assert!(app.open_detail(0));
        assert_eq!(app.tooltip.state(), TooltipState::Hidden);
        assert!(app.tooltip.pending_hide().is_none());
        assert!(app.go_back());
        assert_eq!(app.tooltip.state(), TooltipState::Hidden);
    }

    #[test]
    fn test_click_on_chart_selects_bucket() {
        let mut app = app();
        draw(&mut app, 90, 30);
        let chart = app.cached_rects.chart.unwrap();
        let n = app.records.len() as u16;
        let bucket = chart.width / n;

        let now = Instant::now();
        let col = chart.x + bucket + bucket / 2;
        assert!(app.handle_mouse_event(click(MouseButton::Left, col, chart.y + 1), now));
        assert_eq!(app.focus, Focus::Chart);
        assert_eq!(app.tooltip.visible_record(), Some(id(&app, 1)));

        let col = chart.x;
        app.handle_mouse_event(click(MouseButton::Left, col, chart.y + 1), now);
        assert_eq!(app.tooltip.visible_record(), Some(id(&app, 0)));
    }

    #[test]
    fn test_click_card_opens_detail_and_back_returns() {
        let mut app = app();
        draw(&mut app, 90, 30);
        let (index, tile) = app.cached_rects.card_tiles[2];
        assert_eq!(index, 2);

        let now = Instant::now();
        assert!(app.handle_mouse_event(click(MouseButton::Left, tile.x + 1, tile.y + 1), now));
        assert!(matches!(
            app.nav.current(),
            Route::Detail { record, .. } if record == id(&app, 2)
        ));

        draw(&mut app, 90, 30);
        let back = app.cached_rects.back.unwrap();
        assert!(app.handle_mouse_event(click(MouseButton::Left, back.x + 1, back.y), now));
        assert_eq!(app.nav.current(), Route::Dashboard);

        // right click at the root quits
        app.handle_mouse_event(click(MouseButton::Right, 0, 0), now);
        assert!(app.exit);
    }

    #[test]
    fn test_dashboard_renders_header_and_chrome() {
        let mut app = app();
        let terminal = draw(&mut app, 90, 30);
        let text = screen_text(&terminal);
        assert!(text.contains("Dashboard"));
        assert!(text.contains("Welcome Back,"));
        assert!(text.contains("Zia"));
        assert!(text.contains("RECENT ACTIVITIES"));

        let buf = terminal.backend().buffer();
        assert_eq!(buf[(0, 0)].bg, Color::Reset);
    }

    #[test]
    fn test_step_clamps() {
        assert_eq!(step(0, -1, 3), None);
        assert_eq!(step(0, 1, 3), Some(1));
        assert_eq!(step(2, 1, 3), None);
        assert_eq!(step(0, 1, 0), None);
    }
}
