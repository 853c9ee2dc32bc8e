use anyhow::Result;
use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    DefaultTerminal, Frame,
};
use std::time::Duration;

use crate::config::AppConfig;
use crate::models::{AttendanceOption, Cycle, DailyRecord, PARTICIPANTS};
use crate::store::{to_series, today, RecordStore, Series};
use crate::tui::events::{Event, EventHandler};
use crate::tui::theme;
use crate::tui::widgets::{form, header, history, progress, scores, statusbar};

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Dashboard,
    History,
    Help,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    ConfirmReset,
}

#[derive(Debug, Clone)]
pub struct Flash {
    pub text: String,
    pub is_error: bool,
}

pub struct App {
    pub view: View,
    pub config: AppConfig,
    pub input_mode: InputMode,
    pub should_quit: bool,
    pub focus_idx: usize,
    pub selections: Vec<AttendanceOption>,
    pub history_scroll: u16,
    pub flash: Option<Flash>,

    // Refreshed from the store after every action
    pub today: NaiveDate,
    pub cycle: Cycle,
    pub progress: Series,
}

impl App {
    pub fn new(config: AppConfig, today: NaiveDate) -> Self {
        App {
            view: View::Dashboard,
            config,
            input_mode: InputMode::Normal,
            should_quit: false,
            focus_idx: 0,
            selections: vec![AttendanceOption::default(); PARTICIPANTS.len()],
            history_scroll: 0,
            flash: None,
            today,
            cycle: Cycle::fresh(today),
            progress: to_series(&[]),
        }
    }

    pub fn load(&mut self, store: &RecordStore) -> Result<()> {
        self.cycle = store.load_on(self.today)?;
        self.refresh_progress();
        Ok(())
    }

    fn refresh_progress(&mut self) {
        self.progress = to_series(&self.cycle.records)
            .cumulative()
            .tail(self.config.display.chart_window);
    }

    /// Reload when the calendar date has moved on, so day numbers and
    /// expiry stay current in a long-running session.
    pub fn tick(&mut self, store: &RecordStore) {
        let now = today();
        if now != self.today {
            self.today = now;
            if let Err(e) = self.load(store) {
                self.set_error(e.to_string());
            }
        }
    }

    fn set_info(&mut self, text: impl Into<String>) {
        self.flash = Some(Flash {
            text: text.into(),
            is_error: false,
        });
    }

    fn set_error(&mut self, text: impl Into<String>) {
        self.flash = Some(Flash {
            text: text.into(),
            is_error: true,
        });
    }

    pub fn handle_key(&mut self, key: KeyEvent, store: &RecordStore) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        self.flash = None;
        match self.input_mode {
            InputMode::ConfirmReset => self.handle_confirm_key(key, store),
            InputMode::Normal => match self.view {
                View::Dashboard => self.handle_dashboard_key(key, store),
                View::History => self.handle_history_key(key),
                View::Help => self.handle_help_key(key),
            },
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyEvent, store: &RecordStore) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Char('?') => {
                self.view = View::Help;
            }
            KeyCode::Char('h') => {
                self.view = View::History;
                self.history_scroll = 0;
            }
            KeyCode::Char('R') => {
                self.input_mode = InputMode::ConfirmReset;
            }
            KeyCode::Up | KeyCode::BackTab => {
                self.focus_idx = self
                    .focus_idx
                    .checked_sub(1)
                    .unwrap_or(PARTICIPANTS.len() - 1);
            }
            KeyCode::Down | KeyCode::Tab => {
                self.focus_idx = (self.focus_idx + 1) % PARTICIPANTS.len();
            }
            KeyCode::Left => {
                if let Some(option) = self.selections.get_mut(self.focus_idx) {
                    *option = option.prev();
                }
            }
            KeyCode::Right => {
                if let Some(option) = self.selections.get_mut(self.focus_idx) {
                    *option = option.next();
                }
            }
            KeyCode::Char(c @ '1'..='3') => {
                let idx = c as usize - '1' as usize;
                if let Some(option) = self.selections.get_mut(self.focus_idx) {
                    *option = AttendanceOption::all()[idx];
                }
            }
            KeyCode::Enter | KeyCode::Char('s') => {
                self.save_today(store);
            }
            _ => {}
        }
    }

    fn handle_history_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('h') => {
                self.view = View::Dashboard;
            }
            KeyCode::Up => {
                self.history_scroll = self.history_scroll.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.history_scroll < self.max_history_scroll() {
                    self.history_scroll += 1;
                }
            }
            _ => {}
        }
    }

    fn max_history_scroll(&self) -> u16 {
        let shown = self
            .cycle
            .records
            .len()
            .min(self.config.display.history_limit);
        let lines = history::line_count(shown);
        u16::try_from(lines.saturating_sub(1)).unwrap_or(u16::MAX)
    }

    fn handle_help_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('?') => {
                self.view = View::Dashboard;
            }
            _ => {}
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent, store: &RecordStore) {
        self.input_mode = InputMode::Normal;
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => self.reset_cycle(store),
            _ => self.set_info("Reset cancelled"),
        }
    }

    fn save_today(&mut self, store: &RecordStore) {
        let choices = PARTICIPANTS.iter().copied().zip(self.selections.iter().copied());
        let record = match DailyRecord::from_choices(self.today, choices) {
            Ok(record) => record,
            Err(e) => return self.set_error(e.to_string()),
        };

        // Re-read first so records saved elsewhere since the last load survive
        let mut updated = match store.load_on(self.today) {
            Ok(cycle) => cycle,
            Err(e) => return self.set_error(e.to_string()),
        };
        match store.append(&mut updated, record) {
            Ok(()) => {
                self.cycle = updated;
                self.refresh_progress();
                self.set_info("Today's record saved");
            }
            Err(e) => self.set_error(e.to_string()),
        }
    }

    fn reset_cycle(&mut self, store: &RecordStore) {
        match store.reset_on(self.today) {
            Ok(cycle) => {
                self.cycle = cycle;
                self.refresh_progress();
                self.set_info("Data reset — new cycle started");
            }
            Err(e) => self.set_error(e.to_string()),
        }
    }

    pub fn draw(&self, frame: &mut Frame) {
        match self.view {
            View::Dashboard => self.draw_dashboard(frame),
            View::History => self.draw_history(frame),
            View::Help => {
                self.draw_dashboard(frame);
                self.draw_help_overlay(frame);
            }
        }

        if self.input_mode == InputMode::ConfirmReset {
            self.draw_confirm_reset(frame);
        }
    }

    fn flash_ref(&self) -> Option<(&str, bool)> {
        self.flash.as_ref().map(|f| (f.text.as_str(), f.is_error))
    }

    fn draw_dashboard(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(theme::base()), area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),                              // header
                Constraint::Length(PARTICIPANTS.len() as u16 + 4),  // form + scores
                Constraint::Min(0),                                 // progress
                Constraint::Length(1),                              // status bar
            ])
            .split(area);

        header::render(
            frame,
            rows[0],
            self.today,
            self.cycle.start_date,
            self.cycle.day_number(self.today),
        );

        let top = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(rows[1]);

        form::render(
            frame,
            top[0],
            &self.selections,
            self.focus_idx,
            self.cycle.has_record_for(self.today),
        );
        scores::render(frame, top[1], &self.cycle);
        progress::render(frame, rows[2], &self.progress);
        statusbar::render(frame, rows[3], self.flash_ref());
    }

    fn draw_history(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(theme::base()), area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(area);

        history::render(
            frame,
            rows[0],
            self.cycle.recent(self.config.display.history_limit),
            self.history_scroll,
        );
        statusbar::render(frame, rows[1], self.flash_ref());
    }

    fn draw_help_overlay(&self, frame: &mut Frame) {
        let popup_area = centered(frame.area(), 50, 14);
        frame.render_widget(Clear, popup_area);

        let bindings = [
            ("[↑ ↓] / Tab", "Choose family member"),
            ("[← →] / 1-3", "Choose Fajr option"),
            ("[Enter] / s", "Save today's record"),
            ("[h]", "Past records"),
            ("[R]", "Reset (new 30-day cycle)"),
            ("[?]", "Toggle help"),
            ("[Esc] / q", "Quit"),
        ];

        let mut help_text = vec![
            Line::from(Span::styled(
                "  Keybindings",
                theme::dawn().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        for (key, action) in bindings {
            help_text.push(Line::from(vec![
                Span::styled(format!("  {:<14}", key), theme::dawn()),
                Span::styled(action, theme::dim()),
            ]));
        }

        let block = Block::default()
            .title(Span::styled(" Help ", theme::dawn()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::dawn())
            .style(theme::surface());

        frame.render_widget(Paragraph::new(help_text).block(block), popup_area);
    }

    fn draw_confirm_reset(&self, frame: &mut Frame) {
        let popup_area = centered(frame.area(), 56, 7);
        frame.render_widget(Clear, popup_area);

        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "  Start a new 30-day cycle?",
                theme::bold(),
            )),
            Line::from(Span::styled(
                format!(
                    "  {} records and all points will be cleared.",
                    self.cycle.records.len()
                ),
                theme::dim(),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("  [y]", theme::red()),
                Span::styled(" reset   ", theme::dim()),
                Span::styled("[any key]", theme::dawn()),
                Span::styled(" cancel", theme::dim()),
            ]),
        ];

        let block = Block::default()
            .title(Span::styled(" Reset Data ", theme::red()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::red())
            .style(theme::surface());

        frame.render_widget(Paragraph::new(text).block(block), popup_area);
    }
}

/// A `width` x `height` box centred in `area`, clamped to fit.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Run the TUI event loop.
pub fn run(store: RecordStore, config: AppConfig) -> Result<()> {
    let mut app = App::new(config, today());
    app.load(&store)?;

    let mut terminal = ratatui::init();
    let events = EventHandler::new(Duration::from_secs(1));
    let result = event_loop(&mut terminal, &mut app, &store, &events);
    ratatui::restore();
    result
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    app: &mut App,
    store: &RecordStore,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| app.draw(frame))?;

        match events.next()? {
            Event::Key(key) => {
                app.handle_key(key, store);
                if app.should_quit {
                    return Ok(());
                }
            }
            Event::Resize => {}
            Event::Tick => app.tick(store),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::DuplicatePolicy;
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};
    use tempfile::TempDir;

    fn press(app: &mut App, store: &RecordStore, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE), store);
    }

    fn setup(dir: &TempDir) -> (App, RecordStore) {
        let store = RecordStore::new(dir.path().join("fajr_data.json"));
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut app = App::new(AppConfig::default(), today);
        app.load(&store).unwrap();
        (app, store)
    }

    #[test]
    fn saving_scores_the_chosen_options() {
        let dir = TempDir::new().unwrap();
        let (mut app, store) = setup(&dir);

        // Shaheer stays on Jamaat, MSN -> alone, Ali -> qaza
        press(&mut app, &store, KeyCode::Down);
        press(&mut app, &store, KeyCode::Right);
        press(&mut app, &store, KeyCode::Down);
        press(&mut app, &store, KeyCode::Char('3'));
        press(&mut app, &store, KeyCode::Enter);

        assert_eq!(app.cycle.score("Shaheer"), 5);
        assert_eq!(app.cycle.score("MSN"), 2);
        assert_eq!(app.cycle.score("Ali"), -1);
        assert_eq!(app.progress.len(), 1);
        assert!(app.flash.as_ref().is_some_and(|f| !f.is_error));

        let persisted = store.load_on(app.today).unwrap();
        assert_eq!(persisted, app.cycle);
    }

    #[test]
    fn saving_keeps_records_written_elsewhere() {
        let dir = TempDir::new().unwrap();
        let (mut app, store) = setup(&dir);

        let mut on_disk = store.load_on(app.today).unwrap();
        let outside = DailyRecord::from_choices(
            app.today,
            PARTICIPANTS.iter().copied().map(|p| (p, AttendanceOption::Qaza)),
        )
        .unwrap();
        store.append(&mut on_disk, outside).unwrap();

        press(&mut app, &store, KeyCode::Enter);

        let persisted = store.load_on(app.today).unwrap();
        assert_eq!(persisted.records.len(), 2);
        assert_eq!(persisted.score("Shaheer"), 4);
        assert_eq!(app.cycle, persisted);
    }

    #[test]
    fn reject_policy_sees_records_written_elsewhere() {
        let dir = TempDir::new().unwrap();
        let (mut app, store) = setup(&dir);
        let store = store.with_policy(DuplicatePolicy::Reject);

        let mut on_disk = store.load_on(app.today).unwrap();
        let outside = DailyRecord::from_choices(
            app.today,
            PARTICIPANTS.iter().copied().map(|p| (p, AttendanceOption::Alone)),
        )
        .unwrap();
        store.append(&mut on_disk, outside).unwrap();

        press(&mut app, &store, KeyCode::Enter);

        assert!(app.flash.as_ref().is_some_and(|f| f.is_error));
        assert_eq!(store.load_on(app.today).unwrap().records.len(), 1);
    }

    #[test]
    fn history_scroll_stops_at_last_line() {
        let dir = TempDir::new().unwrap();
        let (mut app, store) = setup(&dir);
        press(&mut app, &store, KeyCode::Enter);
        press(&mut app, &store, KeyCode::Char('h'));

        for _ in 0..50 {
            press(&mut app, &store, KeyCode::Down);
        }
        assert_eq!(
            app.history_scroll as usize,
            history::line_count(1) - 1
        );
        press(&mut app, &store, KeyCode::Up);
        assert_eq!(
            app.history_scroll as usize,
            history::line_count(1) - 2
        );
    }

    #[test]
    fn focus_wraps_around() {
        let dir = TempDir::new().unwrap();
        let (mut app, store) = setup(&dir);
        press(&mut app, &store, KeyCode::Up);
        assert_eq!(app.focus_idx, PARTICIPANTS.len() - 1);
        press(&mut app, &store, KeyCode::Down);
        assert_eq!(app.focus_idx, 0);
    }

    #[test]
    fn reset_requires_confirmation() {
        let dir = TempDir::new().unwrap();
        let (mut app, store) = setup(&dir);
        press(&mut app, &store, KeyCode::Enter);
        assert_eq!(app.cycle.records.len(), 1);

        press(&mut app, &store, KeyCode::Char('R'));
        assert_eq!(app.input_mode, InputMode::ConfirmReset);
        press(&mut app, &store, KeyCode::Char('n'));
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.cycle.records.len(), 1);

        press(&mut app, &store, KeyCode::Char('R'));
        press(&mut app, &store, KeyCode::Char('y'));
        assert!(app.cycle.records.is_empty());
        assert!(store.load_on(app.today).unwrap().records.is_empty());
    }

    #[test]
    fn rejected_duplicate_leaves_cycle_untouched() {
        let dir = TempDir::new().unwrap();
        let (mut app, store) = setup(&dir);
        let store = store.with_policy(DuplicatePolicy::Reject);

        press(&mut app, &store, KeyCode::Enter);
        press(&mut app, &store, KeyCode::Enter);

        assert_eq!(app.cycle.records.len(), 1);
        assert_eq!(app.cycle.score("Shaheer"), 5);
        assert!(app.flash.as_ref().is_some_and(|f| f.is_error));
    }

    #[test]
    fn views_toggle_and_quit() {
        let dir = TempDir::new().unwrap();
        let (mut app, store) = setup(&dir);
        press(&mut app, &store, KeyCode::Char('h'));
        assert_eq!(app.view, View::History);
        press(&mut app, &store, KeyCode::Esc);
        assert_eq!(app.view, View::Dashboard);
        press(&mut app, &store, KeyCode::Char('?'));
        assert_eq!(app.view, View::Help);
        press(&mut app, &store, KeyCode::Char('?'));
        press(&mut app, &store, KeyCode::Esc);
        assert!(app.should_quit);
    }

    #[test]
    fn draws_every_view() {
        let dir = TempDir::new().unwrap();
        let (mut app, store) = setup(&dir);
        press(&mut app, &store, KeyCode::Enter);

        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        for view in [View::Dashboard, View::History, View::Help] {
            app.view = view;
            terminal.draw(|frame| app.draw(frame)).unwrap();
        }
        app.input_mode = InputMode::ConfirmReset;
        terminal.draw(|frame| app.draw(frame)).unwrap();
    }

    #[test]
    fn centered_fits_small_areas() {
        let area = Rect::new(0, 0, 20, 5);
        let popup = centered(area, 50, 14);
        assert_eq!(popup, Rect::new(0, 0, 20, 5));
    }
}
