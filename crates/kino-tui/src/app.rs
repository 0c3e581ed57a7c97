//! App — component-based event loop.
//!
//! Architecture:
//! - `App` owns all components and `AppState` (shared read-only data for
//!   components).
//! - A synchronous crossterm poll loop drives input; nothing here talks to
//!   the network, so there is no async runtime.
//! - Components return `Vec<Action>`; App broadcasts each action to every
//!   component (`on_action`) and then applies it to the shared state.

use std::io;
use std::time::Duration;

use anyhow::Result;
use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use tracing::{debug, info, warn};

use kino_models::config::Config;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    components::{
        detail_dialog::DetailDialog, help_overlay::HelpOverlay, movie_grid::MovieGrid,
        nav_bar::NavBar,
    },
    theme::{C_ACCENT, C_MUTED},
    widgets::{
        status_bar::{self, InputMode},
        toast::ToastManager,
    },
};

const HEADING_SUBTITLE: &str = "Откройте для себя лучшие фильмы и оставьте свои отзывы";
const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct App {
    state: AppState,
    nav: NavBar,
    grid: MovieGrid,
    /// Present exactly while a movie's detail dialog is open.
    dialog: Option<DetailDialog>,
    help: HelpOverlay,
    toasts: ToastManager,
    focused: ComponentId,
    should_quit: bool,
    mouse_capture: bool,
}

impl App {
    pub fn new(config: &Config) -> Self {
        let state = AppState::new(config);
        let grid = MovieGrid::new(&state);
        Self {
            state,
            nav: NavBar::new(),
            grid,
            dialog: None,
            help: HelpOverlay::new(),
            toasts: ToastManager::new(),
            focused: ComponentId::MovieGrid,
            should_quit: false,
            mouse_capture: config.ui.mouse_capture,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        if self.mouse_capture {
            execute!(stdout, EnableMouseCapture)?;
        }
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        let result = self.event_loop(&mut terminal);

        disable_raw_mode()?;
        if self.mouse_capture {
            execute!(terminal.backend_mut(), DisableMouseCapture)?;
        }
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;

            if event::poll(POLL_INTERVAL)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        let actions = self.handle_key(key);
                        self.dispatch(actions);
                    }
                    Event::Mouse(mouse) => {
                        let actions = self.handle_mouse(mouse);
                        self.dispatch(actions);
                    }
                    _ => {}
                }
            }
            self.toasts.tick();
        }
        info!("kinoteka shutting down");
        Ok(())
    }

    // ── Input routing ─────────────────────────────────────────────────────────

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        // Ctrl+C always quits, whatever is capturing input.
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return vec![Action::Quit];
        }
        if self.help.visible {
            return self.help.handle_key(key, &self.state);
        }
        if let Some(dialog) = self.dialog.as_mut() {
            if key.code == KeyCode::Char('?') && !dialog.is_composing() {
                return vec![Action::ToggleHelp];
            }
            return dialog.handle_key(key, &self.state);
        }
        // The search box captures everything while open.
        if self.state.input_mode == InputMode::Search {
            return self.nav.handle_key(key, &self.state);
        }

        match key.code {
            KeyCode::Char('q') => vec![Action::Quit],
            KeyCode::Char('?') => vec![Action::ToggleHelp],
            KeyCode::Char('/') => {
                self.focused = ComponentId::NavBar;
                self.nav.handle_key(key, &self.state)
            }
            KeyCode::Tab => vec![Action::FocusNext],
            KeyCode::BackTab => vec![Action::FocusPrev],
            _ => match self.focused {
                ComponentId::NavBar => self.nav.handle_key(key, &self.state),
                _ => self.grid.handle_key(key, &self.state),
            },
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Vec<Action> {
        let full = Rect::default();
        if self.help.visible {
            return self.help.handle_mouse(mouse, full, &self.state);
        }
        if let Some(dialog) = self.dialog.as_mut() {
            return dialog.handle_mouse(mouse, full, &self.state);
        }
        // While the search box is capturing, the page underneath is inert,
        // matching the key routing above.
        if self.state.input_mode == InputMode::Search {
            return self.nav.handle_mouse(mouse, full, &self.state);
        }
        // Nav and grid hit-test against the rects they recorded last draw.
        let mut actions = self.nav.handle_mouse(mouse, full, &self.state);
        actions.extend(self.grid.handle_mouse(mouse, full, &self.state));
        actions
    }

    // ── Action dispatch ───────────────────────────────────────────────────────

    fn dispatch(&mut self, actions: Vec<Action>) {
        let mut queue = actions;
        // Broadcast each action, then apply it; follow-ups join the queue.
        while !queue.is_empty() {
            let mut follow_ups = Vec::new();
            for action in queue {
                follow_ups.extend(self.nav.on_action(&action, &self.state));
                follow_ups.extend(self.grid.on_action(&action, &self.state));
                if let Some(dialog) = self.dialog.as_mut() {
                    follow_ups.extend(dialog.on_action(&action, &self.state));
                }
                follow_ups.extend(self.help.on_action(&action, &self.state));
                self.apply_action(action);
            }
            queue = follow_ups;
        }
    }

    fn apply_action(&mut self, action: Action) {
        match action {
            Action::SwitchSection(section) => {
                debug!(section = section.id(), "switch section");
                self.state.active_section = section;
            }
            Action::Watch(id) => {
                if self.state.watch(id) {
                    info!(movie = id, "open detail dialog");
                    self.dialog = Some(DetailDialog::new(id, &self.state));
                } else {
                    warn!(movie = id, "watch: unknown movie id");
                    self.toasts.warning("Фильм не найден");
                }
            }
            Action::Rate(id, rating) => {
                if self.state.rate_movie(id, rating) {
                    debug!(movie = id, rating, "user rating set");
                    self.toasts.success(format!("Оценка {}★ сохранена", rating));
                } else {
                    warn!(movie = id, "rate: unknown movie id");
                }
            }
            Action::CloseDialog => {
                self.state.close_dialog();
                self.dialog = None;
                self.state.input_mode = InputMode::Normal;
                self.focused = ComponentId::MovieGrid;
            }
            Action::FocusNext | Action::FocusPrev => {
                self.focused = match self.focused {
                    ComponentId::NavBar => ComponentId::MovieGrid,
                    _ => ComponentId::NavBar,
                };
            }
            Action::OpenSearch => {
                self.state.input_mode = InputMode::Search;
                self.focused = ComponentId::NavBar;
            }
            Action::CloseSearch => {
                self.state.input_mode = InputMode::Normal;
            }
            Action::OpenCompose => {
                self.state.input_mode = InputMode::Compose;
            }
            Action::CloseCompose => {
                self.state.input_mode = InputMode::Normal;
            }
            Action::ReviewPublished => {
                self.toasts.success("Отзыв опубликован");
            }
            Action::ToggleHelp => {} // components toggle themselves
            Action::Quit => {
                self.should_quit = true;
            }
        }
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let [nav_area, heading_area, grid_area, keys_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .areas(area);

        self.nav
            .draw(frame, nav_area, self.focused == ComponentId::NavBar, &self.state);
        self.draw_heading(frame, heading_area);
        self.grid.draw(
            frame,
            grid_area,
            self.focused == ComponentId::MovieGrid && self.dialog.is_none(),
            &self.state,
        );

        status_bar::draw_keys_bar(
            frame,
            keys_area,
            self.state.input_mode,
            self.dialog.is_some(),
        );

        if let Some(dialog) = self.dialog.as_mut() {
            dialog.draw(frame, area, true, &self.state);
        }
        self.help.draw(frame, area, true, &self.state);
        self.toasts.draw(frame, area);
    }

    fn draw_heading(&self, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(Span::styled(
                self.state.section_heading(),
                Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                HEADING_SUBTITLE,
                Style::default().fg(C_MUTED),
            )),
        ];
        frame.render_widget(Paragraph::new(lines), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kino_models::section::Section;
    use ratatui::backend::TestBackend;
    use ratatui::crossterm::event::{MouseButton, MouseEventKind};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        mouse(MouseEventKind::Down(MouseButton::Left), column, row)
    }

    fn app() -> App {
        App::new(&Config::default())
    }

    fn press(app: &mut App, code: KeyCode) {
        let actions = app.handle_key(key(code));
        app.dispatch(actions);
    }

    #[test]
    fn test_enter_opens_dialog_for_selected_movie() {
        let mut a = app();
        press(&mut a, KeyCode::Enter);
        assert!(a.state.dialog_open);
        assert_eq!(a.state.selected_movie, Some(1));
        assert!(a.dialog.is_some());
    }

    #[test]
    fn test_esc_closes_dialog_but_keeps_selection() {
        let mut a = app();
        press(&mut a, KeyCode::Enter);
        press(&mut a, KeyCode::Esc);
        assert!(!a.state.dialog_open);
        assert!(a.dialog.is_none());
        assert_eq!(a.state.selected_movie, Some(1));
    }

    #[test]
    fn test_rating_key_sets_user_rating_and_toasts() {
        let mut a = app();
        press(&mut a, KeyCode::Char('3'));
        assert_eq!(a.state.movie(1).unwrap().user_rating, Some(3));
        assert!(!a.toasts.is_empty());
    }

    #[test]
    fn test_q_quits_in_normal_mode() {
        let mut a = app();
        press(&mut a, KeyCode::Char('q'));
        assert!(a.should_quit);
    }

    #[test]
    fn test_q_types_into_open_search_instead_of_quitting() {
        let mut a = app();
        press(&mut a, KeyCode::Char('/'));
        assert_eq!(a.state.input_mode, InputMode::Search);

        press(&mut a, KeyCode::Char('q'));
        assert!(!a.should_quit);
    }

    #[test]
    fn test_section_switch_changes_heading_not_movies() {
        let mut a = app();
        let before = a.state.movies.len();

        a.dispatch(vec![Action::SwitchSection(Section::Top)]);
        assert_eq!(a.state.active_section, Section::Top);
        assert_eq!(a.state.section_heading(), "Топ фильмов");
        assert_eq!(a.state.movies.len(), before);
    }

    #[test]
    fn test_compose_flow_publishes_and_resets_mode() {
        let mut a = app();
        press(&mut a, KeyCode::Enter); // open dialog
        press(&mut a, KeyCode::Char('n'));
        assert_eq!(a.state.input_mode, InputMode::Compose);

        press(&mut a, KeyCode::Char('5'));
        press(&mut a, KeyCode::Tab);
        for c in "Супер".chars() {
            press(&mut a, KeyCode::Char(c));
        }
        press(&mut a, KeyCode::Enter);

        assert_eq!(a.state.input_mode, InputMode::Normal);
        assert!(a.state.dialog_open);
        assert!(!a.toasts.is_empty());
    }

    #[test]
    fn test_dialog_reopens_with_fresh_reviews() {
        let mut a = app();
        press(&mut a, KeyCode::Enter);
        press(&mut a, KeyCode::Esc);
        press(&mut a, KeyCode::Enter);
        // Fresh dialog, fresh panel: published reviews do not survive reopen.
        assert!(a.dialog.is_some());
    }

    #[test]
    fn test_ctrl_c_quits_even_while_composing() {
        let mut a = app();
        press(&mut a, KeyCode::Enter);
        press(&mut a, KeyCode::Char('n'));

        let actions = a.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        a.dispatch(actions);
        assert!(a.should_quit);
    }

    #[test]
    fn test_pointer_movement_does_not_dismiss_help() {
        let mut a = app();
        press(&mut a, KeyCode::Char('?'));
        assert!(a.help.visible);

        // Captured terminals stream Moved events; they must not close the
        // overlay.
        let actions = a.handle_mouse(mouse(MouseEventKind::Moved, 5, 5));
        a.dispatch(actions);
        assert!(a.help.visible);

        // A deliberate click still dismisses it.
        let actions = a.handle_mouse(click(5, 5));
        a.dispatch(actions);
        assert!(!a.help.visible);
    }

    #[test]
    fn test_click_on_card_is_inert_while_search_is_open() {
        let mut a = app();
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();

        press(&mut a, KeyCode::Char('/'));
        assert_eq!(a.state.input_mode, InputMode::Search);
        terminal.draw(|f| a.draw(f)).unwrap();

        // Watch row of the first card.
        let on_card = click(5, 15);
        let actions = a.handle_mouse(on_card);
        a.dispatch(actions);
        assert!(!a.state.dialog_open);
        assert!(a.state.movies.iter().all(|m| m.user_rating.is_none()));

        // The same click opens the dialog once the search box is closed,
        // so the coordinates above really do hit the card.
        press(&mut a, KeyCode::Esc);
        assert_eq!(a.state.input_mode, InputMode::Normal);
        let actions = a.handle_mouse(on_card);
        a.dispatch(actions);
        assert!(a.state.dialog_open);
    }

    #[test]
    fn test_tab_toggles_focus() {
        let mut a = app();
        assert_eq!(a.focused, ComponentId::MovieGrid);
        press(&mut a, KeyCode::Tab);
        assert_eq!(a.focused, ComponentId::NavBar);
        press(&mut a, KeyCode::Tab);
        assert_eq!(a.focused, ComponentId::MovieGrid);
    }
}
