//! Navigation bar — brand, section tabs, and the (decorative) search box.
//!
//! Switching a tab changes the heading above the grid and nothing else.
//! The search box accepts text but filters nothing.

use kino_models::section::{Section, ALL_SECTIONS};
use ratatui::crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::action::{Action, ComponentId};
use crate::app_state::AppState;
use crate::component::Component;
use crate::theme::{
    style_unfocused_border, C_ACCENT, C_MUTED, C_PANEL_BORDER_FOCUSED, C_PRIMARY, C_SECONDARY,
    C_SELECTION_BG,
};
use crate::widgets::text_field::{TextField, TextFieldAction};

const BRAND: &str = "🎬 ONLINE CINEMA";
const BRAND_NARROW: &str = "🎬";

/// Below this inner width the tabs render as icons instead of labels.
const COMPACT_WIDTH: u16 = 70;

pub struct NavBar {
    /// Tab the keyboard cursor is on; follows the active section until the
    /// viewer moves it.
    cursor: Section,
    search: TextField,
    search_open: bool,
    /// Screen rects of the rendered tabs, refreshed every draw.
    tab_areas: Vec<(Section, Rect)>,
    search_area: Rect,
}

impl NavBar {
    pub fn new() -> Self {
        Self {
            cursor: Section::Home,
            search: TextField::new("Поиск фильмов...", "🔍 "),
            search_open: false,
            tab_areas: Vec::new(),
            search_area: Rect::default(),
        }
    }

    fn tab_label(section: Section, compact: bool) -> String {
        if compact {
            format!(" {} ", section.icon())
        } else {
            format!(" {} ", section.label())
        }
    }

    fn open_search(&mut self) -> Vec<Action> {
        self.search_open = true;
        self.search.activate();
        vec![Action::OpenSearch]
    }

    fn close_search(&mut self) -> Vec<Action> {
        self.search_open = false;
        self.search.deactivate();
        vec![Action::CloseSearch]
    }
}

impl Component for NavBar {
    fn id(&self) -> ComponentId {
        ComponentId::NavBar
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if self.search_open {
            return match self.search.handle_key(key) {
                TextFieldAction::Confirmed | TextFieldAction::Cancelled => self.close_search(),
                // Typed text is kept but deliberately not acted on.
                TextFieldAction::Changed(_) => Vec::new(),
            };
        }

        match key.code {
            KeyCode::Left | KeyCode::Char('h') => {
                self.cursor = self.cursor.prev();
                Vec::new()
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.cursor = self.cursor.next();
                Vec::new()
            }
            KeyCode::Enter => {
                if self.cursor == state.active_section {
                    Vec::new()
                } else {
                    vec![Action::SwitchSection(self.cursor)]
                }
            }
            KeyCode::Char('/') => self.open_search(),
            _ => Vec::new(),
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, state: &AppState) -> Vec<Action> {
        if event.kind != MouseEventKind::Down(MouseButton::Left) {
            return Vec::new();
        }
        let pos = (event.column, event.row);

        for &(section, rect) in &self.tab_areas {
            if rect.contains(pos.into()) {
                self.cursor = section;
                if section == state.active_section {
                    return Vec::new();
                }
                return vec![Action::SwitchSection(section)];
            }
        }
        if self.search_area.contains(pos.into()) && !self.search_open {
            return self.open_search();
        }
        Vec::new()
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        match action {
            Action::SwitchSection(section) => {
                self.cursor = *section;
                Vec::new()
            }
            Action::CloseSearch if self.search_open => {
                self.search_open = false;
                self.search.deactivate();
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let border_style = if focused {
            Style::default().fg(C_PANEL_BORDER_FOCUSED)
        } else {
            style_unfocused_border()
        };
        let block = Block::default().borders(Borders::ALL).border_style(border_style);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let compact = inner.width < COMPACT_WIDTH;
        let brand = if compact { BRAND_NARROW } else { BRAND };
        let brand_width = brand.width() as u16 + 2;

        let tabs_width: u16 = ALL_SECTIONS
            .iter()
            .map(|s| Self::tab_label(*s, compact).width() as u16)
            .sum();

        let [brand_area, tabs_area, search_area] = Layout::horizontal([
            Constraint::Length(brand_width),
            Constraint::Length(tabs_width + 1),
            Constraint::Min(12),
        ])
        .areas(inner);

        frame.render_widget(
            Paragraph::new(Span::styled(
                format!(" {}", brand),
                Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD),
            )),
            brand_area,
        );

        // Tabs, one span each; remember their rects for mouse hit-testing.
        self.tab_areas.clear();
        let mut spans = Vec::with_capacity(ALL_SECTIONS.len());
        let mut x = tabs_area.x;
        for &section in &ALL_SECTIONS {
            let label = Self::tab_label(section, compact);
            let w = label.width() as u16;

            let style = if section == state.active_section {
                Style::default()
                    .fg(C_PRIMARY)
                    .bg(C_SELECTION_BG)
                    .add_modifier(Modifier::BOLD)
            } else if focused && section == self.cursor {
                Style::default().fg(C_PRIMARY).add_modifier(Modifier::UNDERLINED)
            } else {
                Style::default().fg(C_SECONDARY)
            };
            spans.push(Span::styled(label, style));

            self.tab_areas.push((
                section,
                Rect {
                    x,
                    y: tabs_area.y,
                    width: w,
                    height: 1,
                },
            ));
            x += w;
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), tabs_area);

        self.search_area = search_area;
        if self.search_open || !self.search.is_empty() {
            self.search.draw(frame, search_area);
        } else {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "🔍 Поиск фильмов...",
                    Style::default().fg(C_MUTED),
                )),
                search_area,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kino_models::config::Config;
    use ratatui::crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_enter_switches_to_cursor_section() {
        let state = AppState::new(&Config::default());
        let mut nav = NavBar::new();

        nav.handle_key(key(KeyCode::Right), &state);
        let actions = nav.handle_key(key(KeyCode::Enter), &state);
        assert_eq!(actions, vec![Action::SwitchSection(Section::Top)]);
    }

    #[test]
    fn test_enter_on_active_section_is_silent() {
        let state = AppState::new(&Config::default());
        let mut nav = NavBar::new();
        assert!(nav.handle_key(key(KeyCode::Enter), &state).is_empty());
    }

    #[test]
    fn test_cursor_wraps_left_from_home() {
        let state = AppState::new(&Config::default());
        let mut nav = NavBar::new();
        nav.handle_key(key(KeyCode::Left), &state);
        let actions = nav.handle_key(key(KeyCode::Enter), &state);
        assert_eq!(actions, vec![Action::SwitchSection(Section::Catalog)]);
    }

    #[test]
    fn test_slash_opens_search_and_typing_filters_nothing() {
        let state = AppState::new(&Config::default());
        let mut nav = NavBar::new();

        let actions = nav.handle_key(key(KeyCode::Char('/')), &state);
        assert_eq!(actions, vec![Action::OpenSearch]);

        for c in "матрица".chars() {
            assert!(nav.handle_key(key(KeyCode::Char(c)), &state).is_empty());
        }
        assert_eq!(nav.search.text(), "матрица");
    }

    #[test]
    fn test_search_esc_clears_then_closes() {
        let state = AppState::new(&Config::default());
        let mut nav = NavBar::new();
        nav.handle_key(key(KeyCode::Char('/')), &state);
        nav.handle_key(key(KeyCode::Char('к')), &state);

        assert!(nav.handle_key(key(KeyCode::Esc), &state).is_empty());
        assert!(nav.search_open);

        let actions = nav.handle_key(key(KeyCode::Esc), &state);
        assert_eq!(actions, vec![Action::CloseSearch]);
        assert!(!nav.search_open);
    }
}
