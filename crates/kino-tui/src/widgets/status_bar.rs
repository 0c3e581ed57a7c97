//! Status bar — bottom line with input mode and keybinding hints.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme::{C_MODE_COMPOSE, C_MODE_NORMAL, C_MODE_SEARCH, C_MUTED};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,
    /// The nav-bar search box is capturing keystrokes.
    Search,
    /// The review draft form is capturing keystrokes.
    Compose,
}

impl InputMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "ОБЗОР",
            Self::Search => "ПОИСК",
            Self::Compose => "ОТЗЫВ",
        }
    }

    pub fn color(self) -> ratatui::style::Color {
        match self {
            Self::Normal => C_MODE_NORMAL,
            Self::Search => C_MODE_SEARCH,
            Self::Compose => C_MODE_COMPOSE,
        }
    }
}

/// Draw the keybindings footer bar (one row).
pub fn draw_keys_bar(frame: &mut Frame, area: Rect, mode: InputMode, dialog_open: bool) {
    let keys = match mode {
        InputMode::Normal if dialog_open => {
            " ↑↓ прокрутка  n написать отзыв  Esc закрыть  ? помощь"
        }
        InputMode::Normal => {
            " ↑↓←→/hjkl выбор  Enter смотреть  1-5 оценка  f избранное  Tab панель  / поиск  ? помощь  q выход"
        }
        InputMode::Search => " текст поиска  Esc очистить/закрыть  Enter готово",
        InputMode::Compose => {
            " 1-5/←→ оценка  Tab поле текста  Enter опубликовать  Esc отмена"
        }
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", mode.label()),
            Style::default()
                .fg(mode.color())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(keys, Style::default().fg(C_MUTED)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
