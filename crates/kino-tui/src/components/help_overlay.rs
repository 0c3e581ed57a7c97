//! Help overlay — full keybinding reference, toggled with `?`.

use ratatui::crossterm::event::{KeyEvent, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::action::{Action, ComponentId};
use crate::app_state::AppState;
use crate::component::Component;
use crate::theme::{style_focused_border, C_ACCENT, C_PRIMARY, C_SECONDARY};

const BINDINGS: &[(&str, &str)] = &[
    ("↑↓←→ / hjkl", "выбор карточки"),
    ("Enter / w", "смотреть (открыть фильм)"),
    ("1-5", "поставить оценку"),
    ("f", "добавить в избранное"),
    ("Tab", "переключить панель"),
    ("/", "поиск"),
    ("n", "написать отзыв (в диалоге)"),
    ("Esc", "закрыть диалог / отменить"),
    ("?", "эта справка"),
    ("q / Ctrl+C", "выход"),
];

#[derive(Default)]
pub struct HelpOverlay {
    pub visible: bool,
}

impl HelpOverlay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component for HelpOverlay {
    fn id(&self) -> ComponentId {
        ComponentId::HelpOverlay
    }

    fn handle_key(&mut self, _key: KeyEvent, _state: &AppState) -> Vec<Action> {
        // Any key dismisses the overlay.
        vec![Action::ToggleHelp]
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, _state: &AppState) -> Vec<Action> {
        // With mouse capture on, Moved events stream constantly; only a
        // deliberate click dismisses the overlay.
        match event.kind {
            MouseEventKind::Down(_) => vec![Action::ToggleHelp],
            _ => Vec::new(),
        }
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        if matches!(action, Action::ToggleHelp) {
            self.visible = !self.visible;
        }
        Vec::new()
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, _state: &AppState) {
        if !self.visible {
            return;
        }
        let height = (BINDINGS.len() as u16 + 4).min(area.height);
        let width = 46.min(area.width);
        let [_, mid, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .areas(area);
        let [_, rect, _] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(width),
            Constraint::Fill(1),
        ])
        .areas(mid);

        frame.render_widget(Clear, rect);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(style_focused_border())
            .title(Span::styled(
                " Горячие клавиши ",
                Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD),
            ));
        let inner = block.inner(rect);
        frame.render_widget(block, rect);

        let mut lines = vec![Line::default()];
        for (keys, what) in BINDINGS {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<14}", keys), Style::default().fg(C_PRIMARY)),
                Span::styled(*what, Style::default().fg(C_SECONDARY)),
            ]));
        }
        frame.render_widget(Paragraph::new(lines), inner);
    }
}
