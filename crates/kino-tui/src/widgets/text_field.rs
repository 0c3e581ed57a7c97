//! Single-line text entry on top of tui-input (search box, review draft).

use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input};
use unicode_width::UnicodeWidthStr;

use crate::theme::{C_INPUT_BG, C_INPUT_FG, C_MUTED};

pub enum TextFieldAction {
    Changed(String),
    Confirmed,
    Cancelled,
}

pub struct TextField {
    input: Input,
    pub active: bool,
    placeholder: String,
    /// Decorative glyph drawn before the text ("🔍 ", "✎ ").
    prefix: String,
}

impl TextField {
    pub fn new(placeholder: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            input: Input::default(),
            active: false,
            placeholder: placeholder.into(),
            prefix: prefix.into(),
        }
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn clear(&mut self) {
        self.input = Input::default();
    }

    pub fn text(&self) -> &str {
        self.input.value()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_empty(&self) -> bool {
        self.input.value().is_empty()
    }

    /// Esc backs out in two steps: a field with text is cleared first, an
    /// already-empty field deactivates and reports `Cancelled`.
    pub fn handle_key(&mut self, key: KeyEvent) -> TextFieldAction {
        if key.code == KeyCode::Enter {
            return TextFieldAction::Confirmed;
        }
        if key.code == KeyCode::Esc {
            if self.is_empty() {
                self.deactivate();
                return TextFieldAction::Cancelled;
            }
            self.clear();
            return TextFieldAction::Changed(String::new());
        }
        self.input
            .handle_event(&ratatui::crossterm::event::Event::Key(key));
        TextFieldAction::Changed(self.input.value().to_string())
    }

    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        let prefix_width = self.prefix.width() as u16;
        let avail = area.width.saturating_sub(prefix_width + 1) as usize;
        let scroll = self.input.visual_scroll(avail);

        let mut spans = vec![Span::styled(
            self.prefix.clone(),
            Style::default().fg(C_MUTED),
        )];
        if self.is_empty() {
            spans.push(Span::styled(
                self.placeholder.clone(),
                Style::default().fg(C_MUTED),
            ));
        } else {
            // Skip by chars; the value is usually Cyrillic.
            let visible: String = self.input.value().chars().skip(scroll).collect();
            spans.push(Span::styled(visible, Style::default().fg(C_INPUT_FG)));
        }
        frame.render_widget(
            Paragraph::new(Line::from(spans)).style(Style::default().bg(C_INPUT_BG)),
            area,
        );

        if self.active {
            let cursor_x = area.x + prefix_width + (self.input.visual_cursor() - scroll) as u16;
            frame.set_cursor_position((
                cursor_x.min(area.x + area.width.saturating_sub(1)),
                area.y,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::{KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_accumulates_text() {
        let mut field = TextField::new("поиск", "/ ");
        field.activate();
        for c in "кино".chars() {
            field.handle_key(key(KeyCode::Char(c)));
        }
        assert_eq!(field.text(), "кино");
    }

    #[test]
    fn test_esc_clears_then_cancels() {
        let mut field = TextField::new("поиск", "/ ");
        field.activate();
        field.handle_key(key(KeyCode::Char('а')));

        match field.handle_key(key(KeyCode::Esc)) {
            TextFieldAction::Changed(s) => assert!(s.is_empty()),
            _ => panic!("first Esc should clear"),
        }
        assert!(field.is_active());

        match field.handle_key(key(KeyCode::Esc)) {
            TextFieldAction::Cancelled => {}
            _ => panic!("second Esc should cancel"),
        }
        assert!(!field.is_active());
    }

    #[test]
    fn test_backspace_edits() {
        let mut field = TextField::new("", "> ");
        field.activate();
        for c in "абв".chars() {
            field.handle_key(key(KeyCode::Char(c)));
        }
        field.handle_key(key(KeyCode::Backspace));
        assert_eq!(field.text(), "аб");
    }
}
