//! Transient corner notifications ("Оценка сохранена" etc).

use std::time::{Duration, Instant};

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};

use crate::theme::{C_TOAST_INFO, C_TOAST_SUCCESS, C_TOAST_WARNING};

const MAX_VISIBLE: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Severity {
    Info,
    Success,
    Warning,
}

impl Severity {
    fn color(self) -> Color {
        match self {
            Self::Info => C_TOAST_INFO,
            Self::Success => C_TOAST_SUCCESS,
            Self::Warning => C_TOAST_WARNING,
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Self::Info => "·",
            Self::Success => "✓",
            Self::Warning => "!",
        }
    }

    /// Warnings linger a little longer than confirmations.
    fn ttl(self) -> Duration {
        match self {
            Self::Info | Self::Success => Duration::from_secs(3),
            Self::Warning => Duration::from_secs(4),
        }
    }
}

struct Toast {
    text: String,
    severity: Severity,
    born: Instant,
}

impl Toast {
    fn expired(&self) -> bool {
        self.born.elapsed() >= self.severity.ttl()
    }
}

#[derive(Default)]
pub struct ToastManager {
    queue: Vec<Toast>,
}

impl ToastManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notify(&mut self, severity: Severity, text: impl Into<String>) {
        let text = text.into();
        // Re-notifying the same text restarts its timer instead of stacking.
        self.queue.retain(|t| t.text != text);
        self.queue.push(Toast {
            text,
            severity,
            born: Instant::now(),
        });
        if self.queue.len() > MAX_VISIBLE * 2 {
            self.queue.remove(0);
        }
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.notify(Severity::Info, text);
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.notify(Severity::Success, text);
    }

    pub fn warning(&mut self, text: impl Into<String>) {
        self.notify(Severity::Warning, text);
    }

    /// Drop expired entries. Called once per event-loop iteration.
    pub fn tick(&mut self) {
        self.queue.retain(|t| !t.expired());
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Newest first, stacked in the top-right corner.
    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        let widest = (area.width / 2).clamp(24, 60);

        for (slot, toast) in self.queue.iter().rev().take(MAX_VISIBLE).enumerate() {
            let y = area.y + 1 + slot as u16;
            if y >= area.bottom() {
                break;
            }
            let w = (toast.text.chars().count() as u16 + 4).min(widest);
            let rect = Rect::new(area.right().saturating_sub(w + 1), y, w, 1);

            frame.render_widget(Clear, rect);
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    format!(" {} {} ", toast.severity.icon(), toast.text),
                    Style::default()
                        .fg(toast.severity.color())
                        .add_modifier(Modifier::BOLD),
                ))),
                rect,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_text_restarts_instead_of_stacking() {
        let mut toasts = ToastManager::new();
        toasts.success("Отзыв опубликован");
        toasts.success("Отзыв опубликован");
        assert_eq!(toasts.queue.len(), 1);
    }

    #[test]
    fn test_tick_keeps_fresh_toasts() {
        let mut toasts = ToastManager::new();
        toasts.info("Оценка сохранена");
        toasts.tick();
        assert!(!toasts.is_empty());
    }

    #[test]
    fn test_queue_is_capped() {
        let mut toasts = ToastManager::new();
        for i in 0..20 {
            toasts.info(format!("сообщение {i}"));
        }
        assert!(toasts.queue.len() <= MAX_VISIBLE * 2);
    }
}
