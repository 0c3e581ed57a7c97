//! Detail dialog — modal with a video placeholder, the movie's details and
//! the review panel.
//!
//! A fresh dialog (and therefore a fresh review panel) is built every time a
//! movie is opened; closing it drops everything except the page-level
//! selection.

use ratatui::crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph, Wrap},
    Frame,
};

use crate::action::{Action, ComponentId};
use crate::app_state::AppState;
use crate::component::Component;
use crate::components::review_panel::ReviewPanel;
use crate::theme::{C_GENRE, C_MUTED, C_POSTER_FILL, C_SECONDARY, C_STARS};
use crate::widgets::pane_chrome::{pane_chrome, Badge};
use crate::widgets::star_rating;

const VIDEO_ROWS: u16 = 4;

pub struct DetailDialog {
    movie_id: u32,
    panel: ReviewPanel,
    /// Outer rect of the last draw, for outside-click detection.
    area: Rect,
    panel_area: Rect,
}

/// Centered rect taking `percent_x` / `percent_y` of the parent.
fn centered_rect(percent_x: u16, percent_y: u16, parent: Rect) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(parent);
    let [_, rect, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(mid);
    rect
}

impl DetailDialog {
    pub fn new(movie_id: u32, state: &AppState) -> Self {
        let title = state
            .movie(movie_id)
            .map(|m| m.title.as_str())
            .unwrap_or("");
        Self {
            movie_id,
            panel: ReviewPanel::new(title, &state.viewer_label, &state.date_format),
            area: Rect::default(),
            panel_area: Rect::default(),
        }
    }

    pub fn movie_id(&self) -> u32 {
        self.movie_id
    }

    pub fn is_composing(&self) -> bool {
        self.panel.is_composing()
    }
}

impl Component for DetailDialog {
    fn id(&self) -> ComponentId {
        ComponentId::DetailDialog
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        match key.code {
            // Esc backs out one layer: the draft first, then the dialog.
            KeyCode::Esc if !self.panel.is_composing() => vec![Action::CloseDialog],
            _ => self.panel.handle_key(key),
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, _state: &AppState) -> Vec<Action> {
        let pos = Position::new(event.column, event.row);
        if event.kind == MouseEventKind::Down(MouseButton::Left) && !self.area.contains(pos) {
            return vec![Action::CloseDialog];
        }
        if self.panel_area.contains(pos)
            || matches!(event.kind, MouseEventKind::ScrollUp | MouseEventKind::ScrollDown)
        {
            return self.panel.handle_mouse(event);
        }
        Vec::new()
    }

    fn on_action(&mut self, _action: &Action, _state: &AppState) -> Vec<Action> {
        Vec::new()
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, state: &AppState) {
        let Some(movie) = state.movie(self.movie_id) else {
            return;
        };

        let dialog_area = centered_rect(80, 85, area);
        self.area = dialog_area;
        frame.render_widget(Clear, dialog_area);

        let block = pane_chrome(
            &movie.title,
            true,
            Some(Badge {
                text: "Esc закрыть",
                color: C_MUTED,
            }),
        );
        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let [video, meta, desc, _gap, panel_area] = Layout::vertical([
            Constraint::Length(VIDEO_ROWS),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(6),
        ])
        .areas(inner);

        // Video placeholder, where the player would embed.
        let video_lines: Vec<Line> = (0..VIDEO_ROWS)
            .map(|row| {
                if row == VIDEO_ROWS / 2 {
                    Line::from(Span::styled(
                        "▶  Видеоплеер",
                        Style::default().fg(C_SECONDARY).add_modifier(Modifier::BOLD),
                    ))
                    .alignment(Alignment::Center)
                } else {
                    Line::default()
                }
            })
            .collect();
        frame.render_widget(
            Paragraph::new(video_lines).style(Style::default().bg(C_POSTER_FILL)),
            video,
        );

        // Genre, year and the aggregate rating on one line.
        let mut meta_spans = vec![
            Span::styled(movie.genre.clone(), Style::default().fg(C_GENRE)),
            Span::styled(format!("  {}  ", movie.year), Style::default().fg(C_SECONDARY)),
        ];
        meta_spans.extend(star_rating::display_line(movie.rating).spans);
        meta_spans.push(Span::styled(
            format!(" {:.1}", movie.rating),
            Style::default().fg(C_STARS),
        ));
        frame.render_widget(Paragraph::new(Line::from(meta_spans)), meta);

        frame.render_widget(
            Paragraph::new(Span::styled(
                movie.description.clone(),
                Style::default().fg(C_SECONDARY),
            ))
            .wrap(Wrap { trim: true }),
            desc,
        );

        self.panel_area = panel_area;
        self.panel.draw(frame, panel_area);
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

    fn state() -> AppState {
        let mut s = AppState::new(&Config::default());
        s.watch(2);
        s
    }

    #[test]
    fn test_esc_closes_when_not_composing() {
        let s = state();
        let mut dialog = DetailDialog::new(2, &s);
        let actions = dialog.handle_key(key(KeyCode::Esc), &s);
        assert_eq!(actions, vec![Action::CloseDialog]);
    }

    #[test]
    fn test_esc_cancels_compose_before_closing() {
        let s = state();
        let mut dialog = DetailDialog::new(2, &s);

        dialog.handle_key(key(KeyCode::Char('n')), &s);
        assert!(dialog.is_composing());

        let actions = dialog.handle_key(key(KeyCode::Esc), &s);
        assert_eq!(actions, vec![Action::CloseCompose]);
        assert!(!dialog.is_composing());

        let actions = dialog.handle_key(key(KeyCode::Esc), &s);
        assert_eq!(actions, vec![Action::CloseDialog]);
    }

    #[test]
    fn test_outside_click_closes() {
        let s = state();
        let mut dialog = DetailDialog::new(2, &s);
        dialog.area = Rect::new(10, 5, 60, 20);

        let event = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 2,
            row: 2,
            modifiers: KeyModifiers::NONE,
        };
        let actions = dialog.handle_mouse(event, Rect::new(0, 0, 80, 30), &s);
        assert_eq!(actions, vec![Action::CloseDialog]);
    }

    #[test]
    fn test_review_flow_reaches_panel() {
        let s = state();
        let mut dialog = DetailDialog::new(2, &s);

        dialog.handle_key(key(KeyCode::Char('n')), &s);
        dialog.handle_key(key(KeyCode::Char('5')), &s);
        dialog.handle_key(key(KeyCode::Tab), &s);
        for c in "Класс".chars() {
            dialog.handle_key(key(KeyCode::Char(c)), &s);
        }
        let actions = dialog.handle_key(key(KeyCode::Enter), &s);
        assert!(actions.contains(&Action::ReviewPublished));
    }
}
