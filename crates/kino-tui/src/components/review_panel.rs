//! Review panel — the list of reviews plus the draft form, shown inside the
//! detail dialog.
//!
//! The panel owns its review list.  It is created fresh (seed reviews only)
//! each time a dialog opens and destroyed with it, so published reviews live
//! exactly as long as the dialog.  The rest of the app only hears a
//! `ReviewPublished` notification.

use kino_models::review::{self, Review};
use ratatui::crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Constraint, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::action::Action;
use crate::theme::{
    C_ACCENT, C_MUTED, C_PRIMARY, C_SECONDARY, C_SELECTION_BG,
};
use crate::widgets::star_rating::{self, StarPicker};
use crate::widgets::text_field::{TextField, TextFieldAction};

const WRITE_BUTTON: &str = "[ Написать отзыв ]";
const SUBMIT_BUTTON: &str = "[ Опубликовать ]";
const CANCEL_BUTTON: &str = "[ Отмена ]";
const EMPTY_LIST: &str = "Пока нет отзывов. Станьте первым!";

#[derive(Debug, Clone, Copy, PartialEq)]
enum ComposeState {
    Idle,
    Composing,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ComposeFocus {
    Rating,
    Text,
}

pub struct ReviewPanel {
    movie_title: String,
    reviews: Vec<Review>,

    compose: ComposeState,
    focus_field: ComposeFocus,
    draft_rating: u8,
    draft_picker: StarPicker,
    text: TextField,

    scroll: u16,
    viewer_label: String,
    date_format: String,

    write_button: Rect,
    draft_stars: Rect,
    submit_button: Rect,
    cancel_button: Rect,
}

/// Greedy word wrap by display width.  Words wider than the line get split
/// hard so nothing is lost.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let sep = if current.is_empty() { 0 } else { 1 };
        if current.width() + sep + word.width() <= width {
            if sep == 1 {
                current.push(' ');
            }
            current.push_str(word);
        } else {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let mut rest = word;
            while rest.width() > width {
                let mut cut = rest.len();
                let mut last_fit = 0;
                for (i, c) in rest.char_indices() {
                    let end = i + c.len_utf8();
                    if rest[..end].width() > width {
                        // Always consume at least one char per line.
                        cut = if last_fit == 0 { end } else { last_fit };
                        break;
                    }
                    last_fit = end;
                }
                lines.push(rest[..cut].to_string());
                rest = &rest[cut..];
            }
            current.push_str(rest);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

impl ReviewPanel {
    pub fn new(movie_title: &str, viewer_label: &str, date_format: &str) -> Self {
        Self {
            movie_title: movie_title.to_string(),
            reviews: review::seed_reviews(),
            compose: ComposeState::Idle,
            focus_field: ComposeFocus::Rating,
            draft_rating: 0,
            draft_picker: StarPicker::new(),
            text: TextField::new("Поделитесь впечатлениями о фильме...", "✎ "),
            scroll: 0,
            viewer_label: viewer_label.to_string(),
            date_format: date_format.to_string(),
            write_button: Rect::default(),
            draft_stars: Rect::default(),
            submit_button: Rect::default(),
            cancel_button: Rect::default(),
        }
    }

    pub fn is_composing(&self) -> bool {
        self.compose == ComposeState::Composing
    }

    pub fn review_count(&self) -> usize {
        self.reviews.len()
    }

    fn start_compose(&mut self) -> Vec<Action> {
        self.compose = ComposeState::Composing;
        self.focus_field = ComposeFocus::Rating;
        vec![Action::OpenCompose]
    }

    /// Abandon the draft.  Rating and text reset so the next compose starts
    /// clean.
    pub fn cancel_compose(&mut self) -> Vec<Action> {
        self.compose = ComposeState::Idle;
        self.draft_rating = 0;
        self.draft_picker.clear_hover();
        self.text.clear();
        self.text.deactivate();
        vec![Action::CloseCompose]
    }

    /// Publish the draft if it is valid.  A valid draft needs a star rating
    /// and non-blank text.
    fn try_submit(&mut self) -> Vec<Action> {
        let body = self.text.text().to_string();
        if !review::draft_is_valid(self.draft_rating, &body) {
            return Vec::new();
        }
        let published = review::review_from_draft(
            &self.viewer_label,
            self.draft_rating,
            body,
            &self.date_format,
        );
        tracing::info!(review_id = published.id, rating = published.rating, "review published");
        self.reviews.insert(0, published);

        self.compose = ComposeState::Idle;
        self.draft_rating = 0;
        self.text.clear();
        self.text.deactivate();
        self.scroll = 0;
        vec![Action::ReviewPublished, Action::CloseCompose]
    }

    fn focus_text(&mut self) {
        self.focus_field = ComposeFocus::Text;
        self.text.activate();
    }

    fn focus_rating(&mut self) {
        self.focus_field = ComposeFocus::Rating;
        self.text.deactivate();
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        match self.compose {
            ComposeState::Idle => match key.code {
                KeyCode::Char('n') => self.start_compose(),
                KeyCode::Up | KeyCode::Char('k') => {
                    self.scroll = self.scroll.saturating_sub(1);
                    Vec::new()
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.scroll = self.scroll.saturating_add(1);
                    Vec::new()
                }
                _ => Vec::new(),
            },
            ComposeState::Composing => match self.focus_field {
                ComposeFocus::Rating => match key.code {
                    KeyCode::Char(c @ '1'..='5') => {
                        self.draft_rating = c as u8 - b'0';
                        Vec::new()
                    }
                    KeyCode::Left => {
                        self.draft_rating = self.draft_rating.saturating_sub(1);
                        Vec::new()
                    }
                    KeyCode::Right => {
                        self.draft_rating = (self.draft_rating + 1).min(5);
                        Vec::new()
                    }
                    KeyCode::Tab | KeyCode::Enter | KeyCode::Down => {
                        self.focus_text();
                        Vec::new()
                    }
                    KeyCode::Esc => self.cancel_compose(),
                    _ => Vec::new(),
                },
                ComposeFocus::Text => match key.code {
                    KeyCode::Tab | KeyCode::BackTab => {
                        self.focus_rating();
                        Vec::new()
                    }
                    _ => match self.text.handle_key(key) {
                        TextFieldAction::Confirmed => self.try_submit(),
                        TextFieldAction::Cancelled => self.cancel_compose(),
                        TextFieldAction::Changed(_) => Vec::new(),
                    },
                },
            },
        }
    }

    pub fn handle_mouse(&mut self, event: MouseEvent) -> Vec<Action> {
        let pos = Position::new(event.column, event.row);
        match event.kind {
            MouseEventKind::Moved if self.is_composing() => {
                if self.draft_stars.contains(pos) {
                    let offset = event.column - self.draft_stars.x;
                    if let Some(cell) = star_rating::cell_at(offset) {
                        self.draft_picker.hover_cell(cell);
                        return Vec::new();
                    }
                }
                self.draft_picker.clear_hover();
                Vec::new()
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if self.compose == ComposeState::Idle {
                    if self.write_button.contains(pos) {
                        return self.start_compose();
                    }
                    return Vec::new();
                }
                if self.draft_stars.contains(pos) {
                    let offset = event.column - self.draft_stars.x;
                    if let Some(cell) = star_rating::cell_at(offset) {
                        self.draft_rating = StarPicker::click_cell(cell);
                        self.focus_field = ComposeFocus::Rating;
                        self.text.deactivate();
                    }
                } else if self.submit_button.contains(pos) {
                    return self.try_submit();
                } else if self.cancel_button.contains(pos) {
                    return self.cancel_compose();
                }
                Vec::new()
            }
            MouseEventKind::ScrollUp => {
                self.scroll = self.scroll.saturating_sub(1);
                Vec::new()
            }
            MouseEventKind::ScrollDown => {
                self.scroll = self.scroll.saturating_add(1);
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    /// Build the rendered review list for a given inner width.
    fn build_list_lines(&self, width: usize) -> Vec<Line<'static>> {
        if self.reviews.is_empty() {
            return vec![
                Line::default(),
                Line::from(Span::styled(EMPTY_LIST, Style::default().fg(C_MUTED))),
            ];
        }
        let mut lines = Vec::new();
        for review in &self.reviews {
            // Author initial stands in for the avatar image.
            let initial = review.author.chars().next().unwrap_or('·');
            let mut header = vec![
                Span::styled(format!("({}) ", initial), Style::default().fg(C_ACCENT)),
                Span::styled(
                    review.author.clone(),
                    Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
            ];
            header.extend(star_rating::stars_line(review.rating as usize).spans);
            header.push(Span::styled(
                format!(" {}", review.date),
                Style::default().fg(C_MUTED),
            ));
            lines.push(Line::from(header));

            for wrapped in wrap_text(&review.text, width) {
                lines.push(Line::from(Span::styled(
                    wrapped,
                    Style::default().fg(C_SECONDARY),
                )));
            }
            // Decorative footer actions, matching the card layout of the site.
            lines.push(Line::from(Span::styled(
                "👍 Полезно   ↩ Ответить",
                Style::default().fg(C_MUTED),
            )));
            lines.push(Line::default());
        }
        lines
    }

    pub fn draw(&mut self, frame: &mut Frame, area: Rect) {
        let heading = format!("Отзывы о фильме \"{}\"", self.movie_title);

        let form_height = if self.is_composing() { 4 } else { 1 };
        let [heading_area, form_area, list_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(form_height),
            Constraint::Min(1),
        ])
        .areas(area);

        frame.render_widget(
            Paragraph::new(Span::styled(
                heading,
                Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD),
            )),
            heading_area,
        );

        self.write_button = Rect::default();
        self.draft_stars = Rect::default();
        self.submit_button = Rect::default();
        self.cancel_button = Rect::default();

        if self.is_composing() {
            self.draw_form(frame, form_area);
        } else {
            let style = Style::default()
                .fg(C_PRIMARY)
                .bg(C_SELECTION_BG)
                .add_modifier(Modifier::BOLD);
            frame.render_widget(Paragraph::new(Span::styled(WRITE_BUTTON, style)), form_area);
            self.write_button = Rect {
                width: (WRITE_BUTTON.width() as u16).min(form_area.width),
                height: 1,
                ..form_area
            };
        }

        let lines = self.build_list_lines(list_area.width as usize);
        let max_scroll = (lines.len() as u16).saturating_sub(list_area.height);
        self.scroll = self.scroll.min(max_scroll);
        frame.render_widget(
            Paragraph::new(lines).scroll((self.scroll, 0)),
            list_area,
        );
    }

    fn draw_form(&mut self, frame: &mut Frame, area: Rect) {
        let [stars_row, input_row, buttons_row, _gap] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        let label = "Оценка: ";
        let marker = if self.focus_field == ComposeFocus::Rating {
            "› "
        } else {
            "  "
        };
        let mut spans = vec![
            Span::styled(marker, Style::default().fg(C_ACCENT)),
            Span::styled(label, Style::default().fg(C_SECONDARY)),
        ];
        spans.extend(self.draft_picker.line(self.draft_rating).spans);
        frame.render_widget(Paragraph::new(Line::from(spans)), stars_row);

        let prefix = marker.width() as u16 + label.width() as u16;
        let stars_width = star_rating::STAR_COUNT as u16 * star_rating::CELL_WIDTH;
        self.draft_stars = Rect {
            x: stars_row.x + prefix,
            y: stars_row.y,
            width: stars_width.min(stars_row.width.saturating_sub(prefix)),
            height: 1,
        };

        self.text.draw(frame, input_row);

        let submit_style = if review::draft_is_valid(self.draft_rating, self.text.text()) {
            Style::default()
                .fg(C_PRIMARY)
                .bg(C_SELECTION_BG)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(C_MUTED)
        };
        let buttons = Line::from(vec![
            Span::styled(SUBMIT_BUTTON, submit_style),
            Span::raw("  "),
            Span::styled(CANCEL_BUTTON, Style::default().fg(C_SECONDARY)),
        ]);
        frame.render_widget(Paragraph::new(buttons), buttons_row);

        let submit_w = SUBMIT_BUTTON.width() as u16;
        self.submit_button = Rect {
            x: buttons_row.x,
            y: buttons_row.y,
            width: submit_w.min(buttons_row.width),
            height: 1,
        };
        self.cancel_button = Rect {
            x: buttons_row.x + submit_w + 2,
            y: buttons_row.y,
            width: (CANCEL_BUTTON.width() as u16)
                .min(buttons_row.width.saturating_sub(submit_w + 2)),
            height: 1,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn panel() -> ReviewPanel {
        ReviewPanel::new("Тёмный рассвет", "Вы", "%d.%m.%Y")
    }

    fn type_text(panel: &mut ReviewPanel, text: &str) {
        for c in text.chars() {
            panel.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_opens_with_seed_reviews() {
        let p = panel();
        assert_eq!(p.review_count(), 2);
        assert!(!p.is_composing());
    }

    #[test]
    fn test_full_compose_flow_prepends_review() {
        let mut p = panel();

        assert_eq!(p.handle_key(key(KeyCode::Char('n'))), vec![Action::OpenCompose]);
        assert!(p.is_composing());

        p.handle_key(key(KeyCode::Char('4')));
        p.handle_key(key(KeyCode::Tab));
        type_text(&mut p, "Отличный фильм");

        let actions = p.handle_key(key(KeyCode::Enter));
        assert_eq!(actions, vec![Action::ReviewPublished, Action::CloseCompose]);
        assert!(!p.is_composing());
        assert_eq!(p.review_count(), 3);
        assert_eq!(p.reviews[0].author, "Вы");
        assert_eq!(p.reviews[0].rating, 4);
        assert_eq!(p.reviews[0].text, "Отличный фильм");
        // Seed reviews pushed down, untouched.
        assert_eq!(p.reviews[1].author, "Алексей Иванов");
    }

    #[test]
    fn test_submit_requires_rating() {
        let mut p = panel();
        p.handle_key(key(KeyCode::Char('n')));
        // Straight to text without picking stars.
        p.handle_key(key(KeyCode::Tab));
        type_text(&mut p, "Текст без оценки");

        assert!(p.handle_key(key(KeyCode::Enter)).is_empty());
        assert!(p.is_composing());
        assert_eq!(p.review_count(), 2);
    }

    #[test]
    fn test_submit_requires_nonblank_text() {
        let mut p = panel();
        p.handle_key(key(KeyCode::Char('n')));
        p.handle_key(key(KeyCode::Char('5')));
        p.handle_key(key(KeyCode::Tab));
        type_text(&mut p, "   ");

        assert!(p.handle_key(key(KeyCode::Enter)).is_empty());
        assert_eq!(p.review_count(), 2);
    }

    #[test]
    fn test_cancel_resets_draft() {
        let mut p = panel();
        p.handle_key(key(KeyCode::Char('n')));
        p.handle_key(key(KeyCode::Char('3')));

        let actions = p.handle_key(key(KeyCode::Esc));
        assert_eq!(actions, vec![Action::CloseCompose]);
        assert!(!p.is_composing());

        // Next compose starts from scratch.
        p.handle_key(key(KeyCode::Char('n')));
        assert_eq!(p.draft_rating, 0);
        assert!(p.text.is_empty());
    }

    #[test]
    fn test_submit_resets_draft_for_next_review() {
        let mut p = panel();
        p.handle_key(key(KeyCode::Char('n')));
        p.handle_key(key(KeyCode::Char('5')));
        p.handle_key(key(KeyCode::Tab));
        type_text(&mut p, "Шедевр");
        p.handle_key(key(KeyCode::Enter));

        p.handle_key(key(KeyCode::Char('n')));
        assert_eq!(p.draft_rating, 0);
        assert!(p.text.is_empty());
    }

    #[test]
    fn test_arrow_keys_adjust_draft_rating() {
        let mut p = panel();
        p.handle_key(key(KeyCode::Char('n')));
        p.handle_key(key(KeyCode::Right));
        p.handle_key(key(KeyCode::Right));
        assert_eq!(p.draft_rating, 2);
        p.handle_key(key(KeyCode::Left));
        assert_eq!(p.draft_rating, 1);

        for _ in 0..10 {
            p.handle_key(key(KeyCode::Right));
        }
        assert_eq!(p.draft_rating, 5);
    }

    #[test]
    fn test_empty_list_shows_placeholder() {
        let mut p = panel();
        p.reviews.clear();
        let lines = p.build_list_lines(60);
        let text: String = lines
            .iter()
            .flat_map(|l| l.spans.iter())
            .map(|s| s.content.to_string())
            .collect();
        assert!(text.contains(EMPTY_LIST));
    }

    #[test]
    fn test_wrap_text_respects_width() {
        let wrapped = wrap_text("Очень интересная история, хотя местами темп проседает", 20);
        assert!(wrapped.len() > 1);
        for line in &wrapped {
            assert!(line.width() <= 20, "line too wide: {line}");
        }
    }
}
