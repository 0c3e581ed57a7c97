//! A single movie card — poster placeholder, metadata, watch button, and
//! the viewer's interactive star row.
//!
//! Cards are sub-widgets of the grid, not standalone components: the grid
//! routes keys to the selected card and mouse events to the card under the
//! pointer.

use kino_models::movie::Movie;
use ratatui::crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthChar;

use crate::action::Action;
use crate::theme::{
    style_focused_border, style_unfocused_border, C_FAVORITE, C_GENRE, C_MUTED, C_POSTER_FILL,
    C_PRIMARY, C_SECONDARY, C_STARS, C_YEAR_BADGE,
};
use crate::widgets::star_rating::{self, StarPicker};

/// Rows a card needs to render fully (poster + metadata + actions).
pub const CARD_HEIGHT: u16 = 13;
pub const CARD_MIN_WIDTH: u16 = 28;

const POSTER_ROWS: u16 = 4;
const WATCH_LABEL: &str = "▶ Смотреть";
const RATE_LABEL: &str = "Ваша оценка: ";

pub struct MovieCard {
    pub movie_id: u32,
    picker: StarPicker,
    pub favorite: bool,
    rating_row: Rect,
    watch_row: Rect,
    fav_cell: Rect,
}

/// Truncate to `max` display columns, appending an ellipsis if cut.
fn truncate_line(text: &str, max: usize) -> String {
    let mut width = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > max.saturating_sub(1) {
            out.push('…');
            return out;
        }
        width += w;
        out.push(c);
    }
    out
}

impl MovieCard {
    pub fn new(movie_id: u32) -> Self {
        Self {
            movie_id,
            picker: StarPicker::new(),
            favorite: false,
            rating_row: Rect::default(),
            watch_row: Rect::default(),
            fav_cell: Rect::default(),
        }
    }

    /// Keys that act on this card when it is the grid's selection.
    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        match key.code {
            KeyCode::Enter | KeyCode::Char('w') => vec![Action::Watch(self.movie_id)],
            KeyCode::Char('f') => {
                self.favorite = !self.favorite;
                Vec::new()
            }
            KeyCode::Char(c @ '1'..='5') => {
                let rating = c as u8 - b'0';
                vec![Action::Rate(self.movie_id, rating)]
            }
            _ => Vec::new(),
        }
    }

    /// Mouse events whose coordinates fall inside this card's area.
    pub fn handle_mouse(&mut self, event: MouseEvent) -> Vec<Action> {
        let pos = Position::new(event.column, event.row);
        match event.kind {
            MouseEventKind::Moved => {
                if self.rating_row.contains(pos) {
                    let offset = event.column - self.rating_row.x;
                    if let Some(cell) = star_rating::cell_at(offset) {
                        self.picker.hover_cell(cell);
                    } else {
                        self.picker.clear_hover();
                    }
                } else {
                    self.picker.clear_hover();
                }
                Vec::new()
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if self.rating_row.contains(pos) {
                    let offset = event.column - self.rating_row.x;
                    if let Some(cell) = star_rating::cell_at(offset) {
                        return vec![Action::Rate(self.movie_id, StarPicker::click_cell(cell))];
                    }
                } else if self.watch_row.contains(pos) {
                    return vec![Action::Watch(self.movie_id)];
                } else if self.fav_cell.contains(pos) {
                    self.favorite = !self.favorite;
                }
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    pub fn clear_hover(&mut self) {
        self.picker.clear_hover();
    }

    pub fn draw(&mut self, frame: &mut Frame, area: Rect, movie: &Movie, selected: bool) {
        let border_style = if selected {
            style_focused_border()
        } else {
            style_unfocused_border()
        };
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title_top(
                Line::from(Span::styled(
                    format!(" {} ", movie.year),
                    Style::default().fg(C_YEAR_BADGE).add_modifier(Modifier::BOLD),
                ))
                .right_aligned(),
            );
        if self.favorite {
            block = block.title_top(
                Line::from(Span::styled(" ♥ ", Style::default().fg(C_FAVORITE))).left_aligned(),
            );
        }
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height < POSTER_ROWS + 2 {
            return;
        }

        let [poster, title, genre, stars, desc, watch, rate] = Layout::vertical([
            Constraint::Length(POSTER_ROWS),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        // Poster placeholder: a filled band with the movie's initial letter.
        let initial = movie.title.chars().next().unwrap_or('·');
        let poster_block = Paragraph::new(
            (0..POSTER_ROWS)
                .map(|row| {
                    if row == POSTER_ROWS / 2 {
                        Line::from(Span::styled(
                            initial.to_string(),
                            Style::default().fg(C_SECONDARY).add_modifier(Modifier::BOLD),
                        ))
                        .alignment(Alignment::Center)
                    } else {
                        Line::default()
                    }
                })
                .collect::<Vec<_>>(),
        )
        .style(Style::default().bg(C_POSTER_FILL));
        frame.render_widget(poster_block, poster);

        frame.render_widget(
            Paragraph::new(Span::styled(
                truncate_line(&movie.title, title.width as usize),
                Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
            )),
            title,
        );
        frame.render_widget(
            Paragraph::new(Span::styled(movie.genre.clone(), Style::default().fg(C_GENRE))),
            genre,
        );

        // Aggregate rating: display-mode stars plus the numeric value.
        let mut star_spans = star_rating::display_line(movie.rating).spans;
        star_spans.push(Span::styled(
            format!(" {:.1}", movie.rating),
            Style::default().fg(C_STARS),
        ));
        frame.render_widget(Paragraph::new(Line::from(star_spans)), stars);

        frame.render_widget(
            Paragraph::new(Span::styled(
                truncate_line(&movie.description, desc.width as usize),
                Style::default().fg(C_MUTED),
            )),
            desc,
        );

        frame.render_widget(
            Paragraph::new(Span::styled(
                WATCH_LABEL,
                Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
            ))
            .style(Style::default().bg(C_YEAR_BADGE)),
            watch,
        );
        self.watch_row = watch;

        // "Ваша оценка: ★ ★ ★ ☆ ☆  ♥"
        let label_width = RATE_LABEL.chars().count() as u16;
        let current = movie.user_rating.unwrap_or(0);
        let mut rate_spans = vec![Span::styled(RATE_LABEL, Style::default().fg(C_SECONDARY))];
        rate_spans.extend(self.picker.line(current).spans);
        frame.render_widget(Paragraph::new(Line::from(rate_spans)), rate);

        let stars_width = star_rating::STAR_COUNT as u16 * star_rating::CELL_WIDTH;
        self.rating_row = Rect {
            x: rate.x + label_width,
            y: rate.y,
            width: stars_width.min(rate.width.saturating_sub(label_width)),
            height: 1,
        };
        self.fav_cell = Rect {
            x: area.x + 1,
            y: area.y,
            width: 3,
            height: 1,
        };
    }
}
