//! Movie grid — the card collection under the section heading.
//!
//! Owns one `MovieCard` per catalog entry, lays them out in as many columns
//! as the width allows, and routes keys to the selected card and mouse
//! events to the card under the pointer.

use ratatui::crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Constraint, Layout, Position, Rect},
    Frame,
};

use crate::action::{Action, ComponentId};
use crate::app_state::AppState;
use crate::component::Component;
use crate::components::movie_card::{MovieCard, CARD_HEIGHT, CARD_MIN_WIDTH};

pub struct MovieGrid {
    cards: Vec<MovieCard>,
    selected: usize,
    /// Screen rect of each card, refreshed every draw.
    card_areas: Vec<Rect>,
    /// Column count of the last layout; drives up/down movement.
    cols: usize,
    /// Vertical scroll, in card rows.
    row_offset: usize,
}

impl MovieGrid {
    pub fn new(state: &AppState) -> Self {
        Self {
            cards: state.movies.iter().map(|m| MovieCard::new(m.id)).collect(),
            selected: 0,
            card_areas: Vec::new(),
            cols: 1,
            row_offset: 0,
        }
    }

    pub fn selected_movie_id(&self) -> Option<u32> {
        self.cards.get(self.selected).map(|c| c.movie_id)
    }

    fn move_selection(&mut self, delta: isize) {
        if self.cards.is_empty() {
            return;
        }
        let len = self.cards.len() as isize;
        let next = self.selected as isize + delta;
        if (0..len).contains(&next) {
            self.selected = next as usize;
        }
    }

    fn scroll_to_selection(&mut self, visible_rows: usize) {
        if self.cols == 0 || visible_rows == 0 {
            return;
        }
        let row = self.selected / self.cols;
        if row < self.row_offset {
            self.row_offset = row;
        } else if row >= self.row_offset + visible_rows {
            self.row_offset = row + 1 - visible_rows;
        }
    }
}

impl Component for MovieGrid {
    fn id(&self) -> ComponentId {
        ComponentId::MovieGrid
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => {
                self.move_selection(-1);
                Vec::new()
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.move_selection(1);
                Vec::new()
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_selection(-(self.cols as isize));
                Vec::new()
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_selection(self.cols as isize);
                Vec::new()
            }
            KeyCode::Home => {
                self.selected = 0;
                Vec::new()
            }
            KeyCode::End => {
                self.selected = self.cards.len().saturating_sub(1);
                Vec::new()
            }
            _ => match self.cards.get_mut(self.selected) {
                Some(card) => card.handle_key(key),
                None => Vec::new(),
            },
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, _state: &AppState) -> Vec<Action> {
        let pos = Position::new(event.column, event.row);
        let hit = self
            .card_areas
            .iter()
            .position(|rect| rect.contains(pos));

        match event.kind {
            MouseEventKind::Moved => {
                // Only the card under the pointer keeps a hover preview.
                for (i, card) in self.cards.iter_mut().enumerate() {
                    if Some(i) != hit {
                        card.clear_hover();
                    }
                }
                if let Some(i) = hit {
                    if let Some(card) = self.cards.get_mut(i) {
                        return card.handle_mouse(event);
                    }
                }
                Vec::new()
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(i) = hit {
                    self.selected = i;
                    if let Some(card) = self.cards.get_mut(i) {
                        return card.handle_mouse(event);
                    }
                }
                Vec::new()
            }
            MouseEventKind::ScrollUp => {
                self.move_selection(-(self.cols as isize));
                Vec::new()
            }
            MouseEventKind::ScrollDown => {
                self.move_selection(self.cols as isize);
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        if let Action::Watch(id) = action {
            // Keep the grid selection in sync with what was opened.
            if let Some(i) = self.cards.iter().position(|c| c.movie_id == *id) {
                self.selected = i;
            }
        }
        Vec::new()
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        self.cols = ((area.width / CARD_MIN_WIDTH) as usize).max(1).min(3);
        let visible_rows = ((area.height / CARD_HEIGHT) as usize).max(1);
        self.scroll_to_selection(visible_rows);

        let total_rows = self.cards.len().div_ceil(self.cols);
        self.card_areas = vec![Rect::default(); self.cards.len()];

        let row_constraints: Vec<Constraint> = (0..visible_rows)
            .map(|_| Constraint::Length(CARD_HEIGHT))
            .collect();
        let row_rects = Layout::vertical(row_constraints).split(area);

        for (vis_row, row_rect) in row_rects.iter().enumerate() {
            let row = self.row_offset + vis_row;
            if row >= total_rows {
                break;
            }
            let col_constraints: Vec<Constraint> = (0..self.cols)
                .map(|_| Constraint::Ratio(1, self.cols as u32))
                .collect();
            let col_rects = Layout::horizontal(col_constraints).split(*row_rect);

            for (col, col_rect) in col_rects.iter().enumerate() {
                let idx = row * self.cols + col;
                let Some(card) = self.cards.get_mut(idx) else {
                    break;
                };
                let Some(movie) = state.movies.iter().find(|m| m.id == card.movie_id) else {
                    continue;
                };
                self.card_areas[idx] = *col_rect;
                card.draw(frame, *col_rect, movie, focused && idx == self.selected);
            }
        }
    }
}
