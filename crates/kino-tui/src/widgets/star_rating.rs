//! Five-cell star rating — display and interactive modes.
//!
//! Display mode is a pure function of an aggregate value.  Interactive mode
//! (`StarPicker`) holds only the transient hover position; the chosen rating
//! lives with whoever owns the data.

use ratatui::{
    style::Style,
    text::{Line, Span},
};

use crate::theme::{C_MUTED, C_STARS};

pub const STAR_COUNT: usize = 5;
/// Each cell renders as one star glyph plus a trailing space.
pub const CELL_WIDTH: u16 = 2;

const STAR_FILLED: &str = "★";
const STAR_EMPTY: &str = "☆";

/// How many of the 5 cells are filled for an aggregate `value` in [0, 5].
/// Cell `i` is filled iff `i < round(value)`; no partial stars.
pub fn filled_cells(value: f32) -> usize {
    (value.clamp(0.0, 5.0).round() as usize).min(STAR_COUNT)
}

/// Render a display-mode star row for an aggregate value.
pub fn display_line(value: f32) -> Line<'static> {
    stars_line(filled_cells(value))
}

/// Render a star row with exactly `filled` leading filled cells.
pub fn stars_line(filled: usize) -> Line<'static> {
    let filled = filled.min(STAR_COUNT);
    let mut spans = Vec::with_capacity(STAR_COUNT);
    for i in 0..STAR_COUNT {
        let (glyph, color) = if i < filled {
            (STAR_FILLED, C_STARS)
        } else {
            (STAR_EMPTY, C_MUTED)
        };
        spans.push(Span::styled(
            format!("{} ", glyph),
            Style::default().fg(color),
        ));
    }
    Line::from(spans)
}

/// Map a column offset within a rendered star row to a cell index.
pub fn cell_at(col_offset: u16) -> Option<usize> {
    let cell = (col_offset / CELL_WIDTH) as usize;
    (cell < STAR_COUNT).then_some(cell)
}

/// Transient hover state for an interactive star row.
#[derive(Debug, Clone, Copy, Default)]
pub struct StarPicker {
    hover: Option<u8>,
}

impl StarPicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hovering cell `i` previews a rating of `i + 1`.
    pub fn hover_cell(&mut self, i: usize) {
        if i < STAR_COUNT {
            self.hover = Some((i + 1) as u8);
        }
    }

    /// The pointer left the whole control.
    pub fn clear_hover(&mut self) {
        self.hover = None;
    }

    pub fn hover(&self) -> Option<u8> {
        self.hover
    }

    /// Clicking cell `i` chooses a rating of `i + 1`.
    pub fn click_cell(i: usize) -> u8 {
        ((i + 1).min(STAR_COUNT)) as u8
    }

    /// How many cells render filled given the owner's current rating.
    /// Hover preview wins over the committed value.
    pub fn filled(&self, current: u8) -> usize {
        self.hover.unwrap_or(current).min(STAR_COUNT as u8) as usize
    }

    /// Render the interactive row for the owner's current rating.
    pub fn line(&self, current: u8) -> Line<'static> {
        stars_line(self.filled(current))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_fill_counts() {
        assert_eq!(filled_cells(0.0), 0);
        assert_eq!(filled_cells(0.4), 0);
        assert_eq!(filled_cells(0.5), 1);
        assert_eq!(filled_cells(4.2), 4);
        assert_eq!(filled_cells(4.5), 5);
        assert_eq!(filled_cells(4.8), 5);
        assert_eq!(filled_cells(5.0), 5);
    }

    #[test]
    fn test_display_clamps_out_of_range() {
        assert_eq!(filled_cells(-1.0), 0);
        assert_eq!(filled_cells(7.3), 5);
    }

    #[test]
    fn test_click_cell_maps_to_one_based_rating() {
        for i in 0..STAR_COUNT {
            assert_eq!(StarPicker::click_cell(i), (i + 1) as u8);
        }
    }

    #[test]
    fn test_hover_previews_and_clears() {
        let mut picker = StarPicker::new();
        assert_eq!(picker.filled(3), 3);

        picker.hover_cell(4);
        assert_eq!(picker.hover(), Some(5));
        assert_eq!(picker.filled(3), 5);

        picker.clear_hover();
        assert_eq!(picker.hover(), None);
        assert_eq!(picker.filled(3), 3);
    }

    #[test]
    fn test_hover_out_of_range_is_ignored() {
        let mut picker = StarPicker::new();
        picker.hover_cell(9);
        assert_eq!(picker.hover(), None);
    }

    #[test]
    fn test_cell_at_column_mapping() {
        assert_eq!(cell_at(0), Some(0));
        assert_eq!(cell_at(1), Some(0));
        assert_eq!(cell_at(2), Some(1));
        assert_eq!(cell_at(8), Some(4));
        assert_eq!(cell_at(9), Some(4));
        assert_eq!(cell_at(10), None);
    }

    #[test]
    fn test_zero_value_renders_all_unfilled() {
        let line = display_line(0.0);
        let text: String = line.spans.iter().map(|s| s.content.to_string()).collect();
        assert_eq!(text.matches('★').count(), 0);
        assert_eq!(text.matches('☆').count(), 5);
    }
}
