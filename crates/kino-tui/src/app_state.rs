//! AppState — shared read-only data passed to all components during render/event.
//!
//! Components read this for the movie catalog and page-level selection, but
//! never mutate it.  The App event-loop is the only thing that writes to it.

use kino_models::config::Config;
use kino_models::movie::{seed_catalog, Movie};
use kino_models::section::Section;

use crate::widgets::status_bar::InputMode;

/// The full shared state of the application.
/// Components read this; only the App event-loop writes to it.
pub struct AppState {
    /// The movie catalog.  Fixed size; only `user_rating` fields mutate.
    pub movies: Vec<Movie>,

    /// Active navigation section.  Picks the heading, never filters.
    pub active_section: Section,

    /// Last movie the viewer chose to watch.  Survives dialog close.
    pub selected_movie: Option<u32>,
    /// Detail dialog visibility.  Open implies `selected_movie` is set.
    pub dialog_open: bool,

    /// Current input mode, shown in the keys bar.
    pub input_mode: InputMode,

    /// Author label stamped on the viewer's reviews.
    pub viewer_label: String,
    /// chrono format for review submission dates.
    pub date_format: String,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            movies: seed_catalog(),
            active_section: Section::Home,
            selected_movie: None,
            dialog_open: false,
            input_mode: InputMode::Normal,
            viewer_label: config.reviews.viewer_label.clone(),
            date_format: config.reviews.date_format.clone(),
        }
    }

    /// Movie lookup by id.
    pub fn movie(&self, id: u32) -> Option<&Movie> {
        self.movies.iter().find(|m| m.id == id)
    }

    /// Replace the viewer's rating on the matching movie.
    /// Silent no-op when no movie has this id; returns whether one did.
    pub fn rate_movie(&mut self, id: u32, rating: u8) -> bool {
        match self.movies.iter_mut().find(|m| m.id == id) {
            Some(movie) => {
                movie.set_user_rating(rating);
                true
            }
            None => false,
        }
    }

    /// Select a movie and open the detail dialog.
    /// No-op when the id is not in the catalog.
    pub fn watch(&mut self, id: u32) -> bool {
        if self.movie(id).is_none() {
            return false;
        }
        self.selected_movie = Some(id);
        self.dialog_open = true;
        true
    }

    /// Close the dialog.  The selection survives.
    pub fn close_dialog(&mut self) {
        self.dialog_open = false;
    }

    /// Heading for the active section.
    pub fn section_heading(&self) -> &'static str {
        self.active_section.title()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        AppState::new(&Config::default())
    }

    #[test]
    fn test_rate_movie_sets_only_the_target() {
        let mut s = state();
        assert!(s.rate_movie(2, 4));
        for m in &s.movies {
            if m.id == 2 {
                assert_eq!(m.user_rating, Some(4));
            } else {
                assert_eq!(m.user_rating, None);
            }
        }
        // Re-rating overwrites.
        assert!(s.rate_movie(2, 1));
        assert_eq!(s.movie(2).unwrap().user_rating, Some(1));
    }

    #[test]
    fn test_rate_unknown_movie_is_a_noop() {
        let mut s = state();
        let before: Vec<Option<u8>> = s.movies.iter().map(|m| m.user_rating).collect();
        assert!(!s.rate_movie(999, 5));
        let after: Vec<Option<u8>> = s.movies.iter().map(|m| m.user_rating).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_watch_then_close_keeps_selection() {
        let mut s = state();
        assert!(s.watch(2));
        assert_eq!(s.selected_movie, Some(2));
        assert!(s.dialog_open);

        s.close_dialog();
        assert_eq!(s.selected_movie, Some(2));
        assert!(!s.dialog_open);
    }

    #[test]
    fn test_watch_unknown_movie_does_not_open_dialog() {
        let mut s = state();
        assert!(!s.watch(42));
        assert_eq!(s.selected_movie, None);
        assert!(!s.dialog_open);
    }

    #[test]
    fn test_dialog_open_implies_selection() {
        let mut s = state();
        assert!(s.watch(5));
        assert!(!s.dialog_open || s.selected_movie.is_some());
    }

    #[test]
    fn test_section_heading_follows_active_section() {
        let mut s = state();
        assert_eq!(s.section_heading(), "Популярное сегодня");
        s.active_section = Section::Catalog;
        assert_eq!(s.section_heading(), "Каталог фильмов");
    }
}
