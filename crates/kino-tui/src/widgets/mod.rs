pub mod pane_chrome;
pub mod star_rating;
pub mod status_bar;
pub mod text_field;
pub mod toast;
