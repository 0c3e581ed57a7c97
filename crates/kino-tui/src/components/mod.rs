pub mod detail_dialog;
pub mod help_overlay;
pub mod movie_card;
pub mod movie_grid;
pub mod nav_bar;
pub mod review_panel;
