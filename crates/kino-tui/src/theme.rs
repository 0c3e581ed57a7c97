//! Color palette and style constants for the cinema TUI.

use ratatui::style::{Color, Style};

// ── Color palette ─────────────────────────────────────────────────────────────

pub const C_ACCENT: Color = Color::Rgb(232, 90, 140);
pub const C_PRIMARY: Color = Color::Rgb(225, 220, 232);
pub const C_SECONDARY: Color = Color::Rgb(130, 125, 148);
pub const C_MUTED: Color = Color::Rgb(78, 74, 94);
pub const C_SELECTION_BG: Color = Color::Rgb(32, 28, 44);
pub const C_PANEL_BORDER: Color = Color::Rgb(44, 40, 58);
pub const C_PANEL_BORDER_FOCUSED: Color = Color::Rgb(200, 90, 150); // clear focus indicator
pub const C_STARS: Color = Color::Rgb(255, 210, 50);
pub const C_YEAR_BADGE: Color = Color::Rgb(232, 90, 140);
pub const C_GENRE: Color = Color::Rgb(150, 100, 235);
pub const C_FAVORITE: Color = Color::Rgb(255, 95, 120);
pub const C_POSTER_FILL: Color = Color::Rgb(38, 34, 52);
pub const C_INPUT_BG: Color = Color::Rgb(24, 22, 34);
pub const C_INPUT_FG: Color = Color::Rgb(255, 200, 120);
pub const C_TOAST_INFO: Color = Color::Rgb(80, 160, 220);
pub const C_TOAST_SUCCESS: Color = Color::Rgb(80, 200, 120);
pub const C_TOAST_WARNING: Color = Color::Rgb(255, 184, 80);
pub const C_MODE_NORMAL: Color = Color::Rgb(130, 125, 148);
pub const C_MODE_SEARCH: Color = Color::Rgb(255, 200, 120);
pub const C_MODE_COMPOSE: Color = Color::Rgb(232, 90, 140);

// ── Predefined styles ─────────────────────────────────────────────────────────

pub fn style_focused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER_FOCUSED)
}

pub fn style_unfocused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER)
}
