//! Action enum — all user-initiated intents that cross component boundaries.

use kino_models::section::Section;

/// Unique identifier for a focusable component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    NavBar,
    MovieGrid,
    DetailDialog,
    HelpOverlay,
}

/// All actions that can flow through the system.
/// Components produce Actions; the App dispatches them.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // ── Page controller ──────────────────────────────────────────────────────
    /// Switch the active navigation section (changes the heading only).
    SwitchSection(Section),
    /// Open the detail dialog for a movie.
    Watch(u32),
    /// Set the viewer's rating for a movie (1–5).
    Rate(u32, u8),
    CloseDialog,

    // ── Focus ────────────────────────────────────────────────────────────────
    FocusNext,
    FocusPrev,

    // ── Search / compose input modes ─────────────────────────────────────────
    OpenSearch,
    CloseSearch,
    OpenCompose,
    CloseCompose,

    // ── Notifications ────────────────────────────────────────────────────────
    /// A review was added to the panel's local list (toast only — the list
    /// itself is never hoisted out of the panel).
    ReviewPublished,

    // ── UI toggles ───────────────────────────────────────────────────────────
    ToggleHelp,

    // ── System ───────────────────────────────────────────────────────────────
    Quit,
}
