//! The `Component` trait, implemented by every focusable panel.
//!
//! A component keeps its own widget state and draws itself. Shared data
//! arrives read-only through `&AppState`; anything a component wants
//! changed it requests by returning actions from its input handlers, and
//! the event loop in `app.rs` is the only place that mutates.

use ratatui::crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{layout::Rect, Frame};

use crate::action::{Action, ComponentId};
use crate::app_state::AppState;

pub trait Component {
    fn id(&self) -> ComponentId;

    /// React to a key press. The app routes keys here when this component
    /// holds focus (or captures input, like an open dialog).
    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action>;

    /// React to a mouse event. Hit-testing is the component's job, against
    /// the rects it recorded during its last `draw`.
    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, state: &AppState) -> Vec<Action>;

    /// Observe an action dispatched by the app. Called on every component
    /// for every action, focused or not; may answer with follow-ups.
    fn on_action(&mut self, action: &Action, state: &AppState) -> Vec<Action>;

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState);
}
