use ratatui::Frame;
use ratatui::layout::Rect;

use super::event::TuiEvent;

/// A piece of the screen.
///
/// Components take their data as props (struct fields, usually borrowed from the
/// current `RenderTree`) and paint themselves into the `Rect` they are given.
/// `render` takes `&mut self` so a component can update presentation state such
/// as a scroll offset while it draws.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that consumes terminal events.
pub trait EventHandler {
    /// The high-level event this component emits.
    type Event;

    /// Handle a `TuiEvent` and optionally return a high-level event.
    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event>;
}
