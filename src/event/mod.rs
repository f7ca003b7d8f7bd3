mod bus;
mod events;
mod handlers;

pub use bus::EventBus;
pub use events::{SceneEvent, SelectionEvent};
pub use handlers::{EventLog, RepaintHandler};

/// Receives redraw notifications from the scene.
///
/// Handlers run synchronously inside the mutating call and must not call back
/// into the scene.
pub trait EventHandler {
    fn handle_event(&mut self, event: &SceneEvent);
}
