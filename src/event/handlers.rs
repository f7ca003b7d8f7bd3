use std::cell::RefCell;
use std::rc::Rc;

use super::{EventHandler, SceneEvent};

/// Asks egui for a new frame whenever the scene changes.
#[derive(Debug)]
pub struct RepaintHandler {
    ctx: egui::Context,
}

impl RepaintHandler {
    pub fn new(ctx: egui::Context) -> Self {
        Self { ctx }
    }
}

impl EventHandler for RepaintHandler {
    fn handle_event(&mut self, _event: &SceneEvent) {
        self.ctx.request_repaint();
    }
}

/// Records every event it sees; clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<SceneEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SceneEvent> {
        self.events.borrow().clone()
    }
}

impl EventHandler for EventLog {
    fn handle_event(&mut self, event: &SceneEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}
