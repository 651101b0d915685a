//! Window-wide drag tracking. Enter/leave fire per boundary crossed, so the overlay follows a
//! depth counter rather than single events.
mod window;

pub use window::{DragEvent, DragListener, WindowDragEvents};

use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPayload {
    Files,
    Text,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    /// The send panel's own drop zone
    Zone,
    /// Anywhere else in the window
    Window,
    /// Pointer position not reported on the drop frame
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropDecision {
    Accept,
    Ignore,
}

#[derive(Debug)]
pub struct DragCoordinator {
    depth: u32,
    overlay_visible: bool,
    overlay_receives_drop: bool,
}

impl Default for DragCoordinator {
    fn default() -> Self {
        Self::new(true)
    }
}

impl DragCoordinator {
    pub fn new(overlay_receives_drop: bool) -> Self {
        Self {
            depth: 0,
            overlay_visible: false,
            overlay_receives_drop,
        }
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn overlay_visible(&self) -> bool {
        self.overlay_visible
    }

    pub fn on_drag_enter(&mut self, payload: DragPayload) {
        self.depth += 1;
        if payload == DragPayload::Files {
            self.overlay_visible = true;
        }
        trace!("drag enter ({:?}), depth {}", payload, self.depth);
    }

    pub fn on_drag_leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        if self.depth == 0 {
            self.overlay_visible = false;
        }
        trace!("drag leave, depth {}", self.depth);
    }

    pub fn on_drag_over(&self) {
        trace!("drag over, depth {}", self.depth);
    }

    // enters and leaves do not always pair up, a drop always ends the drag
    pub fn on_drop(&mut self, target: DropTarget) -> DropDecision {
        let overlay_was_visible = self.overlay_visible;
        self.depth = 0;
        self.overlay_visible = false;

        let decision = match target {
            DropTarget::Zone | DropTarget::Unknown => DropDecision::Accept,
            DropTarget::Window if overlay_was_visible && self.overlay_receives_drop => {
                DropDecision::Accept
            }
            DropTarget::Window => DropDecision::Ignore,
        };
        debug!("drop on {:?}: {:?}", target, decision);
        decision
    }
}
