use super::{DragCoordinator, DragPayload, DropDecision, DropTarget};
use crate::upload::StagedFile;
use eframe::egui;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug)]
pub enum DragEvent {
    Enter(DragPayload),
    Leave,
    Over,
    Drop(Vec<StagedFile>),
}

struct Registration {
    sender: Sender<DragEvent>,
    active: Arc<AtomicBool>,
}

/// Turns egui's per-frame hovered/dropped file state into drag events for the current
/// [`DragListener`].
#[derive(Default)]
pub struct WindowDragEvents {
    hovered: usize,
    registration: Option<Registration>,
}

impl WindowDragEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listen(&mut self, overlay_receives_drop: bool) -> DragListener {
        let (sender, receiver) = channel();
        let active = Arc::new(AtomicBool::new(true));
        let previous = self.registration.replace(Registration {
            sender,
            active: Arc::clone(&active),
        });
        if let Some(previous) = previous {
            debug!("Replacing previous drag listener");
            previous.active.store(false, Ordering::Release);
        }
        self.hovered = 0;
        info!("Drag listeners registered");

        DragListener {
            coordinator: DragCoordinator::new(overlay_receives_drop),
            receiver,
            active,
        }
    }

    pub fn is_listening(&self) -> bool {
        self.registration
            .as_ref()
            .is_some_and(|r| r.active.load(Ordering::Acquire))
    }

    pub fn pump(&mut self, ctx: &egui::Context) {
        if !self.is_listening() {
            self.registration = None;
            return;
        }

        let (hovered, dropped) = ctx.input(|i| {
            let dropped: Option<Vec<StagedFile>> = if i.raw.dropped_files.is_empty() {
                None
            } else {
                Some(
                    i.raw
                        .dropped_files
                        .iter()
                        .filter_map(staged_from_dropped)
                        .collect(),
                )
            };
            (i.raw.hovered_files.len(), dropped)
        });

        self.feed(hovered, dropped);
    }

    /// `hovered` is how many files are over the window this frame, `dropped` is set on the
    /// frame files were released.
    pub fn feed(&mut self, hovered: usize, dropped: Option<Vec<StagedFile>>) {
        for _ in self.hovered..hovered {
            self.dispatch(DragEvent::Enter(DragPayload::Files));
        }

        if let Some(files) = dropped {
            // hover and release can land in the same frame
            if self.hovered == 0 && hovered == 0 {
                self.dispatch(DragEvent::Enter(DragPayload::Files));
            }
            self.dispatch(DragEvent::Drop(files));
            self.hovered = 0;
            return;
        }

        if hovered > 0 {
            self.dispatch(DragEvent::Over);
        }
        for _ in hovered..self.hovered {
            self.dispatch(DragEvent::Leave);
        }
        self.hovered = hovered;
    }

    fn dispatch(&mut self, event: DragEvent) {
        if !self.is_listening() {
            self.registration = None;
            return;
        }
        let Some(registration) = &self.registration else {
            return;
        };
        if registration.sender.send(event).is_err() {
            debug!("Drag listener gone, deregistering");
            self.registration = None;
            self.hovered = 0;
        }
    }
}

fn staged_from_dropped(file: &egui::DroppedFile) -> Option<StagedFile> {
    if let Some(path) = &file.path {
        match StagedFile::from_path(path) {
            Ok(staged) => Some(staged),
            Err(e) => {
                warn!("Skipping dropped file: {}", e);
                None
            }
        }
    } else {
        file.bytes
            .as_ref()
            .map(|bytes| StagedFile::from_bytes(file.name.clone(), bytes.clone()))
    }
}

/// Live registration for window drag events. Dropping it deregisters.
#[derive(Debug)]
pub struct DragListener {
    coordinator: DragCoordinator,
    receiver: Receiver<DragEvent>,
    active: Arc<AtomicBool>,
}

impl DragListener {
    pub fn overlay_visible(&self) -> bool {
        self.coordinator.overlay_visible()
    }

    pub fn coordinator(&self) -> &DragCoordinator {
        &self.coordinator
    }

    pub fn process(&mut self, target: DropTarget) -> Vec<StagedFile> {
        let mut accepted = Vec::new();
        while let Ok(event) = self.receiver.try_recv() {
            match event {
                DragEvent::Enter(payload) => self.coordinator.on_drag_enter(payload),
                DragEvent::Leave => self.coordinator.on_drag_leave(),
                DragEvent::Over => self.coordinator.on_drag_over(),
                DragEvent::Drop(files) => match self.coordinator.on_drop(target) {
                    DropDecision::Accept => accepted.extend(files),
                    DropDecision::Ignore => {
                        debug!("Ignoring {} files dropped outside the drop zone", files.len())
                    }
                },
            }
        }
        accepted
    }
}

impl Drop for DragListener {
    fn drop(&mut self) {
        self.active.store(false, Ordering::Release);
        info!("Drag listeners released");
    }
}
