mod state;
mod ui;

use crate::config::AppConfig;
use crate::drag::{DragListener, DropTarget, WindowDragEvents};
use crate::error::ShareError;
use crate::receive::open_download;
use crate::upload::{ShareService, StagedFile};
use eframe::{egui, App};
use rfd::FileDialog;
pub use state::{AppState, ResolveOutcome, UploadOutcome};
use std::sync::mpsc as std_mpsc;
use std::sync::Arc;
use tracing::{info, warn};

pub struct ShareDropApp {
    config: AppConfig,
    service: Arc<dyn ShareService>,
    state: AppState,
    drag_events: WindowDragEvents,
    drag: Option<DragListener>,
    drop_zone: Option<egui::Rect>,
}

impl ShareDropApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: AppConfig,
        service: Arc<dyn ShareService>,
    ) -> Self {
        info!("Initializing Share Drop");
        let mut drag_events = WindowDragEvents::new();
        let drag = Some(drag_events.listen(config.overlay_receives_drop));
        Self {
            config,
            service,
            state: AppState::default(),
            drag_events,
            drag,
            drop_zone: None,
        }
    }

    pub fn pick_files(&mut self) {
        let Some(paths) = FileDialog::new().set_title("Choose files to send").pick_files() else {
            return;
        };

        let mut files = Vec::with_capacity(paths.len());
        for path in paths {
            match StagedFile::from_path(&path) {
                Ok(file) => files.push(file),
                Err(e) => {
                    warn!("Skipping picked file: {}", e);
                    self.state.error_message = Some(e.to_string());
                }
            }
        }
        let added = self.state.staging.add_files(files);
        info!("Picked {} new files", added);
    }

    pub fn start_upload(&mut self, ctx: &egui::Context) {
        let files = match self.state.staging.begin_submit() {
            Ok(files) => files,
            Err(e) => {
                self.state.error_message = Some(e.to_string());
                return;
            }
        };
        self.state.error_message = None;

        let (sender, receiver) = std_mpsc::channel();
        self.state.upload_receiver = Some(receiver);

        let service = Arc::clone(&self.service);
        let ctx = ctx.clone();
        std::thread::spawn(move || {
            let outcome = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(rt) => rt.block_on(service.upload(&files)),
                Err(e) => Err(ShareError::Network(format!(
                    "Failed to start upload runtime: {}",
                    e
                ))),
            };
            sender.send(outcome).unwrap_or_default();
            ctx.request_repaint();
        });
    }

    pub fn start_resolve(&mut self, ctx: &egui::Context) {
        let code = match self.state.code_entry.submit() {
            Ok(code) => code,
            Err(e) => {
                self.state.receive_error = Some(e.to_string());
                return;
            }
        };
        self.state.receive_error = None;

        let url = self.config.download_url(&code);
        let (sender, receiver) = std_mpsc::channel();
        self.state.resolve_receiver = Some(receiver);

        let ctx = ctx.clone();
        std::thread::spawn(move || {
            info!("Opening {}", url);
            sender.send(open_download(&url)).unwrap_or_default();
            ctx.request_repaint();
        });
    }

    pub fn update_state(&mut self) {
        if let Some(outcome) = self.state.take_upload_outcome() {
            if let Err(e) = self.state.staging.finish_submit(outcome) {
                self.state.error_message = Some(if e.is_retryable() {
                    format!("{}. Press Send to try again.", e)
                } else {
                    e.to_string()
                });
            }
        }

        if let Some(outcome) = self.state.take_resolve_outcome() {
            self.state.code_entry.finish(&outcome);
            self.state.receive_error = outcome.err().map(|e| e.to_string());
        }
    }

    fn update_drag(&mut self, ctx: &egui::Context) {
        // the success card takes no more files
        if self.state.staging.result().is_some() {
            self.drag = None;
            return;
        }

        self.drag_events.pump(ctx);
        let Some(listener) = self.drag.as_mut() else {
            return;
        };

        let pointer = ctx.input(|i| i.pointer.hover_pos());
        let target = match (self.drop_zone, pointer) {
            (_, None) => DropTarget::Unknown,
            (Some(zone), Some(pos)) if zone.contains(pos) => DropTarget::Zone,
            _ => DropTarget::Window,
        };

        let files = listener.process(target);
        if !files.is_empty() {
            let added = self.state.staging.add_files(files);
            info!("Dropped {} new files", added);
        }
    }
}

impl App for ShareDropApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_state();
        self.update_drag(ctx);
        self.render(ctx);
    }
}
