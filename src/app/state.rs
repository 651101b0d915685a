use crate::error::ShareError;
use crate::receive::ShareCodeEntry;
use crate::upload::{ShareResult, StagingArea, StagingPhase};
use crate::utils::file_size::FileSizeUtils;
use std::sync::mpsc::{Receiver, TryRecvError};

pub type UploadOutcome = Result<ShareResult, ShareError>;
pub type ResolveOutcome = Result<(), ShareError>;

#[derive(Default)]
pub struct AppState {
    pub staging: StagingArea,
    pub code_entry: ShareCodeEntry,
    pub error_message: Option<String>,
    pub receive_error: Option<String>,
    pub code_copied: bool,
    pub upload_receiver: Option<Receiver<UploadOutcome>>,
    pub resolve_receiver: Option<Receiver<ResolveOutcome>>,
}

impl AppState {
    pub fn take_upload_outcome(&mut self) -> Option<UploadOutcome> {
        let outcome = poll(self.upload_receiver.as_ref()?, "Upload")?;
        self.upload_receiver = None;
        Some(outcome)
    }

    pub fn take_resolve_outcome(&mut self) -> Option<ResolveOutcome> {
        let outcome = poll(self.resolve_receiver.as_ref()?, "Code lookup")?;
        self.resolve_receiver = None;
        Some(outcome)
    }

    pub fn get_status_text(&self) -> String {
        match self.staging.phase() {
            StagingPhase::Empty => "No files selected".to_string(),
            StagingPhase::Staging => format!(
                "{} file{} · {}",
                self.staging.len(),
                if self.staging.len() == 1 { "" } else { "s" },
                FileSizeUtils::format_size(self.staging.total_size())
            ),
            StagingPhase::Submitting => format!("Sending {} files...", self.staging.len()),
            StagingPhase::Success(result) => format!("Shared as {}", result.share_code),
        }
    }
}

fn poll<T>(receiver: &Receiver<Result<T, ShareError>>, what: &str) -> Option<Result<T, ShareError>> {
    match receiver.try_recv() {
        Ok(outcome) => Some(outcome),
        Err(TryRecvError::Empty) => None,
        Err(TryRecvError::Disconnected) => Some(Err(ShareError::Network(format!(
            "{} worker stopped unexpectedly",
            what
        )))),
    }
}
