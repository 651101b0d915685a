use crate::error::ShareError;
use crate::upload::SHARE_CODE_LEN;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeEntryState {
    Incomplete,
    Complete,
    Submitting,
}

/// Six-digit share code input for the receiving side.
#[derive(Debug, Default)]
pub struct ShareCodeEntry {
    code: String,
    submitting: bool,
}

impl ShareCodeEntry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// Replaces the code with the digits of `text`, capped at six.
    pub fn set_input(&mut self, text: &str) {
        if self.submitting {
            return;
        }
        self.code = text
            .chars()
            .filter(char::is_ascii_digit)
            .take(SHARE_CODE_LEN)
            .collect();
    }

    pub fn state(&self) -> CodeEntryState {
        if self.submitting {
            CodeEntryState::Submitting
        } else if self.code.len() == SHARE_CODE_LEN {
            CodeEntryState::Complete
        } else {
            CodeEntryState::Incomplete
        }
    }

    pub fn can_submit(&self) -> bool {
        self.state() == CodeEntryState::Complete
    }

    pub fn submit(&mut self) -> Result<String, ShareError> {
        match self.state() {
            CodeEntryState::Complete => {
                info!("Resolving share code {}", self.code);
                self.submitting = true;
                Ok(self.code.clone())
            }
            CodeEntryState::Submitting => Err(ShareError::SubmitInProgress),
            CodeEntryState::Incomplete => Err(ShareError::IncompleteCode),
        }
    }

    /// Unlocks the input. The code is kept either way so a failed lookup can be retried.
    pub fn finish(&mut self, outcome: &Result<(), ShareError>) {
        self.submitting = false;
        if let Err(e) = outcome {
            warn!("Could not resolve share code {}: {}", self.code, e);
        }
    }

    pub fn slots(&self) -> [Option<char>; SHARE_CODE_LEN] {
        let mut slots = [None; SHARE_CODE_LEN];
        for (slot, c) in slots.iter_mut().zip(self.code.chars()) {
            *slot = Some(c);
        }
        slots
    }
}

/// Opens the download page for `url` in the system browser.
pub fn open_download(url: &str) -> Result<(), ShareError> {
    open::that(url).map_err(|e| ShareError::Network(format!("Failed to open {}: {}", url, e)))
}
