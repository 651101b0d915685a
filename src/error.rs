use thiserror::Error;

/// Errors from staging, sending or resolving files. None are fatal.
#[derive(Debug, Error)]
pub enum ShareError {
    #[error("network error: {0}")]
    Network(String),
    #[error("no files staged for upload")]
    EmptyStaging,
    #[error("an upload is already in progress")]
    SubmitInProgress,
    #[error("failed to read {name}: {source}")]
    ReadFile {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("share code must be exactly 6 digits")]
    IncompleteCode,
}

impl ShareError {
    /// Whether the same action can be attempted again unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::ReadFile { .. })
    }
}

impl From<reqwest::Error> for ShareError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}
