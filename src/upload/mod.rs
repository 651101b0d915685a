mod service;
mod staging;
mod types;

pub use service::{HttpShareService, ShareService, FILES_FIELD};
pub use staging::{StagingArea, StagingPhase};
pub use types::{is_share_code, FileContent, FileKey, ShareResult, StagedFile, SHARE_CODE_LEN};
