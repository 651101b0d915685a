use super::types::{ShareResult, StagedFile};
use crate::config::AppConfig;
use crate::error::ShareError;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Multipart field every staged file is sent under.
pub const FILES_FIELD: &str = "files";

#[async_trait]
pub trait ShareService: Send + Sync {
    async fn upload(&self, files: &[StagedFile]) -> Result<ShareResult, ShareError>;
}

#[derive(Clone)]
pub struct HttpShareService {
    client: reqwest::Client,
    upload_url: String,
}

impl HttpShareService {
    pub fn new(upload_url: impl Into<String>, timeout: Duration) -> Result<Self, ShareError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            upload_url: upload_url.into(),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ShareError> {
        Self::new(config.upload_url(), config.request_timeout())
    }

    pub fn upload_url(&self) -> &str {
        &self.upload_url
    }

    async fn build_form(files: &[StagedFile]) -> Result<Form, ShareError> {
        let mut form = Form::new();
        for file in files {
            let bytes = file.read().await?;
            debug!("Attaching {} ({} bytes)", file.name, bytes.len());
            form = form.part(FILES_FIELD, Part::bytes(bytes).file_name(file.name.clone()));
        }
        Ok(form)
    }
}

#[async_trait]
impl ShareService for HttpShareService {
    async fn upload(&self, files: &[StagedFile]) -> Result<ShareResult, ShareError> {
        let form = Self::build_form(files).await?;

        info!("Uploading {} files to {}", files.len(), self.upload_url);
        let response = self
            .client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ShareError::Network(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Upload rejected with status {}", status);
            return Err(ShareError::Network(format!(
                "Upload failed with status: {}",
                status
            )));
        }

        let result = response
            .json::<ShareResult>()
            .await
            .map_err(|e| ShareError::Network(format!("Failed to parse upload response: {}", e)))?;

        if !result.has_valid_code() {
            return Err(ShareError::Network(format!(
                "Service returned an invalid share code: {:?}",
                result.share_code
            )));
        }

        Ok(result)
    }
}
