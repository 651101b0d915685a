//! Client settings, layered as defaults < config file < environment.
use crate::utils::url::join;
use anyhow::{ensure, Context, Result};
use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENV_PREFIX: &str = "SHARE_DROP_";

pub fn config_path() -> PathBuf {
    ProjectDirs::from("", "", "share_drop")
        .map(|p| p.config_dir().join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("share_drop.toml"))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the sharing service
    pub server_url: String,
    pub upload_path: String,
    /// Prefix a share code is appended to when resolving a download
    pub download_path: String,
    pub request_timeout_secs: u64,
    /// Whether files dropped on the full-window overlay are staged
    pub overlay_receives_drop: bool,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8080".to_string(),
            upload_path: "/api/upload".to_string(),
            download_path: "/d/".to_string(),
            request_timeout_secs: 60,
            overlay_receives_drop: true,
            window_width: 480.0,
            window_height: 640.0,
        }
    }
}

impl AppConfig {
    pub fn upload_url(&self) -> String {
        join(&self.server_url, &self.upload_path)
    }

    pub fn download_url(&self, code: &str) -> String {
        format!("{}{}", join(&self.server_url, &self.download_path), code)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.server_url.starts_with("http://") || self.server_url.starts_with("https://"),
            "Invalid config: server_url must start with http:// or https://"
        );
        ensure!(
            self.upload_path.starts_with('/'),
            "Invalid config: upload_path must start with /"
        );
        ensure!(
            self.download_path.starts_with('/'),
            "Invalid config: download_path must start with /"
        );
        ensure!(
            self.request_timeout_secs > 0,
            "Invalid config: request_timeout_secs must be > 0"
        );
        Ok(())
    }
}

pub fn load_config() -> Result<AppConfig> {
    load_config_from(&config_path())
}

pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let config: AppConfig = Figment::new()
        .merge(Serialized::defaults(AppConfig::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX))
        .extract()
        .context("Failed to load configuration")?;

    config.validate()?;

    Ok(config)
}
