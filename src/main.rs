use anyhow::{anyhow, Context, Result};
use eframe::{egui, CreationContext};
use share_drop::app::ShareDropApp;
use share_drop::config::load_config;
use share_drop::upload::HttpShareService;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "share_drop=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = load_config()?;
    info!("Starting Share Drop against {}", config.server_url);

    let service = HttpShareService::from_config(&config).context("Failed to build HTTP client")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([360.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Share Drop",
        options,
        Box::new(move |cc: &CreationContext| {
            Box::new(ShareDropApp::new(cc, config, Arc::new(service)))
        }),
    )
    .map_err(|e| anyhow!("Failed to run the UI: {}", e))
}
