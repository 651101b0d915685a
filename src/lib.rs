pub mod app;
pub mod config;
pub mod drag;
pub mod error;
pub mod receive;
pub mod upload;
pub mod utils;
