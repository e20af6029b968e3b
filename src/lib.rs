pub mod app;
pub mod config;
pub mod error;
pub mod storage;
pub mod ui;
pub mod watcher;

pub use app::DesignDocApp;
pub use config::{Cli, Config};
pub use error::{AppError, Result};
