use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("failed to load mapping table {path}: {source}")]
    MappingLoad {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("design document file not found: {0}")]
    DocumentNotFound(PathBuf),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
