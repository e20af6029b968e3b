use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{AppError, Result};

/// Watches a folder for new code snippets and lists the design documents
/// whose source files contain them.
#[derive(Parser, Debug, Default)]
#[command(name = "design-doc-viewer", version)]
pub struct Cli {
    /// JSON configuration file; flags below override its values
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory watched for new snippet files
    #[arg(long, value_name = "DIR")]
    pub watched_dir: Option<PathBuf>,

    /// Directory holding the full source files named in the mapping table
    #[arg(long, value_name = "DIR")]
    pub source_asset_dir: Option<PathBuf>,

    /// Directory holding the design documents
    #[arg(long, value_name = "DIR")]
    pub design_doc_dir: Option<PathBuf>,

    /// CSV file mapping source files to design documents
    #[arg(long, value_name = "FILE")]
    pub mapping_path: Option<PathBuf>,

    /// Delay between directory scans, in milliseconds
    #[arg(long, value_name = "MS")]
    pub poll_interval_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub watched_dir: PathBuf,
    pub source_asset_dir: PathBuf,
    pub design_doc_dir: PathBuf,
    pub mapping_path: PathBuf,
    pub poll_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            watched_dir: PathBuf::from("./watched_code_folder"),
            source_asset_dir: PathBuf::from("./source_asset_folder"),
            design_doc_dir: PathBuf::from("./design_docs_folder"),
            mapping_path: PathBuf::from("./mapper_table.csv"),
            poll_interval_ms: 1000,
        }
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Builds the effective configuration: defaults, then the optional
    /// config file, then individual command-line flags.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(dir) = &cli.watched_dir {
            config.watched_dir = dir.clone();
        }
        if let Some(dir) = &cli.source_asset_dir {
            config.source_asset_dir = dir.clone();
        }
        if let Some(dir) = &cli.design_doc_dir {
            config.design_doc_dir = dir.clone();
        }
        if let Some(path) = &cli.mapping_path {
            config.mapping_path = path.clone();
        }
        if let Some(ms) = cli.poll_interval_ms {
            config.poll_interval_ms = ms;
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.poll_interval_ms == 0 {
            return Err(AppError::Config(
                "poll interval must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}
