//! bcdmap CLI: runs the mapping engine over a tree of compat data files
//!
//! ```text
//! root ─▶ discover (*.json, no node_modules) ─▶ read ─▶ migrate ─▶ write if changed
//! ```

pub mod batch;
pub mod discover;
pub mod persist;

pub use batch::{process_file, run_batch, FileOutcome, RunOptions, RunSummary};
pub use discover::discover_documents;
pub use persist::{read_document, render_document, write_document};

use bcdmap_core::{MapError, MappingConfig};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("IO/{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("PARSE/{}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("SERIALIZE/{}: {source}", .path.display())]
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("WALK/{0}")]
    Discover(#[from] walkdir::Error),

    #[error(transparent)]
    Config(#[from] MapError),
}

/// Pick the mapping config: a YAML file wins over a preset name
pub fn resolve_config(config_path: Option<&Path>, preset: &str) -> Result<MappingConfig, CliError> {
    let config = match config_path {
        Some(path) => MappingConfig::load(path)?,
        None => MappingConfig::for_preset(preset)?,
    };

    info!(
        "Mapping {} → {} ({}), reference: {}",
        config.source,
        config.destination,
        config.name,
        config.reference.as_deref().unwrap_or("none")
    );
    Ok(config)
}
