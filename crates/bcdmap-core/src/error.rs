//! Unified error model for version values, tables and configuration
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MapError {
    #[error("VERSION/unrecognized version value {0}")]
    UnrecognizedVersion(String),

    #[error("TABLE/range [{low}, {high}] is inverted")]
    InvertedRange { low: f64, high: f64 },

    #[error("TABLE/range [{low}, {high}] overlaps [{other_low}, {other_high}]")]
    OverlappingRanges {
        low: f64,
        high: f64,
        other_low: f64,
        other_high: f64,
    },

    #[error("TABLE/target must be a version string or `true`, got {0}")]
    InvalidTarget(String),

    #[error("CONFIG/{0}")]
    InvalidConfig(String),

    #[error("CONFIG/unknown preset `{name}` (available: {available})")]
    UnknownPreset { name: String, available: String },

    #[error("CONFIG/cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("CONFIG/{0}")]
    Yaml(#[from] serde_yaml::Error),
}
