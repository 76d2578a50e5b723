//! Mapping configuration: which browsers, which table, which policy
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::MapError;
use crate::table::{VersionRange, VersionTable};

/// Name of the built-in Samsung Internet preset
pub const SAMSUNG_INTERNET: &str = "samsung-internet";

/// Names accepted by [`MappingConfig::for_preset`]
pub const PRESETS: &[&str] = &[SAMSUNG_INTERNET];

/// What to do when `version_removed` maps into the same bucket as `version_added`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RemovalPolicy {
    /// Added and removed in the same destination release reads as never
    /// added: write `version_added: false`.
    #[default]
    SameBucketRemoval,
    /// Write both values even when they are equal.
    KeepInterval,
}

/// One source → destination mapping run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingConfig {
    /// Config name (e.g., "samsung-internet")
    #[serde(default = "default_name")]
    pub name: String,

    /// Browser whose data is propagated (e.g., "chrome_android")
    pub source: String,

    /// Browser whose missing data is filled in
    pub destination: String,

    /// Browser consulted when the mapped value is `null`
    #[serde(default)]
    pub reference: Option<String>,

    /// Source version ranges to destination versions
    pub table: VersionTable,

    #[serde(default)]
    pub removal_policy: RemovalPolicy,
}

fn default_name() -> String {
    "custom".to_string()
}

impl MappingConfig {
    /// Chrome for Android → Samsung Internet, cross-checked against desktop Chrome
    pub fn samsung_internet() -> Self {
        let table = VersionTable::new(vec![
            VersionRange::version(57.0, 59.0, "7.0"),
            VersionRange::version(52.0, 56.0, "6.0"),
            VersionRange::version(45.0, 51.0, "5.0"),
            VersionRange::version(39.0, 44.0, "4.0"),
            VersionRange::supported(0.0, 38.0),
        ])
        .expect("built-in table ranges are disjoint");

        Self {
            name: SAMSUNG_INTERNET.to_string(),
            source: "chrome_android".to_string(),
            destination: "samsunginternet_android".to_string(),
            reference: Some("chrome".to_string()),
            table,
            removal_policy: RemovalPolicy::SameBucketRemoval,
        }
    }

    /// Get a built-in config by preset name
    pub fn for_preset(name: &str) -> Result<Self, MapError> {
        match name {
            SAMSUNG_INTERNET => Ok(Self::samsung_internet()),
            other => Err(MapError::UnknownPreset {
                name: other.to_string(),
                available: PRESETS.join(", "),
            }),
        }
    }

    /// Load config from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self, MapError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| MapError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&yaml)
    }

    pub fn validate(&self) -> Result<(), MapError> {
        if self.source.is_empty() || self.destination.is_empty() {
            return Err(MapError::InvalidConfig(
                "source and destination must be set".to_string(),
            ));
        }
        if self.source == self.destination {
            return Err(MapError::InvalidConfig(format!(
                "source and destination are both `{}`",
                self.source
            )));
        }
        if self.reference.as_deref() == Some(self.destination.as_str()) {
            return Err(MapError::InvalidConfig(format!(
                "reference `{}` is the destination",
                self.destination
            )));
        }
        Ok(())
    }
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self::samsung_internet()
    }
}
