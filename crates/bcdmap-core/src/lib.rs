//! bcdmap core: version values, mapping tables and configuration
//!
//! A mapping run copies one browser's compat data onto another browser by
//! translating version numbers through a [`VersionTable`]:
//!
//! ```text
//! chrome_android "52" ──[52, 56] → "6.0"──▶ samsunginternet_android "6.0"
//! ```
//!
//! # Example
//!
//! ```
//! use bcdmap_core::{MappingConfig, VersionValue};
//!
//! let config = MappingConfig::samsung_internet();
//! let mapped = config.table.map(&VersionValue::SupportedFrom("52".to_string())).unwrap();
//! assert_eq!(mapped, VersionValue::SupportedFrom("6.0".to_string()));
//! ```

pub mod config;
pub mod error;
pub mod table;
pub mod version;

pub use config::{MappingConfig, RemovalPolicy, PRESETS, SAMSUNG_INTERNET};
pub use error::MapError;
pub use table::{MappedTarget, VersionRange, VersionTable};
pub use version::{parse_version_number, VersionValue};
