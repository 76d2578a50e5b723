//! bcdmap engine: fills missing browser compat data from a related browser
//!
//! # Pipeline
//!
//! ```text
//! Document → Locator → [__compat.support records] → Inference Engine → DocumentReport
//!                                                         ↓
//!                                              destination entry written in place
//! ```
//!
//! # Example
//!
//! ```
//! use bcdmap_core::MappingConfig;
//! use bcdmap_engine::migrate_document;
//! use serde_json::json;
//!
//! let mut doc = json!({
//!     "api": { "Blob": { "__compat": { "support": {
//!         "chrome_android": { "version_added": "52" }
//!     } } } }
//! });
//!
//! let report = migrate_document(&mut doc, &MappingConfig::samsung_internet());
//! assert!(report.is_modified());
//! assert_eq!(
//!     doc["api"]["Blob"]["__compat"]["support"]["samsunginternet_android"]["version_added"],
//!     "6.0"
//! );
//! ```

pub mod infer;
pub mod locator;
mod sequence;

pub use infer::{infer, InferError, VERSION_ADDED, VERSION_REMOVED};
pub use locator::{locate, locate_support_records, Location, Node, Segment};

use bcdmap_core::MappingConfig;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

/// A record left unmodified because of unrecognized data
#[derive(Debug, Clone, Serialize)]
pub struct RecordWarning {
    /// JSON pointer of the support record
    pub pointer: String,
    pub message: String,
}

/// Outcome of one document pass
#[derive(Debug, Clone, Default, Serialize)]
pub struct DocumentReport {
    /// Support records found
    pub records: usize,
    /// Records whose destination entry was written
    pub changed: usize,
    pub warnings: Vec<RecordWarning>,
}

impl DocumentReport {
    /// Whether the document needs to be written back
    pub fn is_modified(&self) -> bool {
        self.changed > 0
    }
}

/// Run the inference engine over every support record of `document`
pub fn migrate_document(document: &mut Value, config: &MappingConfig) -> DocumentReport {
    let locations = locate_support_records(document);
    debug!("support records: {}", locations.len());

    let mut report = DocumentReport {
        records: locations.len(),
        ..Default::default()
    };

    for location in &locations {
        let pointer = location.to_pointer();
        let Some(record) = document.pointer_mut(&pointer) else {
            continue;
        };

        match infer(record, config) {
            Ok(true) => report.changed += 1,
            Ok(false) => {}
            Err(err) => {
                warn!("{}: {}", location, err);
                report.warnings.push(RecordWarning {
                    pointer,
                    message: err.to_string(),
                });
            }
        }
    }

    report
}
