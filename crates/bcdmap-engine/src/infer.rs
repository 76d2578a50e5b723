//! Inference engine: derives the destination browser's entry of one support record.
//!
//! The engine only fills gaps. A destination that already carries a
//! `version_added` (anything but `null` or `""`) or a list of entries is left alone.

use bcdmap_core::{MappingConfig, RemovalPolicy, VersionValue};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, info};

use crate::sequence;

pub const VERSION_ADDED: &str = "version_added";
pub const VERSION_REMOVED: &str = "version_removed";

/// Qualifiers copied from a source entry onto its mapped entry
const CARRIED_FIELDS: [&str; 2] = ["partial_implementation", "prefix"];

/// Why a record was left unmodified despite having source data
#[derive(Debug, Error)]
pub enum InferError {
    #[error("unrecognized {field} {value} for `{browser}`")]
    UnrecognizedVersion {
        browser: String,
        field: &'static str,
        value: String,
    },

    #[error("unrecognized entry {value} for `{browser}`")]
    UnrecognizedEntry { browser: String, value: String },
}

/// Fill in the destination browser of `record`.
///
/// Returns `Ok(true)` when the record changed. On error the record is untouched.
pub fn infer(record: &mut Value, config: &MappingConfig) -> Result<bool, InferError> {
    let Some(support) = record.as_object_mut() else {
        return Ok(false);
    };
    let Some(source) = support.get(&config.source) else {
        return Ok(false);
    };

    if let Some(existing) = support.get(&config.destination) {
        if is_populated(existing) {
            debug!("{} already populated, skipping", config.destination);
            return Ok(false);
        }
    }

    let ctx = MappingContext {
        config,
        reference_unsupported: config
            .reference
            .as_deref()
            .and_then(|id| support.get(id))
            .is_some_and(reference_is_unsupported),
    };

    let mapped = match source {
        Value::Object(entry) => Value::Object(ctx.map_entry(entry)?),
        Value::Array(entries) => match sequence::map_sequence(entries, &ctx)? {
            Some(mapped) => mapped,
            None => return Ok(false),
        },
        other => return Err(ctx.unrecognized_entry(other)),
    };

    write_destination(support, &config.destination, mapped);
    prune_empty_destination(support, &config.destination);
    Ok(true)
}

/// Whether an existing destination entry must be protected
fn is_populated(existing: &Value) -> bool {
    match existing {
        Value::Null => false,
        Value::Object(entry) => entry
            .get(VERSION_ADDED)
            .is_some_and(|v| !v.is_null() && v.as_str() != Some("")),
        _ => true,
    }
}

/// Reference entry says `version_added: false` (first entry of a list)
fn reference_is_unsupported(reference: &Value) -> bool {
    let entry = match reference {
        Value::Array(entries) => entries.first(),
        other => Some(other),
    };
    entry
        .and_then(|e| e.get(VERSION_ADDED))
        .is_some_and(|v| *v == Value::Bool(false))
}

/// Writes `mapped` under `destination`. Every mapped entry carries `version_added`.
fn write_destination(support: &mut Map<String, Value>, destination: &str, mapped: Value) {
    if let Value::Object(fresh) = &mapped {
        if let Some(Value::Object(existing)) = support.get_mut(destination) {
            if !fresh.contains_key(VERSION_REMOVED) {
                existing.retain(|key, _| key != VERSION_REMOVED);
            }
            for (key, value) in fresh {
                existing.insert(key.clone(), value.clone());
            }
            return;
        }
    }
    support.insert(destination.to_string(), mapped);
}

/// Guard for the write above: never leave `"<destination>": {}` behind
fn prune_empty_destination(support: &mut Map<String, Value>, destination: &str) {
    support.retain(|key, value| {
        key != destination || !value.as_object().is_some_and(Map::is_empty)
    });
}

/// Outcome of mapping a `version_removed`
enum Removal {
    /// Same bucket as `version_added`: report as never supported
    Collapse,
    Keep(VersionValue),
    /// Removed beyond the table, so the destination still supports it
    Drop,
}

/// Per-record mapping state
pub(crate) struct MappingContext<'a> {
    pub(crate) config: &'a MappingConfig,
    /// Reference browser reports `version_added: false`
    pub(crate) reference_unsupported: bool,
}

impl MappingContext<'_> {
    /// Map one source browser entry to a destination entry
    pub(crate) fn map_entry(&self, entry: &Map<String, Value>) -> Result<Map<String, Value>, InferError> {
        let source_added = self.read(entry, VERSION_ADDED)?;
        let mut added = self.map_value(&source_added, VERSION_ADDED)?;

        if added == VersionValue::Unknown && self.reference_unsupported {
            debug!("mapped null overridden by unsupported reference browser");
            added = VersionValue::Unsupported;
        }

        let removal = match entry.get(VERSION_REMOVED) {
            Some(_) => {
                let source_removed = self.read(entry, VERSION_REMOVED)?;
                let removed = self.map_value(&source_removed, VERSION_REMOVED)?;
                Some(self.resolve_removal(&added, removed))
            }
            None => None,
        };

        let mut mapped = Map::new();
        match removal {
            Some(Removal::Collapse) => {
                info!(
                    "- {} added and removed in the same bucket ({}), mapping to false",
                    self.config.destination, added
                );
                mapped.insert(VERSION_ADDED.to_string(), Value::Bool(false));
            }
            Some(Removal::Keep(removed)) => {
                info!(
                    "- Mapped source {} to {} (removed {})",
                    source_added, added, removed
                );
                mapped.insert(VERSION_ADDED.to_string(), added.to_json());
                mapped.insert(VERSION_REMOVED.to_string(), removed.to_json());
            }
            Some(Removal::Drop) | None => {
                info!("- Mapped source {} to {}", source_added, added);
                mapped.insert(VERSION_ADDED.to_string(), added.to_json());
            }
        }

        for field in CARRIED_FIELDS {
            if let Some(value) = entry.get(field) {
                mapped.insert(field.to_string(), value.clone());
            }
        }

        Ok(mapped)
    }

    fn read(&self, entry: &Map<String, Value>, field: &'static str) -> Result<VersionValue, InferError> {
        VersionValue::from_field(entry, field).map_err(|_| self.unrecognized(entry, field))
    }

    fn map_value(&self, value: &VersionValue, field: &'static str) -> Result<VersionValue, InferError> {
        self.config
            .table
            .map(value)
            .map_err(|_| InferError::UnrecognizedVersion {
                browser: self.config.source.clone(),
                field,
                value: value.to_string(),
            })
    }

    fn resolve_removal(&self, added: &VersionValue, removed: VersionValue) -> Removal {
        match removed {
            VersionValue::SupportedFrom(_)
                if self.config.removal_policy == RemovalPolicy::SameBucketRemoval
                    && *added == removed =>
            {
                Removal::Collapse
            }
            VersionValue::SupportedFrom(_) | VersionValue::SupportedUnknownVersion => {
                Removal::Keep(removed)
            }
            VersionValue::Unknown | VersionValue::Unsupported => Removal::Drop,
        }
    }

    fn unrecognized(&self, entry: &Map<String, Value>, field: &'static str) -> InferError {
        InferError::UnrecognizedVersion {
            browser: self.config.source.clone(),
            field,
            value: entry.get(field).map(Value::to_string).unwrap_or_default(),
        }
    }

    pub(crate) fn unrecognized_entry(&self, value: &Value) -> InferError {
        InferError::UnrecognizedEntry {
            browser: self.config.source.clone(),
            value: value.to_string(),
        }
    }
}
