//! Sequence case: a source browser with several conditional entries.
//!
//! ```text
//! [entries] → drop flags/alternative_name → sort by version → map → filter → collapse
//! ```
//!
//! Entries with differing key sets skip the sort and filter steps and are
//! mapped one by one in source order.

use bcdmap_core::VersionValue;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use tracing::debug;

use crate::infer::{InferError, MappingContext, VERSION_ADDED};

/// Markers of a non-default configuration
const CONDITIONAL_MARKERS: [&str; 2] = ["flags", "alternative_name"];

/// Map a list of source entries. `None` for an empty list.
pub(crate) fn map_sequence(
    entries: &[Value],
    ctx: &MappingContext<'_>,
) -> Result<Option<Value>, InferError> {
    let Some(first) = entries.first() else {
        return Ok(None);
    };

    let mut kept: Vec<&Value> = entries.iter().filter(|e| !is_conditional(e)).collect();
    if kept.is_empty() {
        debug!("every entry is conditional, using the first one");
        kept.push(first);
    }

    let mapped = if is_homogeneous(&kept) {
        sort_and_filter(kept, ctx)?
    } else {
        debug!("entries have differing fields, mapping in source order");
        map_all(&kept, ctx)?
    };

    Ok(Some(collapse(mapped)))
}

fn is_conditional(entry: &Value) -> bool {
    CONDITIONAL_MARKERS.iter().any(|marker| entry.get(*marker).is_some())
}

/// All entries are objects with the same key set
fn is_homogeneous(entries: &[&Value]) -> bool {
    let mut key_sets = entries
        .iter()
        .map(|e| e.as_object().map(|m| m.keys().collect::<BTreeSet<_>>()));

    match key_sets.next() {
        Some(Some(first)) => key_sets.all(|keys| keys.as_ref() == Some(&first)),
        _ => false,
    }
}

fn map_all(entries: &[&Value], ctx: &MappingContext<'_>) -> Result<Vec<Map<String, Value>>, InferError> {
    entries
        .iter()
        .map(|entry| match entry {
            Value::Object(map) => ctx.map_entry(map),
            other => Err(ctx.unrecognized_entry(other)),
        })
        .collect()
}

fn sort_and_filter(
    mut entries: Vec<&Value>,
    ctx: &MappingContext<'_>,
) -> Result<Vec<Map<String, Value>>, InferError> {
    entries.sort_by(|a, b| compare_added(a, b));

    let mut mapped = map_all(&entries, ctx)?.into_iter();
    let Some(first) = mapped.next() else {
        return Ok(Vec::new());
    };

    // Later entries survive only if they are supported and say something
    // beyond `version_added`.
    let rest = mapped.filter(|m| added_is_truthy(m) && m.keys().any(|k| k != VERSION_ADDED));

    // Sources in the same bucket map to identical entries.
    let mut kept = vec![first];
    for entry in rest {
        if !kept.contains(&entry) {
            kept.push(entry);
        }
    }
    Ok(kept)
}

/// Concrete versions first (ascending), then `true`/`false`/`null`
fn compare_added(a: &Value, b: &Value) -> Ordering {
    match (sort_key(a), sort_key(b)) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn sort_key(entry: &Value) -> Option<f64> {
    entry
        .get(VERSION_ADDED)
        .and_then(|v| VersionValue::from_json(v).ok())
        .and_then(|v| v.numeric())
}

fn added_is_truthy(entry: &Map<String, Value>) -> bool {
    VersionValue::from_field(entry, VERSION_ADDED).is_ok_and(|v| v.is_truthy())
}

fn collapse(mut mapped: Vec<Map<String, Value>>) -> Value {
    if !mapped.first().is_some_and(added_is_truthy) {
        let mut unsupported = Map::new();
        unsupported.insert(VERSION_ADDED.to_string(), Value::Bool(false));
        return Value::Object(unsupported);
    }

    if mapped.len() == 1 {
        Value::Object(mapped.remove(0))
    } else {
        Value::Array(mapped.into_iter().map(Value::Object).collect())
    }
}
