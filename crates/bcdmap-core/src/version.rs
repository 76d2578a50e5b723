//! Version values for `version_added` / `version_removed`.
//!
//! The compat data encodes four states in one field:
//! - `null`: nobody has researched the browser yet
//! - `false`: never supported
//! - `true`: supported, version unknown
//! - `"52"`: supported from that version onward
//!
//! Anything else (objects, arrays) is unrecognized and rejected.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Value};
use std::fmt;

use crate::error::MapError;

lazy_static! {
    /// Leading numeric prefix of a version string ("4.4.3" reads as 4.4)
    static ref NUMERIC_PREFIX: Regex = Regex::new(r"^\s*(\d+(?:\.\d+)?)").unwrap();
}

/// One browser's `version_added` or `version_removed` value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionValue {
    /// `null`
    Unknown,
    /// `false`
    Unsupported,
    /// `true`
    SupportedUnknownVersion,
    /// A version string
    SupportedFrom(String),
}

impl VersionValue {
    /// Read a raw JSON value.
    ///
    /// JSON numbers are accepted and normalized to their string form.
    pub fn from_json(value: &Value) -> Result<Self, MapError> {
        match value {
            Value::Null => Ok(Self::Unknown),
            Value::Bool(false) => Ok(Self::Unsupported),
            Value::Bool(true) => Ok(Self::SupportedUnknownVersion),
            Value::String(version) => Ok(Self::SupportedFrom(version.clone())),
            Value::Number(number) => Ok(Self::SupportedFrom(number.to_string())),
            other => Err(MapError::UnrecognizedVersion(other.to_string())),
        }
    }

    /// Read `field` from a browser entry. A missing field reads as `null`.
    pub fn from_field(entry: &Map<String, Value>, field: &str) -> Result<Self, MapError> {
        entry.get(field).map_or(Ok(Self::Unknown), Self::from_json)
    }

    pub fn to_json(&self) -> Value {
        match self {
            Self::Unknown => Value::Null,
            Self::Unsupported => Value::Bool(false),
            Self::SupportedUnknownVersion => Value::Bool(true),
            Self::SupportedFrom(version) => Value::String(version.clone()),
        }
    }

    /// Whether the value counts as "has support data" (true or a non-empty version)
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::SupportedUnknownVersion => true,
            Self::SupportedFrom(version) => !version.is_empty(),
            Self::Unknown | Self::Unsupported => false,
        }
    }

    /// Numeric reading of a concrete version, `None` for the three flag states
    /// and for strings without a leading number.
    pub fn numeric(&self) -> Option<f64> {
        match self {
            Self::SupportedFrom(version) => parse_version_number(version),
            _ => None,
        }
    }
}

impl fmt::Display for VersionValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "null"),
            Self::Unsupported => write!(f, "false"),
            Self::SupportedUnknownVersion => write!(f, "true"),
            Self::SupportedFrom(version) => write!(f, "\"{}\"", version),
        }
    }
}

/// Parse the leading number of a version string.
///
/// Returns `None` for strings such as `"preview"` or `"≤37"`.
pub fn parse_version_number(version: &str) -> Option<f64> {
    NUMERIC_PREFIX
        .captures(version)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_variants() {
        assert_eq!(VersionValue::from_json(&json!(null)).unwrap(), VersionValue::Unknown);
        assert_eq!(VersionValue::from_json(&json!(false)).unwrap(), VersionValue::Unsupported);
        assert_eq!(
            VersionValue::from_json(&json!(true)).unwrap(),
            VersionValue::SupportedUnknownVersion
        );
        assert_eq!(
            VersionValue::from_json(&json!("52")).unwrap(),
            VersionValue::SupportedFrom("52".to_string())
        );
        assert_eq!(
            VersionValue::from_json(&json!(52)).unwrap(),
            VersionValue::SupportedFrom("52".to_string())
        );
    }

    #[test]
    fn test_from_json_rejects_containers() {
        assert!(VersionValue::from_json(&json!({"v": 1})).is_err());
        assert!(VersionValue::from_json(&json!(["52"])).is_err());
    }

    #[test]
    fn test_missing_field_is_unknown() {
        let entry = Map::new();
        assert_eq!(
            VersionValue::from_field(&entry, "version_added").unwrap(),
            VersionValue::Unknown
        );
    }

    #[test]
    fn test_truthiness() {
        assert!(VersionValue::SupportedUnknownVersion.is_truthy());
        assert!(VersionValue::SupportedFrom("1.0".to_string()).is_truthy());
        assert!(!VersionValue::SupportedFrom(String::new()).is_truthy());
        assert!(!VersionValue::Unknown.is_truthy());
        assert!(!VersionValue::Unsupported.is_truthy());
    }

    #[test]
    fn test_parse_version_number() {
        assert_eq!(parse_version_number("52"), Some(52.0));
        assert_eq!(parse_version_number("4.4.3"), Some(4.4));
        assert_eq!(parse_version_number("preview"), None);
        assert_eq!(parse_version_number("≤37"), None);
    }

    #[test]
    fn test_json_round_trip_of_flags() {
        for raw in [json!(null), json!(false), json!(true), json!("6.0")] {
            assert_eq!(VersionValue::from_json(&raw).unwrap().to_json(), raw);
        }
    }
}
