//! Version mapping table: source version ranges to destination versions.
//!
//! ```text
//! [57, 59] → "7.0"
//! [52, 56] → "6.0"
//! [ 0, 38] → true
//!      70  → false   (outside every range)
//! ```

use serde::{Deserialize, Serialize};

use crate::error::MapError;
use crate::version::VersionValue;

/// Destination value of a range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TargetRepr", into = "TargetRepr")]
pub enum MappedTarget {
    /// A fixed destination version string
    Version(String),
    /// `true`: supported, exact destination version unknown
    Supported,
}

/// Wire form of a target: `"7.0"` or `true`
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum TargetRepr {
    Flag(bool),
    Version(String),
}

impl TryFrom<TargetRepr> for MappedTarget {
    type Error = MapError;

    fn try_from(repr: TargetRepr) -> Result<Self, Self::Error> {
        match repr {
            TargetRepr::Flag(true) => Ok(Self::Supported),
            TargetRepr::Flag(false) => Err(MapError::InvalidTarget("false".to_string())),
            TargetRepr::Version(version) => Ok(Self::Version(version)),
        }
    }
}

impl From<MappedTarget> for TargetRepr {
    fn from(target: MappedTarget) -> Self {
        match target {
            MappedTarget::Supported => Self::Flag(true),
            MappedTarget::Version(version) => Self::Version(version),
        }
    }
}

impl MappedTarget {
    pub fn to_version(&self) -> VersionValue {
        match self {
            Self::Supported => VersionValue::SupportedUnknownVersion,
            Self::Version(version) => VersionValue::SupportedFrom(version.clone()),
        }
    }
}

/// Inclusive numeric range `[low, high] → target`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionRange {
    pub low: f64,
    pub high: f64,
    pub target: MappedTarget,
}

impl VersionRange {
    pub fn new(low: f64, high: f64, target: MappedTarget) -> Self {
        Self { low, high, target }
    }

    pub fn version(low: f64, high: f64, version: &str) -> Self {
        Self::new(low, high, MappedTarget::Version(version.to_string()))
    }

    pub fn supported(low: f64, high: f64) -> Self {
        Self::new(low, high, MappedTarget::Supported)
    }

    pub fn contains(&self, version: f64) -> bool {
        self.low <= version && version <= self.high
    }

    fn overlaps(&self, other: &VersionRange) -> bool {
        self.low <= other.high && other.low <= self.high
    }
}

/// Ordered set of disjoint ranges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<VersionRange>", into = "Vec<VersionRange>")]
pub struct VersionTable {
    ranges: Vec<VersionRange>,
}

impl VersionTable {
    /// Build a table, rejecting inverted (or NaN) and overlapping ranges
    pub fn new(ranges: Vec<VersionRange>) -> Result<Self, MapError> {
        for range in &ranges {
            if range.low.is_nan() || range.high.is_nan() || range.low > range.high {
                return Err(MapError::InvertedRange {
                    low: range.low,
                    high: range.high,
                });
            }
        }

        for (i, range) in ranges.iter().enumerate() {
            if let Some(other) = ranges[i + 1..].iter().find(|o| range.overlaps(o)) {
                return Err(MapError::OverlappingRanges {
                    low: range.low,
                    high: range.high,
                    other_low: other.low,
                    other_high: other.high,
                });
            }
        }

        Ok(Self { ranges })
    }

    pub fn ranges(&self) -> &[VersionRange] {
        &self.ranges
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Target of the range containing `version`
    pub fn lookup(&self, version: f64) -> Option<&MappedTarget> {
        self.ranges
            .iter()
            .find(|range| range.contains(version))
            .map(|range| &range.target)
    }

    /// Map a source value to a destination value.
    ///
    /// `true`, `false` and `null` pass through unchanged. A concrete version
    /// maps to its range target, or to `false` when no range contains it.
    /// A version string without a leading number is an error.
    pub fn map(&self, value: &VersionValue) -> Result<VersionValue, MapError> {
        match value {
            VersionValue::SupportedFrom(version) => {
                let number = value
                    .numeric()
                    .ok_or_else(|| MapError::UnrecognizedVersion(format!("\"{}\"", version)))?;
                Ok(self
                    .lookup(number)
                    .map(MappedTarget::to_version)
                    .unwrap_or(VersionValue::Unsupported))
            }
            other => Ok(other.clone()),
        }
    }
}

impl TryFrom<Vec<VersionRange>> for VersionTable {
    type Error = MapError;

    fn try_from(ranges: Vec<VersionRange>) -> Result<Self, Self::Error> {
        Self::new(ranges)
    }
}

impl From<VersionTable> for Vec<VersionRange> {
    fn from(table: VersionTable) -> Self {
        table.ranges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> VersionTable {
        VersionTable::new(vec![
            VersionRange::version(57.0, 59.0, "7.0"),
            VersionRange::version(52.0, 56.0, "6.0"),
            VersionRange::supported(0.0, 38.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_every_version_in_range_maps_to_target() {
        let table = table();
        for v in 52..=56 {
            let mapped = table.map(&VersionValue::SupportedFrom(v.to_string())).unwrap();
            assert_eq!(mapped, VersionValue::SupportedFrom("6.0".to_string()), "v{}", v);
        }
    }

    #[test]
    fn test_supported_target() {
        let mapped = table().map(&VersionValue::SupportedFrom("18".to_string())).unwrap();
        assert_eq!(mapped, VersionValue::SupportedUnknownVersion);
    }

    #[test]
    fn test_uncovered_versions_map_to_false() {
        let table = table();
        for v in ["70", "45", "60"] {
            let mapped = table.map(&VersionValue::SupportedFrom(v.to_string())).unwrap();
            assert_eq!(mapped, VersionValue::Unsupported, "v{}", v);
        }
    }

    #[test]
    fn test_flags_pass_through() {
        let table = table();
        for value in [
            VersionValue::Unknown,
            VersionValue::Unsupported,
            VersionValue::SupportedUnknownVersion,
        ] {
            assert_eq!(table.map(&value).unwrap(), value);
        }
    }

    #[test]
    fn test_non_numeric_version_is_rejected() {
        let result = table().map(&VersionValue::SupportedFrom("preview".to_string()));
        assert!(matches!(result, Err(MapError::UnrecognizedVersion(_))));
    }

    #[test]
    fn test_overlap_rejected() {
        let result = VersionTable::new(vec![
            VersionRange::version(50.0, 56.0, "6.0"),
            VersionRange::version(56.0, 59.0, "7.0"),
        ]);
        assert!(matches!(result, Err(MapError::OverlappingRanges { .. })));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let result = VersionTable::new(vec![VersionRange::version(59.0, 57.0, "7.0")]);
        assert!(matches!(result, Err(MapError::InvertedRange { .. })));
    }

    #[test]
    fn test_yaml_targets() {
        let yaml = r#"
- low: 57
  high: 59
  target: "7.0"
- low: 0
  high: 38
  target: true
"#;
        let table: VersionTable = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(table.lookup(58.0), Some(&MappedTarget::Version("7.0".to_string())));
        assert_eq!(table.lookup(1.0), Some(&MappedTarget::Supported));
    }

    #[test]
    fn test_yaml_false_target_rejected() {
        let yaml = "- low: 1\n  high: 2\n  target: false\n";
        assert!(serde_yaml::from_str::<VersionTable>(yaml).is_err());
    }
}
