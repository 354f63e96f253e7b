//! Dataset store: the immutable launch-record table.
//!
//! A [`Dataset`] is built once at startup (see [`loader`]) and never mutated
//! afterwards. Every session and every derivation borrows it read-only, so
//! it can be shared freely without locking.
//!
//! Derived constants (known sites, payload bounds) are computed once at
//! construction time.

pub mod loader;

use std::fmt;
use std::io::Read;
use std::path::Path;

use serde::Serialize;

use crate::error::LoadError;

pub use loader::ColumnNames;

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Binary launch result. Stored in the source as the `class` column (1 / 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Success,
    Failure,
}

impl Outcome {
    /// Map a class value (`1` success, `0` failure) to an outcome.
    pub fn from_class(class: u8) -> Option<Self> {
        match class {
            1 => Some(Self::Success),
            0 => Some(Self::Failure),
            _ => None,
        }
    }

    /// Numeric class value used on the correlation y axis.
    pub fn class(self) -> u8 {
        match self {
            Self::Success => 1,
            Self::Failure => 0,
        }
    }

    pub fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Launch record
// ---------------------------------------------------------------------------

/// One row of the launch table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaunchRecord {
    pub site: String,
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    /// Used for grouping and coloring only, never for filtering.
    pub booster_category: String,
}

impl LaunchRecord {
    pub fn new(
        site: impl Into<String>,
        payload_mass_kg: f64,
        outcome: Outcome,
        booster_category: impl Into<String>,
    ) -> Self {
        Self {
            site: site.into(),
            payload_mass_kg,
            outcome,
            booster_category: booster_category.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Payload bounds
// ---------------------------------------------------------------------------

/// Global payload extent of the dataset. `min <= max` by construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PayloadBounds {
    pub min: f64,
    pub max: f64,
}

impl PayloadBounds {
    /// Clamp a value into `[min, max]`.
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

// ---------------------------------------------------------------------------
// Dataset
// ---------------------------------------------------------------------------

/// Immutable launch-record table with its load-time derived constants.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<LaunchRecord>,
    sites: Vec<String>,
    bounds: PayloadBounds,
}

impl Dataset {
    /// Load a dataset from a CSV file on disk.
    pub fn load(path: &Path, columns: &ColumnNames) -> Result<Self, LoadError> {
        let records = loader::read_path(path, columns)?;
        Self::from_records(records)
    }

    /// Load a dataset from any CSV byte stream.
    pub fn from_reader<R: Read>(reader: R, columns: &ColumnNames) -> Result<Self, LoadError> {
        let records = loader::read_records(reader, columns)?;
        Self::from_records(records)
    }

    /// Build a dataset from in-memory records.
    ///
    /// Fails with [`LoadError::Empty`] when `records` is empty and with
    /// [`LoadError::InvalidValue`] when a payload is negative or not finite.
    pub fn from_records(records: Vec<LaunchRecord>) -> Result<Self, LoadError> {
        let Some(first) = records.first() else {
            return Err(LoadError::Empty);
        };

        let mut bounds = PayloadBounds {
            min: first.payload_mass_kg,
            max: first.payload_mass_kg,
        };
        let mut sites: Vec<String> = Vec::new();

        for (i, record) in records.iter().enumerate() {
            let mass = record.payload_mass_kg;
            if !mass.is_finite() || mass < 0.0 {
                return Err(LoadError::InvalidValue {
                    row: i + 1,
                    column: "payload_mass_kg".to_string(),
                    value: mass.to_string(),
                });
            }
            bounds.min = bounds.min.min(mass);
            bounds.max = bounds.max.max(mass);

            if !sites.iter().any(|s| s == &record.site) {
                sites.push(record.site.clone());
            }
        }

        Ok(Self {
            records,
            sites,
            bounds,
        })
    }

    /// All records in load order.
    pub fn all_records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always `false` for a successfully constructed dataset.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct launch sites in first-appearance order.
    pub fn known_sites(&self) -> &[String] {
        &self.sites
    }

    pub fn is_known_site(&self, site: &str) -> bool {
        self.sites.iter().any(|s| s == site)
    }

    /// Records launched from one site, in load order.
    pub fn records_at<'a>(&'a self, site: &'a str) -> impl Iterator<Item = &'a LaunchRecord> + 'a {
        self.records.iter().filter(move |r| r.site == site)
    }

    pub fn payload_bounds(&self) -> PayloadBounds {
        self.bounds
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::from_records(vec![
            LaunchRecord::new("siteA", 500.0, Outcome::Success, "boosterX"),
            LaunchRecord::new("siteA", 1500.0, Outcome::Failure, "boosterY"),
            LaunchRecord::new("siteB", 1000.0, Outcome::Success, "boosterX"),
        ])
        .unwrap()
    }

    #[test]
    fn from_records_derives_bounds() {
        let ds = sample();
        let bounds = ds.payload_bounds();
        assert_eq!(bounds.min, 500.0);
        assert_eq!(bounds.max, 1500.0);
    }

    #[test]
    fn known_sites_in_first_appearance_order() {
        let ds = sample();
        assert_eq!(ds.known_sites(), &["siteA".to_string(), "siteB".to_string()]);
        assert!(ds.is_known_site("siteB"));
        assert!(!ds.is_known_site("siteZ"));
    }

    #[test]
    fn from_records_rejects_empty() {
        let err = Dataset::from_records(Vec::new()).unwrap_err();
        assert!(matches!(err, LoadError::Empty));
    }

    #[test]
    fn from_records_rejects_negative_payload() {
        let err = Dataset::from_records(vec![
            LaunchRecord::new("siteA", 10.0, Outcome::Success, "v1.0"),
            LaunchRecord::new("siteA", -1.0, Outcome::Success, "v1.0"),
        ])
        .unwrap_err();
        assert!(matches!(err, LoadError::InvalidValue { row: 2, .. }));
    }

    #[test]
    fn from_records_rejects_nan_payload() {
        let err = Dataset::from_records(vec![LaunchRecord::new(
            "siteA",
            f64::NAN,
            Outcome::Failure,
            "v1.0",
        )])
        .unwrap_err();
        assert!(matches!(err, LoadError::InvalidValue { row: 1, .. }));
    }

    #[test]
    fn records_at_filters_by_site() {
        let ds = sample();
        let masses: Vec<f64> = ds.records_at("siteA").map(|r| r.payload_mass_kg).collect();
        assert_eq!(masses, vec![500.0, 1500.0]);
        assert_eq!(ds.records_at("siteZ").count(), 0);
    }

    #[test]
    fn single_record_has_degenerate_bounds() {
        let ds = Dataset::from_records(vec![LaunchRecord::new(
            "siteA",
            42.0,
            Outcome::Success,
            "FT",
        )])
        .unwrap();
        let bounds = ds.payload_bounds();
        assert_eq!(bounds.min, bounds.max);
        assert!(bounds.contains(42.0));
    }

    #[test]
    fn outcome_class_mapping() {
        assert_eq!(Outcome::from_class(1), Some(Outcome::Success));
        assert_eq!(Outcome::from_class(0), Some(Outcome::Failure));
        assert_eq!(Outcome::from_class(2), None);
        assert_eq!(Outcome::Success.class(), 1);
        assert_eq!(Outcome::Failure.to_string(), "failure");
    }

    #[test]
    fn bounds_clamp() {
        let bounds = PayloadBounds {
            min: 0.0,
            max: 9600.0,
        };
        assert_eq!(bounds.clamp(-5.0), 0.0);
        assert_eq!(bounds.clamp(10_000.0), 9600.0);
        assert_eq!(bounds.clamp(2500.0), 2500.0);
    }
}
