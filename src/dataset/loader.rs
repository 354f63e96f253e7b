//! CSV loader for the launch table.
//!
//! The source is a header-first CSV. Only four columns are read; any others
//! (flight number, booster version, an unnamed index) are ignored. Column
//! names are a compatibility contract with the exported dataset and can be
//! overridden through `[dataset.columns]` in the config.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{LaunchRecord, Outcome};
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

/// Header names of the four required columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub site: String,
    pub payload_mass: String,
    pub outcome: String,
    pub booster_category: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            site: "Launch Site".to_string(),
            payload_mass: "Payload Mass (kg)".to_string(),
            outcome: "class".to_string(),
            booster_category: "Booster Version Category".to_string(),
        }
    }
}

/// Resolved header positions for one source.
struct ColumnIndex<'a> {
    names: &'a ColumnNames,
    site: usize,
    payload_mass: usize,
    outcome: usize,
    booster_category: usize,
}

impl<'a> ColumnIndex<'a> {
    fn resolve(headers: &csv::StringRecord, names: &'a ColumnNames) -> Result<Self, LoadError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| LoadError::MissingColumn {
                    column: name.to_string(),
                })
        };

        Ok(Self {
            names,
            site: find(&names.site)?,
            payload_mass: find(&names.payload_mass)?,
            outcome: find(&names.outcome)?,
            booster_category: find(&names.booster_category)?,
        })
    }

    /// Parse one data row. `row` is 1-based and excludes the header.
    fn parse_row(&self, record: &csv::StringRecord, row: usize) -> Result<LaunchRecord, LoadError> {
        let cell = |idx: usize| record.get(idx).unwrap_or("");
        let invalid = |column: &str, value: &str| LoadError::InvalidValue {
            row,
            column: column.to_string(),
            value: value.to_string(),
        };

        let site = cell(self.site);
        if site.is_empty() {
            return Err(invalid(&self.names.site, site));
        }

        let raw_mass = cell(self.payload_mass);
        let payload_mass_kg = parse_payload(raw_mass)
            .ok_or_else(|| invalid(&self.names.payload_mass, raw_mass))?;

        let raw_outcome = cell(self.outcome);
        let outcome =
            parse_outcome(raw_outcome).ok_or_else(|| invalid(&self.names.outcome, raw_outcome))?;

        let booster = cell(self.booster_category);
        if booster.is_empty() {
            return Err(invalid(&self.names.booster_category, booster));
        }

        Ok(LaunchRecord::new(site, payload_mass_kg, outcome, booster))
    }
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// Read every record from a CSV file.
pub fn read_path(path: &Path, columns: &ColumnNames) -> Result<Vec<LaunchRecord>, LoadError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => LoadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;
    read_records(file, columns)
}

/// Read every record from a CSV byte stream, in source order.
pub fn read_records<R: Read>(
    reader: R,
    columns: &ColumnNames,
) -> Result<Vec<LaunchRecord>, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let index = ColumnIndex::resolve(&headers, columns)?;

    let mut records = Vec::new();
    for (i, row) in rdr.records().enumerate() {
        let row = row?;
        records.push(index.parse_row(&row, i + 1)?);
    }

    Ok(records)
}

/// Finite, non-negative kilograms.
fn parse_payload(raw: &str) -> Option<f64> {
    let value: f64 = raw.parse().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}

/// `1` / `0`, tolerating a float rendering such as `1.0`.
fn parse_outcome(raw: &str) -> Option<Outcome> {
    match raw {
        "1" => Some(Outcome::Success),
        "0" => Some(Outcome::Failure),
        _ => {
            let value: f64 = raw.parse().ok()?;
            if value == 1.0 {
                Some(Outcome::Success)
            } else if value == 0.0 {
                Some(Outcome::Failure)
            } else {
                None
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
