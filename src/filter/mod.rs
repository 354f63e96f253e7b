//! Filter state: the two live selections of one dashboard session.
//!
//! A [`FilterState`] is created from the dataset's bounds at session start
//! and mutated only by UI events. Every mutation validates first and leaves
//! the state untouched on error, so the derivation engine only ever sees a
//! valid selection.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::dataset::{Dataset, PayloadBounds};
use crate::error::FilterError;

/// Wire sentinel for the all-sites selection.
pub const ALL_SITES: &str = "ALL";

/// Human-readable name of the all-sites selection.
pub const ALL_SITES_LABEL: &str = "All Sites";

// ---------------------------------------------------------------------------
// Site selection
// ---------------------------------------------------------------------------

/// Either every site, or exactly one known site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    /// Parse a wire value. `ALL` (any case) selects every site; anything
    /// else names a site, still to be validated against the dataset.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case(ALL_SITES) {
            Self::All
        } else {
            Self::Site(raw.to_string())
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// The concrete site, if one is selected.
    pub fn site(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Site(id) => Some(id),
        }
    }

    /// Wire value: `ALL` or the site id.
    pub fn as_str(&self) -> &str {
        self.site().unwrap_or(ALL_SITES)
    }

    /// Display name used in chart titles.
    pub fn display_name(&self) -> &str {
        self.site().unwrap_or(ALL_SITES_LABEL)
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SiteSelection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Payload range
// ---------------------------------------------------------------------------

/// Inclusive payload interval `[low, high]` in kilograms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    /// Validate a raw range. Both ends must be finite and `low <= high`.
    pub fn new(low: f64, high: f64) -> Result<Self, FilterError> {
        if !low.is_finite() || !high.is_finite() || low > high {
            return Err(FilterError::InvalidRange { low, high });
        }
        Ok(Self { low, high })
    }

    /// Inclusive on both ends.
    pub fn contains(&self, mass_kg: f64) -> bool {
        self.low <= mass_kg && mass_kg <= self.high
    }

    fn clamped_to(self, bounds: PayloadBounds) -> Self {
        Self {
            low: bounds.clamp(self.low),
            high: bounds.clamp(self.high),
        }
    }
}

impl From<PayloadBounds> for PayloadRange {
    fn from(bounds: PayloadBounds) -> Self {
        Self {
            low: bounds.min,
            high: bounds.max,
        }
    }
}

// ---------------------------------------------------------------------------
// Filter state
// ---------------------------------------------------------------------------

/// Current site and payload selections of one session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterState {
    site: SiteSelection,
    payload_range: PayloadRange,
    #[serde(skip)]
    bounds: PayloadBounds,
}

impl FilterState {
    /// Defaults: all sites, the full payload extent of `dataset`.
    pub fn new(dataset: &Dataset) -> Self {
        let bounds = dataset.payload_bounds();
        Self {
            site: SiteSelection::All,
            payload_range: bounds.into(),
            bounds,
        }
    }

    pub fn site(&self) -> &SiteSelection {
        &self.site
    }

    pub fn payload_range(&self) -> PayloadRange {
        self.payload_range
    }

    /// Select a site. Fails with [`FilterError::InvalidSite`] unless the
    /// selection is `All` or a site present in `dataset`.
    pub fn set_site(&mut self, dataset: &Dataset, site: SiteSelection) -> Result<(), FilterError> {
        if let SiteSelection::Site(id) = &site
            && !dataset.is_known_site(id)
        {
            return Err(FilterError::InvalidSite(id.clone()));
        }
        self.site = site;
        Ok(())
    }

    /// Set the payload range, clamping out-of-bounds ends into the dataset
    /// extent. Returns the range actually applied.
    pub fn set_payload_range(&mut self, low: f64, high: f64) -> Result<PayloadRange, FilterError> {
        let range = PayloadRange::new(low, high)?.clamped_to(self.bounds);
        self.payload_range = range;
        Ok(range)
    }

    /// Back to the session-start defaults.
    pub fn reset(&mut self) {
        self.site = SiteSelection::All;
        self.payload_range = self.bounds.into();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{LaunchRecord, Outcome};

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            LaunchRecord::new("siteA", 500.0, Outcome::Success, "boosterX"),
            LaunchRecord::new("siteA", 1500.0, Outcome::Failure, "boosterY"),
            LaunchRecord::new("siteB", 1000.0, Outcome::Success, "boosterX"),
        ])
        .unwrap()
    }

    #[test]
    fn defaults_cover_everything() {
        let ds = dataset();
        let filter = FilterState::new(&ds);
        assert!(filter.site().is_all());
        assert_eq!(filter.payload_range(), PayloadRange { low: 500.0, high: 1500.0 });
    }

    #[test]
    fn parse_recognizes_all_sentinel() {
        assert_eq!(SiteSelection::parse("ALL"), SiteSelection::All);
        assert_eq!(SiteSelection::parse("all"), SiteSelection::All);
        assert_eq!(
            SiteSelection::parse(" KSC LC-39A "),
            SiteSelection::Site("KSC LC-39A".to_string())
        );
    }

    #[test]
    fn set_site_accepts_known_site() {
        let ds = dataset();
        let mut filter = FilterState::new(&ds);
        filter
            .set_site(&ds, SiteSelection::Site("siteB".to_string()))
            .unwrap();
        assert_eq!(filter.site().site(), Some("siteB"));
    }

    #[test]
    fn set_site_rejects_unknown_site_and_keeps_state() {
        let ds = dataset();
        let mut filter = FilterState::new(&ds);
        filter
            .set_site(&ds, SiteSelection::Site("siteA".to_string()))
            .unwrap();
        let before = filter.clone();

        let err = filter
            .set_site(&ds, SiteSelection::Site("siteZ".to_string()))
            .unwrap_err();
        assert_eq!(err, FilterError::InvalidSite("siteZ".to_string()));
        assert_eq!(filter, before);
    }

    #[test]
    fn set_payload_range_rejects_inverted_range() {
        let ds = dataset();
        let mut filter = FilterState::new(&ds);
        let before = filter.clone();
        let err = filter.set_payload_range(1200.0, 800.0).unwrap_err();
        assert!(matches!(err, FilterError::InvalidRange { .. }));
        assert_eq!(filter, before);
    }

    #[test]
    fn set_payload_range_rejects_nan() {
        let ds = dataset();
        let mut filter = FilterState::new(&ds);
        assert!(filter.set_payload_range(f64::NAN, 800.0).is_err());
    }

    #[test]
    fn set_payload_range_clamps_into_bounds() {
        let ds = dataset();
        let mut filter = FilterState::new(&ds);
        let applied = filter.set_payload_range(0.0, 10_000.0).unwrap();
        assert_eq!(applied, PayloadRange { low: 500.0, high: 1500.0 });

        let applied = filter.set_payload_range(600.0, 700.0).unwrap();
        assert_eq!(applied, PayloadRange { low: 600.0, high: 700.0 });
    }

    #[test]
    fn single_point_range_is_valid() {
        let ds = dataset();
        let mut filter = FilterState::new(&ds);
        let applied = filter.set_payload_range(1000.0, 1000.0).unwrap();
        assert!(applied.contains(1000.0));
        assert!(!applied.contains(1000.5));
    }

    #[test]
    fn reset_restores_defaults() {
        let ds = dataset();
        let mut filter = FilterState::new(&ds);
        filter
            .set_site(&ds, SiteSelection::Site("siteA".to_string()))
            .unwrap();
        filter.set_payload_range(600.0, 700.0).unwrap();
        filter.reset();
        assert_eq!(filter, FilterState::new(&ds));
    }

    #[test]
    fn selection_serializes_as_wire_value() {
        let json = serde_json::to_string(&SiteSelection::All).unwrap();
        assert_eq!(json, "\"ALL\"");
        let json = serde_json::to_string(&SiteSelection::Site("siteA".to_string())).unwrap();
        assert_eq!(json, "\"siteA\"");
    }
}
