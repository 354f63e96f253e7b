//! Payload correlation: the scatter view.
//!
//! Selects records by site (unless all sites are selected) and by the
//! inclusive payload range, and emits them unaggregated in load order.

use serde::Serialize;

use crate::dataset::{Dataset, LaunchRecord};
use crate::filter::{FilterState, PayloadRange, SiteSelection};

pub const X_AXIS_LABEL: &str = "Pay Load in (Kgs)";
pub const Y_AXIS_LABEL: &str = "Class";
/// Legend title of the booster category series.
pub const GROUP_LABEL: &str = "Booster Version Category";

/// Records matching the current site and payload predicate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayloadCorrelation<'a> {
    pub selection: SiteSelection,
    pub range: PayloadRange,
    pub title: String,
    pub points: Vec<&'a LaunchRecord>,
}

impl PayloadCorrelation<'_> {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// `true` when `record` passes the site and payload predicate.
pub fn matches(record: &LaunchRecord, selection: &SiteSelection, range: PayloadRange) -> bool {
    let site_ok = match selection {
        SiteSelection::All => true,
        SiteSelection::Site(site) => record.site == *site,
    };
    site_ok && range.contains(record.payload_mass_kg)
}

/// Derive the correlation view for the filter's current selections.
pub fn payload_correlation<'a>(dataset: &'a Dataset, filter: &FilterState) -> PayloadCorrelation<'a> {
    correlation_for(dataset, filter.site(), filter.payload_range())
}

/// Derive the correlation view for explicit selections.
pub fn correlation_for<'a>(
    dataset: &'a Dataset,
    selection: &SiteSelection,
    range: PayloadRange,
) -> PayloadCorrelation<'a> {
    let points = dataset
        .all_records()
        .iter()
        .filter(|r| matches(r, selection, range))
        .collect();

    PayloadCorrelation {
        selection: selection.clone(),
        range,
        title: format!(
            "Correlation between Payload and Success for \"{}\"",
            selection.display_name()
        ),
        points,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
