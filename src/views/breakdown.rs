//! Success breakdown: the pie-chart view.
//!
//! Two deliberately different questions:
//! - all sites: how many successful launches did each site contribute?
//!   Failures are not counted at all.
//! - one site: how do that site's launches split between success and
//!   failure?
//!
//! The payload range does not affect this view.

use serde::Serialize;

use super::count_in_appearance_order;
use crate::dataset::{Dataset, Outcome};
use crate::filter::{FilterState, SiteSelection};

/// Grouping key of one breakdown slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum BreakdownKey {
    Site(String),
    Outcome(Outcome),
}

impl BreakdownKey {
    pub fn label(&self) -> &str {
        match self {
            Self::Site(site) => site,
            Self::Outcome(outcome) => outcome.label(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownSlice {
    pub key: BreakdownKey,
    pub count: usize,
}

/// Count-per-category view for the current site selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuccessBreakdown {
    pub selection: SiteSelection,
    pub title: String,
    /// Slices in first-appearance order of their key in the dataset.
    pub slices: Vec<BreakdownSlice>,
}

impl SuccessBreakdown {
    /// Sum over all slices.
    pub fn total(&self) -> usize {
        self.slices.iter().map(|s| s.count).sum()
    }

    /// An empty breakdown must be rendered as a "no data" state.
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// Count of the slice with the given label, or 0.
    pub fn count_for(&self, label: &str) -> usize {
        self.slices
            .iter()
            .find(|s| s.key.label() == label)
            .map(|s| s.count)
            .unwrap_or(0)
    }
}

/// Derive the success breakdown for the filter's current site.
pub fn success_breakdown(dataset: &Dataset, filter: &FilterState) -> SuccessBreakdown {
    breakdown_for_selection(dataset, filter.site())
}

/// Derive the success breakdown for an explicit site selection.
pub fn breakdown_for_selection(dataset: &Dataset, selection: &SiteSelection) -> SuccessBreakdown {
    match selection {
        SiteSelection::All => {
            let successes = dataset
                .all_records()
                .iter()
                .filter(|r| r.outcome.is_success())
                .map(|r| r.site.as_str());

            SuccessBreakdown {
                selection: SiteSelection::All,
                title: "Total Success Launches by Site".to_string(),
                slices: count_in_appearance_order(successes)
                    .into_iter()
                    .map(|(site, count)| BreakdownSlice {
                        key: BreakdownKey::Site(site.to_string()),
                        count,
                    })
                    .collect(),
            }
        }
        SiteSelection::Site(site) => {
            let outcomes = dataset.records_at(site).map(|r| r.outcome);

            SuccessBreakdown {
                selection: selection.clone(),
                title: format!("Total Success Launches at \"{site}\""),
                slices: count_in_appearance_order(outcomes)
                    .into_iter()
                    .map(|(outcome, count)| BreakdownSlice {
                        key: BreakdownKey::Outcome(outcome),
                        count,
                    })
                    .collect(),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
