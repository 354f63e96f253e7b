//! One dashboard session: a private filter over the shared dataset.
//!
//! The reactive "event triggers recompute" loop reduces to: mutate the
//! filter, then run both derivations and hand back the formatted views. A
//! rejected event returns its [`FilterError`] and leaves the filter as it was,
//! so the UI keeps showing the previous views.

use tracing::debug;

use crate::dataset::{Dataset, PayloadBounds};
use crate::error::FilterError;
use crate::filter::{FilterState, SiteSelection};
use crate::presentation::{self, DashboardViews};

#[derive(Debug, Clone)]
pub struct Session<'a> {
    dataset: &'a Dataset,
    filter: FilterState,
}

impl<'a> Session<'a> {
    /// Start a session with default selections.
    pub fn new(dataset: &'a Dataset) -> Self {
        Self {
            dataset,
            filter: FilterState::new(dataset),
        }
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Sites offered in the selector.
    pub fn known_sites(&self) -> &'a [String] {
        self.dataset.known_sites()
    }

    /// Default slider extent.
    pub fn payload_bounds(&self) -> PayloadBounds {
        self.dataset.payload_bounds()
    }

    /// Recompute both views for the current filter.
    pub fn views(&self) -> DashboardViews {
        presentation::render(self.dataset, &self.filter)
    }

    /// Handle a site dropdown change (`ALL` or a site id).
    pub fn on_site_selected(&mut self, site: &str) -> Result<DashboardViews, FilterError> {
        let selection = SiteSelection::parse(site);
        self.filter.set_site(self.dataset, selection)?;
        debug!(site = %self.filter.site(), "site selected");
        Ok(self.views())
    }

    /// Handle a payload slider change.
    pub fn on_payload_range_changed(
        &mut self,
        low: f64,
        high: f64,
    ) -> Result<DashboardViews, FilterError> {
        let applied = self.filter.set_payload_range(low, high)?;
        debug!(low = applied.low, high = applied.high, "payload range changed");
        Ok(self.views())
    }

    /// Restore default selections.
    pub fn reset(&mut self) -> DashboardViews {
        self.filter.reset();
        self.views()
    }
}
