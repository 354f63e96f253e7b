//! Presentation adapter: derived views to chart-ready series.
//!
//! No decisions are made here: categories, points and groups come straight
//! from the derivation engine, decorated with labels and colors. Colors are
//! assigned by first-appearance index so the same dataset always renders the
//! same way.

use serde::Serialize;

use crate::dataset::{Dataset, Outcome};
use crate::filter::{FilterState, PayloadRange};
use crate::views::breakdown::{BreakdownKey, SuccessBreakdown, success_breakdown};
use crate::views::correlation::{
    GROUP_LABEL, PayloadCorrelation, X_AXIS_LABEL, Y_AXIS_LABEL, payload_correlation,
};
use crate::views::count_in_appearance_order;

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

/// Qualitative palette for sites and booster categories.
pub const PALETTE: [&str; 10] = [
    "#636efa", "#ef553b", "#00cc96", "#ab63fa", "#ffa15a", "#19d3f3", "#ff6692", "#b6e880",
    "#ff97ff", "#fecb52",
];

pub const SUCCESS_COLOR: &str = "#00cc96";
pub const FAILURE_COLOR: &str = "#ef553b";

/// Palette color for the `index`-th distinct key, wrapping around.
pub fn palette_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

fn outcome_color(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Success => SUCCESS_COLOR,
        Outcome::Failure => FAILURE_COLOR,
    }
}

// ---------------------------------------------------------------------------
// Success breakdown view
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    pub label: String,
    pub value: usize,
    pub color: &'static str,
}

/// Pie-chart series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuccessBreakdownView {
    pub title: String,
    pub categories: Vec<Category>,
    pub total: usize,
}

impl SuccessBreakdownView {
    /// Render a "no data" state instead of an empty chart.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl From<&SuccessBreakdown> for SuccessBreakdownView {
    fn from(breakdown: &SuccessBreakdown) -> Self {
        let categories = breakdown
            .slices
            .iter()
            .enumerate()
            .map(|(i, slice)| Category {
                label: slice.key.label().to_string(),
                value: slice.count,
                color: match &slice.key {
                    BreakdownKey::Site(_) => palette_color(i),
                    BreakdownKey::Outcome(outcome) => outcome_color(*outcome),
                },
            })
            .collect();

        Self {
            title: breakdown.title.clone(),
            categories,
            total: breakdown.total(),
        }
    }
}

// ---------------------------------------------------------------------------
// Correlation view
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    /// Outcome class: 1 success, 0 failure.
    pub y: u8,
    pub group: String,
}

/// One booster category in the legend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesGroup {
    pub name: String,
    pub color: &'static str,
    pub count: usize,
}

/// Scatter-chart series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationView {
    pub title: String,
    pub x_axis_label: &'static str,
    pub y_axis_label: &'static str,
    pub group_label: &'static str,
    pub points: Vec<Point>,
    pub groups: Vec<SeriesGroup>,
    /// Current payload range, used as the x axis extent.
    pub x_domain: PayloadRange,
}

impl CorrelationView {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Legend color of a booster category.
    pub fn color_of(&self, group: &str) -> Option<&'static str> {
        self.groups.iter().find(|g| g.name == group).map(|g| g.color)
    }
}

impl From<&PayloadCorrelation<'_>> for CorrelationView {
    fn from(correlation: &PayloadCorrelation<'_>) -> Self {
        let points = correlation
            .points
            .iter()
            .map(|r| Point {
                x: r.payload_mass_kg,
                y: r.outcome.class(),
                group: r.booster_category.clone(),
            })
            .collect();

        let groups = count_in_appearance_order(
            correlation.points.iter().map(|r| r.booster_category.as_str()),
        )
        .into_iter()
        .enumerate()
        .map(|(i, (name, count))| SeriesGroup {
            name: name.to_string(),
            color: palette_color(i),
            count,
        })
        .collect();

        Self {
            title: correlation.title.clone(),
            x_axis_label: X_AXIS_LABEL,
            y_axis_label: Y_AXIS_LABEL,
            group_label: GROUP_LABEL,
            points,
            groups,
            x_domain: correlation.range,
        }
    }
}

// ---------------------------------------------------------------------------
// Combined refresh
// ---------------------------------------------------------------------------

/// Both views for one filter state, ready to hand to the UI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardViews {
    pub breakdown: SuccessBreakdownView,
    pub correlation: CorrelationView,
}

/// Run both derivations and format their results.
pub fn render(dataset: &Dataset, filter: &FilterState) -> DashboardViews {
    let breakdown = success_breakdown(dataset, filter);
    let correlation = payload_correlation(dataset, filter);
    DashboardViews {
        breakdown: SuccessBreakdownView::from(&breakdown),
        correlation: CorrelationView::from(&correlation),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::LaunchRecord;
    use crate::filter::SiteSelection;

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            LaunchRecord::new("siteA", 500.0, Outcome::Success, "boosterX"),
            LaunchRecord::new("siteA", 1500.0, Outcome::Failure, "boosterY"),
            LaunchRecord::new("siteB", 1000.0, Outcome::Success, "boosterX"),
        ])
        .unwrap()
    }

    #[test]
    fn breakdown_view_colors_sites_by_index() {
        let ds = dataset();
        let views = render(&ds, &FilterState::new(&ds));
        let cats = &views.breakdown.categories;
        assert_eq!(cats[0].label, "siteA");
        assert_eq!(cats[0].color, PALETTE[0]);
        assert_eq!(cats[1].label, "siteB");
        assert_eq!(cats[1].color, PALETTE[1]);
        assert_eq!(views.breakdown.total, 2);
    }

    #[test]
    fn breakdown_view_uses_fixed_outcome_colors() {
        let ds = dataset();
        let mut filter = FilterState::new(&ds);
        filter
            .set_site(&ds, SiteSelection::Site("siteA".to_string()))
            .unwrap();
        let views = render(&ds, &filter);
        let cats = &views.breakdown.categories;
        assert_eq!(cats[0].label, "success");
        assert_eq!(cats[0].color, SUCCESS_COLOR);
        assert_eq!(cats[1].label, "failure");
        assert_eq!(cats[1].color, FAILURE_COLOR);
    }

    #[test]
    fn correlation_view_groups_by_booster() {
        let ds = dataset();
        let views = render(&ds, &FilterState::new(&ds));
        let c = &views.correlation;
        assert_eq!(c.x_axis_label, "Pay Load in (Kgs)");
        assert_eq!(c.y_axis_label, "Class");
        assert_eq!(c.group_label, "Booster Version Category");
        assert_eq!(c.points.len(), 3);
        assert_eq!(c.points[1], Point { x: 1500.0, y: 0, group: "boosterY".to_string() });
        assert_eq!(c.groups.len(), 2);
        assert_eq!(c.groups[0].count, 2);
        assert_eq!(c.color_of("boosterY"), Some(PALETTE[1]));
        assert_eq!(c.x_domain, PayloadRange { low: 500.0, high: 1500.0 });
    }

    #[test]
    fn empty_correlation_has_no_groups() {
        let ds = dataset();
        let mut filter = FilterState::new(&ds);
        filter.set_payload_range(1100.0, 1200.0).unwrap();
        let views = render(&ds, &filter);
        assert!(views.correlation.is_empty());
        assert!(views.correlation.groups.is_empty());
    }

    #[test]
    fn palette_wraps_around() {
        assert_eq!(palette_color(0), palette_color(PALETTE.len()));
    }

    #[test]
    fn views_serialize_for_the_ui() {
        let ds = dataset();
        let views = render(&ds, &FilterState::new(&ds));
        let json = serde_json::to_value(&views).unwrap();
        assert_eq!(json["breakdown"]["categories"][0]["label"], "siteA");
        assert_eq!(json["correlation"]["points"][0]["y"], 1);
        assert_eq!(json["correlation"]["x_domain"]["low"], 500.0);
    }
}
