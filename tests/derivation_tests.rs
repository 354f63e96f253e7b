/// View derivation tests.
///
/// Exercises the breakdown and correlation derivations against a small
/// in-memory table and the bundled fixture, checking the predicate law,
/// inclusive bounds, determinism and filter rejection.
use std::path::PathBuf;

use launchdash::dataset::{ColumnNames, Dataset, LaunchRecord, Outcome};
use launchdash::error::FilterError;
use launchdash::filter::{FilterState, PayloadRange, SiteSelection};
use launchdash::presentation;
use launchdash::views::correlation::{correlation_for, matches};
use launchdash::views::{BreakdownKey, payload_correlation, success_breakdown};

fn three_records() -> Dataset {
    Dataset::from_records(vec![
        LaunchRecord::new("siteA", 500.0, Outcome::Success, "boosterX"),
        LaunchRecord::new("siteA", 1500.0, Outcome::Failure, "boosterY"),
        LaunchRecord::new("siteB", 1000.0, Outcome::Success, "boosterX"),
    ])
    .unwrap()
}

fn fixture() -> Dataset {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/launches.csv");
    Dataset::load(&path, &ColumnNames::default()).unwrap()
}

fn selections(dataset: &Dataset) -> Vec<SiteSelection> {
    std::iter::once(SiteSelection::All)
        .chain(
            dataset
                .known_sites()
                .iter()
                .map(|s| SiteSelection::Site(s.clone())),
        )
        .collect()
}

// ---------------------------------------------------------------------------
// Concrete example
// ---------------------------------------------------------------------------

#[test]
fn all_sites_breakdown_counts_successes_per_site() {
    let ds = three_records();
    let mut filter = FilterState::new(&ds);
    filter.set_payload_range(0.0, 2000.0).unwrap();

    let breakdown = success_breakdown(&ds, &filter);
    assert_eq!(breakdown.slices.len(), 2);
    assert_eq!(breakdown.slices[0].key, BreakdownKey::Site("siteA".into()));
    assert_eq!(breakdown.slices[0].count, 1);
    assert_eq!(breakdown.slices[1].key, BreakdownKey::Site("siteB".into()));
    assert_eq!(breakdown.slices[1].count, 1);
}

#[test]
fn single_site_breakdown_splits_success_and_failure() {
    let ds = three_records();
    let mut filter = FilterState::new(&ds);
    filter
        .set_site(&ds, SiteSelection::Site("siteA".into()))
        .unwrap();
    filter.set_payload_range(0.0, 2000.0).unwrap();

    let breakdown = success_breakdown(&ds, &filter);
    assert_eq!(breakdown.count_for("success"), 1);
    assert_eq!(breakdown.count_for("failure"), 1);
    assert_eq!(breakdown.total(), 2);
}

#[test]
fn correlation_excludes_records_below_low() {
    let ds = three_records();
    let mut filter = FilterState::new(&ds);
    filter.set_payload_range(600.0, 2000.0).unwrap();

    let correlation = payload_correlation(&ds, &filter);
    let masses: Vec<f64> = correlation
        .points
        .iter()
        .map(|r| r.payload_mass_kg)
        .collect();
    assert_eq!(masses, vec![1500.0, 1000.0]);
}

#[test]
fn breakdown_ignores_payload_range() {
    let ds = three_records();
    let mut filter = FilterState::new(&ds);
    let before = success_breakdown(&ds, &filter);
    filter.set_payload_range(1200.0, 1500.0).unwrap();
    assert_eq!(success_breakdown(&ds, &filter), before);
}

// ---------------------------------------------------------------------------
// Laws over the fixture
// ---------------------------------------------------------------------------

#[test]
fn correlation_points_follow_predicate_exactly() {
    let ds = fixture();
    let ranges = [
        (0.0, 15600.0),
        (0.0, 0.0),
        (500.0, 3600.0),
        (2490.0, 2490.0),
        (4000.0, 5000.0),
        (6000.0, 15600.0),
    ];

    for selection in selections(&ds) {
        for (low, high) in ranges {
            let range = PayloadRange::new(low, high).unwrap();
            let view = correlation_for(&ds, &selection, range);

            let expected: Vec<&LaunchRecord> = ds
                .all_records()
                .iter()
                .filter(|r| {
                    let site_ok = selection.site().is_none_or(|s| r.site == s);
                    site_ok && r.payload_mass_kg >= low && r.payload_mass_kg <= high
                })
                .collect();

            assert_eq!(view.points, expected, "{selection} [{low}, {high}]");
            assert!(view.points.iter().all(|r| matches(r, &selection, range)));
        }
    }
}

#[test]
fn range_bounds_are_inclusive() {
    let ds = fixture();
    let range = PayloadRange::new(525.0, 3170.0).unwrap();
    let view = correlation_for(&ds, &SiteSelection::All, range);
    let masses: Vec<f64> = view.points.iter().map(|r| r.payload_mass_kg).collect();
    assert!(masses.contains(&525.0));
    assert!(masses.contains(&3170.0));
    assert!(!masses.contains(&500.0));
    assert!(!masses.contains(&3600.0));
}

#[test]
fn empty_range_is_valid_output() {
    let ds = fixture();
    let range = PayloadRange::new(4000.0, 5000.0).unwrap();
    let view = correlation_for(&ds, &SiteSelection::All, range);
    assert!(view.is_empty());
}

#[test]
fn derivations_are_deterministic() {
    let ds = fixture();
    let mut filter = FilterState::new(&ds);
    filter
        .set_site(&ds, SiteSelection::Site("KSC LC-39A".into()))
        .unwrap();
    filter.set_payload_range(2000.0, 8000.0).unwrap();

    assert_eq!(
        presentation::render(&ds, &filter),
        presentation::render(&ds, &filter)
    );
    assert_eq!(success_breakdown(&ds, &filter), success_breakdown(&ds, &filter));
}

#[test]
fn all_sites_breakdown_sums_to_total_successes() {
    let ds = fixture();
    let filter = FilterState::new(&ds);
    let breakdown = success_breakdown(&ds, &filter);
    let successes = ds
        .all_records()
        .iter()
        .filter(|r| r.outcome.is_success())
        .count();
    assert_eq!(breakdown.total(), successes);
    assert_eq!(successes, 7);
}

#[test]
fn site_breakdowns_follow_first_appearance() {
    let ds = fixture();
    let filter = FilterState::new(&ds);
    let breakdown = success_breakdown(&ds, &filter);
    let labels: Vec<&str> = breakdown.slices.iter().map(|s| s.key.label()).collect();
    assert_eq!(
        labels,
        vec!["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"]
    );
}

// ---------------------------------------------------------------------------
// Filter rejection
// ---------------------------------------------------------------------------

#[test]
fn unknown_site_is_rejected_and_state_kept() {
    let ds = three_records();
    let mut filter = FilterState::new(&ds);
    filter
        .set_site(&ds, SiteSelection::Site("siteB".into()))
        .unwrap();
    let before = filter.clone();

    let err = filter
        .set_site(&ds, SiteSelection::parse("siteZ"))
        .unwrap_err();
    assert_eq!(err, FilterError::InvalidSite("siteZ".into()));
    assert_eq!(filter, before);
}

#[test]
fn inverted_range_is_rejected_and_state_kept() {
    let ds = three_records();
    let mut filter = FilterState::new(&ds);
    filter.set_payload_range(600.0, 1200.0).unwrap();
    let before = filter.clone();

    let err = filter.set_payload_range(1200.0, 600.0).unwrap_err();
    assert!(matches!(err, FilterError::InvalidRange { .. }));
    assert_eq!(filter, before);
}

#[test]
fn out_of_bounds_range_is_clamped() {
    let ds = three_records();
    let mut filter = FilterState::new(&ds);
    let applied = filter.set_payload_range(-100.0, 1e9).unwrap();
    assert_eq!(applied.low, 500.0);
    assert_eq!(applied.high, 1500.0);
}
