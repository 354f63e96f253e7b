//! View derivation engine.
//!
//! Pure functions from `(&Dataset, &FilterState)` to the two derived views.
//! Nothing is cached: every call recomputes from the immutable dataset, so
//! calling twice with the same inputs yields identical output. Neither
//! derivation depends on the other; they can run in any order.

pub mod breakdown;
pub mod correlation;

pub use breakdown::{BreakdownKey, BreakdownSlice, SuccessBreakdown, success_breakdown};
pub use correlation::{PayloadCorrelation, payload_correlation};

/// Count items per key, keeping keys in first-appearance order.
///
/// Key sets here are tiny (a handful of sites, two outcomes), so a linear
/// scan beats hashing and keeps the order stable for free.
pub(crate) fn count_in_appearance_order<K, I>(items: I) -> Vec<(K, usize)>
where
    K: PartialEq,
    I: IntoIterator<Item = K>,
{
    let mut counts: Vec<(K, usize)> = Vec::new();
    for key in items {
        match counts.iter_mut().find(|(k, _)| *k == key) {
            Some((_, n)) => *n += 1,
            None => counts.push((key, 1)),
        }
    }
    counts
}
