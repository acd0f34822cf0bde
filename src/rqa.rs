use itertools::Itertools;

use crate::partial::Partial;

// Two partials closer than this, in Hz, count as a recurrence
pub const RECURRENCE_THRESHOLD: f64 = 1.0;

/// Recurrence ratio of a chord's partials.
///
/// Counts ordered pairs `(i, j)`, diagonal included, whose frequencies lie within
/// [`RECURRENCE_THRESHOLD`] of each other, divided by `N^2`. Any non-empty set
/// scores at least `1 / N` from its self-matches. Amplitudes do not take part.
/// An empty set has nothing to recur and scores 0.
pub fn rqa(partials: &[Partial]) -> f64 {
    let n = partials.len();
    if n == 0 {
        return 0.0;
    }
    let recurrences = partials
        .iter()
        .cartesian_product(partials.iter())
        .filter(|(p, q)| (p.frequency - q.frequency).abs() < RECURRENCE_THRESHOLD)
        .count();
    recurrences as f64 / (n * n) as f64
}
