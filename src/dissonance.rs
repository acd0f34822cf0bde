/*

Dissonance.rs estimates the acoustic roughness of a set of partials.

Both models sum a Sethares-style kernel over every unordered pair of partials.
The raw model uses the absolute frequency gap, so it depends on register. The
normalized model divides the gap by the lower frequency, making it independent
of register, and scales the result by the instrument's overtone coefficient.

*/

use itertools::Itertools;

use crate::partial::Partial;

const A: f64 = 3.5;
const B: f64 = 5.75;
const D_S: f64 = 0.24;

// Empirical calibration that lifts raw sums into a readable range
pub const RAW_SCALE: f64 = 1_000_000_000.0 * 50.0;

// Roughness of one fully rough pair, used as the normalization ceiling
const PAIR_CEILING: f64 = 0.0349;
const OVERTONE_BASE: f64 = 6.0;
const OVERTONE_WEIGHT: f64 = 0.425;

// Plomp-Levelt curve as parameterized by Sethares
fn kernel(x: f64) -> f64 {
    (-A * x).exp() - (-B * x).exp()
}

/// Pairwise roughness on absolute frequency gaps, scaled by [`RAW_SCALE`].
///
/// Fewer than two partials have no pairs and sum to 0.
pub fn raw_roughness(partials: &[Partial]) -> f64 {
    let sum: f64 = partials
        .iter()
        .tuple_combinations()
        .map(|(p, q)| {
            let x = D_S * (q.frequency - p.frequency).abs();
            p.amplitude * q.amplitude * kernel(x)
        })
        .sum();
    sum * RAW_SCALE
}

/// Register-independent roughness weighted by the overtone coefficient `overtone`.
///
/// The sum is divided by the maximum roughness `0.0349 * C(N, 2) * 6^O` of N
/// partials, then multiplied by `0.425 * O`. Returns 0 for fewer than two partials.
pub fn normalized_roughness(partials: &[Partial], overtone: f64) -> f64 {
    let n = partials.len();
    if n < 2 {
        return 0.0;
    }

    let sum: f64 = partials
        .iter()
        .tuple_combinations()
        .map(|(p, q)| {
            let low = p.frequency.min(q.frequency);
            let high = p.frequency.max(q.frequency);
            let x = (high - low) / (D_S * low);
            p.amplitude * q.amplitude * kernel(x)
        })
        .sum();

    let pairs = (n * (n - 1)) as f64 / 2.0;
    let ceiling = PAIR_CEILING * pairs * OVERTONE_BASE.powf(overtone);
    sum / ceiling * OVERTONE_WEIGHT * overtone
}
