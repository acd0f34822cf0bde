use itertools::{Itertools, MinMaxResult};
use noisy_float::types::R64;
use num_traits::cast::{NumCast, ToPrimitive};
use std::ops::Range;

pub trait Mappable<F, T> {
    fn map_interval_int(self, from: Range<F>, into: Range<T>, clamped: bool, inv: bool) -> Option<T>;
    fn map_interval(self, from: Range<F>, into: Range<T>, clamped: bool) -> Option<T>;
}

impl<F, T> Mappable<F, T> for F
where
    F: ToPrimitive,
    T: ToPrimitive + NumCast,
{
    fn map_interval_int(self, from: Range<F>, into: Range<T>, clamped: bool, inv: bool) -> Option<T> {
        let from: Range<f64> = from.start.to_f64()?..from.end.to_f64()?;
        let into: Range<f64> = into.start.to_f64()?..into.end.to_f64()?;
        let f: f64 = self.to_f64()?;

        let amplitude = (from.end - from.start) + f64::MIN_POSITIVE;
        let ratio = (f - from.start) / amplitude;
        let mapped = ratio * (into.end - into.start);

        let mapped = if inv {
            into.end - mapped
        } else {
            into.start + mapped
        };
        let mapped = if clamped {
            let (low, high) = if into.start <= into.end {
                (into.start, into.end)
            } else {
                (into.end, into.start)
            };
            mapped.max(low).min(high)
        } else {
            mapped
        };
        T::from(mapped)
    }
    fn map_interval(self, from: Range<F>, into: Range<T>, clamped: bool) -> Option<T> {
        self.map_interval_int(from, into, clamped, false)
    }
}

/// Rescales a row of scores into `[0, 1]`.
///
/// Non-finite entries map to `None`. A row with no spread maps to 0.
pub fn normalize(data: &[f64]) -> Vec<Option<f32>> {
    let finite = data.iter().filter_map(|&f| R64::try_new(f));
    let (min, max) = match finite.minmax() {
        MinMaxResult::NoElements => return vec![None; data.len()],
        MinMaxResult::OneElement(only) => (only.raw(), only.raw()),
        MinMaxResult::MinMax(min, max) => (min.raw(), max.raw()),
    };

    data.iter()
        .map(|&f| R64::try_new(f).and_then(|f| f.raw().map_interval(min..max, 0f32..1f32, true)))
        .collect_vec()
}
