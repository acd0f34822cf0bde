/*

Ttp.rs scores the Tonal Tension Profile of a chord.

Four terms are blended with fixed weights:
 - tonal distance: how far the chord's TIV moved from the previous chord's
 - dissonance proxy: total magnitude of the chord's own TIV
 - voice leading: mean semitone motion from the previous chord
 - hierarchical term: a constant baseline

The weights add up to 1.05, not 1.0. They are kept as calibrated.

The angle between the chord and the key is computed and reported, but it does
not enter the score.

*/

use crate::chroma::Chroma;
use crate::notes::Note;
use crate::tiv::{Tiv, TivTransform};

pub const W_TONAL_DISTANCE: f64 = 0.4;
pub const W_DISSONANCE: f64 = 0.425;
pub const W_VOICE_LEADING: f64 = 0.15;
pub const W_HIERARCHY: f64 = 0.075;

const HIERARCHICAL_TERM: f64 = 1.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TtpBreakdown {
    pub tonal_distance: f64,
    /// Radians between the chord and the key. `None` when the chord is silent.
    pub key_angle: Option<f64>,
    pub dissonance_proxy: f64,
    pub voice_leading: f64,
    pub hierarchical: f64,
}

impl TtpBreakdown {
    pub fn score(&self) -> f64 {
        W_TONAL_DISTANCE * self.tonal_distance
            + W_DISSONANCE * self.dissonance_proxy
            + W_VOICE_LEADING * self.voice_leading
            + W_HIERARCHY * self.hierarchical
    }
}

/// Mean absolute semitone motion between voices paired by position.
///
/// Only the first `min(len)` voices are paired, in the order given. This is not
/// an optimal assignment: reordering either chord changes the cost. Returns 0
/// when either chord is empty.
pub fn voice_leading(previous: &[Note], current: &[Note]) -> f64 {
    let len = previous.len().min(current.len());
    if len == 0 {
        return 0.0;
    }
    let total: u32 = previous
        .iter()
        .zip(current.iter())
        .map(|(p, c)| (c.midi() as i32 - p.midi() as i32).unsigned_abs())
        .sum();
    total as f64 / len as f64
}

#[derive(Clone, Debug, Default)]
pub struct TtpScorer {
    transform: TivTransform,
}

impl TtpScorer {
    pub fn new(transform: TivTransform) -> TtpScorer {
        TtpScorer { transform }
    }

    pub fn tiv(&self, chroma: &Chroma) -> Tiv {
        self.transform.transform(chroma)
    }

    /// Scores `current` against the chord before it (if any) and the key profile.
    pub fn breakdown(
        &self,
        current: &[Note],
        previous: Option<&[Note]>,
        key: &Chroma,
    ) -> TtpBreakdown {
        let tiv_current = self.tiv(&Chroma::from_notes(current.iter().copied()));
        let tiv_key = self.tiv(key);

        let (tonal_distance, motion) = match previous {
            Some(previous) => {
                let tiv_previous = self.tiv(&Chroma::from_notes(previous.iter().copied()));
                (
                    tiv_current.euclidean_distance(&tiv_previous),
                    voice_leading(previous, current),
                )
            }
            None => (0.0, 0.0),
        };

        TtpBreakdown {
            tonal_distance,
            key_angle: tiv_current.angle_between(&tiv_key),
            dissonance_proxy: tiv_current.sum(),
            voice_leading: motion,
            hierarchical: HIERARCHICAL_TERM,
        }
    }

    pub fn score(&self, current: &[Note], previous: Option<&[Note]>, key: &Chroma) -> f64 {
        self.breakdown(current, previous, key).score()
    }
}
