use tracing::debug;

use crate::chroma::Chroma;
use crate::composition::{Chord, Composition};
use crate::dissonance::{normalized_roughness, raw_roughness};
use crate::instruments::InstrumentCatalog;
use crate::rqa::rqa;
use crate::tiv::TivTransform;
use crate::ttp::{TtpBreakdown, TtpScorer};

const TIMBRE_WEIGHT: f64 = 0.425;
const TTP_WEIGHT: f64 = 0.4;

/// The four scores shown for one chord column.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScoreSet {
    pub roughness: f64,
    pub ttp: f64,
    pub rqa: f64,
    pub holistic: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ChordScores {
    pub scores: ScoreSet,
    pub normalized_roughness: f64,
    pub ttp: TtpBreakdown,
}

/// Everything a chord is scored against that does not change between chords.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoringContext {
    pub key_chroma: Chroma,
    pub overtone: f64,
}

/// Blends timbre-aware roughness, recurrence-based stability and tonal tension.
///
/// Low recurrence together with a low overtone coefficient adds harshness on
/// top of the roughness, and the TTP score contributes at a fixed weight.
pub fn holistic(normalized_roughness: f64, rqa_ratio: f64, overtone: f64, ttp_score: f64) -> f64 {
    normalized_roughness
        + (1.0 - rqa_ratio) * (1.0 - overtone) * TIMBRE_WEIGHT
        + ttp_score * TTP_WEIGHT
}

#[derive(Clone, Debug, Default)]
pub struct ScoringEngine {
    catalog: InstrumentCatalog,
    ttp: TtpScorer,
}

impl ScoringEngine {
    pub fn new(catalog: InstrumentCatalog) -> ScoringEngine {
        ScoringEngine {
            catalog,
            ttp: TtpScorer::new(TivTransform::new()),
        }
    }

    pub fn catalog(&self) -> &InstrumentCatalog {
        &self.catalog
    }

    pub fn context(&self, composition: &Composition) -> ScoringContext {
        let instrument = composition.instrument();
        if !self.catalog.contains(instrument) {
            debug!(instrument, "instrument not in catalog, using default overtone");
        }
        ScoringContext {
            key_chroma: composition.key_chroma(),
            overtone: self.catalog.overtone(instrument),
        }
    }

    /// Scores `chord` on its own and against the chord played before it.
    pub fn score_chord(
        &self,
        context: &ScoringContext,
        chord: &Chord,
        previous: Option<&Chord>,
    ) -> ChordScores {
        let partials = chord.partials();
        let roughness = raw_roughness(&partials);
        let normalized = normalized_roughness(&partials, context.overtone);
        let ratio = rqa(&partials);
        let ttp = self
            .ttp
            .breakdown(chord.notes(), previous.map(Chord::notes), &context.key_chroma);
        let ttp_score = ttp.score();

        let scores = ScoreSet {
            roughness,
            ttp: ttp_score,
            rqa: ratio,
            holistic: holistic(normalized, ratio, context.overtone, ttp_score),
        };
        debug!(
            notes = ?chord.notes(),
            dynamics = %chord.dynamics(),
            ?scores,
            normalized,
            "scored chord"
        );
        ChordScores {
            scores,
            normalized_roughness: normalized,
            ttp,
        }
    }

    /// Scores every chord of `composition` in order.
    pub fn score_composition(&self, composition: &Composition) -> Vec<ChordScores> {
        let context = self.context(composition);
        composition
            .with_previous()
            .map(|(chord, previous)| self.score_chord(&context, chord, previous))
            .collect()
    }
}
