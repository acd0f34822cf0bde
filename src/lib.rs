//! Harmonic tension and dissonance scoring for short chord progressions.
//!
//! Every finalized chord gets four comparable scores, computed from its notes,
//! its dynamics, the key of the composition, the instrument's timbre and the
//! chord played before it:
//!
//! - **Sethares**: pairwise acoustic roughness of the chord's frequencies
//! - **TTP**: tonal tension against the key and the previous chord
//! - **RQA**: a recurrence ratio over the chord's frequencies
//! - **Holistic**: a blend of timbre-aware roughness, recurrence and TTP
//!
//! ```
//! use harmony_navigator::{Chord, Composition, Mode, Note, ScoringEngine};
//!
//! let engine = ScoringEngine::default();
//! let mut composition = Composition::new().with_key("C", Mode::Major);
//! let triad = ["C4", "E4", "G4"].iter().map(|n| n.parse::<Note>().unwrap());
//! composition.push(Chord::new(triad));
//!
//! let scores = engine.score_composition(&composition);
//! assert_eq!(scores[0].ttp.tonal_distance, 0.0);
//! ```

pub mod chroma;
pub mod composition;
pub mod config;
pub mod display;
pub mod display_term;
pub mod dissonance;
pub mod dynamics;
pub mod error;
pub mod instruments;
pub mod notes;
pub mod partial;
pub mod rqa;
pub mod scores;
pub mod session;
pub mod tiv;
pub mod tools;
pub mod ttp;

pub use chroma::{Chroma, Mode};
pub use composition::{Chord, Composition};
pub use config::Config;
pub use dynamics::{dynamics_amplitude, Dynamics};
pub use error::{Error, Result};
pub use instruments::InstrumentCatalog;
pub use notes::{frequency, Note, PitchClass};
pub use partial::Partial;
pub use scores::{holistic, ChordScores, ScoreSet, ScoringContext, ScoringEngine};
pub use session::{Command, Event, ScoredColumn, Session};
pub use tiv::{chroma_to_tiv, Tiv, TivTransform};
pub use ttp::TtpBreakdown;
