/*

Instruments.rs maps an instrument name to its overtone coefficient O in [0, 1].

O is a hand-tuned estimate of how rich the timbre is: a flute is close to a
pure tone, a cymbal is nothing but partials. The coefficient both steepens the
normalization ceiling of the scale-invariant roughness and weights it.

The catalog is built once and never mutated afterwards; the scoring engine
receives it by value instead of reaching for a global.

*/

use std::collections::BTreeMap;

use noisy_float::types::R64;

use crate::error::{Error, Result};

// Coefficient used for any name missing from the catalog
pub const DEFAULT_OVERTONE: f64 = 0.8;
pub const DEFAULT_INSTRUMENT: &str = "Piano";

const BUILTIN: [(&str, f64); 21] = [
    ("Bassoon", 0.7),
    ("Cello", 0.7),
    ("Clarinet", 0.6),
    ("Cymbals", 1.0),
    ("Double Bass", 0.6),
    ("Flute", 0.3),
    ("French Horn", 0.8),
    ("Gongs", 1.0),
    ("Harpsichord", 0.9),
    ("Harp", 0.7),
    ("Oboe", 0.8),
    ("Organ (Principal Stops)", 0.5),
    ("Organ (Reed Stops)", 0.9),
    ("Piano", 0.8),
    ("Snare", 0.7),
    ("Saxophone", 0.8),
    ("Timpani", 0.6),
    ("Trumpet", 0.8),
    ("Viola", 0.7),
    ("Violin", 0.8),
    ("Voice", 0.7),
];

#[derive(Clone, Debug)]
pub struct InstrumentCatalog {
    overtones: BTreeMap<String, R64>,
}

impl Default for InstrumentCatalog {
    fn default() -> Self {
        let overtones = BUILTIN
            .iter()
            .map(|&(name, o)| (name.to_owned(), R64::new(o)))
            .collect();
        InstrumentCatalog { overtones }
    }
}

impl InstrumentCatalog {
    /// Built-in catalog extended (or overridden) by `extra`.
    pub fn with_overrides<'a, I>(extra: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let mut catalog = InstrumentCatalog::default();
        for (name, value) in extra {
            let coefficient = R64::try_new(value)
                .filter(|o| (0.0..=1.0).contains(&o.raw()))
                .ok_or_else(|| Error::InvalidOvertone {
                    instrument: name.to_owned(),
                    value,
                })?;
            catalog.overtones.insert(name.to_owned(), coefficient);
        }
        Ok(catalog)
    }

    /// Exact, case-sensitive lookup with a silent fallback to [`DEFAULT_OVERTONE`].
    pub fn overtone(&self, instrument: &str) -> f64 {
        self.overtones
            .get(instrument)
            .map_or(DEFAULT_OVERTONE, |o| o.raw())
    }

    pub fn contains(&self, instrument: &str) -> bool {
        self.overtones.contains_key(instrument)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.overtones.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.overtones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overtones.is_empty()
    }
}
