use itertools::Itertools;

use crate::chroma::{Chroma, Mode};
use crate::dynamics::Dynamics;
use crate::instruments::DEFAULT_INSTRUMENT;
use crate::notes::Note;
use crate::partial::{partials, Partial};

/// A finalized chord. Notes keep their insertion order and appear once.
#[derive(Clone, Debug, PartialEq)]
pub struct Chord {
    notes: Vec<Note>,
    instrument: String,
    dynamics: Dynamics,
}

impl Chord {
    pub fn new<I>(notes: I) -> Chord
    where
        I: IntoIterator<Item = Note>,
    {
        Chord {
            notes: notes.into_iter().unique().collect(),
            instrument: DEFAULT_INSTRUMENT.to_owned(),
            dynamics: Dynamics::default(),
        }
    }

    pub fn with_dynamics(mut self, dynamics: Dynamics) -> Chord {
        self.dynamics = dynamics;
        self
    }

    pub fn with_instrument(mut self, instrument: impl Into<String>) -> Chord {
        self.instrument = instrument.into();
        self
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn instrument(&self) -> &str {
        &self.instrument
    }

    pub fn dynamics(&self) -> Dynamics {
        self.dynamics
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn chroma(&self) -> Chroma {
        Chroma::from_notes(self.notes.iter().copied())
    }

    /// Partials ordered from lowest to highest note, all at the chord's dynamics.
    pub fn partials(&self) -> Vec<Partial> {
        partials(self.notes.iter().copied().sorted(), self.dynamics)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Composition {
    key: Option<String>,
    mode: Mode,
    instrument: String,
    chords: Vec<Chord>,
}

impl Default for Composition {
    fn default() -> Self {
        Composition {
            key: None,
            mode: Mode::Major,
            instrument: DEFAULT_INSTRUMENT.to_owned(),
            chords: Vec::new(),
        }
    }
}

impl Composition {
    pub fn new() -> Composition {
        Composition::default()
    }

    pub fn with_key(mut self, key: impl Into<String>, mode: Mode) -> Composition {
        self.set_key(key, mode);
        self
    }

    pub fn with_instrument(mut self, instrument: impl Into<String>) -> Composition {
        self.set_instrument(instrument);
        self
    }

    pub fn set_key(&mut self, key: impl Into<String>, mode: Mode) {
        self.key = Some(key.into());
        self.mode = mode;
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub fn set_instrument(&mut self, instrument: impl Into<String>) {
        self.instrument = instrument.into();
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn instrument(&self) -> &str {
        &self.instrument
    }

    pub fn key_chroma(&self) -> Chroma {
        Chroma::key(self.key(), self.mode)
    }

    pub fn push(&mut self, chord: Chord) {
        self.chords.push(chord);
    }

    pub fn chords(&self) -> &[Chord] {
        &self.chords
    }

    pub fn last(&self) -> Option<&Chord> {
        self.chords.last()
    }

    /// The chord before `index`, `None` for the first one.
    pub fn previous(&self, index: usize) -> Option<&Chord> {
        index.checked_sub(1).and_then(|i| self.chords.get(i))
    }

    /// Each chord paired with the chord right before it.
    pub fn with_previous(&self) -> impl Iterator<Item = (&Chord, Option<&Chord>)> {
        self.chords
            .iter()
            .enumerate()
            .map(move |(i, chord)| (chord, self.previous(i)))
    }

    pub fn len(&self) -> usize {
        self.chords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chords.is_empty()
    }

    /// Drops every chord; key, mode and instrument stay.
    pub fn clear(&mut self) {
        self.chords.clear();
    }
}
