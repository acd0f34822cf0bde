use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::notes::{Note, PitchClass, PITCH_CLASS_COUNT};

const MAJOR_STEPS: [usize; 7] = [0, 2, 4, 5, 7, 9, 11];
const MINOR_STEPS: [usize; 7] = [0, 2, 3, 5, 7, 8, 10];

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Major,
    Minor,
}

impl Mode {
    pub fn from_is_major(is_major: bool) -> Mode {
        if is_major {
            Mode::Major
        } else {
            Mode::Minor
        }
    }

    pub fn is_major(self) -> bool {
        self == Mode::Major
    }

    fn steps(self) -> &'static [usize; 7] {
        match self {
            Mode::Major => &MAJOR_STEPS,
            Mode::Minor => &MINOR_STEPS,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Major => f.write_str("Major"),
            Mode::Minor => f.write_str("Minor"),
        }
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Mode> {
        match s.trim().to_ascii_lowercase().as_str() {
            "major" | "maj" => Ok(Mode::Major),
            "minor" | "min" => Ok(Mode::Minor),
            _ => Err(Error::UnknownMode(s.to_owned())),
        }
    }
}

/// Binary pitch-class profile: which of the twelve pitch classes are present.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Chroma([bool; PITCH_CLASS_COUNT]);

impl Chroma {
    pub fn new(bins: [bool; PITCH_CLASS_COUNT]) -> Chroma {
        Chroma(bins)
    }

    /// Folds notes onto their pitch classes. Doublings and octave spread collapse.
    pub fn from_notes<I>(notes: I) -> Chroma
    where
        I: IntoIterator<Item = Note>,
    {
        let mut chroma = Chroma::default();
        for note in notes {
            chroma.insert(note.pitch_class());
        }
        chroma
    }

    /// Diatonic scale of `key` in `mode`. Unknown or missing key names mean C.
    pub fn key(key: Option<&str>, mode: Mode) -> Chroma {
        Chroma::scale(PitchClass::from_key_name(key), mode)
    }

    pub fn scale(tonic: PitchClass, mode: Mode) -> Chroma {
        let mut chroma = Chroma::default();
        for step in mode.steps() {
            chroma.0[(tonic.index() + step) % PITCH_CLASS_COUNT] = true;
        }
        chroma
    }

    pub fn insert(&mut self, pitch_class: PitchClass) {
        self.0[pitch_class.index()] = true;
    }

    pub fn contains(&self, pitch_class: PitchClass) -> bool {
        self.0[pitch_class.index()]
    }

    pub fn count(&self) -> usize {
        self.0.iter().filter(|&&bin| bin).count()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    pub fn bins(&self) -> &[bool; PITCH_CLASS_COUNT] {
        &self.0
    }
}
