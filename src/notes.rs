use std::fmt;
use std::str::FromStr;

use enum_iterator::{all, Sequence};

use crate::error::{Error, Result};

// The twelve pitch classes, spelled with sharps
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Sequence)]
pub enum PitchClass {
    C, CSharp, D, DSharp, E, F, FSharp, G, GSharp, A, ASharp, B,
}

pub const PITCH_CLASS_COUNT: usize = PitchClass::B as usize + 1;
pub const BASE_NOTE: u8 = 69;
pub const BASE_FREQUENCY: f64 = 440f64;

const SHARP_NAMES: [&str; PITCH_CLASS_COUNT] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

impl PitchClass {
    pub fn iter() -> impl Iterator<Item = PitchClass> {
        all::<PitchClass>()
    }

    pub fn from_index(index: usize) -> PitchClass {
        // Sequence order is declaration order, so this never misses
        PitchClass::iter()
            .nth(index % PITCH_CLASS_COUNT)
            .unwrap_or(PitchClass::C)
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        SHARP_NAMES[self.index()]
    }

    pub fn from_name(name: &str) -> Option<PitchClass> {
        PitchClass::iter().find(|pc| pc.name() == name)
    }

    /// Resolves a key name to its tonic.
    ///
    /// Only the twelve sharp spellings are recognized. Anything else, including
    /// an unset key, silently resolves to C.
    pub fn from_key_name(name: Option<&str>) -> PitchClass {
        name.and_then(PitchClass::from_name).unwrap_or(PitchClass::C)
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A MIDI note number, 0..=127. Middle C (C4) is 60.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Note(u8);

impl Note {
    pub const MAX: u8 = 127;

    pub fn new(midi: u8) -> Result<Note> {
        if midi > Note::MAX {
            return Err(Error::InvalidMidi(midi as i64));
        }
        Ok(Note(midi))
    }

    pub fn midi(self) -> u8 {
        self.0
    }

    pub fn pitch_class(self) -> PitchClass {
        PitchClass::from_index(self.0 as usize)
    }

    pub fn octave(self) -> i32 {
        self.0 as i32 / 12 - 1
    }

    // Twelve-tone equal temperament, A4 = 440 Hz
    pub fn frequency(self) -> f64 {
        frequency(self.0)
    }
}

pub fn frequency(midi: u8) -> f64 {
    let half_tones = midi as i32 - BASE_NOTE as i32;
    BASE_FREQUENCY * 2f64.powf(half_tones as f64 / 12f64)
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.pitch_class(), self.octave())
    }
}

impl TryFrom<i64> for Note {
    type Error = Error;

    fn try_from(midi: i64) -> Result<Note> {
        if !(0..=Note::MAX as i64).contains(&midi) {
            return Err(Error::InvalidMidi(midi));
        }
        Ok(Note(midi as u8))
    }
}

// Accepts "60", "C4", "F#3", "Db5", "a#2"
impl FromStr for Note {
    type Err = Error;

    fn from_str(s: &str) -> Result<Note> {
        let s = s.trim();
        if let Ok(midi) = s.parse::<i64>() {
            return Note::try_from(midi);
        }

        let invalid = || Error::InvalidNoteName(s.to_owned());
        let mut chars = s.chars();
        let letter = chars.next().ok_or_else(invalid)?.to_ascii_uppercase();
        let natural: i64 = match letter {
            'C' => 0,
            'D' => 2,
            'E' => 4,
            'F' => 5,
            'G' => 7,
            'A' => 9,
            'B' => 11,
            _ => return Err(invalid()),
        };
        let rest = chars.as_str();
        let (accidental, octave) = match rest.chars().next() {
            Some('#') => (1, &rest[1..]),
            Some('b') => (-1, &rest[1..]),
            _ => (0, rest),
        };
        // Octaves outside i8 can never land on a MIDI note
        let octave: i8 = octave.parse().map_err(|_| invalid())?;
        Note::try_from((i64::from(octave) + 1) * 12 + natural + accidental)
    }
}
