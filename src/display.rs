use itertools::Itertools;
use serde::Deserialize;

use crate::notes::{Note, PITCH_CLASS_COUNT};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Notation {
    #[default]
    English,
    Romance,
}

const NOTE_NAMES_ENGLISH: [&str; PITCH_CLASS_COUNT] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];
const NOTE_NAMES_ROMANCE: [&str; PITCH_CLASS_COUNT] = [
    "Do", "Do#", "Ré", "Ré#", "Mi", "Fa", "Fa#", "Sol", "Sol#", "La", "La#", "Si",
];

impl Notation {
    pub fn get_names(&self) -> [&'static str; PITCH_CLASS_COUNT] {
        match &self {
            Notation::English => NOTE_NAMES_ENGLISH,
            Notation::Romance => NOTE_NAMES_ROMANCE,
        }
    }

    pub fn note_name(&self, note: Note) -> String {
        format!("{}{}", self.get_names()[note.pitch_class().index()], note.octave())
    }

    // Lowest note first, as on the staff
    pub fn chord_label(&self, notes: &[Note]) -> String {
        notes
            .iter()
            .sorted()
            .map(|&note| self.note_name(note))
            .join(" ")
    }
}

#[derive(Clone, Copy, Debug)]
pub struct DisplayOptions {
    pub notation: Notation,
    pub color: bool,
    pub breakdown: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        DisplayOptions {
            notation: Notation::English,
            color: true,
            breakdown: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notes(midi: &[u8]) -> Vec<Note> {
        midi.iter().map(|&m| Note::new(m).unwrap()).collect()
    }

    #[test]
    fn names_in_both_notations() {
        let a4 = Note::new(69).unwrap();
        assert_eq!(Notation::English.note_name(a4), "A4");
        assert_eq!(Notation::Romance.note_name(a4), "La4");
    }

    #[test]
    fn chord_labels_are_sorted() {
        let chord = notes(&[67, 60, 64]);
        assert_eq!(Notation::English.chord_label(&chord), "C4 E4 G4");
        assert_eq!(Notation::Romance.chord_label(&chord), "Do4 Mi4 Sol4");
    }
}
