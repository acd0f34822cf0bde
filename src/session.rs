//! The chord-building session.
//!
//! A session owns the composition being written and the working chord. Notes
//! are added one at a time, `done` finalizes the working chord, scores it
//! against the chord before it, and appends a column to the score grid.

use std::str::FromStr;

use itertools::Itertools;
use tracing::{debug, info, warn};

use crate::chroma::Mode;
use crate::composition::{Chord, Composition};
use crate::dynamics::Dynamics;
use crate::error::{Error, Result};
use crate::notes::{Note, PitchClass};
use crate::scores::{ChordScores, ScoringEngine};

// Playable range of the keyboard, D3 to C8
pub const KEYBOARD_LOW: u8 = 50;
pub const KEYBOARD_HIGH: u8 = 108;
// Chord columns of the score grid
pub const GRID_COLUMNS: usize = 11;

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Key { name: String, mode: Mode },
    Instrument(String),
    Note(Note),
    Undo,
    Done(Option<Dynamics>),
    Clear,
    Quit,
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(s: &str) -> Result<Command> {
        let line = s.trim();
        let unknown = || Error::UnknownCommand(line.to_owned());
        let mut words = line.split_whitespace();
        let first = words.next().ok_or_else(unknown)?;

        match first.to_ascii_lowercase().as_str() {
            "key" => {
                let name = words.next().ok_or_else(unknown)?.to_owned();
                let mode = match words.next() {
                    Some(mode) => mode.parse()?,
                    None => Mode::Major,
                };
                Ok(Command::Key { name, mode })
            }
            "instrument" => {
                let name = words.join(" ");
                if name.is_empty() {
                    return Err(unknown());
                }
                Ok(Command::Instrument(name))
            }
            "undo" => Ok(Command::Undo),
            "done" => Ok(Command::Done(words.next().map(str::parse::<Dynamics>).transpose()?)),
            "clear" => Ok(Command::Clear),
            "quit" | "exit" => Ok(Command::Quit),
            _ => match line.parse::<Note>() {
                Ok(note) => Ok(Command::Note(note)),
                Err(Error::InvalidMidi(midi)) => Err(Error::InvalidMidi(midi)),
                Err(_) => Err(unknown()),
            },
        }
    }
}

/// Commands that enter one whole chord, e.g. `60,64,67` or `C4 E4 G4@f`.
pub fn chord_commands(spec: &str) -> Result<Vec<Command>> {
    let (notes, dynamics) = match spec.split_once('@') {
        Some((notes, dynamics)) => (notes, Some(dynamics.parse::<Dynamics>()?)),
        None => (spec, None),
    };
    let mut commands: Vec<Command> = notes
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| token.parse().map(Command::Note))
        .collect::<Result<_>>()?;
    commands.push(Command::Done(dynamics));
    Ok(commands)
}

/// One finalized chord and its scores.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoredColumn {
    pub index: usize,
    pub notes: Vec<Note>,
    pub dynamics: Dynamics,
    pub scores: ChordScores,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    KeySet { name: String, mode: Mode },
    InstrumentSet { name: String, overtone: f64 },
    NoteAdded(Note),
    DuplicateNote(Note),
    NoteRemoved(Option<Note>),
    ChordScored(ScoredColumn),
    Cleared,
    Quit,
}

pub struct Session {
    engine: ScoringEngine,
    composition: Composition,
    working: Vec<Note>,
    default_dynamics: Dynamics,
    columns: Vec<ScoredColumn>,
}

impl Session {
    pub fn new(
        engine: ScoringEngine,
        composition: Composition,
        default_dynamics: Dynamics,
    ) -> Session {
        Session {
            engine,
            composition,
            working: Vec::new(),
            default_dynamics,
            columns: Vec::new(),
        }
    }

    pub fn composition(&self) -> &Composition {
        &self.composition
    }

    pub fn working(&self) -> &[Note] {
        &self.working
    }

    pub fn columns(&self) -> &[ScoredColumn] {
        &self.columns
    }

    /// Parses and applies one input line. Blank lines and `#` comments yield `None`.
    pub fn run_line(&mut self, line: &str) -> Result<Option<Event>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        self.apply(line.parse()?).map(Some)
    }

    pub fn apply(&mut self, command: Command) -> Result<Event> {
        match command {
            Command::Key { name, mode } => {
                if PitchClass::from_name(&name).is_none() {
                    debug!(key = %name, "unrecognized key name, tonic falls back to C");
                }
                self.composition.set_key(name.clone(), mode);
                info!(key = %name, %mode, "key set");
                Ok(Event::KeySet { name, mode })
            }
            Command::Instrument(name) => {
                self.composition.set_instrument(name.clone());
                let overtone = self.engine.catalog().overtone(&name);
                info!(instrument = %name, overtone, "instrument set");
                Ok(Event::InstrumentSet { name, overtone })
            }
            Command::Note(note) => self.add_note(note),
            Command::Undo => {
                let removed = self.working.pop();
                Ok(Event::NoteRemoved(removed))
            }
            Command::Done(dynamics) => self.finalize(dynamics.unwrap_or(self.default_dynamics)),
            Command::Clear => {
                self.working.clear();
                self.composition.clear();
                self.columns.clear();
                info!("composition cleared");
                Ok(Event::Cleared)
            }
            Command::Quit => Ok(Event::Quit),
        }
    }

    fn add_note(&mut self, note: Note) -> Result<Event> {
        if !(KEYBOARD_LOW..=KEYBOARD_HIGH).contains(&note.midi()) {
            return Err(Error::NoteOutOfRange {
                note: note.midi(),
                low: KEYBOARD_LOW,
                high: KEYBOARD_HIGH,
            });
        }
        if self.working.contains(&note) {
            warn!(%note, "note already in chord");
            return Ok(Event::DuplicateNote(note));
        }
        self.working.push(note);
        Ok(Event::NoteAdded(note))
    }

    fn finalize(&mut self, dynamics: Dynamics) -> Result<Event> {
        if self.working.is_empty() {
            return Err(Error::EmptyChord);
        }
        if self.composition.len() >= GRID_COLUMNS {
            return Err(Error::GridFull(GRID_COLUMNS));
        }

        let chord = Chord::new(self.working.drain(..))
            .with_dynamics(dynamics)
            .with_instrument(self.composition.instrument());
        let context = self.engine.context(&self.composition);
        let scores = self
            .engine
            .score_chord(&context, &chord, self.composition.last());

        let column = ScoredColumn {
            index: self.composition.len(),
            notes: chord.notes().to_vec(),
            dynamics,
            scores,
        };
        info!(column = column.index + 1, holistic = scores.scores.holistic, "chord scored");
        self.composition.push(chord);
        self.columns.push(column.clone());
        Ok(Event::ChordScored(column))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn session() -> Session {
        Session::new(ScoringEngine::default(), Composition::new(), Dynamics::Mf)
    }

    fn note(midi: u8) -> Note {
        Note::new(midi).unwrap()
    }

    fn scored(event: Event) -> ScoredColumn {
        match event {
            Event::ChordScored(column) => column,
            other => panic!("expected a scored chord, got {:?}", other),
        }
    }

    #[test]
    fn parses_commands() {
        assert_eq!(
            "key F# minor".parse::<Command>().unwrap(),
            Command::Key { name: "F#".to_owned(), mode: Mode::Minor }
        );
        assert_eq!(
            "key G".parse::<Command>().unwrap(),
            Command::Key { name: "G".to_owned(), mode: Mode::Major }
        );
        assert_eq!(
            "instrument  French   Horn".parse::<Command>().unwrap(),
            Command::Instrument("French Horn".to_owned())
        );
        assert_eq!("C4".parse::<Command>().unwrap(), Command::Note(note(60)));
        assert_eq!("61".parse::<Command>().unwrap(), Command::Note(note(61)));
        assert_eq!("done".parse::<Command>().unwrap(), Command::Done(None));
        assert_eq!("done ff".parse::<Command>().unwrap(), Command::Done(Some(Dynamics::Ff)));
        assert_eq!("UNDO".parse::<Command>().unwrap(), Command::Undo);
        assert_eq!("exit".parse::<Command>().unwrap(), Command::Quit);
    }

    #[test]
    fn rejects_bad_commands() {
        assert!(matches!("dance".parse::<Command>(), Err(Error::UnknownCommand(_))));
        assert!(matches!("key".parse::<Command>(), Err(Error::UnknownCommand(_))));
        assert!(matches!("instrument".parse::<Command>(), Err(Error::UnknownCommand(_))));
        assert!(matches!("key C lydian".parse::<Command>(), Err(Error::UnknownMode(_))));
        assert!(matches!("done sfz".parse::<Command>(), Err(Error::UnknownDynamics(_))));
        assert!(matches!("300".parse::<Command>(), Err(Error::InvalidMidi(300))));
    }

    #[test]
    fn chord_specs() {
        assert_eq!(
            chord_commands("60,64, 67@f").unwrap(),
            vec![
                Command::Note(note(60)),
                Command::Note(note(64)),
                Command::Note(note(67)),
                Command::Done(Some(Dynamics::F)),
            ]
        );
        assert_eq!(
            chord_commands("D4 F#4").unwrap(),
            vec![Command::Note(note(62)), Command::Note(note(66)), Command::Done(None)]
        );
        assert!(chord_commands("60,x").is_err());
        assert!(chord_commands("60@loud").is_err());
    }

    #[test]
    fn builds_and_scores_chords() {
        let mut session = session();
        session.run_line("key C major").unwrap();
        for line in ["C4", "E4", "G4"] {
            session.run_line(line).unwrap();
        }
        let first = scored(session.run_line("done").unwrap().unwrap());
        assert_eq!(first.index, 0);
        assert_eq!(first.dynamics, Dynamics::Mf);
        assert_eq!(first.scores.ttp.tonal_distance, 0.0);
        assert!(session.working().is_empty());

        for line in ["C4", "F4", "A4"] {
            session.run_line(line).unwrap();
        }
        let second = scored(session.run_line("done p").unwrap().unwrap());
        assert_eq!(second.index, 1);
        assert_eq!(second.dynamics, Dynamics::P);
        assert!((second.scores.ttp.voice_leading - 1.0).abs() < 1e-12);
        assert_eq!(session.columns().len(), 2);
        assert_eq!(session.composition().len(), 2);
    }

    #[test]
    fn duplicates_and_undo() {
        let mut session = session();
        assert_eq!(session.apply(Command::Note(note(60))).unwrap(), Event::NoteAdded(note(60)));
        assert_eq!(session.apply(Command::Note(note(60))).unwrap(), Event::DuplicateNote(note(60)));
        // Same pitch class in another octave is a different note
        assert_eq!(session.apply(Command::Note(note(72))).unwrap(), Event::NoteAdded(note(72)));
        assert_eq!(session.apply(Command::Undo).unwrap(), Event::NoteRemoved(Some(note(72))));
        assert_eq!(session.working(), &[note(60)]);
        session.apply(Command::Undo).unwrap();
        assert_eq!(session.apply(Command::Undo).unwrap(), Event::NoteRemoved(None));
    }

    #[test]
    fn keyboard_range_is_enforced() {
        let mut session = session();
        assert!(matches!(
            session.apply(Command::Note(note(49))),
            Err(Error::NoteOutOfRange { note: 49, .. })
        ));
        assert!(matches!(
            session.apply(Command::Note(note(109))),
            Err(Error::NoteOutOfRange { note: 109, .. })
        ));
        assert!(session.apply(Command::Note(note(50))).is_ok());
        assert!(session.apply(Command::Note(note(108))).is_ok());
    }

    #[test]
    fn empty_chord_cannot_be_finalized() {
        let mut session = session();
        assert!(matches!(session.apply(Command::Done(None)), Err(Error::EmptyChord)));
        assert!(session.columns().is_empty());
    }

    #[test]
    fn grid_holds_eleven_chords() {
        let mut session = session();
        for i in 0..GRID_COLUMNS {
            session.apply(Command::Note(note(60 + i as u8))).unwrap();
            session.apply(Command::Done(None)).unwrap();
        }
        session.apply(Command::Note(note(80))).unwrap();
        assert!(matches!(session.apply(Command::Done(None)), Err(Error::GridFull(11))));
        // The working chord survives the rejection
        assert_eq!(session.working(), &[note(80)]);
        assert_eq!(session.columns().len(), GRID_COLUMNS);
    }

    #[test]
    fn clear_starts_over() {
        let mut session = session();
        session.run_line("instrument Flute").unwrap();
        session.run_line("60").unwrap();
        session.run_line("done").unwrap();
        session.run_line("64").unwrap();
        assert_eq!(session.run_line("clear").unwrap(), Some(Event::Cleared));
        assert!(session.columns().is_empty());
        assert!(session.working().is_empty());
        assert!(session.composition().is_empty());
        assert_eq!(session.composition().instrument(), "Flute");

        session.run_line("67").unwrap();
        let column = scored(session.run_line("done").unwrap().unwrap());
        assert_eq!(column.index, 0);
        assert_eq!(column.scores.ttp.voice_leading, 0.0);
    }

    #[test]
    fn instrument_changes_overtone() {
        let mut session = session();
        assert_eq!(
            session.run_line("instrument Flute").unwrap(),
            Some(Event::InstrumentSet { name: "Flute".to_owned(), overtone: 0.3 })
        );
        assert_eq!(
            session.run_line("instrument Kazoo").unwrap(),
            Some(Event::InstrumentSet { name: "Kazoo".to_owned(), overtone: 0.8 })
        );
    }

    #[test]
    fn comments_and_blanks_are_skipped() {
        let mut session = session();
        assert_eq!(session.run_line("   ").unwrap(), None);
        assert_eq!(session.run_line("# a comment").unwrap(), None);
        assert_eq!(session.run_line("quit").unwrap(), Some(Event::Quit));
    }

    #[test]
    fn malformed_note_line_is_an_error() {
        let mut session = session();
        assert!(matches!(
            session.run_line("G800000000000000000"),
            Err(Error::UnknownCommand(_))
        ));
        assert!(session.working().is_empty());
        session.run_line("G4").unwrap();
        assert_eq!(session.working(), &[note(67)]);
    }
}
