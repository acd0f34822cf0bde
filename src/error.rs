use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("MIDI note {0} is outside 0..=127")]
    InvalidMidi(i64),

    #[error("cannot read '{0}' as a note (expected a MIDI number or a name like C4, F#3, Db5)")]
    InvalidNoteName(String),

    #[error("note {note} is outside the keyboard range {low}..={high}")]
    NoteOutOfRange { note: u8, low: u8, high: u8 },

    #[error("unknown dynamics marking '{0}' (expected one of pp, p, mp, mf, f, ff)")]
    UnknownDynamics(String),

    #[error("unknown mode '{0}' (expected major or minor)")]
    UnknownMode(String),

    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("cannot finalize an empty chord")]
    EmptyChord,

    #[error("all {0} chords already entered")]
    GridFull(usize),

    #[error("overtone coefficient for '{instrument}' must be a finite value in [0, 1], got {value}")]
    InvalidOvertone { instrument: String, value: f64 },

    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },
}
