use crate::dynamics::Dynamics;
use crate::notes::Note;

/// A single sounding frequency and its amplitude.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Partial {
    pub frequency: f64,
    pub amplitude: f64,
}

impl Partial {
    pub fn new(frequency: f64, amplitude: f64) -> Partial {
        Partial { frequency, amplitude }
    }
}

// Every note of a chord sounds at the same dynamics
pub fn partials<I>(notes: I, dynamics: Dynamics) -> Vec<Partial>
where
    I: IntoIterator<Item = Note>,
{
    let amplitude = dynamics.amplitude();
    notes
        .into_iter()
        .map(|note| Partial::new(note.frequency(), amplitude))
        .collect()
}
