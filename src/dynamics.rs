use std::fmt;
use std::str::FromStr;

use enum_iterator::{all, Sequence};
use serde::Deserialize;

use crate::error::{Error, Result};

// Amplitude used whenever a marking is not recognized
pub const DEFAULT_AMPLITUDE: f64 = 0.8;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Sequence, Deserialize)]
#[serde(try_from = "String")]
pub enum Dynamics {
    Pp,
    P,
    Mp,
    #[default]
    Mf,
    F,
    Ff,
}

impl Dynamics {
    pub fn iter() -> impl Iterator<Item = Dynamics> {
        all::<Dynamics>()
    }

    pub fn marking(self) -> &'static str {
        match self {
            Dynamics::Pp => "pp",
            Dynamics::P => "p",
            Dynamics::Mp => "mp",
            Dynamics::Mf => "mf",
            Dynamics::F => "f",
            Dynamics::Ff => "ff",
        }
    }

    pub fn from_marking(marking: &str) -> Option<Dynamics> {
        Dynamics::iter().find(|d| d.marking() == marking)
    }

    pub fn amplitude(self) -> f64 {
        match self {
            Dynamics::Pp => 0.2,
            Dynamics::P => 0.4,
            Dynamics::Mp => 0.6,
            Dynamics::Mf => 0.8,
            Dynamics::F => 1.0,
            Dynamics::Ff => 1.2,
        }
    }
}

/// Amplitude for a raw marking. Unknown markings get [`DEFAULT_AMPLITUDE`].
pub fn dynamics_amplitude(marking: &str) -> f64 {
    Dynamics::from_marking(marking).map_or(DEFAULT_AMPLITUDE, Dynamics::amplitude)
}

impl fmt::Display for Dynamics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marking())
    }
}

impl FromStr for Dynamics {
    type Err = Error;

    fn from_str(s: &str) -> Result<Dynamics> {
        Dynamics::from_marking(s.trim()).ok_or_else(|| Error::UnknownDynamics(s.to_owned()))
    }
}

impl TryFrom<String> for Dynamics {
    type Error = Error;

    fn try_from(s: String) -> Result<Dynamics> {
        s.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amplitude_table() {
        let amps: Vec<f64> = Dynamics::iter().map(Dynamics::amplitude).collect();
        assert_eq!(amps, vec![0.2, 0.4, 0.6, 0.8, 1.0, 1.2]);
    }

    #[test]
    fn unknown_marking_defaults() {
        assert_eq!(dynamics_amplitude("fff"), 0.8);
        assert_eq!(dynamics_amplitude(""), 0.8);
        assert_eq!(dynamics_amplitude("pp"), 0.2);
        assert_eq!(dynamics_amplitude("ff"), 1.2);
    }

    #[test]
    fn parses_markings() {
        assert_eq!("mp".parse::<Dynamics>().unwrap(), Dynamics::Mp);
        assert_eq!(" f ".parse::<Dynamics>().unwrap(), Dynamics::F);
        assert!(matches!("sfz".parse::<Dynamics>(), Err(Error::UnknownDynamics(_))));
        assert_eq!(Dynamics::default(), Dynamics::Mf);
    }
}
