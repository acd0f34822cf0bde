//! Configuration file loading.
//!
//! Values are resolved in order (later wins):
//! 1. Compiled defaults
//! 2. `./harmony-navigator.toml`, if present
//! 3. The file passed with `--config`, which replaces the local file
//!
//! # Example Config
//!
//! ```toml
//! default_instrument = "Violin"
//! default_dynamics = "mp"
//!
//! [instruments]
//! "Theremin" = 0.1
//! "Flute" = 0.35
//!
//! [display]
//! notation = "romance"
//! color = false
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::display::Notation;
use crate::dynamics::Dynamics;
use crate::error::{Error, Result};
use crate::instruments::InstrumentCatalog;

pub const LOCAL_CONFIG: &str = "harmony-navigator.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Instrument used until the session picks one.
    pub default_instrument: Option<String>,

    /// Dynamics for chords finalized without an explicit marking.
    pub default_dynamics: Dynamics,

    /// Overtone coefficients added to, or replacing, the built-in catalog.
    pub instruments: BTreeMap<String, f64>,

    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    pub notation: Notation,
    pub color: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            notation: Notation::English,
            color: true,
        }
    }
}

impl Config {
    /// Loads the config file picked by [`Config::discover`], or the defaults.
    pub fn load(cli_path: Option<&Path>) -> Result<(Config, Option<PathBuf>)> {
        match Config::discover(cli_path) {
            Some(path) => {
                let config = Config::from_file(&path)?;
                debug!(path = %path.display(), "loaded config");
                Ok((config, Some(path)))
            }
            None => Ok((Config::default(), None)),
        }
    }

    /// An explicit path always wins, even if it turns out to be unreadable.
    pub fn discover(cli_path: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = cli_path {
            return Some(path.to_path_buf());
        }
        let local = PathBuf::from(LOCAL_CONFIG);
        local.exists().then_some(local)
    }

    pub fn from_file(path: &Path) -> Result<Config> {
        let contents = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Config::parse(&contents, path)
    }

    pub fn parse(contents: &str, path: &Path) -> Result<Config> {
        toml::from_str(contents).map_err(|e: toml::de::Error| Error::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// The built-in catalog with this config's overrides applied.
    pub fn catalog(&self) -> Result<InstrumentCatalog> {
        InstrumentCatalog::with_overrides(
            self.instruments
                .iter()
                .map(|(name, &value)| (name.as_str(), value)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(contents: &str) -> Result<Config> {
        Config::parse(contents, Path::new("test.toml"))
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(parse("").unwrap(), Config::default());
    }

    #[test]
    fn full_file() {
        let config = parse(
            r#"
            default_instrument = "Violin"
            default_dynamics = "pp"

            [instruments]
            "Theremin" = 0.1

            [display]
            notation = "romance"
            color = false
            "#,
        )
        .unwrap();
        assert_eq!(config.default_instrument.as_deref(), Some("Violin"));
        assert_eq!(config.default_dynamics, Dynamics::Pp);
        assert_eq!(config.display.notation, Notation::Romance);
        assert!(!config.display.color);
        let catalog = config.catalog().unwrap();
        assert_eq!(catalog.overtone("Theremin"), 0.1);
        assert_eq!(catalog.overtone("Flute"), 0.3);
    }

    #[test]
    fn bad_values_are_parse_errors() {
        assert!(matches!(parse("default_dynamics = \"fff\""), Err(Error::ConfigParse { .. })));
        assert!(matches!(parse("colour = true"), Err(Error::ConfigParse { .. })));
        assert!(matches!(
            parse("[display]\nnotation = \"german\""),
            Err(Error::ConfigParse { .. })
        ));
    }

    #[test]
    fn out_of_range_overtone_fails_catalog() {
        let config = parse("[instruments]\nKazoo = 3.0").unwrap();
        assert!(matches!(config.catalog(), Err(Error::InvalidOvertone { .. })));
    }

    #[test]
    fn explicit_path_wins() {
        let path = Path::new("/nonexistent/custom.toml");
        assert_eq!(Config::discover(Some(path)), Some(path.to_path_buf()));
        assert!(matches!(Config::load(Some(path)), Err(Error::ConfigRead { .. })));
    }
}
