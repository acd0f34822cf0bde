// Standard
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

// Parser
use clap::{Arg, ArgAction, ArgMatches};

// Errors and logging
use anyhow::Context;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

// Crate
use harmony_navigator::display::{DisplayOptions, Notation};
use harmony_navigator::instruments::DEFAULT_INSTRUMENT;
use harmony_navigator::session::{chord_commands, Event, Session};
use harmony_navigator::{display_term, Composition, Config, Mode, ScoringEngine};

fn cli() -> clap::Command {
    clap::Command::new("harmony-navigator")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Louis Garczynski <louis.roc@gmail.com>")
        .about("Scores the tension and dissonance of a chord progression")
        .arg(Arg::new("key")
            .short('k')
            .long("key")
            .value_name("NAME")
            .help("Key of the composition, spelled with sharps (C, C#, D ... B)\n\
                  Unrecognized names are read as C\n")
            .next_line_help(true))
        .arg(Arg::new("minor")
            .short('m')
            .long("minor")
            .action(ArgAction::SetTrue)
            .help("Use the minor mode instead of major\n"))
        .arg(Arg::new("instrument")
            .short('i')
            .long("instrument")
            .value_name("NAME")
            .help("Instrument whose timbre colors the scores (default Piano)\n")
            .next_line_help(true))
        .arg(Arg::new("chord")
            .short('c')
            .long("chord")
            .value_name("NOTES[@DYNAMICS]")
            .action(ArgAction::Append)
            .help("A chord to score, e.g. 60,64,67 or \"C4 E4 G4@f\"\n\
                  Repeat for a progression; without any, commands are read from stdin\n")
            .next_line_help(true))
        .arg(Arg::new("notation")
            .short('n')
            .long("notation")
            .value_name("LANGUAGE")
            .help("English or Romance notation\n")
            .next_line_help(true)
            .value_parser(["e", "r"]))
        .arg(Arg::new("breakdown")
            .short('b')
            .long("breakdown")
            .action(ArgAction::SetTrue)
            .help("Also print the terms behind the TTP score\n"))
        .arg(Arg::new("plain")
            .short('p')
            .long("plain")
            .visible_alias("noclear")
            .action(ArgAction::SetTrue)
            .help("Never color the grid\n"))
        .arg(Arg::new("config")
            .long("config")
            .value_name("PATH")
            .value_parser(clap::value_parser!(PathBuf))
            .help("Configuration file (default ./harmony-navigator.toml)\n"))
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so the grid on stdout stays clean
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let matches = cli().get_matches();

    // Get configuration and the instrument catalog it extends
    let config_path = matches.get_one::<PathBuf>("config");
    let (config, source) = Config::load(config_path.map(PathBuf::as_path))
        .context("Failed to load configuration")?;
    match &source {
        Some(path) => info!(path = %path.display(), "using configuration file"),
        None => debug!("no configuration file, using built-in defaults"),
    }
    let catalog = config
        .catalog()
        .context("Invalid instrument table in configuration")?;
    let engine = ScoringEngine::new(catalog);

    let composition = composition(&matches, &config);
    let options = display_options(&matches, &config);
    let mut session = Session::new(engine, composition, config.default_dynamics);

    match matches.get_many::<String>("chord") {
        Some(specs) => batch(&mut session, specs, options),
        None => interactive(&mut session, options),
    }
}

fn composition(matches: &ArgMatches, config: &Config) -> Composition {
    let mode = Mode::from_is_major(!matches.get_flag("minor"));
    let instrument = matches
        .get_one::<String>("instrument")
        .or(config.default_instrument.as_ref())
        .map_or(DEFAULT_INSTRUMENT, String::as_str);

    let mut composition = Composition::new().with_instrument(instrument);
    match matches.get_one::<String>("key") {
        Some(key) => composition.set_key(key.as_str(), mode),
        None => composition.set_mode(mode),
    }
    composition
}

fn display_options(matches: &ArgMatches, config: &Config) -> DisplayOptions {
    let notation = match matches.get_one::<String>("notation").map(String::as_str) {
        Some("e") => Notation::English,
        Some(_) => Notation::Romance,
        None => config.display.notation,
    };
    // Escape codes only go to a terminal
    let color =
        config.display.color && !matches.get_flag("plain") && termion::is_tty(&io::stdout());
    DisplayOptions {
        notation,
        color,
        breakdown: matches.get_flag("breakdown"),
    }
}

// Feeds every --chord through the session, then prints the grid once
fn batch<'a>(
    session: &mut Session,
    specs: impl Iterator<Item = &'a String>,
    options: DisplayOptions,
) -> anyhow::Result<()> {
    for spec in specs {
        let commands =
            chord_commands(spec).with_context(|| format!("Invalid chord '{}'", spec))?;
        for command in commands {
            session
                .apply(command)
                .with_context(|| format!("Cannot score chord '{}'", spec))?;
        }
    }
    let mut stdout = io::stdout().lock();
    display_term::render(&mut stdout, session.columns(), options)?;
    Ok(())
}

const HELP: &str = "\
Commands:
  key <NAME> [major|minor]   set the key
  instrument <NAME>          set the instrument
  <NOTE>                     add a note (60, C4, F#3, Db5)
  undo                       remove the last note
  done [pp|p|mp|mf|f|ff]     finalize and score the chord
  clear                      start over
  quit";

// Reads commands line by line, redrawing the grid after every scored chord
fn interactive(session: &mut Session, options: DisplayOptions) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    writeln!(stdout, "{}", HELP)?;

    for line in stdin.lock().lines() {
        let line = line?;
        match session.run_line(&line) {
            Ok(Some(Event::ChordScored(_))) => {
                display_term::render(&mut stdout, session.columns(), options)?;
            }
            Ok(Some(Event::Quit)) => break,
            Ok(Some(event)) => describe(&mut stdout, session, &event)?,
            Ok(None) => {}
            Err(e) => {
                warn!(line = %line, error = %e, "rejected command");
                writeln!(stdout, "error: {}", e)?;
            }
        }
    }
    Ok(())
}

fn describe<W: Write>(out: &mut W, session: &Session, event: &Event) -> io::Result<()> {
    match event {
        Event::KeySet { name, mode } => writeln!(out, "Key: {} {}", name, mode),
        Event::InstrumentSet { name, overtone } => {
            writeln!(out, "Instrument: {} (overtone {:.2})", name, overtone)
        }
        Event::NoteAdded(_) | Event::NoteRemoved(_) => {
            let notes: Vec<String> = session.working().iter().map(|n| n.to_string()).collect();
            writeln!(out, "Chord: [{}]", notes.join(" "))
        }
        Event::DuplicateNote(note) => writeln!(out, "{} is already in the chord", note),
        Event::Cleared => writeln!(out, "Cleared"),
        Event::ChordScored(_) | Event::Quit => Ok(()),
    }
}
