//! Parsing command-line arguments.

use anyhow::{bail, Context, Result};
use clap::{command, value_parser, Arg, ArgAction, ArgMatches, Command};
use golsim_lib::{Config, Coord, Mode, SaveDir};
use log::LevelFilter;
use std::{fs, path::Path, str::FromStr};

/// A pattern to place before running, and where to place it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Placement {
    pub(crate) name: String,
    pub(crate) offset: Coord,
}

/// `NAME` or `NAME@ROW,COL`.
impl FromStr for Placement {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, offset) = match s.rsplit_once('@') {
            Some((name, at)) => {
                let (row, col) = at
                    .split_once(',')
                    .ok_or_else(|| format!("expected ROW,COL after '@', found {:?}", at))?;
                let row: i32 = row.trim().parse().map_err(|e| format!("row: {}", e))?;
                let col: i32 = col.trim().parse().map_err(|e| format!("column: {}", e))?;
                (name, (row, col))
            }
            None => (s, (0, 0)),
        };
        if name.is_empty() {
            return Err(String::from("pattern name is empty"));
        }
        Ok(Placement {
            name: name.to_string(),
            offset,
        })
    }
}

/// A struct to store the parse results.
pub(crate) struct Args {
    pub(crate) config: Config,
    pub(crate) steps: u64,
    pub(crate) dir: SaveDir,
    pub(crate) load: Option<String>,
    pub(crate) patterns: Vec<Placement>,
    pub(crate) save: Option<String>,
    pub(crate) list: bool,
    pub(crate) json: bool,
    pub(crate) quiet: bool,
    pub(crate) log_level: LevelFilter,
}

/// The command-line interface.
pub(crate) fn command() -> Command {
    command!()
        .long_about(
            "Simulates Life-like cellular automata with up to two species\n\
             \n\
             The board is a torus of the given size, or unbounded when \
             either dimension is 0.\n\
             \n\
             Rule modes:\n\
             * Normal: Conway's Game of Life;\n\
             * Co-Existence: two species share the B3/S23 rule;\n\
             * Predator: the first species dies next to the second;\n\
             * Virus: the first species turns into the second next to it;\n\
             * Unknown: each species only counts its own kind.\n\
             \n\
             The final board is printed in Plaintext format: `.` is empty, \
             `o` is the first species and `x` is the second.\n",
        )
        .allow_negative_numbers(true)
        .arg(
            Arg::new("HEIGHT")
                .help("Height of the board, 0 for an unbounded board")
                .index(1)
                .default_value("32")
                .value_parser(value_parser!(i32).range(0..)),
        )
        .arg(
            Arg::new("WIDTH")
                .help("Width of the board, 0 for an unbounded board")
                .index(2)
                .default_value("32")
                .value_parser(value_parser!(i32).range(0..)),
        )
        .arg(
            Arg::new("UNBOUNDED")
                .help("Uses an unbounded board whatever the size")
                .long("unbounded")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("MODE")
                .help("Rule mode, by name or by index [default: Normal]")
                .long_help(
                    "Rule mode, by name or by index\n\
                     One of Normal (0), Co-Existence (1), Predator (2), Virus (3), Unknown (4).\n\
                     Overrides the mode of the config file, but not of a loaded board.\n",
                )
                .short('m')
                .long("mode")
                .value_parser(Mode::from_str),
        )
        .arg(
            Arg::new("STEPS")
                .help("Number of generations to run")
                .short('s')
                .long("steps")
                .default_value("1")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("SEED")
                .help("Seed of the random choices of the Unknown mode")
                .long("seed")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("CONFIG")
                .help("Reads the board settings from a TOML, YAML or JSON file")
                .long_help(
                    "Reads the board settings from a TOML, YAML or JSON file\n\
                     The format is chosen by the extension. Fields: height, width, \
                     wrapping, mode, seed. Replaces HEIGHT, WIDTH and --unbounded.\n",
                )
                .short('c')
                .long("config"),
        )
        .arg(
            Arg::new("DIR")
                .help("Directory of saved boards and patterns")
                .short('d')
                .long("dir")
                .default_value("."),
        )
        .arg(
            Arg::new("LOAD")
                .help("Loads the board NAME.all from the directory")
                .short('l')
                .long("load")
                .value_name("NAME"),
        )
        .arg(
            Arg::new("PATTERN")
                .help("Places a pattern, as NAME or NAME@ROW,COL")
                .long_help(
                    "Places a pattern, as NAME or NAME@ROW,COL\n\
                     NAME is a built-in pattern (see --list), or NAME.part in the directory.\n\
                     Can be given several times.\n",
                )
                .short('p')
                .long("pattern")
                .value_name("PATTERN")
                .action(ArgAction::Append)
                .value_parser(Placement::from_str),
        )
        .arg(
            Arg::new("SAVE")
                .help("Saves the final board as NAME.all in the directory")
                .short('o')
                .long("save")
                .value_name("NAME"),
        )
        .arg(
            Arg::new("LIST")
                .help("Lists the built-in patterns and the saved files, then exits")
                .long("list")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("JSON")
                .help("Prints the final board as JSON")
                .long("json")
                .action(ArgAction::SetTrue)
                .conflicts_with("QUIET"),
        )
        .arg(
            Arg::new("QUIET")
                .help("Does not print the final board")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("VERBOSE")
                .help("Logs more, can be repeated")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count),
        )
}

/// Reads a configuration file, in the format given by its extension.
fn read_config(path: &Path) -> Result<Config> {
    let text =
        fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    let config = match ext.as_deref() {
        Some("toml") => toml::from_str(&text)?,
        Some("yaml") | Some("yml") => serde_yaml::from_str(&text)?,
        Some("json") => serde_json::from_str(&text)?,
        _ => bail!("unknown config format: {}", path.display()),
    };
    Ok(config)
}

impl Args {
    /// Collects the parsed command-line arguments.
    pub(crate) fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let mut config = match matches.get_one::<String>("CONFIG") {
            Some(path) => read_config(Path::new(path))?,
            None => {
                let height = *matches.get_one::<i32>("HEIGHT").unwrap_or(&32);
                let width = *matches.get_one::<i32>("WIDTH").unwrap_or(&32);
                let wrapping = !matches.get_flag("UNBOUNDED") && height > 0 && width > 0;
                Config::new(height, width).set_wrapping(wrapping)
            }
        };
        if let Some(&mode) = matches.get_one::<Mode>("MODE") {
            config.mode = mode;
        }
        if let Some(&seed) = matches.get_one::<u64>("SEED") {
            config.seed = Some(seed);
        }

        let log_level = if matches.get_flag("QUIET") {
            LevelFilter::Error
        } else {
            match matches.get_count("VERBOSE") {
                0 => LevelFilter::Warn,
                1 => LevelFilter::Info,
                2 => LevelFilter::Debug,
                _ => LevelFilter::Trace,
            }
        };

        Ok(Args {
            config,
            steps: *matches.get_one::<u64>("STEPS").unwrap_or(&1),
            dir: SaveDir::new(
                matches
                    .get_one::<String>("DIR")
                    .map_or(".", String::as_str),
            ),
            load: matches.get_one::<String>("LOAD").cloned(),
            patterns: matches
                .get_many::<Placement>("PATTERN")
                .map(|values| values.cloned().collect())
                .unwrap_or_default(),
            save: matches.get_one::<String>("SAVE").cloned(),
            list: matches.get_flag("LIST"),
            json: matches.get_flag("JSON"),
            quiet: matches.get_flag("QUIET"),
            log_level,
        })
    }
}
