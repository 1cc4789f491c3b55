//! Saves and loads worlds and patterns.
//!
//! Two plain-text formats are supported, both made of whitespace-separated
//! integers, one record per line:
//!
//! * A **board** file (`.all`) starts with a header `height width mode`,
//!   followed by one `row column state` record for each living cell.
//!   An unbounded world has height and width `0`.
//! * A **pattern** file (`.part`) has no header. Its `row column state`
//!   records are relative to the top left corner of the pattern, so it
//!   can be placed anywhere.
//!
//! A file is parsed completely before anything is applied, so a malformed
//! file never leaves a world half loaded.

use crate::{
    cells::{Coord, State},
    config::Config,
    error::Error,
    world::{SavedRegion, World},
};
use log::info;
use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, Read, Write},
    path::{Path, PathBuf},
    str::FromStr,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Extension of board files.
pub const BOARD_EXT: &str = "all";
/// Extension of pattern files.
pub const PATTERN_EXT: &str = "part";

/// Whitespace-separated tokens, with their line numbers.
struct Tokens {
    tokens: Vec<(usize, String)>,
    index: usize,
}

impl Tokens {
    fn read<R: Read>(mut reader: R) -> Result<Self, Error> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        let tokens = text
            .lines()
            .enumerate()
            .flat_map(|(i, line)| {
                line.split_whitespace()
                    .map(move |token| (i + 1, token.to_string()))
            })
            .collect();
        Ok(Tokens { tokens, index: 0 })
    }

    fn is_empty(&self) -> bool {
        self.index >= self.tokens.len()
    }

    /// The next token parsed as `T`.
    fn next<T: FromStr>(&mut self, what: &str) -> Result<T, Error> {
        let (line, token) = match self.tokens.get(self.index) {
            Some(entry) => entry,
            None => {
                let line = self.tokens.last().map_or(1, |&(line, _)| line);
                return Err(Error::ParseError {
                    line,
                    reason: format!("missing {}", what),
                });
            }
        };
        self.index += 1;
        token.parse().map_err(|_| Error::ParseError {
            line: *line,
            reason: format!("invalid {} {:?}", what, token),
        })
    }

    /// Reads `row column state` records until the end.
    fn records(&mut self) -> Result<Vec<(Coord, State)>, Error> {
        let mut cells = Vec::new();
        while !self.is_empty() {
            let line = self.tokens[self.index].0;
            let row = self.next("row")?;
            let col = self.next("column")?;
            let value = self.next::<u8>("state")?;
            let state = State::new((row, col), value).map_err(|_| Error::ParseError {
                line,
                reason: format!("invalid state {}", value),
            })?;
            cells.push(((row, col), state));
        }
        Ok(cells)
    }
}

/// Writes the whole world as a board file.
pub fn write_board<W: Write>(world: &World, mut writer: W) -> Result<(), Error> {
    let config = world.config();
    let (height, width) = if config.wrapping {
        (config.height, config.width)
    } else {
        (0, 0)
    };
    writeln!(writer, "{} {} {}", height, width, config.mode.index())?;
    for ((row, col), state) in world.cells() {
        writeln!(writer, "{} {} {}", row, col, state)?;
    }
    writer.flush()?;
    Ok(())
}

/// Reads a board file into a new world.
///
/// The size and the rule mode are taken from the header.
/// The random source is seeded with `seed`, or from the operating system.
pub fn read_board<R: Read>(reader: R, seed: Option<u64>) -> Result<World, Error> {
    let mut tokens = Tokens::read(reader)?;
    let height = tokens.next("height")?;
    let width = tokens.next("width")?;
    let mode_index = tokens.next("mode")?;
    let config = Config::from_legacy(height, width, mode_index)
        .map_err(|e| Error::ParseError {
            line: 1,
            reason: e.to_string(),
        })?
        .set_seed(seed);
    let cells = tokens.records()?;
    let mut world = config.world()?;
    for (coord, state) in cells {
        world.set(coord, state);
    }
    Ok(world)
}

/// Writes the captured cells as a pattern file.
///
/// The coordinates are written relative to the top left corner of the
/// captured cells.
pub fn write_pattern<W: Write>(region: &SavedRegion, mut writer: W) -> Result<(), Error> {
    if region.is_empty() {
        return Err(Error::EmptyRegion);
    }
    for ((row, col), state) in region.relative() {
        writeln!(writer, "{} {} {}", row, col, state)?;
    }
    writer.flush()?;
    Ok(())
}

/// Reads the cells of a pattern file, relative to its top left corner.
pub fn read_pattern<R: Read>(reader: R) -> Result<Vec<(Coord, State)>, Error> {
    Tokens::read(reader)?.records()
}

impl World {
    /// Reads a pattern file and places it with its top left corner
    /// at `offset`.
    ///
    /// Leaves the world untouched if the file is malformed.
    pub fn load_pattern<R: Read>(&mut self, reader: R, offset: Coord) -> Result<(), Error> {
        let cells = read_pattern(reader)?;
        self.stamp(&cells, offset);
        Ok(())
    }

    /// Saves the world as a `WorldSer`.
    #[cfg(feature = "serde")]
    pub fn ser(&self) -> WorldSer {
        WorldSer {
            config: self.config.clone(),
            generation: self.generation(),
            cells: self.cells().collect(),
        }
    }
}

/// A representation of the world which can be easily serialized.
#[cfg(feature = "serde")]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldSer {
    /// World configuration.
    pub config: Config,

    /// Number of generations since the world was created.
    ///
    /// Informative only; a restored world starts again from `0`.
    pub generation: u64,

    /// The living cells.
    pub cells: Vec<(Coord, State)>,
}

#[cfg(feature = "serde")]
impl WorldSer {
    /// Restores the world from the `WorldSer`.
    pub fn world(&self) -> Result<World, Error> {
        let mut world = self.config.world()?;
        for &(coord, state) in &self.cells {
            State::new(coord, state.value())?;
            world.set(coord, state);
        }
        Ok(world)
    }
}

/// The directory where boards and patterns are saved.
///
/// Files are addressed by name; the extension is added here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaveDir {
    root: PathBuf,
}

impl SaveDir {
    /// A save directory at `root`. It is not created here.
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        SaveDir { root: root.into() }
    }

    /// The directory itself.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The path of the file with the given name and extension.
    pub fn path(&self, name: &str, ext: &str) -> PathBuf {
        self.root.join(format!("{}.{}", name, ext))
    }

    /// Saves the whole world as `name.all`.
    pub fn save_board(&self, name: &str, world: &World) -> Result<(), Error> {
        let path = self.path(name, BOARD_EXT);
        write_board(world, BufWriter::new(File::create(&path)?))?;
        info!("Saved {} cells to {}", world.cell_count(), path.display());
        Ok(())
    }

    /// Loads `name.all` into a new world.
    pub fn load_board(&self, name: &str, seed: Option<u64>) -> Result<World, Error> {
        let path = self.path(name, BOARD_EXT);
        let world = read_board(BufReader::new(File::open(&path)?), seed)?;
        info!("Loaded {} cells from {}", world.cell_count(), path.display());
        Ok(world)
    }

    /// Saves the captured cells as `name.part`.
    pub fn save_pattern(&self, name: &str, region: &SavedRegion) -> Result<(), Error> {
        if region.is_empty() {
            return Err(Error::EmptyRegion);
        }
        let path = self.path(name, PATTERN_EXT);
        write_pattern(region, BufWriter::new(File::create(&path)?))?;
        info!("Saved pattern of {} cells to {}", region.len(), path.display());
        Ok(())
    }

    /// Loads `name.part` into the world, with its top left corner at `offset`.
    pub fn load_pattern(&self, name: &str, world: &mut World, offset: Coord) -> Result<(), Error> {
        let path = self.path(name, PATTERN_EXT);
        world.load_pattern(BufReader::new(File::open(&path)?), offset)?;
        info!("Loaded pattern {} at {:?}", path.display(), offset);
        Ok(())
    }

    /// Names of the saved boards, sorted.
    pub fn list_boards(&self) -> Result<Vec<String>, Error> {
        self.list(BOARD_EXT)
    }

    /// Names of the saved patterns, sorted.
    pub fn list_patterns(&self) -> Result<Vec<String>, Error> {
        self.list(PATTERN_EXT)
    }

    fn list(&self, ext: &str) -> Result<Vec<String>, Error> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.is_file() && path.extension().map_or(false, |e| e == ext) {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}

