//! All kinds of errors in this crate.

use crate::cells::Coord;
use displaydoc::Display;
use std::io;
use thiserror::Error;

/// All kinds of errors in this crate.
#[derive(Debug, Display, Error)]
pub enum Error {
    /// Height and width of a wrapping board should be positive.
    NonPositiveError,
    /// Invalid mode index: {0}.
    InvalidMode(usize),
    /// Invalid mode name: {0:?}.
    InvalidModeName(String),
    /// Cell at {0:?} has invalid state: {1}.
    InvalidState(Coord, u8),
    /// Malformed file at line {line}: {reason}.
    ParseError { line: usize, reason: String },
    /// The selected region contains no living cells.
    EmptyRegion,
    /// No built-in pattern is named {0:?}.
    UnknownPattern(String),
    /// I/O error: {0}.
    Io(#[from] io::Error),
}
