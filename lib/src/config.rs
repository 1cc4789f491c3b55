//! Session configuration.

use crate::{board::Board, error::Error, rules::Mode, world::World};
use educe::Educe;
use std::convert::TryFrom;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Session configuration.
///
/// The world will be generated from this configuration.
/// Nothing here can change during a session.
#[derive(Clone, Debug, Educe, PartialEq, Eq)]
#[educe(Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Height.
    ///
    /// Ignored when the board does not wrap.
    #[educe(Default = 32)]
    pub height: i32,

    /// Width.
    ///
    /// Ignored when the board does not wrap.
    #[educe(Default = 32)]
    pub width: i32,

    /// Whether the board is a torus.
    ///
    /// When it is `false`, the board is unbounded.
    #[educe(Default = true)]
    pub wrapping: bool,

    /// The rule mode.
    pub mode: Mode,

    /// Seed of the random source of [`Mode::Unknown`].
    ///
    /// `None` means that the world is seeded from the operating system.
    pub seed: Option<u64>,
}

impl Config {
    /// Sets up a new wrapping configuration with given size.
    pub fn new(height: i32, width: i32) -> Self {
        Config {
            height,
            width,
            ..Config::default()
        }
    }

    /// The convention of the save files: a board wraps if and only if
    /// both dimensions are positive.
    pub fn from_legacy(height: i32, width: i32, mode_index: usize) -> Result<Self, Error> {
        let wrapping = height > 0 && width > 0;
        let mode = Mode::try_from(mode_index)?;
        Ok(Config {
            height: if wrapping { height } else { 0 },
            width: if wrapping { width } else { 0 },
            wrapping,
            mode,
            seed: None,
        })
    }

    /// Sets whether the board wraps.
    pub fn set_wrapping(mut self, wrapping: bool) -> Self {
        self.wrapping = wrapping;
        self
    }

    /// Sets the rule mode.
    pub fn set_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the seed of the random source.
    pub fn set_seed<T: Into<Option<u64>>>(mut self, seed: T) -> Self {
        self.seed = seed.into();
        self
    }

    /// The board described by this configuration.
    pub fn board(&self) -> Result<Board, Error> {
        if !self.wrapping {
            Ok(Board::plane())
        } else if self.height <= 0 || self.width <= 0 {
            Err(Error::NonPositiveError)
        } else {
            Ok(Board::torus(self.height, self.width))
        }
    }

    /// Creates a new, empty world from the configuration.
    ///
    /// Returns an error if a wrapping board has a non-positive dimension.
    pub fn world(&self) -> Result<World, Error> {
        let board = self.board()?;
        Ok(World::new(self.clone(), board))
    }
}
