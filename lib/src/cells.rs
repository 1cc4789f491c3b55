//! Cells in the cellular automaton.

use crate::error::Error;
use std::fmt::{self, Display, Formatter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Possible states of a cell.
///
/// A cell is either empty, or alive as one of the two species.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct State(pub(crate) u8);

/// The empty state.
pub const DEAD: State = State(0);
/// The first species. In single-species rules this is the only living state.
pub const FIRST: State = State(1);
/// The second species.
pub const SECOND: State = State(2);

impl State {
    /// Checks the raw value and converts it to a state.
    ///
    /// The coordinates are only used for the error message.
    pub fn new(coord: Coord, value: u8) -> Result<Self, Error> {
        if value <= SECOND.0 {
            Ok(State(value))
        } else {
            Err(Error::InvalidState(coord, value))
        }
    }

    /// The raw value, `0`, `1` or `2`.
    #[inline]
    pub fn value(self) -> u8 {
        self.0
    }

    /// Whether the cell is alive, as either species.
    #[inline]
    pub fn is_alive(self) -> bool {
        self != DEAD
    }

    /// The next state when toggling a cell by hand.
    ///
    /// Cycles through `0..cycle_length`.
    #[inline]
    pub(crate) fn cycle(self, cycle_length: u8) -> Self {
        State((self.0 + 1) % cycle_length)
    }
}

impl Display for State {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The coordinates of a cell.
///
/// `(row, column)`. On a wrapping board both are normalized into
/// `0..height` and `0..width`; on an unbounded board any value is valid.
pub type Coord = (i32, i32);

/// The “neighborhood descriptor” of a cell.
///
/// It describes the state of the cell itself, and how many of its eight
/// neighbors are alive as each species.
///
/// In the cell store it is packed into a single byte `0b_ccc_bbb_aa`, where:
///
/// * `0b_aa` is the state of the cell itself;
/// * `0b_bbb` is the number of neighbors of the first species;
/// * `0b_ccc` is the number of neighbors of the second species.
///
/// The counters are only meaningful between the accumulation phase
/// and the rule phase of a generation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct NbhdDesc {
    /// The state of the cell itself.
    pub state: State,
    /// Number of neighbors of the first species.
    pub count_1: u8,
    /// Number of neighbors of the second species.
    pub count_2: u8,
}

impl NbhdDesc {
    /// Largest number a 3-bit counter can hold.
    const COUNT_MAX: u8 = 0b111;

    /// A descriptor with the given state and no living neighbors.
    #[inline]
    pub fn new(state: State) -> Self {
        NbhdDesc {
            state,
            ..NbhdDesc::default()
        }
    }

    /// Reads a descriptor from a packed byte.
    #[inline]
    pub fn unpack(byte: u8) -> Self {
        NbhdDesc {
            state: State(byte & 0b11),
            count_1: (byte >> 2) & 0b111,
            count_2: byte >> 5,
        }
    }

    /// Packs the descriptor into a byte.
    #[inline]
    pub fn pack(self) -> u8 {
        self.state.0 | self.count_1 << 2 | self.count_2 << 5
    }

    /// Total number of living neighbors.
    #[inline]
    pub fn total(self) -> u8 {
        self.count_1 + self.count_2
    }

    /// Records one more neighbor in the given state.
    ///
    /// Counters saturate at 7. Every rule treats 7 and 8 neighbors
    /// the same way.
    #[inline]
    pub fn add_neighbor(&mut self, neighbor: State) {
        match neighbor {
            FIRST => self.count_1 = (self.count_1 + 1).min(Self::COUNT_MAX),
            SECOND => self.count_2 = (self.count_2 + 1).min(Self::COUNT_MAX),
            _ => (),
        }
    }
}
