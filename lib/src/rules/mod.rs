//! Cellular automaton rules.
//!
//! There are five rule modes. [`Mode::Normal`] is Conway's Game of Life
//! with a single species. The others are two-species variants of it,
//! which differ in how the species interact.

mod life;
mod species;

use crate::{
    cells::{NbhdDesc, State, DEAD},
    error::Error,
    store::CellStore,
};
use educe::Educe;
use rand::Rng;
use std::{
    convert::TryFrom,
    fmt::{self, Display, Formatter},
    str::FromStr,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The rule mode of a session.
#[derive(Clone, Copy, Debug, Educe, PartialEq, Eq, Hash)]
#[educe(Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Mode {
    /// Conway's Game of Life, `B3/S23`, with a single species.
    #[educe(Default)]
    Normal,
    /// Both species follow `B3/S23` on the total neighbor count.
    ///
    /// A newborn cell joins the species that is the majority
    /// among its three parents.
    CoExistence,
    /// Like [`Mode::CoExistence`], but a cell of the first species
    /// (the prey) dies whenever it has a neighbor of the second species.
    Predator,
    /// Like [`Mode::Predator`], but the prey is converted into the second
    /// species instead of dying.
    Virus,
    /// Each species follows `B3/S23` on its own neighbor count only.
    ///
    /// When a dead cell has exactly three neighbors of each species,
    /// the species of the newborn cell is chosen at random.
    Unknown,
}

impl Mode {
    /// All modes, in the order of their indices.
    pub const ALL: [Mode; 5] = [
        Mode::Normal,
        Mode::CoExistence,
        Mode::Predator,
        Mode::Virus,
        Mode::Unknown,
    ];

    /// The human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Mode::Normal => "Normal",
            Mode::CoExistence => "Co-Existence",
            Mode::Predator => "Predator",
            Mode::Virus => "Virus",
            Mode::Unknown => "Unknown",
        }
    }

    /// The index of the mode, as stored in save files.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Number of states a manual toggle cycles through.
    pub fn cycle_length(self) -> u8 {
        match self {
            Mode::Normal => 2,
            _ => 3,
        }
    }

    /// The state of a cell in the next generation.
    ///
    /// `rng` is only used by [`Mode::Unknown`].
    pub fn transition<G: Rng + ?Sized>(self, desc: NbhdDesc, rng: &mut G) -> State {
        match self {
            Mode::Normal => life::normal(desc),
            Mode::CoExistence => species::coexistence(desc),
            Mode::Predator => species::predator(desc),
            Mode::Virus => species::virus(desc),
            Mode::Unknown => species::unknown(desc, rng),
        }
    }
}

impl TryFrom<usize> for Mode {
    type Error = Error;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Mode::ALL
            .get(index)
            .copied()
            .ok_or(Error::InvalidMode(index))
    }
}

/// Accepts either the name or the index, ignoring case.
impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(index) = s.parse::<usize>() {
            return Mode::try_from(index);
        }
        let key = s.replace(['-', '_', ' '], "").to_ascii_lowercase();
        Mode::ALL
            .iter()
            .copied()
            .find(|mode| mode.name().replace('-', "").to_ascii_lowercase() == key)
            .ok_or_else(|| Error::InvalidModeName(s.to_string()))
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Applies the rule to every entry of the store.
///
/// Each entry is rewritten with its new state and cleared counters.
/// Entries whose new state is dead are removed.
pub(crate) fn apply<G: Rng + ?Sized>(mode: Mode, store: &mut CellStore, rng: &mut G) {
    for (coord, value) in store.snapshot() {
        let state = mode.transition(NbhdDesc::unpack(value), rng);
        if state == DEAD {
            store.delete(coord);
        } else {
            store.set(coord, NbhdDesc::new(state).pack());
        }
    }
}
