//! Built-in patterns of Conway's Game of Life.
//!
//! Patterns are written row by row, `1` for a living cell and `0` for a
//! dead one, with rows separated by spaces. All cells are of the first
//! species.

use crate::{
    cells::{Coord, State, FIRST},
    error::Error,
    world::World,
};

/// A named pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pattern {
    /// Name of the pattern.
    pub name: &'static str,
    /// The rows of the pattern.
    pub rows: &'static str,
}

impl Pattern {
    const fn new(rows: &'static str, name: &'static str) -> Self {
        Pattern { name, rows }
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.rows.split(' ').count()
    }

    /// Length of the longest row.
    pub fn width(&self) -> usize {
        self.rows.split(' ').map(str::len).max().unwrap_or(0)
    }

    /// The living cells, relative to the top left corner.
    pub fn cells(&self) -> Vec<(Coord, State)> {
        self.rows
            .split(' ')
            .enumerate()
            .flat_map(|(row, line)| {
                line.bytes()
                    .enumerate()
                    .filter(|&(_, b)| b == b'1')
                    .map(move |(col, _)| ((row as i32, col as i32), FIRST))
            })
            .collect()
    }
}

/// A group of patterns of the same kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Group {
    /// Name of the group.
    pub name: &'static str,
    /// The patterns in the group.
    pub patterns: &'static [Pattern],
}

const STILLS: &[Pattern] = &[
    Pattern::new("11 11", "Block"),
    Pattern::new("1011 1101", "Snake"),
    Pattern::new("010 101 010", "Tub"),
    Pattern::new("110 101 010", "Boat"),
    Pattern::new("0110 1001 0110", "Beehive"),
    Pattern::new("1100 1001 0011", "Carrier"),
    Pattern::new("11000 10011 01101", "Shillelagh"),
    Pattern::new("0110 1001 1001 0110", "Pond"),
    Pattern::new("0010 0101 1010 0100", "Barge"),
    Pattern::new("0010 0101 1010 1100", "Long boat"),
    Pattern::new("0110 1001 0101 0010", "Loaf"),
    Pattern::new("00100 01010 01010 11011", "Hat"),
];

const OSCILLATORS: &[Pattern] = &[
    Pattern::new("0111 1110", "Toad"),
    Pattern::new("010 010 010", "Blinker"),
    Pattern::new("0010 1010 0101 0100", "Clock"),
    Pattern::new("0011 0001 1000 1100", "Beacon"),
    Pattern::new("0010000100 1101111011 0010000100", "Pentadecathlon"),
    Pattern::new("110000 110100 000010 010000 001011 000011", "Figure eight"),
    Pattern::new("11000011 10100101 00100100 10100101 11000011", "Spark coil"),
];

const SPACESHIPS: &[Pattern] = &[
    Pattern::new("010 001 111", "Glider"),
    Pattern::new("01001 10000 10001 11110", "Lightweight"),
    Pattern::new("000100 010001 100000 100001 111110", "Mediumweight"),
    Pattern::new("0001100 0100001 1000000 1000001 1111110", "Heavyweight"),
];

const METHUSELAHS: &[Pattern] = &[
    Pattern::new("111 101 101", "Piheptomino"),
    Pattern::new("1011 1110 0100", "B-Heptomino"),
    Pattern::new("11001 10001 10011", "Glider by the dozen"),
    Pattern::new("111 000 010 010 010", "Thunderbird"),
    Pattern::new("0100000 0001000 1100111", "Acorn"),
    Pattern::new("00000010 11000000 01000111", "Diehard"),
];

/// All built-in patterns.
pub const GROUPS: &[Group] = &[
    Group {
        name: "Still",
        patterns: STILLS,
    },
    Group {
        name: "Oscillator",
        patterns: OSCILLATORS,
    },
    Group {
        name: "Spaceship",
        patterns: SPACESHIPS,
    },
    Group {
        name: "Methuselah",
        patterns: METHUSELAHS,
    },
];

/// Finds a built-in pattern by name, ignoring case.
pub fn find(name: &str) -> Result<&'static Pattern, Error> {
    GROUPS
        .iter()
        .flat_map(|group| group.patterns)
        .find(|pattern| pattern.name.eq_ignore_ascii_case(name.trim()))
        .ok_or_else(|| Error::UnknownPattern(name.to_string()))
}

impl World {
    /// Places a built-in pattern with its top left corner at `offset`.
    pub fn stamp_pattern(&mut self, pattern: &Pattern, offset: Coord) {
        self.stamp(&pattern.cells(), offset);
    }
}
