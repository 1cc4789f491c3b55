//! The board: addressing of neighbors, and the accumulation of
//! neighbor counts.

use crate::{
    cells::{Coord, NbhdDesc},
    store::CellStore,
};

/// Offsets of the eight neighbors.
const NBHD: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// How coordinates are mapped onto the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Topology {
    /// A finite board whose opposite edges are glued together.
    ///
    /// Both dimensions are positive.
    Torus { height: i32, width: i32 },
    /// A logically unbounded board. Coordinates never fold.
    Plane,
}

/// The shape of the board.
///
/// It is fixed for the lifetime of a [`World`](crate::World).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Board {
    topology: Topology,
}

impl Board {
    /// A wrapping board of the given size.
    ///
    /// The caller has checked that both dimensions are positive.
    pub(crate) fn torus(height: i32, width: i32) -> Self {
        debug_assert!(height > 0 && width > 0);
        Board {
            topology: Topology::Torus { height, width },
        }
    }

    /// An unbounded board.
    pub(crate) fn plane() -> Self {
        Board {
            topology: Topology::Plane,
        }
    }

    /// How coordinates are mapped onto the board.
    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Whether coordinates wrap around.
    pub fn is_wrapping(&self) -> bool {
        matches!(self.topology, Topology::Torus { .. })
    }

    /// Folds a coordinate onto the board.
    ///
    /// On a torus the result lies in `0..height` × `0..width`.
    /// On the plane this is the identity.
    #[inline]
    pub fn normalize(&self, (row, col): Coord) -> Coord {
        match self.topology {
            Topology::Torus { height, width } => (row.rem_euclid(height), col.rem_euclid(width)),
            Topology::Plane => (row, col),
        }
    }

    /// The eight neighbors of a cell.
    ///
    /// On a small torus some of them may coincide, or be the cell itself.
    #[inline]
    pub fn neighbors(&self, (row, col): Coord) -> [Coord; 8] {
        NBHD.map(|(dr, dc)| self.normalize((row.wrapping_add(dr), col.wrapping_add(dc))))
    }
}

/// Adds the contribution of every living cell to the counters
/// of its neighbors, creating entries for neighbors that have none.
///
/// The living cells are copied out before any entry is touched,
/// so a cell that is updated early in the pass still contributes
/// its own state, not its counters.
pub(crate) fn accumulate(board: &Board, store: &mut CellStore) {
    let living = store
        .snapshot()
        .into_iter()
        .map(|(coord, value)| (coord, NbhdDesc::unpack(value).state))
        .filter(|(_, state)| state.is_alive())
        .collect::<Vec<_>>();

    for (coord, state) in living {
        for nbhd in board.neighbors(coord) {
            store.update(nbhd, |desc| desc.add_neighbor(state));
        }
    }
}
