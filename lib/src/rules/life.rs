//! The single-species rule.

use crate::cells::{NbhdDesc, State, DEAD, FIRST};

/// Conway's Game of Life.
///
/// A cell of the first species survives with two or three neighbors of the
/// first species, and a dead cell is born with exactly three. Any neighbor
/// of the second species, or a cell of the second species itself, leads to
/// an empty cell.
///
/// In packed form the living results are exactly the bytes `9`, `12`
/// and `13`.
pub(super) fn normal(desc: NbhdDesc) -> State {
    match desc {
        NbhdDesc {
            state: FIRST,
            count_1: 2..=3,
            count_2: 0,
        }
        | NbhdDesc {
            state: DEAD,
            count_1: 3,
            count_2: 0,
        } => FIRST,
        _ => DEAD,
    }
}
