//! Two-species rules.

use crate::cells::{NbhdDesc, State, DEAD, FIRST, SECOND};
use rand::Rng;

/// Whether a total neighbor count lets a living cell survive.
#[inline]
fn survives(count: u8) -> bool {
    (2..=3).contains(&count)
}

/// The species of a cell born from three parents.
///
/// The second species wins when it has at least two of them.
/// In packed form this is the check `byte >= 64`.
#[inline]
fn majority(desc: NbhdDesc) -> State {
    if desc.count_2 >= 2 {
        SECOND
    } else {
        FIRST
    }
}

pub(super) fn coexistence(desc: NbhdDesc) -> State {
    let total = desc.total();
    match desc.state {
        DEAD if total == 3 => majority(desc),
        DEAD => DEAD,
        _ if !survives(total) => DEAD,
        state => state,
    }
}

/// The prey dies next to any predator.
///
/// A cell whose total neighbor count is not two or three ends up empty,
/// whatever its state.
pub(super) fn predator(desc: NbhdDesc) -> State {
    let total = desc.total();
    if !survives(total) {
        return DEAD;
    }
    match desc.state {
        DEAD if total == 3 => majority(desc),
        FIRST if desc.count_2 > 0 => DEAD,
        state => state,
    }
}

/// Same as [`predator`], except that the prey is infected
/// and becomes the second species.
pub(super) fn virus(desc: NbhdDesc) -> State {
    let total = desc.total();
    if !survives(total) {
        return DEAD;
    }
    match desc.state {
        DEAD if total == 3 => majority(desc),
        FIRST if desc.count_2 > 0 => SECOND,
        state => state,
    }
}

/// Each species only counts its own kind.
pub(super) fn unknown<G: Rng + ?Sized>(desc: NbhdDesc, rng: &mut G) -> State {
    match desc.state {
        DEAD => match (desc.count_1 == 3, desc.count_2 == 3) {
            (true, true) => {
                if rng.gen::<bool>() {
                    SECOND
                } else {
                    FIRST
                }
            }
            (true, false) => FIRST,
            (false, true) => SECOND,
            (false, false) => DEAD,
        },
        FIRST if survives(desc.count_1) => FIRST,
        SECOND if survives(desc.count_2) => SECOND,
        _ => DEAD,
    }
}
