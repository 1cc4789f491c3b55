//! The world.

use crate::{
    board::{self, Board, Topology},
    cells::{Coord, NbhdDesc, State, DEAD, FIRST, SECOND},
    config::Config,
    rules::{self, Mode},
    store::CellStore,
};
use log::{debug, trace, warn};
use rand::{rngs::StdRng, SeedableRng};

/// Number of entries above which an unbounded world logs a warning.
const LARGE_WORLD: usize = 1 << 20;

/// The world.
///
/// A simulation session: a board, a rule mode, and the living cells.
pub struct World {
    /// World configuration.
    pub(crate) config: Config,

    /// The shape of the board.
    board: Board,

    /// The living cells.
    ///
    /// Between two generations it holds no dead entries
    /// and no neighbor counts.
    store: CellStore,

    /// The random source of [`Mode::Unknown`].
    rng: StdRng,

    /// Number of generations since the world was created.
    generation: u64,

    /// Whether the warning about a large unbounded world was logged.
    warned_large: bool,
}

impl World {
    /// Creates an empty world. The configuration has been validated.
    pub(crate) fn new(config: Config, board: Board) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        debug!("New {} world, {:?}", config.mode, board.topology());
        World {
            config,
            board,
            store: CellStore::new(),
            rng,
            generation: 0,
            warned_large: false,
        }
    }

    /// World configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The rule mode.
    pub fn mode(&self) -> Mode {
        self.config.mode
    }

    /// The shape of the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The underlying cell store, read only.
    pub fn store(&self) -> &CellStore {
        &self.store
    }

    /// Number of generations advanced since the world was created.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Folds a coordinate onto the board.
    pub fn normalize(&self, coord: Coord) -> Coord {
        self.board.normalize(coord)
    }

    /// Advances the world by `steps` generations.
    pub fn advance(&mut self, steps: u64) {
        for _ in 0..steps {
            self.step();
        }
        debug!(
            "Advanced {} generations to generation {}, {} cells",
            steps,
            self.generation,
            self.cell_count()
        );
    }

    /// One generation: counts the neighbors, then applies the rule.
    fn step(&mut self) {
        board::accumulate(&self.board, &mut self.store);
        trace!(
            "Generation {}: {} cells touched",
            self.generation,
            self.store.len()
        );
        rules::apply(self.config.mode, &mut self.store, &mut self.rng);
        self.generation += 1;

        if !self.warned_large && !self.board.is_wrapping() && self.store.len() > LARGE_WORLD {
            warn!(
                "Unbounded world has grown to {} cells at generation {}",
                self.store.len(),
                self.generation
            );
            self.warned_large = true;
        }
    }

    /// The state of a cell.
    pub fn get(&self, coord: Coord) -> State {
        self.store.state(self.normalize(coord))
    }

    /// Sets the state of a cell, discarding whatever was there.
    ///
    /// Setting a cell to [`DEAD`] removes it.
    pub fn set(&mut self, coord: Coord, state: State) {
        let coord = self.normalize(coord);
        if state == DEAD {
            self.store.delete(coord);
        } else {
            self.store.set(coord, NbhdDesc::new(state).pack());
        }
    }

    /// Removes a cell.
    pub fn delete(&mut self, coord: Coord) {
        self.store.delete(self.normalize(coord));
    }

    /// Cycles the state of a cell through the states of the rule mode.
    ///
    /// An empty cell becomes [`FIRST`]. Returns the new state.
    pub fn toggle(&mut self, coord: Coord) -> State {
        let state = self.get(coord).cycle(self.mode().cycle_length());
        self.set(coord, state);
        state
    }

    /// Toggles every cell in the region.
    pub fn toggle_region<I: IntoIterator<Item = Coord>>(&mut self, coords: I) {
        for coord in coords {
            self.toggle(coord);
        }
    }

    /// Removes every cell in the region.
    pub fn delete_region<I: IntoIterator<Item = Coord>>(&mut self, coords: I) {
        for coord in coords {
            self.delete(coord);
        }
    }

    /// Places cells given relative to `offset`.
    ///
    /// Dead cells in the list are skipped.
    pub fn stamp(&mut self, cells: &[(Coord, State)], (row, col): Coord) {
        for &((r, c), state) in cells {
            if state != DEAD {
                self.set((row.wrapping_add(r), col.wrapping_add(c)), state);
            }
        }
    }

    /// Collects the living cells among the given positions, in order.
    ///
    /// Positions without a living cell are skipped. The positions are kept
    /// as given, so a region crossing the edges of a torus keeps its shape.
    pub fn capture_region<I: IntoIterator<Item = Coord>>(&self, coords: I) -> SavedRegion {
        let cells = coords
            .into_iter()
            .filter_map(|coord| {
                let state = self.get(coord);
                state.is_alive().then_some((coord, state))
            })
            .collect();
        SavedRegion { cells }
    }

    /// Collects the living cells in a rectangle, row by row.
    ///
    /// The corners are inclusive and may be given in any order.
    /// On a torus the rectangle may cross the edges, and is cut down
    /// to at most the size of the board.
    pub fn capture_rect(&self, corner_0: Coord, corner_1: Coord) -> SavedRegion {
        self.capture_region(self.rect(corner_0, corner_1))
    }

    /// All positions in a rectangle, row by row.
    ///
    /// See [`capture_rect`](Self::capture_rect).
    pub fn rect(&self, (r0, c0): Coord, (r1, c1): Coord) -> Vec<Coord> {
        let (top, mut bottom) = (r0.min(r1), r0.max(r1));
        let (left, mut right) = (c0.min(c1), c0.max(c1));
        if let Topology::Torus { height, width } = self.board.topology() {
            bottom = bottom.min(top.saturating_add(height - 1));
            right = right.min(left.saturating_add(width - 1));
        }
        (top..=bottom)
            .flat_map(|row| (left..=right).map(move |col| (row, col)))
            .collect()
    }

    /// Iterates over the living cells in `(row, column)` order.
    pub fn cells(&self) -> impl Iterator<Item = (Coord, State)> + '_ {
        self.store
            .iter()
            .map(|(coord, value)| (coord, NbhdDesc::unpack(value).state))
            .filter(|(_, state)| state.is_alive())
    }

    /// Number of living cells.
    pub fn cell_count(&self) -> usize {
        self.cells().count()
    }

    /// Removes all cells and releases their storage.
    ///
    /// The generation count starts again from `0`.
    pub fn clear(&mut self) {
        self.store.clear();
        self.generation = 0;
        self.warned_large = false;
    }

    /// The smallest rectangle containing all living cells,
    /// as `(top_left, bottom_right)`, both inclusive.
    ///
    /// Returns `None` if there are no living cells.
    pub fn bounding_box(&self) -> Option<(Coord, Coord)> {
        bounding_box(self.cells().map(|(coord, _)| coord))
    }

    /// Displays the world in
    /// [Plaintext](https://conwaylife.com/wiki/Plaintext) format.
    ///
    /// * **Dead** cells are represented by `.`;
    /// * cells of the **first species** are represented by `o`;
    /// * cells of the **second species** are represented by `x`.
    ///
    /// A wrapping world is displayed as a whole; an unbounded world
    /// is cut to its bounding box.
    pub fn plaintext(&self) -> String {
        let ((top, left), (bottom, right)) = match self.board.topology() {
            Topology::Torus { height, width } => ((0, 0), (height - 1, width - 1)),
            Topology::Plane => match self.bounding_box() {
                Some(bounds) => bounds,
                None => return String::new(),
            },
        };
        let mut str = String::new();
        for row in top..=bottom {
            for col in left..=right {
                str.push(match self.store.state((row, col)) {
                    FIRST => 'o',
                    SECOND => 'x',
                    _ => '.',
                });
            }
            str.push('\n');
        }
        str
    }
}

/// The smallest rectangle containing the given positions.
pub(crate) fn bounding_box<I: IntoIterator<Item = Coord>>(coords: I) -> Option<(Coord, Coord)> {
    coords.into_iter().fold(None, |bounds, (row, col)| {
        Some(match bounds {
            None => ((row, col), (row, col)),
            Some(((top, left), (bottom, right))) => (
                (top.min(row), left.min(col)),
                (bottom.max(row), right.max(col)),
            ),
        })
    })
}

/// Living cells captured from a world, to be saved as a pattern.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SavedRegion {
    cells: Vec<(Coord, State)>,
}

impl SavedRegion {
    /// The captured cells, in the order they were captured.
    pub fn cells(&self) -> &[(Coord, State)] {
        &self.cells
    }

    /// Number of captured cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether nothing was captured.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The captured cells moved so that the smallest row and the smallest
    /// column are both `0`.
    ///
    /// Offsets wrap around at the `i32` limits, like neighbors do.
    pub fn relative(&self) -> Vec<(Coord, State)> {
        match bounding_box(self.cells.iter().map(|&(coord, _)| coord)) {
            Some(((top, left), _)) => self
                .cells
                .iter()
                .map(|&((row, col), state)| {
                    ((row.wrapping_sub(top), col.wrapping_sub(left)), state)
                })
                .collect(),
            None => Vec::new(),
        }
    }
}
