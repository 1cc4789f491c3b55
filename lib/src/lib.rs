//! A sparse simulator for Life-like cellular automata with up to two
//! species, on a wrapping or unbounded board.
//!
//! ```
//! use golsim_lib::{Config, FIRST};
//!
//! let mut world = Config::new(5, 5).world().unwrap();
//! for col in 1..4 {
//!     world.set((2, col), FIRST);
//! }
//! world.advance(1);
//! assert_eq!(world.plaintext(), ".....\n..o..\n..o..\n..o..\n.....\n");
//! ```

mod board;
mod cells;
mod config;
mod error;
pub mod patterns;
pub mod rules;
pub mod save;
mod store;
mod world;

pub use board::{Board, Topology};
pub use cells::{Coord, NbhdDesc, State, DEAD, FIRST, SECOND};
pub use config::Config;
pub use error::Error;
pub use rules::Mode;
pub use save::SaveDir;
pub use store::CellStore;
pub use world::{SavedRegion, World};
