//! Engine module: 4x4 grid state, move/merge rules, spawn randomness,
//! and terminal-state detection. Public API stays small and ergonomic.
//!
//! - `Game` is the owned game state with useful methods.
//! - Free functions expose the pure algorithms (e.g. `shift_grid`).
//! - Internals (line merge, spawn, terminal check) live in `ops`.

mod ops;
pub mod state;

pub use state::{Direction, Game, Grid, SIZE};

pub use ops::{count_empty, highest_tile, shift_grid};
