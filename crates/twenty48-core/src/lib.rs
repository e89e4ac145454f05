//! twenty48-core: the 2048 board engine
//!
//! This crate provides:
//! - A `Game` type owning the grid, score, and terminal flag, with
//!   ergonomic methods (`apply_move`, `new_game`, read-only accessors)
//! - The pure line/grid shift algorithms (`engine::shift_grid`) for callers
//!   that want to inspect a move without spawn randomness
//!
//! Quick start:
//! ```
//! use twenty48_core::engine::{Direction, Game};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! // Deterministic game initialization with a seeded RNG
//! let mut rng = StdRng::seed_from_u64(42);
//! let mut game = Game::new(&mut rng);
//! assert_eq!(game.count_empty(), 14);
//!
//! let _changed = game.apply_move(Direction::Left, &mut rng);
//! ```
//!
//! Note: for convenience there are also `*_thread` methods that use the
//! thread-local RNG. Prefer passing a seeded RNG when you need determinism.
pub mod engine;
