use rand::Rng;
use std::fmt;

use super::ops;
use serde::{Deserialize, Serialize};

/// Board side length. The grid is always `SIZE x SIZE`.
pub const SIZE: usize = 4;

/// Owned 4x4 grid of tile values, row-major. `0` is empty; every non-empty
/// cell holds a power of two >= 2.
pub type Grid = [[u32; SIZE]; SIZE];

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions, in a fixed order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}

/// 2048 game state: grid, score, and terminal flag.
///
/// The only source of nondeterminism is the RNG passed into `new_game` and
/// `apply_move`, so seeded runs replay exactly. Once `is_game_over` returns
/// true, `apply_move` is a no-op until `new_game` resets the state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    board: Grid,
    score: u64,
    game_over: bool,
}

impl Game {
    /// Start a fresh game: empty board, zero score, two random tiles.
    ///
    /// Deterministic example using a seeded RNG:
    /// ```
    /// use twenty48_core::engine::Game;
    /// use rand::{rngs::StdRng, SeedableRng};
    /// let mut rng = StdRng::seed_from_u64(123);
    /// let game = Game::new(&mut rng);
    /// assert_eq!(game.score(), 0);
    /// assert_eq!(game.count_empty(), 14);
    /// assert!(!game.is_game_over());
    /// ```
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut game = Game {
            board: [[0; SIZE]; SIZE],
            score: 0,
            game_over: false,
        };
        game.new_game(rng);
        game
    }

    /// Convenience: like `new` but uses the thread-local RNG.
    pub fn new_thread() -> Self {
        let mut rng = rand::thread_rng();
        Self::new(&mut rng)
    }

    /// Reconstruct a `Game` from its three observable state fields.
    ///
    /// Escape hatch for drivers that restore a saved game or set up a known
    /// position; no validation is performed beyond what the type expresses.
    pub fn from_parts(board: Grid, score: u64, game_over: bool) -> Self {
        Game {
            board,
            score,
            game_over,
        }
    }

    /// Reset to a fresh game: score 0, cleared board, terminal flag cleared,
    /// then exactly two random tiles.
    pub fn new_game<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.score = 0;
        self.board = [[0; SIZE]; SIZE];
        self.game_over = false;
        ops::spawn_random_tile(&mut self.board, rng);
        ops::spawn_random_tile(&mut self.board, rng);
    }

    /// Attempt to move the board in `direction`. Returns true iff the board
    /// changed.
    ///
    /// On a changed move the gained merge score is added to `score`, exactly
    /// one random tile spawns, and the terminal flag is recomputed. On an
    /// unchanged move (or when the game is already over) the state is left
    /// completely untouched.
    ///
    /// ```
    /// use twenty48_core::engine::{Direction, Game};
    /// use rand::{rngs::StdRng, SeedableRng};
    /// let mut rng = StdRng::seed_from_u64(7);
    /// let mut game = Game::from_parts([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]], 0, false);
    /// assert!(game.apply_move(Direction::Left, &mut rng));
    /// assert_eq!(game.board()[0][0], 4);
    /// assert_eq!(game.score(), 4);
    /// ```
    pub fn apply_move<R: Rng + ?Sized>(&mut self, direction: Direction, rng: &mut R) -> bool {
        if self.game_over {
            return false;
        }
        let (board, changed, gained) = ops::shift_grid(&self.board, direction);
        if !changed {
            return false;
        }
        self.board = board;
        self.score += gained;
        ops::spawn_random_tile(&mut self.board, rng);
        self.game_over = !ops::has_moves_available(&self.board);
        true
    }

    /// Convenience: like `apply_move` but uses the thread-local RNG.
    pub fn apply_move_thread(&mut self, direction: Direction) -> bool {
        let mut rng = rand::thread_rng();
        self.apply_move(direction, &mut rng)
    }

    /// Borrow the grid.
    #[inline]
    pub fn board(&self) -> &Grid {
        &self.board
    }

    /// Current score. Monotonically non-decreasing over a game's lifetime.
    #[inline]
    pub fn score(&self) -> u64 {
        self.score
    }

    /// True once no move can change the board; cleared only by `new_game`.
    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Highest tile value present on the board (0 when empty).
    #[inline]
    pub fn highest_tile(&self) -> u32 {
        ops::highest_tile(&self.board)
    }

    /// Count the number of empty cells on the board.
    #[inline]
    pub fn count_empty(&self) -> usize {
        ops::count_empty(&self.board)
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, row) in self.board.iter().enumerate() {
            if idx > 0 {
                writeln!(f, "--------------------------------")?;
            }
            let cells: Vec<_> = row.iter().map(|&v| ops::format_val(v)).collect();
            writeln!(f, "{}|{}|{}|{}", cells[0], cells[1], cells[2], cells[3])?;
        }
        Ok(())
    }
}
