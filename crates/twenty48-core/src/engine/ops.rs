use rand::Rng;

use super::state::{Direction, Grid, SIZE};

/// One row or column, oriented so the merge direction is toward index 0.
pub(crate) type Line = [u32; SIZE];

/// Slide/merge tiles in the given direction. No randomness.
///
/// Returns `(new_grid, changed, gained_score)` where `changed` is true iff
/// any line differs from its input value-by-value (a pure compress with no
/// merge still counts) and `gained_score` sums every merged tile's doubled
/// value. Rows and columns are independent, so processing order is
/// irrelevant.
pub fn shift_grid(grid: &Grid, direction: Direction) -> (Grid, bool, u64) {
    let mut out = *grid;
    let mut changed = false;
    let mut gained = 0u64;
    for idx in 0..SIZE {
        let line = extract_line(grid, direction, idx);
        let (merged, line_changed, line_gain) = merge_line(line);
        store_line(&mut out, direction, idx, merged);
        changed |= line_changed;
        gained += line_gain;
    }
    (out, changed, gained)
}

/// Read line `idx` oriented toward the merge direction: left/up lines read
/// naturally, right/down lines read reversed so one leftward algorithm
/// serves all four directions.
fn extract_line(grid: &Grid, direction: Direction, idx: usize) -> Line {
    let mut line = [0u32; SIZE];
    for (i, slot) in line.iter_mut().enumerate() {
        *slot = match direction {
            Direction::Left => grid[idx][i],
            Direction::Right => grid[idx][SIZE - 1 - i],
            Direction::Up => grid[i][idx],
            Direction::Down => grid[SIZE - 1 - i][idx],
        };
    }
    line
}

/// Inverse of `extract_line`: write the merged line back in board order.
fn store_line(grid: &mut Grid, direction: Direction, idx: usize, line: Line) {
    for (i, &val) in line.iter().enumerate() {
        match direction {
            Direction::Left => grid[idx][i] = val,
            Direction::Right => grid[idx][SIZE - 1 - i] = val,
            Direction::Up => grid[i][idx] = val,
            Direction::Down => grid[SIZE - 1 - i][idx] = val,
        }
    }
}

/// Compress and merge one line toward index 0.
///
/// Empty cells drop out first (order of the rest preserved), then equal
/// adjacent pairs merge left to right. Each tile merges at most once per
/// move: the scan advances past both sources of a merge, so a merged tile
/// never merges again. The result is zero-padded back to `SIZE`.
pub(crate) fn merge_line(line: Line) -> (Line, bool, u64) {
    let mut compact = [0u32; SIZE];
    let mut len = 0;
    for &val in line.iter().filter(|&&v| v != 0) {
        compact[len] = val;
        len += 1;
    }

    let mut out = [0u32; SIZE];
    let mut gained = 0u64;
    let mut read = 0;
    let mut write = 0;
    while read < len {
        if read + 1 < len && compact[read] == compact[read + 1] {
            let merged = compact[read] * 2;
            out[write] = merged;
            gained += u64::from(merged);
            read += 2; // skip the merged pair
        } else {
            out[write] = compact[read];
            read += 1;
        }
        write += 1;
    }

    (out, out != line, gained)
}

/// Insert a random 2 (90%) or 4 (10%) tile into a uniformly chosen empty
/// cell. No-op on a full board.
pub(crate) fn spawn_random_tile<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) {
    let empties = empty_cells(grid);
    if empties.is_empty() {
        return;
    }
    let (row, col) = empties[rng.gen_range(0..empties.len())];
    grid[row][col] = generate_random_tile(rng);
}

pub(crate) fn generate_random_tile<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    if rng.gen_range(0..10) < 9 {
        2
    } else {
        4
    }
}

fn empty_cells(grid: &Grid) -> Vec<(usize, usize)> {
    let mut positions = Vec::new();
    for (row, cells) in grid.iter().enumerate() {
        for (col, &val) in cells.iter().enumerate() {
            if val == 0 {
                positions.push((row, col));
            }
        }
    }
    positions
}

/// True if some move can still change the board: an empty cell exists or
/// some right/below neighbor pair is equal. This equivalence replaces
/// simulating all four moves; it is exact and much cheaper.
pub(crate) fn has_moves_available(grid: &Grid) -> bool {
    for row in 0..SIZE {
        for col in 0..SIZE {
            let val = grid[row][col];
            if val == 0 {
                return true;
            }
            if row + 1 < SIZE && grid[row + 1][col] == val {
                return true;
            }
            if col + 1 < SIZE && grid[row][col + 1] == val {
                return true;
            }
        }
    }
    false
}

/// Count the number of empty cells.
pub fn count_empty(grid: &Grid) -> usize {
    grid.iter().flatten().filter(|&&v| v == 0).count()
}

/// Return the highest tile value present (0 on an empty grid).
pub fn highest_tile(grid: &Grid) -> u32 {
    grid.iter().flatten().copied().max().unwrap_or(0)
}

pub(crate) fn format_val(val: u32) -> String {
    match val {
        0 => String::from("       "),
        x => {
            let mut s = x.to_string();
            while s.len() < 7 {
                match s.len() {
                    6 => s = format!(" {}", s),
                    _ => s = format!(" {} ", s),
                }
            }
            s
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn it_merge_line() {
        assert_eq!(merge_line([0, 0, 0, 0]), ([0, 0, 0, 0], false, 0));
        assert_eq!(merge_line([2, 4, 2, 4]), ([2, 4, 2, 4], false, 0));
        assert_eq!(merge_line([2, 2, 4, 4]), ([4, 8, 0, 0], true, 12));
        assert_eq!(merge_line([2, 0, 0, 2]), ([4, 0, 0, 0], true, 4));
        // pure compress, no merge, still a change and no score
        assert_eq!(merge_line([0, 0, 0, 2]), ([2, 0, 0, 0], true, 0));
        assert_eq!(merge_line([0, 2, 4, 0]), ([2, 4, 0, 0], true, 0));
    }

    #[test]
    fn it_merge_line_merges_each_tile_once() {
        // [2,2,2,2] -> [4,4,0,0], never [8,0,0,0]
        assert_eq!(merge_line([2, 2, 2, 2]), ([4, 4, 0, 0], true, 8));
        // the leading pair merges; the result does not re-merge with the 4
        assert_eq!(merge_line([2, 2, 4, 8]), ([4, 4, 8, 0], true, 4));
        assert_eq!(merge_line([4, 2, 2, 8]), ([4, 4, 8, 0], true, 4));
    }

    #[test]
    fn test_shift_left() {
        let grid = [
            [2, 4, 8, 16],
            [2, 8, 8, 4],
            [4, 0, 0, 4],
            [2, 0, 0, 4],
        ];
        let (out, changed, gained) = shift_grid(&grid, Direction::Left);
        assert_eq!(
            out,
            [
                [2, 4, 8, 16],
                [2, 16, 4, 0],
                [8, 0, 0, 0],
                [2, 4, 0, 0],
            ]
        );
        assert!(changed);
        assert_eq!(gained, 24);
    }

    #[test]
    fn test_shift_right() {
        let grid = [
            [2, 4, 8, 16],
            [2, 8, 8, 4],
            [4, 0, 0, 4],
            [2, 0, 0, 4],
        ];
        let (out, changed, gained) = shift_grid(&grid, Direction::Right);
        assert_eq!(
            out,
            [
                [2, 4, 8, 16],
                [0, 2, 16, 4],
                [0, 0, 0, 8],
                [0, 0, 2, 4],
            ]
        );
        assert!(changed);
        assert_eq!(gained, 24);
    }

    #[test]
    fn test_shift_up() {
        let grid = [
            [2, 4, 8, 16],
            [2, 8, 8, 4],
            [4, 0, 0, 4],
            [2, 0, 0, 4],
        ];
        let (out, changed, gained) = shift_grid(&grid, Direction::Up);
        assert_eq!(
            out,
            [
                [4, 4, 16, 16],
                [4, 8, 0, 8],
                [2, 0, 0, 4],
                [0, 0, 0, 0],
            ]
        );
        assert!(changed);
        assert_eq!(gained, 28);
    }

    #[test]
    fn test_shift_down() {
        let grid = [
            [2, 4, 8, 16],
            [2, 8, 8, 4],
            [4, 0, 0, 4],
            [2, 0, 0, 4],
        ];
        let (out, changed, gained) = shift_grid(&grid, Direction::Down);
        assert_eq!(
            out,
            [
                [0, 0, 0, 0],
                [4, 0, 0, 16],
                [4, 4, 0, 4],
                [2, 8, 16, 8],
            ]
        );
        assert!(changed);
        assert_eq!(gained, 28);
    }

    #[test]
    fn shift_on_unmovable_grid_reports_no_change() {
        let grid = [
            [2, 4, 2, 4],
            [4, 2, 4, 2],
            [2, 4, 2, 4],
            [4, 2, 4, 2],
        ];
        for dir in Direction::ALL {
            let (out, changed, gained) = shift_grid(&grid, dir);
            assert_eq!(out, grid);
            assert!(!changed);
            assert_eq!(gained, 0);
        }
    }

    #[test]
    fn it_spawn_random_tile() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut grid: Grid = [[0; SIZE]; SIZE];
        for expected_empty in (0..SIZE * SIZE).rev() {
            spawn_random_tile(&mut grid, &mut rng);
            assert_eq!(count_empty(&grid), expected_empty);
        }
        assert!(grid.iter().flatten().all(|&v| v == 2 || v == 4));
        // full board: spawning is a no-op
        let full = grid;
        spawn_random_tile(&mut grid, &mut rng);
        assert_eq!(grid, full);
    }

    #[test]
    fn it_has_moves_available() {
        // empty cell
        assert!(has_moves_available(&[
            [2, 4, 2, 4],
            [4, 2, 4, 2],
            [2, 4, 2, 4],
            [4, 2, 4, 0],
        ]));
        // horizontal pair
        assert!(has_moves_available(&[
            [2, 4, 2, 4],
            [4, 2, 4, 2],
            [2, 4, 4, 8],
            [4, 2, 8, 2],
        ]));
        // vertical pair
        assert!(has_moves_available(&[
            [2, 4, 2, 4],
            [4, 2, 4, 2],
            [4, 8, 2, 4],
            [8, 2, 4, 2],
        ]));
        // full, no pairs anywhere
        assert!(!has_moves_available(&[
            [2, 4, 2, 4],
            [4, 2, 4, 2],
            [2, 4, 2, 4],
            [4, 2, 4, 2],
        ]));
    }

    #[test]
    fn it_count_empty_and_highest_tile() {
        let grid = [
            [2, 0, 0, 0],
            [0, 64, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 8],
        ];
        assert_eq!(count_empty(&grid), 13);
        assert_eq!(highest_tile(&grid), 64);
        assert_eq!(highest_tile(&[[0; SIZE]; SIZE]), 0);
        assert_eq!(count_empty(&[[0; SIZE]; SIZE]), 16);
    }
}
