use log::debug;
use rand::Rng;

use super::state::{Board, Grid, Line, Move, Score, Tile};
use super::GRID_SIZE;

/// Result of sliding a board in one direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    /// The board after the slide (no random tile inserted).
    pub board: Board,
    /// Sum of every tile produced by a merge during the slide.
    pub score_delta: Score,
    /// True iff at least one line differs from its pre-move contents.
    pub changed: bool,
}

/// Reduce one line toward index 0: compress, merge equal neighbours in a
/// single left-to-right pass, compress again.
///
/// Returns the new line and the score gained. A tile produced by a merge is
/// never merged again within the same call.
///
/// ```
/// use play_2048::engine::reduce_line;
/// assert_eq!(reduce_line([2, 2, 2, 2]), ([4, 4, 0, 0], 8));
/// assert_eq!(reduce_line([0, 2, 0, 2]), ([4, 0, 0, 0], 4));
/// assert_eq!(reduce_line([4, 2, 2, 4]), ([4, 4, 4, 0], 4));
/// ```
pub fn reduce_line(line: Line) -> (Line, Score) {
    let mut line = compress(line);
    let gained = combine(&mut line);
    (compress(line), gained)
}

fn compress(line: Line) -> Line {
    let mut out = [0; GRID_SIZE];
    for (slot, tile) in out.iter_mut().zip(line.into_iter().filter(|&t| t != 0)) {
        *slot = tile;
    }
    out
}

/// Two tiles merge when they are equal, non-empty and their sum still fits a `Tile`.
#[inline]
fn merged(a: Tile, b: Tile) -> Option<Tile> {
    if a != 0 && a == b {
        a.checked_mul(2)
    } else {
        None
    }
}

fn combine(line: &mut Line) -> Score {
    let mut gained = 0;
    for idx in 0..GRID_SIZE - 1 {
        if let Some(value) = merged(line[idx], line[idx + 1]) {
            line[idx] = value;
            line[idx + 1] = 0;
            gained += Score::from(value);
        }
    }
    gained
}

/// Grid coordinates `(row, col)` of the `k`-th cell of line `idx` when sliding
/// in `dir`. Index 0 of a line is the edge tiles slide toward.
#[inline]
fn cell(dir: Move, idx: usize, k: usize) -> (usize, usize) {
    let last = GRID_SIZE - 1;
    match dir {
        Move::Left => (idx, k),
        Move::Right => (idx, last - k),
        Move::Up => (k, idx),
        Move::Down => (last - k, idx),
    }
}

fn read_line(grid: &Grid, dir: Move, idx: usize) -> Line {
    let mut line = [0; GRID_SIZE];
    for (k, slot) in line.iter_mut().enumerate() {
        let (row, col) = cell(dir, idx, k);
        *slot = grid[row][col];
    }
    line
}

fn write_line(grid: &mut Grid, dir: Move, idx: usize, line: Line) {
    for (k, &value) in line.iter().enumerate() {
        let (row, col) = cell(dir, idx, k);
        grid[row][col] = value;
    }
}

/// Slide/merge every line of `board` in `dir`. No randomness, no mutation of the input.
pub fn apply(board: Board, dir: Move) -> MoveOutcome {
    let mut grid = board.0;
    let mut score_delta = 0;
    let mut changed = false;
    for idx in 0..GRID_SIZE {
        let before = read_line(&board.0, dir, idx);
        let (after, gained) = reduce_line(before);
        changed |= after != before;
        score_delta += gained;
        write_line(&mut grid, dir, idx, after);
    }
    MoveOutcome { board: Board(grid), score_delta, changed }
}

/// Coordinates `(row, col)` of every empty cell, row-major.
pub fn empty_cells(board: Board) -> Vec<(usize, usize)> {
    let mut cells = Vec::with_capacity(GRID_SIZE * GRID_SIZE);
    for (row, line) in board.0.iter().enumerate() {
        for (col, &value) in line.iter().enumerate() {
            if value == 0 {
                cells.push((row, col));
            }
        }
    }
    cells
}

/// Count the number of zero tiles.
pub fn count_empty(board: Board) -> usize {
    board.tiles().filter(|&t| t == 0).count()
}

/// Highest tile value on the board, 0 for an empty board.
pub fn highest_tile(board: Board) -> Tile {
    board.tiles().max().unwrap_or(0)
}

/// A new tile value: 2 with probability 0.9, else 4.
pub fn generate_random_tile<R: Rng + ?Sized>(rng: &mut R) -> Tile {
    if rng.gen_range(0..10) < 9 {
        2
    } else {
        4
    }
}

/// Insert a random tile into a uniformly chosen empty cell. A full board is
/// returned unchanged.
pub fn spawn<R: Rng + ?Sized>(board: Board, rng: &mut R) -> Board {
    let empty = empty_cells(board);
    if empty.is_empty() {
        debug!("spawn skipped: board full");
        return board;
    }
    let (row, col) = empty[rng.gen_range(0..empty.len())];
    let value = generate_random_tile(rng);
    debug!("spawned {value} at row {row}, col {col}");
    board.with_tile(row, col, value)
}

/// True if any cell is empty or any two 4-neighbours hold the same value.
///
/// Each cell is compared with its right and lower neighbour; the last column
/// has no right neighbour and the last row no lower one, which still covers
/// every adjacent pair exactly once.
pub fn has_moves(board: Board) -> bool {
    let grid = &board.0;
    for row in 0..GRID_SIZE {
        for col in 0..GRID_SIZE {
            let value = grid[row][col];
            if value == 0 {
                return true;
            }
            if col + 1 < GRID_SIZE && merged(value, grid[row][col + 1]).is_some() {
                return true;
            }
            if row + 1 < GRID_SIZE && merged(value, grid[row + 1][col]).is_some() {
                return true;
            }
        }
    }
    false
}
