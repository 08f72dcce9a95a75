//! Engine module: the 4x4 grid, line reduction, directional moves,
//! tile spawning and the terminal-state check.
//!
//! - `Board` is the grid with ergonomic methods (`apply`, `shift`, `with_random_tile`, ...).
//! - Free functions mirror the methods when convenient (e.g., `apply`, `has_moves`).
//! - Everything here is pure: functions take a `Board` by value and return new values.

mod ops;
pub mod state;

pub use state::{Board, Grid, Line, Move, Score, Tile};

pub use ops::{
    apply, count_empty, empty_cells, generate_random_tile, has_moves, highest_tile, reduce_line,
    spawn, MoveOutcome,
};

/// Side length of the square grid.
pub const GRID_SIZE: usize = 4;

/// Number of tiles spawned when a session starts.
pub const INITIAL_TILES: usize = 2;

/// Largest tile value accepted by the debug override.
pub const MAX_TILE: Tile = 32768;

/// True if `value` may occupy a cell: a power of two >= 2.
///
/// ```
/// use play_2048::engine::is_tile_value;
/// assert!(is_tile_value(2));
/// assert!(is_tile_value(131072));
/// assert!(!is_tile_value(0));
/// assert!(!is_tile_value(1));
/// assert!(!is_tile_value(96));
/// ```
#[inline]
pub fn is_tile_value(value: Tile) -> bool {
    value >= 2 && value.is_power_of_two()
}

/// True if `value` is accepted by the debug override: a power of two in `2..=MAX_TILE`.
///
/// ```
/// use play_2048::engine::is_valid_tile;
/// assert!(is_valid_tile(2));
/// assert!(is_valid_tile(32768));
/// assert!(!is_valid_tile(0));
/// assert!(!is_valid_tile(1));
/// assert!(!is_valid_tile(6));
/// assert!(!is_valid_tile(65536));
/// ```
#[inline]
pub fn is_valid_tile(value: Tile) -> bool {
    is_tile_value(value) && value <= MAX_TILE
}
