use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{is_tile_value, ops, GRID_SIZE};
use crate::error::GameError;

pub type Tile = u32;
pub type Score = u64;

/// One row or column, read in the direction tiles slide toward.
pub type Line = [Tile; GRID_SIZE];

/// Row-major cell storage; `grid[row][col]`, row 0 at the top.
pub type Grid = [[Tile; GRID_SIZE]; GRID_SIZE];

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// All four directions, in `Up, Down, Left, Right` order.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Move::Up => "up",
            Move::Down => "down",
            Move::Left => "left",
            Move::Right => "right",
        };
        f.write_str(name)
    }
}

/// Parses direction symbols: `up`, `arrowup`, `w` and friends, case-insensitive.
///
/// ```
/// use play_2048::engine::Move;
/// assert_eq!("Left".parse::<Move>().unwrap(), Move::Left);
/// assert_eq!("ArrowDown".parse::<Move>().unwrap(), Move::Down);
/// assert_eq!("w".parse::<Move>().unwrap(), Move::Up);
/// assert!("sideways".parse::<Move>().is_err());
/// ```
impl FromStr for Move {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "arrowup" | "w" => Ok(Move::Up),
            "down" | "arrowdown" | "s" => Ok(Move::Down),
            "left" | "arrowleft" | "a" => Ok(Move::Left),
            "right" | "arrowright" | "d" => Ok(Move::Right),
            _ => Err(GameError::InvalidDirection(s.to_string())),
        }
    }
}

/// The 4x4 grid. Every cell holds 0 (empty) or a power of two >= 2.
///
/// `Board` is `Copy`; every operation returns a new board and leaves the
/// receiver untouched.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Grid", into = "Grid")]
pub struct Board(pub(crate) Grid);

impl Board {
    /// A constant empty board (all zeros).
    pub const EMPTY: Board = Board([[0; GRID_SIZE]; GRID_SIZE]);

    /// Construct a `Board` from rows, top row first.
    ///
    /// # Panics
    /// If any cell is neither 0 nor a power of two >= 2. Use `Board::try_from`
    /// to get an error instead.
    ///
    /// ```
    /// use play_2048::engine::Board;
    /// let b = Board::from_rows([[2, 0, 0, 0], [0; 4], [0; 4], [0, 0, 0, 4]]);
    /// assert_eq!(b.tile(0, 0), 2);
    /// assert_eq!(b.tile(3, 3), 4);
    /// ```
    pub fn from_rows(rows: Grid) -> Self {
        match Board::try_from(rows) {
            Ok(board) => board,
            Err(e) => panic!("{e}"),
        }
    }

    /// Copy out the rows, top row first.
    #[inline]
    pub fn rows(&self) -> Grid {
        self.0
    }

    /// Value at `(row, col)`, 0 if empty. Row 0 is the top row.
    #[inline]
    pub fn tile(&self, row: usize, col: usize) -> Tile {
        self.0[row][col]
    }

    /// Return a copy with `(row, col)` set to `value`.
    #[inline]
    pub(crate) fn with_tile(mut self, row: usize, col: usize, value: Tile) -> Self {
        debug_assert!(value == 0 || is_tile_value(value));
        self.0[row][col] = value;
        self
    }

    /// Slide/merge tiles in `dir`, returning the new grid, the score gained and
    /// whether anything moved. No random insert.
    ///
    /// ```
    /// use play_2048::engine::{Board, Move};
    /// let b = Board::from_rows([[2, 2, 2, 2], [0; 4], [0; 4], [0; 4]]);
    /// let out = b.apply(Move::Left);
    /// assert!(out.changed);
    /// assert_eq!(out.score_delta, 8);
    /// assert_eq!(out.board.rows()[0], [4, 4, 0, 0]);
    /// ```
    #[inline]
    pub fn apply(self, dir: Move) -> ops::MoveOutcome {
        ops::apply(self, dir)
    }

    /// Return the board resulting from sliding/merging tiles in `dir`.
    #[inline]
    pub fn shift(self, dir: Move) -> Self {
        ops::apply(self, dir).board
    }

    /// Insert a random 2 (90%) or 4 (10%) tile into a random empty slot, using the provided RNG.
    /// A full board is returned unchanged.
    ///
    /// Deterministic example using a seeded RNG:
    /// ```
    /// use play_2048::engine::Board;
    /// use rand::{SeedableRng, rngs::StdRng};
    /// let mut rng = StdRng::seed_from_u64(123);
    /// let b = Board::EMPTY.with_random_tile(&mut rng).with_random_tile(&mut rng);
    /// assert_eq!(b.count_empty(), 14);
    /// ```
    #[inline]
    pub fn with_random_tile<R: Rng + ?Sized>(self, rng: &mut R) -> Self {
        ops::spawn(self, rng)
    }

    /// Return true if at least one legal move remains.
    ///
    /// ```
    /// use play_2048::engine::Board;
    /// assert!(Board::EMPTY.has_moves());
    /// let stuck = Board::from_rows([
    ///     [2, 4, 2, 4],
    ///     [4, 2, 4, 2],
    ///     [2, 4, 2, 4],
    ///     [4, 2, 4, 2],
    /// ]);
    /// assert!(!stuck.has_moves());
    /// ```
    #[inline]
    pub fn has_moves(self) -> bool {
        ops::has_moves(self)
    }

    /// Return the highest tile value (e.g., 2048) present on the board, 0 if empty.
    #[inline]
    pub fn highest_tile(self) -> Tile {
        ops::highest_tile(self)
    }

    /// Count the number of empty cells on the board.
    #[inline]
    pub fn count_empty(self) -> usize {
        ops::count_empty(self)
    }

    /// Sum of every tile on the board.
    #[inline]
    pub fn total(self) -> Score {
        self.tiles().map(Score::from).sum()
    }

    /// Iterate over tile values in row-major order.
    #[inline]
    pub fn tiles(self) -> impl Iterator<Item = Tile> {
        self.0.into_iter().flatten()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Board").field(&self.0).finish()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = "-".repeat(8 * GRID_SIZE - 1);
        writeln!(f)?;
        for (idx, row) in self.0.iter().enumerate() {
            if idx > 0 {
                writeln!(f, "{separator}")?;
            }
            let cells: Vec<String> = row.iter().map(|&v| format_val(v)).collect();
            writeln!(f, "{}", cells.join("|"))?;
        }
        Ok(())
    }
}

impl TryFrom<Grid> for Board {
    type Error = GameError;

    fn try_from(rows: Grid) -> Result<Self, Self::Error> {
        for row in &rows {
            for &value in row {
                if value != 0 && !is_tile_value(value) {
                    return Err(GameError::InvalidTile(value));
                }
            }
        }
        Ok(Board(rows))
    }
}

impl From<Board> for Grid {
    fn from(b: Board) -> Self {
        b.0
    }
}

fn format_val(val: Tile) -> String {
    match val {
        0 => String::from("       "),
        x => format!("{:^7}", x),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_direction_symbols() {
        for (sym, dir) in [
            ("up", Move::Up),
            ("DOWN", Move::Down),
            ("ArrowLeft", Move::Left),
            ("arrowright", Move::Right),
            ("  a ", Move::Left),
            ("D", Move::Right),
            ("s", Move::Down),
        ] {
            assert_eq!(sym.parse::<Move>().unwrap(), dir, "symbol {sym:?}");
        }
    }

    #[test]
    fn rejects_unknown_direction() {
        match "north".parse::<Move>() {
            Err(GameError::InvalidDirection(s)) => assert_eq!(s, "north"),
            other => panic!("unexpected {other:?}"),
        }
        assert!("".parse::<Move>().is_err());
    }

    #[test]
    fn display_round_trips_through_parse() {
        for dir in Move::ALL {
            assert_eq!(dir.to_string().parse::<Move>().unwrap(), dir);
        }
    }

    #[test]
    #[should_panic(expected = "invalid tile value 3")]
    fn from_rows_rejects_non_power_of_two() {
        let _ = Board::from_rows([[3, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
    }

    #[test]
    fn rebuilds_boards_past_the_override_limit() {
        let rows = [[65536, 131072, 0, 0], [32768, 0, 0, 0], [0; 4], [0, 0, 0, 2]];
        let b = Board::from_rows(rows);
        assert_eq!(Board::from_rows(b.rows()), b);
        assert_eq!(b.highest_tile(), 131072);
    }

    #[test]
    fn try_from_reports_bad_cells() {
        assert_eq!(
            Board::try_from([[2, 0, 0, 0], [0, 12, 0, 0], [0; 4], [0; 4]]),
            Err(GameError::InvalidTile(12))
        );
        assert_eq!(
            Board::try_from([[1, 0, 0, 0], [0; 4], [0; 4], [0; 4]]),
            Err(GameError::InvalidTile(1))
        );
    }

    #[test]
    fn display_renders_every_row() {
        let b = Board::from_rows([[2, 0, 0, 0], [0, 2048, 0, 0], [0; 4], [0, 0, 0, 16]]);
        let s = b.to_string();
        assert_eq!(s.lines().filter(|l| l.contains('|')).count(), GRID_SIZE);
        assert!(s.contains("2048"));
        assert!(s.contains("16"));
    }

    #[test]
    fn total_sums_tiles() {
        let b = Board::from_rows([[2, 4, 0, 0], [0; 4], [8, 0, 0, 0], [0, 0, 0, 2]]);
        assert_eq!(b.total(), 16);
        assert_eq!(Board::EMPTY.total(), 0);
    }

    #[test]
    fn serializes_as_nested_rows() {
        let b = Board::from_rows([[2, 0, 0, 0], [0; 4], [0; 4], [0, 0, 0, 4]]);
        let json = serde_json::to_string(&b).unwrap();
        assert_eq!(json, "[[2,0,0,0],[0,0,0,0],[0,0,0,0],[0,0,0,4]]");
        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(back, b);
    }

    #[test]
    fn deserializing_checks_tile_values() {
        let err = serde_json::from_str::<Board>("[[3,0,0,0],[0,0,0,0],[0,0,0,0],[0,0,0,0]]");
        assert!(err.unwrap_err().to_string().contains("invalid tile value 3"));
    }
}
