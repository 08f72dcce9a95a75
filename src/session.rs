//! Game session: owns the board, score and random source, and drives the
//! `Active -> GameOver -> Active` cycle.

use log::{debug, info};
use rand::Rng;
use serde::Serialize;

use crate::engine::{
    is_tile_value, is_valid_tile, Board, Move, Score, Tile, GRID_SIZE, INITIAL_TILES,
};
use crate::error::GameError;
use crate::leaderboard::{Initials, Leaderboard};

/// Tile value a session treats as the goal unless told otherwise.
pub const DEFAULT_TARGET: Tile = 2048;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    Active,
    GameOver,
}

/// What happened to the session after one move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveReport {
    /// False when the direction was blocked; nothing else changed in that case.
    pub changed: bool,
    pub score_delta: Score,
    /// Score after the move.
    pub score: Score,
    pub game_over: bool,
}

/// Everything a renderer needs to redraw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub board: Board,
    pub score: Score,
    pub game_over: bool,
    pub highest_tile: Tile,
    pub reached_target: bool,
}

/// A single game. Moves are applied one at a time; hosts sharing a session
/// across threads must serialize calls themselves.
#[derive(Debug, Clone)]
pub struct GameSession<R> {
    board: Board,
    score: Score,
    status: Status,
    moves: u64,
    target: Tile,
    rng: R,
}

impl<R: Rng> GameSession<R> {
    /// Start a session with two random tiles.
    ///
    /// ```
    /// use play_2048::session::{GameSession, Status};
    /// use rand::{rngs::StdRng, SeedableRng};
    /// let session = GameSession::new(StdRng::seed_from_u64(42));
    /// assert_eq!(session.board().count_empty(), 14);
    /// assert_eq!(session.score(), 0);
    /// assert_eq!(session.status(), Status::Active);
    /// ```
    pub fn new(rng: R) -> Self {
        let mut session = Self {
            board: Board::EMPTY,
            score: 0,
            status: Status::Active,
            moves: 0,
            target: DEFAULT_TARGET,
            rng,
        };
        session.restart();
        session
    }

    /// Start from a given board with score 0. The status is computed from the board.
    pub fn with_board(board: Board, rng: R) -> Self {
        let status = if board.has_moves() { Status::Active } else { Status::GameOver };
        Self { board, score: 0, status, moves: 0, target: DEFAULT_TARGET, rng }
    }

    /// Set the goal tile.
    ///
    /// # Panics
    /// If `target` is not a power of two >= 2.
    pub fn with_target(mut self, target: Tile) -> Self {
        assert!(is_tile_value(target), "unsupported target tile {target}");
        self.target = target;
        self
    }

    /// Slide in `dir`. A blocked direction is reported with `changed == false`
    /// and leaves the session untouched; otherwise the move is committed, one
    /// tile is spawned and the terminal check runs.
    pub fn play(&mut self, dir: Move) -> Result<MoveReport, GameError> {
        if self.status == Status::GameOver {
            return Err(GameError::GameOver);
        }
        let outcome = self.board.apply(dir);
        if !outcome.changed {
            debug!("move {dir} blocked");
            return Ok(MoveReport {
                changed: false,
                score_delta: 0,
                score: self.score,
                game_over: false,
            });
        }

        self.board = outcome.board.with_random_tile(&mut self.rng);
        self.score += outcome.score_delta;
        self.moves += 1;
        debug!("move {dir}: +{} (score {})", outcome.score_delta, self.score);

        if !self.board.has_moves() {
            self.status = Status::GameOver;
            info!(
                "game over after {} moves: score {}, highest tile {}",
                self.moves,
                self.score,
                self.board.highest_tile()
            );
        }
        Ok(MoveReport {
            changed: true,
            score_delta: outcome.score_delta,
            score: self.score,
            game_over: self.status == Status::GameOver,
        })
    }

    /// Parse a direction symbol (see [`Move`]'s `FromStr`) and play it.
    pub fn play_str(&mut self, symbol: &str) -> Result<MoveReport, GameError> {
        let dir: Move = symbol.parse()?;
        self.play(dir)
    }

    /// Clear the board, reset the score and spawn the initial tiles.
    pub fn restart(&mut self) {
        let mut board = Board::EMPTY;
        for _ in 0..INITIAL_TILES {
            board = board.with_random_tile(&mut self.rng);
        }
        self.board = board;
        self.score = 0;
        self.moves = 0;
        self.status = Status::Active;
        info!("new game started");
    }

    /// Debug override: place `value` at `(x, y)`, origin bottom-left.
    ///
    /// Does not spawn, score or re-run the terminal check.
    ///
    /// ```
    /// use play_2048::session::GameSession;
    /// use rand::{rngs::StdRng, SeedableRng};
    /// let mut session = GameSession::new(StdRng::seed_from_u64(1));
    /// session.set_tile(32, 0, 3).unwrap();
    /// assert_eq!(session.board().tile(0, 0), 32);
    /// assert!(session.set_tile(3, 0, 0).is_err());
    /// assert!(session.set_tile(2, 4, 0).is_err());
    /// ```
    pub fn set_tile(&mut self, value: Tile, x: usize, y: usize) -> Result<(), GameError> {
        if !is_valid_tile(value) {
            return Err(GameError::InvalidDebugValue(value));
        }
        if x >= GRID_SIZE || y >= GRID_SIZE {
            return Err(GameError::InvalidDebugCoordinate { x, y });
        }
        let (row, col) = (GRID_SIZE - 1 - y, x);
        debug!("override: {value} at row {row}, col {col}");
        self.board = self.board.with_tile(row, col, value);
        Ok(())
    }

    /// Offer the final score to `leaderboard`; it is submitted only when it
    /// beats the current top entry. Returns whether it was submitted.
    pub fn offer_score<L: Leaderboard + ?Sized>(
        &self,
        initials: &Initials,
        leaderboard: &mut L,
    ) -> Result<bool, GameError> {
        if self.status != Status::GameOver {
            return Err(GameError::NotGameOver);
        }
        if self.score > leaderboard.top().top_score {
            leaderboard.submit(initials, self.score);
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

impl<R> GameSession<R> {
    /// Copy of the current board.
    pub fn board(&self) -> Board {
        self.board
    }

    /// Score accumulated from merges since the last (re)start.
    pub fn score(&self) -> Score {
        self.score
    }

    /// Current state of the `Active -> GameOver` cycle.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Shorthand for `status() == Status::GameOver`.
    pub fn is_game_over(&self) -> bool {
        self.status == Status::GameOver
    }

    /// Accepted moves since the last (re)start.
    pub fn moves(&self) -> u64 {
        self.moves
    }

    /// Goal tile reported by `reached_target`.
    pub fn target(&self) -> Tile {
        self.target
    }

    /// True once any tile has reached the target. Play continues regardless.
    pub fn reached_target(&self) -> bool {
        self.board.highest_tile() >= self.target
    }

    /// Board, score and flags for the renderer.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board,
            score: self.score,
            game_over: self.is_game_over(),
            highest_tile: self.board.highest_tile(),
            reached_target: self.reached_target(),
        }
    }
}
