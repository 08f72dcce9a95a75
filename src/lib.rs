//! play-2048: a 2048 game engine and session state machine
//!
//! This crate provides:
//! - A `Board` type with pure operations (`apply`, `shift`, `with_random_tile`, `has_moves`, ...)
//! - A `GameSession` that commits moves, spawns tiles, keeps score and detects game over
//! - A `Leaderboard` seam for offering final scores to whatever stores them
//! - TOML configuration (`config` module)
//!
//! Quick start:
//! ```
//! use play_2048::engine::{Board, Move};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! // Deterministic board initialization with a seeded RNG
//! let mut rng = StdRng::seed_from_u64(42);
//! let b0 = Board::EMPTY.with_random_tile(&mut rng).with_random_tile(&mut rng);
//! let out = b0.apply(Move::Left);
//! assert_eq!(out.board.total(), b0.total());
//! ```
//!
//! Full loop (simplest possible)
//! ```
//! use play_2048::engine::Move;
//! use play_2048::session::GameSession;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut session = GameSession::new(StdRng::seed_from_u64(123));
//! let mut step = 0;
//! while !session.is_game_over() {
//!     session.play(Move::ALL[step % 4]).unwrap();
//!     step += 1;
//! }
//! assert!(session.moves() >= 14);
//! ```
//!
//! Randomness is always injected: every function that spawns a tile takes
//! an `Rng`, so the same seed replays the same game.
//!
pub mod config;
pub mod engine;
pub mod error;
pub mod leaderboard;
pub mod session;

pub use error::GameError;
