//! Othello-Rust: a rule engine for Othello/Reversi and its bonus-tile variant.
//!
//! The engine keeps a square grid with a per-player ownership index, finds
//! legal placements by scanning outflanking lines in all 8 directions, flips
//! captured runs, and decides when a game is over.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions, cell values, scan directions
//! - [`board`] - Grid, cells, ownership index and scoring
//! - [`movegen`] - Legal move enumeration
//! - [`capture`] - Move execution and flipping
//! - [`game`] - Game configuration, turns, terminal-state detection
//! - [`ai`] - Uniform-random computer player
//! - [`console`] - Line-based text protocol
//! - [`error`] - Engine error type
//!
//! ## Example
//!
//! ```
//! use othello_rust::board::Color;
//! use othello_rust::game::{Game, GameConfig, GameResult};
//!
//! let mut game = Game::new(GameConfig::classic()).unwrap();
//!
//! // Black opens on d3, outflanking the white piece on d4
//! let capture = game.play((3, 2)).unwrap();
//! assert_eq!(capture.flipped, vec![(3, 3)]);
//! assert_eq!(game.grid().score(Color::Black), 4);
//! assert_eq!(game.check_game_over(), GameResult::InProgress);
//! ```

pub mod ai;
pub mod board;
pub mod capture;
pub mod console;
pub mod constants;
pub mod error;
pub mod game;
pub mod movegen;

pub use error::{EngineError, Result};
