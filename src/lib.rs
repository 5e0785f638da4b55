//! go-referee: a rules engine for the game of Go.
//!
//! This crate plays referee for a two-player game on any board from 1x1 up to
//! 255x255: it places stones, resolves captures (self-capture included),
//! enforces positional superko, and scores the final position by area.
//!
//! ## Modules
//!
//! - [`constants`] - Board limits, defaults, and storage parameters
//! - [`board`] - Packed cell storage and the [`Grid`]
//! - [`capture`] - Stone placement and liberty analysis
//! - [`territory`] - Territory assignment and scoring
//! - [`history`] - Trie of every position reached, for superko
//! - [`game`] - Turns, passes, forfeits, and the result
//! - [`shell`] - Line-based command interface
//! - [`error`] - Error type
//!
//! ## Example
//!
//! ```
//! use go_referee::{Game, GameError, Winner};
//!
//! let mut game = Game::new(9, 9, 7).unwrap();
//! game.play((2, 2)).unwrap();
//! assert_eq!(game.play((2, 2)), Err(GameError::AlreadyOccupied));
//!
//! game.pass().unwrap();
//! game.pass().unwrap();
//! assert_eq!(game.winner(), Winner::Black);
//! ```

pub mod board;
pub mod capture;
pub mod constants;
pub mod error;
pub mod game;
pub mod history;
pub mod shell;
pub mod territory;

pub use board::{CellBuf, Color, Grid, Point};
pub use capture::Placement;
pub use error::GameError;
pub use game::{Game, Winner};
pub use history::RepetitionHistory;
