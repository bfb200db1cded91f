//! MinimaxBot - move selection for an automated chess player.
//!
//! The crate picks a move for the side to move in a [`Position`]:
//! - `book`: short hard-coded opening lines keyed by the game's move history
//! - `eval`: material-only static evaluation
//! - `search`: negamax alpha-beta with quiescence and a transposition table
//! - `engine`: [`Engine::choose_move`], gluing book, search and fallbacks
//! - `uci`: a minimal UCI front-end for driving the engine from a GUI
//!
//! Rules (move generation, check and mate detection) come from the
//! `chess` crate behind the [`Position`] trait.

pub mod book;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod position;
pub mod search;
pub mod types;
pub mod uci;

pub use book::{BookError, OpeningBook};
pub use config::{EngineConfig, SelectionMode};
pub use engine::{Engine, MoveSource};
pub use error::{EngineError, EngineResult, PositionError};
pub use position::{GameState, GameStatus, MoveGuard, Position};
pub use search::{SearchLimits, SearchResult, Searcher};
pub use types::{BotDepth, Depth, Move, Score};
