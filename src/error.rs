//! Error types for the move-selection engine
//!
//! `PositionError` covers faults reported by the rules-engine adapter;
//! `EngineError` is what move selection hands back to its caller.

use thiserror::Error;

/// Errors raised by a [`Position`](crate::position::Position) implementation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    /// Move is not legal in the current position
    #[error("Illegal move {mv} in position {fen}")]
    IllegalMove { mv: String, fen: String },

    /// `unmake` called with nothing left to undo
    #[error("Cannot unmake: undo stack is empty")]
    EmptyUndoStack,

    /// FEN rejected by the rules engine
    #[error("Invalid FEN '{fen}': {reason}")]
    InvalidFen { fen: String, reason: String },
}

/// Errors that can occur while choosing a move
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The position is terminal; the game is over, nothing is broken
    #[error("No legal moves available - game is over")]
    NoLegalMoves,

    /// The candidate list became empty while picking a move
    #[error("Failed to select a valid move: {reason}")]
    SelectionFailure { reason: String },

    /// The rules engine faulted mid-search; the search session is aborted
    #[error("Search aborted by rules engine fault: {0}")]
    SearchInternal(#[from] PositionError),

    /// A deadline, node budget or stop request ended the search early
    #[error("Search cancelled after {nodes} nodes")]
    Cancelled { nodes: u64 },
}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
