//! Core types for the move-selection engine.
//!
//! # Design Principles
//! - Re-export chess crate types as the canonical source for board/move types
//! - Define engine-specific types (Score, Depth) used by search

mod score;
mod depth;

pub use score::{Score, SCORE_INFINITY, SCORE_MATE, SCORE_DRAW};
pub use depth::{BotDepth, Depth, DEFAULT_BOT_DEPTH, MAX_BOT_DEPTH, MIN_BOT_DEPTH};

// Re-export chess crate types as canonical types
pub use chess::{
    Board,
    BoardStatus,
    ChessMove as Move,
    Color,
    MoveGen,
    Piece,
    Square,
    ALL_SQUARES,
};

/// Zobrist hash type (used as the position part of cache keys)
pub type Hash = u64;

/// Node count type
pub type NodeCount = u64;

/// Centipawn value type (for piece values, etc.)
pub type Value = i32;

// Piece values in centipawns
pub const PAWN_VALUE: Value = 100;
pub const KNIGHT_VALUE: Value = 320;
pub const BISHOP_VALUE: Value = 330;
pub const ROOK_VALUE: Value = 500;
pub const QUEEN_VALUE: Value = 900;
/// Only biases move ordering; kings are never captured.
pub const KING_VALUE: Value = 20000;

/// The four central squares favoured by move ordering
pub const CENTER_SQUARES: [Square; 4] = [Square::D4, Square::E4, Square::D5, Square::E5];

/// Get the material value of a piece in centipawns
#[inline]
pub const fn piece_value(piece: Piece) -> Value {
    match piece {
        Piece::Pawn => PAWN_VALUE,
        Piece::Knight => KNIGHT_VALUE,
        Piece::Bishop => BISHOP_VALUE,
        Piece::Rook => ROOK_VALUE,
        Piece::Queen => QUEEN_VALUE,
        Piece::King => KING_VALUE,
    }
}
