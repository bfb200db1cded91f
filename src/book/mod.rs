//! Opening book.
//!
//! A handful of canned main lines, matched against the moves actually played
//! since the initial position. Matching is by move sequence, not by position
//! hash, so a transposed move order that reaches a book position will not be
//! recognised.
//!
//! ```ignore
//! let book = OpeningBook::standard();
//! if let Some(m) = book.lookup(&pos) {
//!     println!("Book move: {}", m);
//! }
//! ```

use crate::position::{parse_move_descriptor, Position};
use crate::types::Move;
use thiserror::Error;

/// The book is consulted while at most this many plies have been played
pub const BOOK_MAX_PLY: usize = 8;

/// Built-in lines, first match wins
const STANDARD_LINES: &[&[&str]] = &[
    // Ruy Lopez
    &["e2e4", "e7e5", "g1f3", "b8c6", "f1b5", "a7a6", "b5a4", "g8f6", "e1g1"],
    // Italian Game
    &["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "f8c5", "c2c3", "g8f6", "d2d4"],
    // Sicilian Najdorf
    &["e2e4", "c7c5", "g1f3", "d7d6", "d2d4", "c5d4", "f3d4", "g8f6", "b1c3"],
    // French Defence
    &["e2e4", "e7e6", "d2d4", "d7d5", "b1c3", "g8f6", "c1g5", "f8e7", "e4e5"],
    // Caro-Kann
    &["e2e4", "c7c6", "d2d4", "d7d5", "b1c3", "d5e4", "c3e4", "c8f5", "e4g3"],
    // Queen's Gambit Declined
    &["d2d4", "d7d5", "c2c4", "e7e6", "b1c3", "g8f6", "c1g5", "f8e7", "e2e3"],
    // King's Indian
    &["d2d4", "g8f6", "c2c4", "g7g6", "b1c3", "f8g7", "e2e4", "d7d6", "g1f3"],
    // English
    &["c2c4", "e7e5", "b1c3", "g8f6", "g1f3", "b8c6", "g2g3", "d7d5", "c4d5"],
];

/// Errors building a book from text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookError {
    #[error("Book line {line}, ply {ply}: cannot parse move '{text}'")]
    InvalidMove { line: usize, ply: usize, text: String },
}

/// Ply-indexed opening book
#[derive(Debug, Clone, Default)]
pub struct OpeningBook {
    lines: Vec<Vec<Move>>,
    max_ply: usize,
}

impl OpeningBook {
    /// A book with no lines
    pub fn empty() -> Self {
        Self {
            lines: Vec::new(),
            max_ply: BOOK_MAX_PLY,
        }
    }

    /// The built-in repertoire
    pub fn standard() -> Self {
        Self::from_lines(STANDARD_LINES).unwrap_or_else(|e| {
            log::error!("built-in opening book rejected: {}", e);
            Self::empty()
        })
    }

    /// Build a book from lines of moves in UCI notation
    pub fn from_lines(lines: &[&[&str]]) -> Result<Self, BookError> {
        let lines = lines
            .iter()
            .enumerate()
            .map(|(line, moves)| {
                moves
                    .iter()
                    .enumerate()
                    .map(|(ply, text)| {
                        parse_move_descriptor(text).ok_or_else(|| BookError::InvalidMove {
                            line,
                            ply,
                            text: text.to_string(),
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            lines,
            max_ply: BOOK_MAX_PLY,
        })
    }

    pub fn with_max_ply(mut self, max_ply: usize) -> Self {
        self.max_ply = max_ply;
        self
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Book move for the current position, if the game is still in book.
    ///
    /// Silent for games that did not start from the initial position.
    pub fn lookup<P: Position>(&self, pos: &P) -> Option<Move> {
        let history = pos.move_history()?;
        if history.len() > self.max_ply {
            return None;
        }
        let legal = pos.legal_moves();
        self.lookup_history(history, &legal)
    }

    /// First line extending `history` whose next move is in `legal`
    pub fn lookup_history(&self, history: &[Move], legal: &[Move]) -> Option<Move> {
        if history.len() > self.max_ply {
            return None;
        }

        self.lines
            .iter()
            .filter(|line| line.len() > history.len() && line.starts_with(history))
            .map(|line| line[history.len()])
            .find(|candidate| legal.contains(candidate))
    }
}
