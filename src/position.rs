//! Position adapter over the `chess` crate.
//!
//! Search only ever talks to the [`Position`] trait. [`GameState`] is the
//! `chess`-backed implementation: copy-make boards kept on an undo stack so
//! that `make`/`unmake` behave like an in-place mutable board.
//!
//! [`MoveGuard`] pairs every `make` with an `unmake`. Search descends through
//! a guard and never calls `unmake` by hand, so the position is restored on
//! cutoffs, cancellation and error propagation alike.

use crate::error::PositionError;
use crate::types::{Board, BoardStatus, Color, Hash, Move, MoveGen, Piece, Square};
use chess::EMPTY;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;

/// Terminal status of a position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    /// Side to move is in check with no legal moves
    Checkmate,
    /// Side to move has no legal moves and is not in check
    Stalemate,
    /// Any other drawn terminal (insufficient material)
    Draw,
}

/// Capability set the search consumes from the rules engine.
pub trait Position {
    fn side_to_move(&self) -> Color;

    fn legal_moves(&self) -> Vec<Move>;

    /// True for ordinary captures and en passant
    fn is_capture(&self, mv: Move) -> bool;

    fn piece_at(&self, sq: Square) -> Option<(Piece, Color)>;

    /// Play `mv`. Illegal moves are rejected and leave the position untouched.
    fn make(&mut self, mv: Move) -> Result<(), PositionError>;

    /// Take back the most recent `make`, returning the move undone.
    fn unmake(&mut self) -> Result<Move, PositionError>;

    fn status(&self) -> GameStatus;

    fn is_check(&self) -> bool;

    /// Canonical encoding used as the position part of cache keys.
    fn key(&self) -> Hash;

    /// Moves played since the standard initial position, or `None` when the
    /// game started from some other setup.
    fn move_history(&self) -> Option<&[Move]>;

    #[inline]
    fn is_game_over(&self) -> bool {
        self.status() != GameStatus::Ongoing
    }

    #[inline]
    fn is_checkmate(&self) -> bool {
        self.status() == GameStatus::Checkmate
    }

    #[inline]
    fn is_stalemate(&self) -> bool {
        self.status() == GameStatus::Stalemate
    }
}

/// A game in progress, backed by `chess::Board`.
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    undo: Vec<Board>,
    played: Vec<Move>,
    from_startpos: bool,
}

impl GameState {
    /// Standard initial position
    pub fn new() -> Self {
        Self::from_board(Board::default())
    }

    pub fn from_fen(fen: &str) -> Result<Self, PositionError> {
        let board = Board::from_str(fen).map_err(|e| PositionError::InvalidFen {
            fen: fen.to_string(),
            reason: format!("{:?}", e),
        })?;
        Ok(Self::from_board(board))
    }

    pub fn from_board(board: Board) -> Self {
        Self {
            board,
            undo: Vec::new(),
            played: Vec::new(),
            from_startpos: board == Board::default(),
        }
    }

    /// Current board
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Number of plies that can still be unmade
    #[inline]
    pub fn ply_count(&self) -> usize {
        self.played.len()
    }

    /// Neither side can ever mate: bare kings, a single minor piece, or
    /// bishops only, all standing on squares of one colour
    fn insufficient_material(&self) -> bool {
        let heavy = *self.board.pieces(Piece::Pawn)
            | *self.board.pieces(Piece::Rook)
            | *self.board.pieces(Piece::Queen);
        if heavy.popcnt() > 0 {
            return false;
        }

        let knights = self.board.pieces(Piece::Knight).popcnt();
        let bishops = *self.board.pieces(Piece::Bishop);
        if knights + bishops.popcnt() <= 1 {
            return true;
        }
        if knights > 0 {
            return false;
        }

        let mut shades = bishops.map(|sq| (sq.get_rank().to_index() + sq.get_file().to_index()) % 2);
        match shades.next() {
            Some(first) => shades.all(|shade| shade == first),
            None => true,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl Position for GameState {
    #[inline]
    fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    fn legal_moves(&self) -> Vec<Move> {
        MoveGen::new_legal(&self.board).collect()
    }

    fn is_capture(&self, mv: Move) -> bool {
        if self.board.piece_on(mv.get_dest()).is_some() {
            return true;
        }
        // En passant: pawn changes file onto an empty square
        self.board.piece_on(mv.get_source()) == Some(Piece::Pawn)
            && mv.get_source().get_file() != mv.get_dest().get_file()
    }

    fn piece_at(&self, sq: Square) -> Option<(Piece, Color)> {
        match (self.board.piece_on(sq), self.board.color_on(sq)) {
            (Some(p), Some(c)) => Some((p, c)),
            _ => None,
        }
    }

    fn make(&mut self, mv: Move) -> Result<(), PositionError> {
        if !self.board.legal(mv) {
            return Err(PositionError::IllegalMove {
                mv: mv.to_string(),
                fen: self.board.to_string(),
            });
        }
        self.undo.push(self.board);
        self.played.push(mv);
        self.board = self.board.make_move_new(mv);
        Ok(())
    }

    fn unmake(&mut self) -> Result<Move, PositionError> {
        match (self.undo.pop(), self.played.pop()) {
            (Some(board), Some(mv)) => {
                self.board = board;
                Ok(mv)
            }
            _ => Err(PositionError::EmptyUndoStack),
        }
    }

    fn status(&self) -> GameStatus {
        match self.board.status() {
            BoardStatus::Checkmate => GameStatus::Checkmate,
            BoardStatus::Stalemate => GameStatus::Stalemate,
            BoardStatus::Ongoing if self.insufficient_material() => GameStatus::Draw,
            BoardStatus::Ongoing => GameStatus::Ongoing,
        }
    }

    #[inline]
    fn is_check(&self) -> bool {
        *self.board.checkers() != EMPTY
    }

    #[inline]
    fn key(&self) -> Hash {
        self.board.get_hash()
    }

    fn move_history(&self) -> Option<&[Move]> {
        if self.from_startpos {
            Some(&self.played)
        } else {
            None
        }
    }
}

/// Scoped make/unmake: the move is made on construction and unmade on drop.
pub struct MoveGuard<'a, P: Position> {
    pos: &'a mut P,
}

impl<'a, P: Position> MoveGuard<'a, P> {
    pub fn new(pos: &'a mut P, mv: Move) -> Result<Self, PositionError> {
        pos.make(mv)?;
        Ok(Self { pos })
    }
}

impl<P: Position> Deref for MoveGuard<'_, P> {
    type Target = P;

    fn deref(&self) -> &P {
        self.pos
    }
}

impl<P: Position> DerefMut for MoveGuard<'_, P> {
    fn deref_mut(&mut self) -> &mut P {
        self.pos
    }
}

impl<P: Position> Drop for MoveGuard<'_, P> {
    fn drop(&mut self) {
        if let Err(e) = self.pos.unmake() {
            log::error!("move guard failed to restore position: {}", e);
        }
    }
}

/// Parse a move string (e.g., "e2e4", "e7e8q") without a board.
///
/// Only builds the descriptor; legality is up to the caller.
pub fn parse_move_descriptor(move_str: &str) -> Option<Move> {
    let move_str = move_str.trim();
    if move_str.len() < 4 || move_str.len() > 5 || !move_str.is_ascii() {
        return None;
    }

    let from = Square::from_str(&move_str[0..2]).ok()?;
    let to = Square::from_str(&move_str[2..4]).ok()?;

    let promo = match move_str.chars().nth(4) {
        None => None,
        Some('q') | Some('Q') => Some(Piece::Queen),
        Some('r') | Some('R') => Some(Piece::Rook),
        Some('b') | Some('B') => Some(Piece::Bishop),
        Some('n') | Some('N') => Some(Piece::Knight),
        Some(_) => return None,
    };

    Some(Move::new(from, to, promo))
}

/// Parse a move string and check it against the legal moves of `pos`.
pub fn parse_move<P: Position>(pos: &P, move_str: &str) -> Option<Move> {
    let mv = parse_move_descriptor(move_str)?;
    pos.legal_moves().into_iter().find(|&m| m == mv)
}

/// Format a move to UCI notation (e.g., "e2e4", "e7e8q")
pub fn format_move(m: Move) -> String {
    let mut s = format!("{}{}", m.get_source(), m.get_dest());
    if let Some(promo) = m.get_promotion() {
        s.push(match promo {
            Piece::Queen => 'q',
            Piece::Rook => 'r',
            Piece::Bishop => 'b',
            _ => 'n',
        });
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mv(s: &str) -> Move {
        parse_move_descriptor(s).unwrap()
    }

    #[test]
    fn test_make_unmake_restores_key() {
        let mut pos = GameState::new();
        let before = pos.key();
        pos.make(mv("e2e4")).unwrap();
        assert_ne!(pos.key(), before);
        assert_eq!(pos.side_to_move(), Color::Black);
        assert_eq!(pos.unmake().unwrap(), mv("e2e4"));
        assert_eq!(pos.key(), before);
        assert_eq!(pos.board(), &Board::default());
    }

    #[test]
    fn test_illegal_move_rejected() {
        let mut pos = GameState::new();
        let err = pos.make(mv("e2e5")).unwrap_err();
        assert!(matches!(err, PositionError::IllegalMove { .. }));
        assert_eq!(pos.ply_count(), 0);
    }

    #[test]
    fn test_unmake_on_empty_stack() {
        let mut pos = GameState::new();
        assert_eq!(pos.unmake(), Err(PositionError::EmptyUndoStack));
    }

    #[test]
    fn test_guard_unmakes_on_drop() {
        let mut pos = GameState::new();
        let before = pos.key();
        {
            let mut child = MoveGuard::new(&mut pos, mv("g1f3")).unwrap();
            assert_eq!(child.side_to_move(), Color::Black);
            let grandchild = MoveGuard::new(&mut *child, mv("g8f6")).unwrap();
            assert_eq!(grandchild.ply_count(), 2);
        }
        assert_eq!(pos.key(), before);
        assert_eq!(pos.ply_count(), 0);
    }

    #[test]
    fn test_guard_unmakes_on_early_return() {
        fn fails_midway(pos: &mut GameState) -> Result<(), PositionError> {
            let mut child = MoveGuard::new(pos, mv("e2e4"))?;
            Position::make(&mut *child, mv("e2e4"))?; // no longer legal
            Ok(())
        }

        let mut pos = GameState::new();
        assert!(fails_midway(&mut pos).is_err());
        assert_eq!(pos.board(), &Board::default());
    }

    #[test]
    fn test_en_passant_is_capture() {
        let pos = GameState::from_fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3")
            .unwrap();
        assert!(pos.is_capture(mv("e5f6")));
        assert!(!pos.is_capture(mv("e5e6")));
    }

    #[test]
    fn test_status() {
        // Fool's mate: white is mated
        let mate = GameState::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
            .unwrap();
        assert!(mate.is_checkmate());
        assert!(mate.is_check());

        let stalemate = GameState::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(stalemate.is_stalemate());

        let bare = GameState::from_fen("8/8/4k3/8/8/3NK3/8/8 w - - 0 1").unwrap();
        assert_eq!(bare.status(), GameStatus::Draw);

        assert_eq!(GameState::new().status(), GameStatus::Ongoing);
    }

    #[test]
    fn test_bishops_draw_only_on_one_colour() {
        // d3 and c4 are both light squares
        let same = GameState::from_fen("8/8/4k3/8/2b5/3BK3/8/8 w - - 0 1").unwrap();
        assert_eq!(same.status(), GameStatus::Draw);

        let opposite = GameState::from_fen("5b2/8/4k3/8/8/3BK3/8/8 w - - 0 1").unwrap();
        assert_eq!(opposite.status(), GameStatus::Ongoing);

        let with_knight = GameState::from_fen("8/8/4k3/8/n7/3BK3/8/8 w - - 0 1").unwrap();
        assert_eq!(with_knight.status(), GameStatus::Ongoing);
    }

    #[test]
    fn test_history_only_from_startpos() {
        let mut pos = GameState::new();
        pos.make(mv("d2d4")).unwrap();
        assert_eq!(pos.move_history(), Some(&[mv("d2d4")][..]));

        let custom = GameState::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").unwrap();
        assert!(custom.move_history().is_none());
    }

    #[test]
    fn test_invalid_fen() {
        assert!(matches!(
            GameState::from_fen("not a fen"),
            Err(PositionError::InvalidFen { .. })
        ));
    }

    #[test]
    fn test_move_parsing() {
        let pos = GameState::new();
        assert_eq!(parse_move(&pos, "e2e4"), Some(mv("e2e4")));
        assert_eq!(parse_move(&pos, "e2e5"), None);
        assert_eq!(parse_move_descriptor("e7e8x"), None);
        assert_eq!(parse_move_descriptor("zz"), None);
        assert_eq!(format_move(mv("e7e8q")), "e7e8q");
        assert_eq!(format_move(mv("g1f3")), "g1f3");
    }
}
