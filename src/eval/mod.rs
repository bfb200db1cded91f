//! Board evaluation.
//!
//! Material only. [`evaluate`] is always from White's point of view;
//! search converts to the side-to-move perspective with [`evaluate_relative`]
//! and does all negamax sign flipping itself.

use crate::position::{GameStatus, Position};
use crate::types::{piece_value, Color, Piece, Score, Value, ALL_SQUARES};

/// Evaluate the position, positive when White is better.
///
/// A checkmated side to move has no escape and has lost, so the sign of the
/// mate score follows whoever is to move, not who moved last.
pub fn evaluate<P: Position>(pos: &P) -> Score {
    match pos.status() {
        GameStatus::Checkmate => match pos.side_to_move() {
            Color::White => Score::mated(),
            Color::Black => Score::mate(),
        },
        GameStatus::Stalemate | GameStatus::Draw => Score::draw(),
        GameStatus::Ongoing => Score::cp(material_eval(pos)),
    }
}

/// Evaluate from the perspective of the side to move
#[inline]
pub fn evaluate_relative<P: Position>(pos: &P) -> Score {
    let score = evaluate(pos);
    match pos.side_to_move() {
        Color::White => score,
        Color::Black => -score,
    }
}

/// Material balance (white's perspective)
fn material_eval<P: Position>(pos: &P) -> Value {
    ALL_SQUARES
        .iter()
        .filter_map(|&sq| pos.piece_at(sq))
        .filter(|&(piece, _)| piece != Piece::King)
        .map(|(piece, color)| match color {
            Color::White => piece_value(piece),
            Color::Black => -piece_value(piece),
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::GameState;

    #[test]
    fn test_starting_position_material() {
        assert_eq!(evaluate(&GameState::new()), Score::cp(0));
    }

    #[test]
    fn test_missing_black_queen() {
        let pos = GameState::from_fen("rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
        assert_eq!(evaluate(&pos), Score::cp(900));
        assert_eq!(evaluate_relative(&pos), Score::cp(900));
    }

    #[test]
    fn test_relative_flips_for_black() {
        let pos = GameState::from_fen("rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1").unwrap();
        assert_eq!(evaluate(&pos), Score::cp(900));
        assert_eq!(evaluate_relative(&pos), Score::cp(-900));
    }

    #[test]
    fn test_checkmate_sign_follows_side_to_move() {
        // White to move and mated
        let white_mated =
            GameState::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3").unwrap();
        assert_eq!(evaluate(&white_mated), Score::mated());
        assert_eq!(evaluate_relative(&white_mated), Score::mated());

        // Black to move and mated (back rank)
        let black_mated = GameState::from_fen("3R2k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").unwrap();
        assert_eq!(evaluate(&black_mated), Score::mate());
        assert_eq!(evaluate_relative(&black_mated), Score::mated());
    }

    #[test]
    fn test_stalemate_is_draw() {
        let pos = GameState::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(evaluate(&pos), Score::draw());
    }
}
