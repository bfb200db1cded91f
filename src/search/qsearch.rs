//! Quiescence search - search captures only to avoid horizon effect.
//!
//! When the main search reaches depth 0, we continue searching captures
//! so a capture sequence is never cut off halfway and misjudged.
//!
//! Fail-hard: the result is always clamped into `[alpha, beta]`.

use super::{ordering, Searcher};
use crate::error::EngineResult;
use crate::eval;
use crate::position::{MoveGuard, Position};
use crate::types::{Move, Score};

/// Quiescence search from the side to move's point of view
pub(super) fn quiescence<P: Position>(
    searcher: &mut Searcher,
    pos: &mut P,
    mut alpha: Score,
    beta: Score,
) -> EngineResult<Score> {
    searcher.inc_qnodes()?;

    // Stand-pat: the side to move may decline every capture
    let stand_pat = eval::evaluate_relative(pos);

    if stand_pat >= beta {
        return Ok(beta);
    }

    if stand_pat > alpha {
        alpha = stand_pat;
    }

    let mut captures: Vec<Move> = pos
        .legal_moves()
        .into_iter()
        .filter(|&m| pos.is_capture(m))
        .collect();

    if captures.is_empty() {
        return Ok(alpha);
    }

    let hint = searcher.tt.best_move_hint(pos.key());
    ordering::order_moves(pos, &mut captures, hint, &mut searcher.rng);

    for m in captures {
        let score = {
            let mut child = MoveGuard::new(pos, m)?;
            -quiescence(searcher, &mut *child, -beta, -alpha)?
        };

        if score >= beta {
            searcher.stats.cutoffs += 1;
            return Ok(beta);
        }

        if score > alpha {
            alpha = score;
        }
    }

    Ok(alpha)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::GameState;
    use crate::search::DEFAULT_TT_CAPACITY;

    fn run(fen: &str, alpha: Score, beta: Score) -> (Score, GameState) {
        let mut pos = GameState::from_fen(fen).unwrap();
        let mut searcher = Searcher::new(DEFAULT_TT_CAPACITY, Some(1));
        let score = quiescence(&mut searcher, &mut pos, alpha, beta).unwrap();
        (score, pos)
    }

    #[test]
    fn test_quiet_position_is_stand_pat() {
        // No captures available for white
        let fen = "4k3/pppp4/8/8/8/8/4P3/4K3 w - - 0 1";
        let (score, pos) = run(fen, Score::neg_infinity(), Score::infinity());
        assert_eq!(score, eval::evaluate_relative(&pos));
        assert_eq!(score, Score::cp(-300));
    }

    #[test]
    fn test_stand_pat_beta_cutoff() {
        // White is a queen up; anything at or above beta returns beta
        let fen = "4k3/8/8/8/8/8/8/3QK3 w - - 0 1";
        let (score, _) = run(fen, Score::cp(-50), Score::cp(100));
        assert_eq!(score, Score::cp(100));
    }

    #[test]
    fn test_resolves_capture_sequence() {
        // Rook takes the undefended queen
        let fen = "4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 1";
        let (score, pos) = run(fen, Score::neg_infinity(), Score::infinity());
        assert_eq!(score, Score::cp(500));
        assert_eq!(pos.ply_count(), 0);
    }

    #[test]
    fn test_defended_piece_not_taken_blindly() {
        // Queen takes a pawn defended by a pawn: standing pat is better
        let fen = "4k3/8/2p5/3p4/8/8/8/3QK3 w - - 0 1";
        let (score, _) = run(fen, Score::neg_infinity(), Score::infinity());
        assert_eq!(score, Score::cp(700));
    }
}
