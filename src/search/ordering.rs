//! Move ordering heuristics.
//!
//! Good move ordering is critical for alpha-beta pruning efficiency.
//! Scores are summed per move, then a stable sort puts the highest first.

use crate::position::Position;
use crate::types::{piece_value, Move, Piece, CENTER_SQUARES};
use rand::Rng;

/// Move score constants
const TT_MOVE_BONUS: i32 = 10_000;
const CAPTURE_BONUS: i32 = 1_000;
const CENTER_BONUS: i32 = 50;
/// Upper end (inclusive) of the random tie-break
const MAX_JITTER: i32 = 5;

/// MVV-LVA: victim value minus attacker value
#[inline]
fn mvv_lva_score<P: Position>(pos: &P, m: Move) -> i32 {
    let attacker = pos.piece_at(m.get_source()).map(|(p, _)| p);
    // En passant lands on an empty square; the victim is a pawn
    let victim = pos
        .piece_at(m.get_dest())
        .map(|(p, _)| p)
        .or(Some(Piece::Pawn));

    match (victim, attacker) {
        (Some(v), Some(a)) => piece_value(v) - piece_value(a),
        _ => 0,
    }
}

/// Score a move for ordering (higher = search first), without the tie-break
#[inline]
pub fn score_move<P: Position>(pos: &P, m: Move, tt_move: Option<Move>) -> i32 {
    let mut score = 0;

    if tt_move == Some(m) {
        score += TT_MOVE_BONUS;
    }

    if pos.is_capture(m) {
        score += CAPTURE_BONUS + mvv_lva_score(pos, m);
    }

    if CENTER_SQUARES.contains(&m.get_dest()) {
        score += CENTER_BONUS;
    }

    score
}

/// Sort `moves` best-first.
///
/// A small random jitter breaks ties. It varies play and pruning, but nothing
/// relies on it for correctness.
pub fn order_moves<P: Position, R: Rng>(
    pos: &P,
    moves: &mut Vec<Move>,
    tt_move: Option<Move>,
    rng: &mut R,
) {
    let mut scored: Vec<(i32, Move)> = moves
        .iter()
        .map(|&m| (score_move(pos, m, tt_move) + rng.gen_range(0..=MAX_JITTER), m))
        .collect();

    // Stable: equal totals keep generation order
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    moves.clear();
    moves.extend(scored.into_iter().map(|(_, m)| m));
}
