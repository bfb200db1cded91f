//! Negamax alpha-beta search implementation.
//!
//! Per node:
//! - Transposition table probe on the exact (position, depth) key
//! - Terminal positions are evaluated directly
//! - Depth zero hands over to quiescence search
//! - Otherwise ordered moves are searched with negated, swapped bounds
//!
//! Every result, leaves included, is stored back in the table.

use super::qsearch::quiescence;
use super::tt::{BoundType, TTEntry, TTKey};
use super::{ordering, Searcher};
use crate::error::EngineResult;
use crate::eval;
use crate::position::{MoveGuard, Position};
use crate::types::{Depth, Move, Score};

/// Result from a search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    /// From the perspective of the side to move at the root
    pub score: Score,
}

/// Main negamax search function with TT integration
pub(super) fn negamax<P: Position>(
    searcher: &mut Searcher,
    pos: &mut P,
    depth: Depth,
    mut alpha: Score,
    beta: Score,
) -> EngineResult<SearchResult> {
    searcher.inc_nodes()?;

    let orig_alpha = alpha;
    let hash = pos.key();
    let key = TTKey::new(hash, depth);

    // === TT Probe ===
    if let Some(entry) = searcher.tt.probe(key) {
        if entry.is_usable(alpha, beta) {
            return Ok(SearchResult {
                best_move: entry.best_move,
                score: entry.score,
            });
        }
    }

    // === Terminal / frontier ===
    if pos.is_game_over() {
        let score = eval::evaluate_relative(pos);
        searcher.tt.store(key, TTEntry::new(score, None, BoundType::Exact));
        return Ok(SearchResult {
            best_move: None,
            score,
        });
    }

    if depth.is_qs() {
        let score = quiescence(searcher, pos, alpha, beta)?;
        let bound = BoundType::classify(score, orig_alpha, beta);
        searcher.tt.store(key, TTEntry::new(score, None, bound));
        return Ok(SearchResult {
            best_move: None,
            score,
        });
    }

    let mut moves = pos.legal_moves();
    let hint = searcher.tt.best_move_hint(hash);
    ordering::order_moves(pos, &mut moves, hint, &mut searcher.rng);

    let mut best_move = None;
    let mut best_score = Score::neg_infinity();

    for m in moves {
        let score = {
            let mut child = MoveGuard::new(pos, m)?;
            -negamax(searcher, &mut *child, depth - 1, -beta, -alpha)?.score
        };

        if score > best_score {
            best_score = score;
            best_move = Some(m);
        }

        if best_score > alpha {
            alpha = best_score;
        }

        if alpha >= beta {
            searcher.stats.cutoffs += 1;
            break;
        }
    }

    // === TT Store ===
    let bound = BoundType::classify(best_score, orig_alpha, beta);
    searcher.tt.store(key, TTEntry::new(best_score, best_move, bound));

    Ok(SearchResult {
        best_move,
        score: best_score,
    })
}
