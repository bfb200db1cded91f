//! Search module for the move-selection engine.
//!
//! # Architecture
//! - `Searcher`: owns the transposition table, the tie-break RNG and stats
//! - `negamax`: alpha-beta search in negamax form
//! - `qsearch`: capture-only quiescence search at the depth-zero frontier
//! - `ordering`: move ordering heuristics (TT hint, MVV-LVA, centre)
//! - `tt`: bounded transposition table
//! - `limits`: deadline / node budget / stop flag
//!
//! Search is single-threaded and fixed-depth: no iterative deepening.

mod limits;
mod negamax;
mod ordering;
mod qsearch;
mod tt;

pub use limits::{LimitChecker, SearchLimits};
pub use negamax::SearchResult;
pub use ordering::{order_moves, score_move};
pub use tt::{
    entries_for_mb, BoundType, TTEntry, TTKey, TranspositionTable, DEFAULT_HASH_MB, DEFAULT_TT_CAPACITY,
    MAX_HASH_MB,
};

use crate::error::{EngineError, EngineResult};
use crate::position::Position;
use crate::types::{Depth, NodeCount, Score};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;

/// Search statistics collected during search
#[derive(Debug, Clone, Default)]
pub struct SearchStats {
    pub nodes: NodeCount,
    pub qnodes: NodeCount,
    pub tt_probes: u64,
    pub tt_hits: u64,
    pub cutoffs: u64,
    pub depth: Depth,
    pub time_ms: u64,
}

impl SearchStats {
    pub fn nps(&self) -> u64 {
        if self.time_ms > 0 {
            self.nodes * 1000 / self.time_ms
        } else {
            0
        }
    }
}

/// Main search controller
pub struct Searcher {
    /// Position cache, lives across searches until cleared
    tt: TranspositionTable,
    /// Tie-break source for move ordering
    rng: StdRng,
    /// Statistics for the current search
    stats: SearchStats,
    /// Limits armed for the current search
    limits: LimitChecker,
}

impl Searcher {
    /// Create a searcher with a table of `tt_capacity` entries.
    ///
    /// With `seed` set, move ordering tie-breaks are reproducible.
    pub fn new(tt_capacity: usize, seed: Option<u64>) -> Self {
        let mut searcher = Self {
            tt: TranspositionTable::new(tt_capacity),
            rng: StdRng::seed_from_u64(0),
            stats: SearchStats::default(),
            limits: LimitChecker::unlimited(),
        };
        searcher.reseed(seed);
        searcher
    }

    /// Get statistics of the last search
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub fn tt(&self) -> &TranspositionTable {
        &self.tt
    }

    /// Drop every cached entry (new game)
    pub fn clear_tt(&mut self) {
        self.tt.clear();
    }

    /// Resize the cache; existing entries are discarded
    pub fn resize_tt(&mut self, capacity: usize) {
        self.tt = TranspositionTable::new(capacity);
    }

    /// Restart the tie-break RNG; `None` seeds from the OS
    pub fn reseed(&mut self, seed: Option<u64>) {
        self.rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
    }

    /// Random source shared with the move-selection fallbacks
    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Search `pos` to `depth` with a full window.
    pub fn search<P: Position>(
        &mut self,
        pos: &mut P,
        depth: Depth,
        limits: &SearchLimits,
    ) -> EngineResult<SearchResult> {
        self.search_window(pos, depth, Score::neg_infinity(), Score::infinity(), limits)
    }

    /// Search `pos` to `depth` inside `[alpha, beta]`.
    ///
    /// The position is restored before this returns, whether the search
    /// completes, is cancelled or fails.
    pub fn search_window<P: Position>(
        &mut self,
        pos: &mut P,
        depth: Depth,
        alpha: Score,
        beta: Score,
        limits: &SearchLimits,
    ) -> EngineResult<SearchResult> {
        self.stats = SearchStats::default();
        self.limits = LimitChecker::start(limits);
        let (probes_before, hits_before) = self.tt.probe_stats();
        let start = Instant::now();
        let key_before = pos.key();

        let result = negamax::negamax(self, pos, depth, alpha, beta);

        debug_assert_eq!(pos.key(), key_before, "search left the position modified");

        let (probes, hits) = self.tt.probe_stats();
        self.stats.tt_probes = probes.saturating_sub(probes_before);
        self.stats.tt_hits = hits.saturating_sub(hits_before);
        self.stats.depth = depth;
        self.stats.time_ms = start.elapsed().as_millis() as u64;

        match &result {
            Ok(r) => log::debug!(
                "search depth {} score {} move {:?} nodes {} qnodes {} tt {}/{} cutoffs {} time {}ms",
                depth,
                r.score,
                r.best_move.map(|m| m.to_string()),
                self.stats.nodes,
                self.stats.qnodes,
                self.stats.tt_hits,
                self.stats.tt_probes,
                self.stats.cutoffs,
                self.stats.time_ms,
            ),
            Err(e) => log::debug!("search depth {} aborted: {}", depth, e),
        }

        result
    }

    /// Count a node and poll the limits
    #[inline]
    fn inc_nodes(&mut self) -> EngineResult<()> {
        self.stats.nodes += 1;
        if self.limits.should_stop(self.stats.nodes) {
            return Err(EngineError::Cancelled {
                nodes: self.stats.nodes,
            });
        }
        Ok(())
    }

    #[inline]
    fn inc_qnodes(&mut self) -> EngineResult<()> {
        self.stats.qnodes += 1;
        self.inc_nodes()
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new(DEFAULT_TT_CAPACITY, None)
    }
}
