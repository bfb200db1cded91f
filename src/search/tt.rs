//! Transposition table for caching search results.
//!
//! # Design
//! - Keyed by the exact pair (position hash, remaining depth); a shallower
//!   entry never answers a deeper request
//! - Entries record the bound their score represents, so a result computed
//!   under a narrow window is only reused where it is still decisive
//! - Fixed capacity; the oldest inserted entry is evicted first
//!
//! The table is owned by a [`Searcher`](super::Searcher), so independent
//! engines never share entries.

use crate::types::{Depth, Hash, Move, Score};
use std::collections::{HashMap, VecDeque};
use std::mem::size_of;

/// Default table size in megabytes (UCI `Hash`)
pub const DEFAULT_HASH_MB: usize = 16;

/// Largest table the UCI `Hash` option accepts, in megabytes
pub const MAX_HASH_MB: usize = 1024;

/// Approximate memory per entry: the map slot at 7/8 load plus its
/// control byte, and the key held again by the eviction queue
const BYTES_PER_ENTRY: usize = (size_of::<(TTKey, TTEntry)>() + 1) * 8 / 7 + size_of::<TTKey>();

/// Default number of entries
pub const DEFAULT_TT_CAPACITY: usize = entries_for_mb(DEFAULT_HASH_MB);

/// Number of entries that fit in `mb` megabytes (at least one)
pub const fn entries_for_mb(mb: usize) -> usize {
    let entries = mb.saturating_mul(1024 * 1024) / BYTES_PER_ENTRY;
    if entries == 0 {
        1
    } else {
        entries
    }
}

/// Type of bound stored in a TT entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundType {
    /// Exact score
    Exact,
    /// Lower bound (fail-high, score >= beta)
    LowerBound,
    /// Upper bound (fail-low, score <= alpha)
    UpperBound,
}

impl BoundType {
    /// Classify a search result against the window it was searched with
    #[inline]
    pub fn classify(score: Score, orig_alpha: Score, beta: Score) -> Self {
        if score >= beta {
            BoundType::LowerBound
        } else if score <= orig_alpha {
            BoundType::UpperBound
        } else {
            BoundType::Exact
        }
    }
}

/// Cache key: position encoding plus the depth it was searched to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TTKey {
    pub hash: Hash,
    pub depth: Depth,
}

impl TTKey {
    #[inline]
    pub fn new(hash: Hash, depth: Depth) -> Self {
        Self { hash, depth }
    }
}

/// A single entry in the transposition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTEntry {
    pub score: Score,
    pub best_move: Option<Move>,
    pub bound: BoundType,
}

impl TTEntry {
    pub fn new(score: Score, best_move: Option<Move>, bound: BoundType) -> Self {
        Self { score, best_move, bound }
    }

    /// Whether the stored score settles a node searched with `[alpha, beta]`
    #[inline]
    pub fn is_usable(&self, alpha: Score, beta: Score) -> bool {
        match self.bound {
            BoundType::Exact => true,
            BoundType::LowerBound => self.score >= beta,
            BoundType::UpperBound => self.score <= alpha,
        }
    }
}

/// Bounded transposition table
pub struct TranspositionTable {
    entries: HashMap<TTKey, TTEntry>,
    /// Keys in insertion order, oldest first
    order: VecDeque<TTKey>,
    capacity: usize,
    /// Deepest depth stored so far, bounds the hint lookup
    max_depth: Depth,
    probes: u64,
    hits: u64,
}

impl TranspositionTable {
    /// Create a table holding at most `capacity` entries
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: HashMap::with_capacity(capacity.min(DEFAULT_TT_CAPACITY)),
            order: VecDeque::with_capacity(capacity.min(DEFAULT_TT_CAPACITY)),
            capacity,
            max_depth: Depth::ZERO,
            probes: 0,
            hits: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Look up the exact (position, depth) key
    pub fn probe(&mut self, key: TTKey) -> Option<TTEntry> {
        self.probes += 1;
        let entry = self.entries.get(&key).copied();
        if entry.is_some() {
            self.hits += 1;
        }
        entry
    }

    /// Store an entry, evicting the oldest one if the table is full
    pub fn store(&mut self, key: TTKey, entry: TTEntry) {
        if let Some(slot) = self.entries.get_mut(&key) {
            *slot = entry;
            return;
        }

        while self.entries.len() >= self.capacity {
            match self.order.pop_front() {
                Some(oldest) => {
                    self.entries.remove(&oldest);
                }
                None => break,
            }
        }

        self.entries.insert(key, entry);
        self.order.push_back(key);
        if key.depth > self.max_depth {
            self.max_depth = key.depth;
        }
    }

    /// Best move recorded for this position at the deepest depth that has one.
    ///
    /// An ordering hint only: it ignores depth correctness on purpose.
    pub fn best_move_hint(&self, hash: Hash) -> Option<Move> {
        (1..=self.max_depth.raw())
            .rev()
            .filter_map(|d| self.entries.get(&TTKey::new(hash, Depth::new(d))))
            .find_map(|e| e.best_move)
    }

    /// Clear the table
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
        self.max_depth = Depth::ZERO;
        self.probes = 0;
        self.hits = 0;
    }

    /// (probes, hits) since the last clear
    pub fn probe_stats(&self) -> (u64, u64) {
        (self.probes, self.hits)
    }

    /// Fill level in permill (for UCI info)
    pub fn hashfull(&self) -> u32 {
        ((self.entries.len() as u64 * 1000) / self.capacity as u64) as u32
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new(DEFAULT_TT_CAPACITY)
    }
}
