//! Score type for search.
//!
//! Plain centipawn scores plus the mate sentinel. Mate scores are not
//! distance-adjusted: a forced mate is always `±SCORE_MATE`.

use std::fmt;
use std::ops::{Add, Neg, Sub};

/// Special score values
pub const SCORE_INFINITY: i32 = 32000;
pub const SCORE_MATE: i32 = 20000;
pub const SCORE_DRAW: i32 = 0;

/// A chess engine score in centipawns.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Score(pub i32);

impl Score {
    /// Create a new score from centipawns
    #[inline]
    pub const fn cp(centipawns: i32) -> Self {
        Score(centipawns)
    }

    /// Score for the side that delivered mate
    #[inline]
    pub const fn mate() -> Self {
        Score(SCORE_MATE)
    }

    /// Score for the side that has been mated
    #[inline]
    pub const fn mated() -> Self {
        Score(-SCORE_MATE)
    }

    /// Draw score
    #[inline]
    pub const fn draw() -> Self {
        Score(SCORE_DRAW)
    }

    /// Infinity (for alpha-beta bounds)
    #[inline]
    pub const fn infinity() -> Self {
        Score(SCORE_INFINITY)
    }

    /// Negative infinity
    #[inline]
    pub const fn neg_infinity() -> Self {
        Score(-SCORE_INFINITY)
    }

    /// Get the raw value
    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Check if this is a mate score for the side it is relative to
    #[inline]
    pub const fn is_mate(self) -> bool {
        self.0 >= SCORE_MATE
    }

    /// Check if this is a mated score
    #[inline]
    pub const fn is_mated(self) -> bool {
        self.0 <= -SCORE_MATE
    }

    #[inline]
    pub const fn is_mate_score(self) -> bool {
        self.is_mate() || self.is_mated()
    }
}

impl Add for Score {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Score(self.0 + rhs.0)
    }
}

impl Sub for Score {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Score(self.0 - rhs.0)
    }
}

impl Neg for Score {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Score(-self.0)
    }
}

impl From<i32> for Score {
    #[inline]
    fn from(v: i32) -> Self {
        Score(v)
    }
}

/// UCI form. Mate scores carry no distance, so they print as plain `cp`.
impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cp {}", self.0)
    }
}

impl fmt::Debug for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Score({})", self.0)
    }
}
