//! Search depth type.
//!
//! The bot searches a fixed, small number of plies; anything requested
//! outside the supported range is clamped rather than rejected.

use std::fmt;
use std::ops::Sub;

/// Shallowest depth the bot will search
pub const MIN_BOT_DEPTH: i32 = 1;

/// Deepest depth the bot will search
pub const MAX_BOT_DEPTH: i32 = 4;

/// Depth used when nothing else is configured
pub const DEFAULT_BOT_DEPTH: i32 = 2;

/// Search depth (in plies).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Debug)]
#[repr(transparent)]
pub struct Depth(pub i32);

impl Depth {
    pub const ZERO: Depth = Depth(0);
    pub const ONE: Depth = Depth(1);

    #[inline]
    pub const fn new(d: i32) -> Self {
        Depth(d)
    }

    /// Clamp a requested depth into the range the bot supports.
    #[inline]
    pub fn clamp_bot(d: i32) -> Self {
        Depth(d.clamp(MIN_BOT_DEPTH, MAX_BOT_DEPTH))
    }

    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Check if this depth hands over to quiescence search
    #[inline]
    pub const fn is_qs(self) -> bool {
        self.0 <= 0
    }
}

impl Default for BotDepth {
    fn default() -> Self {
        BotDepth(Depth(DEFAULT_BOT_DEPTH))
    }
}

/// A depth already clamped into `MIN_BOT_DEPTH..=MAX_BOT_DEPTH`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct BotDepth(Depth);

impl BotDepth {
    pub fn new(d: i32) -> Self {
        BotDepth(Depth::clamp_bot(d))
    }

    #[inline]
    pub const fn depth(self) -> Depth {
        self.0
    }
}

impl From<i32> for BotDepth {
    fn from(d: i32) -> Self {
        BotDepth::new(d)
    }
}

impl Sub<i32> for Depth {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: i32) -> Self {
        Depth(self.0 - rhs)
    }
}

impl From<i32> for Depth {
    #[inline]
    fn from(d: i32) -> Self {
        Depth(d)
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bot_depth_is_clamped() {
        assert_eq!(BotDepth::new(0).depth(), Depth(1));
        assert_eq!(BotDepth::new(-7).depth(), Depth(1));
        assert_eq!(BotDepth::new(3).depth(), Depth(3));
        assert_eq!(BotDepth::new(9).depth(), Depth(4));
        assert_eq!(BotDepth::default().depth(), Depth(2));
    }

    #[test]
    fn test_qs_boundary() {
        assert!(Depth::ZERO.is_qs());
        assert!(!(Depth::ONE).is_qs());
        assert!((Depth::ONE - 1).is_qs());
    }
}
