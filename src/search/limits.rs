//! Search limits.
//!
//! Depth is the only thing the bot needs; the rest lets a caller cut a
//! search short:
//! - Fixed time per move
//! - Node budget
//! - External stop flag

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// How often (in nodes) the limits are polled
const CHECK_INTERVAL: u64 = 1024;

/// Search limits configuration
#[derive(Debug, Clone, Default)]
pub struct SearchLimits {
    /// Maximum time in milliseconds
    pub movetime: Option<u64>,
    /// Maximum nodes to search
    pub nodes: Option<u64>,
    /// Raised by another thread to abandon the search
    pub stop: Option<Arc<AtomicBool>>,
}

impl SearchLimits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn movetime(ms: u64) -> Self {
        Self {
            movetime: Some(ms),
            ..Default::default()
        }
    }

    pub fn nodes(nodes: u64) -> Self {
        Self {
            nodes: Some(nodes),
            ..Default::default()
        }
    }

    pub fn with_stop_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.stop = Some(flag);
        self
    }

    /// True when nothing can interrupt the search
    pub fn is_unbounded(&self) -> bool {
        self.movetime.is_none() && self.nodes.is_none() && self.stop.is_none()
    }
}

/// Limits armed for one search
#[derive(Debug, Clone)]
pub struct LimitChecker {
    deadline: Option<Instant>,
    max_nodes: Option<u64>,
    stop: Option<Arc<AtomicBool>>,
}

impl LimitChecker {
    /// A checker that never fires
    pub fn unlimited() -> Self {
        Self {
            deadline: None,
            max_nodes: None,
            stop: None,
        }
    }

    /// Arm the limits, starting the clock now
    pub fn start(limits: &SearchLimits) -> Self {
        Self {
            deadline: limits
                .movetime
                .map(|ms| Instant::now() + Duration::from_millis(ms)),
            max_nodes: limits.nodes,
            stop: limits.stop.clone(),
        }
    }

    /// Check if the search should stop after `nodes` nodes
    pub fn should_stop(&self, nodes: u64) -> bool {
        if let Some(max) = self.max_nodes {
            if nodes >= max {
                return true;
            }
        }

        // Clock and flag are polled periodically
        if nodes % CHECK_INTERVAL != 0 {
            return false;
        }

        if let Some(flag) = &self.stop {
            if flag.load(Ordering::Relaxed) {
                return true;
            }
        }

        matches!(self.deadline, Some(deadline) if Instant::now() >= deadline)
    }
}

impl Default for LimitChecker {
    fn default() -> Self {
        Self::unlimited()
    }
}
