//! Engine configuration.

use crate::search::DEFAULT_TT_CAPACITY;
use crate::types::BotDepth;

/// How the bot picks its move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// Book, then alpha-beta search
    #[default]
    Minimax,
    /// Any capture if one exists, otherwise any legal move
    CaptureOrRandom,
}

/// Settings for an [`Engine`](crate::Engine)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Search depth, always within 1..=4
    pub depth: BotDepth,
    pub mode: SelectionMode,
    /// Consult the opening book before searching
    pub use_book: bool,
    /// Transposition table size in entries
    pub tt_capacity: usize,
    /// Fixed RNG seed; `None` seeds from the OS
    pub seed: Option<u64>,
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_depth(mut self, depth: i32) -> Self {
        self.depth = BotDepth::new(depth);
        self
    }

    pub fn with_mode(mut self, mode: SelectionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_book(mut self, use_book: bool) -> Self {
        self.use_book = use_book;
        self
    }

    pub fn with_tt_capacity(mut self, entries: usize) -> Self {
        self.tt_capacity = entries.max(1);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            depth: BotDepth::default(),
            mode: SelectionMode::Minimax,
            use_book: true,
            tt_capacity: DEFAULT_TT_CAPACITY,
            seed: None,
        }
    }
}
