//! Move selection for the automated player.
//!
//! [`Engine::choose_move`] is the one entry point the game loop needs:
//! opening book first, alpha-beta search on a miss, and a uniformly random
//! legal move if the search has nothing to offer.

use crate::book::OpeningBook;
use crate::config::{EngineConfig, SelectionMode};
use crate::error::{EngineError, EngineResult};
use crate::position::Position;
use crate::search::{entries_for_mb, SearchLimits, SearchResult, SearchStats, Searcher};
use crate::types::{BotDepth, Move, Score};
use rand::seq::SliceRandom;

/// Where the last chosen move came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveSource {
    Book,
    /// Alpha-beta search, with its score for the side to move
    Search(Score),
    /// Capture-or-random mode
    Baseline,
    /// Search produced nothing usable
    RandomFallback,
}

/// The bot: configuration, opening book and searcher
pub struct Engine {
    config: EngineConfig,
    searcher: Searcher,
    book: OpeningBook,
    limits: SearchLimits,
    last_source: Option<MoveSource>,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            searcher: Searcher::new(config.tt_capacity, config.seed),
            book: OpeningBook::standard(),
            limits: SearchLimits::new(),
            last_source: None,
            config,
        }
    }

    /// Replace the built-in opening book
    pub fn with_book(mut self, book: OpeningBook) -> Self {
        self.book = book;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn set_depth(&mut self, depth: i32) {
        self.config.depth = BotDepth::new(depth);
    }

    pub fn set_mode(&mut self, mode: SelectionMode) {
        self.config.mode = mode;
    }

    pub fn set_use_book(&mut self, use_book: bool) {
        self.config.use_book = use_book;
    }

    /// Resize the transposition table; cached entries are dropped
    pub fn set_tt_capacity(&mut self, entries: usize) {
        self.config.tt_capacity = entries.max(1);
        self.searcher.resize_tt(self.config.tt_capacity);
    }

    /// Resize the transposition table to roughly `mb` megabytes
    pub fn set_hash_mb(&mut self, mb: usize) {
        self.set_tt_capacity(entries_for_mb(mb));
    }

    pub fn set_seed(&mut self, seed: Option<u64>) {
        self.config.seed = seed;
        self.searcher.reseed(seed);
    }

    /// Limits applied to every following search
    pub fn set_limits(&mut self, limits: SearchLimits) {
        self.limits = limits;
    }

    /// Forget everything cached from the previous game
    pub fn new_game(&mut self) {
        self.searcher.clear_tt();
        self.last_source = None;
    }

    pub fn searcher(&self) -> &Searcher {
        &self.searcher
    }

    /// Statistics of the most recent search
    pub fn stats(&self) -> &SearchStats {
        self.searcher.stats()
    }

    pub fn last_source(&self) -> Option<MoveSource> {
        self.last_source
    }

    /// Choose a move at the configured depth
    pub fn best_move<P: Position>(&mut self, pos: &mut P) -> EngineResult<Move> {
        let depth = self.config.depth;
        self.choose_move(pos, depth)
    }

    /// Choose a move for the side to move in `pos`.
    ///
    /// Fails with [`EngineError::NoLegalMoves`] when the game is already over;
    /// the position is left exactly as it was passed in.
    pub fn choose_move<P: Position>(
        &mut self,
        pos: &mut P,
        depth: impl Into<BotDepth>,
    ) -> EngineResult<Move> {
        let legal = pos.legal_moves();
        if legal.is_empty() {
            return Err(EngineError::NoLegalMoves);
        }

        let (mv, source) = match self.config.mode {
            SelectionMode::CaptureOrRandom => (self.capture_or_random(pos, &legal)?, MoveSource::Baseline),
            SelectionMode::Minimax => self.book_or_search(pos, &legal, depth.into())?,
        };

        self.last_source = Some(source);
        Ok(mv)
    }

    fn book_or_search<P: Position>(
        &mut self,
        pos: &mut P,
        legal: &[Move],
        depth: BotDepth,
    ) -> EngineResult<(Move, MoveSource)> {
        if self.config.use_book {
            if let Some(m) = self.book.lookup(pos) {
                log::info!("book move {}", m);
                return Ok((m, MoveSource::Book));
            }
        }

        match self.searcher.search(pos, depth.depth(), &self.limits) {
            Ok(SearchResult {
                best_move: Some(m),
                score,
            }) => {
                log::info!("search move {} score {} depth {}", m, score, depth.depth());
                Ok((m, MoveSource::Search(score)))
            }
            Ok(SearchResult { best_move: None, .. }) => {
                log::warn!("search returned no move, choosing at random");
                Ok((self.random_move(legal)?, MoveSource::RandomFallback))
            }
            Err(EngineError::Cancelled { nodes }) => {
                log::warn!("search cancelled after {} nodes, choosing at random", nodes);
                Ok((self.random_move(legal)?, MoveSource::RandomFallback))
            }
            Err(e) => Err(e),
        }
    }

    /// Any capture if one exists, otherwise any legal move
    fn capture_or_random<P: Position>(&mut self, pos: &P, legal: &[Move]) -> EngineResult<Move> {
        let captures: Vec<Move> = legal.iter().copied().filter(|&m| pos.is_capture(m)).collect();
        if captures.is_empty() {
            log::debug!("no captures, choosing from {} legal moves", legal.len());
            self.random_move(legal)
        } else {
            log::debug!("choosing from {} captures", captures.len());
            self.random_move(&captures)
        }
    }

    fn random_move(&mut self, candidates: &[Move]) -> EngineResult<Move> {
        candidates
            .choose(self.searcher.rng())
            .copied()
            .ok_or_else(|| EngineError::SelectionFailure {
                reason: "candidate list is empty".to_string(),
            })
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PositionError;
    use crate::eval;
    use crate::position::{format_move, parse_move_descriptor, GameState, GameStatus};
    use crate::types::{Color, Hash, Piece, Square};

    const MIDDLEGAME_FEN: &str = "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4";

    /// Rules engine that starts refusing moves after a fixed number of makes
    struct FaultyPosition {
        inner: GameState,
        makes_left: usize,
    }

    impl Position for FaultyPosition {
        fn side_to_move(&self) -> Color {
            self.inner.side_to_move()
        }

        fn legal_moves(&self) -> Vec<Move> {
            self.inner.legal_moves()
        }

        fn is_capture(&self, mv: Move) -> bool {
            self.inner.is_capture(mv)
        }

        fn piece_at(&self, sq: Square) -> Option<(Piece, Color)> {
            self.inner.piece_at(sq)
        }

        fn make(&mut self, mv: Move) -> Result<(), PositionError> {
            if self.makes_left == 0 {
                return Err(PositionError::IllegalMove {
                    mv: format_move(mv),
                    fen: self.inner.board().to_string(),
                });
            }
            self.makes_left -= 1;
            self.inner.make(mv)
        }

        fn unmake(&mut self) -> Result<Move, PositionError> {
            self.inner.unmake()
        }

        fn status(&self) -> GameStatus {
            self.inner.status()
        }

        fn is_check(&self) -> bool {
            self.inner.is_check()
        }

        fn key(&self) -> Hash {
            self.inner.key()
        }

        fn move_history(&self) -> Option<&[Move]> {
            self.inner.move_history()
        }
    }

    fn mv(s: &str) -> Move {
        parse_move_descriptor(s).unwrap()
    }

    fn engine() -> Engine {
        Engine::new(EngineConfig::new().with_seed(17).with_tt_capacity(1 << 16))
    }

    #[test]
    fn test_no_legal_moves() {
        let mut pos =
            GameState::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3").unwrap();
        let before = pos.clone();
        let mut engine = engine();

        assert_eq!(engine.choose_move(&mut pos, 2), Err(EngineError::NoLegalMoves));
        assert_eq!(pos.board(), before.board());
        assert_eq!(pos.ply_count(), before.ply_count());
        assert_eq!(engine.last_source(), None);
    }

    #[test]
    fn test_mate_in_one() {
        // Black to move mates with Qh4
        let mut pos = GameState::new();
        for m in ["f2f3", "e7e5", "g2g4"] {
            pos.make(mv(m)).unwrap();
        }
        let mut engine = engine();
        engine.set_use_book(false);

        for depth in 1..=3 {
            let choice = engine.choose_move(&mut pos, depth).unwrap();
            assert_eq!(choice, mv("d8h4"), "depth {}", depth);
        }

        pos.make(mv("d8h4")).unwrap();
        assert_eq!(pos.side_to_move(), Color::White);
        assert_eq!(eval::evaluate(&pos), Score::mated());
    }

    #[test]
    fn test_book_move_at_start() {
        let mut pos = GameState::new();
        let mut engine = engine();
        assert_eq!(engine.choose_move(&mut pos, 3).unwrap(), mv("e2e4"));
        assert_eq!(engine.last_source(), Some(MoveSource::Book));
    }

    #[test]
    fn test_search_used_out_of_book() {
        let mut pos = GameState::from_fen("4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 1").unwrap();
        let mut engine = engine();
        assert_eq!(engine.best_move(&mut pos).unwrap(), mv("d2d5"));
        assert!(matches!(engine.last_source(), Some(MoveSource::Search(s)) if s > Score::cp(0)));
        assert_eq!(engine.stats().depth.raw(), 2);
    }

    #[test]
    fn test_capture_mode_prefers_captures() {
        let mut pos = GameState::from_fen("4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 1").unwrap();
        let mut engine = Engine::new(
            EngineConfig::new()
                .with_mode(SelectionMode::CaptureOrRandom)
                .with_seed(3),
        );
        for _ in 0..10 {
            assert_eq!(engine.choose_move(&mut pos, 2).unwrap(), mv("d2d5"));
        }
        assert_eq!(engine.last_source(), Some(MoveSource::Baseline));
    }

    #[test]
    fn test_capture_mode_without_captures_is_legal() {
        let mut pos = GameState::new();
        let legal = pos.legal_moves();
        let mut engine = Engine::new(EngineConfig::new().with_mode(SelectionMode::CaptureOrRandom));
        let choice = engine.choose_move(&mut pos, 1).unwrap();
        assert!(legal.contains(&choice));
    }

    #[test]
    fn test_cancelled_search_falls_back_to_legal_move() {
        let mut pos = GameState::from_fen(MIDDLEGAME_FEN).unwrap();
        let before = *pos.board();
        let mut engine = engine();
        engine.set_limits(SearchLimits::nodes(10));

        let choice = engine.choose_move(&mut pos, 4).unwrap();
        assert!(pos.legal_moves().contains(&choice));
        assert_eq!(engine.last_source(), Some(MoveSource::RandomFallback));
        assert_eq!(*pos.board(), before);
    }

    #[test]
    fn test_new_game_clears_cache() {
        let mut pos = GameState::from_fen("4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 1").unwrap();
        let mut engine = engine();
        engine.best_move(&mut pos).unwrap();
        assert!(!engine.searcher().tt().is_empty());
        engine.new_game();
        assert!(engine.searcher().tt().is_empty());
    }

    #[test]
    fn test_rules_engine_fault_aborts_search() {
        let mut pos = FaultyPosition {
            inner: GameState::from_fen(MIDDLEGAME_FEN).unwrap(),
            makes_left: 5,
        };
        let key = pos.key();
        let plies = pos.inner.ply_count();
        let mut engine = engine();

        let result = engine.choose_move(&mut pos, 3);

        assert!(matches!(result, Err(EngineError::SearchInternal(PositionError::IllegalMove { .. }))));
        assert_eq!(engine.last_source(), None);
        assert_eq!(pos.key(), key);
        assert_eq!(pos.inner.ply_count(), plies);

        // The same engine keeps working once the rules engine recovers
        pos.makes_left = usize::MAX;
        let choice = engine.choose_move(&mut pos, 2).unwrap();
        assert!(pos.legal_moves().contains(&choice));
        assert!(matches!(engine.last_source(), Some(MoveSource::Search(_))));
    }

    #[test]
    fn test_book_can_be_replaced_or_disabled() {
        let book = OpeningBook::from_lines(&[&["d2d4", "d7d5"]]).unwrap();
        let mut custom = engine().with_book(book);
        assert_eq!(custom.choose_move(&mut GameState::new(), 2).unwrap(), mv("d2d4"));
        assert_eq!(custom.last_source(), Some(MoveSource::Book));

        let mut no_book = Engine::new(EngineConfig::new().with_book(false).with_seed(17));
        let mut pos = GameState::new();
        let choice = no_book.choose_move(&mut pos, 1).unwrap();
        assert!(pos.legal_moves().contains(&choice));
        assert!(matches!(no_book.last_source(), Some(MoveSource::Search(_))));
    }
}
