//! UCI command handler and main loop.

use super::parser::{parse_command, UciCommand};
use super::{SearchParams, ENGINE_AUTHOR, ENGINE_NAME};
use crate::config::SelectionMode;
use crate::engine::{Engine, MoveSource};
use crate::error::EngineError;
use crate::position::{format_move, parse_move, GameState, Position};
use crate::search::{SearchLimits, DEFAULT_HASH_MB, MAX_HASH_MB};
use crate::types::{Color, Move, DEFAULT_BOT_DEPTH, MAX_BOT_DEPTH, MIN_BOT_DEPTH};
use std::io::{self, BufRead, Write};

/// UCI protocol handler
pub struct UciHandler<W: Write> {
    /// Current game
    state: GameState,
    engine: Engine,
    /// Protocol output (stdout for the real binary)
    out: W,
    /// Debug mode enabled
    debug: bool,
    /// Should the engine quit
    quit: bool,
}

impl UciHandler<io::Stdout> {
    /// Handler writing to stdout
    pub fn stdout(engine: Engine) -> Self {
        Self::new(engine, io::stdout())
    }
}

impl<W: Write> UciHandler<W> {
    pub fn new(engine: Engine, out: W) -> Self {
        Self {
            state: GameState::new(),
            engine,
            out,
            debug: false,
            quit: false,
        }
    }

    /// Run the UCI main loop until "quit" or end of input
    pub fn run<R: BufRead>(&mut self, input: R) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;
            if self.debug {
                log::debug!("< {}", line);
            }
            self.handle_input(&line)?;
            if self.quit {
                break;
            }
        }
        Ok(())
    }

    /// Handle a single UCI command
    pub fn handle_input(&mut self, input: &str) -> io::Result<()> {
        match parse_command(input) {
            UciCommand::Uci => self.cmd_uci(),
            UciCommand::Debug(on) => {
                self.debug = on;
                Ok(())
            }
            UciCommand::IsReady => self.send("readyok"),
            UciCommand::SetOption { name, value } => {
                self.cmd_setoption(&name, value.as_deref());
                Ok(())
            }
            UciCommand::UciNewGame => {
                self.state = GameState::new();
                self.engine.new_game();
                Ok(())
            }
            UciCommand::Position { fen, moves } => {
                self.cmd_position(fen.as_deref(), &moves);
                Ok(())
            }
            UciCommand::Go(params) => self.cmd_go(params),
            UciCommand::Stop => Ok(()),
            UciCommand::Quit => {
                self.quit = true;
                Ok(())
            }
            UciCommand::Display => self.cmd_display(),
            UciCommand::Unknown(s) => {
                if !s.is_empty() {
                    log::debug!("unknown command: {}", s);
                }
                Ok(())
            }
        }
    }

    /// Current game state
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Consume the handler, returning its output sink
    pub fn into_output(self) -> W {
        self.out
    }

    /// Send output to GUI
    fn send(&mut self, msg: &str) -> io::Result<()> {
        writeln!(self.out, "{}", msg)?;
        self.out.flush()
    }

    // === UCI Commands ===

    fn cmd_uci(&mut self) -> io::Result<()> {
        self.send(&format!("id name {}", ENGINE_NAME))?;
        self.send(&format!("id author {}", ENGINE_AUTHOR))?;
        self.send(&format!(
            "option name Depth type spin default {} min {} max {}",
            DEFAULT_BOT_DEPTH, MIN_BOT_DEPTH, MAX_BOT_DEPTH
        ))?;
        self.send("option name UseMinimax type check default true")?;
        self.send("option name OwnBook type check default true")?;
        self.send(&format!(
            "option name Hash type spin default {} min 1 max {}",
            DEFAULT_HASH_MB, MAX_HASH_MB
        ))?;
        self.send("option name Seed type string default <empty>")?;
        self.send("uciok")
    }

    fn cmd_setoption(&mut self, name: &str, value: Option<&str>) {
        let value = value.map(str::trim);
        match name.to_lowercase().as_str() {
            "depth" => match value.and_then(|v| v.parse::<i32>().ok()) {
                Some(d) => self.engine.set_depth(d),
                None => log::warn!("invalid Depth value: {:?}", value),
            },
            "useminimax" => match parse_bool(value) {
                Some(true) => self.engine.set_mode(SelectionMode::Minimax),
                Some(false) => self.engine.set_mode(SelectionMode::CaptureOrRandom),
                None => log::warn!("invalid UseMinimax value: {:?}", value),
            },
            "ownbook" => match parse_bool(value) {
                Some(on) => self.engine.set_use_book(on),
                None => log::warn!("invalid OwnBook value: {:?}", value),
            },
            "hash" => match value.and_then(|v| v.parse::<usize>().ok()) {
                Some(mb) => self.engine.set_hash_mb(mb.clamp(1, MAX_HASH_MB)),
                None => log::warn!("invalid Hash value: {:?}", value),
            },
            "seed" => match value {
                None | Some("") | Some("<empty>") => self.engine.set_seed(None),
                Some(v) => match v.parse::<u64>() {
                    Ok(seed) => self.engine.set_seed(Some(seed)),
                    Err(_) => log::warn!("invalid Seed value: {}", v),
                },
            },
            _ => log::debug!("unknown option: {}", name),
        }
    }

    fn cmd_position(&mut self, fen: Option<&str>, moves: &[String]) {
        self.state = match fen {
            Some(f) => match GameState::from_fen(f) {
                Ok(state) => state,
                Err(e) => {
                    log::warn!("{}; using the initial position", e);
                    GameState::new()
                }
            },
            None => GameState::new(),
        };

        for move_str in moves {
            let applied = parse_move(&self.state, move_str).map(|m| self.state.make(m));
            match applied {
                Some(Ok(())) => {}
                Some(Err(e)) => {
                    log::warn!("{}", e);
                    break;
                }
                None => {
                    log::warn!("invalid move: {}", move_str);
                    break;
                }
            }
        }
    }

    fn cmd_go(&mut self, params: SearchParams) -> io::Result<()> {
        let limits = if params.infinite {
            SearchLimits::new()
        } else {
            SearchLimits {
                movetime: params.movetime,
                nodes: params.nodes,
                stop: None,
            }
        };
        self.engine.set_limits(limits);

        let depth = params
            .depth
            .map(|d| d.into())
            .unwrap_or(self.engine.config().depth);

        match self.engine.choose_move(&mut self.state, depth) {
            Ok(m) => {
                self.send_info(m)?;
                self.send(&format!("bestmove {}", format_move(m)))
            }
            Err(EngineError::NoLegalMoves) => self.send("bestmove 0000"),
            Err(e) => {
                log::error!("move selection failed: {}", e);
                self.send(&format!("info string error {}", e))?;
                self.send("bestmove 0000")
            }
        }
    }

    fn send_info(&mut self, m: Move) -> io::Result<()> {
        match self.engine.last_source() {
            Some(MoveSource::Search(score)) => {
                let stats = self.engine.stats().clone();
                let hashfull = self.engine.searcher().tt().hashfull();
                self.send(&format!(
                    "info depth {} score {} nodes {} nps {} time {} hashfull {} pv {}",
                    stats.depth,
                    score,
                    stats.nodes,
                    stats.nps(),
                    stats.time_ms,
                    hashfull,
                    format_move(m)
                ))
            }
            Some(MoveSource::Book) => self.send("info string book move"),
            Some(MoveSource::Baseline) => self.send("info string capture-or-random move"),
            Some(MoveSource::RandomFallback) => self.send("info string random fallback move"),
            None => Ok(()),
        }
    }

    fn cmd_display(&mut self) -> io::Result<()> {
        let fen = self.state.board().to_string();
        let side = match self.state.side_to_move() {
            Color::White => "white",
            Color::Black => "black",
        };
        self.send(&format!("FEN: {}", fen))?;
        self.send(&format!("Side to move: {}", side))
    }
}

fn parse_bool(value: Option<&str>) -> Option<bool> {
    match value?.to_lowercase().as_str() {
        "true" | "on" | "1" | "yes" => Some(true),
        "false" | "off" | "0" | "no" => Some(false),
        _ => None,
    }
}
