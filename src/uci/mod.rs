//! UCI (Universal Chess Interface) front-end.
//!
//! A thin adapter that lets a GUI, or a human at a terminal, drive the
//! engine. See: http://wbec-ridderkerk.nl/html/UCIProtocol.html

mod handler;
mod parser;

pub use handler::UciHandler;
pub use parser::{parse_command, UciCommand};

/// UCI engine identification
pub const ENGINE_NAME: &str = "MinimaxBot";
pub const ENGINE_AUTHOR: &str = "MinimaxBot developers";

/// Parameters from the "go" command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    /// Search to this depth (clamped by the engine)
    pub depth: Option<i32>,
    /// Search for at most this many milliseconds
    pub movetime: Option<u64>,
    /// Maximum nodes to search
    pub nodes: Option<u64>,
    /// No limits beyond depth
    pub infinite: bool,
}

impl SearchParams {
    pub fn new() -> Self {
        Self::default()
    }
}
