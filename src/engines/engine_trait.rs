//! Engine abstraction layer used by the driver and the match harness.
//!
//! Wraps the search entry points behind one trait so the driver can pick an
//! algorithm at runtime from its configuration line.

use crate::errors::SearchOutcome;
use crate::game_state::board::{Board, Move, Side};
use crate::search::search_common::{Score, SearchStats};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineOutput {
    /// `None` when the side to act has no move.
    pub best_move: Option<Move>,
    /// Backed-up value, when the engine searched.
    pub value: Option<Score>,
    pub stats: SearchStats,
}

pub trait Engine {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    fn choose_move(&mut self, board: &Board, side: Side) -> SearchOutcome<EngineOutput>;
}
