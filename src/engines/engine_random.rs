//! Random-move engine.
//!
//! Selects uniformly from legal moves and is used as a baseline opponent by
//! the match harness and for diagnostics.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::errors::SearchOutcome;
use crate::game_state::board::{Board, Side};
use crate::move_generation::move_generator::BoardOracle;

pub struct RandomEngine<O> {
    oracle: O,
    rng: StdRng,
}

impl<O: BoardOracle> RandomEngine<O> {
    pub fn new(oracle: O) -> Self {
        Self {
            oracle,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic variant for reproducible matches.
    pub fn with_seed(oracle: O, seed: u64) -> Self {
        Self {
            oracle,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<O: BoardOracle> Engine for RandomEngine<O> {
    fn name(&self) -> &str {
        "Random"
    }

    fn choose_move(&mut self, board: &Board, side: Side) -> SearchOutcome<EngineOutput> {
        let legal_moves = self.oracle.legal_moves(board, side);
        Ok(EngineOutput {
            best_move: legal_moves.choose(&mut self.rng).copied(),
            ..EngineOutput::default()
        })
    }
}
