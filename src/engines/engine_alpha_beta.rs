//! Alpha-beta engine: heuristic cutoffs, optional caching and ordering.

use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::errors::SearchOutcome;
use crate::game_state::board::{Board, Side};
use crate::move_generation::move_generator::BoardOracle;
use crate::search::alpha_beta::alpha_beta_search;
use crate::search::board_scoring::{HeuristicScorer, HeuristicWeights};
use crate::search::search_common::SearchConfig;
use crate::search::transposition_table::TranspositionTable;

pub struct AlphaBetaEngine<O> {
    oracle: O,
    config: SearchConfig,
    scorer: HeuristicScorer,
    table: TranspositionTable,
}

impl<O: BoardOracle> AlphaBetaEngine<O> {
    pub fn new(oracle: O, config: SearchConfig) -> Self {
        Self::with_weights(oracle, config, HeuristicWeights::default())
    }

    pub fn with_weights(oracle: O, config: SearchConfig, weights: HeuristicWeights) -> Self {
        Self {
            oracle,
            config,
            scorer: HeuristicScorer::new(weights),
            table: TranspositionTable::new(),
        }
    }
}

impl<O: BoardOracle> Engine for AlphaBetaEngine<O> {
    fn name(&self) -> &str {
        "AlphaBeta"
    }

    fn new_game(&mut self) {
        self.table.clear();
    }

    fn choose_move(&mut self, board: &Board, side: Side) -> SearchOutcome<EngineOutput> {
        let result = alpha_beta_search(
            &self.oracle,
            &self.scorer,
            &mut self.table,
            board,
            side,
            &self.config,
        )?;
        Ok(EngineOutput {
            best_move: result.best_move,
            value: Some(result.value),
            stats: result.stats,
        })
    }
}
