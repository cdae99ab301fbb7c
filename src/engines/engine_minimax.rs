//! Minimax engine: utility cutoffs, optional caching.

use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::errors::SearchOutcome;
use crate::game_state::board::{Board, Side};
use crate::move_generation::move_generator::BoardOracle;
use crate::search::board_scoring::UtilityScorer;
use crate::search::minimax::minimax_search;
use crate::search::search_common::SearchConfig;
use crate::search::transposition_table::TranspositionTable;

pub struct MinimaxEngine<O> {
    oracle: O,
    config: SearchConfig,
    table: TranspositionTable,
}

impl<O: BoardOracle> MinimaxEngine<O> {
    pub fn new(oracle: O, config: SearchConfig) -> Self {
        Self {
            oracle,
            config,
            table: TranspositionTable::new(),
        }
    }
}

impl<O: BoardOracle> Engine for MinimaxEngine<O> {
    fn name(&self) -> &str {
        "Minimax"
    }

    fn new_game(&mut self) {
        self.table.clear();
    }

    fn choose_move(&mut self, board: &Board, side: Side) -> SearchOutcome<EngineOutput> {
        let result = minimax_search(
            &self.oracle,
            &UtilityScorer,
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
