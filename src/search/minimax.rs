//! Unpruned depth-limited minimax with optional transposition caching.
//!
//! MAX nodes are the perspective side to move, MIN nodes its opponent; both
//! score from the perspective side. Children are visited in oracle order and
//! the first strictly better value wins ties.

use log::debug;

use crate::errors::SearchOutcome;
use crate::game_state::board::{Board, Move, Side};
use crate::move_generation::move_generator::BoardOracle;
use crate::search::board_scoring::{BoardScorer, UtilityScorer};
use crate::search::search_common::{
    checked_play, DepthLimit, NodeKind, Score, SearchConfig, SearchResult, SearchStats,
};
use crate::search::transposition_table::{Bound, CacheKey, TTEntry, TranspositionTable};

/// Pick a move for `side` with minimax cut off by the disk differential.
///
/// Returns `NoLegalMove` when `side` cannot move or `depth_limit` is zero.
pub fn select_move_minimax<O: BoardOracle>(
    oracle: &O,
    table: &mut TranspositionTable,
    board: &Board,
    side: Side,
    depth_limit: DepthLimit,
    caching: bool,
) -> SearchOutcome<Move> {
    let config = SearchConfig {
        depth_limit,
        caching,
        ordering: false,
    };
    minimax_search(oracle, &UtilityScorer, table, board, side, &config)?.into_move()
}

/// Full minimax result with an arbitrary scorer. `config.ordering` is ignored.
///
/// The table is cleared first, so entries never outlive one call.
pub fn minimax_search<O: BoardOracle, S: BoardScorer>(
    oracle: &O,
    scorer: &S,
    table: &mut TranspositionTable,
    board: &Board,
    side: Side,
    config: &SearchConfig,
) -> SearchOutcome<SearchResult> {
    table.clear();
    let mut search = Minimax {
        oracle,
        scorer,
        table,
        caching: config.caching,
        perspective: side,
        stats: SearchStats::default(),
    };

    let (best_move, value) = search.max_node(board, config.depth_limit.remaining())?;
    let stats = search.stats;
    let tt = search.table.stats();
    debug!(
        "minimax side={:?} depth={} caching={} move={:?} value={} nodes={} evals={} tt_probes={} tt_hits={} tt_stores={}",
        side,
        config.depth_limit,
        config.caching,
        best_move,
        value,
        stats.nodes,
        stats.evaluations,
        tt.probes,
        tt.hits,
        tt.stores
    );

    Ok(SearchResult {
        best_move,
        value,
        stats,
    })
}

struct Minimax<'a, O, S> {
    oracle: &'a O,
    scorer: &'a S,
    table: &'a mut TranspositionTable,
    caching: bool,
    perspective: Side,
    stats: SearchStats,
}

impl<O: BoardOracle, S: BoardScorer> Minimax<'_, O, S> {
    fn max_node(
        &mut self,
        board: &Board,
        remaining: Option<u32>,
    ) -> SearchOutcome<(Option<Move>, Score)> {
        self.stats.nodes += 1;
        let key = self.key(board, NodeKind::Max, remaining);
        if let Some(hit) = self.probe(key.as_ref()) {
            return Ok(hit);
        }

        let moves = self.oracle.legal_moves(board, self.perspective);
        if moves.is_empty() || remaining == Some(0) {
            return Ok((None, self.evaluate(board)));
        }

        let mut best = (None, Score::NEG_INFINITY);
        for mv in moves {
            let child = checked_play(self.oracle, board, self.perspective, mv)?;
            let (_, value) = self.min_node(&child, remaining.map(|d| d - 1))?;
            if value > best.1 {
                best = (Some(mv), value);
            }
        }

        self.store(key, best);
        Ok(best)
    }

    fn min_node(
        &mut self,
        board: &Board,
        remaining: Option<u32>,
    ) -> SearchOutcome<(Option<Move>, Score)> {
        self.stats.nodes += 1;
        let key = self.key(board, NodeKind::Min, remaining);
        if let Some(hit) = self.probe(key.as_ref()) {
            return Ok(hit);
        }

        let opponent = self.perspective.opposite();
        let moves = self.oracle.legal_moves(board, opponent);
        if moves.is_empty() || remaining == Some(0) {
            return Ok((None, self.evaluate(board)));
        }

        let mut best = (None, Score::INFINITY);
        for mv in moves {
            let child = checked_play(self.oracle, board, opponent, mv)?;
            let (_, value) = self.max_node(&child, remaining.map(|d| d - 1))?;
            if value < best.1 {
                best = (Some(mv), value);
            }
        }

        self.store(key, best);
        Ok(best)
    }

    fn evaluate(&mut self, board: &Board) -> Score {
        self.stats.evaluations += 1;
        self.scorer.score(self.oracle, board, self.perspective)
    }

    fn key(&self, board: &Board, node: NodeKind, remaining: Option<u32>) -> Option<CacheKey> {
        self.caching.then(|| CacheKey {
            board: board.clone(),
            perspective: self.perspective,
            node,
            remaining,
            scorer: self.scorer.name(),
        })
    }

    fn probe(&mut self, key: Option<&CacheKey>) -> Option<(Option<Move>, Score)> {
        let entry = self.table.probe(key?)?;
        self.stats.cache_hits += 1;
        Some((entry.best_move, entry.value))
    }

    fn store(&mut self, key: Option<CacheKey>, (best_move, value): (Option<Move>, Score)) {
        if let Some(key) = key {
            self.table.store(
                key,
                TTEntry {
                    best_move,
                    value,
                    bound: Bound::Exact,
                },
            );
        }
    }
}
