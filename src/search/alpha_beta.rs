//! Depth-limited alpha-beta with optional caching and move ordering.
//!
//! Same MAX/MIN layout as minimax, but cutoffs use the heuristic scorer and
//! siblings are skipped once `beta <= alpha`. Values are fail-soft; cached
//! entries carry the bound implied by the window they were searched with and
//! are only reused where that bound settles the node.

use log::debug;

use crate::errors::SearchOutcome;
use crate::game_state::board::{Board, Move, Side};
use crate::move_generation::move_generator::BoardOracle;
use crate::search::board_scoring::{BoardScorer, HeuristicScorer};
use crate::search::search_common::{
    checked_play, DepthLimit, NodeKind, Score, SearchConfig, SearchResult, SearchStats,
};
use crate::search::transposition_table::{Bound, CacheKey, TTEntry, TranspositionTable};

/// Pick a move for `side` with alpha-beta cut off by the default heuristic.
///
/// Returns `NoLegalMove` when `side` cannot move or `depth_limit` is zero.
pub fn select_move_alphabeta<O: BoardOracle>(
    oracle: &O,
    table: &mut TranspositionTable,
    board: &Board,
    side: Side,
    depth_limit: DepthLimit,
    caching: bool,
    ordering: bool,
) -> SearchOutcome<Move> {
    let config = SearchConfig {
        depth_limit,
        caching,
        ordering,
    };
    alpha_beta_search(
        oracle,
        &HeuristicScorer::default(),
        table,
        board,
        side,
        &config,
    )?
    .into_move()
}

/// Full alpha-beta result with an arbitrary scorer, searched from an
/// unbounded window. The table is cleared first.
pub fn alpha_beta_search<O: BoardOracle, S: BoardScorer>(
    oracle: &O,
    scorer: &S,
    table: &mut TranspositionTable,
    board: &Board,
    side: Side,
    config: &SearchConfig,
) -> SearchOutcome<SearchResult> {
    table.clear();
    let mut search = AlphaBeta {
        oracle,
        scorer,
        table,
        caching: config.caching,
        ordering: config.ordering,
        perspective: side,
        stats: SearchStats::default(),
    };

    let (best_move, value) = search.max_node(
        board,
        Score::NEG_INFINITY,
        Score::INFINITY,
        config.depth_limit.remaining(),
    )?;
    let stats = search.stats;
    let tt = search.table.stats();
    debug!(
        "alphabeta side={:?} depth={} caching={} ordering={} move={:?} value={} nodes={} evals={} hits={} tt_probes={} tt_hits={} tt_stores={}",
        side,
        config.depth_limit,
        config.caching,
        config.ordering,
        best_move,
        value,
        stats.nodes,
        stats.evaluations,
        stats.cache_hits,
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

struct AlphaBeta<'a, O, S> {
    oracle: &'a O,
    scorer: &'a S,
    table: &'a mut TranspositionTable,
    caching: bool,
    ordering: bool,
    perspective: Side,
    stats: SearchStats,
}

impl<O: BoardOracle, S: BoardScorer> AlphaBeta<'_, O, S> {
    fn max_node(
        &mut self,
        board: &Board,
        mut alpha: Score,
        beta: Score,
        remaining: Option<u32>,
    ) -> SearchOutcome<(Option<Move>, Score)> {
        self.stats.nodes += 1;
        let key = self.key(board, NodeKind::Max, remaining);
        if let Some(hit) = self.probe(key.as_ref(), alpha, beta) {
            return Ok(hit);
        }

        let moves = self.oracle.legal_moves(board, self.perspective);
        if moves.is_empty() || remaining == Some(0) {
            return Ok((None, self.evaluate(board)));
        }

        let alpha_in = alpha;
        let mut best = (None, Score::NEG_INFINITY);
        for (mv, child) in self.expand(board, NodeKind::Max, moves)? {
            let (_, value) = self.min_node(&child, alpha, beta, remaining.map(|d| d - 1))?;
            if value > best.1 {
                best = (Some(mv), value);
            }
            alpha = alpha.max(best.1);
            if beta <= alpha {
                break;
            }
        }

        let bound = if best.1 <= alpha_in {
            Bound::Upper
        } else if best.1 >= beta {
            Bound::Lower
        } else {
            Bound::Exact
        };
        self.store(key, best, bound);
        Ok(best)
    }

    fn min_node(
        &mut self,
        board: &Board,
        alpha: Score,
        mut beta: Score,
        remaining: Option<u32>,
    ) -> SearchOutcome<(Option<Move>, Score)> {
        self.stats.nodes += 1;
        let key = self.key(board, NodeKind::Min, remaining);
        if let Some(hit) = self.probe(key.as_ref(), alpha, beta) {
            return Ok(hit);
        }

        let moves = self.oracle.legal_moves(board, self.perspective.opposite());
        if moves.is_empty() || remaining == Some(0) {
            return Ok((None, self.evaluate(board)));
        }

        let beta_in = beta;
        let mut best = (None, Score::INFINITY);
        for (mv, child) in self.expand(board, NodeKind::Min, moves)? {
            let (_, value) = self.max_node(&child, alpha, beta, remaining.map(|d| d - 1))?;
            if value < best.1 {
                best = (Some(mv), value);
            }
            beta = beta.min(best.1);
            if beta <= alpha {
                break;
            }
        }

        let bound = if best.1 >= beta_in {
            Bound::Lower
        } else if best.1 <= alpha {
            Bound::Upper
        } else {
            Bound::Exact
        };
        self.store(key, best, bound);
        Ok(best)
    }

    /// Children in visiting order: oracle order, or sorted by their static
    /// score (descending at MAX, ascending at MIN) when ordering is on. The
    /// sort is stable so equal estimates keep oracle order.
    fn expand(
        &mut self,
        board: &Board,
        node: NodeKind,
        moves: Vec<Move>,
    ) -> SearchOutcome<Vec<(Move, Board)>> {
        let mover = node.mover(self.perspective);
        let children = moves
            .into_iter()
            .map(|mv| checked_play(self.oracle, board, mover, mv).map(|child| (mv, child)))
            .collect::<SearchOutcome<Vec<_>>>()?;

        if !self.ordering {
            return Ok(children);
        }

        let mut scored = children
            .into_iter()
            .map(|(mv, child)| {
                let estimate = self.evaluate(&child);
                (estimate, mv, child)
            })
            .collect::<Vec<_>>();
        match node {
            NodeKind::Max => scored.sort_by(|a, b| b.0.total_cmp(&a.0)),
            NodeKind::Min => scored.sort_by(|a, b| a.0.total_cmp(&b.0)),
        }
        Ok(scored.into_iter().map(|(_, mv, child)| (mv, child)).collect())
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

    fn probe(
        &mut self,
        key: Option<&CacheKey>,
        alpha: Score,
        beta: Score,
    ) -> Option<(Option<Move>, Score)> {
        let entry = self.table.probe(key?)?;
        let settles = match entry.bound {
            Bound::Exact => true,
            Bound::Lower => entry.value >= beta,
            Bound::Upper => entry.value <= alpha,
        };
        if !settles {
            return None;
        }
        self.stats.cache_hits += 1;
        Some((entry.best_move, entry.value))
    }

    fn store(
        &mut self,
        key: Option<CacheKey>,
        (best_move, value): (Option<Move>, Score),
        bound: Bound,
    ) {
        if let Some(key) = key {
            self.table.store(
                key,
                TTEntry {
                    best_move,
                    value,
                    bound,
                },
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{alpha_beta_search, select_move_alphabeta};
    use crate::errors::SearchError;
    use crate::game_state::board::{Board, Cell, Move, Side};
    use crate::game_state::othello_rules::{random_position, OthelloRules};
    use crate::move_generation::move_generator::BoardOracle;
    use crate::search::board_scoring::{BoardScorer, HeuristicScorer, UtilityScorer};
    use crate::search::minimax::minimax_search;
    use crate::search::search_common::{DepthLimit, SearchConfig};
    use crate::search::transposition_table::TranspositionTable;

    fn config(depth: u32, caching: bool, ordering: bool) -> SearchConfig {
        SearchConfig {
            depth_limit: DepthLimit::Plies(depth),
            caching,
            ordering,
        }
    }

    fn positions() -> Vec<(Board, Side)> {
        (0..10)
            .map(|seed| random_position(seed, 6, 4 + 2 * seed as usize))
            .collect()
    }

    #[test]
    fn depth_zero_returns_heuristic_without_move() {
        let (board, side) = random_position(9, 6, 12);
        let mut table = TranspositionTable::new();
        let result = alpha_beta_search(
            &OthelloRules,
            &HeuristicScorer::default(),
            &mut table,
            &board,
            side,
            &config(0, true, true),
        )
        .expect("search should run");

        assert_eq!(result.best_move, None);
        assert_eq!(
            result.value,
            HeuristicScorer::default().score(&OthelloRules, &board, side)
        );
        assert_eq!(
            select_move_alphabeta(
                &OthelloRules,
                &mut table,
                &board,
                side,
                DepthLimit::Plies(0),
                true,
                true
            ),
            Err(SearchError::NoLegalMove)
        );
    }

    #[test]
    fn value_matches_minimax_with_the_same_scorer() {
        let mut table = TranspositionTable::new();
        for (i, (board, side)) in positions().into_iter().enumerate() {
            for depth in 1..=3 {
                let mm = minimax_search(
                    &OthelloRules,
                    &UtilityScorer,
                    &mut table,
                    &board,
                    side,
                    &config(depth, false, false),
                )
                .expect("minimax");
                let ab = alpha_beta_search(
                    &OthelloRules,
                    &UtilityScorer,
                    &mut table,
                    &board,
                    side,
                    &config(depth, false, false),
                )
                .expect("alpha-beta");
                assert_eq!(mm.value, ab.value, "position {i} depth {depth}");
                assert_eq!(mm.best_move, ab.best_move, "position {i} depth {depth}");
                assert!(ab.stats.nodes <= mm.stats.nodes);

                let heuristic = HeuristicScorer::default();
                let mm = minimax_search(
                    &OthelloRules,
                    &heuristic,
                    &mut table,
                    &board,
                    side,
                    &config(depth, false, false),
                )
                .expect("minimax");
                let ab = alpha_beta_search(
                    &OthelloRules,
                    &heuristic,
                    &mut table,
                    &board,
                    side,
                    &config(depth, false, false),
                )
                .expect("alpha-beta");
                assert_eq!(mm.value, ab.value, "position {i} depth {depth}");
            }
        }
    }

    #[test]
    fn caching_does_not_change_move_or_value() {
        let scorer = HeuristicScorer::default();
        let mut table = TranspositionTable::new();
        for (i, (board, side)) in positions().into_iter().enumerate() {
            for ordering in [false, true] {
                for depth in 1..=4 {
                    let plain = alpha_beta_search(
                        &OthelloRules,
                        &scorer,
                        &mut table,
                        &board,
                        side,
                        &config(depth, false, ordering),
                    )
                    .expect("uncached");
                    let cached = alpha_beta_search(
                        &OthelloRules,
                        &scorer,
                        &mut table,
                        &board,
                        side,
                        &config(depth, true, ordering),
                    )
                    .expect("cached");
                    assert_eq!(plain.best_move, cached.best_move, "position {i} depth {depth}");
                    assert_eq!(plain.value, cached.value, "position {i} depth {depth}");
                    // Bound entries that do not settle the window are probed
                    // but not reused.
                    let tt = table.stats();
                    assert!(cached.stats.cache_hits <= tt.hits);
                    assert!(tt.hits <= tt.probes);
                    assert!(table.len() as u64 <= tt.stores);
                }
            }
        }
    }

    #[test]
    fn ordering_does_not_change_value() {
        let scorer = HeuristicScorer::default();
        let mut table = TranspositionTable::new();
        for (i, (board, side)) in positions().into_iter().enumerate() {
            for caching in [false, true] {
                for depth in 1..=4 {
                    let unordered = alpha_beta_search(
                        &OthelloRules,
                        &scorer,
                        &mut table,
                        &board,
                        side,
                        &config(depth, caching, false),
                    )
                    .expect("unordered");
                    let ordered = alpha_beta_search(
                        &OthelloRules,
                        &scorer,
                        &mut table,
                        &board,
                        side,
                        &config(depth, caching, true),
                    )
                    .expect("ordered");
                    assert_eq!(unordered.value, ordered.value, "position {i} depth {depth}");
                }
            }
        }
    }

    #[test]
    fn returned_moves_are_legal() {
        let mut table = TranspositionTable::new();
        for (board, side) in positions() {
            let legal = OthelloRules.legal_moves(&board, side);
            match select_move_alphabeta(
                &OthelloRules,
                &mut table,
                &board,
                side,
                DepthLimit::Plies(3),
                true,
                true,
            ) {
                Ok(mv) => assert!(legal.contains(&mv)),
                Err(err) => {
                    assert_eq!(err, SearchError::NoLegalMove);
                    assert!(legal.is_empty());
                }
            }
        }
    }

    #[test]
    fn side_without_moves_gets_no_legal_move() {
        let board = Board::empty(4).expect("board").with_cells([
            (Move::new(0, 0), Cell::Disk(Side::Dark)),
            (Move::new(1, 0), Cell::Disk(Side::Light)),
        ]);
        let mut table = TranspositionTable::new();
        let result = select_move_alphabeta(
            &OthelloRules,
            &mut table,
            &board,
            Side::Light,
            DepthLimit::Plies(3),
            false,
            false,
        );
        assert_eq!(result, Err(SearchError::NoLegalMove));
    }
}
