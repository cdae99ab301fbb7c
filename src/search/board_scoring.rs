//! Pluggable board evaluation interfaces and the two static evaluators.
//!
//! Search stays modular by delegating static scoring to this trait. Minimax
//! cuts off with [`UtilityScorer`], alpha-beta with [`HeuristicScorer`]; tests
//! align the two by handing either search the same scorer.

use crate::game_state::board::{Board, Side};
use crate::move_generation::move_generator::BoardOracle;
use crate::search::search_common::Score;

pub trait BoardScorer {
    /// Identity used in transposition cache keys.
    fn name(&self) -> &'static str;

    /// Score from the perspective of `side`.
    fn score<O: BoardOracle>(&self, oracle: &O, board: &Board, side: Side) -> Score;
}

/// Disk differential.
#[derive(Debug, Clone, Copy, Default)]
pub struct UtilityScorer;

impl UtilityScorer {
    pub fn utility<O: BoardOracle>(oracle: &O, board: &Board, side: Side) -> Score {
        let (own, other) = side_counts(oracle, board, side);
        own as Score - other as Score
    }
}

impl BoardScorer for UtilityScorer {
    fn name(&self) -> &'static str {
        "utility"
    }

    fn score<O: BoardOracle>(&self, oracle: &O, board: &Board, side: Side) -> Score {
        Self::utility(oracle, board, side)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeuristicWeights {
    /// Returned outright when the opponent cannot move and we are not behind.
    pub dominant_reward: Score,
    pub mobility_scale: Score,
    pub corner_bonus: Score,
    /// Applied to cells next to a corner, orthogonally or diagonally.
    pub corner_neighbor_penalty: Score,
    pub edge_bonus: Score,
    /// Flat perimeter bonus on boards smaller than 4x4.
    pub small_board_edge_bonus: Score,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self {
            dominant_reward: 25_000.0,
            mobility_scale: 100.0,
            corner_bonus: 100.0,
            corner_neighbor_penalty: 10.0,
            edge_bonus: 25.0,
            small_board_edge_bonus: 30.0,
        }
    }
}

/// Mobility, corner, and edge estimate for non-terminal cutoffs.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicScorer {
    pub weights: HeuristicWeights,
}

impl HeuristicScorer {
    pub const fn new(weights: HeuristicWeights) -> Self {
        Self { weights }
    }
}

impl BoardScorer for HeuristicScorer {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    fn score<O: BoardOracle>(&self, oracle: &O, board: &Board, side: Side) -> Score {
        let w = &self.weights;
        let opponent_moves = oracle.legal_moves(board, side.opposite()).len();

        if opponent_moves == 0 {
            let (own, other) = side_counts(oracle, board, side);
            if own >= other {
                return w.dominant_reward;
            }
        }

        let own_moves = oracle.legal_moves(board, side).len();
        let total = own_moves + opponent_moves;
        let mut score = if total > 0 {
            w.mobility_scale * (own_moves as Score - opponent_moves as Score) / total as Score
        } else {
            0.0
        };

        let n = board.size();
        let last = n - 1;
        for (column, row) in [(0, 0), (last, 0), (0, last), (last, last)] {
            if board.cell(column, row).is_side(side) {
                score += w.corner_bonus;
            }
        }

        let on_edge = |v: usize| v == 0 || v == last;
        if n >= 4 {
            let next_to_corner = |v: usize| v == 1 || v == n - 2;
            for (column, row, cell) in board.iter() {
                if !cell.is_side(side) {
                    continue;
                }
                let orthogonal = (on_edge(column) && next_to_corner(row))
                    || (next_to_corner(column) && on_edge(row));
                let diagonal = next_to_corner(column) && next_to_corner(row);
                if orthogonal || diagonal {
                    score -= w.corner_neighbor_penalty;
                } else if on_edge(column) || on_edge(row) {
                    score += w.edge_bonus;
                }
            }
        } else {
            for (column, row, cell) in board.iter() {
                if cell.is_side(side) && (on_edge(column) || on_edge(row)) {
                    score += w.small_board_edge_bonus;
                }
            }
        }

        score
    }
}

/// `(side's disks, opponent's disks)`.
fn side_counts<O: BoardOracle>(oracle: &O, board: &Board, side: Side) -> (usize, usize) {
    let (dark, light) = oracle.score(board);
    match side {
        Side::Dark => (dark, light),
        Side::Light => (light, dark),
    }
}
