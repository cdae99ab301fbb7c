//! Configuration, results, and counters shared by the minimax and alpha-beta
//! searches.

use std::fmt;

use crate::errors::{SearchError, SearchOutcome};
use crate::game_state::board::{Board, Move, Side};
use crate::move_generation::move_generator::BoardOracle;

pub type Score = f64;

/// Raw depth value the driver uses to request an unbounded search.
pub const UNBOUNDED_DEPTH_SENTINEL: i64 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DepthLimit {
    Unbounded,
    Plies(u32),
}

impl DepthLimit {
    pub fn from_raw(raw: i64) -> SearchOutcome<Self> {
        if raw == UNBOUNDED_DEPTH_SENTINEL {
            return Ok(DepthLimit::Unbounded);
        }
        u32::try_from(raw).map(DepthLimit::Plies).map_err(|_| {
            SearchError::InvalidConfiguration(format!("invalid depth limit {raw}"))
        })
    }

    /// Remaining depth handed to the root node; `None` never cuts off.
    #[inline]
    pub(crate) fn remaining(self) -> Option<u32> {
        match self {
            DepthLimit::Unbounded => None,
            DepthLimit::Plies(plies) => Some(plies),
        }
    }
}

impl fmt::Display for DepthLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DepthLimit::Unbounded => write!(f, "unbounded"),
            DepthLimit::Plies(plies) => write!(f, "{plies}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Minimax,
    AlphaBeta,
}

impl Algorithm {
    /// Driver flag: 1 selects minimax, 0 alpha-beta.
    pub fn from_flag(flag: i64) -> SearchOutcome<Self> {
        match flag {
            1 => Ok(Algorithm::Minimax),
            0 => Ok(Algorithm::AlphaBeta),
            other => Err(SearchError::InvalidConfiguration(format!(
                "unknown algorithm flag {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub depth_limit: DepthLimit,
    pub caching: bool,
    /// Alpha-beta only; minimax ignores it.
    pub ordering: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth_limit: DepthLimit::Plies(4),
            caching: false,
            ordering: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Interior and leaf nodes entered, cache hits included.
    pub nodes: u64,
    /// Static evaluator invocations, ordering estimates included.
    pub evaluations: u64,
    pub cache_hits: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub value: Score,
    pub stats: SearchStats,
}

impl SearchResult {
    /// Root move, or `NoLegalMove` when the search stopped at the root.
    pub fn into_move(self) -> SearchOutcome<Move> {
        self.best_move.ok_or(SearchError::NoLegalMove)
    }
}

/// Which node variant a cache entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Max,
    Min,
}

impl NodeKind {
    #[inline]
    pub(crate) fn mover(self, perspective: Side) -> Side {
        match self {
            NodeKind::Max => perspective,
            NodeKind::Min => perspective.opposite(),
        }
    }
}

/// Apply `mv` for `side`, failing fast when the oracle contradicts itself.
pub(crate) fn checked_play<O: BoardOracle>(
    oracle: &O,
    board: &Board,
    side: Side,
    mv: Move,
) -> SearchOutcome<Board> {
    let inconsistent = |detail: &str| SearchError::OracleInconsistency {
        mv,
        detail: detail.to_owned(),
    };

    match board.get(mv.column, mv.row) {
        None => return Err(inconsistent("generated move is off the board")),
        Some(cell) if !cell.is_empty() => {
            return Err(inconsistent("generated move targets an occupied cell"))
        }
        Some(_) => {}
    }

    let child = oracle.play_move(board, side, mv)?;
    if child.size() != board.size() || !child.cell(mv.column, mv.row).is_side(side) {
        return Err(inconsistent("applied move did not place the mover's disk"));
    }
    Ok(child)
}
