//! Board/move oracle seam consumed by the search engine.
//!
//! The engine never enumerates moves or flips disks itself; it goes through
//! this trait so alternative rule sets can be swapped without touching search.

use thiserror::Error;

use crate::game_state::board::{Board, Move, Side};

pub type OracleResult<T> = Result<T, OracleError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OracleError {
    #[error("illegal move {mv}: {reason}")]
    IllegalMove { mv: Move, reason: &'static str },
}

pub trait BoardOracle {
    /// Legal destination cells for `side`, in oracle-defined order. Empty when
    /// the side cannot move.
    fn legal_moves(&self, board: &Board, side: Side) -> Vec<Move>;

    /// Board after `side` plays `mv`. The input board is never modified.
    fn play_move(&self, board: &Board, side: Side, mv: Move) -> OracleResult<Board>;

    /// Disk counts as `(dark, light)`.
    fn score(&self, board: &Board) -> (usize, usize);
}

impl<T: BoardOracle + ?Sized> BoardOracle for &T {
    fn legal_moves(&self, board: &Board, side: Side) -> Vec<Move> {
        (**self).legal_moves(board, side)
    }

    fn play_move(&self, board: &Board, side: Side, mv: Move) -> OracleResult<Board> {
        (**self).play_move(board, side, mv)
    }

    fn score(&self, board: &Board) -> (usize, usize) {
        (**self).score(board)
    }
}
