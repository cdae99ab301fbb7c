//! Reference Othello rules implementing the board oracle.
//!
//! Legal moves are enumerated column-major (column outer, row inner), which
//! fixes the order the unordered searches visit children in.

use crate::errors::{SearchError, SearchOutcome};
use crate::game_state::board::{Board, Cell, Move, Side};
use crate::move_generation::move_generator::{BoardOracle, OracleError, OracleResult};

const DIRECTIONS: [(isize, isize); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct OthelloRules;

impl OthelloRules {
    /// Standard four-disk opening position for an even board of size 4 or more.
    pub fn initial_board(size: usize) -> SearchOutcome<Board> {
        if size < 4 || size % 2 != 0 {
            return Err(SearchError::InvalidConfiguration(format!(
                "initial board needs an even size of at least 4, got {size}"
            )));
        }
        let h = size / 2;
        let board = Board::empty(size)?;
        Ok(board.with_cells([
            (Move::new(h - 1, h - 1), Cell::Disk(Side::Light)),
            (Move::new(h, h), Cell::Disk(Side::Light)),
            (Move::new(h, h - 1), Cell::Disk(Side::Dark)),
            (Move::new(h - 1, h), Cell::Disk(Side::Dark)),
        ]))
    }

    /// Every run of opponent disks that `side` would flip by playing at `mv`.
    pub fn flanked_lines(board: &Board, side: Side, mv: Move) -> Vec<Vec<Move>> {
        let mut lines = Vec::new();
        for (dc, dr) in DIRECTIONS {
            let mut column = mv.column as isize + dc;
            let mut row = mv.row as isize + dr;
            let mut line = Vec::new();
            let mut closed = false;

            while board.in_bounds(column, row) {
                match board.cell(column as usize, row as usize) {
                    Cell::Empty => break,
                    Cell::Disk(owner) if owner == side => {
                        closed = true;
                        break;
                    }
                    Cell::Disk(_) => {
                        line.push(Move::new(column as usize, row as usize));
                        column += dc;
                        row += dr;
                    }
                }
            }

            if closed && !line.is_empty() {
                lines.push(line);
            }
        }
        lines
    }
}

impl BoardOracle for OthelloRules {
    fn legal_moves(&self, board: &Board, side: Side) -> Vec<Move> {
        let mut moves = Vec::new();
        for column in 0..board.size() {
            for row in 0..board.size() {
                let mv = Move::new(column, row);
                if board.cell(column, row) == Cell::Empty
                    && !Self::flanked_lines(board, side, mv).is_empty()
                {
                    moves.push(mv);
                }
            }
        }
        moves
    }

    fn play_move(&self, board: &Board, side: Side, mv: Move) -> OracleResult<Board> {
        match board.get(mv.column, mv.row) {
            None => Err(OracleError::IllegalMove {
                mv,
                reason: "cell is off the board",
            }),
            Some(Cell::Disk(_)) => Err(OracleError::IllegalMove {
                mv,
                reason: "cell is occupied",
            }),
            Some(Cell::Empty) => {
                let lines = Self::flanked_lines(board, side, mv);
                if lines.is_empty() {
                    return Err(OracleError::IllegalMove {
                        mv,
                        reason: "move flips no disks",
                    });
                }
                let disk = Cell::Disk(side);
                let flips = lines.into_iter().flatten().map(|flipped| (flipped, disk));
                Ok(board.with_cells(std::iter::once((mv, disk)).chain(flips)))
            }
        }
    }

    fn score(&self, board: &Board) -> (usize, usize) {
        (board.count(Side::Dark), board.count(Side::Light))
    }
}

/// Seeded random playout used by search tests to reach varied positions.
///
/// Returns a board together with a side that still has a legal move, or the
/// last side to move when the game ended early.
#[cfg(test)]
pub(crate) fn random_position(seed: u64, size: usize, plies: usize) -> (Board, Side) {
    use rand::prelude::IndexedRandom;
    use rand::{rngs::StdRng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(seed);
    let rules = OthelloRules;
    let mut board = OthelloRules::initial_board(size).expect("even board size");
    let mut side = Side::Dark;

    for _ in 0..plies {
        let moves = rules.legal_moves(&board, side);
        let Some(&mv) = moves.choose(&mut rng) else {
            if rules.legal_moves(&board, side.opposite()).is_empty() {
                break;
            }
            side = side.opposite();
            continue;
        };
        board = rules.play_move(&board, side, mv).expect("generated move");
        side = side.opposite();
    }

    if rules.legal_moves(&board, side).is_empty()
        && !rules.legal_moves(&board, side.opposite()).is_empty()
    {
        side = side.opposite();
    }
    (board, side)
}
