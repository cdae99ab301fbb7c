//! Immutable board representation shared by the oracle and the search.
//!
//! Boards are value types: every move application builds a new board, and the
//! cell storage is reference counted so clones used as cache keys or passed
//! down the recursion are cheap.

use std::fmt;
use std::sync::Arc;

use crate::errors::{SearchError, SearchOutcome};

/// Side to move. Dark moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    Dark,
    Light,
}

impl Side {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Side::Dark => 0,
            Side::Light => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Side::Dark => Side::Light,
            Side::Light => Side::Dark,
        }
    }

    /// Protocol code: 1 for dark, 2 for light.
    #[inline]
    pub const fn code(self) -> u8 {
        match self {
            Side::Dark => 1,
            Side::Light => 2,
        }
    }

    pub fn from_code(code: i64) -> SearchOutcome<Self> {
        match code {
            1 => Ok(Side::Dark),
            2 => Ok(Side::Light),
            other => Err(SearchError::InvalidConfiguration(format!(
                "unknown side code {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Disk(Side),
}

impl Cell {
    #[inline]
    pub const fn code(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Disk(side) => side.code(),
        }
    }

    #[inline]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Cell::Empty),
            1 => Some(Cell::Disk(Side::Dark)),
            2 => Some(Cell::Disk(Side::Light)),
            _ => None,
        }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    #[inline]
    pub fn is_side(self, side: Side) -> bool {
        self == Cell::Disk(side)
    }
}

/// Destination cell of a play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub column: usize,
    pub row: usize,
}

impl Move {
    #[inline]
    pub const fn new(column: usize, row: usize) -> Self {
        Self { column, row }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.column, self.row)
    }
}

/// Square grid of cells, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    cells: Arc<[Cell]>,
}

impl Board {
    pub fn empty(size: usize) -> SearchOutcome<Self> {
        if size == 0 {
            return Err(SearchError::InvalidConfiguration(
                "board size must be positive".to_owned(),
            ));
        }
        Ok(Self {
            size,
            cells: vec![Cell::Empty; size * size].into(),
        })
    }

    /// Build a board from rows; every row must be as long as there are rows.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> SearchOutcome<Self> {
        let size = rows.len();
        if size == 0 {
            return Err(SearchError::InvalidConfiguration(
                "board has no rows".to_owned(),
            ));
        }
        if let Some(bad) = rows.iter().position(|row| row.len() != size) {
            return Err(SearchError::InvalidConfiguration(format!(
                "row {bad} has {} cells, expected {size}",
                rows[bad].len()
            )));
        }
        Ok(Self {
            size,
            cells: rows.into_iter().flatten().collect::<Vec<_>>().into(),
        })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn in_bounds(&self, column: isize, row: isize) -> bool {
        column >= 0 && row >= 0 && (column as usize) < self.size && (row as usize) < self.size
    }

    /// Cell at `(column, row)`; callers must stay in bounds.
    #[inline]
    pub fn cell(&self, column: usize, row: usize) -> Cell {
        self.cells[row * self.size + column]
    }

    #[inline]
    pub fn get(&self, column: usize, row: usize) -> Option<Cell> {
        if column < self.size && row < self.size {
            Some(self.cell(column, row))
        } else {
            None
        }
    }

    /// New board with the given cells replaced.
    pub fn with_cells(&self, changes: impl IntoIterator<Item = (Move, Cell)>) -> Self {
        let mut cells = self.cells.to_vec();
        for (mv, cell) in changes {
            cells[mv.row * self.size + mv.column] = cell;
        }
        Self {
            size: self.size,
            cells: cells.into(),
        }
    }

    #[inline]
    pub fn with_cell(&self, mv: Move, cell: Cell) -> Self {
        self.with_cells([(mv, cell)])
    }

    pub fn count(&self, side: Side) -> usize {
        self.cells.iter().filter(|cell| cell.is_side(side)).count()
    }

    /// Iterate `(column, row, cell)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (i % size, i / size, *cell))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            for column in 0..self.size {
                let glyph = match self.cell(column, row) {
                    Cell::Empty => '.',
                    Cell::Disk(Side::Dark) => 'X',
                    Cell::Disk(Side::Light) => 'O',
                };
                write!(f, "{glyph}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
