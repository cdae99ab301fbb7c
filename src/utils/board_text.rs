//! Board text used on the driver protocol.
//!
//! A board is a list of rows, each a list of cell codes (0 empty, 1 dark,
//! 2 light), written with either brackets or parentheses:
//! `[[0, 1], [2, 0]]` or `((0, 1), (2, 0))`.

use crate::errors::ProtocolError;
use crate::game_state::board::{Board, Cell};

pub fn parse_board(text: &str) -> Result<Board, ProtocolError> {
    let malformed = || ProtocolError::Malformed {
        what: "board",
        line: text.to_owned(),
    };

    let mut rows: Vec<Vec<Cell>> = Vec::new();
    let mut current: Vec<Cell> = Vec::new();
    let mut token = String::new();
    let mut openers: Vec<char> = Vec::new();
    // Set after a row closes until the comma that separates it from the next.
    let mut row_pending_separator = false;
    let mut closed_outer = false;

    for ch in text.trim().chars() {
        if closed_outer && !ch.is_whitespace() {
            return Err(malformed());
        }
        match ch {
            '[' | '(' => {
                match openers.len() {
                    0 => {}
                    1 if !row_pending_separator => {}
                    _ => return Err(malformed()),
                }
                openers.push(ch);
            }
            ']' | ')' => {
                let opener = openers.pop().ok_or_else(malformed)?;
                if closing_for(opener) != ch {
                    return Err(malformed());
                }
                match openers.len() {
                    1 => {
                        let cell = std::mem::take(&mut token);
                        let cell = cell.trim();
                        // `[]` or a trailing comma leaves nothing to read.
                        if !cell.is_empty() {
                            current.push(parse_cell(cell).ok_or_else(malformed)?);
                        }
                        rows.push(std::mem::take(&mut current));
                        row_pending_separator = true;
                    }
                    0 => closed_outer = true,
                    _ => return Err(malformed()),
                }
            }
            ',' => match openers.len() {
                2 => {
                    let cell = std::mem::take(&mut token);
                    current.push(parse_cell(cell.trim()).ok_or_else(malformed)?);
                }
                1 if row_pending_separator => row_pending_separator = false,
                _ => return Err(malformed()),
            },
            c if openers.len() == 2 => token.push(c),
            c if c.is_whitespace() => {}
            _ => return Err(malformed()),
        }
    }

    if !closed_outer {
        return Err(malformed());
    }
    Ok(Board::from_rows(rows)?)
}

fn closing_for(opener: char) -> char {
    if opener == '(' {
        ')'
    } else {
        ']'
    }
}

/// Exactly one digit, 0 to 2.
fn parse_cell(token: &str) -> Option<Cell> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(digit), None) => Cell::from_code(digit.to_digit(10)? as u8),
        _ => None,
    }
}

/// Inverse of [`parse_board`], bracket style.
pub fn format_board(board: &Board) -> String {
    let rows = (0..board.size())
        .map(|row| {
            let cells = (0..board.size())
                .map(|column| board.cell(column, row).code().to_string())
                .collect::<Vec<_>>()
                .join(", ");
            format!("[{cells}]")
        })
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{rows}]")
}
