//! Error types shared by the search engine and the move driver.

use thiserror::Error;

use crate::game_state::board::Move;
use crate::move_generation::move_generator::OracleError;

pub type SearchOutcome<T> = Result<T, SearchError>;

/// Represents all failures a top-level move-selection call can report.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    /// A depth limit, side code, algorithm code, or flag was not recognized.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// The side to act has no legal move at the root, or the depth limit was
    /// zero so no move could be determined.
    #[error("no legal move available")]
    NoLegalMove,
    /// The oracle produced a move it cannot apply consistently.
    #[error("oracle inconsistency at {mv}: {detail}")]
    OracleInconsistency { mv: Move, detail: String },
}

impl From<OracleError> for SearchError {
    fn from(err: OracleError) -> Self {
        let OracleError::IllegalMove { mv, reason } = err;
        SearchError::OracleInconsistency {
            mv,
            detail: reason.to_owned(),
        }
    }
}

/// Failures of the line-oriented driver protocol.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unexpected end of input while waiting for {0}")]
    UnexpectedEof(&'static str),
    #[error("malformed {what}: '{line}'")]
    Malformed { what: &'static str, line: String },
    #[error(transparent)]
    Search(#[from] SearchError),
}
