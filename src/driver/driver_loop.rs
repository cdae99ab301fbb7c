//! Line-oriented move driver and command loop.
//!
//! Announces the engine, reads one configuration line
//! (`color,limit,minimax,caching,ordering`), then answers every
//! `SCORE <dark> <light>` + board pair with `<column> <row>` (or `pass`) until
//! `FINAL <dark> <light>` or end of input. Diagnostics go to the log, never to
//! the protocol stream.

use std::io::{self, BufRead, Write};

use log::{info, warn};

use crate::errors::{ProtocolError, SearchError, SearchOutcome};
use crate::game_state::board::{Board, Move, Side};
use crate::game_state::othello_rules::OthelloRules;
use crate::search::alpha_beta::select_move_alphabeta;
use crate::search::minimax::select_move_minimax;
use crate::search::search_common::{Algorithm, DepthLimit, SearchConfig};
use crate::search::transposition_table::TranspositionTable;
use crate::utils::board_text::parse_board;

pub const ENGINE_NAME: &str = "Othello AI";
pub const PASS_REPLY: &str = "pass";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverConfig {
    pub side: Side,
    pub algorithm: Algorithm,
    pub search: SearchConfig,
}

impl DriverConfig {
    pub fn parse(line: &str) -> Result<Self, ProtocolError> {
        let fields = line
            .trim()
            .split(',')
            .map(|field| field.trim().parse::<i64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| ProtocolError::Malformed {
                what: "configuration",
                line: line.to_owned(),
            })?;

        let &[color, limit, minimax, caching, ordering] = fields.as_slice() else {
            return Err(ProtocolError::Malformed {
                what: "configuration",
                line: line.to_owned(),
            });
        };

        Ok(Self {
            side: Side::from_code(color)?,
            algorithm: Algorithm::from_flag(minimax)?,
            search: SearchConfig {
                depth_limit: DepthLimit::from_raw(limit)?,
                caching: parse_flag("caching", caching)?,
                ordering: parse_flag("ordering", ordering)?,
            },
        })
    }

    /// Move for the configured side, or `None` when it has to pass.
    pub fn select_move(
        &self,
        table: &mut TranspositionTable,
        board: &Board,
    ) -> SearchOutcome<Option<Move>> {
        let SearchConfig {
            depth_limit,
            caching,
            ordering,
        } = self.search;
        let selected = match self.algorithm {
            Algorithm::Minimax => {
                select_move_minimax(&OthelloRules, table, board, self.side, depth_limit, caching)
            }
            Algorithm::AlphaBeta => select_move_alphabeta(
                &OthelloRules,
                table,
                board,
                self.side,
                depth_limit,
                caching,
                ordering,
            ),
        };
        match selected {
            Ok(mv) => Ok(Some(mv)),
            Err(SearchError::NoLegalMove) => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn log_summary(&self) {
        match self.algorithm {
            Algorithm::Minimax => info!("running minimax"),
            Algorithm::AlphaBeta => info!("running alpha-beta"),
        }
        info!(
            "state caching {}",
            if self.search.caching { "on" } else { "off" }
        );
        info!(
            "node ordering {}",
            if self.search.ordering { "on" } else { "off" }
        );
        info!("depth limit {}", self.search.depth_limit);
        if self.algorithm == Algorithm::Minimax && self.search.ordering {
            info!("node ordering has no effect on minimax");
        }
    }
}

fn parse_flag(name: &str, value: i64) -> Result<bool, SearchError> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(SearchError::InvalidConfiguration(format!(
            "{name} flag must be 0 or 1, got {other}"
        ))),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GameStatus {
    InProgress { dark: u32, light: u32 },
    Final { dark: u32, light: u32 },
}

fn parse_status(line: &str) -> Result<GameStatus, ProtocolError> {
    let malformed = || ProtocolError::Malformed {
        what: "status",
        line: line.to_owned(),
    };
    let mut parts = line.split_whitespace();
    let (Some(tag), Some(dark), Some(light), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(malformed());
    };
    let dark = dark.parse::<u32>().map_err(|_| malformed())?;
    let light = light.parse::<u32>().map_err(|_| malformed())?;
    match tag {
        "SCORE" => Ok(GameStatus::InProgress { dark, light }),
        "FINAL" => Ok(GameStatus::Final { dark, light }),
        _ => Err(malformed()),
    }
}

/// Next non-blank line, trimmed; `None` at end of input.
fn read_line(input: &mut impl BufRead) -> Result<Option<String>, ProtocolError> {
    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            return Ok(Some(trimmed.to_owned()));
        }
    }
}

pub fn run_stdio_loop() -> Result<(), ProtocolError> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_protocol(stdin.lock(), stdout.lock())
}

pub fn run_protocol(mut input: impl BufRead, mut out: impl Write) -> Result<(), ProtocolError> {
    writeln!(out, "{ENGINE_NAME}")?;
    out.flush()?;

    let config_line =
        read_line(&mut input)?.ok_or(ProtocolError::UnexpectedEof("configuration"))?;
    let config = DriverConfig::parse(&config_line)?;
    config.log_summary();
    let mut table = TranspositionTable::new();

    while let Some(status_line) = read_line(&mut input)? {
        match parse_status(&status_line)? {
            GameStatus::Final { dark, light } => {
                info!("game over: dark {dark} light {light}");
                break;
            }
            GameStatus::InProgress { dark, light } => {
                info!("score: dark {dark} light {light}");
            }
        }

        let board_line = read_line(&mut input)?.ok_or(ProtocolError::UnexpectedEof("board"))?;
        let board = parse_board(&board_line)?;
        match config.select_move(&mut table, &board)? {
            Some(mv) => writeln!(out, "{} {}", mv.column, mv.row)?,
            None => {
                warn!("no move determined for {:?}; passing", config.side);
                writeln!(out, "{PASS_REPLY}")?;
            }
        }
        out.flush()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::{parse_status, run_protocol, DriverConfig, GameStatus};
    use crate::errors::{ProtocolError, SearchError};
    use crate::game_state::board::Side;
    use crate::game_state::othello_rules::{random_position, OthelloRules};
    use crate::search::alpha_beta::select_move_alphabeta;
    use crate::search::minimax::select_move_minimax;
    use crate::search::search_common::{Algorithm, DepthLimit};
    use crate::search::transposition_table::TranspositionTable;
    use crate::utils::board_text::format_board;

    fn run(script: &str) -> Result<String, ProtocolError> {
        let mut out = Vec::new();
        run_protocol(Cursor::new(script.to_owned()), &mut out)?;
        Ok(String::from_utf8(out).expect("utf8 output"))
    }

    #[test]
    fn parses_configuration_line() {
        let config = DriverConfig::parse("2,-1,0,1,1").expect("config");
        assert_eq!(config.side, Side::Light);
        assert_eq!(config.algorithm, Algorithm::AlphaBeta);
        assert_eq!(config.search.depth_limit, DepthLimit::Unbounded);
        assert!(config.search.caching);
        assert!(config.search.ordering);
    }

    #[test]
    fn rejects_bad_configuration_values() {
        assert!(matches!(
            DriverConfig::parse("3,2,1,0,0"),
            Err(ProtocolError::Search(SearchError::InvalidConfiguration(_)))
        ));
        assert!(matches!(
            DriverConfig::parse("1,-4,1,0,0"),
            Err(ProtocolError::Search(SearchError::InvalidConfiguration(_)))
        ));
        assert!(matches!(
            DriverConfig::parse("1,2,1,2,0"),
            Err(ProtocolError::Search(SearchError::InvalidConfiguration(_)))
        ));
        assert!(matches!(
            DriverConfig::parse("1,2,1"),
            Err(ProtocolError::Malformed { .. })
        ));
        assert!(matches!(
            DriverConfig::parse("1,x,1,0,0"),
            Err(ProtocolError::Malformed { .. })
        ));
    }

    #[test]
    fn parses_status_lines() {
        assert_eq!(
            parse_status("SCORE 2 2").expect("score"),
            GameStatus::InProgress { dark: 2, light: 2 }
        );
        assert_eq!(
            parse_status("FINAL 40 24").expect("final"),
            GameStatus::Final {
                dark: 40,
                light: 24
            }
        );
        assert!(parse_status("SCORE 2").is_err());
        assert!(parse_status("DONE 1 1").is_err());
    }

    #[test]
    fn minimax_session_answers_with_column_and_row() {
        let board = format_board(&OthelloRules::initial_board(8).expect("board"));
        let script = format!("1,2,1,0,0\nSCORE 2 2\n{board}\nFINAL 3 3\n");
        assert_eq!(run(&script).expect("session"), "Othello AI\n2 3\n");
    }

    #[test]
    fn alpha_beta_session_plays_until_end_of_input() {
        let board = format_board(&OthelloRules::initial_board(6).expect("board"));
        let script = format!("2,3,0,1,1\nSCORE 2 2\n{board}\n\nSCORE 2 2\n{board}\n");
        let output = run(&script).expect("session");
        let lines = output.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Othello AI");
        assert_eq!(lines[1], lines[2]);
    }

    #[test]
    fn blocked_side_passes() {
        let script = "2,2,0,0,0\nSCORE 1 1\n[[1, 2, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]\n";
        assert_eq!(run(script).expect("session"), "Othello AI\npass\n");
    }

    #[test]
    fn driver_selection_follows_top_level_entry_points() {
        let mut table = TranspositionTable::new();
        for seed in 0..6 {
            let (board, side) = random_position(40 + seed, 6, 6 + seed as usize);
            let code = side.code();

            let ab = DriverConfig::parse(&format!("{code},3,0,1,1")).expect("config");
            let expected = select_move_alphabeta(
                &OthelloRules,
                &mut table,
                &board,
                side,
                DepthLimit::Plies(3),
                true,
                true,
            )
            .ok();
            assert_eq!(ab.select_move(&mut table, &board).expect("select"), expected);

            let mm = DriverConfig::parse(&format!("{code},2,1,1,0")).expect("config");
            let expected = select_move_minimax(
                &OthelloRules,
                &mut table,
                &board,
                side,
                DepthLimit::Plies(2),
                true,
            )
            .ok();
            assert_eq!(mm.select_move(&mut table, &board).expect("select"), expected);
        }

        let board = OthelloRules::initial_board(6).expect("board");
        let depth_zero = DriverConfig::parse("1,0,0,0,0").expect("config");
        assert_eq!(depth_zero.select_move(&mut table, &board).expect("select"), None);
    }

    #[test]
    fn missing_board_is_an_error() {
        let err = run("1,2,1,0,0\nSCORE 2 2\n").expect_err("board is missing");
        assert!(matches!(err, ProtocolError::UnexpectedEof("board")));
    }
}
