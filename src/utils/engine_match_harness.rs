//! Head-to-head engine match harness for local testing.
//!
//! Runs two `Engine` implementations against each other on the reference
//! rules without protocol I/O, with an optional seeded random opening prefix.
//! A side without a legal move passes; two passes in a row end the game.

use std::time::Instant;

use log::info;
use rand::prelude::IndexedRandom;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::engines::engine_trait::Engine;
use crate::errors::{SearchError, SearchOutcome};
use crate::game_state::board::{Board, Move, Side};
use crate::game_state::othello_rules::OthelloRules;
use crate::move_generation::move_generator::BoardOracle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    DarkWin,
    LightWin,
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerId {
    Player1,
    Player2,
}

#[derive(Debug, Clone)]
pub struct MatchConfig {
    pub board_size: usize,
    pub opening_min_plies: u8,
    pub opening_max_plies: u8,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            board_size: 8,
            opening_min_plies: 0,
            opening_max_plies: 4,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchResult {
    pub dark_engine: String,
    pub light_engine: String,
    pub outcome: MatchOutcome,
    pub final_board: Board,
    pub dark_disks: usize,
    pub light_disks: usize,
    pub opening_moves: Vec<(Side, Move)>,
    pub played_moves: Vec<(Side, Move)>,
    pub passes: u32,
    pub dark_total_time_ns: u128,
    pub light_total_time_ns: u128,
}

#[derive(Debug, Clone)]
pub struct MatchSeriesConfig {
    pub games: u16,
    pub base_seed: u64,
    pub per_game: MatchConfig,
    pub verbose: bool,
}

impl Default for MatchSeriesConfig {
    fn default() -> Self {
        Self {
            games: 6,
            base_seed: 0,
            per_game: MatchConfig::default(),
            verbose: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MatchSeriesStats {
    pub games: u16,
    pub player1_wins: u16,
    pub player2_wins: u16,
    pub draws: u16,
    pub player1_disk_margin: i64,
}

impl MatchSeriesStats {
    pub fn report(&self) -> String {
        format!(
            "games={} player1_wins={} player2_wins={} draws={} player1_disk_margin={}",
            self.games, self.player1_wins, self.player2_wins, self.draws, self.player1_disk_margin
        )
    }
}

/// Play a single seeded match from the initial board.
pub fn play_engine_match(
    engine_dark: &mut dyn Engine,
    engine_light: &mut dyn Engine,
    seed: u64,
    config: &MatchConfig,
) -> SearchOutcome<MatchResult> {
    let rules = OthelloRules;
    let mut rng = StdRng::seed_from_u64(seed);
    let mut board = OthelloRules::initial_board(config.board_size)?;
    let mut side = Side::Dark;

    engine_dark.new_game();
    engine_light.new_game();

    let min = config.opening_min_plies.min(config.opening_max_plies);
    let opening_plies = rng.random_range(min..=config.opening_max_plies);
    let mut opening_moves = Vec::new();
    for _ in 0..opening_plies {
        let moves = rules.legal_moves(&board, side);
        let Some(&mv) = moves.choose(&mut rng) else {
            break;
        };
        board = rules.play_move(&board, side, mv)?;
        opening_moves.push((side, mv));
        side = side.opposite();
    }

    let mut played_moves = Vec::new();
    let mut passes = 0u32;
    let mut consecutive_passes = 0u8;
    let mut dark_total_time_ns = 0u128;
    let mut light_total_time_ns = 0u128;

    while consecutive_passes < 2 {
        let legal_moves = rules.legal_moves(&board, side);
        if legal_moves.is_empty() {
            passes += 1;
            consecutive_passes += 1;
            side = side.opposite();
            continue;
        }
        consecutive_passes = 0;

        let started = Instant::now();
        let out = match side {
            Side::Dark => engine_dark.choose_move(&board, side)?,
            Side::Light => engine_light.choose_move(&board, side)?,
        };
        let elapsed_ns = started.elapsed().as_nanos();
        match side {
            Side::Dark => dark_total_time_ns = dark_total_time_ns.saturating_add(elapsed_ns),
            Side::Light => light_total_time_ns = light_total_time_ns.saturating_add(elapsed_ns),
        }

        let chosen = out.best_move.ok_or(SearchError::NoLegalMove)?;
        if !legal_moves.contains(&chosen) {
            return Err(SearchError::OracleInconsistency {
                mv: chosen,
                detail: "engine returned an illegal move".to_owned(),
            });
        }
        board = rules.play_move(&board, side, chosen)?;
        played_moves.push((side, chosen));
        side = side.opposite();
    }

    let (dark_disks, light_disks) = rules.score(&board);
    let outcome = match dark_disks.cmp(&light_disks) {
        std::cmp::Ordering::Greater => MatchOutcome::DarkWin,
        std::cmp::Ordering::Less => MatchOutcome::LightWin,
        std::cmp::Ordering::Equal => MatchOutcome::Draw,
    };

    Ok(MatchResult {
        dark_engine: engine_dark.name().to_owned(),
        light_engine: engine_light.name().to_owned(),
        outcome,
        final_board: board,
        dark_disks,
        light_disks,
        opening_moves,
        played_moves,
        passes,
        dark_total_time_ns,
        light_total_time_ns,
    })
}

/// Play a series of matches and aggregate win/loss/draw statistics.
///
/// Player colors are randomized each game (deterministic from `base_seed`).
pub fn play_engine_match_series<F1, F2>(
    player1_factory: F1,
    player2_factory: F2,
    config: &MatchSeriesConfig,
) -> SearchOutcome<MatchSeriesStats>
where
    F1: Fn() -> Box<dyn Engine>,
    F2: Fn() -> Box<dyn Engine>,
{
    let mut stats = MatchSeriesStats {
        games: config.games,
        ..MatchSeriesStats::default()
    };
    let mut color_rng = StdRng::seed_from_u64(config.base_seed ^ 0xA5A5_5A5A_0123_4567);

    for i in 0..config.games {
        let player1_is_dark = color_rng.random_bool(0.5);
        let seed = config.base_seed.wrapping_add(u64::from(i));
        let mut player1 = player1_factory();
        let mut player2 = player2_factory();

        let result = if player1_is_dark {
            play_engine_match(player1.as_mut(), player2.as_mut(), seed, &config.per_game)?
        } else {
            play_engine_match(player2.as_mut(), player1.as_mut(), seed, &config.per_game)?
        };

        let winner = match (player1_is_dark, result.outcome) {
            (_, MatchOutcome::Draw) => None,
            (true, MatchOutcome::DarkWin) | (false, MatchOutcome::LightWin) => {
                Some(PlayerId::Player1)
            }
            _ => Some(PlayerId::Player2),
        };
        match winner {
            Some(PlayerId::Player1) => stats.player1_wins += 1,
            Some(PlayerId::Player2) => stats.player2_wins += 1,
            None => stats.draws += 1,
        }

        let margin = result.dark_disks as i64 - result.light_disks as i64;
        stats.player1_disk_margin += if player1_is_dark { margin } else { -margin };

        if config.verbose {
            info!(
                "[series] game {}/{} seed={} player1={} {} ({}) vs {} ({}) winner={:?}",
                i + 1,
                config.games,
                seed,
                if player1_is_dark { "dark" } else { "light" },
                result.dark_engine,
                result.dark_disks,
                result.light_engine,
                result.light_disks,
                winner
            );
        }
    }

    Ok(stats)
}
