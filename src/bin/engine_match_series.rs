//! Standalone engine-vs-engine series runner.
//!
//! Run with:
//! `cargo run --release --bin engine_match_series`
//! `cargo run --release --bin engine_match_series -- --verbose --games 20 --size 6`

use clap::Parser;

use othello_search::engines::engine_alpha_beta::AlphaBetaEngine;
use othello_search::engines::engine_minimax::MinimaxEngine;
use othello_search::engines::engine_trait::Engine;
use othello_search::errors::SearchError;
use othello_search::game_state::othello_rules::OthelloRules;
use othello_search::search::search_common::{DepthLimit, SearchConfig};
use othello_search::utils::engine_match_harness::{
    play_engine_match_series, MatchConfig, MatchSeriesConfig,
};

#[derive(Parser, Debug)]
#[command(about = "Alpha-beta (heuristic) vs minimax (disk differential) series")]
struct Args {
    #[arg(short, long)]
    verbose: bool,

    #[arg(long, default_value_t = 10)]
    games: u16,

    #[arg(long, default_value_t = 6)]
    size: usize,

    #[arg(long, default_value_t = 3)]
    depth: u32,

    #[arg(long, default_value_t = 1234)]
    seed: u64,
}

fn main() -> Result<(), SearchError> {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let search = SearchConfig {
        depth_limit: DepthLimit::Plies(args.depth),
        caching: true,
        ordering: true,
    };

    let player1 = || Box::new(AlphaBetaEngine::new(OthelloRules, search)) as Box<dyn Engine>;
    let player2 = || Box::new(MinimaxEngine::new(OthelloRules, search)) as Box<dyn Engine>;

    let stats = play_engine_match_series(
        player1,
        player2,
        &MatchSeriesConfig {
            games: args.games,
            base_seed: args.seed,
            per_game: MatchConfig {
                board_size: args.size,
                opening_min_plies: 0,
                opening_max_plies: 4,
            },
            verbose: args.verbose,
        },
    )?;

    println!("{}", stats.report());
    Ok(())
}
