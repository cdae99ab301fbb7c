//! Crate root module declarations for the Othello search engine.
//!
//! This file exposes the board model, the reference move oracle, the search
//! engine (minimax, alpha-beta, transposition cache, static evaluation), the
//! engine wrappers, the line-oriented driver, and utility helpers so the
//! binary, benches, and tests can import stable module paths.

pub mod errors;

pub mod game_state {
    pub mod board;
    pub mod othello_rules;
}

pub mod move_generation {
    pub mod move_generator;
}

pub mod search {
    pub mod alpha_beta;
    pub mod board_scoring;
    pub mod minimax;
    pub mod search_common;
    pub mod transposition_table;
}

pub mod engines {
    pub mod engine_alpha_beta;
    pub mod engine_minimax;
    pub mod engine_random;
    pub mod engine_trait;
}

pub mod driver {
    pub mod driver_loop;
}

pub mod utils {
    pub mod board_text;
    pub mod engine_match_harness;
}
