//! # 2048 Solver Library
//!
//! This library provides the grid mechanics of the 2048 sliding-tile puzzle
//! and two search strategies that pick moves for it.
//!
//! It is used by three binaries:
//! - `human_player`: interactive play on the command line, alone or as two players.
//! - `ai_solver`: recommends a move for a board (read from a file or randomly
//!   started) and can auto-play the game to the end.
//! - `heuristic_evaluator`: plays seeded games with each strategy and compares results.
//!
//! ## Modules
//! - `engine`: the board (`Board`), move directions (`Direction`), move, spawn
//!   and terminal rules, and the owned per-game state (`Game`).
//! - `heuristics`: the static board evaluation used at search leaves.
//! - `solver`: alpha-beta minimax, greedy expectimax and the `AutoPlayer` loop.
//! - `session`: game kinds and the per-kind high-score table.
//! - `error`: the crate's error type.
//! - `utils`: parsing boards from text.

pub mod engine;
pub mod error;
pub mod heuristics;
pub mod session;
pub mod solver;
pub mod utils;
