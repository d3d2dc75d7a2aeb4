//! Terminal output formatting
//!
//! Colored display functions for command results.

pub mod display;
pub mod formatters;

pub use display::{print_benchmark_result, print_replay_result, print_universe_rows};
