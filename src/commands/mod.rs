//! Command implementations

pub mod benchmark;
pub mod play;
pub mod replay;
pub mod universe;

pub use benchmark::{BenchmarkConfig, BenchmarkResult, run_benchmark};
pub use play::{PlayCommand, run_play};
pub use replay::{ReplayResult, ReplayStep, replay_game};
pub use universe::{UniverseRow, universe_report};
