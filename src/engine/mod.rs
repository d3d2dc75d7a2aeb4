//! Candidate deduction engine
//!
//! Generates the universe of codes, filters it by hit/blow feedback and runs
//! the per-player game state machine on top.

mod config;
mod error;
mod filter;
mod session;
mod universe;
pub mod worker;

pub use config::{DigitCount, OffloadMode, SessionConfig};
pub use error::GameError;
pub use filter::{PARALLEL_THRESHOLD, filter_by_feedback, narrow};
pub use session::{GameState, GuessOutcome, PendingGuess, Session};
pub use universe::{universe, universe_for, universe_size};
