//! Hit & Blow
//!
//! A number-guessing deduction game with an incremental candidate engine.
//! Every accepted guess narrows the set of secrets still consistent with the
//! feedback so far, and snapshots make rollback free.
//!
//! # Quick Start
//!
//! ```rust
//! use hitblow::core::Code;
//! use hitblow::engine::{Session, SessionConfig};
//!
//! let secret = Code::parse("1234", 4).unwrap();
//! let mut session = Session::with_secret(SessionConfig::new(4), secret);
//!
//! let outcome = session.submit_guess("1203").unwrap();
//! assert_eq!((outcome.turn.feedback.hit(), outcome.turn.feedback.blow()), (2, 1));
//! assert!(session.candidates().contains(&secret));
//! ```

// Core domain types
pub mod core;

// Candidate generation, filtering and the game session
pub mod engine;

// Completed-game persistence
pub mod history;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;
