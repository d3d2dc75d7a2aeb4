//! Core domain types for Hit & Blow
//!
//! This module contains the fundamental domain types with no I/O and no shared state.

mod code;
mod feedback;

pub use code::{Code, CodeError, MAX_LENGTH, MIN_LENGTH};
pub use feedback::{Feedback, Turn};
