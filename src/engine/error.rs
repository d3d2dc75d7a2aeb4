//! Errors raised at the session boundary

use crate::core::CodeError;
use std::fmt;

/// Everything the engine can report back to a caller
///
/// None of these are fatal: the session is left unchanged (or, for a stale
/// narrowing, untouched by the late result) and the caller can keep playing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The guess is not a string of distinct digits of the active length
    Validation(CodeError),
    /// A digit count outside 1-10 reached the generator directly
    InvalidConfiguration { length: usize },
    /// Rollback index beyond the current history
    RollbackOutOfRange { index: usize, len: usize },
    /// A narrowing result arrived after the session had moved on
    StaleComputation,
}

impl GameError {
    /// Message suitable for showing to a player
    #[must_use]
    pub fn user_message(&self, length: usize) -> String {
        match self {
            Self::Validation(_) => format!("Enter {length} distinct digits."),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(e) => write!(f, "Invalid guess: {e}"),
            Self::InvalidConfiguration { length } => {
                write!(f, "Digit count must be between 1 and 10, got {length}")
            }
            Self::RollbackOutOfRange { index, len } => {
                write!(f, "Cannot roll back to turn {index}: only {len} guesses made")
            }
            Self::StaleComputation => write!(f, "Discarded a stale candidate narrowing"),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Validation(e) => Some(e),
            _ => None,
        }
    }
}

impl From<CodeError> for GameError {
    fn from(e: CodeError) -> Self {
        Self::Validation(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_user_message_names_length() {
        let err = GameError::Validation(CodeError::RepeatedDigit('1'));
        assert_eq!(err.user_message(4), "Enter 4 distinct digits.");
    }

    #[test]
    fn display_messages() {
        assert_eq!(
            GameError::InvalidConfiguration { length: 11 }.to_string(),
            "Digit count must be between 1 and 10, got 11"
        );
        assert_eq!(
            GameError::RollbackOutOfRange { index: 3, len: 1 }.user_message(4),
            "Cannot roll back to turn 3: only 1 guesses made"
        );
    }
}
