//! Replay command
//!
//! Scores a list of guesses against a known secret and reports how the
//! candidate set shrinks at each step.

use crate::core::{Code, Feedback};
use crate::engine::{OffloadMode, Session, SessionConfig};

/// Result of replaying a game
pub struct ReplayResult {
    pub secret: Code,
    pub steps: Vec<ReplayStep>,
    pub solved: bool,
}

/// A single guess in the replay
pub struct ReplayStep {
    pub guess: Code,
    pub feedback: Feedback,
    pub candidates_before: usize,
    pub candidates_after: usize,
}

/// Replay `guesses` against `secret`, stopping at the first exact match
///
/// # Errors
///
/// Returns an error if the secret is not 1-10 distinct digits or any guess
/// does not match the secret's length and distinctness rules.
pub fn replay_game(
    secret: &str,
    guesses: &[String],
    offload: OffloadMode,
) -> Result<ReplayResult, String> {
    let secret: Code = secret
        .parse()
        .map_err(|e| format!("Invalid secret: {e}"))?;

    let config = SessionConfig::new(secret.len()).with_offload(offload);
    let mut session = Session::with_secret(config, secret);
    let mut steps = Vec::with_capacity(guesses.len());
    let mut solved = false;

    for (i, raw) in guesses.iter().enumerate() {
        let candidates_before = session.remaining();
        let outcome = session
            .submit_guess(raw)
            .map_err(|e| format!("Guess {} ('{raw}'): {e}", i + 1))?;

        steps.push(ReplayStep {
            guess: outcome.turn.guess,
            feedback: outcome.turn.feedback,
            candidates_before,
            candidates_after: outcome.remaining,
        });

        if outcome.won {
            solved = true;
            break;
        }
    }

    Ok(ReplayResult {
        secret,
        steps,
        solved,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guesses(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn replay_scores_each_guess() {
        let result =
            replay_game("1234", &guesses(&["5678", "1203", "4321"]), OffloadMode::Never).unwrap();

        let feedback: Vec<String> = result.steps.iter().map(|s| s.feedback.compact()).collect();
        assert_eq!(feedback, ["0H0B", "2H1B", "0H4B"]);
        assert!(!result.solved);
    }

    #[test]
    fn replay_counts_shrink() {
        let result = replay_game("1234", &guesses(&["5678", "1203"]), OffloadMode::Never).unwrap();

        assert_eq!(result.steps[0].candidates_before, 5040);
        for step in &result.steps {
            assert!(step.candidates_after <= step.candidates_before);
        }
    }

    #[test]
    fn replay_stops_at_win() {
        let result =
            replay_game("907", &guesses(&["123", "907", "456"]), OffloadMode::Never).unwrap();
        assert!(result.solved);
        assert_eq!(result.steps.len(), 2);
        assert_eq!(result.steps[1].candidates_after, 1);
    }

    #[test]
    fn replay_rejects_bad_input() {
        assert!(replay_game("1123", &guesses(&["1234"]), OffloadMode::Never).is_err());

        let err = replay_game("1234", &guesses(&["5678", "99"]), OffloadMode::Never)
            .err()
            .unwrap();
        assert!(err.starts_with("Guess 2"));
    }
}
