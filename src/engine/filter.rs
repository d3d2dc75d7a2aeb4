//! Candidate filtering by feedback
//!
//! `filter_by_feedback` recomputes from a full history; `narrow` applies a
//! single new turn to a set that already satisfies every earlier one.
//! Both keep the input order.

use crate::core::{Code, Feedback, Turn};
use rayon::prelude::*;

/// Sets at least this large are filtered in parallel
pub const PARALLEL_THRESHOLD: usize = 50_000;

/// Keep the candidates consistent with every turn in `history`
///
/// An empty history returns the candidates unchanged.
#[must_use]
pub fn filter_by_feedback(candidates: &[Code], history: &[Turn]) -> Vec<Code> {
    if history.is_empty() {
        return candidates.to_vec();
    }

    retain(candidates, |candidate| {
        history.iter().all(|turn| turn.admits(candidate))
    })
}

/// Keep the candidates consistent with one new guess and its feedback
///
/// # Examples
/// ```
/// use hitblow::core::{Code, Feedback};
/// use hitblow::engine::{narrow, universe};
///
/// let all = universe(4).unwrap();
/// let guess = Code::parse("1234", 4).unwrap();
///
/// let remaining = narrow(&all, &guess, Feedback::new(4, 0));
/// assert_eq!(remaining, vec![guess]);
/// ```
#[must_use]
pub fn narrow(candidates: &[Code], guess: &Code, feedback: Feedback) -> Vec<Code> {
    let turn = Turn::new(*guess, feedback);
    retain(candidates, |candidate| turn.admits(candidate))
}

fn retain<F>(candidates: &[Code], keep: F) -> Vec<Code>
where
    F: Fn(&Code) -> bool + Sync,
{
    if candidates.len() >= PARALLEL_THRESHOLD {
        candidates
            .par_iter()
            .filter(|candidate| keep(candidate))
            .copied()
            .collect()
    } else {
        candidates
            .iter()
            .filter(|candidate| keep(candidate))
            .copied()
            .collect()
    }
}
