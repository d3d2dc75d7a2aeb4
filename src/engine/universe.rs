//! Candidate universe generation
//!
//! The universe for length L is every ordered selection of L distinct digits,
//! 10!/(10-L)! codes in total. Each length is enumerated once per process and
//! shared read-only afterwards.

use super::{DigitCount, GameError};
use crate::core::{Code, MAX_LENGTH};
use once_cell::sync::OnceCell;
use std::sync::Arc;

static UNIVERSES: [OnceCell<Arc<[Code]>>; MAX_LENGTH] = [const { OnceCell::new() }; MAX_LENGTH];

/// All codes of `length` distinct digits, in ascending lexicographic order
///
/// # Errors
/// Returns `GameError::InvalidConfiguration` if `length` is outside 1-10.
/// The generator never clamps; use `DigitCount::clamped` first.
///
/// # Examples
/// ```
/// use hitblow::engine::universe;
///
/// let codes = universe(2).unwrap();
/// assert_eq!(codes.len(), 90);
/// assert_eq!(codes[0].to_string(), "01");
/// assert!(universe(11).is_err());
/// ```
pub fn universe(length: usize) -> Result<Arc<[Code]>, GameError> {
    DigitCount::new(length).map(universe_for)
}

/// Cached universe for an already-validated digit count
#[must_use]
pub fn universe_for(count: DigitCount) -> Arc<[Code]> {
    let length = count.get();
    Arc::clone(UNIVERSES[length - 1].get_or_init(|| enumerate(length).into()))
}

/// Number of codes in the universe for `length`, without generating it
#[must_use]
pub const fn universe_size(length: usize) -> Option<usize> {
    if length == 0 || length > MAX_LENGTH {
        return None;
    }

    let mut size = 1;
    let mut i = 0;
    while i < length {
        size *= 10 - i;
        i += 1;
    }
    Some(size)
}

/// Depth-first enumeration; the code's own digit mask tracks used digits
fn enumerate(length: usize) -> Vec<Code> {
    let mut out = Vec::with_capacity(universe_size(length).unwrap_or(0));
    extend(Code::EMPTY, length, &mut out);
    out
}

fn extend(prefix: Code, length: usize, out: &mut Vec<Code>) {
    if prefix.len() == length {
        out.push(prefix);
        return;
    }

    for digit in 0..10 {
        if !prefix.contains(digit) {
            extend(prefix.with_digit(digit), length, out);
        }
    }
}
