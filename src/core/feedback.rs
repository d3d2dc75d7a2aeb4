//! Hit/blow feedback calculation
//!
//! Feedback is scored in a single pass over positions:
//! - a position is a hit when both codes hold the same digit there
//! - otherwise it is a blow when the probe's digit occurs anywhere in the reference
//!
//! The same function serves both roles of the game: scoring a guess against
//! the secret, and scoring a candidate against a past guess while filtering.

use super::Code;
use std::fmt;

/// Hit and blow counts for one guess
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Feedback {
    hit: u8,
    blow: u8,
}

impl Feedback {
    /// Create feedback from raw counts
    #[inline]
    #[must_use]
    pub const fn new(hit: u8, blow: u8) -> Self {
        Self { hit, blow }
    }

    /// Score `probe` against `reference`
    ///
    /// Use `(guess, secret)` for the feedback shown to the player and
    /// `(candidate, guess)` when checking a candidate for consistency.
    ///
    /// # Examples
    /// ```
    /// use hitblow::core::{Code, Feedback};
    ///
    /// let secret = Code::parse("1234", 4).unwrap();
    /// let guess = Code::parse("1203", 4).unwrap();
    ///
    /// // 1 and 2 in place, 3 misplaced, 0 absent
    /// assert_eq!(Feedback::score(&guess, &secret), Feedback::new(2, 1));
    /// ```
    #[must_use]
    pub fn score(probe: &Code, reference: &Code) -> Self {
        debug_assert_eq!(probe.len(), reference.len(), "codes must be equal length");

        let mut hit = 0;
        let mut blow = 0;
        for (&p, &r) in probe.digits().iter().zip(reference.digits()) {
            if p == r {
                hit += 1;
            } else if reference.contains(p) {
                blow += 1;
            }
        }

        Self { hit, blow }
    }

    #[inline]
    #[must_use]
    pub const fn hit(self) -> u8 {
        self.hit
    }

    #[inline]
    #[must_use]
    pub const fn blow(self) -> u8 {
        self.blow
    }

    /// Check whether every position was a hit
    #[inline]
    #[must_use]
    pub const fn is_win(self, length: usize) -> bool {
        self.hit as usize == length
    }

    /// Compact form such as `2H1B`
    #[must_use]
    pub fn compact(self) -> String {
        format!("{}H{}B", self.hit, self.blow)
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Hit, {} Blow", self.hit, self.blow)
    }
}

/// One accepted guess together with the feedback it received
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Turn {
    pub guess: Code,
    pub feedback: Feedback,
}

impl Turn {
    #[must_use]
    pub const fn new(guess: Code, feedback: Feedback) -> Self {
        Self { guess, feedback }
    }

    /// Check whether `candidate` could be the secret given this turn
    #[inline]
    #[must_use]
    pub fn admits(&self, candidate: &Code) -> bool {
        Feedback::score(candidate, &self.guess) == self.feedback
    }
}
