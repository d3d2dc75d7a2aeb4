//! Digit code representation
//!
//! A `Code` is an ordered sequence of 1-10 pairwise distinct decimal digits.
//! Secrets, guesses and candidates all share this representation.

use std::fmt;
use std::str::FromStr;

/// Shortest playable code
pub const MIN_LENGTH: usize = 1;

/// Longest playable code (every digit used once)
pub const MAX_LENGTH: usize = 10;

/// A code of distinct digits with a digit-presence mask
///
/// Digits are stored as values 0-9. Bit `d` of the mask is set when digit `d`
/// occurs somewhere in the code, so membership checks are O(1).
///
/// Ordering is lexicographic by digits for codes of equal length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Code {
    digits: [u8; MAX_LENGTH],
    len: u8,
    mask: u16,
}

/// Error type for rejected guesses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeError {
    InvalidLength { expected: usize, actual: usize },
    NonDigit(char),
    RepeatedDigit(char),
}

impl fmt::Display for CodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength { expected, actual } => {
                write!(f, "Code must be exactly {expected} digits, got {actual}")
            }
            Self::NonDigit(c) => write!(f, "Code contains non-digit character '{c}'"),
            Self::RepeatedDigit(c) => write!(f, "Digit '{c}' is used more than once"),
        }
    }
}

impl std::error::Error for CodeError {}

impl Code {
    /// The empty code, used as the root of enumeration
    pub(crate) const EMPTY: Self = Self {
        digits: [0; MAX_LENGTH],
        len: 0,
        mask: 0,
    };

    /// Parse a guess of exactly `length` distinct digits
    ///
    /// # Errors
    /// Returns `CodeError` if:
    /// - `length` is outside 1-10
    /// - The text does not have exactly `length` characters
    /// - Any character is not an ASCII digit
    /// - Any digit appears more than once
    ///
    /// # Examples
    /// ```
    /// use hitblow::core::{Code, CodeError};
    ///
    /// let code = Code::parse("1203", 4).unwrap();
    /// assert_eq!(code.to_string(), "1203");
    ///
    /// assert!(matches!(Code::parse("1123", 4), Err(CodeError::RepeatedDigit('1'))));
    /// assert!(Code::parse("123", 4).is_err());
    /// ```
    pub fn parse(text: &str, length: usize) -> Result<Self, CodeError> {
        let actual = text.chars().count();
        if actual != length || !(MIN_LENGTH..=MAX_LENGTH).contains(&length) {
            return Err(CodeError::InvalidLength {
                expected: length,
                actual,
            });
        }

        let mut code = Self::EMPTY;
        for c in text.chars() {
            let digit = c.to_digit(10).ok_or(CodeError::NonDigit(c))? as u8;
            if code.contains(digit) {
                return Err(CodeError::RepeatedDigit(c));
            }
            code = code.with_digit(digit);
        }

        Ok(code)
    }

    /// Build a code from digit values
    ///
    /// Returns `None` for an empty or over-long slice, repeats, or values > 9.
    #[must_use]
    pub fn from_digits(digits: &[u8]) -> Option<Self> {
        if !(MIN_LENGTH..=MAX_LENGTH).contains(&digits.len()) {
            return None;
        }

        let mut code = Self::EMPTY;
        for &digit in digits {
            if digit > 9 || code.contains(digit) {
                return None;
            }
            code = code.with_digit(digit);
        }
        Some(code)
    }

    /// Append a digit that is not yet present
    #[inline]
    #[must_use]
    pub(crate) const fn with_digit(mut self, digit: u8) -> Self {
        debug_assert!(digit < 10, "digit must be 0-9");
        debug_assert!((self.len as usize) < MAX_LENGTH, "code is full");
        self.digits[self.len as usize] = digit;
        self.len += 1;
        self.mask |= 1 << digit;
        self
    }

    /// Number of digits in the code
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Digit values (0-9) in position order
    #[inline]
    #[must_use]
    pub fn digits(&self) -> &[u8] {
        &self.digits[..self.len as usize]
    }

    /// Digit at a specific position
    ///
    /// # Panics
    /// Panics if `position >= self.len()`
    #[inline]
    #[must_use]
    pub fn digit_at(&self, position: usize) -> u8 {
        self.digits()[position]
    }

    /// Check whether a digit occurs anywhere in the code
    #[inline]
    #[must_use]
    pub const fn contains(&self, digit: u8) -> bool {
        self.mask & (1 << digit) != 0
    }

    /// Bit set of the digits in this code
    #[inline]
    #[must_use]
    pub const fn mask(&self) -> u16 {
        self.mask
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &digit in self.digits() {
            write!(f, "{digit}")?;
        }
        Ok(())
    }
}

impl FromStr for Code {
    type Err = CodeError;

    /// Parse a code whose length is taken from the text itself
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let length = s.chars().count();
        if !(MIN_LENGTH..=MAX_LENGTH).contains(&length) {
            return Err(CodeError::InvalidLength {
                expected: length.clamp(MIN_LENGTH, MAX_LENGTH),
                actual: length,
            });
        }
        Self::parse(s, length)
    }
}
