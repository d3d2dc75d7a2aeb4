//! Session configuration

use super::GameError;
use crate::core::{MAX_LENGTH, MIN_LENGTH};
use std::fmt;
use std::time::Duration;

/// A digit count known to lie in 1-10
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DigitCount(u8);

impl DigitCount {
    /// Four digits, the classic game
    pub const DEFAULT: Self = Self(4);

    /// Validate a digit count without clamping
    ///
    /// # Errors
    /// Returns `GameError::InvalidConfiguration` if `count` is outside 1-10.
    pub fn new(count: usize) -> Result<Self, GameError> {
        if (MIN_LENGTH..=MAX_LENGTH).contains(&count) {
            Ok(Self(count as u8))
        } else {
            Err(GameError::InvalidConfiguration { length: count })
        }
    }

    /// Clamp any requested count into 1-10
    #[must_use]
    pub fn clamped(count: usize) -> Self {
        Self(count.clamp(MIN_LENGTH, MAX_LENGTH) as u8)
    }

    #[inline]
    #[must_use]
    pub const fn get(self) -> usize {
        self.0 as usize
    }
}

impl Default for DigitCount {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for DigitCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where candidate narrowing runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OffloadMode {
    /// Background worker for long codes only
    #[default]
    Auto,
    /// Background worker for every length
    Always,
    /// Always in-process on the calling thread
    Never,
}

impl OffloadMode {
    /// Lengths at or above this use the worker in `Auto` mode
    pub const AUTO_MIN_LENGTH: usize = 9;

    /// Create an offload mode from a name string
    ///
    /// Supported names: "auto", "always", "worker", "never", "sync".
    /// Defaults to auto if name is unrecognized.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "always" | "worker" => Self::Always,
            "never" | "sync" => Self::Never,
            _ => Self::Auto,
        }
    }

    /// Check whether narrowing for `length` should go to the worker
    #[must_use]
    pub const fn uses_worker(self, length: usize) -> bool {
        match self {
            Self::Auto => length >= Self::AUTO_MIN_LENGTH,
            Self::Always => true,
            Self::Never => false,
        }
    }
}

/// Configuration for a game session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub digit_count: DigitCount,
    pub offload: OffloadMode,
    /// How long to wait for the worker before narrowing in-process
    pub worker_timeout: Duration,
}

impl SessionConfig {
    pub const DEFAULT_WORKER_TIMEOUT: Duration = Duration::from_secs(10);

    /// Create a configuration, clamping `digit_count` into 1-10
    #[must_use]
    pub fn new(digit_count: usize) -> Self {
        Self {
            digit_count: DigitCount::clamped(digit_count),
            offload: OffloadMode::default(),
            worker_timeout: Self::DEFAULT_WORKER_TIMEOUT,
        }
    }

    #[must_use]
    pub const fn with_offload(mut self, offload: OffloadMode) -> Self {
        self.offload = offload;
        self
    }

    #[must_use]
    pub const fn with_worker_timeout(mut self, timeout: Duration) -> Self {
        self.worker_timeout = timeout;
        self
    }

    #[inline]
    #[must_use]
    pub const fn length(&self) -> usize {
        self.digit_count.get()
    }

    #[must_use]
    pub const fn uses_worker(&self) -> bool {
        self.offload.uses_worker(self.length())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new(DigitCount::DEFAULT.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_count_validates() {
        assert_eq!(DigitCount::new(4).map(DigitCount::get), Ok(4));
        assert_eq!(DigitCount::new(10).map(DigitCount::get), Ok(10));
        assert_eq!(
            DigitCount::new(0),
            Err(GameError::InvalidConfiguration { length: 0 })
        );
        assert_eq!(
            DigitCount::new(11),
            Err(GameError::InvalidConfiguration { length: 11 })
        );
    }

    #[test]
    fn digit_count_clamps() {
        assert_eq!(DigitCount::clamped(0).get(), 1);
        assert_eq!(DigitCount::clamped(7).get(), 7);
        assert_eq!(DigitCount::clamped(42).get(), 10);
    }

    #[test]
    fn session_config_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.length(), 4);
        assert_eq!(config.offload, OffloadMode::Auto);
        assert!(!config.uses_worker());
    }

    #[test]
    fn offload_from_name() {
        assert_eq!(OffloadMode::from_name("always"), OffloadMode::Always);
        assert_eq!(OffloadMode::from_name("sync"), OffloadMode::Never);
        assert_eq!(OffloadMode::from_name("whatever"), OffloadMode::Auto);
    }

    #[test]
    fn auto_offload_only_for_long_codes() {
        assert!(!OffloadMode::Auto.uses_worker(8));
        assert!(OffloadMode::Auto.uses_worker(9));
        assert!(OffloadMode::Auto.uses_worker(10));
        assert!(OffloadMode::Always.uses_worker(1));
        assert!(!OffloadMode::Never.uses_worker(10));
    }
}
