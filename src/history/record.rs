//! Completed-game records

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// A solved game, before the store assigns an id and timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecord {
    pub digit_count: usize,
    pub attempts: usize,
    pub elapsed_ms: u64,
}

/// A stored completed game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub id: u64,
    pub digit_count: usize,
    pub attempts: usize,
    pub elapsed_ms: u64,
    /// Unix timestamp (seconds) when the game was recorded
    pub played_at: u64,
}

impl GameRecord {
    pub(crate) fn stamp(id: u64, record: NewRecord) -> Self {
        let played_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_secs());

        Self {
            id,
            digit_count: record.digit_count,
            attempts: record.attempts,
            elapsed_ms: record.elapsed_ms,
            played_at,
        }
    }
}
