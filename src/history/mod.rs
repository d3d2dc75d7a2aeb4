//! Completed-game history
//!
//! The engine hands a `NewRecord` to a `HistoryStore` once a game is solved.
//! A store failure never touches the in-memory game.

mod record;
mod store;

pub use record::{GameRecord, NewRecord};
pub use store::{HistoryStore, LocalHistoryStore, MemoryHistoryStore, StoreError, StoreResult};
