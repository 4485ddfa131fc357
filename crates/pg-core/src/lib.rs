//! Core types for pokegreet: creature records, selection history, and the id selector.
//!
//! This crate knows nothing about HTTP or markdown. It defines the [`Record`]
//! a catalog returns, the bounded [`History`] of past picks together with the
//! [`HistoryStore`] seam that persists it, and the [`Selector`] that draws the
//! next id while steering away from recent repeats.

/// Run configuration shared by the greeter and the CLI.
pub mod config;
/// Error types used throughout the crate.
pub mod error;
/// Bounded history of previously selected ids and its stores.
pub mod history;
/// Creature records and the catalog payload they are decoded from.
pub mod record;
/// Random id selection with best-effort repeat avoidance.
pub mod selector;

/// Re-export configuration.
pub use config::GreeterConfig;
/// Re-export error types.
pub use error::{HistoryError, HistoryResult};
/// Re-export history types.
pub use history::{History, HistoryEntry, HistoryStore, JsonFileStore, MemoryStore};
/// Re-export record types.
pub use record::Record;
/// Re-export the selector.
pub use selector::Selector;
