//! Persistence layer for the quiz statistics.

/// Database model definitions.
pub mod models;
/// Statistics record stores.
pub mod stats_store;
/// Storage error types shared by every store.
pub mod storage;
