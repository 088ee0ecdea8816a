use serde::{Deserialize, Serialize};

/// Persisted cross-session statistics, stored as a small JSON document.
///
/// Missing fields read back as zero; negative or fractional values are rejected.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StatisticsEntity {
    /// Number of sessions played to completion.
    pub total_games: u64,
    /// Highest final score ever reached.
    pub best_score: u64,
    /// Sum of every final score.
    pub total_score: u64,
}
