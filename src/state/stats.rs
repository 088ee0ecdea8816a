//! Cross-session statistics and how a finished game updates them.

use crate::dao::models::StatisticsEntity;

/// Aggregate results across every finished session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserStatistics {
    /// Number of sessions played to completion.
    pub total_games: u64,
    /// Highest final score ever reached.
    pub best_score: u64,
    /// Sum of every final score.
    pub total_score: u64,
}

impl UserStatistics {
    /// Fold a finished session's final score into the record.
    pub fn updated(self, final_score: u32) -> Self {
        let score = u64::from(final_score);
        Self {
            total_games: self.total_games.saturating_add(1),
            best_score: self.best_score.max(score),
            total_score: self.total_score.saturating_add(score),
        }
    }

    /// Mean final score per game, or `None` before the first game.
    pub fn average_score(&self) -> Option<f64> {
        (self.total_games > 0).then(|| self.total_score as f64 / self.total_games as f64)
    }
}

impl From<StatisticsEntity> for UserStatistics {
    fn from(value: StatisticsEntity) -> Self {
        Self {
            total_games: value.total_games,
            best_score: value.best_score,
            total_score: value.total_score,
        }
    }
}

impl From<UserStatistics> for StatisticsEntity {
    fn from(value: UserStatistics) -> Self {
        Self {
            total_games: value.total_games,
            best_score: value.best_score,
            total_score: value.total_score,
        }
    }
}
