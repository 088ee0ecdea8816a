use rand::Rng;
use tracing::{info, warn};

use crate::{
    dao::{
        models::StatisticsEntity,
        stats_store::StatsStore,
        storage::{StorageError, StorageResult},
    },
    error::QuizError,
    services::evaluator::Verdict,
    state::{
        session::{Advance, QuizSession, Round, SessionSnapshot},
        stats::UserStatistics,
    },
};

/// Read the persisted statistics, treating a missing record as a fresh zeroed one.
pub fn load_statistics(store: &dyn StatsStore) -> StorageResult<UserStatistics> {
    Ok(store.load()?.map(UserStatistics::from).unwrap_or_default())
}

/// Overwrite the persisted statistics with `stats`.
pub fn save_statistics(store: &dyn StatsStore, stats: UserStatistics) -> StorageResult<()> {
    store.save(&StatisticsEntity::from(stats))
}

/// Quiz engine facade: one session plus the statistics it feeds when it finishes.
pub struct QuizService<S, R> {
    store: S,
    session: QuizSession<R>,
    stats: UserStatistics,
}

impl<S: StatsStore, R: Rng> QuizService<S, R> {
    /// Load statistics from `store` and prepare an idle session.
    ///
    /// A corrupt record is set aside through the store and replaced by a
    /// zeroed one. Other storage failures are returned.
    pub fn new(store: S, rng: R) -> Result<Self, QuizError> {
        let stats = match load_statistics(&store) {
            Ok(stats) => stats,
            Err(err @ StorageError::Corrupt { .. }) => {
                warn!(error = %err, "ignoring unreadable statistics; starting from zero");
                store.set_aside_corrupt()?;
                UserStatistics::default()
            }
            Err(err) => return Err(err.into()),
        };

        Ok(Self {
            store,
            session: QuizSession::new(rng),
            stats,
        })
    }

    /// Start a new session and return its first round.
    pub fn start(&mut self) -> Result<Round, QuizError> {
        let round = self.session.start()?;
        info!(total = round.total, "quiz session started");
        Ok(round)
    }

    /// Submit an answer for the current round.
    pub fn submit(&mut self, text: &str) -> Result<Verdict, QuizError> {
        Ok(self.session.submit(text)?)
    }

    /// Move to the next round, or finish the session and persist the statistics.
    ///
    /// A failed save still finishes the session; the summary is handed back
    /// inside [`QuizError::Unsaved`].
    pub fn advance(&mut self) -> Result<Advance, QuizError> {
        let advance = self.session.advance()?;

        if let Advance::Finished(summary) = &advance {
            self.stats = self.stats.updated(summary.final_score);
            info!(
                final_score = summary.final_score,
                total_games = self.stats.total_games,
                best_score = self.stats.best_score,
                "quiz session finished"
            );
            if let Err(source) = save_statistics(&self.store, self.stats) {
                return Err(QuizError::Unsaved {
                    summary: *summary,
                    source,
                });
            }
        }

        Ok(advance)
    }

    /// Statistics including every session finished so far.
    pub fn statistics(&self) -> UserStatistics {
        self.stats
    }

    /// Counters of the current session.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.session.snapshot()
    }

    /// Underlying record store.
    pub fn store(&self) -> &S {
        &self.store
    }
}
