//! In-process statistics store.

use std::sync::{Mutex, PoisonError};

use crate::dao::{models::StatisticsEntity, stats_store::StatsStore, storage::StorageResult};

/// Statistics store that keeps the record in memory for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryStatsStore {
    record: Mutex<Option<StatisticsEntity>>,
}

impl MemoryStatsStore {
    /// Empty store, as on a first run.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with an existing record.
    pub fn with_record(stats: StatisticsEntity) -> Self {
        Self {
            record: Mutex::new(Some(stats)),
        }
    }
}

impl StatsStore for MemoryStatsStore {
    fn load(&self) -> StorageResult<Option<StatisticsEntity>> {
        Ok(*self.record.lock().unwrap_or_else(PoisonError::into_inner))
    }

    fn save(&self, stats: &StatisticsEntity) -> StorageResult<()> {
        *self.record.lock().unwrap_or_else(PoisonError::into_inner) = Some(*stats);
        Ok(())
    }
}
