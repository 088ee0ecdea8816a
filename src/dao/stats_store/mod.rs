mod json_file;
mod memory;

pub use self::json_file::JsonFileStatsStore;
pub use self::memory::MemoryStatsStore;

use crate::dao::{models::StatisticsEntity, storage::StorageResult};

/// Abstraction over the record store holding cross-session statistics.
///
/// `load` returns `Ok(None)` when no record was ever written; that is the
/// normal first-run condition, not an error.
pub trait StatsStore: Send + Sync {
    /// Read the current record, if one exists.
    fn load(&self) -> StorageResult<Option<StatisticsEntity>>;

    /// Replace the record with `stats`.
    fn save(&self, stats: &StatisticsEntity) -> StorageResult<()>;

    /// Move an unreadable record out of the way so the next save does not destroy it.
    fn set_aside_corrupt(&self) -> StorageResult<()> {
        Ok(())
    }
}
