//! Statistics store persisted as a JSON document on disk.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use tracing::{debug, warn};

use crate::dao::{
    models::StatisticsEntity,
    stats_store::StatsStore,
    storage::{StorageError, StorageResult},
};

/// Statistics store backed by a pretty-printed JSON file.
///
/// Saves go through a sibling `.tmp` file that is renamed over the record, so
/// readers never observe a half-written document.
#[derive(Debug, Clone)]
pub struct JsonFileStatsStore {
    path: PathBuf,
}

impl JsonFileStatsStore {
    /// Store the record at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the record on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where an unreadable record is moved by [`StatsStore::set_aside_corrupt`].
    pub fn corrupt_path(&self) -> PathBuf {
        self.sibling(".corrupt")
    }

    fn temp_path(&self) -> PathBuf {
        self.sibling(".tmp")
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(suffix);
        self.path.with_file_name(name)
    }
}

impl StatsStore for JsonFileStatsStore {
    fn load(&self) -> StorageResult<Option<StatisticsEntity>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no statistics record yet");
                return Ok(None);
            }
            Err(err) => return Err(StorageError::io("read", &self.path, err)),
        };

        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|source| StorageError::Corrupt {
                path: self.path.clone(),
                source,
            })
    }

    fn save(&self, stats: &StatisticsEntity) -> StorageResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| StorageError::io("create", parent, err))?;
        }

        let payload = serde_json::to_vec_pretty(stats).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })?;

        let temp = self.temp_path();
        fs::write(&temp, payload).map_err(|err| StorageError::io("write", &temp, err))?;
        fs::rename(&temp, &self.path).map_err(|err| StorageError::io("replace", &self.path, err))?;

        debug!(path = %self.path.display(), "statistics record saved");
        Ok(())
    }

    fn set_aside_corrupt(&self) -> StorageResult<()> {
        let target = self.corrupt_path();
        match fs::rename(&self.path, &target) {
            Ok(()) => {
                warn!(
                    path = %self.path.display(),
                    moved_to = %target.display(),
                    "moved unreadable statistics record aside"
                );
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StorageError::io("set aside", &self.path, err)),
        }
    }
}
