//! Application-level configuration loading for the directory server and the quiz.

use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::{info, warn};

/// Default location on disk where the binaries look for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "CODEKIDS_BACK_CONFIG_PATH";
/// Environment variable that overrides the served directory.
const ROOT_DIR_ENV: &str = "CODEKIDS_ROOT_DIR";
/// Environment variable that overrides the statistics record location.
const STATS_PATH_ENV: &str = "MATH_QUIZ_STATS_PATH";
/// Environment variables checked, in order, for the listening port.
const PORT_ENVS: [&str; 2] = ["PORT", "SERVER_PORT"];

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_ROOT_DIR: &str = ".";
const DEFAULT_STATS_PATH: &str = "user_data.json";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    port: u16,
    root_dir: PathBuf,
    stats_path: PathBuf,
}

impl AppConfig {
    /// Load the configuration from disk, then apply environment overrides.
    pub fn load() -> Self {
        Self::from_file(&resolve_config_path()).with_overrides(|key| env::var(key).ok())
    }

    /// Read the JSON configuration at `path`, falling back to built-in defaults.
    pub fn from_file(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    info!(path = %path.display(), "loaded configuration");
                    raw.into()
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Apply overrides looked up through `lookup` (the process environment in production).
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(value) = PORT_ENVS.iter().find_map(|key| lookup(key)) {
            match value.parse::<u16>() {
                Ok(port) => self.port = port,
                Err(err) => warn!(%value, error = %err, "ignoring invalid port override"),
            }
        }
        if let Some(root) = lookup(ROOT_DIR_ENV).filter(|value| !value.is_empty()) {
            self.root_dir = PathBuf::from(root);
        }
        if let Some(stats) = lookup(STATS_PATH_ENV).filter(|value| !value.is_empty()) {
            self.stats_path = PathBuf::from(stats);
        }
        self
    }

    /// TCP port the directory server listens on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Directory served over HTTP.
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Location of the quiz statistics record.
    pub fn stats_path(&self) -> &Path {
        &self.stats_path
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            root_dir: PathBuf::from(DEFAULT_ROOT_DIR),
            stats_path: PathBuf::from(DEFAULT_STATS_PATH),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    port: Option<u16>,
    root_dir: Option<PathBuf>,
    stats_path: Option<PathBuf>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let defaults = Self::default();
        Self {
            port: value.port.unwrap_or(defaults.port),
            root_dir: value.root_dir.unwrap_or(defaults.root_dir),
            stats_path: value.stats_path.unwrap_or(defaults.stats_path),
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}
