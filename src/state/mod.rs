//! Domain state: quiz sessions, questions, statistics and the shared server state.

pub mod question;
pub mod session;
pub mod state_machine;
pub mod stats;

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

pub use self::state_machine::{InvalidTransition, QuizEvent, QuizPhase, RoundPhase};

/// Handle to [`ServerState`] cloned into every request handler.
pub type SharedState = Arc<ServerState>;

/// State shared by the directory server's handlers.
#[derive(Debug)]
pub struct ServerState {
    root_dir: PathBuf,
}

impl ServerState {
    /// Construct a new [`ServerState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    pub fn new(root_dir: impl Into<PathBuf>) -> SharedState {
        Arc::new(Self {
            root_dir: root_dir.into(),
        })
    }

    /// Directory whose files are served.
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }
}
