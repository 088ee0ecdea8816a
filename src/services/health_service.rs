use tokio::fs;
use tracing::warn;

use crate::{dto::health::HealthResponse, error::AppError, state::SharedState};

/// Report healthy when the served directory is reachable.
pub async fn health_status(state: &SharedState) -> Result<HealthResponse, AppError> {
    let root = state.root_dir();
    match fs::metadata(root).await {
        Ok(meta) if meta.is_dir() => Ok(HealthResponse::ok()),
        Ok(_) => {
            warn!(root = %root.display(), "served root is not a directory");
            Err(AppError::ServiceUnavailable(format!(
                "`{}` is not a directory",
                root.display()
            )))
        }
        Err(err) => {
            warn!(root = %root.display(), error = %err, "served root unavailable");
            Err(AppError::ServiceUnavailable(format!(
                "`{}` is unavailable",
                root.display()
            )))
        }
    }
}
