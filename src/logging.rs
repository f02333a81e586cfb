use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::{GameError, Result};

pub const LOG_ENV_VAR: &str = "HUEMATCH_LOG";
const DEFAULT_DIRECTIVE: &str = "info";

/// Reads `HUEMATCH_LOG`, falling back to `info`.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Installs the global subscriber, appending to `path`. The terminal belongs to the UI.
pub fn init_file_logging(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|err| GameError::Logging(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn creates_log_file_and_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state").join("huematch.log");

        // a subscriber may already be installed by another test; the file must exist either way
        let _ = init_file_logging(&path);
        assert!(path.exists());
    }

    #[test]
    fn unusable_path_is_reported() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, b"").unwrap();

        let result = init_file_logging(&blocker.join("huematch.log"));
        assert!(matches!(result, Err(GameError::Io(_))));
    }
}
