use std::path::{Path, PathBuf};

use domain::switch::SwitchState;
use tracing::warn;

/// Reads and writes the switch state to its backing file.
///
/// The file is the single source of truth for the device state. Read
/// failures and malformed content degrade to [`SwitchState::Off`]; write
/// failures leave the file untouched. Neither is fatal, neither is retried.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn read(&self) -> SwitchState {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read switch state");
                return SwitchState::Off;
            }
        };

        match SwitchState::parse(&content) {
            Ok(state) => state,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Malformed switch state");
                SwitchState::Off
            }
        }
    }

    pub async fn write(&self, state: SwitchState) {
        if let Err(e) = tokio::fs::write(&self.path, state.file_form()).await {
            warn!(path = %self.path.display(), error = %e, "Failed to write switch state");
        }
    }
}
