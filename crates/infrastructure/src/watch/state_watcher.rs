use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use domain::switch::SwitchState;
use notify::{Config as NotifyConfig, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, error};

use crate::store::StateStore;

/// Watches the backing file and re-reads the switch state on every touch.
///
/// Emits one observation eagerly at start-of-watch to establish the baseline,
/// then one per create/modify event. No debouncing beyond what the watch
/// primitive provides; rapid successive touches may each trigger a read,
/// which is harmless because reads are pure.
///
/// Started at most once per process. The notify handle is owned by the
/// spawned task and lives for the process lifetime.
pub struct StateWatcher {
    store: StateStore,
}

impl StateWatcher {
    pub fn new(store: StateStore) -> Self {
        Self { store }
    }

    /// Start watching. Returns the stream of observed states.
    pub fn start(self) -> Result<mpsc::Receiver<SwitchState>> {
        let path = self.store.path().to_path_buf();
        let file_name: OsString = path
            .file_name()
            .ok_or_else(|| anyhow!("State path {} has no file name", path.display()))?
            .to_os_string();

        // Watch the parent directory rather than the file itself: it works
        // when the file does not exist yet and survives editors replacing
        // the file instead of writing in place.
        let watch_root = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let (touch_tx, mut touch_rx) = mpsc::channel::<()>(16);

        // notify invokes the handler on its own thread; bridge into tokio.
        let mut watcher = RecommendedWatcher::new(
            move |res: std::result::Result<Event, notify::Error>| match res {
                Ok(event) => match event.kind {
                    EventKind::Create(_) | EventKind::Modify(_) => {
                        let ours = event
                            .paths
                            .iter()
                            .any(|p| p.file_name() == Some(file_name.as_os_str()));
                        if ours {
                            let _ = touch_tx.blocking_send(());
                        }
                    }
                    _ => {}
                },
                Err(e) => error!(error = %e, "File watcher error"),
            },
            NotifyConfig::default(),
        )
        .context("Failed to create file watcher")?;

        watcher
            .watch(&watch_root, RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch directory: {}", watch_root.display()))?;

        let (state_tx, state_rx) = mpsc::channel::<SwitchState>(16);
        let store = self.store;

        tokio::spawn(async move {
            // Keep the watcher alive by moving it into the task
            let _watcher = watcher;

            // Initial synthetic touch to establish the baseline state
            if state_tx.send(store.read().await).await.is_err() {
                return;
            }

            while touch_rx.recv().await.is_some() {
                debug!(path = %store.path().display(), "File touched");
                if state_tx.send(store.read().await).await.is_err() {
                    break;
                }
            }
        });

        Ok(state_rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;

    const RECV_TIMEOUT: Duration = Duration::from_secs(5);

    #[tokio::test]
    async fn test_baseline_observation_on_start() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("switchvalue");
        std::fs::write(&path, "1").unwrap();

        let mut rx = StateWatcher::new(StateStore::new(&path)).start().unwrap();

        let baseline = timeout(RECV_TIMEOUT, rx.recv()).await.unwrap().unwrap();
        assert_eq!(baseline, SwitchState::On);
    }

    #[tokio::test]
    async fn test_touch_triggers_re_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("switchvalue");
        std::fs::write(&path, "0").unwrap();

        let mut rx = StateWatcher::new(StateStore::new(&path)).start().unwrap();

        let baseline = timeout(RECV_TIMEOUT, rx.recv()).await.unwrap().unwrap();
        assert_eq!(baseline, SwitchState::Off);

        std::fs::write(&path, "1").unwrap();

        let observed = timeout(RECV_TIMEOUT, rx.recv()).await.unwrap().unwrap();
        assert_eq!(observed, SwitchState::On);
    }

    #[tokio::test]
    async fn test_missing_file_baseline_is_off_then_creation_is_observed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("switchvalue");

        let mut rx = StateWatcher::new(StateStore::new(&path)).start().unwrap();

        let baseline = timeout(RECV_TIMEOUT, rx.recv()).await.unwrap().unwrap();
        assert_eq!(baseline, SwitchState::Off);

        std::fs::write(&path, "1").unwrap();

        let observed = timeout(RECV_TIMEOUT, rx.recv()).await.unwrap().unwrap();
        assert_eq!(observed, SwitchState::On);
    }

    #[tokio::test]
    async fn test_sibling_files_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("switchvalue");
        std::fs::write(&path, "0").unwrap();

        let mut rx = StateWatcher::new(StateStore::new(&path)).start().unwrap();
        let _baseline = timeout(RECV_TIMEOUT, rx.recv()).await.unwrap().unwrap();

        std::fs::write(dir.path().join("unrelated"), "1").unwrap();
        std::fs::write(&path, "1").unwrap();

        // The next observation comes from our file, not the sibling
        let observed = timeout(RECV_TIMEOUT, rx.recv()).await.unwrap().unwrap();
        assert_eq!(observed, SwitchState::On);
    }
}
