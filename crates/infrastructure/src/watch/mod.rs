mod state_watcher;

pub use state_watcher::StateWatcher;
