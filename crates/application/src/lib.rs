//! Application layer - Use cases and business workflows

pub mod discovery;
pub mod sync;

pub use discovery::DiscoveryAnnouncer;
pub use sync::SyncController;
