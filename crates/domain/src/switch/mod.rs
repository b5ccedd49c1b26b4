mod device_id;
mod discovery;
mod entity;
mod state;
mod topics;

pub use device_id::DeviceId;
pub use discovery::DiscoveryConfig;
pub use entity::Switch;
pub use state::SwitchState;
pub use topics::TopicSet;
