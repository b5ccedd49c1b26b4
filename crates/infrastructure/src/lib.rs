//! Infrastructure layer - External integrations

pub mod config;
pub mod messaging;
pub mod store;
pub mod watch;

pub use messaging::mqtt_client::{BrokerLink, LinkEvent, MqttClient, MqttMessage};
pub use messaging::state_publisher::MqttStatePublisher;
pub use store::StateStore;
pub use watch::StateWatcher;
