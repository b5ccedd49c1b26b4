pub mod mqtt_client;
pub mod state_publisher;

pub use mqtt_client::{BrokerLink, LinkEvent, MqttClient, MqttMessage};
pub use state_publisher::MqttStatePublisher;
