use crate::switch::Switch;
use serde::{Deserialize, Serialize};

/// MQTT discovery payload describing the switch entity to the automation hub.
///
/// Published retained on the config topic once per successful connection so
/// late subscribers receive it without re-publication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    pub object_id: String,
    pub unique_id: String,
    pub name: String,
    pub device_class: String,
    pub command_topic: String,
    pub state_topic: String,
}

impl DiscoveryConfig {
    pub fn for_switch(switch: &Switch) -> Self {
        Self {
            object_id: switch.device_id().to_string(),
            unique_id: switch.device_id().to_string(),
            name: switch.name().to_string(),
            device_class: "switch".to_string(),
            command_topic: switch.topics().command().to_string(),
            state_topic: switch.topics().state().to_string(),
        }
    }

    /// Serialize to the JSON body published on the config topic
    pub fn to_payload(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
