use crate::error::Result;
use crate::switch::{DeviceId, TopicSet};
use serde::{Deserialize, Serialize};

/// The single switch this process bridges.
///
/// Groups the display name with the identity and topic set derived from it.
/// Constructed once at startup from configuration; immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Switch {
    name: String,
    device_id: DeviceId,
    topics: TopicSet,
}

impl Switch {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let device_id = DeviceId::from_name(&name)?;
        let topics = TopicSet::for_device(&device_id);

        Ok(Self {
            name,
            device_id,
            topics,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn device_id(&self) -> &DeviceId {
        &self.device_id
    }

    pub fn topics(&self) -> &TopicSet {
        &self.topics
    }
}
