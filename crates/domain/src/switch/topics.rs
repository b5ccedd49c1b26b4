use crate::switch::DeviceId;
use serde::{Deserialize, Serialize};

/// The three topic strings the bridge speaks on.
///
/// Derived once from the device identity at startup and held immutable for
/// the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicSet {
    config: String,
    state: String,
    command: String,
}

impl TopicSet {
    pub fn for_device(device: &DeviceId) -> Self {
        Self {
            config: format!("home/switch/{device}/config"),
            state: format!("home/switch/{device}/state"),
            command: format!("home/switch/{device}/set"),
        }
    }

    /// Retained discovery configuration topic
    pub fn config(&self) -> &str {
        &self.config
    }

    /// Outbound state topic (`ON`/`OFF`)
    pub fn state(&self) -> &str {
        &self.state
    }

    /// Inbound command topic the bridge subscribes to
    pub fn command(&self) -> &str {
        &self.command
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_strings() {
        let device = DeviceId::from_name("Garage Light").unwrap();
        let topics = TopicSet::for_device(&device);

        assert_eq!(topics.config(), "home/switch/garage_light/config");
        assert_eq!(topics.state(), "home/switch/garage_light/state");
        assert_eq!(topics.command(), "home/switch/garage_light/set");
    }
}
