use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

mod publisher;
pub use publisher::EventPublisher;

use crate::switch::{DeviceId, SwitchState};

/// Domain events that can occur in the system
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DomainEvent {
    /// The backing file was observed holding a state (baseline or touch)
    SwitchStateObserved {
        device: DeviceId,
        state: SwitchState,
        timestamp: DateTime<Utc>,
    },

    /// A command from the bus was written to the backing file
    CommandApplied {
        device: DeviceId,
        state: SwitchState,
        timestamp: DateTime<Utc>,
    },
}

impl DomainEvent {
    /// Create a SwitchStateObserved event
    pub fn switch_state_observed(device: DeviceId, state: SwitchState) -> Self {
        Self::SwitchStateObserved {
            device,
            state,
            timestamp: Utc::now(),
        }
    }

    /// Create a CommandApplied event
    pub fn command_applied(device: DeviceId, state: SwitchState) -> Self {
        Self::CommandApplied {
            device,
            state,
            timestamp: Utc::now(),
        }
    }

    /// Get the timestamp of this event
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::SwitchStateObserved { timestamp, .. } => *timestamp,
            Self::CommandApplied { timestamp, .. } => *timestamp,
        }
    }

    /// Get the event type as string
    pub fn event_type(&self) -> &str {
        match self {
            Self::SwitchStateObserved { .. } => "SwitchStateObserved",
            Self::CommandApplied { .. } => "CommandApplied",
        }
    }
}
