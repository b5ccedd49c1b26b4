use std::sync::Arc;

use async_trait::async_trait;
use domain::DomainEvent;
use domain::event::EventPublisher;
use domain::switch::TopicSet;

use crate::messaging::mqtt_client::BrokerLink;

/// Publishes observed switch states on the state topic.
pub struct MqttStatePublisher {
    link: Arc<dyn BrokerLink>,
    topics: TopicSet,
}

impl MqttStatePublisher {
    pub fn new(link: Arc<dyn BrokerLink>, topics: TopicSet) -> Self {
        Self { link, topics }
    }
}

#[async_trait]
impl EventPublisher for MqttStatePublisher {
    async fn publish(
        &self,
        event: DomainEvent,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        match event {
            DomainEvent::SwitchStateObserved { device, state, .. } => {
                tracing::info!(
                    device = %device,
                    state = %state,
                    topic = %self.topics.state(),
                    "Publishing switch state"
                );

                if !self.link.is_connected() {
                    tracing::debug!("Link is down, publish is handed to the transport queue");
                }

                if let Err(e) = self
                    .link
                    .publish(self.topics.state(), state.wire_form().as_bytes(), false)
                    .await
                {
                    tracing::error!("Failed to publish switch state: {}", e);
                }
            }
            // Command application is made visible by the file round trip
            // through the watcher, not by an explicit acknowledgment.
            _ => {}
        }
        Ok(())
    }
}
