use std::sync::Arc;

use anyhow::Result;
use domain::switch::{DiscoveryConfig, Switch};
use infrastructure::messaging::BrokerLink;
use tracing::info;

/// Publishes the retained discovery message that lets the automation hub
/// auto-register the switch entity.
///
/// Called once per successful connection. Safe to call repeatedly: the
/// payload is a pure function of the switch, so re-announcing republishes
/// byte-identical retained content.
pub struct DiscoveryAnnouncer {
    link: Arc<dyn BrokerLink>,
    switch: Switch,
}

impl DiscoveryAnnouncer {
    pub fn new(link: Arc<dyn BrokerLink>, switch: Switch) -> Self {
        Self { link, switch }
    }

    pub async fn announce(&self) -> Result<()> {
        let payload = DiscoveryConfig::for_switch(&self.switch).to_payload()?;

        info!(
            device = %self.switch.device_id(),
            topic = %self.switch.topics().config(),
            "Sending discovery configuration"
        );

        self.link
            .publish(self.switch.topics().config(), payload.as_bytes(), true)
            .await
    }
}
