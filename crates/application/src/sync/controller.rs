use std::sync::Arc;

use domain::event::EventPublisher;
use domain::link::LinkState;
use domain::switch::{Switch, SwitchState};
use domain::DomainEvent;
use infrastructure::messaging::{BrokerLink, LinkEvent, MqttMessage};
use infrastructure::store::StateStore;
use infrastructure::watch::StateWatcher;
use tokio::sync::{broadcast, mpsc};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::discovery::DiscoveryAnnouncer;

/// Orchestrates the bidirectional synchronization between the backing file
/// and the broker.
///
/// A single select loop serializes all work: observed file states flow out
/// as state publishes, inbound commands flow into file writes. On every
/// (re-)established connection the discovery message is re-announced and the
/// command subscription renewed, because neither is assumed to survive a
/// reconnect. The file watcher is started at most once; its observation
/// stream is drained here for the process lifetime, so reconnects rewire
/// nothing.
pub struct SyncController {
    link: Arc<dyn BrokerLink>,
    events: broadcast::Receiver<LinkEvent>,
    publisher: Arc<dyn EventPublisher>,
    announcer: DiscoveryAnnouncer,
    store: StateStore,
    switch: Switch,
    cancel_token: CancellationToken,
}

impl SyncController {
    pub fn new(
        link: Arc<dyn BrokerLink>,
        events: broadcast::Receiver<LinkEvent>,
        publisher: Arc<dyn EventPublisher>,
        store: StateStore,
        switch: Switch,
        cancel_token: CancellationToken,
    ) -> Self {
        let announcer = DiscoveryAnnouncer::new(link.clone(), switch.clone());

        Self {
            link,
            events,
            publisher,
            announcer,
            store,
            switch,
            cancel_token,
        }
    }

    pub async fn run(mut self) {
        let mut link_state = match LinkState::default().to_connecting() {
            Ok(state) => state,
            Err(e) => {
                error!(error = %e, "Sync controller cannot start");
                return;
            }
        };

        info!(device = %self.switch.device_id(), "Waiting for broker connection");

        // Created on the first successful connection, then kept for the
        // process lifetime.
        let mut observations: Option<mpsc::Receiver<SwitchState>> = None;

        loop {
            tokio::select! {
                _ = self.cancel_token.cancelled() => {
                    info!("Shutdown signal received");
                    link_state = link_state.to_ended();
                    break;
                }
                event = self.events.recv() => match event {
                    Ok(LinkEvent::Connected) => {
                        match link_state.to_connected() {
                            Ok(next) => link_state = next,
                            Err(e) => warn!(error = %e, "Unexpected connect"),
                        }
                        self.on_connected(&mut observations).await;
                    }
                    Ok(LinkEvent::Message(msg)) => {
                        self.on_message(&msg).await;
                    }
                    Ok(LinkEvent::ConnectionLost(reason)) => {
                        warn!(reason = %reason, "Broker link lost, waiting for transport to reconnect");
                        if let Ok(next) = link_state.to_connecting() {
                            link_state = next;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(count)) => {
                        warn!(skipped = count, "Link event stream lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        warn!("Link event stream closed");
                        link_state = link_state.to_ended();
                        break;
                    }
                },
                observed = recv_observation(&mut observations) => match observed {
                    Some(state) => self.on_observation(state).await,
                    None => {
                        warn!("State watcher stream ended");
                        observations = None;
                    }
                },
            }
        }

        debug!(state = ?link_state, "Sync controller stopped");
    }

    /// Connection entry actions: announce, subscribe, start watching.
    /// Runs on every successful handshake, reconnects included.
    async fn on_connected(&self, observations: &mut Option<mpsc::Receiver<SwitchState>>) {
        info!(device = %self.switch.device_id(), "Broker connected, running connection setup");

        if let Err(e) = self.announcer.announce().await {
            error!(error = %e, "Failed to send discovery configuration");
        }

        let command_topic = self.switch.topics().command();
        match self.link.subscribe(command_topic).await {
            Ok(()) => info!(topic = %command_topic, "Listening for commands"),
            Err(e) => error!(topic = %command_topic, error = %e, "Failed to subscribe to command topic"),
        }

        // The watcher outlives reconnects; only the first connection starts it.
        if observations.is_none() {
            match StateWatcher::new(self.store.clone()).start() {
                Ok(rx) => *observations = Some(rx),
                Err(e) => error!(error = %e, "Failed to start state watcher"),
            }
        }
    }

    async fn on_message(&self, msg: &MqttMessage) {
        if msg.topic != self.switch.topics().command() {
            return;
        }

        let payload = String::from_utf8_lossy(&msg.payload);
        info!(topic = %msg.topic, payload = %payload, "Received command");

        let state = SwitchState::from_command_payload(&payload);
        self.store.write(state).await;

        let event = DomainEvent::command_applied(self.switch.device_id().clone(), state);
        if let Err(e) = self.publisher.publish(event).await {
            error!(error = %e, "Failed to publish command event");
        }
    }

    async fn on_observation(&self, state: SwitchState) {
        let event = DomainEvent::switch_state_observed(self.switch.device_id().clone(), state);
        if let Err(e) = self.publisher.publish(event).await {
            error!(error = %e, "Failed to publish state observation");
        }
    }
}

async fn recv_observation(
    observations: &mut Option<mpsc::Receiver<SwitchState>>,
) -> Option<SwitchState> {
    match observations {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}
