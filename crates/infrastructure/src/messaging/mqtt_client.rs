use anyhow::{Result, anyhow};
use async_trait::async_trait;
use rumqttc::{AsyncClient, Event, MqttOptions, Packet, QoS};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task;
use tracing::{error, info, warn};

/// An inbound publish delivered on a subscribed topic.
#[derive(Clone, Debug)]
pub struct MqttMessage {
    pub topic: String,
    pub payload: Vec<u8>,
}

/// Lifecycle and message events surfaced by the broker link.
///
/// `Connected` fires exactly once per successful handshake, reconnects
/// included. Transport failures surface as `ConnectionLost`; the transport
/// retries on its own, no custom backoff is layered on top.
#[derive(Clone, Debug)]
pub enum LinkEvent {
    Connected,
    Message(MqttMessage),
    ConnectionLost(String),
}

/// Publish/subscribe seam between the application layer and the broker.
#[async_trait]
pub trait BrokerLink: Send + Sync {
    /// Fire-and-forget publish; no acknowledgment is awaited.
    async fn publish(&self, topic: &str, payload: &[u8], retain: bool) -> Result<()>;

    /// Register interest in a topic. Inbound publishes arrive as
    /// [`LinkEvent::Message`] on the event stream.
    async fn subscribe(&self, topic: &str) -> Result<()>;

    /// Close the connection. Idempotent, safe to call multiple times.
    async fn close(&self) -> Result<()>;

    fn is_connected(&self) -> bool;
}

#[derive(Clone)]
pub struct MqttClient {
    client: AsyncClient,
    tx: broadcast::Sender<LinkEvent>,
    connected: Arc<AtomicBool>,
}

impl MqttClient {
    pub fn new(
        host: &str,
        port: u16,
        client_id: &str,
        credentials: Option<(String, String)>,
    ) -> Self {
        let mut mqttoptions = MqttOptions::new(client_id, host, port);
        mqttoptions.set_keep_alive(Duration::from_secs(20));

        if let Some((username, password)) = credentials {
            mqttoptions.set_credentials(username, password);
        }

        let (client, mut eventloop) = AsyncClient::new(mqttoptions, 100);
        let (tx, _) = broadcast::channel(250);
        let tx_clone = tx.clone();
        let connected = Arc::new(AtomicBool::new(false));
        let connected_clone = connected.clone();

        // Spawn a task to handle the event loop
        task::spawn(async move {
            loop {
                match eventloop.poll().await {
                    Ok(notification) => match notification {
                        Event::Incoming(Packet::ConnAck(_)) => {
                            info!("MQTT connected");
                            connected_clone.store(true, Ordering::Relaxed);
                            let _ = tx_clone.send(LinkEvent::Connected);
                        }
                        Event::Incoming(Packet::Publish(publish)) => {
                            let msg = MqttMessage {
                                topic: publish.topic,
                                payload: publish.payload.to_vec(),
                            };
                            // Send errors only mean no one is listening yet;
                            // dropping quietly avoids spam during startup.
                            let _ = tx_clone.send(LinkEvent::Message(msg));
                        }
                        Event::Incoming(Packet::Disconnect) => {
                            warn!("MQTT broker requested disconnect");
                            connected_clone.store(false, Ordering::Relaxed);
                        }
                        Event::Outgoing(rumqttc::Outgoing::Disconnect) => {
                            info!("MQTT client disconnecting");
                            connected_clone.store(false, Ordering::Relaxed);
                        }
                        _ => {}
                    },
                    Err(e) => {
                        error!(error = %e, "MQTT connection error, transport will retry");
                        connected_clone.store(false, Ordering::Relaxed);
                        let _ = tx_clone.send(LinkEvent::ConnectionLost(e.to_string()));
                        tokio::time::sleep(Duration::from_secs(1)).await;
                    }
                }
            }
        });

        Self {
            client,
            tx,
            connected,
        }
    }

    /// Subscribe to the stream of link events (lifecycle + inbound messages)
    pub fn events(&self) -> broadcast::Receiver<LinkEvent> {
        self.tx.subscribe()
    }
}

#[async_trait]
impl BrokerLink for MqttClient {
    async fn publish(&self, topic: &str, payload: &[u8], retain: bool) -> Result<()> {
        self.client
            .publish(topic, QoS::AtMostOnce, retain, payload)
            .await
            .map_err(|e| anyhow!("Failed to publish MQTT message: {}", e))
    }

    async fn subscribe(&self, topic: &str) -> Result<()> {
        self.client
            .subscribe(topic, QoS::AtMostOnce)
            .await
            .map_err(|e| anyhow!("Failed to subscribe to topic {}: {}", topic, e))
    }

    async fn close(&self) -> Result<()> {
        // A disconnect on an already-dead link is a no-op
        if let Err(e) = self.client.disconnect().await {
            warn!(error = %e, "MQTT disconnect on close");
        }
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Relaxed)
    }
}
