use anyhow::Result;
use clap::Parser;
use dotenv::dotenv;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use application::SyncController;
use domain::Switch;
use infrastructure::config::BridgeConfig;
use infrastructure::messaging::{BrokerLink, MqttClient, MqttStatePublisher};
use infrastructure::store::StateStore;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to config directory (optional)
    #[arg(long, default_value = "config")]
    config_dir: String,

    /// Override MQTT broker host
    #[arg(long)]
    mqtt_host: Option<String>,

    /// Override MQTT broker port
    #[arg(long)]
    mqtt_port: Option<u16>,

    /// Override MQTT username
    #[arg(long)]
    mqtt_username: Option<String>,

    /// Override MQTT password
    #[arg(long)]
    mqtt_password: Option<String>,

    /// Override the switch display name
    #[arg(long)]
    switch_name: Option<String>,

    /// Override the backing file path
    #[arg(long)]
    state_path: Option<String>,
}

async fn run() -> Result<()> {
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,switch_agent=debug,application=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("🔌 MQTT Switch Bridge starting...");

    // 0. Parse Args
    let args = Args::parse();

    // 1. Load Configuration
    let mut config = BridgeConfig::load(&args.config_dir)?;

    // Override with CLI args if present
    if let Some(host) = args.mqtt_host {
        config.mqtt.host = host;
    }
    if let Some(port) = args.mqtt_port {
        config.mqtt.port = port;
    }
    if let Some(username) = args.mqtt_username {
        config.mqtt.username = Some(username);
    }
    if let Some(password) = args.mqtt_password {
        config.mqtt.password = Some(password);
    }
    if let Some(name) = args.switch_name {
        config.switch.name = name;
    }
    if let Some(path) = args.state_path {
        config.switch.state_path = path;
    }

    // 2. Derive the switch identity (stable for the process lifetime)
    let switch = Switch::new(config.switch.name.clone())?;
    info!(
        device = %switch.device_id(),
        name = %switch.name(),
        path = %config.switch.state_path,
        "✅ Registered switch identity"
    );

    let store = StateStore::new(&config.switch.state_path);

    // 3. Connect to the broker; the transport retries on its own
    info!(host = %config.mqtt.host, port = %config.mqtt.port, "Connecting to MQTT broker...");

    let client_id = format!("switch-{}", switch.device_id());
    let credentials = match (config.mqtt.username.clone(), config.mqtt.password.clone()) {
        (Some(username), Some(password)) => Some((username, password)),
        (Some(username), None) => Some((username, String::new())),
        _ => None,
    };
    let mqtt_client = MqttClient::new(&config.mqtt.host, config.mqtt.port, &client_id, credentials);

    let link: Arc<dyn BrokerLink> = Arc::new(mqtt_client.clone());
    let publisher = Arc::new(MqttStatePublisher::new(
        link.clone(),
        switch.topics().clone(),
    ));

    // 4. Start the sync controller
    let cancel_token = CancellationToken::new();
    let controller = SyncController::new(
        link.clone(),
        mqtt_client.events(),
        publisher,
        store,
        switch,
        cancel_token.clone(),
    );
    let controller_handle = tokio::spawn(controller.run());

    // 5. Shutdown Signal
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("🛑 Shutting down..."),
        Err(err) => warn!(error = %err, "Unable to listen for shutdown signal"),
    }

    cancel_token.cancel();
    let _ = controller_handle.await;

    // Close the link so the transport flushes and ends gracefully
    if let Err(e) = link.close().await {
        warn!(error = %e, "Error closing broker link");
    }

    info!("👋 Good bye!");
    Ok(())
}

fn main() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    if let Err(e) = rt.block_on(run()) {
        eprintln!("\n❌ CRITICAL ERROR: {:?}", e);
        std::process::exit(1);
    }
}
