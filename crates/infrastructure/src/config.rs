use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MqttConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SwitchConfig {
    /// Human-readable switch name shown by the automation hub
    pub name: String,
    /// Path of the backing file holding the switch state
    pub state_path: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BridgeConfig {
    pub mqtt: MqttConfig,
    pub switch: SwitchConfig,
}

impl BridgeConfig {
    pub fn load(config_dir: &str) -> Result<Self, ConfigError> {
        let s = Config::builder()
            // Start with default settings
            .set_default("mqtt.host", "localhost")?
            .set_default("mqtt.port", 1883)?
            .set_default("switch.name", "MQTTSWITCH")?
            .set_default("switch.state_path", "switchvalue")?
            // Local config file (optional) - e.g. config/default.toml
            .add_source(File::with_name(&format!("{}/default", config_dir)).required(false))
            // Environment variables (e.g. SWITCH__MQTT__HOST=10.0.0.1)
            .add_source(Environment::with_prefix("SWITCH").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
