//! Bridge Configuration
//!
//! Connection parameters for the MQTT broker and the topic pair used by
//! the remote controller.

use serde::{Deserialize, Serialize};

/// MQTT bridge configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Broker hostname (e.g., "localhost" or "broker.example.org")
    pub broker_host: String,

    /// Broker port (default: 1883)
    pub broker_port: u16,

    /// MQTT client identifier
    pub client_id: String,

    /// Broker username (optional)
    pub username: Option<String>,

    /// Broker password (optional)
    pub password: Option<String>,

    /// Keep-alive interval in seconds
    pub keep_alive_secs: u64,

    /// Topic the remote controller publishes commands on
    pub command_topic: String,

    /// Topic status notifications are published on
    pub status_topic: String,

    /// Timeout for the initial broker connection in seconds
    pub connect_timeout_secs: u64,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            broker_host: "localhost".to_string(),
            broker_port: 1883,
            client_id: "voip-mqtt-bridge".to_string(),
            username: None,
            password: None,
            keep_alive_secs: 20,
            command_topic: "baresip/read".to_string(),
            status_topic: "baresip/write".to_string(),
            connect_timeout_secs: 10,
        }
    }
}

impl BridgeConfig {
    /// Create config from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            broker_host: std::env::var("MQTT_BROKER_HOST").unwrap_or(defaults.broker_host),
            broker_port: std::env::var("MQTT_BROKER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.broker_port),
            client_id: std::env::var("MQTT_CLIENT_ID").unwrap_or(defaults.client_id),
            username: std::env::var("MQTT_USERNAME").ok(),
            password: std::env::var("MQTT_PASSWORD").ok(),
            keep_alive_secs: std::env::var("MQTT_KEEP_ALIVE")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.keep_alive_secs),
            command_topic: std::env::var("MQTT_COMMAND_TOPIC").unwrap_or(defaults.command_topic),
            status_topic: std::env::var("MQTT_STATUS_TOPIC").unwrap_or(defaults.status_topic),
            connect_timeout_secs: defaults.connect_timeout_secs,
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.broker_host.is_empty() {
            return Err("broker host is required".to_string());
        }
        if self.client_id.is_empty() {
            return Err("client id is required".to_string());
        }
        if self.command_topic.is_empty() || self.status_topic.is_empty() {
            return Err("command and status topics are required".to_string());
        }
        if self.command_topic == self.status_topic {
            return Err("command and status topics must differ".to_string());
        }
        if self.keep_alive_secs == 0 {
            return Err("keep-alive must be non-zero".to_string());
        }
        Ok(())
    }
}
