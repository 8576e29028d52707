//! Outbound Publisher
//!
//! Best-effort, connection-checked publish of status messages. Status is
//! advisory: when the broker is unreachable the message is logged and
//! dropped, never buffered or retried.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rumqttc::{AsyncClient, QoS};

use super::status::StatusMessage;

/// Sink for status notifications
pub trait StatusPublisher: Send + 'static {
    fn publish(&self, message: &StatusMessage);
}

/// Publishes status messages on the broker's status topic
#[derive(Clone)]
pub struct MqttPublisher {
    client: AsyncClient,
    topic: String,
    connected: Arc<AtomicBool>,
}

impl MqttPublisher {
    pub fn new(client: AsyncClient, topic: String, connected: Arc<AtomicBool>) -> Self {
        Self {
            client,
            topic,
            connected,
        }
    }
}

impl StatusPublisher for MqttPublisher {
    fn publish(&self, message: &StatusMessage) {
        let payload = message.payload();

        if !self.connected.load(Ordering::Relaxed) {
            tracing::warn!("broker disconnected, dropping status: {}", payload);
            return;
        }

        match self
            .client
            .try_publish(self.topic.as_str(), QoS::AtLeastOnce, false, payload.clone())
        {
            Ok(()) => tracing::debug!("published status: {}", payload),
            Err(e) => tracing::warn!("publish failed, dropping status: {}", e),
        }
    }
}
