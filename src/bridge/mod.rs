//! MQTT Bridge
//!
//! Wires the broker connection to the call engine. Two tasks run for the
//! lifetime of the bridge:
//!
//! - the broker task polls the MQTT event loop, maintains the
//!   connectivity flag, and translates received messages into queued
//!   commands;
//! - the worker task is the engine's execution context: the single
//!   consumer of the command queue and of call-lifecycle events, and the
//!   only place the engine, the audio player and the ring-tone slot are
//!   touched.

mod command;
mod dispatch;
mod events;
mod publish;
mod queue;
mod status;


pub use command::{Command, DecodeError, InboundTranslator};
pub use publish::{MqttPublisher, StatusPublisher};
pub use queue::{command_queue, CommandReceiver, CommandSender};
pub use status::StatusMessage;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rumqttc::{AsyncClient, Event, EventLoop, MqttOptions, Packet, QoS};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::config::BridgeConfig;
use crate::engine::audio::{AudioPlayer, Repeat, RingtoneSlot};
use crate::engine::{CallEngine, CallEvent};

/// Bridge start-up errors; all of these are fatal, the bridge does not
/// start in a degraded state
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("broker connection failed: {0}")]
    Broker(String),

    #[error("broker connection timed out after {0} seconds")]
    ConnectTimeout(u64),

    #[error("subscribe failed: {0}")]
    Subscribe(#[from] rumqttc::ClientError),
}

/// Per-bridge state living on the worker task
struct BridgeWorker<E, A, P> {
    engine: E,
    player: A,
    ringtone: RingtoneSlot,
    publisher: P,
    all_registered: bool,
}

impl<E, A, P> BridgeWorker<E, A, P>
where
    E: CallEngine,
    A: AudioPlayer,
    P: StatusPublisher,
{
    fn new(engine: E, player: A, publisher: P) -> Self {
        Self {
            engine,
            player,
            ringtone: RingtoneSlot::new(),
            publisher,
            all_registered: false,
        }
    }

    /// Start a tone, stopping any active one first
    fn start_tone(&mut self, asset: &str, repeat: Repeat) {
        self.ringtone.stop();
        match self.player.play(asset, repeat) {
            Ok(handle) => self.ringtone.replace(handle),
            Err(e) => tracing::warn!("cannot play {}: {}", asset, e),
        }
    }

    /// Consume commands and lifecycle events until cancelled or both
    /// producers are gone
    async fn run(
        mut self,
        mut commands: CommandReceiver,
        mut events: mpsc::UnboundedReceiver<CallEvent>,
        cancel: CancellationToken,
    ) {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                command = commands.next() => match command {
                    Some(command) => self.handle_command(command),
                    None => break,
                },
                event = events.recv() => match event {
                    Some(event) => self.handle_event(event),
                    None => break,
                },
            }
        }

        // release any active playback on shutdown
        self.ringtone.stop();
        tracing::debug!("bridge worker stopped");
    }
}

/// Handle to a running bridge
pub struct Bridge {
    client: AsyncClient,
    cancel: CancellationToken,
    broker_task: JoinHandle<()>,
    worker_task: JoinHandle<()>,
}

impl Bridge {
    /// Connect to the broker, subscribe to the command topic and start
    /// the bridge tasks.
    ///
    /// `events` is the lifecycle-event stream of the engine the host
    /// wired up; the bridge is its only consumer. Fails if the
    /// configuration is invalid or the broker cannot be reached within
    /// the configured timeout.
    pub async fn start<E, A>(
        config: BridgeConfig,
        engine: E,
        events: mpsc::UnboundedReceiver<CallEvent>,
        player: A,
    ) -> Result<Bridge, BridgeError>
    where
        E: CallEngine,
        A: AudioPlayer,
    {
        config.validate().map_err(BridgeError::Config)?;

        let mut options = MqttOptions::new(
            config.client_id.clone(),
            config.broker_host.clone(),
            config.broker_port,
        );
        options.set_keep_alive(Duration::from_secs(config.keep_alive_secs));
        options.set_clean_session(true);
        if let (Some(user), Some(pass)) = (&config.username, &config.password) {
            options.set_credentials(user.clone(), pass.clone());
        }

        let (client, mut event_loop) = AsyncClient::new(options, 16);
        let connected = Arc::new(AtomicBool::new(false));

        // Initial connect is the only fatal broker interaction; later
        // drops are handled by the broker task.
        wait_for_connack(&mut event_loop, config.connect_timeout_secs).await?;
        connected.store(true, Ordering::Relaxed);
        tracing::info!(
            "connected to broker {}:{}",
            config.broker_host,
            config.broker_port
        );

        client
            .subscribe(config.command_topic.clone(), QoS::AtMostOnce)
            .await?;

        let (command_tx, command_rx) = command_queue();
        let translator = InboundTranslator::new(config.command_topic.clone(), command_tx);
        let publisher = MqttPublisher::new(
            client.clone(),
            config.status_topic.clone(),
            connected.clone(),
        );

        let cancel = CancellationToken::new();

        let broker_task = tokio::spawn(broker_loop(
            event_loop,
            client.clone(),
            config.command_topic.clone(),
            translator,
            connected,
            cancel.child_token(),
        ));

        let worker = BridgeWorker::new(engine, player, publisher);
        let worker_task = tokio::spawn(worker.run(command_rx, events, cancel.child_token()));

        Ok(Bridge {
            client,
            cancel,
            broker_task,
            worker_task,
        })
    }

    /// Stop both tasks and disconnect from the broker
    pub async fn shutdown(self) {
        self.cancel.cancel();
        let _ = self.worker_task.await;
        let _ = self.broker_task.await;
        let _ = self.client.disconnect().await;
        tracing::info!("bridge shut down");
    }
}

/// Drive the event loop until the broker acknowledges the connection
async fn wait_for_connack(
    event_loop: &mut EventLoop,
    timeout_secs: u64,
) -> Result<(), BridgeError> {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(timeout_secs);

    loop {
        match tokio::time::timeout_at(deadline, event_loop.poll()).await {
            Ok(Ok(Event::Incoming(Packet::ConnAck(_)))) => return Ok(()),
            Ok(Ok(_)) => continue,
            Ok(Err(e)) => return Err(BridgeError::Broker(e.to_string())),
            Err(_) => return Err(BridgeError::ConnectTimeout(timeout_secs)),
        }
    }
}

/// Poll the broker connection: connectivity upkeep, resubscription after
/// reconnects, and inbound message translation
async fn broker_loop(
    mut event_loop: EventLoop,
    client: AsyncClient,
    command_topic: String,
    translator: InboundTranslator,
    connected: Arc<AtomicBool>,
    cancel: CancellationToken,
) {
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            event = event_loop.poll() => match event {
                Ok(Event::Incoming(Packet::ConnAck(_))) => {
                    tracing::info!("broker connection (re)established");
                    connected.store(true, Ordering::Relaxed);
                    if let Err(e) = client.try_subscribe(command_topic.as_str(), QoS::AtMostOnce) {
                        tracing::warn!("resubscribe to {} failed: {}", command_topic, e);
                    }
                }
                Ok(Event::Incoming(Packet::Publish(publish))) => {
                    translator.on_message(&publish.topic, &publish.payload);
                }
                Ok(_) => {}
                Err(e) => {
                    if connected.swap(false, Ordering::Relaxed) {
                        tracing::warn!("broker connection lost: {}", e);
                    }
                    tokio::time::sleep(Duration::from_secs(1)).await;
                }
            }
        }
    }

    tracing::debug!("broker loop stopped");
}
