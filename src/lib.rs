//! MQTT remote control bridge for a SIP call-control engine
//!
//! Translates call-lifecycle events (incoming, ringing, established,
//! closed, registration) into status messages on an MQTT topic, and
//! inbound command messages on another topic into call-control actions
//! (answer, hangup, mute, hold, dial, status queries).
//!
//! The host application owns the call engine and the audio player; the
//! bridge owns the broker connection and a command queue that hands work
//! from the broker's callback task to a single worker task. All engine
//! calls happen on that worker task, never on the broker task.

pub mod bridge;
pub mod config;
pub mod engine;

pub use bridge::{Bridge, BridgeError};
pub use config::BridgeConfig;
pub use engine::audio::{AudioError, AudioPlayer, PlaybackHandle, Repeat, RingtoneSlot};
pub use engine::{AnswerMode, CallEngine, CallEvent, EngineError};
