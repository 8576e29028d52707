//! Audio Playback Interface
//!
//! Named-asset playback for ring and signalling tones, plus the slot
//! that guarantees at most one tone plays at a time.

use thiserror::Error;

/// Standard ring tone, looped while a call alerts
pub const TONE_RING: &str = "ring.wav";
/// Ring-back tone for the outbound leg
pub const TONE_RINGBACK: &str = "ringback.wav";
/// Call-waiting beep when a call alerts during another call
pub const TONE_CALLWAITING: &str = "callwaiting.wav";
/// Terminal tone for SIP 486
pub const TONE_BUSY: &str = "busy.wav";
/// Terminal tone for SIP 404
pub const TONE_NOTFOUND: &str = "notfound.wav";
/// Terminal tone for other call failures
pub const TONE_ERROR: &str = "error.wav";

/// Audio playback errors
#[derive(Error, Debug)]
pub enum AudioError {
    #[error("audio asset not available: {0}")]
    AssetUnavailable(String),

    #[error("audio device error: {0}")]
    Device(String),
}

/// Repeat mode for a playback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    /// Loop until stopped
    Loop,
    /// Play the given number of times, then stop on its own
    Times(u32),
}

/// Handle to a running playback; dropping it stops the audio.
pub trait PlaybackHandle: Send {}

/// Player for named audio assets, implemented by the host application.
///
/// Only ever called from the bridge worker task.
pub trait AudioPlayer: Send + 'static {
    fn play(&mut self, asset: &str, repeat: Repeat)
        -> Result<Box<dyn PlaybackHandle>, AudioError>;
}

/// Owner of the single active ring-tone playback.
///
/// Replacing the playback always drops the previous handle first, so two
/// tones can never run concurrently and no handle is ever leaked.
#[derive(Default)]
pub struct RingtoneSlot {
    current: Option<Box<dyn PlaybackHandle>>,
}

impl RingtoneSlot {
    pub fn new() -> Self {
        Self { current: None }
    }

    /// Stop any active playback
    pub fn stop(&mut self) {
        self.current = None;
    }

    /// Store a new playback, stopping the previous one first
    pub fn replace(&mut self, handle: Box<dyn PlaybackHandle>) {
        self.current = None;
        self.current = Some(handle);
    }

    /// Whether a playback is active
    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }
}
