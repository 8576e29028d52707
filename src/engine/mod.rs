//! Call-Control Engine Interface
//!
//! The seam between the bridge and the telephony engine. The host
//! application implements [`CallEngine`] over its SIP stack and feeds
//! lifecycle events into the channel handed to [`crate::Bridge::start`].
//!
//! Every method is synchronous and is only ever invoked from the bridge
//! worker task, which stands in for the engine's single-threaded
//! execution context. Nothing here may be called from the broker task.

pub mod audio;

use thiserror::Error;

/// Call-engine errors
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("call setup failed: {0}")]
    CallSetup(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

/// How the focused account answers incoming calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerMode {
    /// Calls alert until answered by the controller
    Manual,
    /// The engine answers on its own; the bridge stays silent
    Auto,
}

/// Call-lifecycle notification emitted by the engine
#[derive(Debug, Clone)]
pub enum CallEvent {
    /// A call is alerting
    Incoming { call_id: String, peer: String },
    /// The outbound leg is ringing at the remote party
    Ringing,
    /// A call was answered and media is flowing
    Established,
    /// The current call ended; `code` is the SIP status code,
    /// 0 for normal clearing
    Closed { code: u16 },
    /// An account registered successfully
    Registered { account: String },
    /// An account is unregistering
    Unregistering { account: String },
}

/// Operations the bridge drives against the telephony engine.
///
/// Unmet preconditions are never errors: operations with nothing to act
/// on are no-ops, and the boolean-returning ones report `false`.
pub trait CallEngine: Send + 'static {
    /// Make the given call the engine's focused call
    fn set_focus(&mut self, call_id: &str);

    /// Answer mode of the focused account
    fn answer_mode(&self) -> AnswerMode;

    /// Number of calls on the focused account, including alerting ones
    fn call_count(&self) -> usize;

    /// Initiate an outbound call to the given address
    fn dial(&mut self, uri: &str) -> Result<(), EngineError>;

    /// Accept the alerting call; `false` if nothing was alerting
    fn answer(&mut self) -> bool;

    /// Terminate the focused call
    fn hangup(&mut self);

    /// Mute or unmute outbound audio on the focused call
    fn set_muted(&mut self, muted: bool);

    /// Place the focused call on hold; `false` on failure
    fn hold(&mut self) -> bool;

    /// Take the focused call off hold; `false` on failure
    fn resume(&mut self) -> bool;

    /// Whether a call is currently active
    fn has_active_call(&self) -> bool;

    /// Number of configured accounts
    fn account_count(&self) -> usize;

    /// Number of accounts currently registered
    fn registered_accounts(&self) -> usize;
}
