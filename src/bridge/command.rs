//! Inbound Command Translation
//!
//! Decodes broker messages into [`Command`]s and hands them to the
//! command queue. Runs on the broker event-loop task, so it never calls
//! into the call engine; anything malformed is logged and dropped.

use thiserror::Error;

use super::queue::CommandSender;

/// Decode failures for inbound command documents
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("malformed command document: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("missing command field")]
    MissingCommand,

    #[error("unknown command code: {0}")]
    UnknownCommand(String),

    #[error("connect command without an account")]
    MissingAccount,
}

/// A call-control command requested by the remote controller.
///
/// Only `Connect` carries a payload: the destination address to dial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Answer,
    Hangup,
    Connect(String),
    Unmute,
    Mute,
    Hold,
    Resume,
    CallStatus,
    RegistrationStatus,
}

impl Command {
    /// Decode a command document.
    ///
    /// The `command` field is a single-character code, sent either as a
    /// one-character string or as the character's integer value:
    /// a=answer, b=hangup, d=connect, u=unmute, m=mute, h=hold,
    /// r=resume, s=call status, p=registration status. Connect requires
    /// a non-empty `account` field with the address to dial.
    pub fn decode(payload: &[u8]) -> Result<Command, DecodeError> {
        let doc: serde_json::Value = serde_json::from_slice(payload)?;

        let code = doc.get("command").ok_or(DecodeError::MissingCommand)?;
        let code = match code {
            serde_json::Value::Number(n) => n
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .and_then(char::from_u32)
                .ok_or_else(|| DecodeError::UnknownCommand(code.to_string()))?,
            serde_json::Value::String(s) if s.chars().count() == 1 => {
                s.chars().next().ok_or(DecodeError::MissingCommand)?
            }
            other => return Err(DecodeError::UnknownCommand(other.to_string())),
        };

        match code {
            'a' => Ok(Command::Answer),
            'b' => Ok(Command::Hangup),
            'd' => {
                let account = doc
                    .get("account")
                    .and_then(|a| a.as_str())
                    .ok_or(DecodeError::MissingAccount)?;
                if account.is_empty() {
                    return Err(DecodeError::MissingAccount);
                }
                Ok(Command::Connect(account.to_string()))
            }
            'u' => Ok(Command::Unmute),
            'm' => Ok(Command::Mute),
            'h' => Ok(Command::Hold),
            'r' => Ok(Command::Resume),
            's' => Ok(Command::CallStatus),
            'p' => Ok(Command::RegistrationStatus),
            other => Err(DecodeError::UnknownCommand(other.to_string())),
        }
    }
}

/// Translates received broker messages into queued commands
pub struct InboundTranslator {
    command_topic: String,
    queue: CommandSender,
}

impl InboundTranslator {
    pub fn new(command_topic: String, queue: CommandSender) -> Self {
        Self {
            command_topic,
            queue,
        }
    }

    /// Handle one received message.
    ///
    /// Messages on other topics are ignored; undecodable payloads are
    /// logged and dropped without reaching the queue.
    pub fn on_message(&self, topic: &str, payload: &[u8]) {
        if topic != self.command_topic {
            return;
        }

        tracing::debug!("command message: {}", String::from_utf8_lossy(payload));

        match Command::decode(payload) {
            Ok(command) => {
                tracing::info!("queueing command: {:?}", command);
                if !self.queue.push(command) {
                    tracing::warn!("command queue is closed, dropping command");
                }
            }
            Err(e) => {
                tracing::warn!("discarding inbound message: {}", e);
            }
        }
    }
}
