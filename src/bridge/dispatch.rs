//! Command Dispatcher
//!
//! Executes queued commands against the call engine, one at a time, in
//! arrival order. A command with nothing to act on is a harmless no-op
//! or reports `success:false`; nothing here retries or raises errors.

use super::command::Command;
use super::publish::StatusPublisher;
use super::status::StatusMessage;
use super::BridgeWorker;
use crate::engine::audio::AudioPlayer;
use crate::engine::CallEngine;

impl<E, A, P> BridgeWorker<E, A, P>
where
    E: CallEngine,
    A: AudioPlayer,
    P: StatusPublisher,
{
    pub(super) fn handle_command(&mut self, command: Command) {
        match command {
            Command::Connect(uri) => {
                self.ringtone.stop();
                tracing::info!("dialing {}", uri);
                // success is observed through later lifecycle events
                if let Err(e) = self.engine.dial(&uri) {
                    tracing::warn!("dial failed: {}", e);
                }
            }

            Command::Answer => {
                tracing::info!("answering incoming call");
                self.ringtone.stop();
                let success = self.engine.answer();
                self.publisher.publish(&StatusMessage::Answer { success });
            }

            Command::Hangup => {
                // the CLOSED event carries the status to the controller
                self.ringtone.stop();
                self.engine.hangup();
            }

            Command::Mute => {
                self.engine.set_muted(true);
                self.publisher.publish(&StatusMessage::Mute);
            }

            Command::Unmute => {
                self.engine.set_muted(false);
                self.publisher.publish(&StatusMessage::Unmute);
            }

            Command::Hold => {
                let success = self.engine.hold();
                self.publisher.publish(&StatusMessage::Hold { success });
            }

            Command::Resume => {
                let success = self.engine.resume();
                self.publisher.publish(&StatusMessage::Resume { success });
            }

            Command::CallStatus => {
                let active = self.engine.has_active_call();
                self.publisher.publish(&StatusMessage::ActiveCall(active));
            }

            Command::RegistrationStatus => {
                let registered = self.engine.registered_accounts() > 0;
                self.publisher
                    .publish(&StatusMessage::RegistrationActive(registered));
            }
        }
    }
}
