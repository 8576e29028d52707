//! Call-Event Translation
//!
//! Maps call-lifecycle events to status messages and ring-tone changes.
//! Each event produces at most one publish and at most one tone
//! replacement; tone replacement always stops the old playback first.

use super::publish::StatusPublisher;
use super::status::StatusMessage;
use super::BridgeWorker;
use crate::engine::audio::{
    AudioPlayer, Repeat, TONE_BUSY, TONE_CALLWAITING, TONE_ERROR, TONE_NOTFOUND, TONE_RING,
    TONE_RINGBACK,
};
use crate::engine::{AnswerMode, CallEngine, CallEvent};

/// Terminal tone for a SIP failure code; 487 (cancelled) and normal
/// clearing stay silent
fn terminal_tone(code: u16) -> Option<&'static str> {
    match code {
        0 => None,
        404 => Some(TONE_NOTFOUND),
        486 => Some(TONE_BUSY),
        487 => None,
        _ => Some(TONE_ERROR),
    }
}

impl<E, A, P> BridgeWorker<E, A, P>
where
    E: CallEngine,
    A: AudioPlayer,
    P: StatusPublisher,
{
    pub(super) fn handle_event(&mut self, event: CallEvent) {
        match event {
            CallEvent::Incoming { call_id, peer } => {
                tracing::info!("incoming call from {}", peer);
                self.engine.set_focus(&call_id);
                self.ringtone.stop();

                // Alert and notify only when the controller has to act;
                // auto-answered calls stay silent.
                if self.engine.answer_mode() == AnswerMode::Manual {
                    if self.engine.call_count() > 1 {
                        self.start_tone(TONE_CALLWAITING, Repeat::Times(3));
                    } else {
                        self.start_tone(TONE_RING, Repeat::Loop);
                    }
                    self.publisher.publish(&StatusMessage::Calling);
                }
            }

            CallEvent::Ringing => {
                self.start_tone(TONE_RINGBACK, Repeat::Loop);
                self.publisher.publish(&StatusMessage::Ringing);
            }

            CallEvent::Established => {
                self.ringtone.stop();
                self.publisher.publish(&StatusMessage::Connected);
            }

            CallEvent::Closed { code } => {
                self.ringtone.stop();
                self.publisher.publish(&StatusMessage::Closed);
                if let Some(tone) = terminal_tone(code) {
                    tracing::info!("call closed with code {}", code);
                    self.start_tone(tone, Repeat::Times(1));
                }
            }

            CallEvent::Registered { account } => {
                tracing::info!("{} registered", account);
                self.publisher.publish(&StatusMessage::Registered);
                self.check_registrations();
            }

            CallEvent::Unregistering { account } => {
                tracing::info!("{} unregistering", account);
                self.publisher.publish(&StatusMessage::Unregistered);
            }
        }
    }

    /// One-time readiness log once every configured account is registered
    fn check_registrations(&mut self) {
        if self.all_registered {
            return;
        }

        let total = self.engine.account_count();
        if total > 0 && self.engine.registered_accounts() == total {
            tracing::info!(
                "all {} account{} registered successfully",
                total,
                if total == 1 { "" } else { "s" }
            );
            self.all_registered = true;
        }
    }
}
