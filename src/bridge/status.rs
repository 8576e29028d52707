//! Outbound Status Messages
//!
//! The small JSON documents published to the remote controller. Boolean
//! fields go out as the strings the controller expects ("true"/"false",
//! "yes"/"no"), matching the established wire format.

use serde_json::json;

/// One outbound notification; built per event, published, discarded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    /// `{"status":"calling"}` — an incoming call is alerting
    Calling,
    /// `{"status":"ringing"}` — the outbound leg is ringing
    Ringing,
    /// `{"status":"connected"}` — a call was established
    Connected,
    /// `{"status":"closed"}` — the call ended
    Closed,
    /// `{"status":"registered"}` — an account registered
    Registered,
    /// `{"status":"unregistered"}` — an account is unregistering
    Unregistered,
    /// `{"event":"answer","success":...}`
    Answer { success: bool },
    /// `{"event":"mute"}`
    Mute,
    /// `{"event":"unmute"}`
    Unmute,
    /// `{"event":"hold","success":...}`
    Hold { success: bool },
    /// `{"event":"resume","success":...}`
    Resume { success: bool },
    /// `{"active_call":"yes"|"no"}`
    ActiveCall(bool),
    /// `{"registered":"yes"|"no"}`
    RegistrationActive(bool),
}

fn truth(v: bool) -> &'static str {
    if v {
        "true"
    } else {
        "false"
    }
}

fn yes_no(v: bool) -> &'static str {
    if v {
        "yes"
    } else {
        "no"
    }
}

impl StatusMessage {
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            StatusMessage::Calling => json!({"status": "calling"}),
            StatusMessage::Ringing => json!({"status": "ringing"}),
            StatusMessage::Connected => json!({"status": "connected"}),
            StatusMessage::Closed => json!({"status": "closed"}),
            StatusMessage::Registered => json!({"status": "registered"}),
            StatusMessage::Unregistered => json!({"status": "unregistered"}),
            StatusMessage::Answer { success } => {
                json!({"event": "answer", "success": truth(*success)})
            }
            StatusMessage::Mute => json!({"event": "mute"}),
            StatusMessage::Unmute => json!({"event": "unmute"}),
            StatusMessage::Hold { success } => {
                json!({"event": "hold", "success": truth(*success)})
            }
            StatusMessage::Resume { success } => {
                json!({"event": "resume", "success": truth(*success)})
            }
            StatusMessage::ActiveCall(active) => json!({"active_call": yes_no(*active)}),
            StatusMessage::RegistrationActive(reg) => json!({"registered": yes_no(*reg)}),
        }
    }

    /// Serialized broker payload
    pub fn payload(&self) -> String {
        self.to_json().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_shapes() {
        assert_eq!(StatusMessage::Ringing.payload(), r#"{"status":"ringing"}"#);
        assert_eq!(
            StatusMessage::Connected.payload(),
            r#"{"status":"connected"}"#
        );
        assert_eq!(StatusMessage::Closed.payload(), r#"{"status":"closed"}"#);
    }

    #[test]
    fn test_event_shapes_use_string_booleans() {
        assert_eq!(
            StatusMessage::Answer { success: true }.to_json(),
            json!({"event": "answer", "success": "true"})
        );
        assert_eq!(
            StatusMessage::Hold { success: false }.to_json(),
            json!({"event": "hold", "success": "false"})
        );
        assert_eq!(StatusMessage::Mute.payload(), r#"{"event":"mute"}"#);
    }

    #[test]
    fn test_query_shapes() {
        assert_eq!(
            StatusMessage::ActiveCall(true).payload(),
            r#"{"active_call":"yes"}"#
        );
        assert_eq!(
            StatusMessage::ActiveCall(false).payload(),
            r#"{"active_call":"no"}"#
        );
        assert_eq!(
            StatusMessage::RegistrationActive(true).payload(),
            r#"{"registered":"yes"}"#
        );
    }
}
