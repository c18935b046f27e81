use serde::Deserialize;
use serde_json::{json, Value};

use crate::{queue::AttendanceEvent, roster::Identity};

pub fn attendance_document(event: &AttendanceEvent) -> Value {
    json!({
        "id": event.identity_id,
        "name": event.display_name.as_str(),
        "regNum": event.registration_number.as_str(),
        "timestamp": event.timestamp.as_str(),
    })
}

pub fn identity_document(identity: &Identity) -> Value {
    json!({
        "id": identity.id,
        "name": identity.display_name.as_str(),
        "regNum": identity.registration_number.as_str(),
    })
}

pub fn heartbeat_document(
    uptime_millis: u64,
    queued: usize,
    state: &str,
    timestamp: &str,
) -> Value {
    json!({
        "uptimeMs": uptime_millis,
        "queued": queued,
        "state": state,
        "timestamp": timestamp,
    })
}

/// Progress line read by the web console during enrollment
pub fn status_message_document(message: &str) -> Value {
    json!({ "msg": message })
}

/// The flag node holds a bare string
pub fn control_flag_document(flag: ControlFlag) -> Value {
    Value::String(flag.as_str().to_string())
}

/// The remotely-set operating mode
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlFlag {
    Verify,
    Enroll,
}

impl ControlFlag {
    /// Any value other than ENROLL means verify. Some clients return string
    /// nodes still JSON-quoted, so quotes are stripped.
    pub fn parse(raw: &str) -> Self {
        let value = raw.trim().trim_matches('"');
        if value.eq_ignore_ascii_case("ENROLL") {
            ControlFlag::Enroll
        } else {
            ControlFlag::Verify
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ControlFlag::Verify => "VERIFY",
            ControlFlag::Enroll => "ENROLL",
        }
    }
}

/// Details of the person to enroll, written by the console before it raises
/// the ENROLL flag
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct EnrollPayload {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "regNum", default)]
    pub registration_number: String,
}

impl EnrollPayload {
    pub fn from_json(document: Value) -> Result<Self, serde_json::Error> {
        let mut payload: EnrollPayload = serde_json::from_value(document)?;
        payload.name = payload.name.trim().to_string();
        payload.registration_number = payload.registration_number.trim().to_string();
        Ok(payload)
    }
}
