use rollcall_serde::{Record, RecordReader, RecordWriter, SerdeErr};

use crate::{
    constants::UNKNOWN_NAME,
    roster::Identity,
    types::{DisplayName, IdentityId, RegistrationNumber, TimestampText},
};

/// A successful verification. Name and registration number are copied from
/// the roster at verification time, so the event stands on its own even if
/// the roster region is later lost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceEvent {
    pub identity_id: IdentityId,
    pub display_name: DisplayName,
    pub registration_number: RegistrationNumber,
    pub timestamp: TimestampText,
    /// Device uptime at capture, wrapping. Keeps remote keys apart for scans
    /// that share an identity and a wall-clock second, or have no wall clock.
    pub uptime_millis: u32,
}

impl AttendanceEvent {
    pub fn new(
        identity_id: IdentityId,
        display_name: &str,
        registration_number: &str,
        timestamp: &str,
    ) -> Self {
        Self {
            identity_id,
            display_name: DisplayName::new(display_name),
            registration_number: RegistrationNumber::new(registration_number),
            timestamp: TimestampText::new(timestamp),
            uptime_millis: 0,
        }
    }

    pub fn with_uptime(mut self, uptime_millis: u32) -> Self {
        self.uptime_millis = uptime_millis;
        self
    }

    /// Snapshot an identity. A template id missing from the roster still
    /// produces an event, under a placeholder name.
    pub fn for_identity(
        identity_id: IdentityId,
        identity: Option<&Identity>,
        timestamp: &str,
        uptime_millis: u32,
    ) -> Self {
        match identity {
            Some(identity) => Self {
                identity_id,
                display_name: identity.display_name.clone(),
                registration_number: identity.registration_number.clone(),
                timestamp: TimestampText::new(timestamp),
                uptime_millis,
            },
            None => Self::new(identity_id, UNKNOWN_NAME, "", timestamp).with_uptime(uptime_millis),
        }
    }
}

impl Record for AttendanceEvent {
    const BYTE_LENGTH: usize = IdentityId::BYTE_LENGTH
        + DisplayName::BYTE_LENGTH
        + RegistrationNumber::BYTE_LENGTH
        + TimestampText::BYTE_LENGTH
        + u32::BYTE_LENGTH;

    fn ser(&self, writer: &mut RecordWriter) -> Result<(), SerdeErr> {
        self.identity_id.ser(writer)?;
        self.display_name.ser(writer)?;
        self.registration_number.ser(writer)?;
        self.timestamp.ser(writer)?;
        self.uptime_millis.ser(writer)
    }

    fn de(reader: &mut RecordReader) -> Self {
        Self {
            identity_id: IdentityId::de(reader),
            display_name: DisplayName::de(reader),
            registration_number: RegistrationNumber::de(reader),
            timestamp: TimestampText::de(reader),
            uptime_millis: u32::de(reader),
        }
    }
}
