use rollcall_serde::{Record, RecordReader, RecordWriter, SerdeErr};

use crate::types::{DisplayName, IdentityId, RegistrationNumber};

/// An enrolled person. Written once at enrollment and never edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: IdentityId,
    pub display_name: DisplayName,
    pub registration_number: RegistrationNumber,
}

impl Identity {
    pub fn new(id: IdentityId, display_name: &str, registration_number: &str) -> Self {
        Self {
            id,
            display_name: DisplayName::new(display_name),
            registration_number: RegistrationNumber::new(registration_number),
        }
    }
}

impl Record for Identity {
    const BYTE_LENGTH: usize =
        IdentityId::BYTE_LENGTH + DisplayName::BYTE_LENGTH + RegistrationNumber::BYTE_LENGTH;

    fn ser(&self, writer: &mut RecordWriter) -> Result<(), SerdeErr> {
        self.id.ser(writer)?;
        self.display_name.ser(writer)?;
        self.registration_number.ser(writer)
    }

    fn de(reader: &mut RecordReader) -> Self {
        Self {
            id: IdentityId::de(reader),
            display_name: DisplayName::de(reader),
            registration_number: RegistrationNumber::de(reader),
        }
    }
}
