use rollcall_serde::FixedText;

use crate::constants::{NAME_WIDTH, REG_NUMBER_WIDTH, TIMESTAMP_WIDTH};

/// Identity ids double as sensor template slots, so they share the sensor's
/// small id space
pub type IdentityId = u8;

pub type DisplayName = FixedText<NAME_WIDTH>;
pub type RegistrationNumber = FixedText<REG_NUMBER_WIDTH>;
pub type TimestampText = FixedText<TIMESTAMP_WIDTH>;
