use thiserror::Error;

use rollcall_shared::{BoundsError, SensorFault, StorageFull, StoreRegion};

/// Everything that can go wrong on the device. Only `HardwareFault` stops the
/// device; the rest are handled where they occur, shown on the display and
/// reported through `TickEvents`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviceError {
    /// The fingerprint sensor did not answer at boot
    #[error("Fingerprint sensor not found at boot; check wiring")]
    HardwareFault,

    /// An image could not be captured or converted
    #[error("Fingerprint capture failed during {stage}")]
    CaptureError { stage: &'static str },

    /// The presented finger already has a template on the sensor
    #[error("Finger is already enrolled as template {template_id}")]
    DuplicateEnrollment { template_id: u16 },

    #[error("{0}")]
    StorageFull(#[from] StorageFull),

    #[error("Remote store unreachable")]
    RemoteUnreachable,

    /// A region's count prefix was out of range; it has been reset to empty
    #[error("Persisted {region} state was corrupt and has been reset to empty")]
    CorruptPersistedState { region: StoreRegion },

    /// The operator did not place or remove a finger in time
    #[error("Timed out waiting for {waiting_for}")]
    EnrollTimeout { waiting_for: &'static str },

    #[error("Enrollment details missing or malformed at {path}")]
    MissingEnrollPayload { path: String },

    #[error("Fingerprint sensor failed during {stage}: {fault}")]
    SensorFault {
        stage: &'static str,
        fault: SensorFault,
    },

    /// The persistent store cannot hold the region layout
    #[error("Persistent store unusable: {0}")]
    Storage(#[from] BoundsError),
}

impl DeviceError {
    /// Whether the device must halt
    pub fn is_fatal(&self) -> bool {
        matches!(self, DeviceError::HardwareFault | DeviceError::Storage(_))
    }
}
