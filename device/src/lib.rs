//! # Rollcall Device
//! A single-threaded, cooperatively scheduled attendance device: each tick
//! refreshes the display, keeps the link up, sends heartbeats, drains the
//! offline queue, polls the remote control flag, and runs one step of the
//! VERIFY/ENROLL state machine.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod shared {
    pub use rollcall_shared::{
        AttendanceEvent, Capture, Clock, ControlFlag, DrainReport, FingerprintSensor, Identity,
        Indicator, Instant, MemoryRemote, MemoryStore, Network, PersistentStore, RecordOutcome,
        RemotePaths, RemoteStore, SearchResult, SensorFault, StatusDisplay, StorageFull,
        StoreRegion,
    };
}

mod control;
mod device;
mod error;
mod events;

pub use control::{ControlState, ControlStateMachine, EnrollSession};
pub use device::{Device, DeviceConfig, DeviceState, Peripherals};
pub use error::DeviceError;
pub use events::{
    ConnectEvent, DisconnectEvent, DrainEvent, EnrollEvent, EnrollRequestEvent, ErrorEvent,
    HeartbeatEvent, NoMatchEvent, TickEventType, TickEvents, VerifyEvent,
};
