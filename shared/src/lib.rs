//! # Rollcall Shared
//! The offline-tolerant durability subsystem of the rollcall attendance
//! device, plus the interfaces of the collaborators it talks to.
//!
//! Roster and offline queue live in one flat non-volatile store, laid out by a
//! compile-time region table and accessed through `NvCodec`. The `SyncDriver`
//! moves attendance events to the remote store, queuing them while it is
//! unreachable and draining them oldest-first once it is back.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

#[macro_use]
extern crate cfg_if;

pub use rollcall_serde::{FixedText, Record, RecordReader, RecordWriter, SerdeErr, ERASED_BYTE};

mod backends;
mod bounded_list;
mod constants;
mod error;
mod peripherals;
mod queue;
mod remote;
mod roster;
mod storage;
mod sync;
mod time;
mod types;

cfg_if! {
    if #[cfg(feature = "native")] {
        pub use backends::{FileStore, SystemClock};
    }
}
pub use bounded_list::{BoundedList, CapacityError};
pub use constants::{
    MAX_IDENTITIES, NAME_WIDTH, QUEUE_CAPACITY, REG_NUMBER_WIDTH, STORE_SIZE, TIMESTAMP_WIDTH,
    UNKNOWN_NAME, UNKNOWN_TIMESTAMP,
};
pub use error::{StorageFull, StoreRegion};
pub use peripherals::{
    Capture, FingerprintSensor, Indicator, Network, SearchResult, SensorFault, StatusDisplay,
};
pub use queue::{AttendanceEvent, OfflineQueue};
pub use remote::{
    attendance_document, control_flag_document, heartbeat_document, identity_document,
    sanitize_path_segment, status_message_document, ControlFlag, EnrollPayload, MemoryRemote,
    RemotePaths, RemoteStore, PATH_PLACEHOLDER,
};
pub use roster::{Identity, RosterStore};
pub use storage::{
    codec::NvCodec,
    error::{BoundsError, CorruptCount, StoreError},
    layout::{
        CountPrefix, Region, RegionTable, SchemaHeader, REGION_TABLE, SCHEMA_MAGIC, SCHEMA_VERSION,
    },
    memory_store::MemoryStore,
    persistent_store::PersistentStore,
};
pub use sync::{Delivery, DrainReport, RecordOutcome, SyncDriver};
pub use time::{format_timestamp, Clock, Deadline, Instant, Timer};
pub use types::{DisplayName, IdentityId, RegistrationNumber, TimestampText};
