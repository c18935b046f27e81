use std::fmt;

use thiserror::Error;

/// Which durable collection an error refers to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StoreRegion {
    Roster,
    Queue,
}

impl fmt::Display for StoreRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreRegion::Roster => f.write_str("Roster"),
            StoreRegion::Queue => f.write_str("Offline queue"),
        }
    }
}

/// A durable collection is at capacity; the operation was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{region} storage is full ({capacity} records); operation rejected")]
pub struct StorageFull {
    pub region: StoreRegion,
    pub capacity: usize,
}
