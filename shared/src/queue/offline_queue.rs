use log::{info, warn};

use crate::{
    bounded_list::BoundedList,
    constants::QUEUE_CAPACITY,
    error::{StorageFull, StoreRegion},
    storage::{codec::NvCodec, error::BoundsError},
};

use super::AttendanceEvent;

/// Attendance events waiting for the remote store, oldest first.
///
/// Re-derived from storage on every boot. Callers only enqueue; removal is
/// driven by the sync driver's drain pass.
#[derive(Debug, Clone, Default)]
pub struct OfflineQueue {
    events: BoundedList<AttendanceEvent, QUEUE_CAPACITY>,
    reset_on_load: bool,
}

impl OfflineQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the queue region, resetting to empty on an out-of-range count prefix
    pub fn load(codec: &NvCodec) -> Self {
        let region = codec.regions().queue;
        match codec.read_region::<AttendanceEvent>(&region) {
            Ok(records) => {
                let events = BoundedList::try_from_vec(records).unwrap_or_default();
                if !events.is_empty() {
                    info!("Offline queue loaded: {} events awaiting sync", events.len());
                }
                Self {
                    events,
                    reset_on_load: false,
                }
            }
            Err(corrupt) => {
                warn!("Offline queue region reset to empty: {}", corrupt);
                Self {
                    events: BoundedList::new(),
                    reset_on_load: true,
                }
            }
        }
    }

    pub fn was_reset(&self) -> bool {
        self.reset_on_load
    }

    /// Append an event. At capacity the event is dropped and `StorageFull` returned;
    /// nothing already queued is overwritten.
    pub fn enqueue(&mut self, event: AttendanceEvent) -> Result<(), StorageFull> {
        self.events.try_push(event).map_err(|rejected| StorageFull {
            region: StoreRegion::Queue,
            capacity: rejected.capacity,
        })
    }

    pub fn peek_oldest(&self) -> Option<&AttendanceEvent> {
        self.events.front()
    }

    /// Remove the oldest event, compacting the rest
    pub fn remove_oldest(&mut self) -> Option<AttendanceEvent> {
        self.events.pop_front()
    }

    pub fn persist(&self, codec: &mut NvCodec) -> Result<(), BoundsError> {
        let region = codec.regions().queue;
        codec.write_region(&region, self.events.iter())?;
        codec.flush();
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.events.is_full()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AttendanceEvent> {
        self.events.iter()
    }
}

impl PartialEq for OfflineQueue {
    fn eq(&self, other: &Self) -> bool {
        self.events == other.events
    }
}
