use log::warn;

use rollcall_shared::{NvCodec, OfflineQueue, RosterStore, StoreRegion};

use crate::{ControlStateMachine, DeviceError};

/// Durable collections plus the control state, owned by the scheduler
pub struct DeviceState {
    pub(crate) codec: NvCodec,
    pub(crate) roster: RosterStore,
    pub(crate) queue: OfflineQueue,
    pub(crate) control: ControlStateMachine,
}

impl DeviceState {
    /// Rebuild the roster and queue from storage. Regions found corrupt are
    /// reset to empty and reported.
    pub fn load(codec: NvCodec) -> (Self, Vec<DeviceError>) {
        let roster = RosterStore::load(&codec);
        let queue = OfflineQueue::load(&codec);

        let mut resets = Vec::new();
        if roster.was_reset() {
            warn!("Roster region was corrupt; starting with an empty roster");
            resets.push(DeviceError::CorruptPersistedState {
                region: StoreRegion::Roster,
            });
        }
        if queue.was_reset() {
            warn!("Queue region was corrupt; starting with an empty queue");
            resets.push(DeviceError::CorruptPersistedState {
                region: StoreRegion::Queue,
            });
        }

        (
            Self {
                codec,
                roster,
                queue,
                control: ControlStateMachine::new(),
            },
            resets,
        )
    }

    pub fn codec(&self) -> &NvCodec {
        &self.codec
    }

    pub fn roster(&self) -> &RosterStore {
        &self.roster
    }

    pub fn queue(&self) -> &OfflineQueue {
        &self.queue
    }

    pub fn control(&self) -> &ControlStateMachine {
        &self.control
    }
}
