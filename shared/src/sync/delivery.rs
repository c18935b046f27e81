use crate::error::StorageFull;

/// Result of one attempt to write an event to the remote store
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Delivery {
    Delivered,
    /// The remote store was reachable but refused or failed the write
    Rejected,
    /// No link or no ready client; nothing was sent
    Unreachable,
}

impl Delivery {
    pub fn is_delivered(&self) -> bool {
        matches!(self, Delivery::Delivered)
    }
}

/// What happened to a freshly captured event
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordOutcome {
    /// Written straight through to the remote store
    Delivered,
    /// Held in the offline queue after a failed delivery
    Queued { cause: Delivery },
    /// The offline queue was full; the event is gone
    Dropped(StorageFull),
}

/// Summary of one drain pass
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrainReport {
    pub delivered: usize,
    pub remaining: usize,
    /// The failure that stopped the pass, if any
    pub halted_on: Option<Delivery>,
}
