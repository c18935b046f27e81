use rollcall_shared::{
    AttendanceEvent, MemoryStore, NvCodec, OfflineQueue, PersistentStore, RosterStore,
    STORE_SIZE,
};

/// Builds a persistent store image holding a given roster and queue
pub struct StoreImage {
    codec: NvCodec,
    roster: RosterStore,
    queue: OfflineQueue,
}

impl StoreImage {
    pub fn new() -> Self {
        let codec = NvCodec::open(Box::new(MemoryStore::new(STORE_SIZE)))
            .expect("blank store opens");
        Self {
            codec,
            roster: RosterStore::new(),
            queue: OfflineQueue::new(),
        }
    }

    /// Append identities with ids 1, 2, ... in order
    pub fn with_identities(mut self, identities: &[(&str, &str)]) -> Self {
        for (name, registration_number) in identities {
            self.roster
                .append(name, registration_number)
                .expect("roster has room");
        }
        self
    }

    pub fn with_queued(mut self, events: impl IntoIterator<Item = AttendanceEvent>) -> Self {
        for event in events {
            self.queue.enqueue(event).expect("queue has room");
        }
        self
    }

    /// Overwrite a raw count prefix after everything else is written
    pub fn bytes_with_count(mut self, count_address: usize, count: u16) -> Vec<u8> {
        self.persist();
        self.codec
            .encode_at(count_address, &count)
            .expect("count fits");
        self.codec.store().snapshot()
    }

    pub fn bytes(mut self) -> Vec<u8> {
        self.persist();
        self.codec.store().snapshot()
    }

    fn persist(&mut self) {
        self.roster.persist(&mut self.codec).expect("roster persists");
        self.queue.persist(&mut self.codec).expect("queue persists");
    }
}

impl Default for StoreImage {
    fn default() -> Self {
        Self::new()
    }
}
