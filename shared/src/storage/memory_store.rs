use rollcall_serde::ERASED_BYTE;

use super::{
    error::StoreError,
    persistent_store::{check_range, read_image, PersistentStore},
};

/// RAM-backed store. Starts fully erased; `commit` always succeeds.
#[derive(Clone, Debug)]
pub struct MemoryStore {
    bytes: Vec<u8>,
}

impl MemoryStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            bytes: vec![ERASED_BYTE; capacity],
        }
    }

    /// Rebuild a store from a previously taken image, as after a power cycle
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl PersistentStore for MemoryStore {
    fn capacity(&self) -> usize {
        self.bytes.len()
    }

    fn read(&self, address: usize, buffer: &mut [u8]) {
        read_image(&self.bytes, address, buffer);
    }

    fn write(&mut self, address: usize, bytes: &[u8]) -> Result<(), StoreError> {
        check_range(address, bytes.len(), self.bytes.len())?;
        self.bytes[address..address + bytes.len()].copy_from_slice(bytes);
        Ok(())
    }

    fn commit(&mut self) -> Result<(), StoreError> {
        Ok(())
    }
}
