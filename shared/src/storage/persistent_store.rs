use rollcall_serde::ERASED_BYTE;

use super::error::StoreError;

/// A flat, byte-addressable non-volatile medium with explicit commit, such as
/// an emulated EEPROM sector.
///
/// Writes land in a working copy; only `commit` makes them durable.
pub trait PersistentStore {
    fn capacity(&self) -> usize;

    /// Fill `buffer` from `address`. Bytes beyond the end of the store read as erased.
    fn read(&self, address: usize, buffer: &mut [u8]);

    fn write(&mut self, address: usize, bytes: &[u8]) -> Result<(), StoreError>;

    fn commit(&mut self) -> Result<(), StoreError>;

    /// Copy of the whole working image
    fn snapshot(&self) -> Vec<u8> {
        let mut bytes = vec![ERASED_BYTE; self.capacity()];
        self.read(0, &mut bytes);
        bytes
    }
}

/// Shared bounds check for store implementations
pub(crate) fn check_range(
    address: usize,
    length: usize,
    capacity: usize,
) -> Result<(), StoreError> {
    match address.checked_add(length) {
        Some(end) if end <= capacity => Ok(()),
        _ => Err(StoreError::OutOfRange {
            address,
            length,
            capacity,
        }),
    }
}

/// Copies `image[address..]` into `buffer`, padding with erased bytes
pub(crate) fn read_image(image: &[u8], address: usize, buffer: &mut [u8]) {
    for (offset, slot) in buffer.iter_mut().enumerate() {
        *slot = address
            .checked_add(offset)
            .and_then(|index| image.get(index))
            .copied()
            .unwrap_or(ERASED_BYTE);
    }
}
