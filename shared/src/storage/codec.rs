use log::{info, warn};

use rollcall_serde::{Record, ERASED_BYTE};

use super::{
    error::{BoundsError, CorruptCount, StoreError},
    layout::{CountPrefix, Region, RegionTable, SchemaHeader, REGION_TABLE},
    persistent_store::PersistentStore,
};

/// Reads and writes fixed-width records at absolute addresses of a
/// persistent store laid out according to `REGION_TABLE`.
///
/// Writes are range-checked before any byte reaches the store. Reads never
/// fail; trust in what was read is established by the callers' count checks.
pub struct NvCodec {
    store: Box<dyn PersistentStore>,
    regions: RegionTable,
    formatted_on_open: bool,
}

impl NvCodec {
    /// Open a store, validating its size against the region table. A store
    /// without a current schema header (blank or foreign medium) is formatted
    /// with empty regions.
    pub fn open(store: Box<dyn PersistentStore>) -> Result<Self, BoundsError> {
        let regions = REGION_TABLE;
        let required = regions.total_size();
        if store.capacity() < required {
            return Err(StoreError::TooSmall {
                capacity: store.capacity(),
                required,
            }
            .into());
        }

        let mut codec = Self {
            store,
            regions,
            formatted_on_open: false,
        };

        let header: SchemaHeader = codec.decode_at(0);
        if !header.is_current() {
            warn!(
                "Store schema header {:?} (version {}) not recognized, formatting empty regions",
                header.magic, header.version
            );
            codec.format()?;
            codec.formatted_on_open = true;
        }

        Ok(codec)
    }

    /// Write a fresh header and zero every count prefix
    pub fn format(&mut self) -> Result<(), BoundsError> {
        let roster = self.regions.roster;
        let queue = self.regions.queue;
        self.encode_at(0, &SchemaHeader::current())?;
        self.encode_at::<CountPrefix>(roster.count_address(), &0)?;
        self.encode_at::<CountPrefix>(queue.count_address(), &0)?;
        self.flush();
        info!("Store formatted: {} bytes of regions", self.regions.total_size());
        Ok(())
    }

    pub fn formatted_on_open(&self) -> bool {
        self.formatted_on_open
    }

    pub fn regions(&self) -> &RegionTable {
        &self.regions
    }

    pub fn store(&self) -> &dyn PersistentStore {
        self.store.as_ref()
    }

    /// Encode `record` at `address`, returning the number of bytes written.
    /// A record that would not fit entirely is rejected without writing anything.
    pub fn encode_at<R: Record>(
        &mut self,
        address: usize,
        record: &R,
    ) -> Result<usize, BoundsError> {
        let capacity = self.store.capacity();
        let fits = address
            .checked_add(R::BYTE_LENGTH)
            .is_some_and(|end| end <= capacity);
        if !fits {
            return Err(BoundsError::OutOfRange {
                address,
                length: R::BYTE_LENGTH,
                capacity,
            });
        }

        let bytes = record.to_bytes()?;
        self.store.write(address, &bytes)?;
        Ok(bytes.len())
    }

    pub fn decode_at<R: Record>(&self, address: usize) -> R {
        let mut bytes = vec![ERASED_BYTE; R::BYTE_LENGTH];
        self.store.read(address, &mut bytes);
        R::from_bytes(&bytes)
    }

    /// Decode every record of a region, refusing a count prefix larger than the region
    pub fn read_region<T: Record>(&self, region: &Region) -> Result<Vec<T>, CorruptCount> {
        let count = usize::from(self.decode_at::<CountPrefix>(region.count_address()));
        if count > region.max_records {
            return Err(CorruptCount {
                count,
                max: region.max_records,
            });
        }

        Ok((0..count)
            .map(|index| self.decode_at(region.record_address(index)))
            .collect())
    }

    /// Rewrite a region: every record, then the count prefix
    pub fn write_region<'r, T: Record + 'r>(
        &mut self,
        region: &Region,
        records: impl ExactSizeIterator<Item = &'r T>,
    ) -> Result<usize, BoundsError> {
        debug_assert_eq!(T::BYTE_LENGTH, region.record_length);

        let count = records.len();
        if count > region.max_records {
            return Err(BoundsError::OutOfRange {
                address: region.record_address(count),
                length: T::BYTE_LENGTH,
                capacity: region.end(),
            });
        }

        let mut written = 0;
        for (index, record) in records.enumerate() {
            written += self.encode_at(region.record_address(index), record)?;
        }
        let prefix = CountPrefix::try_from(count).unwrap_or(CountPrefix::MAX);
        written += self.encode_at(region.count_address(), &prefix)?;
        Ok(written)
    }

    /// Commit, logging a failure instead of propagating it. The process
    /// continues; the data just may not survive a power loss.
    pub fn flush(&mut self) -> bool {
        match self.store.commit() {
            Ok(()) => true,
            Err(error) => {
                warn!("Store commit failed, recent writes may be lost on power loss: {}", error);
                false
            }
        }
    }
}
