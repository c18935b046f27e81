use rollcall_serde::{Record, RecordReader, RecordWriter, SerdeErr};

use crate::{
    constants::{MAX_IDENTITIES, QUEUE_CAPACITY, STORE_SIZE},
    queue::AttendanceEvent,
    roster::Identity,
};

pub const SCHEMA_MAGIC: [u8; 2] = *b"RC";
pub const SCHEMA_VERSION: u8 = 2;

/// Every region starts with the number of records it currently holds
pub type CountPrefix = u16;

/// A capacity-prefixed array of fixed-width records
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub offset: usize,
    pub record_length: usize,
    pub max_records: usize,
}

impl Region {
    pub const fn new(offset: usize, record_length: usize, max_records: usize) -> Self {
        Self {
            offset,
            record_length,
            max_records,
        }
    }

    pub const fn size(&self) -> usize {
        CountPrefix::BYTE_LENGTH + self.record_length * self.max_records
    }

    /// First address after the region
    pub const fn end(&self) -> usize {
        self.offset + self.size()
    }

    pub const fn count_address(&self) -> usize {
        self.offset
    }

    pub const fn record_address(&self, index: usize) -> usize {
        self.offset + CountPrefix::BYTE_LENGTH + index * self.record_length
    }
}

/// Offsets and sizes of every region in the store, derived once from the
/// record widths and capacities
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegionTable {
    pub header_length: usize,
    pub roster: Region,
    pub queue: Region,
}

impl RegionTable {
    pub const fn compute() -> Self {
        let header_length = SchemaHeader::BYTE_LENGTH;
        let roster = Region::new(header_length, Identity::BYTE_LENGTH, MAX_IDENTITIES);
        let queue = Region::new(roster.end(), AttendanceEvent::BYTE_LENGTH, QUEUE_CAPACITY);
        Self {
            header_length,
            roster,
            queue,
        }
    }

    pub const fn total_size(&self) -> usize {
        self.queue.end()
    }
}

pub const REGION_TABLE: RegionTable = RegionTable::compute();

// A layout that does not fit the medium must not build.
const _: () = {
    assert!(
        REGION_TABLE.total_size() <= STORE_SIZE,
        "roster and queue regions do not fit in STORE_SIZE"
    );
    assert!(REGION_TABLE.roster.offset >= REGION_TABLE.header_length);
    assert!(REGION_TABLE.roster.end() <= REGION_TABLE.queue.offset);
    // ids are sequential u8s starting at 1
    assert!(MAX_IDENTITIES < u8::MAX as usize);
    assert!(QUEUE_CAPACITY <= CountPrefix::MAX as usize);
};

/// Identifies a store formatted with this layout
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SchemaHeader {
    pub magic: [u8; 2],
    pub version: u8,
}

impl SchemaHeader {
    pub fn current() -> Self {
        Self {
            magic: SCHEMA_MAGIC,
            version: SCHEMA_VERSION,
        }
    }

    pub fn is_current(&self) -> bool {
        *self == Self::current()
    }
}

impl Record for SchemaHeader {
    // magic, version, one reserved byte
    const BYTE_LENGTH: usize = 4;

    fn ser(&self, writer: &mut RecordWriter) -> Result<(), SerdeErr> {
        writer.write_bytes(&self.magic)?;
        writer.write_byte(self.version)?;
        writer.write_byte(0)
    }

    fn de(reader: &mut RecordReader) -> Self {
        let magic = reader.read_array::<2>();
        let version = reader.read_byte();
        let _reserved = reader.read_byte();
        Self { magic, version }
    }
}
