use crate::record::ERASED_BYTE;

/// Reads a record's bytes sequentially. Reading past the end of the backing
/// slice yields `ERASED_BYTE` rather than an error, since the medium itself
/// cannot signal missing data.
pub struct RecordReader<'b> {
    bytes: &'b [u8],
    cursor: usize,
}

impl<'b> RecordReader<'b> {
    pub fn new(bytes: &'b [u8]) -> Self {
        Self { bytes, cursor: 0 }
    }

    pub fn read_byte(&mut self) -> u8 {
        let byte = self.bytes.get(self.cursor).copied().unwrap_or(ERASED_BYTE);
        self.cursor += 1;
        byte
    }

    pub fn read_array<const N: usize>(&mut self) -> [u8; N] {
        let mut output = [ERASED_BYTE; N];
        for slot in output.iter_mut() {
            *slot = self.read_byte();
        }
        output
    }
}
