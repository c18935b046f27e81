use crate::error::SerdeErr;

/// Accumulates the bytes of a single record, refusing to grow past the
/// record's declared width. Any space left unwritten when the writer is
/// finished is zero-filled.
pub struct RecordWriter {
    buffer: Vec<u8>,
    limit: usize,
}

impl RecordWriter {
    pub fn new(limit: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(limit),
            limit,
        }
    }

    pub fn write_byte(&mut self, byte: u8) -> Result<(), SerdeErr> {
        if self.buffer.len() >= self.limit {
            return Err(SerdeErr::Overflow {
                attempted: self.buffer.len() + 1,
                limit: self.limit,
            });
        }
        self.buffer.push(byte);
        Ok(())
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), SerdeErr> {
        if self.buffer.len() + bytes.len() > self.limit {
            return Err(SerdeErr::Overflow {
                attempted: self.buffer.len() + bytes.len(),
                limit: self.limit,
            });
        }
        self.buffer.extend_from_slice(bytes);
        Ok(())
    }

    pub fn to_bytes(mut self) -> Vec<u8> {
        self.buffer.resize(self.limit, 0);
        self.buffer
    }
}
