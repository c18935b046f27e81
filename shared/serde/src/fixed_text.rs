use std::fmt;

use crate::{
    error::SerdeErr, record::Record, record_reader::RecordReader, record_writer::RecordWriter,
};

/// Text stored in exactly `N` bytes on disk.
///
/// At most `N - 1` bytes of UTF-8 are kept (truncated on a char boundary) so
/// the stored field always ends with a NUL. Decoding forces that final NUL
/// regardless of what was read, so a torn or corrupted write can never run a
/// string into the next field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FixedText<const N: usize> {
    text: String,
}

impl<const N: usize> FixedText<N> {
    /// Largest number of text bytes that fit alongside the terminator
    pub const MAX_TEXT_BYTES: usize = N - 1;

    pub fn new(text: &str) -> Self {
        let mut end = text.len().min(Self::MAX_TEXT_BYTES);
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        // NUL would terminate the field early on decode
        let text = match text[..end].find('\0') {
            Some(nul) => &text[..nul],
            None => &text[..end],
        };
        Self {
            text: text.to_string(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl<const N: usize> From<&str> for FixedText<N> {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl<const N: usize> fmt::Display for FixedText<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl<const N: usize> Record for FixedText<N> {
    const BYTE_LENGTH: usize = N;

    fn ser(&self, writer: &mut RecordWriter) -> Result<(), SerdeErr> {
        let bytes = self.text.as_bytes();
        writer.write_bytes(bytes)?;
        for _ in bytes.len()..N {
            writer.write_byte(0)?;
        }
        Ok(())
    }

    fn de(reader: &mut RecordReader) -> Self {
        let mut raw = reader.read_array::<N>();
        if let Some(last) = raw.last_mut() {
            *last = 0;
        }
        let end = raw.iter().position(|byte| *byte == 0).unwrap_or(N);
        Self {
            text: String::from_utf8_lossy(&raw[..end]).into_owned(),
        }
    }
}
