use crate::{error::SerdeErr, record_reader::RecordReader, record_writer::RecordWriter};

/// The value an erased non-volatile cell reads back as.
pub const ERASED_BYTE: u8 = 0xFF;

/// A value with a fixed on-disk width.
///
/// `ser` must write exactly `BYTE_LENGTH` bytes. `de` never fails: whatever bytes
/// are present (including erased cells past the end of the medium) decode to
/// some value of `Self`.
pub trait Record: Sized {
    const BYTE_LENGTH: usize;

    fn ser(&self, writer: &mut RecordWriter) -> Result<(), SerdeErr>;

    fn de(reader: &mut RecordReader) -> Self;

    /// Encode into a freshly allocated buffer of exactly `BYTE_LENGTH` bytes
    fn to_bytes(&self) -> Result<Vec<u8>, SerdeErr> {
        let mut writer = RecordWriter::new(Self::BYTE_LENGTH);
        self.ser(&mut writer)?;
        Ok(writer.to_bytes())
    }

    fn from_bytes(bytes: &[u8]) -> Self {
        let mut reader = RecordReader::new(bytes);
        Self::de(&mut reader)
    }
}
