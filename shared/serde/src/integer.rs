use crate::{
    error::SerdeErr, record::Record, record_reader::RecordReader, record_writer::RecordWriter,
};

// Integers are stored little-endian at their natural width.

impl Record for u8 {
    const BYTE_LENGTH: usize = 1;

    fn ser(&self, writer: &mut RecordWriter) -> Result<(), SerdeErr> {
        writer.write_byte(*self)
    }

    fn de(reader: &mut RecordReader) -> Self {
        reader.read_byte()
    }
}

impl Record for u16 {
    const BYTE_LENGTH: usize = 2;

    fn ser(&self, writer: &mut RecordWriter) -> Result<(), SerdeErr> {
        writer.write_bytes(&self.to_le_bytes())
    }

    fn de(reader: &mut RecordReader) -> Self {
        u16::from_le_bytes(reader.read_array::<2>())
    }
}

impl Record for u32 {
    const BYTE_LENGTH: usize = 4;

    fn ser(&self, writer: &mut RecordWriter) -> Result<(), SerdeErr> {
        writer.write_bytes(&self.to_le_bytes())
    }

    fn de(reader: &mut RecordReader) -> Self {
        u32::from_le_bytes(reader.read_array::<4>())
    }
}
