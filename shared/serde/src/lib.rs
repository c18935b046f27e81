//! # Rollcall Serde
//! Fixed-width byte encoding for records that live in a flat, byte-addressable
//! non-volatile store.
//!
//! Encoding is fallible (a record may never exceed its declared width), decoding
//! is not: erased or corrupted cells always decode to *some* value, and callers
//! layer their own sanity checks on top.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod error;
mod fixed_text;
mod integer;
mod record;
mod record_reader;
mod record_writer;

pub use error::SerdeErr;
pub use fixed_text::FixedText;
pub use record::{Record, ERASED_BYTE};
pub use record_reader::RecordReader;
pub use record_writer::RecordWriter;
