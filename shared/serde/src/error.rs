use thiserror::Error;

/// Errors that can occur while encoding a fixed-width record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerdeErr {
    /// A record tried to write more bytes than its declared width
    #[error("Record overflowed its fixed width: attempted to write byte {attempted} of a {limit}-byte record")]
    Overflow { attempted: usize, limit: usize },
}
