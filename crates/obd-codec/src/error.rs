//! OBD-II Decode Error Types

use thiserror::Error;

/// Errors that can occur while decoding an OBD-II payload
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    /// Units-and-scaling id has no registry entry
    #[error("Unknown units and scaling id 0x{0:02X}")]
    UnknownScaleId(u8),

    /// Monitor test id has no reference entry
    #[error("Unknown monitor test id 0x{0:02X}")]
    UnknownTestId(u8),

    /// A flag field needed exactly one set bit
    #[error("{field} expected exactly one set bit, found {set_bits}")]
    InvalidBitPattern { field: &'static str, set_bits: usize },

    /// Bytes are not valid text
    #[error("Malformed text: {0}")]
    MalformedText(String),

    /// Record block length is not a multiple of the record size
    #[error("Dropped {dropped} trailing bytes (records are {record_size} bytes)")]
    TruncatedRecordBlock { dropped: usize, record_size: usize },

    /// Categorical index past the end of its table
    #[error("Index {index} out of range for {table} (length {len})")]
    IndexOutOfRange {
        table: &'static str,
        index: usize,
        len: usize,
    },

    /// All-zero DTC pair
    #[error("No trouble code present")]
    NoCode,

    /// Payload shorter than the decoder requires
    #[error("{decoder} payload too short: expected {expected} bytes, got {actual}")]
    PayloadTooShort {
        decoder: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Integer span wider than 64 bits
    #[error("{decoder} payload too long: at most {max} bytes, got {actual}")]
    PayloadTooLong {
        decoder: &'static str,
        max: usize,
        actual: usize,
    },
}

impl DecodeError {
    /// Whether this error fails the field it was raised for.
    ///
    /// Advisory kinds are reported alongside a successful value instead.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            DecodeError::UnknownTestId(_)
                | DecodeError::TruncatedRecordBlock { .. }
                | DecodeError::NoCode
        )
    }
}

/// Result type for decode operations
pub type CodecResult<T> = Result<T, DecodeError>;

/// Fail with [`DecodeError::PayloadTooShort`] unless `bytes` holds at least `expected` bytes
pub(crate) fn require(decoder: &'static str, bytes: &[u8], expected: usize) -> CodecResult<()> {
    if bytes.len() < expected {
        Err(DecodeError::PayloadTooShort {
            decoder,
            expected,
            actual: bytes.len(),
        })
    } else {
        Ok(())
    }
}

/// Fail with [`DecodeError::PayloadTooLong`] when `bytes` holds more than `max` bytes
pub(crate) fn require_at_most(decoder: &'static str, bytes: &[u8], max: usize) -> CodecResult<()> {
    if bytes.len() > max {
        Err(DecodeError::PayloadTooLong {
            decoder,
            max,
            actual: bytes.len(),
        })
    } else {
        Ok(())
    }
}
