//! Wire constants and decoding constraints.
//!
//! Every decode entry point checks the input against a [`Constraints`]
//! instance before touching the buffer, and every list count read from the
//! wire is checked before any element storage is allocated.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::DecodeError;

/// Default maximum length of a buffer accepted by the decoder.
pub const DEFAULT_MAX_BUFFER_LENGTH: usize = 4096;

/// Default maximum element count of a decoded list.
pub const DEFAULT_MAX_LIST_LENGTH: usize = 1024;

/// Size of the big-endian length prefix used by nested lists and
/// variable-width primitives.
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// Size of an account address.
pub const ADDRESS_LEN: usize = 32;

/// Maximum nesting depth of a parsed type expression.
pub const MAX_TYPE_DEPTH: usize = 64;

/// Option tag for an absent value.
pub const OPTION_ABSENT: u8 = 0x00;

/// Option tag for a present value.
pub const OPTION_PRESENT: u8 = 0x01;

/// Size bounds checked before structural parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Constraints {
    /// Maximum total length of an input buffer, in bytes.
    pub max_buffer_length: usize,
    /// Maximum element count of a nested list.
    pub max_list_length: usize,
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            max_buffer_length: DEFAULT_MAX_BUFFER_LENGTH,
            max_list_length: DEFAULT_MAX_LIST_LENGTH,
        }
    }
}

impl Constraints {
    /// Creates constraints with the default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the maximum buffer length.
    pub fn with_max_buffer_length(mut self, max: usize) -> Self {
        self.max_buffer_length = max;
        self
    }

    /// Overrides the maximum list length.
    pub fn with_max_list_length(mut self, max: usize) -> Self {
        self.max_list_length = max;
        self
    }

    /// Fails with [`DecodeError::BufferTooLarge`] if the buffer exceeds the limit.
    pub fn check_buffer_length(&self, buffer: &[u8]) -> Result<(), DecodeError> {
        if buffer.len() > self.max_buffer_length {
            tracing::debug!(
                len = buffer.len(),
                max = self.max_buffer_length,
                "rejecting oversized buffer"
            );
            return Err(DecodeError::BufferTooLarge {
                len: buffer.len(),
                max: self.max_buffer_length,
            });
        }
        Ok(())
    }

    /// Fails with [`DecodeError::ListTooLarge`] if `len` exceeds the limit.
    ///
    /// Guards against corrupted or hostile count prefixes that would
    /// otherwise drive unbounded allocation or iteration.
    pub fn check_list_length(&self, len: usize) -> Result<(), DecodeError> {
        if len > self.max_list_length {
            tracing::debug!(len, max = self.max_list_length, "rejecting oversized list");
            return Err(DecodeError::ListTooLarge {
                len,
                max: self.max_list_length,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = Constraints::new();
        assert_eq!(c.max_buffer_length, 4096);
        assert_eq!(c.max_list_length, 1024);
    }

    #[test]
    fn test_buffer_length_boundary() {
        let c = Constraints::new().with_max_buffer_length(8);
        assert!(c.check_buffer_length(&[0u8; 8]).is_ok());
        assert_eq!(
            c.check_buffer_length(&[0u8; 9]),
            Err(DecodeError::BufferTooLarge { len: 9, max: 8 })
        );
    }

    #[test]
    fn test_list_length_boundary() {
        let c = Constraints::new().with_max_list_length(3);
        assert!(c.check_list_length(0).is_ok());
        assert!(c.check_list_length(3).is_ok());
        assert_eq!(
            c.check_list_length(4),
            Err(DecodeError::ListTooLarge { len: 4, max: 3 })
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_constraints_from_json() {
        let c: Constraints = serde_json::from_str(r#"{"max_list_length": 16}"#).unwrap();
        assert_eq!(c.max_list_length, 16);
        assert_eq!(c.max_buffer_length, DEFAULT_MAX_BUFFER_LENGTH);
    }
}
