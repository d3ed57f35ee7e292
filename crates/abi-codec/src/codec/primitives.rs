//! Byte cursor and byte sink used by every codec.
//!
//! Implements the big-endian length prefix shared by nested lists and
//! variable-width primitives.

use crate::error::{DecodeError, EncodeError};
use crate::limits::LENGTH_PREFIX_SIZE;

// =============================================================================
// DECODING
// =============================================================================

/// Reader for decoding binary data.
///
/// Wraps a byte slice and advances a cursor local to the decode call. Every
/// read is bounds-checked; the reader never reads past the end of its slice.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader from a byte slice.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the current position in the data.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the remaining bytes.
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    /// Returns the number of remaining bytes.
    pub fn remaining_len(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Returns true if all data has been consumed.
    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Reads a single byte.
    #[inline]
    pub fn read_byte(&mut self, context: &'static str) -> Result<u8, DecodeError> {
        if self.pos >= self.data.len() {
            return Err(DecodeError::UnexpectedEof { context });
        }
        let byte = self.data[self.pos];
        self.pos += 1;
        Ok(byte)
    }

    /// Reads exactly n bytes.
    #[inline]
    pub fn read_bytes(&mut self, n: usize, context: &'static str) -> Result<&'a [u8], DecodeError> {
        if n > self.remaining_len() {
            return Err(DecodeError::UnexpectedEof { context });
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    /// Consumes and returns everything left.
    pub fn read_rest(&mut self) -> &'a [u8] {
        let rest = self.remaining();
        self.pos = self.data.len();
        rest
    }

    /// Reads a 4-byte big-endian unsigned integer.
    #[inline]
    pub fn read_u32_be(&mut self, context: &'static str) -> Result<u32, DecodeError> {
        let b = self.read_bytes(LENGTH_PREFIX_SIZE, context)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// Reads a 4-byte length prefix followed by that many bytes.
    ///
    /// A prefix claiming more bytes than remain fails with
    /// [`DecodeError::UnexpectedEof`].
    pub fn read_length_prefixed(&mut self, context: &'static str) -> Result<&'a [u8], DecodeError> {
        let len = self.read_u32_be(context)? as usize;
        self.read_bytes(len, context)
    }

    /// Fails with [`DecodeError::TrailingBytes`] unless all data was consumed.
    pub fn expect_end(&self, context: &'static str) -> Result<(), DecodeError> {
        if !self.is_empty() {
            return Err(DecodeError::TrailingBytes {
                context,
                count: self.remaining_len(),
            });
        }
        Ok(())
    }
}

// =============================================================================
// ENCODING
// =============================================================================

/// Writer for encoding binary data.
#[derive(Debug, Clone, Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    /// Creates a new writer.
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Creates a new writer with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Returns the written bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Returns a reference to the written bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Returns the number of bytes written.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if no bytes have been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Writes a single byte.
    #[inline]
    pub fn write_byte(&mut self, byte: u8) {
        self.buf.push(byte);
    }

    /// Writes raw bytes.
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Writes a 4-byte big-endian length or count prefix.
    pub fn write_length(&mut self, len: usize, field: &'static str) -> Result<(), EncodeError> {
        let len32 = u32::try_from(len).map_err(|_| EncodeError::LengthExceedsLimit {
            field,
            len,
            max: u32::MAX as usize,
        })?;
        self.buf.extend_from_slice(&len32.to_be_bytes());
        Ok(())
    }

    /// Writes a 4-byte length prefix followed by the bytes.
    pub fn write_length_prefixed(&mut self, bytes: &[u8], field: &'static str) -> Result<(), EncodeError> {
        self.write_length(bytes.len(), field)?;
        self.buf.extend_from_slice(bytes);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u32_be() {
        let mut writer = Writer::new();
        writer.write_length(3, "test").unwrap();
        assert_eq!(writer.as_bytes(), &[0u8, 0, 0, 3]);

        let mut reader = Reader::new(writer.as_bytes());
        assert_eq!(reader.read_u32_be("test").unwrap(), 3);
        assert!(reader.is_empty());
    }

    #[test]
    fn test_length_prefixed_roundtrip() {
        for payload in [&b""[..], &b"a"[..], &b"hello world"[..]] {
            let mut writer = Writer::new();
            writer.write_length_prefixed(payload, "test").unwrap();
            assert_eq!(writer.len(), 4 + payload.len());

            let mut reader = Reader::new(writer.as_bytes());
            assert_eq!(reader.read_length_prefixed("test").unwrap(), payload);
            assert!(reader.is_empty());
        }
    }

    #[test]
    fn test_length_prefix_past_end() {
        // Claims 16 bytes, only 2 follow
        let data = [0, 0, 0, 16, 0xAA, 0xBB];
        let mut reader = Reader::new(&data);
        let result = reader.read_length_prefixed("bytes");
        assert_eq!(result, Err(DecodeError::UnexpectedEof { context: "bytes" }));
    }

    #[test]
    fn test_huge_length_prefix_does_not_overflow() {
        let data = [0xFF, 0xFF, 0xFF, 0xFF, 0x00];
        let mut reader = Reader::new(&data);
        assert!(matches!(
            reader.read_length_prefixed("bytes"),
            Err(DecodeError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn test_expect_end() {
        let data = [1u8, 2, 3];
        let mut reader = Reader::new(&data);
        reader.read_byte("test").unwrap();
        assert_eq!(
            reader.expect_end("struct"),
            Err(DecodeError::TrailingBytes { context: "struct", count: 2 })
        );
        assert_eq!(reader.read_rest(), &[2u8, 3]);
        assert!(reader.expect_end("struct").is_ok());
    }

    #[test]
    fn test_unexpected_eof() {
        let data = [0u8; 5];
        let mut reader = Reader::new(&data);
        let result = reader.read_bytes(10, "test");
        assert!(matches!(result, Err(DecodeError::UnexpectedEof { .. })));
        assert_eq!(reader.position(), 0);
    }
}
