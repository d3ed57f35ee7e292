//! Primitive codec.
//!
//! Fixed-width numbers are big-endian (two's complement when signed). The
//! nested form is padded to the declared width; the top-level form is
//! minimal, so zero encodes as an empty buffer. Booleans are one byte in both
//! forms. Variable-width kinds are raw at top level and carry a 4-byte length
//! prefix when nested.

use crate::codec::primitives::{Reader, Writer};
use crate::error::{DecodeError, EncodeError};
use crate::limits::ADDRESS_LEN;
use crate::model::value::{trim_signed, trim_unsigned};
use crate::model::{Address, BigInt, BigUint, PrimitiveKind, PrimitiveValue};

// =============================================================================
// DECODING
// =============================================================================

/// Decodes a primitive from everything left in the reader.
pub(crate) fn decode_top_level(
    reader: &mut Reader<'_>,
    kind: PrimitiveKind,
) -> Result<PrimitiveValue, DecodeError> {
    let bytes = reader.read_rest();
    let value = match kind {
        PrimitiveKind::Bool => match bytes {
            // Legacy encoders emit `false` as an empty buffer
            [] => PrimitiveValue::Bool(false),
            [byte] => PrimitiveValue::Bool(decode_bool(*byte)?),
            _ => {
                return Err(DecodeError::TrailingBytes {
                    context: "bool",
                    count: bytes.len() - 1,
                });
            }
        },
        PrimitiveKind::U8 => PrimitiveValue::U8(unsigned_top_level(bytes, kind)? as u8),
        PrimitiveKind::U16 => PrimitiveValue::U16(unsigned_top_level(bytes, kind)? as u16),
        PrimitiveKind::U32 => PrimitiveValue::U32(unsigned_top_level(bytes, kind)? as u32),
        PrimitiveKind::U64 => PrimitiveValue::U64(unsigned_top_level(bytes, kind)?),
        PrimitiveKind::I8 => PrimitiveValue::I8(signed_top_level(bytes, kind)? as i8),
        PrimitiveKind::I16 => PrimitiveValue::I16(signed_top_level(bytes, kind)? as i16),
        PrimitiveKind::I32 => PrimitiveValue::I32(signed_top_level(bytes, kind)? as i32),
        PrimitiveKind::I64 => PrimitiveValue::I64(signed_top_level(bytes, kind)?),
        PrimitiveKind::BigUint => PrimitiveValue::BigUint(BigUint::from_be_bytes(bytes)),
        PrimitiveKind::BigInt => PrimitiveValue::BigInt(BigInt::from_signed_be_bytes(bytes)),
        PrimitiveKind::Bytes => PrimitiveValue::Bytes(bytes.to_vec()),
        PrimitiveKind::Address => {
            if bytes.len() < ADDRESS_LEN {
                return Err(DecodeError::UnexpectedEof { context: "Address" });
            }
            if bytes.len() > ADDRESS_LEN {
                return Err(DecodeError::TrailingBytes {
                    context: "Address",
                    count: bytes.len() - ADDRESS_LEN,
                });
            }
            PrimitiveValue::Address(address_from_slice(bytes))
        }
    };
    Ok(value)
}

/// Decodes a primitive in nested form, advancing the reader by its width.
pub(crate) fn decode_nested(
    reader: &mut Reader<'_>,
    kind: PrimitiveKind,
) -> Result<PrimitiveValue, DecodeError> {
    let value = match kind {
        PrimitiveKind::Bool => PrimitiveValue::Bool(decode_bool(reader.read_byte("bool")?)?),
        PrimitiveKind::U8 => PrimitiveValue::U8(read_unsigned(reader, kind)? as u8),
        PrimitiveKind::U16 => PrimitiveValue::U16(read_unsigned(reader, kind)? as u16),
        PrimitiveKind::U32 => PrimitiveValue::U32(read_unsigned(reader, kind)? as u32),
        PrimitiveKind::U64 => PrimitiveValue::U64(read_unsigned(reader, kind)?),
        PrimitiveKind::I8 => PrimitiveValue::I8(read_signed(reader, kind)? as i8),
        PrimitiveKind::I16 => PrimitiveValue::I16(read_signed(reader, kind)? as i16),
        PrimitiveKind::I32 => PrimitiveValue::I32(read_signed(reader, kind)? as i32),
        PrimitiveKind::I64 => PrimitiveValue::I64(read_signed(reader, kind)?),
        PrimitiveKind::BigUint => {
            PrimitiveValue::BigUint(BigUint::from_be_bytes(reader.read_length_prefixed("BigUint")?))
        }
        PrimitiveKind::BigInt => PrimitiveValue::BigInt(BigInt::from_signed_be_bytes(
            reader.read_length_prefixed("BigInt")?,
        )),
        PrimitiveKind::Bytes => PrimitiveValue::Bytes(reader.read_length_prefixed("bytes")?.to_vec()),
        PrimitiveKind::Address => {
            PrimitiveValue::Address(address_from_slice(reader.read_bytes(ADDRESS_LEN, "Address")?))
        }
    };
    Ok(value)
}

fn decode_bool(byte: u8) -> Result<bool, DecodeError> {
    match byte {
        0x00 => Ok(false),
        0x01 => Ok(true),
        _ => Err(DecodeError::InvalidBool { value: byte }),
    }
}

fn address_from_slice(bytes: &[u8]) -> Address {
    let mut out = [0u8; ADDRESS_LEN];
    out.copy_from_slice(bytes);
    Address(out)
}

/// Declared width of a fixed-width numeric kind.
fn width_of(kind: PrimitiveKind) -> usize {
    kind.fixed_width().unwrap_or(0)
}

fn read_unsigned(reader: &mut Reader<'_>, kind: PrimitiveKind) -> Result<u64, DecodeError> {
    let bytes = reader.read_bytes(width_of(kind), kind.name())?;
    Ok(fold_unsigned(bytes))
}

fn read_signed(reader: &mut Reader<'_>, kind: PrimitiveKind) -> Result<i64, DecodeError> {
    let bytes = reader.read_bytes(width_of(kind), kind.name())?;
    Ok(sign_extend(bytes))
}

/// Reads a minimal (or zero-padded) big-endian magnitude.
fn unsigned_top_level(bytes: &[u8], kind: PrimitiveKind) -> Result<u64, DecodeError> {
    let magnitude = trim_unsigned(bytes);
    if magnitude.len() > width_of(kind) {
        return Err(DecodeError::IntegerOverflow {
            kind: kind.name(),
            len: bytes.len(),
        });
    }
    Ok(fold_unsigned(magnitude))
}

/// Reads a two's complement value sign-extended from its own length.
fn signed_top_level(bytes: &[u8], kind: PrimitiveKind) -> Result<i64, DecodeError> {
    let minimal = trim_signed(bytes);
    if minimal.len() > width_of(kind) {
        return Err(DecodeError::IntegerOverflow {
            kind: kind.name(),
            len: bytes.len(),
        });
    }
    Ok(sign_extend(minimal))
}

fn fold_unsigned(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0u64, |acc, &b| (acc << 8) | b as u64)
}

/// Sign-extends up to 8 bytes of big-endian two's complement to `i64`.
fn sign_extend(bytes: &[u8]) -> i64 {
    let negative = bytes.first().is_some_and(|b| b & 0x80 != 0);
    let mut buf = if negative { [0xFF; 8] } else { [0x00; 8] };
    buf[8 - bytes.len()..].copy_from_slice(bytes);
    i64::from_be_bytes(buf)
}

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes a primitive in top-level form (minimal, unprefixed).
pub(crate) fn encode_top_level(writer: &mut Writer, value: &PrimitiveValue) -> Result<(), EncodeError> {
    match value {
        PrimitiveValue::Bool(v) => writer.write_byte(*v as u8),
        PrimitiveValue::U8(v) => writer.write_bytes(trim_unsigned(&v.to_be_bytes())),
        PrimitiveValue::U16(v) => writer.write_bytes(trim_unsigned(&v.to_be_bytes())),
        PrimitiveValue::U32(v) => writer.write_bytes(trim_unsigned(&v.to_be_bytes())),
        PrimitiveValue::U64(v) => writer.write_bytes(trim_unsigned(&v.to_be_bytes())),
        PrimitiveValue::I8(v) => writer.write_bytes(trim_signed(&v.to_be_bytes())),
        PrimitiveValue::I16(v) => writer.write_bytes(trim_signed(&v.to_be_bytes())),
        PrimitiveValue::I32(v) => writer.write_bytes(trim_signed(&v.to_be_bytes())),
        PrimitiveValue::I64(v) => writer.write_bytes(trim_signed(&v.to_be_bytes())),
        PrimitiveValue::BigUint(v) => writer.write_bytes(v.as_be_bytes()),
        PrimitiveValue::BigInt(v) => writer.write_bytes(v.as_signed_be_bytes()),
        PrimitiveValue::Bytes(v) => writer.write_bytes(v),
        PrimitiveValue::Address(v) => writer.write_bytes(v.as_bytes()),
    }
    Ok(())
}

/// Encodes a primitive in nested form (declared width or length-prefixed).
pub(crate) fn encode_nested(writer: &mut Writer, value: &PrimitiveValue) -> Result<(), EncodeError> {
    match value {
        PrimitiveValue::Bool(v) => writer.write_byte(*v as u8),
        PrimitiveValue::U8(v) => writer.write_bytes(&v.to_be_bytes()),
        PrimitiveValue::U16(v) => writer.write_bytes(&v.to_be_bytes()),
        PrimitiveValue::U32(v) => writer.write_bytes(&v.to_be_bytes()),
        PrimitiveValue::U64(v) => writer.write_bytes(&v.to_be_bytes()),
        PrimitiveValue::I8(v) => writer.write_bytes(&v.to_be_bytes()),
        PrimitiveValue::I16(v) => writer.write_bytes(&v.to_be_bytes()),
        PrimitiveValue::I32(v) => writer.write_bytes(&v.to_be_bytes()),
        PrimitiveValue::I64(v) => writer.write_bytes(&v.to_be_bytes()),
        PrimitiveValue::BigUint(v) => writer.write_length_prefixed(v.as_be_bytes(), "BigUint")?,
        PrimitiveValue::BigInt(v) => writer.write_length_prefixed(v.as_signed_be_bytes(), "BigInt")?,
        PrimitiveValue::Bytes(v) => writer.write_length_prefixed(v, "bytes")?,
        PrimitiveValue::Address(v) => writer.write_bytes(v.as_bytes()),
    }
    Ok(())
}
