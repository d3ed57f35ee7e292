//! Option codec.
//!
//! One tag byte (`0x00` absent, `0x01` present), followed by the payload's
//! nested form when present. Both levels share this layout.

use crate::codec::BinaryCodec;
use crate::codec::primitives::{Reader, Writer};
use crate::error::{DecodeError, EncodeError};
use crate::limits::{OPTION_ABSENT, OPTION_PRESENT};
use crate::model::{OptionValue, Type};

// =============================================================================
// DECODING
// =============================================================================

/// Decodes an option that owns the rest of the reader.
pub(crate) fn decode_top_level(
    codec: &BinaryCodec,
    reader: &mut Reader<'_>,
    inner_type: &Type,
) -> Result<OptionValue, DecodeError> {
    // Legacy encoders emit an absent option as an empty buffer
    if reader.is_empty() {
        return Ok(OptionValue::none(inner_type.clone()));
    }
    let value = decode_nested(codec, reader, inner_type)?;
    reader.expect_end("option")?;
    Ok(value)
}

pub(crate) fn decode_nested(
    codec: &BinaryCodec,
    reader: &mut Reader<'_>,
    inner_type: &Type,
) -> Result<OptionValue, DecodeError> {
    match reader.read_byte("option.tag")? {
        OPTION_ABSENT => Ok(OptionValue::none(inner_type.clone())),
        OPTION_PRESENT => {
            let payload = codec.read_nested(reader, inner_type)?;
            Ok(OptionValue::some(payload))
        }
        tag => Err(DecodeError::InvalidOptionTag { tag }),
    }
}

// =============================================================================
// ENCODING
// =============================================================================

pub(crate) fn encode_nested(
    codec: &BinaryCodec,
    writer: &mut Writer,
    option: &OptionValue,
) -> Result<(), EncodeError> {
    match option.value() {
        None => writer.write_byte(OPTION_ABSENT),
        Some(payload) => {
            writer.write_byte(OPTION_PRESENT);
            codec.write_nested(writer, payload)?;
        }
    }
    Ok(())
}

pub(crate) fn encode_top_level(
    codec: &BinaryCodec,
    writer: &mut Writer,
    option: &OptionValue,
) -> Result<(), EncodeError> {
    encode_nested(codec, writer, option)
}
