//! Struct codec.
//!
//! Fields are written in declaration order, each in nested form, with no
//! delimiter and no overall length. Top-level and nested encodings are
//! byte-identical.

use crate::codec::BinaryCodec;
use crate::codec::primitives::{Reader, Writer};
use crate::error::{DecodeError, EncodeError};
use crate::model::{Struct, StructType};

/// Decodes a struct that owns the rest of the reader.
pub(crate) fn decode_top_level(
    codec: &BinaryCodec,
    reader: &mut Reader<'_>,
    struct_type: &StructType,
) -> Result<Struct, DecodeError> {
    let value = decode_nested(codec, reader, struct_type)?;
    reader.expect_end("struct")?;
    Ok(value)
}

pub(crate) fn decode_nested(
    codec: &BinaryCodec,
    reader: &mut Reader<'_>,
    struct_type: &StructType,
) -> Result<Struct, DecodeError> {
    let mut fields = Vec::with_capacity(struct_type.fields().len());
    for definition in struct_type.fields() {
        fields.push(codec.read_nested(reader, &definition.field_type)?);
    }
    Ok(Struct::from_decoded(struct_type.clone(), fields))
}

pub(crate) fn encode_nested(
    codec: &BinaryCodec,
    writer: &mut Writer,
    value: &Struct,
) -> Result<(), EncodeError> {
    for field in value.fields() {
        codec.write_nested(writer, field)?;
    }
    Ok(())
}

pub(crate) fn encode_top_level(
    codec: &BinaryCodec,
    writer: &mut Writer,
    value: &Struct,
) -> Result<(), EncodeError> {
    encode_nested(codec, writer, value)
}
