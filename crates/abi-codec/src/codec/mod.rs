//! Binary encoding/decoding.
//!
//! [`BinaryCodec`] is the single entry and re-entry point: it matches on the
//! type category and hands off to the list, option, struct or primitive
//! codec. Composite codecs receive the dispatcher as a parameter and call
//! back into [`BinaryCodec::read_nested`] / [`BinaryCodec::write_nested`] for
//! their children, so decoding is a plain recursive descent over the type
//! tree.

mod list;
mod option;
mod primitive;
pub mod primitives;
mod structs;


pub use primitives::{Reader, Writer};

use crate::error::{DecodeError, EncodeError};
use crate::limits::Constraints;
use crate::model::{Type, TypedValue};

/// Encodes and decodes typed values under a fixed set of [`Constraints`].
///
/// The codec holds no mutable state and can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct BinaryCodec {
    constraints: Constraints,
}

impl BinaryCodec {
    /// Creates a codec with the default constraints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a codec with custom constraints.
    pub fn with_constraints(constraints: Constraints) -> Self {
        Self { constraints }
    }

    /// Returns the constraints applied while decoding.
    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    // =========================================================================
    // PUBLIC ENTRY POINTS
    // =========================================================================

    /// Decodes a value that occupies the whole buffer.
    pub fn decode_top_level(&self, buffer: &[u8], ty: &Type) -> Result<TypedValue, DecodeError> {
        let mut reader = Reader::new(buffer);
        self.read_top_level(&mut reader, ty)
    }

    /// Decodes a nested value from the front of the buffer, returning it with
    /// the number of bytes consumed.
    pub fn decode_nested(&self, buffer: &[u8], ty: &Type) -> Result<(TypedValue, usize), DecodeError> {
        let mut reader = Reader::new(buffer);
        let value = self.read_nested(&mut reader, ty)?;
        Ok((value, reader.position()))
    }

    /// Encodes a value in nested form.
    ///
    /// Fails with [`EncodeError::NotEncodable`] unless the value's type has
    /// fixed cardinality.
    pub fn encode_nested(&self, value: &TypedValue) -> Result<Vec<u8>, EncodeError> {
        let width = check_encodable(value)?;
        let mut writer = Writer::with_capacity(width);
        self.write_nested(&mut writer, value)?;
        Ok(writer.into_bytes())
    }

    /// Encodes a value in top-level form.
    ///
    /// Fails with [`EncodeError::NotEncodable`] unless the value's type has
    /// fixed cardinality.
    pub fn encode_top_level(&self, value: &TypedValue) -> Result<Vec<u8>, EncodeError> {
        let width = check_encodable(value)?;
        let mut writer = Writer::with_capacity(width);
        self.write_top_level(&mut writer, value)?;
        Ok(writer.into_bytes())
    }

    // =========================================================================
    // STREAMING API
    // =========================================================================

    /// Decodes a value that owns everything left in the reader.
    pub fn read_top_level(&self, reader: &mut Reader<'_>, ty: &Type) -> Result<TypedValue, DecodeError> {
        self.constraints.check_buffer_length(reader.remaining())?;
        tracing::trace!(%ty, len = reader.remaining_len(), "decoding top-level value");

        let value = match ty {
            Type::Primitive(kind) => TypedValue::Primitive(primitive::decode_top_level(reader, *kind)?),
            Type::Option(inner) => TypedValue::Option(option::decode_top_level(self, reader, inner)?),
            Type::List(element) => TypedValue::List(list::decode_top_level(self, reader, element)?),
            Type::Struct(st) => TypedValue::Struct(structs::decode_top_level(self, reader, st)?),
        };
        Ok(value)
    }

    /// Decodes a nested value, advancing the reader past it.
    pub fn read_nested(&self, reader: &mut Reader<'_>, ty: &Type) -> Result<TypedValue, DecodeError> {
        self.constraints.check_buffer_length(reader.remaining())?;

        let value = match ty {
            Type::Primitive(kind) => TypedValue::Primitive(primitive::decode_nested(reader, *kind)?),
            Type::Option(inner) => TypedValue::Option(option::decode_nested(self, reader, inner)?),
            Type::List(element) => TypedValue::List(list::decode_nested(self, reader, element)?),
            Type::Struct(st) => TypedValue::Struct(structs::decode_nested(self, reader, st)?),
        };
        Ok(value)
    }

    /// Appends the nested form of a value.
    ///
    /// Unlike [`encode_nested`](Self::encode_nested) this does not require
    /// fixed cardinality: the caller owns the surrounding framing.
    pub fn write_nested(&self, writer: &mut Writer, value: &TypedValue) -> Result<(), EncodeError> {
        match value {
            TypedValue::Primitive(p) => primitive::encode_nested(writer, p),
            TypedValue::Option(o) => option::encode_nested(self, writer, o),
            TypedValue::List(l) => list::encode_nested(self, writer, l),
            TypedValue::Struct(s) => structs::encode_nested(self, writer, s),
        }
    }

    /// Appends the top-level form of a value.
    pub fn write_top_level(&self, writer: &mut Writer, value: &TypedValue) -> Result<(), EncodeError> {
        match value {
            TypedValue::Primitive(p) => primitive::encode_top_level(writer, p),
            TypedValue::Option(o) => option::encode_top_level(self, writer, o),
            TypedValue::List(l) => list::encode_top_level(self, writer, l),
            TypedValue::Struct(s) => structs::encode_top_level(self, writer, s),
        }
    }
}

/// Returns the declared width, or `NotEncodable` for variable cardinality.
fn check_encodable(value: &TypedValue) -> Result<usize, EncodeError> {
    let ty = value.value_type();
    match ty.cardinality().byte_width() {
        Some(width) => Ok(width),
        None => {
            tracing::debug!(%ty, "refusing to encode variable-cardinality value");
            Err(EncodeError::NotEncodable {
                type_name: ty.to_string(),
            })
        }
    }
}
