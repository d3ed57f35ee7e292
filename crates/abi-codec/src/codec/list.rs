//! List codec.
//!
//! Nested: `u32` big-endian element count, then each element's nested form.
//! Top level: the element encodings only, running to the end of the buffer.

use crate::codec::BinaryCodec;
use crate::codec::primitives::{Reader, Writer};
use crate::error::{DecodeError, EncodeError};
use crate::model::{List, Type};

// =============================================================================
// DECODING
// =============================================================================

/// Decodes elements back-to-back until the reader is exhausted.
pub(crate) fn decode_top_level(
    codec: &BinaryCodec,
    reader: &mut Reader<'_>,
    element_type: &Type,
) -> Result<List, DecodeError> {
    let mut items = Vec::new();
    while !reader.is_empty() {
        // Also bounds zero-width elements, which never exhaust the reader
        codec.constraints().check_list_length(items.len() + 1)?;
        items.push(codec.read_nested(reader, element_type)?);
    }
    Ok(List::from_decoded(element_type.clone(), items))
}

/// Decodes a count-prefixed list.
pub(crate) fn decode_nested(
    codec: &BinaryCodec,
    reader: &mut Reader<'_>,
    element_type: &Type,
) -> Result<List, DecodeError> {
    let count = reader.read_u32_be("list.count")? as usize;
    codec.constraints().check_list_length(count)?;

    let mut items = Vec::with_capacity(count.min(reader.remaining_len()));
    for _ in 0..count {
        items.push(codec.read_nested(reader, element_type)?);
    }
    Ok(List::from_decoded(element_type.clone(), items))
}

// =============================================================================
// ENCODING
// =============================================================================

pub(crate) fn encode_top_level(
    codec: &BinaryCodec,
    writer: &mut Writer,
    list: &List,
) -> Result<(), EncodeError> {
    for item in list.items() {
        codec.write_nested(writer, item)?;
    }
    Ok(())
}

pub(crate) fn encode_nested(
    codec: &BinaryCodec,
    writer: &mut Writer,
    list: &List,
) -> Result<(), EncodeError> {
    writer.write_length(list.len(), "list.count")?;
    encode_top_level(codec, writer, list)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::limits::Constraints;
    use crate::model::{PrimitiveKind, StructType, TypedValue};

    fn bools() -> List {
        List::new(
            PrimitiveKind::Bool.into(),
            vec![true.into(), false.into(), true.into()],
        )
        .unwrap()
    }

    #[test]
    fn test_nested_bool_list() {
        let codec = BinaryCodec::new();
        let mut writer = Writer::new();
        encode_nested(&codec, &mut writer, &bools()).unwrap();
        assert_eq!(writer.as_bytes(), &[0u8, 0, 0, 3, 1, 0, 1]);

        let (value, consumed) = codec
            .decode_nested(writer.as_bytes(), &Type::list(PrimitiveKind::Bool.into()))
            .unwrap();
        assert_eq!(value, TypedValue::List(bools()));
        assert_eq!(consumed, 7);
    }

    #[test]
    fn test_top_level_has_no_prefix() {
        let codec = BinaryCodec::new();
        let mut writer = Writer::new();
        encode_top_level(&codec, &mut writer, &bools()).unwrap();
        assert_eq!(writer.as_bytes(), &[1u8, 0, 1]);

        let decoded = codec
            .decode_top_level(writer.as_bytes(), &Type::list(PrimitiveKind::Bool.into()))
            .unwrap();
        assert_eq!(decoded, TypedValue::List(bools()));
    }

    #[test]
    fn test_top_level_elements_are_nested() {
        let codec = BinaryCodec::new();
        let ty = Type::list(PrimitiveKind::U16.into());
        let decoded = codec.decode_top_level(&[0x00, 0x01, 0x00, 0x02], &ty).unwrap();
        let items: Vec<u64> = decoded
            .as_list()
            .unwrap()
            .items()
            .iter()
            .filter_map(TypedValue::as_u64)
            .collect();
        assert_eq!(items, vec![1, 2]);

        // A dangling half element is malformed
        assert_eq!(
            codec.decode_top_level(&[0x00, 0x01, 0x00], &ty),
            Err(DecodeError::UnexpectedEof { context: "u16" })
        );
    }

    #[test]
    fn test_count_exceeds_limit() {
        let codec = BinaryCodec::with_constraints(Constraints::new().with_max_list_length(2));
        let ty = Type::list(PrimitiveKind::U8.into());
        let result = codec.decode_nested(&[0, 0, 0, 3, 1, 2, 3], &ty);
        assert_eq!(result, Err(DecodeError::ListTooLarge { len: 3, max: 2 }));
    }

    #[test]
    fn test_count_exceeds_remaining_bytes() {
        let codec = BinaryCodec::new();
        let ty = Type::list(PrimitiveKind::U8.into());
        let result = codec.decode_nested(&[0, 0, 0, 5, 1, 2], &ty);
        assert_eq!(result, Err(DecodeError::UnexpectedEof { context: "u8" }));
    }

    #[test]
    fn test_zero_width_elements_are_bounded() {
        let codec = BinaryCodec::with_constraints(Constraints::new().with_max_list_length(4));
        let unit = StructType::new("Unit", vec![]).unwrap();
        let result = codec.decode_top_level(&[0xAA], &Type::list(unit.into()));
        assert_eq!(result, Err(DecodeError::ListTooLarge { len: 5, max: 4 }));
    }

    #[test]
    fn test_nested_list_of_lists() {
        let codec = BinaryCodec::new();
        let inner_ty = Type::list(PrimitiveKind::U8.into());
        let inner = List::new(PrimitiveKind::U8.into(), vec![9u8.into()]).unwrap();
        let outer = List::new(inner_ty.clone(), vec![inner.clone().into(), inner.into()]).unwrap();

        let mut writer = Writer::new();
        encode_nested(&codec, &mut writer, &outer).unwrap();
        assert_eq!(
            writer.as_bytes(),
            &[0u8, 0, 0, 2, 0, 0, 0, 1, 9, 0, 0, 0, 1, 9]
        );

        let (decoded, consumed) = codec.decode_nested(writer.as_bytes(), &Type::list(inner_ty)).unwrap();
        assert_eq!(decoded, TypedValue::List(outer));
        assert_eq!(consumed, 14);
    }
}
