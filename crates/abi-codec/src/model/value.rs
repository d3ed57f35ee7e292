//! Typed values.
//!
//! A [`TypedValue`] mirrors the [`Type`] tree: every value knows its own
//! type, owns its children, and is checked against its declared type when
//! constructed, so the codec can trust composite values without re-validating.

use std::fmt;

use crate::error::ValueError;
use crate::limits::ADDRESS_LEN;
use crate::model::types::{PrimitiveKind, StructType, Type};

/// Strips redundant leading zero bytes from a big-endian magnitude.
pub(crate) fn trim_unsigned(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    &bytes[start..]
}

/// Strips redundant sign-extension bytes from big-endian two's complement.
///
/// Zero becomes the empty slice; `-1` stays `[0xFF]`.
pub(crate) fn trim_signed(bytes: &[u8]) -> &[u8] {
    let mut start = 0;
    while start < bytes.len() {
        let first = bytes[start];
        let next_high = bytes.get(start + 1).map(|b| b & 0x80 != 0);
        let redundant = match (first, next_high) {
            (0x00, None) => true,
            (0x00, Some(false)) => true,
            (0xFF, Some(true)) => true,
            _ => false,
        };
        if !redundant {
            break;
        }
        start += 1;
    }
    &bytes[start..]
}

/// Arbitrary-precision unsigned integer, stored as a minimal big-endian
/// magnitude (zero is the empty vector).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BigUint(Vec<u8>);

impl BigUint {
    /// Creates a value from big-endian bytes, dropping leading zeros.
    pub fn from_be_bytes(bytes: &[u8]) -> Self {
        Self(trim_unsigned(bytes).to_vec())
    }

    /// Returns the minimal big-endian magnitude.
    pub fn as_be_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns true if the value is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_empty()
    }

    /// Converts to `u128` if the value fits.
    pub fn to_u128(&self) -> Option<u128> {
        if self.0.len() > 16 {
            return None;
        }
        Some(self.0.iter().fold(0u128, |acc, &b| (acc << 8) | b as u128))
    }
}

impl From<u64> for BigUint {
    fn from(v: u64) -> Self {
        Self::from_be_bytes(&v.to_be_bytes())
    }
}

impl From<u128> for BigUint {
    fn from(v: u128) -> Self {
        Self::from_be_bytes(&v.to_be_bytes())
    }
}

/// Arbitrary-precision signed integer, stored as minimal big-endian two's
/// complement (zero is the empty vector).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BigInt(Vec<u8>);

impl BigInt {
    /// Creates a value from big-endian two's complement bytes, dropping
    /// redundant sign bytes.
    pub fn from_signed_be_bytes(bytes: &[u8]) -> Self {
        Self(trim_signed(bytes).to_vec())
    }

    /// Returns the minimal two's complement representation.
    pub fn as_signed_be_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns true if the value is negative.
    pub fn is_negative(&self) -> bool {
        self.0.first().is_some_and(|b| b & 0x80 != 0)
    }

    /// Converts to `i128` if the value fits.
    pub fn to_i128(&self) -> Option<i128> {
        if self.0.len() > 16 {
            return None;
        }
        let fill = if self.is_negative() { 0xFF } else { 0x00 };
        let mut buf = [fill; 16];
        buf[16 - self.0.len()..].copy_from_slice(&self.0);
        Some(i128::from_be_bytes(buf))
    }
}

impl From<i64> for BigInt {
    fn from(v: i64) -> Self {
        Self::from_signed_be_bytes(&v.to_be_bytes())
    }
}

impl From<i128> for BigInt {
    fn from(v: i128) -> Self {
        Self::from_signed_be_bytes(&v.to_be_bytes())
    }
}

/// A 32-byte account address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address(pub [u8; ADDRESS_LEN]);

impl Address {
    /// The all-zero address.
    pub const ZERO: Address = Address([0u8; ADDRESS_LEN]);

    /// Returns the raw bytes.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }
}

/// A scalar value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PrimitiveValue {
    Bool(bool),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    BigUint(BigUint),
    BigInt(BigInt),
    Bytes(Vec<u8>),
    Address(Address),
}

impl PrimitiveValue {
    /// Returns the kind of this value.
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            PrimitiveValue::Bool(_) => PrimitiveKind::Bool,
            PrimitiveValue::U8(_) => PrimitiveKind::U8,
            PrimitiveValue::U16(_) => PrimitiveKind::U16,
            PrimitiveValue::U32(_) => PrimitiveKind::U32,
            PrimitiveValue::U64(_) => PrimitiveKind::U64,
            PrimitiveValue::I8(_) => PrimitiveKind::I8,
            PrimitiveValue::I16(_) => PrimitiveKind::I16,
            PrimitiveValue::I32(_) => PrimitiveKind::I32,
            PrimitiveValue::I64(_) => PrimitiveKind::I64,
            PrimitiveValue::BigUint(_) => PrimitiveKind::BigUint,
            PrimitiveValue::BigInt(_) => PrimitiveKind::BigInt,
            PrimitiveValue::Bytes(_) => PrimitiveKind::Bytes,
            PrimitiveValue::Address(_) => PrimitiveKind::Address,
        }
    }
}

/// A presence-tagged value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OptionValue {
    inner_type: Type,
    value: Option<Box<TypedValue>>,
}

impl OptionValue {
    /// Creates an absent value of the given payload type.
    pub fn none(inner_type: Type) -> Self {
        Self {
            inner_type,
            value: None,
        }
    }

    /// Creates a present value; the payload type is taken from the value.
    pub fn some(value: TypedValue) -> Self {
        Self {
            inner_type: value.value_type(),
            value: Some(Box::new(value)),
        }
    }

    /// Returns the payload type.
    pub fn inner_type(&self) -> &Type {
        &self.inner_type
    }

    /// Returns true if a payload is present.
    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }

    /// Returns the payload, if present.
    pub fn value(&self) -> Option<&TypedValue> {
        self.value.as_deref()
    }
}

/// A homogeneous sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct List {
    element_type: Type,
    items: Vec<TypedValue>,
}

impl List {
    /// Creates a list, checking every item against `element_type`.
    pub fn new(element_type: Type, items: Vec<TypedValue>) -> Result<Self, ValueError> {
        for (i, item) in items.iter().enumerate() {
            if !item.has_type(&element_type) {
                return Err(ValueError::TypeMismatch {
                    context: format!("list item {}", i),
                    expected: element_type.to_string(),
                    found: item.value_type().to_string(),
                });
            }
        }
        Ok(Self {
            element_type,
            items,
        })
    }

    /// Builds a list from decoder output, which is well-typed by construction.
    pub(crate) fn from_decoded(element_type: Type, items: Vec<TypedValue>) -> Self {
        Self {
            element_type,
            items,
        }
    }

    /// Returns the element type.
    pub fn element_type(&self) -> &Type {
        &self.element_type
    }

    /// Returns the items.
    pub fn items(&self) -> &[TypedValue] {
        &self.items
    }

    /// Returns the number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the list has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Consumes the list, returning its items.
    pub fn into_items(self) -> Vec<TypedValue> {
        self.items
    }
}

/// A struct value whose fields follow the descriptor order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Struct {
    struct_type: StructType,
    fields: Vec<TypedValue>,
}

impl Struct {
    /// Creates a struct value, checking field count and field types by position.
    pub fn new(struct_type: StructType, fields: Vec<TypedValue>) -> Result<Self, ValueError> {
        let definitions = struct_type.fields();
        if definitions.len() != fields.len() {
            return Err(ValueError::FieldCountMismatch {
                name: struct_type.name().to_string(),
                expected: definitions.len(),
                actual: fields.len(),
            });
        }
        for (definition, field) in definitions.iter().zip(&fields) {
            if !field.has_type(&definition.field_type) {
                return Err(ValueError::TypeMismatch {
                    context: format!("{}.{}", struct_type.name(), definition.name),
                    expected: definition.field_type.to_string(),
                    found: field.value_type().to_string(),
                });
            }
        }
        Ok(Self {
            struct_type,
            fields,
        })
    }

    pub(crate) fn from_decoded(struct_type: StructType, fields: Vec<TypedValue>) -> Self {
        Self {
            struct_type,
            fields,
        }
    }

    /// Returns the struct descriptor.
    pub fn struct_type(&self) -> &StructType {
        &self.struct_type
    }

    /// Returns the field values in declaration order.
    pub fn fields(&self) -> &[TypedValue] {
        &self.fields
    }

    /// Looks up a field value by name.
    pub fn field(&self, name: &str) -> Option<&TypedValue> {
        self.struct_type.field_index(name).map(|i| &self.fields[i])
    }
}

/// A value of any category.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypedValue {
    Primitive(PrimitiveValue),
    Option(OptionValue),
    List(List),
    Struct(Struct),
}

impl TypedValue {
    /// Returns the type of this value.
    pub fn value_type(&self) -> Type {
        match self {
            TypedValue::Primitive(p) => Type::Primitive(p.kind()),
            TypedValue::Option(o) => Type::option(o.inner_type.clone()),
            TypedValue::List(l) => Type::list(l.element_type.clone()),
            TypedValue::Struct(s) => Type::Struct(s.struct_type.clone()),
        }
    }

    /// Returns true if this value has type `ty`, without allocating.
    pub fn has_type(&self, ty: &Type) -> bool {
        match (self, ty) {
            (TypedValue::Primitive(p), Type::Primitive(kind)) => p.kind() == *kind,
            (TypedValue::Option(o), Type::Option(inner)) => o.inner_type == **inner,
            (TypedValue::List(l), Type::List(element)) => l.element_type == **element,
            (TypedValue::Struct(s), Type::Struct(st)) => s.struct_type == *st,
            _ => false,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            TypedValue::Primitive(PrimitiveValue::Bool(v)) => Some(*v),
            _ => None,
        }
    }

    /// Returns any fixed-width unsigned value widened to `u64`.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            TypedValue::Primitive(PrimitiveValue::U8(v)) => Some(*v as u64),
            TypedValue::Primitive(PrimitiveValue::U16(v)) => Some(*v as u64),
            TypedValue::Primitive(PrimitiveValue::U32(v)) => Some(*v as u64),
            TypedValue::Primitive(PrimitiveValue::U64(v)) => Some(*v),
            _ => None,
        }
    }

    /// Returns any fixed-width signed value widened to `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            TypedValue::Primitive(PrimitiveValue::I8(v)) => Some(*v as i64),
            TypedValue::Primitive(PrimitiveValue::I16(v)) => Some(*v as i64),
            TypedValue::Primitive(PrimitiveValue::I32(v)) => Some(*v as i64),
            TypedValue::Primitive(PrimitiveValue::I64(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            TypedValue::Primitive(PrimitiveValue::Bytes(v)) => Some(v),
            _ => None,
        }
    }

    pub fn as_option(&self) -> Option<&OptionValue> {
        match self {
            TypedValue::Option(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            TypedValue::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_struct(&self) -> Option<&Struct> {
        match self {
            TypedValue::Struct(s) => Some(s),
            _ => None,
        }
    }
}

macro_rules! impl_from_primitive {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for PrimitiveValue {
                fn from(v: $ty) -> Self {
                    PrimitiveValue::$variant(v)
                }
            }

            impl From<$ty> for TypedValue {
                fn from(v: $ty) -> Self {
                    TypedValue::Primitive(PrimitiveValue::$variant(v))
                }
            }
        )*
    };
}

impl_from_primitive! {
    bool => Bool,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    BigUint => BigUint,
    BigInt => BigInt,
    Vec<u8> => Bytes,
    Address => Address,
}

impl From<PrimitiveValue> for TypedValue {
    fn from(v: PrimitiveValue) -> Self {
        TypedValue::Primitive(v)
    }
}

impl From<OptionValue> for TypedValue {
    fn from(v: OptionValue) -> Self {
        TypedValue::Option(v)
    }
}

impl From<List> for TypedValue {
    fn from(v: List) -> Self {
        TypedValue::List(v)
    }
}

impl From<Struct> for TypedValue {
    fn from(v: Struct) -> Self {
        TypedValue::Struct(v)
    }
}

fn write_hex(f: &mut fmt::Formatter<'_>, bytes: &[u8]) -> fmt::Result {
    f.write_str("0x")?;
    for b in bytes {
        write!(f, "{:02x}", b)?;
    }
    Ok(())
}

impl fmt::Display for PrimitiveValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimitiveValue::Bool(v) => write!(f, "{}", v),
            PrimitiveValue::U8(v) => write!(f, "{}", v),
            PrimitiveValue::U16(v) => write!(f, "{}", v),
            PrimitiveValue::U32(v) => write!(f, "{}", v),
            PrimitiveValue::U64(v) => write!(f, "{}", v),
            PrimitiveValue::I8(v) => write!(f, "{}", v),
            PrimitiveValue::I16(v) => write!(f, "{}", v),
            PrimitiveValue::I32(v) => write!(f, "{}", v),
            PrimitiveValue::I64(v) => write!(f, "{}", v),
            PrimitiveValue::BigUint(v) => match v.to_u128() {
                Some(n) => write!(f, "{}", n),
                None => write_hex(f, v.as_be_bytes()),
            },
            PrimitiveValue::BigInt(v) => match v.to_i128() {
                Some(n) => write!(f, "{}", n),
                None => write_hex(f, v.as_signed_be_bytes()),
            },
            PrimitiveValue::Bytes(v) => write_hex(f, v),
            PrimitiveValue::Address(v) => write_hex(f, v.as_bytes()),
        }
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypedValue::Primitive(p) => write!(f, "{}", p),
            TypedValue::Option(o) => match o.value() {
                Some(v) => write!(f, "Some({})", v),
                None => f.write_str("None"),
            },
            TypedValue::List(l) => {
                f.write_str("[")?;
                for (i, item) in l.items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            TypedValue::Struct(s) => {
                write!(f, "{} {{", s.struct_type.name())?;
                for (i, (definition, field)) in
                    s.struct_type.fields().iter().zip(&s.fields).enumerate()
                {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, " {}: {}", definition.name, field)?;
                }
                f.write_str(" }")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::types::FieldDefinition;

    #[test]
    fn test_trim_signed() {
        assert_eq!(trim_signed(&[0x00, 0x00]), &[] as &[u8]);
        assert_eq!(trim_signed(&[0xFF, 0xFF]), &[0xFF]);
        assert_eq!(trim_signed(&[0x00, 0x80]), &[0x00, 0x80]);
        assert_eq!(trim_signed(&[0xFF, 0x7F]), &[0xFF, 0x7F]);
        assert_eq!(trim_signed(&[0x00, 0x00, 0x05]), &[0x05]);
        assert_eq!(trim_signed(&[0xFF, 0xFF, 0x80]), &[0x80]);
    }

    #[test]
    fn test_big_uint_conversions() {
        assert!(BigUint::from(0u64).is_zero());
        assert_eq!(BigUint::from(256u64).as_be_bytes(), &[0x01, 0x00]);
        assert_eq!(BigUint::from_be_bytes(&[0, 0, 7]).to_u128(), Some(7));
        assert_eq!(BigUint::from(u128::MAX).to_u128(), Some(u128::MAX));
        assert_eq!(BigUint::from_be_bytes(&[1u8; 17]).to_u128(), None);
    }

    #[test]
    fn test_big_int_conversions() {
        for v in [0i128, 1, -1, 127, 128, -128, -129, i128::MAX, i128::MIN] {
            assert_eq!(BigInt::from(v).to_i128(), Some(v), "failed for {}", v);
        }
        assert_eq!(BigInt::from(-1i64).as_signed_be_bytes(), &[0xFF]);
        assert_eq!(BigInt::from(128i64).as_signed_be_bytes(), &[0x00, 0x80]);
        assert!(BigInt::from(-5i64).is_negative());
    }

    #[test]
    fn test_list_rejects_mixed_items() {
        let result = List::new(
            PrimitiveKind::U8.into(),
            vec![TypedValue::from(1u8), TypedValue::from(2u16)],
        );
        assert!(matches!(result, Err(ValueError::TypeMismatch { .. })));
    }

    #[test]
    fn test_struct_checks_fields() {
        let ty = StructType::new(
            "Pair",
            vec![
                FieldDefinition::new("a", PrimitiveKind::U8.into()),
                FieldDefinition::new("b", PrimitiveKind::Bool.into()),
            ],
        )
        .unwrap();

        let ok = Struct::new(ty.clone(), vec![7u8.into(), true.into()]).unwrap();
        assert_eq!(ok.field("b").and_then(TypedValue::as_bool), Some(true));
        assert_eq!(ok.field("a").and_then(TypedValue::as_u64), Some(7));

        let short = Struct::new(ty.clone(), vec![7u8.into()]);
        assert!(matches!(short, Err(ValueError::FieldCountMismatch { expected: 2, actual: 1, .. })));

        let swapped = Struct::new(ty, vec![true.into(), 7u8.into()]);
        assert!(matches!(swapped, Err(ValueError::TypeMismatch { .. })));
    }

    #[test]
    fn test_option_value_type() {
        let some = OptionValue::some(5u16.into());
        assert_eq!(
            TypedValue::from(some).value_type(),
            Type::option(PrimitiveKind::U16.into())
        );
        let none = OptionValue::none(PrimitiveKind::U16.into());
        assert!(!none.is_set());
        assert!(TypedValue::from(none).has_type(&Type::option(PrimitiveKind::U16.into())));
    }

    #[test]
    fn test_display() {
        let list = List::new(
            Type::option(PrimitiveKind::U8.into()),
            vec![
                OptionValue::some(1u8.into()).into(),
                OptionValue::none(PrimitiveKind::U8.into()).into(),
            ],
        )
        .unwrap();
        assert_eq!(TypedValue::from(list).to_string(), "[Some(1), None]");
        assert_eq!(TypedValue::from(vec![0xABu8, 0x01]).to_string(), "0xab01");
        assert_eq!(TypedValue::from(BigInt::from(-42i64)).to_string(), "-42");
    }
}
