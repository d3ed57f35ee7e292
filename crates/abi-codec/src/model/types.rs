//! Type descriptors.
//!
//! A [`Type`] is an immutable description of a value's shape. The codec
//! matches on its category and queries its [`Cardinality`]; it never
//! inspects descriptors any other way.

use std::fmt;

use rustc_hash::FxHashSet;

use crate::error::ValueError;
use crate::limits::ADDRESS_LEN;

/// Scalar kinds understood by the primitive codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Bool,
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    /// Arbitrary-precision unsigned integer.
    BigUint,
    /// Arbitrary-precision signed integer.
    BigInt,
    /// Opaque byte string.
    Bytes,
    /// 32-byte account address.
    Address,
}

impl PrimitiveKind {
    /// Returns the name used in type expressions.
    pub fn name(self) -> &'static str {
        match self {
            PrimitiveKind::Bool => "bool",
            PrimitiveKind::U8 => "u8",
            PrimitiveKind::U16 => "u16",
            PrimitiveKind::U32 => "u32",
            PrimitiveKind::U64 => "u64",
            PrimitiveKind::I8 => "i8",
            PrimitiveKind::I16 => "i16",
            PrimitiveKind::I32 => "i32",
            PrimitiveKind::I64 => "i64",
            PrimitiveKind::BigUint => "BigUint",
            PrimitiveKind::BigInt => "BigInt",
            PrimitiveKind::Bytes => "bytes",
            PrimitiveKind::Address => "Address",
        }
    }

    /// Returns the declared byte width, or `None` for variable-width kinds.
    pub fn fixed_width(self) -> Option<usize> {
        match self {
            PrimitiveKind::Bool | PrimitiveKind::U8 | PrimitiveKind::I8 => Some(1),
            PrimitiveKind::U16 | PrimitiveKind::I16 => Some(2),
            PrimitiveKind::U32 | PrimitiveKind::I32 => Some(4),
            PrimitiveKind::U64 | PrimitiveKind::I64 => Some(8),
            PrimitiveKind::Address => Some(ADDRESS_LEN),
            PrimitiveKind::BigUint | PrimitiveKind::BigInt | PrimitiveKind::Bytes => None,
        }
    }

    /// All kinds, in declaration order.
    pub const ALL: [PrimitiveKind; 13] = [
        PrimitiveKind::Bool,
        PrimitiveKind::U8,
        PrimitiveKind::U16,
        PrimitiveKind::U32,
        PrimitiveKind::U64,
        PrimitiveKind::I8,
        PrimitiveKind::I16,
        PrimitiveKind::I32,
        PrimitiveKind::I64,
        PrimitiveKind::BigUint,
        PrimitiveKind::BigInt,
        PrimitiveKind::Bytes,
        PrimitiveKind::Address,
    ];
}

/// Whether a type's encoded width is known from the descriptor alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    /// Statically known width in bytes. For options this is the width of the
    /// present form.
    Fixed(usize),
    /// Width depends on the instance.
    Variable,
}

impl Cardinality {
    /// Returns true if the width is statically known.
    pub fn is_fixed(self) -> bool {
        matches!(self, Cardinality::Fixed(_))
    }

    /// Returns the fixed width, if any.
    pub fn byte_width(self) -> Option<usize> {
        match self {
            Cardinality::Fixed(width) => Some(width),
            Cardinality::Variable => None,
        }
    }
}

/// A named struct field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldDefinition {
    pub name: String,
    pub field_type: Type,
}

impl FieldDefinition {
    /// Creates a field definition.
    pub fn new(name: impl Into<String>, field_type: Type) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }
}

/// An ordered, named sequence of heterogeneously typed fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StructType {
    name: String,
    fields: Vec<FieldDefinition>,
}

impl StructType {
    /// Creates a struct descriptor.
    ///
    /// Struct and field names must be identifiers (ASCII letters, digits and
    /// `_`) so the descriptor prints as a parseable type expression. Field
    /// names must be unique.
    pub fn new(name: impl Into<String>, fields: Vec<FieldDefinition>) -> Result<Self, ValueError> {
        let name = name.into();
        if !is_identifier(&name) {
            return Err(ValueError::InvalidName { name });
        }
        let mut seen = FxHashSet::with_capacity_and_hasher(fields.len(), Default::default());
        for field in &fields {
            if !is_identifier(&field.name) {
                return Err(ValueError::InvalidName {
                    name: field.name.clone(),
                });
            }
            if !seen.insert(field.name.as_str()) {
                return Err(ValueError::DuplicateField {
                    name,
                    field: field.name.clone(),
                });
            }
        }
        Ok(Self { name, fields })
    }

    /// Returns the struct name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the fields in declaration order.
    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    /// Returns the position of the named field.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// `Fixed` iff every field is `Fixed`; the width is the sum.
    pub fn cardinality(&self) -> Cardinality {
        let mut total = 0;
        for field in &self.fields {
            match field.field_type.cardinality() {
                Cardinality::Fixed(width) => total += width,
                Cardinality::Variable => return Cardinality::Variable,
            }
        }
        Cardinality::Fixed(total)
    }
}

/// Returns true if `s` is a non-empty run of ASCII alphanumerics and `_`.
fn is_identifier(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// Describes the shape of a value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Primitive(PrimitiveKind),
    Option(Box<Type>),
    List(Box<Type>),
    Struct(StructType),
}

impl Type {
    /// Shorthand for `Type::Option(Box::new(inner))`.
    pub fn option(inner: Type) -> Self {
        Type::Option(Box::new(inner))
    }

    /// Shorthand for `Type::List(Box::new(element))`.
    pub fn list(element: Type) -> Self {
        Type::List(Box::new(element))
    }

    /// Returns the structural cardinality of this type.
    pub fn cardinality(&self) -> Cardinality {
        match self {
            Type::Primitive(kind) => match kind.fixed_width() {
                Some(width) => Cardinality::Fixed(width),
                None => Cardinality::Variable,
            },
            Type::Option(inner) => match inner.cardinality() {
                Cardinality::Fixed(width) => Cardinality::Fixed(1 + width),
                Cardinality::Variable => Cardinality::Variable,
            },
            Type::List(_) => Cardinality::Variable,
            Type::Struct(struct_type) => struct_type.cardinality(),
        }
    }
}

impl From<PrimitiveKind> for Type {
    fn from(kind: PrimitiveKind) -> Self {
        Type::Primitive(kind)
    }
}

impl From<StructType> for Type {
    fn from(struct_type: StructType) -> Self {
        Type::Struct(struct_type)
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Prints the type-expression syntax accepted by [`crate::model::parse_type`].
impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Primitive(kind) => write!(f, "{}", kind),
            Type::Option(inner) => write!(f, "Option<{}>", inner),
            Type::List(element) => write!(f, "List<{}>", element),
            Type::Struct(struct_type) => {
                write!(f, "{} {{", struct_type.name)?;
                for (i, field) in struct_type.fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, " {}: {}", field.name, field.field_type)?;
                }
                f.write_str(" }")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point() -> StructType {
        StructType::new(
            "Point",
            vec![
                FieldDefinition::new("x", PrimitiveKind::I32.into()),
                FieldDefinition::new("y", PrimitiveKind::I32.into()),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_primitive_cardinality() {
        assert_eq!(Type::from(PrimitiveKind::Bool).cardinality(), Cardinality::Fixed(1));
        assert_eq!(Type::from(PrimitiveKind::U64).cardinality(), Cardinality::Fixed(8));
        assert_eq!(Type::from(PrimitiveKind::Address).cardinality(), Cardinality::Fixed(32));
        assert_eq!(Type::from(PrimitiveKind::Bytes).cardinality(), Cardinality::Variable);
        assert_eq!(Type::from(PrimitiveKind::BigUint).cardinality(), Cardinality::Variable);
    }

    #[test]
    fn test_composite_cardinality() {
        assert_eq!(Type::list(PrimitiveKind::U8.into()).cardinality(), Cardinality::Variable);
        assert_eq!(Type::option(PrimitiveKind::U16.into()).cardinality(), Cardinality::Fixed(3));
        assert_eq!(
            Type::option(PrimitiveKind::Bytes.into()).cardinality(),
            Cardinality::Variable
        );
        assert_eq!(Type::Struct(point()).cardinality(), Cardinality::Fixed(8));

        let with_list = StructType::new(
            "Bag",
            vec![
                FieldDefinition::new("id", PrimitiveKind::U8.into()),
                FieldDefinition::new("items", Type::list(PrimitiveKind::U8.into())),
            ],
        )
        .unwrap();
        assert_eq!(Type::Struct(with_list).cardinality(), Cardinality::Variable);
    }

    #[test]
    fn test_empty_struct_is_fixed_zero() {
        let empty = StructType::new("Unit", vec![]).unwrap();
        assert_eq!(empty.cardinality(), Cardinality::Fixed(0));
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let result = StructType::new(
            "Dup",
            vec![
                FieldDefinition::new("a", PrimitiveKind::U8.into()),
                FieldDefinition::new("a", PrimitiveKind::U16.into()),
            ],
        );
        assert!(matches!(result, Err(ValueError::DuplicateField { .. })));
    }

    #[test]
    fn test_non_identifier_names_rejected() {
        let spaced = StructType::new("my struct", vec![]);
        assert_eq!(
            spaced,
            Err(ValueError::InvalidName { name: "my struct".to_string() })
        );

        let dashed = StructType::new(
            "Pair",
            vec![FieldDefinition::new("a-b", PrimitiveKind::U8.into())],
        );
        assert_eq!(dashed, Err(ValueError::InvalidName { name: "a-b".to_string() }));

        assert!(matches!(StructType::new("", vec![]), Err(ValueError::InvalidName { .. })));
        assert!(StructType::new("Snake_Case2", vec![]).is_ok());
    }

    #[test]
    fn test_display() {
        let ty = Type::list(Type::option(PrimitiveKind::BigUint.into()));
        assert_eq!(ty.to_string(), "List<Option<BigUint>>");
        assert_eq!(Type::Struct(point()).to_string(), "Point { x: i32, y: i32 }");
        assert_eq!(point().field_index("y"), Some(1));
        assert_eq!(point().field_index("z"), None);
    }
}
