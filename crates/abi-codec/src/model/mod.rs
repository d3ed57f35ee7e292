//! Data model for the ABI codec.
//!
//! This module contains the types the codec consumes and produces:
//! - Type descriptors (primitive kinds, options, lists, structs)
//! - Typed values mirroring the descriptor tree
//! - A parser for textual type expressions

pub mod expr;
pub mod types;
pub mod value;

pub use expr::parse_type;
pub use types::{Cardinality, FieldDefinition, PrimitiveKind, StructType, Type};
pub use value::{Address, BigInt, BigUint, List, OptionValue, PrimitiveValue, Struct, TypedValue};
