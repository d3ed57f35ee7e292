//! Schema-driven binary codec for smart-contract ABI values.
//!
//! This crate converts typed values (primitives, options, lists and structs)
//! to the compact binary form used for contract call arguments and return
//! values, and back.
//!
//! # Overview
//!
//! Every type has two encodings:
//! - **Top-level**: the value is the whole payload, so it needs no length
//!   information (`u32` 5 is `05`, a list is just its elements)
//! - **Nested**: the value sits inside a container and must delimit itself
//!   (`u32` 5 is `00 00 00 05`, a list carries a 4-byte count)
//!
//! # Quick Start
//!
//! ```rust
//! use abi_codec::{BinaryCodec, FieldDefinition, OptionValue, PrimitiveKind, Struct, StructType, Type};
//!
//! let payment = StructType::new(
//!     "Payment",
//!     vec![
//!         FieldDefinition::new("nonce", PrimitiveKind::U64.into()),
//!         FieldDefinition::new("limit", Type::option(PrimitiveKind::U16.into())),
//!     ],
//! )
//! .unwrap();
//!
//! let value = Struct::new(payment.clone(), vec![7u64.into(), OptionValue::some(5u16.into()).into()])
//!     .unwrap()
//!     .into();
//!
//! let codec = BinaryCodec::new();
//! let bytes = codec.encode_top_level(&value).unwrap();
//! assert_eq!(bytes, [0, 0, 0, 0, 0, 0, 0, 7, 0x01, 0x00, 0x05]);
//!
//! let decoded = codec.decode_top_level(&bytes, &Type::Struct(payment)).unwrap();
//! assert_eq!(decoded, value);
//! ```
//!
//! # Modules
//!
//! - [`model`]: Type descriptors, typed values, type-expression parser
//! - [`codec`]: Binary encoding/decoding
//! - [`limits`]: Decoding constraints and wire constants
//! - [`error`]: Error types
//!
//! # Security
//!
//! The decoder is designed to safely handle untrusted input:
//! - Buffers longer than the configured maximum are rejected up front
//! - List counts read from the wire are checked before allocation
//! - Length fields claiming more bytes than remain are rejected
//! - Type expressions nested deeper than [`limits::MAX_TYPE_DEPTH`] are rejected

pub mod codec;
pub mod error;
pub mod limits;
pub mod model;

// Re-export commonly used types at crate root
pub use codec::{BinaryCodec, Reader, Writer};
pub use error::{DecodeError, EncodeError, ErrorCode, TypeExprError, ValueError};
pub use limits::Constraints;
pub use model::{
    parse_type, Address, BigInt, BigUint, Cardinality, FieldDefinition, List, OptionValue,
    PrimitiveKind, PrimitiveValue, Struct, StructType, Type, TypedValue,
};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
