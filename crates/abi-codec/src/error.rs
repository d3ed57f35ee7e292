//! Error types for ABI encoding/decoding, value construction and type parsing.

use thiserror::Error;

/// Broad error classes, each with a stable string code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// E001: Buffer or list exceeds the configured constraints
    ConstraintViolation,
    /// E002: Truncated input, bad tag, overflow or leftover bytes
    MalformedEncoding,
    /// E003: Value cannot be encoded (variable cardinality or an oversized length)
    NotEncodable,
    /// E004: Value does not match its declared type
    TypeMismatch,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::ConstraintViolation => "E001",
            ErrorCode::MalformedEncoding => "E002",
            ErrorCode::NotEncodable => "E003",
            ErrorCode::TypeMismatch => "E004",
        }
    }
}

/// Error during binary decoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    // === E001: Constraint violations ===
    #[error("[E001] buffer too large: {len} > {max}")]
    BufferTooLarge { len: usize, max: usize },

    #[error("[E001] list too large: {len} > {max}")]
    ListTooLarge { len: usize, max: usize },

    // === E002: Malformed encoding ===
    #[error("[E002] unexpected end of input while reading {context}")]
    UnexpectedEof { context: &'static str },

    #[error("[E002] invalid bool value: {value} (expected 0x00 or 0x01)")]
    InvalidBool { value: u8 },

    #[error("[E002] invalid option tag: {tag} (expected 0x00 or 0x01)")]
    InvalidOptionTag { tag: u8 },

    #[error("[E002] {kind} value of {len} bytes does not fit its width")]
    IntegerOverflow { kind: &'static str, len: usize },

    #[error("[E002] {count} trailing bytes after top-level {context}")]
    TrailingBytes { context: &'static str, count: usize },
}

impl DecodeError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            DecodeError::BufferTooLarge { .. } | DecodeError::ListTooLarge { .. } => {
                ErrorCode::ConstraintViolation
            }
            _ => ErrorCode::MalformedEncoding,
        }
    }
}

/// Error during binary encoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("[E003] type {type_name} has variable cardinality and cannot be encoded directly")]
    NotEncodable { type_name: String },

    #[error("[E003] {field} length {len} exceeds maximum {max}")]
    LengthExceedsLimit {
        field: &'static str,
        len: usize,
        max: usize,
    },
}

impl EncodeError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            EncodeError::NotEncodable { .. } => ErrorCode::NotEncodable,
            EncodeError::LengthExceedsLimit { .. } => ErrorCode::NotEncodable,
        }
    }
}

/// Error while constructing a typed value or a struct descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("[E004] type mismatch in {context}: expected {expected}, found {found}")]
    TypeMismatch {
        context: String,
        expected: String,
        found: String,
    },

    #[error("[E004] struct {name} expects {expected} fields, got {actual}")]
    FieldCountMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("[E004] struct {name} declares field {field:?} more than once")]
    DuplicateField { name: String, field: String },

    #[error("[E004] {name:?} is not a valid identifier")]
    InvalidName { name: String },
}

impl ValueError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        ErrorCode::TypeMismatch
    }
}

/// Error while parsing a type expression such as `List<Option<u32>>`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeExprError {
    #[error("unexpected end of type expression")]
    UnexpectedEnd,

    #[error("unexpected character {found:?} at position {pos}")]
    UnexpectedChar { found: char, pos: usize },

    #[error("unknown type {name:?} at position {pos}")]
    UnknownType { name: String, pos: usize },

    #[error("type expression nested too deeply at position {pos}")]
    TooDeep { pos: usize },

    #[error("{name} expects exactly one type parameter (position {pos})")]
    MissingTypeParameter { name: String, pos: usize },

    #[error("invalid struct {name}: {source}")]
    InvalidStruct {
        name: String,
        #[source]
        source: ValueError,
    },
}
