//! Parser for textual type expressions.
//!
//! ```text
//! type   := ident ( '<' type '>' )? | ident '{' field (',' field)* ','? '}'
//! field  := ident ':' type
//! ```
//!
//! `Option<T>` and `List<T>` are the only generic forms. Any other
//! identifier followed by braces declares a named struct. Nesting deeper than
//! [`MAX_TYPE_DEPTH`] fails with [`TypeExprError::TooDeep`].

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::error::TypeExprError;
use crate::limits::MAX_TYPE_DEPTH;
use crate::model::types::{FieldDefinition, PrimitiveKind, StructType, Type};

lazy_static! {
    static ref PRIMITIVES_BY_NAME: HashMap<&'static str, PrimitiveKind> =
        PrimitiveKind::ALL.iter().map(|kind| (kind.name(), *kind)).collect();
}

/// Parses a type expression such as `List<Option<u32>>`.
pub fn parse_type(expr: &str) -> Result<Type, TypeExprError> {
    let mut parser = Parser {
        src: expr,
        pos: 0,
        depth: 0,
    };
    let ty = parser.parse_type()?;
    parser.skip_whitespace();
    match parser.peek() {
        None => Ok(ty),
        Some(found) => Err(TypeExprError::UnexpectedChar {
            found,
            pos: parser.pos,
        }),
    }
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), TypeExprError> {
        self.skip_whitespace();
        match self.peek() {
            Some(c) if c == expected => {
                self.pos += c.len_utf8();
                Ok(())
            }
            Some(found) => Err(TypeExprError::UnexpectedChar {
                found,
                pos: self.pos,
            }),
            None => Err(TypeExprError::UnexpectedEnd),
        }
    }

    /// Returns the identifier and its start position.
    fn ident(&mut self) -> Result<(&'a str, usize), TypeExprError> {
        self.skip_whitespace();
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !(c.is_ascii_alphanumeric() || c == '_') {
                break;
            }
            self.pos += 1;
        }
        if self.pos == start {
            return match self.peek() {
                Some(found) => Err(TypeExprError::UnexpectedChar { found, pos: start }),
                None => Err(TypeExprError::UnexpectedEnd),
            };
        }
        Ok((&self.src[start..self.pos], start))
    }

    fn parse_type(&mut self) -> Result<Type, TypeExprError> {
        if self.depth >= MAX_TYPE_DEPTH {
            return Err(TypeExprError::TooDeep { pos: self.pos });
        }
        self.depth += 1;
        let result = self.parse_type_inner();
        self.depth -= 1;
        result
    }

    fn parse_type_inner(&mut self) -> Result<Type, TypeExprError> {
        let (name, start) = self.ident()?;
        self.skip_whitespace();

        match self.peek() {
            Some('<') => {
                self.pos += 1;
                let inner = self.parse_type()?;
                self.expect('>')?;
                match name {
                    "Option" => Ok(Type::option(inner)),
                    "List" => Ok(Type::list(inner)),
                    _ => Err(TypeExprError::UnknownType {
                        name: name.to_string(),
                        pos: start,
                    }),
                }
            }
            Some('{') => {
                self.pos += 1;
                self.parse_struct(name)
            }
            _ => {
                if let Some(kind) = PRIMITIVES_BY_NAME.get(name) {
                    return Ok(Type::Primitive(*kind));
                }
                if name == "Option" || name == "List" {
                    return Err(TypeExprError::MissingTypeParameter {
                        name: name.to_string(),
                        pos: start,
                    });
                }
                Err(TypeExprError::UnknownType {
                    name: name.to_string(),
                    pos: start,
                })
            }
        }
    }

    fn parse_struct(&mut self, name: &str) -> Result<Type, TypeExprError> {
        let mut fields = Vec::new();
        loop {
            self.skip_whitespace();
            if self.peek() == Some('}') {
                self.pos += 1;
                break;
            }
            let (field_name, _) = self.ident()?;
            self.expect(':')?;
            let field_type = self.parse_type()?;
            fields.push(FieldDefinition::new(field_name, field_type));

            self.skip_whitespace();
            match self.peek() {
                Some(',') => self.pos += 1,
                Some('}') => {
                    self.pos += 1;
                    break;
                }
                Some(found) => {
                    return Err(TypeExprError::UnexpectedChar {
                        found,
                        pos: self.pos,
                    });
                }
                None => return Err(TypeExprError::UnexpectedEnd),
            }
        }

        StructType::new(name, fields)
            .map(Type::Struct)
            .map_err(|source| TypeExprError::InvalidStruct {
                name: name.to_string(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitives() {
        for kind in PrimitiveKind::ALL {
            assert_eq!(parse_type(kind.name()).unwrap(), Type::Primitive(kind));
        }
    }

    #[test]
    fn test_generics() {
        assert_eq!(
            parse_type("List<Option<u32>>").unwrap(),
            Type::list(Type::option(PrimitiveKind::U32.into()))
        );
        assert_eq!(
            parse_type("  Option < bytes > ").unwrap(),
            Type::option(PrimitiveKind::Bytes.into())
        );
    }

    #[test]
    fn test_struct() {
        let ty = parse_type("Transfer { to: Address, amount: BigUint, memo: Option<bytes>, }").unwrap();
        let Type::Struct(st) = &ty else {
            panic!("expected struct");
        };
        assert_eq!(st.name(), "Transfer");
        assert_eq!(st.fields().len(), 3);
        assert_eq!(st.fields()[1].field_type, Type::Primitive(PrimitiveKind::BigUint));
    }

    #[test]
    fn test_display_parse_roundtrip() {
        let exprs = [
            "u8",
            "List<List<i64>>",
            "Pair { a: u16, b: Option<Inner { x: bool }> }",
            "Empty { }",
            "Option { List: u8, _0: bool }",
        ];
        for expr in exprs {
            let ty = parse_type(expr).unwrap();
            assert_eq!(parse_type(&ty.to_string()).unwrap(), ty, "failed for {}", expr);
        }
    }

    #[test]
    fn test_nesting_depth_limit() {
        let deepest = format!("{}u8{}", "Option<".repeat(MAX_TYPE_DEPTH - 1), ">".repeat(MAX_TYPE_DEPTH - 1));
        assert!(parse_type(&deepest).is_ok());

        let too_deep = format!("{}u8{}", "Option<".repeat(MAX_TYPE_DEPTH), ">".repeat(MAX_TYPE_DEPTH));
        assert_eq!(
            parse_type(&too_deep),
            Err(TypeExprError::TooDeep { pos: MAX_TYPE_DEPTH * "Option<".len() })
        );

        // Unterminated input fails at the limit instead of exhausting the stack
        let runaway = "Option<".repeat(10_000);
        assert!(matches!(parse_type(&runaway), Err(TypeExprError::TooDeep { .. })));

        let nested_structs = "S { a: ".repeat(10_000);
        assert!(matches!(parse_type(&nested_structs), Err(TypeExprError::TooDeep { .. })));
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            parse_type("u128"),
            Err(TypeExprError::UnknownType { pos: 0, .. })
        ));
        assert!(matches!(
            parse_type("List"),
            Err(TypeExprError::MissingTypeParameter { .. })
        ));
        assert!(matches!(
            parse_type("Map<u8>"),
            Err(TypeExprError::UnknownType { .. })
        ));
        assert_eq!(parse_type("List<u8"), Err(TypeExprError::UnexpectedEnd));
        assert!(matches!(
            parse_type("u8 u8"),
            Err(TypeExprError::UnexpectedChar { found: 'u', pos: 3 })
        ));
        assert!(matches!(
            parse_type("S { a: u8, a: u8 }"),
            Err(TypeExprError::InvalidStruct { .. })
        ));
    }
}
