//! Type references: `string`, `IList<Order>`, `int[]`, `Guid?`.

use super::Identifier;
use crate::token::Span;
use std::fmt;

/// A reference to a type as written in source.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeRef {
    pub kind: TypeRefKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeRefKind {
    /// `A.B<C>.D`, one segment per dotted part.
    Named(Vec<TypeSegment>),
    /// `T[]`, `T[,]`; `rank` is the number of dimensions.
    Array { element: Box<TypeRef>, rank: u8 },
    /// `T?`
    Nullable(Box<TypeRef>),
    /// `global::System.String`: a named type behind an alias qualifier.
    Aliased { alias: Identifier, ty: Box<TypeRef> },
}

/// One dotted part of a named type, with its type arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeSegment {
    pub name: Identifier,
    pub type_args: Vec<TypeRef>,
}

impl TypeRef {
    /// A simple named type such as `string`.
    pub fn named(name: impl Into<String>, span: Span) -> Self {
        Self {
            kind: TypeRefKind::Named(vec![TypeSegment {
                name: Identifier::new(name, span),
                type_args: Vec::new(),
            }]),
            span,
        }
    }

    /// Check if this is the implicitly typed `var`.
    pub fn is_var(&self) -> bool {
        match &self.kind {
            TypeRefKind::Named(segments) => {
                segments.len() == 1
                    && segments[0].name.name == "var"
                    && segments[0].type_args.is_empty()
            }
            _ => false,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TypeRefKind::Named(segments) => {
                for (i, segment) in segments.iter().enumerate() {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(&segment.name.name)?;
                    if !segment.type_args.is_empty() {
                        f.write_str("<")?;
                        for (j, arg) in segment.type_args.iter().enumerate() {
                            if j > 0 {
                                f.write_str(", ")?;
                            }
                            write!(f, "{}", arg)?;
                        }
                        f.write_str(">")?;
                    }
                }
                Ok(())
            }
            TypeRefKind::Array { element, rank } => {
                write!(f, "{}[", element)?;
                for _ in 1..*rank {
                    f.write_str(",")?;
                }
                f.write_str("]")
            }
            TypeRefKind::Nullable(inner) => write!(f, "{}?", inner),
            TypeRefKind::Aliased { alias, ty } => write!(f, "{}::{}", alias.name, ty),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> TypeRef {
        TypeRef::named(name, Span::SYNTHETIC)
    }

    #[test]
    fn test_display_generic() {
        let ty = TypeRef {
            kind: TypeRefKind::Named(vec![TypeSegment {
                name: Identifier::synthetic("Dictionary"),
                type_args: vec![named("string"), named("int")],
            }]),
            span: Span::SYNTHETIC,
        };
        assert_eq!(ty.to_string(), "Dictionary<string, int>");
    }

    #[test]
    fn test_display_array_and_nullable() {
        let array = TypeRef {
            kind: TypeRefKind::Array {
                element: Box::new(named("int")),
                rank: 2,
            },
            span: Span::SYNTHETIC,
        };
        assert_eq!(array.to_string(), "int[,]");

        let nullable = TypeRef {
            kind: TypeRefKind::Nullable(Box::new(named("Guid"))),
            span: Span::SYNTHETIC,
        };
        assert_eq!(nullable.to_string(), "Guid?");
    }

    #[test]
    fn test_display_alias_qualified() {
        let ty = TypeRef {
            kind: TypeRefKind::Aliased {
                alias: Identifier::synthetic("global"),
                ty: Box::new(named("System.IDisposable")),
            },
            span: Span::SYNTHETIC,
        };
        assert_eq!(ty.to_string(), "global::System.IDisposable");
        assert!(!ty.is_var());
    }

    #[test]
    fn test_is_var() {
        assert!(named("var").is_var());
        assert!(!named("string").is_var());
    }
}
