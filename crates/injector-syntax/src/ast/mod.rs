//! Abstract syntax tree for the C# declaration subset.
//!
//! Every node kind is a closed enum or struct, so analyses match on them
//! exhaustively. Trees are plain owned values: a rewrite builds new nodes
//! and rebuilds the path to them, the input tree is never mutated.
//!
//! Nodes created in memory (by a code fix) carry [`Span::SYNTHETIC`].

pub mod declaration;
pub mod edit;
pub mod expression;
pub mod path;
pub mod statement;
pub mod types;
pub mod visitor;

pub use declaration::*;
pub use edit::NodeEdit;
pub use expression::*;
pub use path::NodePath;
pub use statement::*;
pub use types::*;
pub use visitor::Visitor;

use crate::token::Span;
use std::fmt;

/// Identifier with its source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub name: String,
    pub span: Span,
}

impl Identifier {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }

    /// Identifier that does not originate from source text.
    pub fn synthetic(name: impl Into<String>) -> Self {
        Self::new(name, Span::SYNTHETIC)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Dotted name: `System.Collections.Generic`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedName {
    pub segments: Vec<Identifier>,
    pub span: Span,
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(&segment.name)?;
        }
        Ok(())
    }
}

/// A parsed source file.
#[derive(Debug, Clone, PartialEq)]
pub struct CompilationUnit {
    pub usings: Vec<UsingDirective>,
    pub members: Vec<NamespaceMember>,
    pub span: Span,
}

impl CompilationUnit {
    /// An empty compilation unit, as produced for empty input.
    pub fn empty() -> Self {
        Self {
            usings: Vec::new(),
            members: Vec::new(),
            span: Span::new(0, 0, 1, 1),
        }
    }
}

/// `using System;`, `using static System.Math;`, `using IO = System.IO;`
#[derive(Debug, Clone, PartialEq)]
pub struct UsingDirective {
    pub is_static: bool,
    pub alias: Option<Identifier>,
    pub name: QualifiedName,
    pub span: Span,
}

/// Member of a compilation unit or namespace body.
#[derive(Debug, Clone, PartialEq)]
pub enum NamespaceMember {
    Namespace(NamespaceDecl),
    Type(TypeDecl),
}

impl NamespaceMember {
    pub fn span(&self) -> &Span {
        match self {
            NamespaceMember::Namespace(ns) => &ns.span,
            NamespaceMember::Type(decl) => &decl.span,
        }
    }
}

/// `namespace A.B { ... }` or file-scoped `namespace A.B;`
#[derive(Debug, Clone, PartialEq)]
pub struct NamespaceDecl {
    pub name: QualifiedName,
    pub file_scoped: bool,
    pub usings: Vec<UsingDirective>,
    pub members: Vec<NamespaceMember>,
    pub span: Span,
}
