//! Type and member declarations.
//!
//! This module defines the declaration nodes the analyzer works on:
//! - Type declarations (class, struct, interface, enum)
//! - Fields, constructors, methods and properties
//! - Modifiers, parameters and attributes

use super::*;
use crate::token::Span;
use std::fmt;

// ============================================================================
// Type Declaration
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Class,
    Struct,
    Interface,
    /// Enum bodies are skipped; an enum has no members in the tree.
    Enum,
}

impl TypeKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Struct => "struct",
            TypeKind::Interface => "interface",
            TypeKind::Enum => "enum",
        }
    }
}

/// Type declaration
///
/// # Example
/// ```text
/// [Serializable]
/// public sealed class OrderService : IOrderService
/// {
///     private readonly IRepository _repository;
///
///     public OrderService(IRepository repository)
///     {
///         _repository = repository;
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDecl {
    pub attributes: Vec<AttributeList>,
    pub modifiers: Modifiers,
    pub kind: TypeKind,
    pub name: Identifier,
    pub type_params: Vec<Identifier>,
    pub base_types: Vec<TypeRef>,
    pub members: Vec<Member>,
    /// Span of the `{` opening the body.
    pub open_brace: Span,
    /// Span of the `}` closing the body.
    pub close_brace: Span,
    /// A constructor of this type could not be parsed in full, so the
    /// constructor members do not show everything the source does.
    pub has_unparsed_constructor: bool,
    pub span: Span,
}

impl TypeDecl {
    /// Instance constructors declared directly in this type, in source order.
    ///
    /// Static constructors are excluded: they cannot assign instance fields.
    pub fn constructors(&self) -> impl Iterator<Item = &ConstructorDecl> {
        self.members.iter().filter_map(|member| match member {
            Member::Constructor(ctor) if !ctor.modifiers.is_static() => Some(ctor),
            _ => None,
        })
    }

    /// Index into `members` of the first instance constructor.
    pub fn first_constructor_index(&self) -> Option<usize> {
        self.members.iter().position(
            |member| matches!(member, Member::Constructor(ctor) if !ctor.modifiers.is_static()),
        )
    }

    /// Field members, in source order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDecl> {
        self.members.iter().filter_map(|member| match member {
            Member::Field(field) => Some(field),
            _ => None,
        })
    }
}

/// Member of a type body.
#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    Field(FieldDecl),
    Constructor(ConstructorDecl),
    Method(MethodDecl),
    Property(PropertyDecl),
    Type(TypeDecl),
}

impl Member {
    pub fn span(&self) -> &Span {
        match self {
            Member::Field(m) => &m.span,
            Member::Constructor(m) => &m.span,
            Member::Method(m) => &m.span,
            Member::Property(m) => &m.span,
            Member::Type(m) => &m.span,
        }
    }
}

// ============================================================================
// Modifiers
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifierKind {
    Public,
    Private,
    Protected,
    Internal,
    Static,
    Readonly,
    Const,
    Abstract,
    Sealed,
    Partial,
    Virtual,
    Override,
    Async,
    Extern,
    Unsafe,
    Volatile,
    /// Member hiding: `public new void Reset()`
    New,
}

impl ModifierKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            ModifierKind::Public => "public",
            ModifierKind::Private => "private",
            ModifierKind::Protected => "protected",
            ModifierKind::Internal => "internal",
            ModifierKind::Static => "static",
            ModifierKind::Readonly => "readonly",
            ModifierKind::Const => "const",
            ModifierKind::Abstract => "abstract",
            ModifierKind::Sealed => "sealed",
            ModifierKind::Partial => "partial",
            ModifierKind::Virtual => "virtual",
            ModifierKind::Override => "override",
            ModifierKind::Async => "async",
            ModifierKind::Extern => "extern",
            ModifierKind::Unsafe => "unsafe",
            ModifierKind::Volatile => "volatile",
            ModifierKind::New => "new",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Modifier {
    pub kind: ModifierKind,
    pub span: Span,
}

/// Modifier list in source order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub items: Vec<Modifier>,
}

impl Modifiers {
    pub fn new(items: Vec<Modifier>) -> Self {
        Self { items }
    }

    /// The single synthetic `public` modifier.
    pub fn public() -> Self {
        Self {
            items: vec![Modifier {
                kind: ModifierKind::Public,
                span: Span::SYNTHETIC,
            }],
        }
    }

    pub fn contains(&self, kind: ModifierKind) -> bool {
        self.items.iter().any(|m| m.kind == kind)
    }

    pub fn is_static(&self) -> bool {
        self.contains(ModifierKind::Static)
    }

    pub fn is_readonly(&self) -> bool {
        self.contains(ModifierKind::Readonly)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, modifier) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(modifier.kind.keyword())?;
        }
        Ok(())
    }
}

// ============================================================================
// Attributes
// ============================================================================

/// `[Inject, Obsolete("use X")]`
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeList {
    pub attributes: Vec<Attribute>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: QualifiedName,
    pub args: Vec<Argument>,
    pub span: Span,
}

// ============================================================================
// Fields
// ============================================================================

/// Field declaration: `private readonly ILogger _logger;`
///
/// A declaration may introduce several variables sharing one type:
/// `private int _a, _b = 2;`
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub attributes: Vec<AttributeList>,
    pub modifiers: Modifiers,
    pub ty: TypeRef,
    pub variables: Vec<VariableDeclarator>,
    pub span: Span,
}

/// `name` or `name = initializer`
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclarator {
    pub name: Identifier,
    pub initializer: Option<Expression>,
    pub span: Span,
}

// ============================================================================
// Parameters
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterModifier {
    Ref,
    Out,
    In,
    Params,
    This,
}

impl ParameterModifier {
    pub fn keyword(&self) -> &'static str {
        match self {
            ParameterModifier::Ref => "ref",
            ParameterModifier::Out => "out",
            ParameterModifier::In => "in",
            ParameterModifier::Params => "params",
            ParameterModifier::This => "this",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub attributes: Vec<AttributeList>,
    pub modifier: Option<ParameterModifier>,
    pub ty: TypeRef,
    pub name: Identifier,
    pub default_value: Option<Expression>,
    pub span: Span,
}

/// Parenthesized parameter list; `span` covers both parentheses.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterList {
    pub params: Vec<Parameter>,
    pub span: Span,
}

// ============================================================================
// Bodies
// ============================================================================

/// Body of a constructor, method or accessor.
#[derive(Debug, Clone, PartialEq)]
pub enum FunctionBody {
    /// `{ ... }`
    Block(Block),
    /// `=> expression;` (span includes the arrow and the semicolon)
    Expression { expression: Expression, span: Span },
    /// `;` (abstract, extern and interface members)
    None(Span),
}

impl FunctionBody {
    pub fn span(&self) -> &Span {
        match self {
            FunctionBody::Block(block) => &block.span,
            FunctionBody::Expression { span, .. } => span,
            FunctionBody::None(span) => span,
        }
    }
}

// ============================================================================
// Constructors
// ============================================================================

/// Constructor declaration
///
/// # Example
/// ```text
/// public OrderService(IRepository repository) : base(repository)
/// {
///     _repository = repository;
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ConstructorDecl {
    pub attributes: Vec<AttributeList>,
    pub modifiers: Modifiers,
    pub name: Identifier,
    pub params: ParameterList,
    pub initializer: Option<ConstructorInitializer>,
    pub body: FunctionBody,
    pub span: Span,
    /// True when the constructor was created by a code fix, not parsed.
    pub synthesized: bool,
}

impl ConstructorDecl {
    /// Statements of the body, empty for expression bodies and `;`.
    pub fn statements(&self) -> &[Statement] {
        match &self.body {
            FunctionBody::Block(block) => &block.statements,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstructorInitializerKind {
    Base,
    This,
}

/// `base(args)` or `this(args)` after the parameter list; the span starts
/// at the keyword.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstructorInitializer {
    pub kind: ConstructorInitializerKind,
    pub args: Vec<Argument>,
    pub span: Span,
}

// ============================================================================
// Methods and Properties
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct MethodDecl {
    pub attributes: Vec<AttributeList>,
    pub modifiers: Modifiers,
    pub return_type: TypeRef,
    pub name: Identifier,
    pub type_params: Vec<Identifier>,
    pub params: ParameterList,
    pub body: FunctionBody,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDecl {
    pub attributes: Vec<AttributeList>,
    pub modifiers: Modifiers,
    pub ty: TypeRef,
    pub name: Identifier,
    pub body: PropertyBody,
    pub initializer: Option<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyBody {
    /// `{ get; private set; }`
    Accessors(Vec<Accessor>),
    /// `=> expression;`
    Expression(Expression),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessorKind {
    Get,
    Set,
    Init,
    /// Event accessors
    Add,
    Remove,
}

impl AccessorKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            AccessorKind::Get => "get",
            AccessorKind::Set => "set",
            AccessorKind::Init => "init",
            AccessorKind::Add => "add",
            AccessorKind::Remove => "remove",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Accessor {
    pub modifiers: Modifiers,
    pub kind: AccessorKind,
    pub body: FunctionBody,
    pub span: Span,
}
