//! Expression AST nodes
//!
//! Expressions keep enough structure for two consumers: the constructor
//! scanner, which looks for assignments at any depth, and the printer, which
//! renders synthesized statements back to source.

use super::*;
use crate::token::Span;

/// Expression (produces a value)
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Identifier: `_logger`, `value`
    Identifier(Identifier),

    /// Generic name: `Resolve<ILogger>` in `Resolve<ILogger>()`
    GenericName(GenericNameExpression),

    /// Literal: `42`, `"text"`, `'c'`, `true`, `null`
    Literal(Literal),

    /// `this`
    This(Span),

    /// `base`
    Base(Span),

    /// Member access: `a.b`, `a?.b`
    Member(MemberExpression),

    /// Invocation: `f(x)`, `a.b<T>(x)`
    Invocation(InvocationExpression),

    /// Element access: `a[i]`
    ElementAccess(ElementAccessExpression),

    /// Object creation: `new T(args) { Init = 1 }`, target-typed `new()`
    ObjectCreation(ObjectCreationExpression),

    /// Assignment: `a = b`, `a += b`, `a ??= b`
    Assignment(AssignmentExpression),

    /// Binary operation: `a + b`, `a ?? b`
    Binary(BinaryExpression),

    /// Prefix unary operation: `!a`, `-a`, `++a`, `await a`
    Unary(UnaryExpression),

    /// Postfix operation: `a++`, `a--`, `a!`
    Postfix(PostfixExpression),

    /// Conditional: `c ? a : b`
    Conditional(ConditionalExpression),

    /// Lambda: `x => x + 1`, `async (a, b) => { ... }`
    Lambda(LambdaExpression),

    /// Parenthesized: `(a)`
    Paren(ParenExpression),

    /// Throw expression: `x ?? throw new ArgumentNullException()`
    Throw(ThrowExpression),

    /// Type test or conversion: `a is T`, `a as T`
    TypeTest(TypeTestExpression),

    /// `typeof(T)`, `default(T)`, `sizeof(T)`
    TypeOperator(TypeOperatorExpression),

    /// Brace-enclosed element list of an initializer: `{ 1, 2 }`
    InitializerList(InitializerList),
}

impl Expression {
    pub fn span(&self) -> &Span {
        match self {
            Expression::Identifier(e) => &e.span,
            Expression::GenericName(e) => &e.span,
            Expression::Literal(e) => &e.span,
            Expression::This(span) | Expression::Base(span) => span,
            Expression::Member(e) => &e.span,
            Expression::Invocation(e) => &e.span,
            Expression::ElementAccess(e) => &e.span,
            Expression::ObjectCreation(e) => &e.span,
            Expression::Assignment(e) => &e.span,
            Expression::Binary(e) => &e.span,
            Expression::Unary(e) => &e.span,
            Expression::Postfix(e) => &e.span,
            Expression::Conditional(e) => &e.span,
            Expression::Lambda(e) => &e.span,
            Expression::Paren(e) => &e.span,
            Expression::Throw(e) => &e.span,
            Expression::TypeTest(e) => &e.span,
            Expression::TypeOperator(e) => &e.span,
            Expression::InitializerList(e) => &e.span,
        }
    }

    /// Name of a bare identifier expression.
    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            Expression::Identifier(id) => Some(&id.name),
            _ => None,
        }
    }

    /// Build the simple assignment `target = value`.
    pub fn assign(target: Identifier, value: Identifier) -> Self {
        Expression::Assignment(AssignmentExpression {
            operator: AssignmentOperator::Assign,
            left: Box::new(Expression::Identifier(target)),
            right: Box::new(Expression::Identifier(value)),
            span: Span::SYNTHETIC,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenericNameExpression {
    pub name: Identifier,
    pub type_args: Vec<TypeRef>,
    pub span: Span,
}

// ============================================================================
// Literals
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Number,
    String,
    Char,
    Boolean,
    Null,
}

/// Literal value, kept as raw source text.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub kind: LiteralKind,
    pub raw: String,
    pub span: Span,
}

// ============================================================================
// Access and invocation
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct MemberExpression {
    pub object: Box<Expression>,
    pub name: Identifier,
    /// Explicit type arguments: `list.Cast<int>`
    pub type_args: Vec<TypeRef>,
    /// `?.` instead of `.`
    pub conditional: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InvocationExpression {
    pub callee: Box<Expression>,
    pub args: Vec<Argument>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElementAccessExpression {
    pub object: Box<Expression>,
    pub args: Vec<Argument>,
    pub conditional: bool,
    pub span: Span,
}

/// Call or attribute argument: `x`, `ref x`, `out var y`, `name: x`.
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub name: Option<Identifier>,
    pub modifier: Option<ParameterModifier>,
    pub value: Expression,
    pub span: Span,
}

/// `new T(args)`, `new T[n]`, `new[] { .. }`, `new { A = 1 }`, `new()`
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectCreationExpression {
    /// `None` for target-typed `new()` and anonymous objects
    pub ty: Option<TypeRef>,
    /// `new T[..]`: array creation, `args` hold the dimension sizes.
    pub is_array: bool,
    pub args: Vec<Argument>,
    /// Object, collection or array initializer.
    pub initializer: Option<InitializerList>,
    pub span: Span,
}

// ============================================================================
// Operators
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentOperator {
    /// `=`
    Assign,
    /// `+=`
    AddAssign,
    /// `-=`
    SubtractAssign,
    /// `*=`
    MultiplyAssign,
    /// `/=`
    DivideAssign,
    /// `%=`
    ModuloAssign,
    /// `&=`
    AndAssign,
    /// `|=`
    OrAssign,
    /// `^=`
    XorAssign,
    /// `??=`
    CoalesceAssign,
}

impl AssignmentOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            AssignmentOperator::Assign => "=",
            AssignmentOperator::AddAssign => "+=",
            AssignmentOperator::SubtractAssign => "-=",
            AssignmentOperator::MultiplyAssign => "*=",
            AssignmentOperator::DivideAssign => "/=",
            AssignmentOperator::ModuloAssign => "%=",
            AssignmentOperator::AndAssign => "&=",
            AssignmentOperator::OrAssign => "|=",
            AssignmentOperator::XorAssign => "^=",
            AssignmentOperator::CoalesceAssign => "??=",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentExpression {
    pub operator: AssignmentOperator,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Equal,
    NotEqual,
    LessThan,
    LessEqual,
    GreaterThan,
    GreaterEqual,
    LogicalAnd,
    LogicalOr,
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    LeftShift,
    RightShift,
    Coalesce,
}

impl BinaryOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
            BinaryOperator::Equal => "==",
            BinaryOperator::NotEqual => "!=",
            BinaryOperator::LessThan => "<",
            BinaryOperator::LessEqual => "<=",
            BinaryOperator::GreaterThan => ">",
            BinaryOperator::GreaterEqual => ">=",
            BinaryOperator::LogicalAnd => "&&",
            BinaryOperator::LogicalOr => "||",
            BinaryOperator::BitwiseAnd => "&",
            BinaryOperator::BitwiseOr => "|",
            BinaryOperator::BitwiseXor => "^",
            BinaryOperator::LeftShift => "<<",
            BinaryOperator::RightShift => ">>",
            BinaryOperator::Coalesce => "??",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpression {
    pub operator: BinaryOperator,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Plus,
    Minus,
    Not,
    BitwiseNot,
    PreIncrement,
    PreDecrement,
    Await,
    /// `(T)expr`
    Cast,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpression {
    pub operator: UnaryOperator,
    pub operand: Box<Expression>,
    /// Target type of a cast.
    pub cast_type: Option<TypeRef>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostfixOperator {
    Increment,
    Decrement,
    /// Null-forgiving `!`
    NullForgiving,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostfixExpression {
    pub operator: PostfixOperator,
    pub operand: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalExpression {
    pub condition: Box<Expression>,
    pub then_expr: Box<Expression>,
    pub else_expr: Box<Expression>,
    pub span: Span,
}

// ============================================================================
// Lambdas and the rest
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct LambdaExpression {
    pub is_async: bool,
    pub params: Vec<LambdaParameter>,
    pub body: LambdaBody,
    pub span: Span,
}

/// Lambda parameter, optionally typed: `x` or `int x`.
#[derive(Debug, Clone, PartialEq)]
pub struct LambdaParameter {
    pub ty: Option<TypeRef>,
    pub name: Identifier,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LambdaBody {
    Expression(Box<Expression>),
    Block(Block),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParenExpression {
    pub expression: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThrowExpression {
    pub value: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeTestKind {
    Is,
    As,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeTestExpression {
    pub kind: TypeTestKind,
    pub operand: Box<Expression>,
    pub ty: TypeRef,
    /// Declaration pattern variable: `x is Foo foo`
    pub binding: Option<Identifier>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeOperatorKind {
    TypeOf,
    Default,
    SizeOf,
}

impl TypeOperatorKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            TypeOperatorKind::TypeOf => "typeof",
            TypeOperatorKind::Default => "default",
            TypeOperatorKind::SizeOf => "sizeof",
        }
    }

    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "typeof" => Some(TypeOperatorKind::TypeOf),
            "default" => Some(TypeOperatorKind::Default),
            "sizeof" => Some(TypeOperatorKind::SizeOf),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeOperatorExpression {
    pub kind: TypeOperatorKind,
    pub ty: TypeRef,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InitializerList {
    pub elements: Vec<Expression>,
    pub span: Span,
}
