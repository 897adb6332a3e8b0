//! Statement AST nodes
//!
//! Statements appear in constructor, method and accessor bodies and inside
//! block-bodied lambdas. The set covers what constructor bodies contain in
//! practice:
//! - Local declarations and expression statements
//! - Control flow (if, switch, while, do, for, foreach, try)
//! - Resource statements (using, lock)
//! - Jumps (return, throw, break, continue)

use super::*;
use crate::token::Span;

/// Block-level statement
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Nested block: `{ ... }`
    Block(Block),

    /// Local variable declaration: `var x = 1, y = 2;`
    LocalDecl(LocalDecl),

    /// Expression statement: `_x = x;`, `Init();`
    Expression(ExpressionStatement),

    If(IfStatement),

    Switch(SwitchStatement),

    While(WhileStatement),

    DoWhile(DoWhileStatement),

    For(ForStatement),

    Foreach(ForeachStatement),

    Return(ReturnStatement),

    Throw(ThrowStatement),

    Try(TryStatement),

    /// `using (resource) body` or `using var x = ...;`
    Using(UsingStatement),

    Lock(LockStatement),

    Break(Span),

    Continue(Span),

    /// Empty statement (`;`)
    Empty(Span),
}

impl Statement {
    /// Get the span of this statement
    pub fn span(&self) -> &Span {
        match self {
            Statement::Block(s) => &s.span,
            Statement::LocalDecl(s) => &s.span,
            Statement::Expression(s) => &s.span,
            Statement::If(s) => &s.span,
            Statement::Switch(s) => &s.span,
            Statement::While(s) => &s.span,
            Statement::DoWhile(s) => &s.span,
            Statement::For(s) => &s.span,
            Statement::Foreach(s) => &s.span,
            Statement::Return(s) => &s.span,
            Statement::Throw(s) => &s.span,
            Statement::Try(s) => &s.span,
            Statement::Using(s) => &s.span,
            Statement::Lock(s) => &s.span,
            Statement::Break(span) | Statement::Continue(span) | Statement::Empty(span) => span,
        }
    }
}

/// `{ statements }`
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub span: Span,
}

impl Block {
    /// Block built in memory.
    pub fn synthetic(statements: Vec<Statement>) -> Self {
        Self {
            statements,
            span: Span::SYNTHETIC,
        }
    }
}

// ============================================================================
// Declarations and expressions
// ============================================================================

/// Local declaration
///
/// # Example
/// ```text
/// var cache = new Dictionary<string, int>();
/// int a = 1, b;
/// const int Limit = 10;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LocalDecl {
    pub is_const: bool,
    pub ty: TypeRef,
    pub variables: Vec<VariableDeclarator>,
    pub span: Span,
}

/// Expression evaluated for its effect, terminated by `;`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    pub expression: Expression,
    pub span: Span,
}

impl ExpressionStatement {
    /// Statement built in memory.
    pub fn synthetic(expression: Expression) -> Self {
        Self {
            expression,
            span: Span::SYNTHETIC,
        }
    }
}

// ============================================================================
// Control flow
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    pub condition: Expression,
    pub then_branch: Box<Statement>,
    pub else_branch: Option<Box<Statement>>,
    pub span: Span,
}

/// `switch (value) { case 1: ... default: ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchStatement {
    pub value: Expression,
    pub sections: Vec<SwitchSection>,
    pub span: Span,
}

/// One or more labels followed by the statements they select.
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchSection {
    pub labels: Vec<SwitchLabel>,
    pub statements: Vec<Statement>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SwitchLabel {
    Case(Expression),
    Default(Span),
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStatement {
    pub condition: Expression,
    pub body: Box<Statement>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DoWhileStatement {
    pub body: Box<Statement>,
    pub condition: Expression,
    pub span: Span,
}

/// `for (init; condition; update) body`
#[derive(Debug, Clone, PartialEq)]
pub struct ForStatement {
    pub init: Option<ForInit>,
    pub condition: Option<Expression>,
    pub update: Vec<Expression>,
    pub body: Box<Statement>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ForInit {
    Declaration(LocalDecl),
    Expressions(Vec<Expression>),
}

/// `foreach (var item in items) body`
#[derive(Debug, Clone, PartialEq)]
pub struct ForeachStatement {
    pub ty: TypeRef,
    pub variable: Identifier,
    pub iterable: Expression,
    pub body: Box<Statement>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStatement {
    pub value: Option<Expression>,
    pub span: Span,
}

/// `throw expr;` or a bare rethrow `throw;`
#[derive(Debug, Clone, PartialEq)]
pub struct ThrowStatement {
    pub value: Option<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TryStatement {
    pub body: Block,
    pub catches: Vec<CatchClause>,
    pub finally: Option<Block>,
    pub span: Span,
}

/// `catch (IOException ex) when (filter) { ... }`; every part but the body
/// is optional.
#[derive(Debug, Clone, PartialEq)]
pub struct CatchClause {
    pub ty: Option<TypeRef>,
    pub variable: Option<Identifier>,
    pub filter: Option<Expression>,
    pub body: Block,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UsingResource {
    Declaration(LocalDecl),
    Expression(Expression),
}

#[derive(Debug, Clone, PartialEq)]
pub struct UsingStatement {
    pub resource: UsingResource,
    /// `None` for a using declaration, which scopes to the enclosing block.
    pub body: Option<Box<Statement>>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LockStatement {
    pub target: Expression,
    pub body: Box<Statement>,
    pub span: Span,
}
