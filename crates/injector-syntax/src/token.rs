//! Token definitions for the C# declaration subset.
//!
//! This module defines all tokens the lexer produces, including keywords,
//! operators, literals, and special tokens. Predefined type names (`int`,
//! `string`, ...) and contextual keywords (`var`, `get`, `set`, `where`,
//! `nameof`) are lexed as identifiers.

use serde::Serialize;
use std::fmt;

/// A token of C# source.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Declarations
    Namespace,
    Using,
    Class,
    Struct,
    Interface,
    Enum,

    // Modifiers
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

    // Parameter modifiers
    Ref,
    Out,
    In,
    Params,

    // Control flow
    If,
    Else,
    While,
    Do,
    For,
    Foreach,
    Return,
    Throw,
    Break,
    Continue,
    Try,
    Catch,
    Finally,

    // Expressions
    New,
    This,
    Base,
    Await,
    Is,
    As,

    // Literals (raw source text is kept so printing is lossless)
    NumberLiteral(String),
    StringLiteral(String),
    CharLiteral(String),
    True,
    False,
    Null,

    // Identifiers
    Identifier(String),

    // Arithmetic
    Plus,
    Minus,
    Star,
    Slash,
    Percent,

    // Unary
    PlusPlus,
    MinusMinus,
    Bang,
    Tilde,

    // Comparison
    EqualEqual,
    BangEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,

    // Logical
    AmpAmp,
    PipePipe,

    // Bitwise
    Amp,
    Pipe,
    Caret,
    LessLess,

    // Assignment
    Equal,
    PlusEqual,
    MinusEqual,
    StarEqual,
    SlashEqual,
    PercentEqual,
    AmpEqual,
    PipeEqual,
    CaretEqual,
    QuestionQuestionEqual,

    // Other
    Question,
    QuestionQuestion,
    QuestionDot,
    Dot,
    Colon,
    Arrow,

    // Delimiters
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    Semicolon,
    Comma,

    // Special
    Eof,
}

/// Source location information for a token or node.
///
/// `start`/`end` are byte offsets into the source; `line` and `column` are
/// 1-based and count characters, so a tab is one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: u32,
    pub column: u32,
}

impl Span {
    /// Span carried by nodes that were built in memory rather than parsed.
    pub const SYNTHETIC: Span = Span {
        start: 0,
        end: 0,
        line: 0,
        column: 0,
    };

    pub fn new(start: usize, end: usize, line: u32, column: u32) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// True for [`Span::SYNTHETIC`]; parsed spans always have `line >= 1`.
    pub fn is_synthetic(&self) -> bool {
        self.line == 0
    }

    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }

    /// Span from the start of `self` to the end of `other`.
    pub fn to(&self, other: &Span) -> Span {
        Span {
            start: self.start,
            end: other.end,
            line: self.line,
            column: self.column,
        }
    }
}

impl Token {
    /// Check if this token is a member or type modifier keyword.
    pub fn is_modifier(&self) -> bool {
        matches!(
            self,
            Token::Public
                | Token::Private
                | Token::Protected
                | Token::Internal
                | Token::Static
                | Token::Readonly
                | Token::Const
                | Token::Abstract
                | Token::Sealed
                | Token::Partial
                | Token::Virtual
                | Token::Override
                | Token::Async
                | Token::Extern
                | Token::Unsafe
                | Token::Volatile
        )
    }

    /// Check if this token is an assignment operator.
    pub fn is_assignment_operator(&self) -> bool {
        matches!(
            self,
            Token::Equal
                | Token::PlusEqual
                | Token::MinusEqual
                | Token::StarEqual
                | Token::SlashEqual
                | Token::PercentEqual
                | Token::AmpEqual
                | Token::PipeEqual
                | Token::CaretEqual
                | Token::QuestionQuestionEqual
        )
    }

    /// Identifier text, if this is an identifier token.
    pub fn identifier(&self) -> Option<&str> {
        match self {
            Token::Identifier(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Token::Namespace => "namespace",
            Token::Using => "using",
            Token::Class => "class",
            Token::Struct => "struct",
            Token::Interface => "interface",
            Token::Enum => "enum",
            Token::Public => "public",
            Token::Private => "private",
            Token::Protected => "protected",
            Token::Internal => "internal",
            Token::Static => "static",
            Token::Readonly => "readonly",
            Token::Const => "const",
            Token::Abstract => "abstract",
            Token::Sealed => "sealed",
            Token::Partial => "partial",
            Token::Virtual => "virtual",
            Token::Override => "override",
            Token::Async => "async",
            Token::Extern => "extern",
            Token::Unsafe => "unsafe",
            Token::Volatile => "volatile",
            Token::Ref => "ref",
            Token::Out => "out",
            Token::In => "in",
            Token::Params => "params",
            Token::If => "if",
            Token::Else => "else",
            Token::While => "while",
            Token::Do => "do",
            Token::For => "for",
            Token::Foreach => "foreach",
            Token::Return => "return",
            Token::Throw => "throw",
            Token::Break => "break",
            Token::Continue => "continue",
            Token::Try => "try",
            Token::Catch => "catch",
            Token::Finally => "finally",
            Token::New => "new",
            Token::This => "this",
            Token::Base => "base",
            Token::Await => "await",
            Token::Is => "is",
            Token::As => "as",
            Token::NumberLiteral(raw) | Token::StringLiteral(raw) | Token::CharLiteral(raw) => {
                return write!(f, "{}", raw);
            }
            Token::True => "true",
            Token::False => "false",
            Token::Null => "null",
            Token::Identifier(name) => return write!(f, "{}", name),
            Token::Plus => "+",
            Token::Minus => "-",
            Token::Star => "*",
            Token::Slash => "/",
            Token::Percent => "%",
            Token::PlusPlus => "++",
            Token::MinusMinus => "--",
            Token::Bang => "!",
            Token::Tilde => "~",
            Token::EqualEqual => "==",
            Token::BangEqual => "!=",
            Token::Less => "<",
            Token::LessEqual => "<=",
            Token::Greater => ">",
            Token::GreaterEqual => ">=",
            Token::AmpAmp => "&&",
            Token::PipePipe => "||",
            Token::Amp => "&",
            Token::Pipe => "|",
            Token::Caret => "^",
            Token::LessLess => "<<",
            Token::Equal => "=",
            Token::PlusEqual => "+=",
            Token::MinusEqual => "-=",
            Token::StarEqual => "*=",
            Token::SlashEqual => "/=",
            Token::PercentEqual => "%=",
            Token::AmpEqual => "&=",
            Token::PipeEqual => "|=",
            Token::CaretEqual => "^=",
            Token::QuestionQuestionEqual => "??=",
            Token::Question => "?",
            Token::QuestionQuestion => "??",
            Token::QuestionDot => "?.",
            Token::Dot => ".",
            Token::Colon => ":",
            Token::Arrow => "=>",
            Token::LeftParen => "(",
            Token::RightParen => ")",
            Token::LeftBrace => "{",
            Token::RightBrace => "}",
            Token::LeftBracket => "[",
            Token::RightBracket => "]",
            Token::Semicolon => ";",
            Token::Comma => ",",
            Token::Eof => "end of file",
        };
        write!(f, "{}", text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_span() {
        assert!(Span::SYNTHETIC.is_synthetic());
        assert!(!Span::new(0, 1, 1, 1).is_synthetic());
    }

    #[test]
    fn test_span_to() {
        let a = Span::new(4, 8, 2, 3);
        let b = Span::new(10, 14, 2, 9);
        let joined = a.to(&b);
        assert_eq!(joined.start, 4);
        assert_eq!(joined.end, 14);
        assert_eq!(joined.line, 2);
        assert_eq!(joined.column, 3);
    }

    #[test]
    fn test_token_display() {
        assert_eq!(Token::Readonly.to_string(), "readonly");
        assert_eq!(Token::Identifier("_name".to_string()).to_string(), "_name");
        assert_eq!(Token::QuestionQuestionEqual.to_string(), "??=");
    }
}
