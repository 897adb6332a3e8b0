//! Lexer for C# source.
//!
//! This module implements the lexer using the logos library. It converts
//! source code into a stream of tokens with precise source locations.
//! Comments, whitespace and preprocessor lines are skipped; the original
//! text stays available to callers through the spans.

use crate::token::{Span, Token};
use logos::Logos;
use thiserror::Error;

/// Logos-based token enum for lexing.
///
/// It's converted to the public [`Token`] enum after lexing.
#[derive(Logos, Debug, Clone, PartialEq)]
enum LogosToken {
    // Whitespace (skip)
    #[regex(r"[ \t\r\n\f]+", logos::skip)]
    Whitespace,

    // Comments (skip)
    #[regex(r"//[^\n]*", logos::skip)]
    LineComment,

    #[token("/*", lex_block_comment)]
    BlockComment,

    // Preprocessor directives (#region, #nullable, ...)
    #[regex(r"#[^\n]*", logos::skip)]
    Directive,

    // Keywords (must come before identifiers)
    #[token("namespace")]
    Namespace,
    #[token("using")]
    Using,
    #[token("class")]
    Class,
    #[token("struct")]
    Struct,
    #[token("interface")]
    Interface,
    #[token("enum")]
    Enum,

    #[token("public")]
    Public,
    #[token("private")]
    Private,
    #[token("protected")]
    Protected,
    #[token("internal")]
    Internal,
    #[token("static")]
    Static,
    #[token("readonly")]
    Readonly,
    #[token("const")]
    Const,
    #[token("abstract")]
    Abstract,
    #[token("sealed")]
    Sealed,
    #[token("partial")]
    Partial,
    #[token("virtual")]
    Virtual,
    #[token("override")]
    Override,
    #[token("async")]
    Async,
    #[token("extern")]
    Extern,
    #[token("unsafe")]
    Unsafe,
    #[token("volatile")]
    Volatile,

    #[token("ref")]
    Ref,
    #[token("out")]
    Out,
    #[token("in")]
    In,
    #[token("params")]
    Params,

    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("while")]
    While,
    #[token("do")]
    Do,
    #[token("for")]
    For,
    #[token("foreach")]
    Foreach,
    #[token("return")]
    Return,
    #[token("throw")]
    Throw,
    #[token("break")]
    Break,
    #[token("continue")]
    Continue,
    #[token("try")]
    Try,
    #[token("catch")]
    Catch,
    #[token("finally")]
    Finally,

    #[token("new")]
    New,
    #[token("this")]
    This,
    #[token("base")]
    Base,
    #[token("await")]
    Await,
    #[token("is")]
    Is,
    #[token("as")]
    As,

    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    Null,

    // Identifiers (must come after keywords); `@` escapes a keyword
    #[regex(r"@?[\p{XID_Start}_][\p{XID_Continue}]*", |lex| lex.slice().to_string())]
    Identifier(String),

    // Numbers, kept as raw text including suffixes
    #[regex(r"0[xX][0-9a-fA-F_]+[uUlL]*", |lex| lex.slice().to_string())]
    #[regex(r"0[bB][01_]+[uUlL]*", |lex| lex.slice().to_string())]
    #[regex(r"[0-9][0-9_]*(\.[0-9][0-9_]*)?([eE][+-]?[0-9]+)?[fFdDmMuUlL]*", |lex| lex.slice().to_string())]
    NumberLiteral(String),

    // Strings: regular, verbatim and interpolated
    #[regex(r#""([^"\\\n]|\\.)*""#, |lex| lex.slice().to_string())]
    #[regex(r#"@"([^"]|"")*""#, |lex| lex.slice().to_string())]
    #[regex(r#"\$"([^"\\\n]|\\.)*""#, |lex| lex.slice().to_string())]
    #[regex(r#"(\$@|@\$)"([^"]|"")*""#, |lex| lex.slice().to_string())]
    StringLiteral(String),

    #[regex(r"'([^'\\\n]|\\.)+'", |lex| lex.slice().to_string())]
    CharLiteral(String),

    // Operators (longer tokens win)
    #[token("??=")]
    QuestionQuestionEqual,
    #[token("==")]
    EqualEqual,
    #[token("!=")]
    BangEqual,
    #[token("<=")]
    LessEqual,
    #[token(">=")]
    GreaterEqual,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,
    #[token("<<")]
    LessLess,
    #[token("?.")]
    QuestionDot,
    #[token("??")]
    QuestionQuestion,
    #[token("=>")]
    Arrow,
    #[token("+=")]
    PlusEqual,
    #[token("-=")]
    MinusEqual,
    #[token("*=")]
    StarEqual,
    #[token("/=")]
    SlashEqual,
    #[token("%=")]
    PercentEqual,
    #[token("&=")]
    AmpEqual,
    #[token("|=")]
    PipeEqual,
    #[token("^=")]
    CaretEqual,

    // Single-character tokens
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("!")]
    Bang,
    #[token("~")]
    Tilde,
    #[token("<")]
    Less,
    #[token(">")]
    Greater,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("=")]
    Equal,
    #[token("?")]
    Question,
    #[token(".")]
    Dot,
    #[token(":")]
    Colon,
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("{")]
    LeftBrace,
    #[token("}")]
    RightBrace,
    #[token("[")]
    LeftBracket,
    #[token("]")]
    RightBracket,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
}

fn lex_block_comment(lex: &mut logos::Lexer<LogosToken>) -> logos::Skip {
    // "/*" is already consumed, find the matching "*/"
    let remainder = lex.remainder();

    if let Some(end) = remainder.find("*/") {
        lex.bump(end + 2);
    } else {
        // Unterminated comment - consume to end
        lex.bump(remainder.len());
    }

    logos::Skip
}

/// Lexer error types.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    #[error("Unexpected character '{char}' at {}:{}", .span.line, .span.column)]
    UnexpectedCharacter { char: char, span: Span },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::UnexpectedCharacter { span, .. } => *span,
        }
    }
}

/// Main lexer structure.
pub struct Lexer<'a> {
    source: &'a str,
    tokens: Vec<(Token, Span)>,
    errors: Vec<LexError>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Tokenize the whole source. The returned stream always ends with
    /// [`Token::Eof`].
    pub fn tokenize(mut self) -> Result<Vec<(Token, Span)>, Vec<LexError>> {
        let mut logos_lexer = LogosToken::lexer(self.source);
        let mut line = 1u32;
        let mut column = 1u32;
        let mut last_end = 0;

        while let Some(token_result) = logos_lexer.next() {
            let range = logos_lexer.span();

            // Advance line/column over skipped text
            advance_position(&self.source[last_end..range.start], &mut line, &mut column);

            let span = Span::new(range.start, range.end, line, column);

            match token_result {
                Ok(logos_token) => {
                    let token = convert_token(logos_token);
                    self.tokens.push((token, span));
                }
                Err(()) => {
                    let char = self.source[range.start..].chars().next().unwrap_or('\0');
                    self.errors.push(LexError::UnexpectedCharacter { char, span });
                }
            }

            advance_position(&self.source[range.start..range.end], &mut line, &mut column);
            last_end = range.end;
        }

        advance_position(&self.source[last_end..], &mut line, &mut column);
        let eof_span = Span::new(self.source.len(), self.source.len(), line, column);
        self.tokens.push((Token::Eof, eof_span));

        if self.errors.is_empty() {
            Ok(self.tokens)
        } else {
            Err(self.errors)
        }
    }
}

fn advance_position(text: &str, line: &mut u32, column: &mut u32) {
    for c in text.chars() {
        if c == '\n' {
            *line += 1;
            *column = 1;
        } else {
            *column += 1;
        }
    }
}

fn convert_token(logos_token: LogosToken) -> Token {
    match logos_token {
        LogosToken::Namespace => Token::Namespace,
        LogosToken::Using => Token::Using,
        LogosToken::Class => Token::Class,
        LogosToken::Struct => Token::Struct,
        LogosToken::Interface => Token::Interface,
        LogosToken::Enum => Token::Enum,
        LogosToken::Public => Token::Public,
        LogosToken::Private => Token::Private,
        LogosToken::Protected => Token::Protected,
        LogosToken::Internal => Token::Internal,
        LogosToken::Static => Token::Static,
        LogosToken::Readonly => Token::Readonly,
        LogosToken::Const => Token::Const,
        LogosToken::Abstract => Token::Abstract,
        LogosToken::Sealed => Token::Sealed,
        LogosToken::Partial => Token::Partial,
        LogosToken::Virtual => Token::Virtual,
        LogosToken::Override => Token::Override,
        LogosToken::Async => Token::Async,
        LogosToken::Extern => Token::Extern,
        LogosToken::Unsafe => Token::Unsafe,
        LogosToken::Volatile => Token::Volatile,
        LogosToken::Ref => Token::Ref,
        LogosToken::Out => Token::Out,
        LogosToken::In => Token::In,
        LogosToken::Params => Token::Params,
        LogosToken::If => Token::If,
        LogosToken::Else => Token::Else,
        LogosToken::While => Token::While,
        LogosToken::Do => Token::Do,
        LogosToken::For => Token::For,
        LogosToken::Foreach => Token::Foreach,
        LogosToken::Return => Token::Return,
        LogosToken::Throw => Token::Throw,
        LogosToken::Break => Token::Break,
        LogosToken::Continue => Token::Continue,
        LogosToken::Try => Token::Try,
        LogosToken::Catch => Token::Catch,
        LogosToken::Finally => Token::Finally,
        LogosToken::New => Token::New,
        LogosToken::This => Token::This,
        LogosToken::Base => Token::Base,
        LogosToken::Await => Token::Await,
        LogosToken::Is => Token::Is,
        LogosToken::As => Token::As,
        LogosToken::True => Token::True,
        LogosToken::False => Token::False,
        LogosToken::Null => Token::Null,
        LogosToken::Identifier(s) => Token::Identifier(s),
        LogosToken::NumberLiteral(s) => Token::NumberLiteral(s),
        LogosToken::StringLiteral(s) => Token::StringLiteral(s),
        LogosToken::CharLiteral(s) => Token::CharLiteral(s),
        LogosToken::QuestionQuestionEqual => Token::QuestionQuestionEqual,
        LogosToken::EqualEqual => Token::EqualEqual,
        LogosToken::BangEqual => Token::BangEqual,
        LogosToken::LessEqual => Token::LessEqual,
        LogosToken::GreaterEqual => Token::GreaterEqual,
        LogosToken::AmpAmp => Token::AmpAmp,
        LogosToken::PipePipe => Token::PipePipe,
        LogosToken::PlusPlus => Token::PlusPlus,
        LogosToken::MinusMinus => Token::MinusMinus,
        LogosToken::LessLess => Token::LessLess,
        LogosToken::QuestionDot => Token::QuestionDot,
        LogosToken::QuestionQuestion => Token::QuestionQuestion,
        LogosToken::Arrow => Token::Arrow,
        LogosToken::PlusEqual => Token::PlusEqual,
        LogosToken::MinusEqual => Token::MinusEqual,
        LogosToken::StarEqual => Token::StarEqual,
        LogosToken::SlashEqual => Token::SlashEqual,
        LogosToken::PercentEqual => Token::PercentEqual,
        LogosToken::AmpEqual => Token::AmpEqual,
        LogosToken::PipeEqual => Token::PipeEqual,
        LogosToken::CaretEqual => Token::CaretEqual,
        LogosToken::Plus => Token::Plus,
        LogosToken::Minus => Token::Minus,
        LogosToken::Star => Token::Star,
        LogosToken::Slash => Token::Slash,
        LogosToken::Percent => Token::Percent,
        LogosToken::Bang => Token::Bang,
        LogosToken::Tilde => Token::Tilde,
        LogosToken::Less => Token::Less,
        LogosToken::Greater => Token::Greater,
        LogosToken::Amp => Token::Amp,
        LogosToken::Pipe => Token::Pipe,
        LogosToken::Caret => Token::Caret,
        LogosToken::Equal => Token::Equal,
        LogosToken::Question => Token::Question,
        LogosToken::Dot => Token::Dot,
        LogosToken::Colon => Token::Colon,
        LogosToken::LeftParen => Token::LeftParen,
        LogosToken::RightParen => Token::RightParen,
        LogosToken::LeftBrace => Token::LeftBrace,
        LogosToken::RightBrace => Token::RightBrace,
        LogosToken::LeftBracket => Token::LeftBracket,
        LogosToken::RightBracket => Token::RightBracket,
        LogosToken::Semicolon => Token::Semicolon,
        LogosToken::Comma => Token::Comma,
        LogosToken::Whitespace
        | LogosToken::LineComment
        | LogosToken::BlockComment
        | LogosToken::Directive => {
            unreachable!("Whitespace, comments and directives are skipped")
        }
    }
}
