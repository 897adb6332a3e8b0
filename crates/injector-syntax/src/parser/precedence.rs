//! Operator precedence table for binary expression parsing.
//!
//! Levels follow C#. Assignment and the conditional operator are handled
//! by dedicated productions above the binary levels; `??` is
//! right-associative, everything else here is left-associative.

use crate::ast::BinaryOperator;
use crate::token::Token;

/// Operator precedence level (higher = tighter binding).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    None = 0,
    NullCoalescing = 1, // ??
    LogicalOr = 2,      // ||
    LogicalAnd = 3,     // &&
    BitwiseOr = 4,      // |
    BitwiseXor = 5,     // ^
    BitwiseAnd = 6,     // &
    Equality = 7,       // ==, !=
    Relational = 8,     // <, >, <=, >=, is, as
    Shift = 9,          // <<, >>
    Additive = 10,      // +, -
    Multiplicative = 11, // *, /, %
}

impl Precedence {
    /// The next tighter level.
    pub fn next(self) -> Precedence {
        match self {
            Precedence::None => Precedence::NullCoalescing,
            Precedence::NullCoalescing => Precedence::LogicalOr,
            Precedence::LogicalOr => Precedence::LogicalAnd,
            Precedence::LogicalAnd => Precedence::BitwiseOr,
            Precedence::BitwiseOr => Precedence::BitwiseXor,
            Precedence::BitwiseXor => Precedence::BitwiseAnd,
            Precedence::BitwiseAnd => Precedence::Equality,
            Precedence::Equality => Precedence::Relational,
            Precedence::Relational => Precedence::Shift,
            Precedence::Shift => Precedence::Additive,
            Precedence::Additive | Precedence::Multiplicative => Precedence::Multiplicative,
        }
    }
}

/// Get the precedence of a binary operator token.
///
/// `>>` is two `>` tokens; the caller checks adjacency and asks for
/// [`Precedence::Shift`] itself.
pub fn get_precedence(token: &Token) -> Precedence {
    match token {
        Token::QuestionQuestion => Precedence::NullCoalescing,
        Token::PipePipe => Precedence::LogicalOr,
        Token::AmpAmp => Precedence::LogicalAnd,
        Token::Pipe => Precedence::BitwiseOr,
        Token::Caret => Precedence::BitwiseXor,
        Token::Amp => Precedence::BitwiseAnd,
        Token::EqualEqual | Token::BangEqual => Precedence::Equality,
        Token::Less
        | Token::LessEqual
        | Token::Greater
        | Token::GreaterEqual
        | Token::Is
        | Token::As => Precedence::Relational,
        Token::LessLess => Precedence::Shift,
        Token::Plus | Token::Minus => Precedence::Additive,
        Token::Star | Token::Slash | Token::Percent => Precedence::Multiplicative,
        _ => Precedence::None,
    }
}

/// Check if an operator is right-associative.
pub fn is_right_associative(token: &Token) -> bool {
    matches!(token, Token::QuestionQuestion)
}

/// Map a binary operator token to its AST operator.
pub fn binary_operator(token: &Token) -> Option<BinaryOperator> {
    let op = match token {
        Token::Plus => BinaryOperator::Add,
        Token::Minus => BinaryOperator::Subtract,
        Token::Star => BinaryOperator::Multiply,
        Token::Slash => BinaryOperator::Divide,
        Token::Percent => BinaryOperator::Modulo,
        Token::EqualEqual => BinaryOperator::Equal,
        Token::BangEqual => BinaryOperator::NotEqual,
        Token::Less => BinaryOperator::LessThan,
        Token::LessEqual => BinaryOperator::LessEqual,
        Token::Greater => BinaryOperator::GreaterThan,
        Token::GreaterEqual => BinaryOperator::GreaterEqual,
        Token::AmpAmp => BinaryOperator::LogicalAnd,
        Token::PipePipe => BinaryOperator::LogicalOr,
        Token::Amp => BinaryOperator::BitwiseAnd,
        Token::Pipe => BinaryOperator::BitwiseOr,
        Token::Caret => BinaryOperator::BitwiseXor,
        Token::LessLess => BinaryOperator::LeftShift,
        Token::QuestionQuestion => BinaryOperator::Coalesce,
        _ => return None,
    };
    Some(op)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_ordering() {
        assert!(Precedence::Multiplicative > Precedence::Additive);
        assert!(Precedence::Additive > Precedence::Shift);
        assert!(Precedence::Equality > Precedence::LogicalAnd);
        assert!(Precedence::LogicalAnd > Precedence::LogicalOr);
        assert!(Precedence::LogicalOr > Precedence::NullCoalescing);
    }

    #[test]
    fn test_get_precedence() {
        assert_eq!(get_precedence(&Token::Plus), Precedence::Additive);
        assert_eq!(get_precedence(&Token::Is), Precedence::Relational);
        assert_eq!(get_precedence(&Token::QuestionQuestion), Precedence::NullCoalescing);
        assert_eq!(get_precedence(&Token::Equal), Precedence::None);
    }

    #[test]
    fn test_associativity() {
        assert!(is_right_associative(&Token::QuestionQuestion));
        assert!(!is_right_associative(&Token::Minus));
    }
}
