//! Token definitions for Ring

use serde::{Serialize, Serializer};
use std::fmt;

use crate::utils::Position;

/// A token produced by the lexer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    /// Lexeme, or the decoded value for strings and numbers
    pub text: String,
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, position: Position) -> Self {
        Self {
            kind,
            text: text.into(),
            position,
        }
    }

    pub fn eof(position: Position) -> Self {
        Self {
            kind: TokenKind::Eof,
            text: String::new(),
            position,
        }
    }
}

impl fmt::Display for Token {
    /// `line:col kind value`, the token-dump record format
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} {} {}",
            self.position.line,
            self.position.column,
            self.kind.name(),
            self.text.escape_debug()
        )
    }
}

/// Token kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // ============ Symbols ============
    /// ::
    ConstAssignment,
    /// :=
    MutAssignment,
    /// ~
    Tilde,
    /// (
    LeftParen,
    /// )
    RightParen,
    /// {
    LeftCurly,
    /// }
    RightCurly,
    /// <
    LeftAngle,
    /// >
    RightAngle,
    /// ;
    Semicolon,
    /// +
    Plus,
    /// -
    Minus,
    /// /
    Div,
    /// *
    Mul,
    /// %
    Mod,
    /// !
    Bang,
    /// ?
    Question,
    /// ,
    Comma,
    /// :
    Colon,
    /// @
    At,

    // ============ Operators ============
    /// ==
    Equal,
    /// !=
    BangEqual,
    /// <=
    LesserEqual,
    /// >=
    GreaterEqual,
    /// &&
    And,
    /// ||
    Or,

    // ============ Identifiers and Literals ============
    Identifier,
    Number,
    Float,
    String,
    True,
    False,
    Nil,

    // ============ Keywords ============
    If,
    Then,
    Elif,
    Else,
    Let,
    Begin,
    End,
    Return,

    /// End of stream
    Eof,
}

impl TokenKind {
    /// Display name used in token dumps and diagnostics
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::ConstAssignment => "Tkn_Const_Assignment",
            TokenKind::MutAssignment => "Tkn_Mut_Assignment",
            TokenKind::Tilde => "Tkn_Tilde",
            TokenKind::LeftParen => "Tkn_Lparen",
            TokenKind::RightParen => "Tkn_Rparen",
            TokenKind::LeftCurly => "Tkn_Lcurly",
            TokenKind::RightCurly => "Tkn_Rcurly",
            TokenKind::LeftAngle => "Tkn_Langle",
            TokenKind::RightAngle => "Tkn_Rangle",
            TokenKind::Semicolon => "Tkn_Semi",
            TokenKind::Plus => "Tkn_Plus",
            TokenKind::Minus => "Tkn_Minus",
            TokenKind::Div => "Tkn_Div",
            TokenKind::Mul => "Tkn_Mul",
            TokenKind::Mod => "Tkn_Mod",
            TokenKind::Bang => "Tkn_Bang",
            TokenKind::Question => "Tkn_Question",
            TokenKind::Comma => "Tkn_Comma",
            TokenKind::Colon => "Tkn_Colon",
            TokenKind::At => "Tkn_At",
            TokenKind::Equal => "Tkn_Equal",
            TokenKind::BangEqual => "Tkn_Bang_Equal",
            TokenKind::LesserEqual => "Tkn_Lesser_Equal",
            TokenKind::GreaterEqual => "Tkn_Greater_Equal",
            TokenKind::And => "Tkn_And",
            TokenKind::Or => "Tkn_Or",
            TokenKind::Identifier => "Tkn_Identifier",
            TokenKind::Number => "Tkn_Number",
            TokenKind::Float => "Tkn_Float",
            TokenKind::String => "Tkn_String",
            TokenKind::True => "Tkn_True",
            TokenKind::False => "Tkn_False",
            TokenKind::Nil => "Tkn_Nil",
            TokenKind::If => "Tkn_If",
            TokenKind::Then => "Tkn_Then",
            TokenKind::Elif => "Tkn_Elif",
            TokenKind::Else => "Tkn_Else",
            TokenKind::Let => "Tkn_Let",
            TokenKind::Begin => "Tkn_Begin",
            TokenKind::End => "Tkn_End",
            TokenKind::Return => "Tkn_Ret",
            TokenKind::Eof => "Tkn_Eof",
        }
    }

    /// Try to convert an identifier to a keyword
    pub fn keyword_from_str(s: &str) -> Option<TokenKind> {
        match s {
            "if" => Some(TokenKind::If),
            "let" => Some(TokenKind::Let),
            "begin" => Some(TokenKind::Begin),
            "end" => Some(TokenKind::End),
            "return" => Some(TokenKind::Return),
            "true" => Some(TokenKind::True),
            "false" => Some(TokenKind::False),
            "nil" => Some(TokenKind::Nil),
            "then" => Some(TokenKind::Then),
            "else" => Some(TokenKind::Else),
            "elif" => Some(TokenKind::Elif),
            _ => None,
        }
    }

    /// Get the precedence of a binary operator (for precedence climbing).
    /// Returns None if not a binary operator, which ends the climb.
    pub fn binary_precedence(self) -> Option<u8> {
        match self {
            // Multiplicative (highest for binary)
            TokenKind::Mul | TokenKind::Div | TokenKind::Mod => Some(80),

            // Additive
            TokenKind::Plus | TokenKind::Minus => Some(70),

            // Comparison
            TokenKind::LeftAngle
            | TokenKind::RightAngle
            | TokenKind::LesserEqual
            | TokenKind::GreaterEqual => Some(60),

            // Equality
            TokenKind::Equal | TokenKind::BangEqual => Some(50),

            // Logical AND
            TokenKind::And => Some(40),

            // Logical OR
            TokenKind::Or => Some(30),

            _ => None,
        }
    }

    /// Prefix operators accepted in primary position
    pub fn is_unary_prefix(self) -> bool {
        matches!(
            self,
            TokenKind::Minus | TokenKind::Question | TokenKind::Bang | TokenKind::Tilde
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for TokenKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}
