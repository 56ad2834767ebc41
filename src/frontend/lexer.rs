//! Lexer for Ring
//!
//! Converts source code into a stream of position-tagged tokens.
//! Lexical errors are returned on the first offending character.

use std::fs;
use std::path::Path;

use crate::frontend::token::{Token, TokenKind};
use crate::utils::{Error, Location, Position, Result};

/// Read a whole source file into memory
pub fn load(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// The lexer state
pub struct Lexer {
    /// Source code as chars
    source: Vec<char>,
    /// Current index in source
    pos: usize,
    /// Current line (1-based)
    line: u32,
    /// Current column (1-based)
    column: u32,
    /// File name for diagnostics
    file: String,
    /// Tokens produced so far
    tokens: Vec<Token>,
}

impl Lexer {
    /// Create a new lexer for the given source code
    pub fn new(source: &str, file: impl Into<String>) -> Self {
        Self {
            source: source.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
            file: file.into(),
            tokens: Vec::new(),
        }
    }

    /// Load `path` and create a lexer over its contents
    pub fn from_file(path: &Path) -> Result<Self> {
        let source = load(path)?;
        Ok(Self::new(&source, path.display().to_string()))
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    /// Get the current character without advancing
    fn peek(&self) -> Option<char> {
        self.source.get(self.pos).copied()
    }

    /// Get the next character without advancing
    fn peek_next(&self) -> Option<char> {
        self.source.get(self.pos + 1).copied()
    }

    /// Advance one character on the current line
    fn bump(&mut self) {
        self.pos += 1;
        self.column += 1;
    }

    /// Advance over a newline character
    fn bump_line(&mut self) {
        self.pos += 1;
        self.line += 1;
        self.column = 1;
    }

    fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    fn location(&self, position: Position) -> Location {
        Location::new(self.file.clone(), position)
    }

    fn push(&mut self, kind: TokenKind, text: String, position: Position) {
        self.tokens.push(Token::new(kind, text, position));
    }

    /// Tokenize the entire source. The result always ends with one `Eof`.
    pub fn tokenize(&mut self) -> Result<Vec<Token>> {
        while let Some(c) = self.peek() {
            let start = self.position();
            match c {
                '\n' => self.bump_line(),
                ' ' | '\t' | '\r' => self.bump(),
                '-' if self.peek_next() == Some('-') => self.skip_comment(),
                '"' => self.read_string(start)?,
                c if c.is_ascii_digit() => self.read_number(start)?,
                c if c.is_alphabetic() || c == '_' => self.read_identifier(start),
                _ => self.read_symbol(c, start)?,
            }
        }

        let eof = self.position();
        self.tokens.push(Token::eof(eof));
        log::debug!("{}: lexed {} tokens", self.file, self.tokens.len());
        Ok(std::mem::take(&mut self.tokens))
    }

    /// `--` up to (not including) the newline
    fn skip_comment(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.bump();
        }
    }

    /// Read an identifier or keyword
    fn read_identifier(&mut self, start: Position) {
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                text.push(c);
                self.bump();
            } else {
                break;
            }
        }

        let kind = TokenKind::keyword_from_str(&text).unwrap_or(TokenKind::Identifier);
        self.push(kind, text, start);
    }

    /// Read a number literal. Underscores are dropped from the token text.
    fn read_number(&mut self, start: Position) -> Result<()> {
        let mut text = String::new();
        let mut is_float = false;

        while let Some(c) = self.peek() {
            match c {
                '0'..='9' => {
                    text.push(c);
                    self.bump();
                }
                '_' => self.bump(),
                '.' => {
                    let digit_follows = self.peek_next().map_or(false, |n| n.is_ascii_digit());
                    if is_float || !digit_follows {
                        return Err(Error::InvalidFloat {
                            location: self.location(self.position()),
                        });
                    }
                    is_float = true;
                    text.push('.');
                    self.bump();
                }
                _ => break,
            }
        }

        let kind = if is_float { TokenKind::Float } else { TokenKind::Number };
        self.push(kind, text, start);
        Ok(())
    }

    /// Read a string literal, resolving escapes
    fn read_string(&mut self, start: Position) -> Result<()> {
        self.bump(); // opening quote

        let mut value = String::new();
        loop {
            match self.peek() {
                None => {
                    return Err(Error::InvalidString {
                        location: self.location(start),
                    })
                }
                Some('"') => {
                    self.bump();
                    break;
                }
                Some('\\') => {
                    self.bump();
                    let escaped = match self.peek() {
                        Some('n') => '\n',
                        Some('t') => '\t',
                        Some('"') => '"',
                        Some('\\') => '\\',
                        Some(_) => {
                            return Err(Error::InvalidString {
                                location: self.location(self.position()),
                            })
                        }
                        None => {
                            return Err(Error::InvalidString {
                                location: self.location(start),
                            })
                        }
                    };
                    value.push(escaped);
                    self.bump();
                }
                Some('\n') => {
                    value.push('\n');
                    self.bump_line();
                }
                Some(c) => {
                    value.push(c);
                    self.bump();
                }
            }
        }

        self.push(TokenKind::String, value, start);
        Ok(())
    }

    /// Operators and punctuation
    fn read_symbol(&mut self, c: char, start: Position) -> Result<()> {
        let next = self.peek_next();
        let (kind, width) = match c {
            '+' => (TokenKind::Plus, 1),
            '-' => (TokenKind::Minus, 1),
            '*' => (TokenKind::Mul, 1),
            '/' => (TokenKind::Div, 1),
            '%' => (TokenKind::Mod, 1),
            '~' => (TokenKind::Tilde, 1),
            '@' => (TokenKind::At, 1),
            '?' => (TokenKind::Question, 1),
            ';' => (TokenKind::Semicolon, 1),
            ',' => (TokenKind::Comma, 1),
            '(' => (TokenKind::LeftParen, 1),
            ')' => (TokenKind::RightParen, 1),
            '{' => (TokenKind::LeftCurly, 1),
            '}' => (TokenKind::RightCurly, 1),
            '!' if next == Some('=') => (TokenKind::BangEqual, 2),
            '!' => (TokenKind::Bang, 1),
            '<' if next == Some('=') => (TokenKind::LesserEqual, 2),
            '<' => (TokenKind::LeftAngle, 1),
            '>' if next == Some('=') => (TokenKind::GreaterEqual, 2),
            '>' => (TokenKind::RightAngle, 1),
            '=' if next == Some('=') => (TokenKind::Equal, 2),
            '&' if next == Some('&') => (TokenKind::And, 2),
            '|' if next == Some('|') => (TokenKind::Or, 2),
            ':' => match next {
                Some(':') => (TokenKind::ConstAssignment, 2),
                Some('=') => (TokenKind::MutAssignment, 2),
                Some(_) => (TokenKind::Colon, 1),
                None => {
                    return Err(Error::ExpectedFound {
                        expected: ": or :: or :=".to_string(),
                        found: "EOF".to_string(),
                        location: self.location(start),
                    })
                }
            },
            _ => {
                return Err(Error::InvalidToken {
                    location: self.location(start),
                })
            }
        };

        let text: String = self.source[self.pos..self.pos + width].iter().collect();
        for _ in 0..width {
            self.bump();
        }
        self.push(kind, text, start);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lex(source: &str) -> Result<Vec<Token>> {
        Lexer::new(source, "test.ri").tokenize()
    }

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source).unwrap().into_iter().map(|t| t.kind).collect()
    }

    fn error_at(source: &str) -> (Error, u32, u32) {
        let err = lex(source).unwrap_err();
        let loc = err.location().cloned().unwrap();
        (err, loc.line(), loc.column())
    }

    #[test]
    fn test_empty_source_is_just_eof() {
        let tokens = lex("").unwrap();
        assert_eq!(tokens, vec![Token::eof(Position::new(1, 1))]);
    }

    #[test]
    fn test_simple_declaration() {
        assert_eq!(
            kinds("let x :: 1;"),
            vec![
                TokenKind::Let,
                TokenKind::Identifier,
                TokenKind::ConstAssignment,
                TokenKind::Number,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_single_char_symbols() {
        assert_eq!(
            kinds("+ - * / % ~ ! @ ; , ( ) { } < > ? :x"),
            vec![
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Mul,
                TokenKind::Div,
                TokenKind::Mod,
                TokenKind::Tilde,
                TokenKind::Bang,
                TokenKind::At,
                TokenKind::Semicolon,
                TokenKind::Comma,
                TokenKind::LeftParen,
                TokenKind::RightParen,
                TokenKind::LeftCurly,
                TokenKind::RightCurly,
                TokenKind::LeftAngle,
                TokenKind::RightAngle,
                TokenKind::Question,
                TokenKind::Colon,
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_two_char_operators_are_greedy() {
        let tokens = lex(":: := == != <= >= && ||").unwrap();
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["::", ":=", "==", "!=", "<=", ">=", "&&", "||", ""]);
        assert_eq!(
            tokens.iter().map(|t| t.position.column).collect::<Vec<_>>(),
            vec![1, 4, 7, 10, 13, 16, 19, 22, 24]
        );
    }

    #[test]
    fn test_positions_are_one_based() {
        let tokens = lex("let a\n  :: 10;").unwrap();
        let positions: Vec<(u32, u32)> = tokens
            .iter()
            .map(|t| (t.position.line, t.position.column))
            .collect();
        assert_eq!(positions, vec![(1, 1), (1, 5), (2, 3), (2, 6), (2, 8), (2, 9)]);
    }

    #[test]
    fn test_comment_emits_nothing_and_bumps_line() {
        let tokens = lex("--comment\nx").unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[0].position, Position::new(2, 1));
    }

    #[test]
    fn test_trailing_comment_without_newline() {
        let tokens = lex("a -- the end").unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].kind, TokenKind::Eof);
    }

    #[test]
    fn test_numbers() {
        let tokens = lex("42 1_000 3.14 1_0.2_5").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Number);
        assert_eq!(tokens[0].text, "42");
        assert_eq!(tokens[1].kind, TokenKind::Number);
        assert_eq!(tokens[1].text, "1000");
        assert_eq!(tokens[2].kind, TokenKind::Float);
        assert_eq!(tokens[2].text, "3.14");
        assert_eq!(tokens[3].kind, TokenKind::Float);
        assert_eq!(tokens[3].text, "10.25");
        assert_eq!(tokens[3].position.column, 15);
    }

    #[test]
    fn test_float_with_second_point() {
        let (err, line, column) = error_at("let b :: 1.2.3;");
        assert!(matches!(err, Error::InvalidFloat { .. }));
        assert_eq!((line, column), (1, 13));
    }

    #[test]
    fn test_float_point_without_digit() {
        let (err, line, column) = error_at("\n  7.;");
        assert!(matches!(err, Error::InvalidFloat { .. }));
        assert_eq!((line, column), (2, 4));
    }

    #[test]
    fn test_strings() {
        let tokens = lex(r#""hello\nworld" "tab\there" "q\"uote" "back\\slash""#).unwrap();
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].text, "hello\nworld");
        assert_eq!(tokens[1].text, "tab\there");
        assert_eq!(tokens[2].text, "q\"uote");
        assert_eq!(tokens[3].text, "back\\slash");
    }

    #[test]
    fn test_string_column_accounting() {
        let tokens = lex(r#"x "a\nb" y"#).unwrap();
        assert_eq!(tokens[1].position.column, 3);
        // 6 source chars for the literal, one space
        assert_eq!(tokens[2].position.column, 10);
    }

    #[test]
    fn test_multiline_string_advances_line() {
        let tokens = lex("\"one\ntwo\" z").unwrap();
        assert_eq!(tokens[0].text, "one\ntwo");
        assert_eq!(tokens[1].position, Position::new(2, 6));
    }

    #[test]
    fn test_unterminated_string() {
        let (err, line, column) = error_at("let s :: \"abc");
        assert!(matches!(err, Error::InvalidString { .. }));
        assert_eq!((line, column), (1, 10));
    }

    #[test]
    fn test_invalid_escape() {
        let (err, line, column) = error_at("  \"a\\qb\"");
        assert!(matches!(err, Error::InvalidString { .. }));
        assert_eq!((line, column), (1, 6));
    }

    #[test]
    fn test_keywords() {
        assert_eq!(
            kinds("if then elif else let begin end return true false nil iffy"),
            vec![
                TokenKind::If,
                TokenKind::Then,
                TokenKind::Elif,
                TokenKind::Else,
                TokenKind::Let,
                TokenKind::Begin,
                TokenKind::End,
                TokenKind::Return,
                TokenKind::True,
                TokenKind::False,
                TokenKind::Nil,
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_identifiers_with_underscores_and_digits() {
        let tokens = lex("_tmp foo_2 x1").unwrap();
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["_tmp", "foo_2", "x1", ""]);
    }

    #[test]
    fn test_invalid_tokens() {
        for (source, column) in [("a $", 3), ("x = 1", 3), ("a & b", 3), ("a | b", 3), ("[", 1)] {
            let (err, line, col) = error_at(source);
            assert!(matches!(err, Error::InvalidToken { .. }), "{source}");
            assert_eq!((line, col), (1, column), "{source}");
        }
    }

    #[test]
    fn test_bare_colon_at_eof() {
        let (err, line, column) = error_at("x :");
        assert_eq!((line, column), (1, 3));
        match err {
            Error::ExpectedFound { expected, found, .. } => {
                assert_eq!(expected, ": or :: or :=");
                assert_eq!(found, "EOF");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_eof_position_follows_last_char() {
        let tokens = lex("ab\ncd").unwrap();
        assert_eq!(tokens.last().unwrap().position, Position::new(2, 3));
        assert_eq!(tokens.iter().filter(|t| t.kind == TokenKind::Eof).count(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load(Path::new("/no/such/dir/prog.ri")).unwrap_err();
        assert!(matches!(err, Error::Io { ref path, .. } if path == "/no/such/dir/prog.ri"));
    }
}
