//! Parser for Ring
//!
//! Recursive descent parser with precedence climbing for expressions.
//! The first syntax error aborts the parse; no partial tree is returned.

use crate::frontend::ast::*;
use crate::frontend::lexer::Lexer;
use crate::frontend::token::{Token, TokenKind};
use crate::utils::{Error, Location, Position, Result};

/// Deepest nesting of expressions, statements and types before the parse is rejected
pub const MAX_NESTING: usize = 128;

/// The parser
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    file: String,
    /// Current nesting, bounded by `MAX_NESTING`
    depth: usize,
}

impl Parser {
    /// Create a new parser from a lexer
    pub fn new(mut lexer: Lexer) -> Result<Self> {
        let tokens = lexer.tokenize()?;
        Ok(Self::from_tokens(tokens, lexer.file()))
    }

    /// Create a parser from pre-tokenized input
    pub fn from_tokens(mut tokens: Vec<Token>, file: impl Into<String>) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            let end = tokens.last().map(|t| t.position).unwrap_or_default();
            tokens.push(Token::eof(end));
        }
        Self {
            tokens,
            pos: 0,
            file: file.into(),
            depth: 0,
        }
    }

    // ==================== Helper Methods ====================

    fn current(&self) -> &Token {
        // `from_tokens` guarantees a trailing Eof and `advance` never steps past it
        &self.tokens[self.pos]
    }

    fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    fn is_at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    /// Advance past `kind` if it is the current token
    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Require `kind`; a missing token at end of input is an error too
    fn consume(&mut self, kind: TokenKind) -> Result<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.expected(kind.name()))
        }
    }

    /// ExpectedFound against the current token
    fn expected(&self, expected: &str) -> Error {
        let token = self.current();
        Error::ExpectedFound {
            expected: expected.to_string(),
            found: token.kind.name().to_string(),
            location: self.location(token.position),
        }
    }

    fn location(&self, position: Position) -> Location {
        Location::new(self.file.clone(), position)
    }

    /// Run `f` one nesting level deeper
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= MAX_NESTING {
            return Err(self.expected(&format!("at most {} levels of nesting", MAX_NESTING)));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn identifier(&mut self) -> Result<String> {
        Ok(self.consume(TokenKind::Identifier)?.text)
    }

    // ==================== Declarations ====================

    /// Parse a complete program
    pub fn produce_ast(&mut self) -> Result<Program> {
        let mut top_level = Vec::new();

        while !self.is_at_end() {
            if !self.check(TokenKind::Let) {
                return Err(self.expected(TokenKind::Let.name()));
            }
            top_level.push(self.declaration()?);
        }

        log::debug!("{}: parsed {} declarations", self.file, top_level.len());
        Ok(Program { top_level })
    }

    /// `let` followed by a function or variable tail
    fn declaration(&mut self) -> Result<Stmt> {
        self.consume(TokenKind::Let)?;
        let name = self.identifier()?;

        if self.check(TokenKind::LeftParen) {
            self.function_tail(name).map(Stmt::FunctionDecl)
        } else {
            self.variable_tail(name).map(Stmt::VariableDecl)
        }
    }

    fn function_tail(&mut self, name: String) -> Result<FunctionDecl> {
        log::trace!("function {}", name);
        self.consume(TokenKind::LeftParen)?;

        let mut params = Vec::new();
        if !self.check(TokenKind::RightParen) {
            loop {
                let param_name = self.identifier()?;
                self.consume(TokenKind::Colon)?;
                let ty = self.parse_type()?;
                params.push(Param {
                    name: param_name,
                    ty,
                });
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.consume(TokenKind::RightParen)?;

        let return_type = if self.eat(TokenKind::Tilde) {
            Some(self.parse_type()?)
        } else {
            None
        };

        self.consume(TokenKind::ConstAssignment)?;
        self.consume(TokenKind::Begin)?;
        let body = self.statements_until(&[TokenKind::End])?;
        self.consume(TokenKind::End)?;

        Ok(FunctionDecl {
            name,
            params,
            return_type,
            body,
        })
    }

    fn variable_tail(&mut self, name: String) -> Result<VariableDecl> {
        log::trace!("variable {}", name);
        let declared_type = if self.eat(TokenKind::Tilde) {
            Some(self.parse_type()?)
        } else {
            None
        };

        let is_const = match self.current_kind() {
            TokenKind::ConstAssignment => true,
            TokenKind::MutAssignment => false,
            _ => return Err(self.expected(":: or :=")),
        };
        self.advance();

        let initializer = self.parse_expr()?;
        self.consume(TokenKind::Semicolon)?;

        Ok(VariableDecl {
            name,
            declared_type,
            is_const,
            initializer,
        })
    }

    // ==================== Statements ====================

    /// Statements up to (not including) one of `terminators` or end of input
    fn statements_until(&mut self, terminators: &[TokenKind]) -> Result<Vec<Stmt>> {
        let mut stmts = Vec::new();
        while !self.is_at_end() && !terminators.contains(&self.current_kind()) {
            stmts.push(self.parse_stmt()?);
        }
        Ok(stmts)
    }

    fn parse_stmt(&mut self) -> Result<Stmt> {
        self.nested(Self::statement)
    }

    fn statement(&mut self) -> Result<Stmt> {
        match self.current_kind() {
            TokenKind::Let => self.declaration(),
            TokenKind::If => {
                self.advance();
                self.if_tail().map(Stmt::If)
            }
            TokenKind::Return => {
                self.advance();
                let value = self.parse_expr()?;
                self.consume(TokenKind::Semicolon)?;
                Ok(Stmt::Return(value))
            }
            TokenKind::Begin => {
                self.advance();
                let stmts = self.statements_until(&[TokenKind::End])?;
                self.consume(TokenKind::End)?;
                Ok(Stmt::Block(stmts))
            }
            _ => {
                let expr = self.parse_expr()?;
                self.eat(TokenKind::Semicolon);
                Ok(Stmt::Expr(expr))
            }
        }
    }

    /// Everything after `if` / `elif`. The whole chain shares one `end`.
    fn if_tail(&mut self) -> Result<IfStmt> {
        self.nested(Self::if_clause)
    }

    fn if_clause(&mut self) -> Result<IfStmt> {
        self.consume(TokenKind::LeftParen)?;
        let condition = self.parse_expr()?;
        self.consume(TokenKind::RightParen)?;
        self.consume(TokenKind::Then)?;

        let then_branch =
            self.statements_until(&[TokenKind::Elif, TokenKind::Else, TokenKind::End])?;

        let else_branch = match self.current_kind() {
            TokenKind::Elif => {
                self.advance();
                vec![Stmt::If(self.if_tail()?)]
            }
            TokenKind::Else => {
                self.advance();
                let stmts = self.statements_until(&[TokenKind::End])?;
                self.consume(TokenKind::End)?;
                stmts
            }
            _ => {
                self.consume(TokenKind::End)?;
                Vec::new()
            }
        };

        Ok(IfStmt {
            condition,
            then_branch,
            else_branch,
        })
    }

    // ==================== Types ====================

    /// `Name`, `Name<T, ...>` or `Ret(T, ...)`
    pub fn parse_type(&mut self) -> Result<Type> {
        self.nested(Self::type_annotation)
    }

    fn type_annotation(&mut self) -> Result<Type> {
        if !self.check(TokenKind::Identifier) {
            return Err(self.expected("Type"));
        }
        let name = self.advance().text;

        if self.eat(TokenKind::LeftParen) {
            let params = self.type_list(TokenKind::RightParen)?;
            return Ok(Type::FunctionPointer {
                params,
                returns: Box::new(Type::named(name)),
            });
        }

        if self.eat(TokenKind::LeftAngle) {
            let args = self.type_list(TokenKind::RightAngle)?;
            return Ok(Type::Template { name, args });
        }

        Ok(Type::named(name))
    }

    fn type_list(&mut self, close: TokenKind) -> Result<Vec<Type>> {
        let mut types = Vec::new();
        if !self.check(close) {
            loop {
                types.push(self.parse_type()?);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.consume(close)?;
        Ok(types)
    }

    // ==================== Expression Parsing ====================

    pub fn parse_expr(&mut self) -> Result<Expr> {
        self.parse_binary(0)
    }

    /// Precedence climbing; `prec + 1` on the right keeps operators left-associative
    fn parse_binary(&mut self, min_prec: u8) -> Result<Expr> {
        let mut left = self.parse_primary()?;

        loop {
            let Some(prec) = self.current_kind().binary_precedence() else {
                break;
            };
            if prec < min_prec {
                break;
            }

            let op = self.advance();
            let right = self.parse_binary(prec + 1)?;
            left = Expr::Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_primary(&mut self) -> Result<Expr> {
        self.nested(Self::primary)
    }

    fn primary(&mut self) -> Result<Expr> {
        let token = self.current().clone();
        let kind = token.kind;

        let expr = match kind {
            _ if kind.is_unary_prefix() => {
                self.advance();
                let operand = self.parse_primary()?;
                Expr::Unary {
                    op: token,
                    operand: Box::new(operand),
                }
            }

            TokenKind::Identifier => {
                self.advance();
                if self.eat(TokenKind::LeftParen) {
                    let args = self.expr_list(TokenKind::RightParen)?;
                    Expr::Call {
                        callee: token.text,
                        args,
                    }
                } else {
                    Expr::Identifier(token.text)
                }
            }

            // Literals
            TokenKind::Number => {
                self.advance();
                let value = token.text.parse::<i64>().map_err(|_| Error::InvalidNumber {
                    location: self.location(token.position),
                })?;
                Expr::Literal(Literal::Int(value))
            }
            TokenKind::Float => {
                self.advance();
                let value = token
                    .text
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| Error::InvalidFloat {
                        location: self.location(token.position),
                    })?;
                Expr::Literal(Literal::Float(value))
            }
            TokenKind::String => {
                self.advance();
                Expr::Literal(Literal::String(token.text))
            }
            TokenKind::True => {
                self.advance();
                Expr::Boolean(true)
            }
            TokenKind::False => {
                self.advance();
                Expr::Boolean(false)
            }
            TokenKind::Nil => {
                self.advance();
                Expr::Nil
            }

            // Array literal
            TokenKind::LeftCurly => {
                self.advance();
                Expr::Array(self.expr_list(TokenKind::RightCurly)?)
            }

            // Parenthesized
            TokenKind::LeftParen => {
                self.advance();
                let inner = self.parse_expr()?;
                self.consume(TokenKind::RightParen)?;
                Expr::Enclosed(Box::new(inner))
            }

            _ => return Err(self.expected("an Expression")),
        };

        Ok(expr)
    }

    /// Comma-separated expressions up to `close`, possibly empty
    fn expr_list(&mut self, close: TokenKind) -> Result<Vec<Expr>> {
        let mut items = Vec::new();
        if !self.check(close) {
            loop {
                items.push(self.parse_expr()?);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.consume(close)?;
        Ok(items)
    }
}

/// Lex and parse `source` in one go
pub fn parse_source(source: &str, file: &str) -> Result<Program> {
    Parser::new(Lexer::new(source, file))?.produce_ast()
}
