//! Abstract Syntax Tree definitions for Ring
//!
//! Every node owns its children; recursive variants go through `Box`.

use serde::Serialize;
use std::fmt;

use crate::frontend::token::Token;

/// A complete program (compilation unit). Only declarations appear here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Program {
    pub top_level: Vec<Stmt>,
}

/// Declared type, as written after `~` or `:`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Type {
    /// `int`
    Named(String),
    /// `Map<string, int>`
    Template { name: String, args: Vec<Type> },
    /// `int(int, int)`: returns `int`, takes two `int`s
    FunctionPointer { params: Vec<Type>, returns: Box<Type> },
}

impl Type {
    pub fn named(name: impl Into<String>) -> Self {
        Type::Named(name.into())
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Named(name) => write!(f, "{}", name),
            Type::Template { name, args } => {
                write!(f, "{}<", name)?;
                write_list(f, args)?;
                write!(f, ">")
            }
            Type::FunctionPointer { params, returns } => {
                write!(f, "{}(", returns)?;
                write_list(f, params)?;
                write!(f, ")")
            }
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, types: &[Type]) -> fmt::Result {
    for (i, ty) in types.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", ty)?;
    }
    Ok(())
}

/// `let name ~ Type :: expr;` or `let name := expr;`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableDecl {
    pub name: String,
    pub declared_type: Option<Type>,
    /// `::` binds a constant, `:=` a mutable variable
    pub is_const: bool,
    pub initializer: Expr,
}

/// `let name(params) ~ Type :: begin ... end`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionDecl {
    pub name: String,
    pub params: Vec<Param>,
    pub return_type: Option<Type>,
    pub body: Vec<Stmt>,
}

/// Function parameter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Param {
    pub name: String,
    pub ty: Type,
}

/// `if (cond) then ... elif ... else ... end`
///
/// An `elif` is a single nested `If` inside `else_branch`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_branch: Vec<Stmt>,
    pub else_branch: Vec<Stmt>,
}

/// Statement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Stmt {
    VariableDecl(VariableDecl),
    FunctionDecl(FunctionDecl),
    /// `begin ... end`
    Block(Vec<Stmt>),
    /// Expression statement
    Expr(Expr),
    If(IfStmt),
    /// return expr;
    Return(Expr),
}

/// Literal value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Literal {
    Int(i64),
    Float(f64),
    String(String),
}

/// Expression
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expr {
    Literal(Literal),
    Boolean(bool),
    Nil,
    Identifier(String),
    /// Prefix operation, `op` is one of `- ? ! ~`
    Unary { op: Token, operand: Box<Expr> },
    Binary {
        left: Box<Expr>,
        op: Token,
        right: Box<Expr>,
    },
    /// Parenthesized expression, kept as its own node
    Enclosed(Box<Expr>),
    /// Function call by name
    Call { callee: String, args: Vec<Expr> },
    /// `{a, b, c}`
    Array(Vec<Expr>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_display() {
        let map = Type::Template {
            name: "Map".to_string(),
            args: vec![Type::named("string"), Type::named("int")],
        };
        assert_eq!(map.to_string(), "Map<string, int>");

        let callback = Type::FunctionPointer {
            params: vec![Type::named("int"), map],
            returns: Box::new(Type::named("bool")),
        };
        assert_eq!(callback.to_string(), "bool(int, Map<string, int>)");
    }

    #[test]
    fn test_empty_function_pointer_display() {
        let thunk = Type::FunctionPointer {
            params: vec![],
            returns: Box::new(Type::named("void")),
        };
        assert_eq!(thunk.to_string(), "void()");
    }
}
