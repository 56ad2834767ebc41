//! Frontend module - Lexer, Parser, AST and AST printer

pub mod token;
pub mod lexer;
pub mod ast;
pub mod parser;
pub mod printer;

pub use lexer::Lexer;
pub use parser::{parse_source, Parser};
pub use printer::print_program;
