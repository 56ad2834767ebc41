//! Ring language front end
//!
//! Lexes and parses `.ri` source files into an AST. The first lexical or
//! syntax error stops processing and is returned as [`utils::Error`];
//! [`utils::Report`] renders it for humans and [`feedback::ErrorReport`]
//! for tools.

pub mod feedback;
pub mod frontend;
pub mod utils;
