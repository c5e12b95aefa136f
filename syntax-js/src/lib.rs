//! Lexer and parser for the sandbox-js scripting subset: a C-family language
//! with functions, closures, classes, destructuring, spread/rest, template
//! strings, and `async`/`await`.
//!
//! The parser produces a [`ast::Node`]-wrapped tree with byte-range source
//! locations; evaluation lives in the `sandbox-js` crate.

pub mod ast;
pub mod error;
pub mod lex;
pub mod loc;
pub mod num;
pub mod parse;
pub mod source;
pub mod token;

pub use error::{SyntaxError, SyntaxErrorType, SyntaxResult};
pub use loc::Loc;
pub use parse::{parse, Parser};
pub use source::SourceText;
