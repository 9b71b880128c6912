//! Tokenization of MSL source text.

mod lexer;

pub use lexer::Lexer;
