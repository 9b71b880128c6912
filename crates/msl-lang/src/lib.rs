//! The MSL language engine.
//!
//! This crate provides the compiler pipeline for MSL, a C-style scripting
//! dialect that translates into SQF:
//! - `lex` - Tokenization of raw source text
//! - `builtins` - The SQF command signature registry
//! - `translate` - Token-stream to SQF text translation
//!
//! The pipeline is a single pass: the translator walks the token stream and
//! emits SQF as it recognizes each production. There is no AST and no
//! backpatching of emitted text.

pub mod builtins;
pub mod lex;
pub mod translate;

// Re-export commonly used types at crate root
pub use builtins::{BuiltinRegistry, BuiltinSignature, CallConvention};
pub use lex::Lexer;
pub use translate::{Translator, translate};

use msl_core::Diagnostic;
use msl_source::{SourceFile, SourceId};

/// Lex and translate a complete source text in one call.
///
/// This is the convenience entry for callers that hold raw text rather than
/// a token stream; file naming only matters for diagnostics.
pub fn translate_source(
    name: &str,
    source: &str,
    registry: &BuiltinRegistry,
    pretty: bool,
) -> Result<String, Diagnostic> {
    let file = SourceFile::new(SourceId::new(0), name.to_string(), source.to_string());
    let tokens = Lexer::new(&file).tokenize()?;
    translate(&tokens, registry, pretty)
}
