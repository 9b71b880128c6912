use crate::span::Span;

/// A single token as produced by the lexer.
///
/// Tokens carry their literal text and the span it came from. Preprocessor
/// lines (`#include`, `#define`, ...) are lexed as one token per line and
/// flagged so the translator can pass them through verbatim.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Token {
    text: String,
    span: Span,
    preprocessor: bool,
}

impl Token {
    pub fn new(text: impl Into<String>, span: Span) -> Self {
        Self {
            text: text.into(),
            span,
            preprocessor: false,
        }
    }

    /// Create a token for a verbatim preprocessor line.
    pub fn preprocessor(text: impl Into<String>, span: Span) -> Self {
        Self {
            text: text.into(),
            span,
            preprocessor: true,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn is_preprocessor(&self) -> bool {
        self.preprocessor
    }

    /// Check the token's text against a literal.
    pub fn is(&self, literal: &str) -> bool {
        self.text == literal
    }
}
