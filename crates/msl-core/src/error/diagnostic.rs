use super::code::ErrorCode;
use crate::span::Span;

/// Severity level of a diagnostic.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

/// A diagnostic message with location and context.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Diagnostic {
    severity: Severity,
    code: ErrorCode,
    message: String,
    span: Span,
    label: Option<String>,
    secondary: Vec<(Span, String)>,
    notes: Vec<String>,
}

impl Diagnostic {
    /// Start building an error diagnostic.
    pub fn error(code: ErrorCode, span: Span) -> DiagnosticBuilder {
        DiagnosticBuilder::new(Severity::Error, code, span)
    }

    /// Start building a warning diagnostic.
    pub fn warning(code: ErrorCode, span: Span) -> DiagnosticBuilder {
        DiagnosticBuilder::new(Severity::Warning, code, span)
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn secondary(&self) -> &[(Span, String)] {
        &self.secondary
    }

    pub fn notes(&self) -> &[String] {
        &self.notes
    }
}

/// Builder for constructing diagnostics.
pub struct DiagnosticBuilder {
    severity: Severity,
    code: ErrorCode,
    span: Span,
    message: Option<String>,
    label: Option<String>,
    secondary: Vec<(Span, String)>,
    notes: Vec<String>,
}

impl DiagnosticBuilder {
    fn new(severity: Severity, code: ErrorCode, span: Span) -> Self {
        Self {
            severity,
            code,
            span,
            message: None,
            label: None,
            secondary: Vec::new(),
            notes: Vec::new(),
        }
    }

    /// Set the main message.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Set the primary label.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Add a secondary label.
    pub fn secondary(mut self, span: Span, label: impl Into<String>) -> Self {
        self.secondary.push((span, label.into()));
        self
    }

    /// Add a note.
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Build the diagnostic.
    pub fn build(self) -> Diagnostic {
        Diagnostic {
            severity: self.severity,
            code: self.code,
            message: self
                .message
                .unwrap_or_else(|| self.code.message().to_string()),
            span: self.span,
            label: self.label,
            secondary: self.secondary,
            notes: self.notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Pos;

    #[test]
    fn builder_basic() {
        let span = Span::new(Pos::new(10), Pos::new(15));
        let diag = Diagnostic::error(ErrorCode::E100, span)
            .message("custom message")
            .build();

        assert_eq!(diag.severity(), Severity::Error);
        assert_eq!(diag.code(), ErrorCode::E100);
        assert_eq!(diag.message(), "custom message");
        assert_eq!(diag.span(), span);
    }

    #[test]
    fn builder_default_message() {
        let span = Span::new(Pos::new(0), Pos::new(5));
        let diag = Diagnostic::error(ErrorCode::E001, span).build();

        assert_eq!(diag.message(), "unterminated string literal");
    }

    #[test]
    fn builder_with_label() {
        let span = Span::new(Pos::new(0), Pos::new(5));
        let diag = Diagnostic::error(ErrorCode::E100, span)
            .label("expected ';' here")
            .build();

        assert_eq!(diag.label(), Some("expected ';' here"));
    }

    #[test]
    fn builder_with_secondary() {
        let span = Span::new(Pos::new(0), Pos::new(5));
        let span2 = Span::new(Pos::new(10), Pos::new(15));
        let diag = Diagnostic::error(ErrorCode::E102, span)
            .secondary(span2, "inline code starts here")
            .build();

        assert_eq!(diag.secondary().len(), 1);
        assert_eq!(diag.secondary()[0].0, span2);
        assert_eq!(diag.secondary()[0].1, "inline code starts here");
    }

    #[test]
    fn builder_with_notes() {
        let span = Span::new(Pos::new(0), Pos::new(5));
        let diag = Diagnostic::error(ErrorCode::E102, span)
            .note("first note")
            .note("second note")
            .build();

        assert_eq!(diag.notes().len(), 2);
        assert_eq!(diag.notes()[0], "first note");
    }

    #[test]
    fn warning_severity() {
        let span = Span::new(Pos::new(0), Pos::new(5));
        let diag = Diagnostic::warning(ErrorCode::E100, span).build();
        assert_eq!(diag.severity(), Severity::Warning);
    }
}
