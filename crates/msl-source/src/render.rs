use std::io::{self, Write};

use msl_core::{Diagnostic, Severity};

use super::SourceFile;

/// Renders diagnostics to a writer.
pub struct DiagnosticRenderer<'a> {
    source: &'a SourceFile,
}

impl<'a> DiagnosticRenderer<'a> {
    pub fn new(source: &'a SourceFile) -> Self {
        Self { source }
    }

    /// Render a diagnostic to the given writer.
    pub fn render<W: Write>(&self, diag: &Diagnostic, out: &mut W) -> io::Result<()> {
        let severity_str = match diag.severity() {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Note => "note",
        };

        // Header: error[E100]: message
        writeln!(
            out,
            "{}[{}]: {}",
            severity_str,
            diag.code().as_str(),
            diag.message()
        )?;

        // Location: --> file.msl:3:10
        let lc = self.source.line_col(diag.span().start());
        writeln!(out, "  --> {}:{}:{}", self.source.name(), lc.line, lc.col)?;

        // Source line with underline
        if let Some(line_text) = self.source.line_text(lc.line) {
            let line_num_width = lc.line.to_string().len();

            writeln!(out, "{:width$} |", "", width = line_num_width)?;
            writeln!(out, "{} | {}", lc.line, line_text)?;

            let underline_start = (lc.col - 1) as usize;
            let span_len = diag.span().len() as usize;
            // Clamp span to line length
            let underline_len = span_len
                .min(line_text.len().saturating_sub(underline_start))
                .max(1);

            write!(out, "{:width$} | ", "", width = line_num_width)?;
            write!(out, "{:spaces$}", "", spaces = underline_start)?;
            write!(out, "{}", "^".repeat(underline_len))?;

            if let Some(label) = diag.label() {
                write!(out, " {}", label)?;
            }
            writeln!(out)?;
        }

        // Secondary labels
        for (span, label) in diag.secondary() {
            let sec_lc = self.source.line_col(span.start());
            if let Some(line_text) = self.source.line_text(sec_lc.line) {
                let line_num_width = sec_lc.line.to_string().len();

                writeln!(out, "{:width$} |", "", width = line_num_width)?;
                writeln!(out, "{} | {}", sec_lc.line, line_text)?;

                let underline_start = (sec_lc.col - 1) as usize;
                let span_len = span.len() as usize;
                let underline_len = span_len
                    .min(line_text.len().saturating_sub(underline_start))
                    .max(1);

                write!(out, "{:width$} | ", "", width = line_num_width)?;
                write!(out, "{:spaces$}", "", spaces = underline_start)?;
                writeln!(out, "{} {}", "-".repeat(underline_len), label)?;
            }
        }

        // Notes
        for note in diag.notes() {
            writeln!(out, "  = note: {}", note)?;
        }

        Ok(())
    }

    /// Render a diagnostic to a string.
    pub fn render_to_string(&self, diag: &Diagnostic) -> String {
        let mut buf = Vec::new();
        self.render(diag, &mut buf)
            .expect("writing to Vec cannot fail");
        String::from_utf8(buf).expect("output is valid UTF-8")
    }
}
