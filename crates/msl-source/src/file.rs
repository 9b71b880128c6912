use msl_core::{Pos, Span};

/// Source file identifier.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct SourceId(u16);

impl SourceId {
    pub fn new(id: u16) -> Self {
        Self(id)
    }

    pub fn as_u16(self) -> u16 {
        self.0
    }
}

/// Line and column position (1-indexed for display).
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct LineCol {
    pub line: u32,
    pub col: u32,
}

impl LineCol {
    pub fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }
}

/// A source file with line mapping.
#[derive(Clone, Debug)]
pub struct SourceFile {
    id: SourceId,
    name: String,
    source: String,
    line_starts: Vec<u32>,
}

impl SourceFile {
    /// Create a new source file, computing line starts.
    pub fn new(id: SourceId, name: String, source: String) -> Self {
        let line_starts = Self::compute_line_starts(&source);
        Self {
            id,
            name,
            source,
            line_starts,
        }
    }

    fn compute_line_starts(source: &str) -> Vec<u32> {
        let mut starts = vec![0]; // First line starts at offset 0
        for (i, c) in source.char_indices() {
            if c == '\n' {
                starts.push((i + 1) as u32);
            }
        }
        starts
    }

    pub fn id(&self) -> SourceId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Convert a byte position to line/column (1-indexed).
    pub fn line_col(&self, pos: Pos) -> LineCol {
        let offset = pos.offset();
        // Binary search for the line containing this offset
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx,      // Exact match: position is at start of line
            Err(idx) => idx - 1, // Not found: position is in previous line
        };
        let line_start = self.line_starts[line_idx];
        LineCol {
            line: (line_idx + 1) as u32,
            col: offset - line_start + 1,
        }
    }

    /// Get the text of a line (1-indexed).
    pub fn line_text(&self, line: u32) -> Option<&str> {
        if line == 0 {
            return None;
        }
        let line_idx = (line - 1) as usize;
        if line_idx >= self.line_starts.len() {
            return None;
        }
        let start = self.line_starts[line_idx] as usize;
        let end = if line_idx + 1 < self.line_starts.len() {
            // Next line starts after the newline, so subtract 1 to exclude it
            (self.line_starts[line_idx + 1] - 1) as usize
        } else {
            self.source.len()
        };
        Some(&self.source[start..end])
    }

    /// Get the text covered by a span.
    pub fn span_text(&self, span: Span) -> &str {
        let start = span.start().offset() as usize;
        let end = span.end().offset() as usize;
        &self.source[start.min(self.source.len())..end.min(self.source.len())]
    }

    /// Get the number of lines.
    pub fn line_count(&self) -> u32 {
        self.line_starts.len() as u32
    }

    /// Get the byte offset of a line start (1-indexed).
    pub fn line_start(&self, line: u32) -> Option<u32> {
        if line == 0 {
            return None;
        }
        let idx = (line - 1) as usize;
        self.line_starts.get(idx).copied()
    }
}
