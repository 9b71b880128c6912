use std::path::Path;

use msl_lang::{BuiltinRegistry, Lexer, translate};
use msl_source::{DiagnosticRenderer, SourceFile, SourceId};

use crate::error::CompileError;

/// Configuration facade over the translation pipeline.
///
/// Owns the builtin registry and the output formatting options; one
/// instance can compile any number of sources.
pub struct Compiler {
    registry: BuiltinRegistry,
    pretty: bool,
}

impl Compiler {
    /// Compiler with the standard SQF command table.
    pub fn new() -> Self {
        Self {
            registry: BuiltinRegistry::default(),
            pretty: false,
        }
    }

    /// Enable or disable pretty-printed output.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn pretty(&self) -> bool {
        self.pretty
    }

    /// Access the builtin registry, e.g. to register mod commands.
    pub fn registry_mut(&mut self) -> &mut BuiltinRegistry {
        &mut self.registry
    }

    /// Compile a source text to SQF. `name` is used for diagnostics only.
    ///
    /// Translation failures come back with the diagnostic already rendered
    /// against the source.
    pub fn compile_source(&self, name: &Path, source: &str) -> Result<String, CompileError> {
        let file = SourceFile::new(
            SourceId::new(0),
            name.display().to_string(),
            source.to_string(),
        );

        let result = Lexer::new(&file)
            .tokenize()
            .and_then(|tokens| translate(&tokens, &self.registry, self.pretty));

        result.map_err(|diag| {
            let rendered = DiagnosticRenderer::new(&file).render_to_string(&diag);
            CompileError::Translate {
                path: name.to_owned(),
                rendered,
            }
        })
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}
