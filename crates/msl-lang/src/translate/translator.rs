use msl_core::{Diagnostic, ErrorCode, Token};
use smallvec::SmallVec;

use super::cursor::TokenCursor;
use super::output::OutputBuffer;
use crate::builtins::BuiltinRegistry;

/// Translate a token stream into SQF text.
///
/// Returns the complete output, or the first fatal diagnostic. Partial
/// output is never surfaced.
pub fn translate(
    tokens: &[Token],
    registry: &BuiltinRegistry,
    pretty: bool,
) -> Result<String, Diagnostic> {
    Translator::new(tokens, registry, pretty).run()
}

/// Single-pass recursive-descent translator.
///
/// One instance per compilation unit: the top-level token stream, or the
/// re-lexed body of an inline code literal. The cursor and output buffer
/// are exclusively owned; only the builtin registry is shared, read-only.
pub struct Translator<'a> {
    pub(super) cursor: TokenCursor<'a>,
    pub(super) output: OutputBuffer,
    pub(super) registry: &'a BuiltinRegistry,
}

impl<'a> Translator<'a> {
    pub fn new(tokens: &'a [Token], registry: &'a BuiltinRegistry, pretty: bool) -> Self {
        Self {
            cursor: TokenCursor::new(tokens),
            output: OutputBuffer::new(pretty),
            registry,
        }
    }

    /// Run the translation to completion.
    pub fn run(mut self) -> Result<String, Diagnostic> {
        while !self.cursor.at_end() {
            let before = self.cursor.index();
            self.parse_block()?;
            if self.cursor.index() == before {
                // A block terminator with no enclosing block to consume it.
                return Err(self.cursor.grammar_error("a statement"));
            }
        }
        Ok(self.output.finish())
    }

    /// A block is a sequence of statements up to the enclosing block's
    /// closing delimiter (or a case/default label, or end of input). The
    /// terminator itself is left for the caller.
    pub(super) fn parse_block(&mut self) -> Result<(), Diagnostic> {
        while !self.cursor.at_end()
            && !self.cursor.accept("}")
            && !self.cursor.accept("case")
            && !self.cursor.accept("default")
        {
            self.parse_node()?;
        }
        Ok(())
    }

    /// Dispatch a single statement on its leading token.
    fn parse_node(&mut self) -> Result<(), Diagnostic> {
        if self.cursor.current().is_some_and(|t| t.is_preprocessor()) {
            self.parse_preprocessor()
        } else if self.cursor.accept("var") {
            self.parse_var()
        } else if self.cursor.accept("if") {
            self.parse_if()
        } else if self.cursor.accept("while") {
            self.parse_while()
        } else if self.cursor.accept("switch") {
            self.parse_switch()
        } else if self.cursor.accept("for") {
            self.parse_for()
        } else if self.cursor.accept("foreach") {
            self.parse_foreach()
        } else if self.cursor.accept("func") {
            self.parse_function()
        } else if self.cursor.accept("return") {
            self.parse_return()
        } else if self.cursor.accept("try") {
            self.parse_try_catch()
        } else if self.cursor.accept("exitwith") {
            self.parse_exit_with()
        } else if self.cursor.accept("waituntil") {
            self.parse_wait_until()
        } else {
            self.parse_statement()
        }
    }

    /// Preprocessor lines pass through verbatim, surrounded by line breaks
    /// regardless of the pretty flag.
    fn parse_preprocessor(&mut self) -> Result<(), Diagnostic> {
        let text = self.cursor.current_text()?;
        self.output.emit(&format!("\n{}\n", text), false);
        self.cursor.advance();
        Ok(())
    }

    /// `var NAME [= EXPR];` → `NAME [= EXPR];`
    fn parse_var(&mut self) -> Result<(), Diagnostic> {
        self.cursor.expect("var")?;
        let name = self.cursor.current_text()?.to_string();
        self.output.emit(&name, false);
        self.cursor.advance();

        if self.cursor.accept("=") {
            self.cursor.advance();
            self.output.emit(" = ", false);
            let expr = self.parse_expression()?;
            self.output.emit(&expr, false);
        }

        self.cursor.expect(";")?;
        self.output.emit(";", true);
        Ok(())
    }

    /// `if (COND) { A } [else { B }]` → `if (COND) then {A} [else {B}];`
    fn parse_if(&mut self) -> Result<(), Diagnostic> {
        self.cursor.expect("if")?;
        self.cursor.expect("(")?;
        self.output.emit("if (", false);
        let cond = self.parse_expression()?;
        self.output.emit(&cond, false);
        self.cursor.expect(")")?;
        self.output.emit(") then {", true);
        self.cursor.expect("{")?;
        self.parse_block()?;
        self.cursor.expect("}")?;

        if self.cursor.accept("else") {
            self.cursor.advance();
            self.cursor.expect("{")?;
            self.output.emit("} else {", true);
            self.parse_block()?;
            self.cursor.expect("}")?;
        }

        self.output.emit("};", true);
        Ok(())
    }

    /// `while (COND) { B }` → `while {COND} do {B};`
    fn parse_while(&mut self) -> Result<(), Diagnostic> {
        self.cursor.expect("while")?;
        self.cursor.expect("(")?;
        self.output.emit("while {", false);
        let cond = self.parse_expression()?;
        self.output.emit(&cond, false);
        self.cursor.expect(")")?;
        self.output.emit("} do {", true);
        self.cursor.expect("{")?;
        self.parse_block()?;
        self.cursor.expect("}")?;
        self.output.emit("};", true);
        Ok(())
    }

    /// `switch (EXPR) { case C: {B} ... }` → `switch (EXPR) do {case C:{B}; ...};`
    fn parse_switch(&mut self) -> Result<(), Diagnostic> {
        self.cursor.expect("switch")?;
        self.cursor.expect("(")?;
        self.output.emit("switch (", false);
        let expr = self.parse_expression()?;
        self.output.emit(&expr, false);
        self.cursor.expect(")")?;
        self.output.emit(") do {", true);
        self.cursor.expect("{")?;
        self.parse_switch_block()?;
        self.cursor.expect("}")?;
        self.output.emit("};", true);
        Ok(())
    }

    /// Case and default labels inside a switch body. A label immediately
    /// followed by another label (or the closing brace) emits no block and
    /// falls through textually.
    fn parse_switch_block(&mut self) -> Result<(), Diagnostic> {
        loop {
            if self.cursor.at_end() || self.cursor.accept("}") {
                return Ok(());
            }

            if self.cursor.accept("case") {
                self.cursor.advance();
                self.output.emit("case ", false);
                let expr = self.parse_expression()?;
                self.output.emit(&expr, false);
                self.cursor.expect(":")?;
                self.output.emit(":", true);

                if !self.cursor.accept("case")
                    && !self.cursor.accept("}")
                    && !self.cursor.accept("default")
                {
                    self.output.emit("{", true);
                    self.parse_block()?;
                    self.output.emit("};", true);
                }
            } else if self.cursor.accept("default") {
                self.cursor.advance();
                self.cursor.expect(":")?;
                self.output.emit("default:", true);

                if !self.cursor.accept("}") {
                    self.output.emit("{", true);
                    self.parse_block()?;
                    self.output.emit("};", true);
                }
            } else {
                return Err(self.cursor.grammar_error("'case', 'default' or '}'"));
            }
        }
    }

    /// `for ([var] INIT; COND; STEP) { B }` → `for [{INIT}, {COND}, {STEP}] do {B};`
    fn parse_for(&mut self) -> Result<(), Diagnostic> {
        self.cursor.expect("for")?;
        self.cursor.expect("(")?;
        self.output.emit("for [{", false);

        // var in the first clause is allowed but has no effect on output
        if self.cursor.accept("var") {
            self.cursor.advance();
        }

        let init = self.parse_expression()?;
        self.output.emit(&init, false);
        self.cursor.expect(";")?;
        self.output.emit("}, {", false);
        let cond = self.parse_expression()?;
        self.output.emit(&cond, false);
        self.cursor.expect(";")?;
        self.output.emit("}, {", false);
        let step = self.parse_expression()?;
        self.output.emit(&step, false);
        self.cursor.expect(")")?;
        self.output.emit("}] do {", true);
        self.cursor.expect("{")?;
        self.parse_block()?;
        self.cursor.expect("}")?;
        self.output.emit("};", true);
        Ok(())
    }

    /// `foreach NAME => EXPR { B }` → `{NAME = _x;B} forEach (EXPR);`
    fn parse_foreach(&mut self) -> Result<(), Diagnostic> {
        self.cursor.expect("foreach")?;
        let element = self.cursor.current_text()?.to_string();
        self.cursor.advance();
        self.cursor.expect("=")?;
        self.cursor.expect(">")?;
        let expr = self.parse_expression()?;
        self.cursor.expect("{")?;
        self.output.emit("{", true);
        self.output.emit(&format!("{} = _x;", element), true);
        self.parse_block()?;
        self.cursor.expect("}")?;
        self.output.emit(&format!("}} forEach ({});", expr), true);
        Ok(())
    }

    /// `func NAME (PARAMS) { B }` → `NAME = {params [...];B};`
    ///
    /// Shadowing a builtin command is a fatal name collision.
    fn parse_function(&mut self) -> Result<(), Diagnostic> {
        self.cursor.expect("func")?;

        let (name, span) = match self.cursor.current() {
            Some(tok) => (tok.text().to_string(), tok.span()),
            None => return Err(self.cursor.grammar_error("a function name")),
        };

        if self.registry.resolve(&name).is_some() {
            return Err(Diagnostic::error(ErrorCode::E101, span)
                .message(format!(
                    "'{}' is a builtin command, choose a different name",
                    name
                ))
                .label("shadows a builtin")
                .build());
        }

        self.output.emit(&format!("{} = {{", name), true);
        self.cursor.advance();
        self.cursor.expect("(")?;
        self.parse_function_parameters()?;
        self.cursor.expect(")")?;
        self.cursor.expect("{")?;
        self.parse_block()?;
        self.cursor.expect("}")?;
        self.output.emit("};", true);
        Ok(())
    }

    /// Render the parameter list as one `params` binding statement.
    ///
    /// Plain names become a bare quoted name, defaulted names a pair of
    /// quoted name and default-value token. Note the early-out below checks
    /// for `{` rather than `)`, so an actually-empty list still renders
    /// `params [];` - longstanding observed behavior, kept as is.
    fn parse_function_parameters(&mut self) -> Result<(), Diagnostic> {
        if self.cursor.accept("{") {
            return Ok(());
        }

        let mut bindings: SmallVec<[String; 4]> = SmallVec::new();

        while !self.cursor.accept(")") {
            let name = self.cursor.current_text()?.to_string();
            self.cursor.advance();

            if self.cursor.accept("=") {
                self.cursor.advance();
                let value = self.cursor.current_text()?.to_string();
                self.cursor.advance();
                bindings.push(format!("[\"{}\",{}]", name, value));
            } else {
                bindings.push(format!("\"{}\"", name));
            }

            if !self.cursor.accept(")") {
                self.cursor.expect(",")?;
            }
        }

        self.output.emit("params [", false);
        self.output.emit(&bindings.join(","), false);
        self.output.emit("];", true);
        Ok(())
    }

    /// `return EXPR;` → `return EXPR;`
    fn parse_return(&mut self) -> Result<(), Diagnostic> {
        self.cursor.expect("return")?;
        self.output.emit("return ", false);
        let expr = self.parse_expression()?;
        self.output.emit(&expr, false);
        self.cursor.expect(";")?;
        self.output.emit(";", true);
        Ok(())
    }

    /// `try { A } catch { B }` → `try {A} catch {B};`
    fn parse_try_catch(&mut self) -> Result<(), Diagnostic> {
        self.cursor.expect("try")?;
        self.cursor.expect("{")?;
        self.output.emit("try {", true);
        self.parse_block()?;
        self.cursor.expect("}")?;
        self.cursor.expect("catch")?;
        self.cursor.expect("{")?;
        self.output.emit("} catch {", true);
        self.parse_block()?;
        self.cursor.expect("}")?;
        self.output.emit("};", true);
        Ok(())
    }

    /// `exitwith { B }` → `if (true) exitWith {B};`
    ///
    /// SQF's exitWith is only valid as the right operand of an if, so the
    /// condition is synthesized.
    fn parse_exit_with(&mut self) -> Result<(), Diagnostic> {
        self.cursor.expect("exitwith")?;
        self.cursor.expect("{")?;
        self.output.emit("if (true) exitWith {", true);
        self.parse_block()?;
        self.cursor.expect("}")?;
        self.output.emit("};", true);
        Ok(())
    }

    /// `waituntil (COND[; EXTRA]);` → `waitUntil {COND[;EXTRA]};`
    fn parse_wait_until(&mut self) -> Result<(), Diagnostic> {
        self.cursor.expect("waituntil")?;
        self.cursor.expect("(")?;
        self.output.emit("waitUntil {", false);
        let cond = self.parse_expression()?;
        self.output.emit(&cond, false);

        if self.cursor.accept(";") {
            self.cursor.advance();
            self.output.emit(";", false);
            let extra = self.parse_expression()?;
            self.output.emit(&extra, false);
        }

        self.cursor.expect(")")?;
        self.cursor.expect(";")?;
        self.output.emit("};", true);
        Ok(())
    }

    /// Everything that does not start with a keyword: an assignment or a
    /// call statement.
    fn parse_statement(&mut self) -> Result<(), Diagnostic> {
        let name = self.cursor.current_text()?.to_string();
        self.cursor.advance();

        if self.cursor.accept("=") {
            self.output.emit(&name, false);
            self.parse_assignment()?;
        } else {
            let call = self.parse_function_call(&name)?;
            self.output.emit(&call, false);
            self.cursor.expect(";")?;
            self.output.emit(";", true);
        }
        Ok(())
    }

    fn parse_assignment(&mut self) -> Result<(), Diagnostic> {
        self.cursor.expect("=")?;
        self.output.emit(" = ", false);
        let expr = self.parse_expression()?;
        self.output.emit(&expr, false);
        self.cursor.expect(";")?;
        self.output.emit(";", true);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lex::Lexer;
    use msl_source::{SourceFile, SourceId};

    fn run(source: &str) -> Result<String, Diagnostic> {
        let file = SourceFile::new(SourceId::new(0), "test.msl".into(), source.into());
        let tokens = Lexer::new(&file).tokenize()?;
        let registry = BuiltinRegistry::default();
        translate(&tokens, &registry, false)
    }

    #[test]
    fn empty_input_translates_to_empty_output() {
        assert_eq!(run("").unwrap(), "");
    }

    #[test]
    fn assignment_statement() {
        assert_eq!(run("x = 1;").unwrap(), "x = 1;");
    }

    #[test]
    fn var_without_initializer() {
        assert_eq!(run("var x;").unwrap(), "x;");
    }

    #[test]
    fn stray_close_brace_is_grammar_violation() {
        let err = run("}").unwrap_err();
        assert_eq!(err.code(), ErrorCode::E100);
    }

    #[test]
    fn stray_case_is_grammar_violation() {
        let err = run("case 1:").unwrap_err();
        assert_eq!(err.code(), ErrorCode::E100);
    }

    #[test]
    fn missing_semicolon_is_grammar_violation() {
        let err = run("x = 1").unwrap_err();
        assert_eq!(err.code(), ErrorCode::E100);
        assert!(err.message().contains("';'"));
    }

    #[test]
    fn switch_body_requires_labels() {
        let err = run("switch (x) { y = 1; }").unwrap_err();
        assert_eq!(err.code(), ErrorCode::E100);
        assert!(err.message().contains("'case'"));
    }

    #[test]
    fn builtin_shadowing_is_name_collision() {
        let err = run("func hint(msg) { }").unwrap_err();
        assert_eq!(err.code(), ErrorCode::E101);
        assert!(err.message().contains("hint"));
    }

    #[test]
    fn user_function_definition_is_allowed() {
        assert_eq!(
            run("func greet(name) { }").unwrap(),
            "greet = {params [\"name\"];};"
        );
    }

    #[test]
    fn preprocessor_line_passes_through() {
        let out = run("#define FOO 1\nx = FOO;").unwrap();
        assert_eq!(out, "\n#define FOO 1\nx = FOO;");
    }

    #[test]
    fn pretty_mode_breaks_after_statements() {
        let file = SourceFile::new(SourceId::new(0), "t".into(), "x = 1;y = 2;".into());
        let tokens = Lexer::new(&file).tokenize().unwrap();
        let registry = BuiltinRegistry::default();
        let out = translate(&tokens, &registry, true).unwrap();
        assert_eq!(out, "x = 1;\ny = 2;\n");
    }
}
