//! Expression translation and call-convention rendering.
//!
//! The grammar is right-recursive through the full expression production:
//! chained `+`/`-` and comparison tails re-enter `parse_expression` rather
//! than folding left. The rendered text stays in token order regardless;
//! keep the recursion shape when touching these productions.

use msl_core::{Diagnostic, ErrorCode};
use smallvec::SmallVec;

use super::translator::{Translator, translate};
use crate::builtins::CallConvention;
use crate::lex::Lexer;
use msl_source::{SourceFile, SourceId};

/// Rendered call argument group. Almost always short.
type ArgGroup = SmallVec<[String; 4]>;

impl<'a> Translator<'a> {
    /// `expression := arith (relOp expression)*`
    ///
    /// Two-character operators arrive as two adjacent tokens; each operator
    /// may be followed by one extra `=` (`<=`, `>=`, `==`).
    pub(super) fn parse_expression(&mut self) -> Result<String, Diagnostic> {
        let mut output = self.parse_arith()?;

        loop {
            if self.cursor.accept("<") {
                output.push('<');
                self.cursor.advance();
            } else if self.cursor.accept(">") {
                output.push('>');
                self.cursor.advance();
            } else if self.cursor.accept("&") {
                self.cursor.advance();
                self.cursor.expect("&")?;
                output.push_str("&&");
            } else if self.cursor.accept("|") {
                self.cursor.advance();
                self.cursor.expect("|")?;
                output.push_str("||");
            } else if self.cursor.accept("=") {
                output.push('=');
                self.cursor.advance();
            } else if self.cursor.accept("!") {
                self.cursor.advance();
                self.cursor.expect("=")?;
                output.push_str("!=");
            } else {
                break;
            }

            if self.cursor.accept("=") {
                output.push('=');
                self.cursor.advance();
            }

            output.push_str(&self.parse_expression()?);
        }

        Ok(output)
    }

    /// `arith := factor ((+|-) expression)*`
    fn parse_arith(&mut self) -> Result<String, Diagnostic> {
        let mut output = self.parse_factor()?;

        while self.cursor.accept("+") || self.cursor.accept("-") {
            if self.cursor.accept("+") {
                output.push('+');
            } else {
                output.push('-');
            }
            self.cursor.advance();
            output.push_str(&self.parse_expression()?);
        }

        Ok(output)
    }

    /// `factor := term ((*|/) expression)*`
    fn parse_factor(&mut self) -> Result<String, Diagnostic> {
        let mut output = self.parse_term()?;

        while self.cursor.accept("*") || self.cursor.accept("/") {
            if self.cursor.accept("*") {
                output.push('*');
            } else {
                output.push('/');
            }
            self.cursor.advance();
            output.push_str(&self.parse_expression()?);
        }

        Ok(output)
    }

    /// `term := '(' expression ')' | identifierForm`
    fn parse_term(&mut self) -> Result<String, Diagnostic> {
        if self.cursor.accept("(") {
            self.cursor.expect("(")?;
            let inner = self.parse_expression()?;
            self.cursor.expect(")")?;
            return Ok(format!("({})", inner));
        }

        self.parse_identifier()
    }

    /// Primary forms, in priority order: inline code, call, array literal,
    /// indexing, unary prefix, plain token.
    fn parse_identifier(&mut self) -> Result<String, Diagnostic> {
        if self.cursor.accept("code") {
            self.parse_inline_code()
        } else if self.cursor.lookahead_contains("(")
            && !self.cursor.accept("!")
            && !self.cursor.accept("-")
        {
            let name = self.cursor.current_text()?.to_string();
            self.cursor.advance();
            let call = self.parse_function_call(&name)?;
            Ok(format!("({})", call))
        } else if self.cursor.accept("[") {
            self.parse_array()
        } else if self.cursor.lookahead_contains("[") {
            let name = self.cursor.current_text()?.to_string();
            self.cursor.advance();
            self.cursor.expect("[")?;
            let index = self.parse_expression()?;
            self.cursor.expect("]")?;
            Ok(format!("({} select ({}))", name, index))
        } else if self.cursor.accept("!") || self.cursor.accept("-") {
            let op = self.cursor.current_text()?.to_string();
            self.cursor.advance();
            let term = self.parse_term()?;
            Ok(format!("{}{}", op, term))
        } else {
            let text = self.cursor.current_text()?.to_string();
            self.cursor.advance();
            Ok(text)
        }
    }

    /// `[e1, e2, ...]` array literal.
    fn parse_array(&mut self) -> Result<String, Diagnostic> {
        self.cursor.expect("[")?;
        let mut output = String::from("[");

        if !self.cursor.accept("]") {
            output.push_str(&self.parse_expression()?);

            while self.cursor.accept(",") {
                self.cursor.advance();
                output.push(',');
                output.push_str(&self.parse_expression()?);
            }
        }

        self.cursor.expect("]")?;
        output.push(']');
        Ok(output)
    }

    /// Render a call to `name` whose argument list starts at the current
    /// `(`. The builtin registry decides between the four renderings; the
    /// full fragment is assembled before the caller emits anything.
    pub(super) fn parse_function_call(&mut self, name: &str) -> Result<String, Diagnostic> {
        self.cursor.expect("(")?;
        let args = self.parse_parameter_group()?;
        self.cursor.expect(")")?;

        let convention = self.registry.resolve(name).map(|sig| sig.convention());
        match convention {
            None => Ok(format!("[{}] call {}", args.join(", "), name)),
            Some(CallConvention::Bare) => Ok(name.to_string()),
            Some(CallConvention::Prefix) => Ok(render_prefix_call(name, &args)),
            Some(CallConvention::Infix) => self.parse_infix_call(name, &args),
        }
    }

    /// An infix builtin consumes a second parenthesized group. The opening
    /// parenthesis is consumed unchecked; malformed input surfaces at the
    /// next expect.
    fn parse_infix_call(&mut self, name: &str, left: &ArgGroup) -> Result<String, Diagnostic> {
        self.cursor.advance();
        let right = self.parse_parameter_group()?;
        self.cursor.expect(")")?;

        let left_str = if left.len() > 1 {
            format!("[{}]", left.join(", "))
        } else {
            left.join(", ")
        };
        let right_str = if right.len() > 1 {
            format!("[{}]", right.join(", "))
        } else {
            right.join(", ")
        };

        if left.is_empty() {
            Ok(format!("{} {}", name, right_str))
        } else {
            Ok(format!("{} {} {}", left_str, name, right_str))
        }
    }

    /// Comma-separated expressions up to (not including) the closing `)`.
    fn parse_parameter_group(&mut self) -> Result<ArgGroup, Diagnostic> {
        let mut args = ArgGroup::new();

        while !self.cursor.accept(")") {
            if self.cursor.at_end() {
                return Err(self.cursor.grammar_error("')'"));
            }
            args.push(self.parse_expression()?);

            if !self.cursor.accept(")") {
                self.cursor.expect(",")?;
            }
        }

        Ok(args)
    }

    /// `code("...")` inline code literal: re-lex the inner text and run a
    /// fresh translator over it, pretty-printing off. A trivial literal
    /// short-circuits to `{}` without re-entering the pipeline.
    fn parse_inline_code(&mut self) -> Result<String, Diagnostic> {
        self.cursor.expect("code")?;
        self.cursor.expect("(")?;

        let (literal, span) = match self.cursor.current() {
            Some(tok) => (tok.text().to_string(), tok.span()),
            None => return Err(self.cursor.grammar_error("a code literal")),
        };
        self.cursor.advance();

        let mut output = String::from("{}");

        if literal.len() > 2 {
            let inner = literal.get(1..literal.len() - 1).unwrap_or("");
            let file = SourceFile::new(SourceId::new(0), "<inline>".into(), inner.to_string());
            let nested = Lexer::nested(&file)
                .tokenize()
                .and_then(|tokens| translate(&tokens, self.registry, false));

            match nested {
                Ok(text) => output = format!("{{{}}}", text),
                Err(inner_diag) => {
                    return Err(Diagnostic::error(ErrorCode::E102, span)
                        .message("inline code failed to translate")
                        .label("in this code literal")
                        .note(format!("nested failure: {}", inner_diag.message()))
                        .build());
                }
            }
        }

        self.cursor.expect(")")?;
        Ok(output)
    }
}

/// Prefix builtins take one bare operand, or a bracketed group.
fn render_prefix_call(name: &str, args: &ArgGroup) -> String {
    if args.len() == 1 {
        format!("{} {}", name, args[0])
    } else {
        format!("{} [{}]", name, args.join(", "))
    }
}
