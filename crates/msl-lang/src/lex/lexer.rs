use msl_core::{Diagnostic, ErrorCode, Pos, Span, Token};
use msl_source::SourceFile;

/// Characters that always lex as a single-character token.
///
/// Multi-character operators do not exist at the lexical level: `&&` is two
/// `&` tokens and `==` two `=` tokens; the translator reassembles them.
fn is_symbol(b: u8) -> bool {
    matches!(
        b,
        b'(' | b')'
            | b'['
            | b']'
            | b'{'
            | b'}'
            | b','
            | b';'
            | b':'
            | b'='
            | b'<'
            | b'>'
            | b'!'
            | b'&'
            | b'|'
            | b'+'
            | b'-'
            | b'*'
            | b'/'
    )
}

/// Tokenizer for MSL source code.
///
/// Nested mode is used when re-lexing the inner text of an inline code
/// literal: there the string delimiter switches from `"` to `'`, since a
/// `"` would have terminated the enclosing literal.
pub struct Lexer<'a> {
    source: &'a SourceFile,
    pos: usize,
    quote: u8,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a SourceFile) -> Self {
        Self {
            source,
            pos: 0,
            quote: b'"',
            tokens: Vec::new(),
        }
    }

    /// Create a lexer for the inner text of an inline code literal.
    pub fn nested(source: &'a SourceFile) -> Self {
        Self {
            source,
            pos: 0,
            quote: b'\'',
            tokens: Vec::new(),
        }
    }

    /// Tokenize the entire source file.
    pub fn tokenize(mut self) -> Result<Vec<Token>, Diagnostic> {
        while self.skip_ignored() {
            let bytes = self.source.source().as_bytes();

            if bytes[self.pos] == b'#' {
                self.extract_preprocessor_line();
            } else if bytes[self.pos] == self.quote {
                self.extract_string_literal()?;
            } else if is_symbol(bytes[self.pos]) {
                let start = self.pos;
                self.pos += 1;
                self.push_token(start);
            } else {
                self.extract_word();
            }
        }

        Ok(self.tokens)
    }

    /// Skip whitespace and comments. Returns true if more input remains.
    fn skip_ignored(&mut self) -> bool {
        let bytes = self.source.source().as_bytes();

        while self.pos < bytes.len() {
            match bytes[self.pos] {
                b' ' | b'\t' | b'\r' | b'\n' => {
                    self.pos += 1;
                }
                b'/' if self.peek(1) == Some(b'/') => {
                    // Line comment: ends at newline
                    while self.pos < bytes.len() && bytes[self.pos] != b'\n' {
                        self.pos += 1;
                    }
                }
                b'/' if self.peek(1) == Some(b'*') => {
                    // Block comment: ends at */ or end of input
                    self.pos += 2;
                    while self.pos < bytes.len() {
                        if bytes[self.pos] == b'*' && self.peek(1) == Some(b'/') {
                            self.pos += 2;
                            break;
                        }
                        self.pos += 1;
                    }
                }
                _ => return true,
            }
        }
        false
    }

    fn peek(&self, ahead: usize) -> Option<u8> {
        self.source.source().as_bytes().get(self.pos + ahead).copied()
    }

    /// Extract a preprocessor line as one verbatim token.
    fn extract_preprocessor_line(&mut self) {
        let bytes = self.source.source().as_bytes();
        let start = self.pos;

        while self.pos < bytes.len() && bytes[self.pos] != b'\n' {
            self.pos += 1;
        }

        let mut end = self.pos;
        // Exclude a trailing carriage return from the token text
        if end > start && bytes[end - 1] == b'\r' {
            end -= 1;
        }

        let span = Span::new(Pos::new(start as u32), Pos::new(end as u32));
        let text = self.source.span_text(span).to_string();
        self.tokens.push(Token::preprocessor(text, span));
    }

    /// Extract a string literal, delimiters included in the token text.
    fn extract_string_literal(&mut self) -> Result<(), Diagnostic> {
        let bytes = self.source.source().as_bytes();
        let start = self.pos;

        // Skip opening quote
        self.pos += 1;

        while self.pos < bytes.len() {
            let b = bytes[self.pos];
            if b == b'\\' {
                // Skip escape character and the following character
                self.pos += 1;
                if self.pos < bytes.len() {
                    self.pos += 1;
                }
            } else if b == self.quote {
                self.pos += 1;
                self.push_token(start);
                return Ok(());
            } else {
                self.pos += 1;
            }
        }

        let span = Span::new(Pos::new(start as u32), Pos::new(self.pos as u32));
        Err(Diagnostic::error(ErrorCode::E001, span)
            .label("string starts here but is not closed")
            .build())
    }

    /// Extract an identifier, keyword, or number token.
    fn extract_word(&mut self) {
        let bytes = self.source.source().as_bytes();
        let start = self.pos;

        while self.pos < bytes.len() {
            let b = bytes[self.pos];
            if b.is_ascii_whitespace() || is_symbol(b) || b == self.quote || b == b'#' {
                break;
            }
            self.pos += 1;
        }

        self.push_token(start);
    }

    fn push_token(&mut self, start: usize) {
        let span = Span::new(Pos::new(start as u32), Pos::new(self.pos as u32));
        let text = self.source.span_text(span).to_string();
        self.tokens.push(Token::new(text, span));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use msl_source::SourceId;

    fn lex(text: &str) -> Vec<Token> {
        let file = SourceFile::new(SourceId::new(0), "test.msl".into(), text.into());
        Lexer::new(&file).tokenize().expect("lexing should succeed")
    }

    fn lex_texts(text: &str) -> Vec<String> {
        lex(text).iter().map(|t| t.text().to_string()).collect()
    }

    #[test]
    fn lex_simple_statement() {
        assert_eq!(lex_texts("var x = 1;"), vec!["var", "x", "=", "1", ";"]);
    }

    #[test]
    fn lex_splits_two_char_operators() {
        assert_eq!(lex_texts("a && b"), vec!["a", "&", "&", "b"]);
        assert_eq!(lex_texts("a == b"), vec!["a", "=", "=", "b"]);
        assert_eq!(lex_texts("a != b"), vec!["a", "!", "=", "b"]);
        assert_eq!(lex_texts("a || b"), vec!["a", "|", "|", "b"]);
    }

    #[test]
    fn lex_symbols_without_spaces() {
        assert_eq!(
            lex_texts("if(x>0){y=1;}"),
            vec!["if", "(", "x", ">", "0", ")", "{", "y", "=", "1", ";", "}"]
        );
    }

    #[test]
    fn lex_string_literal_keeps_quotes() {
        assert_eq!(lex_texts("x = \"hello world\";"), vec!["x", "=", "\"hello world\"", ";"]);
    }

    #[test]
    fn lex_string_with_escape() {
        assert_eq!(lex_texts(r#""a\"b""#), vec![r#""a\"b""#]);
    }

    #[test]
    fn lex_unterminated_string_is_error() {
        let file = SourceFile::new(SourceId::new(0), "test.msl".into(), "x = \"oops".into());
        let err = Lexer::new(&file).tokenize().unwrap_err();
        assert_eq!(err.code(), ErrorCode::E001);
    }

    #[test]
    fn lex_preprocessor_line() {
        let tokens = lex("#include \"common.sqf\"\nvar x = 1;");
        assert!(tokens[0].is_preprocessor());
        assert_eq!(tokens[0].text(), "#include \"common.sqf\"");
        assert_eq!(tokens[1].text(), "var");
    }

    #[test]
    fn lex_line_comment_skipped() {
        assert_eq!(lex_texts("var x = 1; // init\nx = 2;"),
            vec!["var", "x", "=", "1", ";", "x", "=", "2", ";"]);
    }

    #[test]
    fn lex_block_comment_skipped() {
        assert_eq!(lex_texts("a /* not * here */ b"), vec!["a", "b"]);
    }

    #[test]
    fn lex_numbers_and_identifiers() {
        assert_eq!(lex_texts("foo1 2.5 _bar"), vec!["foo1", "2.5", "_bar"]);
    }

    #[test]
    fn lex_nested_uses_single_quotes() {
        let file = SourceFile::new(SourceId::new(0), "inline".into(), "hint('hi');".into());
        let tokens = Lexer::nested(&file).tokenize().unwrap();
        let texts: Vec<_> = tokens.iter().map(|t| t.text()).collect();
        assert_eq!(texts, vec!["hint", "(", "'hi'", ")", ";"]);
    }

    #[test]
    fn lex_empty_input() {
        assert!(lex("").is_empty());
        assert!(lex("   \n\t  ").is_empty());
    }

    #[test]
    fn lex_spans_cover_source() {
        let tokens = lex("var x");
        assert_eq!(tokens[0].span(), Span::new(Pos::new(0), Pos::new(3)));
        assert_eq!(tokens[1].span(), Span::new(Pos::new(4), Pos::new(5)));
    }
}
