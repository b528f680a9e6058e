//! Lexer for the Muriel programming language
//!
//! Produces a flat token stream with 1-based positions and the text of each source line attached, so diagnostics
//! can be rendered without going back to the source.
//!
//! Handles:
//! - Names (keywords are contextual and lexed as names), numbers and quoted strings
//! - Operators and punctuation, longest spelling first (`...` before `.`, `->` before `-`)
//! - `#` comments
//! - Logical (`Newline`) versus non-logical (`Nl`) line breaks
//! - Backslash line continuation
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Position, Token)

pub mod tokens;

pub use tokens::{Position, Token, TokenKind};

use std::rc::Rc;

use crate::diagnostics::{CompileError, ErrorKind};

// ============================================================================
// LEXER STATE
// ----------------------------------------------------------------------------
// Line break classification:
//
// [line has code] --'\n'--> bracket_depth == 0 ? Newline : Nl
// [no code yet]   --'\n'--> Nl
//
// `has_code` survives a backslash continuation and an Nl inside brackets; it
// is cleared only when a Newline closes the logical line.
// ============================================================================

/// Three-character operators.
const OPS3: &[&str] = &["...", "**=", "//=", "<<=", ">>="];

/// Two-character operators.
const OPS2: &[&str] = &[
    "->", "==", "!=", "<=", ">=", "**", "//", "<<", ">>", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=",
];

/// Single-character operators and punctuation.
const OPS1: &str = "+-*/%&|^~<>=()[]{},:.;@";

/// Lexer for Muriel source code.
pub struct Lexer<'a> {
    source: &'a str,
    module: &'a str,
    /// Bracket depth for implicit line continuation (parens, brackets, braces)
    bracket_depth: usize,
    /// Whether the current logical line has produced a code token
    has_code: bool,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code.
    ///
    /// ## Parameters
    /// - `module`: Module name used in diagnostics.
    pub fn new(source: &'a str, module: &'a str) -> Self {
        Self {
            source,
            module,
            bracket_depth: 0,
            has_code: false,
            tokens: Vec::new(),
        }
    }

    /// Tokenize the entire source code.
    ///
    /// The token stream always ends with an `EndMarker`, preceded by a `Newline` if the last logical line was left
    /// open.
    ///
    /// ## Errors
    /// Returns the first lexical error (unknown character or unterminated string).
    pub fn tokenize(mut self) -> Result<Vec<Token>, CompileError> {
        let mut line_no = 0;
        let mut last_line: Rc<str> = Rc::from("");

        for raw in self.source.split_inclusive('\n') {
            line_no += 1;
            let (text, has_break) = match raw.strip_suffix('\n') {
                Some(rest) => (rest.strip_suffix('\r').unwrap_or(rest), true),
                None => (raw, false),
            };
            let line: Rc<str> = Rc::from(text);
            self.scan_line(line_no, &line, has_break)?;
            last_line = line;
        }

        if self.has_code {
            let column = last_line.chars().count() + 1;
            self.push(TokenKind::Newline, "", Position::new(line_no.max(1), column), &last_line);
        }

        let empty: Rc<str> = Rc::from("");
        self.push(TokenKind::EndMarker, "", Position::new(line_no + 1, 1), &empty);

        Ok(self.tokens)
    }

    // ========================================================================
    // Line scanning
    // ========================================================================

    fn scan_line(&mut self, line_no: usize, line: &Rc<str>, has_break: bool) -> Result<(), CompileError> {
        let chars: Vec<char> = line.chars().collect();
        let mut i = 0;
        let mut continued = false;

        while i < chars.len() {
            let c = chars[i];
            let start = Position::new(line_no, i + 1);

            match c {
                ' ' | '\t' | '\r' | '\x0c' => i += 1,

                '#' => {
                    let text: String = chars[i..].iter().collect();
                    self.push(TokenKind::Comment, text, start, line);
                    i = chars.len();
                }

                '\\' if i + 1 == chars.len() && has_break => {
                    continued = true;
                    i += 1;
                }

                '"' | '\'' => {
                    let end = self.scan_string(&chars, i, start, line)?;
                    self.push_code(TokenKind::String, chars[i..end].iter().collect::<String>(), start, line);
                    i = end;
                }

                '0'..='9' => {
                    let end = scan_number(&chars, i);
                    self.push_code(TokenKind::Number, chars[i..end].iter().collect::<String>(), start, line);
                    i = end;
                }
                '.' if chars.get(i + 1).is_some_and(|d| d.is_ascii_digit()) => {
                    let end = scan_number(&chars, i + 1);
                    self.push_code(TokenKind::Number, chars[i..end].iter().collect::<String>(), start, line);
                    i = end;
                }

                _ if is_ident_start(c) => {
                    let mut end = i + 1;
                    while end < chars.len() && is_ident_continue(chars[end]) {
                        end += 1;
                    }
                    self.push_code(TokenKind::Name, chars[i..end].iter().collect::<String>(), start, line);
                    i = end;
                }

                _ => {
                    let Some(op) = match_operator(&chars[i..]) else {
                        return Err(CompileError::at(
                            ErrorKind::Lexical,
                            format!("unexpected character '{}'", c),
                            &Token::new(TokenKind::Op, c.to_string(), start, Rc::clone(line)),
                            self.module,
                        ));
                    };
                    match op {
                        "(" | "[" | "{" => self.bracket_depth += 1,
                        ")" | "]" | "}" => self.bracket_depth = self.bracket_depth.saturating_sub(1),
                        _ => {}
                    }
                    i += op.chars().count();
                    self.push_code(TokenKind::Op, op, start, line);
                }
            }
        }

        if has_break && !continued {
            let start = Position::new(line_no, chars.len() + 1);
            if self.has_code && self.bracket_depth == 0 {
                self.push(TokenKind::Newline, "\n", start, line);
                self.has_code = false;
            } else {
                self.push(TokenKind::Nl, "\n", start, line);
            }
        }

        Ok(())
    }

    /// Scan a quoted string starting at `chars[begin]`, returning the index just past the closing quote.
    fn scan_string(
        &self,
        chars: &[char],
        begin: usize,
        start: Position,
        line: &Rc<str>,
    ) -> Result<usize, CompileError> {
        let quote = chars[begin];
        let mut i = begin + 1;
        while i < chars.len() {
            match chars[i] {
                '\\' => i += 2,
                c if c == quote => return Ok(i + 1),
                _ => i += 1,
            }
        }
        Err(CompileError::at(
            ErrorKind::Lexical,
            "unterminated string literal",
            &Token::new(TokenKind::String, quote.to_string(), start, Rc::clone(line)),
            self.module,
        ))
    }

    // ========================================================================
    // Token helpers
    // ========================================================================

    fn push(&mut self, kind: TokenKind, text: impl Into<String>, start: Position, line: &Rc<str>) {
        self.tokens.push(Token::new(kind, text, start, Rc::clone(line)));
    }

    fn push_code(&mut self, kind: TokenKind, text: impl Into<String>, start: Position, line: &Rc<str>) {
        self.has_code = true;
        self.push(kind, text, start, line);
    }
}

// ============================================================================
// Helper functions
// ============================================================================

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Index just past a numeric literal. Digits, letters (`0x1f`, `1e5`), `_` and a `.` followed by a digit.
fn scan_number(chars: &[char], begin: usize) -> usize {
    let mut i = begin;
    while i < chars.len() {
        let c = chars[i];
        let fraction = c == '.' && chars.get(i + 1).is_some_and(|d| d.is_ascii_digit());
        if c.is_ascii_alphanumeric() || c == '_' || fraction {
            i += 1;
        } else {
            break;
        }
    }
    i
}

/// Longest operator spelling at the start of `rest`.
fn match_operator(rest: &[char]) -> Option<&'static str> {
    let starts_with = |op: &str| rest.len() >= op.len() && op.chars().zip(rest).all(|(a, b)| a == *b);
    if let Some(op) = OPS3.iter().find(|op| starts_with(op)) {
        return Some(*op);
    }
    if let Some(op) = OPS2.iter().find(|op| starts_with(op)) {
        return Some(*op);
    }
    let first = *rest.first()?;
    OPS1.char_indices().find(|(_, c)| *c == first).map(|(at, c)| &OPS1[at..at + c.len_utf8()])
}

/// Convenience function to lex a source string.
///
/// This is a shorthand for `Lexer::new(source, module).tokenize()`.
#[tracing::instrument(skip_all, fields(module = module, source_len = source.len()))]
pub fn lex(source: &str, module: &str) -> Result<Vec<Token>, CompileError> {
    Lexer::new(source, module).tokenize()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source, "test").unwrap().iter().map(|t| t.kind).collect()
    }

    fn texts(source: &str) -> Vec<String> {
        lex(source, "test")
            .unwrap()
            .into_iter()
            .filter(|t| !matches!(t.kind, TokenKind::Newline | TokenKind::Nl | TokenKind::EndMarker))
            .map(|t| t.text)
            .collect()
    }

    #[test]
    fn test_simple_line() {
        use TokenKind::*;
        assert_eq!(kinds("foo(a, 1)\n"), vec![Name, Op, Name, Op, Number, Op, Newline, EndMarker]);
    }

    #[test]
    fn test_positions_are_one_based() {
        let tokens = lex("global {\n    main()\n}\n", "test").unwrap();
        assert_eq!(tokens[0].start, Position::new(1, 1));
        assert_eq!(tokens[1].start, Position::new(1, 8));
        let main = tokens.iter().find(|t| t.text == "main").unwrap();
        assert_eq!(main.start, Position::new(2, 5));
        assert_eq!(&*main.line, "    main()");
    }

    #[test]
    fn test_line_breaks_inside_brackets_are_nl() {
        use TokenKind::*;
        assert_eq!(
            kinds("{\n  x\n}\n"),
            vec![Op, Nl, Name, Nl, Op, Newline, EndMarker]
        );
    }

    #[test]
    fn test_blank_and_comment_lines_are_nl() {
        use TokenKind::*;
        assert_eq!(
            kinds("\n# note\nx\n"),
            vec![Nl, Comment, Nl, Name, Newline, EndMarker]
        );
    }

    #[test]
    fn test_trailing_comment_after_code_keeps_newline() {
        use TokenKind::*;
        assert_eq!(kinds("x # note\n"), vec![Name, Comment, Newline, EndMarker]);
    }

    #[test]
    fn test_missing_final_newline_is_synthesised() {
        let tokens = lex("x", "test").unwrap();
        let newline = &tokens[tokens.len() - 2];
        assert_eq!(newline.kind, TokenKind::Newline);
        assert_eq!(newline.text, "");
        assert_eq!(newline.start, Position::new(1, 2));
        let end = tokens.last().unwrap();
        assert_eq!(end.kind, TokenKind::EndMarker);
        assert_eq!(end.start, Position::new(2, 1));
    }

    #[test]
    fn test_empty_source() {
        assert_eq!(kinds(""), vec![TokenKind::EndMarker]);
    }

    #[test]
    fn test_multi_char_operators() {
        assert_eq!(
            texts("a -> b == c != d <= e >= f ** g // h ... i += j"),
            vec!["a", "->", "b", "==", "c", "!=", "d", "<=", "e", ">=", "f", "**", "g", "//", "h", "...", "i", "+=", "j"]
        );
    }

    #[test]
    fn test_strings_and_numbers() {
        assert_eq!(
            texts(r#"f("a \" b", 'c', 3.14, 0x1f, .5)"#),
            vec!["f", "(", r#""a \" b""#, ",", "'c'", ",", "3.14", ",", "0x1f", ",", ".5", ")"]
        );
    }

    #[test]
    fn test_backslash_continuation() {
        use TokenKind::*;
        assert_eq!(kinds("a \\\n  b\n"), vec![Name, Name, Newline, EndMarker]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let tokens = lex("x\r\ny\r\n", "test").unwrap();
        assert_eq!(&*tokens[0].line, "x");
        assert_eq!(tokens[2].text, "y");
    }

    #[test]
    fn test_unknown_character_is_lexical_error() {
        let err = lex("x = $\n", "main").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Lexical);
        assert_eq!(
            err.to_string(),
            "Error: unexpected character '$' at line 1 column 5 in module main"
        );
    }

    #[test]
    fn test_unterminated_string() {
        let err = lex("say(\"hi)\n", "main").unwrap_err();
        assert_eq!(err.message, "unterminated string literal");
        assert_eq!(err.location.unwrap().column, 5);
    }

    #[test]
    fn test_keywords_are_names() {
        let tokens = lex("switch while", "test").unwrap();
        assert!(tokens[..2].iter().all(|t| t.kind == TokenKind::Name));
    }
}
