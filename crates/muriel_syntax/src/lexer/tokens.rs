//! Token types for the Muriel lexer.
//!
//! Tokens are classified coarsely: keywords and punctuation are not separate kinds. The parser asks the
//! `muriel_core::lang` registries whether a `Name` is a keyword or an `Op` is a delimiter, see
//! `crate::token_helpers`.

use std::fmt;
use std::rc::Rc;

// ============================================================================
// TOKEN TYPES
// ============================================================================

/// Kind of token produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Identifier or contextual keyword.
    Name,
    Number,
    String,
    /// Operator or punctuation.
    Op,
    Comment,

    // ========== Line structure ==========
    /// Line break that ends a logical line.
    Newline,
    /// Line break inside brackets, or after a line with no code on it.
    Nl,

    /// End of the token stream.
    EndMarker,
}

/// 1-based line/column start position of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A token with its kind, spelling, position and the source line it was found on.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub start: Position,
    /// Full text of the source line (without the line break), shared by every token on that line.
    pub line: Rc<str>,
}

impl Token {
    /// Construct a new token.
    pub fn new(kind: TokenKind, text: impl Into<String>, start: Position, line: Rc<str>) -> Self {
        Self {
            kind,
            text: text.into(),
            start,
            line,
        }
    }

    /// Column just past the last character of this token.
    pub fn end_column(&self) -> usize {
        self.start.column + self.text.chars().count()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}\t{:?}\t{:?}",
            self.start.line, self.start.column, self.kind, self.text
        )
    }
}
