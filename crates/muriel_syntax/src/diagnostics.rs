//! Diagnostics for the Muriel front end.
//!
//! Every failure is a single fatal [`CompileError`]. Parse functions return it by value and the caller decides what
//! to do with it; the CLI prints [`CompileError::render`] and exits.
//!
//! ## Format
//! ```text
//!     foo(a, b) int
//!             ^
//! Error: expected '->' at line 2 column 13 in module main
//! ```

use std::fmt;

use crate::lexer::Token;

/// Broad class of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The tokenizer could not classify the input.
    Lexical,
    /// Unexpected token, missing delimiter or keyword.
    Syntax,
    /// Malformed or conflicting declaration (namespaces, externs, includes, switch cases).
    Declaration,
    /// An include could not be satisfied.
    Resolution,
    /// A configured parser limit was exceeded.
    Limit,
}

impl ErrorKind {
    /// Stable diagnostic code.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::Lexical => "muriel::lexical",
            ErrorKind::Syntax => "muriel::syntax",
            ErrorKind::Declaration => "muriel::declaration",
            ErrorKind::Resolution => "muriel::resolution",
            ErrorKind::Limit => "muriel::limit",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Lexical => write!(f, "lexical error"),
            ErrorKind::Syntax => write!(f, "syntax error"),
            ErrorKind::Declaration => write!(f, "declaration error"),
            ErrorKind::Resolution => write!(f, "resolution error"),
            ErrorKind::Limit => write!(f, "limit exceeded"),
        }
    }
}

/// Where a diagnostic points: 1-based line and column plus the text of that line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub column: usize,
    pub line_text: String,
}

impl Location {
    pub fn of(token: &Token) -> Self {
        Self {
            line: token.start.line,
            column: token.start.column,
            line_text: token.line.to_string(),
        }
    }
}

/// A fatal front-end error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{}", headline(.message, .location, .module))]
pub struct CompileError {
    pub kind: ErrorKind,
    pub message: String,
    /// Name of the module being parsed when the error fired.
    pub module: String,
    /// `None` for module-level errors with no token to point at.
    pub location: Option<Location>,
}

impl CompileError {
    /// Error pointing at `token`.
    pub fn at(kind: ErrorKind, message: impl Into<String>, token: &Token, module: &str) -> Self {
        Self {
            kind,
            message: message.into(),
            module: module.to_string(),
            location: Some(Location::of(token)),
        }
    }

    /// Error with no token context.
    pub fn in_module(kind: ErrorKind, message: impl Into<String>, module: &str) -> Self {
        Self {
            kind,
            message: message.into(),
            module: module.to_string(),
            location: None,
        }
    }

    pub fn syntax(message: impl Into<String>, token: &Token, module: &str) -> Self {
        Self::at(ErrorKind::Syntax, message, token, module)
    }

    pub fn declaration(message: impl Into<String>, token: &Token, module: &str) -> Self {
        Self::at(ErrorKind::Declaration, message, token, module)
    }

    /// Render the full report: source line, caret line, headline.
    ///
    /// Module-level errors render the headline alone.
    pub fn render(&self) -> String {
        match &self.location {
            Some(loc) => format!(
                "{}\n{}^\n{}",
                loc.line_text,
                " ".repeat(loc.column.saturating_sub(1)),
                self
            ),
            None => self.to_string(),
        }
    }
}

impl miette::Diagnostic for CompileError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.kind.code()))
    }
}

fn headline(message: &str, location: &Option<Location>, module: &str) -> String {
    match location {
        Some(loc) => format!(
            "Error: {} at line {} column {} in module {}",
            message, loc.line, loc.column, module
        ),
        None => format!("Error: {} in module {}", message, module),
    }
}
