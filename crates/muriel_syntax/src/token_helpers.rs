//! Small helper APIs for working with `Token` / `TokenKind`.
//!
//! These helpers exist to reduce repetitive `matches!(...)` at call sites and to keep keyword and punctuation
//! checks going through the `muriel_core::lang` registries.

use crate::lexer::{Token, TokenKind};
use muriel_core::lang::keywords::{self, KeywordId};
use muriel_core::lang::punctuation::{self, PunctuationId};

impl TokenKind {
    /// Return `true` for either kind of line break.
    pub fn is_line_break(&self) -> bool {
        matches!(self, TokenKind::Newline | TokenKind::Nl)
    }

    /// Return `true` for tokens skipped between statements and declarations.
    pub fn is_trivia(&self) -> bool {
        matches!(self, TokenKind::Newline | TokenKind::Nl | TokenKind::Comment)
    }
}

impl Token {
    /// Return `true` if this is a name token.
    pub fn is_name(&self) -> bool {
        self.kind == TokenKind::Name
    }

    /// Return the keyword id, if this name is spelled like a keyword.
    pub fn keyword_id(&self) -> Option<KeywordId> {
        if self.is_name() {
            keywords::from_str(&self.text)
        } else {
            None
        }
    }

    /// Return `true` if this is the given keyword.
    pub fn is_keyword(&self, id: KeywordId) -> bool {
        self.keyword_id() == Some(id)
    }

    /// Return the punctuation id, if this operator token is registered punctuation.
    pub fn punctuation_id(&self) -> Option<PunctuationId> {
        if self.kind == TokenKind::Op {
            punctuation::from_str(&self.text)
        } else {
            None
        }
    }

    /// Return `true` if this is the given punctuation.
    pub fn is_punct(&self, id: PunctuationId) -> bool {
        self.punctuation_id() == Some(id)
    }

    /// Convenience wrapper for `self.kind.is_line_break()`.
    pub fn is_line_break(&self) -> bool {
        self.kind.is_line_break()
    }

    /// Convenience wrapper for `self.kind.is_trivia()`.
    pub fn is_trivia(&self) -> bool {
        self.kind.is_trivia()
    }
}
