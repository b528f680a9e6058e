//! Define the reserved word vocabulary for the Muriel language.
//!
//! This module is the single source of truth for reserved words: a stable identifier ([`KeywordId`]) plus a
//! const metadata table ([`KEYWORDS`]) that records canonical spellings, categories and usage.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - Muriel keywords are contextual. The tokenizer emits them as plain names; the parser checks them against this
//!   registry at the positions where they carry meaning (`default` only means something as a switch case value).
//!
//! ## Examples
//! ```rust
//! use muriel_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("elif"), Some(KeywordId::Elif));
//! assert_eq!(keywords::from_str("Elif"), None);
//! assert_eq!(keywords::as_str(KeywordId::Extern), "extern");
//! ```

use super::registry::{Since, Stability};

/// Name of the namespace every module must define.
pub const GLOBAL_NAMESPACE: &str = "global";

/// Stable identifier for every reserved word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    // Module structure
    Include,
    As,
    Extern,

    // Control flow
    If,
    Elif,
    Else,
    While,
    Loop,
    Switch,
    Default,
}

/// High-level grouping for documentation and tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    Module,
    ControlFlow,
}

/// Usage context hints (not enforced here; the parser owns context).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordUsage {
    /// Starts a top-level item (`include`, `extern`).
    TopLevel,
    /// Starts a statement inside a body (`if`, `while`, ...).
    Statement,
    /// Continues a statement that is already open (`elif`, `else`, `as`).
    Clause,
    /// Takes the place of a switch case value.
    CaseLabel,
}

/// Metadata for a keyword.
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub id: KeywordId,
    pub canonical: &'static str,
    pub category: KeywordCategory,
    pub usage: &'static [KeywordUsage],
    pub since: Since,
    pub stability: Stability,
}

/// Registry of all keywords.
pub const KEYWORDS: &[KeywordInfo] = &[
    // Module structure
    info(KeywordId::Include, "include", KeywordCategory::Module, &[KeywordUsage::TopLevel]),
    info(KeywordId::As, "as", KeywordCategory::Module, &[KeywordUsage::Clause]),
    info(KeywordId::Extern, "extern", KeywordCategory::Module, &[KeywordUsage::TopLevel]),
    // Control flow
    info(KeywordId::If, "if", KeywordCategory::ControlFlow, &[KeywordUsage::Statement]),
    info(KeywordId::Elif, "elif", KeywordCategory::ControlFlow, &[KeywordUsage::Clause]),
    info(KeywordId::Else, "else", KeywordCategory::ControlFlow, &[KeywordUsage::Clause]),
    info(KeywordId::While, "while", KeywordCategory::ControlFlow, &[KeywordUsage::Statement]),
    info(KeywordId::Loop, "loop", KeywordCategory::ControlFlow, &[KeywordUsage::Statement]),
    info(KeywordId::Switch, "switch", KeywordCategory::ControlFlow, &[KeywordUsage::Statement]),
    info(KeywordId::Default, "default", KeywordCategory::ControlFlow, &[KeywordUsage::CaseLabel]),
];

/// Canonical spelling.
pub fn as_str(id: KeywordId) -> &'static str {
    info_for(id).canonical
}

/// Category.
pub fn category(id: KeywordId) -> KeywordCategory {
    info_for(id).category
}

/// Usage hints.
pub fn usage(id: KeywordId) -> &'static [KeywordUsage] {
    info_for(id).usage
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: KeywordId) -> &'static KeywordInfo {
    KEYWORDS.iter().find(|k| k.id == id).expect("keyword info missing")
}

/// Lookup by spelling.
///
/// ## Returns
/// - `Some(KeywordId)` if the spelling matches this registry.
/// - `None` otherwise.
pub fn from_str(s: &str) -> Option<KeywordId> {
    KEYWORDS.iter().find(|k| k.canonical == s).map(|k| k.id)
}

/// Return `true` if `id` opens a statement inside a body.
pub fn starts_statement(id: KeywordId) -> bool {
    usage(id).contains(&KeywordUsage::Statement)
}

// --- helpers -----------------------------------------------------------------

const fn info(
    id: KeywordId,
    canonical: &'static str,
    category: KeywordCategory,
    usage: &'static [KeywordUsage],
) -> KeywordInfo {
    KeywordInfo {
        id,
        canonical,
        category,
        usage,
        since: Since(0, 1),
        stability: Stability::Stable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statement_keywords() {
        let starters: Vec<_> = KEYWORDS.iter().filter(|k| starts_statement(k.id)).map(|k| k.canonical).collect();
        assert_eq!(starters, vec!["if", "while", "loop", "switch"]);
    }

    #[test]
    fn test_global_is_not_reserved() {
        assert_eq!(from_str(GLOBAL_NAMESPACE), None);
    }
}
