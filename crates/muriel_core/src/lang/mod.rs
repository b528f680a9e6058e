//! Muriel language vocabulary registries.
//!
//! Callers work with **stable IDs** (e.g. `KeywordId`, `PunctuationId`) and look up spellings and metadata via
//! registry tables.
//!
//! ## Notes
//! - Registries are intentionally **pure**: no AST types, no IO, no side effects.
//! - Keywords are contextual: the tokenizer classifies them as names and the parser decides what they mean.
//!
//! ## Examples
//! ```rust
//! use muriel_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("switch"), Some(KeywordId::Switch));
//! assert_eq!(keywords::as_str(KeywordId::Switch), "switch");
//! ```

pub mod keywords;
pub mod punctuation;
pub mod registry;
