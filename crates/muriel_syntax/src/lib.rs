//! Shared syntax frontend for the Muriel language: preprocessor, lexer, parser, AST, diagnostics.
//!
//! This crate is dependency-light and intended for reuse across the compiler and future tooling.
//!
//! ## Notes
//! - This crate is intentionally "syntax-only": it does no symbol resolution and no type checking.
//! - It performs no file IO. `include` directives are handed to an [`parser::IncludeResolver`] supplied by the
//!   caller, which is where files are located, read and parsed.
//! - Vocabulary identity (keywords/punctuation) comes from `muriel_core::lang` registries.
//!
//! ## Examples
//! ```rust
//! use muriel_syntax::{lexer, parser};
//!
//! let tokens = lexer::lex("global {\n    main() {\n        run()\n    }\n}\n", "main").unwrap();
//! let module = parser::parse(&tokens, "main").unwrap();
//! assert_eq!(module.namespaces["global"].functions.len(), 1);
//! ```

pub mod ast;
pub mod config;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod preprocess;
pub mod token_helpers;
