//! Parser for the Muriel programming language
//!
//! Fail-fast recursive descent over the token stream produced by [`crate::lexer`]. Blocks are located with the
//! balanced-delimiter extractor ([`extract_block`]) and each block body is then parsed on its own token span.
//!
//! ## Examples
//!
//! ```rust
//! use muriel_syntax::{lexer, parser};
//!
//! let source = "global {\n    main() {\n        loop {\n            tick()\n        }\n    }\n}\n";
//! let tokens = lexer::lex(source, "main").unwrap();
//! let module = parser::parse(&tokens, "main").unwrap();
//! assert_eq!(module.function("global", "main").unwrap().body.statements.len(), 1);
//! ```

use std::collections::BTreeMap;
use std::rc::Rc;

use crate::ast::*;
use crate::config::ParserConfig;
use crate::diagnostics::{CompileError, ErrorKind};
use crate::lexer::{Token, TokenKind};
use muriel_core::lang::keywords::{self, GLOBAL_NAMESPACE, KeywordId};
use muriel_core::lang::punctuation::{self, PunctuationId};

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/blocks.rs");
include!("parser/stmts.rs");
include!("parser/decl.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
