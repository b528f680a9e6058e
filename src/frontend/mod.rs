//! Muriel compiler frontend
//!
//! - `preprocess`: macro and conditional-line pass ahead of the lexer
//! - `lexer`: tokenization of source code
//! - `parser`: tokens into modules, plus the include seam
//! - `ast`: module, namespace, function and statement definitions
//! - `diagnostics`: the single fatal error report
//! - `resolver`: file-system module resolution for `include`

// Syntax components are provided by the shared muriel_syntax crate.
pub use muriel_syntax::{ast, config, diagnostics, lexer, parser, preprocess};

pub mod resolver;
