#![forbid(unsafe_code)]
//! Muriel language front end
//!
//! Parses a Muriel entry file and everything it includes into a tree of [`ast::Module`]s. The syntax itself lives
//! in the `muriel_syntax` crate; this crate adds file-system module resolution and the command line driver.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod cli;
pub mod frontend;

pub use frontend::ast;
pub use frontend::diagnostics;
pub use frontend::lexer;
pub use frontend::parser;
pub use frontend::resolver::{ModuleResolver, ResolveError, ResolverConfig};
