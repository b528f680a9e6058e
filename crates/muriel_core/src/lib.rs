//! Canonical language vocabulary for the Muriel front end.
//!
//! This crate is intentionally small and dependency-free. The tokenizer and parser consult it instead of
//! comparing against scattered string literals.
//!
//! ## Notes
//!
//! - This is a "vocabulary" crate: **no IO**, no global state, and no AST types.

pub mod lang;
