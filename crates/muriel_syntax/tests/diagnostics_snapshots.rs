//! Golden snapshots of rendered diagnostics.
//!
//! Each case renders the single report a failing parse produces: source line, caret, headline.
//!
//! Review changes: `cargo insta review`

use muriel_syntax::diagnostics::CompileError;
use muriel_syntax::{lexer, parser};

fn report(source: &str) -> String {
    let result: Result<_, CompileError> = lexer::lex(source, "main").and_then(|tokens| parser::parse(&tokens, "main"));
    result.expect_err("source should fail to parse").render()
}

#[test]
fn test_missing_arrow_report() {
    let source = "extern {\n    foo(a, b) int\n}\nglobal {\n}\n";
    insta::assert_snapshot!("missing_arrow", report(source));
}

#[test]
fn test_namespace_redefined_report() {
    let source = "global {\n}\nglobal {\n}\n";
    insta::assert_snapshot!("namespace_redefined", report(source));
}

#[test]
fn test_missing_global_report() {
    let source = "util {\n}\n";
    insta::assert_snapshot!("missing_global", report(source));
}

#[test]
fn test_unknown_character_report() {
    let source = "global {\n    main() {\n        x = $y\n    }\n}\n";
    insta::assert_snapshot!("unknown_character", report(source));
}

#[test]
fn test_identifier_case_report() {
    let source = "global {\n    main() {\n        switch mode {\n            fast: {\n            }\n        }\n    }\n}\n";
    insta::assert_snapshot!("identifier_case", report(source));
}
