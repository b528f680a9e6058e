//! Property-based tests for the Muriel front end
//!
//! These tests use proptest to verify invariants across many randomly
//! generated inputs, catching edge cases that hand-written tests might miss.

use muriel::frontend::{lexer, parser};
use proptest::prelude::*;

// =============================================================================
// Robustness
// =============================================================================

proptest! {
    /// Property: lexing and parsing arbitrary text returns a result instead of panicking
    #[test]
    fn parse_never_panics(source in "[ -~\n\t]{0,200}") {
        if let Ok(tokens) = lexer::lex(&source, "prop") {
            let _ = parser::parse(&tokens, "prop");
        }
    }

    /// Property: brace-heavy input never panics either
    #[test]
    fn brace_soup_never_panics(source in "[{}()a: \n]{0,120}") {
        if let Ok(tokens) = lexer::lex(&source, "prop") {
            let _ = parser::parse(&tokens, "prop");
        }
    }
}

// =============================================================================
// Structure
// =============================================================================

fn ident() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,6}".prop_filter("keywords are not identifiers", |name| {
        !matches!(
            name.as_str(),
            "include" | "as" | "extern" | "if" | "elif" | "else" | "while" | "loop" | "switch" | "default"
        )
    })
}

/// Namespace names (always including `global`) mapped to their function names.
fn namespaces() -> impl Strategy<Value = Vec<(String, Vec<String>)>> {
    let functions = prop::collection::btree_set(ident(), 0..4)
        .prop_map(|s| s.into_iter().collect::<Vec<_>>())
        .boxed();
    prop::collection::btree_map(ident(), functions.clone(), 0..4).prop_flat_map(move |map| {
        functions.clone().prop_map(move |global_fns| {
            let mut all: Vec<(String, Vec<String>)> = map.clone().into_iter().filter(|(n, _)| n != "global").collect();
            all.push(("global".to_string(), global_fns));
            all
        })
    })
}

fn render(namespaces: &[(String, Vec<String>)]) -> String {
    let mut source = String::new();
    for (name, functions) in namespaces {
        source.push_str(&format!("{name} {{\n"));
        for function in functions {
            source.push_str(&format!("    {function}(a, b) {{\n        call(a)\n        loop {{\n        }}\n    }}\n"));
        }
        source.push_str("}\n\n");
    }
    source
}

proptest! {
    /// Property: every generated namespace and function appears in the parsed module
    #[test]
    fn namespaces_and_functions_round_trip(layout in namespaces()) {
        let source = render(&layout);
        let tokens = lexer::lex(&source, "gen").unwrap();
        let module = parser::parse(&tokens, "gen").unwrap();

        prop_assert_eq!(module.namespaces.len(), layout.len());
        for (name, functions) in &layout {
            let namespace = &module.namespaces[name];
            prop_assert_eq!(namespace.functions.len(), functions.len());
            for function in functions {
                let parsed = &namespace.functions[function];
                prop_assert_eq!(&parsed.params, &vec!["a".to_string(), "b".to_string()]);
                prop_assert_eq!(parsed.body.statements.len(), 2);
            }
        }
    }

    /// Property: a module without `global` is always rejected
    #[test]
    fn missing_global_is_rejected(names in prop::collection::btree_set(ident(), 1..4)) {
        let layout: Vec<(String, Vec<String>)> = names
            .into_iter()
            .filter(|n| n != "global")
            .map(|n| (n, Vec::new()))
            .collect();
        let tokens = lexer::lex(&render(&layout), "gen").unwrap();
        let err = parser::parse(&tokens, "gen").unwrap_err();
        prop_assert_eq!(err.to_string(), "Error: expected namespace 'global' in module gen");
    }
}
