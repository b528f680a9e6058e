//! Snapshot tests for module summaries printed by the CLI.

use std::path::Path;

use muriel::frontend::resolver::{ModuleResolver, ResolverConfig};

fn summary(fixture: &str) -> String {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/valid");
    let mut resolver = ModuleResolver::with_config(ResolverConfig::new().with_search_paths([root.clone()]));
    resolver.parse_entry(&root.join(fixture)).unwrap().to_string()
}

#[test]
fn test_hello_summary() {
    insta::assert_snapshot!("hello", summary("hello.mur"));
}

#[test]
fn test_app_summary() {
    insta::assert_snapshot!("app", summary("app.mur"));
}

#[test]
fn test_included_module_summary() {
    insta::assert_snapshot!("math", summary("lib/math.mur"));
}
