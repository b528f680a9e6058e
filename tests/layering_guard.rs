//! Layering guardrails for the workspace crates.
//!
//! `muriel_core` holds vocabulary only and must not depend on the syntax crate; `muriel_syntax` performs no file
//! IO and must not depend on the root `muriel` crate. Both checks scan the `[dependencies]` table of the manifest.

fn dependency_names(manifest: &str) -> Vec<String> {
    let mut in_dependencies = false;
    let mut names = Vec::new();

    for raw_line in manifest.lines() {
        let line = raw_line.trim();
        if line.starts_with('[') {
            in_dependencies = line == "[dependencies]";
            continue;
        }
        if !in_dependencies || line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line_no_comment = line.split('#').next().unwrap_or("").trim();
        if let Some((name, _)) = line_no_comment.split_once('=') {
            names.push(name.trim().to_string());
        }
    }
    names
}

#[test]
fn core_does_not_depend_on_syntax() {
    let deps = dependency_names(include_str!("../crates/muriel_core/Cargo.toml"));
    assert!(
        !deps.iter().any(|d| d == "muriel_syntax" || d == "muriel"),
        "muriel_core must stay at the bottom of the stack, found {deps:?}"
    );
}

#[test]
fn syntax_does_not_depend_on_driver() {
    let deps = dependency_names(include_str!("../crates/muriel_syntax/Cargo.toml"));
    assert!(deps.iter().any(|d| d == "muriel_core"));
    assert!(
        !deps.iter().any(|d| d == "muriel"),
        "muriel_syntax must not depend on the driver crate, found {deps:?}"
    );
}
