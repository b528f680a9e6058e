//! CLI command implementations
//!
//! Compile errors are printed to stdout as the rendered report and turn into `ExitCode::FAILURE`. Failures that are
//! not about the program text (unreadable or oversized files) are returned as [`CliError`]s.

use std::fs;
use std::path::Path;

use super::{CliError, CliResult, ExitCode};
use crate::frontend::diagnostics::CompileError;
use crate::frontend::lexer;
use crate::frontend::preprocess::PreprocessWarning;
use crate::frontend::resolver::{ModuleResolver, ResolveError, ResolverConfig};

/// Fail early on files that cannot be accessed or exceed `max_size`.
fn check_source_size(path: &Path, max_size: u64) -> CliResult<()> {
    let metadata = fs::metadata(path)
        .map_err(|e| CliError::failure(format!("Cannot access file '{}': {}", path.display(), e)))?;

    if metadata.len() > max_size {
        return Err(CliError::failure(format!(
            "Source file '{}' is too large ({} bytes, max {} bytes)",
            path.display(),
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Read a source file, refusing files over `max_size` bytes.
///
/// ## Errors
///
/// Returns an error if:
/// - The file cannot be accessed
/// - The file exceeds `max_size`
/// - The file cannot be read as UTF-8
pub fn read_source(path: &Path, max_size: u64) -> CliResult<String> {
    check_source_size(path, max_size)?;
    fs::read_to_string(path).map_err(|e| CliError::failure(format!("Error reading file '{}': {}", path.display(), e)))
}

fn module_name(path: &Path) -> CliResult<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .ok_or_else(|| CliError::failure(format!("'{}' does not name a module file", path.display())))
}

/// Print the single diagnostic for a failed run.
fn report_compile_error(err: &CompileError) -> ExitCode {
    tracing::debug!(kind = %err.kind, module = %err.module, "compilation failed");
    println!("{}", err.render());
    ExitCode::FAILURE
}

fn report_warnings(warnings: &[PreprocessWarning]) {
    for warning in warnings {
        eprintln!("{}", warning);
    }
}

/// Preprocess the entry module and print the result.
pub fn preprocess_file(path: &Path, config: ResolverConfig) -> CliResult<ExitCode> {
    let source = read_source(path, config.max_source_size)?;
    let name = module_name(path)?;

    let preprocessed = ModuleResolver::with_config(config).preprocess(&source, &name);
    report_warnings(&preprocessed.warnings);
    print!("{}", preprocessed.source);
    Ok(ExitCode::SUCCESS)
}

/// Preprocess and tokenize the entry module, then print the token stream.
pub fn lex_file(path: &Path, config: ResolverConfig) -> CliResult<ExitCode> {
    let source = read_source(path, config.max_source_size)?;
    let name = module_name(path)?;

    let preprocessed = ModuleResolver::with_config(config).preprocess(&source, &name);
    report_warnings(&preprocessed.warnings);
    match lexer::lex(&preprocessed.source, &name) {
        Ok(tokens) => {
            for tok in &tokens {
                println!("{}", tok);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => Ok(report_compile_error(&err)),
    }
}

/// Parse the entry module and its includes, then print the module summary.
pub fn parse_file(path: &Path, config: ResolverConfig) -> CliResult<ExitCode> {
    check_source_size(path, config.max_source_size)?;

    let mut resolver = ModuleResolver::with_config(config);
    let result = resolver.parse_entry(path);
    report_warnings(resolver.context().warnings());
    match result {
        Ok(module) => {
            tracing::info!(
                module = %module.name,
                included = module.modules.len(),
                "parsed"
            );
            print!("{}", module);
            Ok(ExitCode::SUCCESS)
        }
        Err(ResolveError::Compile(err)) => Ok(report_compile_error(&err)),
        Err(other) => Err(CliError::failure(format!("{:?}", miette::Report::new(other)))),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicU64, Ordering};

    static COUNTER: AtomicU64 = AtomicU64::new(0);

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir().join(format!("muriel_cli_test_{}_{id}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    fn config_for(path: &Path) -> ResolverConfig {
        ResolverConfig::new().with_search_paths([path.parent().unwrap()])
    }

    #[test]
    fn test_parse_file_success() {
        let path = temp_file("ok.mur", "global {\n    main() {\n    }\n}\n");
        assert_eq!(parse_file(&path, config_for(&path)).unwrap(), ExitCode::SUCCESS);
    }

    #[test]
    fn test_parse_file_compile_error_is_failure_exit() {
        let path = temp_file("bad.mur", "helpers {\n}\n");
        assert_eq!(parse_file(&path, config_for(&path)).unwrap(), ExitCode::FAILURE);
    }

    #[test]
    fn test_parse_file_missing_file_is_cli_error() {
        let path = std::env::temp_dir().join("muriel_cli_test_does_not_exist.mur");
        let err = parse_file(&path, ResolverConfig::new()).unwrap_err();
        assert!(err.message.contains("Cannot access file"));
        assert_eq!(err.exit_code, ExitCode::FAILURE);
    }

    #[test]
    fn test_lex_file_reports_lexical_error() {
        let path = temp_file("lex.mur", "global {\n    x = \"open\n}\n");
        assert_eq!(lex_file(&path, config_for(&path)).unwrap(), ExitCode::FAILURE);
    }

    #[test]
    fn test_lex_file_sees_preprocessed_text() {
        // The unterminated string is skipped before the lexer runs
        let path = temp_file("lexpp.mur", "#ifdef BROKEN\n\"open\n#endif\nglobal {\n}\n");
        assert_eq!(lex_file(&path, config_for(&path)).unwrap(), ExitCode::SUCCESS);
    }

    #[test]
    fn test_preprocess_file_success() {
        let path = temp_file("pp.mur", "#define X 1\nglobal {\n}\n");
        assert_eq!(preprocess_file(&path, config_for(&path)).unwrap(), ExitCode::SUCCESS);
    }

    #[test]
    fn test_parse_file_respects_size_limit() {
        let path = temp_file("sized.mur", "global {\n}\n");
        let err = parse_file(&path, config_for(&path).with_max_source_size(3)).unwrap_err();
        assert!(err.message.contains("too large"));
    }

    #[test]
    fn test_read_source() {
        let path = temp_file("read.mur", "global {\n}\n");
        assert_eq!(read_source(&path, 1024).unwrap(), "global {\n}\n");
        assert!(read_source(&path, 4).is_err());
    }
}
