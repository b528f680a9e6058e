//! CLI module for the Muriel front end
//!
//! ```text
//! muriel [OPTIONS] <FILE>
//! ```
//!
//! Parses `<FILE>` and every module it includes, then prints a summary of the entry module. `-P` prints the
//! preprocessed entry module and `--lex` prints its token stream instead.
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use crate::frontend::config::ParserConfig;
use crate::frontend::resolver::ResolverConfig;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Parse a Muriel program and report its structure
#[derive(Parser, Debug)]
#[command(name = "muriel")]
#[command(version)]
#[command(about = "Front end for the Muriel programming language", long_about = None)]
pub struct Cli {
    /// Entry module
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Additional module search directory (repeatable), searched after the current directory
    #[arg(short = 'I', long = "include", value_name = "DIR")]
    pub include_dirs: Vec<PathBuf>,

    /// Print the token stream and exit
    #[arg(long, conflicts_with = "preprocess")]
    pub lex: bool,

    /// Print the preprocessed entry module and exit
    #[arg(short = 'P', long)]
    pub preprocess: bool,

    /// Predefine a macro in every module (repeatable)
    #[arg(short = 'D', long = "define", value_name = "NAME[=VALUE]")]
    pub defines: Vec<String>,

    /// Maximum block nesting depth
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,
}

impl Cli {
    /// Resolver settings for this invocation.
    ///
    /// Search roots are the current directory, then every `-I` directory in order, then the entry file's directory.
    pub fn resolver_config(&self) -> ResolverConfig {
        let mut roots = vec![PathBuf::from(".")];
        roots.extend(self.include_dirs.iter().cloned());
        if let Some(parent) = self.file.parent().filter(|p| !p.as_os_str().is_empty()) {
            roots.push(parent.to_path_buf());
        }

        let mut parser = ParserConfig::new();
        if let Some(depth) = self.max_depth {
            parser = parser.with_max_depth(depth);
        }

        let mut config = ResolverConfig::new().with_search_paths(roots).with_parser_config(parser);
        for define in &self.defines {
            let (name, value) = define.split_once('=').unwrap_or((define.as_str(), ""));
            config = config.with_define(name, value);
        }
        config
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    let config = cli.resolver_config();
    if cli.preprocess {
        return commands::preprocess_file(&cli.file, config);
    }
    if cli.lex {
        return commands::lex_file(&cli.file, config);
    }
    commands::parse_file(&cli.file, config)
}

// ============================================================================
// Tests
// ============================================================================
