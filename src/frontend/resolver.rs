//! Module resolution for multi-file Muriel programs
//!
//! The parser hands every `include (a.b.c) as x` directive to an [`IncludeResolver`]. [`ModuleResolver`] is the
//! file-system implementation: it maps the dotted path onto each search root in turn, then lexes and parses the
//! first matching file. Every module is parsed at most once per [`ResolutionContext`], keyed by its base file name.
//!
//! Each module's text goes through the preprocessor before lexing. Macros do not leak between modules: every module
//! starts from the configured predefined macros.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use muriel::frontend::resolver::{ModuleResolver, ResolverConfig};
//!
//! let mut resolver = ModuleResolver::with_config(ResolverConfig::new().with_search_path("lib"));
//! let module = resolver.parse_entry("main.mur".as_ref())?;
//! ```

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::frontend::ast::{IncludeDirective, Module};
use crate::frontend::config::ParserConfig;
use crate::frontend::diagnostics::{CompileError, ErrorKind};
use crate::frontend::lexer::{self, Token};
use crate::frontend::parser::{self, IncludeResolver, ResolvedInclude};
use crate::frontend::preprocess::{PreprocessWarning, Preprocessed, Preprocessor};

/// Extension appended to the last path segment when looking up a module file.
pub const SOURCE_EXTENSION: &str = "mur";

/// Maximum module file size (100 MB) to prevent memory exhaustion.
pub const MAX_SOURCE_SIZE: u64 = 100 * 1024 * 1024;

// ============================================================================
// Configuration
// ============================================================================

/// Where and how modules are located.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Search roots in priority order; the first root containing the module wins.
    pub search_paths: Vec<PathBuf>,
    pub extension: String,
    pub parser: ParserConfig,
    /// Macros predefined in every module.
    pub defines: BTreeMap<String, String>,
    /// Files larger than this are refused before reading.
    pub max_source_size: u64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            search_paths: vec![PathBuf::from(".")],
            extension: SOURCE_EXTENSION.to_string(),
            parser: ParserConfig::default(),
            defines: BTreeMap::new(),
            max_source_size: MAX_SOURCE_SIZE,
        }
    }
}

impl ResolverConfig {
    /// Create a config with the current directory as the only search root.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a search root after the existing ones.
    pub fn with_search_path(mut self, root: impl Into<PathBuf>) -> Self {
        self.search_paths.push(root.into());
        self
    }

    /// Replace every search root.
    pub fn with_search_paths<I, P>(mut self, roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.search_paths = roots.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn with_parser_config(mut self, parser: ParserConfig) -> Self {
        self.parser = parser;
        self
    }

    pub fn with_define(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.defines.insert(name.into(), value.into());
        self
    }

    pub fn with_max_source_size(mut self, bytes: u64) -> Self {
        self.max_source_size = bytes;
        self
    }
}

// ============================================================================
// Resolution record
// ============================================================================

/// Modules seen during one resolution, shared by every level of the include tree.
///
/// A name is *started* when its parse begins and *finished* once the parsed module is available. A name that is
/// started but not finished is still on the include stack, so including it again is a cycle.
#[derive(Debug, Default)]
pub struct ResolutionContext {
    started: HashSet<String>,
    finished: HashMap<String, Rc<Module>>,
    order: Vec<String>,
    warnings: Vec<PreprocessWarning>,
}

impl ResolutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `name` is being parsed. Returns `false` if it already was.
    pub fn begin(&mut self, name: &str) -> bool {
        if !self.started.insert(name.to_string()) {
            return false;
        }
        self.order.push(name.to_string());
        true
    }

    pub fn finish(&mut self, module: Rc<Module>) {
        self.finished.insert(module.name.clone(), module);
    }

    pub fn is_started(&self, name: &str) -> bool {
        self.started.contains(name)
    }

    pub fn finished(&self, name: &str) -> Option<&Rc<Module>> {
        self.finished.get(name)
    }

    /// Module names in the order their parses began.
    pub fn parse_order(&self) -> &[String] {
        &self.order
    }

    /// Preprocessor warnings from every module read so far.
    pub fn warnings(&self) -> &[PreprocessWarning] {
        &self.warnings
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Failure to resolve the entry module.
///
/// Included modules never produce these: their failures are [`CompileError`]s reported in the including module.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ResolveError {
    #[error("cannot read '{}'", .path.display())]
    #[diagnostic(code(muriel::io))]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{}' is too large ({size} bytes, max {max} bytes)", .path.display())]
    #[diagnostic(code(muriel::too_large))]
    TooLarge { path: PathBuf, size: u64, max: u64 },

    #[error("'{}' does not name a module file", .path.display())]
    #[diagnostic(code(muriel::invalid_name), help("module files are named <module>.mur"))]
    InvalidName { path: PathBuf },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Compile(#[from] CompileError),
}

// ============================================================================
// Resolver
// ============================================================================

/// File-system include resolver.
#[derive(Debug, Default)]
pub struct ModuleResolver {
    config: ResolverConfig,
    context: ResolutionContext,
}

impl ModuleResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ResolverConfig) -> Self {
        Self {
            config,
            context: ResolutionContext::new(),
        }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn context(&self) -> &ResolutionContext {
        &self.context
    }

    /// Locate the file for a dotted module path: the segments joined under each search root, with the extension
    /// appended. Returns the first existing file.
    pub fn find_module(&self, path: &[String]) -> Option<PathBuf> {
        if path.is_empty() {
            return None;
        }
        self.config.search_paths.iter().find_map(|root| {
            let mut candidate = root.clone();
            candidate.extend(path);
            candidate.set_extension(&self.config.extension);
            candidate.is_file().then_some(candidate)
        })
    }

    /// Read and parse the entry file, resolving its includes.
    ///
    /// ## Errors
    /// - [`ResolveError::InvalidName`] if the path has no usable file stem.
    /// - [`ResolveError::FileRead`] if the file cannot be read.
    /// - [`ResolveError::TooLarge`] if the file exceeds the configured size limit.
    /// - [`ResolveError::Compile`] for the first compile error in the entry module or anything it includes.
    pub fn parse_entry(&mut self, path: &Path) -> Result<Module, ResolveError> {
        let name = module_name(path).ok_or_else(|| ResolveError::InvalidName {
            path: path.to_path_buf(),
        })?;
        let read_error = |source| ResolveError::FileRead {
            path: path.to_path_buf(),
            source,
        };
        let size = fs::metadata(path).map_err(read_error)?.len();
        if size > self.config.max_source_size {
            return Err(ResolveError::TooLarge {
                path: path.to_path_buf(),
                size,
                max: self.config.max_source_size,
            });
        }
        let source = fs::read_to_string(path).map_err(read_error)?;
        Ok(self.parse_source(&source, &name)?)
    }

    /// Run the preprocessor over one module's text with the configured predefined macros.
    pub fn preprocess(&self, source: &str, name: &str) -> Preprocessed {
        Preprocessor::new(name)
            .with_defines(self.config.defines.clone())
            .run(source)
    }

    /// Preprocess and lex one module, keeping its warnings.
    fn tokenize(&mut self, source: &str, name: &str) -> Result<Vec<Token>, CompileError> {
        let preprocessed = self.preprocess(source, name);
        self.context.warnings.extend(preprocessed.warnings);
        lexer::lex(&preprocessed.source, name)
    }

    /// Parse `source` as the entry module `name`.
    ///
    /// The name is recorded before parsing, so an include cycle leading back to the entry is skipped.
    #[tracing::instrument(skip_all, fields(module = name))]
    pub fn parse_source(&mut self, source: &str, name: &str) -> Result<Module, CompileError> {
        self.context.begin(name);
        let parser_config = self.config.parser;
        let tokens = self.tokenize(source, name)?;
        parser::parse_module(&tokens, name, parser_config, self)
    }
}

impl IncludeResolver for ModuleResolver {
    fn include(&mut self, directive: &IncludeDirective, includer: &str) -> Result<ResolvedInclude, CompileError> {
        let dotted = directive.dotted_path();
        let not_found = || {
            CompileError::in_module(
                ErrorKind::Resolution,
                format!("could not find module '{}'", dotted),
                includer,
            )
        };

        let file = self.find_module(&directive.path).ok_or_else(not_found)?;
        let name = module_name(&file).ok_or_else(not_found)?;

        if let Some(shared) = self.context.finished(&name) {
            tracing::debug!(module = %name, path = %dotted, "module already parsed, reusing");
            return Ok(ResolvedInclude {
                name,
                module: Some(Rc::clone(shared)),
            });
        }
        if !self.context.begin(&name) {
            tracing::debug!(module = %name, path = %dotted, "module is still being parsed, skipping");
            return Ok(ResolvedInclude { name, module: None });
        }

        tracing::debug!(module = %name, file = %file.display(), "parsing included module");
        let read_error = |e: std::io::Error| {
            CompileError::in_module(
                ErrorKind::Resolution,
                format!("could not read module '{}': {}", dotted, e),
                includer,
            )
        };
        let size = fs::metadata(&file).map_err(read_error)?.len();
        if size > self.config.max_source_size {
            return Err(CompileError::in_module(
                ErrorKind::Resolution,
                format!(
                    "module '{}' is too large ({} bytes, max {} bytes)",
                    dotted, size, self.config.max_source_size
                ),
                includer,
            ));
        }
        let source = fs::read_to_string(&file).map_err(read_error)?;
        let parser_config = self.config.parser;
        let tokens = self.tokenize(&source, &name)?;
        let module = Rc::new(parser::parse_module(&tokens, &name, parser_config, self)?);
        self.context.finish(Rc::clone(&module));

        Ok(ResolvedInclude {
            name,
            module: Some(module),
        })
    }
}

/// Module name for a source file: its base name without extension.
fn module_name(path: &Path) -> Option<String> {
    path.file_stem().and_then(|s| s.to_str()).map(str::to_string)
}
