/// Public parser entrypoints and the include seam.

/// Satisfies `include` directives on behalf of the module-level parse.
///
/// The parser calls [`IncludeResolver::include`] inline, once per directive, in source order. Implementations decide
/// where modules come from and own the record of which modules have already been parsed.
pub trait IncludeResolver {
    /// Resolve one directive found in module `includer`.
    ///
    /// ## Errors
    /// A `Resolution` error if the module cannot be found or read, or any error raised while parsing it.
    fn include(&mut self, directive: &IncludeDirective, includer: &str) -> Result<ResolvedInclude, CompileError>;
}

/// Outcome of resolving one `include`.
#[derive(Debug, Clone)]
pub struct ResolvedInclude {
    /// Base name of the resolved module. Aliases bind to this.
    pub name: Ident,
    /// The parsed module, or `None` while it is still being parsed further up the include chain.
    pub module: Option<Rc<Module>>,
}

/// Resolver for standalone sources: every include is reported as not found.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoIncludes;

impl IncludeResolver for NoIncludes {
    fn include(&mut self, directive: &IncludeDirective, includer: &str) -> Result<ResolvedInclude, CompileError> {
        Err(CompileError::in_module(
            ErrorKind::Resolution,
            format!("could not find module '{}'", directive.dotted_path()),
            includer,
        ))
    }
}

/// Parse a token stream into the [`Module`] called `module_name`.
///
/// ## Parameters
/// - `tokens`: Token stream produced by `muriel_syntax::lexer`.
/// - `resolver`: Called for every `include` directive.
///
/// ## Errors
/// Returns the first [`CompileError`] encountered, in this module or any module it includes.
#[tracing::instrument(skip_all, fields(module = module_name, token_count = tokens.len()))]
pub fn parse_module(
    tokens: &[Token],
    module_name: &str,
    config: ParserConfig,
    resolver: &mut dyn IncludeResolver,
) -> Result<Module, CompileError> {
    Parser::new(module_name, config).parse_module(tokens, resolver)
}

/// Parse a standalone module with the default configuration.
///
/// This is the main public entrypoint for sources without includes.
pub fn parse(tokens: &[Token], module_name: &str) -> Result<Module, CompileError> {
    parse_module(tokens, module_name, ParserConfig::default(), &mut NoIncludes)
}
