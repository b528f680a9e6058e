/// Parser core types.
///
/// This chunk defines the [`Parser`] type and the helpers shared by the other chunks: diagnostic construction,
/// trivia skipping and brace-block extraction with errors attached.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser` to keep all parser methods in a
///   single module while avoiding a single “god file”.

/// Parser state.
///
/// ## Notes
/// - Parsing is fail-fast: the first error is returned and no partial module escapes.
/// - Every method works on the token span of one block, so indices are local to that span.
pub struct Parser<'a> {
    module_name: &'a str,
    config: ParserConfig,
    /// Current statement-body nesting.
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Create a parser for the module called `module_name`.
    pub fn new(module_name: &'a str, config: ParserConfig) -> Self {
        Self {
            module_name,
            config,
            depth: 0,
        }
    }

    pub fn module_name(&self) -> &str {
        self.module_name
    }

    // ========================================================================
    // Diagnostics
    // ========================================================================

    /// Error at `tokens[at]`, or at the last token of the span when `at` is past its end.
    fn error(&self, kind: ErrorKind, message: impl Into<String>, tokens: &[Token], at: usize) -> CompileError {
        match tokens.get(at).or_else(|| tokens.last()) {
            Some(tok) => CompileError::at(kind, message, tok, self.module_name),
            None => CompileError::in_module(kind, message, self.module_name),
        }
    }

    fn syntax_error(&self, message: impl Into<String>, tokens: &[Token], at: usize) -> CompileError {
        self.error(ErrorKind::Syntax, message, tokens, at)
    }

    fn declaration_error(&self, message: impl Into<String>, tokens: &[Token], at: usize) -> CompileError {
        self.error(ErrorKind::Declaration, message, tokens, at)
    }

    fn unexpected(&self, tok: &Token) -> CompileError {
        CompileError::syntax(format!("unexpected token '{}'", tok.text), tok, self.module_name)
    }

    // ========================================================================
    // Blocks
    // ========================================================================

    /// Brace block opening at `tokens[start]`: index just past its `}` and the span between the braces.
    fn brace_block<'t>(&self, tokens: &'t [Token], start: usize) -> Result<(usize, &'t [Token]), CompileError> {
        let pair = DelimiterPair::BRACES;
        extract_block(tokens, start, pair).map_err(|err| match err {
            BlockError::ExpectedOpener { at } => {
                self.syntax_error(format!("expected '{}'", punctuation::as_str(pair.open)), tokens, at)
            }
            BlockError::Unclosed { at } => {
                self.syntax_error(format!("expected '{}'", punctuation::as_str(pair.close)), tokens, at)
            }
        })
    }

    /// Index of the first `{` at or after `start`, as an "expected '{'" error at the span's last token otherwise.
    fn find_open_brace(&self, tokens: &[Token], start: usize) -> Result<usize, CompileError> {
        tokens
            .get(start..)
            .and_then(|rest| rest.iter().position(|t| t.is_punct(PunctuationId::LBrace)))
            .map(|offset| start + offset)
            .ok_or_else(|| self.syntax_error("expected '{'", tokens, tokens.len().saturating_sub(1)))
    }

    /// Parse a statement body one level deeper.
    ///
    /// ## Errors
    /// A `Limit` error at `opener` once `ParserConfig::max_depth` bodies are already open.
    fn nested_scope(&mut self, tokens: &[Token], opener: &Token) -> Result<ScopeBlock, CompileError> {
        if self.depth >= self.config.max_depth {
            return Err(CompileError::at(
                ErrorKind::Limit,
                format!("maximum block nesting depth of {} exceeded", self.config.max_depth),
                opener,
                self.module_name,
            ));
        }
        self.depth += 1;
        let scope = self.parse_scope(tokens);
        self.depth -= 1;
        scope
    }
}

/// First index at or after `i` that is not a line break or comment.
fn skip_trivia(tokens: &[Token], mut i: usize) -> usize {
    while tokens.get(i).is_some_and(Token::is_trivia) {
        i += 1;
    }
    i
}

/// Return `true` if `tokens[i]` exists and is the given punctuation.
fn punct_at(tokens: &[Token], i: usize, id: PunctuationId) -> bool {
    tokens.get(i).is_some_and(|t| t.is_punct(id))
}
