/// Declaration parsing.
///
/// This chunk contains the module-level scan plus its three kinds of items: `include` directives, `extern`
/// blocks and namespace blocks (with their functions).
impl<'a> Parser<'a> {
    // ========================================================================
    // Module
    // ========================================================================

    /// Parse a whole token stream into a [`Module`].
    ///
    /// Includes are handed to `resolver` as soon as they are parsed, so included modules are parsed depth first.
    ///
    /// ## Errors
    /// The first error from this module or any module it includes.
    pub fn parse_module(
        &mut self,
        tokens: &[Token],
        resolver: &mut dyn IncludeResolver,
    ) -> Result<Module, CompileError> {
        let mut module = Module::new(self.module_name);
        let mut i = 0;

        while i < tokens.len() {
            let tok = &tokens[i];
            match tok.kind {
                TokenKind::Newline | TokenKind::Nl | TokenKind::Comment => i += 1,
                TokenKind::EndMarker => break,
                TokenKind::Name => {
                    i = match tok.keyword_id() {
                        Some(KeywordId::Include) => {
                            let (next, directive) = self.parse_include(tokens, i)?;
                            self.process_include(&mut module, &directive, resolver)?;
                            next
                        }
                        Some(KeywordId::Extern) => {
                            if !punct_at(tokens, i + 1, PunctuationId::LBrace) {
                                return Err(self.declaration_error("expected a block after extern", tokens, i));
                            }
                            let (next, inner) = self.brace_block(tokens, i + 1)?;
                            // Later declarations of the same name replace earlier ones
                            for function in self.parse_extern(inner)?.functions {
                                module.external_functions.insert(function.name.clone(), function);
                            }
                            next
                        }
                        _ => {
                            if !punct_at(tokens, i + 1, PunctuationId::LBrace) {
                                return Err(self.declaration_error("expected a block after namespace", tokens, i));
                            }
                            if module.namespaces.contains_key(&tok.text) {
                                return Err(CompileError::declaration(
                                    format!("namespace '{}' already defined", tok.text),
                                    tok,
                                    self.module_name,
                                ));
                            }
                            let (next, inner) = self.brace_block(tokens, i + 1)?;
                            let namespace = self.parse_namespace(&tok.text, inner)?;
                            module.namespaces.insert(namespace.name.clone(), namespace);
                            next
                        }
                    };
                }
                _ => return Err(self.unexpected(tok)),
            }
        }

        if !module.namespaces.contains_key(GLOBAL_NAMESPACE) {
            return Err(CompileError::in_module(
                ErrorKind::Declaration,
                format!("expected namespace '{}'", GLOBAL_NAMESPACE),
                self.module_name,
            ));
        }

        Ok(module)
    }

    // ========================================================================
    // Includes
    // ========================================================================

    /// `include ( a.b.c ) [as alias]` followed by a line break (a trailing comment is allowed).
    fn parse_include(&self, tokens: &[Token], start: usize) -> Result<(usize, IncludeDirective), CompileError> {
        if start + 2 >= tokens.len() {
            return Err(self.declaration_error("expected module name", tokens, start));
        }
        if !tokens[start + 1].is_punct(PunctuationId::LParen) {
            return Err(self.declaration_error("expected '('", tokens, start + 1));
        }
        if !tokens[start + 2].is_name() {
            return Err(self.declaration_error("expected module name after '('", tokens, start + 2));
        }

        let mut path = Vec::new();
        let mut i = start + 2;
        loop {
            let Some(tok) = tokens.get(i) else {
                return Err(self.syntax_error("expected ')'", tokens, i - 1));
            };
            if tok.is_punct(PunctuationId::RParen) {
                break;
            }
            if tok.is_name() {
                path.push(tok.text.clone());
            } else if !tok.is_punct(PunctuationId::Dot) {
                return Err(self.unexpected(tok));
            }
            i += 1;
        }
        i += 1;

        let mut alias = None;
        if tokens.get(i).is_some_and(|t| t.is_keyword(KeywordId::As)) {
            match tokens.get(i + 1) {
                Some(name) if name.is_name() => alias = Some(name.text.clone()),
                _ => return Err(self.declaration_error("expected module alias", tokens, i + 1)),
            }
            i += 2;
        }

        if tokens.get(i).is_some_and(|t| t.kind == TokenKind::Comment) {
            i += 1;
        }
        if !tokens.get(i).is_some_and(Token::is_line_break) {
            return Err(self.syntax_error("expected newline", tokens, i - 1));
        }

        let directive = IncludeDirective {
            path,
            alias,
            token: tokens[start].clone(),
        };
        Ok((i + 1, directive))
    }

    /// Resolve `directive` and merge the result into `module`.
    ///
    /// The alias is bound whether or not a module comes back. A returned module is registered under the directive's
    /// dotted path, and every module it included is registered under its own path unless already present.
    fn process_include(
        &self,
        module: &mut Module,
        directive: &IncludeDirective,
        resolver: &mut dyn IncludeResolver,
    ) -> Result<(), CompileError> {
        let resolved = resolver.include(directive, self.module_name)?;

        if let Some(alias) = &directive.alias {
            module.aliases.insert(alias.clone(), resolved.name.clone());
        }

        if let Some(included) = resolved.module {
            for (path, shared) in &included.modules {
                module
                    .modules
                    .entry(path.clone())
                    .or_insert_with(|| Rc::clone(shared));
            }
            module.modules.insert(directive.dotted_path(), included);
        }

        Ok(())
    }

    // ========================================================================
    // Extern blocks
    // ========================================================================

    fn parse_extern(&self, tokens: &[Token]) -> Result<ExternBlock, CompileError> {
        let mut block = ExternBlock::default();
        let mut i = 0;

        while i < tokens.len() {
            let tok = &tokens[i];
            match tok.kind {
                TokenKind::Newline | TokenKind::Nl | TokenKind::Comment => i += 1,
                TokenKind::EndMarker => break,
                TokenKind::Name => {
                    let (next, function) = self.parse_extern_function(tokens, i)?;
                    block.functions.push(function);
                    i = next;
                }
                _ => return Err(self.unexpected(tok)),
            }
        }

        Ok(block)
    }

    /// `NAME ( PARAMS ) -> TYPE` followed by a line break or the end of the block.
    fn parse_extern_function(&self, tokens: &[Token], start: usize) -> Result<(usize, ExternalFunction), CompileError> {
        let (mut i, params) = self.parse_params(tokens, start)?;

        if !punct_at(tokens, i, PunctuationId::Arrow) {
            return Err(self.declaration_error("expected '->'", tokens, i - 1));
        }
        i += 1;

        let return_type = match tokens.get(i) {
            Some(ty) if ty.is_name() => ty.text.clone(),
            _ => return Err(self.declaration_error("expected return type", tokens, i - 1)),
        };
        i += 1;

        if tokens.get(i).is_some_and(|t| !t.is_trivia()) {
            return Err(self.syntax_error("expected newline", tokens, i - 1));
        }

        let function = ExternalFunction {
            name: tokens[start].text.clone(),
            params: params.into_iter().cloned().collect(),
            return_type,
        };
        Ok((i, function))
    }

    // ========================================================================
    // Namespaces
    // ========================================================================

    fn parse_namespace(&mut self, name: &str, tokens: &[Token]) -> Result<NamespaceBlock, CompileError> {
        let mut functions = BTreeMap::new();
        let mut i = skip_trivia(tokens, 0);

        while i < tokens.len() {
            let tok = &tokens[i];
            if !tok.is_name() {
                return Err(self.unexpected(tok));
            }
            let (next, function) = self.parse_function(tokens, i)?;
            // Later definitions of the same name replace earlier ones
            functions.insert(function.name.clone(), function);
            i = skip_trivia(tokens, next);
        }

        Ok(NamespaceBlock {
            name: name.to_string(),
            functions,
        })
    }

    /// `NAME ( PARAMS ) ... { BODY }`. The body is the first `{` block after the parameter list.
    fn parse_function(&mut self, tokens: &[Token], start: usize) -> Result<(usize, FunctionBlock), CompileError> {
        let name = &tokens[start];
        let (after_params, params) = self.parse_params(tokens, start)?;
        let params = params.into_iter().map(|t| t.text.clone()).collect();

        let open = self.find_open_brace(tokens, after_params)?;
        let (next, inner) = self.brace_block(tokens, open)?;
        let body = self.nested_scope(inner, name)?;

        let function = FunctionBlock {
            name: name.text.clone(),
            params,
            body,
        };
        Ok((next, function))
    }

    // ========================================================================
    // Parameter lists
    // ========================================================================

    /// `( NAME (, NAME)* )` after the name at `tokens[name_at]`.
    ///
    /// Commas, comments and line breaks between parameters are skipped. Returns the index just past `)`.
    fn parse_params<'t>(&self, tokens: &'t [Token], name_at: usize) -> Result<(usize, Vec<&'t Token>), CompileError> {
        if !punct_at(tokens, name_at + 1, PunctuationId::LParen) {
            return Err(self.syntax_error("expected '('", tokens, name_at));
        }

        let mut params = Vec::new();
        let mut i = name_at + 2;
        loop {
            let Some(tok) = tokens.get(i) else {
                return Err(self.syntax_error("expected ')'", tokens, i - 1));
            };
            if tok.is_punct(PunctuationId::RParen) {
                break;
            }
            if tok.is_name() {
                params.push(tok);
            } else if !(tok.is_punct(PunctuationId::Comma) || tok.is_trivia()) {
                return Err(self.unexpected(tok));
            }
            i += 1;
        }

        Ok((i + 1, params))
    }
}
