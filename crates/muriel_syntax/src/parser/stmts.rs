/// Statement parsing.
///
/// Every body (function bodies and the bodies of `if`, `while`, `loop` and switch cases) is parsed by
/// [`Parser::parse_scope`] over the token span between its braces. A statement ends at a line break or at the end
/// of that span.
impl<'a> Parser<'a> {
    // ========================================================================
    // Scopes
    // ========================================================================

    /// Parse an ordered statement list.
    fn parse_scope(&mut self, tokens: &[Token]) -> Result<ScopeBlock, CompileError> {
        let mut statements = Vec::new();
        let mut i = 0;

        while i < tokens.len() {
            let tok = &tokens[i];
            match tok.kind {
                TokenKind::Newline | TokenKind::Nl | TokenKind::Comment => i += 1,
                TokenKind::EndMarker => break,
                TokenKind::Name => {
                    // Only registry statement starters open a block statement
                    let starter = tok.keyword_id().filter(|id| keywords::starts_statement(*id));
                    let (next, statement) = match starter {
                        Some(KeywordId::If) => self.parse_if(tokens, i)?,
                        Some(KeywordId::While) => self.parse_while(tokens, i)?,
                        Some(KeywordId::Loop) => self.parse_loop(tokens, i)?,
                        Some(KeywordId::Switch) => self.parse_switch(tokens, i)?,
                        _ => expression_statement(tokens, i),
                    };
                    statements.push(statement);
                    i = next;
                }
                _ => return Err(self.unexpected(tok)),
            }
        }

        Ok(ScopeBlock { statements })
    }

    // ========================================================================
    // Control flow
    // ========================================================================

    /// `if COND { } (elif COND { })* (else { })?`
    ///
    /// `elif` and `else` only continue the chain when they directly follow the previous `}`.
    fn parse_if(&mut self, tokens: &[Token], start: usize) -> Result<(usize, Statement), CompileError> {
        let keyword = &tokens[start];
        let (condition, open) = self.condition(tokens, start)?;
        let (mut next, inner) = self.brace_block(tokens, open)?;
        let body = self.nested_scope(inner, keyword)?;

        let mut elif_branches = Vec::new();
        while let Some(clause) = tokens.get(next).filter(|t| t.is_keyword(KeywordId::Elif)) {
            let (condition, open) = self.condition(tokens, next)?;
            let (after, inner) = self.brace_block(tokens, open)?;
            elif_branches.push((condition, self.nested_scope(inner, clause)?));
            next = after;
        }

        let mut else_body = None;
        if let Some(clause) = tokens.get(next).filter(|t| t.is_keyword(KeywordId::Else)) {
            if !punct_at(tokens, next + 1, PunctuationId::LBrace) {
                return Err(self.syntax_error("expected '{'", tokens, next));
            }
            let (after, inner) = self.brace_block(tokens, next + 1)?;
            else_body = Some(self.nested_scope(inner, clause)?);
            next = after;
        }

        let block = IfBlock {
            condition,
            body,
            elif_branches,
            else_body,
        };
        Ok((next, Statement::If(block)))
    }

    /// `while COND { }`
    fn parse_while(&mut self, tokens: &[Token], start: usize) -> Result<(usize, Statement), CompileError> {
        let (condition, open) = self.condition(tokens, start)?;
        let (next, inner) = self.brace_block(tokens, open)?;
        let body = self.nested_scope(inner, &tokens[start])?;
        Ok((next, Statement::While(WhileBlock { condition, body })))
    }

    /// `loop { }`
    fn parse_loop(&mut self, tokens: &[Token], start: usize) -> Result<(usize, Statement), CompileError> {
        if !punct_at(tokens, start + 1, PunctuationId::LBrace) {
            return Err(self.syntax_error("expected '{'", tokens, start));
        }
        let (next, inner) = self.brace_block(tokens, start + 1)?;
        let body = self.nested_scope(inner, &tokens[start])?;
        Ok((next, Statement::Loop(LoopBlock { body })))
    }

    /// Condition after the keyword at `keyword`: every token up to the next `{`, and that brace's index.
    fn condition(&self, tokens: &[Token], keyword: usize) -> Result<(Expression, usize), CompileError> {
        let open = self.find_open_brace(tokens, keyword + 1)?;
        Ok((Expression::unparsed(&tokens[keyword + 1..open]), open))
    }

    // ========================================================================
    // Switch
    // ========================================================================

    /// `switch NAME { CASES }`
    fn parse_switch(&mut self, tokens: &[Token], start: usize) -> Result<(usize, Statement), CompileError> {
        let scrutinee = match tokens.get(start + 1) {
            Some(name) if name.is_name() => name.text.clone(),
            _ => return Err(self.syntax_error("expected switch variable", tokens, start)),
        };
        if !punct_at(tokens, start + 2, PunctuationId::LBrace) {
            return Err(self.syntax_error("expected '{'", tokens, start));
        }
        let (next, inner) = self.brace_block(tokens, start + 2)?;
        let cases = self.parse_cases(inner, &tokens[start])?;
        Ok((next, Statement::Switch(SwitchBlock { scrutinee, cases })))
    }

    /// `(VALUE | default) : { BODY }` repeated, in declaration order.
    fn parse_cases(&mut self, tokens: &[Token], keyword: &Token) -> Result<Vec<SwitchCase>, CompileError> {
        let mut cases = Vec::new();
        let mut i = skip_trivia(tokens, 0);

        while i < tokens.len() {
            let label_start = i;
            while !tokens[i].is_punct(PunctuationId::Colon) {
                let tok = &tokens[i];
                if tok.is_line_break() {
                    return Err(self.syntax_error("expected ':'", tokens, i - 1));
                }
                if tok.is_name() && !tok.is_keyword(KeywordId::Default) {
                    return Err(self.constant_case_error(tok));
                }
                if tok.is_punct(PunctuationId::LBrace) {
                    return Err(self.syntax_error("expected ':'", tokens, i));
                }
                i += 1;
                if i >= tokens.len() {
                    return Err(self.syntax_error("expected ':'", tokens, i - 1));
                }
            }

            let colon = i;
            let label = match &tokens[label_start..colon] {
                [] => return Err(self.declaration_error("expected case value", tokens, colon)),
                [only] if only.is_keyword(KeywordId::Default) => CaseLabel::Default,
                value => {
                    // `default` is only a label on its own
                    if let Some(tok) = value.iter().find(|t| t.is_keyword(KeywordId::Default)) {
                        return Err(self.constant_case_error(tok));
                    }
                    CaseLabel::Value(Expression::unparsed(value))
                }
            };

            if !punct_at(tokens, colon + 1, PunctuationId::LBrace) {
                return Err(self.syntax_error("expected '{'", tokens, colon));
            }
            let (next, inner) = self.brace_block(tokens, colon + 1)?;
            let body = self.nested_scope(inner, keyword)?;
            cases.push(SwitchCase { label, body });

            i = skip_trivia(tokens, next);
        }

        Ok(cases)
    }

    fn constant_case_error(&self, tok: &Token) -> CompileError {
        CompileError::declaration(
            "expected case value to be a constant or constant expression",
            tok,
            self.module_name,
        )
    }
}

/// Bare expression statement starting at `start`. Runs to the next line break, trailing comment or end of span.
fn expression_statement(tokens: &[Token], start: usize) -> (usize, Statement) {
    let end = tokens[start..]
        .iter()
        .position(Token::is_trivia)
        .map_or(tokens.len(), |offset| start + offset);
    (end, Statement::Expr(Expression::unparsed(&tokens[start..end])))
}
