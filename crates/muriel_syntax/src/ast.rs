//! Abstract Syntax Tree definitions for Muriel
//!
//! Nodes own their children outright. There are no parent links: the parser threads the module name through its
//! calls for diagnostics instead. Included modules are shared between including scopes through `Rc<Module>`.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::lexer::Token;

/// Identifier
pub type Ident = String;

// ============================================================================
// Expressions
// ============================================================================

/// Expression statement, condition or case value.
///
/// Only the token span is captured; there is no expression grammar yet. New variants can be added beside
/// `Unparsed` without touching the statement structure.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Unparsed(Vec<Token>),
}

impl Expression {
    pub fn unparsed(tokens: &[Token]) -> Self {
        Expression::Unparsed(tokens.to_vec())
    }

    pub fn tokens(&self) -> &[Token] {
        match self {
            Expression::Unparsed(tokens) => tokens,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens().is_empty()
    }

    /// Token spellings joined back together, with a space wherever the source had one.
    pub fn source_text(&self) -> String {
        let mut out = String::new();
        let mut prev: Option<&Token> = None;
        for tok in self.tokens() {
            if let Some(p) = prev {
                if p.start.line != tok.start.line || p.end_column() < tok.start.column {
                    out.push(' ');
                }
            }
            out.push_str(&tok.text);
            prev = Some(tok);
        }
        out
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source_text())
    }
}

// ============================================================================
// Statements
// ============================================================================

/// Ordered statement list: a function body or the body of a control block.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScopeBlock {
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    If(IfBlock),
    While(WhileBlock),
    Loop(LoopBlock),
    Switch(SwitchBlock),
    Expr(Expression),
}

/// `if` with any number of `elif` clauses and at most one `else`.
#[derive(Debug, Clone, PartialEq)]
pub struct IfBlock {
    pub condition: Expression,
    pub body: ScopeBlock,
    pub elif_branches: Vec<(Expression, ScopeBlock)>,
    pub else_body: Option<ScopeBlock>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileBlock {
    pub condition: Expression,
    pub body: ScopeBlock,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoopBlock {
    pub body: ScopeBlock,
}

/// `switch NAME { VALUE: { ... } ... default: { ... } }`
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchBlock {
    pub scrutinee: Ident,
    /// Cases in declaration order.
    pub cases: Vec<SwitchCase>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchCase {
    pub label: CaseLabel,
    pub body: ScopeBlock,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CaseLabel {
    Value(Expression),
    Default,
}

impl CaseLabel {
    pub fn is_default(&self) -> bool {
        matches!(self, CaseLabel::Default)
    }
}

// ============================================================================
// Declarations
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionBlock {
    pub name: Ident,
    pub params: Vec<Ident>,
    pub body: ScopeBlock,
}

/// A named set of functions. Later definitions of the same function name replace earlier ones.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NamespaceBlock {
    pub name: Ident,
    pub functions: BTreeMap<Ident, FunctionBlock>,
}

/// Signature declared in an `extern { ... }` block.
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalFunction {
    pub name: Ident,
    pub params: Vec<Token>,
    pub return_type: Ident,
}

impl ExternalFunction {
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|t| t.text.as_str())
    }
}

/// All declarations of one `extern` block, in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExternBlock {
    pub functions: Vec<ExternalFunction>,
}

/// `include (a.b.c) as alias`
#[derive(Debug, Clone, PartialEq)]
pub struct IncludeDirective {
    pub path: Vec<Ident>,
    pub alias: Option<Ident>,
    /// The `include` keyword, for diagnostics.
    pub token: Token,
}

impl IncludeDirective {
    /// Path segments joined with `.`.
    pub fn dotted_path(&self) -> String {
        self.path.join(".")
    }
}

// ============================================================================
// Modules
// ============================================================================

/// One parsed source file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Module {
    pub name: Ident,
    /// Included modules by dotted path, transitive includes flattened in.
    pub modules: BTreeMap<String, Rc<Module>>,
    /// Alias to the base name of the module it was bound to.
    pub aliases: BTreeMap<Ident, Ident>,
    pub external_functions: BTreeMap<Ident, ExternalFunction>,
    pub namespaces: BTreeMap<Ident, NamespaceBlock>,
}

impl Module {
    pub fn new(name: impl Into<Ident>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Look up a function by namespace and name.
    pub fn function(&self, namespace: &str, name: &str) -> Option<&FunctionBlock> {
        self.namespaces.get(namespace)?.functions.get(name)
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "module {}", self.name)?;
        if !self.modules.is_empty() {
            writeln!(f, "  includes:")?;
            for (path, module) in &self.modules {
                writeln!(f, "    {} ({})", path, module.name)?;
            }
        }
        if !self.aliases.is_empty() {
            writeln!(f, "  aliases:")?;
            for (alias, target) in &self.aliases {
                writeln!(f, "    {} -> {}", alias, target)?;
            }
        }
        if !self.external_functions.is_empty() {
            writeln!(f, "  external functions:")?;
            for func in self.external_functions.values() {
                let params: Vec<&str> = func.param_names().collect();
                writeln!(f, "    {}({}) -> {}", func.name, params.join(", "), func.return_type)?;
            }
        }
        writeln!(f, "  namespaces:")?;
        for ns in self.namespaces.values() {
            writeln!(f, "    {}", ns.name)?;
            for func in ns.functions.values() {
                writeln!(
                    f,
                    "      {}({}): {} statement(s)",
                    func.name,
                    func.params.join(", "),
                    func.body.statements.len()
                )?;
            }
        }
        Ok(())
    }
}
