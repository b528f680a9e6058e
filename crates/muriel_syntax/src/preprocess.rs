//! Textual preprocessing ahead of the lexer.
//!
//! A line whose first non-blank text is one of `#define`, `#undef`, `#ifdef`, `#elifdef` or `#endif` is a
//! directive. Every other line starting with `#` is an ordinary comment and passes through untouched.
//!
//! Directive lines and lines skipped by a false `#ifdef` are replaced by empty lines, so token positions in the
//! output still match the source. On the remaining lines every `{NAME}` naming a defined macro is replaced by its
//! value. Braces around anything else are left alone.
//!
//! ## Built-in macros
//! - `__LINE__`: current line number
//! - `__FILE__`: module name
//! - `__TIME__`: preprocessing time, `YYYY-MM-DD HH:MM:SS` (UTC)
//! - `__RANDOM__`: a non-negative random integer, fresh on every use
//!
//! ## Examples
//! ```rust
//! use muriel_syntax::preprocess::preprocess;
//!
//! let out = preprocess("#define N 3\nglobal {\n    main() {\n        f({N})\n    }\n}\n", "main");
//! assert_eq!(out.source, "\nglobal {\n    main() {\n        f(3)\n    }\n}\n");
//! assert!(out.warnings.is_empty());
//! ```

use std::collections::BTreeMap;
use std::collections::hash_map::RandomState;
use std::fmt;
use std::hash::BuildHasher;
use std::time::{SystemTime, UNIX_EPOCH};

/// A non-fatal preprocessing diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreprocessWarning {
    pub line: usize,
    pub message: String,
    pub module: String,
}

impl fmt::Display for PreprocessWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Warning: {} at line {} in module {}", self.message, self.line, self.module)
    }
}

/// Preprocessor output: the rewritten source plus any warnings, in line order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preprocessed {
    pub source: String,
    pub warnings: Vec<PreprocessWarning>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Directive<'a> {
    Define { name: &'a str, value: &'a str },
    Undef(&'a str),
    Ifdef(&'a str),
    Elifdef(&'a str),
    Endif,
}

/// One open `#ifdef` group.
#[derive(Debug, Clone, Copy)]
struct Conditional {
    opened_at: usize,
    /// Whether the enclosing region emits lines.
    parent_active: bool,
    active: bool,
    /// Whether some branch of this group has already been taken.
    taken: bool,
}

/// Line-oriented macro preprocessor for one module.
#[derive(Debug)]
pub struct Preprocessor<'a> {
    module: &'a str,
    macros: BTreeMap<String, String>,
    conditionals: Vec<Conditional>,
    warnings: Vec<PreprocessWarning>,
    time: Option<String>,
    random: RandomState,
    draws: u64,
}

impl<'a> Preprocessor<'a> {
    pub fn new(module: &'a str) -> Self {
        Self {
            module,
            macros: BTreeMap::new(),
            conditionals: Vec::new(),
            warnings: Vec::new(),
            time: None,
            random: RandomState::new(),
            draws: 0,
        }
    }

    /// Predefine macros, as if each appeared in a `#define` before the first line.
    pub fn with_defines<I, K, V>(mut self, defines: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.macros
            .extend(defines.into_iter().map(|(name, value)| (name.into(), value.into())));
        self
    }

    /// Preprocess `source`. Line endings are kept as they are.
    pub fn run(mut self, source: &str) -> Preprocessed {
        let mut output = String::with_capacity(source.len());

        for (index, raw) in source.split_inclusive('\n').enumerate() {
            let line_no = index + 1;
            let (text, ending) = split_line_ending(raw);

            if let Some(directive) = parse_directive(text) {
                self.apply(directive, line_no);
            } else if self.is_active() {
                let line = self.substitute(text, line_no);
                output.push_str(&line);
            }
            output.push_str(ending);
        }

        for open in std::mem::take(&mut self.conditionals) {
            self.warn(open.opened_at, "'#ifdef' is never closed with '#endif'");
        }

        Preprocessed {
            source: output,
            warnings: self.warnings,
        }
    }

    fn is_active(&self) -> bool {
        self.conditionals.last().is_none_or(|c| c.active)
    }

    fn apply(&mut self, directive: Directive<'_>, line_no: usize) {
        match directive {
            Directive::Ifdef(name) => {
                let parent_active = self.is_active();
                let defined = self.is_defined(name, line_no, "#ifdef");
                self.conditionals.push(Conditional {
                    opened_at: line_no,
                    parent_active,
                    active: parent_active && defined,
                    taken: defined,
                });
            }
            Directive::Elifdef(name) => {
                let defined = self.is_defined(name, line_no, "#elifdef");
                match self.conditionals.last_mut() {
                    Some(group) if group.taken => group.active = false,
                    Some(group) => {
                        group.active = group.parent_active && defined;
                        group.taken = defined;
                    }
                    None => self.warn(line_no, "'#elifdef' without a matching '#ifdef'"),
                }
            }
            Directive::Endif => {
                if self.conditionals.pop().is_none() {
                    self.warn(line_no, "'#endif' without a matching '#ifdef'");
                }
            }
            // Definitions inside a skipped group have no effect
            _ if !self.is_active() => {}
            Directive::Define { name, value } => {
                if name.is_empty() {
                    self.warn(line_no, "expected macro name after '#define'");
                    return;
                }
                if self.macros.contains_key(name) {
                    self.warn(line_no, format!("macro '{}' is already defined", name));
                }
                let value = self.substitute(value, line_no);
                self.macros.insert(name.to_string(), value);
            }
            Directive::Undef(name) => {
                if self.macros.remove(name).is_none() {
                    self.warn(line_no, format!("macro '{}' is not defined", name));
                }
            }
        }
    }

    fn is_defined(&mut self, name: &str, line_no: usize, directive: &str) -> bool {
        if name.is_empty() {
            self.warn(line_no, format!("expected macro name after '{}'", directive));
            return false;
        }
        self.macros.contains_key(name) || is_builtin(name)
    }

    /// Replace every `{NAME}` whose name is a defined macro.
    fn substitute(&mut self, line: &str, line_no: usize) -> String {
        let mut out = String::with_capacity(line.len());
        let mut rest = line;

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let expansion = after
                .find('}')
                .and_then(|close| self.lookup(&after[..close], line_no).map(|value| (close, value)));
            match expansion {
                Some((close, value)) => {
                    out.push_str(&value);
                    rest = &after[close + 1..];
                }
                None => {
                    out.push('{');
                    rest = after;
                }
            }
        }

        out.push_str(rest);
        out
    }

    fn lookup(&mut self, name: &str, line_no: usize) -> Option<String> {
        match name {
            "__LINE__" => Some(line_no.to_string()),
            "__FILE__" => Some(self.module.to_string()),
            "__TIME__" => Some(
                self.time
                    .get_or_insert_with(|| {
                        let secs = SystemTime::now()
                            .duration_since(UNIX_EPOCH)
                            .map(|d| d.as_secs())
                            .unwrap_or(0);
                        timestamp(secs)
                    })
                    .clone(),
            ),
            "__RANDOM__" => {
                self.draws += 1;
                let value = self.random.hash_one((line_no, self.draws)) % (i32::MAX as u64);
                Some(value.to_string())
            }
            _ => self.macros.get(name).cloned(),
        }
    }

    fn warn(&mut self, line: usize, message: impl Into<String>) {
        let warning = PreprocessWarning {
            line,
            message: message.into(),
            module: self.module.to_string(),
        };
        tracing::debug!(%warning, "preprocessor warning");
        self.warnings.push(warning);
    }
}

/// Preprocess `source` for `module` with no predefined macros.
#[tracing::instrument(skip_all, fields(module = module, source_len = source.len()))]
pub fn preprocess(source: &str, module: &str) -> Preprocessed {
    Preprocessor::new(module).run(source)
}

fn is_builtin(name: &str) -> bool {
    matches!(name, "__LINE__" | "__FILE__" | "__TIME__" | "__RANDOM__")
}

fn split_line_ending(raw: &str) -> (&str, &str) {
    let body = raw.strip_suffix('\n').unwrap_or(raw);
    let body = body.strip_suffix('\r').unwrap_or(body);
    (body, &raw[body.len()..])
}

fn parse_directive(line: &str) -> Option<Directive<'_>> {
    let body = line.trim().strip_prefix('#')?;
    let (command, args) = match body.split_once(char::is_whitespace) {
        Some((command, args)) => (command, args.trim()),
        None => (body, ""),
    };
    let (name, rest) = match args.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (args, ""),
    };

    match command {
        "define" => Some(Directive::Define { name, value: rest }),
        "undef" => Some(Directive::Undef(name)),
        "ifdef" => Some(Directive::Ifdef(name)),
        "elifdef" => Some(Directive::Elifdef(name)),
        "endif" => Some(Directive::Endif),
        _ => None,
    }
}

/// `YYYY-MM-DD HH:MM:SS` for a Unix timestamp, in UTC.
fn timestamp(secs: u64) -> String {
    let days = (secs / 86_400) as i64;
    let rem = secs % 86_400;
    let (hour, minute, second) = (rem / 3600, rem % 3600 / 60, rem % 60);

    // Civil date from days since 1970-01-01 (proleptic Gregorian, eras of 400 years)
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + i64::from(month <= 2);

    format!("{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(source: &str) -> Preprocessed {
        preprocess(source, "main")
    }

    #[test]
    fn test_define_and_substitute() {
        let out = run("#define GREETING \"hi\"\nprint({GREETING})\n");
        assert_eq!(out.source, "\nprint(\"hi\")\n");
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_undefined_names_and_blocks_are_untouched() {
        let source = "global { main() { f({x}) } }\n";
        assert_eq!(run(source).source, source);
    }

    #[test]
    fn test_ordinary_comments_pass_through() {
        let source = "# a note\n#not a directive\n# define X 1\nx\n";
        let out = run(source);
        assert_eq!(out.source, source);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_define_value_expands_earlier_macros() {
        let out = run("#define A 1\n#define B {A}+1\n{B}\n");
        assert_eq!(out.source, "\n\n1+1\n");
    }

    #[test]
    fn test_ifdef_skips_lines_when_undefined() {
        let out = run("#ifdef DEBUG\ntrace()\n#endif\nrun()\n");
        assert_eq!(out.source, "\n\n\nrun()\n");
    }

    #[test]
    fn test_ifdef_keeps_lines_when_defined() {
        let out = run("#define DEBUG\n#ifdef DEBUG\ntrace()\n#endif\n");
        assert_eq!(out.source, "\n\ntrace()\n\n");
    }

    #[test]
    fn test_elifdef_takes_first_defined_branch_only() {
        let source = "#define B\n#define C\n#ifdef A\na()\n#elifdef B\nb()\n#elifdef C\nc()\n#endif\n";
        let out = run(source);
        let kept: Vec<&str> = out.source.lines().filter(|l| !l.is_empty()).collect();
        assert_eq!(kept, ["b()"]);
    }

    #[test]
    fn test_nested_ifdef_inside_skipped_group_stays_skipped() {
        let source = "#define INNER\n#ifdef OUTER\n#ifdef INNER\nx()\n#endif\n#endif\ny()\n";
        let kept: Vec<String> = run(source).source.lines().filter(|l| !l.is_empty()).map(String::from).collect();
        assert_eq!(kept, ["y()"]);
    }

    #[test]
    fn test_define_inside_skipped_group_is_ignored() {
        let out = run("#ifdef NOPE\n#define X 1\n#endif\n{X}\n");
        assert_eq!(out.source, "\n\n\n{X}\n");
    }

    #[test]
    fn test_line_count_is_preserved() {
        let source = "#define X 1\n#ifdef Y\na\nb\n#endif\nc\n";
        assert_eq!(run(source).source.lines().count(), source.lines().count());
    }

    #[test]
    fn test_undef_of_unknown_macro_warns() {
        let out = run("global {\n}\n#undef MISSING\n");
        assert_eq!(
            out.warnings,
            [PreprocessWarning {
                line: 3,
                message: "macro 'MISSING' is not defined".to_string(),
                module: "main".to_string(),
            }]
        );
        assert_eq!(
            out.warnings[0].to_string(),
            "Warning: macro 'MISSING' is not defined at line 3 in module main"
        );
    }

    #[test]
    fn test_undef_removes_macro() {
        let out = run("#define X 1\n#undef X\n{X}\n");
        assert_eq!(out.source, "\n\n{X}\n");
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_redefinition_warns_and_replaces() {
        let out = run("#define X 1\n#define X 2\n{X}\n");
        assert_eq!(out.source, "\n\n2\n");
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.warnings[0].message, "macro 'X' is already defined");
        assert_eq!(out.warnings[0].line, 2);
    }

    #[test]
    fn test_unbalanced_conditionals_warn() {
        let out = run("#endif\n#ifdef X\n");
        let messages: Vec<&str> = out.warnings.iter().map(|w| w.message.as_str()).collect();
        assert_eq!(
            messages,
            ["'#endif' without a matching '#ifdef'", "'#ifdef' is never closed with '#endif'"]
        );
    }

    #[test]
    fn test_builtin_line_and_file() {
        let out = preprocess("a\nf({__LINE__}, \"{__FILE__}\")\n", "io");
        assert_eq!(out.source, "a\nf(2, \"io\")\n");
    }

    #[test]
    fn test_builtin_time_and_random_shapes() {
        let out = run("{__TIME__}\n{__RANDOM__}\n");
        let lines: Vec<&str> = out.source.lines().collect();
        assert_eq!(lines[0].len(), 19);
        assert_eq!(&lines[0][4..5], "-");
        assert_eq!(&lines[0][10..11], " ");
        assert!(lines[1].parse::<u32>().is_ok());
    }

    #[test]
    fn test_builtins_count_as_defined() {
        let out = run("#ifdef __FILE__\nkept()\n#endif\n");
        assert_eq!(out.source, "\nkept()\n\n");
    }

    #[test]
    fn test_predefined_macros() {
        let out = Preprocessor::new("main").with_defines([("MODE", "fast")]).run("#ifdef MODE\n{MODE}\n#endif\n");
        assert_eq!(out.source, "\nfast\n\n");
    }

    #[test]
    fn test_crlf_endings_are_kept() {
        let out = run("#define X 1\r\n{X}\r\n");
        assert_eq!(out.source, "\r\n1\r\n");
    }

    #[test]
    fn test_timestamp() {
        assert_eq!(timestamp(0), "1970-01-01 00:00:00");
        assert_eq!(timestamp(951_782_400), "2000-02-29 00:00:00");
        assert_eq!(timestamp(1_700_000_000), "2023-11-14 22:13:20");
    }
}
