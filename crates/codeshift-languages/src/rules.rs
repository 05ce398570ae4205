//! Rule table types.
//!
//! Each supported language is described by one static [`LanguageRules`]
//! value: its lexical conventions, block style, keyword spellings, rendering
//! templates and the ordered list of construct patterns used to recognise
//! statements. The tables are plain data; the only derived state (compiled
//! regexes) lives in the registry and is built once per process.

use crate::Language;
use crate::registry;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Kind of a recognised construct (and of the IR node it becomes).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, schemars::JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ConstructKind {
    Program,
    FunctionDecl,
    ClassDecl,
    VarDecl,
    Assignment,
    If,
    For,
    While,
    Print,
    Return,
    Comment,
    Unknown,
}

impl ConstructKind {
    /// Kinds a pattern can produce, in reporting order.
    pub const TRANSLATABLE: [ConstructKind; 10] = [
        ConstructKind::FunctionDecl,
        ConstructKind::ClassDecl,
        ConstructKind::VarDecl,
        ConstructKind::Assignment,
        ConstructKind::If,
        ConstructKind::For,
        ConstructKind::While,
        ConstructKind::Print,
        ConstructKind::Return,
        ConstructKind::Comment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConstructKind::Program => "program",
            ConstructKind::FunctionDecl => "function_decl",
            ConstructKind::ClassDecl => "class_decl",
            ConstructKind::VarDecl => "var_decl",
            ConstructKind::Assignment => "assignment",
            ConstructKind::If => "if",
            ConstructKind::For => "for",
            ConstructKind::While => "while",
            ConstructKind::Print => "print",
            ConstructKind::Return => "return",
            ConstructKind::Comment => "comment",
            ConstructKind::Unknown => "unknown",
        }
    }

    /// Plural label used in conversion summaries.
    pub fn label(&self) -> &'static str {
        match self {
            ConstructKind::Program => "programs",
            ConstructKind::FunctionDecl => "functions",
            ConstructKind::ClassDecl => "classes",
            ConstructKind::VarDecl => "variable declarations",
            ConstructKind::Assignment => "assignments",
            ConstructKind::If => "conditionals",
            ConstructKind::For => "for loops",
            ConstructKind::While => "while loops",
            ConstructKind::Print => "prints",
            ConstructKind::Return => "returns",
            ConstructKind::Comment => "comments",
            ConstructKind::Unknown => "untranslated constructs",
        }
    }
}

/// How a language delimits blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockStyle {
    /// Header ends with `:`, body is indented deeper.
    Indent,
    /// Header ends with `{`, body ends at the matching `}`.
    Braces,
}

/// Whether statements end with `;`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminatorPolicy {
    None,
    /// Conventional but not required (JavaScript ASI).
    Optional,
    Required,
}

/// Shape of the print statement's argument list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintStyle {
    /// `print(a, b)`
    Call,
    /// `std::cout << a << b << std::endl`
    Stream,
    /// `println!("{} {}", a, b)`
    Macro,
}

/// How parameters and declarations spell their types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamStyle {
    /// `a`
    Name,
    /// `a: int`
    NameColonType,
    /// `int a`
    TypeName,
    /// `a int`
    NameType,
}

/// How `'` is lexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharLiterals {
    /// `'` is an ordinary string quote (or unused).
    None,
    /// `'x'` is a character literal.
    Plain,
    /// `'x'` is a character literal, `'a` is a lifetime.
    Lifetimes,
}

/// Lexical conventions used by the scanner.
#[derive(Debug, Clone, Copy)]
pub struct Lexicon {
    pub line_comment: &'static str,
    pub block_comment: Option<(&'static str, &'static str)>,
    /// Quotes opening single-line string literals.
    pub string_quotes: &'static [char],
    /// Delimiters of strings that may span lines, with whether `\` escapes.
    pub multiline_quotes: &'static [(&'static str, bool)],
    pub char_literals: CharLiterals,
}

/// Spellings of operators and literals that differ between languages.
#[derive(Debug, Clone, Copy)]
pub struct Keywords {
    pub and: &'static str,
    pub or: &'static str,
    pub not: &'static str,
    pub true_lit: &'static str,
    pub false_lit: &'static str,
    pub null_lit: &'static str,
    /// Receiver keyword (`self`, `this`); `None` when receivers are named per method.
    pub self_ref: Option<&'static str>,
    /// Member access on the receiver (`.` or `->`).
    pub self_member: &'static str,
    /// Equality operators as preferred in the language.
    pub eq: &'static str,
    pub ne: &'static str,
}

/// Rendering templates. `$name` placeholders are substituted with node
/// attributes; values are never re-scanned.
#[derive(Debug, Clone, Copy)]
pub struct Templates {
    pub if_: &'static str,
    pub elif: &'static str,
    pub else_: &'static str,
    pub while_: &'static str,
    pub for_each: &'static str,
    pub for_range: &'static str,
    pub return_value: &'static str,
    pub return_bare: &'static str,
    pub print: &'static str,
    /// Print with no arguments.
    pub print_empty: &'static str,
    /// Separator between print arguments.
    pub print_join: &'static str,
    pub assign: &'static str,
}

/// Where methods go relative to the class that owns them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassStyle {
    /// Inside the class body.
    Inline,
    /// After a `struct`, bound through a receiver (Go).
    Receivers,
    /// In an `impl` block after a `struct` (Rust).
    ImplBlock,
}

/// Declaration templates.
///
/// Besides node attributes these see `$params`, `$returns`, `$class`,
/// `$receiver`, `$extends` and `$type`, computed by the renderer.
#[derive(Debug, Clone, Copy)]
pub struct Declarations {
    pub function: &'static str,
    pub method: &'static str,
    pub static_method: &'static str,
    pub constructor: &'static str,
    /// First and last body lines of a constructor that builds its own value.
    pub constructor_prologue: Option<&'static str>,
    pub constructor_epilogue: Option<&'static str>,
    /// Return clause wrapped around `$type`.
    pub returns: &'static str,
    /// Return type spelled for functions returning nothing, if required.
    pub void_type: Option<&'static str>,
    /// Explicit receiver parameter of methods, immutable and mutable.
    pub receiver_param: Option<(&'static str, &'static str)>,
    /// Whether parameters may carry default values.
    pub param_defaults: bool,
    pub class_open: &'static str,
    pub extends: &'static str,
    pub class_close: &'static str,
    /// Line opening the member section (`public:`).
    pub member_label: Option<&'static str>,
    pub impl_open: &'static str,
    pub class_style: ClassStyle,
    pub var: &'static str,
    pub var_typed: &'static str,
    pub constant: &'static str,
    pub constant_typed: &'static str,
    /// Declaration without an initializer.
    pub declare: &'static str,
    pub field: &'static str,
    pub field_value: &'static str,
}

/// One recognisable statement shape, as written in a rule table.
#[derive(Debug, Clone, Copy)]
pub struct PatternSpec {
    pub kind: ConstructKind,
    /// Regex applied to the trimmed statement text.
    pub template: &'static str,
    /// Named groups copied to node attributes when non-empty.
    pub captures: &'static [&'static str],
    /// Attributes added on every match.
    pub fixed: &'static [(&'static str, &'static str)],
}

impl PatternSpec {
    pub const fn new(
        kind: ConstructKind,
        template: &'static str,
        captures: &'static [&'static str],
    ) -> Self {
        Self {
            kind,
            template,
            captures,
            fixed: &[],
        }
    }

    pub const fn with_fixed(mut self, fixed: &'static [(&'static str, &'static str)]) -> Self {
        self.fixed = fixed;
        self
    }
}

/// A compiled [`PatternSpec`].
#[derive(Debug)]
pub struct ConstructPattern {
    pub kind: ConstructKind,
    pub regex: Regex,
    pub captures: &'static [&'static str],
    pub fixed: &'static [(&'static str, &'static str)],
}

/// Result of classifying one statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructMatch {
    pub kind: ConstructKind,
    /// Captured and fixed attributes, in pattern order.
    pub attributes: Vec<(&'static str, String)>,
}

impl ConstructMatch {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Captures whose value must not be a reserved word for a match to stand.
const IDENTIFIER_CAPTURES: &[&str] = &["name", "type", "returns"];

/// Static description of one language.
#[derive(Debug)]
pub struct LanguageRules {
    pub language: Language,
    pub block_style: BlockStyle,
    pub terminator: TerminatorPolicy,
    pub print_style: PrintStyle,
    pub param_style: ParamStyle,
    pub lexicon: Lexicon,
    pub keywords: Keywords,
    pub templates: Templates,
    pub declarations: Declarations,
    /// Statements with no meaning outside the language, dropped on read.
    pub ignored: &'static [&'static str],
    /// One level of indentation in rendered output.
    pub indent_unit: &'static str,
    /// Words that cannot be declared names.
    pub reserved: &'static [&'static str],
    /// Keywords introducing a compound statement (indentation languages).
    pub compound_keywords: &'static [&'static str],
    /// Type used for untyped parameters in typed targets.
    pub fallback_type: Option<&'static str>,
    /// Declaration keyword for locals whose type cannot be inferred.
    pub inferred_decl: Option<&'static str>,
    /// Constructor name inside a class (`None`: the class name is used).
    pub constructor: Option<&'static str>,
    /// Regex matching one branch point (for complexity).
    pub branch_pattern: &'static str,
    /// Construct patterns in priority order, most specific first.
    pub patterns: &'static [PatternSpec],
}

impl LanguageRules {
    /// Compiled construct patterns, in priority order.
    pub fn construct_patterns(&self) -> &'static [ConstructPattern] {
        registry::compiled(self.language).patterns.as_slice()
    }

    /// Compiled branch-point regex (`None` if the table's pattern is invalid).
    pub fn branches(&self) -> Option<&'static Regex> {
        registry::compiled(self.language).branches.as_ref()
    }

    pub fn is_reserved(&self, word: &str) -> bool {
        self.reserved.contains(&word)
    }

    pub fn uses_braces(&self) -> bool {
        self.block_style == BlockStyle::Braces
    }

    /// Classify one statement (already trimmed, comment and terminator removed).
    ///
    /// Patterns are tried in table order; the first match whose identifier
    /// captures are not reserved words wins.
    pub fn classify(&self, statement: &str) -> Option<ConstructMatch> {
        for pattern in self.construct_patterns() {
            let Some(caps) = pattern.regex.captures(statement) else {
                continue;
            };
            let reserved_hit = IDENTIFIER_CAPTURES.iter().any(|name| {
                caps.name(name)
                    .is_some_and(|m| self.is_reserved(m.as_str().trim()))
            });
            if reserved_hit {
                continue;
            }
            let mut attributes = Vec::new();
            for name in pattern.captures {
                if let Some(m) = caps.name(name) {
                    let value = m.as_str().trim();
                    if !value.is_empty() {
                        attributes.push((*name, value.to_string()));
                    }
                }
            }
            for (key, value) in pattern.fixed {
                attributes.push((*key, (*value).to_string()));
            }
            return Some(ConstructMatch {
                kind: pattern.kind,
                attributes,
            });
        }
        None
    }

    /// Reduce a source line to the statement text patterns are matched against.
    ///
    /// `code` is the line with its comment already removed. Leading closing
    /// braces and a trailing terminator are dropped for brace languages.
    pub fn statement_text<'a>(&self, code: &'a str) -> &'a str {
        let mut text = code.trim();
        if self.uses_braces() {
            while let Some(rest) = text.strip_prefix('}') {
                text = rest.trim_start();
            }
            while let Some(rest) = text.strip_suffix(';') {
                text = rest.trim_end();
            }
        }
        text
    }
}

/// Substitute `$name` placeholders in a template.
///
/// Unknown placeholders become empty strings.
pub fn fill(template: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(template.len() + 16);
    let mut chars = template.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }
        let start = i + 1;
        let mut end = start;
        while let Some(&(j, next)) = chars.peek() {
            if next.is_ascii_alphanumeric() || next == '_' {
                end = j + next.len_utf8();
                chars.next();
            } else {
                break;
            }
        }
        if end == start {
            out.push('$');
        } else if let Some(value) = lookup(&template[start..end]) {
            out.push_str(&value);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules_for;

    #[test]
    fn test_fill_placeholders() {
        let out = fill("if ($condition) {", |k| {
            (k == "condition").then(|| "x > 0".to_string())
        });
        assert_eq!(out, "if (x > 0) {");
    }

    #[test]
    fn test_fill_does_not_rescan_values() {
        let out = fill("$a-$b", |k| match k {
            "a" => Some("$b".to_string()),
            "b" => Some("2".to_string()),
            _ => None,
        });
        assert_eq!(out, "$b-2");
    }

    #[test]
    fn test_fill_lone_dollar() {
        assert_eq!(fill("cost: $", |_| None), "cost: $");
    }

    #[test]
    fn test_classify_rejects_reserved_names() {
        let js = rules_for(Language::JavaScript);
        let m = js.classify("switch (x) {");
        assert!(m.is_none_or(|m| m.kind != ConstructKind::FunctionDecl));
    }

    #[test]
    fn test_statement_text_strips_braces_and_terminators() {
        let java = rules_for(Language::Java);
        assert_eq!(java.statement_text("} else {"), "else {");
        assert_eq!(java.statement_text("  return x;  "), "return x");
        let py = rules_for(Language::Python);
        assert_eq!(py.statement_text("  x = 1;"), "x = 1;");
    }
}
