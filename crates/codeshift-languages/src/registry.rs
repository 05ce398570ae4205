//! Registry for the built-in rule tables.
//!
//! Tables are static data; the regexes derived from them are compiled the
//! first time a language is used and shared read-only afterwards.

use crate::rules::{ConstructPattern, LanguageRules};
use crate::{Language, cpp, go, java, javascript, python, rust};
use regex::{Regex, RegexBuilder};
use std::sync::OnceLock;

/// Compiled state derived from one rule table.
#[derive(Debug)]
pub(crate) struct Compiled {
    pub(crate) patterns: Vec<ConstructPattern>,
    pub(crate) branches: Option<Regex>,
}

static COMPILED: [OnceLock<Compiled>; 6] = [
    OnceLock::new(),
    OnceLock::new(),
    OnceLock::new(),
    OnceLock::new(),
    OnceLock::new(),
    OnceLock::new(),
];

fn slot(lang: Language) -> usize {
    match lang {
        Language::Python => 0,
        Language::JavaScript => 1,
        Language::Java => 2,
        Language::Cpp => 3,
        Language::Go => 4,
        Language::Rust => 5,
    }
}

/// Get the rule table for a language.
pub fn rules_for(lang: Language) -> &'static LanguageRules {
    match lang {
        Language::Python => &python::PYTHON,
        Language::JavaScript => &javascript::JAVASCRIPT,
        Language::Java => &java::JAVA,
        Language::Cpp => &cpp::CPP,
        Language::Go => &go::GO,
        Language::Rust => &rust::RUST,
    }
}

/// Get every rule table.
pub fn all_rules() -> impl Iterator<Item = &'static LanguageRules> {
    Language::ALL.into_iter().map(rules_for)
}

pub(crate) fn compiled(lang: Language) -> &'static Compiled {
    COMPILED[slot(lang)].get_or_init(|| compile(rules_for(lang)))
}

fn compile(rules: &'static LanguageRules) -> Compiled {
    let mut patterns = Vec::with_capacity(rules.patterns.len());
    for spec in rules.patterns {
        // joined logical lines may carry newlines inside multi-line literals
        match RegexBuilder::new(spec.template)
            .dot_matches_new_line(true)
            .build()
        {
            Ok(regex) => patterns.push(ConstructPattern {
                kind: spec.kind,
                regex,
                captures: spec.captures,
                fixed: spec.fixed,
            }),
            Err(err) => {
                tracing::error!(
                    language = %rules.language,
                    kind = spec.kind.as_str(),
                    "skipping invalid construct pattern: {err}"
                );
            }
        }
    }
    let branches = match Regex::new(rules.branch_pattern) {
        Ok(regex) => Some(regex),
        Err(err) => {
            tracing::error!(language = %rules.language, "invalid branch pattern: {err}");
            None
        }
    };
    tracing::debug!(
        language = %rules.language,
        patterns = patterns.len(),
        "compiled rule table"
    );
    Compiled { patterns, branches }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::ConstructKind;

    #[test]
    fn test_every_pattern_compiles() {
        for rules in all_rules() {
            assert_eq!(
                rules.construct_patterns().len(),
                rules.patterns.len(),
                "{} has a pattern that does not compile",
                rules.language
            );
            assert!(Regex::new(rules.branch_pattern).is_ok());
        }
    }

    #[test]
    fn test_captures_exist_in_templates() {
        for rules in all_rules() {
            for pattern in rules.construct_patterns() {
                let names: Vec<_> = pattern.regex.capture_names().flatten().collect();
                for capture in pattern.captures {
                    assert!(
                        names.contains(capture),
                        "{}: capture {capture} missing from {}",
                        rules.language,
                        pattern.regex.as_str()
                    );
                }
            }
        }
    }

    #[test]
    fn test_rules_lookup_matches_language() {
        for lang in Language::ALL {
            assert_eq!(rules_for(lang).language, lang);
        }
    }

    #[test]
    fn test_every_language_recognises_core_constructs() {
        for rules in all_rules() {
            let kinds: Vec<_> = rules.patterns.iter().map(|p| p.kind).collect();
            for kind in [
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
            ] {
                assert!(kinds.contains(&kind), "{} lacks {:?}", rules.language, kind);
            }
        }
    }
}
