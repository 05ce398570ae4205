//! Fix engine properties over arbitrary bracket and quote soup.

use codeshift_languages::Language;
use codeshift_syntax_rules::{AnalysisConfig, FindingKind, analyze, fix};
use proptest::prelude::*;

/// Languages whose quotes all close on the line they open on.
const LANGUAGES: [Language; 3] = [Language::JavaScript, Language::Go, Language::Cpp];

fn soup() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::sample::select(vec![
            '(', ')', '[', ']', '{', '}', '"', '\'', 'x', '1', ' ', ':', ';', ',', '\n',
        ]),
        0..48,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

fn is_structural(kind: &FindingKind) -> bool {
    matches!(
        kind,
        FindingKind::UnclosedDelimiter { .. }
            | FindingKind::UnmatchedCloser { .. }
            | FindingKind::UnterminatedString { .. }
    )
}

proptest! {
    #[test]
    fn prop_fix_balances_brackets_and_strings(code in soup(), lang in 0..LANGUAGES.len()) {
        let lang = LANGUAGES[lang];
        let config = AnalysisConfig::default();
        let out = fix(&code, lang, &config);
        let after = analyze(&out.code, lang, &config);
        let left: Vec<String> = after
            .errors
            .iter()
            .filter(|f| is_structural(&f.kind))
            .map(ToString::to_string)
            .collect();
        prop_assert!(left.is_empty(), "{lang} {code:?} -> {:?}: {left:?}", out.code);
    }

    #[test]
    fn prop_fix_is_idempotent(code in soup(), lang in 0..LANGUAGES.len()) {
        let lang = LANGUAGES[lang];
        let config = AnalysisConfig::default();
        let once = fix(&code, lang, &config);
        let twice = fix(&once.code, lang, &config);
        prop_assert!(twice.fixes.is_empty(), "{lang} {code:?}: {:?}", twice.fixes);
        prop_assert_eq!(twice.code, once.code);
    }

    #[test]
    fn prop_no_fixes_means_unchanged(code in soup(), lang in 0..LANGUAGES.len()) {
        let lang = LANGUAGES[lang];
        let out = fix(&code, lang, &AnalysisConfig::default());
        if out.fixes.is_empty() {
            prop_assert_eq!(out.code, code);
        }
    }
}
