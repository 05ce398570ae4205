//! Request-level behaviour of the library facade.

use codeshift::{Engine, FindingKind, OutputFormatter, convert, fix};

const ADD: &str = "def add(a, b):\n    return a + b\n";

#[test]
fn test_convert_report() {
    let response = convert(ADD, "python", "javascript");
    insta::assert_snapshot!(response.output_code, @r"
    function add(a, b) {
      return a + b;
    }
    ");
    insta::assert_snapshot!(response.format_text(), @r"
    Converted python to javascript
    functions: 1
    returns: 1
    ");
}

#[test]
fn test_partial_conversion_is_successful() {
    let response = convert("import os\nx = 1\n", "python", "go");
    assert!(response.success);
    assert_eq!(response.untranslated, vec![codeshift::LineRange::line(1)]);
    assert_eq!(
        response.analysis.last().map(String::as_str),
        Some("Partial translation: 1 construct left untranslated (lines 1)")
    );
}

#[test]
fn test_every_language_pair_is_deterministic() {
    let engine = Engine::default();
    for from in codeshift::Language::ALL {
        for to in codeshift::Language::ALL {
            let a = engine.convert("x = 1\n", from.as_str(), to.as_str());
            let b = engine.convert("x = 1\n", from.as_str(), to.as_str());
            assert!(a.success, "{from} -> {to}");
            assert_eq!(a, b, "{from} -> {to}");
        }
    }
}

#[test]
fn test_analyze_report() {
    let response = codeshift::analyze("int x = 1\nint y = 2;\n", "java").unwrap();
    insta::assert_snapshot!(response.format_text(), @r"
    line 1: error: Missing ';' at end of statement
    2 lines of code, 0 functions, 0 classes, complexity 1, readability Good
    ");
    assert!(matches!(
        response.errors[0].kind,
        FindingKind::MissingTerminator { terminator: ';' }
    ));
}

#[test]
fn test_fix_then_analyze_is_clean() {
    let fixed = fix("int x = 1\nint y = 2;\n", "java").unwrap();
    assert_eq!(fixed.output_code, "int x = 1;\nint y = 2;\n");
    let again = codeshift::analyze(&fixed.output_code, "java").unwrap();
    assert!(again.errors.is_empty());
}

#[test]
fn test_fix_is_idempotent() {
    let once = fix("function f() {\n  if (a {\n    go();\n", "javascript").unwrap();
    let twice = fix(&once.output_code, "javascript").unwrap();
    assert_eq!(once.output_code, twice.output_code);
    assert!(twice.fixes.is_empty());
}
