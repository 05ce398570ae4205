//! Structural quality metrics for codeshift languages.
//!
//! Everything here is a heuristic over the shared scanner and the language
//! rule tables: lines of code, declaration counts, a McCabe-style
//! complexity approximation and a readability bucket.
//!
//! # Example
//!
//! ```
//! use codeshift_languages::Language;
//! use codeshift_metrics::{Readability, ReadabilityThresholds, metrics};
//!
//! let m = metrics(
//!     "def add(a, b):\n    return a + b\n",
//!     Language::Python,
//!     &ReadabilityThresholds::default(),
//! );
//! assert_eq!(m.lines_of_code, 2);
//! assert_eq!(m.functions, 1);
//! assert_eq!(m.complexity, 1);
//! assert_eq!(m.readability, Readability::Good);
//! ```

mod readability;

pub use readability::{Readability, ReadabilityThresholds};

use codeshift_languages::{ConstructKind, Language, Scan, rules_for, scan};
use serde::Serialize;

/// Metrics for one source text.
#[derive(Debug, Clone, PartialEq, Serialize, schemars::JsonSchema)]
pub struct QualityMetrics {
    /// Non-blank lines that are not comment-only.
    pub lines_of_code: usize,
    pub functions: usize,
    pub classes: usize,
    /// One plus the number of branch points.
    pub complexity: usize,
    pub readability: Readability,
    /// Mean character length of non-blank lines.
    pub average_line_length: f64,
    /// Share of non-blank lines carrying a comment.
    pub comment_ratio: f64,
    /// Mean nesting depth of code lines.
    pub average_nesting: f64,
    pub blank_lines: usize,
    pub comment_lines: usize,
}

impl QualityMetrics {
    /// Metrics of empty input.
    pub fn empty() -> Self {
        Self {
            lines_of_code: 0,
            functions: 0,
            classes: 0,
            complexity: 1,
            readability: Readability::Poor,
            average_line_length: 0.0,
            comment_ratio: 0.0,
            average_nesting: 0.0,
            blank_lines: 0,
            comment_lines: 0,
        }
    }
}

/// Compute metrics of `code` written in `language`.
pub fn metrics(
    code: &str,
    language: Language,
    thresholds: &ReadabilityThresholds,
) -> QualityMetrics {
    if code.trim().is_empty() {
        return QualityMetrics::empty();
    }
    let rules = rules_for(language);
    let scanned = scan(code, &rules.lexicon);

    let mut lines_of_code = 0;
    let mut blank_lines = 0;
    let mut comment_lines = 0;
    let mut commented = 0;
    let mut total_width = 0;
    for line in &scanned.lines {
        if line.is_blank() {
            blank_lines += 1;
            continue;
        }
        total_width += line.text.trim_end().chars().count();
        if line.comment.is_some() {
            commented += 1;
        }
        if line.is_comment_only() {
            comment_lines += 1;
        } else {
            lines_of_code += 1;
        }
    }
    let non_blank = scanned.lines.len() - blank_lines;

    let program = codeshift_surface_syntax::read(code, language);
    let average_line_length = ratio(total_width, non_blank);
    let comment_ratio = ratio(commented, non_blank);
    let average_nesting = average_nesting(&scanned, language);
    let met = thresholds.criteria_met(average_line_length, comment_ratio, average_nesting);

    let metrics = QualityMetrics {
        lines_of_code,
        functions: program.count(ConstructKind::FunctionDecl),
        classes: program.count(ConstructKind::ClassDecl),
        complexity: 1 + branch_points(&scanned, language),
        readability: Readability::from_criteria(met),
        average_line_length,
        comment_ratio,
        average_nesting,
        blank_lines,
        comment_lines,
    };
    tracing::debug!(
        language = %language,
        loc = metrics.lines_of_code,
        complexity = metrics.complexity,
        readability = %metrics.readability,
        "metrics"
    );
    metrics
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

/// Branch keywords and boolean combinators in code, outside literals and comments.
fn branch_points(scanned: &Scan, language: Language) -> usize {
    let Some(branches) = rules_for(language).branches() else {
        return 0;
    };
    scanned
        .lines
        .iter()
        .map(|line| branches.find_iter(&line.masked).count())
        .sum()
}

fn average_nesting(scanned: &Scan, language: Language) -> f64 {
    let depths = scanned.nesting(rules_for(language).block_style);
    let (sum, count) = scanned
        .lines
        .iter()
        .zip(&depths)
        .filter(|(line, _)| line.has_code())
        .fold((0, 0), |(sum, count), (_, &depth)| (sum + depth, count + 1));
    ratio(sum, count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(lang: Language, code: &str) -> QualityMetrics {
        metrics(code, lang, &ReadabilityThresholds::default())
    }

    #[test]
    fn test_empty_input() {
        let m = run(Language::Go, "  \n\n");
        assert_eq!(m, QualityMetrics::empty());
        assert_eq!(m.readability, Readability::Poor);
    }

    #[test]
    fn test_lines_of_code_skip_comments() {
        let source = "/* header\n   more */\n// note\nint x = 1; // one\n\nint y = 2;\n";
        let m = run(Language::Cpp, source);
        assert_eq!(m.lines_of_code, 2);
        assert_eq!(m.comment_lines, 3);
        assert_eq!(m.blank_lines, 1);
        assert!((m.comment_ratio - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_declaration_counts() {
        let source = "class Greeter {\n  greet(name) {\n    return name;\n  }\n}\n\nfunction main() {\n  console.log(1);\n}\n";
        let m = run(Language::JavaScript, source);
        assert_eq!(m.classes, 1);
        assert_eq!(m.functions, 2);
    }

    #[test]
    fn test_one_line_functions_are_counted() {
        let cases = [
            (Language::Python, "def f():\n    return 0\n", "def g(): return 1\n"),
            (
                Language::JavaScript,
                "function f() {\n  return 0;\n}\n",
                "function g() { return 1; }\n",
            ),
            (Language::Java, "int f() {\n    return 0;\n}\n", "int g() { return 1; }\n"),
            (Language::Cpp, "int f() {\n    return 0;\n}\n", "int g() { return 1; }\n"),
            (Language::Go, "func f() int {\n\treturn 0\n}\n", "func g() int { return 1 }\n"),
            (Language::Rust, "fn f() -> i32 {\n    0\n}\n", "fn g() -> i32 { 1 }\n"),
        ];
        for (language, base, one_liner) in cases {
            let before = run(language, base);
            let after = run(language, &format!("{base}{one_liner}"));
            assert_eq!(after.functions, before.functions + 1, "{language}");
            assert_eq!(after.lines_of_code, before.lines_of_code + 1, "{language}");
        }
    }

    #[test]
    fn test_complexity_ignores_strings_and_comments() {
        let source = "def f(x):\n    if x and not y:\n        return \"if or while\"  # for\n    elif x:\n        pass\n    while x:\n        x -= 1\n";
        let m = run(Language::Python, source);
        assert_eq!(m.complexity, 5);
    }

    #[test]
    fn test_else_if_counts_once() {
        let source = "if (a) {\n} else if (b || c) {\n} else {\n}\n";
        let m = run(Language::Java, source);
        assert_eq!(m.complexity, 4);
    }

    #[test]
    fn test_readability_uses_thresholds() {
        let source = "fn main() {\n    let x = 1;\n}\n";
        let strict = ReadabilityThresholds {
            line_length: 5.0,
            comment_ratio: 0.5,
            nesting_depth: 0.0,
        };
        assert_eq!(metrics(source, Language::Rust, &strict).readability, Readability::Poor);
        assert_eq!(run(Language::Rust, source).readability, Readability::Good);
    }
}
