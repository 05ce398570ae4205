//! Fix engine: deterministic repairs driven by analyzer errors.
//!
//! Each round re-analyzes the current text and applies the template of the
//! first error that has one. Warnings and suggestions are never applied.

use crate::analyze::analyze_scan;
use crate::config::AnalysisConfig;
use crate::finding::{Finding, FindingKind, Position};
use codeshift_languages::{
    Language, LanguageRules, LineRange, Scan, ScannedLine, closer_for, rules_for, scan,
};
use serde::Serialize;

/// One applied edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, schemars::JsonSchema)]
pub struct FixRecord {
    pub description: String,
    pub lines: LineRange,
}

/// Result of fixing one source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, schemars::JsonSchema)]
pub struct FixOutcome {
    pub code: String,
    /// Edits in application order.
    pub fixes: Vec<FixRecord>,
    /// Errors left in the result (no template applies).
    pub unresolved: Vec<Finding>,
}

/// Repair `code` as `language` source.
///
/// Never fails: code the engine cannot improve is returned as it came in.
pub fn fix(code: &str, language: Language, config: &AnalysisConfig) -> FixOutcome {
    let rules = rules_for(language);
    let mut source = Source::parse(code);
    let mut fixes = Vec::new();
    let mut text = code.to_string();
    let mut scanned = scan(&text, &rules.lexicon);
    let mut analysis = analyze_scan(&scanned, rules, config);
    let cap = iteration_cap(code);
    for _ in 0..cap {
        let Some(finding) = analysis.first_fixable() else {
            break;
        };
        let Some(record) = source.apply(finding, &scanned, rules) else {
            tracing::debug!(finding = %finding, "fix template did not apply");
            break;
        };
        let next = source.render();
        if next == text {
            break;
        }
        tracing::trace!(fix = %record.description, "applied");
        fixes.push(record);
        text = next;
        scanned = scan(&text, &rules.lexicon);
        analysis = analyze_scan(&scanned, rules, config);
    }
    if analysis.first_fixable().is_some() {
        tracing::debug!(cap, "fix iteration cap reached");
    }
    tracing::debug!(
        language = %language,
        fixes = fixes.len(),
        unresolved = analysis.errors.len(),
        "fixed"
    );
    FixOutcome {
        code: text,
        fixes,
        unresolved: analysis.errors,
    }
}

/// Upper bound on fix rounds. Every edit either consumes a bracket or quote
/// of the input or terminates a line holding one.
fn iteration_cap(code: &str) -> usize {
    4 * code.chars().filter(|c| !c.is_whitespace()).count() + 16
}

/// Source text as editable lines.
///
/// Lines are rejoined with the line ending of the first line, so CRLF input
/// stays CRLF.
struct Source {
    lines: Vec<String>,
    newline: &'static str,
    trailing_newline: bool,
}

impl Source {
    fn parse(code: &str) -> Self {
        let newline = match code.find('\n') {
            Some(at) if code[..at].ends_with('\r') => "\r\n",
            _ => "\n",
        };
        Self {
            lines: code.lines().map(str::to_string).collect(),
            newline,
            trailing_newline: code.ends_with('\n'),
        }
    }

    fn render(&self) -> String {
        let mut out = self.lines.join(self.newline);
        if self.trailing_newline {
            out.push_str(self.newline);
        }
        out
    }

    fn apply(
        &mut self,
        finding: &Finding,
        scanned: &Scan,
        rules: &LanguageRules,
    ) -> Option<FixRecord> {
        let number = finding.line();
        let idx = number.checked_sub(1)?;
        let line = scanned.line(number)?;
        let description = match &finding.kind {
            FindingKind::UnterminatedString { quote, closers, .. } => {
                let text = self.lines.get_mut(idx)?;
                // an odd run of backslashes would escape the new quote
                let escapes = text.chars().rev().take_while(|c| *c == '\\').count();
                if escapes % 2 == 1 {
                    text.push('\\');
                }
                text.push_str(quote);
                text.push_str(closers);
                if closers.is_empty() {
                    format!("Closed unterminated string on line {number}")
                } else {
                    format!("Closed unterminated string and added '{closers}' on line {number}")
                }
            }
            FindingKind::UnterminatedComment { close } => {
                let last = self.lines.last_mut()?;
                last.push(' ');
                last.push_str(close);
                let end = self.lines.len();
                return Some(FixRecord {
                    description: format!("Closed block comment opened on line {number}"),
                    lines: LineRange::new(number, end),
                });
            }
            FindingKind::UnclosedDelimiter {
                open,
                col,
                revealed_by,
            } => {
                let close = closer_for(*open);
                match revealed_by {
                    Some(at) if at.line == number => {
                        insert_char(self.lines.get_mut(idx)?, at.col, close);
                    }
                    _ if matches!(open, '(' | '[') && !line.ends_in_literal => {
                        let pos = closer_position(line, *col, rules);
                        insert_char(self.lines.get_mut(idx)?, pos, close);
                    }
                    _ => self.insert_closing_line(idx, close, *revealed_by),
                }
                format!("Inserted '{close}' to close '{open}' from line {number}")
            }
            FindingKind::UnmatchedCloser { close, col } => {
                let text = self.lines.get_mut(idx)?;
                remove_char(text, *col);
                if text.trim().is_empty() {
                    self.lines.remove(idx);
                }
                format!("Removed unmatched '{close}' on line {number}")
            }
            FindingKind::MissingTerminator { terminator } => {
                let pos = code_end(line, rules);
                insert_char(self.lines.get_mut(idx)?, pos, *terminator);
                format!("Added missing '{terminator}' on line {number}")
            }
            _ => return None,
        };
        Some(FixRecord {
            description,
            lines: LineRange::line(number),
        })
    }

    /// Insert a line holding `close`, indented like the opener's line, before
    /// the line of the closer that revealed it (or at the end of input).
    fn insert_closing_line(
        &mut self,
        opener_idx: usize,
        close: char,
        revealed_by: Option<Position>,
    ) {
        let indent: String = self
            .lines
            .get(opener_idx)
            .map(|l| l.chars().take_while(|c| c.is_whitespace()).collect())
            .unwrap_or_default();
        let text = format!("{indent}{close}");
        match revealed_by {
            Some(at) => {
                let at = at.line.saturating_sub(1).min(self.lines.len());
                self.lines.insert(at, text);
            }
            None => self.lines.push(text),
        }
    }
}

/// Character column just past the last code character (before any line comment).
fn code_end(line: &ScannedLine, rules: &LanguageRules) -> usize {
    let chars: Vec<char> = line.text.chars().collect();
    let end = match line.comment_col {
        Some(col) if starts_with_at(&chars, col, rules.lexicon.line_comment) => col,
        _ => chars.len(),
    };
    trim_end(&chars, end)
}

/// Where a missing `)` or `]` goes: the end of the opener's line, before a
/// trailing `{`, `:` or `;`.
fn closer_position(line: &ScannedLine, open_col: usize, rules: &LanguageRules) -> usize {
    let chars: Vec<char> = line.text.chars().collect();
    let end = code_end(line, rules);
    let pos = match end.checked_sub(1).map(|i| chars[i]) {
        Some('{' | ':' | ';') => trim_end(&chars, end - 1),
        _ => end,
    };
    if pos > open_col { pos } else { end }
}

fn trim_end(chars: &[char], mut end: usize) -> usize {
    while end > 0 && chars[end - 1].is_whitespace() {
        end -= 1;
    }
    end
}

fn starts_with_at(chars: &[char], at: usize, needle: &str) -> bool {
    !needle.is_empty()
        && needle
            .chars()
            .enumerate()
            .all(|(k, c)| chars.get(at + k) == Some(&c))
}

fn byte_index(text: &str, col: usize) -> usize {
    text.char_indices()
        .nth(col)
        .map_or(text.len(), |(i, _)| i)
}

fn insert_char(text: &mut String, col: usize, c: char) {
    let at = byte_index(text, col);
    text.insert(at, c);
}

fn remove_char(text: &mut String, col: usize) {
    let at = byte_index(text, col);
    if at < text.len() {
        text.remove(at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(lang: Language, code: &str) -> FixOutcome {
        fix(code, lang, &AnalysisConfig::default())
    }

    #[test]
    fn test_unterminated_print() {
        let out = run(Language::Python, "print(\"hi");
        assert_eq!(out.code, "print(\"hi\")");
        assert_eq!(out.fixes.len(), 1);
        assert_eq!(out.fixes[0].lines, LineRange::line(1));
        assert!(out.unresolved.is_empty());
    }

    #[test]
    fn test_missing_semicolons_before_comments() {
        let out = run(Language::Java, "int x = 1 // one\nint y = 2;\n");
        assert_eq!(out.code, "int x = 1; // one\nint y = 2;\n");
        assert_eq!(out.fixes[0].description, "Added missing ';' on line 1");
    }

    #[test]
    fn test_crlf_line_endings_are_kept() {
        let out = run(Language::Java, "int x = 1\r\nint y = 2;\r\n");
        assert_eq!(out.code, "int x = 1;\r\nint y = 2;\r\n");

        let out = run(Language::Go, "func main() {\r\n\ty()\r\n");
        assert_eq!(out.code, "func main() {\r\n\ty()\r\n}\r\n");
    }

    #[test]
    fn test_unclosed_paren_before_brace() {
        let out = run(Language::JavaScript, "if (x > 0 {\n  go();\n}\n");
        assert_eq!(out.code, "if (x > 0) {\n  go();\n}\n");
        assert_eq!(out.fixes.len(), 1);
    }

    #[test]
    fn test_unclosed_paren_before_colon() {
        let out = run(Language::Python, "if ok(x:\n    pass\n");
        assert_eq!(out.code, "if ok(x):\n    pass\n");
    }

    #[test]
    fn test_unclosed_brace_at_end() {
        let out = run(Language::Go, "func main() {\n\tif x {\n\t\ty()\n\t}\n");
        assert_eq!(out.code, "func main() {\n\tif x {\n\t\ty()\n\t}\n}\n");
        assert_eq!(
            out.fixes[0].description,
            "Inserted '}' to close '{' from line 1"
        );
    }

    #[test]
    fn test_brace_revealed_by_later_closer() {
        let out = run(Language::JavaScript, "run(() => {\n  go();\n);\n");
        assert_eq!(out.code, "run(() => {\n  go();\n}\n);\n");
    }

    #[test]
    fn test_unmatched_closer_removed() {
        let out = run(Language::Cpp, "int main() {\n    return 0;\n}\n}\n");
        assert_eq!(out.code, "int main() {\n    return 0;\n}\n");
        assert_eq!(out.fixes[0].description, "Removed unmatched '}' on line 4");
    }

    #[test]
    fn test_same_line_reveal() {
        let out = run(Language::Go, "x := f([1, 2)\n");
        assert_eq!(out.code, "x := f([1, 2])\n");
    }

    #[test]
    fn test_unfixable_errors_are_left() {
        let out = run(Language::Python, "if x\n    y = 1\n");
        assert_eq!(out.code, "if x\n    y = 1\n");
        assert!(out.fixes.is_empty());
        assert_eq!(out.unresolved.len(), 1);
    }

    #[test]
    fn test_fix_is_idempotent() {
        let first = run(Language::Java, "class A {\n  void f() {\n    g(1\n  }\n");
        let second = run(Language::Java, &first.code);
        assert!(second.fixes.is_empty());
        assert_eq!(second.code, first.code);
    }
}
