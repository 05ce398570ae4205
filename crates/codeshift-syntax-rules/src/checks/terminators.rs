//! Statement terminators for languages that end statements with `;`.

use crate::finding::{Finding, FindingKind};
use codeshift_languages::{
    Language, LanguageRules, Scan, ScannedLine, TerminatorPolicy, first_word, is_expression_brace,
};

/// Statements introduced by these keywords are headers, not terminated.
const HEADER_KEYWORDS: &[&str] = &[
    "if", "else", "for", "foreach", "while", "do", "switch", "try", "catch", "finally", "loop",
    "match", "unsafe", "where",
];

/// Keywords that continue the previous line's declaration.
const CONTINUATION_KEYWORDS: &[&str] = &["where", "implements", "extends", "throws"];

/// A line ending in one of these continues on the next line.
const CONTINUES_AFTER: &[char] = &[
    ';', '{', '}', '(', '[', ',', ':', '=', '+', '-', '*', '/', '%', '&', '|', '^', '!', '<', '>',
    '.', '\\', '?',
];

/// A next line starting with one of these continues this one.
const CONTINUES_BEFORE: &[char] = &[
    '.', '?', ':', '&', '|', '+', '-', '*', '/', '%', '=', '<', '>', '^', '{', ')', ']', ',',
];

pub(crate) fn check(scan: &Scan, rules: &LanguageRules, out: &mut Vec<Finding>) {
    let required = match rules.terminator {
        TerminatorPolicy::None => return,
        TerminatorPolicy::Optional => false,
        TerminatorPolicy::Required => true,
    };
    let string_lines: Vec<usize> = scan.unterminated.iter().map(|lit| lit.line).collect();
    // for each open `{`: whether it opened an expression (a literal)
    let mut braces: Vec<bool> = Vec::new();
    for (idx, line) in scan.lines.iter().enumerate() {
        let in_expression = braces.last().copied().unwrap_or(false);
        track_braces(&line.masked, &mut braces);
        if in_expression || string_lines.contains(&line.number) {
            continue;
        }
        let next = scan.lines[idx + 1..]
            .iter()
            .find(|l| l.has_code())
            .map(|l| l.masked.trim_start());
        if !needs_terminator(line, next, rules.language) {
            continue;
        }
        let finding = if required {
            Finding::error(
                FindingKind::MissingTerminator { terminator: ';' },
                "Missing ';' at end of statement",
            )
        } else {
            Finding::suggestion(
                FindingKind::MissingTerminator { terminator: ';' },
                "Consider ending the statement with ';'",
            )
        };
        out.push(finding.at(line.number));
    }
}

fn track_braces(masked: &str, braces: &mut Vec<bool>) {
    for (i, c) in masked.char_indices() {
        match c {
            '{' => braces.push(is_expression_brace(&masked[..i])),
            '}' => {
                braces.pop();
            }
            _ => {}
        }
    }
}

fn needs_terminator(line: &ScannedLine, next: Option<&str>, language: Language) -> bool {
    if !line.has_code() || line.starts_in_literal || line.ends_in_literal {
        return false;
    }
    if line.paren_depth_end > 0 {
        return false;
    }
    let code = line.masked.trim();
    if code.starts_with(['#', '@']) {
        return false;
    }
    let Some(last) = code.chars().last() else {
        return false;
    };
    // `foo()?` is Rust's error propagation, not a continuation
    let rust_try = language == Language::Rust && last == '?';
    if CONTINUES_AFTER.contains(&last) && !rust_try {
        return false;
    }
    let word = first_word(code);
    if HEADER_KEYWORDS.contains(&word) {
        return false;
    }
    if let Some(next) = next {
        if next.starts_with(CONTINUES_BEFORE) || CONTINUATION_KEYWORDS.contains(&first_word(next))
        {
            return false;
        }
        // a block's tail expression is its value
        let tail = language == Language::Rust
            && line.brace_depth_start > 0
            && next.starts_with('}')
            && word != "let";
        if tail {
            return false;
        }
    }
    true
}
