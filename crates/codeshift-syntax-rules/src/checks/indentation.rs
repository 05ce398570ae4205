//! Block structure for indentation-delimited languages.

use crate::finding::{Finding, FindingKind};
use codeshift_languages::{BlockStyle, LanguageRules, Scan, ScannedLine, first_word};

/// One statement: its physical lines, joined while brackets or literals stay open.
struct Statement<'a> {
    first: &'a ScannedLine,
    last: &'a ScannedLine,
    masked: String,
}

impl Statement<'_> {
    fn is_header(&self) -> bool {
        self.masked.trim_end().ends_with(':')
    }

    /// Whether a `:` appears outside brackets.
    fn has_top_level_colon(&self) -> bool {
        let mut depth = 0usize;
        for c in self.masked.chars() {
            match c {
                '(' | '[' | '{' => depth += 1,
                ')' | ']' | '}' => depth = depth.saturating_sub(1),
                ':' if depth == 0 => return true,
                _ => {}
            }
        }
        false
    }
}

fn continues(line: &ScannedLine) -> bool {
    line.ends_in_literal
        || line.paren_depth_end > 0
        || line.brace_depth_end > 0
        || line.masked.ends_with('\\')
}

fn statements(scan: &Scan) -> Vec<Statement<'_>> {
    let mut out = Vec::new();
    let mut lines = scan.lines.iter().filter(|l| l.has_code() || l.ends_in_literal);
    while let Some(first) = lines.next() {
        let mut last = first;
        let mut masked = first.masked.clone();
        while continues(last) {
            let Some(next) = lines.next() else { break };
            masked.push(' ');
            masked.push_str(next.masked.trim());
            last = next;
        }
        out.push(Statement {
            first,
            last,
            masked,
        });
    }
    out
}

pub(crate) fn check(scan: &Scan, rules: &LanguageRules, out: &mut Vec<Finding>) {
    if rules.block_style != BlockStyle::Indent {
        return;
    }
    let statements = statements(scan);
    for (i, stmt) in statements.iter().enumerate() {
        let keyword = first_word(stmt.first.masked.trim_start());
        if rules.compound_keywords.contains(&keyword) && !stmt.has_top_level_colon() {
            out.push(
                Finding::error(
                    FindingKind::MissingColon {
                        keyword: keyword.to_string(),
                    },
                    format!("Missing ':' after '{keyword}' statement"),
                )
                .at(stmt.first.number),
            );
            continue;
        }
        if !stmt.is_header() {
            continue;
        }
        let indented = statements
            .get(i + 1)
            .is_some_and(|next| next.first.indent > stmt.first.indent);
        if !indented {
            out.push(
                Finding::warning(
                    FindingKind::EmptyBlock,
                    format!("Expected an indented block after line {}", stmt.last.number),
                )
                .at(stmt.first.number),
            );
        }
    }
    mixed_indentation(scan, out);
}

fn mixed_indentation(scan: &Scan, out: &mut Vec<Finding>) {
    // whether the first indented line used tabs
    let mut style: Option<bool> = None;
    let mut reported_style = false;
    for line in &scan.lines {
        if line.starts_in_literal || !line.has_code() || line.indent == 0 {
            continue;
        }
        if line.mixed_indent {
            out.push(
                Finding::warning(
                    FindingKind::MixedIndentation,
                    "Indentation mixes tabs and spaces",
                )
                .at(line.number),
            );
            continue;
        }
        match style {
            None => style = Some(line.tab_indent),
            Some(tabs) if tabs != line.tab_indent && !reported_style => {
                let (here, elsewhere) = if line.tab_indent {
                    ("tabs", "spaces")
                } else {
                    ("spaces", "tabs")
                };
                out.push(
                    Finding::warning(
                        FindingKind::MixedIndentation,
                        format!("Indentation uses {here} here but {elsewhere} earlier"),
                    )
                    .at(line.number),
                );
                reported_style = true;
            }
            Some(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codeshift_languages::{Language, rules_for, scan};

    fn findings(source: &str) -> Vec<Finding> {
        let rules = rules_for(Language::Python);
        let mut out = Vec::new();
        check(&scan(source, &rules.lexicon), rules, &mut out);
        out
    }

    #[test]
    fn test_well_formed_blocks() {
        let source = "def f(a,\n      b):\n    if a:\n        return b\n    return {\n        'k': 1,\n    }\n";
        assert!(findings(source).is_empty());
    }

    #[test]
    fn test_empty_block() {
        let out = findings("def f():\nx = 1\n");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].kind, FindingKind::EmptyBlock);
        assert_eq!(out[0].line(), 1);

        let out = findings("for x in xs:\n");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].message, "Expected an indented block after line 1");
    }

    #[test]
    fn test_missing_colon() {
        let out = findings("if x > 0\n    y = 1\nelse\n    y = 2\n");
        assert_eq!(out.len(), 2);
        assert_eq!(
            out[0].kind,
            FindingKind::MissingColon {
                keyword: "if".into()
            }
        );
        assert_eq!(out[1].line(), 3);
        assert!(!out[0].kind.is_fixable());
    }

    #[test]
    fn test_one_line_compound_statement() {
        assert!(findings("if ok: run()\nelse: stop()\n").is_empty());
        assert!(findings("result = value if ok else other\n").is_empty());
    }

    #[test]
    fn test_mixed_indentation() {
        let out = findings("if a:\n \tx = 1\n");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].message, "Indentation mixes tabs and spaces");

        let out = findings("if a:\n    x = 1\nif b:\n\ty = 2\n");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].line(), 4);
    }
}
