//! Style suggestions: line length, nesting depth, trailing whitespace.

use crate::config::AnalysisConfig;
use crate::finding::{Finding, FindingKind};
use codeshift_languages::{LanguageRules, LineRange, Scan};

pub(crate) fn check(
    scan: &Scan,
    rules: &LanguageRules,
    config: &AnalysisConfig,
    out: &mut Vec<Finding>,
) {
    for line in &scan.lines {
        if line.width > config.max_line_length {
            out.push(
                Finding::suggestion(
                    FindingKind::LongLine {
                        width: line.width,
                        limit: config.max_line_length,
                    },
                    format!(
                        "Line is {} characters long (limit {})",
                        line.width, config.max_line_length
                    ),
                )
                .at(line.number),
            );
        }
    }

    let depths = scan.nesting(rules.block_style);
    let deep = scan.lines.iter().zip(&depths).map(|(line, &depth)| {
        (line.has_code() && depth > config.max_nesting_depth).then_some(depth)
    });
    for (lines, depth) in runs(deep) {
        out.push(
            Finding::suggestion(
                FindingKind::DeepNesting {
                    depth,
                    limit: config.max_nesting_depth,
                },
                format!(
                    "Nesting depth {depth} exceeds {}; consider extracting a function",
                    config.max_nesting_depth
                ),
            )
            .spanning(lines),
        );
    }

    let trailing = scan
        .lines
        .iter()
        .map(|line| line.trailing_whitespace.then_some(()));
    for (lines, ()) in runs(trailing) {
        out.push(
            Finding::suggestion(FindingKind::TrailingWhitespace, "Trailing whitespace")
                .spanning(lines),
        );
    }
}

/// Maximal runs of consecutive flagged lines, with the largest flag value.
///
/// Lines are numbered from 1 in iteration order; any unflagged line ends a run.
fn runs<T: Ord + Copy>(flags: impl Iterator<Item = Option<T>>) -> Vec<(LineRange, T)> {
    let mut out: Vec<(LineRange, T)> = Vec::new();
    let mut current: Option<(LineRange, T)> = None;
    for (idx, flag) in flags.enumerate() {
        let number = idx + 1;
        match (flag, current.as_mut()) {
            (Some(value), Some((range, max))) => {
                range.extend_to(LineRange::line(number));
                *max = (*max).max(value);
            }
            (Some(value), None) => current = Some((LineRange::line(number), value)),
            (None, _) => out.extend(current.take()),
        }
    }
    out.extend(current);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use codeshift_languages::{Language, rules_for, scan};

    fn findings(lang: Language, source: &str, config: AnalysisConfig) -> Vec<Finding> {
        let rules = rules_for(lang);
        let mut out = Vec::new();
        check(&scan(source, &rules.lexicon), rules, &config, &mut out);
        out
    }

    #[test]
    fn test_long_line() {
        let config = AnalysisConfig {
            max_line_length: 10,
            ..AnalysisConfig::default()
        };
        let out = findings(Language::Go, "x := 1\nvalue := compute(a, b)\n", config);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].line(), 2);
        assert_eq!(
            out[0].kind,
            FindingKind::LongLine {
                width: 22,
                limit: 10
            }
        );
    }

    #[test]
    fn test_deep_nesting_is_one_finding_per_run() {
        let config = AnalysisConfig {
            max_nesting_depth: 1,
            ..AnalysisConfig::default()
        };
        let source = "func f() {\n\tif a {\n\t\tif b {\n\t\t\tg()\n\t\t\th()\n\t\t}\n\t}\n}\n";
        let out = findings(Language::Go, source, config);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].lines, LineRange::new(3, 6));
        assert_eq!(
            out[0].kind,
            FindingKind::DeepNesting { depth: 3, limit: 1 }
        );
    }

    #[test]
    fn test_trailing_whitespace_runs() {
        let out = findings(
            Language::Python,
            "a = 1 \nb = 2\t\nc = 3\nd = 4 \n",
            AnalysisConfig::default(),
        );
        let ranges: Vec<LineRange> = out.iter().map(|f| f.lines).collect();
        assert_eq!(ranges, vec![LineRange::new(1, 2), LineRange::line(4)]);
    }
}
