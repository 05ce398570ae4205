//! Analyzer entry point.

use crate::checks;
use crate::config::AnalysisConfig;
use crate::finding::Analysis;
use codeshift_languages::{Language, LanguageRules, Scan, rules_for, scan};

/// Check `code` as `language` source.
///
/// Empty or whitespace-only code has no findings.
pub fn analyze(code: &str, language: Language, config: &AnalysisConfig) -> Analysis {
    if code.trim().is_empty() {
        return Analysis::default();
    }
    let rules = rules_for(language);
    let analysis = analyze_scan(&scan(code, &rules.lexicon), rules, config);
    tracing::debug!(
        language = %language,
        errors = analysis.errors.len(),
        warnings = analysis.warnings.len(),
        suggestions = analysis.suggestions.len(),
        "analyzed"
    );
    analysis
}

/// Check already-scanned source.
pub(crate) fn analyze_scan(
    scan: &Scan,
    rules: &LanguageRules,
    config: &AnalysisConfig,
) -> Analysis {
    Analysis::from_findings(checks::run(scan, rules, config))
}
