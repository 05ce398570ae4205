//! The individual checks. Each appends findings in any order; the caller sorts.

mod delimiters;
mod indentation;
mod style;
mod terminators;

use crate::config::AnalysisConfig;
use crate::finding::Finding;
use codeshift_languages::{LanguageRules, Scan};

pub(crate) fn run(scan: &Scan, rules: &LanguageRules, config: &AnalysisConfig) -> Vec<Finding> {
    let mut out = Vec::new();
    delimiters::check(scan, &mut out);
    terminators::check(scan, rules, &mut out);
    indentation::check(scan, rules, &mut out);
    style::check(scan, rules, config, &mut out);
    out
}
