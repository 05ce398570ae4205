//! Source-to-source conversion: read, write, and describe what happened.

use crate::input::read;
use crate::ir::Node;
use crate::output::write;
use crate::traits::RenderOptions;
use codeshift_languages::{ConstructKind, Language, LineRange, UnknownLanguage};
use serde::Serialize;

/// Why a conversion could not start.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranslateError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    UnsupportedLanguage(#[from] UnknownLanguage),
}

/// Per-kind count of translated constructs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, schemars::JsonSchema)]
pub struct ConstructCount {
    pub kind: ConstructKind,
    pub count: usize,
}

/// Result of converting one source text.
#[derive(Debug, Clone, Serialize, schemars::JsonSchema)]
pub struct Conversion {
    pub source: Language,
    pub target: Language,
    pub output: String,
    /// The IR the output was written from.
    pub ir: Node,
    /// Translated constructs by kind; kinds that never occur are omitted.
    pub counts: Vec<ConstructCount>,
    /// Source lines of constructs left untranslated.
    pub untranslated: Vec<LineRange>,
    /// Human-readable summary lines.
    pub analysis: Vec<String>,
}

impl Conversion {
    /// Whether every construct was translated.
    pub fn is_complete(&self) -> bool {
        self.untranslated.is_empty()
    }
}

/// Reject input that cannot be source text.
pub fn validate_source(source: &str) -> Result<(), TranslateError> {
    if source.trim().is_empty() {
        return Err(TranslateError::InvalidInput("source code is empty".to_string()));
    }
    if source.contains('\0') {
        return Err(TranslateError::InvalidInput(
            "source contains NUL bytes and is not text".to_string(),
        ));
    }
    Ok(())
}

/// Convert `source` between two language tags.
pub fn convert(
    source: &str,
    from: &str,
    to: &str,
    options: &RenderOptions,
) -> Result<Conversion, TranslateError> {
    validate_source(source)?;
    let from = Language::from_tag(from)?;
    let to = Language::from_tag(to)?;
    Ok(convert_languages(source, from, to, options))
}

/// Convert `source` between two resolved languages. Never fails.
pub fn convert_languages(
    source: &str,
    from: Language,
    to: Language,
    options: &RenderOptions,
) -> Conversion {
    let ir = read(source, from);
    let output = write(&ir, to, options);
    let counts = count_constructs(&ir);
    let untranslated = ir.unknown_lines();
    let analysis = describe(from, to, &counts, ir.count(ConstructKind::Unknown), &untranslated);
    tracing::debug!(
        from = %from,
        to = %to,
        bytes = output.len(),
        untranslated = untranslated.len(),
        "converted"
    );
    Conversion {
        source: from,
        target: to,
        output,
        ir,
        counts,
        untranslated,
        analysis,
    }
}

fn count_constructs(ir: &Node) -> Vec<ConstructCount> {
    ConstructKind::TRANSLATABLE
        .iter()
        .map(|&kind| {
            let mut count = 0;
            ir.walk(&mut |node| {
                // `else` and `elif` belong to the conditional they continue
                if node.kind == kind && !node.is_branch() {
                    count += 1;
                }
            });
            ConstructCount { kind, count }
        })
        .filter(|c| c.count > 0)
        .collect()
}

fn describe(
    from: Language,
    to: Language,
    counts: &[ConstructCount],
    unknown: usize,
    untranslated: &[LineRange],
) -> Vec<String> {
    let mut lines = vec![format!("Converted {from} to {to}")];
    lines.extend(
        counts
            .iter()
            .map(|c| format!("{}: {}", c.kind.label(), c.count)),
    );
    if !untranslated.is_empty() {
        let ranges: Vec<String> = untranslated.iter().map(ToString::to_string).collect();
        let noun = if unknown == 1 {
            "construct"
        } else {
            "constructs"
        };
        lines.push(format!(
            "Partial translation: {unknown} {noun} left untranslated (lines {})",
            ranges.join(", ")
        ));
    }
    lines
}
