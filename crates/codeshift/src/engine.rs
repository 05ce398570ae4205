//! The four request shapes: convert, analyze, fix and metrics.

use crate::config::CodeshiftConfig;
use crate::response::{AnalyzeResponse, ConvertResponse, FixResponse};
use codeshift_languages::{Language, UnknownLanguage};
use codeshift_metrics::QualityMetrics;
use codeshift_surface_syntax::{Conversion, TranslateError};

/// Why a request was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// Empty or non-text input.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    UnsupportedLanguage(#[from] UnknownLanguage),
}

impl From<TranslateError> for EngineError {
    fn from(err: TranslateError) -> Self {
        match err {
            TranslateError::InvalidInput(reason) => EngineError::InvalidInput(reason),
            TranslateError::UnsupportedLanguage(lang) => EngineError::UnsupportedLanguage(lang),
        }
    }
}

/// Entry point for every request, holding the configuration they share.
///
/// Requests are pure functions of their input and the configuration, so one
/// `Engine` can serve any number of threads.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: CodeshiftConfig,
}

impl Engine {
    pub fn new(config: CodeshiftConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodeshiftConfig {
        &self.config
    }

    /// Convert between two language tags, keeping the full conversion result.
    pub fn try_convert(
        &self,
        source: &str,
        from: &str,
        to: &str,
    ) -> Result<Conversion, EngineError> {
        let options = self.config.convert.render_options();
        Ok(codeshift_surface_syntax::convert(source, from, to, &options)?)
    }

    /// Convert between two language tags.
    ///
    /// Rejected requests come back with `success = false` and the reason in
    /// `error`; partial translations succeed and list what was left behind.
    pub fn convert(&self, source: &str, from: &str, to: &str) -> ConvertResponse {
        match self.try_convert(source, from, to) {
            Ok(conversion) => ConvertResponse::from(conversion),
            Err(err) => {
                tracing::debug!(error = %err, "conversion rejected");
                ConvertResponse::failure(&err)
            }
        }
    }

    /// Check `source` and measure it. Empty source has no findings.
    pub fn analyze(&self, source: &str, language: &str) -> Result<AnalyzeResponse, EngineError> {
        let language = Language::from_tag(language)?;
        let analysis = codeshift_syntax_rules::analyze(source, language, &self.config.analysis);
        let metrics = self.measure(source, language);
        Ok(AnalyzeResponse {
            errors: analysis.errors,
            warnings: analysis.warnings,
            suggestions: analysis.suggestions,
            metrics,
        })
    }

    /// Repair what the analyzer can repair; metrics describe the repaired code.
    pub fn fix(&self, source: &str, language: &str) -> Result<FixResponse, EngineError> {
        let language = Language::from_tag(language)?;
        let outcome = codeshift_syntax_rules::fix(source, language, &self.config.analysis);
        let metrics = self.measure(&outcome.code, language);
        Ok(FixResponse {
            output_code: outcome.code,
            fixes: outcome.fixes,
            unresolved: outcome.unresolved,
            metrics,
        })
    }

    pub fn metrics(&self, source: &str, language: &str) -> Result<QualityMetrics, EngineError> {
        let language = Language::from_tag(language)?;
        Ok(self.measure(source, language))
    }

    fn measure(&self, source: &str, language: Language) -> QualityMetrics {
        codeshift_metrics::metrics(source, language, &self.config.readability)
    }
}

/// [`Engine::convert`] with the default configuration.
pub fn convert(source: &str, from: &str, to: &str) -> ConvertResponse {
    Engine::default().convert(source, from, to)
}

/// [`Engine::analyze`] with the default configuration.
pub fn analyze(source: &str, language: &str) -> Result<AnalyzeResponse, EngineError> {
    Engine::default().analyze(source, language)
}

/// [`Engine::fix`] with the default configuration.
pub fn fix(source: &str, language: &str) -> Result<FixResponse, EngineError> {
    Engine::default().fix(source, language)
}

/// [`Engine::metrics`] with the default configuration.
pub fn metrics(source: &str, language: &str) -> Result<QualityMetrics, EngineError> {
    Engine::default().metrics(source, language)
}
