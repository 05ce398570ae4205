//! Syntax checks and deterministic fixes for codeshift languages.
//!
//! The analyzer scans source with the language's lexical rules and reports
//! [`Finding`]s in three severities:
//!
//! - **errors**: unbalanced brackets, unterminated literals and comments,
//!   missing statement terminators, missing `:` after compound headers
//! - **warnings**: empty indented blocks, mixed tab/space indentation
//! - **suggestions**: long lines, deep nesting, trailing whitespace
//!
//! With the `fix` feature (on by default), [`fix()`] repairs errors that have
//! a template, one at a time, re-analyzing after every edit.
//!
//! # Example
//!
//! ```
//! use codeshift_languages::Language;
//! use codeshift_syntax_rules::{AnalysisConfig, analyze};
//!
//! let analysis = analyze("print(\"hi", Language::Python, &AnalysisConfig::default());
//! assert_eq!(analysis.errors.len(), 1);
//! assert_eq!(analysis.errors[0].message, "Unterminated string literal");
//! ```

pub mod analyze;
mod checks;
pub mod config;
pub mod finding;
#[cfg(feature = "fix")]
pub mod fix;

pub use analyze::analyze;
pub use config::AnalysisConfig;
pub use finding::{Analysis, Finding, FindingKind, Position, Severity};
#[cfg(feature = "fix")]
pub use fix::{FixOutcome, FixRecord, fix};
