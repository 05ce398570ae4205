//! Deterministic, rule-based code transformation.
//!
//! `codeshift` converts code between Python, JavaScript, Java, C++, Go and
//! Rust, checks it for syntax problems, repairs the mechanical ones and
//! reports structural metrics. Every request is a pure function of its input
//! and the loaded [`CodeshiftConfig`].
//!
//! # Example
//!
//! ```
//! let response = codeshift::convert("def add(a, b):\n    return a + b\n", "python", "go");
//! assert!(response.success);
//! assert!(response.output_code.starts_with("func add("));
//!
//! let fixed = codeshift::fix("print(\"hi", "python").unwrap();
//! assert_eq!(fixed.output_code, "print(\"hi\")");
//! ```

#[cfg(feature = "cli")]
pub mod commands;
pub mod config;
pub mod engine;
pub mod output;
pub mod response;

pub use config::{CodeshiftConfig, ConfigError, ConvertConfig};
pub use engine::{Engine, EngineError, analyze, convert, fix, metrics};
pub use output::{OutputFormat, OutputFormatter};
pub use response::{AnalyzeResponse, ConvertResponse, FixResponse};

pub use codeshift_languages::{Language, LineRange, UnknownLanguage};
pub use codeshift_metrics::{QualityMetrics, Readability, ReadabilityThresholds};
pub use codeshift_syntax_rules::{AnalysisConfig, Finding, FindingKind, FixRecord, Severity};
