//! The closed set of supported languages.

use serde::{Deserialize, Serialize};

/// A language codeshift can read, write, analyze and measure.
///
/// The set is fixed. Anything else is rejected with [`UnknownLanguage`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, schemars::JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    JavaScript,
    Java,
    Cpp,
    Go,
    Rust,
}

/// Error returned when a language tag is outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported language: {0:?}")]
pub struct UnknownLanguage(pub String);

impl Language {
    /// Every supported language, in display order.
    pub const ALL: [Language; 6] = [
        Language::Python,
        Language::JavaScript,
        Language::Java,
        Language::Cpp,
        Language::Go,
        Language::Rust,
    ];

    /// Canonical lowercase tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::JavaScript => "javascript",
            Language::Java => "java",
            Language::Cpp => "cpp",
            Language::Go => "go",
            Language::Rust => "rust",
        }
    }

    /// Human-facing name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::Python => "Python",
            Language::JavaScript => "JavaScript",
            Language::Java => "Java",
            Language::Cpp => "C++",
            Language::Go => "Go",
            Language::Rust => "Rust",
        }
    }

    /// File extensions associated with this language.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Language::Python => &["py", "pyw"],
            Language::JavaScript => &["js", "mjs", "cjs", "jsx"],
            Language::Java => &["java"],
            Language::Cpp => &["cpp", "cc", "cxx", "hpp", "hh", "h"],
            Language::Go => &["go"],
            Language::Rust => &["rs"],
        }
    }

    /// Resolve a tag, case-insensitively, accepting a few common aliases.
    pub fn from_tag(tag: &str) -> Result<Self, UnknownLanguage> {
        let lowered = tag.trim().to_ascii_lowercase();
        let lang = match lowered.as_str() {
            "python" | "py" | "python3" => Language::Python,
            "javascript" | "js" | "node" => Language::JavaScript,
            "java" => Language::Java,
            "cpp" | "c++" | "cxx" => Language::Cpp,
            "go" | "golang" => Language::Go,
            "rust" | "rs" => Language::Rust,
            _ => return Err(UnknownLanguage(tag.to_string())),
        };
        Ok(lang)
    }

    /// Detect a language from a file extension (without the dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|lang| lang.extensions().contains(&ext.as_str()))
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s)
    }
}
