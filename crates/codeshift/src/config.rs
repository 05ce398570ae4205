//! Configuration for codeshift.
//!
//! Loaded from `.codeshift/config.toml` under a project root. Every field
//! has a default, so a missing file (or a missing table) is not an error.
//!
//! Example config.toml:
//! ```toml
//! [readability]
//! line_length = 80.0
//! comment_ratio = 0.10
//! nesting_depth = 3.0
//!
//! [analysis]
//! max_line_length = 100
//! max_nesting_depth = 4
//!
//! [convert]
//! mark_untranslated = true
//!
//! [pretty]
//! colors = "auto"
//! ```

use crate::output::PrettyConfig;
use codeshift_metrics::ReadabilityThresholds;
use codeshift_surface_syntax::RenderOptions;
use codeshift_syntax_rules::AnalysisConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Location of the config file relative to a project root.
pub const CONFIG_PATH: &str = ".codeshift/config.toml";

/// Conversion settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(default)]
pub struct ConvertConfig {
    /// Wrap untranslated statements in a marked comment instead of copying them.
    pub mark_untranslated: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            mark_untranslated: true,
        }
    }
}

impl ConvertConfig {
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            mark_untranslated: self.mark_untranslated,
        }
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(default)]
pub struct CodeshiftConfig {
    pub readability: ReadabilityThresholds,
    pub analysis: AnalysisConfig,
    pub convert: ConvertConfig,
    pub pretty: PrettyConfig,
}

/// Why a config file could not be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl CodeshiftConfig {
    /// Load `.codeshift/config.toml` under `root`.
    ///
    /// A missing file gives the default configuration.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let path = root.join(CONFIG_PATH);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file");
                return Ok(Self::default());
            }
            Err(source) => return Err(ConfigError::Read { path, source }),
        };
        Self::parse(&content).map_err(|source| ConfigError::Parse { path, source })
    }

    /// Parse config from TOML text.
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::ColorMode;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) {
        let config_dir = dir.path().join(".codeshift");
        std::fs::create_dir_all(&config_dir).unwrap();
        let mut file = std::fs::File::create(config_dir.join("config.toml")).unwrap();
        writeln!(file, "{content}").unwrap();
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let config = CodeshiftConfig::load(dir.path()).unwrap();
        assert_eq!(config, CodeshiftConfig::default());
        assert!(config.convert.mark_untranslated);
        assert_eq!(config.analysis.max_line_length, 100);
    }

    #[test]
    fn test_partial_config() {
        let dir = TempDir::new().unwrap();
        write_config(
            &dir,
            r#"
[readability]
line_length = 60.0

[convert]
mark_untranslated = false

[pretty]
colors = "never"
"#,
        );
        let config = CodeshiftConfig::load(dir.path()).unwrap();
        assert_eq!(config.readability.line_length, 60.0);
        // unspecified keys keep their defaults
        assert_eq!(config.readability.comment_ratio, 0.10);
        assert!(!config.convert.mark_untranslated);
        assert!(!config.convert.render_options().mark_untranslated);
        assert_eq!(config.pretty.colors, Some(ColorMode::Never));
        assert_eq!(config.analysis, AnalysisConfig::default());
    }

    #[test]
    fn test_malformed_config() {
        let dir = TempDir::new().unwrap();
        write_config(&dir, "[analysis]\nmax_line_length = \"long\"\n");
        let err = CodeshiftConfig::load(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().starts_with("invalid config"));
    }
}
