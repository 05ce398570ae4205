//! Traits for language readers and writers.

use crate::ir::Node;
use codeshift_languages::Language;

/// Options that change how IR is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Emit `Unknown` nodes inside a comment marked `untranslated:`
    /// instead of as raw text.
    pub mark_untranslated: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            mark_untranslated: true,
        }
    }
}

/// A reader turns source code into the IR.
///
/// Reading never fails: text that matches no construct pattern becomes an
/// `Unknown` node carrying the original text.
pub trait Reader: Send + Sync {
    fn language(&self) -> Language;

    /// File extensions this reader handles (e.g., &["py"]).
    fn extensions(&self) -> &'static [&'static str] {
        self.language().extensions()
    }

    /// Parse source code into a `Program` node.
    fn read(&self, source: &str) -> Node;
}

/// A writer emits the IR as source code in a target language.
pub trait Writer: Send + Sync {
    fn language(&self) -> Language;

    /// File extension for output (e.g., "rs").
    fn extension(&self) -> &'static str {
        self.language().extensions().first().copied().unwrap_or_default()
    }

    /// Emit a `Program` node as source code.
    fn write(&self, program: &Node, options: &RenderOptions) -> String;
}
