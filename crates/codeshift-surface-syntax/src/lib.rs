//! Rule-driven, surface-level code conversion between languages.
//!
//! `codeshift-surface-syntax` reads source text into a shallow IR of
//! recognised statements and writes that IR back out in another language.
//! Recognition is table-driven (see `codeshift-languages`); nothing here
//! parses expressions into trees.
//!
//! # Architecture
//!
//! ```text
//! Source Languages        IR              Target Languages
//! ────────────────    ─────────────    ────────────────────
//! Python          ─┐                ┌─> Python
//! JavaScript      ─┤                ├─> JavaScript
//! Java            ─┼─> Node ────────┼─> Java
//! C++             ─┤   (ir.rs)      ├─> C++
//! Go              ─┤                ├─> Go
//! Rust            ─┘                └─> Rust
//! ```
//!
//! # Example
//!
//! ```
//! use codeshift_surface_syntax::{RenderOptions, convert};
//!
//! let conversion = convert(
//!     "def add(a, b):\n    return a + b\n",
//!     "python",
//!     "javascript",
//!     &RenderOptions::default(),
//! )
//! .unwrap();
//! assert_eq!(conversion.output, "function add(a, b) {\n  return a + b;\n}\n");
//! ```
//!
//! # Note on Translation Fidelity
//!
//! Statements no pattern recognises become `Unknown` nodes. Writers emit
//! them as marked comments (or verbatim when marking is off), and the
//! conversion reports their line ranges so partial results are visible.

pub mod expr;
pub mod input;
pub mod ir;
pub mod output;
pub mod params;
pub mod registry;
pub mod traits;
pub mod translate;

// Re-exports: IR types
pub use ir::{LANGUAGE, Node, RAW};

// Re-exports: Traits
pub use traits::{Reader, RenderOptions, Writer};

// Re-exports: Registry
pub use registry::{
    reader_for_extension, reader_for_language, readers, writer_for_language, writers,
};

// Re-exports: Built-in reader and writer
pub use input::{TableReader, read};
pub use output::{TableWriter, write};

// Re-exports: Conversion
pub use translate::{
    ConstructCount, Conversion, TranslateError, convert, convert_languages, validate_source,
};
