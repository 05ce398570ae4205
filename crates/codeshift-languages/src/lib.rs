//! Language rule tables for codeshift.
//!
//! Every supported language is described by a static [`LanguageRules`] table:
//! lexical conventions, keyword spellings, rendering templates and an ordered
//! list of construct patterns. The rest of the workspace is table-driven and
//! contains no per-language branches beyond what these tables express.
//!
//! # Example
//!
//! ```
//! use codeshift_languages::{ConstructKind, Language, rules_for};
//!
//! let python = rules_for(Language::Python);
//! let m = python.classify("def add(a, b):").unwrap();
//! assert_eq!(m.kind, ConstructKind::FunctionDecl);
//! assert_eq!(m.get("name"), Some("add"));
//! ```

mod cpp;
mod go;
mod java;
mod javascript;
mod language;
mod python;
mod registry;
pub mod rules;
pub mod scan;
mod span;
mod rust;
pub mod types;

pub use language::{Language, UnknownLanguage};
pub use registry::{all_rules, rules_for};
pub use rules::{
    BlockStyle, CharLiterals, ClassStyle, ConstructKind, ConstructMatch, ConstructPattern,
    Declarations, Keywords, LanguageRules, Lexicon, ParamStyle, PatternSpec, PrintStyle, Templates,
    TerminatorPolicy, fill,
};
pub use scan::{
    Delimiter, LiteralKind, Scan, ScannedLine, UnterminatedLiteral, closer_for, first_word,
    is_expression_brace, open_brace_before, opener_for, scan,
};
pub use span::LineRange;
pub use types::{
    CanonicalType, TypePosition, canonical_type, infer_literal, map_type, sequence_element,
    type_name,
};
