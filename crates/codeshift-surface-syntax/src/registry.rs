//! Registry for readers and writers.
//!
//! Every language is served by the same table-driven reader and writer, so
//! the registry is a fixed pair of static arrays indexed by language.

use crate::input::TableReader;
use crate::output::TableWriter;
use crate::traits::{Reader, Writer};
use codeshift_languages::Language;

static READERS: [TableReader; 6] = [
    TableReader::new(Language::Python),
    TableReader::new(Language::JavaScript),
    TableReader::new(Language::Java),
    TableReader::new(Language::Cpp),
    TableReader::new(Language::Go),
    TableReader::new(Language::Rust),
];

static WRITERS: [TableWriter; 6] = [
    TableWriter::new(Language::Python),
    TableWriter::new(Language::JavaScript),
    TableWriter::new(Language::Java),
    TableWriter::new(Language::Cpp),
    TableWriter::new(Language::Go),
    TableWriter::new(Language::Rust),
];

fn slot(lang: Language) -> usize {
    Language::ALL
        .iter()
        .position(|l| *l == lang)
        .unwrap_or_default()
}

/// Get the reader for a language.
pub fn reader_for_language(lang: Language) -> &'static dyn Reader {
    &READERS[slot(lang)]
}

/// Get a reader by file extension.
pub fn reader_for_extension(ext: &str) -> Option<&'static dyn Reader> {
    Language::from_extension(ext).map(reader_for_language)
}

/// Get the writer for a language.
pub fn writer_for_language(lang: Language) -> &'static dyn Writer {
    &WRITERS[slot(lang)]
}

/// Get all readers.
pub fn readers() -> impl Iterator<Item = &'static dyn Reader> {
    READERS.iter().map(|r| r as &dyn Reader)
}

/// Get all writers.
pub fn writers() -> impl Iterator<Item = &'static dyn Writer> {
    WRITERS.iter().map(|w| w as &dyn Writer)
}
