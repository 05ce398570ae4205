//! Shared lexical scan.
//!
//! One pass splits source into lines and, for each line, separates code from
//! comments and blanks out the interior of string and character literals.
//! The extractor, the analyzer and the metrics all read this view, so a `{`
//! inside a string or a `#` inside a comment is never taken for structure.

use crate::rules::{BlockStyle, CharLiterals, Lexicon};
use serde::Serialize;

/// What kind of literal was left open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LiteralKind {
    String,
    Char,
    BlockComment,
}

/// A string, character literal or block comment with no closing delimiter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnterminatedLiteral {
    pub kind: LiteralKind,
    /// Line where the literal opens.
    pub line: usize,
    /// Character column of the opening delimiter (0-based).
    pub col: usize,
    /// Opening delimiter as written.
    pub open: &'static str,
    /// Text that closes it.
    pub close: &'static str,
}

/// One bracket in code (never inside a literal or comment).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimiter {
    pub ch: char,
    pub line: usize,
    /// Character column (0-based).
    pub col: usize,
}

impl Delimiter {
    pub fn is_opener(&self) -> bool {
        matches!(self.ch, '(' | '[' | '{')
    }
}

/// Closing bracket for an opener.
pub fn closer_for(open: char) -> char {
    match open {
        '(' => ')',
        '[' => ']',
        _ => '}',
    }
}

/// Opening bracket for a closer.
pub fn opener_for(close: char) -> char {
    match close {
        ')' => '(',
        ']' => '[',
        _ => '{',
    }
}

/// One physical source line after scanning.
#[derive(Debug, Clone, Default)]
pub struct ScannedLine {
    /// 1-based line number.
    pub number: usize,
    /// The line as written.
    pub text: String,
    /// The line without comments, literals intact, trailing space trimmed.
    pub code: String,
    /// `code` with literal interiors replaced by spaces.
    pub masked: String,
    /// Comment text on this line (line comment or block comment part).
    pub comment: Option<String>,
    /// Character column where the line comment starts.
    pub comment_col: Option<usize>,
    /// The line opens inside a multi-line string or block comment.
    pub starts_in_literal: bool,
    /// The line closes inside a multi-line string or block comment.
    pub ends_in_literal: bool,
    /// Leading whitespace width, tabs counted as 4.
    pub indent: usize,
    /// Leading whitespace mixes tabs and spaces.
    pub mixed_indent: bool,
    /// Leading whitespace contains a tab.
    pub tab_indent: bool,
    pub trailing_whitespace: bool,
    /// Length in characters.
    pub width: usize,
    /// Open `(`/`[` count before and after this line.
    pub paren_depth_start: usize,
    pub paren_depth_end: usize,
    /// Open `{` count before and after this line.
    pub brace_depth_start: usize,
    pub brace_depth_end: usize,
}

impl ScannedLine {
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn has_code(&self) -> bool {
        !self.masked.trim().is_empty()
    }

    /// Comment-only line (no code at all).
    pub fn is_comment_only(&self) -> bool {
        !self.has_code() && self.comment.is_some()
    }
}

/// Result of scanning a whole source text.
#[derive(Debug, Clone, Default)]
pub struct Scan {
    pub lines: Vec<ScannedLine>,
    /// Every bracket in code, in source order.
    pub delimiters: Vec<Delimiter>,
    pub unterminated: Vec<UnterminatedLiteral>,
}

impl Scan {
    pub fn line(&self, number: usize) -> Option<&ScannedLine> {
        number.checked_sub(1).and_then(|i| self.lines.get(i))
    }

    /// Structural nesting depth of every line.
    ///
    /// Brace languages use the number of `{` open at the start of the line,
    /// less one when the line itself starts by closing a block. Indentation
    /// languages use an indent stack; blank lines, continuations and literal
    /// interiors inherit the depth of the line before.
    pub fn nesting(&self, style: BlockStyle) -> Vec<usize> {
        match style {
            BlockStyle::Braces => self
                .lines
                .iter()
                .map(|line| {
                    let closes = line.masked.trim_start().starts_with('}');
                    line.brace_depth_start.saturating_sub(usize::from(closes))
                })
                .collect(),
            BlockStyle::Indent => {
                let mut stack = vec![0usize];
                let mut depth = 0;
                let mut out = Vec::with_capacity(self.lines.len());
                for line in &self.lines {
                    let structural =
                        line.has_code() && !line.starts_in_literal && line.paren_depth_start == 0;
                    if structural {
                        while stack.len() > 1 && stack.last().is_some_and(|&top| top > line.indent)
                        {
                            stack.pop();
                        }
                        if stack.last().is_some_and(|&top| line.indent > top) {
                            stack.push(line.indent);
                        }
                        depth = stack.len() - 1;
                    }
                    out.push(depth);
                }
                out
            }
        }
    }
}

/// Keywords that start a statement whose `{` opens a block.
const BLOCK_KEYWORDS: &[&str] = &[
    "if", "else", "for", "while", "match", "switch", "loop", "do", "try", "catch", "finally",
    "fn", "func", "function", "class", "struct", "impl", "enum", "trait", "type", "interface",
    "namespace", "mod", "union", "unsafe", "case", "default", "select", "defer", "go",
];

/// Modifiers skipped when looking for a statement's leading keyword.
const MODIFIERS: &[&str] = &[
    "pub", "public", "private", "protected", "static", "export", "async", "final", "abstract",
    "virtual", "inline",
];

/// Leading keyword of a statement, skipping `}` and modifiers.
pub fn first_word(text: &str) -> &str {
    let mut rest = text.trim_start_matches(['}', ' ', '\t']);
    loop {
        let end = rest
            .find(|c: char| !(c.is_alphanumeric() || c == '_'))
            .unwrap_or(rest.len());
        let word = &rest[..end];
        let after = rest[end..].trim_start();
        if word == "pub" && after.starts_with('(') {
            // pub(crate)
            let close = after.find(')').map_or(after.len(), |i| i + 1);
            rest = after[close..].trim_start();
            continue;
        }
        if MODIFIERS.contains(&word) && !after.is_empty() {
            rest = after;
            continue;
        }
        return word;
    }
}

/// Whether a `=` at the end of `text` is an assignment rather than a comparison.
fn ends_with_assign(text: &str) -> bool {
    text.ends_with('=')
        && !["==", "!=", "<=", ">="]
            .iter()
            .any(|cmp| text.ends_with(cmp))
}

/// Whether the `{` that follows `before` starts an expression (a literal)
/// rather than a block.
pub fn is_expression_brace(before: &str) -> bool {
    let before = before.trim();
    if before.is_empty() || before.ends_with("=>") {
        return false;
    }
    if BLOCK_KEYWORDS.contains(&first_word(before)) {
        return false;
    }
    let expression_end = |text: &str| {
        let text = text.trim_end();
        ends_with_assign(text)
            || text.ends_with(['(', ',', '[', '?'])
            || (text.ends_with(':') && !text.ends_with("::"))
            || text == "return"
            || text.ends_with(" return")
    };
    if expression_end(before) {
        return true;
    }
    // struct literals: `let p = Point {`, `x := []int{`
    let path_start = before
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_alphanumeric() || "_:.<>[]".contains(*c))
        .last()
        .map_or(before.len(), |(i, _)| i);
    path_start < before.len() && expression_end(&before[..path_start])
}

/// Text before the `{` left open at the end of this line.
pub fn open_brace_before(masked: &str) -> Option<&str> {
    let mut depth = 0usize;
    for (i, c) in masked.char_indices().rev() {
        match c {
            '}' => depth += 1,
            '{' if depth == 0 => return Some(&masked[..i]),
            '{' => depth -= 1,
            _ => {}
        }
    }
    None
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Code,
    Block { close: &'static str },
    Multi { close: &'static str, escapes: bool },
}

struct Scanner<'a> {
    lexicon: &'a Lexicon,
    mode: Mode,
    open: Option<UnterminatedLiteral>,
    parens: usize,
    braces: usize,
    out: Scan,
}

/// Scan `source` with the lexical conventions of one language.
pub fn scan(source: &str, lexicon: &Lexicon) -> Scan {
    let mut scanner = Scanner {
        lexicon,
        mode: Mode::Code,
        open: None,
        parens: 0,
        braces: 0,
        out: Scan::default(),
    };
    for (idx, text) in source.lines().enumerate() {
        scanner.line(idx + 1, text);
    }
    if let Some(open) = scanner.open.take() {
        scanner.out.unterminated.push(open);
    }
    scanner.out
}

fn starts_with(chars: &[char], at: usize, needle: &str) -> bool {
    !needle.is_empty()
        && needle
            .chars()
            .enumerate()
            .all(|(k, c)| chars.get(at + k) == Some(&c))
}

fn find(chars: &[char], from: usize, needle: &str) -> Option<usize> {
    (from..chars.len()).find(|&i| starts_with(chars, i, needle))
}

fn push_comment(comment: &mut Option<String>, part: &[char]) {
    let part: String = part.iter().collect();
    let part = part.trim();
    match comment {
        Some(existing) if !part.is_empty() => {
            if !existing.is_empty() {
                existing.push(' ');
            }
            existing.push_str(part);
        }
        Some(_) => {}
        None => *comment = Some(part.to_string()),
    }
}

/// Accumulated output for one line.
#[derive(Default)]
struct LineBuf {
    code: String,
    masked: String,
    comment: Option<String>,
    comment_col: Option<usize>,
}

impl LineBuf {
    fn keep(&mut self, c: char) {
        self.code.push(c);
        self.masked.push(c);
    }

    fn keep_str(&mut self, s: &str) {
        self.code.push_str(s);
        self.masked.push_str(s);
    }

    fn blank(&mut self, c: char) {
        self.code.push(c);
        self.masked.push(' ');
    }
}

impl Scanner<'_> {
    fn line(&mut self, number: usize, text: &str) {
        let chars: Vec<char> = text.chars().collect();
        let starts_in_literal = self.mode != Mode::Code;
        let paren_depth_start = self.parens;
        let brace_depth_start = self.braces;
        let mut buf = LineBuf::default();

        let mut i = 0;
        while i < chars.len() {
            i = match self.mode {
                Mode::Block { close } => match find(&chars, i, close) {
                    Some(end) => {
                        push_comment(&mut buf.comment, &chars[i..end]);
                        self.mode = Mode::Code;
                        self.open = None;
                        end + close.chars().count()
                    }
                    None => {
                        push_comment(&mut buf.comment, &chars[i..]);
                        chars.len()
                    }
                },
                Mode::Multi { close, escapes } => {
                    if escapes && chars[i] == '\\' {
                        buf.blank('\\');
                        if let Some(&next) = chars.get(i + 1) {
                            buf.blank(next);
                        }
                        i + 2
                    } else if starts_with(&chars, i, close) {
                        buf.keep_str(close);
                        self.mode = Mode::Code;
                        self.open = None;
                        i + close.chars().count()
                    } else {
                        buf.blank(chars[i]);
                        i + 1
                    }
                }
                Mode::Code => self.code_at(&chars, i, number, &mut buf),
            };
        }

        let (indent, tabs, spaces) = leading_whitespace(&chars);
        let ends_in_literal = self.mode != Mode::Code;
        let trailing_whitespace =
            !ends_in_literal && chars.last().is_some_and(|c| *c == ' ' || *c == '\t');
        self.out.lines.push(ScannedLine {
            number,
            text: text.to_string(),
            code: buf.code.trim_end().to_string(),
            masked: buf.masked.trim_end().to_string(),
            comment: buf.comment,
            comment_col: buf.comment_col,
            starts_in_literal,
            ends_in_literal,
            indent,
            mixed_indent: tabs && spaces,
            tab_indent: tabs,
            trailing_whitespace,
            width: chars.len(),
            paren_depth_start,
            paren_depth_end: self.parens,
            brace_depth_start,
            brace_depth_end: self.braces,
        });
    }

    /// Handle one position in code mode; returns the next position.
    fn code_at(&mut self, chars: &[char], i: usize, line: usize, buf: &mut LineBuf) -> usize {
        let lexicon = self.lexicon;
        let c = chars[i];

        if starts_with(chars, i, lexicon.line_comment) {
            buf.comment_col = Some(i);
            let body = i + lexicon.line_comment.chars().count();
            push_comment(&mut buf.comment, &chars[body..]);
            return chars.len();
        }
        if let Some((open, close)) = lexicon.block_comment
            && starts_with(chars, i, open)
        {
            buf.comment_col.get_or_insert(i);
            if buf.comment.is_none() {
                buf.comment = Some(String::new());
            }
            self.mode = Mode::Block { close };
            self.open = Some(UnterminatedLiteral {
                kind: LiteralKind::BlockComment,
                line,
                col: i,
                open,
                close,
            });
            buf.keep(' ');
            return i + open.chars().count();
        }
        for &(delim, escapes) in lexicon.multiline_quotes {
            if starts_with(chars, i, delim) {
                self.mode = Mode::Multi {
                    close: delim,
                    escapes,
                };
                self.open = Some(UnterminatedLiteral {
                    kind: LiteralKind::String,
                    line,
                    col: i,
                    open: delim,
                    close: delim,
                });
                buf.keep_str(delim);
                return i + delim.chars().count();
            }
        }
        if lexicon.string_quotes.contains(&c) {
            return self.single_line(chars, i, line, LiteralKind::String, buf);
        }
        if c == '\'' {
            let is_char = match lexicon.char_literals {
                CharLiterals::None => false,
                CharLiterals::Plain => true,
                // 'a' and '\n' are characters, 'a on its own is a lifetime
                CharLiterals::Lifetimes => {
                    chars.get(i + 1) == Some(&'\\') || chars.get(i + 2) == Some(&'\'')
                }
            };
            if is_char {
                return self.single_line(chars, i, line, LiteralKind::Char, buf);
            }
        }
        if matches!(c, '(' | ')' | '[' | ']' | '{' | '}') {
            self.delimiter(c, line, i);
        }
        buf.keep(c);
        i + 1
    }

    fn single_line(
        &mut self,
        chars: &[char],
        start: usize,
        line: usize,
        kind: LiteralKind,
        buf: &mut LineBuf,
    ) -> usize {
        let quote = chars[start];
        buf.keep(quote);
        let mut i = start + 1;
        while i < chars.len() {
            let c = chars[i];
            if c == '\\' {
                buf.blank(c);
                if let Some(&next) = chars.get(i + 1) {
                    buf.blank(next);
                }
                i += 2;
                continue;
            }
            if c == quote {
                buf.keep(c);
                return i + 1;
            }
            buf.blank(c);
            i += 1;
        }
        let delimiter = if quote == '\'' { "'" } else { "\"" };
        self.out.unterminated.push(UnterminatedLiteral {
            kind,
            line,
            col: start,
            open: delimiter,
            close: delimiter,
        });
        chars.len()
    }

    fn delimiter(&mut self, ch: char, line: usize, col: usize) {
        match ch {
            '(' | '[' => self.parens += 1,
            ')' | ']' => self.parens = self.parens.saturating_sub(1),
            '{' => self.braces += 1,
            _ => self.braces = self.braces.saturating_sub(1),
        }
        self.out.delimiters.push(Delimiter { ch, line, col });
    }
}

/// Width of leading whitespace (tab = 4) and whether tabs/spaces occur.
fn leading_whitespace(chars: &[char]) -> (usize, bool, bool) {
    let mut width = 0;
    let mut tabs = false;
    let mut spaces = false;
    for c in chars {
        match c {
            ' ' => {
                width += 1;
                spaces = true;
            }
            '\t' => {
                width += 4;
                tabs = true;
            }
            _ => break,
        }
    }
    (width, tabs, spaces)
}
