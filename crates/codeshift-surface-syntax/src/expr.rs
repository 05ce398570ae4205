//! Token-wise expression rewriting.
//!
//! Expressions are never parsed into trees. Instead they are split into a
//! flat token stream and the tokens whose spelling differs between source
//! and target (boolean operators, literals, receivers, quotes) are replaced.
//! Everything else is copied through untouched.

use codeshift_languages::LanguageRules;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenKind {
    Word,
    Number,
    Str,
    Op,
    Space,
    Other,
}

#[derive(Debug, Clone, Copy)]
struct Token<'a> {
    kind: TokenKind,
    text: &'a str,
}

/// Multi-character operators, longest first.
const OPERATORS: &[&str] = &[
    "===", "!==", "**=", "//=", "<<=", ">>=", "...", "==", "!=", "<=", ">=", "&&", "||", "->",
    "=>", "::", "//", "**", "++", "--", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "<<",
    ">>", ":=", "..",
];

fn tokenize<'a>(text: &'a str, from: &LanguageRules) -> Vec<Token<'a>> {
    let mut tokens = Vec::new();
    let mut i = 0;
    let quotes: Vec<char> = from
        .lexicon
        .string_quotes
        .iter()
        .copied()
        .chain(
            from.lexicon
                .multiline_quotes
                .iter()
                .filter_map(|(q, _)| (q.chars().count() == 1).then(|| q.chars().next()).flatten()),
        )
        .chain(['"', '\''])
        .collect();
    let comment_ops = from.lexicon.line_comment == "//";

    while i < text.len() {
        let rest = &text[i..];
        let Some(c) = rest.chars().next() else { break };
        let (kind, len) = if c.is_whitespace() {
            let len = rest
                .find(|ch: char| !ch.is_whitespace())
                .unwrap_or(rest.len());
            (TokenKind::Space, len)
        } else if c.is_alphabetic() || c == '_' || c == '$' {
            let len = rest
                .find(|ch: char| !(ch.is_alphanumeric() || ch == '_' || ch == '$'))
                .unwrap_or(rest.len());
            (TokenKind::Word, len)
        } else if c.is_ascii_digit() {
            let len = rest
                .find(|ch: char| !(ch.is_ascii_alphanumeric() || ch == '_' || ch == '.'))
                .unwrap_or(rest.len());
            // `0..n` is a number followed by a range operator
            let len = rest[..len].find("..").unwrap_or(len);
            (TokenKind::Number, len)
        } else if quotes.contains(&c) {
            (TokenKind::Str, string_len(rest, c))
        } else if let Some(op) = OPERATORS.iter().find(|op| {
            rest.starts_with(**op) && !(comment_ops && (**op == "//" || **op == "//="))
        }) {
            (TokenKind::Op, op.len())
        } else if "+-*/%=<>!&|^~?:.,;".contains(c) {
            (TokenKind::Op, c.len_utf8())
        } else {
            (TokenKind::Other, c.len_utf8())
        };
        let len = len.max(c.len_utf8());
        tokens.push(Token {
            kind,
            text: &text[i..i + len],
        });
        i += len;
    }
    tokens
}

/// Byte length of a string literal starting at the beginning of `rest`.
fn string_len(rest: &str, quote: char) -> usize {
    let mut escaped = false;
    for (idx, c) in rest.char_indices().skip(1) {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == quote {
            return idx + c.len_utf8();
        }
    }
    rest.len()
}

/// Rewrites expressions written for one language into another.
#[derive(Debug, Clone)]
pub struct ExprRewriter {
    from: &'static LanguageRules,
    to: &'static LanguageRules,
    source_self: Option<String>,
    target_self: Option<String>,
}

impl ExprRewriter {
    pub fn new(from: &'static LanguageRules, to: &'static LanguageRules) -> Self {
        Self {
            from,
            to,
            source_self: from.keywords.self_ref.map(str::to_string),
            target_self: to.keywords.self_ref.map(str::to_string),
        }
    }

    /// Receiver spelled in the source (Go methods name their own).
    pub fn with_source_self(mut self, receiver: Option<&str>) -> Self {
        if let Some(receiver) = receiver {
            self.source_self = Some(receiver.to_string());
        }
        self
    }

    /// Receiver to write in the target.
    pub fn with_target_self(mut self, receiver: Option<&str>) -> Self {
        if let Some(receiver) = receiver {
            self.target_self = Some(receiver.to_string());
        }
        self
    }

    pub fn is_identity(&self) -> bool {
        self.from.language == self.to.language && self.source_self == self.target_self
    }

    /// Rewrite one expression.
    pub fn rewrite(&self, expr: &str) -> String {
        if self.is_identity() {
            return expr.to_string();
        }
        let tokens = tokenize(expr, self.from);
        let mut out = String::with_capacity(expr.len() + 8);
        let mut i = 0;
        while i < tokens.len() {
            let token = tokens[i];
            let next = tokens.get(i + 1);
            match token.kind {
                TokenKind::Word | TokenKind::Op => {
                    if let Some(consumed) = self.rewrite_is(&tokens, i, &mut out) {
                        i += consumed;
                        continue;
                    }
                    // `vec![..]`, `println!(..)`
                    let is_macro_bang = token.text == "!"
                        && i > 0
                        && tokens[i - 1].kind == TokenKind::Word;
                    if is_macro_bang {
                        out.push_str(token.text);
                        i += 1;
                        continue;
                    }
                    if self.is_source_self(token.text) {
                        let member = tokens
                            .get(i + 1)
                            .filter(|t| t.text == self.from.keywords.self_member);
                        match &self.target_self {
                            Some(target) => out.push_str(target),
                            None => out.push_str(token.text),
                        }
                        if member.is_some() {
                            out.push_str(self.to.keywords.self_member);
                            i += 2;
                        } else {
                            i += 1;
                        }
                        continue;
                    }
                    let mapped = self.map_word(token.text);
                    match mapped {
                        Some(word) => {
                            let keywords = &self.from.keywords;
                            let is_not = token.text == keywords.not;
                            let is_logical =
                                is_not || token.text == keywords.and || token.text == keywords.or;
                            let spaced = is_logical && word.chars().all(char::is_alphabetic);
                            if spaced && !out.ends_with([' ', '(']) && !out.is_empty() {
                                out.push(' ');
                            }
                            out.push_str(word);
                            if is_not && !spaced {
                                // `not x` becomes `!x`
                                while tokens.get(i + 1).is_some_and(|t| t.kind == TokenKind::Space)
                                {
                                    i += 1;
                                }
                            } else if spaced
                                && next.is_some_and(|t| t.kind != TokenKind::Space)
                            {
                                out.push(' ');
                            }
                        }
                        None => out.push_str(token.text),
                    }
                }
                TokenKind::Str => out.push_str(&self.rewrite_string(token.text)),
                TokenKind::Space => {
                    // `a and b` -> `a && b` keeps spacing; avoid doubling after `!`
                    if !(out.ends_with(' ') && token.text.chars().all(|c| c == ' ')) {
                        out.push_str(token.text);
                    }
                }
                TokenKind::Number | TokenKind::Other => out.push_str(token.text),
            }
            i += 1;
        }
        out
    }

    fn is_source_self(&self, word: &str) -> bool {
        self.source_self.as_deref() == Some(word)
    }

    /// Python `is` / `is not`; returns the number of tokens consumed.
    fn rewrite_is(&self, tokens: &[Token<'_>], i: usize, out: &mut String) -> Option<usize> {
        if tokens[i].text != "is" || self.from.keywords.and.chars().any(|c| !c.is_alphabetic()) {
            return None;
        }
        let mut j = i + 1;
        while tokens.get(j).is_some_and(|t| t.kind == TokenKind::Space) {
            j += 1;
        }
        if tokens.get(j).is_some_and(|t| t.text == self.from.keywords.not) {
            out.push_str(self.to.keywords.ne);
            Some(j - i + 1)
        } else {
            out.push_str(self.to.keywords.eq);
            Some(1)
        }
    }

    fn map_word(&self, text: &str) -> Option<&'static str> {
        let from = &self.from.keywords;
        let to = &self.to.keywords;
        let pairs = [
            (from.and, to.and),
            (from.or, to.or),
            (from.not, to.not),
            (from.true_lit, to.true_lit),
            (from.false_lit, to.false_lit),
            (from.null_lit, to.null_lit),
            (from.eq, to.eq),
            (from.ne, to.ne),
            ("==", to.eq),
            ("!=", to.ne),
        ];
        if let Some((_, target)) = pairs.iter().find(|(source, _)| *source == text) {
            return Some(target);
        }
        match text {
            "//" => Some("/"),
            "//=" => Some("/="),
            _ => None,
        }
    }

    fn rewrite_string(&self, text: &str) -> String {
        let Some(quote) = text.chars().next() else {
            return String::new();
        };
        let target_quotes = self.to.lexicon.string_quotes;
        let convert = match quote {
            '\'' => {
                self.from.lexicon.string_quotes.contains(&'\'') && !target_quotes.contains(&'\'')
            }
            '`' => {
                !self.to.lexicon.multiline_quotes.iter().any(|(q, _)| *q == "`")
                    && !text.contains("${")
                    && !text.contains('\n')
            }
            _ => false,
        };
        if !convert || text.len() < 2 || !text.ends_with(quote) {
            return text.to_string();
        }
        let inner = &text[1..text.len() - 1];
        let mut out = String::with_capacity(text.len() + 2);
        out.push('"');
        let mut chars = inner.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '\\' if chars.peek() == Some(&quote) => {
                    out.push(quote);
                    chars.next();
                }
                '\\' => {
                    out.push('\\');
                    if let Some(next) = chars.next() {
                        out.push(next);
                    }
                }
                '"' => out.push_str("\\\""),
                c => out.push(c),
            }
        }
        out.push('"');
        out
    }
}

/// A plain identifier (`name`, `_tmp1`).
pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// Split `text` on a top-level separator (outside brackets and strings).
pub fn split_top_level(text: &str, sep: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut current = String::new();
    let mut rest = text;
    while let Some(c) = rest.chars().next() {
        if let Some(q) = quote {
            current.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            rest = &rest[c.len_utf8()..];
            continue;
        }
        if depth == 0 && rest.starts_with(sep) {
            parts.push(current.trim().to_string());
            current.clear();
            rest = &rest[sep.len()..];
            continue;
        }
        match c {
            '"' | '\'' | '`' => quote = Some(c),
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            _ => {}
        }
        current.push(c);
        rest = &rest[c.len_utf8()..];
    }
    let last = current.trim();
    if !last.is_empty() || !parts.is_empty() {
        parts.push(last.to_string());
    }
    parts
}
