//! Logical lines.
//!
//! A logical line is one statement or header as the extractor sees it: a
//! physical line, joined with its successors while a bracket, an expression
//! brace or a multi-line literal is still open.

use codeshift_languages::{
    BlockStyle, LanguageRules, LineRange, Scan, ScannedLine, is_expression_brace,
    open_brace_before,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    pub lines: LineRange,
    /// Indentation width of the first physical line.
    pub indent: usize,
    /// Code with comments removed; physical lines joined.
    pub code: String,
    /// `code` with literal interiors blanked.
    pub masked: String,
    pub comment: Option<String>,
    /// Source text as written, dedented to the first line.
    pub raw: String,
}

impl LogicalLine {
    pub fn is_comment(&self) -> bool {
        self.code.trim().is_empty() && self.comment.is_some()
    }
}

/// Strip block-comment decoration from one comment part.
fn clean_comment(part: &str) -> &str {
    let part = part.trim();
    let part = part.trim_start_matches('*').trim_end_matches('*');
    part.trim()
}

fn dedent(text: &str, prefix_width: usize) -> &str {
    let ws = text
        .char_indices()
        .take_while(|(i, c)| (*c == ' ' || *c == '\t') && *i < prefix_width)
        .count();
    &text[ws..]
}

/// Append a physical piece to a joined logical text.
fn join_piece(out: &mut String, piece: &str, in_literal: bool) {
    if in_literal {
        out.push('\n');
        out.push_str(piece);
        return;
    }
    let piece = piece.trim();
    if piece.is_empty() {
        return;
    }
    let glue = !out.is_empty()
        && !out.ends_with(['(', '['])
        && !piece.starts_with([')', ']', ',']);
    if glue {
        out.push(' ');
    }
    out.push_str(piece);
}

/// Group scanned lines into logical lines.
pub fn logical_lines(scan: &Scan, rules: &LanguageRules) -> Vec<LogicalLine> {
    let lines = &scan.lines;
    let mut out = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        let first = &lines[i];
        if first.is_blank() {
            i += 1;
            continue;
        }
        let mut group: Vec<&ScannedLine> = vec![first];
        let mut expr_brace_depth: Option<usize> = None;
        loop {
            let Some(last) = group.last().copied() else { break };
            if expr_brace_depth.is_none() && last.brace_depth_end > last.brace_depth_start {
                let opens_expression = match rules.block_style {
                    BlockStyle::Indent => true,
                    BlockStyle::Braces => open_brace_before(&last.masked)
                        .is_some_and(|before| is_expression_brace(before)),
                };
                if opens_expression {
                    expr_brace_depth = Some(group[0].brace_depth_start);
                }
            }
            let continues = last.ends_in_literal
                || last.paren_depth_end > group[0].paren_depth_start
                || expr_brace_depth.is_some_and(|depth| last.brace_depth_end > depth)
                || (rules.block_style == BlockStyle::Indent
                    && last.has_code()
                    && last.masked.ends_with('\\'));
            if !continues || i + group.len() >= lines.len() {
                break;
            }
            group.push(&lines[i + group.len()]);
        }
        i += group.len();
        out.push(build(&group, rules));
    }
    out
}

fn build(group: &[&ScannedLine], rules: &LanguageRules) -> LogicalLine {
    let first = group[0];
    let last = group[group.len() - 1];
    let prefix_width = first.text.len() - first.text.trim_start().len();

    let mut code = String::new();
    let mut masked = String::new();
    let mut comments: Vec<&str> = Vec::new();
    let mut raw_lines: Vec<&str> = Vec::new();
    for (idx, line) in group.iter().enumerate() {
        // inside a string the text continues verbatim; a block comment does not
        let in_string = idx > 0
            && group[idx - 1].ends_in_literal
            && (line.comment.is_none() || line.code != line.masked);
        let continued = rules.block_style == BlockStyle::Indent && line.masked.ends_with('\\');
        let (code_piece, masked_piece) = if continued {
            (
                line.code.strip_suffix('\\').unwrap_or(&line.code),
                line.masked.strip_suffix('\\').unwrap_or(&line.masked),
            )
        } else {
            (line.code.as_str(), line.masked.as_str())
        };
        join_piece(&mut code, code_piece, in_string);
        join_piece(&mut masked, masked_piece, in_string);
        if let Some(comment) = &line.comment {
            comments.push(comment);
        }
        raw_lines.push(dedent(&line.text, prefix_width));
    }
    if rules.lexicon.line_comment == "//" {
        for comment in comments.iter_mut() {
            // doc comments: `///` and `//!`
            let trimmed = comment.trim_start_matches('/');
            *comment = trimmed.strip_prefix("! ").unwrap_or(trimmed).trim();
        }
    }

    let has_code = !code.trim().is_empty();
    let comment = if comments.is_empty() {
        None
    } else if has_code {
        let parts: Vec<&str> = comments
            .iter()
            .map(|c| clean_comment(c))
            .filter(|c| !c.is_empty())
            .collect();
        (!parts.is_empty()).then(|| parts.join(" "))
    } else {
        let parts: Vec<&str> = comments.iter().map(|c| clean_comment(c)).collect();
        let start = parts.iter().position(|p| !p.is_empty()).unwrap_or(parts.len());
        let end = parts.iter().rposition(|p| !p.is_empty()).map_or(start, |e| e + 1);
        Some(parts[start..end].join("\n"))
    };

    let mut line = LogicalLine {
        lines: LineRange::new(first.number, last.number),
        indent: first.indent,
        code: code.trim().to_string(),
        masked: masked.trim().to_string(),
        comment,
        raw: raw_lines.join("\n").trim_end().to_string(),
    };
    if let Some(text) = docstring(&line.code, rules) {
        line.code.clear();
        line.masked.clear();
        line.comment = Some(text);
    }
    line
}

/// Text of a standalone triple-quoted string.
fn docstring(code: &str, rules: &LanguageRules) -> Option<String> {
    rules
        .lexicon
        .multiline_quotes
        .iter()
        .filter(|(delim, _)| delim.len() == 3)
        .find_map(|(delim, _)| {
            let inner = code.strip_prefix(delim)?.strip_suffix(delim)?;
            if inner.contains(delim) {
                return None;
            }
            let lines: Vec<&str> = inner.lines().map(str::trim).collect();
            let start = lines.iter().position(|l| !l.is_empty()).unwrap_or(lines.len());
            let end = lines.iter().rposition(|l| !l.is_empty()).map_or(start, |e| e + 1);
            Some(lines[start..end].join("\n"))
        })
}
