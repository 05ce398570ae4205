//! Bracket balance and literal termination.

use crate::finding::{Finding, FindingKind, Position};
use codeshift_languages::{Delimiter, LiteralKind, Scan, closer_for, opener_for};
use std::cmp::Reverse;

/// An opener left without its closer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Unclosed {
    opener: Delimiter,
    revealed_by: Option<Delimiter>,
}

#[derive(Debug, Default)]
struct Balance {
    unclosed: Vec<Unclosed>,
    /// First closer with no opener at all.
    unmatched: Option<Delimiter>,
}

/// Match brackets with a stack.
///
/// A closer pops down to the nearest opener of its own kind; openers it
/// skips are unclosed. A closer with no such opener is unmatched.
fn balance(delimiters: &[Delimiter]) -> Balance {
    let mut stack: Vec<Delimiter> = Vec::new();
    let mut out = Balance::default();
    for delimiter in delimiters {
        if delimiter.is_opener() {
            stack.push(*delimiter);
            continue;
        }
        let open = opener_for(delimiter.ch);
        match stack.iter().rposition(|o| o.ch == open) {
            Some(pos) => {
                out.unclosed.extend(stack.drain(pos + 1..).map(|opener| Unclosed {
                    opener,
                    revealed_by: Some(*delimiter),
                }));
                stack.pop();
            }
            None => {
                out.unmatched.get_or_insert(*delimiter);
            }
        }
    }
    out.unclosed.extend(stack.into_iter().map(|opener| Unclosed {
        opener,
        revealed_by: None,
    }));
    out
}

pub(crate) fn check(scan: &Scan, out: &mut Vec<Finding>) {
    let Balance {
        unclosed,
        unmatched,
    } = balance(&scan.delimiters);

    // (line, col) of openers closed together with an unterminated string
    let mut repaired: Vec<(usize, usize)> = Vec::new();
    for literal in &scan.unterminated {
        if literal.kind == LiteralKind::BlockComment {
            out.push(
                Finding::error(
                    FindingKind::UnterminatedComment {
                        close: literal.close.to_string(),
                    },
                    format!("Unterminated block comment (missing '{}')", literal.close),
                )
                .at(literal.line),
            );
            continue;
        }
        let mut before: Vec<&Unclosed> = unclosed
            .iter()
            .filter(|u| {
                u.opener.line == literal.line
                    && u.opener.col < literal.col
                    && u.opener.ch != '{'
            })
            .collect();
        before.sort_by_key(|u| Reverse(u.opener.col));
        let closers: String = before.iter().map(|u| closer_for(u.opener.ch)).collect();
        repaired.extend(before.iter().map(|u| (u.opener.line, u.opener.col)));
        let what = match literal.kind {
            LiteralKind::Char => "character literal",
            _ => "string literal",
        };
        out.push(
            Finding::error(
                FindingKind::UnterminatedString {
                    col: literal.col,
                    quote: literal.close.to_string(),
                    closers,
                },
                format!("Unterminated {what}"),
            )
            .at(literal.line),
        );
    }

    for u in &unclosed {
        if repaired.contains(&(u.opener.line, u.opener.col)) {
            continue;
        }
        let message = match u.revealed_by {
            Some(closer) => format!(
                "Unclosed '{}' (reached '{}' on line {})",
                u.opener.ch, closer.ch, closer.line
            ),
            None => format!("Unclosed '{}'", u.opener.ch),
        };
        out.push(
            Finding::error(
                FindingKind::UnclosedDelimiter {
                    open: u.opener.ch,
                    col: u.opener.col,
                    revealed_by: u.revealed_by.map(|d| Position {
                        line: d.line,
                        col: d.col,
                    }),
                },
                message,
            )
            .at(u.opener.line),
        );
    }

    if let Some(closer) = unmatched {
        out.push(
            Finding::error(
                FindingKind::UnmatchedCloser {
                    close: closer.ch,
                    col: closer.col,
                },
                format!("Unmatched '{}'", closer.ch),
            )
            .at(closer.line),
        );
    }
}
