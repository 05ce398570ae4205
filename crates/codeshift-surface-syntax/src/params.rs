//! Parameter lists.
//!
//! A `params` attribute holds the parameter list as written in the source.
//! It is split into [`Param`]s according to the source language's
//! [`ParamStyle`] and written back out in the target's style, with types
//! mapped through the shared type table.

use crate::expr::{ExprRewriter, split_top_level};
use codeshift_languages::{LanguageRules, ParamStyle, TypePosition, map_type};

/// One parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub ty: Option<String>,
    pub default: Option<String>,
}

/// Receiver parameters that are never carried across languages.
const RECEIVERS: &[&str] = &["self", "&self", "&mut self", "mut self", "cls"];

pub fn is_receiver(param: &str) -> bool {
    let param = param.trim();
    let name = param.split(':').next().unwrap_or(param).trim();
    RECEIVERS.contains(&name)
}

/// Split a `=` default value off a parameter.
fn split_default(piece: &str) -> (&str, Option<&str>) {
    let bytes = piece.as_bytes();
    for (i, b) in bytes.iter().enumerate() {
        if *b != b'=' {
            continue;
        }
        let prev = i.checked_sub(1).map(|p| bytes[p]);
        let next = bytes.get(i + 1).copied();
        let comparison = matches!(prev, Some(b'=' | b'!' | b'<' | b'>'))
            || matches!(next, Some(b'=' | b'>'));
        if !comparison {
            return (piece[..i].trim(), Some(piece[i + 1..].trim()));
        }
    }
    (piece.trim(), None)
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Split on commas outside brackets, including generic `<...>`.
fn split_params(text: &str) -> Vec<String> {
    let mut pieces: Vec<String> = Vec::new();
    for piece in split_top_level(text, ",") {
        match pieces.last_mut() {
            Some(open) if open.matches('<').count() > open.matches('>').count() => {
                open.push_str(", ");
                open.push_str(&piece);
            }
            _ => pieces.push(piece),
        }
    }
    pieces
}

/// Parse a parameter list written in `style`.
pub fn parse_params(text: &str, style: ParamStyle) -> Vec<Param> {
    let mut params: Vec<Param> = split_params(text)
        .into_iter()
        .filter(|piece| !piece.is_empty() && !is_receiver(piece))
        .map(|piece| {
            let (decl, default) = split_default(&piece);
            let (name, ty) = match style {
                ParamStyle::Name => (decl.to_string(), None),
                ParamStyle::NameColonType => match decl.split_once(':') {
                    Some((name, ty)) => (name.trim().to_string(), Some(ty.trim().to_string())),
                    None => (decl.to_string(), None),
                },
                ParamStyle::TypeName => {
                    // `String args[]` declares the same array as `String[] args`
                    let (decl, suffix) = match decl.strip_suffix("[]") {
                        Some(rest) => (rest.trim_end(), "[]"),
                        None => (decl, ""),
                    };
                    let start = decl
                        .char_indices()
                        .rev()
                        .take_while(|(_, c)| is_ident_char(*c))
                        .last()
                        .map_or(decl.len(), |(i, _)| i);
                    let ty = decl[..start].trim();
                    if ty.is_empty() {
                        (decl.to_string(), None)
                    } else {
                        (decl[start..].to_string(), Some(format!("{ty}{suffix}")))
                    }
                }
                ParamStyle::NameType => match decl.split_once(char::is_whitespace) {
                    Some((name, ty)) => (name.to_string(), Some(ty.trim().to_string())),
                    None => (decl.to_string(), None),
                },
            };
            let name = name
                .strip_prefix("mut ")
                .map_or(name.as_str(), str::trim)
                .to_string();
            Param {
                name,
                ty: ty.filter(|t| !t.is_empty()),
                default: default.map(str::to_string),
            }
        })
        .collect();

    // Go groups `a, b int`: untyped names take the type of the next typed one.
    if style == ParamStyle::NameType {
        let mut next_ty: Option<String> = None;
        for param in params.iter_mut().rev() {
            match &param.ty {
                Some(ty) => next_ty = Some(ty.clone()),
                None => param.ty = next_ty.clone(),
            }
        }
    }
    params
}

/// Map a parameter's type into the target, falling back where needed.
pub fn param_type(param: &Param, from: &LanguageRules, to: &LanguageRules) -> Option<String> {
    param
        .ty
        .as_deref()
        .and_then(|ty| map_type(ty, from.language, to.language, TypePosition::Param))
        .or_else(|| to.fallback_type.map(str::to_string))
}

/// Render a parameter list for the target language.
pub fn render_params(
    params: &[Param],
    from: &LanguageRules,
    to: &LanguageRules,
    rewriter: &ExprRewriter,
) -> String {
    params
        .iter()
        .map(|param| {
            let ty = param_type(param, from, to);
            let mut out = match (to.param_style, ty) {
                (ParamStyle::Name, _) | (_, None) => param.name.clone(),
                (ParamStyle::NameColonType, Some(ty)) => format!("{}: {ty}", param.name),
                (ParamStyle::TypeName, Some(ty)) => format!("{ty} {}", param.name),
                (ParamStyle::NameType, Some(ty)) => format!("{} {ty}", param.name),
            };
            if to.declarations.param_defaults
                && let Some(default) = &param.default
            {
                // PEP 8 spells untyped defaults `name=value`
                let sep = if to.param_style == ParamStyle::NameColonType && !out.contains(':') {
                    "="
                } else {
                    " = "
                };
                out.push_str(sep);
                out.push_str(&rewriter.rewrite(default));
            }
            out
        })
        .collect::<Vec<_>>()
        .join(", ")
}
