//! Post-extraction passes.
//!
//! Patterns capture statements as written. These passes bring the captured
//! attributes into one shape across languages: loop bounds, print
//! arguments, receivers and declarations.

use crate::expr::{is_identifier, split_top_level};
use crate::ir::{Node, RAW};
use crate::params::is_receiver;
use codeshift_languages::{ConstructKind, LanguageRules, PrintStyle};
use std::collections::HashSet;

pub(super) fn normalize(program: &mut Node, rules: &LanguageRules) {
    normalize_attributes(program, rules);
    merge_impl_blocks(program);
    attach_receiver_methods(program);
    if declares_by_assignment(rules) {
        let mut bound = HashSet::new();
        infer_declarations(&mut program.children, &mut bound, false);
    }
    mark_members(program, rules);
}

/// Languages where the first assignment to a name declares it.
fn declares_by_assignment(rules: &LanguageRules) -> bool {
    rules.declarations.var.starts_with("$name = ")
}

fn normalize_attributes(node: &mut Node, rules: &LanguageRules) {
    if let Some(params) = node.remove("fparams") {
        node.set("params", params);
    }
    if let Some(init) = node.remove("init") {
        node.set("value", init.trim());
    }
    if node.attr("static").is_some_and(|v| v != "true") {
        node.set("static", "true");
    }
    match node.kind {
        ConstructKind::Assignment => match node.attr("op").map(str::to_string).as_deref() {
            Some("++") => {
                node.set("op", "+=");
                node.set("value", "1");
            }
            Some("--") => {
                node.set("op", "-=");
                node.set("value", "1");
            }
            _ => {}
        },
        ConstructKind::For => normalize_for(node),
        ConstructKind::Print => normalize_print(node, rules.print_style),
        _ => {}
    }
    for child in &mut node.children {
        normalize_attributes(child, rules);
    }
}

/// Bring counted loops into `start`, `end`, `cmp`, `step` form.
fn normalize_for(node: &mut Node) {
    if let Some(range) = node.remove("range") {
        let args = split_top_level(&range, ",");
        let (start, end, step) = match args.as_slice() {
            [end] => ("0".to_string(), end.clone(), "1".to_string()),
            [start, end] => (start.clone(), end.clone(), "1".to_string()),
            [start, end, step, ..] => (start.clone(), end.clone(), step.clone()),
            [] => ("0".to_string(), "0".to_string(), "1".to_string()),
        };
        let cmp = if step.starts_with('-') { ">" } else { "<" };
        node.set("start", start);
        node.set("end", end);
        node.set("step", step);
        node.set("cmp", cmp);
        return;
    }
    if node.attr("start").is_none() || node.attr("end").is_none() {
        return;
    }
    match node.attr("cmp").map(str::to_string).as_deref() {
        None => node.set("cmp", "<"),
        Some("=") => node.set("cmp", "<="),
        _ => {}
    }
    if let Some(update) = node.attr("update").map(str::to_string) {
        let var = node.attr_or_empty("var").to_string();
        if let Some(step) = step_from_update(&update, &var) {
            node.set("step", step);
            node.remove("update");
        }
    } else if node.attr("step").is_none() {
        node.set("step", "1");
    }
}

fn negate(step: &str) -> String {
    match step.strip_prefix('-') {
        Some(positive) => positive.trim().to_string(),
        None => format!("-{step}"),
    }
}

/// Step of a C-style update clause (`i++`, `i -= 2`, `i = i + k`).
pub(crate) fn step_from_update(update: &str, var: &str) -> Option<String> {
    let compact: String = update.chars().filter(|c| !c.is_whitespace()).collect();
    if compact == format!("{var}++") || compact == format!("++{var}") {
        return Some("1".to_string());
    }
    if compact == format!("{var}--") || compact == format!("--{var}") {
        return Some("-1".to_string());
    }
    if let Some((lhs, rhs)) = update.split_once("+=")
        && lhs.trim() == var
    {
        return Some(rhs.trim().to_string());
    }
    if let Some((lhs, rhs)) = update.split_once("-=")
        && lhs.trim() == var
    {
        return Some(negate(rhs.trim()));
    }
    let (lhs, rhs) = update.split_once('=')?;
    if lhs.trim() != var {
        return None;
    }
    let rest = rhs.trim().strip_prefix(var)?.trim_start();
    if let Some(k) = rest.strip_prefix('+') {
        return Some(k.trim().to_string());
    }
    rest.strip_prefix('-').map(|k| negate(k.trim()))
}

fn normalize_print(node: &mut Node, style: PrintStyle) {
    node.remove("newline");
    let Some(args) = node.attr("args").map(str::to_string) else {
        return;
    };
    let normalized = match style {
        PrintStyle::Call => return,
        PrintStyle::Stream => split_top_level(&args, "<<")
            .into_iter()
            .filter(|arg| !matches!(arg.as_str(), "std::endl" | "endl" | "\"\\n\"" | "\" \"" | "' '"))
            .collect::<Vec<_>>()
            .join(", "),
        PrintStyle::Macro => match expand_format(&args) {
            Some(list) => list.join(", "),
            None => return,
        },
    };
    if normalized.is_empty() {
        node.remove("args");
    } else {
        node.set("args", normalized);
    }
}

/// Expand a `format!`-style argument list into plain print arguments.
///
/// `"x = {}", x` becomes `["\"x =\"", "x"]`. Returns `None` when the format
/// string uses anything beyond plain and named placeholders.
fn expand_format(args: &str) -> Option<Vec<String>> {
    let parts = split_top_level(args, ",");
    let (format, rest) = parts.split_first()?;
    let inner = format.strip_prefix('"')?.strip_suffix('"')?;
    let mut positional = rest.iter();
    let mut out = Vec::new();
    let mut literal = String::new();
    let flush = |literal: &mut String, out: &mut Vec<String>, whole: bool| {
        let text = if whole { literal.as_str() } else { literal.trim() };
        if !text.is_empty() {
            out.push(format!("\"{text}\""));
        }
        literal.clear();
    };
    let mut chars = inner.chars().peekable();
    let mut placeholders = 0;
    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                literal.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                literal.push('}');
            }
            '{' => {
                let mut spec = String::new();
                for next in chars.by_ref() {
                    if next == '}' {
                        break;
                    }
                    spec.push(next);
                }
                let name = spec.split(':').next().unwrap_or_default().trim();
                flush(&mut literal, &mut out, false);
                placeholders += 1;
                if name.is_empty() {
                    out.push(positional.next()?.clone());
                } else if name.chars().all(|c| c.is_alphanumeric() || c == '_') {
                    out.push(name.to_string());
                } else {
                    return None;
                }
            }
            '}' => return None,
            c => literal.push(c),
        }
    }
    if positional.next().is_some() {
        return None;
    }
    flush(&mut literal, &mut out, placeholders == 0);
    Some(out)
}

/// Fold Rust `impl` blocks into the `struct` they implement.
fn merge_impl_blocks(program: &mut Node) {
    let children = std::mem::take(&mut program.children);
    let mut out: Vec<Node> = Vec::with_capacity(children.len());
    for mut node in children {
        if node.is(ConstructKind::ClassDecl) && node.flag("impl") {
            node.remove("impl");
            node.remove("trait");
            let name = node.attr("name").map(str::to_string);
            let owner = out
                .iter_mut()
                .find(|n| n.is(ConstructKind::ClassDecl) && n.attr("name") == name.as_deref());
            if let Some(owner) = owner {
                owner.children.append(&mut node.children);
                continue;
            }
        }
        out.push(node);
    }
    program.children = out;
}

/// Move Go methods (`func (d *Dog) Speak()`) into the struct they belong to.
fn attach_receiver_methods(program: &mut Node) {
    let children = std::mem::take(&mut program.children);
    let mut out: Vec<Node> = Vec::with_capacity(children.len());
    for mut node in children {
        if node.is(ConstructKind::FunctionDecl)
            && let Some(owner) = node.attr("owner").map(str::to_string)
            && let Some(class) = out
                .iter_mut()
                .find(|n| n.is(ConstructKind::ClassDecl) && n.attr("name") == Some(owner.as_str()))
        {
            node.remove("owner");
            node.set("method", "true");
            class.children.push(node);
            continue;
        }
        out.push(node);
    }
    program.children = out;
}

fn is_static_decorator(node: &Node) -> bool {
    node.is(ConstructKind::Unknown)
        && matches!(
            node.attr(RAW).map(str::trim),
            Some("@staticmethod" | "@classmethod")
        )
}

/// Mark constructors, static methods and fields inside classes, and drop
/// explicit receiver parameters.
fn mark_members(node: &mut Node, rules: &LanguageRules) {
    if node.is(ConstructKind::ClassDecl) {
        let class_name = node.attr_or_empty("name").to_string();
        let children = std::mem::take(&mut node.children);
        let mut out = Vec::with_capacity(children.len());
        let mut pending_static = false;
        for mut child in children {
            if is_static_decorator(&child) {
                pending_static = true;
                continue;
            }
            match child.kind {
                ConstructKind::FunctionDecl => {
                    mark_method(&mut child, &class_name, rules, pending_static);
                    pending_static = false;
                }
                ConstructKind::VarDecl => child.set("field", "true"),
                _ => {}
            }
            out.push(child);
        }
        node.children = out;
    }
    for child in &mut node.children {
        mark_members(child, rules);
    }
}

fn mark_method(method: &mut Node, class_name: &str, rules: &LanguageRules, decorated: bool) {
    let mut has_receiver = method.flag("method") || method.attr("receiver").is_some();
    method.remove("method");
    if let Some(params) = method.attr("params").map(str::to_string) {
        let pieces = split_top_level(&params, ",");
        if pieces.first().is_some_and(|p| is_receiver(p)) {
            has_receiver = true;
            let rest = pieces[1..].join(", ");
            if rest.is_empty() {
                method.remove("params");
            } else {
                method.set("params", rest);
            }
        }
    }
    let name = method.attr_or_empty("name");
    let constructor = rules.constructor == Some(name) || name == class_name;
    if constructor {
        method.set("constructor", "true");
        method.remove("static");
        return;
    }
    let explicit_receivers = rules.declarations.receiver_param.is_some();
    if decorated || (explicit_receivers && !has_receiver) {
        method.set("static", "true");
    }
}

/// Turn first assignments into declarations, one scope per function/class.
fn infer_declarations(children: &mut [Node], bound: &mut HashSet<String>, class_scope: bool) {
    let mut declared = Vec::new();
    declare_first_assignments(children, bound, &mut declared);
    let mut reassigned = HashSet::new();
    collect_reassigned(children, &mut reassigned);
    mark_mutability(children, &declared, &reassigned, class_scope);
}

fn declare_first_assignments(
    children: &mut [Node],
    bound: &mut HashSet<String>,
    declared: &mut Vec<String>,
) {
    for child in children.iter_mut() {
        match child.kind {
            ConstructKind::FunctionDecl => {
                let mut scope: HashSet<String> = child
                    .attr("params")
                    .map(|p| {
                        split_top_level(p, ",")
                            .iter()
                            .map(|p| p.split([':', '=']).next().unwrap_or_default().trim().to_string())
                            .collect()
                    })
                    .unwrap_or_default();
                scope.insert("self".to_string());
                infer_declarations(&mut child.children, &mut scope, false);
            }
            ConstructKind::ClassDecl => {
                let mut scope = HashSet::new();
                infer_declarations(&mut child.children, &mut scope, true);
            }
            ConstructKind::VarDecl => {
                if let Some(name) = child.attr("name") {
                    bound.insert(name.to_string());
                }
            }
            ConstructKind::Assignment => {
                let target = child.attr_or_empty("target").to_string();
                let plain = child.attr("op") == Some("=") && is_identifier(&target);
                if plain && !bound.contains(&target) {
                    child.kind = ConstructKind::VarDecl;
                    child.remove("target");
                    child.remove("op");
                    child.set("name", target.as_str());
                    bound.insert(target.clone());
                    declared.push(target);
                }
            }
            ConstructKind::For => {
                for var in child.attr_or_empty("var").split(',') {
                    bound.insert(var.trim().to_string());
                }
                declare_first_assignments(&mut child.children, bound, declared);
            }
            _ => declare_first_assignments(&mut child.children, bound, declared),
        }
    }
}

fn collect_reassigned(children: &[Node], out: &mut HashSet<String>) {
    for child in children {
        match child.kind {
            ConstructKind::FunctionDecl | ConstructKind::ClassDecl => {}
            ConstructKind::Assignment => {
                out.insert(child.attr_or_empty("target").to_string());
            }
            _ => collect_reassigned(&child.children, out),
        }
    }
}

fn mark_mutability(
    children: &mut [Node],
    declared: &[String],
    reassigned: &HashSet<String>,
    class_scope: bool,
) {
    for child in children.iter_mut() {
        match child.kind {
            ConstructKind::FunctionDecl | ConstructKind::ClassDecl => {}
            ConstructKind::VarDecl if child.attr("mutable").is_none() => {
                let name = child.attr_or_empty("name").to_string();
                if declared.contains(&name) {
                    let mutable = class_scope || reassigned.contains(&name);
                    child.set("mutable", if mutable { "true" } else { "false" });
                }
            }
            _ => mark_mutability(&mut child.children, declared, reassigned, class_scope),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_from_update() {
        assert_eq!(step_from_update("i++", "i").as_deref(), Some("1"));
        assert_eq!(step_from_update("--i", "i").as_deref(), Some("-1"));
        assert_eq!(step_from_update("i += 2", "i").as_deref(), Some("2"));
        assert_eq!(step_from_update("i -= n", "i").as_deref(), Some("-n"));
        assert_eq!(step_from_update("i = i + 3", "i").as_deref(), Some("3"));
        assert_eq!(step_from_update("j++", "i"), None);
        assert_eq!(step_from_update("i *= 2", "i"), None);
    }

    #[test]
    fn test_expand_format() {
        assert_eq!(
            expand_format("\"{} {}\", a, b"),
            Some(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(
            expand_format("\"x = {}\", x"),
            Some(vec!["\"x =\"".to_string(), "x".to_string()])
        );
        assert_eq!(
            expand_format("\"hello {name}\""),
            Some(vec!["\"hello\"".to_string(), "name".to_string()])
        );
        assert_eq!(expand_format("\"Hello, world!\""), Some(vec!["\"Hello, world!\"".to_string()]));
        assert_eq!(expand_format("\"{}\""), None);
        assert_eq!(expand_format("msg"), None);
    }
}
