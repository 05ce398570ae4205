//! Functions, methods, classes and fields.

use super::{ClassCtx, Emitter};
use crate::expr::{ExprRewriter, is_identifier};
use crate::ir::Node;
use crate::params::{Param, parse_params, render_params};
use codeshift_languages::{
    CanonicalType, ClassStyle, ConstructKind, TypePosition, canonical_type, fill, infer_literal,
    map_type, type_name,
};

/// Operators whose result is a boolean.
const COMPARISONS: &[&str] = &[
    "==", "!=", "<=", ">=", " < ", " > ", "&&", "||", " and ", " or ",
];

/// Value of the first `return` with a value, outside nested declarations.
fn first_return_value(children: &[Node]) -> Option<&str> {
    children.iter().find_map(|child| match child.kind {
        ConstructKind::Return => child.attr("value"),
        ConstructKind::FunctionDecl | ConstructKind::ClassDecl => None,
        _ => first_return_value(&child.children),
    })
}

/// Whether `method` assigns through its receiver (`self.x = ...`).
fn mutates_receiver(method: &Node, receiver: &str, member: &str) -> bool {
    let prefix = format!("{receiver}{member}");
    method.any_descendant(&|node| {
        node.is(ConstructKind::Assignment) && node.attr_or_empty("target").starts_with(&prefix)
    })
}

impl Emitter {
    fn source_params(&self, node: &Node) -> Vec<Param> {
        parse_params(node.attr_or_empty("params"), self.from.param_style)
    }

    fn params(&self, node: &Node) -> String {
        render_params(&self.source_params(node), self.from, self.to, &self.rewriter)
    }

    /// Canonical type of a simple expression: a literal, a comparison, or
    /// arithmetic over operands of one type.
    fn canonical_expr_type(&self, value: &str, params: &[Param]) -> Option<CanonicalType> {
        if let Some(ty) = infer_literal(value) {
            return Some(ty);
        }
        if COMPARISONS.iter().any(|op| value.contains(op)) {
            return Some(CanonicalType::Bool);
        }
        let mut found = None;
        for operand in value.split(['+', '-', '*', '/', '%']) {
            let operand = operand.trim().trim_matches(['(', ')']).trim();
            if operand.is_empty() {
                continue;
            }
            let ty = infer_literal(operand).or_else(|| {
                params
                    .iter()
                    .find(|p| p.name == operand)
                    .and_then(|p| p.ty.as_deref())
                    .and_then(canonical_type)
            })?;
            match found {
                None => found = Some(ty),
                Some(prev) if prev == ty => {}
                Some(_) => return None,
            }
        }
        found
    }

    /// Target type of `value`, if it can be told from literals and parameters.
    fn expr_type(&self, value: &str, params: &[Param], position: TypePosition) -> Option<String> {
        let value = value.trim();
        if let Some(param) = params.iter().find(|p| p.name == value) {
            return param
                .ty
                .as_deref()
                .and_then(|ty| map_type(ty, self.from.language, self.to.language, position));
        }
        let ty = self.canonical_expr_type(value, params)?;
        type_name(self.to.language, ty, position).map(str::to_string)
    }

    fn return_type(&self, node: &Node) -> Option<String> {
        let (from, to) = (self.from, self.to);
        let void = to.declarations.void_type.map(str::to_string);
        if let Some(explicit) = node.attr("returns") {
            if canonical_type(explicit) == Some(CanonicalType::Void) {
                return void;
            }
            return map_type(explicit, from.language, to.language, TypePosition::Return)
                .or_else(|| to.fallback_type.map(str::to_string));
        }
        // dynamically typed targets only annotate what was written
        let fallback = to.fallback_type?;
        match first_return_value(&node.children) {
            Some(value) => Some(
                self.expr_type(value, &self.source_params(node), TypePosition::Return)
                    .unwrap_or_else(|| fallback.to_string()),
            ),
            None => void,
        }
    }

    fn returns_clause(&self, node: &Node) -> String {
        self.return_type(node)
            .map(|ty| fill(self.to.declarations.returns, |key| (key == "type").then(|| ty.clone())))
            .unwrap_or_default()
    }

    pub(super) fn write_function(&mut self, node: &Node) {
        let params = self.params(node);
        let returns = self.returns_clause(node);
        let text = self.render(
            self.to.declarations.function,
            node,
            &[("params", params), ("returns", returns)],
        );
        self.emit(text, node);
        self.write_body(&node.children);
        self.close_block();
    }

    pub(super) fn write_method(&mut self, node: &Node, class: &ClassCtx) {
        let decl = self.to.declarations;
        let constructor = node.flag("constructor");
        let is_static = node.flag("static") && !constructor;
        // a constructor with a prologue builds a value instead of receiving one
        let builds_value = constructor && decl.constructor_prologue.is_some();
        let names_receiver = self.to.keywords.self_ref.is_none() && !is_static;
        let target_self = (builds_value || names_receiver).then_some(class.receiver.as_str());
        let rewriter = ExprRewriter::new(self.from, self.to)
            .with_source_self(node.attr("receiver"))
            .with_target_self(target_self);
        let saved = std::mem::replace(&mut self.rewriter, rewriter);

        let mut params = self.params(node);
        if !is_static
            && !builds_value
            && let Some((shared, exclusive)) = decl.receiver_param
        {
            let source_self = node.attr("receiver").or(self.from.keywords.self_ref);
            let mutates = source_self
                .is_some_and(|s| mutates_receiver(node, s, self.from.keywords.self_member));
            let receiver = if mutates { exclusive } else { shared };
            params = if params.is_empty() {
                receiver.to_string()
            } else {
                format!("{receiver}, {params}")
            };
        }
        let template = if constructor {
            decl.constructor
        } else if is_static {
            decl.static_method
        } else {
            decl.method
        };
        let returns = if constructor {
            String::new()
        } else {
            self.returns_clause(node)
        };
        let text = self.render(
            template,
            node,
            &[
                ("params", params),
                ("returns", returns),
                ("class", class.name.clone()),
                ("receiver", class.receiver.clone()),
            ],
        );
        self.emit(text, node);

        let lookup = |key: &str| match key {
            "class" => Some(class.name.clone()),
            "receiver" => Some(class.receiver.clone()),
            _ => None,
        };
        let (prologue, epilogue) = if builds_value {
            (
                decl.constructor_prologue.map(|t| fill(t, &lookup)),
                decl.constructor_epilogue.map(|t| fill(t, &lookup)),
            )
        } else {
            (None, None)
        };
        self.write_body_with(&node.children, prologue, epilogue);
        self.close_block();
        self.rewriter = saved;
    }

    pub(super) fn write_field(&mut self, node: &Node) {
        let decl = self.to.declarations;
        let value = node.attr("value");
        let ty = node
            .attr("type")
            .and_then(|ty| map_type(ty, self.from.language, self.to.language, TypePosition::Field))
            .or_else(|| {
                value
                    .and_then(infer_literal)
                    .and_then(|ty| type_name(self.to.language, ty, TypePosition::Field))
                    .map(str::to_string)
            })
            .or_else(|| self.to.fallback_type.map(str::to_string))
            .unwrap_or_default();
        let template = if value.is_some() {
            decl.field_value
        } else {
            decl.field
        };
        let text = self.render(template, node, &[("type", ty)]);
        self.emit(text, node);
    }

    /// Field lines for a typed target, taken from the constructor's
    /// assignments through its receiver when the class declares none.
    fn derived_fields(&self, class: &Node) -> Vec<String> {
        let Some(fallback) = self.to.fallback_type else {
            return Vec::new();
        };
        if class.children.iter().any(|c| c.is(ConstructKind::VarDecl)) {
            return Vec::new();
        }
        let Some(ctor) = class.children.iter().find(|c| c.flag("constructor")) else {
            return Vec::new();
        };
        let Some(source_self) = self.from.keywords.self_ref else {
            return Vec::new();
        };
        let prefix = format!("{source_self}{}", self.from.keywords.self_member);
        let params = self.source_params(ctor);
        let mut seen: Vec<&str> = Vec::new();
        let mut lines = Vec::new();
        for child in &ctor.children {
            if !child.is(ConstructKind::Assignment) || child.attr("op") != Some("=") {
                continue;
            }
            let Some(name) = child.attr_or_empty("target").strip_prefix(prefix.as_str()) else {
                continue;
            };
            if !is_identifier(name) || seen.contains(&name) {
                continue;
            }
            seen.push(name);
            let ty = self
                .expr_type(child.attr_or_empty("value"), &params, TypePosition::Field)
                .unwrap_or_else(|| fallback.to_string());
            lines.push(fill(self.to.declarations.field, |key| match key {
                "name" => Some(name.to_string()),
                "type" => Some(ty.clone()),
                _ => None,
            }));
        }
        lines
    }

    pub(super) fn write_class(&mut self, node: &Node) {
        let decl = self.to.declarations;
        let class = ClassCtx::new(node.attr_or_empty("name"));
        let extends = node
            .attr("base")
            .map(|base| fill(decl.extends, |key| (key == "base").then(|| base.to_string())))
            .unwrap_or_default();
        let text = self.render(decl.class_open, node, &[("extends", extends)]);
        self.emit(text, node);
        let derived = self.derived_fields(node);

        if decl.class_style == ClassStyle::Inline {
            if let Some(label) = decl.member_label {
                self.line(label);
            }
            self.indent += 1;
            let before = self.statements;
            for field in &derived {
                self.line(field);
            }
            let members: Vec<&Node> = node.children.iter().collect();
            self.write_sequence(&members, Some(&class));
            if self.statements == before {
                self.empty_body();
            }
            self.indent -= 1;
            if !decl.class_close.is_empty() {
                self.line(decl.class_close);
            }
            return;
        }

        // struct first, behaviour after it
        let (fields, members): (Vec<&Node>, Vec<&Node>) = node
            .children
            .iter()
            .partition(|c| c.is(ConstructKind::VarDecl));
        self.indent += 1;
        for field in &derived {
            self.line(field);
        }
        self.write_sequence(&fields, Some(&class));
        self.indent -= 1;
        self.line(decl.class_close);
        if members.is_empty() {
            return;
        }
        self.blank_line();
        if decl.class_style == ClassStyle::ImplBlock {
            let open = fill(decl.impl_open, |key| (key == "name").then(|| class.name.clone()));
            self.line(&open);
            self.indent += 1;
            self.write_sequence(&members, Some(&class));
            self.indent -= 1;
            self.line(decl.class_close);
        } else {
            self.write_sequence(&members, Some(&class));
        }
    }
}
