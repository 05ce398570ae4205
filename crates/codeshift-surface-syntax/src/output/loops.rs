//! Loops and print formatting.

use super::Emitter;
use crate::expr::is_identifier;
use crate::ir::Node;
use codeshift_languages::{ConstructKind, TypePosition, fill, map_type};

/// `expr + delta`, folded when `expr` is an integer literal.
fn offset(expr: &str, delta: i64) -> String {
    match expr.trim().parse::<i64>() {
        Ok(n) => (n + delta).to_string(),
        Err(_) if delta < 0 => format!("{expr} - {}", -delta),
        Err(_) => format!("{expr} + {delta}"),
    }
}

/// Arguments of Python's `range()` for a counted loop.
fn range_args(start: &str, end: &str, cmp: &str, step: &str) -> String {
    let end = match cmp {
        "<=" => offset(end, 1),
        ">=" => offset(end, -1),
        _ => end.to_string(),
    };
    match (start, step) {
        ("0", "1") => end,
        (_, "1") => format!("{start}, {end}"),
        _ => format!("{start}, {end}, {step}"),
    }
}

/// A Rust range expression for a counted loop.
fn range_expr(start: &str, end: &str, cmp: &str, step: &str) -> String {
    let magnitude = step.trim_start_matches('-').trim();
    if cmp.starts_with('>') || step.starts_with('-') {
        let low = if cmp == ">=" {
            end.to_string()
        } else {
            offset(end, 1)
        };
        let range = format!("({low}..={start}).rev()");
        return if magnitude == "1" {
            range
        } else {
            format!("{range}.step_by({magnitude})")
        };
    }
    let op = if cmp == "<=" { "..=" } else { ".." };
    let range = format!("{start}{op}{end}");
    if step == "1" {
        range
    } else {
        format!("({range}).step_by({step})")
    }
}

/// C-style update clause for a step.
fn update_clause(var: &str, step: &str) -> String {
    match step {
        "1" => format!("{var}++"),
        "-1" => format!("{var}--"),
        _ => match step.strip_prefix('-') {
            Some(magnitude) => format!("{var} -= {}", magnitude.trim()),
            None => format!("{var} += {step}"),
        },
    }
}

/// The inside of a plain double-quoted string literal.
fn string_literal(arg: &str) -> Option<&str> {
    let inner = arg.strip_prefix('"')?.strip_suffix('"')?;
    (!inner.replace("\\\"", "").contains('"')).then_some(inner)
}

/// Format string and arguments for a `println!`-style print of `args`,
/// separated by spaces.
pub(super) fn format_args(args: &[String]) -> String {
    let mut pieces = Vec::with_capacity(args.len());
    let mut rest = Vec::new();
    for arg in args {
        if let Some(text) = string_literal(arg) {
            pieces.push(text.replace('{', "{{").replace('}', "}}"));
        } else if is_identifier(arg) {
            pieces.push(format!("{{{arg}}}"));
        } else {
            pieces.push("{}".to_string());
            rest.push(arg.as_str());
        }
    }
    let mut out = format!("\"{}\"", pieces.join(" "));
    for arg in rest {
        out.push_str(", ");
        out.push_str(arg);
    }
    out
}

impl Emitter {
    pub(super) fn write_for(&mut self, node: &Node) {
        if node.attr("start").is_some() && node.attr("end").is_some() {
            self.write_counted_for(node);
            return;
        }
        let ty = node
            .attr("type")
            .and_then(|ty| map_type(ty, self.from.language, self.to.language, TypePosition::Local))
            .or_else(|| self.to.inferred_decl.map(str::to_string))
            .or_else(|| self.to.fallback_type.map(str::to_string))
            .unwrap_or_default();
        let text = self.render(self.to.templates.for_each, node, &[("type", ty)]);
        self.emit(text, node);
        self.write_body(&node.children);
        self.close_block();
    }

    fn write_counted_for(&mut self, node: &Node) {
        let template = self.to.templates.for_range;
        let var = node.attr_or_empty("var");
        let start = self.attr(node, "start").unwrap_or_default();
        let end = self.attr(node, "end").unwrap_or_default();
        let cmp = match node.attr_or_empty("cmp") {
            "" | "!=" | "!==" => "<",
            cmp => cmp,
        };
        let step = self.attr(node, "step");
        let extra = if template.contains("$update") {
            let update = match (&step, node.attr("update")) {
                (Some(step), _) => update_clause(var, step),
                (None, Some(update)) => self.rewriter.rewrite(update),
                (None, None) => update_clause(var, "1"),
            };
            ("update", update)
        } else {
            let Some(step) = step else {
                self.write_for_as_while(node);
                return;
            };
            if template.contains("$range_args") {
                ("range_args", range_args(&start, &end, cmp, &step))
            } else {
                ("range_expr", range_expr(&start, &end, cmp, &step))
            }
        };
        let text = self.render(template, node, &[extra, ("cmp", cmp.to_string())]);
        self.emit(text, node);
        self.write_body(&node.children);
        self.close_block();
    }

    /// A counted loop whose update has no range form, written as a `while`.
    fn write_for_as_while(&mut self, node: &Node) {
        let var = node.attr_or_empty("var");
        let init = Node::new(ConstructKind::VarDecl, node.lines)
            .with_attr("name", var)
            .with_attr("value", node.attr_or_empty("start"))
            .with_attr("mutable", "true");
        self.write_var(&init);

        let condition = format!(
            "{var} {} {}",
            node.attr_or_empty("cmp"),
            node.attr_or_empty("end")
        );
        let condition = self.rewriter.rewrite(&condition);
        let text = fill(self.to.templates.while_, |key| {
            (key == "condition").then(|| condition.clone())
        });
        self.emit(text, node);

        let update = node.attr_or_empty("update");
        let last = match self.from.classify(update) {
            Some(m) if m.kind == ConstructKind::Assignment => {
                let mut step = Node::new(ConstructKind::Assignment, node.lines);
                for (key, value) in m.attributes {
                    step.set(key, value);
                }
                self.render(self.to.templates.assign, &step, &[])
            }
            _ => self.rewriter.rewrite(update),
        };
        self.write_body_with(&node.children, None, Some(last));
        self.close_block();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::read;
    use crate::output::write;
    use crate::traits::RenderOptions;
    use codeshift_languages::Language;

    fn convert(source: &str, from: Language, to: Language) -> String {
        write(&read(source, from), to, &RenderOptions::default())
    }

    #[test]
    fn test_range_helpers() {
        assert_eq!(range_args("0", "10", "<", "1"), "10");
        assert_eq!(range_args("1", "n", "<=", "1"), "1, n + 1");
        assert_eq!(range_args("10", "0", ">", "-1"), "10, 0, -1");
        assert_eq!(range_expr("0", "10", "<", "1"), "0..10");
        assert_eq!(range_expr("0", "n", "<=", "2"), "(0..=n).step_by(2)");
        assert_eq!(range_expr("10", "0", ">", "-1"), "(1..=10).rev()");
        assert_eq!(update_clause("i", "-2"), "i -= 2");
    }

    #[test]
    fn test_counted_loops_across_targets() {
        let source = "for i in range(10):\n    print(i)\n";
        assert_eq!(
            convert(source, Language::Python, Language::JavaScript),
            "for (let i = 0; i < 10; i++) {\n  console.log(i);\n}\n"
        );
        assert_eq!(
            convert(source, Language::Python, Language::Rust),
            "for i in 0..10 {\n    println!(\"{i}\");\n}\n"
        );
        let source = "for (int i = 1; i <= n; i += 2) {\n    total += i;\n}\n";
        assert_eq!(
            convert(source, Language::Java, Language::Python),
            "for i in range(1, n + 1, 2):\n    total += i\n"
        );
    }

    #[test]
    fn test_unrangeable_loop_becomes_while() {
        let source = "for (let i = 1; i < n; i *= 2) {\n  f(i);\n}\n";
        assert_eq!(
            convert(source, Language::JavaScript, Language::Python),
            "i = 1\nwhile i < n:\n    # untranslated: f(i);\n    i *= 2\n"
        );
    }

    #[test]
    fn test_for_each() {
        let source = "for item in items:\n    print(item)\n";
        assert_eq!(
            convert(source, Language::Python, Language::Java),
            "for (var item : items) {\n    System.out.println(item);\n}\n"
        );
        assert_eq!(
            convert(source, Language::Python, Language::Go),
            "for _, item := range items {\n\tfmt.Println(item)\n}\n"
        );
    }

    #[test]
    fn test_format_args() {
        let args = ["\"total:\"".to_string(), "a + b".to_string()];
        assert_eq!(format_args(&args), "\"total: {}\", a + b");
        assert_eq!(format_args(&["\"{x}\"".to_string()]), "\"{{x}}\"");
    }
}
