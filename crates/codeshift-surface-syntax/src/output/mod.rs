//! Output writer - emit IR as target-language source.
//!
//! One writer serves every language: each node is rendered from the
//! target's templates, with expressions rewritten from the source language
//! recorded on the `Program` node.

mod decls;
mod loops;

use crate::expr::{ExprRewriter, split_top_level};
use crate::ir::{LANGUAGE, Node, RAW};
use crate::traits::{RenderOptions, Writer};
use codeshift_languages::{
    BlockStyle, ConstructKind, Language, LanguageRules, TypePosition, fill, infer_literal,
    map_type, rules_for, type_name,
};

/// Writer driven by a language's rule table.
#[derive(Debug, Clone, Copy)]
pub struct TableWriter {
    language: Language,
}

impl TableWriter {
    pub const fn new(language: Language) -> Self {
        Self { language }
    }
}

impl Writer for TableWriter {
    fn language(&self) -> Language {
        self.language
    }

    fn write(&self, program: &Node, options: &RenderOptions) -> String {
        write(program, self.language, options)
    }
}

/// Emit `program` as `language` source.
pub fn write(program: &Node, language: Language, options: &RenderOptions) -> String {
    let from = program
        .attr(LANGUAGE)
        .and_then(|tag| Language::from_tag(tag).ok())
        .unwrap_or(language);
    let mut emitter = Emitter::new(rules_for(from), rules_for(language), *options);
    emitter.write_block(&program.children);
    emitter.output
}

/// Attributes holding expressions, rewritten into the target on output.
const EXPRESSION_ATTRS: &[&str] = &[
    "condition", "value", "iterable", "target", "op", "start", "end", "step", "update",
];

/// A class whose members are being written.
struct ClassCtx {
    name: String,
    /// Receiver name where the target names receivers per method (`d` for `Dog`).
    receiver: String,
}

impl ClassCtx {
    fn new(name: &str) -> Self {
        let receiver = name
            .chars()
            .next()
            .map_or_else(|| "s".to_string(), |c| c.to_lowercase().collect());
        Self {
            name: name.to_string(),
            receiver,
        }
    }
}

struct Emitter {
    from: &'static LanguageRules,
    to: &'static LanguageRules,
    options: RenderOptions,
    rewriter: ExprRewriter,
    output: String,
    indent: usize,
    /// Code lines written so far; comments and blank lines do not count.
    statements: usize,
}

impl Emitter {
    fn new(from: &'static LanguageRules, to: &'static LanguageRules, options: RenderOptions) -> Self {
        Self {
            from,
            to,
            options,
            rewriter: ExprRewriter::new(from, to),
            output: String::new(),
            indent: 0,
            statements: 0,
        }
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.output.push_str(self.to.indent_unit);
        }
    }

    /// Write code at the current depth, one line per `\n`-separated piece.
    fn line(&mut self, text: &str) {
        for piece in text.split('\n') {
            if piece.trim().is_empty() {
                self.output.push('\n');
                continue;
            }
            self.write_indent();
            self.output.push_str(piece);
            self.output.push('\n');
            self.statements += 1;
        }
    }

    /// Write a line comment at the current depth.
    fn comment(&mut self, text: &str) {
        let marker = self.to.lexicon.line_comment;
        self.write_indent();
        self.output.push_str(marker);
        if !text.is_empty() {
            self.output.push(' ');
            self.output.push_str(text);
        }
        self.output.push('\n');
    }

    fn blank_line(&mut self) {
        if !self.output.is_empty() && !self.output.ends_with("\n\n") {
            self.output.push('\n');
        }
    }

    /// Write a rendered header or statement, keeping the node's trailing comment.
    fn emit(&mut self, mut text: String, node: &Node) {
        if let Some(comment) = node.attr("trailing_comment") {
            text.push_str("  ");
            text.push_str(self.to.lexicon.line_comment);
            text.push(' ');
            text.push_str(comment);
        }
        self.line(&text);
    }

    /// Attribute value as it should appear in the target.
    fn attr(&self, node: &Node, key: &str) -> Option<String> {
        let value = node.attr(key)?;
        if EXPRESSION_ATTRS.contains(&key) {
            Some(self.rewriter.rewrite(value))
        } else {
            Some(value.to_string())
        }
    }

    /// Fill `template` from `extra`, then from the node's attributes.
    fn render(&self, template: &str, node: &Node, extra: &[(&str, String)]) -> String {
        fill(template, |key| {
            extra
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.clone())
                .or_else(|| self.attr(node, key))
        })
    }

    fn close_block(&mut self) {
        if self.to.uses_braces() {
            self.line("}");
        }
    }

    /// Statement standing in for an empty block, where blocks cannot be empty.
    fn empty_body(&mut self) {
        if self.to.block_style == BlockStyle::Indent {
            self.line("pass");
        }
    }

    /// Write `children` one level deeper, between optional first and last lines.
    fn write_body_with(&mut self, children: &[Node], first: Option<String>, last: Option<String>) {
        self.indent += 1;
        let before = self.statements;
        if let Some(first) = first {
            self.line(&first);
        }
        self.write_block(children);
        if let Some(last) = last {
            self.line(&last);
        }
        if self.statements == before {
            self.empty_body();
        }
        self.indent -= 1;
    }

    fn write_body(&mut self, children: &[Node]) {
        self.write_body_with(children, None, None);
    }

    fn write_block(&mut self, children: &[Node]) {
        let nodes: Vec<&Node> = children.iter().collect();
        self.write_sequence(&nodes, None);
    }

    /// Write sibling nodes, grouping `if` chains; inside a class, functions
    /// are methods and declarations are fields.
    fn write_sequence(&mut self, nodes: &[&Node], class: Option<&ClassCtx>) {
        let mut prev: Option<&Node> = None;
        let mut i = 0;
        while i < nodes.len() {
            let node = nodes[i];
            if let Some(prev) = prev
                && separated(prev, node)
            {
                self.blank_line();
            }
            if node.is(ConstructKind::If) {
                let end = nodes[i + 1..]
                    .iter()
                    .position(|n| !n.is_branch())
                    .map_or(nodes.len(), |p| i + 1 + p);
                self.write_if_chain(&nodes[i..end]);
                prev = Some(nodes[end - 1]);
                i = end;
                continue;
            }
            match (class, node.kind) {
                (Some(class), ConstructKind::FunctionDecl) => self.write_method(node, class),
                (Some(_), ConstructKind::VarDecl) => self.write_field(node),
                _ => self.write_node(node),
            }
            prev = Some(node);
            i += 1;
        }
    }

    fn write_node(&mut self, node: &Node) {
        match node.kind {
            ConstructKind::Program => self.write_block(&node.children),
            ConstructKind::FunctionDecl => self.write_function(node),
            ConstructKind::ClassDecl => self.write_class(node),
            ConstructKind::VarDecl => self.write_var(node),
            ConstructKind::Assignment => {
                let text = self.render(self.to.templates.assign, node, &[]);
                self.emit(text, node);
            }
            ConstructKind::If => self.write_if_chain(&[node]),
            ConstructKind::For => self.write_for(node),
            ConstructKind::While => {
                let text = self.render(self.to.templates.while_, node, &[]);
                self.emit(text, node);
                self.write_body(&node.children);
                self.close_block();
            }
            ConstructKind::Print => self.write_print(node),
            ConstructKind::Return => {
                let template = if node.attr("value").is_some() {
                    self.to.templates.return_value
                } else {
                    self.to.templates.return_bare
                };
                let text = self.render(template, node, &[]);
                self.emit(text, node);
            }
            ConstructKind::Comment => {
                for line in node.attr_or_empty("text").split('\n') {
                    self.comment(line.trim_end());
                }
            }
            ConstructKind::Unknown => self.write_unknown(node),
        }
    }

    /// An `if` and the `elif`/`else` branches that follow it.
    fn write_if_chain(&mut self, chain: &[&Node]) {
        let templates = self.to.templates;
        for (k, node) in chain.iter().enumerate() {
            let template = match node.attr("branch") {
                Some("elif") => templates.elif,
                Some("else") => templates.else_,
                _ => templates.if_,
            };
            // a branch that opens the chain has no block to close
            let template = if k == 0 {
                template.strip_prefix("} ").unwrap_or(template)
            } else {
                template
            };
            let text = self.render(template, node, &[]);
            self.emit(text, node);
            self.write_body(&node.children);
        }
        self.close_block();
    }

    fn write_var(&mut self, node: &Node) {
        let decl = self.to.declarations;
        let value = node.attr("value");
        let explicit = node
            .attr("type")
            .and_then(|ty| map_type(ty, self.from.language, self.to.language, TypePosition::Local));
        let mutable = node.attr("mutable") != Some("false");
        let template = match (value.is_some(), explicit.is_some(), mutable) {
            (false, _, _) => decl.declare,
            (true, true, true) => decl.var_typed,
            (true, true, false) => decl.constant_typed,
            (true, false, true) => decl.var,
            (true, false, false) => decl.constant,
        };
        let ty = match (explicit, value) {
            (Some(ty), _) => ty,
            (None, Some(value)) => self.local_type(value),
            (None, None) => self.to.fallback_type.unwrap_or_default().to_string(),
        };
        let text = self.render(template, node, &[("type", ty)]);
        self.emit(text, node);
    }

    /// Type for a local initialised with `value` whose type was not written.
    fn local_type(&self, value: &str) -> String {
        infer_literal(value)
            .and_then(|ty| type_name(self.to.language, ty, TypePosition::Local))
            .or(self.to.inferred_decl)
            .or(self.to.fallback_type)
            .unwrap_or_default()
            .to_string()
    }

    fn write_print(&mut self, node: &Node) {
        let templates = self.to.templates;
        let args: Vec<String> = node
            .attr("args")
            .map(|args| {
                split_top_level(args, ",")
                    .iter()
                    .filter(|arg| !arg.is_empty())
                    .map(|arg| self.rewriter.rewrite(arg))
                    .collect()
            })
            .unwrap_or_default();
        let text = if args.is_empty() {
            templates.print_empty.to_string()
        } else {
            let joined = args.join(templates.print_join);
            let format = loops::format_args(&args);
            fill(templates.print, |key| match key {
                "args" => Some(joined.clone()),
                "format" => Some(format.clone()),
                _ => None,
            })
        };
        self.emit(text, node);
    }

    fn write_unknown(&mut self, node: &Node) {
        let raw = node.attr_or_empty(RAW);
        if self.options.mark_untranslated {
            let mut lines = raw.lines();
            let first = lines.next().unwrap_or_default().trim();
            self.comment(&format!("untranslated: {first}"));
            for line in lines {
                self.comment(line.trim_end());
            }
            self.write_block(&node.children);
            return;
        }
        self.line(raw);
        if raw.ends_with('{') {
            self.write_body(&node.children);
            self.line("}");
        } else if raw.ends_with(':') {
            self.write_body(&node.children);
        } else {
            self.write_block(&node.children);
        }
    }
}

fn is_declaration(node: &Node) -> bool {
    matches!(node.kind, ConstructKind::FunctionDecl | ConstructKind::ClassDecl)
}

/// Whether a blank line goes between two siblings.
fn separated(prev: &Node, node: &Node) -> bool {
    (is_declaration(node) && !prev.is(ConstructKind::Comment))
        || (is_declaration(prev) && !node.is_branch())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::read;

    fn convert(source: &str, from: Language, to: Language) -> String {
        write(&read(source, from), to, &RenderOptions::default())
    }

    #[test]
    fn test_python_function_to_javascript() {
        let out = convert(
            "def add(a, b):\n    return a + b\n",
            Language::Python,
            Language::JavaScript,
        );
        assert_eq!(out, "function add(a, b) {\n  return a + b;\n}\n");
    }

    #[test]
    fn test_javascript_to_python_if_chain() {
        let source = "if (x > 0 && ok) {\n  y = 1;\n} else if (x < 0) {\n  y = 2;\n} else {\n  y = 3;\n}\n";
        let out = convert(source, Language::JavaScript, Language::Python);
        assert_eq!(
            out,
            "if x > 0 and ok:\n    y = 1\nelif x < 0:\n    y = 2\nelse:\n    y = 3\n"
        );
    }

    #[test]
    fn test_empty_python_block_gets_pass() {
        let out = convert("while (true) {\n}\n", Language::Java, Language::Python);
        assert_eq!(out, "while True:\n    pass\n");
    }

    #[test]
    fn test_declarations_across_targets() {
        let source = "count = 0\nname = \"x\"\ncount += 1\n";
        assert_eq!(
            convert(source, Language::Python, Language::Java),
            "int count = 0;\nfinal String name = \"x\";\ncount += 1;\n"
        );
        assert_eq!(
            convert(source, Language::Python, Language::Rust),
            "let mut count = 0;\nlet name = \"x\";\ncount += 1;\n"
        );
        assert_eq!(
            convert(source, Language::Python, Language::Go),
            "count := 0\nname := \"x\"\ncount += 1\n"
        );
    }

    #[test]
    fn test_unknown_is_marked_or_raw() {
        let source = "try:\n    x = 1\nexcept ValueError:\n    pass\n";
        let program = read(source, Language::Python);
        let marked = write(&program, Language::JavaScript, &RenderOptions::default());
        assert_eq!(
            marked,
            "// untranslated: try:\nconst x = 1;\n// untranslated: except ValueError:\n"
        );
        let raw = write(
            &program,
            Language::Python,
            &RenderOptions {
                mark_untranslated: false,
            },
        );
        assert_eq!(raw, "try:\n    x = 1\nexcept ValueError:\n    pass\n");
    }

    #[test]
    fn test_comments_are_kept() {
        let out = convert("# total\nx = 1  # one\n", Language::Python, Language::Cpp);
        assert_eq!(out, "// total\nconst int x = 1;  // one\n");
    }

    #[test]
    fn test_prints() {
        let source = "print(\"Hello\", name)\nprint()\n";
        assert_eq!(
            convert(source, Language::Python, Language::Java),
            "System.out.println(\"Hello\" + \" \" + name);\nSystem.out.println();\n"
        );
        assert_eq!(
            convert(source, Language::Python, Language::Rust),
            "println!(\"Hello {name}\");\nprintln!();\n"
        );
        assert_eq!(
            convert(source, Language::Python, Language::Cpp),
            "std::cout << \"Hello\" << \" \" << name << std::endl;\nstd::cout << std::endl;\n"
        );
    }

    #[test]
    fn test_blank_lines_between_declarations() {
        let source = "def a():\n    return 1\ndef b():\n    return 2\nx = a()\n";
        let out = convert(source, Language::Python, Language::JavaScript);
        assert_eq!(
            out,
            "function a() {\n  return 1;\n}\n\nfunction b() {\n  return 2;\n}\n\nconst x = a();\n"
        );
    }

    #[test]
    fn test_empty_program() {
        assert_eq!(convert("", Language::Go, Language::Rust), "");
    }
}
