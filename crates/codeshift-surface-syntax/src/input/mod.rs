//! Input reader - parse source code into IR.
//!
//! One reader serves every language. It scans the source, groups physical
//! lines into logical lines, classifies each with the language's construct
//! patterns and nests the results by braces or indentation.

mod lines;
mod normalize;

pub use lines::{LogicalLine, logical_lines};

use crate::ir::{LANGUAGE, Node, RAW};
use crate::traits::Reader;
use codeshift_languages::{
    BlockStyle, ConstructKind, Language, LanguageRules, LineRange, rules_for, scan,
};

/// Reader driven by a language's rule table.
#[derive(Debug, Clone, Copy)]
pub struct TableReader {
    language: Language,
}

impl TableReader {
    pub const fn new(language: Language) -> Self {
        Self { language }
    }
}

impl Reader for TableReader {
    fn language(&self) -> Language {
        self.language
    }

    fn read(&self, source: &str) -> Node {
        read(source, self.language)
    }
}

/// Parse `source` written in `language` into a `Program` node.
pub fn read(source: &str, language: Language) -> Node {
    let rules = rules_for(language);
    let scanned = scan(source, &rules.lexicon);
    let lines = logical_lines(&scanned, rules);
    let mut program = match rules.block_style {
        BlockStyle::Braces => nest_braces(&lines, rules),
        BlockStyle::Indent => nest_indent(&lines, rules),
    };
    normalize::normalize(&mut program, rules);
    program.set(LANGUAGE, language.as_str());
    if !scanned.lines.is_empty() {
        program.lines = LineRange::new(1, scanned.lines.len());
    }
    tracing::debug!(
        language = %language,
        lines = scanned.lines.len(),
        logical = lines.len(),
        nodes = program.children.len(),
        "read source"
    );
    program
}

/// Kinds whose block holds children.
fn opens_children(kind: ConstructKind) -> bool {
    matches!(
        kind,
        ConstructKind::FunctionDecl
            | ConstructKind::ClassDecl
            | ConstructKind::If
            | ConstructKind::For
            | ConstructKind::While
            | ConstructKind::Unknown
    )
}

/// Raw text of a line, without the block closers that precede it.
fn raw_text(line: &LogicalLine, rules: &LanguageRules) -> String {
    if rules.uses_braces() {
        line.raw.trim_start_matches(['}', ' ', '\t']).to_string()
    } else {
        line.raw.clone()
    }
}

/// Build the node for one logical line; `None` for lines that carry nothing.
fn node_for(line: &LogicalLine, statement: &str, rules: &LanguageRules) -> Option<Node> {
    if line.is_comment() {
        let text = line.comment.clone().unwrap_or_default();
        return Some(Node::comment(text, line.lines));
    }
    if statement.is_empty() || rules.ignored.contains(&statement) {
        return None;
    }
    let Some(matched) = rules.classify(statement) else {
        tracing::trace!(line = line.lines.start, statement, "unrecognised");
        return Some(Node::unknown(raw_text(line, rules), line.lines));
    };
    tracing::trace!(line = line.lines.start, kind = matched.kind.as_str(), "classified");
    let mut node = Node::new(matched.kind, line.lines);
    for (key, value) in matched.attributes {
        node.set(key, value);
    }
    if let Some(comment) = &line.comment {
        node.set("trailing_comment", comment.as_str());
    }
    Some(node)
}

/// A node that opens a block but cannot hold children keeps its text.
fn block_node(node: Node, line: &LogicalLine, rules: &LanguageRules) -> Node {
    if opens_children(node.kind) {
        node
    } else {
        Node::unknown(raw_text(line, rules), line.lines)
    }
}

/// A statement and its masked twin, aligned char for char.
struct Aligned<'a> {
    text: &'a str,
    masked: Vec<char>,
    offsets: Vec<usize>,
}

impl<'a> Aligned<'a> {
    fn new(text: &'a str, masked: &str) -> Option<Self> {
        let masked: Vec<char> = masked.chars().collect();
        let mut offsets: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        if offsets.len() != masked.len() {
            return None;
        }
        offsets.push(text.len());
        Some(Self {
            text,
            masked,
            offsets,
        })
    }

    fn len(&self) -> usize {
        self.masked.len()
    }

    fn text(&self, start: usize, end: usize) -> &'a str {
        &self.text[self.offsets[start]..self.offsets[end]]
    }

    fn masked(&self, start: usize, end: usize) -> String {
        self.masked[start..end].iter().collect()
    }
}

/// Char offset of the `{` opening a block that closes at the very end.
fn trailing_brace_block(masked: &[char]) -> Option<usize> {
    if masked.last() != Some(&'}') {
        return None;
    }
    let mut parens = 0usize;
    let open = masked.iter().position(|&c| {
        match c {
            '(' | '[' => parens += 1,
            ')' | ']' => parens = parens.saturating_sub(1),
            _ => {}
        }
        c == '{' && parens == 0
    })?;
    let mut depth = 0usize;
    for (i, &c) in masked.iter().enumerate().skip(open) {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return (i + 1 == masked.len()).then_some(open);
                }
            }
            _ => {}
        }
    }
    None
}

/// Char offset of the first top-level `:` that has code after it.
fn header_colon(masked: &[char]) -> Option<usize> {
    let mut depth = 0usize;
    for (i, &c) in masked.iter().enumerate() {
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            ':' if depth == 0 => {
                let rest = &masked[i + 1..];
                return rest.iter().any(|c| !c.is_whitespace()).then_some(i);
            }
            _ => {}
        }
    }
    None
}

/// Char ranges between top-level `;` separators.
fn split_statements(masked: &[char]) -> Vec<(usize, usize)> {
    let mut pieces = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, &c) in masked.iter().enumerate() {
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            ';' if depth == 0 => {
                pieces.push((start, i));
                start = i + 1;
            }
            _ => {}
        }
    }
    pieces.push((start, masked.len()));
    pieces
}

/// Header and body of a block written on one line: `header { body }` or
/// `header: body`. Only constructs that hold children qualify.
fn split_inline(
    text: &str,
    masked: &str,
    lines: LineRange,
    rules: &LanguageRules,
) -> Option<Node> {
    let aligned = Aligned::new(text, masked)?;
    let (header, body) = match rules.block_style {
        BlockStyle::Braces => {
            let open = trailing_brace_block(&aligned.masked)?;
            let header = format!("{} {{", aligned.text(0, open).trim_end());
            (header, (open + 1, aligned.len() - 1))
        }
        BlockStyle::Indent => {
            let colon = header_colon(&aligned.masked)?;
            (aligned.text(0, colon + 1).to_string(), (colon + 1, aligned.len()))
        }
    };
    let matched = rules.classify(&header)?;
    if !opens_children(matched.kind) || matched.kind == ConstructKind::Unknown {
        return None;
    }
    let mut node = Node::new(matched.kind, lines);
    for (key, value) in matched.attributes {
        node.set(key, value);
    }
    let (start, end) = body;
    node.children = split_statements(&aligned.masked[start..end])
        .into_iter()
        .filter_map(|(s, e)| {
            let (s, e) = (start + s, start + e);
            inline_statement(aligned.text(s, e), &aligned.masked(s, e), lines, rules)
        })
        .collect();
    Some(node)
}

/// One statement of a one-line body, possibly itself a one-line block.
fn inline_statement(
    text: &str,
    masked: &str,
    lines: LineRange,
    rules: &LanguageRules,
) -> Option<Node> {
    let text = rules.statement_text(text);
    let masked = rules.statement_text(masked);
    if text.is_empty() || rules.ignored.contains(&text) {
        return None;
    }
    if let Some(node) = split_inline(text, masked, lines, rules) {
        return Some(node);
    }
    let Some(matched) = rules.classify(text) else {
        return Some(Node::unknown(text, lines));
    };
    let mut node = Node::new(matched.kind, lines);
    for (key, value) in matched.attributes {
        node.set(key, value);
    }
    Some(node)
}

/// A block construct whose body shares its header's line.
fn inline_block(
    line: &LogicalLine,
    statement: &str,
    masked: &str,
    rules: &LanguageRules,
) -> Option<Node> {
    let mut node = split_inline(statement, masked, line.lines, rules)?;
    tracing::trace!(line = line.lines.start, kind = node.kind.as_str(), "one-line block");
    if let Some(comment) = &line.comment {
        node.set("trailing_comment", comment.as_str());
    }
    Some(node)
}

/// Pop the innermost open block into its parent.
fn close_block(stack: &mut Vec<Node>, end: usize) {
    if stack.len() < 2 {
        return;
    }
    let Some(mut node) = stack.pop() else { return };
    node.lines.extend_to(LineRange::line(end));
    if let Some(last) = node.children.last() {
        let last = last.lines;
        node.lines.extend_to(last);
    }
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    }
}

fn append(stack: &mut [Node], node: Node) {
    if let Some(top) = stack.last_mut() {
        top.children.push(node);
    }
}

fn nest_braces(lines: &[LogicalLine], rules: &LanguageRules) -> Node {
    let mut stack = vec![Node::program()];
    let mut iter = lines.iter().peekable();
    while let Some(line) = iter.next() {
        if line.is_comment() {
            if let Some(node) = node_for(line, "", rules) {
                append(&mut stack, node);
            }
            continue;
        }
        let closers = line
            .masked
            .chars()
            .take_while(|c| *c == '}' || c.is_whitespace())
            .filter(|c| *c == '}')
            .count();
        for _ in 0..closers {
            close_block(&mut stack, line.lines.start);
        }

        let statement = rules.statement_text(&line.code);
        let masked = rules.statement_text(&line.masked);
        if statement.is_empty() {
            if let Some(comment) = &line.comment {
                append(&mut stack, Node::comment(comment.as_str(), line.lines));
            }
            continue;
        }

        // `} while (cond);` ends a do-while; it is not a loop of its own
        if closers > 0
            && line.masked.trim_end().ends_with(';')
            && rules
                .classify(statement)
                .is_some_and(|m| m.kind == ConstructKind::While)
        {
            append(&mut stack, Node::unknown(raw_text(line, rules), line.lines));
            continue;
        }

        if let Some(node) = inline_block(line, statement, masked, rules) {
            append(&mut stack, node);
            continue;
        }

        // Allman style: the header's `{` sits alone on the next line
        let allman = !masked.ends_with('{')
            && iter.peek().is_some_and(|next| next.code.trim() == "{");
        if allman {
            iter.next();
            let header = format!("{statement} {{");
            let Some(mut node) = node_for(line, &header, rules) else {
                continue;
            };
            if node.is(ConstructKind::Unknown) {
                node.set(RAW, format!("{} {{", raw_text(line, rules)));
            }
            stack.push(block_node(node, line, rules));
            continue;
        }

        let Some(node) = node_for(line, statement, rules) else {
            continue;
        };
        if masked.ends_with('{') {
            stack.push(block_node(node, line, rules));
        } else {
            append(&mut stack, node);
        }
    }
    let end = lines.last().map_or(0, |l| l.lines.end);
    while stack.len() > 1 {
        close_block(&mut stack, end);
    }
    stack.pop().unwrap_or_else(Node::program)
}

fn nest_indent(lines: &[LogicalLine], rules: &LanguageRules) -> Node {
    let mut stack = vec![Node::program()];
    let mut indents: Vec<usize> = vec![0];
    for line in lines {
        while stack.len() > 1 && indents.last().is_some_and(|&top| top >= line.indent) {
            close_block(&mut stack, line.lines.start.saturating_sub(1));
            indents.pop();
        }
        let statement = line.code.trim();
        if !line.is_comment()
            && let Some(node) = inline_block(line, statement, line.masked.trim(), rules)
        {
            append(&mut stack, node);
            continue;
        }
        let Some(node) = node_for(line, statement, rules) else {
            continue;
        };
        let opens = !line.is_comment() && line.masked.ends_with(':');
        if opens {
            stack.push(block_node(node, line, rules));
            indents.push(line.indent);
        } else {
            append(&mut stack, node);
        }
    }
    let end = lines.last().map_or(0, |l| l.lines.end);
    while stack.len() > 1 {
        close_block(&mut stack, end);
    }
    stack.pop().unwrap_or_else(Node::program)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(node: &Node) -> Vec<ConstructKind> {
        node.children.iter().map(|c| c.kind).collect()
    }

    #[test]
    fn test_python_function() {
        let program = read("def add(a, b):\n    return a + b\n", Language::Python);
        assert_eq!(program.attr(LANGUAGE), Some("python"));
        assert_eq!(kinds(&program), vec![ConstructKind::FunctionDecl]);
        let func = &program.children[0];
        assert_eq!(func.attr("name"), Some("add"));
        assert_eq!(func.lines, LineRange::new(1, 2));
        assert_eq!(kinds(func), vec![ConstructKind::Return]);
        assert_eq!(func.children[0].attr("value"), Some("a + b"));
    }

    #[test]
    fn test_brace_nesting_and_branches() {
        let source = "if (x > 0) {\n    y = 1;\n} else if (x < 0) {\n    y = 2;\n} else {\n    y = 3;\n}\n";
        let program = read(source, Language::Java);
        assert_eq!(
            kinds(&program),
            vec![ConstructKind::If, ConstructKind::If, ConstructKind::If]
        );
        assert_eq!(program.children[1].attr("branch"), Some("elif"));
        assert_eq!(program.children[2].attr("branch"), Some("else"));
        assert_eq!(kinds(&program.children[2]), vec![ConstructKind::Assignment]);
        assert_eq!(program.children[0].lines, LineRange::new(1, 3));
    }

    #[test]
    fn test_allman_braces() {
        let source = "int main()\n{\n    return 0;\n}\n";
        let program = read(source, Language::Cpp);
        assert_eq!(kinds(&program), vec![ConstructKind::FunctionDecl]);
        let main = &program.children[0];
        assert_eq!(main.attr("name"), Some("main"));
        assert_eq!(main.attr("returns"), Some("int"));
        assert_eq!(kinds(main), vec![ConstructKind::Return]);
        assert_eq!(main.lines, LineRange::new(1, 4));
    }

    #[test]
    fn test_unknown_keeps_raw_text_and_children() {
        let source = "try {\n    x = 1;\n} catch (Exception e) {\n}\n";
        let program = read(source, Language::Java);
        assert_eq!(program.children.len(), 2);
        let try_block = &program.children[0];
        assert_eq!(try_block.kind, ConstructKind::Unknown);
        assert_eq!(try_block.attr(RAW), Some("try {"));
        assert_eq!(kinds(try_block), vec![ConstructKind::Assignment]);
        assert_eq!(program.children[1].attr(RAW), Some("catch (Exception e) {"));
    }

    #[test]
    fn test_python_declarations_are_inferred() {
        let source = "x = 1\ny = 2\ny = 3\nx += 1\n";
        let program = read(source, Language::Python);
        assert_eq!(
            kinds(&program),
            vec![
                ConstructKind::VarDecl,
                ConstructKind::VarDecl,
                ConstructKind::Assignment,
                ConstructKind::Assignment
            ]
        );
        assert_eq!(program.children[0].attr("mutable"), Some("true"));
        let program = read("limit = 10\n", Language::Python);
        assert_eq!(program.children[0].attr("mutable"), Some("false"));
    }

    #[test]
    fn test_python_methods() {
        let source = "class Dog(Animal):\n    def __init__(self, name):\n        self.name = name\n\n    @staticmethod\n    def create():\n        pass\n";
        let program = read(source, Language::Python);
        let class = &program.children[0];
        assert_eq!(class.attr("base"), Some("Animal"));
        assert_eq!(class.children.len(), 2);
        let init = &class.children[0];
        assert!(init.flag("constructor"));
        assert_eq!(init.attr("params"), Some("name"));
        assert!(class.children[1].flag("static"));
        assert!(class.children[1].children.is_empty());
    }

    #[test]
    fn test_go_methods_join_their_struct() {
        let source = "type Dog struct {\n\tName string\n}\n\nfunc (d *Dog) Speak() string {\n\treturn d.Name\n}\n";
        let program = read(source, Language::Go);
        assert_eq!(program.children.len(), 1);
        let class = &program.children[0];
        assert_eq!(kinds(class), vec![ConstructKind::VarDecl, ConstructKind::FunctionDecl]);
        assert!(class.children[0].flag("field"));
        assert_eq!(class.children[1].attr("receiver"), Some("d"));
        assert_eq!(class.children[1].attr("owner"), None);
    }

    #[test]
    fn test_rust_impl_merges_into_struct() {
        let source = "struct Counter {\n    count: i64,\n}\n\nimpl Counter {\n    fn new() -> Self {\n        Counter { count: 0 }\n    }\n\n    fn bump(&mut self) {\n        self.count += 1;\n    }\n}\n";
        let program = read(source, Language::Rust);
        assert_eq!(program.children.len(), 1);
        let class = &program.children[0];
        assert_eq!(class.attr("impl"), None);
        assert_eq!(
            kinds(class),
            vec![
                ConstructKind::VarDecl,
                ConstructKind::FunctionDecl,
                ConstructKind::FunctionDecl
            ]
        );
        assert!(class.children[1].flag("constructor"));
        assert_eq!(class.children[2].attr("params"), None);
        assert!(!class.children[2].flag("static"));
    }

    #[test]
    fn test_loops_are_normalized() {
        let program = read("for i in range(10):\n    print(i)\n", Language::Python);
        let for_node = &program.children[0];
        assert_eq!(for_node.attr("start"), Some("0"));
        assert_eq!(for_node.attr("end"), Some("10"));
        assert_eq!(for_node.attr("cmp"), Some("<"));

        let program = read("for (int i = 10; i > 0; i--) {\n}\n", Language::Java);
        let for_node = &program.children[0];
        assert_eq!(for_node.attr("step"), Some("-1"));
        assert_eq!(for_node.attr("update"), None);

        let program = read("for i in 0..=n {\n}\n", Language::Rust);
        assert_eq!(program.children[0].attr("cmp"), Some("<="));
    }

    #[test]
    fn test_prints_are_normalized() {
        let program = read("std::cout << \"Hi\" << x << std::endl;\n", Language::Cpp);
        assert_eq!(program.children[0].attr("args"), Some("\"Hi\", x"));
        let program = read("println!(\"{} {}\", a, b);\n", Language::Rust);
        assert_eq!(program.children[0].attr("args"), Some("a, b"));
    }

    #[test]
    fn test_comments_and_trailing_comments() {
        let program = read("# note\nx = 1  # one\n", Language::Python);
        assert_eq!(kinds(&program), vec![ConstructKind::Comment, ConstructKind::VarDecl]);
        assert_eq!(program.children[0].attr("text"), Some("note"));
        assert_eq!(program.children[1].attr("trailing_comment"), Some("one"));
    }

    #[test]
    fn test_empty_class_body() {
        let program = read("class Empty {}\nint x = 1;\n", Language::Java);
        assert_eq!(kinds(&program), vec![ConstructKind::ClassDecl, ConstructKind::VarDecl]);
        assert!(program.children[0].children.is_empty());
    }

    #[test]
    fn test_one_line_blocks() {
        let cases = [
            (Language::Cpp, "int g() { return 1; }\n"),
            (Language::Java, "int g() { return 1; }\n"),
            (Language::JavaScript, "function g() { return 1; }\n"),
            (Language::Go, "func g() int { return 1 }\n"),
            (Language::Python, "def g(): return 1\n"),
        ];
        for (language, source) in cases {
            let program = read(source, language);
            assert_eq!(kinds(&program), vec![ConstructKind::FunctionDecl], "{language}");
            let func = &program.children[0];
            assert_eq!(func.attr("name"), Some("g"), "{language}");
            assert_eq!(kinds(func), vec![ConstructKind::Return], "{language}");
            assert_eq!(func.children[0].attr("value"), Some("1"), "{language}");
            assert_eq!(func.lines, LineRange::line(1));
        }

        let program = read("fn g() -> i32 { 1 }\n", Language::Rust);
        assert_eq!(kinds(&program), vec![ConstructKind::FunctionDecl]);
        assert_eq!(program.children[0].attr("returns"), Some("i32"));
    }

    #[test]
    fn test_one_line_body_with_several_statements() {
        let source = "if (x > 0) { y = 1; if (y) { z(); } }\n";
        let program = read(source, Language::Java);
        let if_node = &program.children[0];
        assert_eq!(if_node.kind, ConstructKind::If);
        assert_eq!(
            kinds(if_node),
            vec![ConstructKind::Assignment, ConstructKind::If]
        );
        assert_eq!(if_node.children[1].children.len(), 1);

        let program = read("class Box:\n    def get(self): return self.v\n", Language::Python);
        let class = &program.children[0];
        assert_eq!(kinds(class), vec![ConstructKind::FunctionDecl]);
        assert_eq!(kinds(&class.children[0]), vec![ConstructKind::Return]);

        let program = read("x: int = 5\nd = {'a': 1}\n", Language::Python);
        assert!(!program.any_descendant(&|n| n.is(ConstructKind::Unknown)));
    }

    #[test]
    fn test_do_while_tail_is_not_a_loop() {
        let source = "void f() {\n    do {\n        x++;\n    } while (x < 3);\n}\n";
        let program = read(source, Language::Java);
        assert_eq!(program.count(ConstructKind::While), 0);
        let func = &program.children[0];
        assert_eq!(kinds(func), vec![ConstructKind::Unknown, ConstructKind::Unknown]);
        assert_eq!(func.children[1].attr(RAW), Some("while (x < 3);"));
        assert_eq!(program.unknown_lines(), vec![LineRange::new(2, 4)]);

        let program = read("while (x < 3) {\n    x++;\n}\n", Language::Java);
        assert_eq!(program.count(ConstructKind::While), 1);
    }

    #[test]
    fn test_empty_source() {
        let program = read("", Language::Go);
        assert!(program.children.is_empty());
    }
}
