//! Python rule table.

use crate::Language;
use crate::rules::{
    BlockStyle, CharLiterals, ClassStyle, ConstructKind as K, Declarations, Keywords,
    LanguageRules, Lexicon, ParamStyle, PatternSpec as P, PrintStyle, Templates, TerminatorPolicy,
};

pub static PYTHON: LanguageRules = LanguageRules {
    language: Language::Python,
    block_style: BlockStyle::Indent,
    terminator: TerminatorPolicy::None,
    print_style: PrintStyle::Call,
    param_style: ParamStyle::NameColonType,
    lexicon: Lexicon {
        line_comment: "#",
        block_comment: None,
        string_quotes: &['"', '\''],
        multiline_quotes: &[("\"\"\"", true), ("'''", true)],
        char_literals: CharLiterals::None,
    },
    keywords: Keywords {
        and: "and",
        or: "or",
        not: "not",
        true_lit: "True",
        false_lit: "False",
        null_lit: "None",
        self_ref: Some("self"),
        self_member: ".",
        eq: "==",
        ne: "!=",
    },
    templates: Templates {
        if_: "if $condition:",
        elif: "elif $condition:",
        else_: "else:",
        while_: "while $condition:",
        for_each: "for $var in $iterable:",
        for_range: "for $var in range($range_args):",
        return_value: "return $value",
        return_bare: "return",
        print: "print($args)",
        print_empty: "print()",
        print_join: ", ",
        assign: "$target $op $value",
    },
    declarations: Declarations {
        function: "def $name($params)$returns:",
        method: "def $name($params)$returns:",
        static_method: "@staticmethod\ndef $name($params)$returns:",
        constructor: "def __init__($params):",
        constructor_prologue: None,
        constructor_epilogue: None,
        returns: " -> $type",
        void_type: None,
        receiver_param: Some(("self", "self")),
        param_defaults: true,
        class_open: "class $name$extends:",
        extends: "($base)",
        class_close: "",
        member_label: None,
        impl_open: "",
        class_style: ClassStyle::Inline,
        var: "$name = $value",
        var_typed: "$name = $value",
        constant: "$name = $value",
        constant_typed: "$name = $value",
        declare: "$name = None",
        field: "$name = None",
        field_value: "$name = $value",
    },
    ignored: &["pass"],
    indent_unit: "    ",
    reserved: &[
        "and", "as", "assert", "async", "await", "break", "class", "continue", "def", "del",
        "elif", "else", "except", "finally", "for", "from", "global", "if", "import", "in", "is",
        "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try", "while", "with",
        "yield",
    ],
    compound_keywords: &[
        "if", "elif", "else", "for", "while", "def", "class", "try", "except", "finally", "with",
    ],
    fallback_type: None,
    inferred_decl: None,
    constructor: Some("__init__"),
    branch_pattern: r"\b(?:if|elif|for|while|except|and|or|case)\b",
    patterns: &[
        P::new(K::Comment, r"^#\s?(?P<text>.*)$", &["text"]),
        P::new(
            K::ClassDecl,
            r"^class\s+(?P<name>\w+)\s*(?:\((?P<base>[^)]*)\))?\s*:$",
            &["name", "base"],
        ),
        P::new(
            K::FunctionDecl,
            r"^(?:async\s+)?def\s+(?P<name>\w+)\s*\((?P<params>.*)\)\s*(?:->\s*(?P<returns>.+?))?\s*:$",
            &["name", "params", "returns"],
        ),
        P::new(K::If, r"^if\s+(?P<condition>.+?)\s*:$", &["condition"]),
        P::new(K::If, r"^elif\s+(?P<condition>.+?)\s*:$", &["condition"])
            .with_fixed(&[("branch", "elif")]),
        P::new(K::If, r"^else\s*:$", &[]).with_fixed(&[("branch", "else")]),
        P::new(
            K::For,
            r"^for\s+(?P<var>\w+)\s+in\s+range\((?P<range>.*)\)\s*:$",
            &["var", "range"],
        ),
        P::new(
            K::For,
            r"^for\s+(?P<var>.+?)\s+in\s+(?P<iterable>.+?)\s*:$",
            &["var", "iterable"],
        ),
        P::new(K::While, r"^while\s+(?P<condition>.+?)\s*:$", &["condition"]),
        P::new(K::Return, r"^return(?:\s+(?P<value>.+))?$", &["value"]),
        P::new(K::Print, r"^print\((?P<args>.*)\)$", &["args"]),
        P::new(
            K::VarDecl,
            r"^(?P<name>[A-Za-z_]\w*)\s*:\s*(?P<type>[\w\[\], .|]+?)\s*=\s*(?P<value>.+)$",
            &["name", "type", "value"],
        )
        .with_fixed(&[("mutable", "true")]),
        P::new(
            K::Assignment,
            r#"^(?P<target>[\w.\[\]'"]+?)\s*(?P<op>(?://|\*\*|[+\-*/%&|^])?=)\s*(?P<value>[^=].*)$"#,
            &["target", "op", "value"],
        ),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    fn kind_of(line: &str) -> Option<K> {
        PYTHON.classify(line).map(|m| m.kind)
    }

    #[test]
    fn test_headers() {
        let m = PYTHON.classify("def add(a, b):").unwrap();
        assert_eq!(m.kind, K::FunctionDecl);
        assert_eq!(m.get("name"), Some("add"));
        assert_eq!(m.get("params"), Some("a, b"));

        let m = PYTHON.classify("class Dog(Animal):").unwrap();
        assert_eq!(m.kind, K::ClassDecl);
        assert_eq!(m.get("base"), Some("Animal"));
    }

    #[test]
    fn test_branches() {
        let m = PYTHON.classify("elif x > 1:").unwrap();
        assert_eq!(m.get("branch"), Some("elif"));
        assert_eq!(m.get("condition"), Some("x > 1"));
        assert_eq!(PYTHON.classify("else:").unwrap().get("branch"), Some("else"));
    }

    #[test]
    fn test_loops() {
        let m = PYTHON.classify("for i in range(0, 10):").unwrap();
        assert_eq!(m.kind, K::For);
        assert_eq!(m.get("range"), Some("0, 10"));
        let m = PYTHON.classify("for item in items:").unwrap();
        assert_eq!(m.get("iterable"), Some("items"));
        assert_eq!(kind_of("while n > 0:"), Some(K::While));
    }

    #[test]
    fn test_statements() {
        assert_eq!(kind_of("return a + b"), Some(K::Return));
        assert_eq!(kind_of("return"), Some(K::Return));
        assert_eq!(kind_of("print(\"hi\")"), Some(K::Print));
        let m = PYTHON.classify("total += x").unwrap();
        assert_eq!(m.kind, K::Assignment);
        assert_eq!(m.get("op"), Some("+="));
        assert_eq!(kind_of("count: int = 0"), Some(K::VarDecl));
    }

    #[test]
    fn test_comparisons_are_not_assignments() {
        assert_eq!(kind_of("x == 1"), None);
        assert_eq!(kind_of("foo(a=1)"), None);
    }
}
