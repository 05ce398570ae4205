//! Rust rule table.

use crate::Language;
use crate::rules::{
    BlockStyle, CharLiterals, ClassStyle, ConstructKind as K, Declarations, Keywords,
    LanguageRules, Lexicon, ParamStyle, PatternSpec as P, PrintStyle, Templates, TerminatorPolicy,
};

pub static RUST: LanguageRules = LanguageRules {
    language: Language::Rust,
    block_style: BlockStyle::Braces,
    terminator: TerminatorPolicy::Required,
    print_style: PrintStyle::Macro,
    param_style: ParamStyle::NameColonType,
    lexicon: Lexicon {
        line_comment: "//",
        block_comment: Some(("/*", "*/")),
        string_quotes: &[],
        multiline_quotes: &[("\"", true)],
        char_literals: CharLiterals::Lifetimes,
    },
    keywords: Keywords {
        and: "&&",
        or: "||",
        not: "!",
        true_lit: "true",
        false_lit: "false",
        null_lit: "None",
        self_ref: Some("self"),
        self_member: ".",
        eq: "==",
        ne: "!=",
    },
    templates: Templates {
        if_: "if $condition {",
        elif: "} else if $condition {",
        else_: "} else {",
        while_: "while $condition {",
        for_each: "for $var in $iterable {",
        for_range: "for $var in $range_expr {",
        return_value: "return $value;",
        return_bare: "return;",
        print: "println!($format);",
        print_empty: "println!();",
        print_join: ", ",
        assign: "$target $op $value;",
    },
    declarations: Declarations {
        function: "fn $name($params)$returns {",
        method: "pub fn $name($params)$returns {",
        static_method: "pub fn $name($params)$returns {",
        constructor: "pub fn new($params) -> Self {",
        constructor_prologue: Some("let mut $receiver = Self::default();"),
        constructor_epilogue: Some("$receiver"),
        returns: " -> $type",
        void_type: None,
        receiver_param: Some(("&self", "&mut self")),
        param_defaults: false,
        class_open: "#[derive(Debug, Default)]\npub struct $name {",
        extends: "",
        class_close: "}",
        member_label: None,
        impl_open: "impl $name {",
        class_style: ClassStyle::ImplBlock,
        var: "let mut $name = $value;",
        var_typed: "let mut $name: $type = $value;",
        constant: "let $name = $value;",
        constant_typed: "let $name: $type = $value;",
        declare: "let mut $name: $type;",
        field: "pub $name: $type,",
        field_value: "pub $name: $type,",
    },
    ignored: &[],
    indent_unit: "    ",
    reserved: &[
        "as", "break", "const", "continue", "crate", "else", "enum", "extern", "fn", "for", "if",
        "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub", "ref", "return",
        "static", "struct", "trait", "type", "unsafe", "use", "where", "while",
    ],
    compound_keywords: &[],
    fallback_type: Some("i64"),
    inferred_decl: Some("let"),
    constructor: Some("new"),
    branch_pattern: r"\b(?:if|for|while|loop)\b|&&|\|\||=>",
    patterns: &[
        P::new(K::Comment, r"^//[/!]?\s?(?P<text>.*)$", &["text"]),
        P::new(
            K::ClassDecl,
            r"^(?:pub(?:\([^)]*\))?\s+)?struct\s+(?P<name>\w+)(?:<[^>]*>)?\s*\{?$",
            &["name"],
        ),
        P::new(
            K::ClassDecl,
            r"^impl(?:<[^>]*>)?\s+(?:(?P<trait>[\w:]+(?:<[^>]*>)?)\s+for\s+)?(?P<name>\w+)(?:<[^>]*>)?\s*\{?$",
            &["name", "trait"],
        )
        .with_fixed(&[("impl", "true")]),
        P::new(
            K::FunctionDecl,
            r"^(?:pub(?:\([^)]*\))?\s+)?(?:const\s+)?(?:async\s+)?(?:unsafe\s+)?fn\s+(?P<name>\w+)(?:<[^>]*>)?\s*\((?P<params>.*)\)\s*(?:->\s*(?P<returns>[^{]+?))?\s*(?:where\s+[^{]+?)?\s*\{?$",
            &["name", "params", "returns"],
        ),
        P::new(K::If, r"^if\s+(?P<condition>.+?)\s*\{?$", &["condition"]),
        P::new(K::If, r"^else\s+if\s+(?P<condition>.+?)\s*\{?$", &["condition"])
            .with_fixed(&[("branch", "elif")]),
        P::new(K::If, r"^else\s*\{?$", &[]).with_fixed(&[("branch", "else")]),
        P::new(
            K::For,
            r"^for\s+(?P<var>\w+)\s+in\s+\(?(?P<start>[^.\s]+?)\.\.(?P<cmp>=?)(?P<end>[^{]+?)\)?(?:\.step_by\((?P<step>[^)]+)\))?\s*\{?$",
            &["var", "start", "cmp", "end", "step"],
        ),
        P::new(
            K::For,
            r"^for\s+(?P<var>.+?)\s+in\s+(?P<iterable>.+?)\s*\{?$",
            &["var", "iterable"],
        ),
        P::new(K::While, r"^while\s+(?P<condition>.+?)\s*\{?$", &["condition"]),
        P::new(K::While, r"^loop\s*\{?$", &[]).with_fixed(&[("condition", "true")]),
        P::new(K::Return, r"^return(?:\s+(?P<value>.+))?$", &["value"]),
        P::new(
            K::Print,
            r"^print(?P<newline>ln)?!\((?P<args>.*)\)$",
            &["args", "newline"],
        ),
        P::new(
            K::VarDecl,
            r"^let\s+mut\s+(?P<name>\w+)(?:\s*:\s*(?P<type>[^=]+?))?(?:\s*=\s*(?P<value>.+))?$",
            &["name", "type", "value"],
        )
        .with_fixed(&[("mutable", "true")]),
        P::new(
            K::VarDecl,
            r"^let\s+(?P<name>\w+)(?:\s*:\s*(?P<type>[^=]+?))?(?:\s*=\s*(?P<value>.+))?$",
            &["name", "type", "value"],
        )
        .with_fixed(&[("mutable", "false")]),
        P::new(
            K::VarDecl,
            r"^(?:pub(?:\([^)]*\))?\s+)?(?:const|static)\s+(?P<name>\w+)\s*:\s*(?P<type>[^=]+?)\s*=\s*(?P<value>.+)$",
            &["name", "type", "value"],
        )
        .with_fixed(&[("mutable", "false")]),
        P::new(
            K::Assignment,
            r"^(?P<target>[\w.\[\]*]+?)\s*(?P<op>(?:<<|>>|[+\-*/%&|^])?=)\s*(?P<value>[^=].*)$",
            &["target", "op", "value"],
        ),
        P::new(
            K::VarDecl,
            r"^(?:pub(?:\([^)]*\))?\s+)?(?P<name>[a-z_]\w*)\s*:\s*(?P<type>[^=:][^=]*?),?$",
            &["name", "type"],
        )
        .with_fixed(&[("mutable", "true"), ("field", "true")]),
    ],
};
