//! JavaScript rule table.

use crate::Language;
use crate::rules::{
    BlockStyle, CharLiterals, ClassStyle, ConstructKind as K, Declarations, Keywords,
    LanguageRules, Lexicon, ParamStyle, PatternSpec as P, PrintStyle, Templates, TerminatorPolicy,
};

pub static JAVASCRIPT: LanguageRules = LanguageRules {
    language: Language::JavaScript,
    block_style: BlockStyle::Braces,
    terminator: TerminatorPolicy::Optional,
    print_style: PrintStyle::Call,
    param_style: ParamStyle::Name,
    lexicon: Lexicon {
        line_comment: "//",
        block_comment: Some(("/*", "*/")),
        string_quotes: &['"', '\''],
        multiline_quotes: &[("`", true)],
        char_literals: CharLiterals::None,
    },
    keywords: Keywords {
        and: "&&",
        or: "||",
        not: "!",
        true_lit: "true",
        false_lit: "false",
        null_lit: "null",
        self_ref: Some("this"),
        self_member: ".",
        eq: "===",
        ne: "!==",
    },
    templates: Templates {
        if_: "if ($condition) {",
        elif: "} else if ($condition) {",
        else_: "} else {",
        while_: "while ($condition) {",
        for_each: "for (const $var of $iterable) {",
        for_range: "for (let $var = $start; $var $cmp $end; $update) {",
        return_value: "return $value;",
        return_bare: "return;",
        print: "console.log($args);",
        print_empty: "console.log();",
        print_join: ", ",
        assign: "$target $op $value;",
    },
    declarations: Declarations {
        function: "function $name($params) {",
        method: "$name($params) {",
        static_method: "static $name($params) {",
        constructor: "constructor($params) {",
        constructor_prologue: None,
        constructor_epilogue: None,
        returns: "",
        void_type: None,
        receiver_param: None,
        param_defaults: true,
        class_open: "class $name$extends {",
        extends: " extends $base",
        class_close: "}",
        member_label: None,
        impl_open: "",
        class_style: ClassStyle::Inline,
        var: "let $name = $value;",
        var_typed: "let $name = $value;",
        constant: "const $name = $value;",
        constant_typed: "const $name = $value;",
        declare: "let $name;",
        field: "$name;",
        field_value: "$name = $value;",
    },
    ignored: &["\"use strict\"", "'use strict'"],
    indent_unit: "  ",
    reserved: &[
        "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete",
        "do", "else", "export", "extends", "finally", "for", "function", "if", "import", "in",
        "instanceof", "let", "new", "return", "super", "switch", "this", "throw", "try", "typeof",
        "var", "void", "while", "with", "yield", "await",
    ],
    compound_keywords: &[],
    fallback_type: None,
    inferred_decl: Some("let"),
    constructor: Some("constructor"),
    branch_pattern: r"\b(?:if|for|while|case|catch)\b|&&|\|\||(?:^|[^?])\?(?:[^.?]|$)",
    patterns: &[
        P::new(K::Comment, r"^//\s?(?P<text>.*)$", &["text"]),
        P::new(
            K::ClassDecl,
            r"^(?:export\s+)?class\s+(?P<name>\w+)(?:\s+extends\s+(?P<base>[\w.]+))?\s*\{?$",
            &["name", "base"],
        ),
        P::new(
            K::FunctionDecl,
            r"^(?:export\s+)?(?:async\s+)?function\s*\*?\s*(?P<name>\w+)\s*\((?P<params>.*)\)\s*\{?$",
            &["name", "params"],
        ),
        P::new(
            K::FunctionDecl,
            r"^(?:export\s+)?(?:const|let|var)\s+(?P<name>\w+)\s*=\s*(?:async\s+)?(?:function\s*\w*\s*\((?P<fparams>.*)\)|\((?P<params>.*)\)\s*=>)\s*\{?$",
            &["name", "params", "fparams"],
        ),
        P::new(K::If, r"^if\s*\((?P<condition>.+)\)\s*\{?$", &["condition"]),
        P::new(K::If, r"^else\s+if\s*\((?P<condition>.+)\)\s*\{?$", &["condition"])
            .with_fixed(&[("branch", "elif")]),
        P::new(K::If, r"^else\s*\{?$", &[]).with_fixed(&[("branch", "else")]),
        P::new(
            K::For,
            r"^for\s*\(\s*(?:let|var)\s+(?P<var>\w+)\s*=\s*(?P<start>[^;]+?)\s*;\s*\w+\s*(?P<cmp><=?|>=?|!==?)\s*(?P<end>[^;]+?)\s*;\s*(?P<update>[^)]*?)\s*\)\s*\{?$",
            &["var", "start", "cmp", "end", "update"],
        ),
        P::new(
            K::For,
            r"^for\s*\(\s*(?:const|let|var)\s+(?P<var>[^;]+?)\s+(?:of|in)\s+(?P<iterable>.+)\)\s*\{?$",
            &["var", "iterable"],
        ),
        P::new(K::While, r"^while\s*\((?P<condition>.+)\)\s*\{?$", &["condition"]),
        P::new(
            K::FunctionDecl,
            r"^(?:(?P<static>static)\s+)?(?:async\s+)?(?P<name>[A-Za-z_$][\w$]*)\s*\((?P<params>[^()]*)\)\s*\{$",
            &["name", "params", "static"],
        ),
        P::new(K::Return, r"^return(?:\s+(?P<value>.+))?$", &["value"]),
        P::new(K::Print, r"^console\.log\((?P<args>.*)\)$", &["args"]),
        P::new(
            K::VarDecl,
            r"^const\s+(?P<name>[A-Za-z_$][\w$]*)\s*=\s*(?P<value>.+)$",
            &["name", "value"],
        )
        .with_fixed(&[("mutable", "false")]),
        P::new(
            K::VarDecl,
            r"^(?:let|var)\s+(?P<name>[A-Za-z_$][\w$]*)(?:\s*=\s*(?P<value>.+))?$",
            &["name", "value"],
        )
        .with_fixed(&[("mutable", "true")]),
        P::new(
            K::Assignment,
            r"^(?P<target>[\w$.\[\]]+)(?P<op>\+\+|--)$",
            &["target", "op"],
        ),
        P::new(
            K::Assignment,
            r#"^(?P<target>[\w$.\[\]'"]+?)\s*(?P<op>(?:\*\*|<<|>>|[+\-*/%&|^])?=)\s*(?P<value>[^=].*)$"#,
            &["target", "op", "value"],
        ),
    ],
};
