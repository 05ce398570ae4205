//! Go rule table.

use crate::Language;
use crate::rules::{
    BlockStyle, CharLiterals, ClassStyle, ConstructKind as K, Declarations, Keywords,
    LanguageRules, Lexicon, ParamStyle, PatternSpec as P, PrintStyle, Templates, TerminatorPolicy,
};

pub static GO: LanguageRules = LanguageRules {
    language: Language::Go,
    block_style: BlockStyle::Braces,
    terminator: TerminatorPolicy::None,
    print_style: PrintStyle::Call,
    param_style: ParamStyle::NameType,
    lexicon: Lexicon {
        line_comment: "//",
        block_comment: Some(("/*", "*/")),
        string_quotes: &['"'],
        multiline_quotes: &[("`", false)],
        char_literals: CharLiterals::Plain,
    },
    keywords: Keywords {
        and: "&&",
        or: "||",
        not: "!",
        true_lit: "true",
        false_lit: "false",
        null_lit: "nil",
        self_ref: None,
        self_member: ".",
        eq: "==",
        ne: "!=",
    },
    templates: Templates {
        if_: "if $condition {",
        elif: "} else if $condition {",
        else_: "} else {",
        while_: "for $condition {",
        for_each: "for _, $var := range $iterable {",
        for_range: "for $var := $start; $var $cmp $end; $update {",
        return_value: "return $value",
        return_bare: "return",
        print: "fmt.Println($args)",
        print_empty: "fmt.Println()",
        print_join: ", ",
        assign: "$target $op $value",
    },
    declarations: Declarations {
        function: "func $name($params)$returns {",
        method: "func ($receiver *$class) $name($params)$returns {",
        static_method: "func $name($params)$returns {",
        constructor: "func New$class($params) *$class {",
        constructor_prologue: Some("$receiver := &$class{}"),
        constructor_epilogue: Some("return $receiver"),
        returns: " $type",
        void_type: None,
        receiver_param: None,
        param_defaults: false,
        class_open: "type $name struct {",
        extends: "",
        class_close: "}",
        member_label: None,
        impl_open: "",
        class_style: ClassStyle::Receivers,
        var: "$name := $value",
        var_typed: "var $name $type = $value",
        constant: "$name := $value",
        constant_typed: "var $name $type = $value",
        declare: "var $name $type",
        field: "$name $type",
        field_value: "$name $type",
    },
    ignored: &[],
    indent_unit: "\t",
    reserved: &[
        "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough",
        "for", "func", "go", "goto", "if", "import", "interface", "map", "package", "range",
        "return", "select", "struct", "switch", "type", "var",
    ],
    compound_keywords: &[],
    fallback_type: Some("any"),
    inferred_decl: None,
    constructor: None,
    branch_pattern: r"\b(?:if|for|case)\b|&&|\|\|",
    patterns: &[
        P::new(K::Comment, r"^//\s?(?P<text>.*)$", &["text"]),
        P::new(
            K::ClassDecl,
            r"^type\s+(?P<name>\w+)\s+struct\s*\{?$",
            &["name"],
        ),
        P::new(
            K::FunctionDecl,
            r"^func\s+(?:\(\s*(?:(?P<receiver>\w+)\s+)?\*?\s*(?P<owner>\w+)\s*\)\s*)?(?P<name>\w+)\s*\((?P<params>[^()]*)\)\s*(?P<returns>[^{]*?)\s*\{?$",
            &["receiver", "owner", "name", "params", "returns"],
        ),
        P::new(K::If, r"^if\s+(?P<condition>.+?)\s*\{?$", &["condition"]),
        P::new(K::If, r"^else\s+if\s+(?P<condition>.+?)\s*\{?$", &["condition"])
            .with_fixed(&[("branch", "elif")]),
        P::new(K::If, r"^else\s*\{?$", &[]).with_fixed(&[("branch", "else")]),
        P::new(
            K::For,
            r"^for\s+(?P<var>\w+)\s*:=\s*(?P<start>[^;]+?)\s*;\s*\w+\s*(?P<cmp><=?|>=?|!=)\s*(?P<end>[^;]+?)\s*;\s*(?P<update>[^{]*?)\s*\{?$",
            &["var", "start", "cmp", "end", "update"],
        ),
        P::new(
            K::For,
            r"^for\s+(?:\w+\s*,\s*)?(?P<var>\w+)\s*:=\s*range\s+(?P<iterable>.+?)\s*\{?$",
            &["var", "iterable"],
        ),
        P::new(K::While, r"^for\s*\{?$", &[]).with_fixed(&[("condition", "true")]),
        P::new(K::While, r"^for\s+(?P<condition>[^;]+?)\s*\{?$", &["condition"]),
        P::new(K::Return, r"^return(?:\s+(?P<value>.+))?$", &["value"]),
        P::new(
            K::Print,
            r"^fmt\.Print(?P<newline>ln)?\((?P<args>.*)\)$",
            &["args", "newline"],
        ),
        P::new(
            K::VarDecl,
            r"^(?P<name>\w+)\s*:=\s*(?P<value>.+)$",
            &["name", "value"],
        )
        .with_fixed(&[("mutable", "true")]),
        P::new(
            K::VarDecl,
            r"^var\s+(?P<name>\w+)(?:\s+(?P<type>[\w.\[\]*]+))?(?:\s*=\s*(?P<value>.+))?$",
            &["name", "type", "value"],
        )
        .with_fixed(&[("mutable", "true")]),
        P::new(
            K::VarDecl,
            r"^const\s+(?P<name>\w+)(?:\s+(?P<type>[\w.\[\]*]+))?\s*=\s*(?P<value>.+)$",
            &["name", "type", "value"],
        )
        .with_fixed(&[("mutable", "false")]),
        P::new(
            K::Assignment,
            r"^(?P<target>[\w.\[\]]+)(?P<op>\+\+|--)$",
            &["target", "op"],
        ),
        P::new(
            K::Assignment,
            r"^(?P<target>[\w.\[\]]+?)\s*(?P<op>(?:<<|>>|&\^|[+\-*/%&|^])?=)\s*(?P<value>[^=].*)$",
            &["target", "op", "value"],
        ),
        P::new(
            K::VarDecl,
            r"^(?P<name>[A-Za-z_]\w*)\s+(?P<type>[\w.\[\]*]+)$",
            &["name", "type"],
        )
        .with_fixed(&[("mutable", "true"), ("field", "true")]),
    ],
};
