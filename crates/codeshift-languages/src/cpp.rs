//! C++ rule table.

use crate::Language;
use crate::rules::{
    BlockStyle, CharLiterals, ClassStyle, ConstructKind as K, Declarations, Keywords,
    LanguageRules, Lexicon, ParamStyle, PatternSpec as P, PrintStyle, Templates, TerminatorPolicy,
};

pub static CPP: LanguageRules = LanguageRules {
    language: Language::Cpp,
    block_style: BlockStyle::Braces,
    terminator: TerminatorPolicy::Required,
    print_style: PrintStyle::Stream,
    param_style: ParamStyle::TypeName,
    lexicon: Lexicon {
        line_comment: "//",
        block_comment: Some(("/*", "*/")),
        string_quotes: &['"'],
        multiline_quotes: &[],
        char_literals: CharLiterals::Plain,
    },
    keywords: Keywords {
        and: "&&",
        or: "||",
        not: "!",
        true_lit: "true",
        false_lit: "false",
        null_lit: "nullptr",
        self_ref: Some("this"),
        self_member: "->",
        eq: "==",
        ne: "!=",
    },
    templates: Templates {
        if_: "if ($condition) {",
        elif: "} else if ($condition) {",
        else_: "} else {",
        while_: "while ($condition) {",
        for_each: "for (auto $var : $iterable) {",
        for_range: "for (int $var = $start; $var $cmp $end; $update) {",
        return_value: "return $value;",
        return_bare: "return;",
        print: "std::cout << $args << std::endl;",
        print_empty: "std::cout << std::endl;",
        print_join: " << \" \" << ",
        assign: "$target $op $value;",
    },
    declarations: Declarations {
        function: "$returns $name($params) {",
        method: "$returns $name($params) {",
        static_method: "static $returns $name($params) {",
        constructor: "$class($params) {",
        constructor_prologue: None,
        constructor_epilogue: None,
        returns: "$type",
        void_type: Some("void"),
        receiver_param: None,
        param_defaults: true,
        class_open: "class $name$extends {",
        extends: " : public $base",
        class_close: "};",
        member_label: Some("public:"),
        impl_open: "",
        class_style: ClassStyle::Inline,
        var: "$type $name = $value;",
        var_typed: "$type $name = $value;",
        constant: "const $type $name = $value;",
        constant_typed: "const $type $name = $value;",
        declare: "$type $name;",
        field: "$type $name;",
        field_value: "$type $name = $value;",
    },
    ignored: &["public:", "private:", "protected:"],
    indent_unit: "    ",
    reserved: &[
        "break", "case", "catch", "class", "const", "continue", "default", "delete", "do",
        "else", "for", "goto", "if", "namespace", "new", "operator", "private", "protected",
        "public", "return", "sizeof", "static_assert", "struct", "switch", "template", "this",
        "throw", "try", "typedef", "typename", "using", "while",
    ],
    compound_keywords: &[],
    fallback_type: Some("auto"),
    inferred_decl: Some("auto"),
    constructor: None,
    branch_pattern: r"\b(?:if|for|while|case|catch)\b|&&|\|\||(?:^|[^?])\?(?:[^.?:]|$)",
    patterns: &[
        P::new(K::Comment, r"^//\s?(?P<text>.*)$", &["text"]),
        P::new(
            K::ClassDecl,
            r"^(?:class|struct)\s+(?P<name>\w+)(?:\s+final)?(?:\s*:\s*(?:(?:public|protected|private|virtual)\s+)*(?P<base>[\w:<>]+))?\s*\{?$",
            &["name", "base"],
        ),
        P::new(K::If, r"^if\s*\((?P<condition>.+)\)\s*\{?$", &["condition"]),
        P::new(K::If, r"^else\s+if\s*\((?P<condition>.+)\)\s*\{?$", &["condition"])
            .with_fixed(&[("branch", "elif")]),
        P::new(K::If, r"^else\s*\{?$", &[]).with_fixed(&[("branch", "else")]),
        P::new(
            K::For,
            r"^for\s*\(\s*(?:int|long|size_t|unsigned|auto)\s+(?P<var>\w+)\s*=\s*(?P<start>[^;]+?)\s*;\s*\w+\s*(?P<cmp><=?|>=?|!=)\s*(?P<end>[^;]+?)\s*;\s*(?P<update>[^)]*?)\s*\)\s*\{?$",
            &["var", "start", "cmp", "end", "update"],
        ),
        P::new(
            K::For,
            r"^for\s*\(\s*(?:const\s+)?(?P<type>[\w:<>]+)\s*[&*]*\s*(?P<var>\w+)\s*:\s*(?P<iterable>.+)\)\s*\{?$",
            &["type", "var", "iterable"],
        ),
        P::new(K::While, r"^while\s*\((?P<condition>.+)\)\s*\{?$", &["condition"]),
        P::new(
            K::FunctionDecl,
            r"^(?:template\s*<[^>]*>\s*)?(?:(?P<static>static)\s+|(?:inline|virtual|constexpr|explicit|friend)\s+)*(?:(?P<returns>(?:const\s+)?[\w:<>,]+(?:\s*[&*]+)?)\s+)?[&*]*(?:\w+::)*(?P<name>~?\w+)\s*\((?P<params>[^()]*)\)\s*(?:const\s*)?(?:noexcept\s*)?(?:override\s*)?(?::[^{]*)?\{$",
            &["returns", "name", "params", "static"],
        ),
        P::new(K::Return, r"^return(?:\s+(?P<value>.+))?$", &["value"]),
        P::new(
            K::Print,
            r"^(?:std::)?cout\s*<<\s*(?P<args>.*)$",
            &["args"],
        ),
        P::new(
            K::VarDecl,
            r"^(?:static\s+)?(?:const|constexpr)\s+(?P<type>[\w:<>, ]+?)\s*[&*]*\s*(?P<name>\w+)(?:\s*=\s*(?P<value>.+)|\s*\{(?P<init>.*)\})?$",
            &["type", "name", "value", "init"],
        )
        .with_fixed(&[("mutable", "false")]),
        P::new(
            K::VarDecl,
            r"^(?:static\s+)?(?P<type>[\w:<>, ]+?)(?:\s*[&*]+\s*|\s+)(?P<name>\w+)(?:\s*=\s*(?P<value>[^=].*)|\s*\{(?P<init>.*)\})?$",
            &["type", "name", "value", "init"],
        )
        .with_fixed(&[("mutable", "true")]),
        P::new(
            K::Assignment,
            r"^(?P<target>[\w.\[\]>\-]+?)(?P<op>\+\+|--)$",
            &["target", "op"],
        ),
        P::new(
            K::Assignment,
            r"^(?P<target>[\w.\[\]>\-]+?)\s*(?P<op>(?:<<|>>|[+\-*/%&|^])?=)\s*(?P<value>[^=].*)$",
            &["target", "op", "value"],
        ),
    ],
};
