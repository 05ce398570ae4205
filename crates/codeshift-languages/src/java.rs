//! Java rule table.

use crate::Language;
use crate::rules::{
    BlockStyle, CharLiterals, ClassStyle, ConstructKind as K, Declarations, Keywords,
    LanguageRules, Lexicon, ParamStyle, PatternSpec as P, PrintStyle, Templates, TerminatorPolicy,
};

pub static JAVA: LanguageRules = LanguageRules {
    language: Language::Java,
    block_style: BlockStyle::Braces,
    terminator: TerminatorPolicy::Required,
    print_style: PrintStyle::Call,
    param_style: ParamStyle::TypeName,
    lexicon: Lexicon {
        line_comment: "//",
        block_comment: Some(("/*", "*/")),
        string_quotes: &['"'],
        multiline_quotes: &[("\"\"\"", true)],
        char_literals: CharLiterals::Plain,
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
        eq: "==",
        ne: "!=",
    },
    templates: Templates {
        if_: "if ($condition) {",
        elif: "} else if ($condition) {",
        else_: "} else {",
        while_: "while ($condition) {",
        for_each: "for ($type $var : $iterable) {",
        for_range: "for (int $var = $start; $var $cmp $end; $update) {",
        return_value: "return $value;",
        return_bare: "return;",
        print: "System.out.println($args);",
        print_empty: "System.out.println();",
        print_join: " + \" \" + ",
        assign: "$target $op $value;",
    },
    declarations: Declarations {
        function: "public static $returns $name($params) {",
        method: "public $returns $name($params) {",
        static_method: "public static $returns $name($params) {",
        constructor: "public $class($params) {",
        constructor_prologue: None,
        constructor_epilogue: None,
        returns: "$type",
        void_type: Some("void"),
        receiver_param: None,
        param_defaults: false,
        class_open: "public class $name$extends {",
        extends: " extends $base",
        class_close: "}",
        member_label: None,
        impl_open: "",
        class_style: ClassStyle::Inline,
        var: "$type $name = $value;",
        var_typed: "$type $name = $value;",
        constant: "final $type $name = $value;",
        constant_typed: "final $type $name = $value;",
        declare: "$type $name;",
        field: "private $type $name;",
        field_value: "private $type $name = $value;",
    },
    ignored: &[],
    indent_unit: "    ",
    reserved: &[
        "abstract", "assert", "break", "case", "catch", "class", "continue", "default", "do",
        "else", "enum", "extends", "final", "finally", "for", "if", "implements", "import",
        "instanceof", "interface", "new", "package", "private", "protected", "public", "return",
        "static", "super", "switch", "synchronized", "this", "throw", "throws", "try", "while",
    ],
    compound_keywords: &[],
    fallback_type: Some("Object"),
    inferred_decl: Some("var"),
    constructor: None,
    branch_pattern: r"\b(?:if|for|while|case|catch)\b|&&|\|\||(?:^|[^?])\?(?:[^.?]|$)",
    patterns: &[
        P::new(K::Comment, r"^//\s?(?P<text>.*)$", &["text"]),
        P::new(
            K::ClassDecl,
            r"^(?:(?:public|private|protected|abstract|final|static)\s+)*class\s+(?P<name>\w+)(?:<[^>]*>)?(?:\s+extends\s+(?P<base>[\w.]+))?(?:\s+implements\s+[\w.,\s<>]+?)?\s*\{?$",
            &["name", "base"],
        ),
        P::new(K::If, r"^if\s*\((?P<condition>.+)\)\s*\{?$", &["condition"]),
        P::new(K::If, r"^else\s+if\s*\((?P<condition>.+)\)\s*\{?$", &["condition"])
            .with_fixed(&[("branch", "elif")]),
        P::new(K::If, r"^else\s*\{?$", &[]).with_fixed(&[("branch", "else")]),
        P::new(
            K::For,
            r"^for\s*\(\s*(?:int|long|var)\s+(?P<var>\w+)\s*=\s*(?P<start>[^;]+?)\s*;\s*\w+\s*(?P<cmp><=?|>=?|!=)\s*(?P<end>[^;]+?)\s*;\s*(?P<update>[^)]*?)\s*\)\s*\{?$",
            &["var", "start", "cmp", "end", "update"],
        ),
        P::new(
            K::For,
            r"^for\s*\(\s*(?:final\s+)?(?P<type>[\w.<>\[\]]+)\s+(?P<var>\w+)\s*:\s*(?P<iterable>.+)\)\s*\{?$",
            &["type", "var", "iterable"],
        ),
        P::new(K::While, r"^while\s*\((?P<condition>.+)\)\s*\{?$", &["condition"]),
        P::new(
            K::FunctionDecl,
            r"^(?:(?P<static>static)\s+|(?:public|private|protected|final|abstract|synchronized)\s+)*(?:<[^>]*>\s*)?(?:(?P<returns>[\w.<>\[\], ?]+?)\s+)?(?P<name>\w+)\s*\((?P<params>[^()]*)\)(?:\s*throws\s+[\w.,\s]+?)?\s*\{$",
            &["returns", "name", "params", "static"],
        ),
        P::new(K::Return, r"^return(?:\s+(?P<value>.+))?$", &["value"]),
        P::new(
            K::Print,
            r"^System\.out\.print(?P<newline>ln)?\((?P<args>.*)\)$",
            &["args", "newline"],
        ),
        P::new(
            K::VarDecl,
            r"^(?:(?:public|private|protected|static)\s+)*final\s+(?P<type>[\w.<>\[\], ?]+?)\s+(?P<name>\w+)(?:\s*=\s*(?P<value>.+))?$",
            &["type", "name", "value"],
        )
        .with_fixed(&[("mutable", "false")]),
        P::new(
            K::VarDecl,
            r"^(?:(?:public|private|protected|static)\s+)*(?P<type>[\w.<>\[\], ?]+?)\s+(?P<name>\w+)(?:\s*=\s*(?P<value>[^=].*))?$",
            &["type", "name", "value"],
        )
        .with_fixed(&[("mutable", "true")]),
        P::new(
            K::Assignment,
            r"^(?P<target>[\w.\[\]]+)(?P<op>\+\+|--)$",
            &["target", "op"],
        ),
        P::new(
            K::Assignment,
            r"^(?P<target>[\w.\[\]]+?)\s*(?P<op>(?:<<|>>|[+\-*/%&|^])?=)\s*(?P<value>[^=].*)$",
            &["target", "op", "value"],
        ),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_and_method() {
        let m = JAVA.classify("public class Dog extends Animal {").unwrap();
        assert_eq!(m.kind, K::ClassDecl);
        assert_eq!(m.get("name"), Some("Dog"));
        assert_eq!(m.get("base"), Some("Animal"));

        let m = JAVA
            .classify("public static int add(int a, int b) {")
            .unwrap();
        assert_eq!(m.kind, K::FunctionDecl);
        assert_eq!(m.get("returns"), Some("int"));
        assert_eq!(m.get("name"), Some("add"));
        assert_eq!(m.get("params"), Some("int a, int b"));
    }

    #[test]
    fn test_constructor_has_no_return_type() {
        let m = JAVA.classify("public Dog(String name) {").unwrap();
        assert_eq!(m.kind, K::FunctionDecl);
        assert_eq!(m.get("name"), Some("Dog"));
        assert_eq!(m.get("returns"), None);
    }

    #[test]
    fn test_statements_are_not_declarations() {
        assert_eq!(JAVA.classify("return x").unwrap().kind, K::Return);
        assert!(JAVA.classify("throw e").is_none());
        assert!(JAVA.classify("new Thread(task).start()").is_none());
    }

    #[test]
    fn test_declarations() {
        let m = JAVA.classify("final int LIMIT = 10").unwrap();
        assert_eq!(m.kind, K::VarDecl);
        assert_eq!(m.get("mutable"), Some("false"));
        let m = JAVA.classify("String name = \"x\"").unwrap();
        assert_eq!(m.get("type"), Some("String"));
        assert_eq!(m.get("mutable"), Some("true"));
    }

    #[test]
    fn test_foreach() {
        let m = JAVA.classify("for (String s : names) {").unwrap();
        assert_eq!(m.kind, K::For);
        assert_eq!(m.get("type"), Some("String"));
        assert_eq!(m.get("iterable"), Some("names"));
    }
}
