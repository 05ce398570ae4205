//! Metrics properties over generated programs.

use codeshift_languages::Language;
use codeshift_metrics::{ReadabilityThresholds, metrics};
use proptest::prelude::*;

/// Statements, a well-formed function to append, and its line count.
struct Sample {
    language: Language,
    statements: &'static [&'static str],
    function: &'static str,
    function_lines: usize,
}

const SAMPLES: &[Sample] = &[
    Sample {
        language: Language::Python,
        statements: &[
            "x = 1",
            "print(x)",
            "# note",
            "",
            "y = x + 2",
            "def f():\n    return 0",
        ],
        function: "def extra(a):\n    return a\n",
        function_lines: 2,
    },
    Sample {
        language: Language::Go,
        statements: &[
            "x := 1",
            "fmt.Println(x)",
            "// note",
            "",
            "y = x + 2",
            "func f() int {\n\treturn 0\n}",
        ],
        function: "func extra(a int) int {\n\treturn a\n}\n",
        function_lines: 3,
    },
    Sample {
        language: Language::JavaScript,
        statements: &[
            "let x = 1;",
            "console.log(x);",
            "/* note */",
            "",
            "y = x + 2;",
            "function f() {\n  return 0;\n}",
        ],
        function: "function extra(a) {\n  return a;\n}\n",
        function_lines: 3,
    },
];

fn program() -> impl Strategy<Value = (usize, Vec<usize>)> {
    (0..SAMPLES.len(), prop::collection::vec(0..6usize, 0..12))
}

proptest! {
    #[test]
    fn prop_appending_a_function_grows_counts((sample, picks) in program()) {
        let sample = &SAMPLES[sample];
        let mut code: String = picks
            .iter()
            .map(|&i| format!("{}\n", sample.statements[i]))
            .collect();
        let thresholds = ReadabilityThresholds::default();
        let before = metrics(&code, sample.language, &thresholds);
        code.push_str(sample.function);
        let after = metrics(&code, sample.language, &thresholds);
        prop_assert_eq!(after.functions, before.functions + 1);
        prop_assert_eq!(after.lines_of_code, before.lines_of_code + sample.function_lines);
    }

    #[test]
    fn prop_metrics_are_deterministic((sample, picks) in program()) {
        let sample = &SAMPLES[sample];
        let code: String = picks
            .iter()
            .map(|&i| format!("{}\n", sample.statements[i]))
            .collect();
        let thresholds = ReadabilityThresholds::default();
        prop_assert_eq!(
            metrics(&code, sample.language, &thresholds),
            metrics(&code, sample.language, &thresholds)
        );
    }
}
