#[cfg(test)]
mod tests {
    use crate::extract::{CONDITIONAL_MARKER, DEFINE_MARKER, extract_line, extract_symbols};

    fn collect(line: &str, marker: &str) -> (usize, Vec<String>) {
        let mut names = Vec::new();
        let count = extract_symbols(line, marker, |name| names.push(name.to_string()));
        (count, names)
    }

    // ========================================================================
    // Marker lookup
    // ========================================================================

    #[test]
    fn test_no_marker_emits_nothing() {
        let lines = [
            "",
            "using System;",
            "// #endif",
            "#elif FOO",
            "define FOO",
            "#ifdef",
        ];

        for line in lines {
            let mut calls = 0;
            let count = extract_symbols(line, CONDITIONAL_MARKER, |_| calls += 1);
            assert_eq!(count, 0, "Failed for {:?}", line);
            assert_eq!(calls, 0, "Failed for {:?}", line);
        }
    }

    #[test]
    fn test_marker_is_case_insensitive() {
        let (count, names) = collect("#IF foo", CONDITIONAL_MARKER);
        assert_eq!(count, 1);
        assert_eq!(names, vec!["foo"]);
    }

    #[test]
    fn test_symbol_casing_preserved() {
        let (_, names) = collect("#Define MixedCase_Name", DEFINE_MARKER);
        assert_eq!(names, vec!["MixedCase_Name"]);
    }

    #[test]
    fn test_marker_found_after_leading_text() {
        let (count, names) = collect("    \t#if   FOO", CONDITIONAL_MARKER);
        assert_eq!(count, 1);
        assert_eq!(names, vec!["FOO"]);
    }

    #[test]
    fn test_only_first_marker_processed() {
        // The second "#if " lands in the remainder and is cut at '#'
        let (count, names) = collect("#if A #if B", CONDITIONAL_MARKER);
        assert_eq!(count, 1);
        assert_eq!(names, vec!["A"]);
    }

    #[test]
    fn test_marker_after_multibyte_text() {
        let (count, names) = collect("// é ü #define NAME", DEFINE_MARKER);
        assert_eq!(count, 1);
        assert_eq!(names, vec!["NAME"]);
    }

    // ========================================================================
    // Fragment extraction
    // ========================================================================

    #[test]
    fn test_define_single_symbol() {
        let (count, names) = collect("#define FOO_BAR", DEFINE_MARKER);
        assert_eq!(count, 1);
        assert_eq!(names, vec!["FOO_BAR"]);
    }

    #[test]
    fn test_and_expression_in_order() {
        let (count, names) = collect("#if FOO && BAR", CONDITIONAL_MARKER);
        assert_eq!(count, 2);
        assert_eq!(names, vec!["FOO", "BAR"]);
    }

    #[test]
    fn test_negation_and_parentheses_stripped() {
        let (count, names) = collect("#if !FOO || (BAR)", CONDITIONAL_MARKER);
        assert_eq!(count, 2);
        assert_eq!(names, vec!["FOO", "BAR"]);
    }

    #[test]
    fn test_comparison_truncated() {
        let (count, names) = collect("#if FOO==1", CONDITIONAL_MARKER);
        assert_eq!(count, 1);
        assert_eq!(names, vec!["FOO"]);
    }

    #[test]
    fn test_trailing_comment_truncated() {
        let (count, names) = collect("#if FOO // enables foo", CONDITIONAL_MARKER);
        assert_eq!(count, 1);
        assert_eq!(names, vec!["FOO"]);
    }

    #[test]
    fn test_nested_groups() {
        let (count, names) = collect("#if (A && (B || !C)) && D\r\n", CONDITIONAL_MARKER);
        assert_eq!(count, 4);
        assert_eq!(names, vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_empty_remainder() {
        let (count, names) = collect("#define ", DEFINE_MARKER);
        assert_eq!(count, 0);
        assert!(names.is_empty());
    }

    #[test]
    fn test_punctuation_only_remainder() {
        let (count, names) = collect("#if (!) && ()", CONDITIONAL_MARKER);
        assert_eq!(count, 0);
        assert!(names.is_empty());
    }

    #[test]
    fn test_empty_fragments_skipped() {
        let (count, names) = collect("#if A &&&& B ||", CONDITIONAL_MARKER);
        assert_eq!(count, 2);
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn test_fragment_starting_with_operator_char_yields_nothing() {
        // "| B" survives the split and breaks on its leading '|'
        let (count, names) = collect("#if A ||| B", CONDITIONAL_MARKER);
        assert_eq!(count, 1);
        assert_eq!(names, vec!["A"]);
    }

    #[test]
    fn test_duplicates_not_removed() {
        let (count, names) = collect("#if A || A", CONDITIONAL_MARKER);
        assert_eq!(count, 2);
        assert_eq!(names, vec!["A", "A"]);
    }

    #[test]
    fn test_repeated_calls_identical() {
        let line = "#if !ALPHA && (BETA || GAMMA==2)";
        let first = collect(line, CONDITIONAL_MARKER);
        let second = collect(line, CONDITIONAL_MARKER);
        assert_eq!(first, second);
        assert_eq!(first.1, vec!["ALPHA", "BETA", "GAMMA"]);
    }

    // ========================================================================
    // extract_line
    // ========================================================================

    #[test]
    fn test_extract_line_define() {
        let mut names = Vec::new();
        let count = extract_line("#define USE_CACHE", |n| names.push(n.to_string()));
        assert_eq!(count, 1);
        assert_eq!(names, vec!["USE_CACHE"]);
    }

    #[test]
    fn test_extract_line_conditional() {
        let mut names = Vec::new();
        let count = extract_line("#if USE_CACHE && !LOW_MEMORY", |n| {
            names.push(n.to_string())
        });
        assert_eq!(count, 2);
        assert_eq!(names, vec!["USE_CACHE", "LOW_MEMORY"]);
    }

    #[test]
    fn test_extract_line_plain_code() {
        let mut names = Vec::new();
        let count = extract_line("int x = a || b;", |n| names.push(n.to_string()));
        assert_eq!(count, 0);
        assert!(names.is_empty());
    }
}
