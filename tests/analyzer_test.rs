/*!
# Code Quality Analyzer Integration Tests
*/

use plagiarism_analyzer::metrics::basic::BASIC_ANALYSIS_WARNING;
use plagiarism_analyzer::{analyze, AnalysisResult, AnalyzerRegistry, Language, LanguageAnalyzer};
use pretty_assertions::assert_eq;

#[test]
fn test_minimal_python_function() {
    let result = analyze("def f(): pass", &Language::Python);

    assert!(result.is_valid);
    assert!(result.errors.is_empty());
    assert_eq!(result.language, "python");
    assert_eq!(result.metric_int("functions"), Some(1));
    assert_eq!(result.metric_int("functions_count"), Some(1));
    assert_eq!(result.metric_float("maintainability_index"), Some(100.0));
    assert_eq!(result.code_length, 13);
    assert_eq!(result.lines_of_code, 1);
}

#[test]
fn test_python_syntax_error() {
    let result = analyze("def f(:", &Language::Python);

    assert!(!result.is_valid);
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].starts_with("Syntax Error at line 1"), "{:?}", result.errors);
    assert!(result.metrics.is_empty());
}

#[test]
fn test_python2_and_misordered_defaults_are_syntax_errors() {
    for code in ["print \"hello\"", "exec \"x = 1\"", "def f(a=1, b): pass"] {
        let result = analyze(code, &Language::Python);

        assert!(!result.is_valid, "{code}");
        assert_eq!(result.errors.len(), 1, "{code}");
        assert!(result.errors[0].starts_with("Syntax Error at line 1"), "{:?}", result.errors);
        assert!(result.metrics.is_empty());
    }

    let result = analyze("print(\"hello\")\ndef f(a, b=1, *, c): pass\n", &Language::Python);
    assert!(result.is_valid, "{:?}", result.errors);
}

#[test]
fn test_python_naming_and_docstrings() {
    let code = "import os\n\nclass Report:\n    \"\"\"A report.\"\"\"\n\n    def Render(self):\n        return os.getcwd()\n\n    def save_copy(self):\n        pass\n";
    let result = analyze(code, &Language::Python);

    assert!(result.is_valid);
    assert_eq!(result.metric_int("imports"), Some(1));
    assert_eq!(result.metric_int("classes"), Some(1));
    assert_eq!(result.metric_int("functions"), Some(2));
    assert!(result
        .suggestions
        .contains(&"Consider adding docstrings to functions".to_string()));
    assert!(result
        .suggestions
        .contains(&"Function names should use snake_case: Render".to_string()));
}

#[test]
fn test_javascript_heuristics() {
    let mut code = String::from("var count = 0;\nfunction log(x) {\n");
    for _ in 0..6 {
        code.push_str("  console.log(x);\n");
    }
    code.push_str("}\n");
    let result = analyze(&code, &Language::TypeScript);

    assert!(result.is_valid);
    assert_eq!(result.language, "javascript");
    assert_eq!(result.metric_int("functions"), Some(1));
    assert_eq!(result.warnings.len(), 1);
    assert!(result.warnings[0].starts_with("Found 6 console.log statements"));
    assert_eq!(
        result.suggestions,
        vec!["Consider using 'let' or 'const' instead of 'var' (1 occurrences)".to_string()]
    );
}

#[test]
fn test_unbalanced_braces_invalidate() {
    let result = analyze("int main() {\n  return 0;\n", &Language::C);

    assert!(!result.is_valid);
    assert_eq!(result.errors, vec!["Mismatched curly braces".to_string()]);
    assert_eq!(result.metric_int("has_main"), None);
    assert_eq!(result.metric("has_main").map(|m| m.to_string()), Some("true".to_string()));
}

#[test]
fn test_java_class_and_main() {
    let code = "import java.util.List;\n\npublic class App {\n    public static void main(String[] args) {\n        System.out.println(size(\"x\"));\n    }\n\n    private int size(String s) {\n        return s.length();\n    }\n}\n";
    let result = analyze(code, &Language::Java);

    assert!(result.is_valid);
    assert_eq!(result.metric_int("classes"), Some(1));
    assert_eq!(result.metric_int("imports"), Some(1));
    assert_eq!(result.metric("has_main").map(|m| m.to_string()), Some("true".to_string()));
    assert!(result.warnings.is_empty());
}

#[test]
fn test_line_count_follows_python_line_boundaries() {
    let result = analyze("a\rb\x0cc\r\n", &Language::from_tag("rb"));
    assert_eq!(result.lines_of_code, 3);
    assert_eq!(result.metric_int("lines_of_code"), Some(3));

    let result = analyze("x = 1\r\ny = 2\r\n", &Language::Python);
    assert!(result.is_valid, "{:?}", result.errors);
    assert_eq!(result.lines_of_code, 2);
    assert_eq!(result.metric_int("lines_of_code"), Some(2));
}

#[test]
fn test_async_defs_count_as_blocks_only() {
    let result = analyze("async def g(x): pass", &Language::Python);

    assert!(result.is_valid);
    assert_eq!(result.metric_int("functions"), Some(0));
    assert_eq!(result.metric_int("functions_count"), Some(1));
}

#[test]
fn test_unknown_language_gets_basic_analysis() {
    let result = analyze("puts 'hi'\nputs 'bye'\n", &Language::from_tag("rb"));

    assert!(result.is_valid);
    assert_eq!(result.language, "rb");
    assert_eq!(result.warnings, vec![BASIC_ANALYSIS_WARNING.to_string()]);
    assert_eq!(result.metric_int("lines_of_code"), Some(2));
    assert_eq!(result.metric_int("characters"), Some(21));
}

struct ShoutingAnalyzer;

impl LanguageAnalyzer for ShoutingAnalyzer {
    fn label(&self) -> &'static str {
        "shout"
    }

    fn analyze(&self, code: &str) -> AnalysisResult {
        let mut result = AnalysisResult::new(self.label());
        if code.chars().any(|c| c.is_lowercase()) {
            result.add_error("lowercase found");
        }
        result
    }
}

#[test]
fn test_registry_accepts_custom_analyzers() {
    let language = Language::from_tag("shout");
    let mut registry = AnalyzerRegistry::new();
    assert!(!registry.supports(&language));

    registry.register(language.clone(), ShoutingAnalyzer);
    let result = registry.analyze("HELLO\nworld", &language);

    assert!(!result.is_valid);
    assert_eq!(result.language, "shout");
    assert_eq!(result.lines_of_code, 2);
    assert_eq!(result.code_length, 11);
}
