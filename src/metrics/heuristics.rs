/*!
# Curly-Brace Language Heuristics

Regex-based checks for JavaScript/TypeScript, Java, C/C++ and C#. None of
these languages is parsed; counts are pattern matches over the raw text and
validity only means balanced brackets.
*/

use once_cell::sync::Lazy;
use regex::Regex;

use super::{line_count, AnalysisResult, LanguageAnalyzer};

static JS_FUNCTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(function\s+\w+|const\s+\w+\s*=\s*\([^)]*\)\s*=>|\w+\s*:\s*function)").unwrap()
});
static JS_IMPORT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(import\s+.*from|require\()").unwrap());
static CONSOLE_LOG: Lazy<Regex> = Lazy::new(|| Regex::new(r"console\.log").unwrap());
static VAR_DECLARATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bvar\s+\w+").unwrap());

static JAVA_CLASS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(public|private|protected)?\s*class\s+\w+").unwrap());
static JAVA_METHOD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(public|private|protected)\s+\w+\s+\w+\s*\([^)]*\)").unwrap());
static JAVA_IMPORT: Lazy<Regex> = Lazy::new(|| Regex::new(r"import\s+[\w.]+;").unwrap());

static C_INCLUDE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"#include\s*[<"][^>"]+[>"]"#).unwrap());
static C_FUNCTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+\s+\w+\s*\([^)]*\)\s*\{").unwrap());
static C_MAIN: Lazy<Regex> = Lazy::new(|| Regex::new(r"int\s+main\s*\(").unwrap());

static CS_NAMESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"namespace\s+[\w.]+").unwrap());
static CS_CLASS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(public|private|protected|internal)?\s*class\s+\w+").unwrap());
static CS_USING: Lazy<Regex> = Lazy::new(|| Regex::new(r"using\s+[\w.]+;").unwrap());

/// `console.log` calls tolerated before warning
const CONSOLE_LOG_LIMIT: usize = 5;

fn count(pattern: &Regex, code: &str) -> usize {
    pattern.find_iter(code).count()
}

fn check_braces(code: &str, result: &mut AnalysisResult) {
    if code.matches('{').count() != code.matches('}').count() {
        result.add_error("Mismatched curly braces");
    }
}

fn check_parentheses(code: &str, result: &mut AnalysisResult) {
    if code.matches('(').count() != code.matches(')').count() {
        result.add_error("Mismatched parentheses");
    }
}

fn with_line_count(label: &str, code: &str) -> AnalysisResult {
    let mut result = AnalysisResult::new(label);
    result.set_metric("lines_of_code", line_count(code));
    result
}

/// JavaScript and TypeScript, JSX variants included
#[derive(Debug, Clone, Copy, Default)]
pub struct JavaScriptAnalyzer;

impl LanguageAnalyzer for JavaScriptAnalyzer {
    fn label(&self) -> &'static str {
        "javascript"
    }

    fn analyze(&self, code: &str) -> AnalysisResult {
        let mut result = with_line_count(self.label(), code);
        result.set_metric("functions", count(&JS_FUNCTION, code));
        result.set_metric("imports", count(&JS_IMPORT, code));

        let console_logs = count(&CONSOLE_LOG, code);
        if console_logs > CONSOLE_LOG_LIMIT {
            result.add_warning(format!(
                "Found {console_logs} console.log statements - consider removing debug code"
            ));
        }

        let var_usage = count(&VAR_DECLARATION, code);
        if var_usage > 0 {
            result.add_suggestion(format!(
                "Consider using 'let' or 'const' instead of 'var' ({var_usage} occurrences)"
            ));
        }

        check_braces(code, &mut result);
        check_parentheses(code, &mut result);
        result
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JavaAnalyzer;

impl LanguageAnalyzer for JavaAnalyzer {
    fn label(&self) -> &'static str {
        "java"
    }

    fn analyze(&self, code: &str) -> AnalysisResult {
        let mut result = with_line_count(self.label(), code);

        let classes = count(&JAVA_CLASS, code);
        result.set_metric("classes", classes);
        if classes == 0 {
            result.add_warning("No class definition found");
        }
        result.set_metric("methods", count(&JAVA_METHOD, code));
        result.set_metric("imports", count(&JAVA_IMPORT, code));

        check_braces(code, &mut result);
        check_parentheses(code, &mut result);

        if code.contains("public static void main") {
            result.set_metric("has_main", true);
        }
        result
    }
}

/// C and C++
#[derive(Debug, Clone, Copy, Default)]
pub struct CFamilyAnalyzer;

impl LanguageAnalyzer for CFamilyAnalyzer {
    fn label(&self) -> &'static str {
        "c/c++"
    }

    fn analyze(&self, code: &str) -> AnalysisResult {
        let mut result = with_line_count(self.label(), code);
        result.set_metric("includes", count(&C_INCLUDE, code));
        result.set_metric("functions", count(&C_FUNCTION, code));
        if C_MAIN.is_match(code) {
            result.set_metric("has_main", true);
        }

        check_braces(code, &mut result);
        check_parentheses(code, &mut result);
        result
    }
}

/// C#; only braces are balance-checked
#[derive(Debug, Clone, Copy, Default)]
pub struct CSharpAnalyzer;

impl LanguageAnalyzer for CSharpAnalyzer {
    fn label(&self) -> &'static str {
        "csharp"
    }

    fn analyze(&self, code: &str) -> AnalysisResult {
        let mut result = with_line_count(self.label(), code);
        result.set_metric("namespaces", count(&CS_NAMESPACE, code));
        result.set_metric("classes", count(&CS_CLASS, code));
        result.set_metric("using_statements", count(&CS_USING, code));

        check_braces(code, &mut result);
        result
    }
}
