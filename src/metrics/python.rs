//! Python analyzer: syntax validation and metrics from the tree-sitter tree.

use once_cell::sync::Lazy;
use regex::Regex;
use tree_sitter::Node;

use super::complexity::ComplexityAnalyzer;
use super::maintainability::MaintainabilityAnalyzer;
use super::raw::{is_string_statement, RawMetrics};
use super::{round2, AnalysisResult, LanguageAnalyzer};
use crate::core::StructureError;
use crate::parser::{parse_python, walk_preorder, PythonModule};

/// Functions above this cyclomatic complexity are reported
pub const HIGH_COMPLEXITY: u32 = 10;

static SNAKE_CASE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z_][a-z0-9_]*$").unwrap());

#[derive(Debug, Default)]
pub struct PythonAnalyzer {
    complexity: ComplexityAnalyzer,
    maintainability: MaintainabilityAnalyzer,
}

impl PythonAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    fn record_raw(&self, raw: &RawMetrics, result: &mut AnalysisResult) {
        result.set_metric("lines_of_code", raw.loc);
        result.set_metric("logical_lines", raw.lloc);
        result.set_metric("source_lines", raw.sloc);
        result.set_metric("comments", raw.comments);
        result.set_metric("blank_lines", raw.blank);
        result.set_metric("single_comments", raw.single_comments);
        result.set_metric("multi_comments", raw.multi);
    }

    fn check_patterns(&self, module: &PythonModule<'_>, result: &mut AnalysisResult) {
        let mut imports = 0usize;
        let mut classes = 0usize;
        let mut functions = 0usize;
        let mut missing_docstrings = 0usize;
        let mut badly_named = Vec::new();

        walk_preorder(module.root(), |node| match node.kind() {
            "import_statement" | "import_from_statement" | "future_import_statement" => imports += 1,
            "class_definition" => classes += 1,
            "function_definition" if !is_async(node) => {
                functions += 1;
                if !has_docstring(node) {
                    missing_docstrings += 1;
                }
                let name = node
                    .child_by_field_name("name")
                    .map(|n| module.text(n))
                    .unwrap_or_default();
                if !name.is_empty() && !SNAKE_CASE.is_match(name) {
                    badly_named.push(name.to_string());
                }
            }
            _ => {}
        });

        result.set_metric("imports", imports);
        result.set_metric("classes", classes);
        result.set_metric("functions", functions);

        if missing_docstrings > 0 && missing_docstrings as f64 > functions as f64 * 0.5 {
            result.add_suggestion("Consider adding docstrings to functions");
        }
        if !badly_named.is_empty() {
            result.add_suggestion(format!(
                "Function names should use snake_case: {}",
                badly_named.join(", ")
            ));
        }
    }
}

impl LanguageAnalyzer for PythonAnalyzer {
    fn label(&self) -> &'static str {
        "python"
    }

    fn analyze(&self, code: &str) -> AnalysisResult {
        let mut result = AnalysisResult::new(self.label());

        let module = match parse_python(code) {
            Ok(module) => module,
            Err(StructureError::Syntax { position, message }) => {
                result.add_error(format!("Syntax Error at line {}: {}", position.line, message));
                return result;
            }
            Err(e) => {
                tracing::error!(error = %e, "python analysis failed");
                result.add_error(format!("Analysis error: {e}"));
                return result;
            }
        };

        let raw = RawMetrics::from_module(&module);
        self.record_raw(&raw, &mut result);

        let complexity = self.complexity.analyze_module(&module);
        result.set_metric("cyclomatic_complexity", round2(complexity.average()));
        result.set_metric("functions_count", complexity.blocks.len());

        let complex = complexity.above(HIGH_COMPLEXITY).count();
        if complex > 0 {
            result.add_warning(format!("High complexity detected in {complex} function(s)"));
        }

        let maintainability = self.maintainability.analyze_module(&module, &raw, &complexity);
        let mi = maintainability.maintainability_index;
        result.set_metric("maintainability_index", round2(mi));
        if mi < 20.0 {
            result.add_warning("Low maintainability - consider refactoring");
        } else if mi < 50.0 {
            result.add_suggestion("Moderate maintainability - some improvements possible");
        }

        result.set_metric("halstead_difficulty", round2(maintainability.halstead.difficulty()));
        result.set_metric("halstead_effort", round2(maintainability.halstead.effort()));

        self.check_patterns(&module, &mut result);
        result
    }
}

fn is_async(function: Node<'_>) -> bool {
    function.child(0).is_some_and(|first| first.kind() == "async")
}

/// First statement of the body is a string literal
fn has_docstring(function: Node<'_>) -> bool {
    let Some(body) = function.child_by_field_name("body") else {
        return false;
    };
    let mut cursor = body.walk();
    let first = body
        .named_children(&mut cursor)
        .find(|child| child.kind() != "comment");
    first.is_some_and(is_string_statement)
}
