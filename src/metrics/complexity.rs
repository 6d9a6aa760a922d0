/*!
# Complexity Analysis for Python Code

Calculates cyclomatic complexity per block from the syntax tree.
A function scores 1 plus one for every decision point in its body. A class
scores 1 plus its own decision points plus its methods, divided by the number
of methods, plus one when there is more than one method.
*/

use serde::{Deserialize, Serialize};
use tree_sitter::Node;

use crate::core::Position;
use crate::parser::PythonModule;

/// Node kinds that add one path through the code
const DECISION_KINDS: &[&str] = &[
    "if_statement",
    "elif_clause",
    "for_statement",
    "while_statement",
    "except_clause",
    "except_group_clause",
    "with_statement",
    "assert_statement",
    "conditional_expression",
    "boolean_operator",
    "for_in_clause",
    "if_clause",
    "case_clause",
];

/// What a scored block is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Function,
    Class,
    Method,
}

/// Complexity of one scored block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockComplexity {
    /// Function or class name; methods are `Class.method`
    pub name: String,
    pub kind: BlockKind,
    pub position: Position,
    pub cyclomatic_complexity: u32,
    /// Unaveraged complexity; differs from `cyclomatic_complexity` only for
    /// classes with methods
    pub real_complexity: u32,
}

/// Overall complexity metrics for a module
///
/// Blocks are functions defined outside any function or class body (async
/// included), classes outside any function or class body, and the methods
/// of those classes. Functions nested in a function are not blocks; their
/// decisions count for neither scope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComplexityMetrics {
    /// Blocks in document order, each class followed by its methods
    pub blocks: Vec<BlockComplexity>,
    /// Complexity of the module body outside any function or class
    pub module_complexity: u32,
}

impl ComplexityMetrics {
    pub fn average(&self) -> f64 {
        if self.blocks.is_empty() {
            return 0.0;
        }
        let sum: u32 = self.blocks.iter().map(|b| b.cyclomatic_complexity).sum();
        sum as f64 / self.blocks.len() as f64
    }

    pub fn max(&self) -> u32 {
        self.blocks
            .iter()
            .map(|b| b.cyclomatic_complexity)
            .max()
            .unwrap_or(0)
    }

    /// Module plus top-level functions plus unaveraged classes; methods are
    /// already part of their class
    pub fn total(&self) -> u32 {
        self.module_complexity
            + self
                .blocks
                .iter()
                .filter(|b| b.kind != BlockKind::Method)
                .map(|b| b.real_complexity)
                .sum::<u32>()
    }

    /// Blocks scoring above `limit`
    pub fn above(&self, limit: u32) -> impl Iterator<Item = &BlockComplexity> {
        self.blocks
            .iter()
            .filter(move |b| b.cyclomatic_complexity > limit)
    }
}

/// Analyzer for code complexity
#[derive(Debug, Default)]
pub struct ComplexityAnalyzer;

impl ComplexityAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze_module(&self, module: &PythonModule<'_>) -> ComplexityMetrics {
        let mut blocks = Vec::new();
        collect_blocks(module, module.root(), &mut blocks);

        ComplexityMetrics {
            blocks,
            module_complexity: 1 + decision_points(module.root()),
        }
    }
}

fn collect_blocks(module: &PythonModule<'_>, node: Node<'_>, blocks: &mut Vec<BlockComplexity>) {
    let mut cursor = node.walk();

    for child in node.children(&mut cursor) {
        match child.kind() {
            "function_definition" => {
                let name = definition_name(module, child);
                let complexity = function_complexity(child);
                blocks.push(BlockComplexity {
                    name,
                    kind: BlockKind::Function,
                    position: Position::from_point(child.start_position()),
                    cyclomatic_complexity: complexity,
                    real_complexity: complexity,
                });
            }
            "class_definition" => class_blocks(module, child, blocks),
            _ => collect_blocks(module, child, blocks),
        }
    }
}

fn class_blocks(module: &PythonModule<'_>, class: Node<'_>, blocks: &mut Vec<BlockComplexity>) {
    let class_name = definition_name(module, class);
    let mut methods = Vec::new();
    let mut body_points = 0;

    if let Some(body) = class.child_by_field_name("body") {
        collect_methods(body, &mut methods);
        body_points = decision_points(body);
    }

    let method_sum: u32 = methods.iter().map(|m| function_complexity(*m)).sum();
    let real = 1 + body_points + method_sum;
    let averaged = match methods.len() as u32 {
        0 | 1 => real,
        n => real / n + 1,
    };

    blocks.push(BlockComplexity {
        name: class_name.clone(),
        kind: BlockKind::Class,
        position: Position::from_point(class.start_position()),
        cyclomatic_complexity: averaged,
        real_complexity: real,
    });
    for method in methods {
        let complexity = function_complexity(method);
        blocks.push(BlockComplexity {
            name: format!("{class_name}.{}", definition_name(module, method)),
            kind: BlockKind::Method,
            position: Position::from_point(method.start_position()),
            cyclomatic_complexity: complexity,
            real_complexity: complexity,
        });
    }
}

/// Function definitions directly in a class body, looking through
/// decorators and conditional blocks
fn collect_methods<'tree>(node: Node<'tree>, methods: &mut Vec<Node<'tree>>) {
    let mut cursor = node.walk();

    for child in node.children(&mut cursor) {
        match child.kind() {
            "function_definition" => methods.push(child),
            "class_definition" => {}
            _ => collect_methods(child, methods),
        }
    }
}

fn function_complexity(function: Node<'_>) -> u32 {
    1 + function
        .child_by_field_name("body")
        .map(decision_points)
        .unwrap_or(0)
}

fn definition_name(module: &PythonModule<'_>, node: Node<'_>) -> String {
    node.child_by_field_name("name")
        .map(|n| module.text(n).to_string())
        .unwrap_or_default()
}

fn decision_points(node: Node<'_>) -> u32 {
    let mut count = 0;
    let mut cursor = node.walk();

    for child in node.children(&mut cursor) {
        match child.kind() {
            "function_definition" | "class_definition" => continue,
            kind if DECISION_KINDS.contains(&kind) => count += 1,
            _ => {}
        }
        count += decision_points(child);
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_python;

    fn complexity(code: &str) -> ComplexityMetrics {
        ComplexityAnalyzer::new().analyze_module(&parse_python(code).unwrap())
    }

    #[test]
    fn test_straight_line_function() {
        let metrics = complexity("def f():\n    return 1\n");
        assert_eq!(metrics.blocks.len(), 1);
        assert_eq!(metrics.blocks[0].kind, BlockKind::Function);
        assert_eq!(metrics.blocks[0].cyclomatic_complexity, 1);
        assert_eq!(metrics.average(), 1.0);
    }

    #[test]
    fn test_decision_points() {
        let code = "\
def g(items):
    for x in items:
        if x and x > 1 or x < -1:
            return [y for y in items if y]
        elif x:
            pass
    while True:
        break
";
        // for, if, and, or, elif, comprehension for, comprehension if, while
        assert_eq!(complexity(code).blocks[0].cyclomatic_complexity, 9);
    }

    #[test]
    fn test_nested_functions_are_not_blocks() {
        let code = "\
def outer(a):
    if a:
        pass
    def inner(b):
        if b:
            pass
        while b:
            pass
    return inner
";
        let metrics = complexity(code);
        let scores: Vec<(String, u32)> = metrics
            .blocks
            .iter()
            .map(|b| (b.name.clone(), b.cyclomatic_complexity))
            .collect();
        assert_eq!(scores, vec![("outer".to_string(), 2)]);
        assert_eq!(metrics.max(), 2);
        assert_eq!(metrics.total(), 3);
    }

    #[test]
    fn test_async_and_conditional_definitions_are_blocks() {
        let code = "\
async def fetch(url):
    if url:
        return url

if True:
    def fallback():
        pass
";
        let metrics = complexity(code);
        let names: Vec<&str> = metrics.blocks.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["fetch", "fallback"]);
        assert_eq!(metrics.module_complexity, 2);
    }

    #[test]
    fn test_class_with_methods() {
        let code = "\
class Queue:
    def push(self, item):
        if item:
            self.items.append(item)

    @property
    def empty(self):
        return not self.items or self.closed

    def pop(self):
        return self.items.pop()
";
        let metrics = complexity(code);
        let scores: Vec<(String, BlockKind, u32)> = metrics
            .blocks
            .iter()
            .map(|b| (b.name.clone(), b.kind, b.cyclomatic_complexity))
            .collect();
        // real complexity 1 + 2 + 2 + 1 = 6, averaged over three methods
        assert_eq!(
            scores,
            vec![
                ("Queue".to_string(), BlockKind::Class, 3),
                ("Queue.push".to_string(), BlockKind::Method, 2),
                ("Queue.empty".to_string(), BlockKind::Method, 2),
                ("Queue.pop".to_string(), BlockKind::Method, 1),
            ]
        );
        assert_eq!(metrics.blocks[0].real_complexity, 6);
        assert_eq!(metrics.total(), 7);
    }

    #[test]
    fn test_class_without_methods() {
        let metrics = complexity("class Point:\n    x = 0 if flag else 1\n");
        assert_eq!(metrics.blocks.len(), 1);
        assert_eq!(metrics.blocks[0].cyclomatic_complexity, 2);
    }

    #[test]
    fn test_no_functions() {
        let metrics = complexity("x = 1 if y else 2\n");
        assert!(metrics.blocks.is_empty());
        assert_eq!(metrics.average(), 0.0);
        assert_eq!(metrics.module_complexity, 2);
    }

    #[test]
    fn test_above_limit() {
        let mut body = String::from("def busy(x):\n");
        for i in 0..11 {
            body.push_str(&format!("    if x == {i}:\n        pass\n"));
        }
        let metrics = complexity(&body);
        assert_eq!(metrics.above(10).count(), 1);
    }
}
