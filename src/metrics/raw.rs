/*!
# Raw Line Metrics

Line classification for Python sources. Each physical line falls into
exactly one bucket, so `loc == sloc + blank + single_comments + multi`.
*/

use serde::{Deserialize, Serialize};
use tree_sitter::Node;

use super::split_lines;
use crate::parser::{walk_preorder, PythonModule};

/// Statement kinds counted as one logical line each
const LOGICAL_LINE_KINDS: &[&str] = &[
    "expression_statement",
    "return_statement",
    "pass_statement",
    "break_statement",
    "continue_statement",
    "import_statement",
    "import_from_statement",
    "future_import_statement",
    "assert_statement",
    "raise_statement",
    "global_statement",
    "nonlocal_statement",
    "delete_statement",
    "type_alias_statement",
    "if_statement",
    "elif_clause",
    "else_clause",
    "for_statement",
    "while_statement",
    "try_statement",
    "except_clause",
    "except_group_clause",
    "finally_clause",
    "with_statement",
    "function_definition",
    "class_definition",
    "match_statement",
    "case_clause",
];

/// Raw metrics of one Python module
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMetrics {
    /// Physical lines
    pub loc: usize,
    /// Logical lines (statements)
    pub lloc: usize,
    /// Lines holding code
    pub sloc: usize,
    /// Comment tokens, inline ones included
    pub comments: usize,
    /// Lines inside standalone string statements (docstrings)
    pub multi: usize,
    pub blank: usize,
    /// Lines holding nothing but a comment
    pub single_comments: usize,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Code,
    Blank,
    Comment,
    Docstring,
}

impl RawMetrics {
    pub fn from_module(module: &PythonModule<'_>) -> Self {
        let lines = split_lines(module.source());
        let mut kinds: Vec<LineKind> = lines
            .iter()
            .map(|line| {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    LineKind::Blank
                } else if trimmed.starts_with('#') {
                    LineKind::Comment
                } else {
                    LineKind::Code
                }
            })
            .collect();

        let mut comments = 0;
        let mut lloc = 0;

        walk_preorder(module.root(), |node| {
            let kind = node.kind();
            if kind == "comment" {
                comments += 1;
            } else if LOGICAL_LINE_KINDS.contains(&kind) {
                lloc += 1;
            }

            if is_string_statement(node) {
                let end = node.end_position().row.min(kinds.len().saturating_sub(1));
                for row in node.start_position().row..=end {
                    if let Some(slot) = kinds.get_mut(row) {
                        *slot = LineKind::Docstring;
                    }
                }
            }
        });

        let count = |wanted: LineKind| kinds.iter().filter(|k| **k == wanted).count();

        Self {
            loc: lines.len(),
            lloc,
            sloc: count(LineKind::Code),
            comments,
            multi: count(LineKind::Docstring),
            blank: count(LineKind::Blank),
            single_comments: count(LineKind::Comment),
        }
    }
}

/// Expression statement made of a single string literal
pub(crate) fn is_string_statement(node: Node<'_>) -> bool {
    node.kind() == "expression_statement"
        && node.named_child_count() == 1
        && node
            .named_child(0)
            .is_some_and(|child| matches!(child.kind(), "string" | "concatenated_string"))
}
