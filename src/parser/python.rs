//! Python front-end backed by tree-sitter.
//!
//! tree-sitter recovers from syntax errors by inserting ERROR/MISSING nodes;
//! any such node makes the whole source invalid here. The grammar also
//! accepts Python 2 `print`/`exec` statements and parameter lists that
//! Python 3 rejects at compile time; those are reported as syntax errors too.

use tree_sitter::{Node, Parser, Tree};

use crate::core::{Position, StructureError};

/// Successfully parsed Python module
pub struct PythonModule<'src> {
    tree: Tree,
    source: &'src str,
}

impl<'src> PythonModule<'src> {
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    /// Text of a node, empty when the node does not cover valid UTF-8
    pub fn text(&self, node: Node<'_>) -> &'src str {
        node.utf8_text(self.source.as_bytes()).unwrap_or_default()
    }
}

/// Parses Python source, rejecting anything with syntax errors
pub fn parse_python(source: &str) -> Result<PythonModule<'_>, StructureError> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_python::language())
        .map_err(|e| StructureError::Parser(e.to_string()))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| StructureError::Parser("parse was cancelled".to_string()))?;

    if let Some(error) = first_syntax_error(tree.root_node(), source) {
        return Err(error);
    }

    Ok(PythonModule { tree, source })
}

fn first_syntax_error(root: Node<'_>, source: &str) -> Option<StructureError> {
    let mut found = None;
    walk_preorder(root, |node| {
        if found.is_some() {
            return;
        }
        match node.kind() {
            "print_statement" | "exec_statement" => {
                let keyword = if node.kind() == "print_statement" { "print" } else { "exec" };
                found = Some(StructureError::syntax(
                    Position::from_point(node.start_position()),
                    format!("Missing parentheses in call to '{keyword}'"),
                ));
                return;
            }
            "parameters" | "lambda_parameters" => {
                if let Some(param) = default_before_plain(node) {
                    found = Some(StructureError::syntax(
                        Position::from_point(param.start_position()),
                        "non-default argument follows default argument",
                    ));
                }
                return;
            }
            _ => {}
        }
        if node.is_missing() {
            found = Some(StructureError::syntax(
                Position::from_point(node.start_position()),
                format!("expected '{}'", node.kind()),
            ));
        } else if node.is_error() {
            let text = node.utf8_text(source.as_bytes()).unwrap_or_default();
            let snippet: String = text.lines().next().unwrap_or_default().chars().take(20).collect();
            let message = if snippet.trim().is_empty() {
                "invalid syntax".to_string()
            } else {
                format!("invalid syntax near '{}'", snippet.trim())
            };
            found = Some(StructureError::syntax(
                Position::from_point(node.start_position()),
                message,
            ));
        }
    });
    found
}

/// First positional parameter without a default that follows one with a
/// default; keyword-only parameters after `*` are exempt
fn default_before_plain<'tree>(parameters: Node<'tree>) -> Option<Node<'tree>> {
    let mut seen_default = false;
    let mut cursor = parameters.walk();

    for param in parameters.named_children(&mut cursor) {
        match param.kind() {
            "default_parameter" | "typed_default_parameter" => seen_default = true,
            "list_splat_pattern" | "dictionary_splat_pattern" | "keyword_separator" => return None,
            "typed_parameter" => {
                let splat = param.named_child(0).is_some_and(|inner| {
                    matches!(inner.kind(), "list_splat_pattern" | "dictionary_splat_pattern")
                });
                if splat {
                    return None;
                }
                if seen_default {
                    return Some(param);
                }
            }
            "identifier" | "tuple_pattern" if seen_default => return Some(param),
            _ => {}
        }
    }

    None
}

/// Visits every node in document (pre-order) order
pub fn walk_preorder<'tree>(root: Node<'tree>, mut visit: impl FnMut(Node<'tree>)) {
    let mut cursor = root.walk();

    loop {
        visit(cursor.node());

        if cursor.goto_first_child() {
            continue;
        }

        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return;
            }
        }
    }
}
