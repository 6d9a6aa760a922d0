/*!
# Structural Extraction

A structural fingerprint is an ordered symbolic summary of a program's shape.
Extractors are registered per language; when none is registered, or the
registered one answers [`ExtractOutcome::Unsupported`], the generic token
stream is used instead.
*/

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tree_sitter::Node;

use crate::core::{Language, StructureError};
use crate::parser::{parse_python, tokenize, walk_preorder, PythonModule};

/// Result of asking one extractor for a fingerprint
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractOutcome {
    Symbols(Vec<String>),
    Unsupported,
    Failed(StructureError),
}

/// Structural fingerprint of one source
#[derive(Debug, Clone, PartialEq)]
pub enum Fingerprint {
    /// Grammar-derived symbols, compared as one `|`-joined string
    Symbols(Vec<String>),
    /// Raw token stream, compared token by token
    Tokens(Vec<String>),
}

impl Fingerprint {
    pub fn len(&self) -> usize {
        match self {
            Fingerprint::Symbols(items) | Fingerprint::Tokens(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Language-specific fingerprint capability
pub trait StructuralExtractor: Send + Sync {
    fn try_extract(&self, code: &str) -> ExtractOutcome;
}

/// Python fingerprint from the tree-sitter syntax tree
#[derive(Debug, Clone, Copy, Default)]
pub struct PythonStructureExtractor;

impl StructuralExtractor for PythonStructureExtractor {
    fn try_extract(&self, code: &str) -> ExtractOutcome {
        match parse_python(code) {
            Ok(module) => ExtractOutcome::Symbols(python_symbols(&module)),
            Err(e) => ExtractOutcome::Failed(e),
        }
    }
}

fn python_symbols(module: &PythonModule<'_>) -> Vec<String> {
    let mut symbols = Vec::new();

    walk_preorder(module.root(), |node| match node.kind() {
        "function_definition" => {
            let name = field_text(module, node, "name");
            let params = node
                .child_by_field_name("parameters")
                .map(positional_parameter_count)
                .unwrap_or(0);
            symbols.push(format!("FUNC:{name}:{params}"));
        }
        "class_definition" => {
            symbols.push(format!("CLASS:{}", field_text(module, node, "name")));
        }
        "for_statement" => symbols.push("FOR_LOOP".to_string()),
        "while_statement" => symbols.push("WHILE_LOOP".to_string()),
        "if_statement" | "elif_clause" => symbols.push("IF_STATEMENT".to_string()),
        "import_statement" => {
            let mut cursor = node.walk();
            for name in node.children_by_field_name("name", &mut cursor) {
                let imported = match name.kind() {
                    "aliased_import" => field_text(module, name, "name"),
                    _ => module.text(name),
                };
                symbols.push(format!("IMPORT:{imported}"));
            }
        }
        "import_from_statement" => {
            let imported = node
                .child_by_field_name("module_name")
                .map(|m| relative_module_name(module, m))
                .unwrap_or_default();
            symbols.push(format!("IMPORT_FROM:{imported}"));
        }
        "future_import_statement" => symbols.push("IMPORT_FROM:__future__".to_string()),
        _ => {}
    });

    symbols
}

fn field_text<'src>(module: &PythonModule<'src>, node: Node<'_>, field: &str) -> &'src str {
    node.child_by_field_name(field)
        .map(|child| module.text(child))
        .unwrap_or_default()
}

/// `from .pkg import x` names `pkg`; a bare `from . import x` names nothing
fn relative_module_name<'src>(module: &PythonModule<'src>, node: Node<'_>) -> &'src str {
    if node.kind() != "relative_import" {
        return module.text(node);
    }
    let mut cursor = node.walk();
    let dotted = node
        .named_children(&mut cursor)
        .find(|child| child.kind() == "dotted_name");
    dotted.map(|d| module.text(d)).unwrap_or_default()
}

/// Parameters that are neither positional-only (before `/`) nor variadic
/// or keyword-only (from `*` onwards)
fn positional_parameter_count(parameters: Node<'_>) -> usize {
    let mut count = 0;
    let mut cursor = parameters.walk();

    for param in parameters.named_children(&mut cursor) {
        match param.kind() {
            "positional_separator" => count = 0,
            "list_splat_pattern" | "dictionary_splat_pattern" | "keyword_separator" => break,
            "typed_parameter" => {
                let splat = param.named_child(0).is_some_and(|inner| {
                    matches!(inner.kind(), "list_splat_pattern" | "dictionary_splat_pattern")
                });
                if splat {
                    break;
                }
                count += 1;
            }
            "identifier" | "default_parameter" | "typed_default_parameter" => count += 1,
            _ => {}
        }
    }

    count
}

/// Language → extractor map with the token-stream fallback
#[derive(Clone)]
pub struct ExtractorRegistry {
    extractors: HashMap<Language, Arc<dyn StructuralExtractor>>,
}

impl ExtractorRegistry {
    /// Registry with no grammar-backed extractors; everything uses tokens
    pub fn empty() -> Self {
        Self {
            extractors: HashMap::new(),
        }
    }

    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(Language::Python, PythonStructureExtractor);
        registry
    }

    pub fn register(&mut self, language: Language, extractor: impl StructuralExtractor + 'static) {
        self.extractors.insert(language, Arc::new(extractor));
    }

    pub fn supports(&self, language: &Language) -> bool {
        self.extractors.contains_key(language)
    }

    /// Fingerprint for `code`, falling back to tokens when no extractor applies
    pub fn extract(&self, code: &str, language: &Language) -> Result<Fingerprint, StructureError> {
        let outcome = match self.extractors.get(language) {
            Some(extractor) => panic::catch_unwind(AssertUnwindSafe(|| extractor.try_extract(code)))
                .unwrap_or_else(|payload| {
                    ExtractOutcome::Failed(StructureError::Panicked(panic_message(&*payload)))
                }),
            None => ExtractOutcome::Unsupported,
        };

        match outcome {
            ExtractOutcome::Symbols(symbols) => Ok(Fingerprint::Symbols(symbols)),
            ExtractOutcome::Unsupported => Ok(Fingerprint::Tokens(tokenize(code))),
            ExtractOutcome::Failed(e) => Err(e),
        }
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

/// Fingerprint using the default registry
pub fn extract_structure(code: &str, language: &Language) -> Result<Fingerprint, StructureError> {
    ExtractorRegistry::new().extract(code, language)
}
