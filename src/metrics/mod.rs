/*!
# Code Quality Analysis

Per-submission static checks. Each language family has its own
[`LanguageAnalyzer`]; the [`AnalyzerRegistry`] dispatches on the declared
language and falls back to [`BasicAnalyzer`] for anything unregistered.

- **Python** - syntax validation, raw line metrics, cyclomatic complexity,
  Halstead and maintainability index from the tree-sitter tree
- **JavaScript/TypeScript, Java, C/C++, C#** - regex heuristics and
  bracket balance
- **Basic** - line and character counts only
*/

pub mod basic;
pub mod complexity;
pub mod heuristics;
pub mod maintainability;
pub mod python;
pub mod raw;

pub use basic::BasicAnalyzer;
pub use complexity::{BlockComplexity, BlockKind, ComplexityAnalyzer, ComplexityMetrics};
pub use heuristics::{CFamilyAnalyzer, CSharpAnalyzer, JavaAnalyzer, JavaScriptAnalyzer};
pub use maintainability::{HalsteadMetrics, MaintainabilityAnalyzer, MaintainabilityMetrics};
pub use python::PythonAnalyzer;
pub use raw::RawMetrics;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use crate::core::Language;

/// Single metric value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Flag(bool),
    Int(i64),
    Float(f64),
}

impl MetricValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            MetricValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            MetricValue::Float(v) => Some(*v),
            MetricValue::Int(v) => Some(*v as f64),
            MetricValue::Flag(_) => None,
        }
    }
}

impl From<usize> for MetricValue {
    fn from(value: usize) -> Self {
        MetricValue::Int(value as i64)
    }
}

impl From<i64> for MetricValue {
    fn from(value: i64) -> Self {
        MetricValue::Int(value)
    }
}

impl From<f64> for MetricValue {
    fn from(value: f64) -> Self {
        MetricValue::Float(value)
    }
}

impl From<bool> for MetricValue {
    fn from(value: bool) -> Self {
        MetricValue::Flag(value)
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Flag(v) => write!(f, "{}", v),
            MetricValue::Int(v) => write!(f, "{}", v),
            MetricValue::Float(v) => write!(f, "{:.2}", v),
        }
    }
}

/// Outcome of analysing one submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub is_valid: bool,
    /// Label of the analyzer that ran, or the declared tag for unknown languages
    pub language: String,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub metrics: BTreeMap<String, MetricValue>,
    pub suggestions: Vec<String>,
    /// Length in characters
    pub code_length: usize,
    /// Physical line count
    pub lines_of_code: usize,
}

impl AnalysisResult {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            is_valid: true,
            language: language.into(),
            errors: Vec::new(),
            warnings: Vec::new(),
            metrics: BTreeMap::new(),
            suggestions: Vec::new(),
            code_length: 0,
            lines_of_code: 0,
        }
    }

    pub fn set_metric(&mut self, name: &str, value: impl Into<MetricValue>) {
        self.metrics.insert(name.to_string(), value.into());
    }

    pub fn metric(&self, name: &str) -> Option<MetricValue> {
        self.metrics.get(name).copied()
    }

    pub fn metric_int(&self, name: &str) -> Option<i64> {
        self.metric(name).and_then(|v| v.as_int())
    }

    pub fn metric_float(&self, name: &str) -> Option<f64> {
        self.metric(name).and_then(|v| v.as_float())
    }

    /// Records an error and marks the code invalid
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
        self.is_valid = false;
    }

    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn add_suggestion(&mut self, message: impl Into<String>) {
        self.suggestions.push(message.into());
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Analysis capability for one language family
pub trait LanguageAnalyzer: Send + Sync {
    /// Human-readable language label written into results
    fn label(&self) -> &'static str;

    fn analyze(&self, code: &str) -> AnalysisResult;
}

/// Language → analyzer map with the basic fallback
#[derive(Clone)]
pub struct AnalyzerRegistry {
    analyzers: HashMap<Language, Arc<dyn LanguageAnalyzer>>,
}

impl AnalyzerRegistry {
    /// Registry where every language gets the basic analysis
    pub fn empty() -> Self {
        Self {
            analyzers: HashMap::new(),
        }
    }

    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(Language::Python, PythonAnalyzer::new());

        let javascript = Arc::new(JavaScriptAnalyzer);
        for language in [Language::JavaScript, Language::Jsx, Language::TypeScript, Language::Tsx] {
            registry.register_shared(language, javascript.clone());
        }

        registry.register(Language::Java, JavaAnalyzer);

        let c_family = Arc::new(CFamilyAnalyzer);
        registry.register_shared(Language::C, c_family.clone());
        registry.register_shared(Language::Cpp, c_family);

        registry.register(Language::CSharp, CSharpAnalyzer);
        registry
    }

    pub fn register(&mut self, language: Language, analyzer: impl LanguageAnalyzer + 'static) {
        self.register_shared(language, Arc::new(analyzer));
    }

    pub fn register_shared(&mut self, language: Language, analyzer: Arc<dyn LanguageAnalyzer>) {
        self.analyzers.insert(language, analyzer);
    }

    pub fn supports(&self, language: &Language) -> bool {
        self.analyzers.contains_key(language)
    }

    pub fn analyze(&self, code: &str, language: &Language) -> AnalysisResult {
        let mut result = match self.analyzers.get(language) {
            Some(analyzer) => analyzer.analyze(code),
            None => BasicAnalyzer::new(language.tag()).analyze(code),
        };

        result.code_length = code.chars().count();
        result.lines_of_code = line_count(code);

        tracing::debug!(
            language = %language,
            valid = result.is_valid,
            errors = result.errors.len(),
            warnings = result.warnings.len(),
            "analysis completed"
        );
        result
    }
}

impl Default for AnalyzerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Analysis using the default registry
pub fn analyze(code: &str, language: &Language) -> AnalysisResult {
    AnalyzerRegistry::new().analyze(code, language)
}

/// Rounds to 2 decimal digits
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Lines split on every boundary Python's `str.splitlines` recognizes;
/// `\r\n` is one boundary and a trailing one adds no line
pub(crate) fn split_lines(code: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = code.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !is_line_boundary(c) {
            continue;
        }
        lines.push(&code[start..i]);
        start = i + c.len_utf8();
        if c == '\r' {
            if let Some((j, '\n')) = chars.peek().copied() {
                chars.next();
                start = j + 1;
            }
        }
    }
    if start < code.len() {
        lines.push(&code[start..]);
    }

    lines
}

pub(crate) fn line_count(code: &str) -> usize {
    split_lines(code).len()
}

fn is_line_boundary(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}
