/*!
# Maintainability Analysis for Python Code

Calculates Halstead metrics and the maintainability index.

The index uses the normalized formula with the comment term:

```text
MI = max(0, (171 - 5.2 ln V - 0.23 G - 16.2 ln L + 50 sin(sqrt(2.46 C))) * 100 / 171)
```

where `V` is the Halstead volume, `G` the total cyclomatic complexity, `L`
the logical line count and `C` the comment percentage (comment tokens and
docstring lines over code lines) taken in radians.
*/

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::complexity::ComplexityMetrics;
use super::raw::RawMetrics;
use crate::parser::{walk_preorder, PythonModule};

/// Expression kinds whose anonymous children are operators and named
/// children are operands
const OPERATOR_PARENTS: &[&str] = &[
    "binary_operator",
    "boolean_operator",
    "comparison_operator",
    "unary_operator",
    "not_operator",
    "augmented_assignment",
];

/// Halstead counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HalsteadMetrics {
    /// n1
    pub distinct_operators: usize,
    /// n2
    pub distinct_operands: usize,
    /// N1
    pub total_operators: usize,
    /// N2
    pub total_operands: usize,
}

impl HalsteadMetrics {
    pub fn from_module(module: &PythonModule<'_>) -> Self {
        let mut operators = HashSet::new();
        let mut operands = HashSet::new();
        let mut total_operators = 0;
        let mut total_operands = 0;

        walk_preorder(module.root(), |node| {
            if !OPERATOR_PARENTS.contains(&node.kind()) {
                return;
            }
            let mut cursor = node.walk();
            for child in node.children(&mut cursor) {
                if child.is_named() {
                    operands.insert(module.text(child));
                    total_operands += 1;
                } else {
                    operators.insert(child.kind());
                    total_operators += 1;
                }
            }
        });

        Self {
            distinct_operators: operators.len(),
            distinct_operands: operands.len(),
            total_operators,
            total_operands,
        }
    }

    pub fn vocabulary(&self) -> usize {
        self.distinct_operators + self.distinct_operands
    }

    pub fn length(&self) -> usize {
        self.total_operators + self.total_operands
    }

    pub fn volume(&self) -> f64 {
        let vocabulary = self.vocabulary();
        if vocabulary == 0 {
            return 0.0;
        }
        self.length() as f64 * (vocabulary as f64).log2()
    }

    pub fn difficulty(&self) -> f64 {
        if self.distinct_operands == 0 {
            return 0.0;
        }
        (self.distinct_operators as f64 / 2.0) * (self.total_operands as f64 / self.distinct_operands as f64)
    }

    pub fn effort(&self) -> f64 {
        self.difficulty() * self.volume()
    }
}

/// Maintainability metrics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaintainabilityMetrics {
    /// Maintainability Index (0-100, higher is better)
    pub maintainability_index: f64,
    pub halstead: HalsteadMetrics,
}

/// Analyzer for maintainability metrics
#[derive(Debug, Default)]
pub struct MaintainabilityAnalyzer;

impl MaintainabilityAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze_module(
        &self,
        module: &PythonModule<'_>,
        raw: &RawMetrics,
        complexity: &ComplexityMetrics,
    ) -> MaintainabilityMetrics {
        let halstead = HalsteadMetrics::from_module(module);
        let comment_percent = if raw.sloc == 0 {
            0.0
        } else {
            (raw.comments + raw.multi) as f64 / raw.sloc as f64 * 100.0
        };

        MaintainabilityMetrics {
            maintainability_index: self.maintainability_index(
                halstead.volume(),
                complexity.total(),
                raw.lloc,
                comment_percent,
            ),
            halstead,
        }
    }

    /// Index in [0, 100]; 100 when there is no volume or no logical line
    pub fn maintainability_index(&self, volume: f64, complexity: u32, lloc: usize, comment_percent: f64) -> f64 {
        if volume <= 0.0 || lloc == 0 {
            return 100.0;
        }

        let comment_term = 50.0 * (2.46 * comment_percent.to_radians()).sqrt().sin();
        let mi = 171.0 - 5.2 * volume.ln() - 0.23 * complexity as f64 - 16.2 * (lloc as f64).ln() + comment_term;
        (mi * 100.0 / 171.0).clamp(0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::ComplexityAnalyzer;
    use crate::parser::parse_python;

    #[test]
    fn test_halstead_counts() {
        let module = parse_python("a = b + c * b\nd = not a\n").unwrap();
        let halstead = HalsteadMetrics::from_module(&module);
        // operators: + * not; operands: b, c*b, c, b, a
        assert_eq!(halstead.distinct_operators, 3);
        assert_eq!(halstead.total_operators, 3);
        assert_eq!(halstead.total_operands, 5);
        assert_eq!(halstead.distinct_operands, 4);
        assert!(halstead.volume() > 0.0);
        assert_eq!(halstead.difficulty(), 1.5 * 5.0 / 4.0);
    }

    #[test]
    fn test_no_operators_is_fully_maintainable() {
        let module = parse_python("def f():\n    pass\n").unwrap();
        let raw = RawMetrics::from_module(&module);
        let complexity = ComplexityAnalyzer::new().analyze_module(&module);
        let metrics = MaintainabilityAnalyzer::new().analyze_module(&module, &raw, &complexity);
        assert_eq!(metrics.maintainability_index, 100.0);
        assert_eq!(metrics.halstead.effort(), 0.0);
    }

    #[test]
    fn test_index_is_clamped() {
        let analyzer = MaintainabilityAnalyzer::new();
        assert_eq!(analyzer.maintainability_index(1e30, 500, 100_000, 0.0), 0.0);
        let small = analyzer.maintainability_index(10.0, 1, 1, 0.0);
        assert!(small > 0.0 && small <= 100.0);
    }

    #[test]
    fn test_more_code_lowers_index() {
        let analyzer = MaintainabilityAnalyzer::new();
        let small = analyzer.maintainability_index(50.0, 2, 5, 0.0);
        let large = analyzer.maintainability_index(5000.0, 40, 400, 0.0);
        assert!(large < small);
    }
}
