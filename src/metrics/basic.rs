//! Fallback analysis for languages without a dedicated analyzer.

use super::{line_count, AnalysisResult};

pub const BASIC_ANALYSIS_WARNING: &str = "Basic analysis only - language-specific validation not available";

/// Line and character counts; the result carries the declared tag as its language
#[derive(Debug, Clone)]
pub struct BasicAnalyzer {
    tag: String,
}

impl BasicAnalyzer {
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }

    pub fn analyze(&self, code: &str) -> AnalysisResult {
        let mut result = AnalysisResult::new(self.tag.clone());
        result.add_warning(BASIC_ANALYSIS_WARNING);
        result.set_metric("lines_of_code", line_count(code));
        result.set_metric("characters", code.chars().count());
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_metrics() {
        let result = BasicAnalyzer::new("rb").analyze("puts 1\nputs 2\n");
        assert!(result.is_valid);
        assert_eq!(result.language, "rb");
        assert_eq!(result.warnings, vec![BASIC_ANALYSIS_WARNING.to_string()]);
        assert_eq!(result.metric_int("lines_of_code"), Some(2));
        assert_eq!(result.metric_int("characters"), Some(14));
    }
}
