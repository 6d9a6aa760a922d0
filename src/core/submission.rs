/*!
# Submissions

A submission's content is fixed at creation; the only later change is
attaching its analysis result.
*/

use serde::{Deserialize, Serialize};

use super::language::Language;
use crate::metrics::AnalysisResult;

/// Stored student submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub id: String,
    pub assignment_id: String,
    pub student_id: String,
    content: String,
    pub language: Language,
    pub byte_size: u64,
    pub encoding: String,
    analysis: Option<AnalysisResult>,
}

impl Submission {
    pub fn new(
        id: impl Into<String>,
        assignment_id: impl Into<String>,
        student_id: impl Into<String>,
        content: impl Into<String>,
        language: Language,
    ) -> Self {
        let content = content.into();
        Self {
            id: id.into(),
            assignment_id: assignment_id.into(),
            student_id: student_id.into(),
            byte_size: content.len() as u64,
            content,
            language,
            encoding: "utf-8".to_string(),
            analysis: None,
        }
    }

    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = encoding.into();
        self
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn analysis(&self) -> Option<&AnalysisResult> {
        self.analysis.as_ref()
    }

    /// Stores (or replaces) the analysis computed for this content
    pub fn attach_analysis(&mut self, analysis: AnalysisResult) {
        self.analysis = Some(analysis);
    }

    /// Record handed to the pairwise comparator
    pub fn as_input(&self) -> SubmissionInput {
        SubmissionInput {
            id: self.id.clone(),
            student_id: self.student_id.clone(),
            code: self.content.clone(),
            language: self.language.clone(),
        }
    }
}

/// One entry of a comparison batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionInput {
    pub id: String,
    pub student_id: String,
    pub code: String,
    pub language: Language,
}

impl SubmissionInput {
    pub fn new(
        id: impl Into<String>,
        student_id: impl Into<String>,
        code: impl Into<String>,
        language: impl Into<Language>,
    ) -> Self {
        Self {
            id: id.into(),
            student_id: student_id.into(),
            code: code.into(),
            language: language.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_size_tracks_utf8_length() {
        let submission = Submission::new("s1", "a1", "st1", "print('é')", Language::Python);
        assert_eq!(submission.byte_size, 11);
        assert_eq!(submission.encoding, "utf-8");
    }

    #[test]
    fn test_as_input_copies_identity() {
        let submission = Submission::new("s1", "a1", "st1", "int x;", Language::C);
        let input = submission.as_input();
        assert_eq!(input.id, "s1");
        assert_eq!(input.student_id, "st1");
        assert_eq!(input.language, Language::C);
        assert_eq!(input.code, "int x;");
    }

    #[test]
    fn test_attach_analysis() {
        let mut submission = Submission::new("s1", "a1", "st1", "x = 1", Language::Python);
        assert!(submission.analysis().is_none());
        submission.attach_analysis(crate::metrics::analyze("x = 1", &Language::Python));
        assert!(submission.analysis().is_some_and(|a| a.is_valid));
    }
}
