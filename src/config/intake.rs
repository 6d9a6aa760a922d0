/*!
# Submission Intake

Turns uploaded files into [`Submission`]s: the extension must be allowed, the
size must fit the limit, and the bytes are decoded (UTF-8, UTF-16 by BOM,
Windows-1252 fallback). The declared language is the file extension.
*/

use std::path::Path;

use super::AnalyzerConfig;
use crate::core::errors::{AnalyzerError, Result};
use crate::core::{read_source_file, Language, Submission};

#[derive(Debug, Clone)]
pub struct SubmissionIntake {
    config: AnalyzerConfig,
}

impl SubmissionIntake {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Rejects files with a disallowed extension or above the size limit
    pub fn check(&self, path: &Path) -> Result<()> {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default();
        if !self.config.allows_extension(&extension) {
            return Err(AnalyzerError::ExtensionNotAllowed {
                path: path.to_path_buf(),
                extension,
            });
        }

        let size = std::fs::metadata(path)
            .map_err(|source| AnalyzerError::Io {
                path: path.to_path_buf(),
                source,
            })?
            .len();
        if size > self.config.max_file_size {
            return Err(AnalyzerError::FileTooLarge {
                path: path.to_path_buf(),
                size,
                limit: self.config.max_file_size,
            });
        }

        Ok(())
    }

    /// Reads an accepted file into a submission
    pub fn load(
        &self,
        path: &Path,
        id: impl Into<String>,
        assignment_id: impl Into<String>,
        student_id: impl Into<String>,
    ) -> Result<Submission> {
        self.check(path)?;

        let decoded = read_source_file(path).map_err(|source| AnalyzerError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), encoding = decoded.encoding, "submission read");

        Ok(
            Submission::new(id, assignment_id, student_id, decoded.text, Language::from_path(path))
                .with_encoding(decoded.encoding),
        )
    }
}

impl Default for SubmissionIntake {
    fn default() -> Self {
        Self::new(AnalyzerConfig::default())
    }
}
