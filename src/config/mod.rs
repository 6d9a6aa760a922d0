/*!
# Analyzer Configuration

Detection threshold, intake limits and worker count, loaded from a TOML file.
Every field has a default, so a partial file (or none at all) is valid.

```toml
threshold = 0.75
min_block_size = 20
max_file_size = 10485760
allowed_extensions = ["py", "js", "java"]
workers = 4
```
*/

pub mod intake;

pub use intake::SubmissionIntake;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::comparator::{PairwiseComparator, DEFAULT_MIN_BLOCK_SIZE, DEFAULT_THRESHOLD};
use crate::core::AnalyzerError;

/// 10 MiB
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

pub const DEFAULT_ALLOWED_EXTENSIONS: &[&str] =
    &["py", "js", "java", "cpp", "c", "cs", "ts", "jsx", "tsx", "html", "css"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Pairs scoring at or above this are flagged
    pub threshold: f64,
    /// Matched character runs longer than this count as significant
    pub min_block_size: usize,
    /// Largest accepted submission file, in bytes
    pub max_file_size: u64,
    /// Accepted file extensions, without the leading dot
    pub allowed_extensions: Vec<String>,
    /// Dedicated comparison threads; unset uses the global rayon pool
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workers: Option<usize>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            min_block_size: DEFAULT_MIN_BLOCK_SIZE,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            workers: None,
        }
    }
}

impl AnalyzerConfig {
    /// Load configuration from TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).with_context(|| {
            format!("Failed to read analyzer config from {}", path.as_ref().display())
        })?;

        let config: Self = toml::from_str(&content).with_context(|| {
            format!("Failed to parse TOML config from {}", path.as_ref().display())
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize analyzer config to TOML")?;

        std::fs::write(&path, content).with_context(|| {
            format!("Failed to write analyzer config to {}", path.as_ref().display())
        })?;

        Ok(())
    }

    pub fn validate(&self) -> std::result::Result<(), AnalyzerError> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(AnalyzerError::InvalidThreshold(self.threshold));
        }
        if self.max_file_size == 0 {
            return Err(AnalyzerError::InvalidConfig(
                "max_file_size must be greater than 0".to_string(),
            ));
        }
        if self.workers == Some(0) {
            return Err(AnalyzerError::InvalidConfig(
                "workers must be greater than 0 when set".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether `extension` (case-insensitive, leading dot ignored) is accepted
    pub fn allows_extension(&self, extension: &str) -> bool {
        let extension = extension.trim_start_matches('.');
        self.allowed_extensions
            .iter()
            .any(|allowed| allowed.trim_start_matches('.').eq_ignore_ascii_case(extension))
    }

    /// Comparator configured with this threshold, block size and worker count
    pub fn comparator(&self) -> std::result::Result<PairwiseComparator, AnalyzerError> {
        let comparator = PairwiseComparator::new(self.threshold)?.with_min_block_size(self.min_block_size);
        match self.workers {
            Some(workers) => comparator.with_workers(workers),
            None => Ok(comparator),
        }
    }
}
