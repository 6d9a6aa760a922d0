/*!
# Report Ledger

In-memory store of plagiarism reports keyed by the ordered pair of submission
ids. Re-running a pair replaces its report in place, so repeated scans never
duplicate entries. The ledger serializes to JSON for the CLI.
*/

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::PlagiarismReport;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportLedger {
    reports: Vec<PlagiarismReport>,
}

impl ReportLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `report`, replacing the stored one for the same pair.
    /// Returns `true` when an existing report was replaced.
    pub fn upsert(&mut self, report: PlagiarismReport) -> bool {
        match self
            .reports
            .iter_mut()
            .find(|stored| stored.pair_key() == report.pair_key())
        {
            Some(stored) => {
                *stored = report;
                true
            }
            None => {
                self.reports.push(report);
                false
            }
        }
    }

    /// Upserts every report; returns how many replaced existing ones
    pub fn upsert_all(&mut self, reports: impl IntoIterator<Item = PlagiarismReport>) -> usize {
        let mut replaced = 0;
        for report in reports {
            if self.upsert(report) {
                replaced += 1;
            }
        }
        replaced
    }

    pub fn get(&self, submission_a_id: &str, submission_b_id: &str) -> Option<&PlagiarismReport> {
        self.reports
            .iter()
            .find(|r| r.pair_key() == (submission_a_id, submission_b_id))
    }

    /// Reports naming `submission_id` on either side, in insertion order
    pub fn for_submission<'a>(&'a self, submission_id: &'a str) -> impl Iterator<Item = &'a PlagiarismReport> + 'a {
        self.reports.iter().filter(move |r| r.involves(submission_id))
    }

    pub fn reports(&self) -> &[PlagiarismReport] {
        &self.reports
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    /// Loads a ledger file; a missing file yields an empty ledger
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read report ledger from {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse report ledger from {}", path.display()))
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self).context("Failed to serialize report ledger")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write report ledger to {}", path.display()))
    }
}
