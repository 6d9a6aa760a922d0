/*!
# Reports

Printable views of analysis and comparison results. Every report serializes
to JSON as-is and has a coloured text rendering for terminals.
*/

pub mod text;

use anyhow::Result;
use serde::Serialize;

use crate::cli_common::{OutputFormat, OutputWriter};
use crate::comparator::{ComparisonRun, PairComparison, PlagiarismReport};
use crate::metrics::AnalysisResult;

/// Result that can be written in either output format
pub trait Report: Serialize {
    fn write_text(&self, out: &mut OutputWriter) -> Result<()>;
}

/// Writes `report` in the writer's format
pub fn emit<R: Report>(report: &R, out: &mut OutputWriter) -> Result<()> {
    match out.format() {
        OutputFormat::Json => out.write_object(report)?,
        OutputFormat::Text => report.write_text(out)?,
    }
    out.flush()
}

/// Quality analysis of one file
#[derive(Debug, Serialize)]
pub struct FileAnalysis<'a> {
    pub path: String,
    #[serde(flatten)]
    pub result: &'a AnalysisResult,
}

/// Ad hoc comparison of two files
#[derive(Debug, Serialize)]
pub struct PairReport<'a> {
    pub file_a: String,
    pub file_b: String,
    pub threshold: f64,
    #[serde(flatten)]
    pub comparison: &'a PairComparison,
}

/// Outcome of scanning a directory of submissions
#[derive(Debug, Serialize)]
pub struct ScanReport<'a> {
    pub assignment_id: String,
    pub submissions_analyzed: usize,
    pub threshold: f64,
    pub pairs_total: usize,
    pub pairs_compared: usize,
    pub timed_out: bool,
    pub reports: &'a [PlagiarismReport],
    /// Files refused by intake, with the reason
    pub skipped: Vec<String>,
}

impl<'a> ScanReport<'a> {
    pub fn new(
        assignment_id: impl Into<String>,
        submissions_analyzed: usize,
        threshold: f64,
        run: &'a ComparisonRun,
        skipped: Vec<String>,
    ) -> Self {
        Self {
            assignment_id: assignment_id.into(),
            submissions_analyzed,
            threshold,
            pairs_total: run.pairs_total,
            pairs_compared: run.pairs_compared,
            timed_out: run.timed_out,
            reports: &run.reports,
            skipped,
        }
    }
}
