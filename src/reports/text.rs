/*!
# Text Reporter

Coloured console rendering of the CLI reports.
*/

use anyhow::Result;
use colored::{ColoredString, Colorize};

use super::{FileAnalysis, PairReport, Report, ScanReport};
use crate::cli_common::OutputWriter;
use crate::similarity::{SimilarityLevel, SimilarityScore};

fn level_colored(level: SimilarityLevel) -> ColoredString {
    let label = level.label();
    match level {
        SimilarityLevel::NearIdentical | SimilarityLevel::High => label.red().bold(),
        SimilarityLevel::Moderate => label.yellow(),
        SimilarityLevel::Low | SimilarityLevel::VeryLow => label.green(),
    }
}

fn percent(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

fn write_score(out: &mut OutputWriter, score: &SimilarityScore) -> Result<()> {
    out.write_line(&format!(
        "Overall similarity: {} ({})",
        percent(score.overall).bold(),
        level_colored(score.level)
    ))?;
    out.write_list_item(&format!("text:       {}", percent(score.text_similarity)))?;
    out.write_list_item(&format!("structural: {}", percent(score.structural_similarity)))?;
    out.write_list_item(&format!("normalized: {}", percent(score.normalized_similarity)))
}

impl Report for FileAnalysis<'_> {
    fn write_text(&self, out: &mut OutputWriter) -> Result<()> {
        let result = self.result;
        out.write_header(&format!("{} ({})", self.path, result.language))?;

        let status = if result.is_valid {
            "valid".green().bold()
        } else {
            "invalid".red().bold()
        };
        out.write_line(&format!(
            "Status: {}  ·  {} lines, {} characters",
            status, result.lines_of_code, result.code_length
        ))?;

        for error in &result.errors {
            out.write_line(&format!("{} {}", "error:".red().bold(), error))?;
        }
        for warning in &result.warnings {
            out.write_line(&format!("{} {}", "warning:".yellow().bold(), warning))?;
        }
        for suggestion in &result.suggestions {
            out.write_line(&format!("{} {}", "suggestion:".cyan(), suggestion))?;
        }

        if !result.metrics.is_empty() {
            let rows: Vec<Vec<String>> = result
                .metrics
                .iter()
                .map(|(name, value)| vec![name.clone(), value.to_string()])
                .collect();
            out.write_line("")?;
            out.write_table(&["metric", "value"], &rows)?;
        }
        Ok(())
    }
}

impl Report for PairReport<'_> {
    fn write_text(&self, out: &mut OutputWriter) -> Result<()> {
        out.write_header(&format!("{} ↔ {}", self.file_a, self.file_b))?;
        write_score(out, &self.comparison.score)?;
        out.write_line(&format!(
            "Significant matching blocks: {}",
            self.comparison.significant_blocks()
        ))?;

        let verdict = if self.comparison.is_plagiarism {
            format!("Flagged at threshold {:.2}", self.threshold).red().bold()
        } else {
            format!("Below threshold {:.2}", self.threshold).green()
        };
        out.write_line(&verdict.to_string())
    }
}

impl Report for ScanReport<'_> {
    fn write_text(&self, out: &mut OutputWriter) -> Result<()> {
        out.write_header(&format!("Assignment {}", self.assignment_id))?;
        out.write_line(&format!(
            "{} submissions, {} of {} pairs compared, threshold {:.2}",
            self.submissions_analyzed, self.pairs_compared, self.pairs_total, self.threshold
        ))?;
        if self.timed_out {
            out.write_line(&"Time budget exhausted; results are partial".yellow().to_string())?;
        }
        for skipped in &self.skipped {
            out.write_line(&format!("{} {}", "skipped:".yellow(), skipped))?;
        }

        if self.reports.is_empty() {
            return out.write_line(&"No suspicious pairs found".green().to_string());
        }

        let rows: Vec<Vec<String>> = self
            .reports
            .iter()
            .map(|r| {
                vec![
                    format!("{} ↔ {}", r.submission_a_id, r.submission_b_id),
                    format!("{} ↔ {}", r.student_a_id, r.student_b_id),
                    format!("{:.4}", r.score.overall),
                    r.details.clone(),
                ]
            })
            .collect();
        out.write_line("")?;
        out.write_table(&["submissions", "students", "score", "level"], &rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli_common::output::tests::SharedBuffer;
    use crate::cli_common::OutputFormat;
    use crate::comparator::{ComparisonRun, PairwiseComparator};
    use crate::core::{Language, SubmissionInput};
    use crate::metrics::analyze;
    use crate::reports::emit;

    fn writer(format: OutputFormat) -> (SharedBuffer, OutputWriter) {
        let buffer = SharedBuffer::default();
        let out = OutputWriter::new(Box::new(buffer.clone()), format);
        (buffer, out)
    }

    #[test]
    fn test_file_analysis_text() {
        let result = analyze("def f(:", &Language::Python);
        let (buffer, mut out) = writer(OutputFormat::Text);
        emit(&FileAnalysis { path: "a.py".into(), result: &result }, &mut out).unwrap();

        let text = buffer.contents();
        assert!(text.contains("a.py (python)"));
        assert!(text.contains("Syntax Error at line 1"));
    }

    #[test]
    fn test_file_analysis_json_is_flat() {
        let result = analyze("def f(): pass", &Language::Python);
        let (buffer, mut out) = writer(OutputFormat::Json);
        emit(&FileAnalysis { path: "a.py".into(), result: &result }, &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_str(&buffer.contents()).unwrap();
        assert_eq!(value["path"], "a.py");
        assert_eq!(value["is_valid"], true);
        assert_eq!(value["metrics"]["functions"], 1);
    }

    #[test]
    fn test_scan_report_lists_pairs() {
        let code = "def f(a):\n    return a * 2\n";
        let batch = vec![
            SubmissionInput::new("s1", "alice", code, "py"),
            SubmissionInput::new("s2", "bob", code, "py"),
        ];
        let run: ComparisonRun = PairwiseComparator::default().compare_within(&batch, std::time::Duration::from_secs(60));
        let report = ScanReport::new("hw1", 2, 0.75, &run, vec![]);

        let (buffer, mut out) = writer(OutputFormat::Text);
        emit(&report, &mut out).unwrap();
        let text = buffer.contents();
        assert!(text.contains("Assignment hw1"));
        assert!(text.contains("s1 ↔ s2"));
        assert!(text.contains("alice ↔ bob"));
    }
}
