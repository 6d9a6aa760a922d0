/*!
# Pairwise Comparator

Scores every unordered pair of a submission batch and reports the pairs at
or above the plagiarism threshold.

Pairs are visited as `(i, j)` with `i < j` in input order and scored in
parallel with rayon. A pair is compared under the language of its first
submission, so a mixed-language batch is scored asymmetrically. Reports come
back sorted by pair index regardless of scheduling.
*/

pub mod ledger;

pub use ledger::ReportLedger;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::core::errors::{AnalyzerError, Result};
use crate::core::SubmissionInput;
use crate::similarity::{MatchingBlock, SimilarityEngine, SimilarityScore};

pub const DEFAULT_THRESHOLD: f64 = 0.75;

/// Matched character runs must be longer than this to count as significant
pub const DEFAULT_MIN_BLOCK_SIZE: usize = 20;

/// Flagged pair of submissions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlagiarismReport {
    pub submission_a_id: String,
    pub submission_b_id: String,
    pub student_a_id: String,
    pub student_b_id: String,
    pub score: SimilarityScore,
    pub is_plagiarism: bool,
    pub details: String,
}

impl PlagiarismReport {
    fn new(a: &SubmissionInput, b: &SubmissionInput, score: SimilarityScore, threshold: f64) -> Self {
        Self {
            submission_a_id: a.id.clone(),
            submission_b_id: b.id.clone(),
            student_a_id: a.student_id.clone(),
            student_b_id: b.student_id.clone(),
            is_plagiarism: score.overall >= threshold,
            details: score.details().to_string(),
            score,
        }
    }

    /// Ordered pair of submission ids identifying this report
    pub fn pair_key(&self) -> (&str, &str) {
        (&self.submission_a_id, &self.submission_b_id)
    }

    pub fn involves(&self, submission_id: &str) -> bool {
        self.submission_a_id == submission_id || self.submission_b_id == submission_id
    }
}

/// Outcome of a batch run, possibly cut short by a time budget
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRun {
    pub reports: Vec<PlagiarismReport>,
    pub pairs_total: usize,
    pub pairs_compared: usize,
    pub timed_out: bool,
}

/// Batch result for one assignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentComparison {
    pub assignment_id: String,
    pub submissions_analyzed: usize,
    pub threshold: f64,
    pub reports: Vec<PlagiarismReport>,
}

/// Ad hoc comparison of two submissions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairComparison {
    pub score: SimilarityScore,
    pub is_plagiarism: bool,
    pub matching_blocks: Vec<MatchingBlock>,
}

impl PairComparison {
    pub fn significant_blocks(&self) -> usize {
        self.matching_blocks.len()
    }
}

/// Compares submission batches against a fixed threshold
#[derive(Clone)]
pub struct PairwiseComparator {
    engine: SimilarityEngine,
    threshold: f64,
    min_block_size: usize,
    pool: Option<Arc<rayon::ThreadPool>>,
}

impl PairwiseComparator {
    /// Fails unless `threshold` lies in [0, 1]
    pub fn new(threshold: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(AnalyzerError::InvalidThreshold(threshold));
        }
        Ok(Self {
            engine: SimilarityEngine::new(),
            threshold,
            min_block_size: DEFAULT_MIN_BLOCK_SIZE,
            pool: None,
        })
    }

    pub fn with_engine(mut self, engine: SimilarityEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_min_block_size(mut self, min_block_size: usize) -> Self {
        self.min_block_size = min_block_size;
        self
    }

    /// Scores pairs on a dedicated pool; 0 means one thread per CPU
    pub fn with_workers(mut self, workers: usize) -> Result<Self> {
        let workers = if workers == 0 { num_cpus::get() } else { workers };
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("pair-scorer-{i}"))
            .build()
            .map_err(|e| AnalyzerError::WorkerPool(e.to_string()))?;

        tracing::info!("Configured {} worker threads for pairwise comparison", workers);
        self.pool = Some(Arc::new(pool));
        Ok(self)
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn engine(&self) -> &SimilarityEngine {
        &self.engine
    }

    /// Reports for every pair scoring at or above the threshold
    pub fn compare_all(&self, submissions: &[SubmissionInput]) -> Vec<PlagiarismReport> {
        self.compare_batch(submissions).reports
    }

    /// Reports plus pair counts for an unbudgeted run
    pub fn compare_batch(&self, submissions: &[SubmissionInput]) -> ComparisonRun {
        self.run(submissions, None)
    }

    /// Like [`compare_batch`](Self::compare_batch), but pairs not started
    /// before `budget` elapses are skipped
    pub fn compare_within(&self, submissions: &[SubmissionInput], budget: Duration) -> ComparisonRun {
        self.run(submissions, Instant::now().checked_add(budget))
    }

    pub fn compare_assignment(
        &self,
        assignment_id: impl Into<String>,
        submissions: &[SubmissionInput],
    ) -> AssignmentComparison {
        let assignment_id = assignment_id.into();
        let reports = self.compare_all(submissions);
        tracing::info!(
            assignment = %assignment_id,
            submissions = submissions.len(),
            flagged = reports.len(),
            "assignment compared"
        );

        AssignmentComparison {
            assignment_id,
            submissions_analyzed: submissions.len(),
            threshold: self.threshold,
            reports,
        }
    }

    /// Scores one pair under the first submission's language
    pub fn compare_pair(&self, a: &SubmissionInput, b: &SubmissionInput) -> PairComparison {
        let score = self.engine.similarity(&a.code, &b.code, &a.language);
        PairComparison {
            is_plagiarism: score.overall >= self.threshold,
            matching_blocks: self.engine.matching_blocks(&a.code, &b.code, self.min_block_size),
            score,
        }
    }

    fn run(&self, submissions: &[SubmissionInput], deadline: Option<Instant>) -> ComparisonRun {
        let pairs = pair_indices(submissions.len());
        let pairs_total = pairs.len();
        let compared = AtomicUsize::new(0);

        let score_pairs = || {
            pairs
                .par_iter()
                .filter_map(|&(i, j)| {
                    if deadline.is_some_and(|d| Instant::now() >= d) {
                        return None;
                    }
                    compared.fetch_add(1, Ordering::Relaxed);

                    let (a, b) = (&submissions[i], &submissions[j]);
                    let score = self.engine.similarity(&a.code, &b.code, &a.language);
                    tracing::debug!(a = %a.id, b = %b.id, overall = score.overall, "pair scored");

                    (score.overall >= self.threshold)
                        .then(|| ((i, j), PlagiarismReport::new(a, b, score, self.threshold)))
                })
                .collect::<Vec<_>>()
        };

        let mut flagged = match &self.pool {
            Some(pool) => pool.install(score_pairs),
            None => score_pairs(),
        };
        flagged.sort_by_key(|(key, _)| *key);

        let pairs_compared = compared.into_inner();
        let timed_out = pairs_compared < pairs_total;
        if timed_out {
            tracing::warn!(
                "Comparison budget exhausted: {} of {} pairs compared",
                pairs_compared,
                pairs_total
            );
        }
        tracing::info!(
            submissions = submissions.len(),
            pairs = pairs_compared,
            flagged = flagged.len(),
            "batch comparison finished"
        );

        ComparisonRun {
            reports: flagged.into_iter().map(|(_, report)| report).collect(),
            pairs_total,
            pairs_compared,
            timed_out,
        }
    }
}

impl Default for PairwiseComparator {
    fn default() -> Self {
        Self {
            engine: SimilarityEngine::new(),
            threshold: DEFAULT_THRESHOLD,
            min_block_size: DEFAULT_MIN_BLOCK_SIZE,
            pool: None,
        }
    }
}

/// All `(i, j)` with `i < j < n`, in lexicographic order
fn pair_indices(n: usize) -> Vec<(usize, usize)> {
    (0..n)
        .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
        .collect()
}

/// Compares a batch with the default engine
pub fn compare_all(submissions: &[SubmissionInput], threshold: f64) -> Result<Vec<PlagiarismReport>> {
    Ok(PairwiseComparator::new(threshold)?.compare_all(submissions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Language;
    use pretty_assertions::assert_eq;

    fn input(id: &str, code: &str) -> SubmissionInput {
        SubmissionInput::new(id, format!("student-{id}"), code, Language::Python)
    }

    #[test]
    fn test_pair_indices() {
        assert!(pair_indices(0).is_empty());
        assert!(pair_indices(1).is_empty());
        assert_eq!(pair_indices(3), vec![(0, 1), (0, 2), (1, 2)]);
    }

    #[test]
    fn test_threshold_validation() {
        assert!(PairwiseComparator::new(0.0).is_ok());
        assert!(PairwiseComparator::new(1.0).is_ok());
        assert!(matches!(
            PairwiseComparator::new(1.5),
            Err(AnalyzerError::InvalidThreshold(t)) if t == 1.5
        ));
        assert!(PairwiseComparator::new(-0.1).is_err());
        assert!(PairwiseComparator::new(f64::NAN).is_err());
    }

    #[test]
    fn test_small_batches_yield_nothing() {
        let comparator = PairwiseComparator::default();
        assert!(comparator.compare_all(&[]).is_empty());
        assert!(comparator.compare_all(&[input("1", "x = 1")]).is_empty());
    }

    #[test]
    fn test_reports_sorted_by_pair_index() {
        let code = "def f(a):\n    return a + 1\n";
        let batch = vec![input("1", code), input("2", code), input("3", code)];
        let comparator = PairwiseComparator::new(0.5).unwrap().with_workers(2).unwrap();

        let keys: Vec<(String, String)> = comparator
            .compare_all(&batch)
            .iter()
            .map(|r| (r.submission_a_id.clone(), r.submission_b_id.clone()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("1".to_string(), "2".to_string()),
                ("1".to_string(), "3".to_string()),
                ("2".to_string(), "3".to_string()),
            ]
        );
    }

    #[test]
    fn test_zero_budget_skips_everything() {
        let batch = vec![input("1", "x = 1"), input("2", "x = 1")];
        let run = PairwiseComparator::default().compare_within(&batch, Duration::ZERO);
        assert_eq!(run.pairs_total, 1);
        assert_eq!(run.pairs_compared, 0);
        assert!(run.timed_out);
        assert!(run.reports.is_empty());
    }

    #[test]
    fn test_compare_pair_counts_long_blocks() {
        let shared = "def compute_total(values):\n    return sum(values)\n";
        let a = input("1", shared);
        let b = input("2", &format!("# copied\n{shared}"));
        let comparison = PairwiseComparator::default().compare_pair(&a, &b);
        assert!(comparison.is_plagiarism);
        assert_eq!(comparison.significant_blocks(), 1);
    }
}
