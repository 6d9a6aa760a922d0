/*!
# Plagiarism Analyzer

Code plagiarism detection and code quality analysis for programming
assignments.

## Core Features

- **Similarity scoring** - weighted text, structural and normalized ratios
  between two submissions
- **Structural fingerprints** - tree-sitter symbols for Python, a generic
  token stream for every other language
- **Pairwise comparison** - every pair of a batch scored in parallel with
  rayon, optionally under a wall-clock budget
- **Quality analysis** - syntax validation, complexity, maintainability and
  language-specific heuristics
- **CLI** - `analyze`, `compare`, `scan` and `config` subcommands

## Architecture

```text
Plagiarism Analyzer
├── Core        - Languages, submissions, errors, source decoding
├── Parser      - Generic lexer, tree-sitter Python front-end
├── Similarity  - Normalizer, sequence matcher, extractors, engine
├── Comparator  - Pairwise batches, report ledger
├── Metrics     - Per-language quality analyzers
├── Config      - TOML configuration, submission intake
└── Reports     - Text and JSON rendering for the CLI
```

## Usage

```rust
use plagiarism_analyzer::{compare_all, similarity, Language, SubmissionInput};

let a = "def add(a, b):\n    return a + b\n";
let b = "def add(x, y):\n    # sum\n    return x + y\n";

let score = similarity(a, b, &Language::Python);
assert!(score.overall > 0.5);

let batch = vec![
    SubmissionInput::new("s1", "alice", a, "py"),
    SubmissionInput::new("s2", "bob", a, "py"),
];
let reports = compare_all(&batch, 0.75).unwrap();
assert_eq!(reports.len(), 1);
```
*/

pub mod cli_common;
pub mod comparator;
pub mod config;
pub mod core;
pub mod metrics;
pub mod parser;
pub mod reports;
pub mod similarity;

pub use comparator::{
    compare_all, AssignmentComparison, ComparisonRun, PairComparison, PairwiseComparator, PlagiarismReport,
    ReportLedger,
};
pub use config::{AnalyzerConfig, SubmissionIntake};
pub use crate::core::{AnalyzerError, Language, StructureError, Submission, SubmissionInput};
pub use metrics::{analyze, AnalysisResult, AnalyzerRegistry, LanguageAnalyzer, MetricValue};
pub use parser::tokenize;
pub use similarity::{
    extract_structure, normalize, similarity, ExtractorRegistry, Fingerprint, SimilarityEngine, SimilarityLevel,
    SimilarityScore, StructuralExtractor,
};
