/*!
# Plagiarism Analyzer CLI

Command-line interface for code quality analysis and plagiarism detection
over student submissions.
*/

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use walkdir::WalkDir;

use plagiarism_analyzer::cli_common::{self, CommonArgs, OutputWriter};
use plagiarism_analyzer::config::{AnalyzerConfig, SubmissionIntake};
use plagiarism_analyzer::core::{read_source_file, Language, Submission, SubmissionInput};
use plagiarism_analyzer::reports::{emit, FileAnalysis, PairReport, ScanReport};
use plagiarism_analyzer::{AnalyzerRegistry, ReportLedger};

#[derive(Parser)]
#[command(
    name = "plagiarism-analyzer",
    version = env!("CARGO_PKG_VERSION"),
    about = "Code plagiarism detection and code quality analysis for student submissions"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze the quality of a single source file
    Analyze {
        /// Source file
        file: PathBuf,

        /// Language tag overriding the file extension (py, js, java, ...)
        #[arg(short, long)]
        language: Option<String>,
    },

    /// Compare two source files
    Compare {
        file_a: PathBuf,
        file_b: PathBuf,

        /// Language tag overriding the first file's extension
        #[arg(short, long)]
        language: Option<String>,
    },

    /// Compare every submission in a directory against every other
    Scan {
        /// Directory of submissions; files in a subdirectory belong to the
        /// student named by that subdirectory
        dir: PathBuf,

        /// Assignment the submissions belong to
        #[arg(short, long)]
        assignment: String,

        /// Plagiarism threshold in [0, 1]
        #[arg(short, long, env = "PLAGIARISM_THRESHOLD")]
        threshold: Option<f64>,

        /// Stop starting new pairs after this many seconds
        #[arg(long)]
        budget_secs: Option<f64>,

        /// JSON ledger to upsert the flagged pairs into
        #[arg(long)]
        ledger: Option<PathBuf>,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write the default configuration
    Init {
        /// Output file
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = cli_common::init_logging(cli.common.verbose) {
        eprintln!("Failed to initialize logging: {e:#}");
    }

    if let Err(e) = run(cli) {
        cli_common::print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.common.config.as_deref())?;
    let mut out = OutputWriter::stdout(cli.common.format);

    match cli.command {
        Commands::Analyze { file, language } => analyze_command(&file, language.as_deref(), &mut out),
        Commands::Compare {
            file_a,
            file_b,
            language,
        } => compare_command(&file_a, &file_b, language.as_deref(), &config, &mut out),
        Commands::Scan {
            dir,
            assignment,
            threshold,
            budget_secs,
            ledger,
        } => {
            let mut config = config;
            if let Some(threshold) = threshold {
                config.threshold = threshold;
            }
            let budget = budget_secs
                .map(Duration::try_from_secs_f64)
                .transpose()
                .context("Invalid --budget-secs")?;
            scan_command(&dir, &assignment, &config, budget, ledger.as_deref(), &mut out)
        }
        Commands::Config { action } => match action {
            ConfigAction::Init { path, force } => config_init_command(&path, force),
        },
    }
}

fn load_config(path: Option<&Path>) -> Result<AnalyzerConfig> {
    match path {
        Some(path) => {
            cli_common::validate_path(path, "Configuration file")?;
            let config = AnalyzerConfig::load_from_file(path)?;
            tracing::debug!("Loaded configuration from {}", path.display());
            Ok(config)
        }
        None => Ok(AnalyzerConfig::default()),
    }
}

fn read_input(path: &Path, language: Option<&str>) -> Result<SubmissionInput> {
    cli_common::validate_path(path, "Source file")?;
    let decoded = read_source_file(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let language = language.map(Language::from_tag).unwrap_or_else(|| Language::from_path(path));
    let id = path.display().to_string();

    Ok(SubmissionInput::new(id.clone(), id, decoded.text, language))
}

fn analyze_command(file: &Path, language: Option<&str>, out: &mut OutputWriter) -> Result<()> {
    let input = read_input(file, language)?;
    let result = AnalyzerRegistry::new().analyze(&input.code, &input.language);

    emit(
        &FileAnalysis {
            path: file.display().to_string(),
            result: &result,
        },
        out,
    )
}

fn compare_command(
    file_a: &Path,
    file_b: &Path,
    language: Option<&str>,
    config: &AnalyzerConfig,
    out: &mut OutputWriter,
) -> Result<()> {
    let a = read_input(file_a, language)?;
    let b = read_input(file_b, language)?;
    let comparison = config.comparator()?.compare_pair(&a, &b);

    emit(
        &PairReport {
            file_a: file_a.display().to_string(),
            file_b: file_b.display().to_string(),
            threshold: config.threshold,
            comparison: &comparison,
        },
        out,
    )
}

fn scan_command(
    dir: &Path,
    assignment: &str,
    config: &AnalyzerConfig,
    budget: Option<Duration>,
    ledger_path: Option<&Path>,
    out: &mut OutputWriter,
) -> Result<()> {
    cli_common::validate_path(dir, "Submission directory")?;
    config.validate()?;

    let start = Instant::now();
    let (submissions, skipped) = collect_submissions(dir, assignment, config)?;
    let total_bytes: u64 = submissions.iter().map(|s| s.byte_size).sum();
    tracing::info!(
        "Loaded {} submissions ({}), skipped {}",
        submissions.len(),
        cli_common::format_file_size(total_bytes),
        skipped.len()
    );
    let comparator = config.comparator()?;

    let inputs: Vec<SubmissionInput> = submissions.iter().map(Submission::as_input).collect();
    let run = match budget {
        Some(budget) => comparator.compare_within(&inputs, budget),
        None => comparator.compare_batch(&inputs),
    };
    if run.timed_out {
        cli_common::print_warning(&format!(
            "Time budget exhausted after {} of {} pairs",
            run.pairs_compared, run.pairs_total
        ));
    }
    tracing::info!(
        "Scanned {} submissions in {}",
        submissions.len(),
        cli_common::format_duration(start.elapsed())
    );

    if let Some(path) = ledger_path {
        let mut ledger = ReportLedger::load_from_file(path)?;
        let replaced = ledger.upsert_all(run.reports.iter().cloned());
        ledger.save_to_file(path)?;
        tracing::info!(
            "Ledger {} updated: {} reports, {} replaced",
            path.display(),
            ledger.len(),
            replaced
        );
    }

    emit(
        &ScanReport::new(assignment, submissions.len(), config.threshold, &run, skipped),
        out,
    )
}

/// Loads every file under `dir` in path order; refused files are returned
/// as skip messages
fn collect_submissions(
    dir: &Path,
    assignment: &str,
    config: &AnalyzerConfig,
) -> Result<(Vec<Submission>, Vec<String>)> {
    let intake = SubmissionIntake::new(config.clone());
    let analyzers = AnalyzerRegistry::new();
    let mut submissions = Vec::new();
    let mut skipped = Vec::new();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk {}", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(dir).unwrap_or(path);
        let id = relative.display().to_string();

        match intake.load(path, id.clone(), assignment, student_id(relative)) {
            Ok(mut submission) => {
                let analysis = analyzers.analyze(submission.content(), &submission.language);
                if !analysis.is_valid {
                    tracing::warn!("{}: {}", id, analysis.errors.join("; "));
                }
                submission.attach_analysis(analysis);
                submissions.push(submission);
            }
            Err(e) => {
                tracing::debug!("Skipping {}: {}", id, e);
                skipped.push(format!("{id}: {e}"));
            }
        }
    }

    Ok((submissions, skipped))
}

/// First directory component of the relative path, else the file stem
fn student_id(relative: &Path) -> String {
    let mut components = relative.components();
    match (components.next(), components.next()) {
        (Some(first), Some(_)) => first.as_os_str().to_string_lossy().into_owned(),
        _ => relative
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default(),
    }
}

fn config_init_command(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists; pass --force to overwrite",
            path.display()
        );
    }

    AnalyzerConfig::default().save_to_file(path)?;
    cli_common::print_success(&format!("Default configuration written to {}", path.display()));
    Ok(())
}
