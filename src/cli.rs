//! Command-line interface.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use thiserror::Error;
use tracing::info;

use crate::application::MAX_SUBJECTS;
use crate::domain::{DomainError, GradeEvaluator, PER_SUBJECT_MAX};
use crate::infrastructure::{FileRepository, ReportError};

#[derive(Debug, Parser)]
#[command(name = "marksheet", version, about = "Marks calculator: total, percentage and grade")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Create this many subject rows on start-up
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u16).range(1..=MAX_SUBJECTS as i64))]
    pub subjects: Option<u16>,

    /// Append log output to this file (the form itself never logs to the terminal)
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Evaluate a CSV with a `subject,mark` header and print the result
    Evaluate {
        /// Marks file to read
        input: PathBuf,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Highest mark a single subject can receive
        #[arg(long, default_value_t = PER_SUBJECT_MAX)]
        max: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Why `marksheet evaluate` failed. Any of these ends the process with
/// status 1 and the message on stderr.
#[derive(Debug, Error)]
pub enum EvaluateError {
    #[error(transparent)]
    Invalid(#[from] DomainError),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error("could not write result - {0}")]
    Output(#[from] io::Error),
}

/// Reads a marks CSV, evaluates it and writes the result to `out`.
///
/// On a validation failure nothing is written and the uniform validation
/// message comes back as the error.
pub fn evaluate_file<W: Write>(
    input: &Path,
    format: OutputFormat,
    evaluator: GradeEvaluator,
    mut out: W,
) -> Result<(), EvaluateError> {
    let entries = FileRepository::import_entries(input)?;
    info!(file = %input.display(), subjects = entries.len(), "evaluating marks file");
    let evaluation = evaluator.evaluate(&entries)?;

    match format {
        OutputFormat::Text => write!(out, "{evaluation}")?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &evaluation).map_err(ReportError::from)?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn marks_file(dir: &tempfile::TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("marks.csv");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_evaluate_file_text_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = marks_file(&dir, "subject,mark\nMaths,90\nPhysics,80\nHistory,70\n");

        let mut out = Vec::new();
        evaluate_file(&path, OutputFormat::Text, GradeEvaluator::default(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Total: 240 / 300\nPercentage: 80.00%\nGrade: A\n"));
        assert!(text.contains("  History: 70\n"));
    }

    #[test]
    fn test_evaluate_file_json_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = marks_file(&dir, "subject,mark\nMaths,100\nArt,100\n");

        let mut out = Vec::new();
        evaluate_file(&path, OutputFormat::Json, GradeEvaluator::default(), &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["grade"], "A+");
        assert_eq!(value["percentage_display"], "100.00");
    }

    #[test]
    fn test_evaluate_file_invalid_marks_reports_uniform_message() {
        let dir = tempfile::tempdir().unwrap();
        let path = marks_file(&dir, "subject,mark\nMaths,50\nArt,abc\n");

        let mut out = Vec::new();
        let err = evaluate_file(&path, OutputFormat::Text, GradeEvaluator::default(), &mut out)
            .unwrap_err();

        assert!(matches!(err, EvaluateError::Invalid(_)));
        assert_eq!(
            err.to_string(),
            "Please enter valid marks (0 to 100) for every subject."
        );
        assert!(out.is_empty());
    }

    #[test]
    fn test_evaluate_file_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let mut out = Vec::new();
        let err = evaluate_file(
            &dir.path().join("absent.csv"),
            OutputFormat::Json,
            GradeEvaluator::default(),
            &mut out,
        )
        .unwrap_err();

        assert!(matches!(err, EvaluateError::Report(ReportError::Io(_))));
    }

    #[test]
    fn test_no_arguments_opens_form() {
        let cli = Cli::try_parse_from(["marksheet"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.subjects.is_none());
        assert!(cli.log_file.is_none());
    }

    #[test]
    fn test_subjects_flag_bounds() {
        let cli = Cli::try_parse_from(["marksheet", "-n", "5"]).unwrap();
        assert_eq!(cli.subjects, Some(5));

        assert!(Cli::try_parse_from(["marksheet", "--subjects", "0"]).is_err());
        assert!(Cli::try_parse_from(["marksheet", "--subjects", "101"]).is_err());
    }

    #[test]
    fn test_evaluate_subcommand() {
        let cli = Cli::try_parse_from([
            "marksheet",
            "evaluate",
            "marks.csv",
            "--format",
            "json",
            "--log-file",
            "run.log",
        ])
        .unwrap();

        match cli.command {
            Some(Command::Evaluate { input, format, max }) => {
                assert_eq!(input, PathBuf::from("marks.csv"));
                assert_eq!(format, OutputFormat::Json);
                assert_eq!(max, 100.0);
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert_eq!(cli.log_file, Some(PathBuf::from("run.log")));
    }
}
