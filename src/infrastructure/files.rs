use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::domain::{Evaluation, SubjectEntry};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("{0}")]
    Io(#[from] io::Error),
    #[error("invalid CSV - {0}")]
    Csv(#[from] csv::Error),
    #[error("serialization failed - {0}")]
    Json(#[from] serde_json::Error),
    #[error("clipboard unavailable - {0}")]
    Clipboard(#[from] arboard::Error),
}

/// Output format of an exported result, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ExportFormat::Json,
            _ => ExportFormat::Csv,
        }
    }
}

pub struct FileRepository;

impl FileRepository {
    /// Loads subject entries from a CSV file with a `subject,mark` header.
    ///
    /// Marks stay raw text so that the evaluator decides their validity.
    pub fn import_entries(path: impl AsRef<Path>) -> Result<Vec<SubjectEntry>, ReportError> {
        let path = path.as_ref();
        let entries = Self::read_entries(File::open(path)?)?;
        debug!(file = %path.display(), rows = entries.len(), "read marks csv");
        Ok(entries)
    }

    pub fn read_entries<R: Read>(reader: R) -> Result<Vec<SubjectEntry>, ReportError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);
        let entries = reader
            .deserialize::<SubjectEntry>()
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    /// Writes `evaluation` to `path` and returns the path written, as text.
    pub fn export_evaluation(
        evaluation: &Evaluation,
        path: impl AsRef<Path>,
    ) -> Result<String, ReportError> {
        let path = path.as_ref();
        let format = ExportFormat::from_path(path);
        let file = File::create(path)?;
        Self::write_evaluation(evaluation, format, file)?;
        debug!(file = %path.display(), ?format, "wrote result");
        Ok(path.display().to_string())
    }

    pub fn write_evaluation<W: Write>(
        evaluation: &Evaluation,
        format: ExportFormat,
        mut writer: W,
    ) -> Result<(), ReportError> {
        match format {
            ExportFormat::Json => {
                serde_json::to_writer_pretty(&mut writer, evaluation)?;
                writeln!(writer)?;
            }
            ExportFormat::Csv => {
                let mut csv = csv::Writer::from_writer(writer);
                csv.write_record(["subject", "mark"])?;
                for entry in evaluation.breakdown() {
                    csv.write_record([entry.name(), entry.mark().to_string().as_str()])?;
                }
                csv.write_record(["Total", evaluation.total().to_string().as_str()])?;
                csv.write_record(["Max Total", evaluation.max_total().to_string().as_str()])?;
                csv.write_record(["Percentage", evaluation.percentage_display()])?;
                csv.write_record(["Grade", evaluation.grade().as_str()])?;
                csv.flush()?;
            }
        }
        Ok(())
    }
}
