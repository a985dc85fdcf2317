//! Annotation table output.
//!
//! The table has one row per interval with the columns
//! `annotation`, `startPos`, `endPos`, `genome`. Coordinates are 0-indexed and
//! inclusive.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::interval::Interval;

pub mod table;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Annotation table encoding
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    #[default]
    Tsv,
    Json,
}

impl ReportFormat {
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Tsv => "tsv",
            Self::Json => "json",
        }
    }
}

/// Output file for a run: `<dir>/GeneCutterParser_<run_id>.<ext>`
#[must_use]
pub fn output_path(dir: &Path, run_id: &str, format: ReportFormat) -> PathBuf {
    dir.join(format!("GeneCutterParser_{run_id}.{}", format.extension()))
}

/// Write `intervals` to `path` in the given format
///
/// # Errors
///
/// Returns `ReportError::Io` if the file cannot be created or written, or
/// `ReportError::Json` if JSON serialization fails.
pub fn write_report(
    path: &Path,
    intervals: &[Interval],
    format: ReportFormat,
) -> Result<(), ReportError> {
    let mut writer = BufWriter::new(File::create(path)?);
    match format {
        ReportFormat::Tsv => table::write_tsv(&mut writer, intervals)?,
        ReportFormat::Json => table::write_json(&mut writer, intervals)?,
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path() {
        assert_eq!(
            output_path(Path::new("/out"), "run7", ReportFormat::Tsv),
            PathBuf::from("/out/GeneCutterParser_run7.tsv")
        );
        assert_eq!(
            output_path(Path::new("/out"), "run7", ReportFormat::Json),
            PathBuf::from("/out/GeneCutterParser_run7.json")
        );
    }

    #[test]
    fn test_write_report_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = output_path(dir.path(), "r1", ReportFormat::Tsv);
        write_report(&path, &[Interval::new("S1", "Nef", 3, 9)], ReportFormat::Tsv).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().nth(1), Some("Nef\t3\t9\tS1"));
    }
}
