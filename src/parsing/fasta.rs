//! FASTA input using noodles.
//!
//! Reads subject genomes and Gene Cutter region files. Supports both
//! uncompressed and gzip/bgzip compressed files.

use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::GzDecoder;
use noodles::fasta;
use thiserror::Error;

use crate::core::sequence::{RegionRecord, SubjectSequence, SubjectTable, SubjectTableError};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid FASTA: {0}")]
    InvalidFormat(String),

    #[error("noodles error: {0}")]
    Noodles(String),

    #[error(transparent)]
    Subjects(#[from] SubjectTableError),
}

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// A named FASTA record, residues as read
struct RawRecord {
    name: String,
    sequence: Vec<u8>,
}

fn open_records(path: &Path) -> Result<Vec<RawRecord>, ParseError> {
    let file = std::fs::File::open(path)?;
    if is_gzipped(path) {
        let reader = BufReader::new(GzDecoder::new(file));
        read_records(&mut fasta::io::Reader::new(reader))
    } else {
        let reader = BufReader::new(file);
        read_records(&mut fasta::io::Reader::new(reader))
    }
}

fn read_records<R: BufRead>(
    reader: &mut fasta::io::Reader<R>,
) -> Result<Vec<RawRecord>, ParseError> {
    let mut records = Vec::new();

    for result in reader.records() {
        let record = result
            .map_err(|e| ParseError::Noodles(format!("Failed to parse FASTA record: {e}")))?;

        records.push(RawRecord {
            name: String::from_utf8_lossy(record.name()).to_string(),
            sequence: record.sequence().as_ref().to_vec(),
        });
    }

    Ok(records)
}

/// Read the subject genomes into a lookup table.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, `ParseError::Noodles` if
/// parsing fails, `ParseError::InvalidFormat` if no sequences are found, or
/// `ParseError::Subjects` if a record name appears twice.
pub fn read_subjects(path: &Path) -> Result<SubjectTable, ParseError> {
    let records = open_records(path)?;
    if records.is_empty() {
        return Err(ParseError::InvalidFormat(format!(
            "No sequences found in {}",
            path.display()
        )));
    }

    let mut table = SubjectTable::new();
    for record in records {
        table.insert(SubjectSequence::new(record.name, record.sequence))?;
    }
    Ok(table)
}

/// Read every record of one region file, tagging each with `region`.
///
/// An empty file yields no records.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read or `ParseError::Noodles`
/// if parsing fails.
pub fn read_region_records(path: &Path, region: &str) -> Result<Vec<RegionRecord>, ParseError> {
    Ok(open_records(path)?
        .into_iter()
        .map(|record| RegionRecord::new(record.name, region, record.sequence))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn fasta_file(content: &[u8], suffix: &str) -> NamedTempFile {
        let mut temp = NamedTempFile::with_suffix(suffix).unwrap();
        temp.write_all(content).unwrap();
        temp.flush().unwrap();
        temp
    }

    #[test]
    fn test_read_subjects() {
        let temp = fasta_file(b">S1 description\nacgtACGT\nACGT\n>S2\nGGGG\n", ".fasta");

        let subjects = read_subjects(temp.path()).unwrap();
        assert_eq!(subjects.len(), 2);
        assert_eq!(subjects.get("S1").unwrap().sequence(), b"ACGTACGTACGT");
        assert_eq!(subjects.get("S2").unwrap().len(), 4);
    }

    #[test]
    fn test_read_subjects_rejects_duplicate_names() {
        let temp = fasta_file(b">S1\nACGT\n>S1\nGGGG\n", ".fasta");
        let err = read_subjects(temp.path()).unwrap_err();
        assert!(matches!(err, ParseError::Subjects(_)));
    }

    #[test]
    fn test_read_empty_subjects() {
        let temp = fasta_file(b"", ".fasta");
        assert!(matches!(
            read_subjects(temp.path()),
            Err(ParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_read_region_records_keeps_gaps() {
        let temp = fasta_file(b">S1_Rev\nAC--GT\n>S2_Rev\nAAAA\n", ".na.fasta");

        let records = read_region_records(temp.path(), "Rev").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "S1_Rev");
        assert_eq!(records[0].region, "Rev");
        assert_eq!(records[0].sequence, b"AC--GT".to_vec());
        assert_eq!(records[1].subject_key(), "S2");
    }

    #[test]
    fn test_read_gzipped_subjects() {
        use flate2::write::GzEncoder;
        use flate2::Compression;

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b">S1\nACGTACGT\n").unwrap();
        let compressed = encoder.finish().unwrap();
        let temp = fasta_file(&compressed, ".fasta.gz");

        let subjects = read_subjects(temp.path()).unwrap();
        assert_eq!(subjects.get("S1").unwrap().sequence(), b"ACGTACGT");
    }
}
