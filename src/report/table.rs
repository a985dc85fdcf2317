use std::io::Write;

use serde::Serialize;

use crate::core::interval::Interval;
use crate::report::ReportError;

/// Header row of the annotation table
pub const TSV_HEADER: [&str; 4] = ["annotation", "startPos", "endPos", "genome"];

/// One JSON row, field names matching the TSV header
#[derive(Serialize)]
struct AnnotationRow<'a> {
    annotation: &'a str,
    #[serde(rename = "startPos")]
    start_pos: usize,
    #[serde(rename = "endPos")]
    end_pos: usize,
    genome: &'a str,
}

impl<'a> From<&'a Interval> for AnnotationRow<'a> {
    fn from(interval: &'a Interval) -> Self {
        Self {
            annotation: &interval.region,
            start_pos: interval.start,
            end_pos: interval.end,
            genome: &interval.subject,
        }
    }
}

/// Write the annotation table as tab-separated text with a header row
///
/// # Errors
///
/// Returns `ReportError::Io` if writing fails.
pub fn write_tsv<W: Write>(writer: &mut W, intervals: &[Interval]) -> Result<(), ReportError> {
    writeln!(writer, "{}", TSV_HEADER.join("\t"))?;
    for interval in intervals {
        writeln!(
            writer,
            "{}\t{}\t{}\t{}",
            interval.region, interval.start, interval.end, interval.subject
        )?;
    }
    Ok(())
}

/// Write the annotation table as a pretty-printed JSON array
///
/// # Errors
///
/// Returns `ReportError::Json` if serialization fails or `ReportError::Io` if
/// writing fails.
pub fn write_json<W: Write>(writer: &mut W, intervals: &[Interval]) -> Result<(), ReportError> {
    let rows: Vec<AnnotationRow<'_>> = intervals.iter().map(AnnotationRow::from).collect();
    serde_json::to_writer_pretty(&mut *writer, &rows)?;
    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intervals() -> Vec<Interval> {
        vec![
            Interval::new("S1", "Env", 0, 3),
            Interval::new("S1", "Rev", 10, 14),
        ]
    }

    #[test]
    fn test_write_tsv() {
        let mut out = Vec::new();
        write_tsv(&mut out, &intervals()).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "annotation\tstartPos\tendPos\tgenome\nEnv\t0\t3\tS1\nRev\t10\t14\tS1\n"
        );
    }

    #[test]
    fn test_write_tsv_empty_table_keeps_header() {
        let mut out = Vec::new();
        write_tsv(&mut out, &[]).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "annotation\tstartPos\tendPos\tgenome\n"
        );
    }

    #[test]
    fn test_write_json() {
        let mut out = Vec::new();
        write_json(&mut out, &intervals()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[1]["annotation"], "Rev");
        assert_eq!(value[1]["startPos"], 10);
        assert_eq!(value[1]["endPos"], 14);
        assert_eq!(value[1]["genome"], "S1");
    }
}
