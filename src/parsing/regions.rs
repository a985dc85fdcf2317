//! Discovery of Gene Cutter region files.
//!
//! Gene Cutter writes one nucleotide FASTA per region, named
//! `<Region>.na.fasta` (e.g. `Rev.na.fasta`, `5LTR.na.fasta`).

use std::path::{Path, PathBuf};

use crate::parsing::fasta::ParseError;

/// File name suffix of nucleotide region files
pub const REGION_FILE_SUFFIX: &str = ".na.fasta";

/// A region file and the region name derived from its file name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionFile {
    pub region: String,
    pub path: PathBuf,
}

/// Region name for a file name, if it is a region file
#[must_use]
pub fn region_name(file_name: &str) -> Option<&str> {
    file_name
        .strip_suffix(REGION_FILE_SUFFIX)
        .filter(|name| !name.is_empty())
}

/// List the region files in `dir`, sorted by region name.
///
/// # Errors
///
/// Returns `ParseError::Io` if the directory cannot be read.
pub fn find_region_files(dir: &Path) -> Result<Vec<RegionFile>, ParseError> {
    let mut files = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let file_name = entry.file_name();
        let Some(region) = file_name.to_str().and_then(region_name) else {
            continue;
        };
        files.push(RegionFile {
            region: region.to_string(),
            path: entry.path(),
        });
    }

    files.sort_by(|a, b| a.region.cmp(&b.region));
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_name() {
        assert_eq!(region_name("Rev.na.fasta"), Some("Rev"));
        assert_eq!(region_name("5LTR.na.fasta"), Some("5LTR"));
        assert_eq!(region_name("Rev.aa.fasta"), None);
        assert_eq!(region_name("Rev.na.fasta.bak"), None);
        assert_eq!(region_name(".na.fasta"), None);
    }

    #[test]
    fn test_find_region_files_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["Tat.na.fasta", "Env.na.fasta", "Env.aa.fasta", "notes.txt"] {
            std::fs::write(dir.path().join(name), b">x\nACGT\n").unwrap();
        }
        std::fs::create_dir(dir.path().join("Gag.na.fasta")).unwrap();

        let files = find_region_files(dir.path()).unwrap();
        let regions: Vec<&str> = files.iter().map(|f| f.region.as_str()).collect();
        assert_eq!(regions, vec!["Env", "Tat"]);
        assert_eq!(files[0].path, dir.path().join("Env.na.fasta"));
    }

    #[test]
    fn test_find_region_files_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            find_region_files(&missing),
            Err(ParseError::Io(_))
        ));
    }
}
