use std::collections::HashMap;

use thiserror::Error;

use crate::core::types::GAP;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SubjectTableError {
    #[error("Duplicate subject key: {0}")]
    DuplicateSubject(String),
}

/// An original, un-segmented subject sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectSequence {
    /// Record name in the subject FASTA
    pub key: String,

    /// Uppercased residues, no gaps
    sequence: Vec<u8>,
}

impl SubjectSequence {
    pub fn new(key: impl Into<String>, sequence: impl AsRef<[u8]>) -> Self {
        Self {
            key: key.into(),
            sequence: sequence.as_ref().to_ascii_uppercase(),
        }
    }

    #[must_use]
    pub fn sequence(&self) -> &[u8] {
        &self.sequence
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

/// Read-only lookup of subject sequences by key, in load order
#[derive(Debug, Default, Clone)]
pub struct SubjectTable {
    subjects: Vec<SubjectSequence>,
    key_to_index: HashMap<String, usize>,
}

impl SubjectTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a subject, rejecting keys that are already present
    ///
    /// # Errors
    ///
    /// Returns `SubjectTableError::DuplicateSubject` if the key is already loaded.
    pub fn insert(&mut self, subject: SubjectSequence) -> Result<(), SubjectTableError> {
        if self.key_to_index.contains_key(&subject.key) {
            return Err(SubjectTableError::DuplicateSubject(subject.key));
        }
        self.key_to_index
            .insert(subject.key.clone(), self.subjects.len());
        self.subjects.push(subject);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&SubjectSequence> {
        self.key_to_index.get(key).map(|&i| &self.subjects[i])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }
}

impl TryFrom<Vec<SubjectSequence>> for SubjectTable {
    type Error = SubjectTableError;

    fn try_from(subjects: Vec<SubjectSequence>) -> Result<Self, Self::Error> {
        let mut table = Self::new();
        for subject in subjects {
            table.insert(subject)?;
        }
        Ok(table)
    }
}

/// One region extracted by the segmentation tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionRecord {
    /// Record name, typically `<subjectKey>_<region>`
    pub id: String,

    /// Region name, e.g. `Rev`, `Env`, `5LTR`
    pub region: String,

    /// Raw residues, possibly containing gap symbols
    pub sequence: Vec<u8>,
}

impl RegionRecord {
    pub fn new(
        id: impl Into<String>,
        region: impl Into<String>,
        sequence: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            id: id.into(),
            region: region.into(),
            sequence: sequence.into(),
        }
    }

    /// Subject key this record was extracted from.
    ///
    /// Strips a trailing `_<region>` from the id; ids without that suffix are
    /// used as-is so the lookup failure names the offending key.
    #[must_use]
    pub fn subject_key(&self) -> &str {
        self.id
            .strip_suffix(self.region.as_str())
            .and_then(|s| s.strip_suffix('_'))
            .unwrap_or(&self.id)
    }

    #[must_use]
    pub fn ungapped(&self) -> UngappedQuery {
        UngappedQuery::from_gapped(&self.sequence)
    }
}

/// Region residues with every gap symbol removed, uppercased
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UngappedQuery(Vec<u8>);

impl UngappedQuery {
    pub fn new(sequence: impl AsRef<[u8]>) -> Self {
        Self(sequence.as_ref().to_ascii_uppercase())
    }

    #[must_use]
    pub fn from_gapped(sequence: &[u8]) -> Self {
        Self(
            sequence
                .iter()
                .filter(|&&b| b != GAP)
                .map(u8::to_ascii_uppercase)
                .collect(),
        )
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ungap_removes_every_gap() {
        let record = RegionRecord::new("S1_Env", "Env", b"AC--gT-A".to_vec());
        assert_eq!(record.ungapped().as_bytes(), b"ACGTA");
    }

    #[test]
    fn test_subject_key_strips_region_suffix() {
        let record = RegionRecord::new("B.FR.83.HXB2_Rev", "Rev", b"ACGT".to_vec());
        assert_eq!(record.subject_key(), "B.FR.83.HXB2");

        // Region name inside the key is left alone
        let record = RegionRecord::new("Rev_sample_Rev", "Rev", b"ACGT".to_vec());
        assert_eq!(record.subject_key(), "Rev_sample");
    }

    #[test]
    fn test_subject_key_without_suffix() {
        let record = RegionRecord::new("sample42", "Tat", b"ACGT".to_vec());
        assert_eq!(record.subject_key(), "sample42");

        // Suffix must be separated by an underscore
        let record = RegionRecord::new("sampleTat", "Tat", b"ACGT".to_vec());
        assert_eq!(record.subject_key(), "sampleTat");

        // Only a trailing suffix is stripped
        let record = RegionRecord::new("S1_Env_v2", "Env", b"ACGT".to_vec());
        assert_eq!(record.subject_key(), "S1_Env_v2");
    }

    #[test]
    fn test_subject_table_rejects_duplicates() {
        let mut table = SubjectTable::new();
        table.insert(SubjectSequence::new("S1", "ACGT")).unwrap();
        let err = table
            .insert(SubjectSequence::new("S1", "TTTT"))
            .unwrap_err();
        assert_eq!(err, SubjectTableError::DuplicateSubject("S1".to_string()));
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("S1").unwrap().sequence(), b"ACGT");
    }

    #[test]
    fn test_subject_sequence_is_uppercased() {
        let subject = SubjectSequence::new("S1", "acgtN");
        assert_eq!(subject.sequence(), b"ACGTN");
        assert_eq!(subject.len(), 5);
    }
}
