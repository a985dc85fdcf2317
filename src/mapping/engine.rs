use std::path::Path;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::interval::{Interval, MappingResult};
use crate::core::sequence::{RegionRecord, SubjectTable};
use crate::core::types::{MappingStrategy, SkipReason};
use crate::mapping::align::{LocalAligner, ScoringScheme};
use crate::mapping::dispatch::RegionPolicy;
use crate::mapping::exact::{self, ExactOutcome};
use crate::mapping::spliced::{self, SplicedOutcome};

#[derive(Error, Debug)]
pub enum MappingError {
    #[error("Subject '{key}' referenced by record '{record}' is not in the subject sequences")]
    UnknownSubject { key: String, record: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Default minimum ungapped length for a record to be mapped
pub const DEFAULT_MIN_QUERY_LENGTH: usize = 15;

/// Default cap on co-optimal alignments collected per spliced region
pub const DEFAULT_MAX_ALIGNMENTS: usize = 2;

/// Largest magnitude accepted for any alignment score
pub const MAX_SCORE_MAGNITUDE: i32 = 10_000;

/// Configuration for the mapping engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    /// Records shorter than this (after ungapping) are skipped
    pub min_query_length: usize,

    /// Records whose id contains any of these are skipped
    pub reference_markers: Vec<String>,

    /// Region name to strategy table
    pub policy: RegionPolicy,

    /// Local alignment scores for spliced regions
    pub scoring: ScoringScheme,

    /// Co-optimal alignments collected before a region is called ambiguous
    pub max_alignments: usize,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            min_query_length: DEFAULT_MIN_QUERY_LENGTH,
            reference_markers: vec!["HXB2".to_string()],
            policy: RegionPolicy::default(),
            scoring: ScoringScheme::default(),
            max_alignments: DEFAULT_MAX_ALIGNMENTS,
        }
    }
}

impl MapperConfig {
    /// Load config from a JSON file; missing fields take their defaults
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadError` if the file cannot be read,
    /// `ConfigError::ParseError` for malformed JSON, or `ConfigError::Invalid`
    /// if a value is out of range.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse config from a JSON string
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ParseError` for malformed JSON or
    /// `ConfigError::Invalid` if a value is out of range.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if `min_query_length` is zero,
    /// `max_alignments` is below 2, or the scoring scheme is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_query_length == 0 {
            return Err(ConfigError::Invalid(
                "min_query_length must be at least 1".to_string(),
            ));
        }
        // A second optimum has to be observable to call a region ambiguous
        if self.max_alignments < 2 {
            return Err(ConfigError::Invalid(format!(
                "max_alignments must be at least 2, got {}",
                self.max_alignments
            )));
        }
        validate_scoring(&self.scoring)
    }
}

fn validate_scoring(scoring: &ScoringScheme) -> Result<(), ConfigError> {
    if scoring.match_score <= 0 {
        return Err(ConfigError::Invalid(format!(
            "scoring.match_score must be positive, got {}",
            scoring.match_score
        )));
    }
    if scoring.mismatch_score > 0 {
        return Err(ConfigError::Invalid(format!(
            "scoring.mismatch_score must not be positive, got {}",
            scoring.mismatch_score
        )));
    }

    let gaps = [
        ("subject_gap_open", scoring.subject_gap_open),
        ("subject_gap_extend", scoring.subject_gap_extend),
        ("query_gap_open", scoring.query_gap_open),
        ("query_gap_extend", scoring.query_gap_extend),
    ];
    if let Some((name, value)) = gaps.iter().find(|(_, value)| *value > 0) {
        return Err(ConfigError::Invalid(format!(
            "scoring.{name} must not be positive, got {value}"
        )));
    }

    let scores = [
        ("match_score", scoring.match_score),
        ("mismatch_score", scoring.mismatch_score),
    ];
    if let Some((name, value)) = scores
        .iter()
        .chain(gaps.iter())
        .find(|(_, value)| value.unsigned_abs() > MAX_SCORE_MAGNITUDE.unsigned_abs())
    {
        return Err(ConfigError::Invalid(format!(
            "scoring.{name} must be within +/-{MAX_SCORE_MAGNITUDE}, got {value}"
        )));
    }

    Ok(())
}

/// What happened to a single region record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    Mapped(MappingResult),
    Skipped(SkipReason),
}

/// Per-run tally of record outcomes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub records: usize,
    pub mapped: usize,
    pub intervals: usize,
    pub reference_records: usize,
    pub too_short: usize,
    pub no_match: usize,
    pub anomalies: usize,
}

impl RunSummary {
    fn record(&mut self, outcome: &RecordOutcome) {
        self.records += 1;
        match outcome {
            RecordOutcome::Mapped(result) => {
                self.mapped += 1;
                self.intervals += result.intervals().len();
            }
            RecordOutcome::Skipped(SkipReason::ReferenceRecord) => self.reference_records += 1,
            RecordOutcome::Skipped(SkipReason::TooShort { .. }) => self.too_short += 1,
            RecordOutcome::Skipped(SkipReason::NoMatch) => self.no_match += 1,
            RecordOutcome::Skipped(_) => self.anomalies += 1,
        }
    }

    pub fn merge(&mut self, other: &Self) {
        self.records += other.records;
        self.mapped += other.mapped;
        self.intervals += other.intervals;
        self.reference_records += other.reference_records;
        self.too_short += other.too_short;
        self.no_match += other.no_match;
        self.anomalies += other.anomalies;
    }
}

/// Maps region records onto a read-only subject table
pub struct MappingEngine<'a> {
    subjects: &'a SubjectTable,
    config: MapperConfig,
    aligner: LocalAligner,
}

impl<'a> MappingEngine<'a> {
    /// Create a new engine with default configuration
    pub fn new(subjects: &'a SubjectTable) -> Self {
        Self::with_config(subjects, MapperConfig::default())
    }

    /// Create a new engine with custom configuration
    pub fn with_config(subjects: &'a SubjectTable, config: MapperConfig) -> Self {
        let aligner = LocalAligner::new(config.scoring).with_max_alignments(config.max_alignments);
        Self {
            subjects,
            config,
            aligner,
        }
    }

    #[must_use]
    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    /// Map one record.
    ///
    /// # Errors
    ///
    /// Returns `MappingError::UnknownSubject` if the record's subject key is
    /// not in the subject table.
    pub fn map_record(&self, record: &RegionRecord) -> Result<RecordOutcome, MappingError> {
        if self
            .config
            .reference_markers
            .iter()
            .any(|marker| record.id.contains(marker.as_str()))
        {
            return Ok(RecordOutcome::Skipped(SkipReason::ReferenceRecord));
        }

        let query = record.ungapped();
        if query.len() < self.config.min_query_length {
            return Ok(RecordOutcome::Skipped(SkipReason::TooShort {
                length: query.len(),
            }));
        }

        let key = record.subject_key();
        let subject = self
            .subjects
            .get(key)
            .ok_or_else(|| MappingError::UnknownSubject {
                key: key.to_string(),
                record: record.id.clone(),
            })?;

        let outcome = match self.config.policy.strategy_for(&record.region) {
            MappingStrategy::Spliced => {
                match spliced::map_spliced(&query, subject, &record.region, &self.aligner) {
                    SplicedOutcome::Exons(exons) => RecordOutcome::Mapped(MappingResult::Exons(exons)),
                    SplicedOutcome::Skipped(reason) => RecordOutcome::Skipped(reason),
                }
            }
            MappingStrategy::Exact(terminus) => {
                match exact::locate(&query, subject, &record.region, terminus) {
                    ExactOutcome::Located(interval) => {
                        RecordOutcome::Mapped(MappingResult::Single(interval))
                    }
                    ExactOutcome::Skipped(reason) => RecordOutcome::Skipped(reason),
                }
            }
        };

        Ok(outcome)
    }

    /// Map a batch of records in parallel, preserving input order.
    ///
    /// # Errors
    ///
    /// Returns the first `MappingError::UnknownSubject` in record order.
    pub fn map_records(
        &self,
        records: &[RegionRecord],
    ) -> Result<(Vec<Interval>, RunSummary), MappingError> {
        let outcomes: Vec<Result<RecordOutcome, MappingError>> =
            records.par_iter().map(|r| self.map_record(r)).collect();

        let mut intervals = Vec::new();
        let mut summary = RunSummary::default();

        for (record, outcome) in records.iter().zip(outcomes) {
            let outcome = outcome?;
            summary.record(&outcome);
            match outcome {
                RecordOutcome::Mapped(result) => intervals.extend(result.into_intervals()),
                RecordOutcome::Skipped(reason) if reason.is_anomaly() => {
                    warn!(record = %record.id, region = %record.region, "Skipping record: {reason}");
                }
                RecordOutcome::Skipped(reason) => {
                    debug!(record = %record.id, region = %record.region, "Skipping record: {reason}");
                }
            }
        }

        Ok((intervals, summary))
    }
}
