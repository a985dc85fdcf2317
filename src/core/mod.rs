//! Core data types for region mapping.
//!
//! - [`SubjectSequence`], [`SubjectTable`]: the original genomes, keyed by FASTA name
//! - [`RegionRecord`], [`UngappedQuery`]: segmentation output and its search form
//! - [`Interval`], [`MappingResult`]: 0-indexed inclusive coordinates on a subject
//! - [`MappingStrategy`], [`Terminus`], [`SkipReason`]: dispatch and outcome types
//!
//! ## Coordinates
//!
//! All intervals are 0-indexed with an **inclusive** end. A region occupying
//! the first four bases of a subject is reported as `0..=3`.
//!
//! [`SubjectSequence`]: sequence::SubjectSequence
//! [`SubjectTable`]: sequence::SubjectTable
//! [`RegionRecord`]: sequence::RegionRecord
//! [`UngappedQuery`]: sequence::UngappedQuery
//! [`Interval`]: interval::Interval
//! [`MappingResult`]: interval::MappingResult
//! [`MappingStrategy`]: types::MappingStrategy
//! [`Terminus`]: types::Terminus
//! [`SkipReason`]: types::SkipReason

pub mod interval;
pub mod sequence;
pub mod types;
