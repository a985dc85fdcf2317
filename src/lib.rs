//! # region-mapper
//!
//! A library for transferring LANL Gene Cutter region annotations back onto
//! the original, un-segmented subject genomes.
//!
//! Gene Cutter cuts a set of submitted genomes into regions (Gag, Pol, Env,
//! Rev, Tat, the LTRs, ...) and writes one aligned FASTA per region. The cut
//! sequences no longer carry coordinates in the genomes they came from.
//! `region-mapper` recovers those coordinates.
//!
//! ## Features
//!
//! - **Exact location**: Non-spliced regions are found by substring search
//! - **Terminus disambiguation**: An LTR that occurs twice is placed at the
//!   end of the genome it belongs to
//! - **Splice-aware mapping**: Rev and Tat are aligned locally with cheap long
//!   gaps, and each aligned run is reported as an exon
//! - **Ambiguity detection**: Regions without a unique placement are skipped
//!   with a warning rather than guessed
//!
//! ## Example
//!
//! ```rust
//! use region_mapper::core::sequence::{RegionRecord, SubjectSequence, SubjectTable};
//! use region_mapper::MappingEngine;
//!
//! let mut subjects = SubjectTable::new();
//! subjects
//!     .insert(SubjectSequence::new("S1", "GGGGGATGGCAGGAAGAAGCGGAGACCCCC"))
//!     .unwrap();
//!
//! let engine = MappingEngine::new(&subjects);
//! let records = vec![RegionRecord::new("S1_Vif", "Vif", b"ATGGCAGGAAG--AAGCGGAGA".to_vec())];
//! let (intervals, _summary) = engine.map_records(&records).unwrap();
//!
//! assert_eq!((intervals[0].start, intervals[0].end), (5, 24));
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Core data types for subjects, region records, and intervals
//! - [`mapping`]: Exact locator, splice-aware mapper, and the mapping engine
//! - [`parsing`]: FASTA readers and region file discovery
//! - [`report`]: Annotation table writers
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod mapping;
pub mod parsing;
pub mod report;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::core::interval::{Interval, MappingResult};
pub use crate::core::sequence::{RegionRecord, SubjectSequence, SubjectTable, UngappedQuery};
pub use crate::mapping::{MapperConfig, MappingEngine, MappingError, RecordOutcome};
