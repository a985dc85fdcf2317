//! Coordinate mapping of segmented regions back onto their subjects.
//!
//! - [`MappingEngine`]: entry point; validates records and dispatches them
//! - [`exact`]: Exact Locator for non-spliced regions
//! - [`spliced`]: Splice-Aware Mapper for spliced regions
//! - [`align`]: affine-gap local aligner reporting co-optimal alignments
//! - [`dispatch`]: fixed region name to strategy table
//!
//! ## Dispatch
//!
//! | Region        | Strategy                                      |
//! |---------------|-----------------------------------------------|
//! | `Rev`, `Tat`  | local alignment, one interval per exon        |
//! | `5LTR`        | substring search, earlier of two hits wins    |
//! | `3LTR`        | substring search, later of two hits wins      |
//! | anything else | substring search, must occur exactly once     |
//!
//! ## Example
//!
//! ```rust
//! use region_mapper::core::sequence::{RegionRecord, SubjectSequence, SubjectTable};
//! use region_mapper::mapping::{MappingEngine, RecordOutcome};
//!
//! let mut subjects = SubjectTable::new();
//! subjects
//!     .insert(SubjectSequence::new("S1", "TTTTTACGGATCCAGGTAAATTT"))
//!     .unwrap();
//!
//! let engine = MappingEngine::new(&subjects);
//! let record = RegionRecord::new("S1_Env", "Env", b"ACGGATCC-AGGTAAA".to_vec());
//!
//! match engine.map_record(&record).unwrap() {
//!     RecordOutcome::Mapped(result) => {
//!         let interval = &result.intervals()[0];
//!         assert_eq!((interval.start, interval.end), (5, 19));
//!     }
//!     RecordOutcome::Skipped(reason) => panic!("unexpected skip: {reason}"),
//! }
//! ```

pub mod align;
pub mod dispatch;
pub mod engine;
pub mod exact;
pub mod spliced;

pub use engine::{MapperConfig, MappingEngine, MappingError, RecordOutcome, RunSummary};
