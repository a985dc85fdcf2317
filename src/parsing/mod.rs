//! Readers for the subject genomes and the segmentation tool's output.
//!
//! - **Subject FASTA**: one record per original genome; record names are the
//!   subject keys
//! - **Region files**: a directory of `<Region>.na.fasta` files whose records
//!   are named `<subjectKey>_<Region>` and may contain `-` gap symbols
//!
//! ## Example
//!
//! ```rust,no_run
//! use region_mapper::parsing::fasta::{read_region_records, read_subjects};
//! use region_mapper::parsing::regions::find_region_files;
//! use std::path::Path;
//!
//! let subjects = read_subjects(Path::new("subjects.fasta")).unwrap();
//! for file in find_region_files(Path::new("genecutter_out")).unwrap() {
//!     let records = read_region_records(&file.path, &file.region).unwrap();
//!     println!("{}: {} records", file.region, records.len());
//! }
//! # let _ = subjects;
//! ```

pub mod fasta;
pub mod regions;

pub use fasta::ParseError;
