//! Command-line interface for region-mapper.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **map**: Map every Gene Cutter region file in a directory onto the subjects
//! - **locate**: Map a single ad-hoc region sequence and print its intervals
//!
//! ## Usage
//!
//! ```text
//! # Map a Gene Cutter results directory
//! region-mapper map --subjects subjects.fasta --regions genecutter/ --run-id run1
//!
//! # JSON instead of TSV, custom output folder
//! region-mapper --format json map -s subjects.fasta -r genecutter/ --run-id run1 -o out/
//!
//! # Check where one sequence lands
//! region-mapper locate --subjects subjects.fasta --key S1 --region Rev ACGT...
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::mapping::MapperConfig;
use crate::report::ReportFormat;

pub mod locate;
pub mod map;

#[derive(Parser)]
#[command(name = "region-mapper")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Map Gene Cutter regions back onto their subject genomes")]
#[command(
    long_about = "region-mapper transfers the regions cut out by LANL Gene Cutter back onto the original subject sequences.\n\nNon-spliced regions are found by exact substring search; spliced regions (Rev, Tat) are placed by local alignment and reported as one interval per exon. Coordinates are 0-indexed and inclusive."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "tsv")]
    pub format: ReportFormat,

    /// Number of worker threads (defaults to all cores)
    #[arg(short = 't', long, global = true)]
    pub threads: Option<usize>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Map a directory of Gene Cutter region files onto the subject sequences
    Map(map::MapArgs),

    /// Map one region sequence onto one subject
    Locate(locate::LocateArgs),
}

/// Mapping options shared by all commands
#[derive(clap::Args)]
pub struct MappingOptions {
    /// JSON file with mapping configuration (scores, region policy, limits)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Comma-separated region names mapped by spliced alignment (default: Rev,Tat)
    #[arg(long, value_delimiter = ',')]
    pub spliced: Option<Vec<String>>,

    /// Minimum ungapped length for a region to be mapped (default: 15)
    #[arg(long)]
    pub min_length: Option<usize>,
}

impl MappingOptions {
    /// Config file (or defaults) with command-line overrides applied
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be loaded or the result is invalid.
    pub fn resolve(&self) -> anyhow::Result<MapperConfig> {
        let mut config = match &self.config {
            Some(path) => MapperConfig::load_from_file(path)?,
            None => MapperConfig::default(),
        };

        if let Some(spliced) = &self.spliced {
            config.policy = config.policy.with_spliced(spliced.iter().cloned());
        }
        if let Some(min_length) = self.min_length {
            config.min_query_length = min_length;
        }

        config.validate()?;
        Ok(config)
    }
}
