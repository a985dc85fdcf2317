use std::path::PathBuf;

use clap::Args;
use tracing::info;

use crate::cli::MappingOptions;
use crate::mapping::{MappingEngine, RunSummary};
use crate::parsing;
use crate::report::{self, ReportFormat};
use crate::utils::validation::{
    ensure_output_dir, validate_input_dir, validate_input_file, validate_run_id,
};

#[derive(Args)]
pub struct MapArgs {
    /// FASTA of the sequences submitted to Gene Cutter; record names must match
    #[arg(short, long, required = true)]
    pub subjects: PathBuf,

    /// Directory of Gene Cutter results (`<Region>.na.fasta` files)
    #[arg(short, long, required = true)]
    pub regions: PathBuf,

    /// Run ID, used in the output file name
    #[arg(long, required = true)]
    pub run_id: String,

    /// Output folder (created if missing)
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    #[command(flatten)]
    pub mapping: MappingOptions,
}

/// Execute map subcommand
///
/// # Errors
///
/// Returns an error if inputs are missing or unreadable, a region record names
/// an unknown subject, or the report cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: MapArgs, format: ReportFormat, verbose: bool) -> anyhow::Result<()> {
    validate_run_id(&args.run_id)?;
    validate_input_file(&args.subjects)?;
    validate_input_dir(&args.regions)?;
    ensure_output_dir(&args.output_dir)?;

    let config = args.mapping.resolve()?;
    let subjects = parsing::fasta::read_subjects(&args.subjects)?;
    if verbose {
        eprintln!("Loaded {} subject sequences", subjects.len());
    }

    let region_files = parsing::regions::find_region_files(&args.regions)?;
    if region_files.is_empty() {
        eprintln!(
            "Warning: No {} files found in {}",
            parsing::regions::REGION_FILE_SUFFIX,
            args.regions.display()
        );
    }

    let engine = MappingEngine::with_config(&subjects, config);
    let mut intervals = Vec::new();
    let mut summary = RunSummary::default();

    for file in &region_files {
        let records = parsing::fasta::read_region_records(&file.path, &file.region)?;
        let (mapped, file_summary) = engine.map_records(&records)?;
        info!(
            region = %file.region,
            records = file_summary.records,
            intervals = mapped.len(),
            "Mapped region file"
        );
        intervals.extend(mapped);
        summary.merge(&file_summary);
    }

    let output = report::output_path(&args.output_dir, &args.run_id, format);
    report::write_report(&output, &intervals, format)?;

    if verbose {
        print_summary(&summary, region_files.len());
        eprintln!("Wrote {} intervals to {}", intervals.len(), output.display());
    }

    Ok(())
}

fn print_summary(summary: &RunSummary, files: usize) {
    eprintln!("Region files: {files}");
    eprintln!("  Records: {}", summary.records);
    eprintln!("  Mapped: {}", summary.mapped);
    eprintln!("  Reference records skipped: {}", summary.reference_records);
    eprintln!("  Too short: {}", summary.too_short);
    eprintln!("  Not found: {}", summary.no_match);
    eprintln!("  Anomalies: {}", summary.anomalies);
}
