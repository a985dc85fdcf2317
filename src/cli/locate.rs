use std::io::Write;
use std::path::PathBuf;

use clap::Args;

use crate::cli::MappingOptions;
use crate::core::sequence::RegionRecord;
use crate::mapping::{MappingEngine, RecordOutcome};
use crate::parsing;
use crate::report::{table, ReportFormat};
use crate::utils::validation::validate_input_file;

#[derive(Args)]
pub struct LocateArgs {
    /// FASTA containing the subject sequence
    #[arg(short, long, required = true)]
    pub subjects: PathBuf,

    /// Subject record name to map onto
    #[arg(short, long, required = true)]
    pub key: String,

    /// Region name; decides between exact and spliced mapping
    #[arg(short, long, required = true)]
    pub region: String,

    /// Region sequence (gaps allowed)
    #[arg(required = true)]
    pub sequence: String,

    #[command(flatten)]
    pub mapping: MappingOptions,
}

/// Execute locate subcommand
///
/// # Errors
///
/// Returns an error if the subjects cannot be read, the key is unknown, or
/// output fails.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: LocateArgs, format: ReportFormat, verbose: bool) -> anyhow::Result<()> {
    validate_input_file(&args.subjects)?;
    let config = args.mapping.resolve()?;
    let subjects = parsing::fasta::read_subjects(&args.subjects)?;

    let record = RegionRecord::new(
        format!("{}_{}", args.key, args.region),
        args.region.as_str(),
        args.sequence.as_bytes(),
    );

    let engine = MappingEngine::with_config(&subjects, config);
    if verbose {
        eprintln!(
            "Strategy for {}: {:?}",
            args.region,
            engine.config().policy.strategy_for(&args.region)
        );
    }

    match engine.map_record(&record)? {
        RecordOutcome::Mapped(result) => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            match format {
                ReportFormat::Tsv => table::write_tsv(&mut out, result.intervals())?,
                ReportFormat::Json => table::write_json(&mut out, result.intervals())?,
            }
            out.flush()?;
        }
        RecordOutcome::Skipped(reason) => {
            eprintln!("No intervals for {}: {reason}", record.id);
        }
    }

    Ok(())
}
