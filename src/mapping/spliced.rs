//! Splice-Aware Mapper: places a spliced region as a set of exon intervals.
//!
//! The ungapped region is aligned locally against the whole subject. Skipped
//! subject stretches show up as gaps in the query row of the rendered
//! alignment; every maximal run of query residues in that row is one exon.

use crate::core::interval::Interval;
use crate::core::sequence::{SubjectSequence, UngappedQuery};
use crate::core::types::{SkipReason, GAP};
use crate::mapping::align::LocalAligner;

/// Outcome of mapping one spliced region
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplicedOutcome {
    Exons(Vec<Interval>),
    Skipped(SkipReason),
}

/// Maximal runs of non-gap symbols as `(offset, length)`, left to right
#[must_use]
pub fn aligned_runs(row: &[u8]) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut start = None;

    for (i, &symbol) in row.iter().enumerate() {
        match (symbol == GAP, start) {
            (false, None) => start = Some(i),
            (true, Some(s)) => {
                runs.push((s, i - s));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        runs.push((s, row.len() - s));
    }

    runs
}

/// Map `query` onto `subject` as exons.
///
/// The region is dropped unless exactly one optimal alignment exists. The
/// minimum query length is the caller's responsibility.
#[must_use]
pub fn map_spliced(
    query: &UngappedQuery,
    subject: &SubjectSequence,
    region: &str,
    aligner: &LocalAligner,
) -> SplicedOutcome {
    let alignments = aligner.align(subject.sequence(), query.as_bytes());

    let alignment = match alignments.as_slice() {
        [] => return SplicedOutcome::Skipped(SkipReason::NoAlignment),
        [only] => only,
        _ => {
            return SplicedOutcome::Skipped(SkipReason::AmbiguousAlignment {
                count: alignments.len(),
            })
        }
    };

    let rows = alignment.render(subject.sequence(), query.as_bytes());
    let exons: Vec<Interval> = aligned_runs(&rows.query)
        .into_iter()
        .map(|(start, length)| Interval::from_span(subject.key.as_str(), region, start, length))
        .collect();

    if exons.is_empty() {
        return SplicedOutcome::Skipped(SkipReason::DegenerateAlignment);
    }

    SplicedOutcome::Exons(exons)
}
