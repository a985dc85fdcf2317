use serde::{Deserialize, Serialize};

/// Gap symbol used by Gene Cutter alignments and by rendered pairwise alignments
pub const GAP: u8 = b'-';

/// Genomic terminus a repeated region is expected to sit at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Terminus {
    /// 5' end of the subject (e.g. 5' LTR)
    FivePrime,
    /// 3' end of the subject (e.g. 3' LTR)
    ThreePrime,
}

/// How a region is relocated in its subject sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingStrategy {
    /// Local alignment; every aligned run becomes an exon
    Spliced,
    /// Verbatim substring search, with an optional terminus tie-breaker
    Exact(Option<Terminus>),
}

/// Why a record produced no intervals
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Record belongs to the segmentation tool's own reference sequence
    ReferenceRecord,
    /// Ungapped sequence is below the minimum query length
    TooShort { length: usize },
    /// Query does not occur in the subject
    NoMatch,
    /// Query occurs more often than terminus disambiguation can resolve
    TooManyMatches { count: usize },
    /// Two occurrences without a terminus rule to pick one
    LikelyReversed,
    /// Local alignment found nothing scoring above zero
    NoAlignment,
    /// More than one co-optimal local alignment
    AmbiguousAlignment { count: usize },
    /// The winning alignment contained no aligned runs
    DegenerateAlignment,
}

impl SkipReason {
    /// Anomalies are worth a warning; the rest is expected noise in the input
    #[must_use]
    pub fn is_anomaly(&self) -> bool {
        matches!(
            self,
            Self::TooManyMatches { .. }
                | Self::LikelyReversed
                | Self::NoAlignment
                | Self::AmbiguousAlignment { .. }
                | Self::DegenerateAlignment
        )
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReferenceRecord => write!(f, "reference record"),
            Self::TooShort { length } => write!(f, "too short ({length} bases)"),
            Self::NoMatch => write!(f, "no match in subject"),
            Self::TooManyMatches { count } => write!(f, "{count} matches in subject"),
            Self::LikelyReversed => write!(f, "subject sequence likely reversed"),
            Self::NoAlignment => write!(f, "no local alignment"),
            Self::AmbiguousAlignment { count } => {
                write!(f, "{count} equally optimal alignments")
            }
            Self::DegenerateAlignment => write!(f, "alignment has no aligned runs"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anomaly_classification() {
        assert!(SkipReason::LikelyReversed.is_anomaly());
        assert!(SkipReason::TooManyMatches { count: 3 }.is_anomaly());
        assert!(SkipReason::AmbiguousAlignment { count: 2 }.is_anomaly());
        assert!(!SkipReason::NoMatch.is_anomaly());
        assert!(!SkipReason::TooShort { length: 4 }.is_anomaly());
        assert!(!SkipReason::ReferenceRecord.is_anomaly());
    }

    #[test]
    fn test_skip_reason_display() {
        assert_eq!(
            SkipReason::TooManyMatches { count: 3 }.to_string(),
            "3 matches in subject"
        );
        assert_eq!(
            SkipReason::LikelyReversed.to_string(),
            "subject sequence likely reversed"
        );
    }
}
