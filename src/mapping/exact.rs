//! Exact Locator: places a non-spliced region by verbatim substring search.

use crate::core::interval::Interval;
use crate::core::sequence::{SubjectSequence, UngappedQuery};
use crate::core::types::{SkipReason, Terminus};

/// Outcome of locating one region in its subject
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExactOutcome {
    Located(Interval),
    Skipped(SkipReason),
}

/// All start positions of `needle` in `haystack`, overlapping hits included
#[must_use]
pub fn find_occurrences(haystack: &[u8], needle: &[u8]) -> Vec<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return Vec::new();
    }
    haystack
        .windows(needle.len())
        .enumerate()
        .filter_map(|(i, window)| (window == needle).then_some(i))
        .collect()
}

/// Pick one of exactly two occurrences using the region's expected terminus.
///
/// Returns `None` when there is no terminus to confirm orientation.
#[must_use]
pub fn disambiguate_pair(first: usize, second: usize, terminus: Option<Terminus>) -> Option<usize> {
    match terminus {
        Some(Terminus::ThreePrime) => Some(first.max(second)),
        Some(Terminus::FivePrime) => Some(first.min(second)),
        None => None,
    }
}

/// Locate `query` in `subject` for the given region.
///
/// The minimum query length is the caller's responsibility.
#[must_use]
pub fn locate(
    query: &UngappedQuery,
    subject: &SubjectSequence,
    region: &str,
    terminus: Option<Terminus>,
) -> ExactOutcome {
    let hits = find_occurrences(subject.sequence(), query.as_bytes());

    let start = match hits.as_slice() {
        [] => return ExactOutcome::Skipped(SkipReason::NoMatch),
        [only] => *only,
        [first, second] => match disambiguate_pair(*first, *second, terminus) {
            Some(start) => start,
            None => return ExactOutcome::Skipped(SkipReason::LikelyReversed),
        },
        _ => {
            return ExactOutcome::Skipped(SkipReason::TooManyMatches { count: hits.len() });
        }
    };

    ExactOutcome::Located(Interval::from_span(
        subject.key.as_str(),
        region,
        start,
        query.len(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Subject with a 10-base repeat at positions 5 and 40
    fn ltr_subject() -> (SubjectSequence, UngappedQuery) {
        let repeat = "GGTCTCTCTG";
        let mut seq = String::from("AAAAA");
        seq.push_str(repeat);
        seq.push_str(&"C".repeat(25));
        seq.push_str(repeat);
        seq.push_str("AAAAA");
        (SubjectSequence::new("S1", seq), UngappedQuery::new(repeat))
    }

    #[test]
    fn test_single_occurrence() {
        let subject = SubjectSequence::new("S1", "TTTTTACGGATCCAGGTAAATTT");
        let query = UngappedQuery::new("ACGGATCCAGGTAAA");
        let outcome = locate(&query, &subject, "Env", None);
        assert_eq!(
            outcome,
            ExactOutcome::Located(Interval::new("S1", "Env", 5, 19))
        );
    }

    #[test]
    fn test_no_occurrence() {
        let subject = SubjectSequence::new("S1", "TTTTTTTTTTTTTTTTTTTT");
        let query = UngappedQuery::new("ACGGATCCAGGTAAA");
        assert_eq!(
            locate(&query, &subject, "Env", None),
            ExactOutcome::Skipped(SkipReason::NoMatch)
        );
    }

    #[test]
    fn test_three_prime_ltr_takes_later_hit() {
        let (subject, query) = ltr_subject();
        let outcome = locate(&query, &subject, "3LTR", Some(Terminus::ThreePrime));
        assert_eq!(
            outcome,
            ExactOutcome::Located(Interval::new("S1", "3LTR", 40, 49))
        );
    }

    #[test]
    fn test_five_prime_ltr_takes_earlier_hit() {
        let (subject, query) = ltr_subject();
        let outcome = locate(&query, &subject, "5LTR", Some(Terminus::FivePrime));
        assert_eq!(
            outcome,
            ExactOutcome::Located(Interval::new("S1", "5LTR", 5, 14))
        );
    }

    #[test]
    fn test_two_hits_without_terminus_is_reversed() {
        let (subject, query) = ltr_subject();
        assert_eq!(
            locate(&query, &subject, "Nef", None),
            ExactOutcome::Skipped(SkipReason::LikelyReversed)
        );
    }

    #[test]
    fn test_three_hits_never_resolve() {
        let unit = "ACGTTGCAACGTTGCA";
        let subject = SubjectSequence::new("S1", format!("{unit}GG{unit}GG{unit}"));
        let query = UngappedQuery::new(unit);

        for (region, terminus) in [
            ("Env", None),
            ("5LTR", Some(Terminus::FivePrime)),
            ("3LTR", Some(Terminus::ThreePrime)),
        ] {
            assert_eq!(
                locate(&query, &subject, region, terminus),
                ExactOutcome::Skipped(SkipReason::TooManyMatches { count: 3 })
            );
        }
    }

    #[test]
    fn test_overlapping_occurrences_are_counted() {
        assert_eq!(find_occurrences(b"AAAAA", b"AAA"), vec![0, 1, 2]);
        assert_eq!(find_occurrences(b"ACGTACGT", b"ACGT"), vec![0, 4]);
        assert!(find_occurrences(b"ACG", b"ACGT").is_empty());
    }

    #[test]
    fn test_disambiguate_pair() {
        assert_eq!(disambiguate_pair(5, 40, Some(Terminus::ThreePrime)), Some(40));
        assert_eq!(disambiguate_pair(5, 40, Some(Terminus::FivePrime)), Some(5));
        assert_eq!(disambiguate_pair(5, 40, None), None);
    }
}
