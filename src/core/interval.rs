use serde::{Deserialize, Serialize};

/// A 0-indexed, inclusive coordinate interval of a region on its subject
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    /// Subject key the interval lies on
    pub subject: String,

    /// Region name the interval annotates
    pub region: String,

    /// First covered position
    pub start: usize,

    /// Last covered position (inclusive)
    pub end: usize,
}

impl Interval {
    pub fn new(
        subject: impl Into<String>,
        region: impl Into<String>,
        start: usize,
        end: usize,
    ) -> Self {
        debug_assert!(start <= end, "interval start {start} after end {end}");
        Self {
            subject: subject.into(),
            region: region.into(),
            start,
            end,
        }
    }

    /// Interval covering `length` positions starting at `start`
    pub fn from_span(
        subject: impl Into<String>,
        region: impl Into<String>,
        start: usize,
        length: usize,
    ) -> Self {
        Self::new(subject, region, start, start + length.max(1) - 1)
    }
}

/// Intervals produced for one region record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingResult {
    /// Non-spliced region
    Single(Interval),
    /// Spliced region, exons in alignment order
    Exons(Vec<Interval>),
}

impl MappingResult {
    #[must_use]
    pub fn intervals(&self) -> &[Interval] {
        match self {
            Self::Single(interval) => std::slice::from_ref(interval),
            Self::Exons(exons) => exons,
        }
    }

    #[must_use]
    pub fn into_intervals(self) -> Vec<Interval> {
        match self {
            Self::Single(interval) => vec![interval],
            Self::Exons(exons) => exons,
        }
    }
}
