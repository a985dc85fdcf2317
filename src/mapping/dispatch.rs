//! Region dispatch: which mapping strategy a region name gets.

use serde::{Deserialize, Serialize};

use crate::core::types::{MappingStrategy, Terminus};

/// Regions whose transcripts are spliced in HIV-1
pub const DEFAULT_SPLICED_REGIONS: &[&str] = &["Rev", "Tat"];

/// Terminal repeats and the end of the genome each is expected at
pub const DEFAULT_TERMINAL_REGIONS: &[(&str, Terminus)] = &[
    ("5LTR", Terminus::FivePrime),
    ("3LTR", Terminus::ThreePrime),
];

/// Fixed lookup from region name to strategy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionPolicy {
    /// Region names mapped by local alignment
    pub spliced: Vec<String>,

    /// Region names resolved by terminus when they occur twice
    pub terminal: Vec<(String, Terminus)>,
}

impl Default for RegionPolicy {
    fn default() -> Self {
        Self {
            spliced: DEFAULT_SPLICED_REGIONS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            terminal: DEFAULT_TERMINAL_REGIONS
                .iter()
                .map(|(name, terminus)| ((*name).to_string(), *terminus))
                .collect(),
        }
    }
}

impl RegionPolicy {
    /// Strategy for `region`. Names are matched exactly.
    #[must_use]
    pub fn strategy_for(&self, region: &str) -> MappingStrategy {
        if self.spliced.iter().any(|name| name == region) {
            return MappingStrategy::Spliced;
        }

        let terminus = self
            .terminal
            .iter()
            .find(|(name, _)| name == region)
            .map(|(_, terminus)| *terminus);
        MappingStrategy::Exact(terminus)
    }

    /// Replace the spliced region set
    #[must_use]
    pub fn with_spliced<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.spliced = names.into_iter().map(Into::into).collect();
        self
    }
}
