use serde::{Deserialize, Serialize};

/// Orientation in which guides are expected to appear in the reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Orientation {
    /// Look up each read window as-is
    #[default]
    Forward,
    /// Look up the reverse complement of each read window
    #[value(alias = "reverse")]
    ReverseComplement,
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Forward => write!(f, "forward"),
            Self::ReverseComplement => write!(f, "reverse-complement"),
        }
    }
}

/// Count table a hit can be credited to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Every library hit
    Default,
    /// Hits preceded by a perfect primer/key
    Stringent,
    /// Hits preceded by a perfect or approximate primer/key
    FuzzyKey,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Default, Tier::Stringent, Tier::FuzzyKey];

    /// Position of the tier's table inside an aggregator
    #[must_use]
    pub const fn slot(self) -> usize {
        match self {
            Self::Default => 0,
            Self::Stringent => 1,
            Self::FuzzyKey => 2,
        }
    }

    /// Suffix appended to output file names for this tier (empty for the default tier)
    #[must_use]
    pub const fn file_suffix(self) -> &'static str {
        match self {
            Self::Default => "",
            Self::Stringent => ".stringent",
            Self::FuzzyKey => ".fuzzykey",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::Stringent => write!(f, "stringent"),
            Self::FuzzyKey => write!(f, "fuzzykey"),
        }
    }
}

/// Classification of the upstream primer/key sequence in front of a hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimerMatch {
    /// Identical to the reference primer
    Perfect,
    /// Within the allowed edit distance of the reference primer
    Approximate(usize),
    /// Neither
    None,
}

impl PrimerMatch {
    /// Whether a hit with this primer classification is credited to `tier`
    #[must_use]
    pub fn credits(self, tier: Tier) -> bool {
        match tier {
            Tier::Default => true,
            Tier::Stringent => matches!(self, Self::Perfect),
            Tier::FuzzyKey => matches!(self, Self::Perfect | Self::Approximate(_)),
        }
    }
}
