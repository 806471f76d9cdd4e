//! Summary statistics over a tier's count table.

use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::counting::aggregator::CountTable;

/// Text written in place of a skew ratio when the distribution cannot support one
pub const INSUFFICIENT_DATA_LABEL: &str = "Not enough perfect matches to determine skew ratio";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    #[error(
        "No guide matched any of the {num_reads} reads. Please check whether this is a forward or a reverse library"
    )]
    NoMatch { num_reads: u64 },
}

/// Ratio of the 90th to the 10th percentile of per-guide counts
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SkewRatio {
    Ratio(f64),
    /// One of the percentiles is zero, typical of small or sparse libraries
    InsufficientData,
}

impl SkewRatio {
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Ratio(r) => Some(r),
            Self::InsufficientData => None,
        }
    }
}

impl std::fmt::Display for SkewRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ratio(r) => write!(f, "{r}"),
            Self::InsufficientData => write!(f, "{INSUFFICIENT_DATA_LABEL}"),
        }
    }
}

impl Serialize for SkewRatio {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Ratio(r) => serializer.serialize_f64(*r),
            Self::InsufficientData => serializer.serialize_str("insufficient_data"),
        }
    }
}

/// Distribution metrics for one tier
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunStatistics {
    pub num_reads: u64,
    pub num_reads_with_guide: u64,
    /// Percentage of reads with at least one credited hit, 1 decimal place
    pub percent_mapped: f64,
    /// Percentage of library guides with a zero count, 1 decimal place
    pub percent_undetected_guides: f64,
    pub skew_ratio: SkewRatio,
    pub library_size: usize,
}

/// Round to `dp` decimal places
#[must_use]
pub fn round_to(value: f64, dp: i32) -> f64 {
    let factor = 10f64.powi(dp);
    (value * factor).round() / factor
}

/// Percentile `p` (0-100) of sorted `values`, interpolating linearly between ranks.
///
/// Returns 0 for an empty slice.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn percentile(sorted: &[u64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }

    let rank = (p / 100.0).clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let (a, b) = (sorted[lo] as f64, sorted[hi] as f64);
    a + (b - a) * (rank - lo as f64)
}

/// P90 / P10 over all per-guide counts, zeros included
#[must_use]
pub fn skew_ratio(counts: &[u64]) -> SkewRatio {
    let mut sorted = counts.to_vec();
    sorted.sort_unstable();

    let top = percentile(&sorted, 90.0);
    let bottom = percentile(&sorted, 10.0);
    if top == 0.0 || bottom == 0.0 {
        SkewRatio::InsufficientData
    } else {
        SkewRatio::Ratio(top / bottom)
    }
}

/// Summarize a tier's counts.
///
/// `num_reads_with_guide` is the number of reads with at least one hit credited to the
/// tier.
///
/// # Errors
///
/// Returns `StatsError::NoMatch` if no reads were processed or none of them matched a
/// guide, since the mapping rate is then undefined.
#[allow(clippy::cast_precision_loss)]
pub fn summarize(
    table: &CountTable,
    num_reads: u64,
    num_reads_with_guide: u64,
) -> Result<RunStatistics, StatsError> {
    if num_reads == 0 || num_reads_with_guide == 0 || table.total() == 0 {
        return Err(StatsError::NoMatch { num_reads });
    }

    let library_size = table.len();
    let percent_mapped = round_to(num_reads_with_guide as f64 / num_reads as f64 * 100.0, 1);
    let percent_undetected_guides =
        round_to(table.zero_count() as f64 / library_size as f64 * 100.0, 1);

    Ok(RunStatistics {
        num_reads,
        num_reads_with_guide,
        percent_mapped,
        percent_undetected_guides,
        skew_ratio: skew_ratio(table.counts()),
        library_size,
    })
}
