//! Count aggregation, run configuration and summary statistics.
//!
//! - [`CountAggregator`]: Holds one [`CountTable`] per tier and credits hits to them
//! - [`CountingConfig`]: Orientation, window width, primer validation and threading
//! - [`pipeline`]: Feeds a read stream through the matcher into an aggregator
//! - [`stats`]: Mapping rate, undetected guides and skew ratio for a finished table
//!
//! ## Example
//!
//! ```rust
//! use spacer_counter::counting::{count_reads, summarize, CountingConfig};
//! use spacer_counter::{LibraryIndex, Tier};
//!
//! let guide = "A".repeat(20);
//! let index = LibraryIndex::load(vec![vec!["g1", guide.as_str(), "geneA"]]).unwrap();
//! let counts = count_reads(&index, &CountingConfig::default(), vec![guide.as_str()]);
//!
//! let rows: Vec<_> = counts.rows(Tier::Default).map(|(g, n)| (g.name.as_str(), n)).collect();
//! assert_eq!(rows, vec![("g1", 1)]);
//!
//! let stats = summarize(
//!     counts.table(Tier::Default),
//!     counts.num_reads(),
//!     counts.tally(Tier::Default).reads_with_guide,
//! )
//! .unwrap();
//! assert_eq!(stats.num_reads, 1);
//! assert_eq!(stats.percent_mapped, 100.0);
//! ```

pub mod aggregator;
pub mod config;
pub mod pipeline;
pub mod stats;

pub use aggregator::{CountAggregator, CountTable, PrimerTally, TierTally};
pub use config::{ConfigError, CountingConfig, PrimerConfig};
pub use pipeline::{count_reads, try_count_reads, GuideCounter};
pub use stats::{summarize, RunStatistics, SkewRatio, StatsError};
