//! # spacer-counter
//!
//! A library for counting CRISPR guide (spacer) sequences in sequencing reads.
//!
//! A pooled CRISPR screen is read out by sequencing the guides carried by each cell. This
//! crate takes the guide library the screen was designed with and a FASTQ file, and
//! reports how often each guide was observed together with summary statistics on the
//! quality of the screen.
//!
//! ## Features
//!
//! - **Unanchored scanning**: Every window of every read is looked up, so guides are found
//!   regardless of where they sit in the read
//! - **Both orientations**: Libraries sequenced forward or reverse-complemented
//! - **Primer validation**: Optional stringent and fuzzy-key tiers that only credit hits
//!   preceded by the expected primer/key, exactly or within a bounded edit distance
//! - **Screen statistics**: Mapping rate, undetected guides and the P90/P10 skew ratio
//! - **Parallel counting**: Batches of reads are split across a rayon pool
//!
//! ## Example
//!
//! ```rust
//! use spacer_counter::{count_reads, summarize, CountingConfig, LibraryIndex, Tier};
//!
//! let index = LibraryIndex::load(vec![
//!     vec!["g1", "ACGTACGTTTGCAAGCTAGC", "GENE1"],
//!     vec!["g2", "GGGGCCCCAAAATTTTGGGG", "GENE2"],
//! ])
//! .unwrap();
//!
//! let reads = ["TTACGTACGTTTGCAAGCTAGCTT", "NNNNNNNNNNNNNNNNNNNNNNNN"];
//! let counts = count_reads(&index, &CountingConfig::default(), reads);
//!
//! let tally = counts.tally(Tier::Default);
//! let stats = summarize(counts.table(Tier::Default), counts.num_reads(), tally.reads_with_guide)
//!     .unwrap();
//! assert_eq!(stats.percent_mapped, 50.0);
//! assert_eq!(stats.percent_undetected_guides, 50.0);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Guide records, orientations, tiers and sequence helpers
//! - [`library`]: The guide library index
//! - [`matching`]: Sliding-window matcher and primer validator
//! - [`counting`]: Count aggregation, statistics and the counting pipeline
//! - [`parsing`]: Library CSV and FASTQ readers
//! - [`cli`]: Command-line interface implementation
//! - [`utils`]: Library checks and path helpers

pub mod cli;
pub mod core;
pub mod counting;
pub mod library;
pub mod matching;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::core::types::*;
pub use crate::core::GuideRecord;
pub use counting::{
    count_reads, summarize, try_count_reads, CountAggregator, CountTable, CountingConfig,
    RunStatistics, SkewRatio, StatsError,
};
pub use library::{LibraryError, LibraryIndex};
pub use matching::{MatchResult, PrimerValidator, SequenceMatcher};
