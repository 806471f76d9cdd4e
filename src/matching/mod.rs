//! Read scanning and primer validation.
//!
//! This module provides the matching functionality:
//!
//! - [`SequenceMatcher`]: Slides a fixed-width window along a read and looks each window
//!   (or its reverse complement) up in the [`LibraryIndex`](crate::LibraryIndex)
//! - [`PrimerValidator`]: Classifies the segment upstream of a hit against a reference
//!   primer using a bounded edit distance
//!
//! ## Scanning
//!
//! Guides are not anchored to a fixed position in the read. Every offset from `0` to
//! `read_len - window_width` is checked, and every hit is reported, so a read can
//! contribute more than one hit.
//!
//! ## Example
//!
//! ```rust
//! use spacer_counter::{LibraryIndex, Orientation, SequenceMatcher};
//!
//! let index = LibraryIndex::load(vec![vec!["g1", "ACGTACGTTTGCAAGCTAGC", "GENE1"]]).unwrap();
//! let matcher = SequenceMatcher::new(&index, Orientation::Forward);
//!
//! let hits = matcher.scan(b"TTACGTACGTTTGCAAGCTAGCTT");
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].offset, 2);
//! ```

pub mod engine;
pub mod primer;

pub use engine::{MatchResult, SequenceMatcher, DEFAULT_WINDOW_WIDTH};
pub use primer::{PrimerValidator, DEFAULT_MAX_EDIT_DISTANCE, DEFAULT_PRIMER};
