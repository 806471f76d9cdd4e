//! Guide library storage and lookup.
//!
//! The library is the set of guides (spacers) a screen was designed with. It is loaded
//! once per run from a comma-separated table with exactly three fields per row and no
//! header:
//!
//! ```text
//! guide_name,guide_sequence,gene_name
//! ```
//!
//! Rows are deduplicated by sequence. The first row for a sequence provides its name and
//! gene; later rows with the same sequence are counted as duplicates and otherwise ignored.
//!
//! ## Example
//!
//! ```rust
//! use spacer_counter::LibraryIndex;
//!
//! let index = LibraryIndex::load(vec![
//!     vec!["g1", "ACGTACGTACGTACGTACGT", "GENE1"],
//!     vec!["g2", "TTTTACGTACGTACGTAAAA", "GENE2"],
//! ])
//! .unwrap();
//!
//! assert_eq!(index.len(), 2);
//! assert_eq!(index.get(b"ACGTACGTACGTACGTACGT").unwrap().name, "g1");
//! ```

pub mod index;

pub use index::{LibraryError, LibraryIndex};
