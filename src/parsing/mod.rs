//! Readers for the run's inputs.
//!
//! This module provides parsers for:
//!
//! - **Guide libraries**: comma-separated `name,sequence,gene` rows without a header
//! - **FASTQ files**: plain or gzip-compressed, or standard input via `-`
//!
//! ## Example
//!
//! ```rust,no_run
//! use spacer_counter::parsing::{fastq, library};
//! use std::path::Path;
//!
//! let index = library::parse_library_file(Path::new("library.csv")).unwrap();
//! for read in fastq::open(Path::new("reads.fastq.gz")).unwrap() {
//!     let bases = read.unwrap();
//!     println!("{} bases", bases.len());
//! }
//! # let _ = index;
//! ```

pub mod fastq;
pub mod library;
