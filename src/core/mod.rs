//! Core data types for guide counting.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`GuideRecord`]: A single guide (spacer) from the library with its name and target gene
//! - [`Orientation`]: Whether reads carry guides in forward or reverse-complement orientation
//! - [`Tier`]: The count tables a hit can be credited to
//! - [`PrimerMatch`]: Classification of the sequence found upstream of a guide
//!
//! ## Tiers
//!
//! Every hit is credited to the default tier. When primer validation is enabled, hits are
//! additionally credited to the stricter tiers based on the upstream primer/key sequence:
//!
//! | Tier      | Upstream primer requirement |
//! |-----------|-----------------------------|
//! | Default   | None                        |
//! | Stringent | Perfect match               |
//! | FuzzyKey  | Perfect or approximate match |

pub mod guide;
pub mod sequence;
pub mod types;

pub use guide::GuideRecord;
pub use types::{Orientation, PrimerMatch, Tier};
