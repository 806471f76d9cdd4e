//! Command-line interface for spacer-counter.
//!
//! Available commands:
//!
//! - **count**: Count library guides in a FASTQ file and write count tables and statistics
//! - **check-library**: Load a guide library and report problems before counting
//!
//! ## Usage
//!
//! ```text
//! # Count a forward library
//! spacer-counter count -l library.csv -f sample.fastq.gz -o out/sample
//!
//! # Reverse library, with primer-validated tiers, on 8 threads
//! spacer-counter count -l library.csv -f sample.fastq.gz -o out/sample \
//!     --reverse --primer-tiers --threads 8
//!
//! # JSON summary for scripting
//! spacer-counter --format json count -l library.csv -f sample.fastq -o out/sample
//!
//! # Check a library
//! spacer-counter check-library -l library.csv
//! ```

use clap::{Parser, Subcommand};

pub mod check_library;
pub mod count;

#[derive(Parser)]
#[command(name = "spacer-counter")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Count CRISPR guide sequences in sequencing reads")]
#[command(
    long_about = "spacer-counter counts how often each guide of a CRISPR library occurs in a FASTQ file.\n\nEvery read is scanned with a sliding window and each window is looked up in the library. It reports:\n- Per-guide count tables\n- Mapping rate, undetected guides and the P90/P10 skew ratio\n- Optional primer-validated counts (stringent and fuzzy-key tiers)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format for the summary printed to stdout
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Count guides in a FASTQ file
    Count(count::CountArgs),

    /// Validate a guide library
    CheckLibrary(check_library::CheckLibraryArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
