use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::cli::OutputFormat;
use crate::matching::engine::DEFAULT_WINDOW_WIDTH;
use crate::parsing::library::parse_library_file;
use crate::utils::validation::LibraryReport;

/// Names listed before the text report truncates
const MAX_LISTED: usize = 10;

#[derive(Args)]
pub struct CheckLibraryArgs {
    /// Guide library CSV: one `name,sequence,gene` row per guide, no header
    #[arg(short, long)]
    pub library: PathBuf,

    /// Window width the library will be counted with
    #[arg(short, long, default_value_t = DEFAULT_WINDOW_WIDTH)]
    pub window: usize,
}

/// Execute check-library subcommand
///
/// # Errors
///
/// Returns an error if the library cannot be read or is malformed.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: CheckLibraryArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    if args.window == 0 {
        anyhow::bail!("Window width must be at least 1");
    }

    let index = parse_library_file(&args.library)
        .with_context(|| format!("Failed to load library {}", args.library.display()))?;
    let report = LibraryReport::new(&index, args.window);

    match format {
        OutputFormat::Text => print_text_report(&report, verbose),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Tsv => print_tsv_report(&report),
    }

    Ok(())
}

fn print_text_report(report: &LibraryReport, verbose: bool) {
    println!("Library size:   {} guides", report.library_size);
    println!("Duplicate rows: {}", report.duplicate_rows);
    println!("Guide lengths:");
    for (length, n) in &report.length_histogram {
        println!("  {length:>4} nt: {n}");
    }

    print_names(
        &format!("Guides that cannot match a {} nt window", report.window_width),
        &report.unmatchable,
        verbose,
    );
    print_names("Guides with non-ACGT symbols", &report.non_acgt, verbose);

    if report.is_clean() {
        println!();
        println!("Library OK");
    }
}

fn print_names(title: &str, names: &[String], verbose: bool) {
    if names.is_empty() {
        return;
    }
    println!();
    println!("{title}: {}", names.len());
    let shown = if verbose { names.len() } else { names.len().min(MAX_LISTED) };
    for name in &names[..shown] {
        println!("  {name}");
    }
    if shown < names.len() {
        println!("  ... and {} more (use --verbose to list all)", names.len() - shown);
    }
}

fn print_tsv_report(report: &LibraryReport) {
    println!("metric\tvalue");
    println!("library_size\t{}", report.library_size);
    println!("duplicate_rows\t{}", report.duplicate_rows);
    println!("window_width\t{}", report.window_width);
    println!("unmatchable_guides\t{}", report.unmatchable.len());
    println!("non_acgt_guides\t{}", report.non_acgt.len());
    for (length, n) in &report.length_histogram {
        println!("length_{length}\t{n}");
    }
}
