use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use rayon::ThreadPoolBuilder;
use serde::Serialize;
use tracing::{info, warn};

use crate::cli::OutputFormat;
use crate::core::types::{Orientation, Tier};
use crate::counting::aggregator::{CountAggregator, PrimerTally};
use crate::counting::config::{CountingConfig, PrimerConfig};
use crate::counting::pipeline::try_count_reads;
use crate::counting::stats::{summarize, RunStatistics};
use crate::parsing::{fastq, library::parse_library_file};
use crate::utils::validation::run_label_from_prefix;

/// Header of every statistics file
pub const STATS_HEADER: [&str; 7] = [
    "sample_name",
    "num_reads",
    "num_reads_with_guide",
    "perc_mapped_reads",
    "perc_undetected_guides",
    "skew_ratio",
    "sgRNA_library_size",
];

#[derive(Args)]
pub struct CountArgs {
    /// Guide library CSV: one `name,sequence,gene` row per guide, no header
    #[arg(short, long)]
    pub library: PathBuf,

    /// Reads to count (FASTQ, optionally gzipped). Use '-' for stdin
    #[arg(short, long)]
    pub fastq: PathBuf,

    /// Output prefix; writes PREFIX.counts and PREFIX.stats (plus tier variants)
    #[arg(short, long)]
    pub output_prefix: String,

    /// Guides appear reverse-complemented in the reads
    #[arg(long)]
    pub reverse: bool,

    /// Also produce the primer-validated stringent and fuzzy-key tiers
    #[arg(long)]
    pub primer_tiers: bool,

    /// Primer/key expected immediately upstream of each guide (implies --primer-tiers)
    #[arg(long)]
    pub primer: Option<String>,

    /// Maximum edit distance for an approximate primer match (implies --primer-tiers)
    #[arg(long)]
    pub max_edit_distance: Option<usize>,

    /// Width of the read window compared against the library
    #[arg(short, long)]
    pub window: Option<usize>,

    /// Worker threads; more than one counts on a thread pool
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Sample name written to the statistics files (defaults to the prefix file name)
    #[arg(long)]
    pub label: Option<String>,

    /// JSON config file; flags given on the command line take precedence
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl CountArgs {
    /// Combine the optional config file with the command-line flags
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be loaded or the result is invalid.
    pub fn to_config(&self) -> anyhow::Result<CountingConfig> {
        let mut config = match &self.config {
            Some(path) => CountingConfig::load_from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => CountingConfig::default(),
        };

        if self.reverse {
            config.orientation = Orientation::ReverseComplement;
        }
        if let Some(width) = self.window {
            config.window_width = width;
        }
        if let Some(threads) = self.threads {
            config.threads = Some(threads);
        }
        if self.primer_tiers || self.primer.is_some() || self.max_edit_distance.is_some() {
            let primer = config.primer.get_or_insert_with(PrimerConfig::default);
            if let Some(sequence) = &self.primer {
                primer.sequence.clone_from(sequence);
            }
            if let Some(max) = self.max_edit_distance {
                primer.max_edit_distance = max;
            }
        }

        config.validate()?;
        Ok(config)
    }

    fn label(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| run_label_from_prefix(&self.output_prefix))
    }
}

/// Per-tier section of the run summary
#[derive(Debug, Serialize)]
struct TierSummary {
    tier: Tier,
    reads_with_guide: u64,
    match_events: u64,
    counts_file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    stats_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    statistics: Option<RunStatistics>,
}

#[derive(Debug, Serialize)]
struct CountSummary {
    sample_name: String,
    orientation: Orientation,
    window_width: usize,
    library_size: usize,
    num_reads: u64,
    tiers: Vec<TierSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    primer: Option<PrimerTally>,
}

/// Execute count subcommand
///
/// # Errors
///
/// Returns an error if the library is malformed, the reads cannot be parsed, an output
/// file cannot be written, or no read matched a guide. In the last case the count tables
/// are still written before the error is returned.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: CountArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let config = args.to_config()?;
    let sample_name = args.label();

    let index = parse_library_file(&args.library)
        .with_context(|| format!("Failed to load library {}", args.library.display()))?;
    if index.duplicates() > 0 {
        warn!(
            "{} library rows repeat an earlier guide sequence and were ignored",
            index.duplicates()
        );
    }

    if verbose {
        eprintln!(
            "Loaded {} guides; scanning {} reads with a {} nt window",
            index.len(),
            config.orientation,
            config.window_width
        );
    }

    let reads = fastq::open(&args.fastq)
        .with_context(|| format!("Failed to open reads {}", args.fastq.display()))?;

    let aggregator = match config.threads.filter(|&n| n > 1) {
        Some(threads) => {
            info!("Counting on {threads} threads");
            let pool = ThreadPoolBuilder::new().num_threads(threads).build()?;
            pool.install(|| try_count_reads(&index, &config, reads))?
        }
        None => try_count_reads(&index, &config, reads)?,
    };

    let tiers: &[Tier] = if config.primer_tiers_enabled() {
        &Tier::ALL
    } else {
        &[Tier::Default]
    };

    let mut summaries = Vec::with_capacity(tiers.len());
    for &tier in tiers {
        let counts_path = format!("{}.counts{}", args.output_prefix, tier.file_suffix());
        write_counts(Path::new(&counts_path), &aggregator, tier)
            .with_context(|| format!("Failed to write {counts_path}"))?;
        info!("Wrote {tier} counts to {counts_path}");

        let tally = aggregator.tally(tier);
        summaries.push(TierSummary {
            tier,
            reads_with_guide: tally.reads_with_guide,
            match_events: tally.match_events,
            counts_file: counts_path,
            stats_file: None,
            statistics: None,
        });
    }

    for summary in &mut summaries {
        let stats = match summarize(
            aggregator.table(summary.tier),
            aggregator.num_reads(),
            summary.reads_with_guide,
        ) {
            Ok(stats) => stats,
            Err(e) if summary.tier == Tier::Default => return Err(e.into()),
            Err(e) => {
                warn!("Skipping {} statistics: {e}", summary.tier);
                continue;
            }
        };

        let stats_path = format!("{}.stats{}", args.output_prefix, summary.tier.file_suffix());
        write_stats(Path::new(&stats_path), &sample_name, &stats)
            .with_context(|| format!("Failed to write {stats_path}"))?;
        summary.stats_file = Some(stats_path);
        summary.statistics = Some(stats);
    }

    let summary = CountSummary {
        sample_name,
        orientation: config.orientation,
        window_width: config.window_width,
        library_size: index.len(),
        num_reads: aggregator.num_reads(),
        tiers: summaries,
        primer: config
            .primer_tiers_enabled()
            .then(|| aggregator.primer_tally()),
    };

    match format {
        OutputFormat::Text => print_text_summary(&summary),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Tsv => print_tsv_summary(&summary),
    }

    Ok(())
}

/// Write a tier's count table: `name,sequence,gene,count` per guide, no header
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write_counts(path: &Path, aggregator: &CountAggregator<'_>, tier: Tier) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for (guide, count) in aggregator.rows(tier) {
        writer.write_record([
            guide.name.as_str(),
            guide.sequence.as_str(),
            guide.gene.as_str(),
            count.to_string().as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Write one statistics row under [`STATS_HEADER`]
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write_stats(path: &Path, sample_name: &str, stats: &RunStatistics) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(STATS_HEADER)?;
    writer.write_record([
        sample_name.to_string(),
        stats.num_reads.to_string(),
        stats.num_reads_with_guide.to_string(),
        format!("{:.1}", stats.percent_mapped),
        format!("{:.1}", stats.percent_undetected_guides),
        stats.skew_ratio.to_string(),
        stats.library_size.to_string(),
    ])?;
    writer.flush()?;
    Ok(())
}

fn print_text_summary(summary: &CountSummary) {
    println!("Sample:       {}", summary.sample_name);
    println!("Orientation:  {}", summary.orientation);
    println!("Library size: {} guides", summary.library_size);
    println!("Reads:        {}", summary.num_reads);

    for tier in &summary.tiers {
        println!();
        println!("[{}]", tier.tier);
        println!("  Reads with guide:  {}", tier.reads_with_guide);
        println!("  Match events:      {}", tier.match_events);
        match &tier.statistics {
            Some(stats) => {
                println!("  Mapped reads:      {:.1}%", stats.percent_mapped);
                println!("  Undetected guides: {:.1}%", stats.percent_undetected_guides);
                println!("  Skew ratio:        {}", stats.skew_ratio);
            }
            None => println!("  No statistics: no read matched a guide in this tier"),
        }
        println!("  Counts:            {}", tier.counts_file);
        if let Some(path) = &tier.stats_file {
            println!("  Statistics:        {path}");
        }
    }

    if let Some(primer) = &summary.primer {
        println!();
        println!("Primer validation over {} hits:", primer.total());
        println!("  Perfect:     {}", primer.perfect);
        println!("  Approximate: {}", primer.approximate);
        println!("  Not found:   {}", primer.not_found);
    }
}

fn print_tsv_summary(summary: &CountSummary) {
    println!(
        "sample_name\ttier\tnum_reads\tnum_reads_with_guide\tmatch_events\tperc_mapped_reads\tperc_undetected_guides\tskew_ratio\tsgRNA_library_size"
    );
    for tier in &summary.tiers {
        let (mapped, undetected, skew) = match &tier.statistics {
            Some(stats) => (
                format!("{:.1}", stats.percent_mapped),
                format!("{:.1}", stats.percent_undetected_guides),
                stats.skew_ratio.to_string(),
            ),
            None => ("NA".to_string(), "NA".to_string(), "NA".to_string()),
        };
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            summary.sample_name,
            tier.tier,
            summary.num_reads,
            tier.reads_with_guide,
            tier.match_events,
            mapped,
            undetected,
            skew,
            summary.library_size
        );
    }
}
