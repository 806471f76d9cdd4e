//! Drives reads through the matcher into an aggregator.
//!
//! Sequential runs process one read at a time. When the config asks for more than one
//! thread, reads are collected into batches and each batch is split across the current
//! rayon pool; every split folds into its own [`CountAggregator`] and the partial results
//! are merged. Sums are order-independent, so both paths give identical tables.

use std::convert::Infallible;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::counting::aggregator::CountAggregator;
use crate::counting::config::CountingConfig;
use crate::library::LibraryIndex;
use crate::matching::engine::SequenceMatcher;

/// Reads collected before a batch is handed to the thread pool
pub const BATCH_SIZE: usize = 100_000;

/// Interval, in reads, between progress messages
pub const PROGRESS_INTERVAL: u64 = 1_000_000;

/// Counts guides read by read with a private aggregator
pub struct GuideCounter<'a> {
    matcher: SequenceMatcher<'a>,
    aggregator: CountAggregator<'a>,
    buffer: Vec<u8>,
}

impl<'a> GuideCounter<'a> {
    pub fn new(index: &'a LibraryIndex, config: &CountingConfig) -> Self {
        Self {
            matcher: config.matcher(index),
            aggregator: CountAggregator::new(index),
            buffer: Vec::new(),
        }
    }

    /// Uppercase, scan and record one read
    pub fn process(&mut self, read: &[u8]) {
        self.buffer.clear();
        self.buffer.extend(read.iter().map(u8::to_ascii_uppercase));
        let hits = self.matcher.scan(&self.buffer);
        self.aggregator.record_read(&hits);
    }

    pub fn num_reads(&self) -> u64 {
        self.aggregator.num_reads()
    }

    pub fn finish(self) -> CountAggregator<'a> {
        self.aggregator
    }
}

/// Count guides over a stream of reads that may fail to parse.
///
/// Stops at the first read error and returns it; no partial result is produced.
///
/// # Errors
///
/// Returns the first error yielded by `reads`.
pub fn try_count_reads<'a, I, S, E>(
    index: &'a LibraryIndex,
    config: &CountingConfig,
    reads: I,
) -> Result<CountAggregator<'a>, E>
where
    I: IntoIterator<Item = Result<S, E>>,
    S: AsRef<[u8]>,
{
    let aggregator = if config.is_parallel() {
        count_batched(index, config, reads)?
    } else {
        count_sequential(index, config, reads)?
    };

    info!(
        "Processed {} reads ({} with a guide)",
        aggregator.num_reads(),
        aggregator.tally(crate::core::types::Tier::Default).reads_with_guide
    );
    Ok(aggregator)
}

/// Count guides over reads that are already in memory
pub fn count_reads<'a, I, S>(
    index: &'a LibraryIndex,
    config: &CountingConfig,
    reads: I,
) -> CountAggregator<'a>
where
    I: IntoIterator<Item = S>,
    S: AsRef<[u8]>,
{
    match try_count_reads(index, config, reads.into_iter().map(Ok::<S, Infallible>)) {
        Ok(aggregator) => aggregator,
        Err(never) => match never {},
    }
}

fn count_sequential<'a, I, S, E>(
    index: &'a LibraryIndex,
    config: &CountingConfig,
    reads: I,
) -> Result<CountAggregator<'a>, E>
where
    I: IntoIterator<Item = Result<S, E>>,
    S: AsRef<[u8]>,
{
    let mut counter = GuideCounter::new(index, config);
    for read in reads {
        counter.process(read?.as_ref());
        if counter.num_reads() % PROGRESS_INTERVAL == 0 {
            info!("Processed {}m reads", counter.num_reads() / 1_000_000);
        }
    }
    Ok(counter.finish())
}

fn count_batched<'a, I, S, E>(
    index: &'a LibraryIndex,
    config: &CountingConfig,
    reads: I,
) -> Result<CountAggregator<'a>, E>
where
    I: IntoIterator<Item = Result<S, E>>,
    S: AsRef<[u8]>,
{
    let mut total = CountAggregator::new(index);
    let mut batch: Vec<Vec<u8>> = Vec::with_capacity(BATCH_SIZE);
    let mut last_report = 0;

    for read in reads {
        batch.push(read?.as_ref().to_vec());
        if batch.len() == BATCH_SIZE {
            total.merge(&count_batch(index, config, &batch));
            batch.clear();

            if total.num_reads() / PROGRESS_INTERVAL > last_report {
                last_report = total.num_reads() / PROGRESS_INTERVAL;
                info!("Processed {}m reads", last_report);
            }
        }
    }

    if !batch.is_empty() {
        total.merge(&count_batch(index, config, &batch));
    }
    Ok(total)
}

fn count_batch<'a>(
    index: &'a LibraryIndex,
    config: &CountingConfig,
    batch: &[Vec<u8>],
) -> CountAggregator<'a> {
    debug!(
        "Counting batch of {} reads on {} threads",
        batch.len(),
        rayon::current_num_threads()
    );

    batch
        .par_iter()
        .fold(
            || GuideCounter::new(index, config),
            |mut counter, read| {
                counter.process(read);
                counter
            },
        )
        .map(GuideCounter::finish)
        .reduce(
            || CountAggregator::new(index),
            |mut a, b| {
                a.merge(&b);
                a
            },
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sequence::reverse_complement;
    use crate::core::types::{Orientation, Tier};
    use crate::counting::config::PrimerConfig;
    use crate::matching::primer::DEFAULT_PRIMER;

    const G1: &str = "ACGTACGTTTGCAAGCTAGC";
    const G2: &str = "GGGGCCCCAAAATTTTGGCC";
    const G3: &str = "TTAGGCATCGATCGATTACG";

    fn make_index() -> LibraryIndex {
        LibraryIndex::load(vec![
            vec!["g1", G1, "GENE1"],
            vec!["g2", G2, "GENE2"],
            vec!["g3", G3, "GENE3"],
        ])
        .unwrap()
    }

    fn rc(seq: &str) -> String {
        String::from_utf8(reverse_complement(seq.as_bytes())).unwrap()
    }

    #[test]
    fn test_reads_are_uppercased() {
        let index = make_index();
        let config = CountingConfig::default();
        let agg = count_reads(&index, &config, vec![G1.to_lowercase()]);
        assert_eq!(agg.table(Tier::Default).get(index.slot_of(G1.as_bytes()).unwrap()), 1);
    }

    #[test]
    fn test_read_error_is_returned() {
        let index = make_index();
        let config = CountingConfig::default();
        let reads: Vec<Result<&str, String>> =
            vec![Ok(G1), Err("truncated record".to_string()), Ok(G2)];

        let result = try_count_reads(&index, &config, reads);
        assert_eq!(result.err(), Some("truncated record".to_string()));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let index = make_index();
        let key = DEFAULT_PRIMER;
        let mut reads = Vec::new();
        for i in 0..2_500 {
            let read = match i % 5 {
                0 => format!("{key}{}", rc(G1)),
                1 => format!("GGGGGGGGGGGGGGGGGGGGGGGGG{}", rc(G2)),
                2 => format!("{}{}", &key[2..], rc(G3)),
                3 => format!("{}TT{}", rc(G1), rc(G2)),
                _ => "ACGTNACGTNACGTNACGTNACGTN".to_string(),
            };
            reads.push(read);
        }

        let sequential = CountingConfig {
            orientation: Orientation::ReverseComplement,
            primer: Some(PrimerConfig::default()),
            ..CountingConfig::default()
        };
        let parallel = CountingConfig {
            threads: Some(4),
            ..sequential.clone()
        };

        let pool = rayon::ThreadPoolBuilder::new().num_threads(4).build().unwrap();
        let a = count_reads(&index, &sequential, &reads);
        let b = pool.install(|| count_reads(&index, &parallel, &reads));

        assert_eq!(a.num_reads(), 2_500);
        assert_eq!(b.num_reads(), 2_500);
        for tier in Tier::ALL {
            assert_eq!(a.table(tier), b.table(tier));
            assert_eq!(a.tally(tier), b.tally(tier));
        }
        assert_eq!(a.primer_tally(), b.primer_tally());

        // Read kinds 0 and 3 each carry g1; kind 0 has a perfect key
        let g1 = index.slot_of(G1.as_bytes()).unwrap();
        assert_eq!(a.table(Tier::Default).get(g1), 1_000);
        assert_eq!(a.table(Tier::Stringent).get(g1), 500);
        assert_eq!(a.tally(Tier::Default).reads_with_guide, 2_000);
    }
}
