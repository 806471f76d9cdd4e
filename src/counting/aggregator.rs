use serde::Serialize;

use crate::core::guide::GuideRecord;
use crate::core::types::{PrimerMatch, Tier};
use crate::library::LibraryIndex;
use crate::matching::engine::MatchResult;

/// Per-guide counts for one tier, addressed by library slot.
///
/// Every guide in the library has an entry from the start; counts only ever go up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountTable {
    counts: Vec<u64>,
}

impl CountTable {
    /// A table with a zero count for each of `len` guides
    pub fn new(len: usize) -> Self {
        Self {
            counts: vec![0; len],
        }
    }

    #[inline]
    pub fn increment(&mut self, slot: usize) {
        if let Some(count) = self.counts.get_mut(slot) {
            *count += 1;
        }
    }

    pub fn get(&self, slot: usize) -> u64 {
        self.counts.get(slot).copied().unwrap_or(0)
    }

    /// Counts in slot order (guide sequence ascending)
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Number of guides that were never counted
    pub fn zero_count(&self) -> usize {
        self.counts.iter().filter(|&&n| n == 0).count()
    }

    /// Add `other`'s counts into this table
    pub fn merge(&mut self, other: &CountTable) {
        for (mine, theirs) in self.counts.iter_mut().zip(&other.counts) {
            *mine += theirs;
        }
    }
}

/// Read-level totals for one tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TierTally {
    /// Reads with at least one hit credited to the tier
    pub reads_with_guide: u64,

    /// Hits credited to the tier
    pub match_events: u64,
}

impl TierTally {
    fn merge(&mut self, other: &TierTally) {
        self.reads_with_guide += other.reads_with_guide;
        self.match_events += other.match_events;
    }
}

/// Outcomes of primer validation over all hits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PrimerTally {
    pub perfect: u64,
    pub approximate: u64,
    pub not_found: u64,
}

impl PrimerTally {
    fn record(&mut self, primer: PrimerMatch) {
        match primer {
            PrimerMatch::Perfect => self.perfect += 1,
            PrimerMatch::Approximate(_) => self.approximate += 1,
            PrimerMatch::None => self.not_found += 1,
        }
    }

    fn merge(&mut self, other: &PrimerTally) {
        self.perfect += other.perfect;
        self.approximate += other.approximate;
        self.not_found += other.not_found;
    }

    pub fn total(&self) -> u64 {
        self.perfect + self.approximate + self.not_found
    }
}

/// Accumulates hits into one count table per tier.
///
/// One aggregator is owned by a counting run. To count in parallel, give each worker its
/// own aggregator over the same library and [`merge`](Self::merge) them at the end;
/// addition is commutative, so the result does not depend on merge order.
#[derive(Debug, Clone)]
pub struct CountAggregator<'a> {
    index: &'a LibraryIndex,
    tables: [CountTable; 3],
    tallies: [TierTally; 3],
    primer: PrimerTally,
    num_reads: u64,
}

impl<'a> CountAggregator<'a> {
    pub fn new(index: &'a LibraryIndex) -> Self {
        let len = index.len();
        Self {
            index,
            tables: [CountTable::new(len), CountTable::new(len), CountTable::new(len)],
            tallies: [TierTally::default(); 3],
            primer: PrimerTally::default(),
            num_reads: 0,
        }
    }

    /// Credit one hit on `guide_sequence` to `tier`.
    ///
    /// Returns `false`, and records nothing, if the sequence is not in the library.
    pub fn record(&mut self, guide_sequence: &[u8], tier: Tier) -> bool {
        match self.index.slot_of(guide_sequence) {
            Some(slot) => {
                self.record_slot(slot, tier);
                true
            }
            None => false,
        }
    }

    /// Credit one hit on the guide at `slot` to `tier`
    #[inline]
    pub fn record_slot(&mut self, slot: usize, tier: Tier) {
        self.tables[tier.slot()].increment(slot);
        self.tallies[tier.slot()].match_events += 1;
    }

    /// Record one read and all of its hits.
    ///
    /// Every hit is credited to the default tier. Hits that carry a primer classification
    /// are also credited to the stringent and fuzzy-key tiers it qualifies for.
    pub fn record_read(&mut self, hits: &[MatchResult<'_>]) {
        self.num_reads += 1;

        let mut credited = [false; 3];
        for hit in hits {
            if let Some(primer) = hit.primer {
                self.primer.record(primer);
            }

            for tier in Tier::ALL {
                let qualifies = match hit.primer {
                    Some(primer) => primer.credits(tier),
                    None => tier == Tier::Default,
                };
                if qualifies {
                    self.record_slot(hit.slot, tier);
                    credited[tier.slot()] = true;
                }
            }
        }

        for tier in Tier::ALL {
            if credited[tier.slot()] {
                self.tallies[tier.slot()].reads_with_guide += 1;
            }
        }
    }

    /// Fold another aggregator over the same library into this one
    ///
    /// # Panics
    ///
    /// Panics if `other` was built over a different [`LibraryIndex`], since its slots
    /// would not line up with ours.
    pub fn merge(&mut self, other: &CountAggregator<'_>) {
        assert!(
            std::ptr::eq(self.index, other.index),
            "cannot merge counts from a different library"
        );
        for tier in Tier::ALL {
            let i = tier.slot();
            self.tables[i].merge(&other.tables[i]);
            self.tallies[i].merge(&other.tallies[i]);
        }
        self.primer.merge(&other.primer);
        self.num_reads += other.num_reads;
    }

    pub fn index(&self) -> &'a LibraryIndex {
        self.index
    }

    /// Total number of reads recorded
    pub fn num_reads(&self) -> u64 {
        self.num_reads
    }

    pub fn table(&self, tier: Tier) -> &CountTable {
        &self.tables[tier.slot()]
    }

    pub fn tally(&self, tier: Tier) -> TierTally {
        self.tallies[tier.slot()]
    }

    pub fn primer_tally(&self) -> PrimerTally {
        self.primer
    }

    /// `(guide, count)` rows for `tier`, sorted by guide sequence
    pub fn rows(&self, tier: Tier) -> impl Iterator<Item = (&'a GuideRecord, u64)> + '_ {
        self.index
            .guides()
            .iter()
            .zip(self.tables[tier.slot()].counts().iter().copied())
    }
}
