//! Primer/key validation by bounded edit distance.
//!
//! In some read layouts a fixed primer (the "key") sits immediately upstream of the guide.
//! Finding it there is a confidence signal for the hit, so the segment in front of each
//! hit is compared against the reference primer and classified as a perfect match, an
//! approximate match (within `max_edit_distance` insertions, deletions or substitutions)
//! or no match.
//!
//! The distance computation is a banded Levenshtein dynamic program: only cells within
//! `max_edit_distance` of the diagonal are evaluated, and the scan stops as soon as a whole
//! row exceeds the threshold.

use crate::core::types::PrimerMatch;

/// Reference key expected upstream of guides in reverse-orientation reads
pub const DEFAULT_PRIMER: &str = "AACTTGCTATTTCTAGCTCTAAAAC";

/// Default maximum edit distance for an approximate primer match
pub const DEFAULT_MAX_EDIT_DISTANCE: usize = 2;

/// Levenshtein distance between `a` and `b` if it is at most `max_distance`, else `None`.
///
/// Works over raw bytes, so any alphabet (including `N` and other non-ACGT symbols) is
/// accepted and compared by identity.
///
/// # Examples
///
/// ```
/// use spacer_counter::matching::primer::bounded_edit_distance;
///
/// assert_eq!(bounded_edit_distance(b"ACGT", b"ACGT", 2), Some(0));
/// assert_eq!(bounded_edit_distance(b"ACGT", b"AGT", 2), Some(1));
/// assert_eq!(bounded_edit_distance(b"AAAA", b"TTTT", 2), None);
/// ```
#[must_use]
pub fn bounded_edit_distance(a: &[u8], b: &[u8], max_distance: usize) -> Option<usize> {
    let (n, m) = (a.len(), b.len());
    if n.abs_diff(m) > max_distance {
        return None;
    }

    // Any value above `max_distance` is clamped to `cap`; outside the band counts as `cap`.
    let cap = max_distance + 1;
    let mut prev: Vec<usize> = (0..=m).map(|j| j.min(cap)).collect();
    let mut curr = vec![cap; m + 1];

    for i in 1..=n {
        let lo = i.saturating_sub(max_distance).max(1);
        let hi = (i + max_distance).min(m);

        curr[0] = i.min(cap);
        if lo > 1 {
            curr[lo - 1] = cap;
        }

        let mut row_min = if lo == 1 { curr[0] } else { cap };
        let ca = a[i - 1];
        for j in lo..=hi {
            let cost = usize::from(ca != b[j - 1]);
            let value = (prev[j - 1] + cost)
                .min(prev[j] + 1)
                .min(curr[j - 1] + 1)
                .min(cap);
            curr[j] = value;
            row_min = row_min.min(value);
        }
        if hi < m {
            curr[hi + 1] = cap;
        }

        if row_min > max_distance {
            return None;
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    let distance = prev[m];
    (distance <= max_distance).then_some(distance)
}

/// Classify `candidate` against `reference`.
#[must_use]
pub fn validate(candidate: &[u8], reference: &[u8], max_edit_distance: usize) -> PrimerMatch {
    if candidate == reference {
        return PrimerMatch::Perfect;
    }

    match bounded_edit_distance(candidate, reference, max_edit_distance) {
        Some(distance) => PrimerMatch::Approximate(distance),
        None => PrimerMatch::None,
    }
}

/// A reference primer together with its edit-distance tolerance
#[derive(Debug, Clone)]
pub struct PrimerValidator {
    reference: Vec<u8>,
    max_edit_distance: usize,
}

impl PrimerValidator {
    pub fn new(reference: impl AsRef<[u8]>, max_edit_distance: usize) -> Self {
        Self {
            reference: reference.as_ref().to_ascii_uppercase(),
            max_edit_distance,
        }
    }

    /// Length of the upstream segment to examine in front of each hit
    pub fn len(&self) -> usize {
        self.reference.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reference.is_empty()
    }

    pub fn reference(&self) -> &[u8] {
        &self.reference
    }

    pub fn max_edit_distance(&self) -> usize {
        self.max_edit_distance
    }

    /// Classify the segment found upstream of a hit
    pub fn classify(&self, candidate: &[u8]) -> PrimerMatch {
        validate(candidate, &self.reference, self.max_edit_distance)
    }
}

impl Default for PrimerValidator {
    fn default() -> Self {
        Self::new(DEFAULT_PRIMER, DEFAULT_MAX_EDIT_DISTANCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Unbounded textbook Levenshtein, used to check the banded version
    fn full_edit_distance(a: &[u8], b: &[u8]) -> usize {
        let mut prev: Vec<usize> = (0..=b.len()).collect();
        let mut curr = vec![0usize; b.len() + 1];
        for (i, &ca) in a.iter().enumerate() {
            curr[0] = i + 1;
            for (j, &cb) in b.iter().enumerate() {
                let cost = usize::from(ca != cb);
                curr[j + 1] = (prev[j] + cost).min(prev[j + 1] + 1).min(curr[j] + 1);
            }
            prev.clone_from(&curr);
        }
        prev[b.len()]
    }

    fn substitute(seq: &[u8], positions: &[usize]) -> Vec<u8> {
        let mut out = seq.to_vec();
        for &p in positions {
            out[p] = if out[p] == b'A' { b'C' } else { b'A' };
        }
        out
    }

    #[test]
    fn test_identical_is_perfect() {
        let primer = DEFAULT_PRIMER.as_bytes();
        assert_eq!(validate(primer, primer, 2), PrimerMatch::Perfect);
    }

    #[test]
    fn test_one_substitution_is_approximate() {
        let primer = DEFAULT_PRIMER.as_bytes();
        let candidate = substitute(primer, &[7]);
        assert_eq!(validate(&candidate, primer, 2), PrimerMatch::Approximate(1));
    }

    #[test]
    fn test_five_substitutions_is_none() {
        let primer = DEFAULT_PRIMER.as_bytes();
        let candidate = substitute(primer, &[0, 5, 10, 15, 20]);
        assert_eq!(validate(&candidate, primer, 2), PrimerMatch::None);
    }

    #[test]
    fn test_indels_count_toward_distance() {
        let primer = DEFAULT_PRIMER.as_bytes();

        // Drop the first base and append one: same length, distance 2
        let mut shifted = primer[1..].to_vec();
        shifted.push(b'G');
        assert_eq!(validate(&shifted, primer, 2), PrimerMatch::Approximate(2));

        // One base shorter
        let truncated = &primer[1..];
        assert_eq!(validate(truncated, primer, 2), PrimerMatch::Approximate(1));

        // Four bases shorter cannot be within two edits
        assert_eq!(validate(&primer[4..], primer, 2), PrimerMatch::None);
    }

    #[test]
    fn test_bounded_matches_full_distance_within_threshold() {
        let cases: [(&[u8], &[u8]); 8] = [
            (b"", b""),
            (b"", b"AC"),
            (b"ACGT", b"ACGT"),
            (b"ACGT", b"TGCA"),
            (b"GATTACA", b"GCATGCT"),
            (b"AACTTGCTAT", b"AACTGCTATT"),
            (b"NNNNACGT", b"ACGTNNNN"),
            (b"kitten", b"sitting"),
        ];

        for (a, b) in cases {
            let full = full_edit_distance(a, b);
            for k in 0..=4 {
                let bounded = bounded_edit_distance(a, b, k);
                if full <= k {
                    assert_eq!(bounded, Some(full), "a={a:?} b={b:?} k={k}");
                } else {
                    assert_eq!(bounded, None, "a={a:?} b={b:?} k={k}");
                }
            }
        }
    }

    #[test]
    fn test_zero_threshold_is_equality() {
        assert_eq!(bounded_edit_distance(b"ACGT", b"ACGT", 0), Some(0));
        assert_eq!(bounded_edit_distance(b"ACGT", b"ACGA", 0), None);
    }

    #[test]
    fn test_non_acgt_symbols_are_total() {
        assert_eq!(bounded_edit_distance(b"AC-T", b"ACNT", 2), Some(1));
        assert_eq!(validate(b"\xff\x00", b"AC", 2), PrimerMatch::Approximate(2));
    }

    #[test]
    fn test_validator_uppercases_reference() {
        let validator = PrimerValidator::new("aacttg", 1);
        assert_eq!(validator.reference(), b"AACTTG");
        assert_eq!(validator.classify(b"AACTTG"), PrimerMatch::Perfect);
        assert_eq!(validator.classify(b"AACTTC"), PrimerMatch::Approximate(1));
        assert_eq!(validator.len(), 6);
    }

    #[test]
    fn test_default_validator() {
        let validator = PrimerValidator::default();
        assert_eq!(validator.reference(), DEFAULT_PRIMER.as_bytes());
        assert_eq!(validator.max_edit_distance(), DEFAULT_MAX_EDIT_DISTANCE);
    }
}
