//! Nucleotide helpers shared by the matcher and the library index.

/// Complement of a single base. Symbols outside `ACGT` (e.g. `N`) are returned unchanged.
#[inline]
#[must_use]
pub const fn complement(base: u8) -> u8 {
    match base {
        b'A' => b'T',
        b'T' => b'A',
        b'C' => b'G',
        b'G' => b'C',
        other => other,
    }
}

/// Reverse complement of `seq`.
///
/// # Examples
///
/// ```
/// use spacer_counter::core::sequence::reverse_complement;
///
/// assert_eq!(reverse_complement(b"AACG"), b"CGTT".to_vec());
/// assert_eq!(reverse_complement(b"ANT"), b"ANT".to_vec());
/// ```
#[must_use]
pub fn reverse_complement(seq: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(seq.len());
    reverse_complement_into(seq, &mut out);
    out
}

/// Write the reverse complement of `seq` into `out`, replacing its contents.
///
/// Lets the matcher reuse one buffer across every window of a read.
pub fn reverse_complement_into(seq: &[u8], out: &mut Vec<u8>) {
    out.clear();
    out.extend(seq.iter().rev().map(|&b| complement(b)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complement() {
        assert_eq!(complement(b'A'), b'T');
        assert_eq!(complement(b'T'), b'A');
        assert_eq!(complement(b'C'), b'G');
        assert_eq!(complement(b'G'), b'C');
        assert_eq!(complement(b'N'), b'N');
        assert_eq!(complement(b'-'), b'-');
    }

    #[test]
    fn test_reverse_complement() {
        assert_eq!(reverse_complement(b"ACGT"), b"ACGT".to_vec());
        assert_eq!(reverse_complement(b"AAAAC"), b"GTTTT".to_vec());
        assert_eq!(reverse_complement(b""), Vec::<u8>::new());
    }

    #[test]
    fn test_reverse_complement_passes_through_unknown_symbols() {
        assert_eq!(reverse_complement(b"ACNNGT"), b"ACNNGT".to_vec());
        assert_eq!(reverse_complement(b"AXC"), b"GXT".to_vec());
    }

    #[test]
    fn test_reverse_complement_is_an_involution() {
        let seqs: [&[u8]; 5] = [
            b"A",
            b"ACGTTGCA",
            b"AACTTGCTATTTCTAGCTCTAAAAC",
            b"GGGGGGGGGGCCCCCCCCCC",
            b"TTAGGCATCGATCGATTACG",
        ];
        for seq in seqs {
            assert_eq!(reverse_complement(&reverse_complement(seq)), seq.to_vec());
        }
    }

    #[test]
    fn test_reverse_complement_into_reuses_buffer() {
        let mut buf = b"leftover contents".to_vec();
        reverse_complement_into(b"GATTACA", &mut buf);
        assert_eq!(buf, b"TGTAATC".to_vec());
    }
}
