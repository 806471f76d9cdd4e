//! Library sanity checks and small path helpers.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;

use crate::library::LibraryIndex;

/// Whether `seq` consists only of the bases A, C, G and T.
///
/// # Examples
///
/// ```
/// use spacer_counter::utils::validation::is_acgt;
///
/// assert!(is_acgt("ACGTTGCA"));
/// assert!(!is_acgt("ACGNT"));
/// assert!(!is_acgt(""));
/// ```
#[must_use]
pub fn is_acgt(seq: &str) -> bool {
    !seq.is_empty() && seq.bytes().all(|b| matches!(b, b'A' | b'C' | b'G' | b'T'))
}

/// Derive a run label from an output prefix: its final path component.
///
/// Falls back to the whole prefix if it has no file name.
#[must_use]
pub fn run_label_from_prefix(prefix: &str) -> String {
    Path::new(prefix)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .unwrap_or(prefix)
        .to_string()
}

/// What a library looks like before any reads are counted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LibraryReport {
    /// Unique guide sequences
    pub library_size: usize,
    /// Rows dropped because their sequence appeared earlier
    pub duplicate_rows: usize,
    /// Guide length -> number of guides
    pub length_histogram: BTreeMap<usize, usize>,
    /// Window width the library was checked against
    pub window_width: usize,
    /// Names of guides whose length differs from the window width; they can never match
    pub unmatchable: Vec<String>,
    /// Names of guides containing symbols other than A, C, G, T
    pub non_acgt: Vec<String>,
}

impl LibraryReport {
    pub fn new(index: &LibraryIndex, window_width: usize) -> Self {
        let mut length_histogram = BTreeMap::new();
        let mut unmatchable = Vec::new();
        let mut non_acgt = Vec::new();

        for guide in index.guides() {
            *length_histogram.entry(guide.len()).or_default() += 1;
            if guide.len() != window_width {
                unmatchable.push(guide.name.clone());
            }
            if !is_acgt(&guide.sequence) {
                non_acgt.push(guide.name.clone());
            }
        }

        Self {
            library_size: index.len(),
            duplicate_rows: index.duplicates(),
            length_histogram,
            window_width,
            unmatchable,
            non_acgt,
        }
    }

    /// True when every guide can be matched with the configured window
    pub fn is_clean(&self) -> bool {
        self.unmatchable.is_empty() && self.non_acgt.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_acgt() {
        assert!(is_acgt("A"));
        assert!(is_acgt("GATTACA"));
        assert!(!is_acgt("gattaca"));
        assert!(!is_acgt("GATTACAN"));
    }

    #[test]
    fn test_run_label_from_prefix() {
        assert_eq!(run_label_from_prefix("out/sample1"), "sample1");
        assert_eq!(run_label_from_prefix("sample1"), "sample1");
        assert_eq!(run_label_from_prefix("/data/runs/screen_A"), "screen_A");
        assert_eq!(run_label_from_prefix(""), "");
    }

    #[test]
    fn test_library_report() {
        let index = LibraryIndex::load(vec![
            vec!["ok", "ACGTACGTACGTACGTACGT", "GENE1"],
            vec!["short", "ACGTACGTACGTACGTACG", "GENE2"],
            vec!["ambiguous", "ACGTACGTACGTACGTACGN", "GENE3"],
            vec!["dup", "ACGTACGTACGTACGTACGT", "GENE4"],
        ])
        .unwrap();

        let report = LibraryReport::new(&index, 20);
        assert_eq!(report.library_size, 3);
        assert_eq!(report.duplicate_rows, 1);
        assert_eq!(report.length_histogram.get(&20), Some(&2));
        assert_eq!(report.length_histogram.get(&19), Some(&1));
        assert_eq!(report.unmatchable, vec!["short".to_string()]);
        assert_eq!(report.non_acgt, vec!["ambiguous".to_string()]);
        assert!(!report.is_clean());
    }

    #[test]
    fn test_clean_library_report() {
        let index = LibraryIndex::load(vec![vec!["g1", "ACGTA", "GENE1"]]).unwrap();
        assert!(LibraryReport::new(&index, 5).is_clean());
        assert!(!LibraryReport::new(&index, 20).is_clean());
    }
}
