use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

use crate::core::guide::GuideRecord;

/// Number of fields every library row must have
pub const LIBRARY_FIELDS: usize = 3;

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("Failed to read library: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse library: {0}")]
    Csv(#[from] csv::Error),

    #[error("Malformed library row on line {line}: expected 3 fields (name,sequence,gene), found {fields}")]
    Malformed { line: u64, fields: usize },

    #[error("Library contains no guides")]
    Empty,
}

/// Build a guide from the fields of one library row.
///
/// # Errors
///
/// Returns `LibraryError::Malformed` unless there are exactly three fields.
pub fn guide_from_fields<S: AsRef<str>>(fields: &[S], line: u64) -> Result<GuideRecord, LibraryError> {
    if fields.len() != LIBRARY_FIELDS {
        return Err(LibraryError::Malformed {
            line,
            fields: fields.len(),
        });
    }

    Ok(GuideRecord::new(
        fields[0].as_ref().trim(),
        fields[1].as_ref().trim(),
        fields[2].as_ref().trim(),
    ))
}

/// Immutable lookup from guide sequence to guide.
///
/// Guides are stored sorted by sequence; a guide's position in that order is its *slot*,
/// which count tables use to address their counters.
#[derive(Debug, Clone)]
pub struct LibraryIndex {
    /// Unique guides, sorted by sequence
    guides: Vec<GuideRecord>,

    /// Index: sequence -> slot in `guides`
    sequence_to_slot: HashMap<Vec<u8>, usize>,

    /// Rows dropped because their sequence was already present
    duplicates: usize,
}

impl LibraryIndex {
    /// Build an index from in-memory rows of `(name, sequence, gene)` fields.
    ///
    /// Line numbers in errors are the 1-based position of the row.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::Malformed` if a row does not have exactly three fields, or
    /// `LibraryError::Empty` if there are no rows.
    pub fn load<I, R, S>(rows: I) -> Result<Self, LibraryError>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let guides = rows
            .into_iter()
            .enumerate()
            .map(|(i, row)| {
                let fields: Vec<S> = row.into_iter().collect();
                guide_from_fields(&fields, i as u64 + 1)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_guides(guides)
    }

    /// Build an index from guides in library order, keeping the first guide for each sequence.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::Empty` if `guides` is empty.
    pub fn from_guides(guides: Vec<GuideRecord>) -> Result<Self, LibraryError> {
        if guides.is_empty() {
            return Err(LibraryError::Empty);
        }

        let total = guides.len();
        let mut first_seen: HashMap<String, GuideRecord> = HashMap::with_capacity(total);
        for guide in guides {
            first_seen.entry(guide.sequence.clone()).or_insert(guide);
        }

        let mut unique: Vec<GuideRecord> = first_seen.into_values().collect();
        unique.sort_by(|a, b| a.sequence.cmp(&b.sequence));

        let sequence_to_slot = unique
            .iter()
            .enumerate()
            .map(|(slot, g)| (g.bases().to_vec(), slot))
            .collect();

        let duplicates = total - unique.len();
        debug!(
            "Indexed {} unique guides ({} duplicate rows)",
            unique.len(),
            duplicates
        );

        Ok(Self {
            guides: unique,
            sequence_to_slot,
            duplicates,
        })
    }

    /// Number of unique guides
    pub fn len(&self) -> usize {
        self.guides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guides.is_empty()
    }

    /// Number of rows ignored because their sequence appeared earlier in the library
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    /// Guides sorted by sequence, in slot order
    pub fn guides(&self) -> &[GuideRecord] {
        &self.guides
    }

    /// Slot of the guide with exactly these bases
    #[inline]
    pub fn slot_of(&self, bases: &[u8]) -> Option<usize> {
        self.sequence_to_slot.get(bases).copied()
    }

    /// Guide with exactly these bases
    pub fn get(&self, bases: &[u8]) -> Option<&GuideRecord> {
        self.slot_of(bases).map(|slot| &self.guides[slot])
    }

    /// Guide stored at `slot`
    pub fn guide(&self, slot: usize) -> Option<&GuideRecord> {
        self.guides.get(slot)
    }
}
