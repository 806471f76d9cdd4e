use crate::core::guide::GuideRecord;
use crate::core::sequence::reverse_complement_into;
use crate::core::types::{Orientation, PrimerMatch};
use crate::library::LibraryIndex;
use crate::matching::primer::PrimerValidator;

/// Default width of the read window compared against the library
pub const DEFAULT_WINDOW_WIDTH: usize = 20;

/// One library hit within a read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult<'a> {
    /// 0-based start of the window within the read
    pub offset: usize,

    /// Slot of the matched guide in the library index
    pub slot: usize,

    /// The matched guide
    pub guide: &'a GuideRecord,

    /// Orientation the window was looked up in
    pub orientation: Orientation,

    /// Classification of the segment upstream of the window, when primer validation is enabled
    pub primer: Option<PrimerMatch>,
}

/// Scans reads for library guides.
///
/// Every window offset is checked independently, so a read can produce more than one hit;
/// all of them are reported.
pub struct SequenceMatcher<'a> {
    index: &'a LibraryIndex,
    orientation: Orientation,
    window_width: usize,
    primer: Option<PrimerValidator>,
}

impl<'a> SequenceMatcher<'a> {
    /// Create a matcher with the default window width and no primer validation
    pub fn new(index: &'a LibraryIndex, orientation: Orientation) -> Self {
        Self {
            index,
            orientation,
            window_width: DEFAULT_WINDOW_WIDTH,
            primer: None,
        }
    }

    #[must_use]
    pub fn with_window_width(mut self, window_width: usize) -> Self {
        self.window_width = window_width;
        self
    }

    #[must_use]
    pub fn with_primer(mut self, validator: PrimerValidator) -> Self {
        self.primer = Some(validator);
        self
    }

    pub fn index(&self) -> &'a LibraryIndex {
        self.index
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn window_width(&self) -> usize {
        self.window_width
    }

    pub fn primer(&self) -> Option<&PrimerValidator> {
        self.primer.as_ref()
    }

    /// Find every library hit in `read`.
    ///
    /// `read` is expected to be uppercase already. Reads shorter than the window width yield
    /// no hits.
    pub fn scan(&self, read: &[u8]) -> Vec<MatchResult<'a>> {
        let width = self.window_width;
        if width == 0 || read.len() < width {
            return Vec::new();
        }

        let mut hits = Vec::new();
        let mut rc = Vec::with_capacity(width);

        for offset in 0..=read.len() - width {
            let window = &read[offset..offset + width];
            let slot = match self.orientation {
                Orientation::Forward => self.index.slot_of(window),
                Orientation::ReverseComplement => {
                    reverse_complement_into(window, &mut rc);
                    self.index.slot_of(&rc)
                }
            };

            let Some(slot) = slot else {
                continue;
            };

            let primer = self.primer.as_ref().map(|validator| {
                let start = offset.saturating_sub(validator.len());
                validator.classify(&read[start..offset])
            });

            hits.push(MatchResult {
                offset,
                slot,
                guide: &self.index.guides()[slot],
                orientation: self.orientation,
                primer,
            });
        }

        hits
    }
}
