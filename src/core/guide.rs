use serde::{Deserialize, Serialize};

/// A single guide (spacer) from a CRISPR library
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GuideRecord {
    /// Guide name or ID (first library column)
    pub name: String,

    /// Guide bases, uppercase (second library column)
    pub sequence: String,

    /// Gene targeted by the guide (third library column)
    pub gene: String,
}

impl GuideRecord {
    pub fn new(
        name: impl Into<String>,
        sequence: impl Into<String>,
        gene: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            sequence: sequence.into().to_ascii_uppercase(),
            gene: gene.into(),
        }
    }

    /// Length of the guide in bases
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    pub fn bases(&self) -> &[u8] {
        self.sequence.as_bytes()
    }
}
