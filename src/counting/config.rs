use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::types::Orientation;
use crate::library::LibraryIndex;
use crate::matching::engine::{SequenceMatcher, DEFAULT_WINDOW_WIDTH};
use crate::matching::primer::{PrimerValidator, DEFAULT_MAX_EDIT_DISTANCE, DEFAULT_PRIMER};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Window width must be at least 1")]
    ZeroWindow,

    #[error("Primer sequence must not be empty")]
    EmptyPrimer,
}

/// Primer/key validation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrimerConfig {
    /// Reference primer expected immediately upstream of each guide
    pub sequence: String,
    /// Maximum edit distance for an approximate primer match
    pub max_edit_distance: usize,
}

impl Default for PrimerConfig {
    fn default() -> Self {
        Self {
            sequence: DEFAULT_PRIMER.to_string(),
            max_edit_distance: DEFAULT_MAX_EDIT_DISTANCE,
        }
    }
}

/// Settings for a counting run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountingConfig {
    /// Orientation in which guides appear in the reads
    pub orientation: Orientation,
    /// Width of the read window compared against the library
    pub window_width: usize,
    /// Primer validation; enables the stringent and fuzzy-key tiers when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primer: Option<PrimerConfig>,
    /// Worker threads; `None` or 1 counts sequentially
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threads: Option<usize>,
}

impl Default for CountingConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::Forward,
            window_width: DEFAULT_WINDOW_WIDTH,
            primer: None,
            threads: None,
        }
    }
}

impl CountingConfig {
    /// Load a config from a JSON file. Missing fields take their default values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Read` if the file cannot be read, `ConfigError::Parse` if it is
    /// not valid JSON, or a validation error.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns `ConfigError::ZeroWindow` for a zero window width, or
    /// `ConfigError::EmptyPrimer` if primer validation is enabled with an empty primer.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_width == 0 {
            return Err(ConfigError::ZeroWindow);
        }
        if self.primer.as_ref().is_some_and(|p| p.sequence.is_empty()) {
            return Err(ConfigError::EmptyPrimer);
        }
        Ok(())
    }

    /// Whether the stringent and fuzzy-key tiers are produced
    pub fn primer_tiers_enabled(&self) -> bool {
        self.primer.is_some()
    }

    /// Whether reads are counted on a thread pool
    pub fn is_parallel(&self) -> bool {
        self.threads.is_some_and(|n| n > 1)
    }

    /// Build a matcher over `index` with these settings
    pub fn matcher<'a>(&self, index: &'a LibraryIndex) -> SequenceMatcher<'a> {
        let matcher =
            SequenceMatcher::new(index, self.orientation).with_window_width(self.window_width);
        match &self.primer {
            Some(p) => matcher.with_primer(PrimerValidator::new(&p.sequence, p.max_edit_distance)),
            None => matcher,
        }
    }
}
