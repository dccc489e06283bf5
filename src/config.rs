//! Configuration for the chroma_kit toolkit.
//!
//! Groups the tunable parameters callers usually want to persist: extraction
//! options, how many similar named colors to list, and how much pattern
//! history to keep.
//!
//! # Configuration Loading
//!
//! Configuration can be loaded from JSON files or constructed programmatically:
//!
//! ```no_run
//! use chroma_kit::ToolkitConfig;
//! use std::path::Path;
//!
//! // Load from file
//! let config = ToolkitConfig::from_json_file(Path::new("chroma_kit.json"))?;
//!
//! // Or use defaults
//! let config = ToolkitConfig::default();
//! # Ok::<(), chroma_kit::ColorError>(())
//! ```
//!
//! Missing fields fall back to their defaults, so a partial file such as
//! `{"similar_limit": 4}` is valid.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::{named_colors, rank_similar, Color, SimilarColor};
use crate::constants::naming::DEFAULT_SIMILAR_LIMIT;
use crate::constants::pattern::DEFAULT_HISTORY_CAPACITY;
use crate::extraction::ExtractionOptions;
use crate::pattern::PatternHistory;
use crate::{ColorError, Result};

/// Complete toolkit configuration.
///
/// Can be serialized to/from JSON for reproducible runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolkitConfig {
    /// Palette extraction parameters
    pub extraction: ExtractionOptions,

    /// Number of named colors returned by similarity ranking
    pub similar_limit: usize,

    /// Number of pattern settings kept in history
    pub pattern_history_capacity: usize,
}

impl Default for ToolkitConfig {
    fn default() -> Self {
        Self {
            extraction: ExtractionOptions::default(),
            similar_limit: DEFAULT_SIMILAR_LIMIT,
            pattern_history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

impl ToolkitConfig {
    /// Check every parameter against its documented range
    pub fn validate(&self) -> Result<()> {
        self.extraction.validate()?;
        if self.similar_limit == 0 {
            return Err(ColorError::range("similar_limit", self.similar_limit, ">= 1"));
        }
        if self.pattern_history_capacity == 0 {
            return Err(ColorError::range(
                "pattern_history_capacity",
                self.pattern_history_capacity,
                ">= 1",
            ));
        }
        Ok(())
    }

    /// Empty pattern history sized by this configuration
    pub fn pattern_history(&self) -> PatternHistory {
        PatternHistory::with_capacity(self.pattern_history_capacity)
    }

    /// Built-in named colors closest to `target`, `similar_limit` at most
    pub fn similar_colors(&self, target: &Color) -> Vec<SimilarColor> {
        rank_similar(target, named_colors(), self.similar_limit)
    }

    /// Load and validate configuration from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ColorError::config(format!("Failed to read {}", path.display()), e)
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            ColorError::config(format!("Failed to parse {}", path.display()), e)
        })?;
        config.validate()?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ColorError::config("Failed to serialize configuration", e))?;
        std::fs::write(path, json).map_err(|e| {
            ColorError::config(format!("Failed to write {}", path.display()), e)
        })?;
        Ok(())
    }
}
