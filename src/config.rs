use crate::error::{Result, ScrubError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_HISTORY_CAPACITY: usize = 5;
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Ratios above which a column that is not uniformly numeric or date-like is
/// still reported as `Mixed` instead of `Text`. Comparisons are strict.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct InferenceThresholds {
    pub mixed_numeric_ratio: f64,
    pub mixed_date_ratio: f64,
}

impl Default for InferenceThresholds {
    fn default() -> Self {
        Self {
            mixed_numeric_ratio: 0.9,
            mixed_date_ratio: 0.8,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct IngestOptions {
    /// Field delimiter for both ingest and export
    pub delimiter: u8,
    /// Decode numeric-looking fields as numbers instead of text.
    /// Off by default so that export reproduces the input byte for byte.
    pub infer_numbers: bool,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            infer_numbers: false,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of undo snapshots retained (oldest evicted first)
    pub history_capacity: usize,
    /// Rows per page in the view pipeline
    pub page_size: usize,
    /// Quiet window before a search term is applied
    pub search_debounce_ms: u64,
    pub thresholds: InferenceThresholds,
    pub ingest: IngestOptions,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            page_size: DEFAULT_PAGE_SIZE,
            search_debounce_ms: 300,
            thresholds: InferenceThresholds::default(),
            ingest: IngestOptions::default(),
        }
    }
}

impl EngineConfig {
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    /// Zero page size or capacity would make pagination/undo meaningless; clamp to 1.
    pub fn sanitized(mut self) -> Self {
        self.page_size = self.page_size.max(1);
        self.history_capacity = self.history_capacity.max(1);
        self
    }
}

pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tabscrub").join("config.json"))
}

/// Reads and validates a config file.
///
/// # Errors
///
/// Returns [`ScrubError::Io`] if the file cannot be read and
/// [`ScrubError::Config`] if its contents are not a valid config.
pub fn try_load_config(path: &Path) -> Result<EngineConfig> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str::<EngineConfig>(&content)
        .map(EngineConfig::sanitized)
        .map_err(|e| ScrubError::Config(format!("{}: {e}", path.display())))
}

/// Loads the engine config, falling back to defaults when the file is missing or unreadable.
pub fn load_config(path: &Path) -> EngineConfig {
    if !path.exists() {
        return EngineConfig::default();
    }
    match try_load_config(path) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Ignoring config: {e}");
            EngineConfig::default()
        }
    }
}

/// # Errors
///
/// Returns error if the parent directory cannot be created or the file cannot be written.
pub fn save_config(config: &EngineConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    tracing::debug!("Saved config to {}", path.display());
    Ok(())
}
