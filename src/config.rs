use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;

use crate::normalizer::error::ConfigError;

// =============================================================================
// Classification limits
// =============================================================================

/// Longest User-Agent prefix that is ever parsed.
/// Genuine headers observed in the wild stay well below this.
pub const MAX_UA_LENGTH: usize = 300;

/// Strings at least this long cannot be in canonical `family/major.minor.patch` shape
pub const FAST_PATH_MAX_LEN: usize = 22;

/// Default number of classifications kept in the result cache
pub const DEFAULT_CACHE_CAPACITY: usize = 5000;

/// File name of the log written by `--log-file`
pub const LOG_FILE_NAME: &str = "ua-normalizer.log";

/// Normalizer configuration structure
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct NormalizerConfig {
    pub cache: CacheConfig,
    /// Baseline ranges keyed by canonical family; overrides or extends the built-in table
    pub baselines: IndexMap<String, String>,
    /// Extra family renames (detected family -> canonical family)
    pub aliases: IndexMap<String, String>,
}

/// Cache-related configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct CacheConfig {
    /// Maximum number of cached classifications
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl NormalizerConfig {
    /// Load configuration from a JSON file
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Returns the path to the data directory for ua-normalizer.
/// Uses $XDG_DATA_HOME/ua-normalizer if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/ua-normalizer,
/// or ./ua-normalizer if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join(LOG_FILE_NAME)
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("ua-normalizer")
}
