//! Canonical browser family and version classification for User-Agent strings.
//!
//! ```
//! let ua = ua_normalizer::classify(
//!     "Mozilla/5.0 (Windows NT 6.1; WOW64) AppleWebKit/537.36 (KHTML, like Gecko) \
//!      Chrome/43.0.2357.65 Safari/537.36 OPR/30.0.1835.59",
//! );
//! assert_eq!(ua.family(), "chrome");
//! assert_eq!(ua.version(), "43.0.0");
//! assert!(ua.satisfies(">=40"));
//! ```

use std::sync::LazyLock;

use indexmap::IndexMap;

pub mod config;
pub mod normalizer;
pub mod parser;
pub mod version;

pub use normalizer::{Normalizer, UserAgent};

/// Process-wide normalizer with the built-in tables, created on first use
static DEFAULT_NORMALIZER: LazyLock<Normalizer> = LazyLock::new(Normalizer::new);

/// Classify with the process-wide normalizer
pub fn classify(user_agent: &str) -> UserAgent {
    DEFAULT_NORMALIZER.classify(user_agent)
}

/// `family/major.minor.patch` form of a User-Agent, using the process-wide normalizer
pub fn normalize(user_agent: &str) -> String {
    DEFAULT_NORMALIZER.normalize(user_agent)
}

/// Built-in canonical family -> baseline range
pub fn baselines() -> IndexMap<String, String> {
    DEFAULT_NORMALIZER.baselines()
}
