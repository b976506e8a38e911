//! Canonicalisation layer
//!
//! Turns parsed User-Agent records into canonical family/version pairs and
//! decides whether they are supported.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Parser    │────▶│ AliasTable  │────▶│  Baseline   │
//! │  (detect)   │     │ (canonical) │     │  (support)  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        ▲                   │
//!        │                   ▼
//! ┌─────────────┐     ┌─────────────┐
//! │  FastPath   │────▶│ ResultCache │
//! │  (shape)    │     │    (LRU)    │
//! └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`alias`]: Alias rules and nearest-version resolution
//! - [`baseline`]: Minimum supported version per canonical family
//! - [`cache`]: Bounded LRU of sanitized input -> canonical record
//! - [`error`]: Error types for configuration
//! - [`service`]: The [`Normalizer`] tying the pipeline together
//! - [`user_agent`]: The [`UserAgent`] classification result

pub mod alias;
pub mod baseline;
pub mod cache;
pub mod error;
pub mod service;
pub mod user_agent;

pub use alias::{AliasRule, AliasTable, VersionMapping};
pub use baseline::{Baseline, BaselineTable};
pub use cache::ResultCache;
pub use error::ConfigError;
pub use service::Normalizer;
pub use user_agent::UserAgent;
