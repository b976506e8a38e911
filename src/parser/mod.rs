//! Parser layer
//! - traits.rs: AgentParser trait definition
//! - types.rs: Common types (AgentRecord, RecordOverlay)
//! - sanitize.rs: Input bounding and noise stripping
//! - fast_path.rs: Canonical `family/major.minor.patch` recognizer
//! - ua_regex.rs: Built-in regex-driven User-Agent parser

pub mod fast_path;
pub mod sanitize;
pub mod traits;
pub mod types;
pub mod ua_regex;

pub use fast_path::FastPath;
pub use sanitize::Sanitizer;
pub use traits::AgentParser;
pub use types::{AgentRecord, RecordOverlay};
pub use ua_regex::RegexAgentParser;
