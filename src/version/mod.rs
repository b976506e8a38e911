//! Version utilities
//!
//! - [`range`]: npm-style semantic range expressions
//! - [`semver`]: Partial version parsing shared by the range and alias code

pub mod range;
pub mod semver;

pub use range::VersionSpec;
