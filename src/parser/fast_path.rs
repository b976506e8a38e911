//! Canonical shape recognizer
//!
//! Strings that are already in `family/major[.minor[.patch]]` form (the
//! output of normalization) are turned into a record without running the
//! parser or the alias tables.

use regex::Regex;

use crate::config::FAST_PATH_MAX_LEN;
use crate::parser::types::AgentRecord;

pub struct FastPath {
    shape: Regex,
}

impl FastPath {
    pub fn new() -> Self {
        Self {
            shape: Regex::new(r"(?i)^(?P<family>\w+)/(?P<major>\d+)(?:\.(?P<minor>\d+)(?:\.(?P<patch>\d+))?)?$")
                .expect("canonical shape pattern is valid"),
        }
    }

    /// Build a record from a canonical-shaped string
    ///
    /// Returns `None` for anything at least [`FAST_PATH_MAX_LEN`] characters
    /// long or not in canonical shape. Minor defaults to 0 and patch is
    /// always 0.
    pub fn recognize(&self, user_agent: &str) -> Option<AgentRecord> {
        if user_agent.chars().count() >= FAST_PATH_MAX_LEN {
            return None;
        }

        let caps = self.shape.captures(user_agent)?;
        let major = caps.name("major")?.as_str().parse().ok()?;
        let minor = match caps.name("minor") {
            Some(minor) => minor.as_str().parse().ok()?,
            None => 0,
        };

        Some(AgentRecord::new(&caps["family"], major, minor, 0))
    }
}

impl Default for FastPath {
    fn default() -> Self {
        Self::new()
    }
}
