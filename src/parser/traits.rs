//! Parser trait definition

#[cfg(test)]
use mockall::automock;

use crate::parser::types::AgentRecord;

/// Trait for turning a sanitized User-Agent string into a detected record
///
/// Implementations only tokenize: the returned family is the raw detected
/// name (e.g. "Chrome Mobile iOS"), canonicalisation happens afterwards.
#[cfg_attr(test, automock)]
pub trait AgentParser: Send + Sync {
    /// Parse the string, returning `None` when nothing is recognised
    fn parse(&self, user_agent: &str) -> Option<AgentRecord>;
}
