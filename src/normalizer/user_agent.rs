//! Classification result

use std::fmt;
use std::sync::Arc;

use crate::normalizer::baseline::Baseline;
use crate::parser::types::AgentRecord;
use crate::version::range::VersionSpec;

/// A canonical family/version annotated with its family's baseline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAgent {
    record: AgentRecord,
    baseline: Option<Arc<Baseline>>,
}

impl UserAgent {
    pub(crate) fn new(record: AgentRecord, baseline: Option<Arc<Baseline>>) -> Self {
        Self { record, baseline }
    }

    /// Canonical lowercase family (may be absent from the baseline table)
    pub fn family(&self) -> &str {
        &self.record.family
    }

    /// Dotted `major.minor.patch`; the patch is always 0
    pub fn version(&self) -> String {
        format!(
            "{}.{}.{}",
            self.record.major, self.record.minor, self.record.patch
        )
    }

    pub fn record(&self) -> &AgentRecord {
        &self.record
    }

    /// Whether this is a known family whose version satisfies both `range`
    /// and the family baseline. An unparseable `range` never matches.
    pub fn satisfies(&self, range: &str) -> bool {
        let Some(baseline) = &self.baseline else {
            return false;
        };
        let Some(requested) = VersionSpec::parse(range) else {
            return false;
        };

        let version = self.record.version();
        requested.satisfies(&version) && baseline.is_met_by(&version)
    }

    /// Baseline range expression of the family, if the family is known
    pub fn baseline(&self) -> Option<&str> {
        self.baseline.as_deref().map(Baseline::expression)
    }

    pub fn meets_baseline(&self) -> bool {
        self.baseline
            .as_ref()
            .is_some_and(|baseline| baseline.is_met_by(&self.record.version()))
    }

    /// Unrecognised family, or a version below the family baseline
    pub fn is_unknown(&self) -> bool {
        self.baseline.is_none() || !self.meets_baseline()
    }
}

/// Renders as `family/major.minor.patch`
impl fmt::Display for UserAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.record, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn user_agent(family: &str, major: u64, minor: u64, baseline: Option<&str>) -> UserAgent {
        UserAgent::new(
            AgentRecord::new(family, major, minor, 0),
            baseline.map(|expression| Arc::new(Baseline::parse(expression).unwrap())),
        )
    }

    #[rstest]
    #[case(6, false)]
    #[case(7, true)]
    #[case(11, true)]
    fn meets_baseline_compares_against_family_baseline(#[case] major: u64, #[case] expected: bool) {
        let ua = user_agent("ie", major, 0, Some(">=7"));

        assert_eq!(ua.meets_baseline(), expected);
        assert_eq!(ua.is_unknown(), !expected);
    }

    #[rstest]
    #[case(">=9", true)]
    #[case("<9", false)]
    #[case("*", true)]
    #[case("not a range", false)]
    fn satisfies_requires_requested_range(#[case] range: &str, #[case] expected: bool) {
        let ua = user_agent("ie", 11, 0, Some(">=7"));
        assert_eq!(ua.satisfies(range), expected);
    }

    #[test]
    fn satisfies_requires_baseline() {
        let ua = user_agent("ie", 6, 0, Some(">=7"));
        assert!(!ua.satisfies("*"));
    }

    #[test]
    fn family_without_baseline_is_unknown() {
        let ua = user_agent("other", 0, 0, None);

        assert!(ua.is_unknown());
        assert!(!ua.meets_baseline());
        assert!(!ua.satisfies("*"));
        assert_eq!(ua.baseline(), None);
    }

    #[test]
    fn accessors_render_family_and_version() {
        let ua = user_agent("firefox", 40, 1, Some(">=3.6"));

        assert_eq!(ua.family(), "firefox");
        assert_eq!(ua.version(), "40.1.0");
        assert_eq!(ua.baseline(), Some(">=3.6"));
        assert_eq!(ua.to_string(), "firefox/40.1.0");
    }
}
