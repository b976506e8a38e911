//! Minimum supported version per canonical family
//!
//! The table doubles as the list of known families: a family without a
//! baseline is unknown no matter how well it parsed.

use std::sync::Arc;

use indexmap::IndexMap;
use semver::Version;

use crate::normalizer::error::ConfigError;
use crate::version::range::VersionSpec;

const BUILTIN_BASELINES: &[(&str, &str)] = &[
    ("ie", ">=7"),
    ("ie_mob", ">=8"),
    ("chrome", "*"),
    ("safari", ">=4"),
    ("ios_saf", ">=4"),
    ("ios_chr", ">=4"),
    ("firefox", ">=3.6"),
    ("firefox_mob", ">=4"),
    ("android", ">=3"),
    ("op_mob", ">=10"),
    ("op_mini", ">=5"),
    ("bb", ">=6"),
    ("samsung_mob", ">=4"),
];

/// A baseline range expression with its parsed form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Baseline {
    expression: String,
    spec: VersionSpec,
}

impl Baseline {
    pub fn parse(expression: impl Into<String>) -> Option<Self> {
        let expression = expression.into();
        let spec = VersionSpec::parse(&expression)?;
        Some(Self { expression, spec })
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn is_met_by(&self, version: &Version) -> bool {
        self.spec.satisfies(version)
    }
}

#[derive(Debug, Clone, Default)]
pub struct BaselineTable {
    baselines: IndexMap<String, Arc<Baseline>>,
}

impl BaselineTable {
    /// An empty table: every family is unknown
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the baseline of a canonical family
    pub fn insert(&mut self, family: impl AsRef<str>, expression: &str) -> Result<(), ConfigError> {
        let family = family.as_ref().to_lowercase();
        let baseline = Baseline::parse(expression).ok_or_else(|| ConfigError::InvalidRange {
            family: family.clone(),
            expression: expression.to_string(),
        })?;
        self.baselines.insert(family, Arc::new(baseline));
        Ok(())
    }

    pub fn get(&self, family: &str) -> Option<&Arc<Baseline>> {
        self.baselines.get(family)
    }

    pub fn contains(&self, family: &str) -> bool {
        self.baselines.contains_key(family)
    }

    /// Snapshot of family -> range expression, in table order
    pub fn expressions(&self) -> IndexMap<String, String> {
        self.baselines
            .iter()
            .map(|(family, baseline)| (family.clone(), baseline.expression.clone()))
            .collect()
    }

    pub fn builtin() -> Self {
        let baselines = BUILTIN_BASELINES
            .iter()
            .map(|(family, expression)| {
                let baseline = Baseline::parse(*expression).expect("built-in baseline is valid");
                (family.to_string(), Arc::new(baseline))
            })
            .collect();

        Self { baselines }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("ie", Version::new(6, 0, 0), false)]
    #[case("ie", Version::new(7, 0, 0), true)]
    #[case("firefox", Version::new(3, 5, 0), false)]
    #[case("firefox", Version::new(3, 6, 0), true)]
    #[case("chrome", Version::new(0, 0, 0), true)]
    #[case("android", Version::new(2, 3, 0), false)]
    fn builtin_baselines_gate_versions(
        #[case] family: &str,
        #[case] version: Version,
        #[case] expected: bool,
    ) {
        let table = BaselineTable::builtin();
        assert_eq!(table.get(family).unwrap().is_met_by(&version), expected);
    }

    #[test]
    fn builtin_table_only_knows_canonical_families() {
        let table = BaselineTable::builtin();

        assert!(table.contains("ios_saf"));
        assert!(!table.contains("opera"));
        assert!(!table.contains("other"));
    }

    #[test]
    fn insert_rejects_invalid_range() {
        let mut table = BaselineTable::new();

        let result = table.insert("ie", ">=banana");

        assert!(matches!(
            result,
            Err(ConfigError::InvalidRange { ref family, ref expression })
                if family == "ie" && expression == ">=banana"
        ));
        assert!(!table.contains("ie"));
    }

    #[test]
    fn insert_overrides_existing_baseline_and_lowercases_family() {
        let mut table = BaselineTable::builtin();

        table.insert("IE", ">=9").unwrap();

        assert_eq!(table.get("ie").unwrap().expression(), ">=9");
    }

    #[test]
    fn expressions_returns_snapshot_in_table_order() {
        let snapshot = BaselineTable::builtin().expressions();

        assert_eq!(snapshot.len(), BUILTIN_BASELINES.len());
        assert_eq!(snapshot.get_index(0), Some((&"ie".to_string(), &">=7".to_string())));
        assert_eq!(snapshot.get("chrome").map(String::as_str), Some("*"));
    }
}
