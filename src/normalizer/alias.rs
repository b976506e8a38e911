//! Alias resolution
//!
//! Maps the family names reported by the parser onto the small canonical
//! vocabulary used by the baseline table. Each detected family has at most
//! one [`AliasRule`]:
//!
//! - [`AliasRule::Rename`]: `"edge"` becomes `"ie"`, version kept
//! - [`AliasRule::RenameWithVersion`]: `"phantomjs"` becomes `safari/5.0.0`
//! - [`AliasRule::VersionMap`]: `"opera"` 30 becomes `chrome/43.0.0`, with a
//!   nearest-match fallback for versions that have no entry
//! - [`AliasRule::Computed`]: arbitrary adjustment of the detected record

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::debug;

use crate::parser::types::{AgentRecord, RecordOverlay};
use crate::version::range::VersionSpec;
use crate::version::semver::leading_major_minor;

/// Transform used by [`AliasRule::Computed`]
pub type Transform = Arc<dyn Fn(&AgentRecord) -> RecordOverlay + Send + Sync>;

#[derive(Clone)]
pub enum AliasRule {
    /// Replace the family only
    Rename(String),
    /// Replace family and version with fixed values
    RenameWithVersion(AgentRecord),
    /// Per-version mapping, in declaration order
    VersionMap(Vec<VersionMapping>),
    /// Overlay the fields returned by the transform
    Computed(Transform),
}

impl AliasRule {
    pub fn rename(family: impl AsRef<str>) -> Self {
        AliasRule::Rename(family.as_ref().to_lowercase())
    }

    pub fn rename_with_version(family: impl AsRef<str>, major: u64, minor: u64, patch: u64) -> Self {
        AliasRule::RenameWithVersion(AgentRecord::new(family, major, minor, patch))
    }

    pub fn computed(
        transform: impl Fn(&AgentRecord) -> RecordOverlay + Send + Sync + 'static,
    ) -> Self {
        AliasRule::Computed(Arc::new(transform))
    }

    fn apply(&self, record: &AgentRecord) -> AgentRecord {
        match self {
            AliasRule::Rename(family) => AgentRecord {
                family: family.clone(),
                ..record.clone()
            },
            AliasRule::RenameWithVersion(target) => target.clone(),
            AliasRule::VersionMap(entries) => resolve_version_map(entries, record),
            AliasRule::Computed(transform) => record.overlay(transform(record)),
        }
    }
}

impl fmt::Debug for AliasRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AliasRule::Rename(family) => f.debug_tuple("Rename").field(family).finish(),
            AliasRule::RenameWithVersion(target) => {
                f.debug_tuple("RenameWithVersion").field(target).finish()
            }
            AliasRule::VersionMap(entries) => f.debug_tuple("VersionMap").field(entries).finish(),
            AliasRule::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// One entry of an [`AliasRule::VersionMap`]
#[derive(Debug, Clone)]
pub struct VersionMapping {
    pub expression: String,
    pub target: AgentRecord,
    /// `None` when the expression is not a valid range; such an entry never
    /// matches exactly but still takes part in the nearest-match scan
    spec: Option<VersionSpec>,
    major: u64,
    minor: u64,
}

impl VersionMapping {
    pub fn new(expression: impl Into<String>, target: AgentRecord) -> Self {
        let expression = expression.into();
        let (major, minor) = leading_major_minor(&expression);
        Self {
            spec: VersionSpec::parse(&expression),
            expression,
            target,
            major,
            minor,
        }
    }
}

/// Nearest-match resolution over an ordered version map.
///
/// The first entry whose expression the detected version satisfies wins.
/// Otherwise the closest entry by `(major, minor)` distance is used: a later
/// entry replaces the best candidate when neither its major nor its minor
/// distance is larger, so later entries win ties. An empty map leaves the
/// record unchanged.
fn resolve_version_map(entries: &[VersionMapping], record: &AgentRecord) -> AgentRecord {
    let version = record.version();
    let mut best: Option<&VersionMapping> = None;
    let mut best_major_diff = u64::MAX;
    let mut best_minor_diff = u64::MAX;

    for entry in entries {
        if entry
            .spec
            .as_ref()
            .is_some_and(|spec| spec.satisfies(&version))
        {
            return entry.target.clone();
        }

        let major_diff = record.major.abs_diff(entry.major);
        let minor_diff = record.minor.abs_diff(entry.minor);
        if major_diff <= best_major_diff && minor_diff <= best_minor_diff {
            best = Some(entry);
            best_major_diff = major_diff;
            best_minor_diff = minor_diff;
        }
    }

    match best {
        Some(entry) => {
            debug!(
                "No exact version mapping for {}, using nearest entry {:?}",
                record, entry.expression
            );
            entry.target.clone()
        }
        None => record.clone(),
    }
}

/// Detected family -> [`AliasRule`]
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    rules: IndexMap<String, AliasRule>,
}

impl AliasTable {
    /// An empty table: every family passes through unchanged
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the rule for a detected family
    pub fn insert(&mut self, family: impl AsRef<str>, rule: AliasRule) {
        self.rules.insert(family.as_ref().to_lowercase(), rule);
    }

    pub fn with(mut self, family: impl AsRef<str>, rule: AliasRule) -> Self {
        self.insert(family, rule);
        self
    }

    pub fn get(&self, family: &str) -> Option<&AliasRule> {
        self.rules.get(family)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Map a detected record onto its canonical family and version.
    ///
    /// The result always has a lowercase family and a zero patch.
    pub fn resolve(&self, record: &AgentRecord) -> AgentRecord {
        let detected = AgentRecord::new(&record.family, record.major, record.minor, record.patch);

        let resolved = match self.rules.get(&detected.family) {
            Some(rule) => {
                let resolved = rule.apply(&detected);
                debug!("Resolved {} to {}", detected, resolved);
                resolved
            }
            None => detected,
        };

        resolved.without_patch()
    }

    /// The aliases applied by default
    pub fn builtin() -> Self {
        let mut table = Self::new();

        for (family, canonical) in BUILTIN_RENAMES {
            table.insert(family, AliasRule::rename(canonical));
        }

        table.insert("phantomjs", AliasRule::rename_with_version("safari", 5, 0, 0));

        table.insert(
            "uc browser",
            AliasRule::VersionMap(vec![VersionMapping::new(
                "9.9.*",
                AgentRecord::new("ie", 10, 0, 0),
            )]),
        );

        table.insert("opera", chrome_version_map(OPERA_TO_CHROME));
        table.insert("yandex browser", chrome_version_map(YANDEX_TO_CHROME));

        // 4.4+ stock browsers are Chromium WebViews
        table.insert(
            "android",
            AliasRule::computed(|record| {
                if (record.major, record.minor) >= (4, 4) {
                    RecordOverlay::default().family("chrome").major(30).minor(0)
                } else {
                    RecordOverlay::default()
                }
            }),
        );

        table
    }
}

fn chrome_version_map(versions: &[(&str, u64)]) -> AliasRule {
    AliasRule::VersionMap(
        versions
            .iter()
            .map(|(expression, chrome)| {
                VersionMapping::new(*expression, AgentRecord::new("chrome", *chrome, 0, 0))
            })
            .collect(),
    )
}

const BUILTIN_RENAMES: &[(&str, &str)] = &[
    ("blackberry webkit", "bb"),
    ("blackberry", "bb"),
    ("pale moon (firefox variant)", "firefox"),
    ("pale moon", "firefox"),
    ("firefox mobile", "firefox_mob"),
    ("firefox namoroka", "firefox"),
    ("firefox shiretoko", "firefox"),
    ("firefox minefield", "firefox"),
    ("firefox alpha", "firefox"),
    ("firefox beta", "firefox"),
    ("microb", "firefox"),
    ("mozilladeveloperpreview", "firefox"),
    ("iceweasel", "firefox"),
    // WebKit underneath
    ("firefox ios", "ios_saf"),
    ("opera tablet", "op_mob"),
    ("chromium", "chrome"),
    ("chrome mobile", "chrome"),
    ("chrome mobile webview", "chrome"),
    ("chrome frame", "chrome"),
    ("headlesschrome", "chrome"),
    ("chrome mobile ios", "ios_chr"),
    ("mobile safari", "ios_saf"),
    ("iphone", "ios_saf"),
    ("iphone simulator", "ios_saf"),
    ("mobile safari uiwebview", "ios_saf"),
    ("mobile safari ui/wkwebview", "ios_saf"),
    ("samsung internet", "samsung_mob"),
    ("opera mobile", "op_mob"),
    ("opera mini", "op_mini"),
    ("edge", "ie"),
    ("edge mobile", "ie_mob"),
    ("ie mobile", "ie_mob"),
    ("iemobile", "ie_mob"),
    ("ie large screen", "ie"),
    ("internet explorer", "ie"),
];

/// Blink-based Opera version -> Chrome version it ships
const OPERA_TO_CHROME: &[(&str, u64)] = &[
    ("15", 28),
    ("16", 29),
    ("17", 30),
    ("18", 31),
    ("19", 32),
    ("20", 33),
    ("21", 34),
    ("22", 35),
    ("23", 36),
    ("24", 37),
    ("25", 38),
    ("26", 39),
    ("27", 40),
    ("28", 41),
    ("29", 42),
    ("30", 43),
    ("31", 44),
    ("32", 45),
    ("33", 46),
    ("34", 47),
    ("35", 48),
    ("36", 49),
    ("37", 50),
    ("38", 51),
    ("39", 52),
    ("40", 53),
    ("41", 54),
    ("42", 55),
    ("43", 56),
    ("44", 57),
    ("45", 58),
    ("46", 59),
    ("47", 60),
];

const YANDEX_TO_CHROME: &[(&str, u64)] = &[
    ("14.10", 37),
    ("14.8", 36),
    ("14.7", 35),
    ("14.5", 34),
    ("14.4", 33),
    ("14.2", 32),
    ("13.12", 30),
    ("13.10", 28),
];
