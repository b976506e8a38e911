//! Common types for agent parsing

use std::fmt;

use semver::Version;

/// Family reported when the parser recognises nothing
pub const UNKNOWN_FAMILY: &str = "other";

/// A detected or canonical browser family with its version
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AgentRecord {
    /// Lowercase family name (e.g., "chrome", "mobile safari", "ios_saf")
    pub family: String,
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl AgentRecord {
    /// Create a record, lowercasing the family
    pub fn new(family: impl AsRef<str>, major: u64, minor: u64, patch: u64) -> Self {
        Self {
            family: family.as_ref().to_lowercase(),
            major,
            minor,
            patch,
        }
    }

    /// The record produced when nothing could be recognised
    pub fn unknown() -> Self {
        Self::new(UNKNOWN_FAMILY, 0, 0, 0)
    }

    /// Same record with the patch component dropped
    pub fn without_patch(self) -> Self {
        Self { patch: 0, ..self }
    }

    /// Build a new record with the fields set in `overlay` replacing ours
    pub fn overlay(&self, overlay: RecordOverlay) -> Self {
        Self {
            family: overlay
                .family
                .map(|family| family.to_lowercase())
                .unwrap_or_else(|| self.family.clone()),
            major: overlay.major.unwrap_or(self.major),
            minor: overlay.minor.unwrap_or(self.minor),
            patch: overlay.patch.unwrap_or(self.patch),
        }
    }

    pub fn version(&self) -> Version {
        Version::new(self.major, self.minor, self.patch)
    }
}

/// Renders as `family/major.minor.patch`
impl fmt::Display for AgentRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}.{}.{}",
            self.family, self.major, self.minor, self.patch
        )
    }
}

/// Partial update of an [`AgentRecord`]; unset fields keep their value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordOverlay {
    pub family: Option<String>,
    pub major: Option<u64>,
    pub minor: Option<u64>,
    pub patch: Option<u64>,
}

impl RecordOverlay {
    pub fn family(mut self, family: impl Into<String>) -> Self {
        self.family = Some(family.into());
        self
    }

    pub fn major(mut self, major: u64) -> Self {
        self.major = Some(major);
        self
    }

    pub fn minor(mut self, minor: u64) -> Self {
        self.minor = Some(minor);
        self
    }

    pub fn patch(mut self, patch: u64) -> Self {
        self.patch = Some(patch);
        self
    }
}
