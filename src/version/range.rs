//! Semantic range expressions
//!
//! Supports the npm range grammar used by the baseline and alias tables:
//! - `1.2.3` - exact match
//! - `15`, `14.10` - partial versions, matching every version they prefix
//! - `^1.2.3` - compatible with version (>=1.2.3 <2.0.0)
//! - `~1.2.3` - approximately equivalent (>=1.2.3 <1.3.0)
//! - `>=1.2.3`, `>1.2.3`, `<=1.2.3`, `<1.2.3` - comparison operators
//! - `1.2.x`, `1.2.*`, `1.x`, `*` - wildcards
//! - `1.0.0 - 2.0.0` - hyphen ranges
//!
//! An operator applied to a partial version covers its whole X-range:
//! `<=40` admits `40.1.0`, `>40` starts at `41.0.0`, `1 - 2` ends below `3.0.0`.
//! - `>=1.0.0 <2.0.0` (AND) and `^1.0.0 || ^2.0.0` (OR)

use std::str::FromStr;

use semver::Version;

use crate::version::semver::parse_version;

/// Parsed range expression
/// Handles compound ranges (AND, OR) as well as simple ranges
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionSpec {
    /// Single range (^1.0.0, >=1.0.0, etc.)
    Single(VersionRange),
    /// AND of ranges (>=1.0.0 <2.0.0) - space-separated, all must satisfy
    And(Vec<VersionSpec>),
    /// OR of specs (^1.0.0 || ^2.0.0) - any must satisfy
    Or(Vec<VersionSpec>),
}

impl VersionSpec {
    /// Parse a range expression
    pub fn parse(spec: &str) -> Option<Self> {
        let spec = spec.trim();
        if spec.is_empty() {
            return None;
        }

        // OR (||) has the lowest precedence
        if spec.contains("||") {
            let specs: Option<Vec<VersionSpec>> = spec
                .split("||")
                .map(|s| s.trim())
                .map(Self::parse_and_or_single)
                .collect();
            return specs.map(VersionSpec::Or);
        }

        Self::parse_and_or_single(spec)
    }

    /// Parse a spec that may be AND (space-separated) or a single range
    fn parse_and_or_single(spec: &str) -> Option<Self> {
        let spec = spec.trim();
        if spec.is_empty() {
            return None;
        }

        if VersionRange::parse_hyphen(spec).is_some() {
            return VersionRange::parse(spec).map(VersionSpec::Single);
        }

        let parts = Self::split_and_parts(spec);

        if parts.len() > 1 {
            let ranges: Option<Vec<VersionSpec>> = parts
                .into_iter()
                .map(|p| VersionRange::parse(&p).map(VersionSpec::Single))
                .collect();
            ranges.map(VersionSpec::And)
        } else {
            VersionRange::parse(spec).map(VersionSpec::Single)
        }
    }

    /// Split spec into AND parts (space-separated ranges)
    ///
    /// An operator separated from its version by a space (`>= 7`) stays
    /// attached to that version.
    fn split_and_parts(spec: &str) -> Vec<String> {
        let mut parts: Vec<String> = Vec::new();
        let mut pending_operator: Option<&str> = None;

        for token in spec.split_whitespace() {
            if token.chars().all(|c| matches!(c, '<' | '>' | '=' | '^' | '~')) {
                pending_operator = Some(token);
                continue;
            }
            match pending_operator.take() {
                Some(op) => parts.push(format!("{op}{token}")),
                None => parts.push(token.to_string()),
            }
        }

        if let Some(op) = pending_operator {
            parts.push(op.to_string());
        }

        parts
    }

    /// Check if a version satisfies this spec
    pub fn satisfies(&self, version: &Version) -> bool {
        match self {
            VersionSpec::Single(range) => range.satisfies(version),
            VersionSpec::And(specs) => specs.iter().all(|s| s.satisfies(version)),
            VersionSpec::Or(specs) => specs.iter().any(|s| s.satisfies(version)),
        }
    }
}

impl FromStr for VersionSpec {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or(())
    }
}

/// A single comparator of a range expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionRange {
    /// Exact version match
    Exact(Version),
    /// Caret range: ^1.2.3 means >=1.2.3 <2.0.0 (or special cases for 0.x)
    Caret(Version),
    /// Tilde range: ~1.2.3 means >=1.2.3 <1.3.0
    Tilde(Version),
    /// Greater than or equal
    Gte(Version),
    /// Greater than
    Gt(Version),
    /// Less than or equal
    Lte(Version),
    /// Less than
    Lt(Version),
    /// Any version: * matches all versions
    Any,
    /// Wildcard major: 1.x (or bare 1) means >=1.0.0 <2.0.0
    WildcardMajor(u64),
    /// Wildcard minor: 1.2.x (or bare 1.2) means >=1.2.0 <1.3.0
    WildcardMinor(u64, u64),
    /// Hyphen range: 1.0.0 - 2.0.0 means >=1.0.0 <=2.0.0.
    /// A partial upper bound excludes `to`: 1 - 2 means >=1.0.0 <3.0.0
    Hyphen {
        from: Version,
        to: Version,
        inclusive: bool,
    },
}

impl VersionRange {
    fn parse(spec: &str) -> Option<Self> {
        let spec = spec.trim();

        if let Some(range) = Self::parse_hyphen(spec) {
            return Some(range);
        }

        if let Some(rest) = spec.strip_prefix(">=") {
            Self::parse_comparator(Operator::Gte, rest)
        } else if let Some(rest) = spec.strip_prefix('>') {
            Self::parse_comparator(Operator::Gt, rest)
        } else if let Some(rest) = spec.strip_prefix("<=") {
            Self::parse_comparator(Operator::Lte, rest)
        } else if let Some(rest) = spec.strip_prefix('<') {
            Self::parse_comparator(Operator::Lt, rest)
        } else if let Some(rest) = spec.strip_prefix('^') {
            Self::parse_comparator(Operator::Caret, rest)
        } else if let Some(rest) = spec.strip_prefix('~') {
            Self::parse_comparator(Operator::Tilde, rest)
        } else if let Some(rest) = spec.strip_prefix('=') {
            Self::parse_partial(rest.trim())
        } else if is_wildcard(spec) {
            Some(VersionRange::Any)
        } else {
            Self::parse_partial(spec)
        }
    }

    /// Parse an operator applied to a full or partial version.
    ///
    /// Partial operands are X-ranges, so the operator applies to the whole
    /// set of versions they cover: `<=40` means `<41.0.0`, `>40` means
    /// `>=41.0.0` and `~40` means `40.x`.
    fn parse_comparator(operator: Operator, operand: &str) -> Option<Self> {
        let operand = operand.trim();
        if let Some(version) = full_version(operand) {
            return Some(match operator {
                Operator::Gte => VersionRange::Gte(version),
                Operator::Gt => VersionRange::Gt(version),
                Operator::Lte => VersionRange::Lte(version),
                Operator::Lt => VersionRange::Lt(version),
                Operator::Caret => VersionRange::Caret(version),
                Operator::Tilde => VersionRange::Tilde(version),
            });
        }

        let partial = PartialVersion::parse(operand)?;
        let range = match (operator, partial.minor) {
            (Operator::Gte, _) => VersionRange::Gte(partial.floor()),
            (Operator::Gt, _) => VersionRange::Gte(partial.ceiling()),
            (Operator::Lte, _) => VersionRange::Lt(partial.ceiling()),
            (Operator::Lt, _) => VersionRange::Lt(partial.floor()),
            (Operator::Caret | Operator::Tilde, None) => VersionRange::WildcardMajor(partial.major),
            (Operator::Caret, Some(minor)) if partial.major == 0 => {
                VersionRange::WildcardMinor(0, minor)
            }
            (Operator::Caret, Some(_)) => VersionRange::Caret(partial.floor()),
            (Operator::Tilde, Some(_)) => VersionRange::Tilde(partial.floor()),
        };
        Some(range)
    }

    /// Parse hyphen range like "1.0.0 - 2.0.0"
    fn parse_hyphen(spec: &str) -> Option<Self> {
        let (from, to) = spec.split_once(" - ")?;
        let from = match full_version(from.trim()) {
            Some(version) => version,
            None => PartialVersion::parse(from)?.floor(),
        };

        let (to, inclusive) = match full_version(to.trim()) {
            Some(version) => (version, true),
            None => (PartialVersion::parse(to)?.ceiling(), false),
        };

        Some(VersionRange::Hyphen {
            from,
            to,
            inclusive,
        })
    }

    /// Parse a bare version, where omitted or wildcard components match anything
    fn parse_partial(spec: &str) -> Option<Self> {
        if let Some(version) = full_version(spec) {
            return Some(VersionRange::Exact(version));
        }

        let partial = PartialVersion::parse(spec)?;
        Some(match (partial.minor, partial.patch) {
            (None, _) => VersionRange::WildcardMajor(partial.major),
            (Some(minor), None) => VersionRange::WildcardMinor(partial.major, minor),
            (Some(_), Some(_)) => VersionRange::Exact(partial.floor()),
        })
    }

    fn satisfies(&self, version: &Version) -> bool {
        match self {
            VersionRange::Exact(v) => version == v,
            VersionRange::Caret(v) => {
                if version < v {
                    return false;
                }
                // ^1.2.3 -> >=1.2.3 <2.0.0
                // ^0.2.3 -> >=0.2.3 <0.3.0
                // ^0.0.3 -> >=0.0.3 <0.0.4
                if v.major == 0 {
                    if v.minor == 0 {
                        version.major == 0 && version.minor == 0 && version.patch == v.patch
                    } else {
                        version.major == 0 && version.minor == v.minor
                    }
                } else {
                    version.major == v.major
                }
            }
            VersionRange::Tilde(v) => {
                version >= v && version.major == v.major && version.minor == v.minor
            }
            VersionRange::Gte(v) => version >= v,
            VersionRange::Gt(v) => version > v,
            VersionRange::Lte(v) => version <= v,
            VersionRange::Lt(v) => version < v,
            VersionRange::Any => true,
            VersionRange::WildcardMajor(major) => version.major == *major,
            VersionRange::WildcardMinor(major, minor) => {
                version.major == *major && version.minor == *minor
            }
            VersionRange::Hyphen {
                from,
                to,
                inclusive: true,
            } => version >= from && version <= to,
            VersionRange::Hyphen {
                from,
                to,
                inclusive: false,
            } => version >= from && version < to,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    Gte,
    Gt,
    Lte,
    Lt,
    Caret,
    Tilde,
}

/// Version with omitted or wildcard trailing components (`40`, `14.10`, `1.x`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PartialVersion {
    major: u64,
    minor: Option<u64>,
    patch: Option<u64>,
}

impl PartialVersion {
    fn parse(spec: &str) -> Option<Self> {
        let mut parts = spec.trim().split('.');
        let major = parts.next()?.parse::<u64>().ok()?;
        let minor = parse_component(parts.next())?;
        let patch = parse_component(parts.next())?;

        // nothing after a wildcard can be pinned, and at most three components
        if (minor.is_none() && patch.is_some()) || parts.next().is_some() {
            return None;
        }

        Some(Self {
            major,
            minor,
            patch,
        })
    }

    /// Lowest version covered
    fn floor(&self) -> Version {
        Version::new(
            self.major,
            self.minor.unwrap_or(0),
            self.patch.unwrap_or(0),
        )
    }

    /// Lowest version above everything covered
    fn ceiling(&self) -> Version {
        match (self.minor, self.patch) {
            (None, _) => Version::new(self.major + 1, 0, 0),
            (Some(minor), None) => Version::new(self.major, minor + 1, 0),
            (Some(minor), Some(patch)) => Version::new(self.major, minor, patch + 1),
        }
    }
}

/// `Some(None)` for an omitted or wildcard component, `None` when invalid
fn parse_component(part: Option<&str>) -> Option<Option<u64>> {
    match part {
        None => Some(None),
        Some(part) if is_wildcard(part) => Some(None),
        Some(part) => part.parse::<u64>().ok().map(Some),
    }
}

/// A complete `major.minor.patch` version, prerelease and build allowed
fn full_version(spec: &str) -> Option<Version> {
    if spec.split('.').count() < 3 {
        return None;
    }
    parse_version(spec)
}

fn is_wildcard(part: &str) -> bool {
    matches!(part, "*" | "x" | "X")
}
