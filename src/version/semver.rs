use semver::Version;

/// Parse a version string into a semver::Version, normalizing partial versions.
///
/// Handles partial versions like "1" or "1.2" by padding with zeros.
///
/// Examples:
/// - "1" -> Version(1, 0, 0)
/// - "1.2" -> Version(1, 2, 0)
/// - "1.2.3" -> Version(1, 2, 3)
pub fn parse_version(version: &str) -> Option<Version> {
    let parts: Vec<&str> = version.split('.').collect();
    let normalized = match parts.len() {
        1 => format!("{}.0.0", parts[0]),
        2 => format!("{}.{}.0", parts[0], parts[1]),
        _ => version.to_string(),
    };
    Version::parse(&normalized).ok()
}

/// Read the leading `major.minor` pair of a range expression.
///
/// Components that are missing or not numeric count as 0, so `"15"` is
/// `(15, 0)`, `"9.9.*"` is `(9, 9)` and `"*"` is `(0, 0)`.
pub fn leading_major_minor(expression: &str) -> (u64, u64) {
    let mut parts = expression.trim().split('.');
    let mut component = || {
        parts
            .next()
            .and_then(|part| part.trim().parse::<u64>().ok())
            .unwrap_or(0)
    };
    let major = component();
    let minor = component();
    (major, minor)
}
