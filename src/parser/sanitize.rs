//! User-Agent sanitizer
//!
//! Bounds the input length and strips tokens that make the parser pick the
//! wrong family without changing the rendering engine underneath:
//! - in-app browser wrappers: `[FBAN/FBIOS;FBAV/...]`, `Instagram 123.0 (...)`
//! - secondary browser-chrome tags: `Vivaldi/1.9`, `Iron/60.0`
//! - packaging runtimes: `Electron/1.8.4`, `Crosswalk/23.0`

use regex::Regex;

use crate::config::MAX_UA_LENGTH;

pub struct Sanitizer {
    max_length: usize,
    /// Removal rules, applied in order
    noise: Vec<Regex>,
}

impl Sanitizer {
    pub fn new() -> Self {
        Self::with_max_length(MAX_UA_LENGTH)
    }

    pub fn with_max_length(max_length: usize) -> Self {
        let noise = [
            // Facebook / Pinterest / LinkedIn in-app bracket tags
            r"(?i)\s*\[(?:FB|Pinterest|LinkedInApp)[^\]]*\]?",
            // Instagram 10.5.1 (iPhone9,3; iOS 11_0; en_US; ...)
            r"(?i)\s+Instagram\s+[\d.]+(?:\s+\([^)]*\)?)?",
            r"(?i)\s+(?:Vivaldi|Iron|Brave)/[\d.]+",
            r"(?i)\s+(?:Electron|Crosswalk)/[\d.]+",
        ]
        .into_iter()
        .map(|pattern| Regex::new(pattern).expect("sanitizer pattern is valid"))
        .collect();

        Self { max_length, noise }
    }

    pub fn sanitize(&self, raw: &str) -> String {
        let mut sanitized = truncate_chars(raw, self.max_length).to_string();
        for rule in &self.noise {
            if rule.is_match(&sanitized) {
                sanitized = rule.replace_all(&sanitized, "").into_owned();
            }
        }
        sanitized
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Cut `s` after `max` characters, never splitting a character
fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
