//! Regex-driven User-Agent parser
//!
//! An ordered list of rules, first match wins. Each rule either names the
//! detected family or captures it in a `family` group, and captures the
//! version in `major` / `minor` / `patch` groups. Every rule is
//! case-insensitive.
//!
//! Families are reported the way browser vendors name themselves
//! ("Chrome Mobile iOS", "Samsung Internet"), the alias table maps them
//! onto canonical names.

use regex::{Captures, Regex};

use crate::parser::traits::AgentParser;
use crate::parser::types::AgentRecord;

const MAJOR: &str = r"(?P<major>\d+)";
const MINOR_PATCH: &str = r"(?:\.(?P<minor>\d+))?(?:\.(?P<patch>\d+))?";

/// (family, pattern) pairs in match order; `None` means the pattern captures the family
const RULES: &[(Option<&str>, &str)] = &[
    // Already canonical: "chrome/43.0.0"
    (None, r"^(?P<family>[a-z][a-z_]*)/{MAJOR}{MINOR_PATCH}$"),
    // EdgeHTML
    (Some("Edge Mobile"), r"Windows Phone.*Edge/{MAJOR}{MINOR_PATCH}"),
    (Some("Edge"), r"Edge/{MAJOR}{MINOR_PATCH}"),
    // Opera family, most specific first
    (Some("Opera Mini"), r"Opera Mini/{MAJOR}{MINOR_PATCH}"),
    (Some("Opera Mini"), r"OPiOS/{MAJOR}{MINOR_PATCH}"),
    (Some("Opera Mobile"), r"Opera Mobi.*Version/{MAJOR}{MINOR_PATCH}"),
    (Some("Opera Mobile"), r"Mobile Safari.*OPR/{MAJOR}{MINOR_PATCH}"),
    (Some("Opera"), r"OPR/{MAJOR}{MINOR_PATCH}"),
    (Some("Opera"), r"Opera.*Version/{MAJOR}{MINOR_PATCH}"),
    (Some("Opera"), r"Opera[/ ]{MAJOR}{MINOR_PATCH}"),
    // Chromium derivatives announcing their own version scheme
    (Some("Yandex Browser"), r"YaBrowser/{MAJOR}{MINOR_PATCH}"),
    (Some("Samsung Internet"), r"SamsungBrowser/{MAJOR}{MINOR_PATCH}"),
    (Some("UC Browser"), r"UC ?Browser/{MAJOR}{MINOR_PATCH}"),
    (Some("PhantomJS"), r"PhantomJS/{MAJOR}{MINOR_PATCH}"),
    // Internet Explorer
    (Some("IE Mobile"), r"IEMobile[ /]{MAJOR}{MINOR_PATCH}"),
    (Some("IE"), r"MSIE {MAJOR}{MINOR_PATCH}"),
    (Some("IE"), r"Trident/\d+\.\d+.*rv:{MAJOR}{MINOR_PATCH}"),
    (Some("BlackBerry WebKit"), r"(?:BlackBerry|BB10).*Version/{MAJOR}{MINOR_PATCH}"),
    // Gecko
    (Some("Pale Moon"), r"PaleMoon/{MAJOR}{MINOR_PATCH}"),
    (Some("Firefox iOS"), r"FxiOS/{MAJOR}{MINOR_PATCH}"),
    (Some("Firefox Mobile"), r"\((?:Mobile|Tablet);.*Firefox/{MAJOR}{MINOR_PATCH}"),
    (Some("Firefox Mobile"), r"Android.*Firefox/{MAJOR}{MINOR_PATCH}"),
    (Some("Iceweasel"), r"Iceweasel/{MAJOR}{MINOR_PATCH}"),
    (Some("Firefox"), r"Firefox/{MAJOR}{MINOR_PATCH}"),
    // Chrome
    (Some("Chrome Mobile iOS"), r"CriOS/{MAJOR}{MINOR_PATCH}"),
    (Some("HeadlessChrome"), r"HeadlessChrome/{MAJOR}{MINOR_PATCH}"),
    (Some("Chrome Mobile WebView"), r"; wv\).*Chrome/{MAJOR}{MINOR_PATCH}"),
    (Some("Chromium"), r"Chromium/{MAJOR}{MINOR_PATCH}"),
    (Some("Chrome Mobile"), r"Chrome/{MAJOR}{MINOR_PATCH}(?:\.\d+)? Mobile"),
    (Some("Chrome"), r"Chrome/{MAJOR}{MINOR_PATCH}"),
    // Stock Android browser
    (Some("Android"), r"Android[ /]?{MAJOR}{MINOR_PATCH}.*AppleWebKit"),
    // WebKit on Apple platforms
    (Some("Mobile Safari"), r"(?:iPhone|iPod|iPad).*Version/{MAJOR}{MINOR_PATCH}.*Safari"),
    (
        Some("Mobile Safari UI/WKWebView"),
        r"(?:iPhone|iPod|iPad).*OS (?P<major>\d+)(?:_(?P<minor>\d+))?(?:_(?P<patch>\d+))?",
    ),
    (Some("Safari"), r"Version/{MAJOR}{MINOR_PATCH}.*Safari/"),
];

struct ParserRule {
    regex: Regex,
    family: Option<&'static str>,
}

impl ParserRule {
    fn record(&self, caps: &Captures<'_>) -> Option<AgentRecord> {
        let family = match self.family {
            Some(family) => family,
            None => caps.name("family")?.as_str(),
        };
        let major = caps.name("major")?.as_str().parse().ok()?;
        let component = |name: &str| {
            caps.name(name)
                .and_then(|m| m.as_str().parse().ok())
                .unwrap_or(0)
        };

        Some(AgentRecord::new(
            family,
            major,
            component("minor"),
            component("patch"),
        ))
    }
}

/// Built-in [`AgentParser`] backed by [`RULES`]
pub struct RegexAgentParser {
    rules: Vec<ParserRule>,
}

impl RegexAgentParser {
    pub fn new() -> Self {
        let rules = RULES
            .iter()
            .map(|(family, pattern)| {
                let pattern = pattern
                    .replace("{MAJOR}", MAJOR)
                    .replace("{MINOR_PATCH}", MINOR_PATCH);
                ParserRule {
                    regex: Regex::new(&format!("(?i){pattern}"))
                        .expect("user agent pattern is valid"),
                    family: *family,
                }
            })
            .collect();

        Self { rules }
    }
}

impl Default for RegexAgentParser {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentParser for RegexAgentParser {
    fn parse(&self, user_agent: &str) -> Option<AgentRecord> {
        self.rules.iter().find_map(|rule| {
            rule.regex
                .captures(user_agent)
                .and_then(|caps| rule.record(&caps))
        })
    }
}
