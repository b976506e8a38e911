//! Classification pipeline
//!
//! ```text
//! raw ─▶ Sanitizer ─▶ FastPath ──────────────────────────────┐
//!                        │ miss                               │
//!                        ▼                                    ▼
//!                  ResultCache ─hit────────────────────▶ BaselineTable ─▶ UserAgent
//!                        │ miss                               ▲
//!                        ▼                                    │
//!                   AgentParser ─▶ AliasTable ─▶ (store) ─────┘
//! ```

use indexmap::IndexMap;
use tracing::{debug, info, trace};

use crate::config::NormalizerConfig;
use crate::normalizer::alias::{AliasRule, AliasTable};
use crate::normalizer::baseline::BaselineTable;
use crate::normalizer::cache::ResultCache;
use crate::normalizer::error::ConfigError;
use crate::normalizer::user_agent::UserAgent;
use crate::parser::fast_path::FastPath;
use crate::parser::sanitize::Sanitizer;
use crate::parser::traits::AgentParser;
use crate::parser::types::AgentRecord;
use crate::parser::ua_regex::RegexAgentParser;

/// Owns the parser, the alias and baseline tables and the result cache.
///
/// Tables are immutable once built; the cache locks internally, so a single
/// instance can serve every thread of the process.
pub struct Normalizer {
    sanitizer: Sanitizer,
    fast_path: FastPath,
    parser: Box<dyn AgentParser>,
    aliases: AliasTable,
    baselines: BaselineTable,
    cache: ResultCache,
}

impl Normalizer {
    /// Normalizer with the built-in parser and tables
    pub fn new() -> Self {
        Self::build(
            Box::new(RegexAgentParser::new()),
            AliasTable::builtin(),
            BaselineTable::builtin(),
            ResultCache::default(),
        )
    }

    /// Build a Normalizer with custom components
    pub fn build(
        parser: Box<dyn AgentParser>,
        aliases: AliasTable,
        baselines: BaselineTable,
        cache: ResultCache,
    ) -> Self {
        Self {
            sanitizer: Sanitizer::new(),
            fast_path: FastPath::new(),
            parser,
            aliases,
            baselines,
            cache,
        }
    }

    /// Built-in tables extended with the configured aliases and baselines
    pub fn from_config(config: &NormalizerConfig) -> Result<Self, ConfigError> {
        let mut aliases = AliasTable::builtin();
        for (family, canonical) in &config.aliases {
            aliases.insert(family, AliasRule::rename(canonical));
        }

        let mut baselines = BaselineTable::builtin();
        for (family, expression) in &config.baselines {
            baselines.insert(family, expression)?;
        }

        info!(
            "Normalizer configured with {} aliases, {} baselines, cache capacity {}",
            aliases.len(),
            baselines.expressions().len(),
            config.cache.capacity
        );

        Ok(Self::build(
            Box::new(RegexAgentParser::new()),
            aliases,
            baselines,
            ResultCache::new(config.cache.capacity),
        ))
    }

    /// Classify a raw User-Agent string. Never fails: unrecognised input
    /// yields a result whose `is_unknown()` is true.
    pub fn classify(&self, raw: &str) -> UserAgent {
        let sanitized = self.sanitizer.sanitize(raw);
        let record = self.canonical_record(sanitized);
        let baseline = self.baselines.get(&record.family).cloned();
        UserAgent::new(record, baseline)
    }

    fn canonical_record(&self, sanitized: String) -> AgentRecord {
        if let Some(record) = self.fast_path.recognize(&sanitized) {
            trace!("Canonical shape: {}", record);
            return record;
        }

        if let Some(record) = self.cache.get(&sanitized) {
            debug!("Cache hit for {:?}", sanitized);
            return record;
        }

        debug!("Cache miss for {:?}", sanitized);
        let detected = self
            .parser
            .parse(&sanitized)
            .unwrap_or_else(AgentRecord::unknown);
        let resolved = self.aliases.resolve(&detected);
        self.cache.insert(sanitized, resolved.clone());
        resolved
    }

    /// Render the canonical `family/major.minor.patch` form of a User-Agent
    pub fn normalize(&self, raw: &str) -> String {
        if let Some(record) = self.fast_path.recognize(&raw.to_lowercase()) {
            return record.to_string();
        }
        self.classify(raw).to_string()
    }

    /// Snapshot of canonical family -> baseline range
    pub fn baselines(&self) -> IndexMap<String, String> {
        self.baselines.expressions()
    }

    pub fn baseline_table(&self) -> &BaselineTable {
        &self.baselines
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}
