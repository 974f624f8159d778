//! Engine configuration.
//!
//! Lexicons, weights and thresholds are grouped into one versioned
//! [`AnalyzerConfig`] that is fixed when an [`crate::Analyzer`] is built.
//! There is no global state: two analyzers with different configurations can
//! run side by side, and tests override single constants deterministically.
//!
//! # Example
//!
//! ```ignore
//! use inboxlens_analytics::{Analyzer, AnalyzerConfig};
//!
//! let mut config = AnalyzerConfig::default();
//! config.priority.spam_probability_high_threshold = 0.9;
//! let analyzer = Analyzer::new(config)?;
//!
//! // Or from JSON, where omitted sections keep their defaults:
//! let config = AnalyzerConfig::from_json(r#"{"version": 1, "spam": {"midpoint": 2.5}}"#)?;
//! ```

mod lexicon;
mod validation;
mod weights;

use serde::{Deserialize, Serialize};

pub use lexicon::{Lexicon, Lexicons, SenderHeuristics, WeightedTerm};
pub use validation::{ConfigIssue, ValidationResult, validate_config};
pub use weights::{
    CategoryWeights, InsightThresholds, PriorityWeights, ResponseTemplates, SentimentThresholds,
    SpamWeights,
};

use crate::{Error, Result};

/// Configuration schema version understood by this build.
pub const CONFIG_VERSION: u32 = 1;

/// Complete configuration of the analysis engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Schema version, must equal [`CONFIG_VERSION`].
    pub version: u32,
    /// Keyword lexicons.
    pub lexicons: Lexicons,
    /// Sender address heuristics.
    pub senders: SenderHeuristics,
    /// Sentiment thresholds.
    pub sentiment: SentimentThresholds,
    /// Category weights.
    pub category: CategoryWeights,
    /// Spam weights.
    pub spam: SpamWeights,
    /// Priority weights.
    pub priority: PriorityWeights,
    /// Response templates.
    pub response: ResponseTemplates,
    /// Mailbox insight thresholds.
    pub insights: InsightThresholds,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            lexicons: Lexicons::default(),
            senders: SenderHeuristics::default(),
            sentiment: SentimentThresholds::default(),
            category: CategoryWeights::default(),
            spam: SpamWeights::default(),
            priority: PriorityWeights::default(),
            response: ResponseTemplates::default(),
            insights: InsightThresholds::default(),
        }
    }
}

impl AnalyzerConfig {
    /// Parse and validate a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed, the version is unsupported,
    /// or any value fails validation.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.check()?;
        Ok(config)
    }

    /// Serialize to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the version and validate every value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedConfigVersion`] or [`Error::InvalidConfig`].
    pub fn check(&self) -> Result<()> {
        if self.version != CONFIG_VERSION {
            return Err(Error::UnsupportedConfigVersion {
                found: self.version,
                expected: CONFIG_VERSION,
            });
        }
        validate_config(self).map_err(Error::InvalidConfig)
    }
}
