//! # inboxlens-analytics
//!
//! Deterministic email analysis for `InboxLens`.
//!
//! This crate provides:
//! - **Feature extraction** - lexicon hits, shouting, links and sender flags
//! - **Classification** - sentiment, category and spam probability
//! - **Priority scoring** - a 0-100 score, band and `needs_response`
//! - **Response advice** - reply strategy with an optional filled template
//! - **Pattern analysis** - sender, time and latency statistics per batch
//! - **Insights** - ranked recommendations and an overload verdict
//!
//! Every stage is a pure function of its inputs and the [`AnalyzerConfig`]
//! fixed at construction. Wall-clock time never enters scoring: callers pass
//! the reference instant `as_of` explicitly.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod classify;
pub mod config;
pub mod engine;
mod error;
pub mod features;
pub mod insights;
pub mod message;
pub mod patterns;
pub mod priority;
pub mod response;

pub use classify::{Category, Sentiment, SentimentLabel};
pub use config::{AnalyzerConfig, CONFIG_VERSION, ConfigIssue, validate_config};
pub use engine::{AnalysisResult, Analyzer, BatchReport};
pub use error::{Error, Result};
pub use features::{FeatureSet, UrgencyIndicator};
pub use insights::{
    MailboxInsights, OverloadAssessment, OverloadRisk, Recommendation, RecommendationKind,
};
pub use message::{
    LabelTransition, MailboxSnapshot, MessageSource, NormalizedMessage, TransitionKind,
};
pub use patterns::{PatternAccumulator, PatternStats};
pub use priority::PriorityBand;
pub use response::{ResponseStrategy, ResponseSuggestion};
