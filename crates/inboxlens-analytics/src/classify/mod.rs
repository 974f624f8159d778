//! Per-message classifiers: sentiment, category and spam likelihood.
//!
//! All three read the same [`crate::features::FeatureSet`] and are pure,
//! deterministic functions of it.

mod category;
mod model;
mod sentiment;
mod spam;

pub use category::Categorizer;
pub use model::{Category, CategoryScores, CategoryVerdict, Sentiment, SentimentLabel};
pub use sentiment::SentimentAnalyzer;
pub use spam::{SpamDetector, SpamFactors};
