//! Lexicon-based sentiment analysis.

use super::model::{Sentiment, SentimentLabel};
use crate::config::SentimentThresholds;
use crate::features::FeatureSet;

/// Maps positive/negative keyword weight to a sentiment label.
#[derive(Debug, Clone)]
pub struct SentimentAnalyzer {
    thresholds: SentimentThresholds,
}

impl SentimentAnalyzer {
    /// Creates an analyzer with the given thresholds.
    #[must_use]
    pub const fn new(thresholds: SentimentThresholds) -> Self {
        Self { thresholds }
    }

    /// Classify the sentiment of a feature set.
    ///
    /// Mixed takes precedence over the magnitude rule when both polarities
    /// are strongly present.
    #[must_use]
    pub fn analyze(&self, features: &FeatureSet) -> Sentiment {
        let t = &self.thresholds;
        let positive = features.positive.weight;
        let negative = features.negative.weight;
        let score = (positive - negative) / f64::from(features.word_count.max(1));

        if positive > 0.0
            && negative > 0.0
            && positive >= t.mixed_threshold
            && negative >= t.mixed_threshold
        {
            return Sentiment {
                label: SentimentLabel::Mixed,
                confidence: clamp_unit(positive.min(negative) / positive.max(negative)),
                score,
            };
        }

        if score > t.positive_threshold {
            return Sentiment {
                label: SentimentLabel::Positive,
                confidence: clamp_unit(score.abs() / t.confidence_saturation),
                score,
            };
        }

        if score < t.negative_threshold {
            return Sentiment {
                label: SentimentLabel::Negative,
                confidence: clamp_unit(score.abs() / t.confidence_saturation),
                score,
            };
        }

        let confidence = if positive <= 0.0 && negative <= 0.0 {
            t.neutral_baseline_confidence
        } else {
            let band = t.positive_threshold.max(-t.negative_threshold);
            if band > 0.0 {
                1.0 - score.abs() / band
            } else {
                1.0
            }
        };

        Sentiment {
            label: SentimentLabel::Neutral,
            confidence: clamp_unit(confidence),
            score,
        }
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
