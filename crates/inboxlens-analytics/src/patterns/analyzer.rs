//! Batch-level pattern analysis.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use super::accumulator::{PatternAccumulator, PatternSettings};
use super::model::PatternStats;
use super::timeline::TransitionIndex;
use crate::config::InsightThresholds;
use crate::engine::AnalysisResult;
use crate::message::{LabelTransition, NormalizedMessage, validate_ids};
use crate::{Error, Result};

/// Aggregates per-message results into mailbox statistics.
#[derive(Debug, Clone)]
pub struct PatternAnalyzer {
    thresholds: InsightThresholds,
}

impl PatternAnalyzer {
    /// Creates an analyzer with the given thresholds.
    #[must_use]
    pub const fn new(thresholds: InsightThresholds) -> Self {
        Self { thresholds }
    }

    /// Settings for one run at `as_of`.
    #[must_use]
    pub const fn settings(&self, as_of: DateTime<Utc>) -> PatternSettings {
        PatternSettings {
            as_of,
            peak_window_hours: self.thresholds.peak_window_hours,
            old_unread_days: self.thresholds.old_unread_days,
            efficiency_min_age_hours: self.thresholds.efficiency_min_age_hours,
            efficiency_window_hours: self.thresholds.efficiency_window_hours,
        }
    }

    /// Empty accumulator for one run at `as_of`.
    #[must_use]
    pub const fn accumulator(&self, as_of: DateTime<Utc>) -> PatternAccumulator {
        PatternAccumulator::new(self.settings(as_of))
    }

    /// Compute pattern statistics for a batch.
    ///
    /// Results are joined to messages by id. Messages without a result are
    /// not counted. Transitions for unknown messages are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error before any aggregation if message ids are empty or
    /// duplicated, if two results share an id, or if a result refers to a
    /// message that is not in `messages`.
    pub fn analyze(
        &self,
        messages: &[NormalizedMessage],
        results: &[AnalysisResult],
        transitions: &[LabelTransition],
        as_of: DateTime<Utc>,
    ) -> Result<PatternStats> {
        validate_ids(messages)?;
        let by_id: HashMap<&str, &NormalizedMessage> =
            messages.iter().map(|m| (m.id.as_str(), m)).collect();

        let mut seen = HashSet::with_capacity(results.len());
        let mut pairs = Vec::with_capacity(results.len());
        for result in results {
            let id = result.message_id.as_str();
            if !seen.insert(id) {
                return Err(Error::DuplicateMessageId(result.message_id.clone()));
            }
            let message = by_id
                .get(id)
                .ok_or_else(|| Error::UnknownMessage(result.message_id.clone()))?;
            pairs.push((*message, result));
        }

        let index = TransitionIndex::new(transitions);
        let known: HashSet<&str> = by_id.keys().copied().collect();
        let orphans = index.orphans(&known);
        if orphans > 0 {
            warn!(orphans, "Ignoring transitions for messages outside the batch");
        }

        let mut accumulator = self.accumulator(as_of);
        for (message, result) in pairs {
            accumulator.add(message, result, index.timeline(message));
        }
        let stats = accumulator.finish();
        debug!(
            messages = stats.total_messages,
            unread = stats.unread_messages,
            senders = stats.senders.len(),
            "Computed mailbox patterns"
        );
        Ok(stats)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::classify::{Category, Sentiment, SentimentLabel};
    use crate::priority::PriorityBand;

    fn as_of() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 20, 12, 0, 0).unwrap()
    }

    fn result(id: &str) -> AnalysisResult {
        AnalysisResult {
            message_id: id.to_string(),
            priority_score: 30,
            priority_band: PriorityBand::Low,
            sentiment: Sentiment {
                label: SentimentLabel::Positive,
                confidence: 0.9,
                score: 0.2,
            },
            category: Category::Personal,
            category_confidence: 0.4,
            spam_probability: 0.0,
            needs_response: false,
            suggested_response: None,
            urgency_indicators: Vec::new(),
            key_topics: Vec::new(),
            reading_time_secs: 30,
        }
    }

    fn analyzer() -> PatternAnalyzer {
        PatternAnalyzer::new(InsightThresholds::default())
    }

    #[test]
    fn test_unknown_result_rejected() {
        let messages = vec![NormalizedMessage::new("m1")];
        let err = analyzer()
            .analyze(&messages, &[result("m2")], &[], as_of())
            .unwrap_err();
        assert!(matches!(err, Error::UnknownMessage(id) if id == "m2"));
    }

    #[test]
    fn test_duplicate_result_rejected() {
        let messages = vec![NormalizedMessage::new("m1")];
        let err = analyzer()
            .analyze(&messages, &[result("m1"), result("m1")], &[], as_of())
            .unwrap_err();
        assert!(err.is_precondition());
    }

    #[test]
    fn test_sentiment_trend() {
        let messages = vec![NormalizedMessage::new("m1"), NormalizedMessage::new("m2")];
        let mut negative = result("m2");
        negative.sentiment.label = SentimentLabel::Negative;
        let stats = analyzer()
            .analyze(&messages, &[result("m1"), negative], &[], as_of())
            .unwrap();
        let trend = &stats.sentiment_trend[&Category::Personal];
        assert_eq!(trend.messages, 2);
        assert!((trend.score - 0.5).abs() < 1e-9);
        assert_eq!(trend.labels[&SentimentLabel::Positive], 1);
        assert_eq!(stats.undated_messages, 2);
        assert_eq!(stats.total_reading_secs, 60);
    }
}
