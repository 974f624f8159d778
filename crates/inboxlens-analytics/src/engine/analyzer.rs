//! The analysis pipeline.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use super::model::{AnalysisResult, BatchReport};
use crate::classify::{Categorizer, SentimentAnalyzer, SpamDetector};
use crate::config::AnalyzerConfig;
use crate::features::{FeatureExtractor, FeatureSet};
use crate::insights::{InsightEngine, MailboxInsights};
use crate::message::{LabelTransition, MailboxSnapshot, MessageSource, NormalizedMessage, snapshot_from};
use crate::patterns::{PatternAccumulator, PatternAnalyzer, PatternStats, TransitionIndex};
use crate::priority::{MessageMeta, PriorityScorer};
use crate::response::ResponseAdvisor;
use crate::{Error, Result};

const SECONDS_PER_MINUTE: u64 = 60;

/// Runs every analysis stage over messages and batches.
///
/// Built once from a validated [`AnalyzerConfig`] and then read-only, so a
/// single analyzer can be shared across threads.
#[derive(Debug, Clone)]
pub struct Analyzer {
    config: AnalyzerConfig,
    extractor: FeatureExtractor,
    sentiment: SentimentAnalyzer,
    categorizer: Categorizer,
    spam: SpamDetector,
    priority: PriorityScorer,
    advisor: ResponseAdvisor,
    patterns: PatternAnalyzer,
    insights: InsightEngine,
}

impl Analyzer {
    /// Build an analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration has an unsupported version or
    /// fails validation.
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        config.check()?;
        Ok(Self {
            extractor: FeatureExtractor::new(&config),
            sentiment: SentimentAnalyzer::new(config.sentiment.clone()),
            categorizer: Categorizer::new(config.category.clone()),
            spam: SpamDetector::new(config.spam.clone()),
            priority: PriorityScorer::new(config.priority.clone()),
            advisor: ResponseAdvisor::new(&config),
            patterns: PatternAnalyzer::new(config.insights.clone()),
            insights: InsightEngine::new(config.insights.clone()),
            config,
        })
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze one message relative to `as_of`.
    #[must_use]
    pub fn analyze_message(&self, message: &NormalizedMessage, as_of: DateTime<Utc>) -> AnalysisResult {
        let features = self.extractor.extract(message);
        self.analyze_features(message, &features, as_of)
    }

    fn analyze_features(
        &self,
        message: &NormalizedMessage,
        features: &FeatureSet,
        as_of: DateTime<Utc>,
    ) -> AnalysisResult {
        let sentiment = self.sentiment.analyze(features);
        let verdict = self.categorizer.categorize(features);
        let spam_probability = self.spam.score(features);
        let meta = MessageMeta {
            features,
            received: message.timestamp,
            as_of,
        };
        let priority = self
            .priority
            .score(&meta, &sentiment, verdict.category, spam_probability);

        let mut result = AnalysisResult {
            message_id: message.id.clone(),
            priority_score: priority.score,
            priority_band: priority.band,
            sentiment,
            category: verdict.category,
            category_confidence: verdict.confidence,
            spam_probability,
            needs_response: priority.needs_response,
            suggested_response: None,
            urgency_indicators: features.urgency_indicators(),
            key_topics: features.key_topics.clone(),
            reading_time_secs: self.reading_time_secs(features.word_count),
        };
        result.suggested_response =
            self.advisor
                .suggest(&result, message, !features.scheduling.is_empty());
        result
    }

    /// Estimated reading time, never below the configured minimum.
    fn reading_time_secs(&self, words: u32) -> u32 {
        let t = &self.config.insights;
        let secs = (u64::from(words) * SECONDS_PER_MINUTE).div_ceil(u64::from(t.words_per_minute.max(1)));
        u32::try_from(secs).unwrap_or(u32::MAX).max(t.min_reading_secs)
    }

    /// Analyze a batch sequentially.
    ///
    /// # Errors
    ///
    /// Returns an error if a message id is empty or duplicated. Nothing is
    /// analyzed in that case.
    pub fn analyze_batch(&self, snapshot: &MailboxSnapshot, as_of: DateTime<Utc>) -> Result<BatchReport> {
        snapshot.validate()?;
        info!(
            messages = snapshot.messages.len(),
            transitions = snapshot.transitions.len(),
            "Analyzing batch"
        );

        let results: Vec<AnalysisResult> = snapshot
            .messages
            .iter()
            .map(|message| self.analyze_message(message, as_of))
            .collect();
        let stats = self
            .patterns
            .analyze(&snapshot.messages, &results, &snapshot.transitions, as_of)?;

        Ok(self.report(results, stats))
    }

    /// Pull messages from a source and analyze them as one batch.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Source`] if the source fails, otherwise the same
    /// errors as [`analyze_batch`](Self::analyze_batch).
    pub fn analyze_source<S: MessageSource + ?Sized>(
        &self,
        source: &S,
        as_of: DateTime<Utc>,
    ) -> Result<BatchReport> {
        let snapshot = snapshot_from(source)?;
        self.analyze_batch(&snapshot, as_of)
    }

    /// Compute insights for results produced earlier.
    ///
    /// # Errors
    ///
    /// Returns an error if message ids are invalid or a result refers to a
    /// message not in `messages`.
    pub fn summarize(
        &self,
        messages: &[NormalizedMessage],
        results: &[AnalysisResult],
        transitions: &[LabelTransition],
        as_of: DateTime<Utc>,
    ) -> Result<MailboxInsights> {
        let stats = self.patterns.analyze(messages, results, transitions, as_of)?;
        Ok(self.insights.summarize(stats, results))
    }

    /// Analyze a batch across blocking worker tasks.
    ///
    /// Messages are split into at most `workers` contiguous chunks. Each
    /// worker returns its results together with a partial pattern
    /// accumulator; partials are merged once every worker has finished. The
    /// report is identical to the one [`analyze_batch`](Self::analyze_batch)
    /// produces for the same snapshot.
    ///
    /// # Errors
    ///
    /// Returns a precondition error for invalid ids before any worker is
    /// spawned, or [`Error::Worker`] if a worker panics.
    pub async fn analyze_batch_concurrent(
        self: &Arc<Self>,
        snapshot: MailboxSnapshot,
        as_of: DateTime<Utc>,
        workers: usize,
    ) -> Result<BatchReport> {
        snapshot.validate()?;
        let total = snapshot.messages.len();
        let workers = workers.clamp(1, total.max(1));
        let chunk = total.div_ceil(workers).max(1);
        info!(messages = total, workers, "Analyzing batch concurrently");

        let index = TransitionIndex::new(&snapshot.transitions);
        let known: HashSet<&str> = snapshot.messages.iter().map(|m| m.id.as_str()).collect();
        let orphans = index.orphans(&known);
        if orphans > 0 {
            warn!(orphans, "Ignoring transitions for messages outside the batch");
        }

        let snapshot = Arc::new(snapshot);
        let index = Arc::new(index);
        let mut tasks = JoinSet::new();
        for start in (0..total).step_by(chunk) {
            let end = (start + chunk).min(total);
            let analyzer = Arc::clone(self);
            let snapshot = Arc::clone(&snapshot);
            let index = Arc::clone(&index);
            tasks.spawn_blocking(move || {
                let mut partial = analyzer.patterns.accumulator(as_of);
                let mut results = Vec::with_capacity(end - start);
                for message in &snapshot.messages[start..end] {
                    let result = analyzer.analyze_message(message, as_of);
                    partial.add(message, &result, index.timeline(message));
                    results.push(result);
                }
                (results, partial)
            });
        }

        let mut accumulator: PatternAccumulator = self.patterns.accumulator(as_of);
        let mut by_id: HashMap<String, AnalysisResult> = HashMap::with_capacity(total);
        while let Some(joined) = tasks.join_next().await {
            let (results, partial) = joined?;
            accumulator.merge(partial)?;
            by_id.extend(results.into_iter().map(|r| (r.message_id.clone(), r)));
        }

        let results = snapshot
            .messages
            .iter()
            .map(|message| {
                by_id
                    .remove(&message.id)
                    .ok_or_else(|| Error::Internal(format!("no result for message {}", message.id)))
            })
            .collect::<Result<Vec<_>>>()?;
        debug!(chunks = total.div_ceil(chunk), "Merged worker partials");

        Ok(self.report(results, accumulator.finish()))
    }

    fn report(&self, results: Vec<AnalysisResult>, stats: PatternStats) -> BatchReport {
        if stats.undated_messages > 0 {
            warn!(
                undated = stats.undated_messages,
                "Messages without timestamps left out of time-based patterns"
            );
        }
        let insights = self.insights.summarize(stats, &results);
        info!(
            messages = results.len(),
            needs_response = insights.pending_responses,
            overload = insights.overload.risk.as_str(),
            "Batch analyzed"
        );
        BatchReport { results, insights }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::classify::{Category, SentimentLabel};
    use crate::features::UrgencyIndicator;
    use crate::priority::PriorityBand;
    use crate::response::ResponseStrategy;

    fn as_of() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap()
    }

    fn analyzer() -> Analyzer {
        Analyzer::new(AnalyzerConfig::default()).unwrap()
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = AnalyzerConfig::default();
        config.spam.steepness = -1.0;
        let err = Analyzer::new(config).unwrap_err();
        match err {
            Error::InvalidConfig(issues) => assert!(!issues.is_empty()),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_urgent_contract_review() {
        let message = NormalizedMessage::new("m1")
            .with_sender("boss@company.com")
            .with_subject("URGENT: contract review needed")
            .with_body("please respond today")
            .with_timestamp(as_of());
        let result = analyzer().analyze_message(&message, as_of());

        assert_eq!(result.category, Category::Work);
        assert_eq!(result.sentiment.label, SentimentLabel::Negative);
        assert!(result.spam_probability < 0.1);
        assert!(result.needs_response);
        assert_eq!(result.priority_band, PriorityBand::High);
        assert_eq!(
            result.suggested_response.as_ref().map(|s| s.strategy),
            Some(ResponseStrategy::Escalate)
        );
        assert!(result.urgency_indicators.contains(&UrgencyIndicator::TimePressure));
        assert!(result.urgency_indicators.contains(&UrgencyIndicator::CapsEmphasis));
        assert_eq!(result.reading_time_secs, 30);
    }

    #[test]
    fn test_reading_time() {
        let a = analyzer();
        assert_eq!(a.reading_time_secs(0), 30);
        assert_eq!(a.reading_time_secs(400), 120);
        assert_eq!(a.reading_time_secs(401), 121);
    }

    #[test]
    fn test_batch_rejects_duplicates_before_analysis() {
        let snapshot = MailboxSnapshot::new(vec![
            NormalizedMessage::new("dup"),
            NormalizedMessage::new("dup"),
        ]);
        let err = analyzer().analyze_batch(&snapshot, as_of()).unwrap_err();
        assert!(matches!(err, Error::DuplicateMessageId(id) if id == "dup"));
    }

    #[test]
    fn test_batch_preserves_order() {
        let snapshot = MailboxSnapshot::new(vec![
            NormalizedMessage::new("b"),
            NormalizedMessage::new("a"),
            NormalizedMessage::new("c"),
        ]);
        let report = analyzer().analyze_batch(&snapshot, as_of()).unwrap();
        let ids: Vec<&str> = report.results.iter().map(|r| r.message_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
        assert_eq!(report.insights.patterns.total_messages, 3);
        assert!(report.result("a").is_some());
    }

    #[test]
    fn test_analyze_source() {
        let messages = vec![NormalizedMessage::new("1").with_subject("Lunch?")];
        let report = analyzer().analyze_source(&messages, as_of()).unwrap();
        assert_eq!(report.results.len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_empty_batch() {
        let analyzer = Arc::new(analyzer());
        let report = analyzer
            .analyze_batch_concurrent(MailboxSnapshot::default(), as_of(), 4)
            .await
            .unwrap();
        assert!(report.results.is_empty());
        assert!(report.insights.is_all_clear());
    }
}
