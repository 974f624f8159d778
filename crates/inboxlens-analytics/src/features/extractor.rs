//! Feature extraction from a normalized message.

use std::collections::{BTreeMap, HashSet};

use super::model::{FeatureSet, LengthBucket};
use super::tokens::{CompiledLexicon, TextScan};
use crate::config::{AnalyzerConfig, SenderHeuristics};
use crate::message::NormalizedMessage;

/// Number of key topics kept per message.
const KEY_TOPIC_LIMIT: usize = 5;
/// Minimum length of a key topic term.
const KEY_TOPIC_MIN_LEN: usize = 4;

/// Derives a [`FeatureSet`] from a message.
///
/// Lexicons are compiled once at construction; `extract` is pure.
#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    work: CompiledLexicon,
    personal: CompiledLexicon,
    promotional: CompiledLexicon,
    spam_phrases: CompiledLexicon,
    deadline: CompiledLexicon,
    time_pressure: CompiledLexicon,
    action_required: CompiledLexicon,
    positive: CompiledLexicon,
    negative: CompiledLexicon,
    unsubscribe: CompiledLexicon,
    automation: CompiledLexicon,
    request: CompiledLexicon,
    scheduling: CompiledLexicon,
    stopwords: HashSet<String>,
    senders: SenderHeuristics,
}

impl FeatureExtractor {
    /// Build an extractor from the configured lexicons.
    #[must_use]
    pub fn new(config: &AnalyzerConfig) -> Self {
        let lexicons = &config.lexicons;
        Self {
            work: CompiledLexicon::compile(&lexicons.work),
            personal: CompiledLexicon::compile(&lexicons.personal),
            promotional: CompiledLexicon::compile(&lexicons.promotional),
            spam_phrases: CompiledLexicon::compile(&lexicons.spam_phrases),
            deadline: CompiledLexicon::compile(&lexicons.deadline),
            time_pressure: CompiledLexicon::compile(&lexicons.time_pressure),
            action_required: CompiledLexicon::compile(&lexicons.action_required),
            positive: CompiledLexicon::compile(&lexicons.positive),
            negative: CompiledLexicon::compile(&lexicons.negative),
            unsubscribe: CompiledLexicon::compile(&lexicons.unsubscribe),
            automation: CompiledLexicon::compile(&lexicons.automation),
            request: CompiledLexicon::compile(&lexicons.request),
            scheduling: CompiledLexicon::compile(&lexicons.scheduling),
            stopwords: lexicons
                .topic_stopwords
                .iter()
                .map(|w| w.to_lowercase())
                .collect(),
            senders: config.senders.clone(),
        }
    }

    /// Extract features from one message.
    #[must_use]
    pub fn extract(&self, message: &NormalizedMessage) -> FeatureSet {
        let mut scan = TextScan::scan(&message.subject);
        scan.feed(&message.body);
        let tokens = &scan.tokens;

        let word_count = u32::try_from(tokens.len()).unwrap_or(u32::MAX);
        let uppercase_ratio = if scan.letters == 0 {
            0.0
        } else {
            f64::from(scan.uppercase) / f64::from(scan.letters)
        };

        let subject = message.subject.trim_start().to_lowercase();
        // Sender flags only describe messages that carry content.
        let sender = if tokens.is_empty() && scan.links == 0 {
            String::new()
        } else {
            message.sender_address()
        };

        FeatureSet {
            work: self.work.count(tokens),
            personal: self.personal.count(tokens),
            promotional: self.promotional.count(tokens),
            spam_phrases: self.spam_phrases.count(tokens),
            deadline: self.deadline.count(tokens),
            time_pressure: self.time_pressure.count(tokens),
            action_required: self.action_required.count(tokens),
            positive: self.positive.count(tokens),
            negative: self.negative.count(tokens),
            unsubscribe: self.unsubscribe.count(tokens),
            automation: self.automation.count(tokens),
            request: self.request.count(tokens),
            scheduling: self.scheduling.count(tokens),
            word_count,
            uppercase_ratio,
            shouted_words: scan.shouted,
            exclamation_count: scan.exclamations,
            exclamation_runs: scan.exclamation_runs,
            question_count: scan.questions,
            link_count: scan.links,
            length_bucket: LengthBucket::from_word_count(word_count),
            automated_sender: self.is_automated_sender(&sender),
            suspicious_sender: self.is_suspicious_sender(message, &sender),
            is_reply: subject.starts_with("re:"),
            is_forward: subject.starts_with("fwd:") || subject.starts_with("fw:"),
            key_topics: self.key_topics(tokens),
        }
    }

    fn is_automated_sender(&self, sender: &str) -> bool {
        !sender.is_empty()
            && self
                .senders
                .automated_patterns
                .iter()
                .any(|pattern| sender.contains(&pattern.to_lowercase()))
    }

    fn is_suspicious_sender(&self, message: &NormalizedMessage, sender: &str) -> bool {
        if sender.is_empty() {
            return false;
        }
        if self
            .senders
            .suspicious_terms
            .iter()
            .any(|term| sender.contains(&term.to_lowercase()))
        {
            return true;
        }
        message
            .sender_domain()
            .and_then(|domain| domain.rsplit('.').next().map(ToString::to_string))
            .is_some_and(|tld| {
                self.senders
                    .suspicious_tlds
                    .iter()
                    .any(|suspicious| suspicious.eq_ignore_ascii_case(&tld))
            })
    }

    /// Most frequent topic terms; ties broken alphabetically.
    fn key_topics(&self, tokens: &[String]) -> Vec<String> {
        let mut counts: BTreeMap<&str, u32> = BTreeMap::new();
        for token in tokens {
            if token.chars().count() >= KEY_TOPIC_MIN_LEN
                && token.chars().all(char::is_alphabetic)
                && !self.stopwords.contains(token)
            {
                *counts.entry(token.as_str()).or_default() += 1;
            }
        }
        let mut ranked: Vec<(&str, u32)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
            .into_iter()
            .take(KEY_TOPIC_LIMIT)
            .map(|(term, _)| term.to_string())
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn extractor() -> FeatureExtractor {
        FeatureExtractor::new(&AnalyzerConfig::default())
    }

    #[test]
    fn test_empty_message_is_zero() {
        let message = NormalizedMessage::new("empty").with_sender("someone@example.com");
        let features = extractor().extract(&message);
        assert_eq!(features, FeatureSet::default());
        assert!(features.is_empty());
    }

    #[test]
    fn test_empty_message_from_flagged_sender_is_zero() {
        let e = extractor();
        for sender in ["noreply@promo-deals.xyz", "GitHub <noreply@github.com>"] {
            let message = NormalizedMessage::new("empty").with_sender(sender);
            let features = e.extract(&message);
            assert!(!features.automated_sender);
            assert!(!features.suspicious_sender);
            assert!(features.is_empty());
        }
        let with_body = NormalizedMessage::new("full")
            .with_sender("noreply@promo-deals.xyz")
            .with_body("hello");
        let features = e.extract(&with_body);
        assert!(features.automated_sender);
        assert!(features.suspicious_sender);
    }

    #[test]
    fn test_missing_sender_is_zero() {
        let features = extractor().extract(&NormalizedMessage::new("bare"));
        assert!(features.is_empty());
    }

    #[test]
    fn test_urgent_work_message() {
        let message = NormalizedMessage::new("1")
            .with_sender("boss@company.com")
            .with_subject("URGENT: contract review needed")
            .with_body("please respond today");
        let features = extractor().extract(&message);

        assert_eq!(features.word_count, 7);
        assert_eq!(features.time_pressure.count, 1);
        assert_eq!(features.deadline.count, 1);
        assert_eq!(features.action_required.count, 1);
        assert_eq!(features.request.count, 1);
        assert_eq!(features.work.count, 2);
        assert_eq!(features.negative.count, 1);
        assert_eq!(features.shouted_words, 1);
        assert!(!features.automated_sender);
        assert!(!features.suspicious_sender);
        assert!(features.promotional.is_empty());
        assert_eq!(features.length_bucket, LengthBucket::Short);
    }

    #[test]
    fn test_sender_flags() {
        let automated = NormalizedMessage::new("1").with_sender("GitHub <noreply@github.com>");
        let suspicious = NormalizedMessage::new("2").with_sender("win@cheap-stuff.xyz");
        let e = extractor();
        assert!(e.extract(&automated).automated_sender);
        assert!(!e.extract(&automated).suspicious_sender);
        assert!(e.extract(&suspicious).suspicious_sender);
    }

    #[test]
    fn test_thread_position() {
        let e = extractor();
        assert!(e.extract(&NormalizedMessage::new("1").with_subject("Re: budget")).is_reply);
        assert!(e.extract(&NormalizedMessage::new("2").with_subject("FWD: budget")).is_forward);
    }

    #[test]
    fn test_key_topics_ranked() {
        let message = NormalizedMessage::new("1")
            .with_body("budget budget budget roadmap roadmap hiring with with with with");
        let features = extractor().extract(&message);
        assert_eq!(features.key_topics, vec!["budget", "roadmap", "hiring"]);
    }

    #[test]
    fn test_uppercase_ratio() {
        let message = NormalizedMessage::new("1").with_body("ABCD efgh");
        let features = extractor().extract(&message);
        assert_eq!(features.uppercase_ratio, 0.5);
    }
}
