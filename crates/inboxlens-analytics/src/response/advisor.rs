//! Reply strategy selection and template filling.

use super::model::{ResponseStrategy, ResponseSuggestion};
use crate::config::{AnalyzerConfig, ResponseTemplates};
use crate::engine::AnalysisResult;
use crate::features::{CompiledLexicon, TextScan};
use crate::message::NormalizedMessage;
use crate::priority::PriorityBand;

/// Fallback salutation when the sender has no usable name.
const FALLBACK_NAME: &str = "there";

/// Picks a reply strategy for messages that need a response.
#[derive(Debug, Clone)]
pub struct ResponseAdvisor {
    scheduling: CompiledLexicon,
    templates: ResponseTemplates,
}

impl ResponseAdvisor {
    /// Build an advisor from the configured scheduling lexicon and templates.
    #[must_use]
    pub fn new(config: &AnalyzerConfig) -> Self {
        Self {
            scheduling: CompiledLexicon::compile(&config.lexicons.scheduling),
            templates: config.response.clone(),
        }
    }

    /// Suggest a reply for an analyzed message.
    ///
    /// Returns `None` unless the result says a response is needed.
    #[must_use]
    pub fn advise(
        &self,
        result: &AnalysisResult,
        message: &NormalizedMessage,
    ) -> Option<ResponseSuggestion> {
        let mut scan = TextScan::scan(&message.subject);
        scan.feed(&message.body);
        self.suggest(result, message, self.scheduling.matches_any(&scan.tokens))
    }

    /// Same as [`advise`](Self::advise) with the scheduling cue already known.
    pub(crate) fn suggest(
        &self,
        result: &AnalysisResult,
        message: &NormalizedMessage,
        mentions_scheduling: bool,
    ) -> Option<ResponseSuggestion> {
        if !result.needs_response {
            return None;
        }

        let strategy = if result.priority_band == PriorityBand::High
            && result.sentiment.label.is_troubled()
        {
            ResponseStrategy::Escalate
        } else if mentions_scheduling {
            ResponseStrategy::Schedule
        } else if result.priority_band == PriorityBand::Low {
            ResponseStrategy::Decline
        } else {
            ResponseStrategy::Acknowledge
        };

        let template = self
            .templates
            .fill_templates
            .then(|| self.fill(strategy, message));

        Some(ResponseSuggestion { strategy, template })
    }

    fn fill(&self, strategy: ResponseStrategy, message: &NormalizedMessage) -> String {
        let template = match strategy {
            ResponseStrategy::Acknowledge => &self.templates.acknowledge,
            ResponseStrategy::Schedule => &self.templates.schedule,
            ResponseStrategy::Escalate => &self.templates.escalate,
            ResponseStrategy::Decline => &self.templates.decline,
        };
        template
            .replace("{name}", &salutation(message))
            .replace("{subject}", message.subject.trim())
    }
}

/// Display name, else the capitalized local part of the sender address.
fn salutation(message: &NormalizedMessage) -> String {
    if let Some(name) = message.sender_display_name() {
        return name.to_string();
    }
    let address = message.sender_address();
    let local = address.split('@').next().unwrap_or_default();
    let first = local
        .split(['.', '_', '-', '+'])
        .find(|part| !part.is_empty());
    first.map_or_else(|| FALLBACK_NAME.to_string(), capitalize)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::classify::{Category, Sentiment, SentimentLabel};

    fn advisor() -> ResponseAdvisor {
        ResponseAdvisor::new(&AnalyzerConfig::default())
    }

    fn result(band: PriorityBand, label: SentimentLabel) -> AnalysisResult {
        AnalysisResult {
            message_id: "m1".to_string(),
            priority_score: 0,
            priority_band: band,
            sentiment: Sentiment {
                label,
                confidence: 0.8,
                score: 0.0,
            },
            category: Category::Work,
            category_confidence: 0.5,
            spam_probability: 0.01,
            needs_response: true,
            suggested_response: None,
            urgency_indicators: Vec::new(),
            key_topics: Vec::new(),
            reading_time_secs: 30,
        }
    }

    fn message() -> NormalizedMessage {
        NormalizedMessage::new("m1")
            .with_sender("Dana Whitfield <dana@company.com>")
            .with_subject("Contract review")
            .with_body("Can you take a look?")
    }

    #[test]
    fn test_no_suggestion_without_need() {
        let mut quiet = result(PriorityBand::High, SentimentLabel::Neutral);
        quiet.needs_response = false;
        assert!(advisor().advise(&quiet, &message()).is_none());
    }

    #[test]
    fn test_decision_table() {
        let a = advisor();
        let cases = [
            (PriorityBand::High, SentimentLabel::Negative, ResponseStrategy::Escalate),
            (PriorityBand::High, SentimentLabel::Mixed, ResponseStrategy::Escalate),
            (PriorityBand::High, SentimentLabel::Positive, ResponseStrategy::Acknowledge),
            (PriorityBand::Medium, SentimentLabel::Negative, ResponseStrategy::Acknowledge),
            (PriorityBand::Low, SentimentLabel::Neutral, ResponseStrategy::Decline),
        ];
        for (band, label, expected) in cases {
            let suggestion = a.advise(&result(band, label), &message()).unwrap();
            assert_eq!(suggestion.strategy, expected, "{band:?} {label:?}");
        }
    }

    #[test]
    fn test_scheduling_cue() {
        let msg = message().with_body("Are you available for a call on Thursday?");
        let suggestion = advisor()
            .advise(&result(PriorityBand::Low, SentimentLabel::Neutral), &msg)
            .unwrap();
        assert_eq!(suggestion.strategy, ResponseStrategy::Schedule);
    }

    #[test]
    fn test_template_filled() {
        let suggestion = advisor()
            .advise(&result(PriorityBand::Medium, SentimentLabel::Neutral), &message())
            .unwrap();
        let text = suggestion.template.unwrap();
        assert!(text.starts_with("Hi Dana Whitfield,"));
        assert!(text.contains("\"Contract review\""));
    }

    #[test]
    fn test_templates_disabled() {
        let mut config = AnalyzerConfig::default();
        config.response.fill_templates = false;
        let suggestion = ResponseAdvisor::new(&config)
            .advise(&result(PriorityBand::Medium, SentimentLabel::Neutral), &message())
            .unwrap();
        assert!(suggestion.template.is_none());
    }

    #[test]
    fn test_salutation_fallbacks() {
        let bare = NormalizedMessage::new("1").with_sender("jordan.lee@example.com");
        assert_eq!(salutation(&bare), "Jordan");
        assert_eq!(salutation(&NormalizedMessage::new("2")), FALLBACK_NAME);
        let tagged = NormalizedMessage::new("3").with_sender("sam+news@example.com");
        assert_eq!(salutation(&tagged), "Sam");
        let underscored = NormalizedMessage::new("4").with_sender("_kim_ito@example.com");
        assert_eq!(salutation(&underscored), "Kim");
    }
}
