//! Engine output models.

use serde::{Deserialize, Serialize};

use crate::classify::{Category, Sentiment};
use crate::features::UrgencyIndicator;
use crate::insights::MailboxInsights;
use crate::priority::PriorityBand;
use crate::response::ResponseSuggestion;

/// Analysis of a single message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Id of the analyzed message.
    pub message_id: String,
    /// Priority on a 0-100 scale.
    pub priority_score: u8,
    /// Band of the priority score.
    pub priority_band: PriorityBand,
    /// Sentiment verdict.
    pub sentiment: Sentiment,
    /// Winning category.
    pub category: Category,
    /// Confidence in the category.
    pub category_confidence: f64,
    /// Spam probability in `[0, 1]`.
    pub spam_probability: f64,
    /// Whether the reader is expected to reply.
    pub needs_response: bool,
    /// Suggested reply, present only when a response is needed.
    pub suggested_response: Option<ResponseSuggestion>,
    /// Urgency markers found in the text.
    pub urgency_indicators: Vec<UrgencyIndicator>,
    /// Most frequent topic terms.
    pub key_topics: Vec<String>,
    /// Estimated reading time in seconds.
    pub reading_time_secs: u32,
}

impl AnalysisResult {
    /// Check if the message landed in the high band.
    #[must_use]
    pub fn is_high_priority(&self) -> bool {
        self.priority_band == PriorityBand::High
    }
}

/// Output of one batch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    /// One result per input message, in input order.
    pub results: Vec<AnalysisResult>,
    /// Mailbox-level insights.
    pub insights: MailboxInsights,
}

impl BatchReport {
    /// Look up the result for a message id.
    #[must_use]
    pub fn result(&self, message_id: &str) -> Option<&AnalysisResult> {
        self.results.iter().find(|r| r.message_id == message_id)
    }
}
