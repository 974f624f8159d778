//! Numeric weights and thresholds, one struct per component.
//!
//! Every constant the scoring code reads lives here so behavior can be
//! audited and overridden in tests without touching classification logic.

use serde::{Deserialize, Serialize};

/// Sentiment label thresholds.
///
/// The signed score is `(positive weight - negative weight) / word count`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentThresholds {
    /// Scores strictly above this are positive.
    pub positive_threshold: f64,
    /// Scores strictly below this are negative.
    pub negative_threshold: f64,
    /// Both weight sums at or above this make the message mixed.
    pub mixed_threshold: f64,
    /// Score magnitude that maps to full confidence.
    pub confidence_saturation: f64,
    /// Confidence reported for messages with no sentiment words at all.
    pub neutral_baseline_confidence: f64,
}

impl Default for SentimentThresholds {
    fn default() -> Self {
        Self {
            positive_threshold: 0.02,
            negative_threshold: -0.02,
            mixed_threshold: 1.5,
            confidence_saturation: 0.1,
            neutral_baseline_confidence: 0.5,
        }
    }
}

/// Category scoring weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryWeights {
    /// Winning score must reach this, otherwise the category is `other`.
    pub min_score: f64,
    /// Promotional score added per unsubscribe marker.
    pub unsubscribe_weight: f64,
    /// Promotional score added per link.
    pub link_weight: f64,
    /// Cap on the promotional link bonus.
    pub link_bonus_cap: f64,
    /// Multiplier applied to the work score when unsubscribe markers exist.
    pub work_promotional_damping: f64,
    /// Score that maps to full category confidence.
    pub confidence_saturation: f64,
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self {
            min_score: 1.0,
            unsubscribe_weight: 2.0,
            link_weight: 0.25,
            link_bonus_cap: 2.0,
            work_promotional_damping: 0.5,
            confidence_saturation: 5.0,
        }
    }
}

/// Spam factor weights and squash parameters.
///
/// Each factor is normalized to `[0, 1]` before weighting. Keeping every
/// weight below `midpoint` means no single factor can push the probability
/// past one half on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpamWeights {
    /// Weight of promotional density.
    pub promotional_weight: f64,
    /// Promotional weight per word that saturates the factor.
    pub promotional_density_saturation: f64,
    /// Weight of link pressure.
    pub link_weight: f64,
    /// Link count that saturates the factor.
    pub link_saturation: u32,
    /// Weight of capitalization.
    pub caps_weight: f64,
    /// Uppercase ratio tolerated before it counts.
    pub caps_ratio_floor: f64,
    /// Shouted-word count that saturates the factor.
    pub shouted_word_saturation: u32,
    /// Weight of known spam phrases.
    pub phrase_weight: f64,
    /// Phrase weight sum that saturates the factor.
    pub phrase_saturation: f64,
    /// Weight of exclamation density.
    pub exclamation_weight: f64,
    /// Exclamations per word that saturate the factor.
    pub exclamation_density_saturation: f64,
    /// Weight of the suspicious-sender flag.
    pub sender_weight: f64,
    /// Logistic steepness.
    pub steepness: f64,
    /// Raw score mapped to probability 0.5.
    pub midpoint: f64,
}

impl SpamWeights {
    /// Factor weights in a fixed order, for validation.
    #[must_use]
    pub const fn factor_weights(&self) -> [(&'static str, f64); 6] {
        [
            ("spam.promotional_weight", self.promotional_weight),
            ("spam.link_weight", self.link_weight),
            ("spam.caps_weight", self.caps_weight),
            ("spam.phrase_weight", self.phrase_weight),
            ("spam.exclamation_weight", self.exclamation_weight),
            ("spam.sender_weight", self.sender_weight),
        ]
    }
}

impl Default for SpamWeights {
    fn default() -> Self {
        Self {
            promotional_weight: 1.5,
            promotional_density_saturation: 0.15,
            link_weight: 1.2,
            link_saturation: 5,
            caps_weight: 1.0,
            caps_ratio_floor: 0.3,
            shouted_word_saturation: 5,
            phrase_weight: 1.5,
            phrase_saturation: 3.0,
            exclamation_weight: 0.5,
            exclamation_density_saturation: 0.1,
            sender_weight: 0.8,
            steepness: 2.5,
            midpoint: 2.0,
        }
    }
}

/// Priority scoring weights on a 0-100 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriorityWeights {
    /// Base score for work mail.
    pub base_work: f64,
    /// Base score for personal mail.
    pub base_personal: f64,
    /// Base score for promotional mail.
    pub base_promotional: f64,
    /// Base score for spam-category mail.
    pub base_spam: f64,
    /// Base score for everything else.
    pub base_other: f64,
    /// Points per unit of urgency weight.
    pub urgency_per_weight: f64,
    /// Cap on the urgency boost.
    pub urgency_cap: f64,
    /// Boost when the message asks something of the reader.
    pub request_boost: f64,
    /// Boost for negative or mixed work/personal mail.
    pub negative_boost: f64,
    /// Boost for replies in an ongoing thread.
    pub reply_boost: f64,
    /// Boost for a message received at the reference instant.
    pub recency_boost: f64,
    /// Hours after which the recency boost halves.
    pub recency_halflife_hours: f64,
    /// Penalty for automated or broadcast senders.
    pub automated_penalty: f64,
    /// Points removed at spam probability 1.0.
    pub spam_penalty: f64,
    /// At or above this spam probability the score is forced to `floor`.
    pub spam_probability_high_threshold: f64,
    /// Below this spam probability a message may need a response.
    pub spam_probability_low_threshold: f64,
    /// Minimum priority score.
    pub floor: u8,
    /// Scores at or above this are in the high band.
    pub high_band: u8,
    /// Scores at or above this are in the medium band.
    pub medium_band: u8,
}

impl Default for PriorityWeights {
    fn default() -> Self {
        Self {
            base_work: 50.0,
            base_personal: 40.0,
            base_promotional: 15.0,
            base_spam: 0.0,
            base_other: 25.0,
            urgency_per_weight: 8.0,
            urgency_cap: 20.0,
            request_boost: 10.0,
            negative_boost: 12.0,
            reply_boost: 5.0,
            recency_boost: 15.0,
            recency_halflife_hours: 24.0,
            automated_penalty: 15.0,
            spam_penalty: 40.0,
            spam_probability_high_threshold: 0.8,
            spam_probability_low_threshold: 0.3,
            floor: 0,
            high_band: 70,
            medium_band: 40,
        }
    }
}

/// Response templates. `{name}` and `{subject}` are substituted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseTemplates {
    /// Whether suggestions carry filled template text.
    pub fill_templates: bool,
    /// Template for acknowledging a message.
    pub acknowledge: String,
    /// Template for proposing a meeting time.
    pub schedule: String,
    /// Template for escalating an urgent problem.
    pub escalate: String,
    /// Template for politely declining.
    pub decline: String,
}

impl Default for ResponseTemplates {
    fn default() -> Self {
        Self {
            fill_templates: true,
            acknowledge: "Hi {name},\n\nThanks for your message about \"{subject}\". \
                          I've got it and will follow up shortly."
                .to_string(),
            schedule: "Hi {name},\n\nHappy to find a time to discuss \"{subject}\". \
                       Could you share a few slots that work for you?"
                .to_string(),
            escalate: "Hi {name},\n\nI've seen your note about \"{subject}\" and I'm \
                       treating it as a priority. I'll get back to you today."
                .to_string(),
            decline: "Hi {name},\n\nThanks for reaching out about \"{subject}\". \
                      I'm not able to take this on right now."
                .to_string(),
        }
    }
}

/// Mailbox-level insight rules and overload bands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightThresholds {
    /// Width of the peak activity window in hours.
    pub peak_window_hours: u8,
    /// Share of mail in the peak window that triggers a batching hint.
    pub batching_share: f64,
    /// Average unread spam probability that triggers a filter hint.
    pub filter_spam_threshold: f64,
    /// Unread share that triggers a backlog hint.
    pub unread_ratio_threshold: f64,
    /// Age in days after which unread mail counts as old.
    pub old_unread_days: i64,
    /// Old unread count that triggers an archive hint.
    pub old_unread_count: u32,
    /// Share of all mail from one sender that triggers a sender-rule hint.
    pub dominant_sender_share: f64,
    /// Minimum messages from one sender before that hint applies.
    pub dominant_sender_min_messages: u32,
    /// Reply latency p90 (hours) that triggers a response-time hint.
    pub slow_reply_hours: f64,
    /// Hours a message must have existed before it counts for efficiency.
    pub efficiency_min_age_hours: f64,
    /// A read or reply within this many hours counts as efficient.
    pub efficiency_window_hours: f64,
    /// Unread count for a moderate volume factor.
    pub unread_moderate: u32,
    /// Unread count for a high volume factor.
    pub unread_high: u32,
    /// Average unread priority for a moderate factor.
    pub avg_priority_moderate: f64,
    /// Average unread priority for a high factor.
    pub avg_priority_high: f64,
    /// Latency p90 (hours) for a moderate factor.
    pub latency_moderate_hours: f64,
    /// Latency p90 (hours) for a high factor.
    pub latency_high_hours: f64,
    /// Messages per day for a moderate factor.
    pub daily_volume_moderate: f64,
    /// Messages per day for a high factor.
    pub daily_volume_high: f64,
    /// Total factor points for a moderate verdict.
    pub risk_moderate_points: u32,
    /// Total factor points for a high verdict.
    pub risk_high_points: u32,
    /// Reading speed used for reading-time estimates.
    pub words_per_minute: u32,
    /// Minimum reading time per message, in seconds.
    pub min_reading_secs: u32,
}

impl Default for InsightThresholds {
    fn default() -> Self {
        Self {
            peak_window_hours: 2,
            batching_share: 0.4,
            filter_spam_threshold: 0.4,
            unread_ratio_threshold: 0.3,
            old_unread_days: 7,
            old_unread_count: 5,
            dominant_sender_share: 0.25,
            dominant_sender_min_messages: 5,
            slow_reply_hours: 24.0,
            efficiency_min_age_hours: 1.0,
            efficiency_window_hours: 24.0,
            unread_moderate: 20,
            unread_high: 50,
            avg_priority_moderate: 50.0,
            avg_priority_high: 70.0,
            latency_moderate_hours: 24.0,
            latency_high_hours: 72.0,
            daily_volume_moderate: 20.0,
            daily_volume_high: 50.0,
            risk_moderate_points: 2,
            risk_high_points: 4,
            words_per_minute: 200,
            min_reading_secs: 30,
        }
    }
}
