//! Feature data models.

use serde::{Deserialize, Serialize};

/// Occurrences of one lexicon in a message.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Hits {
    /// Number of term occurrences.
    pub count: u32,
    /// Sum of the weights of every occurrence.
    pub weight: f64,
}

impl Hits {
    /// Creates hits with a count and total weight.
    #[must_use]
    pub const fn new(count: u32, weight: f64) -> Self {
        Self { count, weight }
    }

    /// Record `occurrences` of a term with the given weight.
    pub fn record(&mut self, occurrences: u32, weight: f64) {
        if occurrences > 0 {
            self.count = self.count.saturating_add(occurrences);
            self.weight = f64::from(occurrences).mul_add(weight, self.weight);
        }
    }

    /// Combine two hit tallies.
    #[must_use]
    pub fn combined(self, other: Self) -> Self {
        Self {
            count: self.count.saturating_add(other.count),
            weight: self.weight + other.weight,
        }
    }

    /// Check if nothing matched.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Coarse message length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthBucket {
    /// No words.
    #[default]
    Empty,
    /// Up to 50 words.
    Short,
    /// Up to 300 words.
    Medium,
    /// More than 300 words.
    Long,
}

impl LengthBucket {
    /// Bucket for a word count.
    #[must_use]
    pub const fn from_word_count(words: u32) -> Self {
        match words {
            0 => Self::Empty,
            1..=50 => Self::Short,
            51..=300 => Self::Medium,
            _ => Self::Long,
        }
    }
}

/// Surface markers that make a message read as urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyIndicator {
    /// Mentions a due date or deadline.
    DeadlineMention,
    /// Uses time-pressure language.
    TimePressure,
    /// Explicitly asks for action.
    ActionRequired,
    /// Shouts in capitals.
    CapsEmphasis,
    /// Stacks exclamation marks.
    MultipleExclamations,
}

impl UrgencyIndicator {
    /// Convert to string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DeadlineMention => "deadline_mention",
            Self::TimePressure => "time_pressure",
            Self::ActionRequired => "action_required",
            Self::CapsEmphasis => "caps_emphasis",
            Self::MultipleExclamations => "multiple_exclamations",
        }
    }
}

/// Exclamation marks in one message that count as stacking.
const MULTIPLE_EXCLAMATIONS: u32 = 3;

/// Primitive signals derived from one message.
///
/// Computed once per message and shared read-only by every classifier.
/// A message with no subject, body or sender yields `FeatureSet::default()`.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureSet {
    /// Business vocabulary.
    pub work: Hits,
    /// Personal vocabulary.
    pub personal: Hits,
    /// Marketing vocabulary.
    pub promotional: Hits,
    /// Known spam phrases.
    pub spam_phrases: Hits,
    /// Deadline mentions.
    pub deadline: Hits,
    /// Time-pressure words.
    pub time_pressure: Hits,
    /// Explicit calls to action.
    pub action_required: Hits,
    /// Positive sentiment words.
    pub positive: Hits,
    /// Negative sentiment words.
    pub negative: Hits,
    /// Unsubscribe markers.
    pub unsubscribe: Hits,
    /// Automated-mail markers.
    pub automation: Hits,
    /// Direct requests.
    pub request: Hits,
    /// Meeting and calendar vocabulary.
    pub scheduling: Hits,
    /// Word tokens in subject and body, links excluded.
    pub word_count: u32,
    /// Share of alphabetic characters that are uppercase.
    pub uppercase_ratio: f64,
    /// All-caps words of five or more letters.
    pub shouted_words: u32,
    /// `!` characters.
    pub exclamation_count: u32,
    /// Runs of two or more `!`.
    pub exclamation_runs: u32,
    /// `?` characters.
    pub question_count: u32,
    /// Links in the body or subject.
    pub link_count: u32,
    /// Coarse length.
    pub length_bucket: LengthBucket,
    /// Sender matches an automated or broadcast pattern.
    pub automated_sender: bool,
    /// Sender address or domain looks suspicious.
    pub suspicious_sender: bool,
    /// Subject marks a reply in an existing thread.
    pub is_reply: bool,
    /// Subject marks a forward.
    pub is_forward: bool,
    /// Most frequent non-stopword terms, most frequent first.
    pub key_topics: Vec<String>,
}

impl FeatureSet {
    /// All urgency signals combined.
    #[must_use]
    pub fn urgency(&self) -> Hits {
        self.deadline
            .combined(self.time_pressure)
            .combined(self.action_required)
    }

    /// Urgency markers present, in declaration order.
    #[must_use]
    pub fn urgency_indicators(&self) -> Vec<UrgencyIndicator> {
        [
            (UrgencyIndicator::DeadlineMention, !self.deadline.is_empty()),
            (UrgencyIndicator::TimePressure, !self.time_pressure.is_empty()),
            (UrgencyIndicator::ActionRequired, !self.action_required.is_empty()),
            (UrgencyIndicator::CapsEmphasis, self.shouted_words > 0),
            (
                UrgencyIndicator::MultipleExclamations,
                self.exclamation_runs > 0 || self.exclamation_count >= MULTIPLE_EXCLAMATIONS,
            ),
        ]
        .into_iter()
        .filter_map(|(indicator, present)| present.then_some(indicator))
        .collect()
    }

    /// Check if any urgency marker is present.
    #[must_use]
    pub fn has_urgency(&self) -> bool {
        !self.urgency().is_empty()
    }

    /// Check if the message asks something of the reader.
    #[must_use]
    pub const fn has_request_cue(&self) -> bool {
        self.request.count > 0 || self.question_count > 0
    }

    /// Check if the message comes from a broadcast or automated source.
    #[must_use]
    pub const fn is_broadcast(&self) -> bool {
        self.automated_sender || self.automation.count > 0
    }

    /// Exclamation marks per word.
    #[must_use]
    pub fn exclamation_density(&self) -> f64 {
        f64::from(self.exclamation_count) / f64::from(self.word_count.max(1))
    }

    /// Marketing weight (vocabulary plus unsubscribe markers) per word.
    #[must_use]
    pub fn promotional_density(&self) -> f64 {
        (self.promotional.weight + self.unsubscribe.weight) / f64::from(self.word_count.max(1))
    }

    /// Check if no signal at all was extracted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
