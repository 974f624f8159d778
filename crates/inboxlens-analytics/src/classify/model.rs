//! Classification data models.

use serde::{Deserialize, Serialize};

use crate::Error;

/// Message category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Business correspondence.
    Work,
    /// Family, friends, personal life.
    Personal,
    /// Marketing and newsletters.
    Promotional,
    /// Unsolicited junk.
    Spam,
    /// Nothing scored high enough.
    Other,
}

impl Category {
    /// Every category in tie-break order, highest precedence first.
    pub const PRECEDENCE: [Self; 5] = [
        Self::Work,
        Self::Personal,
        Self::Promotional,
        Self::Spam,
        Self::Other,
    ];

    /// Position in [`Self::PRECEDENCE`]; lower wins ties.
    #[must_use]
    pub const fn precedence(&self) -> u8 {
        match self {
            Self::Work => 0,
            Self::Personal => 1,
            Self::Promotional => 2,
            Self::Spam => 3,
            Self::Other => 4,
        }
    }

    /// Convert to string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Personal => "personal",
            Self::Promotional => "promotional",
            Self::Spam => "spam",
            Self::Other => "other",
        }
    }

    /// Check if mail in this category comes from people the reader deals with.
    #[must_use]
    pub const fn is_conversational(&self) -> bool {
        matches!(self, Self::Work | Self::Personal)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::PRECEDENCE
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownLabel {
                kind: "category",
                value: s.to_string(),
            })
    }
}

/// Sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentLabel {
    /// Predominantly positive wording.
    Positive,
    /// No clear polarity.
    Neutral,
    /// Predominantly negative wording.
    Negative,
    /// Strong positive and negative wording together.
    Mixed,
}

impl SentimentLabel {
    /// Convert to string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
            Self::Mixed => "mixed",
        }
    }

    /// Integer polarity used for trend averages: 2 positive, 1 neutral or
    /// mixed, 0 negative.
    #[must_use]
    pub const fn trend_points(&self) -> u32 {
        match self {
            Self::Positive => 2,
            Self::Neutral | Self::Mixed => 1,
            Self::Negative => 0,
        }
    }

    /// Check if the wording carries negative tone.
    #[must_use]
    pub const fn is_troubled(&self) -> bool {
        matches!(self, Self::Negative | Self::Mixed)
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SentimentLabel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::Positive, Self::Neutral, Self::Negative, Self::Mixed]
            .into_iter()
            .find(|l| l.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownLabel {
                kind: "sentiment",
                value: s.to_string(),
            })
    }
}

/// Sentiment verdict for one message.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    /// Label.
    pub label: SentimentLabel,
    /// Confidence in `[0, 1]`.
    pub confidence: f64,
    /// Signed, length-normalized polarity score.
    pub score: f64,
}

/// Raw per-category scores, kept for explainability.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CategoryScores {
    /// Work score.
    pub work: f64,
    /// Personal score.
    pub personal: f64,
    /// Promotional score.
    pub promotional: f64,
    /// Spam score.
    pub spam: f64,
}

impl CategoryScores {
    /// Scores paired with their category, in precedence order.
    #[must_use]
    pub const fn ranked_inputs(&self) -> [(Category, f64); 4] {
        [
            (Category::Work, self.work),
            (Category::Personal, self.personal),
            (Category::Promotional, self.promotional),
            (Category::Spam, self.spam),
        ]
    }
}

/// Category verdict for one message.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryVerdict {
    /// Winning category.
    pub category: Category,
    /// Confidence in `[0, 1]`.
    pub confidence: f64,
    /// Every category's raw score.
    pub scores: CategoryScores,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_category_roundtrip() {
        for category in Category::PRECEDENCE {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn test_unknown_category_is_loud() {
        let err = "newsletter".parse::<Category>().unwrap_err();
        assert!(matches!(err, Error::UnknownLabel { kind: "category", .. }));
    }

    #[test]
    fn test_precedence_matches_order() {
        for (index, category) in Category::PRECEDENCE.iter().enumerate() {
            assert_eq!(usize::from(category.precedence()), index);
        }
    }

    #[test]
    fn test_sentiment_parse() {
        assert_eq!("Mixed".parse::<SentimentLabel>().unwrap(), SentimentLabel::Mixed);
        assert!("angry".parse::<SentimentLabel>().is_err());
    }
}
