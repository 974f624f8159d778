//! Priority data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::PriorityWeights;
use crate::features::FeatureSet;

/// Coarse priority band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityBand {
    /// Can wait or be skipped.
    Low,
    /// Worth reading today.
    Medium,
    /// Needs attention first.
    High,
}

impl PriorityBand {
    /// Band of a score under the given weights.
    #[must_use]
    pub const fn of(score: u8, weights: &PriorityWeights) -> Self {
        if score >= weights.high_band {
            Self::High
        } else if score >= weights.medium_band {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Convert to string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Message metadata the priority scorer needs beyond classification.
#[derive(Debug, Clone, Copy)]
pub struct MessageMeta<'a> {
    /// Extracted features.
    pub features: &'a FeatureSet,
    /// When the message arrived, if known.
    pub received: Option<DateTime<Utc>>,
    /// Reference instant for recency.
    pub as_of: DateTime<Utc>,
}

/// Priority verdict for one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityScore {
    /// Score on a 0-100 scale.
    pub score: u8,
    /// Band of the score.
    pub band: PriorityBand,
    /// Whether the reader is expected to reply.
    pub needs_response: bool,
}
