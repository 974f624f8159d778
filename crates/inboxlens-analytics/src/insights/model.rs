//! Insight and recommendation models.

use serde::{Deserialize, Serialize};

use crate::patterns::PatternStats;

/// Fallback text when no rule fires.
pub const ALL_CLEAR_TEXT: &str = "Your email management looks good!";

/// Kind of recommendation, in tie-break order (earlier wins).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    /// Handle high-priority unread mail first.
    PriorityFocus,
    /// Mail volume is unsustainable.
    Overload,
    /// Too much unread mail looks like spam.
    FilterTuning,
    /// Replies take too long.
    ResponseTime,
    /// Too much mail is unread.
    UnreadBacklog,
    /// Old unread mail is piling up.
    OldUnread,
    /// Mail arrives in a concentrated window.
    Batching,
    /// One sender dominates the mailbox.
    SenderRule,
    /// Nothing to improve.
    AllClear,
}

impl RecommendationKind {
    /// Convert to string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PriorityFocus => "priority_focus",
            Self::Overload => "overload",
            Self::FilterTuning => "filter_tuning",
            Self::ResponseTime => "response_time",
            Self::UnreadBacklog => "unread_backlog",
            Self::OldUnread => "old_unread",
            Self::Batching => "batching",
            Self::SenderRule => "sender_rule",
            Self::AllClear => "all_clear",
        }
    }
}

/// One actionable finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// What kind of finding this is.
    pub kind: RecommendationKind,
    /// How far past its threshold the finding is; 1.0 means just over.
    pub magnitude: f64,
    /// Human-readable advice.
    pub text: String,
}

/// Overall overload risk.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum OverloadRisk {
    /// Manageable.
    #[default]
    Low,
    /// Starting to slip.
    Moderate,
    /// Unsustainable.
    High,
}

impl OverloadRisk {
    /// Convert to string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
        }
    }

    /// Points this level adds to the overload total.
    #[must_use]
    pub const fn points(&self) -> u32 {
        match self {
            Self::Low => 0,
            Self::Moderate => 1,
            Self::High => 2,
        }
    }
}

/// Signal that feeds the overload verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactorKind {
    /// Number of unread messages.
    UnreadVolume,
    /// Average priority of unread messages.
    UnreadPriority,
    /// 90th percentile reply (or read) latency.
    ResponseLatency,
    /// Messages received per day.
    DailyVolume,
}

impl RiskFactorKind {
    /// Convert to string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UnreadVolume => "unread_volume",
            Self::UnreadPriority => "unread_priority",
            Self::ResponseLatency => "response_latency",
            Self::DailyVolume => "daily_volume",
        }
    }
}

/// A factor that pushed the overload verdict up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    /// Which signal.
    pub kind: RiskFactorKind,
    /// Level the signal reached.
    pub level: OverloadRisk,
    /// Observed value of the signal.
    pub value: f64,
}

/// Overload verdict with its contributing factors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverloadAssessment {
    /// Overall risk.
    pub risk: OverloadRisk,
    /// Sum of factor points.
    pub points: u32,
    /// Factors above the low level.
    pub factors: Vec<RiskFactor>,
}

/// Everything learned about a mailbox in one batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MailboxInsights {
    /// Aggregate statistics.
    pub patterns: PatternStats,
    /// Ranked recommendations, never empty.
    pub recommendations: Vec<Recommendation>,
    /// Overload verdict.
    pub overload: OverloadAssessment,
    /// Messages that still need a response.
    pub pending_responses: u32,
}

impl MailboxInsights {
    /// Recommendation texts in rank order.
    #[must_use]
    pub fn recommendation_texts(&self) -> Vec<&str> {
        self.recommendations.iter().map(|r| r.text.as_str()).collect()
    }

    /// Check whether a recommendation of the given kind was made.
    #[must_use]
    pub fn recommends(&self, kind: RecommendationKind) -> bool {
        self.recommendations.iter().any(|r| r.kind == kind)
    }

    /// Check if nothing needs attention.
    #[must_use]
    pub fn is_all_clear(&self) -> bool {
        self.recommends(RecommendationKind::AllClear)
    }
}
