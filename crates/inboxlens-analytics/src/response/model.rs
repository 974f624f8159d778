//! Response suggestion models.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How the reader should answer a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStrategy {
    /// Confirm receipt and follow up later.
    Acknowledge,
    /// Propose a meeting time.
    Schedule,
    /// Treat as an urgent problem.
    Escalate,
    /// Politely turn the request down.
    Decline,
}

impl ResponseStrategy {
    /// Convert to string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Acknowledge => "acknowledge",
            Self::Schedule => "schedule",
            Self::Escalate => "escalate",
            Self::Decline => "decline",
        }
    }
}

impl fmt::Display for ResponseStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Suggested reply for a message that needs one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseSuggestion {
    /// Strategy tag.
    pub strategy: ResponseStrategy,
    /// Filled template text, when templates are enabled.
    pub template: Option<String>,
}
