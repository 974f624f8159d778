//! Error types for the analysis engine.

use thiserror::Error;

use crate::config::ConfigIssue;

/// Errors that can occur in engine operations.
///
/// Malformed message fields never produce an error; they degrade to neutral
/// feature values. Only batch preconditions, configuration problems and
/// internal failures are reported here.
#[derive(Debug, Error)]
pub enum Error {
    /// Two messages in one batch share the same id.
    #[error("Duplicate message id in batch: {0}")]
    DuplicateMessageId(String),

    /// A message in the batch has an empty id.
    #[error("Message at position {0} has an empty id")]
    EmptyMessageId(usize),

    /// An analysis result refers to a message that is not part of the batch.
    #[error("Analysis result refers to unknown message: {0}")]
    UnknownMessage(String),

    /// A label string does not name any known variant.
    #[error("Unknown {kind} label: {value}")]
    UnknownLabel {
        /// Which enumeration was being parsed.
        kind: &'static str,
        /// The offending input.
        value: String,
    },

    /// Configuration failed validation.
    #[error("Invalid configuration: {}", format_issues(.0))]
    InvalidConfig(Vec<ConfigIssue>),

    /// Configuration was written for a different schema version.
    #[error("Unsupported configuration version {found} (expected {expected})")]
    UnsupportedConfigVersion {
        /// Version found in the configuration.
        found: u32,
        /// Version this build understands.
        expected: u32,
    },

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// The message source failed to produce messages.
    #[error("Message source error: {0}")]
    Source(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A worker task panicked or was cancelled.
    #[error("Analysis worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),

    /// Internal invariant broken. Indicates a bug, not bad input.
    #[error("Internal inconsistency: {0}")]
    Internal(String),
}

impl Error {
    /// Returns true if this error reports a violated batch precondition.
    #[must_use]
    pub const fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::DuplicateMessageId(_) | Self::EmptyMessageId(_) | Self::UnknownMessage(_)
        )
    }

    /// Returns true if this error indicates a programming error.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Worker(_) | Self::Internal(_))
    }
}

fn format_issues(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(|issue| format!("{}: {}", issue.field(), issue.message()))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
