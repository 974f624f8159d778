//! Message data models.

use std::collections::{BTreeSet, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Label carried by messages the recipient has not read yet.
pub const LABEL_UNREAD: &str = "UNREAD";
/// Label carried by starred messages.
pub const LABEL_STARRED: &str = "STARRED";

/// A provider-agnostic email record.
///
/// Produced by an external parser; the engine only reads it. Every field is
/// optional on the wire and defaults to empty, so partially filled records
/// still analyze.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizedMessage {
    /// Opaque identifier, unique within a mailbox snapshot.
    pub id: String,
    /// Sender, either a bare address or `Display Name <address>`.
    pub sender: String,
    /// Primary recipient.
    pub recipient: String,
    /// Subject line.
    pub subject: String,
    /// Plain-text body (multipart already reduced to text).
    pub body: String,
    /// When the message was received, if known.
    pub timestamp: Option<DateTime<Utc>>,
    /// Provider labels (`UNREAD`, `STARRED`, `INBOX`, ...).
    pub labels: BTreeSet<String>,
}

impl NormalizedMessage {
    /// Creates an empty message with the given id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Sets the sender.
    #[must_use]
    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = sender.into();
        self
    }

    /// Sets the recipient.
    #[must_use]
    pub fn with_recipient(mut self, recipient: impl Into<String>) -> Self {
        self.recipient = recipient.into();
        self
    }

    /// Sets the subject.
    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Sets the received timestamp.
    #[must_use]
    pub const fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Adds a label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.insert(label.into());
        self
    }

    /// Check if the message carries a label (case-insensitive).
    #[must_use]
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l.eq_ignore_ascii_case(label))
    }

    /// Check if the message is unread.
    #[must_use]
    pub fn is_unread(&self) -> bool {
        self.has_label(LABEL_UNREAD)
    }

    /// Check if the message is starred.
    #[must_use]
    pub fn is_starred(&self) -> bool {
        self.has_label(LABEL_STARRED)
    }

    /// Sender address, lowercased, without any display name.
    #[must_use]
    pub fn sender_address(&self) -> String {
        let sender = self.sender.trim();
        let address = match (sender.rfind('<'), sender.rfind('>')) {
            (Some(start), Some(end)) if start < end => &sender[start + 1..end],
            _ => sender,
        };
        address.trim().to_lowercase()
    }

    /// Display name from `Name <address>` form, if present.
    #[must_use]
    pub fn sender_display_name(&self) -> Option<&str> {
        let sender = self.sender.trim();
        let start = sender.find('<')?;
        let name = sender[..start].trim().trim_matches('"').trim();
        if name.is_empty() { None } else { Some(name) }
    }

    /// Domain part of the sender address.
    #[must_use]
    pub fn sender_domain(&self) -> Option<String> {
        let address = self.sender_address();
        let (_, domain) = address.rsplit_once('@')?;
        if domain.is_empty() {
            None
        } else {
            Some(domain.to_string())
        }
    }
}

/// Kind of state change observed on a message after delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    /// The message was marked read.
    Read,
    /// The recipient replied.
    Replied,
}

impl TransitionKind {
    /// Convert to string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Replied => "replied",
        }
    }
}

/// A timestamped read/reply transition, used for latency metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelTransition {
    /// Message the transition applies to.
    pub message_id: String,
    /// What happened.
    pub kind: TransitionKind,
    /// When it happened.
    pub at: DateTime<Utc>,
}

impl LabelTransition {
    /// Creates a new transition.
    #[must_use]
    pub fn new(message_id: impl Into<String>, kind: TransitionKind, at: DateTime<Utc>) -> Self {
        Self {
            message_id: message_id.into(),
            kind,
            at,
        }
    }
}

/// A finite collection of messages analyzed as one batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MailboxSnapshot {
    /// Messages in any order.
    pub messages: Vec<NormalizedMessage>,
    /// Optional read/reply transitions.
    pub transitions: Vec<LabelTransition>,
}

impl MailboxSnapshot {
    /// Creates a snapshot without transition data.
    #[must_use]
    pub const fn new(messages: Vec<NormalizedMessage>) -> Self {
        Self {
            messages,
            transitions: Vec::new(),
        }
    }

    /// Attaches transition data.
    #[must_use]
    pub fn with_transitions(mut self, transitions: Vec<LabelTransition>) -> Self {
        self.transitions = transitions;
        self
    }

    /// Check the structural preconditions of a batch.
    ///
    /// # Errors
    ///
    /// Returns an error if a message id is empty or appears more than once.
    pub fn validate(&self) -> Result<()> {
        validate_ids(&self.messages)
    }
}

/// Check that every message has a non-empty id and no id repeats.
///
/// # Errors
///
/// Returns [`Error::EmptyMessageId`] or [`Error::DuplicateMessageId`] for the
/// first offending message.
pub fn validate_ids(messages: &[NormalizedMessage]) -> Result<()> {
    let mut seen = HashSet::with_capacity(messages.len());
    for (position, message) in messages.iter().enumerate() {
        if message.id.trim().is_empty() {
            return Err(Error::EmptyMessageId(position));
        }
        if !seen.insert(message.id.as_str()) {
            return Err(Error::DuplicateMessageId(message.id.clone()));
        }
    }
    Ok(())
}
