//! Message source contract.
//!
//! Anything that can produce [`NormalizedMessage`] records can feed the
//! engine: a provider client, a local cache, a test fixture. The engine only
//! depends on this trait, never on a concrete provider.

use super::model::{LabelTransition, MailboxSnapshot, NormalizedMessage};

/// A provider of normalized messages.
pub trait MessageSource {
    /// Error produced when the source cannot deliver its messages.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns every message in the source, in any order.
    ///
    /// # Errors
    ///
    /// Returns the source's own error if messages cannot be produced.
    fn messages(&self) -> Result<Vec<NormalizedMessage>, Self::Error>;

    /// Returns read/reply transitions, if the source tracks them.
    ///
    /// # Errors
    ///
    /// Returns the source's own error if transitions cannot be produced.
    fn transitions(&self) -> Result<Vec<LabelTransition>, Self::Error> {
        Ok(Vec::new())
    }
}

impl MessageSource for MailboxSnapshot {
    type Error = std::convert::Infallible;

    fn messages(&self) -> Result<Vec<NormalizedMessage>, Self::Error> {
        Ok(self.messages.clone())
    }

    fn transitions(&self) -> Result<Vec<LabelTransition>, Self::Error> {
        Ok(self.transitions.clone())
    }
}

impl MessageSource for [NormalizedMessage] {
    type Error = std::convert::Infallible;

    fn messages(&self) -> Result<Vec<NormalizedMessage>, Self::Error> {
        Ok(self.to_vec())
    }
}

impl MessageSource for Vec<NormalizedMessage> {
    type Error = std::convert::Infallible;

    fn messages(&self) -> Result<Vec<NormalizedMessage>, Self::Error> {
        Ok(self.clone())
    }
}

/// Collects a source into a snapshot.
///
/// # Errors
///
/// Returns [`crate::Error::Source`] if the source fails.
pub fn snapshot_from<S>(source: &S) -> crate::Result<MailboxSnapshot>
where
    S: MessageSource + ?Sized,
{
    let messages = source
        .messages()
        .map_err(|e| crate::Error::Source(Box::new(e)))?;
    let transitions = source
        .transitions()
        .map_err(|e| crate::Error::Source(Box::new(e)))?;
    Ok(MailboxSnapshot {
        messages,
        transitions,
    })
}
