//! Normalized message records and the source contract that produces them.

mod model;
mod source;

pub use model::{
    LABEL_STARRED, LABEL_UNREAD, LabelTransition, MailboxSnapshot, NormalizedMessage,
    TransitionKind, validate_ids,
};
pub use source::{MessageSource, snapshot_from};
