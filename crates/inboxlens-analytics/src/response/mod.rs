//! Reply suggestions for messages that need a response.
//!
//! The advisor only speaks up when the priority scorer set
//! `needs_response`. Strategy comes from a small decision table over the
//! priority band, sentiment and scheduling vocabulary:
//!
//! | Condition                               | Strategy      |
//! |-----------------------------------------|---------------|
//! | high band and negative or mixed         | `escalate`    |
//! | mentions meetings or availability       | `schedule`    |
//! | low band                                | `decline`     |
//! | anything else                           | `acknowledge` |

mod advisor;
mod model;

pub use advisor::ResponseAdvisor;
pub use model::{ResponseStrategy, ResponseSuggestion};
