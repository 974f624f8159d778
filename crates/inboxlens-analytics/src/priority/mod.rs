//! Priority scoring and the needs-response decision.
//!
//! Priority is a weighted combination of category base weight, urgency,
//! direct requests, tone, thread position and recency, minus penalties for
//! broadcast senders and spam likelihood. Every weight lives in
//! [`crate::config::PriorityWeights`].

mod model;
mod scorer;

pub use model::{MessageMeta, PriorityBand, PriorityScore};
pub use scorer::PriorityScorer;
