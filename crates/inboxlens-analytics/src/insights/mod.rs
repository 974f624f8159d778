//! Mailbox insights: ranked recommendations and an overload verdict.
//!
//! Rules read [`crate::patterns::PatternStats`] only, so the same
//! statistics always yield the same advice.

mod engine;
mod model;
mod overload;

pub use engine::InsightEngine;
pub use model::{
    ALL_CLEAR_TEXT, MailboxInsights, OverloadAssessment, OverloadRisk, Recommendation,
    RecommendationKind, RiskFactor, RiskFactorKind,
};
pub use overload::assess_overload;
