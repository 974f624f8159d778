//! Recommendation rules.

use std::fmt::Write as _;

use tracing::debug;

use super::model::{
    ALL_CLEAR_TEXT, MailboxInsights, OverloadRisk, Recommendation, RecommendationKind,
};
use super::overload::assess_overload;
use crate::config::InsightThresholds;
use crate::engine::AnalysisResult;
use crate::patterns::PatternStats;

/// Turns pattern statistics into ranked recommendations.
#[derive(Debug, Clone)]
pub struct InsightEngine {
    thresholds: InsightThresholds,
}

impl InsightEngine {
    /// Creates an engine with the given thresholds.
    #[must_use]
    pub const fn new(thresholds: InsightThresholds) -> Self {
        Self { thresholds }
    }

    /// Summarize a batch.
    ///
    /// Recommendations are ranked by magnitude, largest first, with ties
    /// broken by [`RecommendationKind`] order. When no rule fires the list
    /// holds a single all-clear entry.
    #[must_use]
    pub fn summarize(&self, stats: PatternStats, results: &[AnalysisResult]) -> MailboxInsights {
        let overload = assess_overload(&stats, &self.thresholds);
        let pending_responses =
            u32::try_from(results.iter().filter(|r| r.needs_response).count()).unwrap_or(u32::MAX);

        let mut recommendations = self.rules(&stats, overload.risk, overload.points, pending_responses);
        recommendations.sort_by(|a, b| {
            b.magnitude
                .total_cmp(&a.magnitude)
                .then_with(|| a.kind.cmp(&b.kind))
        });
        if recommendations.is_empty() {
            recommendations.push(Recommendation {
                kind: RecommendationKind::AllClear,
                magnitude: 0.0,
                text: ALL_CLEAR_TEXT.to_string(),
            });
        }

        debug!(
            recommendations = recommendations.len(),
            overload = overload.risk.as_str(),
            pending_responses,
            "Summarized mailbox"
        );

        MailboxInsights {
            patterns: stats,
            recommendations,
            overload,
            pending_responses,
        }
    }

    fn rules(
        &self,
        stats: &PatternStats,
        risk: OverloadRisk,
        points: u32,
        pending_responses: u32,
    ) -> Vec<Recommendation> {
        let t = &self.thresholds;
        let mut out = Vec::new();
        let mut push = |kind, magnitude, text: String| {
            out.push(Recommendation {
                kind,
                magnitude,
                text,
            });
        };

        if stats.high_priority_unread > 0 {
            push(
                RecommendationKind::PriorityFocus,
                1.0 + f64::from(stats.high_priority_unread),
                format!(
                    "Focus on {} high-priority unread messages first",
                    stats.high_priority_unread
                ),
            );
        }

        if risk == OverloadRisk::High {
            push(
                RecommendationKind::Overload,
                excess(f64::from(points), f64::from(t.risk_high_points)),
                "Set specific times for email processing to improve focus".to_string(),
            );
        }

        if stats.unread_messages > 0 && stats.average_unread_spam > t.filter_spam_threshold {
            push(
                RecommendationKind::FilterTuning,
                excess(stats.average_unread_spam, t.filter_spam_threshold),
                format!(
                    "Unread mail averages {:.0}% spam likelihood; consider using filters to reduce email volume",
                    stats.average_unread_spam * 100.0
                ),
            );
        }

        if let Some(latency) = &stats.reply_latency
            && latency.p90_hours > t.slow_reply_hours
        {
            let mut text = format!(
                "Replies often take over {:.0} hours; set aside time to answer waiting mail",
                latency.p90_hours
            );
            if pending_responses > 0 {
                let _ = write!(text, " ({pending_responses} still need a response)");
            }
            push(
                RecommendationKind::ResponseTime,
                excess(latency.p90_hours, t.slow_reply_hours),
                text,
            );
        }

        let unread_ratio = stats.unread_ratio();
        if unread_ratio > t.unread_ratio_threshold {
            push(
                RecommendationKind::UnreadBacklog,
                excess(unread_ratio, t.unread_ratio_threshold),
                "Consider batch processing emails to reduce unread backlog".to_string(),
            );
        }

        if stats.old_unread > t.old_unread_count {
            push(
                RecommendationKind::OldUnread,
                excess(f64::from(stats.old_unread), f64::from(t.old_unread_count)),
                "Archive or delete old unread messages to reduce clutter".to_string(),
            );
        }

        if let Some(peak) = &stats.peak_window
            && peak.share > t.batching_share
        {
            push(
                RecommendationKind::Batching,
                excess(peak.share, t.batching_share),
                format!(
                    "{:.0}% of mail arrives between {:02}:00 and {:02}:00 UTC; process email in batches around that window",
                    peak.share * 100.0,
                    peak.start_hour,
                    peak.end_hour()
                ),
            );
        }

        if let Some((address, sender)) = stats.top_senders(1).first()
            && stats.total_messages > 0
            && sender.messages >= t.dominant_sender_min_messages
        {
            let share = f64::from(sender.messages) / f64::from(stats.total_messages);
            if share >= t.dominant_sender_share {
                push(
                    RecommendationKind::SenderRule,
                    excess(share, t.dominant_sender_share),
                    format!(
                        "{address} sends {:.0}% of your mail; create a rule to sort it automatically",
                        share * 100.0
                    ),
                );
            }
        }

        out
    }
}

/// Observed value relative to its threshold.
fn excess(observed: f64, threshold: f64) -> f64 {
    if threshold > 0.0 {
        observed / threshold
    } else {
        1.0
    }
}
