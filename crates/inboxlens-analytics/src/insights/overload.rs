//! Overload risk scoring.

use super::model::{OverloadAssessment, OverloadRisk, RiskFactor, RiskFactorKind};
use crate::config::InsightThresholds;
use crate::patterns::PatternStats;

/// Score overload risk from mailbox statistics.
///
/// Each factor earns points for reaching its moderate or high band. The
/// point total is then compared against the risk bands.
#[must_use]
pub fn assess_overload(stats: &PatternStats, thresholds: &InsightThresholds) -> OverloadAssessment {
    let t = thresholds;
    let mut candidates = vec![
        (
            RiskFactorKind::UnreadVolume,
            f64::from(stats.unread_messages),
            f64::from(t.unread_moderate),
            f64::from(t.unread_high),
        ),
        (
            RiskFactorKind::DailyVolume,
            stats.messages_per_day,
            t.daily_volume_moderate,
            t.daily_volume_high,
        ),
    ];
    if stats.unread_messages > 0 {
        candidates.push((
            RiskFactorKind::UnreadPriority,
            stats.average_unread_priority,
            t.avg_priority_moderate,
            t.avg_priority_high,
        ));
    }
    if let Some(latency) = stats.reply_latency.as_ref().or(stats.read_latency.as_ref()) {
        candidates.push((
            RiskFactorKind::ResponseLatency,
            latency.p90_hours,
            t.latency_moderate_hours,
            t.latency_high_hours,
        ));
    }

    let mut factors: Vec<RiskFactor> = candidates
        .into_iter()
        .filter_map(|(kind, value, moderate, high)| {
            let level = level(value, moderate, high);
            (level > OverloadRisk::Low).then_some(RiskFactor { kind, level, value })
        })
        .collect();
    factors.sort_by(|a, b| b.level.cmp(&a.level).then_with(|| a.kind.cmp(&b.kind)));

    let points = factors.iter().map(|f| f.level.points()).sum();
    let risk = if points >= t.risk_high_points {
        OverloadRisk::High
    } else if points >= t.risk_moderate_points {
        OverloadRisk::Moderate
    } else {
        OverloadRisk::Low
    };

    OverloadAssessment {
        risk,
        points,
        factors,
    }
}

fn level(value: f64, moderate: f64, high: f64) -> OverloadRisk {
    if value >= high {
        OverloadRisk::High
    } else if value >= moderate {
        OverloadRisk::Moderate
    } else {
        OverloadRisk::Low
    }
}
