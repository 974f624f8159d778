//! Pattern statistics models.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::classify::{Category, SentimentLabel};

/// Hours in a day.
pub const HOURS_PER_DAY: usize = 24;
/// Days in a week.
pub const DAYS_PER_WEEK: usize = 7;

/// Per-sender activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SenderStats {
    /// Messages from this sender.
    pub messages: u32,
    /// Mean priority score of those messages.
    pub average_priority: f64,
}

/// The busiest run of consecutive hours, wrapping past midnight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeakWindow {
    /// First hour of the window (UTC, 0-23).
    pub start_hour: u8,
    /// Width of the window in hours.
    pub hours: u8,
    /// Dated messages that arrived inside the window.
    pub messages: u32,
    /// Share of dated messages inside the window.
    pub share: f64,
}

impl PeakWindow {
    /// Hour right after the window closes (UTC, 0-23).
    #[must_use]
    pub const fn end_hour(&self) -> u8 {
        (self.start_hour + self.hours) % 24
    }
}

/// Summary of a latency distribution, in hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatencyStats {
    /// Number of observed latencies.
    pub samples: u32,
    /// Arithmetic mean.
    pub mean_hours: f64,
    /// Median (nearest rank).
    pub p50_hours: f64,
    /// 90th percentile (nearest rank).
    pub p90_hours: f64,
    /// Slowest observed latency.
    pub max_hours: f64,
}

/// Sentiment mix of one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentTrend {
    /// Messages counted.
    pub messages: u32,
    /// Messages per sentiment label.
    pub labels: BTreeMap<SentimentLabel, u32>,
    /// Average polarity in `[0, 1]`: 0 all negative, 1 all positive.
    pub score: f64,
}

/// Aggregate behaviour of a mailbox over one batch.
///
/// Hour and weekday histograms are bucketed in UTC. Latency distributions
/// are `None` when no transition data was supplied for any message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternStats {
    /// Messages analyzed.
    pub total_messages: u32,
    /// Messages carrying the unread label.
    pub unread_messages: u32,
    /// Messages without a timestamp.
    pub undated_messages: u32,
    /// Activity per sender address.
    pub senders: BTreeMap<String, SenderStats>,
    /// Dated messages per hour of day.
    pub hourly: [u32; HOURS_PER_DAY],
    /// Dated messages per weekday, Monday first.
    pub weekday: [u32; DAYS_PER_WEEK],
    /// Busiest window of consecutive hours.
    pub peak_window: Option<PeakWindow>,
    /// Messages per category.
    pub categories: BTreeMap<Category, u32>,
    /// Sentiment mix per category.
    pub sentiment_trend: BTreeMap<Category, SentimentTrend>,
    /// Delay between arrival and first read.
    pub read_latency: Option<LatencyStats>,
    /// Delay between arrival and first reply.
    pub reply_latency: Option<LatencyStats>,
    /// Unread messages in the high priority band.
    pub high_priority_unread: u32,
    /// Unread messages older than the configured age.
    pub old_unread: u32,
    /// Mean spam probability of unread messages.
    pub average_unread_spam: f64,
    /// Mean priority score of unread messages.
    pub average_unread_priority: f64,
    /// Days between the oldest and newest dated message.
    pub span_days: f64,
    /// Dated messages per day over the observed span (at least one day).
    pub messages_per_day: f64,
    /// Share of actionable messages handled within the response window.
    pub response_efficiency: f64,
    /// Estimated time to read everything, in seconds.
    pub total_reading_secs: u64,
}

impl PatternStats {
    /// Share of messages still unread.
    #[must_use]
    pub fn unread_ratio(&self) -> f64 {
        if self.total_messages == 0 {
            0.0
        } else {
            f64::from(self.unread_messages) / f64::from(self.total_messages)
        }
    }

    /// Most active senders, busiest first, ties by address.
    #[must_use]
    pub fn top_senders(&self, limit: usize) -> Vec<(&str, &SenderStats)> {
        let mut ranked: Vec<(&str, &SenderStats)> = self
            .senders
            .iter()
            .map(|(address, stats)| (address.as_str(), stats))
            .collect();
        ranked.sort_by(|a, b| b.1.messages.cmp(&a.1.messages).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(limit);
        ranked
    }

    /// Messages in one category.
    #[must_use]
    pub fn category_count(&self, category: Category) -> u32 {
        self.categories.get(&category).copied().unwrap_or_default()
    }
}
