//! Mergeable pattern accumulator.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Timelike, Utc};

use super::model::{
    DAYS_PER_WEEK, HOURS_PER_DAY, LatencyStats, PatternStats, PeakWindow, SenderStats,
    SentimentTrend,
};
use super::timeline::Timeline;
use crate::classify::{Category, SentimentLabel};
use crate::engine::AnalysisResult;
use crate::message::NormalizedMessage;
use crate::{Error, Result};

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Parameters every partial accumulator of one run must share.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatternSettings {
    /// Reference instant for ages.
    pub as_of: DateTime<Utc>,
    /// Width of the peak activity window.
    pub peak_window_hours: u8,
    /// Days after which unread mail counts as old.
    pub old_unread_days: i64,
    /// Minimum age for a message to count toward response efficiency.
    pub efficiency_min_age_hours: f64,
    /// Window within which an actionable message counts as handled.
    pub efficiency_window_hours: f64,
}

#[derive(Debug, Clone, Default)]
struct SenderTally {
    messages: u32,
    priority_total: u64,
}

#[derive(Debug, Clone, Default)]
struct SentimentTally {
    messages: u32,
    points: u64,
    labels: BTreeMap<SentimentLabel, u32>,
}

/// Partial pattern statistics.
///
/// `merge` is associative and commutative: any split of a batch into
/// partials, merged in any order, finishes to the same [`PatternStats`].
/// Floating-point inputs are kept as samples and summed in sorted order at
/// [`finish`](Self::finish).
#[derive(Debug, Clone)]
pub struct PatternAccumulator {
    settings: PatternSettings,
    total: u32,
    unread: u32,
    undated: u32,
    senders: BTreeMap<String, SenderTally>,
    hourly: [u32; HOURS_PER_DAY],
    weekday: [u32; DAYS_PER_WEEK],
    categories: BTreeMap<Category, u32>,
    sentiment: BTreeMap<Category, SentimentTally>,
    read_latencies: Vec<i64>,
    reply_latencies: Vec<i64>,
    high_priority_unread: u32,
    old_unread: u32,
    unread_spam: Vec<f64>,
    unread_priority_total: u64,
    earliest: Option<DateTime<Utc>>,
    latest: Option<DateTime<Utc>>,
    actionable: u32,
    handled: u32,
    reading_secs: u64,
}

impl PatternAccumulator {
    /// Creates an empty accumulator.
    #[must_use]
    pub const fn new(settings: PatternSettings) -> Self {
        Self {
            settings,
            total: 0,
            unread: 0,
            undated: 0,
            senders: BTreeMap::new(),
            hourly: [0; HOURS_PER_DAY],
            weekday: [0; DAYS_PER_WEEK],
            categories: BTreeMap::new(),
            sentiment: BTreeMap::new(),
            read_latencies: Vec::new(),
            reply_latencies: Vec::new(),
            high_priority_unread: 0,
            old_unread: 0,
            unread_spam: Vec::new(),
            unread_priority_total: 0,
            earliest: None,
            latest: None,
            actionable: 0,
            handled: 0,
            reading_secs: 0,
        }
    }

    /// Settings this accumulator was created with.
    #[must_use]
    pub const fn settings(&self) -> &PatternSettings {
        &self.settings
    }

    /// Number of messages added so far.
    #[must_use]
    pub const fn len(&self) -> u32 {
        self.total
    }

    /// Check if nothing was added.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Fold one analyzed message into the statistics.
    pub fn add(&mut self, message: &NormalizedMessage, result: &AnalysisResult, timeline: Timeline) {
        self.total += 1;
        self.reading_secs += u64::from(result.reading_time_secs);
        *self.categories.entry(result.category).or_default() += 1;

        let trend = self.sentiment.entry(result.category).or_default();
        trend.messages += 1;
        trend.points += u64::from(result.sentiment.label.trend_points());
        *trend.labels.entry(result.sentiment.label).or_default() += 1;

        let sender = message.sender_address();
        if !sender.is_empty() {
            let tally = self.senders.entry(sender).or_default();
            tally.messages += 1;
            tally.priority_total += u64::from(result.priority_score);
        }

        let unread = message.is_unread();
        if unread {
            self.unread += 1;
            self.unread_spam.push(result.spam_probability);
            self.unread_priority_total += u64::from(result.priority_score);
            if result.is_high_priority() {
                self.high_priority_unread += 1;
            }
        }

        let Some(received) = message.timestamp else {
            self.undated += 1;
            return;
        };

        self.hourly[received.hour() as usize] += 1;
        self.weekday[received.weekday().num_days_from_monday() as usize] += 1;
        self.earliest = Some(self.earliest.map_or(received, |t| t.min(received)));
        self.latest = Some(self.latest.map_or(received, |t| t.max(received)));

        if let Some(read) = timeline.first_read {
            self.read_latencies.push((read - received).num_seconds());
        }
        if let Some(reply) = timeline.first_reply {
            self.reply_latencies.push((reply - received).num_seconds());
        }

        let age = self.settings.as_of - received;
        if unread && age.num_days() > self.settings.old_unread_days {
            self.old_unread += 1;
        }

        #[allow(clippy::cast_precision_loss)]
        let age_hours = age.num_seconds() as f64 / SECONDS_PER_HOUR;
        if result.needs_response && age_hours >= self.settings.efficiency_min_age_hours {
            self.actionable += 1;
            if self.was_handled(received, age_hours, unread, timeline) {
                self.handled += 1;
            }
        }
    }

    /// Handled means a read or reply inside the window; without transition
    /// data, a read message still inside the window counts.
    fn was_handled(
        &self,
        received: DateTime<Utc>,
        age_hours: f64,
        unread: bool,
        timeline: Timeline,
    ) -> bool {
        let window = self.settings.efficiency_window_hours;
        timeline.first_action().map_or(!unread && age_hours < window, |at| {
            #[allow(clippy::cast_precision_loss)]
            let delay = (at - received).num_seconds() as f64 / SECONDS_PER_HOUR;
            delay <= window
        })
    }

    /// Combine another partial into this one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Internal`] if the partials were created with
    /// different settings.
    pub fn merge(&mut self, other: Self) -> Result<()> {
        if self.settings != other.settings {
            return Err(Error::Internal(
                "pattern partials built with different settings".to_string(),
            ));
        }

        self.total += other.total;
        self.unread += other.unread;
        self.undated += other.undated;
        for (sender, tally) in other.senders {
            let mine = self.senders.entry(sender).or_default();
            mine.messages += tally.messages;
            mine.priority_total += tally.priority_total;
        }
        for (slot, count) in self.hourly.iter_mut().zip(other.hourly) {
            *slot += count;
        }
        for (slot, count) in self.weekday.iter_mut().zip(other.weekday) {
            *slot += count;
        }
        for (category, count) in other.categories {
            *self.categories.entry(category).or_default() += count;
        }
        for (category, tally) in other.sentiment {
            let mine = self.sentiment.entry(category).or_default();
            mine.messages += tally.messages;
            mine.points += tally.points;
            for (label, count) in tally.labels {
                *mine.labels.entry(label).or_default() += count;
            }
        }
        self.read_latencies.extend(other.read_latencies);
        self.reply_latencies.extend(other.reply_latencies);
        self.high_priority_unread += other.high_priority_unread;
        self.old_unread += other.old_unread;
        self.unread_spam.extend(other.unread_spam);
        self.unread_priority_total += other.unread_priority_total;
        self.earliest = earlier(self.earliest, other.earliest);
        self.latest = later(self.latest, other.latest);
        self.actionable += other.actionable;
        self.handled += other.handled;
        self.reading_secs += other.reading_secs;
        Ok(())
    }

    /// Produce the final statistics.
    #[must_use]
    pub fn finish(self) -> PatternStats {
        let dated = self.total - self.undated;
        let span_days = match (self.earliest, self.latest) {
            (Some(first), Some(last)) => hours((last - first).num_seconds()) / 24.0,
            _ => 0.0,
        };
        let messages_per_day = if dated == 0 {
            0.0
        } else {
            f64::from(dated) / span_days.max(1.0)
        };

        let mut unread_spam = self.unread_spam;
        unread_spam.sort_by(f64::total_cmp);
        let average_unread_spam = mean(unread_spam.iter().sum(), self.unread);
        #[allow(clippy::cast_precision_loss)]
        let average_unread_priority = mean(self.unread_priority_total as f64, self.unread);

        let response_efficiency = if self.actionable == 0 {
            1.0
        } else {
            f64::from(self.handled) / f64::from(self.actionable)
        };

        PatternStats {
            total_messages: self.total,
            unread_messages: self.unread,
            undated_messages: self.undated,
            senders: self
                .senders
                .into_iter()
                .map(|(address, tally)| {
                    #[allow(clippy::cast_precision_loss)]
                    let average_priority = mean(tally.priority_total as f64, tally.messages);
                    (
                        address,
                        SenderStats {
                            messages: tally.messages,
                            average_priority,
                        },
                    )
                })
                .collect(),
            hourly: self.hourly,
            weekday: self.weekday,
            peak_window: peak_window(&self.hourly, self.settings.peak_window_hours, dated),
            categories: self.categories,
            sentiment_trend: self
                .sentiment
                .into_iter()
                .map(|(category, tally)| {
                    #[allow(clippy::cast_precision_loss)]
                    let score = mean(tally.points as f64, tally.messages) / 2.0;
                    (
                        category,
                        SentimentTrend {
                            messages: tally.messages,
                            labels: tally.labels,
                            score,
                        },
                    )
                })
                .collect(),
            read_latency: latency_stats(self.read_latencies),
            reply_latency: latency_stats(self.reply_latencies),
            high_priority_unread: self.high_priority_unread,
            old_unread: self.old_unread,
            average_unread_spam,
            average_unread_priority,
            span_days,
            messages_per_day,
            response_efficiency,
            total_reading_secs: self.reading_secs,
        }
    }
}

fn earlier(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Option<DateTime<Utc>> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

fn later(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Option<DateTime<Utc>> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (a, b) => a.or(b),
    }
}

fn mean(total: f64, count: u32) -> f64 {
    if count == 0 {
        0.0
    } else {
        total / f64::from(count)
    }
}

/// Busiest `width` consecutive hours, wrapping at midnight; earliest start
/// wins ties.
fn peak_window(hourly: &[u32; HOURS_PER_DAY], width: u8, dated: u32) -> Option<PeakWindow> {
    if dated == 0 {
        return None;
    }
    let width = width.clamp(1, 24);
    let mut best_start = 0u8;
    let mut best = 0u32;
    for start in 0..24u8 {
        let messages: u32 = (0..width)
            .map(|offset| hourly[usize::from((start + offset) % 24)])
            .sum();
        if messages > best {
            best = messages;
            best_start = start;
        }
    }
    Some(PeakWindow {
        start_hour: best_start,
        hours: width,
        messages: best,
        share: f64::from(best) / f64::from(dated),
    })
}

/// Nearest-rank summary of latencies given in seconds.
fn latency_stats(mut seconds: Vec<i64>) -> Option<LatencyStats> {
    if seconds.is_empty() {
        return None;
    }
    seconds.sort_unstable();
    let samples = u32::try_from(seconds.len()).unwrap_or(u32::MAX);
    let total: i128 = seconds.iter().map(|&s| i128::from(s)).sum();
    let rank = |p: f64| -> f64 {
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            clippy::cast_precision_loss
        )]
        let index = ((p * seconds.len() as f64).ceil() as usize).clamp(1, seconds.len()) - 1;
        hours(seconds[index])
    };
    #[allow(clippy::cast_precision_loss)]
    let mean_hours = (total as f64 / f64::from(samples)) / SECONDS_PER_HOUR;
    Some(LatencyStats {
        samples,
        mean_hours,
        p50_hours: rank(0.5),
        p90_hours: rank(0.9),
        max_hours: hours(seconds[seconds.len() - 1]),
    })
}

#[allow(clippy::cast_precision_loss)]
fn hours(seconds: i64) -> f64 {
    seconds as f64 / SECONDS_PER_HOUR
}
