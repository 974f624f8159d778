//! Mailbox pattern analysis.
//!
//! Per-message results are folded into a [`PatternAccumulator`]. Partials
//! built on different workers merge into the same statistics a single
//! sequential pass would produce, regardless of input order.
//!
//! Histograms are bucketed by UTC hour and weekday. Read and reply latency
//! use the earliest transition of each kind at or after the message
//! timestamp and are reported as unknown when no transitions were supplied.

mod accumulator;
mod analyzer;
mod model;
mod timeline;

pub use accumulator::{PatternAccumulator, PatternSettings};
pub use analyzer::PatternAnalyzer;
pub use model::{
    DAYS_PER_WEEK, HOURS_PER_DAY, LatencyStats, PatternStats, PeakWindow, SenderStats,
    SentimentTrend,
};
pub use timeline::{Timeline, TransitionIndex};
