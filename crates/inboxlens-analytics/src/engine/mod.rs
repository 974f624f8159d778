//! The analysis engine: per-message pipeline and batch orchestration.
//!
//! For each message the pipeline extracts features once, then runs the
//! sentiment, category and spam classifiers, scores priority and asks the
//! response advisor for a suggestion. A batch adds pattern statistics and
//! insights on top.
//!
//! # Example
//!
//! ```ignore
//! use inboxlens_analytics::{Analyzer, AnalyzerConfig, MailboxSnapshot};
//!
//! let analyzer = Analyzer::new(AnalyzerConfig::default())?;
//! let report = analyzer.analyze_batch(&snapshot, chrono::Utc::now())?;
//! for text in report.insights.recommendation_texts() {
//!     println!("{text}");
//! }
//! ```

mod analyzer;
mod model;

pub use analyzer::Analyzer;
pub use model::{AnalysisResult, BatchReport};
