//! Feature extraction: primitive signals derived from a single message.
//!
//! Subject and body are scanned once. Lexicon terms (single words or
//! multi-word phrases) are matched on lowercased token windows, so counts
//! reflect intensity rather than presence. URLs are counted as links and kept
//! out of the token stream.

mod extractor;
mod model;
mod tokens;

pub use extractor::FeatureExtractor;
pub use model::{FeatureSet, Hits, LengthBucket, UrgencyIndicator};
pub use tokens::{CompiledLexicon, TextScan, words};
