//! Priority scoring.

use super::model::{MessageMeta, PriorityBand, PriorityScore};
use crate::classify::{Category, Sentiment};
use crate::config::PriorityWeights;

const SECONDS_PER_HOUR: f64 = 3600.0;
const MAX_SCORE: u8 = 100;

/// Combines classifier outputs and metadata into a priority score.
#[derive(Debug, Clone)]
pub struct PriorityScorer {
    weights: PriorityWeights,
}

impl PriorityScorer {
    /// Creates a scorer with the given weights.
    #[must_use]
    pub const fn new(weights: PriorityWeights) -> Self {
        Self { weights }
    }

    /// Weights in use.
    #[must_use]
    pub const fn weights(&self) -> &PriorityWeights {
        &self.weights
    }

    /// Score one message.
    ///
    /// A spam probability at or above the high threshold pins the score to
    /// the floor and clears `needs_response`, whatever the other signals say.
    #[must_use]
    pub fn score(
        &self,
        meta: &MessageMeta<'_>,
        sentiment: &Sentiment,
        category: Category,
        spam_probability: f64,
    ) -> PriorityScore {
        let w = &self.weights;
        let floor = w.floor.min(MAX_SCORE);

        if spam_probability >= w.spam_probability_high_threshold {
            return PriorityScore {
                score: floor,
                band: PriorityBand::of(floor, w),
                needs_response: false,
            };
        }

        let features = meta.features;
        let mut points = self.base(category);

        points += (features.urgency().weight * w.urgency_per_weight).min(w.urgency_cap);
        if features.has_request_cue() && !features.is_broadcast() {
            points += w.request_boost;
        }
        if category.is_conversational() && sentiment.label.is_troubled() {
            points += w.negative_boost;
        }
        if features.is_reply {
            points += w.reply_boost;
        }
        points = w.recency_boost.mul_add(self.recency_factor(meta), points);
        if features.is_broadcast() {
            points -= w.automated_penalty;
        }
        points = spam_probability.clamp(0.0, 1.0).mul_add(-w.spam_penalty, points);

        let score = to_score(points, floor);
        let needs_response = category.is_conversational()
            && spam_probability < w.spam_probability_low_threshold
            && !features.is_broadcast()
            && (features.has_request_cue() || features.has_urgency());

        PriorityScore {
            score,
            band: PriorityBand::of(score, w),
            needs_response,
        }
    }

    const fn base(&self, category: Category) -> f64 {
        let w = &self.weights;
        match category {
            Category::Work => w.base_work,
            Category::Personal => w.base_personal,
            Category::Promotional => w.base_promotional,
            Category::Spam => w.base_spam,
            Category::Other => w.base_other,
        }
    }

    /// Exponential decay in `[0, 1]`; 1 for mail received at `as_of`.
    fn recency_factor(&self, meta: &MessageMeta<'_>) -> f64 {
        let Some(received) = meta.received else {
            return 0.0;
        };
        #[allow(clippy::cast_precision_loss)]
        let age_hours = ((meta.as_of - received).num_seconds().max(0) as f64) / SECONDS_PER_HOUR;
        0.5_f64.powf(age_hours / self.weights.recency_halflife_hours)
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_score(points: f64, floor: u8) -> u8 {
    if points.is_nan() {
        return floor.min(MAX_SCORE);
    }
    points
        .round()
        .min(f64::from(MAX_SCORE))
        .max(f64::from(floor.min(MAX_SCORE))) as u8
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;
    use crate::classify::SentimentLabel;
    use crate::features::{FeatureSet, Hits};

    fn scorer() -> PriorityScorer {
        PriorityScorer::new(PriorityWeights::default())
    }

    fn neutral() -> Sentiment {
        Sentiment {
            label: SentimentLabel::Neutral,
            confidence: 0.5,
            score: 0.0,
        }
    }

    fn negative() -> Sentiment {
        Sentiment {
            label: SentimentLabel::Negative,
            confidence: 0.7,
            score: -0.07,
        }
    }

    fn now() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap()
    }

    fn urgent_request() -> FeatureSet {
        FeatureSet {
            time_pressure: Hits::new(1, 1.0),
            deadline: Hits::new(1, 0.5),
            request: Hits::new(1, 1.0),
            word_count: 7,
            ..FeatureSet::default()
        }
    }

    #[test]
    fn test_urgent_work_is_high() {
        let features = urgent_request();
        let meta = MessageMeta {
            features: &features,
            received: Some(now()),
            as_of: now(),
        };
        let result = scorer().score(&meta, &negative(), Category::Work, 0.01);
        assert!(result.score >= 90, "got {}", result.score);
        assert_eq!(result.band, PriorityBand::High);
        assert!(result.needs_response);
    }

    #[test]
    fn test_spam_forces_floor() {
        let features = urgent_request();
        let meta = MessageMeta {
            features: &features,
            received: Some(now()),
            as_of: now(),
        };
        let result = scorer().score(&meta, &negative(), Category::Work, 0.85);
        assert_eq!(result.score, 0);
        assert_eq!(result.band, PriorityBand::Low);
        assert!(!result.needs_response);
    }

    #[test]
    fn test_recency_decays() {
        let features = FeatureSet::default();
        let fresh = MessageMeta {
            features: &features,
            received: Some(now()),
            as_of: now(),
        };
        let stale = MessageMeta {
            received: Some(now() - Duration::hours(24)),
            ..fresh
        };
        let undated = MessageMeta {
            received: None,
            ..fresh
        };
        let s = scorer();
        let fresh = s.score(&fresh, &neutral(), Category::Other, 0.0).score;
        let stale = s.score(&stale, &neutral(), Category::Other, 0.0).score;
        let undated = s.score(&undated, &neutral(), Category::Other, 0.0).score;
        assert_eq!(fresh, 40);
        assert_eq!(stale, 33);
        assert_eq!(undated, 25);
    }

    #[test]
    fn test_future_timestamp_treated_as_fresh() {
        let features = FeatureSet::default();
        let meta = MessageMeta {
            features: &features,
            received: Some(now() + Duration::hours(5)),
            as_of: now(),
        };
        assert_eq!(
            scorer().score(&meta, &neutral(), Category::Other, 0.0).score,
            40
        );
    }

    #[test]
    fn test_broadcast_never_needs_response() {
        let features = FeatureSet {
            automated_sender: true,
            ..urgent_request()
        };
        let meta = MessageMeta {
            features: &features,
            received: None,
            as_of: now(),
        };
        let result = scorer().score(&meta, &neutral(), Category::Work, 0.0);
        assert!(!result.needs_response);
    }

    #[test]
    fn test_promotional_never_needs_response() {
        let features = urgent_request();
        let meta = MessageMeta {
            features: &features,
            received: None,
            as_of: now(),
        };
        let result = scorer().score(&meta, &neutral(), Category::Promotional, 0.1);
        assert!(!result.needs_response);
    }

    #[test]
    fn test_negative_boost_only_for_conversational() {
        let features = FeatureSet::default();
        let meta = MessageMeta {
            features: &features,
            received: None,
            as_of: now(),
        };
        let s = scorer();
        let work_neutral = s.score(&meta, &neutral(), Category::Work, 0.0).score;
        let work_negative = s.score(&meta, &negative(), Category::Work, 0.0).score;
        let other_negative = s.score(&meta, &negative(), Category::Other, 0.0).score;
        assert_eq!(work_negative - work_neutral, 12);
        assert_eq!(other_negative, 25);
    }

    #[test]
    fn test_floor_above_max_is_capped() {
        let s = PriorityScorer::new(PriorityWeights {
            floor: 120,
            ..PriorityWeights::default()
        });
        let features = urgent_request();
        let meta = MessageMeta {
            features: &features,
            received: Some(now()),
            as_of: now(),
        };
        let scored = s.score(&meta, &negative(), Category::Work, 0.01);
        assert_eq!(scored.score, 100);
        let spam = s.score(&meta, &negative(), Category::Work, 0.95);
        assert_eq!(spam.score, 100);
        assert!(!spam.needs_response);
        assert_eq!(to_score(f64::NAN, 120), 100);
    }
}
