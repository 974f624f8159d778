//! Weighted multi-label categorization.

use super::model::{Category, CategoryScores, CategoryVerdict};
use crate::config::CategoryWeights;
use crate::features::FeatureSet;

/// Scores every category independently and picks the best.
#[derive(Debug, Clone)]
pub struct Categorizer {
    weights: CategoryWeights,
}

impl Categorizer {
    /// Creates a categorizer with the given weights.
    #[must_use]
    pub const fn new(weights: CategoryWeights) -> Self {
        Self { weights }
    }

    /// Raw score for each category.
    #[must_use]
    pub fn scores(&self, features: &FeatureSet) -> CategoryScores {
        let w = &self.weights;
        let has_unsubscribe = !features.unsubscribe.is_empty();

        let work = if has_unsubscribe {
            features.work.weight * w.work_promotional_damping
        } else {
            features.work.weight
        };

        let marketing = f64::from(features.unsubscribe.count)
            .mul_add(w.unsubscribe_weight, features.promotional.weight);
        // Links only reinforce mail that already reads as marketing.
        let link_bonus = if marketing > 0.0 {
            (f64::from(features.link_count) * w.link_weight).min(w.link_bonus_cap)
        } else {
            0.0
        };

        CategoryScores {
            work,
            personal: features.personal.weight,
            promotional: marketing + link_bonus,
            spam: features.spam_phrases.weight,
        }
    }

    /// Pick a category. Ties go to the earlier entry of
    /// [`Category::PRECEDENCE`]; scores under the floor resolve to `Other`.
    #[must_use]
    pub fn categorize(&self, features: &FeatureSet) -> CategoryVerdict {
        let scores = self.scores(features);

        let mut best = (Category::Other, 0.0_f64);
        for (category, score) in scores.ranked_inputs() {
            if score > best.1 {
                best = (category, score);
            }
        }

        let (category, best_score) = best;
        if category == Category::Other || best_score < self.weights.min_score {
            let confidence = if self.weights.min_score > 0.0 {
                1.0 - best_score / self.weights.min_score
            } else {
                1.0
            };
            return CategoryVerdict {
                category: Category::Other,
                confidence: confidence.clamp(0.0, 1.0),
                scores,
            };
        }

        CategoryVerdict {
            category,
            confidence: (best_score / self.weights.confidence_saturation).clamp(0.0, 1.0),
            scores,
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::features::Hits;

    fn categorizer() -> Categorizer {
        Categorizer::new(CategoryWeights::default())
    }

    #[test]
    fn test_empty_is_other() {
        let verdict = categorizer().categorize(&FeatureSet::default());
        assert_eq!(verdict.category, Category::Other);
        assert_eq!(verdict.confidence, 1.0);
    }

    #[test]
    fn test_below_floor_is_other() {
        let features = FeatureSet {
            work: Hits::new(1, 0.6),
            ..FeatureSet::default()
        };
        assert_eq!(categorizer().categorize(&features).category, Category::Other);
    }

    #[test]
    fn test_work_wins() {
        let features = FeatureSet {
            work: Hits::new(2, 1.6),
            personal: Hits::new(1, 1.0),
            ..FeatureSet::default()
        };
        let verdict = categorizer().categorize(&features);
        assert_eq!(verdict.category, Category::Work);
        assert!((verdict.confidence - 0.32).abs() < 1e-9);
    }

    #[test]
    fn test_tie_prefers_work_over_personal() {
        let features = FeatureSet {
            work: Hits::new(2, 2.0),
            personal: Hits::new(2, 2.0),
            ..FeatureSet::default()
        };
        assert_eq!(categorizer().categorize(&features).category, Category::Work);
    }

    #[test]
    fn test_unsubscribe_dampens_work() {
        let features = FeatureSet {
            work: Hits::new(3, 3.0),
            unsubscribe: Hits::new(1, 1.0),
            ..FeatureSet::default()
        };
        let verdict = categorizer().categorize(&features);
        assert_eq!(verdict.scores.work, 1.5);
        assert_eq!(verdict.scores.promotional, 2.0);
        assert_eq!(verdict.category, Category::Promotional);
    }

    #[test]
    fn test_links_alone_are_not_promotional() {
        let features = FeatureSet {
            link_count: 12,
            ..FeatureSet::default()
        };
        let verdict = categorizer().categorize(&features);
        assert_eq!(verdict.scores.promotional, 0.0);
        assert_eq!(verdict.category, Category::Other);
    }

    #[test]
    fn test_link_bonus_capped() {
        let features = FeatureSet {
            promotional: Hits::new(1, 1.0),
            link_count: 40,
            ..FeatureSet::default()
        };
        assert_eq!(categorizer().scores(&features).promotional, 3.0);
    }

    #[test]
    fn test_spam_phrases() {
        let features = FeatureSet {
            spam_phrases: Hits::new(2, 3.0),
            ..FeatureSet::default()
        };
        assert_eq!(categorizer().categorize(&features).category, Category::Spam);
    }
}
