//! Spam probability from corroborating signals.

use serde::{Deserialize, Serialize};

use crate::config::SpamWeights;
use crate::features::FeatureSet;

/// Normalized spam factors, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SpamFactors {
    /// Marketing density.
    pub promotional: f64,
    /// Link pressure.
    pub links: f64,
    /// Shouting and excessive capitals.
    pub caps: f64,
    /// Known spam phrases.
    pub phrases: f64,
    /// Exclamation density.
    pub exclamation: f64,
    /// Suspicious sender.
    pub sender: f64,
}

/// Weighted, squashed spam scoring.
#[derive(Debug, Clone)]
pub struct SpamDetector {
    weights: SpamWeights,
}

impl SpamDetector {
    /// Creates a detector with the given weights.
    #[must_use]
    pub const fn new(weights: SpamWeights) -> Self {
        Self { weights }
    }

    /// Normalize each signal to `[0, 1]`.
    #[must_use]
    pub fn factors(&self, features: &FeatureSet) -> SpamFactors {
        let w = &self.weights;

        let excess_caps = if features.uppercase_ratio > w.caps_ratio_floor {
            (features.uppercase_ratio - w.caps_ratio_floor) / (1.0 - w.caps_ratio_floor)
        } else {
            0.0
        };
        let shouting = ratio(
            f64::from(features.shouted_words),
            f64::from(w.shouted_word_saturation),
        );

        SpamFactors {
            promotional: ratio(
                features.promotional_density(),
                w.promotional_density_saturation,
            ),
            links: ratio(f64::from(features.link_count), f64::from(w.link_saturation)),
            caps: unit(excess_caps).max(shouting),
            phrases: ratio(features.spam_phrases.weight, w.phrase_saturation),
            exclamation: ratio(
                features.exclamation_density(),
                w.exclamation_density_saturation,
            ),
            sender: if features.suspicious_sender { 1.0 } else { 0.0 },
        }
    }

    /// Weighted sum of factors before squashing.
    #[must_use]
    pub fn raw_score(&self, factors: &SpamFactors) -> f64 {
        let w = &self.weights;
        [
            (factors.promotional, w.promotional_weight),
            (factors.links, w.link_weight),
            (factors.caps, w.caps_weight),
            (factors.phrases, w.phrase_weight),
            (factors.exclamation, w.exclamation_weight),
            (factors.sender, w.sender_weight),
        ]
        .into_iter()
        .fold(0.0, |sum, (factor, weight)| factor.mul_add(weight, sum))
    }

    /// Spam probability in `[0, 1]`.
    ///
    /// Non-decreasing in every factor. A single factor cannot pass the
    /// midpoint on its own, so a high probability needs corroboration.
    #[must_use]
    pub fn score(&self, features: &FeatureSet) -> f64 {
        let raw = self.raw_score(&self.factors(features));
        let w = &self.weights;
        let probability = 1.0 / (1.0 + (-w.steepness * (raw - w.midpoint)).exp());
        unit(probability)
    }
}

fn ratio(value: f64, saturation: f64) -> f64 {
    if saturation <= 0.0 {
        return if value > 0.0 { 1.0 } else { 0.0 };
    }
    unit(value / saturation)
}

fn unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
