//! Configuration validation.

use super::AnalyzerConfig;
use super::lexicon::Lexicon;

/// A single problem found in an [`AnalyzerConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssue {
    /// A lexicon term is blank or contains no word characters.
    EmptyTerm(&'static str),
    /// A weight is negative, which would break monotonic scoring.
    NegativeWeight(&'static str),
    /// A value is NaN or infinite.
    NonFinite(&'static str),
    /// A value lies outside its allowed range.
    OutOfRange(&'static str),
    /// Two related thresholds are in the wrong order.
    ThresholdOrder(&'static str),
    /// A single spam factor could reach the squash midpoint on its own.
    DominantSpamFactor(&'static str),
}

impl ConfigIssue {
    /// Get human-readable error message.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::EmptyTerm(_) => "lexicon term must contain at least one word",
            Self::NegativeWeight(_) => "weight must not be negative",
            Self::NonFinite(_) => "value must be a finite number",
            Self::OutOfRange(_) => "value is out of range",
            Self::ThresholdOrder(_) => "thresholds are in the wrong order",
            Self::DominantSpamFactor(_) => "spam factor weight must stay below the midpoint",
        }
    }

    /// Get the field name this issue relates to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyTerm(field)
            | Self::NegativeWeight(field)
            | Self::NonFinite(field)
            | Self::OutOfRange(field)
            | Self::ThresholdOrder(field)
            | Self::DominantSpamFactor(field) => *field,
        }
    }
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field(), self.message())
    }
}

impl std::error::Error for ConfigIssue {}

/// Result of validating a configuration.
pub type ValidationResult = Result<(), Vec<ConfigIssue>>;

/// Validate an analyzer configuration.
///
/// Returns `Ok(())` if valid, or every issue found.
///
/// # Errors
///
/// Returns a vector of `ConfigIssue` if any value is invalid.
#[allow(clippy::too_many_lines)]
pub fn validate_config(config: &AnalyzerConfig) -> ValidationResult {
    let mut issues = Vec::new();

    // Lexicons
    let lexicons = &config.lexicons;
    for (field, lexicon) in [
        ("lexicons.work", &lexicons.work),
        ("lexicons.personal", &lexicons.personal),
        ("lexicons.promotional", &lexicons.promotional),
        ("lexicons.spam_phrases", &lexicons.spam_phrases),
        ("lexicons.deadline", &lexicons.deadline),
        ("lexicons.time_pressure", &lexicons.time_pressure),
        ("lexicons.action_required", &lexicons.action_required),
        ("lexicons.positive", &lexicons.positive),
        ("lexicons.negative", &lexicons.negative),
        ("lexicons.unsubscribe", &lexicons.unsubscribe),
        ("lexicons.automation", &lexicons.automation),
        ("lexicons.request", &lexicons.request),
        ("lexicons.scheduling", &lexicons.scheduling),
    ] {
        check_lexicon(field, lexicon, &mut issues);
    }

    // Sentiment
    let sentiment = &config.sentiment;
    check_finite("sentiment.positive_threshold", sentiment.positive_threshold, &mut issues);
    check_finite("sentiment.negative_threshold", sentiment.negative_threshold, &mut issues);
    check_non_negative("sentiment.mixed_threshold", sentiment.mixed_threshold, &mut issues);
    check_positive(
        "sentiment.confidence_saturation",
        sentiment.confidence_saturation,
        &mut issues,
    );
    check_unit(
        "sentiment.neutral_baseline_confidence",
        sentiment.neutral_baseline_confidence,
        &mut issues,
    );
    if sentiment.negative_threshold > sentiment.positive_threshold {
        issues.push(ConfigIssue::ThresholdOrder("sentiment.negative_threshold"));
    }

    // Category
    let category = &config.category;
    check_non_negative("category.min_score", category.min_score, &mut issues);
    check_non_negative("category.unsubscribe_weight", category.unsubscribe_weight, &mut issues);
    check_non_negative("category.link_weight", category.link_weight, &mut issues);
    check_non_negative("category.link_bonus_cap", category.link_bonus_cap, &mut issues);
    check_unit(
        "category.work_promotional_damping",
        category.work_promotional_damping,
        &mut issues,
    );
    check_positive(
        "category.confidence_saturation",
        category.confidence_saturation,
        &mut issues,
    );

    // Spam
    let spam = &config.spam;
    check_positive("spam.midpoint", spam.midpoint, &mut issues);
    check_positive("spam.steepness", spam.steepness, &mut issues);
    check_positive(
        "spam.promotional_density_saturation",
        spam.promotional_density_saturation,
        &mut issues,
    );
    check_positive("spam.phrase_saturation", spam.phrase_saturation, &mut issues);
    check_positive(
        "spam.exclamation_density_saturation",
        spam.exclamation_density_saturation,
        &mut issues,
    );
    if spam.link_saturation == 0 {
        issues.push(ConfigIssue::OutOfRange("spam.link_saturation"));
    }
    if spam.shouted_word_saturation == 0 {
        issues.push(ConfigIssue::OutOfRange("spam.shouted_word_saturation"));
    }
    if !(0.0..1.0).contains(&spam.caps_ratio_floor) {
        issues.push(ConfigIssue::OutOfRange("spam.caps_ratio_floor"));
    }
    for (field, weight) in spam.factor_weights() {
        if !weight.is_finite() {
            issues.push(ConfigIssue::NonFinite(field));
        } else if weight < 0.0 {
            issues.push(ConfigIssue::NegativeWeight(field));
        } else if weight >= spam.midpoint {
            issues.push(ConfigIssue::DominantSpamFactor(field));
        }
    }

    // Priority
    let priority = &config.priority;
    for (field, value) in [
        ("priority.urgency_per_weight", priority.urgency_per_weight),
        ("priority.urgency_cap", priority.urgency_cap),
        ("priority.request_boost", priority.request_boost),
        ("priority.negative_boost", priority.negative_boost),
        ("priority.reply_boost", priority.reply_boost),
        ("priority.recency_boost", priority.recency_boost),
        ("priority.automated_penalty", priority.automated_penalty),
        ("priority.spam_penalty", priority.spam_penalty),
    ] {
        check_non_negative(field, value, &mut issues);
    }
    for (field, value) in [
        ("priority.base_work", priority.base_work),
        ("priority.base_personal", priority.base_personal),
        ("priority.base_promotional", priority.base_promotional),
        ("priority.base_spam", priority.base_spam),
        ("priority.base_other", priority.base_other),
    ] {
        if !value.is_finite() {
            issues.push(ConfigIssue::NonFinite(field));
        } else if !(0.0..=100.0).contains(&value) {
            issues.push(ConfigIssue::OutOfRange(field));
        }
    }
    check_positive(
        "priority.recency_halflife_hours",
        priority.recency_halflife_hours,
        &mut issues,
    );
    check_unit(
        "priority.spam_probability_high_threshold",
        priority.spam_probability_high_threshold,
        &mut issues,
    );
    check_unit(
        "priority.spam_probability_low_threshold",
        priority.spam_probability_low_threshold,
        &mut issues,
    );
    if priority.spam_probability_low_threshold > priority.spam_probability_high_threshold {
        issues.push(ConfigIssue::ThresholdOrder(
            "priority.spam_probability_low_threshold",
        ));
    }
    if priority.high_band > 100 {
        issues.push(ConfigIssue::OutOfRange("priority.high_band"));
    }
    if priority.medium_band > priority.high_band {
        issues.push(ConfigIssue::ThresholdOrder("priority.medium_band"));
    }
    if priority.floor > priority.medium_band {
        issues.push(ConfigIssue::ThresholdOrder("priority.floor"));
    }

    // Insights
    let insights = &config.insights;
    if insights.peak_window_hours == 0 || insights.peak_window_hours > 24 {
        issues.push(ConfigIssue::OutOfRange("insights.peak_window_hours"));
    }
    check_unit("insights.batching_share", insights.batching_share, &mut issues);
    check_unit(
        "insights.filter_spam_threshold",
        insights.filter_spam_threshold,
        &mut issues,
    );
    check_unit(
        "insights.unread_ratio_threshold",
        insights.unread_ratio_threshold,
        &mut issues,
    );
    check_unit(
        "insights.dominant_sender_share",
        insights.dominant_sender_share,
        &mut issues,
    );
    if insights.old_unread_days < 0 {
        issues.push(ConfigIssue::OutOfRange("insights.old_unread_days"));
    }
    if insights.unread_moderate > insights.unread_high {
        issues.push(ConfigIssue::ThresholdOrder("insights.unread_moderate"));
    }
    if insights.avg_priority_moderate > insights.avg_priority_high {
        issues.push(ConfigIssue::ThresholdOrder("insights.avg_priority_moderate"));
    }
    if insights.latency_moderate_hours > insights.latency_high_hours {
        issues.push(ConfigIssue::ThresholdOrder("insights.latency_moderate_hours"));
    }
    if insights.daily_volume_moderate > insights.daily_volume_high {
        issues.push(ConfigIssue::ThresholdOrder("insights.daily_volume_moderate"));
    }
    if insights.risk_moderate_points > insights.risk_high_points {
        issues.push(ConfigIssue::ThresholdOrder("insights.risk_moderate_points"));
    }
    if insights.words_per_minute == 0 {
        issues.push(ConfigIssue::OutOfRange("insights.words_per_minute"));
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

fn check_lexicon(field: &'static str, lexicon: &Lexicon, issues: &mut Vec<ConfigIssue>) {
    for term in lexicon.terms() {
        if !term.term.chars().any(char::is_alphanumeric) {
            issues.push(ConfigIssue::EmptyTerm(field));
        }
        if !term.weight.is_finite() {
            issues.push(ConfigIssue::NonFinite(field));
        } else if term.weight < 0.0 {
            issues.push(ConfigIssue::NegativeWeight(field));
        }
    }
}

fn check_finite(field: &'static str, value: f64, issues: &mut Vec<ConfigIssue>) {
    if !value.is_finite() {
        issues.push(ConfigIssue::NonFinite(field));
    }
}

fn check_non_negative(field: &'static str, value: f64, issues: &mut Vec<ConfigIssue>) {
    if !value.is_finite() {
        issues.push(ConfigIssue::NonFinite(field));
    } else if value < 0.0 {
        issues.push(ConfigIssue::NegativeWeight(field));
    }
}

fn check_positive(field: &'static str, value: f64, issues: &mut Vec<ConfigIssue>) {
    if !value.is_finite() {
        issues.push(ConfigIssue::NonFinite(field));
    } else if value <= 0.0 {
        issues.push(ConfigIssue::OutOfRange(field));
    }
}

fn check_unit(field: &'static str, value: f64, issues: &mut Vec<ConfigIssue>) {
    if !value.is_finite() {
        issues.push(ConfigIssue::NonFinite(field));
    } else if !(0.0..=1.0).contains(&value) {
        issues.push(ConfigIssue::OutOfRange(field));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&AnalyzerConfig::default()).is_ok());
    }

    #[test]
    fn test_negative_lexicon_weight_rejected() {
        let mut config = AnalyzerConfig::default();
        config.lexicons.spam_phrases = config.lexicons.spam_phrases.clone().with_term("scam", -1.0);
        let issues = validate_config(&config).unwrap_err();
        assert!(issues.contains(&ConfigIssue::NegativeWeight("lexicons.spam_phrases")));
    }

    #[test]
    fn test_blank_term_rejected() {
        let mut config = AnalyzerConfig::default();
        config.lexicons.work = config.lexicons.work.clone().with_term("  !! ", 1.0);
        let issues = validate_config(&config).unwrap_err();
        assert_eq!(issues, vec![ConfigIssue::EmptyTerm("lexicons.work")]);
    }

    #[test]
    fn test_dominant_spam_factor_rejected() {
        let mut config = AnalyzerConfig::default();
        config.spam.link_weight = config.spam.midpoint;
        let issues = validate_config(&config).unwrap_err();
        assert!(issues.contains(&ConfigIssue::DominantSpamFactor("spam.link_weight")));
    }

    #[test]
    fn test_threshold_order_rejected() {
        let mut config = AnalyzerConfig::default();
        config.priority.spam_probability_low_threshold = 0.9;
        config.priority.medium_band = 90;
        let issues = validate_config(&config).unwrap_err();
        assert!(issues.contains(&ConfigIssue::ThresholdOrder(
            "priority.spam_probability_low_threshold"
        )));
        assert!(issues.contains(&ConfigIssue::ThresholdOrder("priority.medium_band")));
    }

    #[test]
    fn test_issue_display() {
        let issue = ConfigIssue::OutOfRange("insights.peak_window_hours");
        assert_eq!(
            issue.to_string(),
            "insights.peak_window_hours: value is out of range"
        );
    }
}
