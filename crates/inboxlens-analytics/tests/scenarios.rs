//! End-to-end analysis scenarios.

#![allow(clippy::unwrap_used)]

use chrono::{DateTime, Duration, TimeZone, Utc};

use inboxlens_analytics::{
    Analyzer, AnalyzerConfig, Category, Error, MailboxSnapshot, NormalizedMessage, PriorityBand,
    RecommendationKind, ResponseStrategy, SentimentLabel,
};

fn as_of() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap()
}

fn analyzer() -> Analyzer {
    Analyzer::new(AnalyzerConfig::default()).unwrap()
}

#[test]
fn urgent_contract_review_from_boss() {
    let message = NormalizedMessage::new("boss-1")
        .with_sender("boss@company.com")
        .with_subject("URGENT: contract review needed")
        .with_body("please respond today")
        .with_timestamp(as_of() - Duration::minutes(10))
        .with_label("UNREAD");
    let report = analyzer()
        .analyze_batch(&MailboxSnapshot::new(vec![message]), as_of())
        .unwrap();
    let result = report.result("boss-1").unwrap();

    assert_eq!(result.category, Category::Work);
    assert!(result.spam_probability < 0.3);
    assert!(result.needs_response);
    assert_eq!(result.priority_band, PriorityBand::High);
    assert!(result.suggested_response.is_some());
    assert_eq!(report.insights.patterns.high_priority_unread, 1);
    assert!(report.insights.recommends(RecommendationKind::PriorityFocus));
}

#[test]
fn limited_time_offer_is_promotional_spam() {
    let links = (1..=6)
        .map(|i| format!("https://deals.example.net/item/{i}"))
        .collect::<Vec<_>>()
        .join(" ");
    let message = NormalizedMessage::new("promo-1")
        .with_sender("Shop <news@shop.example.com>")
        .with_subject("Limited time offer just for you")
        .with_body(format!(
            "Limited time offer! Click here to claim your discount: {links} \
             Click here to unsubscribe. Unsubscribe from this list."
        ))
        .with_timestamp(as_of() - Duration::hours(1));
    let result = analyzer().analyze_message(&message, as_of());

    assert_eq!(result.category, Category::Promotional);
    assert!(result.spam_probability > 0.8, "got {}", result.spam_probability);
    assert_eq!(result.priority_score, 0);
    assert_eq!(result.priority_band, PriorityBand::Low);
    assert!(!result.needs_response);
    assert!(result.suggested_response.is_none());
}

#[test]
fn concentrated_arrivals_trigger_batching() {
    let day = Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap();
    let quiet_hours: Vec<i64> = (0..24).filter(|h| *h != 9 && *h != 10).collect();

    let mut messages = Vec::new();
    for i in 0..60 {
        messages.push(
            NormalizedMessage::new(format!("peak-{i}"))
                .with_sender(format!("colleague{i}@company.com"))
                .with_subject("Status update")
                .with_body("Sharing the latest numbers for the weekly report.")
                .with_timestamp(day + Duration::hours(9) + Duration::minutes(i * 2)),
        );
    }
    for i in 0..40 {
        let hour = quiet_hours[usize::try_from(i).unwrap() % quiet_hours.len()];
        messages.push(
            NormalizedMessage::new(format!("quiet-{i}"))
                .with_sender(format!("friend{i}@example.org"))
                .with_subject("Catching up")
                .with_body("Hope the week is going well.")
                .with_timestamp(day + Duration::hours(hour) + Duration::minutes(i)),
        );
    }

    let report = analyzer()
        .analyze_batch(&MailboxSnapshot::new(messages), as_of())
        .unwrap();
    let patterns = &report.insights.patterns;
    let peak = patterns.peak_window.as_ref().unwrap();

    assert_eq!(patterns.total_messages, 100);
    assert_eq!(peak.start_hour, 9);
    assert_eq!(peak.messages, 60);
    assert!((peak.share - 0.6).abs() < 1e-9);
    assert!(report.insights.recommends(RecommendationKind::Batching));
}

#[test]
fn empty_message_is_neutral_and_quiet() {
    let message = NormalizedMessage::new("blank");
    let result = analyzer().analyze_message(&message, as_of());

    assert_eq!(result.sentiment.label, SentimentLabel::Neutral);
    assert_eq!(result.category, Category::Other);
    assert!(result.spam_probability < 0.05);
    assert!(!result.needs_response);
    assert!(result.urgency_indicators.is_empty());
    assert!(result.key_topics.is_empty());
}

#[test]
fn duplicate_ids_rejected_before_analysis() {
    let snapshot = MailboxSnapshot::new(vec![
        NormalizedMessage::new("a").with_subject("one"),
        NormalizedMessage::new("b").with_subject("two"),
        NormalizedMessage::new("a").with_subject("three"),
    ]);
    let err = analyzer().analyze_batch(&snapshot, as_of()).unwrap_err();
    assert!(err.is_precondition());
    assert!(matches!(err, Error::DuplicateMessageId(id) if id == "a"));
}

#[test]
fn empty_id_rejected() {
    let snapshot = MailboxSnapshot::new(vec![NormalizedMessage::new("ok"), NormalizedMessage::new("  ")]);
    let err = analyzer().analyze_batch(&snapshot, as_of()).unwrap_err();
    assert!(matches!(err, Error::EmptyMessageId(1)));
}

#[test]
fn meeting_request_gets_schedule_suggestion() {
    let message = NormalizedMessage::new("meet-1")
        .with_sender("Priya Raman <priya@company.com>")
        .with_subject("Project sync")
        .with_body("Could you let me know when you are available for a meeting next week?")
        .with_timestamp(as_of() - Duration::hours(3));
    let result = analyzer().analyze_message(&message, as_of());

    assert!(result.needs_response);
    let suggestion = result.suggested_response.unwrap();
    assert_eq!(suggestion.strategy, ResponseStrategy::Schedule);
    assert!(suggestion.template.unwrap().starts_with("Hi Priya Raman,"));
}

#[test]
fn snapshot_from_json() {
    let json = r#"{
        "messages": [
            {
                "id": "m1",
                "sender": "Alex <alex@company.com>",
                "subject": "Budget review",
                "body": "Can you review the budget before Friday?",
                "timestamp": "2024-03-04T15:30:00Z",
                "labels": ["UNREAD", "INBOX"]
            },
            { "id": "m2" }
        ],
        "transitions": [
            { "message_id": "m1", "kind": "read", "at": "2024-03-04T17:30:00Z" }
        ]
    }"#;
    let snapshot: MailboxSnapshot = serde_json::from_str(json).unwrap();
    let report = analyzer().analyze_batch(&snapshot, as_of()).unwrap();
    let patterns = &report.insights.patterns;

    assert_eq!(patterns.total_messages, 2);
    assert_eq!(patterns.undated_messages, 1);
    assert_eq!(patterns.unread_messages, 1);
    let read = patterns.read_latency.as_ref().unwrap();
    assert_eq!(read.samples, 1);
    assert!((read.p50_hours - 2.0).abs() < 1e-9);
    assert!(patterns.reply_latency.is_none());
}

#[test]
fn config_from_json_overrides_weights() {
    let config = AnalyzerConfig::from_json(r#"{ "version": 1, "priority": { "high_band": 90 } }"#)
        .unwrap();
    assert_eq!(config.priority.high_band, 90);
    assert!(Analyzer::new(config).is_ok());
}
