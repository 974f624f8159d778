//! The concurrent batch path must match the sequential one exactly.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};

use inboxlens_analytics::{
    Analyzer, AnalyzerConfig, LabelTransition, MailboxSnapshot, NormalizedMessage, TransitionKind,
};

const SUBJECTS: [&str; 6] = [
    "URGENT: contract review needed",
    "Limited time offer just for you",
    "Dinner this weekend?",
    "Quarterly budget meeting",
    "Your invoice is ready",
    "Re: project proposal",
];

const BODIES: [&str; 6] = [
    "please respond today",
    "Click here to claim your discount https://shop.example.com now!!! Unsubscribe anytime.",
    "Thanks for the lovely party, can you send the photos?",
    "Could you let me know your availability for a call tomorrow?",
    "This is an automated message. Do not reply.",
    "Great work on the draft, I have a few concerns about the timeline.",
];

fn as_of() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, 18, 0, 0).unwrap()
}

fn snapshot(size: usize) -> MailboxSnapshot {
    let mut messages = Vec::with_capacity(size);
    let mut transitions = Vec::new();
    for i in 0..size {
        let offset = i64::try_from(i).unwrap();
        let mut message = NormalizedMessage::new(format!("msg-{i:03}"))
            .with_sender(format!("Person {} <person{}@company{}.com>", i % 7, i % 7, i % 3))
            .with_subject(SUBJECTS[i % SUBJECTS.len()])
            .with_body(BODIES[(i * 5) % BODIES.len()]);
        if i % 11 != 0 {
            let received = as_of() - Duration::minutes(offset * 97);
            message = message.with_timestamp(received);
            if i % 4 == 0 {
                transitions.push(LabelTransition::new(
                    message.id.clone(),
                    TransitionKind::Read,
                    received + Duration::minutes(offset * 3 + 5),
                ));
            }
            if i % 6 == 0 {
                transitions.push(LabelTransition::new(
                    message.id.clone(),
                    TransitionKind::Replied,
                    received + Duration::hours(offset % 40),
                ));
            }
        }
        if i % 3 == 0 {
            message = message.with_label("UNREAD");
        }
        messages.push(message);
    }
    MailboxSnapshot::new(messages).with_transitions(transitions)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_matches_sequential() {
    let analyzer = Arc::new(Analyzer::new(AnalyzerConfig::default()).unwrap());
    let snapshot = snapshot(120);
    let sequential = analyzer.analyze_batch(&snapshot, as_of()).unwrap();

    for workers in [1, 3, 8, 500] {
        let concurrent = analyzer
            .analyze_batch_concurrent(snapshot.clone(), as_of(), workers)
            .await
            .unwrap();
        assert_eq!(concurrent, sequential, "workers = {workers}");
    }
}

#[tokio::test]
async fn concurrent_rejects_duplicates() {
    let analyzer = Arc::new(Analyzer::new(AnalyzerConfig::default()).unwrap());
    let snapshot = MailboxSnapshot::new(vec![
        NormalizedMessage::new("same"),
        NormalizedMessage::new("same"),
    ]);
    let err = analyzer
        .analyze_batch_concurrent(snapshot, as_of(), 2)
        .await
        .unwrap_err();
    assert!(err.is_precondition());
}
