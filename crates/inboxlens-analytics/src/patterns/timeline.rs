//! Read/reply transitions indexed by message.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};

use crate::message::{LabelTransition, NormalizedMessage, TransitionKind};

/// First read and reply of one message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timeline {
    /// Earliest read at or after arrival.
    pub first_read: Option<DateTime<Utc>>,
    /// Earliest reply at or after arrival.
    pub first_reply: Option<DateTime<Utc>>,
}

impl Timeline {
    /// Earliest read or reply.
    #[must_use]
    pub fn first_action(&self) -> Option<DateTime<Utc>> {
        match (self.first_read, self.first_reply) {
            (Some(read), Some(reply)) => Some(read.min(reply)),
            (read, reply) => read.or(reply),
        }
    }
}

/// Transitions grouped by message id.
#[derive(Debug, Clone, Default)]
pub struct TransitionIndex {
    by_message: HashMap<String, Vec<(TransitionKind, DateTime<Utc>)>>,
}

impl TransitionIndex {
    /// Index a list of transitions.
    #[must_use]
    pub fn new(transitions: &[LabelTransition]) -> Self {
        let mut by_message: HashMap<String, Vec<(TransitionKind, DateTime<Utc>)>> = HashMap::new();
        for transition in transitions {
            by_message
                .entry(transition.message_id.clone())
                .or_default()
                .push((transition.kind, transition.at));
        }
        Self { by_message }
    }

    /// Check if no transition was supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_message.is_empty()
    }

    /// Number of message ids with transitions that are not in `known`.
    #[must_use]
    pub fn orphans(&self, known: &HashSet<&str>) -> usize {
        self.by_message
            .keys()
            .filter(|id| !known.contains(id.as_str()))
            .count()
    }

    /// First read and reply of a message.
    ///
    /// Transitions stamped before the message arrived are ignored.
    #[must_use]
    pub fn timeline(&self, message: &NormalizedMessage) -> Timeline {
        let mut timeline = Timeline::default();
        let Some(events) = self.by_message.get(&message.id) else {
            return timeline;
        };
        for &(kind, at) in events {
            if message.timestamp.is_some_and(|received| at < received) {
                continue;
            }
            let slot = match kind {
                TransitionKind::Read => &mut timeline.first_read,
                TransitionKind::Replied => &mut timeline.first_reply,
            };
            *slot = Some(slot.map_or(at, |current| current.min(at)));
        }
        timeline
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    #[test]
    fn test_timeline_takes_earliest_after_arrival() {
        let received = Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap();
        let message = NormalizedMessage::new("m1").with_timestamp(received);
        let index = TransitionIndex::new(&[
            LabelTransition::new("m1", TransitionKind::Read, received - Duration::hours(1)),
            LabelTransition::new("m1", TransitionKind::Read, received + Duration::hours(3)),
            LabelTransition::new("m1", TransitionKind::Read, received + Duration::hours(2)),
            LabelTransition::new("m1", TransitionKind::Replied, received + Duration::hours(5)),
        ]);
        let timeline = index.timeline(&message);
        assert_eq!(timeline.first_read, Some(received + Duration::hours(2)));
        assert_eq!(timeline.first_reply, Some(received + Duration::hours(5)));
        assert_eq!(timeline.first_action(), Some(received + Duration::hours(2)));
    }

    #[test]
    fn test_unknown_message_has_empty_timeline() {
        let index = TransitionIndex::default();
        assert!(index.is_empty());
        assert_eq!(index.timeline(&NormalizedMessage::new("x")), Timeline::default());
    }

    #[test]
    fn test_orphans() {
        let at = Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap();
        let index = TransitionIndex::new(&[
            LabelTransition::new("m1", TransitionKind::Read, at),
            LabelTransition::new("ghost", TransitionKind::Read, at),
        ]);
        let known: HashSet<&str> = ["m1"].into_iter().collect();
        assert_eq!(index.orphans(&known), 1);
    }
}
