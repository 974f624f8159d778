//! Keyword lexicons and sender heuristics.

use serde::{Deserialize, Serialize};

/// A lexicon entry: a word or multi-word phrase with an intensity weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedTerm {
    /// Word or phrase, matched case-insensitively on token boundaries.
    pub term: String,
    /// Contribution of one occurrence.
    pub weight: f64,
}

/// An ordered list of weighted terms.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Lexicon {
    terms: Vec<WeightedTerm>,
}

impl Lexicon {
    /// Builds a lexicon from `(term, weight)` pairs.
    #[must_use]
    pub fn from_pairs(pairs: &[(&str, f64)]) -> Self {
        Self {
            terms: pairs
                .iter()
                .map(|(term, weight)| WeightedTerm {
                    term: (*term).to_string(),
                    weight: *weight,
                })
                .collect(),
        }
    }

    /// Builds a lexicon where every term has the same weight.
    #[must_use]
    pub fn uniform(terms: &[&str], weight: f64) -> Self {
        Self {
            terms: terms
                .iter()
                .map(|term| WeightedTerm {
                    term: (*term).to_string(),
                    weight,
                })
                .collect(),
        }
    }

    /// Adds a term.
    #[must_use]
    pub fn with_term(mut self, term: impl Into<String>, weight: f64) -> Self {
        self.terms.push(WeightedTerm {
            term: term.into(),
            weight,
        });
        self
    }

    /// Terms in declaration order.
    #[must_use]
    pub fn terms(&self) -> &[WeightedTerm] {
        &self.terms
    }

    /// Number of terms.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.terms.len()
    }

    /// Check if the lexicon has no terms.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// All keyword lexicons used by feature extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lexicons {
    /// Business vocabulary.
    pub work: Lexicon,
    /// Personal-life vocabulary.
    pub personal: Lexicon,
    /// Marketing vocabulary.
    pub promotional: Lexicon,
    /// Known spam phrases.
    pub spam_phrases: Lexicon,
    /// Deadline mentions.
    pub deadline: Lexicon,
    /// Time-pressure words.
    pub time_pressure: Lexicon,
    /// Explicit calls to action.
    pub action_required: Lexicon,
    /// Positive sentiment words.
    pub positive: Lexicon,
    /// Negative sentiment words.
    pub negative: Lexicon,
    /// Unsubscribe / list-management markers.
    pub unsubscribe: Lexicon,
    /// Broadcast and automated-mail markers.
    pub automation: Lexicon,
    /// Direct requests addressed to the reader.
    pub request: Lexicon,
    /// Meeting and calendar vocabulary.
    pub scheduling: Lexicon,
    /// Words ignored when extracting key topics.
    pub topic_stopwords: Vec<String>,
}

impl Default for Lexicons {
    #[allow(clippy::too_many_lines)]
    fn default() -> Self {
        Self {
            work: Lexicon::from_pairs(&[
                ("meeting", 0.8),
                ("project", 1.0),
                ("deadline", 0.6),
                ("client", 1.0),
                ("budget", 1.0),
                ("proposal", 1.0),
                ("contract", 1.0),
                ("team", 0.6),
                ("manager", 0.8),
                ("department", 0.8),
                ("office", 0.6),
                ("business", 0.8),
                ("corporate", 0.8),
                ("review", 0.6),
                ("report", 0.8),
                ("quarterly", 1.0),
                ("invoice", 0.8),
                ("presentation", 0.8),
                ("stakeholder", 1.0),
                ("agenda", 0.8),
                ("colleague", 0.8),
            ]),
            personal: Lexicon::from_pairs(&[
                ("family", 1.0),
                ("friend", 1.0),
                ("friends", 1.0),
                ("birthday", 1.0),
                ("vacation", 0.8),
                ("personal", 0.6),
                ("home", 0.6),
                ("weekend", 0.8),
                ("evening", 0.6),
                ("dinner", 1.0),
                ("party", 0.8),
                ("celebration", 0.8),
                ("mom", 1.0),
                ("dad", 1.0),
                ("kids", 0.8),
                ("wedding", 1.0),
                ("holiday", 0.6),
            ]),
            promotional: Lexicon::from_pairs(&[
                ("sale", 1.0),
                ("discount", 1.0),
                ("offer", 0.8),
                ("deal", 0.8),
                ("deals", 0.8),
                ("promotion", 1.0),
                ("marketing", 0.6),
                ("buy now", 1.2),
                ("shop now", 1.2),
                ("limited time", 1.0),
                ("limited time offer", 1.5),
                ("free", 0.6),
                ("save", 0.5),
                ("purchase", 0.6),
                ("coupon", 1.0),
                ("newsletter", 0.8),
                ("subscribe", 0.6),
                ("exclusive", 0.6),
            ]),
            spam_phrases: Lexicon::from_pairs(&[
                ("click here", 1.0),
                ("act now", 1.2),
                ("lottery", 1.5),
                ("winner", 1.2),
                ("million dollars", 1.5),
                ("inheritance", 1.5),
                ("prince", 1.0),
                ("viagra", 2.0),
                ("pharmacy", 1.2),
                ("medication", 0.8),
                ("pills", 1.0),
                ("risk free", 1.0),
                ("wire transfer", 1.2),
                ("claim your prize", 1.5),
                ("guaranteed", 0.8),
                ("urgent action", 1.0),
                ("no credit check", 1.5),
            ]),
            deadline: Lexicon::from_pairs(&[
                ("deadline", 0.8),
                ("due date", 0.8),
                ("due today", 1.0),
                ("expires", 0.6),
                ("end of day", 0.6),
                ("eod", 0.6),
                ("today", 0.5),
                ("tomorrow", 0.3),
            ]),
            time_pressure: Lexicon::from_pairs(&[
                ("urgent", 1.0),
                ("asap", 1.0),
                ("as soon as possible", 1.0),
                ("immediately", 1.0),
                ("emergency", 1.0),
                ("critical", 0.9),
                ("time sensitive", 1.0),
                ("quickly", 0.4),
            ]),
            action_required: Lexicon::from_pairs(&[
                ("action required", 1.0),
                ("please respond", 0.8),
                ("need response", 0.8),
                ("response needed", 0.8),
                ("respond by", 0.8),
                ("reply by", 0.8),
            ]),
            positive: Lexicon::from_pairs(&[
                ("thanks", 1.0),
                ("thank you", 1.0),
                ("appreciate", 1.0),
                ("appreciated", 1.0),
                ("excellent", 1.5),
                ("great", 1.0),
                ("wonderful", 1.5),
                ("perfect", 1.2),
                ("awesome", 1.2),
                ("congratulations", 1.5),
                ("success", 1.0),
                ("pleased", 1.0),
                ("happy", 1.0),
                ("glad", 0.8),
                ("fantastic", 1.5),
                ("delighted", 1.5),
            ]),
            negative: Lexicon::from_pairs(&[
                ("problem", 1.0),
                ("problems", 1.0),
                ("issue", 0.8),
                ("issues", 0.8),
                ("error", 0.8),
                ("failed", 1.0),
                ("failure", 1.0),
                ("failures", 1.0),
                ("wrong", 1.0),
                ("bad", 1.0),
                ("terrible", 1.5),
                ("disappointed", 1.2),
                ("frustrated", 1.2),
                ("angry", 1.5),
                ("concerned", 0.8),
                ("worry", 0.8),
                ("worried", 0.8),
                ("urgent", 0.5),
                ("unacceptable", 1.5),
                ("complaint", 1.2),
                ("broken", 1.0),
            ]),
            unsubscribe: Lexicon::uniform(
                &[
                    "unsubscribe",
                    "opt out",
                    "manage preferences",
                    "email preferences",
                    "update your preferences",
                    "view in browser",
                ],
                1.0,
            ),
            automation: Lexicon::uniform(
                &[
                    "automated",
                    "do not reply",
                    "donotreply",
                    "noreply",
                    "no reply",
                    "auto generated",
                ],
                1.0,
            ),
            request: Lexicon::uniform(
                &[
                    "please respond",
                    "please reply",
                    "let me know",
                    "can you",
                    "could you",
                    "would you",
                    "please confirm",
                    "please review",
                    "please advise",
                    "get back to me",
                    "your thoughts",
                ],
                1.0,
            ),
            scheduling: Lexicon::uniform(
                &[
                    "meeting",
                    "meet",
                    "schedule",
                    "reschedule",
                    "calendar",
                    "availability",
                    "available",
                    "appointment",
                    "invite",
                    "call",
                    "time slot",
                ],
                1.0,
            ),
            topic_stopwords: [
                "this", "that", "with", "from", "they", "have", "will", "your", "would", "could",
                "there", "their", "about", "which", "what", "when", "where", "been", "were",
                "them", "then", "than", "into", "just", "also", "some", "these", "those", "here",
                "please", "thanks", "hello", "dear", "regards", "best", "should", "need",
            ]
            .iter()
            .map(ToString::to_string)
            .collect(),
        }
    }
}

/// Substring heuristics applied to the sender address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SenderHeuristics {
    /// Address fragments that mark automated or broadcast senders.
    pub automated_patterns: Vec<String>,
    /// Address fragments that make a sender suspicious.
    pub suspicious_terms: Vec<String>,
    /// Top-level domains commonly abused by spammers.
    pub suspicious_tlds: Vec<String>,
}

impl Default for SenderHeuristics {
    fn default() -> Self {
        let owned = |items: &[&str]| items.iter().map(ToString::to_string).collect();
        Self {
            automated_patterns: owned(&[
                "noreply",
                "no-reply",
                "donotreply",
                "do-not-reply",
                "mailer-daemon",
                "notifications@",
                "notify@",
                "bounce",
            ]),
            suspicious_terms: owned(&["marketing", "promo", "deals", "offers", "winner", "prize"]),
            suspicious_tlds: owned(&["xyz", "top", "click", "loan", "win", "bid", "work"]),
        }
    }
}
