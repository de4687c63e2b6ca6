//! Deterministic keyword-based intent classification.
//!
//! The classifier maps a free-text utterance, or an authored option, to
//! exactly one [`Intent`]. It is a substring matcher over a mutable keyword
//! table — a documented simple baseline, not a placeholder for an ML model.
//!
//! The table is **insertion-ordered** and matching is **first-match-wins**:
//! overlapping keywords form a total order of precedence, not a
//! most-specific-match policy. With `"no" → RejectQuest` inserted before
//! `"now" → Greet`, the input `"I know now"` classifies as `RejectQuest`.
//! This is a load-bearing contract; the table is an [`IndexMap`] because a
//! hash map with unspecified iteration order cannot express it.

use indexmap::IndexMap;

use crate::config::ClassifierSettings;
use crate::graph::DialogueOption;
use crate::intent::Intent;

/// Keyword-table intent classifier.
///
/// Keywords are stored lowercased. [`Self::add_mapping`] on an existing
/// keyword overwrites its intent **in place**, keeping its precedence slot;
/// [`Self::remove_mapping`] closes the gap without reordering the rest.
#[derive(Debug, Clone, Default)]
pub struct IntentClassifier {
    keywords: IndexMap<String, Intent>,
}

impl IntentClassifier {
    /// An empty classifier with no keyword mappings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A classifier seeded with the built-in keyword set.
    ///
    /// Insertion order is part of the behavior: greeting keywords take
    /// precedence over quest keywords, and so on down the list.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut classifier = Self::new();
        for (keyword, intent) in Self::BUILTIN_KEYWORDS {
            classifier.add_mapping(keyword, *intent);
        }
        classifier
    }

    /// Build a classifier from configuration: the built-in set (optional)
    /// followed by any extra mappings, in their configured order.
    #[must_use]
    pub fn from_settings(settings: &ClassifierSettings) -> Self {
        let mut classifier = if settings.builtin_keywords {
            Self::with_defaults()
        } else {
            Self::new()
        };
        for mapping in &settings.extra_keywords {
            classifier.add_mapping(&mapping.keyword, mapping.intent);
        }
        classifier
    }

    /// The built-in keyword table, in precedence order.
    pub const BUILTIN_KEYWORDS: &'static [(&'static str, Intent)] = &[
        // Greeting keywords
        ("hello", Intent::Greet),
        ("hi", Intent::Greet),
        ("hey", Intent::Greet),
        ("greetings", Intent::Greet),
        // Quest keywords
        ("quest", Intent::AskForQuest),
        ("mission", Intent::AskForQuest),
        ("task", Intent::AskForQuest),
        ("job", Intent::AskForQuest),
        ("help", Intent::AskForQuest),
        // Acceptance keywords
        ("yes", Intent::AcceptQuest),
        ("accept", Intent::AcceptQuest),
        ("sure", Intent::AcceptQuest),
        ("okay", Intent::AcceptQuest),
        ("alright", Intent::AcceptQuest),
        // Rejection keywords
        ("no", Intent::RejectQuest),
        ("decline", Intent::RejectQuest),
        ("refuse", Intent::RejectQuest),
        ("pass", Intent::RejectQuest),
        // Threat keywords
        ("threat", Intent::Threaten),
        ("kill", Intent::Threaten),
        ("hurt", Intent::Threaten),
        ("attack", Intent::Threaten),
        ("fight", Intent::Threaten),
        // Goodbye keywords
        ("bye", Intent::Goodbye),
        ("goodbye", Intent::Goodbye),
        ("farewell", Intent::Goodbye),
        ("see you", Intent::Goodbye),
        ("later", Intent::Goodbye),
    ];

    /// Add or overwrite a keyword mapping. The keyword is lowercased; an
    /// existing keyword keeps its position in the precedence order.
    pub fn add_mapping(&mut self, keyword: &str, intent: Intent) {
        self.keywords.insert(keyword.to_lowercase(), intent);
    }

    /// Remove a keyword mapping. Returns the intent it mapped to, if any.
    pub fn remove_mapping(&mut self, keyword: &str) -> Option<Intent> {
        self.keywords.shift_remove(&keyword.to_lowercase())
    }

    /// Number of keyword mappings currently in the table.
    #[must_use]
    pub fn mapping_count(&self) -> usize {
        self.keywords.len()
    }

    /// Classify a free-text utterance.
    ///
    /// Fails soft: empty or whitespace-only input yields [`Intent::None`].
    /// Otherwise the input is lowercased and trimmed, the keyword table is
    /// scanned in insertion order, and the first keyword contained in the
    /// text decides the intent. No match yields [`Intent::None`].
    #[must_use]
    pub fn classify(&self, text: &str) -> Intent {
        if text.is_empty() {
            return Intent::None;
        }
        let lowered = text.to_lowercase();
        let lowered = lowered.trim();

        for (keyword, intent) in &self.keywords {
            if lowered.contains(keyword.as_str()) {
                return *intent;
            }
        }
        Intent::None
    }

    /// Classify an authored option.
    ///
    /// An authored non-None intent always takes precedence over inference;
    /// only untagged options fall back to [`Self::classify`] on their text.
    #[must_use]
    pub fn classify_option(&self, option: &DialogueOption) -> Intent {
        if option.intent != Intent::None {
            return option.intent;
        }
        self.classify(&option.text)
    }

    /// Every intent whose keyword matches the text, in discovery order,
    /// duplicates removed. Diagnostic companion to [`Self::classify`].
    #[must_use]
    pub fn possible_intents(&self, text: &str) -> Vec<Intent> {
        let lowered = text.to_lowercase();
        let lowered = lowered.trim();

        let mut found = Vec::new();
        for (keyword, intent) in &self.keywords {
            if lowered.contains(keyword.as_str()) && !found.contains(intent) {
                found.push(*intent);
            }
        }
        found
    }

    /// Coarse confidence heuristic: the count of keywords mapping to
    /// `intent` that match the text, divided by the number of whitespace-
    /// separated tokens. Zero tokens yields 0.0. Not a probability.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn confidence(&self, intent: Intent, text: &str) -> f32 {
        let tokens = text.split_whitespace().count();
        if tokens == 0 {
            return 0.0;
        }

        let lowered = text.to_lowercase();
        let lowered = lowered.trim();
        let matches = self
            .keywords
            .iter()
            .filter(|(keyword, mapped)| **mapped == intent && lowered.contains(keyword.as_str()))
            .count();

        matches as f32 / tokens as f32
    }
}
