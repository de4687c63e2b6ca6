//! The closed intent taxonomy.
//!
//! An [`Intent`] summarizes the communicative purpose of a line of dialogue
//! or a user choice. The set is closed on purpose: downstream systems (the
//! controller's effect table, the quest bridge, memory queries) match on it
//! exhaustively, and the classifier maps arbitrary text into it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Communicative purpose of a dialogue line or option.
///
/// `None` is the absence of a signal — options default to it, the classifier
/// returns it for unmatched input, and the controller never records it in
/// the intent history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Intent {
    /// No communicative signal.
    #[default]
    None,
    /// A greeting.
    Greet,
    /// Asking whether a quest is available.
    AskForQuest,
    /// Accepting an offered quest.
    AcceptQuest,
    /// Turning an offered quest down.
    RejectQuest,
    /// Threatening the interlocutor.
    Threaten,
    /// Ending the conversation.
    Goodbye,
}

impl Intent {
    /// Every taxonomy value, `None` included.
    pub const ALL: [Intent; 7] = [
        Intent::None,
        Intent::Greet,
        Intent::AskForQuest,
        Intent::AcceptQuest,
        Intent::RejectQuest,
        Intent::Threaten,
        Intent::Goodbye,
    ];
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Intent::None => "None",
            Intent::Greet => "Greet",
            Intent::AskForQuest => "AskForQuest",
            Intent::AcceptQuest => "AcceptQuest",
            Intent::RejectQuest => "RejectQuest",
            Intent::Threaten => "Threaten",
            Intent::Goodbye => "Goodbye",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_none() {
        assert_eq!(Intent::default(), Intent::None);
    }

    #[test]
    fn all_values_are_distinct() {
        for (i, a) in Intent::ALL.iter().enumerate() {
            for b in &Intent::ALL[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn serde_round_trip() {
        for intent in Intent::ALL {
            let json = serde_json::to_string(&intent).expect("serialize");
            let back: Intent = serde_json::from_str(&json).expect("deserialize");
            assert_eq!(intent, back);
        }
    }
}
