//! Session-scoped dialogue memory.
//!
//! [`DialogueMemory`] outlives any single conversation: boolean flags,
//! integer relationship scores keyed by actor name, and an append-only
//! intent history. The controller appends to it; external collaborators
//! (the quest bridge) read and mutate it through the same shared handle.
//!
//! The history grows without bound. That is a design choice for a bounded
//! play session, not a leak: eviction would destroy the replayability the
//! history exists for.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use crate::intent::Intent;

/// Shared handle to a [`DialogueMemory`].
///
/// The engine is single-threaded and cooperative; the mutex exists because
/// relationship modification is read-then-write and therefore unsafe under
/// concurrent writers in a threaded embedding. Callers must not hold the
/// lock across a [`crate::QuestBus::publish`] — bus handlers take it.
pub type SharedMemory = Arc<Mutex<DialogueMemory>>;

/// Owned export/import shape of a memory: the same three collections.
///
/// [`DialogueMemory::load`] replaces the entire state with a snapshot and
/// [`DialogueMemory::snapshot`] exports an owned copy — whole-state
/// semantics, never a merge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemorySnapshot {
    /// Boolean flags by name.
    pub flags: HashMap<String, bool>,
    /// Relationship scores by actor name.
    pub relationships: HashMap<String, i32>,
    /// Append-only intent history, oldest first.
    pub intent_history: Vec<Intent>,
}

/// Mutable store of flags, relationship scores, and intent history.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DialogueMemory {
    flags: HashMap<String, bool>,
    relationships: HashMap<String, i32>,
    intent_history: Vec<Intent>,
}

impl DialogueMemory {
    /// Create an empty memory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty memory behind a shared handle.
    #[must_use]
    pub fn shared() -> SharedMemory {
        Arc::new(Mutex::new(Self::new()))
    }

    // -----------------------------------------------------------------------
    // Flags
    // -----------------------------------------------------------------------

    /// Set a boolean flag.
    pub fn set_flag(&mut self, name: impl Into<String>, value: bool) {
        self.flags.insert(name.into(), value);
    }

    /// Read a flag; absent flags read as `false`.
    #[must_use]
    pub fn get_flag(&self, name: &str) -> bool {
        self.flags.get(name).copied().unwrap_or(false)
    }

    /// Whether the flag has ever been set (even to `false`).
    #[must_use]
    pub fn has_flag(&self, name: &str) -> bool {
        self.flags.contains_key(name)
    }

    // -----------------------------------------------------------------------
    // Relationships
    // -----------------------------------------------------------------------

    /// Set an actor's relationship score outright.
    pub fn set_relationship(&mut self, actor: impl Into<String>, value: i32) {
        self.relationships.insert(actor.into(), value);
    }

    /// Read an actor's relationship score; absent actors score 0.
    #[must_use]
    pub fn get_relationship(&self, actor: &str) -> i32 {
        self.relationships.get(actor).copied().unwrap_or(0)
    }

    /// Adjust an actor's relationship score by a delta (get-then-set).
    pub fn modify_relationship(&mut self, actor: &str, delta: i32) {
        let current = self.get_relationship(actor);
        self.set_relationship(actor, current + delta);
    }

    // -----------------------------------------------------------------------
    // Intent history
    // -----------------------------------------------------------------------

    /// Append an intent to the history.
    pub fn record_intent(&mut self, intent: Intent) {
        self.intent_history.push(intent);
    }

    /// The full intent history, oldest first.
    #[must_use]
    pub fn intent_history(&self) -> &[Intent] {
        &self.intent_history
    }

    /// Whether the intent appears anywhere in the history.
    #[must_use]
    pub fn has_intent_been_used(&self, intent: Intent) -> bool {
        self.intent_history.contains(&intent)
    }

    /// How many times the intent appears in the history.
    #[must_use]
    pub fn intent_count(&self, intent: Intent) -> usize {
        self.intent_history.iter().filter(|&&i| i == intent).count()
    }

    // -----------------------------------------------------------------------
    // Whole-state operations
    // -----------------------------------------------------------------------

    /// Empty all three collections.
    pub fn clear(&mut self) {
        self.flags.clear();
        self.relationships.clear();
        self.intent_history.clear();
    }

    /// Replace the entire state with a snapshot. Replacement, not merge.
    pub fn load(&mut self, snapshot: MemorySnapshot) {
        self.flags = snapshot.flags;
        self.relationships = snapshot.relationships;
        self.intent_history = snapshot.intent_history;
    }

    /// Export an owned copy of the entire state.
    #[must_use]
    pub fn snapshot(&self) -> MemorySnapshot {
        MemorySnapshot {
            flags: self.flags.clone(),
            relationships: self.relationships.clone(),
            intent_history: self.intent_history.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_flag_reads_false() {
        let memory = DialogueMemory::new();
        assert!(!memory.get_flag("met_the_king"));
        assert!(!memory.has_flag("met_the_king"));
    }

    #[test]
    fn flag_set_to_false_still_exists() {
        let mut memory = DialogueMemory::new();
        memory.set_flag("met_the_king", false);
        assert!(!memory.get_flag("met_the_king"));
        assert!(memory.has_flag("met_the_king"));
    }

    #[test]
    fn relationship_defaults_and_deltas() {
        let mut memory = DialogueMemory::new();
        assert_eq!(memory.get_relationship("Bob"), 0);

        memory.modify_relationship("Bob", 5);
        memory.modify_relationship("Bob", -2);
        assert_eq!(memory.get_relationship("Bob"), 3);

        memory.set_relationship("Bob", -10);
        assert_eq!(memory.get_relationship("Bob"), -10);
    }

    #[test]
    fn intent_history_is_append_only_and_ordered() {
        let mut memory = DialogueMemory::new();
        memory.record_intent(Intent::Greet);
        memory.record_intent(Intent::AskForQuest);
        memory.record_intent(Intent::Greet);

        assert_eq!(
            memory.intent_history(),
            &[Intent::Greet, Intent::AskForQuest, Intent::Greet]
        );
        assert!(memory.has_intent_been_used(Intent::AskForQuest));
        assert!(!memory.has_intent_been_used(Intent::Threaten));
        assert_eq!(memory.intent_count(Intent::Greet), 2);
        assert_eq!(memory.intent_count(Intent::Goodbye), 0);
    }

    #[test]
    fn snapshot_then_load_round_trips() {
        let mut memory = DialogueMemory::new();
        memory.set_flag("HasAcceptedQuest", true);
        memory.set_relationship("Goran", 7);
        memory.record_intent(Intent::AcceptQuest);

        let snapshot = memory.snapshot();

        let mut restored = DialogueMemory::new();
        restored.set_flag("stale", true); // must be replaced, not merged
        restored.load(snapshot.clone());

        assert_eq!(restored.snapshot(), snapshot);
        assert!(!restored.has_flag("stale"));
        assert_eq!(restored.get_relationship("Goran"), 7);
        assert_eq!(restored.intent_history(), &[Intent::AcceptQuest]);
    }

    #[test]
    fn snapshot_is_detached_from_source() {
        let mut memory = DialogueMemory::new();
        memory.record_intent(Intent::Greet);

        let snapshot = memory.snapshot();
        memory.record_intent(Intent::Goodbye);

        assert_eq!(snapshot.intent_history, vec![Intent::Greet]);
        assert_eq!(memory.intent_history().len(), 2);
    }

    #[test]
    fn clear_empties_everything() {
        let mut memory = DialogueMemory::new();
        memory.set_flag("a", true);
        memory.set_relationship("b", 1);
        memory.record_intent(Intent::Greet);

        memory.clear();

        assert!(!memory.has_flag("a"));
        assert_eq!(memory.get_relationship("b"), 0);
        assert!(memory.intent_history().is_empty());
    }

    #[test]
    fn snapshot_serde_round_trip() {
        let mut memory = DialogueMemory::new();
        memory.set_flag("Quest_AcceptedQuest_Started", true);
        memory.record_intent(Intent::AcceptQuest);

        let json = serde_json::to_string(&memory.snapshot()).expect("serialize");
        let parsed: MemorySnapshot = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, memory.snapshot());
    }
}
