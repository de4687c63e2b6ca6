//! Property-based tests for the dialogue engine.
//!
//! Verifies the memory copy laws, relationship arithmetic, and classifier
//! determinism under random inputs.

use proptest::prelude::*;
use std::collections::HashMap;

use palaver_core::{DialogueMemory, Intent, IntentClassifier, MemorySnapshot};

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

fn arb_intent() -> impl Strategy<Value = Intent> {
    proptest::sample::select(Intent::ALL.to_vec())
}

fn arb_snapshot() -> impl Strategy<Value = MemorySnapshot> {
    (
        proptest::collection::hash_map("[a-z_]{1,12}", any::<bool>(), 0..8),
        proptest::collection::hash_map("[A-Za-z]{1,12}", -1000..1000i32, 0..8),
        proptest::collection::vec(arb_intent(), 0..16),
    )
        .prop_map(|(flags, relationships, intent_history)| MemorySnapshot {
            flags,
            relationships,
            intent_history,
        })
}

// ---------------------------------------------------------------------------
// Property: export-then-import reproduces an identical memory
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn memory_round_trip_is_identity(snapshot in arb_snapshot()) {
        let mut memory = DialogueMemory::new();
        memory.load(snapshot.clone());

        let exported = memory.snapshot();
        prop_assert_eq!(&exported, &snapshot);

        let mut restored = DialogueMemory::new();
        restored.load(exported);
        prop_assert_eq!(restored.snapshot(), snapshot);
    }
}

// ---------------------------------------------------------------------------
// Property: a snapshot is detached from later mutation
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn snapshot_unaffected_by_later_writes(
        snapshot in arb_snapshot(),
        intent in arb_intent(),
        delta in -50..50i32,
    ) {
        let mut memory = DialogueMemory::new();
        memory.load(snapshot.clone());
        let before = memory.snapshot();

        memory.record_intent(intent);
        memory.modify_relationship("Someone", delta);
        memory.set_flag("touched", true);

        // The earlier export must not have changed.
        prop_assert_eq!(before, snapshot);
    }
}

// ---------------------------------------------------------------------------
// Property: relationship deltas sum, from a default of zero
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn relationship_deltas_accumulate(deltas in proptest::collection::vec(-100..100i32, 0..20)) {
        let mut memory = DialogueMemory::new();
        for delta in &deltas {
            memory.modify_relationship("Bob", *delta);
        }
        prop_assert_eq!(memory.get_relationship("Bob"), deltas.iter().sum::<i32>());
    }
}

// ---------------------------------------------------------------------------
// Property: intent counts partition the history
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn intent_counts_partition_history(intents in proptest::collection::vec(arb_intent(), 0..32)) {
        let mut memory = DialogueMemory::new();
        for intent in &intents {
            memory.record_intent(*intent);
        }

        let mut counted = 0;
        for intent in Intent::ALL {
            let count = memory.intent_count(intent);
            counted += count;
            prop_assert_eq!(memory.has_intent_been_used(intent), count > 0);
        }
        prop_assert_eq!(counted, intents.len());
    }
}

// ---------------------------------------------------------------------------
// Property: the classifier is deterministic and self-consistent
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn classify_is_deterministic(text in ".{0,64}") {
        let classifier = IntentClassifier::with_defaults();
        prop_assert_eq!(classifier.classify(&text), classifier.classify(&text));
    }

    #[test]
    fn classify_result_is_discoverable(text in ".{0,64}") {
        let classifier = IntentClassifier::with_defaults();
        let intent = classifier.classify(&text);
        let possible = classifier.possible_intents(&text);

        if intent == Intent::None {
            // No keyword matched at all, or the input was empty.
            prop_assert!(possible.is_empty() || text.is_empty());
        } else {
            // The winning intent is among the discovered ones.
            prop_assert!(possible.contains(&intent));
        }
    }

    #[test]
    fn confidence_is_finite_and_non_negative(intent in arb_intent(), text in ".{0,64}") {
        let classifier = IntentClassifier::with_defaults();
        let confidence = classifier.confidence(intent, &text);
        prop_assert!(confidence.is_finite());
        prop_assert!(confidence >= 0.0);
    }
}

// ---------------------------------------------------------------------------
// Property: table mutation preserves first-match precedence of the rest
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn removing_unrelated_keyword_preserves_classification(text in "[a-z ]{0,32}") {
        let mut classifier = IntentClassifier::with_defaults();
        let before = classifier.classify(&text);
        // "greetings" never matches inputs that lack the substring.
        if !text.contains("greetings") {
            classifier.remove_mapping("greetings");
            prop_assert_eq!(classifier.classify(&text), before);
        }
    }
}
