//! The quest bridge: quest events in, memory mutations out.
//!
//! A [`QuestBridge`] subscribes to a [`QuestBus`] and reacts to every
//! `(quest_id, event)` pair in two layers:
//!
//! 1. a generic progress flag per quest id — `Quest_<id>_Started`,
//!    `Quest_<id>_Completed`, `Quest_<id>_Failed` — for Start/Complete/Fail
//!    events;
//! 2. named-quest handlers for the ids the dialogue engine itself emits
//!    (`AcceptedQuest`, `RejectedQuest`, ...), which set session flags and
//!    apply relationship deltas for the bridge's NPC.
//!
//! Handlers run synchronously inside `publish`, before the controller's own
//! history append for the intent that triggered the event.

use parking_lot::Mutex;
use std::sync::Arc;

use palaver_core::memory::{DialogueMemory, SharedMemory};
use palaver_core::{Intent, QuestBus, QuestEventType, SubscriptionId};

/// Map a dialogue intent to the quest event it stands for, if any.
///
/// This is the full intent→quest mapping, including `Threaten`, which the
/// controller's default effect table deliberately leaves unmapped. Embedders
/// that want threats to have quest consequences register it as an extra
/// [`palaver_core::IntentEffect`].
#[must_use]
pub fn quest_event_for_intent(intent: Intent) -> Option<(&'static str, QuestEventType)> {
    match intent {
        Intent::AcceptQuest => Some(("AcceptedQuest", QuestEventType::StartQuest)),
        Intent::RejectQuest => Some(("RejectedQuest", QuestEventType::FailQuest)),
        Intent::Threaten => Some(("ThreatenedQuest", QuestEventType::FailQuest)),
        _ => None,
    }
}

/// Bus subscriber translating quest events into dialogue-memory state.
pub struct QuestBridge {
    bus: Arc<QuestBus>,
    memory: SharedMemory,
    npc_name: String,
    subscription: Option<SubscriptionId>,
}

impl QuestBridge {
    /// Attach a bridge to a bus: subscribes immediately and stays subscribed
    /// until [`Self::detach`] or drop. Relationship deltas apply to
    /// `npc_name`.
    #[must_use]
    pub fn attach(bus: Arc<QuestBus>, memory: SharedMemory, npc_name: impl Into<String>) -> Self {
        let npc_name = npc_name.into();
        let subscription = {
            let memory = Arc::clone(&memory);
            let npc_name = npc_name.clone();
            bus.subscribe(move |quest_id, event| {
                handle_quest_event(&memory, &npc_name, quest_id, event);
            })
        };

        Self {
            bus,
            memory,
            npc_name,
            subscription: Some(subscription),
        }
    }

    /// Stop reacting to bus events. Idempotent.
    pub fn detach(&mut self) {
        if let Some(id) = self.subscription.take() {
            self.bus.unsubscribe(id);
        }
    }

    /// Name of the NPC whose relationship score this bridge adjusts.
    #[must_use]
    pub fn npc_name(&self) -> &str {
        &self.npc_name
    }

    // -----------------------------------------------------------------------
    // Outbound notifications for an external quest system
    // -----------------------------------------------------------------------

    /// Announce on the bus that a quest started.
    pub fn notify_quest_started(&self, quest_id: &str) {
        self.bus.publish(quest_id, QuestEventType::StartQuest);
    }

    /// Announce on the bus that a quest completed.
    pub fn notify_quest_completed(&self, quest_id: &str) {
        self.bus.publish(quest_id, QuestEventType::CompleteQuest);
    }

    /// Announce on the bus that a quest failed.
    pub fn notify_quest_failed(&self, quest_id: &str) {
        self.bus.publish(quest_id, QuestEventType::FailQuest);
    }

    // -----------------------------------------------------------------------
    // Quest-state queries backed by memory flags
    // -----------------------------------------------------------------------

    /// Whether a quest was accepted: the per-quest started flag for
    /// `Some(id)`, the session-wide `HasAcceptedQuest` flag for `None`.
    #[must_use]
    pub fn has_quest_been_accepted(&self, quest_id: Option<&str>) -> bool {
        let memory = self.memory.lock();
        match quest_id {
            Some(id) => memory.get_flag(&format!("Quest_{id}_Started")),
            None => memory.get_flag("HasAcceptedQuest"),
        }
    }

    /// Whether a quest was completed; `None` queries the session-wide flag.
    #[must_use]
    pub fn has_quest_been_completed(&self, quest_id: Option<&str>) -> bool {
        let memory = self.memory.lock();
        match quest_id {
            Some(id) => memory.get_flag(&format!("Quest_{id}_Completed")),
            None => memory.get_flag("HasCompletedQuest"),
        }
    }

    /// Whether a quest was failed; `None` queries the session-wide flag.
    #[must_use]
    pub fn has_quest_been_failed(&self, quest_id: Option<&str>) -> bool {
        let memory = self.memory.lock();
        match quest_id {
            Some(id) => memory.get_flag(&format!("Quest_{id}_Failed")),
            None => memory.get_flag("HasFailedQuest"),
        }
    }

    /// The bridge NPC's current relationship score.
    #[must_use]
    pub fn current_relationship(&self) -> i32 {
        self.memory.lock().get_relationship(&self.npc_name)
    }
}

impl Drop for QuestBridge {
    fn drop(&mut self) {
        self.detach();
    }
}

impl std::fmt::Debug for QuestBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuestBridge")
            .field("npc_name", &self.npc_name)
            .field("attached", &self.subscription.is_some())
            .finish_non_exhaustive()
    }
}

/// React to one quest event: generic progress flag, then named handler.
fn handle_quest_event(
    memory: &Mutex<DialogueMemory>,
    npc_name: &str,
    quest_id: &str,
    event: QuestEventType,
) {
    tracing::debug!(quest_id, %event, "quest bridge reacting");

    let mut memory = memory.lock();
    match event {
        QuestEventType::StartQuest => memory.set_flag(format!("Quest_{quest_id}_Started"), true),
        QuestEventType::CompleteQuest => {
            memory.set_flag(format!("Quest_{quest_id}_Completed"), true);
        }
        QuestEventType::FailQuest => memory.set_flag(format!("Quest_{quest_id}_Failed"), true),
        QuestEventType::UpdateQuest | QuestEventType::CustomEvent => {}
    }

    match quest_id {
        "AcceptedQuest" => {
            memory.set_flag("HasAcceptedQuest", true);
            memory.modify_relationship(npc_name, 5);
        }
        "RejectedQuest" => {
            memory.set_flag("HasRejectedQuest", true);
            memory.modify_relationship(npc_name, -2);
        }
        "CompletedQuest" => {
            memory.set_flag("HasCompletedQuest", true);
            memory.modify_relationship(npc_name, 10);
        }
        "FailedQuest" => {
            memory.set_flag("HasFailedQuest", true);
            memory.modify_relationship(npc_name, -5);
        }
        "ThreatenedQuest" => {
            memory.set_flag("HasThreatenedNPC", true);
            memory.modify_relationship(npc_name, -10);
        }
        _ => {}
    }
}
