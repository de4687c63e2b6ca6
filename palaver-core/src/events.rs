//! The quest event bus.
//!
//! An explicit, injectable publish/subscribe channel carrying
//! `(quest_id, QuestEventType)` pairs. The composition root that wires a
//! controller together with a quest bridge owns the bus and hands an
//! `Arc<QuestBus>` to both sides; nothing here is global or static, so tests
//! can intercept events deterministically.
//!
//! Publication is synchronous: every subscriber runs to completion before
//! `publish` returns. The controller relies on this ordering — intent side
//! effects dispatch, subscribers (which may reenter shared memory) finish,
//! and only then does the controller's own history append execute.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Kind of quest event carried on the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestEventType {
    /// A quest begins.
    StartQuest,
    /// A quest is completed.
    CompleteQuest,
    /// A quest is failed.
    FailQuest,
    /// Quest progress changed without starting or resolving it.
    UpdateQuest,
    /// A game-specific event outside the standard lifecycle.
    CustomEvent,
}

impl fmt::Display for QuestEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QuestEventType::StartQuest => "StartQuest",
            QuestEventType::CompleteQuest => "CompleteQuest",
            QuestEventType::FailQuest => "FailQuest",
            QuestEventType::UpdateQuest => "UpdateQuest",
            QuestEventType::CustomEvent => "CustomEvent",
        };
        write!(f, "{name}")
    }
}

/// Handle returned by [`QuestBus::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type QuestHandler = Arc<dyn Fn(&str, QuestEventType) + Send + Sync>;

/// Synchronous publish/subscribe channel for quest events.
///
/// Handlers may themselves publish, subscribe, or unsubscribe: `publish`
/// snapshots the subscriber list and releases the lock before invoking
/// anything, so reentrancy cannot deadlock. A handler added or removed
/// during a publish takes effect from the next publish on.
#[derive(Default)]
pub struct QuestBus {
    inner: Mutex<BusState>,
}

#[derive(Default)]
struct BusState {
    next_id: u64,
    subscribers: Vec<(SubscriptionId, QuestHandler)>,
}

impl QuestBus {
    /// Create a bus with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a bus behind the shared handle the controller and bridge take.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Register a handler for every published quest event.
    pub fn subscribe(
        &self,
        handler: impl Fn(&str, QuestEventType) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let mut state = self.inner.lock();
        let id = SubscriptionId(state.next_id);
        state.next_id += 1;
        state.subscribers.push((id, Arc::new(handler)));
        id
    }

    /// Remove a handler. Returns whether anything was removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut state = self.inner.lock();
        let before = state.subscribers.len();
        state.subscribers.retain(|(sub_id, _)| *sub_id != id);
        state.subscribers.len() != before
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().subscribers.len()
    }

    /// Publish a quest event to every subscriber, synchronously.
    pub fn publish(&self, quest_id: &str, event: QuestEventType) {
        tracing::debug!(quest_id, %event, "quest event published");

        let handlers: Vec<QuestHandler> = {
            let state = self.inner.lock();
            state
                .subscribers
                .iter()
                .map(|(_, handler)| Arc::clone(handler))
                .collect()
        };
        for handler in handlers {
            handler(quest_id, event);
        }
    }
}

impl fmt::Debug for QuestBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuestBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
