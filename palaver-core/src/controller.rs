//! The dialogue controller: the conversation state machine.
//!
//! A controller is Inactive (no context) or Active (context pointing at a
//! current node), one conversation at a time. It holds shared references to
//! a [`DialogueGraph`], a [`SharedMemory`], and a [`QuestBus`], and owns its
//! [`DialogueContext`] and its presentation port exclusively.
//!
//! Every transition is guarded and every guard rejection is a silent no-op:
//! the controller is safe to call from any external trigger without
//! precondition checks by the caller. Guards emit `tracing` diagnostics,
//! which are observability, not contract.
//!
//! Intent side effects are a table of [`IntentEffect`] descriptors keyed by
//! [`Intent`], seeded at construction and extensible at runtime. Effect
//! dispatch always precedes the navigation or termination it may cause, and
//! bus subscribers run to completion before the controller's own history
//! append — the interleaving external collaborators depend on.

use std::collections::HashMap;
use std::sync::Arc;

use crate::events::{QuestBus, QuestEventType};
use crate::graph::{DialogueGraph, DialogueOption};
use crate::intent::Intent;
use crate::memory::SharedMemory;

/// The canonical entry node id a graph is expected to provide.
pub const DEFAULT_ENTRY_NODE: &str = "start";

/// Presentation port consumed by the controller.
///
/// Implementations render text and option labels however they like; the
/// reverse direction (the user picked option `i`) is the embedder's wiring
/// back into [`DialogueController::select_option`], with `i` relative to
/// the most recent [`Self::update_display`] call.
pub trait DialogueView {
    /// A conversation with `speaker` began. Called once per conversation.
    fn show_conversation(&mut self, speaker: &str);

    /// The conversation ended. Called once per conversation; implementations
    /// must also cancel any in-flight text-reveal effect.
    fn hide_conversation(&mut self);

    /// A node was entered: render its text and its options verbatim.
    fn update_display(&mut self, text: &str, options: &[DialogueOption]);
}

/// Ephemeral state of one in-progress conversation.
///
/// Created at conversation start, destroyed at conversation end, never
/// shared across conversations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueContext {
    /// Name of the actor currently speaking.
    pub current_speaker: String,
    /// Id of the node the conversation is at.
    pub current_node_id: String,
}

/// Side effect an intent triggers when a tagged option is selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentEffect {
    /// Terminate the active conversation.
    EndConversation,
    /// Publish a quest event on the bus.
    TriggerQuest {
        /// Quest id carried on the bus.
        quest_id: String,
        /// Event kind carried on the bus.
        event: QuestEventType,
    },
}

/// The conversation state machine.
pub struct DialogueController {
    graph: Option<Arc<DialogueGraph>>,
    view: Option<Box<dyn DialogueView>>,
    memory: Option<SharedMemory>,
    quests: Arc<QuestBus>,
    entry_node: String,
    effects: HashMap<Intent, IntentEffect>,
    context: Option<DialogueContext>,
}

impl DialogueController {
    /// Create a controller wired to a quest bus, with the default effect
    /// table and the canonical `"start"` entry node.
    ///
    /// Graph, memory, and view are attached separately; any of them may be
    /// absent, in which case the operations needing them degrade to no-ops.
    #[must_use]
    pub fn new(quests: Arc<QuestBus>) -> Self {
        Self {
            graph: None,
            view: None,
            memory: None,
            quests,
            entry_node: DEFAULT_ENTRY_NODE.to_string(),
            effects: Self::default_effects(),
            context: None,
        }
    }

    /// The reference effect table: `Goodbye` ends the conversation,
    /// `AcceptQuest` starts the `"AcceptedQuest"` quest, `RejectQuest`
    /// fails the `"RejectedQuest"` quest. Accepting deliberately triggers a
    /// *start* event, not a completion. All other intents have no
    /// controller-side effect.
    fn default_effects() -> HashMap<Intent, IntentEffect> {
        HashMap::from([
            (Intent::Goodbye, IntentEffect::EndConversation),
            (
                Intent::AcceptQuest,
                IntentEffect::TriggerQuest {
                    quest_id: "AcceptedQuest".to_string(),
                    event: QuestEventType::StartQuest,
                },
            ),
            (
                Intent::RejectQuest,
                IntentEffect::TriggerQuest {
                    quest_id: "RejectedQuest".to_string(),
                    event: QuestEventType::FailQuest,
                },
            ),
        ])
    }

    // -----------------------------------------------------------------------
    // Wiring
    // -----------------------------------------------------------------------

    /// Attach the dialogue graph to walk.
    pub fn set_graph(&mut self, graph: Arc<DialogueGraph>) {
        self.graph = Some(graph);
    }

    /// Attach the shared session memory.
    pub fn set_memory(&mut self, memory: SharedMemory) {
        self.memory = Some(memory);
    }

    /// Attach the presentation port.
    pub fn set_view(&mut self, view: Box<dyn DialogueView>) {
        self.view = Some(view);
    }

    /// Override the entry node id (canonically `"start"`).
    pub fn set_entry_node(&mut self, entry_node: impl Into<String>) {
        self.entry_node = entry_node.into();
    }

    /// Apply conversation settings from an [`crate::EngineConfig`].
    pub fn configure(&mut self, config: &crate::EngineConfig) {
        self.entry_node = config.dialogue.entry_node.clone();
    }

    /// Register (or replace) the effect an intent triggers.
    pub fn register_effect(&mut self, intent: Intent, effect: IntentEffect) {
        self.effects.insert(intent, effect);
    }

    /// Remove an intent's effect; the intent still lands in the history.
    pub fn clear_effect(&mut self, intent: Intent) -> Option<IntentEffect> {
        self.effects.remove(&intent)
    }

    /// The effect currently registered for an intent, if any.
    #[must_use]
    pub fn effect_for(&self, intent: Intent) -> Option<&IntentEffect> {
        self.effects.get(&intent)
    }

    // -----------------------------------------------------------------------
    // State
    // -----------------------------------------------------------------------

    /// Whether a conversation is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.context.is_some()
    }

    /// The active conversation's context, if any.
    #[must_use]
    pub fn context(&self) -> Option<&DialogueContext> {
        self.context.as_ref()
    }

    /// Id of the node the active conversation is at, if any.
    #[must_use]
    pub fn current_node_id(&self) -> Option<&str> {
        self.context.as_ref().map(|c| c.current_node_id.as_str())
    }

    /// The configured entry node id.
    #[must_use]
    pub fn entry_node(&self) -> &str {
        &self.entry_node
    }

    // -----------------------------------------------------------------------
    // Transitions
    // -----------------------------------------------------------------------

    /// Begin a conversation with `speaker`.
    ///
    /// No-op if a conversation is already active (first caller wins) or no
    /// graph is configured. A graph lacking the entry node is refused up
    /// front with a warning, leaving the controller Inactive, rather than
    /// activating into a context no node backs.
    pub fn start_dialogue(&mut self, speaker: &str) {
        if self.context.is_some() {
            tracing::debug!(speaker, "start_dialogue ignored: conversation already active");
            return;
        }
        let Some(graph) = self.graph.clone() else {
            tracing::debug!(speaker, "start_dialogue ignored: no graph configured");
            return;
        };
        if !graph.contains(&self.entry_node) {
            tracing::warn!(
                entry_node = %self.entry_node,
                "start_dialogue refused: graph has no entry node"
            );
            return;
        }

        self.context = Some(DialogueContext {
            current_speaker: speaker.to_string(),
            current_node_id: self.entry_node.clone(),
        });
        if let Some(view) = self.view.as_mut() {
            view.show_conversation(speaker);
        }

        let entry = self.entry_node.clone();
        self.navigate_to(&entry);
    }

    /// End the active conversation.
    ///
    /// No-op if already Inactive. Destroys the context and notifies the view.
    pub fn end_dialogue(&mut self) {
        if self.context.take().is_none() {
            tracing::debug!("end_dialogue ignored: no active conversation");
            return;
        }
        if let Some(view) = self.view.as_mut() {
            view.hide_conversation();
        }
    }

    /// Select the `index`-th option of the current node.
    ///
    /// No-op if Inactive or the index is out of range. Otherwise: the
    /// option's non-None intent is processed first (side effects before the
    /// navigation or termination they may cause), then the conversation
    /// follows the option's destination, or ends if it has none.
    pub fn select_option(&mut self, index: usize) {
        let Some(context) = self.context.as_ref() else {
            tracing::debug!(index, "select_option ignored: no active conversation");
            return;
        };
        let Some(graph) = self.graph.clone() else {
            tracing::debug!(index, "select_option ignored: no graph configured");
            return;
        };
        let Some(node) = graph.get_node(&context.current_node_id) else {
            tracing::debug!(
                index,
                node_id = %context.current_node_id,
                "select_option ignored: current node not in graph"
            );
            return;
        };
        let Some(option) = node.options.get(index) else {
            tracing::debug!(
                index,
                node_id = %node.id,
                options = node.options.len(),
                "select_option ignored: index out of range"
            );
            return;
        };
        let option = option.clone();

        if option.intent != Intent::None {
            self.process_intent(option.intent);
        }

        match option.next_node() {
            Some(destination) => {
                let destination = destination.to_string();
                self.navigate_to(&destination);
            }
            None => self.end_dialogue(),
        }
    }

    /// Move the active conversation to `node_id`.
    ///
    /// No-op if Inactive, no graph is configured, or the id is unknown — a
    /// dangling edge is absorbed silently and the conversation stalls at
    /// its current node. On success the context advances and the view
    /// receives the node's text and options.
    pub fn navigate_to(&mut self, node_id: &str) {
        let Some(context) = self.context.as_mut() else {
            tracing::debug!(node_id, "navigate_to ignored: no active conversation");
            return;
        };
        let Some(graph) = self.graph.clone() else {
            tracing::debug!(node_id, "navigate_to ignored: no graph configured");
            return;
        };
        let Some(node) = graph.get_node(node_id) else {
            tracing::warn!(node_id, "navigate_to ignored: dangling node reference");
            return;
        };

        context.current_node_id = node_id.to_string();
        if let Some(view) = self.view.as_mut() {
            view.update_display(&node.text, &node.options);
        }
    }

    /// Dispatch an intent's side effect, then record it in memory.
    ///
    /// Only non-None intents reach this routine; an option without an
    /// intent never touches the history. Bus subscribers run synchronously
    /// inside the effect dispatch, so their memory writes land before the
    /// `record_intent` append here.
    fn process_intent(&mut self, intent: Intent) {
        match self.effects.get(&intent).cloned() {
            Some(IntentEffect::EndConversation) => {
                tracing::debug!(%intent, "intent effect: ending conversation");
                self.end_dialogue();
            }
            Some(IntentEffect::TriggerQuest { quest_id, event }) => {
                tracing::debug!(%intent, quest_id, %event, "intent effect: quest trigger");
                self.quests.publish(&quest_id, event);
            }
            None => {
                tracing::trace!(%intent, "intent has no registered effect");
            }
        }

        if let Some(memory) = &self.memory {
            memory.lock().record_intent(intent);
        }
    }
}

impl std::fmt::Debug for DialogueController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DialogueController")
            .field("active", &self.is_active())
            .field("entry_node", &self.entry_node)
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}
