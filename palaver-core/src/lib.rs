//! # Palaver Core Library
//!
//! Game-agnostic branching-dialogue engine for NPC conversations.
//!
//! A conversation walks a directed graph of [`DialogueNode`]s. The user picks
//! among each node's ordered options; every option may carry an [`Intent`] —
//! a closed category summarizing its communicative purpose. Intents trigger
//! side effects (quest events on the [`QuestBus`], appends to the
//! [`DialogueMemory`] history) before navigation, so a conversation is
//! replayable and inspectable after the fact.
//!
//! ## Components
//!
//! - [`Intent`] — closed taxonomy of communicative purposes
//! - [`DialogueGraph`] — externally authored node graph, read-only at runtime
//! - [`IntentClassifier`] — deterministic keyword matcher, first-match-wins
//! - [`DialogueMemory`] — session-scoped flags, relationship scores, intent log
//! - [`QuestBus`] — injectable publish/subscribe channel for quest events
//! - [`DialogueController`] — the conversation state machine tying it together
//!
//! ## Robustness Contract
//!
//! Live-conversation operations never panic and never return errors: a missing
//! collaborator, an out-of-range option index, or a dangling edge degrades to
//! a silent no-op with a `tracing` diagnostic. Authoring-time operations
//! (graph construction, config parsing) return [`DialogueError`].

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod classifier;
pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod graph;
pub mod intent;
pub mod memory;

pub use classifier::IntentClassifier;
pub use config::EngineConfig;
pub use controller::{DialogueContext, DialogueController, DialogueView, IntentEffect};
pub use error::{DialogueError, Result};
pub use events::{QuestBus, QuestEventType, SubscriptionId};
pub use graph::{DialogueGraph, DialogueNode, DialogueOption};
pub use intent::Intent;
pub use memory::{DialogueMemory, MemorySnapshot, SharedMemory};
