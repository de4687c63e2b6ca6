//! # palaver-quests — Quest-System Integration for Palaver
//!
//! This crate sits on the external-collaborator side of the engine boundary:
//! it consumes the events `palaver-core` publishes and mutates the shared
//! [`palaver_core::DialogueMemory`] in response.
//!
//! ## Modules
//!
//! - `bridge` — [`bridge::QuestBridge`], a bus subscriber translating quest
//!   events into memory flags and relationship deltas
//! - `reveal` — [`reveal::TextReveal`], the cancellable tick-driven
//!   glyph-by-glyph reveal state frontends drive
//!
//! The bridge runs synchronously inside [`palaver_core::QuestBus::publish`],
//! so its memory writes are visible before the controller's own
//! history append for the same intent — conversation state, quest state,
//! and memory stay mutually consistent at every dispatch boundary.

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod bridge;
pub mod reveal;

pub use bridge::{QuestBridge, quest_event_for_intent};
pub use reveal::TextReveal;
