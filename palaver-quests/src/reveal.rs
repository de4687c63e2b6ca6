//! Glyph-by-glyph text reveal for dialogue frontends.
//!
//! The engine hands a node's full text to the view in one call; frontends
//! that want a typewriter feel drive a [`TextReveal`] from their own tick
//! source. This is deliberately a plain state machine, not a coroutine or
//! async task: a monotonic position counter advanced by [`TextReveal::tick`],
//! with [`TextReveal::skip`] as the cancel transition.
//!
//! Contract with the conversation: whenever a new node's text arrives,
//! [`TextReveal::restart`] with it; when the conversation ends, either drop
//! the reveal or `skip` it. A reveal never outlives the text it was built
//! for.

use palaver_core::config::RevealSettings;

/// Tick-driven reveal state over one string.
///
/// Positions count glyphs (`char`s), not bytes, so [`TextReveal::visible`]
/// never splits a multi-byte character.
#[derive(Debug, Clone)]
pub struct TextReveal {
    glyphs: Vec<char>,
    position: usize,
    glyphs_per_tick: usize,
}

impl TextReveal {
    /// Start revealing `text`, `glyphs_per_tick` glyphs per tick.
    ///
    /// A rate of 0 is treated as 1: a reveal that cannot advance would make
    /// every conversation stall forever.
    #[must_use]
    pub fn new(text: &str, glyphs_per_tick: usize) -> Self {
        Self {
            glyphs: text.chars().collect(),
            position: 0,
            glyphs_per_tick: glyphs_per_tick.max(1),
        }
    }

    /// Build a reveal from configuration. A disabled reveal starts already
    /// complete, so frontends need no separate code path.
    #[must_use]
    pub fn from_settings(text: &str, settings: &RevealSettings) -> Self {
        let mut reveal = Self::new(text, settings.glyphs_per_tick);
        if !settings.enabled {
            reveal.skip();
        }
        reveal
    }

    /// Replace the text and rewind to the beginning. The cancel-and-restart
    /// transition for a new dialogue node.
    pub fn restart(&mut self, text: &str) {
        self.glyphs = text.chars().collect();
        self.position = 0;
    }

    /// Advance one tick. Returns how many new glyphs became visible.
    pub fn tick(&mut self) -> usize {
        let advance = self.glyphs_per_tick.min(self.glyphs.len() - self.position);
        self.position += advance;
        advance
    }

    /// Jump to the end: the skip / cancel transition.
    pub fn skip(&mut self) {
        self.position = self.glyphs.len();
    }

    /// The currently revealed prefix.
    #[must_use]
    pub fn visible(&self) -> String {
        self.glyphs[..self.position].iter().collect()
    }

    /// Glyphs revealed so far.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Total glyphs in the text.
    #[must_use]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Whether the text is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Whether every glyph is visible.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.position == self.glyphs.len()
    }
}
