//! Engine configuration, loadable from TOML.
//!
//! Everything has a sensible default; a missing file section or field falls
//! back rather than erroring. The reveal section configures the
//! presentation-side text-reveal effect; the engine itself only carries the
//! values.

use serde::{Deserialize, Serialize};

use crate::controller::DEFAULT_ENTRY_NODE;
use crate::intent::Intent;

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Conversation settings.
    #[serde(default)]
    pub dialogue: DialogueSettings,
    /// Intent classifier settings.
    #[serde(default)]
    pub classifier: ClassifierSettings,
    /// Presentation text-reveal settings.
    #[serde(default)]
    pub reveal: RevealSettings,
}

impl EngineConfig {
    /// Load configuration from a TOML string.
    ///
    /// # Errors
    /// Returns [`crate::DialogueError::Config`] if the TOML is invalid.
    pub fn from_toml(toml_str: &str) -> crate::error::Result<Self> {
        toml::from_str(toml_str).map_err(|e| crate::DialogueError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}

/// Conversation-level settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogueSettings {
    /// Id of the graph node conversations begin at.
    #[serde(default = "default_entry_node")]
    pub entry_node: String,
    /// How many options a frontend should display at most.
    #[serde(default = "default_max_options")]
    pub max_options_displayed: usize,
}

impl Default for DialogueSettings {
    fn default() -> Self {
        Self {
            entry_node: DEFAULT_ENTRY_NODE.to_string(),
            max_options_displayed: 5,
        }
    }
}

/// A single keyword → intent entry for the classifier table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordMapping {
    /// Keyword substring to match (lowercased on insertion).
    pub keyword: String,
    /// Intent the keyword maps to.
    pub intent: Intent,
}

/// Intent classifier settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierSettings {
    /// Whether to seed the classifier with the built-in keyword set.
    #[serde(default = "default_true")]
    pub builtin_keywords: bool,
    /// Extra mappings appended after the built-ins, in listed order.
    /// Order matters: earlier mappings take match precedence.
    #[serde(default)]
    pub extra_keywords: Vec<KeywordMapping>,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            builtin_keywords: true,
            extra_keywords: Vec::new(),
        }
    }
}

/// Presentation text-reveal settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevealSettings {
    /// Whether frontends should reveal text glyph-by-glyph at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Glyphs revealed per tick.
    #[serde(default = "default_glyphs_per_tick")]
    pub glyphs_per_tick: usize,
}

impl Default for RevealSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            glyphs_per_tick: 1,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_entry_node() -> String {
    DEFAULT_ENTRY_NODE.to_string()
}

fn default_max_options() -> usize {
    5
}

fn default_glyphs_per_tick() -> usize {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config = EngineConfig::from_toml("").expect("parse");
        assert_eq!(config.dialogue.entry_node, "start");
        assert_eq!(config.dialogue.max_options_displayed, 5);
        assert!(config.classifier.builtin_keywords);
        assert!(config.classifier.extra_keywords.is_empty());
        assert!(config.reveal.enabled);
        assert_eq!(config.reveal.glyphs_per_tick, 1);
    }

    #[test]
    fn partial_sections_fill_in() {
        let config = EngineConfig::from_toml(
            r#"
            [dialogue]
            entry_node = "intro"

            [classifier]
            builtin_keywords = false

            [[classifier.extra_keywords]]
            keyword = "wares"
            intent = "AskForQuest"

            [reveal]
            glyphs_per_tick = 3
            "#,
        )
        .expect("parse");

        assert_eq!(config.dialogue.entry_node, "intro");
        assert_eq!(config.dialogue.max_options_displayed, 5);
        assert!(!config.classifier.builtin_keywords);
        assert_eq!(
            config.classifier.extra_keywords,
            vec![KeywordMapping {
                keyword: "wares".to_string(),
                intent: Intent::AskForQuest,
            }]
        );
        assert!(config.reveal.enabled);
        assert_eq!(config.reveal.glyphs_per_tick, 3);
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        let err = EngineConfig::from_toml("dialogue = 3").expect_err("must fail");
        assert!(matches!(err, crate::DialogueError::Config(_)));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("palaver.toml");
        std::fs::write(&path, "[dialogue]\nentry_node = \"gate\"\n").expect("write");

        let config = EngineConfig::from_file(&path).expect("load");
        assert_eq!(config.dialogue.entry_node, "gate");
    }
}
