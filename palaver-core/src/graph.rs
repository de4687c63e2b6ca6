//! The dialogue graph data model.
//!
//! A graph is a read-only mapping from node id to [`DialogueNode`]. Nodes
//! carry display text plus an ordered list of [`DialogueOption`]s; option
//! order is meaningful — it is both the on-screen order and the index the
//! user selects by.
//!
//! Graphs are authored externally (an editor, a data file, test code) and
//! never mutated during a conversation. Construction rejects duplicate node
//! ids; dangling destinations are legal and surface only through the
//! [`DialogueGraph::dangling_edges`] diagnostic, because a dangling edge is
//! a recoverable authoring bug, not a runtime fault.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{DialogueError, Result};
use crate::intent::Intent;

/// A labeled edge out of a dialogue node.
///
/// `destination: None` (or an empty string, which [`Self::next_node`]
/// normalizes away) means "selecting this option ends the conversation".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueOption {
    /// Text shown to the user for this choice.
    pub text: String,
    /// Id of the node this option leads to; `None` or empty ends the
    /// conversation.
    #[serde(default)]
    pub destination: Option<String>,
    /// Authored intent tag; defaults to [`Intent::None`].
    #[serde(default)]
    pub intent: Intent,
}

impl DialogueOption {
    /// Create an option leading to `destination`, with no intent tag.
    #[must_use]
    pub fn new(text: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            destination: Some(destination.into()),
            intent: Intent::None,
        }
    }

    /// Create a terminal option — selecting it ends the conversation.
    #[must_use]
    pub fn terminal(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            destination: None,
            intent: Intent::None,
        }
    }

    /// Attach an intent tag to this option.
    #[must_use]
    pub fn with_intent(mut self, intent: Intent) -> Self {
        self.intent = intent;
        self
    }

    /// The destination node id, if this option continues the conversation.
    ///
    /// Empty-string destinations are treated the same as `None`.
    #[must_use]
    pub fn next_node(&self) -> Option<&str> {
        self.destination.as_deref().filter(|id| !id.is_empty())
    }
}

/// A point in the dialogue graph: displayed text plus outgoing options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueNode {
    /// Unique key within the graph.
    pub id: String,
    /// Text the speaker delivers at this node.
    pub text: String,
    /// Ordered outgoing options; order defines display and selection index.
    #[serde(default)]
    pub options: Vec<DialogueOption>,
}

impl DialogueNode {
    /// Create a node with the given options.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        options: Vec<DialogueOption>,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            options,
        }
    }
}

/// An option whose destination references no node in the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingEdge {
    /// Node the offending option belongs to.
    pub node_id: String,
    /// Index of the option within that node.
    pub option_index: usize,
    /// The destination id that resolves to nothing.
    pub destination: String,
}

/// Serialized shape of a graph: a flat node list.
///
/// Keyed storage is an engine concern; the exchange form stays a list so
/// external authoring tools never deal with map-key/field-id duplication.
#[derive(Debug, Serialize, Deserialize)]
struct GraphFile {
    nodes: Vec<DialogueNode>,
}

/// A read-only dialogue graph: node id → node.
#[derive(Debug, Clone, Default)]
pub struct DialogueGraph {
    nodes: HashMap<String, DialogueNode>,
}

impl DialogueGraph {
    /// Build a graph from a list of nodes.
    ///
    /// # Errors
    /// Returns [`DialogueError::DuplicateNode`] if two nodes share an id.
    pub fn from_nodes(nodes: impl IntoIterator<Item = DialogueNode>) -> Result<Self> {
        let mut map = HashMap::new();
        for node in nodes {
            let id = node.id.clone();
            if map.insert(id.clone(), node).is_some() {
                return Err(DialogueError::DuplicateNode(id));
            }
        }
        Ok(Self { nodes: map })
    }

    /// Parse a graph from a JSON document of the form `{"nodes": [...]}`.
    ///
    /// # Errors
    /// Returns [`DialogueError::Parse`] on malformed JSON and
    /// [`DialogueError::DuplicateNode`] on id collisions.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: GraphFile =
            serde_json::from_str(json).map_err(|e| DialogueError::Parse(e.to_string()))?;
        Self::from_nodes(file.nodes)
    }

    /// Parse a graph from a TOML document with `[[nodes]]` tables.
    ///
    /// # Errors
    /// Returns [`DialogueError::Parse`] on malformed TOML and
    /// [`DialogueError::DuplicateNode`] on id collisions.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let file: GraphFile =
            toml::from_str(toml_str).map_err(|e| DialogueError::Parse(e.to_string()))?;
        Self::from_nodes(file.nodes)
    }

    /// Serialize the graph back to its JSON exchange form, nodes sorted by id.
    ///
    /// # Errors
    /// Returns [`DialogueError::Parse`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        let mut nodes: Vec<DialogueNode> = self.nodes.values().cloned().collect();
        nodes.sort_by(|a, b| a.id.cmp(&b.id));
        serde_json::to_string_pretty(&GraphFile { nodes })
            .map_err(|e| DialogueError::Parse(e.to_string()))
    }

    /// Look up a node by id.
    #[must_use]
    pub fn get_node(&self, id: &str) -> Option<&DialogueNode> {
        self.nodes.get(id)
    }

    /// Whether a node with this id exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of nodes in the graph.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over all node ids, in no particular order.
    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    /// Every option whose non-empty destination references no node.
    ///
    /// Dangling edges stall the conversation at selection time rather than
    /// failing it; this diagnostic exists so authoring pipelines can report
    /// them up front.
    #[must_use]
    pub fn dangling_edges(&self) -> Vec<DanglingEdge> {
        let mut dangling = Vec::new();
        for node in self.nodes.values() {
            for (index, option) in node.options.iter().enumerate() {
                if let Some(dest) = option.next_node()
                    && !self.nodes.contains_key(dest)
                {
                    dangling.push(DanglingEdge {
                        node_id: node.id.clone(),
                        option_index: index,
                        destination: dest.to_string(),
                    });
                }
            }
        }
        dangling
    }

    /// Check the graph against an entry node id and report dangling edges.
    ///
    /// # Errors
    /// Returns [`DialogueError::MissingEntryNode`] if `entry` is not a key.
    pub fn validate(&self, entry: &str) -> Result<Vec<DanglingEdge>> {
        if !self.nodes.contains_key(entry) {
            return Err(DialogueError::MissingEntryNode(entry.to_string()));
        }
        Ok(self.dangling_edges())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_node_graph() -> DialogueGraph {
        DialogueGraph::from_nodes([
            DialogueNode::new(
                "start",
                "Hello there.",
                vec![
                    DialogueOption::new("Any work for me?", "quest")
                        .with_intent(Intent::AskForQuest),
                    DialogueOption::terminal("Goodbye.").with_intent(Intent::Goodbye),
                ],
            ),
            DialogueNode::new(
                "quest",
                "As it happens, yes.",
                vec![DialogueOption::terminal("I'll do it.").with_intent(Intent::AcceptQuest)],
            ),
        ])
        .expect("unique ids")
    }

    #[test]
    fn lookup_by_id() {
        let graph = two_node_graph();
        assert!(graph.contains("start"));
        assert_eq!(graph.get_node("quest").map(|n| n.options.len()), Some(1));
        assert!(graph.get_node("missing").is_none());
    }

    #[test]
    fn duplicate_ids_rejected() {
        let result = DialogueGraph::from_nodes([
            DialogueNode::new("start", "a", vec![]),
            DialogueNode::new("start", "b", vec![]),
        ]);
        assert!(matches!(result, Err(DialogueError::DuplicateNode(id)) if id == "start"));
    }

    #[test]
    fn empty_destination_is_terminal() {
        let option = DialogueOption {
            text: "Leave".to_string(),
            destination: Some(String::new()),
            intent: Intent::None,
        };
        assert_eq!(option.next_node(), None);
    }

    #[test]
    fn dangling_edges_reported() {
        let graph = DialogueGraph::from_nodes([DialogueNode::new(
            "start",
            "Hi",
            vec![DialogueOption::new("Onward", "missing")],
        )])
        .expect("unique ids");

        let dangling = graph.dangling_edges();
        assert_eq!(dangling.len(), 1);
        assert_eq!(dangling[0].node_id, "start");
        assert_eq!(dangling[0].option_index, 0);
        assert_eq!(dangling[0].destination, "missing");
    }

    #[test]
    fn validate_requires_entry_node() {
        let graph = two_node_graph();
        assert!(graph.validate("start").is_ok());
        assert!(matches!(
            graph.validate("prologue"),
            Err(DialogueError::MissingEntryNode(id)) if id == "prologue"
        ));
    }

    #[test]
    fn json_round_trip_preserves_structure() {
        let graph = two_node_graph();
        let json = graph.to_json().expect("serialize");
        let parsed = DialogueGraph::from_json(&json).expect("parse");

        assert_eq!(parsed.len(), graph.len());
        assert_eq!(parsed.get_node("start"), graph.get_node("start"));
        assert_eq!(parsed.get_node("quest"), graph.get_node("quest"));
    }

    #[test]
    fn toml_graph_parses_with_defaults() {
        let graph = DialogueGraph::from_toml(
            r#"
            [[nodes]]
            id = "start"
            text = "Well met."

            [[nodes.options]]
            text = "Farewell"
            intent = "Goodbye"
            "#,
        )
        .expect("parse");

        let node = graph.get_node("start").expect("start exists");
        assert_eq!(node.options[0].intent, Intent::Goodbye);
        assert_eq!(node.options[0].next_node(), None);
    }
}
