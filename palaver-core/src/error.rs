//! Error types for the palaver engine.
//!
//! These cover authoring-time failures only (graph construction, config and
//! graph parsing). Live-conversation operations on the controller are
//! deliberately infallible — see the crate docs on the robustness contract.

use thiserror::Error;

/// Top-level error type for authoring-time palaver operations.
#[derive(Error, Debug)]
pub enum DialogueError {
    /// Two nodes in a graph share the same id.
    #[error("duplicate node id in dialogue graph: {0:?}")]
    DuplicateNode(String),

    /// The graph has no node under the designated entry id.
    #[error("dialogue graph has no entry node {0:?}")]
    MissingEntryNode(String),

    /// A graph or snapshot document failed to parse.
    #[error("parse error: {0}")]
    Parse(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, DialogueError>;
