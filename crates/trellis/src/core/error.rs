use std::result::Result as StdResult;

use thiserror::Error;

use crate::{core::id::NodeId, geom};

/// Result type for trellis operations.
pub type Result<T> = StdResult<T, Error>;

/// Core error type.
#[derive(PartialEq, Error, Debug, Clone)]
pub enum Error {
    #[error("layout: {0}")]
    /// Layout failure.
    Layout(String),
    /// A widget's resolve hook produced a size that is negative, NaN or infinite.
    #[error("invalid dimensions {width}x{height} resolved by node {node:?}")]
    InvalidDimensions {
        /// Offending node.
        node: NodeId,
        /// Reported width.
        width: f32,
        /// Reported height.
        height: f32,
    },
    #[error("surface: {0}")]
    /// The drawing surface capability failed.
    Surface(String),
    #[error("geometry: {0}")]
    /// Geometry failure.
    Geometry(String),
    #[error("theme: {0}")]
    /// Theme could not be loaded.
    Theme(String),
    #[error("internal: {0}")]
    /// Internal error.
    Internal(String),
    #[error("invalid: {0}")]
    /// Invalid input error.
    Invalid(String),
    /// Node was not present in the arena.
    #[error("node not found: {0:?}")]
    NodeNotFound(NodeId),
    /// A widget hook tried to reach its own widget while it was borrowed.
    #[error("reentrant widget borrow on {0:?}")]
    ReentrantWidgetBorrow(NodeId),
    /// A typed widget lookup found a different widget type.
    #[error("node {node:?} holds a {found}, not the requested type")]
    WidgetType {
        /// Node that was looked up.
        node: NodeId,
        /// Name of the widget actually stored.
        found: &'static str,
    },
    /// Adding these children would make the tree cyclic.
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    WouldCreateCycle {
        /// Prospective parent.
        parent: NodeId,
        /// Prospective child.
        child: NodeId,
    },
}

impl From<geom::Error> for Error {
    fn from(e: geom::Error) -> Self {
        Self::Geometry(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Theme(e.to_string())
    }
}
