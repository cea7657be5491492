//! Core types: the node arena, hook contexts, errors and focus state.

/// Hook contexts handed to widgets.
pub mod context;
/// Debug dump utilities.
pub mod dump;
/// Core error types.
pub mod error;
/// Focus and pointer-style types.
pub mod focus;
/// Node ID types.
pub mod id;
/// Node data.
pub mod node;
/// The arena and per-node passes.
pub mod world;

pub use context::{LayoutCx, PaintCx, UpdateCx};
pub use focus::{FocusType, PointerStyle};
pub use id::NodeId;
pub use node::Node;
pub use world::Core;
