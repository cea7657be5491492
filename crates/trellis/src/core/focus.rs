use serde::{Deserialize, Serialize};

/// Kinds of input focus tracked by the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FocusType {
    /// Receives key events.
    Keyboard,
    /// The node under the pointer.
    Pointer,
    /// Holds an active pointer grab.
    Grab,
}

/// Pointer appearance requested by widgets and surfaced to the embedder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PointerStyle {
    /// Platform default arrow.
    #[default]
    Default,
    /// Clickable target.
    Pointer,
    /// Text insertion.
    Text,
    /// Draggable.
    Grab,
    /// Being dragged.
    Grabbing,
    /// Precise selection.
    Crosshair,
    /// Disabled target.
    NotAllowed,
    /// Horizontal resize.
    ResizeHorizontal,
    /// Vertical resize.
    ResizeVertical,
}

impl PointerStyle {
    /// The CSS cursor keyword for this style.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Pointer => "pointer",
            Self::Text => "text",
            Self::Grab => "grab",
            Self::Grabbing => "grabbing",
            Self::Crosshair => "crosshair",
            Self::NotAllowed => "not-allowed",
            Self::ResizeHorizontal => "ew-resize",
            Self::ResizeVertical => "ns-resize",
        }
    }
}
