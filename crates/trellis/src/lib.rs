//! Trellis: layout resolution and dirty tracking for retained-mode widget
//! trees.
//!
//! Widgets live in an arena ([`Core`]) and implement a two-pass layout
//! protocol: `populate` reports each widget's minimum size and flex weight
//! into a [`LayoutContext`](layout::LayoutContext), and `resolve` turns the
//! accumulated budget into a final size. Each node carries independent
//! layout and repaint dirty bits, so unchanged subtrees are neither
//! re-resolved nor repainted.
//!
//! # Quick Start
//!
//! - [`Core`] - The arena and the per-node passes
//! - [`Widget`] - The trait implemented by all widgets
//! - [`Root`] - The per-frame driver
//! - [`Viewport`] - Surface owner for one child
//!
//! # Module Organization
//!
//! - [`layout`] - Layout context, flex state and sizes
//! - [`widgets`] - Built-in containers and leaves
//! - [`surface`] - Drawing surfaces
//! - [`theme`] - Container defaults

#![warn(missing_docs)]

// Internal core module - re-export specific items below
mod core;

pub mod layout;
pub mod root;
pub mod surface;
pub mod theme;
pub mod viewport;
pub mod widget;
pub mod widgets;

/// Testing utilities.
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use geom;

pub use crate::core::{
    Core, FocusType, LayoutCx, Node, NodeId, PaintCx, PointerStyle, UpdateCx, dump, error,
};
pub use root::{FrameOutcome, Root, RootBuilder};
pub use viewport::{MAX_LAYOUT_ATTEMPTS, Viewport};
pub use widget::Widget;

/// Commonly used items.
pub mod prelude {
    pub use crate::{
        Core, FocusType, NodeId, PointerStyle, Root, Viewport, Widget,
        error::{Error, Result},
        geom::{Edges, Expanse, Point, Rect},
        layout::{Align, Alignment, FlexLayout, LayoutContext, Size},
        surface::{Color, ImageSurfaceFactory, Surface, SurfaceFactory},
        theme::Theme,
        widgets::{Container, MultiContainer, Spacer, ViewportWidget},
    };
}
