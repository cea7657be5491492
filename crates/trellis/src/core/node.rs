use std::rc::Rc;

use crate::{
    core::id::NodeId,
    geom::{Expanse, Rect},
    layout::{LayoutContext, Size},
    theme::Theme,
    widget::Widget,
};

/// Core node data stored in the arena.
pub struct Node {
    /// Widget behavior and state. Empty while a hook for this node runs.
    pub(crate) widget: Option<Box<dyn Widget>>,
    /// Widget name, captured at insertion.
    pub(crate) name: &'static str,

    /// Parent in the arena tree.
    pub(crate) parent: Option<NodeId>,
    /// Children in the arena tree.
    pub(crate) children: Vec<NodeId>,

    /// Disabled nodes take no space and run no hooks.
    pub(crate) enabled: bool,
    /// Geometry must be recomputed.
    pub(crate) needs_layout: bool,
    /// The node's own content must be redrawn.
    pub(crate) needs_repaint: bool,
    /// Some descendant must be redrawn.
    pub(crate) child_needs_repaint: bool,

    /// Unrounded size from the last resolve.
    pub(crate) ideal: Size,
    /// Rounded size from the last resolve.
    pub(crate) size: Expanse,
    /// Rectangle used by the last paint, in surface coordinates.
    pub(crate) painted: Option<Rect>,
    /// Budget the node was last resolved against.
    pub(crate) last_budget: Option<LayoutContext>,

    /// Theme override inherited by descendants.
    pub(crate) theme: Option<Rc<Theme>>,
}

impl Node {
    /// A fresh node: enabled and dirty on both counts.
    pub(crate) fn new(widget: Box<dyn Widget>) -> Self {
        let name = widget.name();
        Self {
            widget: Some(widget),
            name,
            parent: None,
            children: Vec::new(),
            enabled: true,
            needs_layout: true,
            needs_repaint: true,
            child_needs_repaint: false,
            ideal: Size::zero(),
            size: Expanse::default(),
            painted: None,
            last_budget: None,
            theme: None,
        }
    }

    /// Return the node's widget name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Return the node's parent, if any.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Return the node's children.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Is the node enabled?
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Must geometry be recomputed?
    pub fn needs_layout(&self) -> bool {
        self.needs_layout
    }

    /// Must the node's own content be redrawn?
    pub fn needs_repaint(&self) -> bool {
        self.needs_repaint
    }

    /// Unrounded size from the last resolve.
    pub fn ideal(&self) -> Size {
        self.ideal
    }

    /// Resolved size in whole pixels.
    pub fn size(&self) -> Expanse {
        self.size
    }

    /// Rectangle the node was last painted into.
    pub fn rect(&self) -> Option<Rect> {
        self.painted
    }
}
