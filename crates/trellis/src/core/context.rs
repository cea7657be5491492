use std::rc::Rc;

use crate::{
    core::{
        error::Result,
        focus::{FocusType, PointerStyle},
        id::NodeId,
        world::Core,
    },
    geom::{Expanse, Point, Rect},
    layout::{LayoutContext, Size},
    surface::{Color, Surface},
    theme::Theme,
};

/// Handle passed to a widget's populate and resolve hooks.
pub struct LayoutCx<'a> {
    /// The arena.
    core: &'a mut Core,
    /// Node whose hook is running.
    node: NodeId,
}

impl<'a> LayoutCx<'a> {
    /// Construct a layout handle for a node.
    pub(crate) fn new(core: &'a mut Core, node: NodeId) -> Self {
        Self { core, node }
    }

    /// Node whose hook is running.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Children of the current node.
    pub fn children(&self) -> Result<Vec<NodeId>> {
        self.core.children_of(self.node)
    }

    /// First child of the current node.
    pub fn child(&self) -> Result<Option<NodeId>> {
        Ok(self.core.node(self.node)?.children.first().copied())
    }

    /// Is a node enabled?
    pub fn is_enabled(&self, node: NodeId) -> Result<bool> {
        self.core.is_enabled(node)
    }

    /// Populate a child into `ctx`.
    pub fn populate(&mut self, child: NodeId, ctx: &mut LayoutContext) -> Result<()> {
        self.core.populate(child, ctx)
    }

    /// Resolve a child against `ctx`.
    pub fn resolve(&mut self, child: NodeId, ctx: &mut LayoutContext) -> Result<Size> {
        self.core.resolve(child, ctx)
    }

    /// Resolved size of a node.
    pub fn size_of(&self, node: NodeId) -> Result<Expanse> {
        self.core.size_of(node)
    }

    /// Theme in effect at the current node.
    pub fn theme(&self) -> Rc<Theme> {
        self.core.theme_of(self.node)
    }

    /// Mark the current node for repaint.
    pub fn request_repaint(&mut self) {
        self.core.mark_repaint(self.node);
    }

    /// The arena, for widgets that drive a nested layout.
    pub fn core(&mut self) -> &mut Core {
        self.core
    }
}

/// Handle passed to a widget's paint hook.
pub struct PaintCx<'a> {
    /// The arena.
    core: &'a mut Core,
    /// Node whose hook is running.
    node: NodeId,
    /// Target surface.
    surface: &'a mut dyn Surface,
    /// Region allotted to the node, in surface coordinates.
    rect: Rect,
    /// Whether the node's own content must be redrawn.
    dirty: bool,
}

impl<'a> PaintCx<'a> {
    /// Construct a paint handle for a node.
    pub(crate) fn new(
        core: &'a mut Core,
        node: NodeId,
        surface: &'a mut dyn Surface,
        rect: Rect,
        dirty: bool,
    ) -> Self {
        Self {
            core,
            node,
            surface,
            rect,
            dirty,
        }
    }

    /// Node whose hook is running.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Region allotted to the node.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Must the node redraw its own content? When false only descendants
    /// changed, and the node should just paint its children.
    pub fn dirty(&self) -> bool {
        self.dirty
    }

    /// Children of the current node.
    pub fn children(&self) -> Result<Vec<NodeId>> {
        self.core.children_of(self.node)
    }

    /// First child of the current node.
    pub fn child(&self) -> Result<Option<NodeId>> {
        Ok(self.core.node(self.node)?.children.first().copied())
    }

    /// Is a node enabled?
    pub fn is_enabled(&self, node: NodeId) -> Result<bool> {
        self.core.is_enabled(node)
    }

    /// Resolved size of a node.
    pub fn size_of(&self, node: NodeId) -> Result<Expanse> {
        self.core.size_of(node)
    }

    /// Unrounded size of a node.
    pub fn ideal_of(&self, node: NodeId) -> Result<Size> {
        self.core.ideal_of(node)
    }

    /// Theme in effect at the current node.
    pub fn theme(&self) -> Rc<Theme> {
        self.core.theme_of(self.node)
    }

    /// Fill part of the node's region.
    pub fn fill(&mut self, rect: Rect, color: Color) {
        if let Some(r) = rect.intersect(&self.rect) {
            self.surface.fill(r, color);
        }
    }

    /// Clear part of the node's region.
    pub fn clear(&mut self, rect: Rect) {
        if let Some(r) = rect.intersect(&self.rect) {
            self.surface.clear(r);
        }
    }

    /// Colour drawn beneath the node by its nearest painted ancestor, if
    /// any ancestor filled a background.
    pub fn backdrop(&self) -> Option<Color> {
        self.core.backdrop
    }

    /// Set the backdrop seen by descendants painted from this hook.
    pub fn set_backdrop(&mut self, color: Color) {
        self.core.backdrop = Some(color);
    }

    /// Reset part of the node's region to its backdrop, or clear it when
    /// there is none.
    pub fn clear_to_backdrop(&mut self, rect: Rect) {
        match self.backdrop() {
            Some(color) => self.fill(rect, color),
            None => self.clear(rect),
        }
    }

    /// Copy a region of another surface into this one.
    pub fn blit(&mut self, src: &dyn Surface, src_rect: Rect, dst: Point) {
        self.surface.blit(src, src_rect, dst);
    }

    /// Paint a child into `rect`. Returns whether the child drew anything.
    pub fn paint_child(&mut self, child: NodeId, rect: Rect) -> Result<bool> {
        self.core.paint(child, &mut *self.surface, rect)
    }

    /// The arena, for widgets that drive a nested paint.
    pub fn core(&mut self) -> &mut Core {
        self.core
    }
}

/// Handle passed to pre- and post-layout update hooks.
pub struct UpdateCx<'a> {
    /// The arena.
    core: &'a mut Core,
    /// Node whose hook is running.
    node: NodeId,
}

impl<'a> UpdateCx<'a> {
    /// Construct an update handle for a node.
    pub(crate) fn new(core: &'a mut Core, node: NodeId) -> Self {
        Self { core, node }
    }

    /// Node whose hook is running.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Resolved size of the current node.
    pub fn size(&self) -> Result<Expanse> {
        self.core.size_of(self.node)
    }

    /// Region the node was last painted into.
    pub fn rect(&self) -> Result<Option<Rect>> {
        Ok(self.core.node(self.node)?.painted)
    }

    /// Mark the current node, and so its ancestors, as needing layout.
    pub fn invalidate_layout(&mut self) {
        self.core.mark_layout(self.node);
    }

    /// Mark the current node for repaint.
    pub fn request_repaint(&mut self) {
        self.core.mark_repaint(self.node);
    }

    /// Ask for a pointer style while this node or a descendant is under the
    /// pointer. Only meaningful from post-layout hooks.
    pub fn request_pointer_style(&mut self, style: PointerStyle) {
        self.core.request_pointer_style(self.node, style);
    }

    /// Does the current node hold this focus kind?
    pub fn has_focus(&self, kind: FocusType) -> bool {
        self.core.has_focus(self.node, kind)
    }

    /// Theme in effect at the current node.
    pub fn theme(&self) -> Rc<Theme> {
        self.core.theme_of(self.node)
    }
}
