use std::{any::Any, collections::HashMap, mem, rc::Rc};

use slotmap::SlotMap;
use tracing::trace;

use crate::{
    core::{
        context::{LayoutCx, PaintCx, UpdateCx},
        error::{Error, Result},
        focus::{FocusType, PointerStyle},
        id::NodeId,
        node::Node,
    },
    geom::{Expanse, Rect},
    layout::{LayoutContext, Size},
    surface::{Color, Surface},
    theme::Theme,
    widget::Widget,
};

/// The widget arena. Owns every node, the base theme, input foci and pending
/// pointer-style requests, and runs the per-node halves of the layout, paint
/// and update passes.
pub struct Core {
    /// Node storage.
    pub(crate) nodes: SlotMap<NodeId, Node>,
    /// Theme used where no node override applies.
    theme: Rc<Theme>,
    /// Current focus holders.
    foci: HashMap<FocusType, NodeId>,
    /// Pointer styles requested during the current post-layout pass.
    pointer_requests: HashMap<NodeId, PointerStyle>,
    /// Background under the node currently painting.
    pub(crate) backdrop: Option<Color>,
}

impl Default for Core {
    fn default() -> Self {
        Self::new()
    }
}

impl Core {
    /// An empty arena with the default theme.
    pub fn new() -> Self {
        Self::with_theme(Theme::default())
    }

    /// An empty arena with an explicit base theme.
    pub fn with_theme(theme: Theme) -> Self {
        Self {
            nodes: SlotMap::with_key(),
            theme: Rc::new(theme),
            foci: HashMap::new(),
            pointer_requests: HashMap::new(),
            backdrop: None,
        }
    }

    /// Add a widget as a detached node.
    pub fn add(&mut self, widget: impl Widget) -> NodeId {
        self.add_boxed(Box::new(widget))
    }

    /// Add a boxed widget as a detached node.
    pub fn add_boxed(&mut self, widget: Box<dyn Widget>) -> NodeId {
        self.nodes.insert(Node::new(widget))
    }

    /// Add a widget and make it the last child of `parent`.
    pub fn add_child(&mut self, parent: NodeId, widget: impl Widget) -> Result<NodeId> {
        let child = self.add(widget);
        self.attach(parent, child)?;
        Ok(child)
    }

    /// Look up a node.
    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id).ok_or(Error::NodeNotFound(id))
    }

    /// Look up a node mutably.
    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes.get_mut(id).ok_or(Error::NodeNotFound(id))
    }

    /// Does the arena hold this node?
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Is the arena empty?
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Children of a node, in order.
    pub fn children_of(&self, id: NodeId) -> Result<Vec<NodeId>> {
        Ok(self.node(id)?.children.clone())
    }

    /// Parent of a node.
    pub fn parent_of(&self, id: NodeId) -> Result<Option<NodeId>> {
        Ok(self.node(id)?.parent)
    }

    /// Is `ancestor` a strict ancestor of `node`?
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cur = self.nodes.get(node).and_then(|n| n.parent);
        while let Some(id) = cur {
            if id == ancestor {
                return true;
            }
            cur = self.nodes.get(id).and_then(|n| n.parent);
        }
        false
    }

    /// All nodes under `root`, including it, in pre-order.
    pub fn subtree(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.nodes.get(id) {
                out.push(id);
                stack.extend(node.children.iter().rev());
            }
        }
        out
    }

    /// Replace a node's children. Children are detached from any previous
    /// parent, and the new subtree is forced dirty.
    pub fn set_children(&mut self, parent: NodeId, children: Vec<NodeId>) -> Result<()> {
        self.node(parent)?;
        for (i, child) in children.iter().enumerate() {
            self.node(*child)?;
            if *child == parent || self.is_ancestor(*child, parent) {
                return Err(Error::WouldCreateCycle {
                    parent,
                    child: *child,
                });
            }
            if children[..i].contains(child) {
                return Err(Error::Invalid(format!(
                    "duplicate child {child:?} under {parent:?}"
                )));
            }
        }

        for child in &children {
            if let Some(old) = self.nodes[*child].parent
                && old != parent
            {
                self.nodes[old].children.retain(|c| c != child);
                self.mark_layout(old);
                self.mark_repaint(old);
            }
        }
        let previous = mem::replace(&mut self.nodes[parent].children, children.clone());
        for old in previous {
            if !children.contains(&old)
                && let Some(node) = self.nodes.get_mut(old)
            {
                node.parent = None;
            }
        }
        for child in &children {
            self.nodes[*child].parent = Some(parent);
        }
        self.force_dirty(parent)
    }

    /// Append a child to a node.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        let mut children = self.children_of(parent)?;
        children.retain(|c| *c != child);
        children.push(child);
        self.set_children(parent, children)
    }

    /// Detach a node from its parent. The node stays in the arena.
    pub fn detach(&mut self, child: NodeId) -> Result<()> {
        let Some(parent) = self.node(child)?.parent else {
            return Ok(());
        };
        self.nodes[parent].children.retain(|c| *c != child);
        self.nodes[child].parent = None;
        self.force_dirty(parent)
    }

    /// Detach and delete a node and all its descendants.
    pub fn remove_subtree(&mut self, root: NodeId) -> Result<()> {
        self.detach(root)?;
        for id in self.subtree(root) {
            self.nodes.remove(id);
            self.pointer_requests.remove(&id);
        }
        self.foci.retain(|_, id| self.nodes.contains_key(*id));
        Ok(())
    }

    /// Is the node enabled?
    pub fn is_enabled(&self, id: NodeId) -> Result<bool> {
        Ok(self.node(id)?.enabled)
    }

    /// Enable or disable a node. Any change forces the subtree dirty, and
    /// disabling drops foci held inside it.
    pub fn set_enabled(&mut self, id: NodeId, enabled: bool) -> Result<()> {
        let node = self.node_mut(id)?;
        if node.enabled == enabled {
            return Ok(());
        }
        node.enabled = enabled;
        let parent = node.parent;
        self.force_dirty(id)?;
        if let Some(parent) = parent {
            self.mark_repaint(parent);
        }
        if !enabled {
            let subtree = self.subtree(id);
            self.foci.retain(|_, f| !subtree.contains(f));
        }
        Ok(())
    }

    /// Mark a node and its whole subtree as needing layout and repaint.
    /// Ancestors are marked as needing layout.
    pub fn force_dirty(&mut self, id: NodeId) -> Result<()> {
        self.force_layout_subtree(id)?;
        self.force_repaint_subtree(id)
    }

    /// Mark a node and its whole subtree as needing layout.
    pub fn force_layout_subtree(&mut self, id: NodeId) -> Result<()> {
        self.node(id)?;
        for n in self.subtree(id) {
            self.nodes[n].needs_layout = true;
        }
        self.mark_layout(id);
        Ok(())
    }

    /// Mark a node and its whole subtree as needing repaint.
    pub fn force_repaint_subtree(&mut self, id: NodeId) -> Result<()> {
        self.node(id)?;
        for n in self.subtree(id) {
            let node = &mut self.nodes[n];
            node.needs_repaint = true;
            node.child_needs_repaint = !node.children.is_empty();
        }
        self.mark_repaint(id);
        Ok(())
    }

    /// Mark a node and its ancestors as needing layout.
    pub fn mark_layout(&mut self, id: NodeId) {
        let mut cur = Some(id);
        while let Some(n) = cur.and_then(|id| self.nodes.get_mut(id)) {
            n.needs_layout = true;
            cur = n.parent;
        }
    }

    /// Mark a node as needing repaint, and flag its ancestors so the paint
    /// walk reaches it.
    pub fn mark_repaint(&mut self, id: NodeId) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        node.needs_repaint = true;
        let mut cur = node.parent;
        while let Some(n) = cur.and_then(|id| self.nodes.get_mut(id)) {
            n.child_needs_repaint = true;
            cur = n.parent;
        }
    }

    /// Does the node need layout?
    pub fn needs_layout(&self, id: NodeId) -> Result<bool> {
        Ok(self.node(id)?.needs_layout)
    }

    /// Does the node, or anything below it, need repaint?
    pub fn needs_paint(&self, id: NodeId) -> Result<bool> {
        let n = self.node(id)?;
        Ok(n.needs_repaint || n.child_needs_repaint)
    }

    /// Resolved size of a node.
    pub fn size_of(&self, id: NodeId) -> Result<Expanse> {
        Ok(self.node(id)?.size)
    }

    /// Unrounded size of a node.
    pub fn ideal_of(&self, id: NodeId) -> Result<Size> {
        Ok(self.node(id)?.ideal)
    }

    /// The base theme.
    pub fn theme(&self) -> Rc<Theme> {
        self.theme.clone()
    }

    /// Replace the base theme and force every node dirty.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = Rc::new(theme);
        for node in self.nodes.values_mut() {
            node.needs_layout = true;
            node.needs_repaint = true;
            node.child_needs_repaint = !node.children.is_empty();
        }
    }

    /// Override the theme for a node and its descendants. `None` restores
    /// inheritance.
    pub fn set_theme_of(&mut self, id: NodeId, theme: Option<Theme>) -> Result<()> {
        self.node_mut(id)?.theme = theme.map(Rc::new);
        self.force_dirty(id)
    }

    /// The theme in effect at a node: the nearest override on the path to
    /// the root, else the base theme.
    pub fn theme_of(&self, id: NodeId) -> Rc<Theme> {
        let mut cur = Some(id);
        while let Some(n) = cur.and_then(|id| self.nodes.get(id)) {
            if let Some(t) = &n.theme {
                return t.clone();
            }
            cur = n.parent;
        }
        self.theme.clone()
    }

    /// Borrow a widget as its concrete type. Fails while the widget's own
    /// hook is running.
    pub fn widget_ref<W: Widget>(&self, id: NodeId) -> Result<&W> {
        let node = self.node(id)?;
        let widget = node
            .widget
            .as_deref()
            .ok_or(Error::ReentrantWidgetBorrow(id))?;
        (widget as &dyn Any)
            .downcast_ref::<W>()
            .ok_or(Error::WidgetType {
                node: id,
                found: node.name,
            })
    }

    /// Edit a widget as its concrete type. The node is forced dirty
    /// afterwards, since any setting may change its geometry.
    pub fn with_widget<W: Widget, R>(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut W) -> R,
    ) -> Result<R> {
        let out = self.with_widget_mut(id, |widget, core| {
            let found = core.nodes[id].name;
            (widget as &mut dyn Any)
                .downcast_mut::<W>()
                .map(f)
                .ok_or(Error::WidgetType { node: id, found })
        })??;
        self.force_dirty(id)?;
        Ok(out)
    }

    /// Take the widget out of its slot for the duration of `f`, so the
    /// widget and the arena can be borrowed mutably at once.
    pub(crate) fn with_widget_mut<R>(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut dyn Widget, &mut Self) -> R,
    ) -> Result<R> {
        let mut widget = self
            .node_mut(id)?
            .widget
            .take()
            .ok_or(Error::ReentrantWidgetBorrow(id))?;
        let out = f(widget.as_mut(), self);
        if let Some(node) = self.nodes.get_mut(id) {
            node.widget = Some(widget);
        }
        Ok(out)
    }

    /// Report a node's demand into `ctx`. Runs for every enabled node on
    /// every pass, whatever its dirty state.
    pub fn populate(&mut self, id: NodeId, ctx: &mut LayoutContext) -> Result<()> {
        if !self.node(id)?.enabled {
            return Ok(());
        }
        self.with_widget_mut(id, |widget, core| {
            let mut cx = LayoutCx::new(core, id);
            widget.populate(ctx, &mut cx)
        })?
    }

    /// Resolve a node's size against a populated `ctx`. Clean nodes resolved
    /// against the same budget keep their previous result.
    pub fn resolve(&mut self, id: NodeId, ctx: &mut LayoutContext) -> Result<Size> {
        let node = self.node_mut(id)?;
        if !node.enabled {
            node.needs_layout = false;
            node.ideal = Size::zero();
            node.last_budget = None;
            if node.size != Expanse::default() {
                node.size = Expanse::default();
                ctx.size_changed = true;
                if let Some(parent) = node.parent {
                    self.mark_repaint(parent);
                }
            }
            return Ok(Size::zero());
        }
        if !node.needs_layout
            && node
                .last_budget
                .as_ref()
                .is_some_and(|budget| budget.same_budget(ctx))
        {
            return Ok(node.ideal);
        }

        let budget = ctx.clone();
        let ideal = self.with_widget_mut(id, |widget, core| {
            let mut cx = LayoutCx::new(core, id);
            widget.resolve(ctx, &mut cx)
        })??;
        if !ideal.is_valid() {
            return Err(Error::InvalidDimensions {
                node: id,
                width: ideal.width,
                height: ideal.height,
            });
        }

        let size = ideal.round();
        let node = self.node_mut(id)?;
        node.ideal = ideal;
        node.last_budget = Some(budget);
        node.needs_layout = false;
        if size != node.size {
            trace!(node = ?id, from = ?node.size, to = ?size, "resized");
            node.size = size;
            ctx.size_changed = true;
            self.mark_repaint(id);
        }
        Ok(ideal)
    }

    /// Paint a node into `rect` of `surface`. Returns false without calling
    /// the widget when neither the node nor anything below it is dirty and
    /// the node has not moved.
    pub fn paint(&mut self, id: NodeId, surface: &mut dyn Surface, rect: Rect) -> Result<bool> {
        let node = self.node_mut(id)?;
        if !node.enabled {
            node.needs_repaint = false;
            node.child_needs_repaint = false;
            node.painted = None;
            return Ok(false);
        }
        if node.painted != Some(rect) {
            node.needs_repaint = true;
        }
        if !node.needs_repaint && !node.child_needs_repaint {
            return Ok(false);
        }
        node.painted = Some(rect);
        let own = node.needs_repaint;
        if own {
            // Children are drawn over the parent, so they repaint with it.
            for child in node.children.clone() {
                self.nodes[child].needs_repaint = true;
            }
        }
        let backdrop = self.backdrop;
        let painted = self.with_widget_mut(id, |widget, core| {
            let mut cx = PaintCx::new(core, id, surface, rect, own);
            widget.paint(&mut cx)
        });
        self.backdrop = backdrop;
        painted??;
        let node = self.node_mut(id)?;
        node.needs_repaint = false;
        node.child_needs_repaint = false;
        Ok(true)
    }

    /// Run pre-layout hooks top-down. Returns whether the node needs layout,
    /// after marking it dirty if any descendant does.
    pub fn pre_layout_update(&mut self, id: NodeId) -> Result<bool> {
        if !self.node(id)?.enabled {
            return Ok(false);
        }
        self.with_widget_mut(id, |widget, core| {
            let mut cx = UpdateCx::new(core, id);
            widget.pre_layout_update(&mut cx)
        })??;
        let mut dirty = false;
        for child in self.children_of(id)? {
            dirty |= self.pre_layout_update(child)?;
        }
        let node = self.node_mut(id)?;
        if dirty {
            node.needs_layout = true;
        }
        Ok(node.needs_layout)
    }

    /// Run post-layout hooks top-down.
    pub fn post_layout_update(&mut self, id: NodeId) -> Result<()> {
        if !self.node(id)?.enabled {
            return Ok(());
        }
        self.with_widget_mut(id, |widget, core| {
            let mut cx = UpdateCx::new(core, id);
            widget.post_layout_update(&mut cx)
        })??;
        for child in self.children_of(id)? {
            self.post_layout_update(child)?;
        }
        Ok(())
    }

    /// Give a node focus of the given kind.
    pub fn set_focus(&mut self, kind: FocusType, id: NodeId) -> Result<()> {
        if !self.node(id)?.enabled {
            return Err(Error::Invalid(format!("cannot focus disabled node {id:?}")));
        }
        self.foci.insert(kind, id);
        Ok(())
    }

    /// Current holder of a focus kind.
    pub fn focus(&self, kind: FocusType) -> Option<NodeId> {
        self.foci.get(&kind).copied()
    }

    /// Does the node hold this focus kind?
    pub fn has_focus(&self, id: NodeId, kind: FocusType) -> bool {
        self.focus(kind) == Some(id)
    }

    /// Release a focus kind.
    pub fn clear_focus(&mut self, kind: FocusType) -> Option<NodeId> {
        self.foci.remove(&kind)
    }

    /// Release every focus kind.
    pub fn clear_foci(&mut self) {
        self.foci.clear();
    }

    /// Release every focus kind held by a node. Returns whether any was held.
    pub fn release_foci_of(&mut self, id: NodeId) -> bool {
        let before = self.foci.len();
        self.foci.retain(|_, f| *f != id);
        self.foci.len() != before
    }

    /// Record a pointer-style request from a node.
    pub(crate) fn request_pointer_style(&mut self, id: NodeId, style: PointerStyle) {
        self.pointer_requests.insert(id, style);
    }

    /// Drop all pointer-style requests.
    pub(crate) fn clear_pointer_requests(&mut self) {
        self.pointer_requests.clear();
    }

    /// The pointer style in effect: the request of the pointer-focused node
    /// or its nearest requesting ancestor.
    pub(crate) fn requested_pointer_style(&self) -> PointerStyle {
        let mut cur = self.focus(FocusType::Pointer);
        while let Some(id) = cur {
            if let Some(style) = self.pointer_requests.get(&id) {
                return *style;
            }
            cur = self.nodes.get(id).and_then(|n| n.parent);
        }
        PointerStyle::Default
    }
}
