//! The frame driver.

use std::rc::Rc;

use tracing::debug;

use crate::{
    core::{
        error::Result,
        focus::{FocusType, PointerStyle},
        id::NodeId,
        world::Core,
    },
    geom::Expanse,
    surface::{Surface, SurfaceFactory},
    viewport::Viewport,
};

/// Outcome of one [`Root::frame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameOutcome {
    /// The child changed size.
    pub resized: bool,
    /// Something was drawn, so the surface should be re-uploaded.
    pub painted: bool,
}

/// Callback fired when the pointer style changes.
type PointerHandler = Box<dyn FnMut(PointerStyle)>;

/// Owns the arena, one child tree and the viewport it renders into, and
/// sequences the per-frame passes.
pub struct Root {
    /// The widget arena.
    core: Core,
    /// Top of the rendered tree.
    child: NodeId,
    /// Surface owner for the child.
    viewport: Viewport,
    /// A disabled root does nothing per frame.
    enabled: bool,
    /// Pointer style after the last post-layout pass.
    pointer_style: PointerStyle,
    /// Observer for pointer style changes.
    on_pointer_style: Option<PointerHandler>,
}

/// Configures and builds a [`Root`].
pub struct RootBuilder {
    /// Size hint for the child.
    max_dimensions: Expanse,
    /// Orientation handed to the child.
    vertical: bool,
    /// Clear stale borders after shrinking.
    avoid_bleed: bool,
    /// Initial enabled state.
    enabled: bool,
}

impl Default for RootBuilder {
    fn default() -> Self {
        Self {
            max_dimensions: Expanse::default(),
            vertical: true,
            avoid_bleed: false,
            enabled: true,
        }
    }
}

impl RootBuilder {
    /// Set the size hint. Zero on an axis leaves it unconstrained.
    pub fn max_dimensions(mut self, width: u32, height: u32) -> Self {
        self.max_dimensions = Expanse::new(width, height);
        self
    }

    /// Set the child's orientation.
    pub fn vertical(mut self, vertical: bool) -> Self {
        self.vertical = vertical;
        self
    }

    /// Enable bleed avoidance.
    pub fn avoid_bleed(mut self, avoid: bool) -> Self {
        self.avoid_bleed = avoid;
        self
    }

    /// Set the initial enabled state.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Build a root over `child`, which must live in `core`. Fails if the
    /// factory cannot provide the initial surface.
    pub fn build(
        self,
        core: Core,
        child: NodeId,
        factory: Rc<dyn SurfaceFactory>,
    ) -> Result<Root> {
        core.node(child)?;
        let mut viewport = Viewport::new(factory, self.max_dimensions, self.vertical)?;
        viewport.set_avoid_bleed(self.avoid_bleed);
        Ok(Root {
            core,
            child,
            viewport,
            enabled: self.enabled,
            pointer_style: PointerStyle::Default,
            on_pointer_style: None,
        })
    }
}

impl Root {
    /// Start configuring a root.
    pub fn builder() -> RootBuilder {
        RootBuilder::default()
    }

    /// The arena.
    pub fn core(&self) -> &Core {
        &self.core
    }

    /// The arena, for tree edits between frames.
    pub fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    /// Top of the rendered tree.
    pub fn child(&self) -> NodeId {
        self.child
    }

    /// The viewport.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// The viewport, to change hints between frames.
    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// The backing surface.
    pub fn surface(&self) -> &dyn Surface {
        self.viewport.surface()
    }

    /// Backing surface size.
    pub fn canvas_dimensions(&self) -> Expanse {
        self.viewport.canvas_dimensions()
    }

    /// Child size.
    pub fn dimensions(&self) -> Expanse {
        self.viewport.dimensions()
    }

    /// Is the root enabled?
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable the root. Either way the tree is forced dirty;
    /// disabling also drops every focus and resets the pointer style.
    pub fn set_enabled(&mut self, enabled: bool) -> Result<()> {
        if self.enabled == enabled {
            return Ok(());
        }
        debug!(enabled, "root enabled state changed");
        self.enabled = enabled;
        self.core.force_dirty(self.child)?;
        self.viewport.force_layout();
        if !enabled {
            self.core.clear_foci();
            self.core.clear_pointer_requests();
            self.set_pointer_style(PointerStyle::Default);
        }
        Ok(())
    }

    /// Run update hooks before layout. Dirty descendants mark their
    /// ancestors for layout.
    pub fn pre_layout_update(&mut self) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }
        self.core.pre_layout_update(self.child)?;
        Ok(())
    }

    /// Lay the tree out. Returns whether the child changed size.
    pub fn resolve_layout(&mut self) -> Result<bool> {
        if !self.enabled {
            return Ok(false);
        }
        self.viewport.resolve_layout(&mut self.core, self.child)
    }

    /// Run update hooks after layout, then recompute the pointer style.
    pub fn post_layout_update(&mut self) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }
        self.core.clear_pointer_requests();
        self.core.post_layout_update(self.child)?;
        let style = self.core.requested_pointer_style();
        self.set_pointer_style(style);
        Ok(())
    }

    /// Paint dirty widgets. Returns whether anything was drawn.
    pub fn paint(&mut self) -> Result<bool> {
        if !self.enabled {
            return Ok(false);
        }
        self.viewport.paint(&mut self.core, self.child)
    }

    /// Run all four passes in order.
    pub fn frame(&mut self) -> Result<FrameOutcome> {
        self.pre_layout_update()?;
        let resized = self.resolve_layout()?;
        self.post_layout_update()?;
        let painted = self.paint()?;
        Ok(FrameOutcome { resized, painted })
    }

    /// Give a node focus.
    pub fn request_focus(&mut self, kind: FocusType, node: NodeId) -> Result<()> {
        self.core.set_focus(kind, node)
    }

    /// Release a focus kind.
    pub fn drop_focus(&mut self, kind: FocusType) -> Option<NodeId> {
        self.core.clear_focus(kind)
    }

    /// Release whatever foci a node holds.
    pub fn clear_focus(&mut self, node: NodeId) -> bool {
        self.core.release_foci_of(node)
    }

    /// Current holder of a focus kind.
    pub fn focus(&self, kind: FocusType) -> Option<NodeId> {
        self.core.focus(kind)
    }

    /// Release every focus kind.
    pub fn clear_foci(&mut self) {
        self.core.clear_foci();
    }

    /// Pointer style after the last post-layout pass.
    pub fn pointer_style(&self) -> PointerStyle {
        self.pointer_style
    }

    /// Observe pointer style changes.
    pub fn on_pointer_style(&mut self, handler: impl FnMut(PointerStyle) + 'static) {
        self.on_pointer_style = Some(Box::new(handler));
    }

    /// Record a pointer style and notify the observer on change.
    fn set_pointer_style(&mut self, style: PointerStyle) {
        if self.pointer_style == style {
            return;
        }
        self.pointer_style = style;
        if let Some(handler) = &mut self.on_pointer_style {
            handler(style);
        }
    }
}
