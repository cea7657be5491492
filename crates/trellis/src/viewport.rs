//! The viewport: owner of a backing surface that lays out and paints exactly
//! one child, growing the surface in powers of two.

use std::rc::Rc;

use tracing::debug;

use crate::{
    core::{error::Result, id::NodeId, world::Core},
    geom::{Expanse, Rect},
    layout::LayoutContext,
    surface::{Surface, SurfaceFactory},
};

/// Upper bound on layout passes per frame while an unconstrained axis
/// settles.
pub const MAX_LAYOUT_ATTEMPTS: usize = 5;

/// Owns a surface and drives layout and paint for a single child.
pub struct Viewport {
    /// Backing surface. Each axis is a power of two.
    surface: Box<dyn Surface>,
    /// Creates replacement surfaces on growth.
    factory: Rc<dyn SurfaceFactory>,
    /// Size hint for the child. Zero on an axis means unconstrained.
    max_dimensions: Expanse,
    /// Orientation handed to the child.
    vertical: bool,
    /// Lay the child out on the next pass even if it is clean.
    force_layout: bool,
    /// Clear regions the child no longer covers.
    avoid_bleed: bool,
    /// Child size from the last layout.
    child_size: Expanse,
    /// Regions to clear after the next paint.
    pending_clear: Vec<Rect>,
}

impl Viewport {
    /// Construct a viewport. Fails if the factory cannot provide a surface.
    pub fn new(
        factory: Rc<dyn SurfaceFactory>,
        max_dimensions: Expanse,
        vertical: bool,
    ) -> Result<Self> {
        let surface = factory.create(Expanse::new(1, 1))?;
        Ok(Self {
            surface,
            factory,
            max_dimensions,
            vertical,
            force_layout: true,
            avoid_bleed: false,
            child_size: Expanse::default(),
            pending_clear: Vec::new(),
        })
    }

    /// The size hint passed to the child.
    pub fn max_dimensions(&self) -> Expanse {
        self.max_dimensions
    }

    /// Change the size hint. A change forces the next layout.
    pub fn set_max_dimensions(&mut self, max: Expanse) {
        if self.max_dimensions != max {
            self.max_dimensions = max;
            self.force_layout = true;
        }
    }

    /// Orientation passed to the child.
    pub fn vertical(&self) -> bool {
        self.vertical
    }

    /// Change the orientation. A change forces the next layout.
    pub fn set_vertical(&mut self, vertical: bool) {
        if self.vertical != vertical {
            self.vertical = vertical;
            self.force_layout = true;
        }
    }

    /// Turn bleed avoidance on or off.
    pub fn set_avoid_bleed(&mut self, avoid: bool) {
        self.avoid_bleed = avoid;
        if !avoid {
            self.pending_clear.clear();
        }
    }

    /// Is bleed avoidance on?
    pub fn avoid_bleed(&self) -> bool {
        self.avoid_bleed
    }

    /// Lay the child out on the next pass even if it is clean.
    pub fn force_layout(&mut self) {
        self.force_layout = true;
    }

    /// Backing surface size.
    pub fn canvas_dimensions(&self) -> Expanse {
        self.surface.size()
    }

    /// Child size from the last layout.
    pub fn dimensions(&self) -> Expanse {
        self.child_size
    }

    /// The backing surface.
    pub fn surface(&self) -> &dyn Surface {
        self.surface.as_ref()
    }

    /// Replace the surface with one just big enough for the current child.
    /// This is the only way the surface shrinks.
    pub fn reset_surface(&mut self, core: &mut Core, child: NodeId) -> Result<()> {
        self.surface = self.factory.create(self.child_size.next_power_of_two())?;
        self.pending_clear.clear();
        core.force_repaint_subtree(child)
    }

    /// Lay out `child`. Returns whether the child's size changed.
    pub fn resolve_layout(&mut self, core: &mut Core, child: NodeId) -> Result<bool> {
        if self.force_layout {
            core.force_layout_subtree(child)?;
            self.force_layout = false;
        } else if !core.needs_layout(child)? {
            return Ok(false);
        }

        let mut max = self.max_dimensions;
        let mut size = Expanse::default();
        for attempt in 1..=MAX_LAYOUT_ATTEMPTS {
            let mut ctx = LayoutContext::new(max.w as f32, max.h as f32, self.vertical);
            core.populate(child, &mut ctx)?;
            core.resolve(child, &mut ctx)?;
            size = core.size_of(child)?;

            let next = Expanse::new(
                if self.max_dimensions.w == 0 { size.w } else { max.w },
                if self.max_dimensions.h == 0 { size.h } else { max.h },
            );
            if next == max {
                break;
            }
            if attempt == MAX_LAYOUT_ATTEMPTS {
                debug!(
                    attempts = MAX_LAYOUT_ATTEMPTS,
                    ?size,
                    "layout did not settle, keeping the last result"
                );
                break;
            }
            max = next;
            core.force_layout_subtree(child)?;
        }

        if size == self.child_size {
            return Ok(false);
        }
        if self.avoid_bleed {
            let old = self.child_size.rect();
            self.pending_clear.extend(old.uncovered(size));
        }
        self.child_size = size;

        let current = self.surface.size();
        if !current.contains(&size) {
            let grown = current.max(&size.next_power_of_two());
            debug!(from = ?current, to = ?grown, "growing surface");
            self.surface = self.factory.create(grown)?;
            self.pending_clear.clear();
            core.force_repaint_subtree(child)?;
        }
        Ok(true)
    }

    /// Paint `child` into the surface. Returns whether anything was drawn or
    /// cleared.
    pub fn paint(&mut self, core: &mut Core, child: NodeId) -> Result<bool> {
        // The surface starts transparent, whatever an enclosing paint drew.
        let backdrop = core.backdrop.take();
        let painted = core.paint(child, self.surface.as_mut(), self.child_size.rect());
        core.backdrop = backdrop;
        let painted = painted?;
        let cleared = !self.pending_clear.is_empty();
        for rect in self.pending_clear.drain(..) {
            self.surface.clear(rect);
        }
        Ok(painted || cleared)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::Error,
        geom::{Edges, Point},
        surface::{Color, ImageSurfaceFactory},
        testing::{FailingSurfaceFactory, Probe, capture_logs, init_tracing},
        widgets::{Container, Spacer},
    };
    use proptest::prelude::*;

    fn viewport(max: Expanse) -> Result<Viewport> {
        Viewport::new(Rc::new(ImageSurfaceFactory::default()), max, false)
    }

    #[test]
    fn construction_failure_is_fatal() {
        let err = Viewport::new(Rc::new(FailingSurfaceFactory), Expanse::default(), false);
        assert!(matches!(err, Err(Error::Surface(_))));
    }

    #[test]
    fn surface_grows_by_powers_of_two() -> Result<()> {
        let mut core = Core::new();
        let child = core.add(Spacer::new(60.0, 60.0));
        let mut vp = viewport(Expanse::default())?;
        assert!(vp.resolve_layout(&mut core, child)?);
        assert_eq!(vp.canvas_dimensions(), Expanse::new(64, 64));

        core.with_widget::<Spacer, _>(child, |s| s.flex = crate::layout::FlexLayout::fixed(130.0, 130.0))?;
        assert!(vp.resolve_layout(&mut core, child)?);
        assert_eq!(vp.dimensions(), Expanse::new(130, 130));
        assert_eq!(vp.canvas_dimensions(), Expanse::new(256, 256));

        core.with_widget::<Spacer, _>(child, |s| s.flex = crate::layout::FlexLayout::fixed(20.0, 20.0))?;
        assert!(vp.resolve_layout(&mut core, child)?);
        assert_eq!(vp.canvas_dimensions(), Expanse::new(256, 256));

        vp.reset_surface(&mut core, child)?;
        assert_eq!(vp.canvas_dimensions(), Expanse::new(32, 32));
        Ok(())
    }

    #[test]
    fn clean_child_skips_layout() -> Result<()> {
        let mut core = Core::new();
        let (p, log) = Probe::new(10.0, 10.0);
        let child = core.add(p);
        let mut vp = viewport(Expanse::new(100, 100))?;
        vp.resolve_layout(&mut core, child)?;
        let populates = log.borrow().populates;
        assert!(!vp.resolve_layout(&mut core, child)?);
        assert_eq!(log.borrow().populates, populates);

        vp.set_max_dimensions(Expanse::new(50, 100));
        vp.resolve_layout(&mut core, child)?;
        assert!(log.borrow().populates > populates);
        assert_eq!(log.borrow().last_ctx.as_ref().map(|c| c.max_width), Some(50.0));
        Ok(())
    }

    #[test]
    fn unconstrained_axis_settles() -> Result<()> {
        let mut core = Core::new();
        let (p, log) = Probe::new(40.0, 25.0);
        let child = core.add(p);
        let mut vp = viewport(Expanse::new(100, 0))?;
        vp.resolve_layout(&mut core, child)?;
        assert_eq!(vp.dimensions(), Expanse::new(40, 25));
        // One pass to measure, one to confirm the measured height.
        assert_eq!(log.borrow().resolves, 2);
        assert_eq!(log.borrow().last_ctx.as_ref().map(|c| c.max_height), Some(25.0));
        Ok(())
    }

    #[test]
    fn padded_container_settles_on_unconstrained_axis() -> Result<()> {
        let mut core = Core::new();
        let container = core.add(Container::new().with_padding(Edges::all(4)));
        let (p, log) = Probe::new(50.0, 0.0);
        core.add_child(container, p)?;
        let mut vp = viewport(Expanse::new(100, 0))?;
        vp.resolve_layout(&mut core, container)?;
        assert_eq!(vp.dimensions(), Expanse::new(58, 8));
        assert_eq!(log.borrow().resolves, 2);

        vp.force_layout();
        vp.resolve_layout(&mut core, container)?;
        assert_eq!(vp.dimensions(), Expanse::new(58, 8));
        assert_eq!(log.borrow().resolves, 4);
        Ok(())
    }

    #[test]
    fn retries_are_bounded() -> Result<()> {
        init_tracing();
        let mut core = Core::new();
        let (p, log) = Probe::new(0.0, 0.0);
        // Always wants to be one pixel taller than it was offered.
        let child = core.add(p.growing());
        let mut vp = viewport(Expanse::new(10, 0))?;
        let (settled, logs) = capture_logs(|| vp.resolve_layout(&mut core, child));
        settled?;
        assert_eq!(log.borrow().resolves, MAX_LAYOUT_ATTEMPTS);
        assert!(logs.contains("layout did not settle"));
        Ok(())
    }

    #[test]
    fn bleed_is_cleared_after_shrink() -> Result<()> {
        let mut core = Core::new();
        let child = core.add(Spacer::new(60.0, 60.0).with_color(Color::WHITE));
        let mut vp = viewport(Expanse::default())?;
        vp.set_avoid_bleed(true);
        vp.resolve_layout(&mut core, child)?;
        assert!(vp.paint(&mut core, child)?);
        assert_eq!(vp.surface().pixel(Point { x: 50, y: 50 }), Some(Color::WHITE));

        core.with_widget::<Spacer, _>(child, |s| s.flex = crate::layout::FlexLayout::fixed(40.0, 40.0))?;
        vp.resolve_layout(&mut core, child)?;
        assert!(vp.paint(&mut core, child)?);
        assert_eq!(vp.surface().pixel(Point { x: 50, y: 50 }), Some(Color::TRANSPARENT));
        assert_eq!(vp.surface().pixel(Point { x: 10, y: 10 }), Some(Color::WHITE));
        assert!(!vp.paint(&mut core, child)?);
        Ok(())
    }

    proptest! {
        #[test]
        fn surface_is_power_of_two(sizes in prop::collection::vec((1u32..600, 1u32..600), 1..6)) {
            let mut core = Core::new();
            let child = core.add(Spacer::new(0.0, 0.0));
            let mut vp = viewport(Expanse::default()).map_err(|e| TestCaseError::fail(e.to_string()))?;
            for (w, h) in sizes {
                core.with_widget::<Spacer, _>(child, |s| s.flex = crate::layout::FlexLayout::fixed(w as f32, h as f32))
                    .map_err(|e| TestCaseError::fail(e.to_string()))?;
                let before = vp.canvas_dimensions();
                vp.resolve_layout(&mut core, child).map_err(|e| TestCaseError::fail(e.to_string()))?;
                let canvas = vp.canvas_dimensions();
                prop_assert!(canvas.is_power_of_two());
                prop_assert!(canvas.contains(&Expanse::new(w, h)));
                prop_assert!(canvas.contains(&before));
            }
        }
    }
}
