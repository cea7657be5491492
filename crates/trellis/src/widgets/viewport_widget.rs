use std::rc::Rc;

use crate::{
    core::context::{LayoutCx, PaintCx},
    error::Result,
    geom::{Expanse, Rect},
    layout::{FlexLayout, LayoutContext, Size},
    surface::SurfaceFactory,
    viewport::Viewport,
    widget::Widget,
};

/// A leaf-sized widget that lays out and paints its single child through a
/// nested [`Viewport`], then blits the inner surface into its own region.
///
/// The child's layout is isolated: it never contributes to the outer
/// context. By default the child is bounded by this widget's resolved size
/// on both axes.
pub struct ViewportWidget {
    /// Flex state for the outer layout.
    pub flex: FlexLayout,
    /// Inner surface owner.
    viewport: Viewport,
    /// Leave the inner width unconstrained.
    free_width: bool,
    /// Leave the inner height unconstrained.
    free_height: bool,
}

impl ViewportWidget {
    /// Construct the widget. Fails if the factory cannot provide the inner
    /// surface.
    pub fn new(factory: Rc<dyn SurfaceFactory>, flex: FlexLayout) -> Result<Self> {
        Ok(Self {
            flex,
            viewport: Viewport::new(factory, Expanse::default(), false)?,
            free_width: false,
            free_height: false,
        })
    }

    /// Leave either inner axis unconstrained, so the child takes its natural
    /// size there and is clipped on paint.
    pub fn with_unconstrained(mut self, width: bool, height: bool) -> Self {
        self.free_width = width;
        self.free_height = height;
        self
    }

    /// Turn bleed avoidance on or off for the inner surface.
    pub fn with_avoid_bleed(mut self, avoid: bool) -> Self {
        self.viewport.set_avoid_bleed(avoid);
        self
    }

    /// The inner viewport.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }
}

impl Widget for ViewportWidget {
    fn populate(&mut self, ctx: &mut LayoutContext, _cx: &mut LayoutCx) -> Result<()> {
        self.flex.populate(ctx);
        Ok(())
    }

    fn resolve(&mut self, ctx: &mut LayoutContext, cx: &mut LayoutCx) -> Result<Size> {
        let size = self.flex.resolve(ctx);
        if let Some(child) = cx.child()? {
            let own = size.round();
            self.viewport.set_max_dimensions(Expanse::new(
                if self.free_width { 0 } else { own.w },
                if self.free_height { 0 } else { own.h },
            ));
            self.viewport.set_vertical(self.flex.last_vertical());
            if self.viewport.resolve_layout(cx.core(), child)? {
                cx.request_repaint();
            }
        }
        Ok(size)
    }

    fn paint(&mut self, cx: &mut PaintCx) -> Result<()> {
        let Some(child) = cx.child()? else {
            return Ok(());
        };
        let drew = self.viewport.paint(cx.core(), child)?;
        if drew || cx.dirty() {
            let rect = cx.rect();
            cx.blit(
                self.viewport.surface(),
                Rect::new(0, 0, rect.w, rect.h),
                rect.tl,
            );
        }
        Ok(())
    }
}
