use std::{cell::RefCell, rc::Rc};

use crate::{
    core::{
        context::{LayoutCx, PaintCx, UpdateCx},
        focus::PointerStyle,
    },
    error::Result,
    geom::Rect,
    layout::{FlexLayout, LayoutContext, Size},
    surface::Color,
    widget::Widget,
};

/// Everything a [`Probe`] saw.
#[derive(Debug, Default)]
pub struct ProbeLog {
    /// Hook names in call order.
    pub events: Vec<&'static str>,
    /// Populate calls.
    pub populates: usize,
    /// Resolve calls.
    pub resolves: usize,
    /// Paint calls.
    pub paints: usize,
    /// Pre-layout update calls.
    pub pre_updates: usize,
    /// Post-layout update calls.
    pub post_updates: usize,
    /// Context seen by the last resolve.
    pub last_ctx: Option<LayoutContext>,
    /// Region given to the last paint.
    pub last_rect: Option<Rect>,
    /// Whether the last paint was for the probe's own content.
    pub last_dirty: bool,
}

/// A flex leaf that records its hook calls.
pub struct Probe {
    /// Flex state.
    pub flex: FlexLayout,
    /// Shared log.
    log: Rc<RefCell<ProbeLog>>,
    /// Fixed resolve result, bypassing the flex computation.
    result: Option<Size>,
    /// Resolve to one pixel more than the height offered.
    growing: bool,
    /// Pointer style to request after layout.
    pointer: Option<PointerStyle>,
    /// Fill color.
    color: Option<Color>,
}

impl Probe {
    /// A fixed-size probe and a handle to its log.
    pub fn new(main: f32, cross: f32) -> (Self, Rc<RefCell<ProbeLog>>) {
        let log = Rc::new(RefCell::new(ProbeLog::default()));
        (
            Self {
                flex: FlexLayout::fixed(main, cross),
                log: log.clone(),
                result: None,
                growing: false,
                pointer: None,
                color: None,
            },
            log,
        )
    }

    /// Builder-style flex ratio.
    pub fn with_flex(mut self, ratio: f32) -> Self {
        self.flex.flex_ratio = ratio;
        self
    }

    /// Builder-style orientation override.
    pub fn with_vertical(mut self, vertical: bool) -> Self {
        self.flex.vertical = Some(vertical);
        self
    }

    /// Always resolve to `size`, valid or not.
    pub fn returning(mut self, size: Size) -> Self {
        self.result = Some(size);
        self
    }

    /// Resolve one pixel taller than the height offered, so layout never
    /// settles on an unconstrained axis.
    pub fn growing(mut self) -> Self {
        self.growing = true;
        self
    }

    /// Request a pointer style after layout.
    pub fn with_pointer_style(mut self, style: PointerStyle) -> Self {
        self.pointer = Some(style);
        self
    }

    /// Fill with a color when painted.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

impl Widget for Probe {
    fn populate(&mut self, ctx: &mut LayoutContext, _cx: &mut LayoutCx) -> Result<()> {
        let mut log = self.log.borrow_mut();
        log.events.push("populate");
        log.populates += 1;
        self.flex.populate(ctx);
        Ok(())
    }

    fn resolve(&mut self, ctx: &mut LayoutContext, _cx: &mut LayoutCx) -> Result<Size> {
        let mut log = self.log.borrow_mut();
        log.events.push("resolve");
        log.resolves += 1;
        log.last_ctx = Some(ctx.clone());
        if let Some(size) = self.result {
            return Ok(size);
        }
        if self.growing {
            return Ok(Size::new(self.flex.main_basis, ctx.max_height + 1.0));
        }
        Ok(self.flex.resolve(ctx))
    }

    fn paint(&mut self, cx: &mut PaintCx) -> Result<()> {
        {
            let mut log = self.log.borrow_mut();
            log.events.push("paint");
            log.paints += 1;
            log.last_rect = Some(cx.rect());
            log.last_dirty = cx.dirty();
        }
        if cx.dirty()
            && let Some(color) = self.color
        {
            cx.fill(cx.rect(), color);
        }
        for child in cx.children()? {
            let rect = cx.rect();
            cx.paint_child(child, rect)?;
        }
        Ok(())
    }

    fn pre_layout_update(&mut self, _cx: &mut UpdateCx) -> Result<()> {
        let mut log = self.log.borrow_mut();
        log.events.push("pre_layout_update");
        log.pre_updates += 1;
        Ok(())
    }

    fn post_layout_update(&mut self, cx: &mut UpdateCx) -> Result<()> {
        {
            let mut log = self.log.borrow_mut();
            log.events.push("post_layout_update");
            log.post_updates += 1;
        }
        if let Some(style) = self.pointer {
            cx.request_pointer_style(style);
        }
        Ok(())
    }
}
