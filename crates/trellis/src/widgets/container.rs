use tracing::warn;

use crate::{
    core::context::{LayoutCx, PaintCx},
    error::{Error, Result},
    geom::{Edges, Rect},
    layout::{Alignment, LayoutContext, Size},
    surface::Color,
    widget::Widget,
};

/// A single-child box that adds padding, places its child and optionally
/// fills a background. Unset settings come from the theme.
#[derive(Debug, Clone, Default)]
pub struct Container {
    /// Padding override.
    padding: Option<Edges>,
    /// Alignment override.
    alignment: Option<Alignment>,
    /// Background override.
    background: Option<Color>,
    /// Scratch context populated with the child, kept for resolve.
    inner: Option<LayoutContext>,
    /// Padding actually applied by the last resolve.
    applied: Edges,
}

impl Container {
    /// A container with theme defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style padding.
    pub fn with_padding(mut self, padding: Edges) -> Self {
        self.padding = Some(padding);
        self
    }

    /// Builder-style alignment.
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    /// Builder-style background.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Change the padding override.
    pub fn set_padding(&mut self, padding: Option<Edges>) {
        self.padding = padding;
    }

    /// Change the alignment override.
    pub fn set_alignment(&mut self, alignment: Option<Alignment>) {
        self.alignment = alignment;
    }

    /// Padding applied by the last resolve. Smaller than the configured
    /// padding on axes that were too cramped.
    pub fn applied_padding(&self) -> Edges {
        self.applied
    }

    /// Configured padding.
    fn padding(&self, cx: &LayoutCx) -> Edges {
        self.padding.unwrap_or_else(|| cx.theme().padding())
    }
}

/// Is there too little room along an axis of length `max` for `pad` of
/// padding around `basis`? Unconstrained axes are never cramped.
fn cramped(max: f32, pad: f32, basis: f32) -> bool {
    max > 0.0 && pad > 0.0 && basis + pad > max
}

impl Widget for Container {
    fn populate(&mut self, ctx: &mut LayoutContext, cx: &mut LayoutCx) -> Result<()> {
        let pad = self.padding(cx);
        let mut main_pad = pad.along(ctx.vertical) as f32;
        let cross_pad = pad.along(!ctx.vertical) as f32;

        let mut inner = LayoutContext::new(ctx.max_width, ctx.max_height, ctx.vertical);
        if inner.main_max() > main_pad {
            inner.set_main_max(inner.main_max() - main_pad);
        }
        if let Some(child) = cx.child()? {
            cx.populate(child, &mut inner)?;
        }
        if cramped(ctx.main_max(), main_pad, inner.main_basis()) {
            main_pad = 0.0;
        }

        let padded_cross = inner.cross_basis() + cross_pad;
        ctx.add_basis(inner.main_basis() + main_pad, padded_cross);
        if inner.main_flex() > 0.0 {
            ctx.add_flex(inner.main_flex());
        }
        if ctx.cross_max() > 0.0 && padded_cross > ctx.cross_max() {
            ctx.set_cross_max(padded_cross);
        }
        self.inner = Some(inner);
        Ok(())
    }

    fn resolve(&mut self, ctx: &mut LayoutContext, cx: &mut LayoutCx) -> Result<Size> {
        let mut inner = self
            .inner
            .clone()
            .ok_or_else(|| Error::Layout("container resolved before populate".into()))?;
        let mut pad = self.padding(cx);

        for vertical in [false, true] {
            let max = ctx.max_along(vertical);
            let p = pad.along(vertical) as f32;
            let basis = if vertical == ctx.vertical {
                inner.main_basis()
            } else {
                inner.cross_basis()
            };
            if cramped(max, p, basis) {
                warn!(
                    node = ?cx.node(),
                    vertical,
                    padding = p,
                    max,
                    "not enough room for padding, dropping it"
                );
                pad.collapse(vertical);
            }
        }
        let main_pad = pad.along(ctx.vertical) as f32;
        let cross_pad = pad.along(!ctx.vertical) as f32;

        let main_max = ctx.main_max();
        let inner_main = if main_max <= 0.0 {
            0.0
        } else if inner.main_flex() > 0.0 && ctx.main_flex() > 0.0 {
            let share = ctx.main_slack() * inner.main_flex() / ctx.main_flex();
            inner.main_basis() + share
        } else {
            (main_max - main_pad).max(0.0)
        };
        inner.set_main_max(inner_main);
        let cross_max = ctx.cross_max();
        inner.set_cross_max(if cross_max > 0.0 {
            (cross_max - cross_pad).max(0.0)
        } else {
            0.0
        });

        let child = match cx.child()? {
            Some(child) => cx.resolve(child, &mut inner)?,
            None => Size::zero(),
        };
        if inner.size_changed {
            cx.request_repaint();
        }
        self.applied = pad;
        Ok(Size::new(
            child.width + pad.horizontal() as f32,
            child.height + pad.vertical() as f32,
        ))
    }

    fn paint(&mut self, cx: &mut PaintCx) -> Result<()> {
        let rect = cx.rect();
        if let Some(bg) = self.background.or_else(|| cx.theme().background()) {
            if cx.dirty() {
                cx.fill(rect, bg);
            }
            cx.set_backdrop(bg);
        }
        let Some(child) = cx.child()? else {
            return Ok(());
        };
        let content = rect.inset_saturating(self.applied);
        let size = cx.size_of(child)?;
        let align = self.alignment.unwrap_or_else(|| cx.theme().alignment());
        let (x, w) = align.horizontal.place(size.w, content.w);
        let (y, h) = align.vertical.place(size.h, content.h);
        cx.paint_child(child, Rect::new(content.tl.x + x, content.tl.y + y, w, h))?;
        Ok(())
    }
}
