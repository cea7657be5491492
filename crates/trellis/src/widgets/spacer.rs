use crate::{
    core::context::{LayoutCx, PaintCx},
    error::Result,
    layout::{FlexLayout, LayoutContext, Size},
    surface::Color,
    widget::Widget,
};

/// A leaf that takes space and optionally fills it with a color.
#[derive(Debug, Clone, Default)]
pub struct Spacer {
    /// Flex state.
    pub flex: FlexLayout,
    /// Fill color. Transparent when unset.
    pub color: Option<Color>,
}

impl Spacer {
    /// A fixed-size spacer.
    pub fn new(main: f32, cross: f32) -> Self {
        Self {
            flex: FlexLayout::fixed(main, cross),
            color: None,
        }
    }

    /// A spacer that takes a share of the free space.
    pub fn flex(ratio: f32) -> Self {
        Self {
            flex: FlexLayout::flex(ratio),
            color: None,
        }
    }

    /// Wrap an existing flex configuration.
    pub fn with_layout(flex: FlexLayout) -> Self {
        Self { flex, color: None }
    }

    /// Builder-style fill color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

impl Widget for Spacer {
    fn populate(&mut self, ctx: &mut LayoutContext, _cx: &mut LayoutCx) -> Result<()> {
        self.flex.populate(ctx);
        Ok(())
    }

    fn resolve(&mut self, ctx: &mut LayoutContext, _cx: &mut LayoutCx) -> Result<Size> {
        Ok(self.flex.resolve(ctx))
    }

    fn paint(&mut self, cx: &mut PaintCx) -> Result<()> {
        if cx.dirty()
            && let Some(color) = self.color
        {
            cx.fill(cx.rect(), color);
        }
        Ok(())
    }
}
