//! The widget trait.

use std::any::{Any, type_name};

use crate::{
    core::context::{LayoutCx, PaintCx, UpdateCx},
    error::Result,
    layout::{LayoutContext, Size},
};

/// Widgets are the behavior attached to nodes in the Core arena. Hooks only
/// run for enabled nodes.
pub trait Widget: Any {
    /// Report this widget's minimum extent and flex weight into `ctx`.
    /// Containers populate their children from here.
    fn populate(&mut self, ctx: &mut LayoutContext, cx: &mut LayoutCx) -> Result<()>;

    /// Compute the final size given the populated `ctx`. Containers resolve
    /// their children from here. The result must be finite and non-negative.
    fn resolve(&mut self, ctx: &mut LayoutContext, cx: &mut LayoutCx) -> Result<Size>;

    /// Draw into the region given by `cx`. Containers paint their children
    /// from here.
    fn paint(&mut self, _cx: &mut PaintCx) -> Result<()> {
        Ok(())
    }

    /// Called top-down before layout each frame.
    fn pre_layout_update(&mut self, _cx: &mut UpdateCx) -> Result<()> {
        Ok(())
    }

    /// Called top-down after layout each frame, once geometry is final.
    fn post_layout_update(&mut self, _cx: &mut UpdateCx) -> Result<()> {
        Ok(())
    }

    /// Name used in dumps and errors.
    fn name(&self) -> &'static str {
        let name = type_name::<Self>();
        name.rsplit("::").next().unwrap_or(name)
    }
}

/// Convert widgets into boxed trait objects.
impl<W> From<W> for Box<dyn Widget>
where
    W: Widget + 'static,
{
    fn from(widget: W) -> Self {
        Box::new(widget)
    }
}
