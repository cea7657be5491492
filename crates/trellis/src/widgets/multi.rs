use tracing::warn;

use crate::{
    core::{
        context::{LayoutCx, PaintCx},
        id::NodeId,
    },
    error::{Error, Result},
    geom::Rect,
    layout::{LayoutContext, Size},
    widget::Widget,
};

/// Lays children out in a row or column with a gap between them.
///
/// When the container runs along the same axis as its parent's context, its
/// children share that context and flex against their parent's siblings.
/// Otherwise they get a context of their own, and the whole group reports
/// to the parent as a single item.
#[derive(Debug, Clone)]
pub struct MultiContainer {
    /// Orientation of the container's main axis.
    vertical: bool,
    /// Gap override.
    spacing: Option<f32>,
    /// Flex ratio toward the parent when the axes differ.
    flex: f32,
    /// Scratch context from the last populate, set when the axes differ.
    inner: Option<LayoutContext>,
}

impl MultiContainer {
    /// A container along the given axis.
    pub fn new(vertical: bool) -> Self {
        Self {
            vertical,
            spacing: None,
            flex: 0.0,
            inner: None,
        }
    }

    /// A horizontal container.
    pub fn row() -> Self {
        Self::new(false)
    }

    /// A vertical container.
    pub fn column() -> Self {
        Self::new(true)
    }

    /// Builder-style spacing.
    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = Some(spacing);
        self
    }

    /// Builder-style flex ratio, used when nested across the parent's axis.
    pub fn with_flex(mut self, ratio: f32) -> Self {
        self.flex = ratio;
        self
    }

    /// Main axis orientation.
    pub fn vertical(&self) -> bool {
        self.vertical
    }

    /// Change the gap override.
    pub fn set_spacing(&mut self, spacing: Option<f32>) {
        self.spacing = spacing;
    }

    /// Effective gap.
    fn spacing(&self, theme_spacing: f32) -> f32 {
        self.spacing.unwrap_or(theme_spacing).max(0.0)
    }

    /// Total gap length between `enabled` children.
    fn gaps(spacing: f32, enabled: usize) -> f32 {
        if enabled > 1 && spacing > 0.0 {
            (enabled - 1) as f32 * spacing
        } else {
            0.0
        }
    }

    /// Sum of main lengths and largest cross length over enabled children.
    fn resolve_children(
        &self,
        children: &[NodeId],
        ctx: &mut LayoutContext,
        cx: &mut LayoutCx,
    ) -> Result<(f32, f32)> {
        let mut main = 0.0;
        let mut cross: f32 = 0.0;
        for child in children {
            let size = cx.resolve(*child, ctx)?;
            if cx.is_enabled(*child)? {
                main += size.main(self.vertical);
                cross = cross.max(size.cross(self.vertical));
            }
        }
        Ok((main, cross))
    }
}

/// Number of enabled nodes in `children`.
fn enabled_count(children: &[NodeId], cx: &LayoutCx) -> Result<usize> {
    let mut n = 0;
    for child in children {
        if cx.is_enabled(*child)? {
            n += 1;
        }
    }
    Ok(n)
}

impl Widget for MultiContainer {
    fn populate(&mut self, ctx: &mut LayoutContext, cx: &mut LayoutCx) -> Result<()> {
        let children = cx.children()?;
        let enabled = enabled_count(&children, cx)?;
        let gaps = Self::gaps(self.spacing(cx.theme().spacing()), enabled);

        if self.vertical == ctx.vertical {
            self.inner = None;
            for child in &children {
                cx.populate(*child, ctx)?;
            }
            ctx.add_basis(gaps, 0.0);
        } else {
            let mut inner = LayoutContext::new(ctx.max_width, ctx.max_height, self.vertical);
            for child in &children {
                cx.populate(*child, &mut inner)?;
            }
            inner.add_basis(gaps, 0.0);
            ctx.add_basis(inner.cross_basis(), inner.main_basis());
            if self.flex > 0.0 {
                ctx.add_flex(self.flex);
            }
            self.inner = Some(inner);
        }
        Ok(())
    }

    fn resolve(&mut self, ctx: &mut LayoutContext, cx: &mut LayoutCx) -> Result<Size> {
        let children = cx.children()?;
        let enabled = enabled_count(&children, cx)?;
        let gaps = Self::gaps(self.spacing(cx.theme().spacing()), enabled);

        if self.vertical == ctx.vertical {
            let outer_changed = ctx.size_changed;
            ctx.size_changed = false;
            let (main, cross) = self.resolve_children(&children, ctx, cx)?;
            if ctx.size_changed {
                cx.request_repaint();
            }
            ctx.size_changed |= outer_changed;
            return Ok(Size::from_main_cross(self.vertical, main + gaps, cross));
        }

        let mut inner = self
            .inner
            .clone()
            .ok_or_else(|| Error::Layout("container resolved before populate".into()))?;
        let basis = inner.cross_basis();
        let len = if self.flex > 0.0 && ctx.main_flex() > 0.0 {
            basis + ctx.main_slack() * self.flex / ctx.main_flex()
        } else {
            basis
        };
        inner.set_cross_max(len);
        let (main, cross) = self.resolve_children(&children, &mut inner, cx)?;
        if inner.size_changed {
            cx.request_repaint();
        }
        Ok(Size::from_main_cross(
            self.vertical,
            main + gaps,
            cross.max(len),
        ))
    }

    fn paint(&mut self, cx: &mut PaintCx) -> Result<()> {
        let rect = cx.rect();
        let spacing = self.spacing(cx.theme().spacing());
        let v = self.vertical;
        let (extent, cross) = if v { (rect.h, rect.w) } else { (rect.w, rect.h) };
        // Gaps and vacated space still hold the previous layout.
        if cx.dirty() {
            cx.clear_to_backdrop(rect);
        }

        let mut offset: f32 = 0.0;
        let mut first = true;
        for child in cx.children()? {
            if !cx.is_enabled(child)? {
                continue;
            }
            if !first {
                offset += spacing;
            }
            first = false;

            let len = cx.ideal_of(child)?.main(v);
            let start = offset.round() as u32;
            let mut end = (offset + len).round() as u32;
            offset += len;
            if end > extent {
                warn!(
                    node = ?cx.node(),
                    child = ?child,
                    end,
                    extent,
                    "child overflows its container, truncating"
                );
                end = extent;
            }
            let start = start.min(end);
            let child_rect = if v {
                Rect::new(rect.tl.x, rect.tl.y + start, cross, end - start)
            } else {
                Rect::new(rect.tl.x + start, rect.tl.y, end - start, cross)
            };
            cx.paint_child(child, child_rect)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::world::Core,
        geom::{Expanse, Point},
        layout::FlexLayout,
        surface::{Color, ImageSurface, Surface},
        testing::{Probe, ProbeLog, capture_logs},
    };
    use proptest::prelude::*;
    use std::{cell::RefCell, rc::Rc};

    fn with_probes(
        core: &mut Core,
        container: MultiContainer,
        probes: Vec<Probe>,
    ) -> Result<NodeId> {
        let id = core.add(container);
        for p in probes {
            core.add_child(id, p)?;
        }
        Ok(id)
    }

    fn fixed(main: f32, cross: f32) -> (Probe, Rc<RefCell<ProbeLog>>) {
        Probe::new(main, cross)
    }

    #[test]
    fn row_with_spacing() -> Result<()> {
        let mut core = Core::new();
        let (a, _) = fixed(40.0, 10.0);
        let (b, blog) = fixed(60.0, 20.0);
        let row = with_probes(&mut core, MultiContainer::row().with_spacing(10.0), vec![a, b])?;
        let mut ctx = LayoutContext::new(0.0, 0.0, false);
        core.populate(row, &mut ctx)?;
        assert_eq!((ctx.h_basis, ctx.v_basis), (110.0, 20.0));
        assert_eq!(core.resolve(row, &mut ctx)?, Size::new(110.0, 20.0));

        let mut surface = ImageSurface::new(Expanse::new(128, 32));
        core.paint(row, &mut surface, Rect::new(0, 0, 110, 20))?;
        assert_eq!(blog.borrow().last_rect, Some(Rect::new(50, 0, 60, 20)));
        Ok(())
    }

    #[test]
    fn disabled_children_are_excluded() -> Result<()> {
        let mut core = Core::new();
        let (a, _) = fixed(40.0, 10.0);
        let (b, blog) = fixed(60.0, 10.0);
        let (c, clog) = fixed(30.0, 10.0);
        let row = with_probes(&mut core, MultiContainer::row().with_spacing(10.0), vec![a, b, c])?;
        let middle = core.children_of(row)?[1];
        core.set_enabled(middle, false)?;

        let mut ctx = LayoutContext::new(0.0, 0.0, false);
        core.populate(row, &mut ctx)?;
        assert_eq!(ctx.h_basis, 80.0);
        assert_eq!(core.resolve(row, &mut ctx)?, Size::new(80.0, 10.0));
        assert_eq!(blog.borrow().resolves, 0);
        assert_eq!(core.size_of(middle)?, Expanse::default());

        let mut surface = ImageSurface::new(Expanse::new(128, 32));
        core.paint(row, &mut surface, Rect::new(0, 0, 80, 10))?;
        assert_eq!(clog.borrow().last_rect, Some(Rect::new(50, 0, 30, 10)));
        assert_eq!(blog.borrow().paints, 0);
        Ok(())
    }

    #[test]
    fn flex_siblings_share_slack() -> Result<()> {
        let mut core = Core::new();
        let (a, _) = fixed(10.0, 0.0);
        let (b, _) = fixed(10.0, 0.0);
        let row = with_probes(
            &mut core,
            MultiContainer::row().with_spacing(10.0),
            vec![a.with_flex(1.0), b.with_flex(3.0)],
        )?;
        let mut ctx = LayoutContext::new(130.0, 0.0, false);
        core.populate(row, &mut ctx)?;
        assert_eq!(core.resolve(row, &mut ctx)?.width, 130.0);
        let kids = core.children_of(row)?;
        assert_eq!(core.size_of(kids[0])?.w, 35);
        assert_eq!(core.size_of(kids[1])?.w, 85);
        Ok(())
    }

    #[test]
    fn column_in_row_is_isolated() -> Result<()> {
        let mut core = Core::new();
        let (a, _) = fixed(10.0, 5.0);
        let (b, _) = fixed(20.0, 7.0);
        let col = with_probes(&mut core, MultiContainer::column().with_spacing(2.0), vec![a, b])?;
        let mut ctx = LayoutContext::new(0.0, 0.0, false);
        core.populate(col, &mut ctx)?;
        assert_eq!((ctx.h_basis, ctx.v_basis), (7.0, 32.0));
        assert_eq!(ctx.h_flex, 0.0);
        assert_eq!(core.resolve(col, &mut ctx)?, Size::new(7.0, 32.0));
        Ok(())
    }

    #[test]
    fn flexed_column_takes_row_share() -> Result<()> {
        let mut core = Core::new();
        let (a, alog) = fixed(0.0, 5.0);
        let col = with_probes(
            &mut core,
            MultiContainer::column().with_flex(1.0),
            vec![a.with_flex(1.0)],
        )?;
        let mut ctx = LayoutContext::new(100.0, 50.0, false);
        core.populate(col, &mut ctx)?;
        assert_eq!((ctx.h_basis, ctx.h_flex), (5.0, 1.0));
        assert_eq!(core.resolve(col, &mut ctx)?, Size::new(100.0, 50.0));
        assert_eq!(alog.borrow().last_ctx.as_ref().map(|c| c.max_width), Some(100.0));
        Ok(())
    }

    #[test]
    fn overflow_is_truncated() -> Result<()> {
        let mut core = Core::new();
        let (a, _) = fixed(40.0, 10.0);
        let (b, blog) = fixed(60.0, 10.0);
        let row = with_probes(&mut core, MultiContainer::row().with_spacing(0.0), vec![a, b])?;
        let mut ctx = LayoutContext::new(0.0, 0.0, false);
        core.populate(row, &mut ctx)?;
        core.resolve(row, &mut ctx)?;
        let mut surface = ImageSurface::new(Expanse::new(128, 32));
        let (painted, logs) =
            capture_logs(|| core.paint(row, &mut surface, Rect::new(0, 0, 70, 10)));
        assert!(painted?);
        assert!(logs.contains("child overflows its container"));
        assert_eq!(blog.borrow().last_rect, Some(Rect::new(40, 0, 30, 10)));
        Ok(())
    }

    #[test]
    fn cross_axis_leaf_in_flexed_column_expands() -> Result<()> {
        let mut core = Core::new();
        let (a, alog) = fixed(10.0, 5.0);
        let col = with_probes(
            &mut core,
            MultiContainer::column().with_flex(1.0),
            vec![a.with_vertical(false).with_flex(1.0)],
        )?;
        let mut ctx = LayoutContext::new(100.0, 50.0, false);
        core.populate(col, &mut ctx)?;
        assert_eq!((ctx.h_basis, ctx.v_basis, ctx.h_flex), (10.0, 5.0, 1.0));
        assert_eq!(core.resolve(col, &mut ctx)?, Size::new(100.0, 5.0));
        let leaf = core.children_of(col)?[0];
        assert_eq!(core.size_of(leaf)?, Expanse::new(100, 5));
        let seen = alog.borrow().last_ctx.clone();
        assert_eq!(seen.map(|c| (c.vertical, c.v_flex)), Some((true, 0.0)));
        Ok(())
    }

    #[test]
    fn repaint_clears_vacated_gaps() -> Result<()> {
        let red = Color::rgb(255, 0, 0);
        let mut core = Core::new();
        let (a, _) = fixed(40.0, 10.0);
        let (b, _) = fixed(20.0, 10.0);
        let row = with_probes(
            &mut core,
            MultiContainer::row().with_spacing(10.0),
            vec![a.with_color(red), b.with_color(red)],
        )?;
        let mut surface = ImageSurface::new(Expanse::new(128, 32));
        let mut ctx = LayoutContext::new(0.0, 0.0, false);
        core.populate(row, &mut ctx)?;
        core.resolve(row, &mut ctx)?;
        core.paint(row, &mut surface, Rect::new(0, 0, 70, 10))?;
        assert_eq!(surface.pixel(Point { x: 25, y: 5 }), Some(red));

        let first = core.children_of(row)?[0];
        core.with_widget::<Probe, _>(first, |p| p.flex = FlexLayout::fixed(20.0, 10.0))?;
        let mut ctx = LayoutContext::new(0.0, 0.0, false);
        core.populate(row, &mut ctx)?;
        core.resolve(row, &mut ctx)?;
        core.paint(row, &mut surface, Rect::new(0, 0, 50, 10))?;
        assert_eq!(surface.pixel(Point { x: 25, y: 5 }), Some(Color::TRANSPARENT));
        assert_eq!(surface.pixel(Point { x: 35, y: 5 }), Some(red));
        Ok(())
    }

    proptest! {
        #[test]
        fn basis_conservation(
            bases in prop::collection::vec(0u32..100, 0..8),
            spacing in 0u32..20,
        ) {
            let mut core = Core::new();
            let probes = bases.iter().map(|b| Probe::new(*b as f32, 1.0).0).collect();
            let row = with_probes(
                &mut core,
                MultiContainer::row().with_spacing(spacing as f32),
                probes,
            ).map_err(|e| TestCaseError::fail(e.to_string()))?;
            let mut ctx = LayoutContext::new(0.0, 0.0, false);
            core.populate(row, &mut ctx).map_err(|e| TestCaseError::fail(e.to_string()))?;
            let n = bases.len() as u32;
            let sum: u32 = bases.iter().sum();
            let want = if n > 1 { sum + spacing * (n - 1) } else { sum };
            prop_assert_eq!(ctx.h_basis, want as f32);
            let size = core.resolve(row, &mut ctx).map_err(|e| TestCaseError::fail(e.to_string()))?;
            prop_assert_eq!(size.width, want as f32);
        }
    }
}
