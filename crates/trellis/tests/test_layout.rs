//! Integration tests for layout and paint behavior.

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use trellis::prelude::*;

    fn factory() -> Rc<dyn SurfaceFactory> {
        Rc::new(ImageSurfaceFactory::default())
    }

    const RED: Color = Color::rgb(255, 0, 0);
    const BLUE: Color = Color::rgb(0, 0, 255);

    fn pixel(root: &Root, x: u32, y: u32) -> Option<Color> {
        root.surface().pixel(Point { x, y })
    }

    #[test]
    fn single_flex_child_fills_row() -> Result<()> {
        let mut core = Core::new();
        let row = core.add(MultiContainer::row());
        let spacer = core.add_child(row, Spacer::flex(1.0))?;
        let mut root = Root::builder()
            .max_dimensions(100, 0)
            .vertical(false)
            .build(core, row, factory())?;
        assert!(root.frame()?.resized);
        assert_eq!(root.core().size_of(spacer)?.w, 100);
        assert_eq!(root.dimensions().w, 100);
        Ok(())
    }

    #[test]
    fn row_paints_with_spacing() -> Result<()> {
        let mut core = Core::new();
        let row = core.add(MultiContainer::row().with_spacing(10.0));
        core.add_child(row, Spacer::new(40.0, 20.0).with_color(RED))?;
        core.add_child(row, Spacer::new(60.0, 20.0).with_color(BLUE))?;
        let mut root = Root::builder().vertical(false).build(core, row, factory())?;
        let out = root.frame()?;
        assert!(out.resized && out.painted);
        assert_eq!(root.dimensions(), Expanse::new(110, 20));
        assert_eq!(root.canvas_dimensions(), Expanse::new(128, 32));
        assert_eq!(pixel(&root, 39, 5), Some(RED));
        assert_eq!(pixel(&root, 45, 5), Some(Color::TRANSPARENT));
        assert_eq!(pixel(&root, 50, 5), Some(BLUE));
        assert_eq!(pixel(&root, 109, 19), Some(BLUE));
        assert!(!root.frame()?.painted);
        Ok(())
    }

    #[test]
    fn reflow_clears_stale_gap() -> Result<()> {
        let mut core = Core::new();
        let row = core.add(MultiContainer::row().with_spacing(10.0));
        let first = core.add_child(row, Spacer::new(40.0, 20.0).with_color(RED))?;
        core.add_child(row, Spacer::new(60.0, 20.0).with_color(BLUE))?;
        let mut root = Root::builder().vertical(false).build(core, row, factory())?;
        root.frame()?;
        assert_eq!(pixel(&root, 25, 5), Some(RED));

        root.core_mut()
            .with_widget::<Spacer, _>(first, |s| s.flex = FlexLayout::fixed(20.0, 20.0))?;
        assert!(root.frame()?.painted);
        assert_eq!(root.dimensions(), Expanse::new(90, 20));
        assert_eq!(pixel(&root, 19, 5), Some(RED));
        assert_eq!(pixel(&root, 25, 5), Some(Color::TRANSPARENT));
        assert_eq!(pixel(&root, 30, 5), Some(BLUE));
        Ok(())
    }

    #[test]
    fn gaps_show_container_background() -> Result<()> {
        let mut core = Core::new();
        let frame = core.add(
            Container::new()
                .with_padding(Edges::default())
                .with_background(BLUE),
        );
        let row = core.add_child(frame, MultiContainer::row().with_spacing(10.0))?;
        let first = core.add_child(row, Spacer::new(40.0, 20.0).with_color(RED))?;
        core.add_child(row, Spacer::new(20.0, 20.0).with_color(RED))?;
        let mut root = Root::builder().vertical(false).build(core, frame, factory())?;
        root.frame()?;
        assert_eq!(pixel(&root, 45, 5), Some(BLUE));

        root.core_mut()
            .with_widget::<Spacer, _>(first, |s| s.flex = FlexLayout::fixed(20.0, 20.0))?;
        root.frame()?;
        assert_eq!(pixel(&root, 25, 5), Some(BLUE));
        assert_eq!(pixel(&root, 35, 5), Some(RED));
        Ok(())
    }

    #[test]
    fn surface_never_shrinks_implicitly() -> Result<()> {
        let mut core = Core::new();
        let child = core.add(Spacer::new(60.0, 60.0));
        let mut root = Root::builder().build(core, child, factory())?;
        root.frame()?;
        assert_eq!(root.canvas_dimensions(), Expanse::new(64, 64));

        root.core_mut()
            .with_widget::<Spacer, _>(child, |s| s.flex = FlexLayout::fixed(130.0, 130.0))?;
        assert!(root.frame()?.resized);
        assert_eq!(root.canvas_dimensions(), Expanse::new(256, 256));

        root.core_mut()
            .with_widget::<Spacer, _>(child, |s| s.flex = FlexLayout::fixed(60.0, 60.0))?;
        root.frame()?;
        assert_eq!(root.dimensions(), Expanse::new(60, 60));
        assert_eq!(root.canvas_dimensions(), Expanse::new(256, 256));
        Ok(())
    }

    #[test]
    fn bleed_strips_are_cleared() -> Result<()> {
        let mut core = Core::new();
        let child = core.add(Spacer::new(60.0, 30.0).with_color(RED));
        let mut root = Root::builder()
            .vertical(false)
            .avoid_bleed(true)
            .build(core, child, factory())?;
        root.frame()?;
        assert_eq!(pixel(&root, 55, 5), Some(RED));

        root.core_mut()
            .with_widget::<Spacer, _>(child, |s| s.flex = FlexLayout::fixed(30.0, 30.0))?;
        root.frame()?;
        assert_eq!(pixel(&root, 55, 5), Some(Color::TRANSPARENT));
        assert_eq!(pixel(&root, 5, 5), Some(RED));
        Ok(())
    }

    #[test]
    fn themed_container_padding() -> Result<()> {
        let theme = Theme::from_json(
            r#"{"padding": {"top": 2, "right": 3, "bottom": 2, "left": 3}, "background": {"r": 0, "g": 0, "b": 255, "a": 255}}"#,
        )?;
        let mut core = Core::with_theme(theme);
        let boxed = core.add(Container::new());
        core.add_child(boxed, Spacer::new(10.0, 10.0).with_color(RED))?;
        let mut root = Root::builder().vertical(false).build(core, boxed, factory())?;
        root.frame()?;
        assert_eq!(root.dimensions(), Expanse::new(16, 14));
        assert_eq!(pixel(&root, 1, 1), Some(BLUE));
        assert_eq!(pixel(&root, 3, 2), Some(RED));
        assert_eq!(pixel(&root, 13, 11), Some(BLUE));
        Ok(())
    }

    #[test]
    fn disabling_a_child_reflows_siblings() -> Result<()> {
        let mut core = Core::new();
        let row = core.add(MultiContainer::row().with_spacing(0.0));
        let fixed = core.add_child(row, Spacer::new(40.0, 10.0))?;
        let flex = core.add_child(row, Spacer::flex(1.0))?;
        let mut root = Root::builder()
            .max_dimensions(100, 10)
            .vertical(false)
            .build(core, row, factory())?;
        root.frame()?;
        assert_eq!(root.core().size_of(flex)?.w, 60);

        root.core_mut().set_enabled(fixed, false)?;
        root.frame()?;
        assert_eq!(root.core().size_of(flex)?.w, 100);
        assert_eq!(root.core().size_of(fixed)?, Expanse::default());
        Ok(())
    }

    #[test]
    fn nested_viewport_is_clipped_and_blitted() -> Result<()> {
        let mut core = Core::new();
        let row = core.add(MultiContainer::row().with_spacing(0.0));
        core.add_child(row, Spacer::new(8.0, 32.0))?;
        let nested = core.add_child(
            row,
            ViewportWidget::new(factory(), FlexLayout::fixed(32.0, 32.0))?,
        )?;
        let inner = core.add_child(nested, Spacer::flex(1.0).with_color(RED))?;
        let mut root = Root::builder().vertical(false).build(core, row, factory())?;
        root.frame()?;

        assert_eq!(root.dimensions(), Expanse::new(40, 32));
        assert_eq!(root.core().size_of(inner)?, Expanse::new(32, 0));
        let vw = root.core().widget_ref::<ViewportWidget>(nested)?;
        assert_eq!(vw.viewport().max_dimensions(), Expanse::new(32, 32));

        root.core_mut()
            .with_widget::<Spacer, _>(inner, |s| s.flex.cross_basis = 32.0)?;
        root.frame()?;
        assert_eq!(root.core().size_of(inner)?, Expanse::new(32, 32));
        assert_eq!(pixel(&root, 7, 5), Some(Color::TRANSPARENT));
        assert_eq!(pixel(&root, 8, 5), Some(RED));
        assert_eq!(pixel(&root, 39, 31), Some(RED));
        Ok(())
    }
}
