use super::{LayoutContext, Size};

/// Flex state for a leaf widget. Widgets hold one of these and forward their
/// populate and resolve hooks to it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlexLayout {
    /// Share of the slack along the parent's main axis. Zero is fixed size.
    pub flex_ratio: f32,
    /// Requested minimum along the widget's main axis.
    pub main_basis: f32,
    /// Requested minimum along the widget's cross axis.
    pub cross_basis: f32,
    /// Content-driven minimum along the main axis.
    internal_main_basis: f32,
    /// Content-driven minimum along the cross axis.
    internal_cross_basis: f32,
    /// Orientation override. Inherits the context orientation when unset.
    pub vertical: Option<bool>,
    /// Orientation used by the last populate.
    last_vertical: bool,
}

impl FlexLayout {
    /// A fixed-size layout with the given bases.
    pub fn fixed(main_basis: f32, cross_basis: f32) -> Self {
        Self {
            main_basis,
            cross_basis,
            ..Default::default()
        }
    }

    /// A flexible layout with zero basis.
    pub fn flex(ratio: f32) -> Self {
        Self {
            flex_ratio: ratio,
            ..Default::default()
        }
    }

    /// Builder-style flex ratio.
    pub fn with_flex(mut self, ratio: f32) -> Self {
        self.flex_ratio = ratio;
        self
    }

    /// Builder-style orientation override.
    pub fn with_vertical(mut self, vertical: bool) -> Self {
        self.vertical = Some(vertical);
        self
    }

    /// Binding minimum along the main axis.
    pub fn effective_main_basis(&self) -> f32 {
        self.main_basis.max(self.internal_main_basis)
    }

    /// Binding minimum along the cross axis.
    pub fn effective_cross_basis(&self) -> f32 {
        self.cross_basis.max(self.internal_cross_basis)
    }

    /// Set the content-driven minimums. Returns true if either changed, in
    /// which case the owner should be marked for layout.
    pub fn set_internal_basis(&mut self, main: f32, cross: f32) -> bool {
        let changed = self.internal_main_basis != main || self.internal_cross_basis != cross;
        self.internal_main_basis = main;
        self.internal_cross_basis = cross;
        changed
    }

    /// Orientation used by the last populate.
    pub fn last_vertical(&self) -> bool {
        self.last_vertical
    }

    /// Report this widget's demand into `ctx`.
    pub fn populate(&mut self, ctx: &mut LayoutContext) {
        let vertical = self.vertical.unwrap_or(ctx.vertical);
        self.last_vertical = vertical;
        let main = self.effective_main_basis();
        let cross = self.effective_cross_basis();
        if vertical == ctx.vertical {
            ctx.add_basis(main, cross);
            if self.flex_ratio > 0.0 {
                ctx.add_flex(self.flex_ratio);
            }
        } else {
            ctx.add_basis(cross, main);
        }
    }

    /// Final size given the populated `ctx`.
    pub fn resolve(&mut self, ctx: &LayoutContext) -> Size {
        let vertical = self.vertical.unwrap_or(ctx.vertical);
        self.last_vertical = vertical;
        let basis = self.effective_main_basis();
        let main = if self.flex_ratio <= 0.0 {
            basis
        } else if vertical != ctx.vertical {
            basis.max(ctx.max_along(vertical))
        } else {
            let total = ctx.main_flex();
            if total > 0.0 {
                basis + ctx.main_slack() * self.flex_ratio / total
            } else {
                basis
            }
        };
        Size::from_main_cross(vertical, main, self.effective_cross_basis())
    }
}
