/// An axis-oriented budget threaded through one populate pass and the
/// matching resolve pass of a parent and its children.
///
/// Maxima of zero mean the axis is unconstrained. Bases only ever grow within
/// a pass.
#[derive(Debug, PartialEq)]
pub struct LayoutContext {
    /// Maximum width, or 0 for unconstrained.
    pub max_width: f32,
    /// Maximum height, or 0 for unconstrained.
    pub max_height: f32,
    /// Orientation of the main axis.
    pub vertical: bool,
    /// Accumulated minimum width.
    pub h_basis: f32,
    /// Accumulated minimum height.
    pub v_basis: f32,
    /// Summed horizontal flex weights.
    pub h_flex: f32,
    /// Summed vertical flex weights.
    pub v_flex: f32,
    /// Set when any widget resolved against this context changed size.
    pub size_changed: bool,
}

impl Clone for LayoutContext {
    /// Copies the budget. The clone starts with `size_changed` cleared so
    /// scratch passes never leak change signals into the original.
    fn clone(&self) -> Self {
        Self {
            max_width: self.max_width,
            max_height: self.max_height,
            vertical: self.vertical,
            h_basis: self.h_basis,
            v_basis: self.v_basis,
            h_flex: self.h_flex,
            v_flex: self.v_flex,
            size_changed: false,
        }
    }
}

impl LayoutContext {
    /// A fresh context with no accumulated demand.
    pub fn new(max_width: f32, max_height: f32, vertical: bool) -> Self {
        Self {
            max_width,
            max_height,
            vertical,
            h_basis: 0.0,
            v_basis: 0.0,
            h_flex: 0.0,
            v_flex: 0.0,
            size_changed: false,
        }
    }

    /// Report a minimum extent: `main` accumulates along the main axis, while
    /// `cross` only raises the cross basis to the largest value seen.
    pub fn add_basis(&mut self, main: f32, cross: f32) {
        if self.vertical {
            self.v_basis += main;
            self.h_basis = self.h_basis.max(cross);
        } else {
            self.h_basis += main;
            self.v_basis = self.v_basis.max(cross);
        }
    }

    /// Add a flex weight along the main axis.
    pub fn add_flex(&mut self, ratio: f32) {
        if self.vertical {
            self.v_flex += ratio;
        } else {
            self.h_flex += ratio;
        }
    }

    /// Maximum along an explicit axis.
    pub fn max_along(&self, vertical: bool) -> f32 {
        if vertical { self.max_height } else { self.max_width }
    }

    /// Maximum along the main axis.
    pub fn main_max(&self) -> f32 {
        self.max_along(self.vertical)
    }

    /// Maximum along the cross axis.
    pub fn cross_max(&self) -> f32 {
        self.max_along(!self.vertical)
    }

    /// Narrow or widen the main-axis maximum.
    pub fn set_main_max(&mut self, v: f32) {
        if self.vertical {
            self.max_height = v;
        } else {
            self.max_width = v;
        }
    }

    /// Narrow or widen the cross-axis maximum.
    pub fn set_cross_max(&mut self, v: f32) {
        if self.vertical {
            self.max_width = v;
        } else {
            self.max_height = v;
        }
    }

    /// Accumulated basis along the main axis.
    pub fn main_basis(&self) -> f32 {
        if self.vertical { self.v_basis } else { self.h_basis }
    }

    /// Largest basis seen along the cross axis.
    pub fn cross_basis(&self) -> f32 {
        if self.vertical { self.h_basis } else { self.v_basis }
    }

    /// Summed flex weight along the main axis.
    pub fn main_flex(&self) -> f32 {
        if self.vertical { self.v_flex } else { self.h_flex }
    }

    /// Space left on the main axis after every basis has been served. Zero
    /// when the axis is unconstrained.
    pub fn main_slack(&self) -> f32 {
        let max = self.main_max();
        if max <= 0.0 {
            return 0.0;
        }
        (max - self.main_basis()).max(0.0)
    }

    /// Do two contexts describe the same budget? The change flag is ignored.
    pub fn same_budget(&self, other: &Self) -> bool {
        self.clone() == other.clone()
    }
}
