//! Layout primitives: the per-pass [`LayoutContext`], the [`FlexLayout`]
//! state held by leaf widgets, and the axis-aware [`Size`] type.

/// Single-pass layout budget.
mod context;
/// Flex contribution and resolution.
mod flex;

use serde::{Deserialize, Serialize};

pub use context::LayoutContext;
pub use flex::FlexLayout;

use crate::geom::Expanse;

/// A resolved or ideal size, before rounding to whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Size {
    /// Construct a size.
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// A zero size.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Build a size from lengths along a main and cross axis. `vertical`
    /// names the main axis.
    pub fn from_main_cross(vertical: bool, main: f32, cross: f32) -> Self {
        if vertical {
            Self::new(cross, main)
        } else {
            Self::new(main, cross)
        }
    }

    /// Length along the main axis.
    pub fn main(&self, vertical: bool) -> f32 {
        if vertical { self.height } else { self.width }
    }

    /// Length along the cross axis.
    pub fn cross(&self, vertical: bool) -> f32 {
        if vertical { self.width } else { self.height }
    }

    /// Finite and non-negative on both axes.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width >= 0.0 && self.height >= 0.0
    }

    /// Round to whole pixels. Only call on valid sizes.
    pub fn round(&self) -> Expanse {
        Expanse::new(self.width.round() as u32, self.height.round() as u32)
    }
}

impl From<Expanse> for Size {
    fn from(e: Expanse) -> Self {
        Self::new(e.w as f32, e.h as f32)
    }
}

/// Placement of a child along one axis when it is smaller than the space it
/// was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    /// The child received all available space during resolve.
    #[default]
    Stretch,
    /// Align to the leading edge.
    Start,
    /// Center within the free space.
    Center,
    /// Align to the trailing edge.
    End,
}

impl Align {
    /// Offset and drawn length for a child of `child` pixels inside `available`.
    pub fn place(self, child: u32, available: u32) -> (u32, u32) {
        if self == Self::Stretch || child >= available {
            return (0, available);
        }
        let free = available - child;
        match self {
            Self::Start | Self::Stretch => (0, child),
            Self::Center => (free / 2, child),
            Self::End => (free, child),
        }
    }
}

/// Alignment on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Alignment {
    /// Horizontal placement.
    pub horizontal: Align,
    /// Vertical placement.
    pub vertical: Align,
}

impl Alignment {
    /// The same placement on both axes.
    pub fn both(align: Align) -> Self {
        Self {
            horizontal: align,
            vertical: align,
        }
    }
}
