use super::{Point, Rect};

/// An `Expanse` is a rectangle that has a width and height but no location.
/// Surface and widget sizes are expanses.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Expanse {
    /// Width in pixels.
    pub w: u32,
    /// Height in pixels.
    pub h: u32,
}

impl Expanse {
    /// Construct an expanse.
    pub fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }

    /// Does this expanse have zero area?
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Return a `Rect` with the same dimensions, located at the origin.
    pub fn rect(&self) -> Rect {
        Rect {
            tl: Point::default(),
            w: self.w,
            h: self.h,
        }
    }

    /// True if this expanse can completely enclose the target in both dimensions.
    pub fn contains(&self, other: &Self) -> bool {
        self.w >= other.w && self.h >= other.h
    }

    /// The per-axis maximum of two expanses.
    pub fn max(&self, other: &Self) -> Self {
        Self {
            w: self.w.max(other.w),
            h: self.h.max(other.h),
        }
    }

    /// Round each dimension up to the nearest power of two. Zero becomes one,
    /// so the result always describes an allocatable surface.
    pub fn next_power_of_two(&self) -> Self {
        Self {
            w: self.w.max(1).next_power_of_two(),
            h: self.h.max(1).next_power_of_two(),
        }
    }

    /// Are both dimensions powers of two?
    pub fn is_power_of_two(&self) -> bool {
        self.w.is_power_of_two() && self.h.is_power_of_two()
    }
}

impl From<Rect> for Expanse {
    fn from(r: Rect) -> Self {
        Self { w: r.w, h: r.h }
    }
}

impl From<(u32, u32)> for Expanse {
    fn from(v: (u32, u32)) -> Self {
        Self { w: v.0, h: v.1 }
    }
}
