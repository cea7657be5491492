use super::{Edges, Error, Expanse, Point, Result};

/// A rectangle with an integer top-left corner and size.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// Top-left corner.
    pub tl: Point,
    /// Width.
    pub w: u32,
    /// Height.
    pub h: u32,
}

impl Rect {
    /// Construct a rectangle from its corner and size.
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self {
            tl: Point { x, y },
            w,
            h,
        }
    }

    /// A zero-sized rectangle at the origin.
    pub fn zero() -> Self {
        Self::default()
    }

    /// The size of this rectangle.
    pub fn expanse(&self) -> Expanse {
        Expanse::new(self.w, self.h)
    }

    /// Does this rectangle have zero area?
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// One past the rightmost column.
    pub fn right(&self) -> u32 {
        self.tl.x.saturating_add(self.w)
    }

    /// One past the bottom row.
    pub fn bottom(&self) -> u32 {
        self.tl.y.saturating_add(self.h)
    }

    /// Does the rectangle contain the point?
    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.tl.x && p.x < self.right() && p.y >= self.tl.y && p.y < self.bottom()
    }

    /// The overlapping region of two rectangles, if any.
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let x = self.tl.x.max(other.tl.x);
        let y = self.tl.y.max(other.tl.y);
        let r = self.right().min(other.right());
        let b = self.bottom().min(other.bottom());
        if r > x && b > y {
            Some(Self::new(x, y, r - x, b - y))
        } else {
            None
        }
    }

    /// The rectangle left after removing `edges` from each side. Fails if the
    /// edges do not fit.
    pub fn inset(&self, edges: Edges) -> Result<Self> {
        if edges.horizontal() > self.w || edges.vertical() > self.h {
            return Err(Error::Geometry(format!(
                "edges {edges:?} do not fit in {}x{}",
                self.w, self.h
            )));
        }
        Ok(Self::new(
            self.tl.x + edges.left,
            self.tl.y + edges.top,
            self.w - edges.horizontal(),
            self.h - edges.vertical(),
        ))
    }

    /// Like `inset`, but collapses to an empty rectangle at the inner corner
    /// instead of failing.
    pub fn inset_saturating(&self, edges: Edges) -> Self {
        Self::new(
            self.tl.x.saturating_add(edges.left),
            self.tl.y.saturating_add(edges.top),
            self.w.saturating_sub(edges.horizontal()),
            self.h.saturating_sub(edges.vertical()),
        )
    }

    /// The parts of `self` not covered by `inner`, as up to two strips: the
    /// region right of `inner` and the region below it. `inner` is assumed to
    /// share the top-left corner of `self`.
    pub fn uncovered(&self, inner: Expanse) -> Vec<Self> {
        let mut out = Vec::new();
        if inner.w < self.w {
            out.push(Self::new(
                self.tl.x + inner.w,
                self.tl.y,
                self.w - inner.w,
                self.h,
            ));
        }
        if inner.h < self.h {
            let w = inner.w.min(self.w);
            if w > 0 {
                out.push(Self::new(self.tl.x, self.tl.y + inner.h, w, self.h - inner.h));
            }
        }
        out
    }
}

impl From<Expanse> for Rect {
    fn from(e: Expanse) -> Self {
        e.rect()
    }
}
