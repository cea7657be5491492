/// Per-side amounts, used for padding and insets.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edges {
    /// Top edge.
    pub top: u32,
    /// Right edge.
    pub right: u32,
    /// Bottom edge.
    pub bottom: u32,
    /// Left edge.
    pub left: u32,
}

impl Edges {
    /// Construct edges from each side, clockwise from the top.
    pub fn new(top: u32, right: u32, bottom: u32, left: u32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// The same amount on every side.
    pub fn all(n: u32) -> Self {
        Self::new(n, n, n, n)
    }

    /// `h` on the left and right, `v` on the top and bottom.
    pub fn symmetric(v: u32, h: u32) -> Self {
        Self::new(v, h, v, h)
    }

    /// Total of the left and right edges.
    pub fn horizontal(&self) -> u32 {
        self.left.saturating_add(self.right)
    }

    /// Total of the top and bottom edges.
    pub fn vertical(&self) -> u32 {
        self.top.saturating_add(self.bottom)
    }

    /// Total along one axis. `vertical` selects top and bottom.
    pub fn along(&self, vertical: bool) -> u32 {
        if vertical {
            self.vertical()
        } else {
            self.horizontal()
        }
    }

    /// Zero the edges along one axis.
    pub fn collapse(&mut self, vertical: bool) {
        if vertical {
            self.top = 0;
            self.bottom = 0;
        } else {
            self.left = 0;
            self.right = 0;
        }
    }
}
