//! Drawing surfaces. The engine never draws text or glyphs itself; it only
//! needs rectangular fills, clears and blits, which is the capability an
//! embedder provides through [`Surface`] and [`SurfaceFactory`].

use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    geom::{Expanse, Point, Rect},
};

/// An RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// An opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// A color with alpha.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl From<Color> for Rgba<u8> {
    fn from(c: Color) -> Self {
        Self([c.r, c.g, c.b, c.a])
    }
}

impl From<Rgba<u8>> for Color {
    fn from(p: Rgba<u8>) -> Self {
        let [r, g, b, a] = p.0;
        Self { r, g, b, a }
    }
}

/// A 2D pixel surface. Operations are clipped to the surface bounds.
pub trait Surface {
    /// Dimensions in pixels.
    fn size(&self) -> Expanse;

    /// Fill a rectangle with a color, replacing what was there.
    fn fill(&mut self, rect: Rect, color: Color);

    /// Read one pixel.
    fn pixel(&self, p: Point) -> Option<Color>;

    /// Write one pixel.
    fn set_pixel(&mut self, p: Point, color: Color);

    /// Reset a rectangle to transparent.
    fn clear(&mut self, rect: Rect) {
        self.fill(rect, Color::TRANSPARENT);
    }

    /// Copy `src_rect` of `src` so that its top-left lands on `dst`.
    fn blit(&mut self, src: &dyn Surface, src_rect: Rect, dst: Point) {
        let Some(src_rect) = src_rect.intersect(&src.size().rect()) else {
            return;
        };
        let bounds = self.size().rect();
        for y in 0..src_rect.h {
            for x in 0..src_rect.w {
                let to = dst.offset(x, y);
                if !bounds.contains_point(to) {
                    continue;
                }
                if let Some(c) = src.pixel(src_rect.tl.offset(x, y)) {
                    self.set_pixel(to, c);
                }
            }
        }
    }
}

/// Creates surfaces on demand. Viewports call this when their backing surface
/// must grow.
pub trait SurfaceFactory {
    /// Create a transparent surface of the given size.
    fn create(&self, size: Expanse) -> Result<Box<dyn Surface>>;
}

/// A surface backed by an in-memory RGBA image.
#[derive(Debug, Clone)]
pub struct ImageSurface {
    /// Pixel storage.
    image: RgbaImage,
}

impl ImageSurface {
    /// A transparent surface.
    pub fn new(size: Expanse) -> Self {
        Self {
            image: RgbaImage::new(size.w, size.h),
        }
    }

    /// The backing image.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }
}

impl Surface for ImageSurface {
    fn size(&self) -> Expanse {
        Expanse::new(self.image.width(), self.image.height())
    }

    fn fill(&mut self, rect: Rect, color: Color) {
        let Some(r) = rect.intersect(&self.size().rect()) else {
            return;
        };
        let px: Rgba<u8> = color.into();
        for y in r.tl.y..r.bottom() {
            for x in r.tl.x..r.right() {
                self.image.put_pixel(x, y, px);
            }
        }
    }

    fn pixel(&self, p: Point) -> Option<Color> {
        self.image.get_pixel_checked(p.x, p.y).map(|px| (*px).into())
    }

    fn set_pixel(&mut self, p: Point, color: Color) {
        if let Some(px) = self.image.get_pixel_mut_checked(p.x, p.y) {
            *px = color.into();
        }
    }
}

/// Creates [`ImageSurface`]s, refusing sizes beyond a limit.
#[derive(Debug, Clone, Copy)]
pub struct ImageSurfaceFactory {
    /// Largest allowed dimension on either axis.
    pub max_dimension: u32,
}

impl Default for ImageSurfaceFactory {
    fn default() -> Self {
        Self {
            max_dimension: 16384,
        }
    }
}

impl SurfaceFactory for ImageSurfaceFactory {
    fn create(&self, size: Expanse) -> Result<Box<dyn Surface>> {
        if size.is_empty() || size.w > self.max_dimension || size.h > self.max_dimension {
            return Err(Error::Surface(format!(
                "cannot allocate a {}x{} surface (limit {})",
                size.w, size.h, self.max_dimension
            )));
        }
        Ok(Box::new(ImageSurface::new(size)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_clips() {
        let mut s = ImageSurface::new(Expanse::new(4, 4));
        s.fill(Rect::new(2, 2, 10, 10), Color::WHITE);
        assert_eq!(s.pixel(Point { x: 3, y: 3 }), Some(Color::WHITE));
        assert_eq!(s.pixel(Point { x: 1, y: 1 }), Some(Color::TRANSPARENT));
        assert_eq!(s.pixel(Point { x: 4, y: 4 }), None);
    }

    #[test]
    fn blit_copies_region() {
        let mut src = ImageSurface::new(Expanse::new(4, 4));
        src.fill(Rect::new(0, 0, 2, 2), Color::rgb(1, 2, 3));
        let mut dst = ImageSurface::new(Expanse::new(8, 8));
        dst.blit(&src, Rect::new(0, 0, 4, 4), Point { x: 6, y: 6 });
        assert_eq!(dst.pixel(Point { x: 7, y: 7 }), Some(Color::rgb(1, 2, 3)));
        assert_eq!(dst.pixel(Point { x: 5, y: 5 }), Some(Color::TRANSPARENT));
    }

    #[test]
    fn factory_limits() {
        let f = ImageSurfaceFactory { max_dimension: 64 };
        assert!(f.create(Expanse::new(64, 64)).is_ok());
        assert!(matches!(
            f.create(Expanse::new(65, 1)),
            Err(Error::Surface(_))
        ));
        assert!(f.create(Expanse::new(0, 1)).is_err());
    }
}
