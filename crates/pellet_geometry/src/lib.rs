use derive_more::{Constructor, From};
use serde::{Deserialize, Serialize};

/// Width and height of an image or a rectangle.
#[derive(Constructor, From, Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size<T> {
    pub w: T,
    pub h: T,
}

impl Size<u32> {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    pub fn cast(self) -> Size<f32> {
        Size::new(self.w as f32, self.h as f32)
    }
}

/// An axis aligned rectangle defined by its top-left corner and size.
/// Used for pixel space rectangles on an image, where (0; 0) is the top-left pixel.
#[derive(Constructor, Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect<T> {
    pub x: T,
    pub y: T,
    pub w: T,
    pub h: T,
}

impl<T: Copy> Rect<T> {
    #[inline]
    pub fn size(&self) -> Size<T> {
        Size::new(self.w, self.h)
    }
}

impl Rect<u32> {
    /// Right edge, widened so rectangles near `u32::MAX` never overflow.
    #[inline]
    pub fn right(&self) -> u64 {
        self.x as u64 + self.w as u64
    }

    #[inline]
    pub fn bottom(&self) -> u64 {
        self.y as u64 + self.h as u64
    }

    /// Returns true if the rectangle lies entirely inside an image of the given size.
    pub fn fits(&self, size: Size<u32>) -> bool {
        self.right() <= size.w as u64 && self.bottom() <= size.h as u64
    }

    /// Normalizes the rectangle into texture space of an image with the given size.
    pub fn normalize(&self, size: Size<u32>) -> Box2D {
        let size = size.cast();
        Box2D::new(
            [self.x as f32 / size.w, self.y as f32 / size.h],
            [self.right() as f32 / size.w, self.bottom() as f32 / size.h],
        )
    }
}

/// Defines a rectangle by two dots.
/// Since we are not storing position and size here, by switching points
/// we can change rectangles orientation
///  ---     ---
/// | / |   | \ |
///  ---     ---
#[derive(Constructor, Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Box2D {
    pub a: [f32; 2],
    pub b: [f32; 2],
}

impl Box2D {
    #[inline]
    pub fn left(&self) -> f32 {
        self.a[0]
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.a[1]
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.b[0]
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.b[1]
    }

    pub fn flip_x(self) -> Self {
        Self::new([self.b[0], self.a[1]], [self.a[0], self.b[1]])
    }

    pub fn flip_y(self) -> Self {
        Self::new([self.a[0], self.b[1]], [self.b[0], self.a[1]])
    }

    /// Corners in clockwise order starting at `a`: a, (b.x; a.y), b, (a.x; b.y).
    #[inline]
    pub fn points(&self) -> [[f32; 2]; 4] {
        [
            [self.a[0], self.a[1]],
            [self.b[0], self.a[1]],
            [self.b[0], self.b[1]],
            [self.a[0], self.b[1]],
        ]
    }
}
