use bytemuck::{Pod, Zeroable};
use nalgebra::Point2;
use pellet_geometry::{Box2D, Rect};
use pellet_world_2d::{Depth, Flip, Transform};

use crate::Rgba;

#[repr(C)]
#[derive(Default, Copy, Clone, Debug, PartialEq, Zeroable, Pod)]
pub struct SpriteVertex {
    pub position: [f32; 2],
    pub tex_position: [f32; 2],
    pub color: [f32; 4],
    pub depth: f32,
}

impl SpriteVertex {
    pub fn new(position: [f32; 2], tex_position: [f32; 2], color: [f32; 4], depth: f32) -> Self {
        Self {
            position,
            tex_position,
            color,
            depth,
        }
    }
}

/// A single textured quad to be rendered.
///
/// `source` is the pixel rectangle on `image`, `uv` is the same rectangle in
/// texture space. Where the quad ends up is defined by `transform`, and the
/// command carries everything a backend needs so it never has to look back
/// into the atlas.
#[derive(Debug)]
pub struct DrawCommand<'a, T> {
    pub image: &'a T,
    pub source: Rect<u32>,
    pub uv: Box2D,
    pub transform: Transform,
    pub tint: Rgba,
    pub flip: Flip,
    pub depth: Depth,
}

impl<T> Clone for DrawCommand<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for DrawCommand<'_, T> {}

impl<'a, T> DrawCommand<'a, T> {
    /// Calculate a quad in destination coordinates.
    /// Corners go clockwise starting from the top-left corner of the source region,
    /// matching the order of [`DrawCommand::uv_points`].
    pub fn quad(&self) -> [Point2<f32>; 4] {
        let mat = self.transform.to_homogeneous();
        let (w, h) = (self.source.w as f32, self.source.h as f32);

        [
            Point2::new(0., 0.),
            Point2::new(w, 0.),
            Point2::new(w, h),
            Point2::new(0., h),
        ]
        .map(|p| mat.transform_point(&p))
    }

    /// Texture coordinates with flipping applied.
    pub fn uv(&self) -> Box2D {
        let mut uv = self.uv;
        if self.flip.horizontal {
            uv = uv.flip_x();
        }
        if self.flip.vertical {
            uv = uv.flip_y();
        }
        uv
    }

    #[inline]
    pub fn uv_points(&self) -> [[f32; 2]; 4] {
        self.uv().points()
    }

    pub fn vertices(&self) -> [SpriteVertex; 4] {
        let quad = self.quad();
        let uv = self.uv_points();
        let color = self.tint.into();

        [0, 1, 2, 3].map(|i| SpriteVertex::new([quad[i].x, quad[i].y], uv[i], color, *self.depth))
    }
}

/// Anything able to accept draw commands: a GPU batch, a recording queue,
/// a software rasterizer.
pub trait DrawTarget<'a, T> {
    fn draw(&mut self, command: DrawCommand<'a, T>);
}

impl<'a, T> DrawTarget<'a, T> for Vec<DrawCommand<'a, T>> {
    fn draw(&mut self, command: DrawCommand<'a, T>) {
        self.push(command);
    }
}
