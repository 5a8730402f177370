use bytemuck::{Pod, Zeroable};

pub use pellet_geometry::{Box2D, Rect, Size};
pub use pellet_world_2d::{Depth, Flip, Transform};

pub mod batch_renderer;
pub mod sprite_renderer;
pub mod texture;

pub use batch_renderer::{DrawQueue, SortMode};
pub use sprite_renderer::{DrawCommand, DrawTarget, SpriteVertex};
pub use texture::{Image, ImageSize};

/// Linear RGBA color with components in [0; 1]. Used as a tint multiplied
/// with the sampled texel.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Zeroable, Pod)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::new(1., 1., 1., 1.);
    pub const BLACK: Rgba = Rgba::new(0., 0., 0., 1.);
    pub const TRANSPARENT: Rgba = Rgba::new(0., 0., 0., 0.);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Builds a color from 8 bit components.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            r as f32 / 255.,
            g as f32 / 255.,
            b as f32 / 255.,
            a as f32 / 255.,
        )
    }
}

/// Opaque white, leaving the texture untouched.
impl Default for Rgba {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<Rgba> for [f32; 4] {
    fn from(c: Rgba) -> Self {
        [c.r, c.g, c.b, c.a]
    }
}
