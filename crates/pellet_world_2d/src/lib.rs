use derive_more::{Constructor, Deref, From};
use nalgebra::{Matrix3, Point2, Rotation2, Vector2};
use smart_default::SmartDefault;

/// Mirroring applied when a region is drawn. Flipping never moves the
/// destination quad, it only swaps texture coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Constructor)]
pub struct Flip {
    pub horizontal: bool,
    pub vertical: bool,
}

impl Flip {
    pub const NONE: Flip = Flip {
        horizontal: false,
        vertical: false,
    };
    pub const X: Flip = Flip {
        horizontal: true,
        vertical: false,
    };
    pub const Y: Flip = Flip {
        horizontal: false,
        vertical: true,
    };
}

/// 2D placement of a drawable instance.
///
/// `origin` is the pivot in unscaled source pixels, relative to the top-left
/// corner of the region. It is placed at `position`, and both rotation (radians,
/// clockwise in a y-down space) and scaling happen around it.
#[derive(SmartDefault, Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Point2<f32>,
    pub origin: Vector2<f32>,
    #[default(Vector2::new(1., 1.))]
    pub scale: Vector2<f32>,
    pub rotation: f32,
}

impl Transform {
    pub fn from_position(x: f32, y: f32) -> Self {
        Self {
            position: Point2::new(x, y),
            ..Default::default()
        }
    }

    pub fn with_scale(mut self, x: f32, y: f32) -> Self {
        self.scale = Vector2::new(x, y);
        self
    }

    /// Homogeneous matrix mapping source pixel coordinates to destination space.
    pub fn to_homogeneous(&self) -> Matrix3<f32> {
        Matrix3::new_translation(&self.position.coords)
            * Rotation2::new(self.rotation).to_homogeneous()
            * Matrix3::new_nonuniform_scaling(&self.scale)
            * Matrix3::new_translation(&-self.origin)
    }
}

/// Layer depth used to order draw commands. Lower values are drawn first.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd, Deref, From)]
pub struct Depth(pub f32);
