use derive_more::{Deref, DerefMut};
use nalgebra::{Point2, Vector2};
use pellet_assets::{Atlas, RegionKey};
use pellet_renderer_2d::{DrawCommand, DrawTarget, Rgba};
use pellet_world_2d::{Depth, Flip, Transform};

/// How a region is placed on screen. Shared by static and animated sprites.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Appearance {
    pub transform: Transform,
    /// Multiplied with the texture color, opaque white leaves it unchanged.
    pub tint: Rgba,
    pub flip: Flip,
    pub depth: Depth,
}

/// A single atlas region drawn with an [`Appearance`].
#[derive(Debug, Clone, Copy, PartialEq, Deref, DerefMut)]
pub struct Sprite {
    region: RegionKey,
    #[deref]
    #[deref_mut]
    appearance: Appearance,
}

impl Sprite {
    pub fn new(region: RegionKey) -> Self {
        Self {
            region,
            appearance: Appearance::default(),
        }
    }

    pub fn with_appearance(region: RegionKey, appearance: Appearance) -> Self {
        Self { region, appearance }
    }

    pub fn region(&self) -> RegionKey {
        self.region
    }

    pub fn set_region(&mut self, region: RegionKey) {
        self.region = region;
    }

    pub fn appearance(&self) -> &Appearance {
        &self.appearance
    }

    /// Width on screen: region width times horizontal scale.
    pub fn width<T>(&self, atlas: &Atlas<T>) -> f32 {
        atlas.region_by_key(self.region).width() as f32 * self.transform.scale.x
    }

    /// Height on screen: region height times vertical scale.
    pub fn height<T>(&self, atlas: &Atlas<T>) -> f32 {
        atlas.region_by_key(self.region).height() as f32 * self.transform.scale.y
    }

    pub fn size<T>(&self, atlas: &Atlas<T>) -> Vector2<f32> {
        Vector2::new(self.width(atlas), self.height(atlas))
    }

    /// Moves the pivot to the middle of the current region.
    pub fn center_origin<T>(&mut self, atlas: &Atlas<T>) {
        let size = atlas.region_by_key(self.region).size();
        self.transform.origin = Vector2::new(size.w as f32 / 2., size.h as f32 / 2.);
    }

    /// Emits exactly one draw command for the current region.
    pub fn draw<'a, T>(&self, atlas: &'a Atlas<T>, target: &mut impl DrawTarget<'a, T>) {
        target.draw(self.command(atlas, self.transform));
    }

    /// Same as [`Sprite::draw`], but at `position` instead of the stored one.
    /// The stored transform is left untouched.
    pub fn draw_at<'a, T>(
        &self,
        atlas: &'a Atlas<T>,
        target: &mut impl DrawTarget<'a, T>,
        position: Point2<f32>,
    ) {
        let transform = Transform {
            position,
            ..self.transform
        };
        target.draw(self.command(atlas, transform));
    }

    fn command<'a, T>(&self, atlas: &'a Atlas<T>, transform: Transform) -> DrawCommand<'a, T> {
        let region = atlas.region_by_key(self.region);
        DrawCommand {
            image: atlas.image(),
            source: region.rect(),
            uv: region.uv(),
            transform,
            tint: self.tint,
            flip: self.flip,
            depth: self.depth,
        }
    }
}
