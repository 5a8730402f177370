use std::ops::{Deref, DerefMut};

use derive_more::From;
use nalgebra::{Point2, Vector2};
use pellet_assets::{Atlas, RegionKey};
use pellet_renderer_2d::DrawTarget;

use crate::{
    animation::{AnimatedSprite, PlaybackEvent},
    sprites::{Appearance, Sprite},
};

/// Either kind of sprite, for collections mixing both.
#[derive(Debug, Clone, PartialEq, From)]
pub enum Visual {
    Static(Sprite),
    Animated(AnimatedSprite),
}

impl Visual {
    pub fn region(&self) -> RegionKey {
        match self {
            Visual::Static(sprite) => sprite.region(),
            Visual::Animated(sprite) => sprite.region(),
        }
    }

    pub fn sprite(&self) -> &Sprite {
        match self {
            Visual::Static(sprite) => sprite,
            Visual::Animated(sprite) => sprite.sprite(),
        }
    }

    /// Advances animated sprites, static ones ignore time.
    pub fn update<T>(&mut self, atlas: &Atlas<T>, delta: f32) {
        self.update_with(atlas, delta, |_| {});
    }

    pub fn update_with<T>(
        &mut self,
        atlas: &Atlas<T>,
        delta: f32,
        on_event: impl FnMut(PlaybackEvent),
    ) {
        if let Visual::Animated(sprite) = self {
            sprite.update_with(atlas, delta, on_event);
        }
    }

    pub fn width<T>(&self, atlas: &Atlas<T>) -> f32 {
        self.sprite().width(atlas)
    }

    pub fn height<T>(&self, atlas: &Atlas<T>) -> f32 {
        self.sprite().height(atlas)
    }

    pub fn size<T>(&self, atlas: &Atlas<T>) -> Vector2<f32> {
        self.sprite().size(atlas)
    }

    pub fn draw<'a, T>(&self, atlas: &'a Atlas<T>, target: &mut impl DrawTarget<'a, T>) {
        self.sprite().draw(atlas, target);
    }

    pub fn draw_at<'a, T>(
        &self,
        atlas: &'a Atlas<T>,
        target: &mut impl DrawTarget<'a, T>,
        position: Point2<f32>,
    ) {
        self.sprite().draw_at(atlas, target, position);
    }
}

impl Deref for Visual {
    type Target = Appearance;

    fn deref(&self) -> &Self::Target {
        match self {
            Visual::Static(sprite) => &**sprite,
            Visual::Animated(sprite) => &**sprite,
        }
    }
}

impl DerefMut for Visual {
    fn deref_mut(&mut self) -> &mut Self::Target {
        match self {
            Visual::Static(sprite) => &mut **sprite,
            Visual::Animated(sprite) => &mut **sprite,
        }
    }
}
