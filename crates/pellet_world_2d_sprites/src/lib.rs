//! Drawable instances over a shared [`Atlas`].
//!
//! Instances never own atlas data. They keep a [`RegionKey`](pellet_assets::RegionKey) or an
//! [`AnimationKey`](pellet_assets::AnimationKey) and take the atlas as an
//! argument whenever they need to read it, so any number of them can be
//! driven from one parsed atlas.

use pellet_assets::{Atlas, NotFoundError};

pub mod animation;
pub mod sprites;
pub mod visual;

pub use animation::{AnimatedSprite, PlaybackEvent, PlaybackState};
pub use sprites::{Appearance, Sprite};
pub use visual::Visual;

/// Factory methods creating independent instances from an atlas.
pub trait SpriteFactory {
    fn create_sprite(&self, region: &str) -> Result<Sprite, NotFoundError>;

    fn create_animated_sprite(&self, animation: &str) -> Result<AnimatedSprite, NotFoundError>;
}

impl<T> SpriteFactory for Atlas<T> {
    fn create_sprite(&self, region: &str) -> Result<Sprite, NotFoundError> {
        self.region_key(region).map(Sprite::new)
    }

    fn create_animated_sprite(&self, animation: &str) -> Result<AnimatedSprite, NotFoundError> {
        let key = self.animation_key(animation)?;
        Ok(AnimatedSprite::new(self, key))
    }
}

