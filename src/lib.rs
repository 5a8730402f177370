//! Sprite atlases and frame-based animation for 2D games.
//!
//! An [`Atlas`](assets::Atlas) is parsed once from a definition document and
//! owns every region and animation. Sprites created from it only hold keys,
//! so they stay cheap to create and fully independent of each other.

pub use pellet_assets as assets;
pub use pellet_collections as collections;
pub use pellet_core as timing;
pub use pellet_geometry as geometry;
pub use pellet_renderer_2d as renderer_2d;
pub use pellet_world_2d as world_2d;
pub use pellet_world_2d_sprites as sprites;

pub mod prelude {
    pub use pellet_assets::{
        Animation, AnimationKey, Atlas, AtlasDefinition, AtlasError, AtlasSettings,
        DefinitionFormat, FormatError, NotFoundError, Playback, Region, RegionKey, TimeUnit,
    };
    pub use pellet_core::{frame_stats::FrameStats, Delta};
    pub use pellet_renderer_2d::{
        DrawCommand, DrawQueue, DrawTarget, Image, ImageSize, Rgba, SortMode,
    };
    pub use pellet_world_2d::{Depth, Flip, Transform};
    pub use pellet_world_2d_sprites::{
        AnimatedSprite, Appearance, PlaybackEvent, PlaybackState, Sprite, SpriteFactory, Visual,
    };
}
