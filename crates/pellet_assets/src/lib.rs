//! Atlas definitions and the immutable data parsed out of them.
//!
//! An [`Atlas`](atlas::Atlas) is built once from an
//! [`AtlasDefinition`](atlas::definition::AtlasDefinition) and a host supplied
//! image. After that it is read only: regions and animations are addressed by
//! [`RegionKey`](atlas::RegionKey) and [`AnimationKey`](atlas::AnimationKey),
//! which are plain indices into the atlas storage.

pub mod animations;
pub mod atlas;
pub mod error;
pub mod settings;

pub use animations::{Animation, Frame, Playback};
pub use atlas::{
    ase::AsepriteAtlas,
    definition::{AtlasDefinition, DefinitionFormat},
    AnimationKey, Atlas, Region, RegionKey,
};
pub use error::{AtlasError, FormatError, NotFoundError};
pub use settings::{AtlasSettings, TimeUnit};
