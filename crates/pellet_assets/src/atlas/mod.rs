use std::rc::Rc;

use pellet_collections::IndexedMap;
use pellet_geometry::{Box2D, Rect, Size};
use pellet_renderer_2d::Image;

use crate::{
    animations::Animation,
    error::{FormatError, NotFoundError},
    settings::AtlasSettings,
};

pub mod ase;
pub mod definition;

use definition::AtlasDefinition;

/// Index of a [`Region`] inside the atlas which handed it out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegionKey(pub(crate) usize);

/// Index of an [`Animation`] inside the atlas which handed it out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationKey(pub(crate) usize);

impl RegionKey {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl AnimationKey {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A named rectangular part of the atlas image.
///
/// The texture space rectangle is computed once from the pixel rectangle and
/// the image size, and never changes afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    name: String,
    rect: Rect<u32>,
    uv: Box2D,
}

impl Region {
    pub(crate) fn new(name: impl Into<String>, rect: Rect<u32>, image: Size<u32>) -> Self {
        Self {
            name: name.into(),
            rect,
            uv: rect.normalize(image),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rectangle in source image pixels.
    #[inline]
    pub fn rect(&self) -> Rect<u32> {
        self.rect
    }

    /// Rectangle in texture space, (0; 0) being top-left and (1; 1) bottom-right.
    #[inline]
    pub fn uv(&self) -> Box2D {
        self.uv
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.rect.w
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.rect.h
    }

    #[inline]
    pub fn size(&self) -> Size<u32> {
        self.rect.size()
    }
}

/// One packed image plus the regions and animations sliced out of it.
///
/// The atlas holds a single shared reference to the image and owns all
/// regions and animations. It is never mutated after parsing, so any number
/// of sprites can read from it at the same time.
#[derive(Debug)]
pub struct Atlas<T> {
    texture: String,
    image: Rc<T>,
    regions: IndexedMap<String, Region>,
    animations: IndexedMap<String, Animation>,
}

impl<T: Image> Atlas<T> {
    pub fn parse(definition: &AtlasDefinition, image: Rc<T>) -> Result<Self, FormatError> {
        Self::parse_with(definition, image, &AtlasSettings::default())
    }

    /// Builds an atlas: regions first, then animations resolved against them.
    pub fn parse_with(
        definition: &AtlasDefinition,
        image: Rc<T>,
        settings: &AtlasSettings,
    ) -> Result<Self, FormatError> {
        let size = image.size();
        if size.is_empty() {
            return Err(FormatError::EmptyImage);
        }

        let mut regions = IndexedMap::with_capacity(definition.regions.len());
        for declaration in &definition.regions {
            let rect = declaration.rect(size)?;
            if settings.check_bounds && !rect.fits(size) {
                return Err(FormatError::RegionOutOfBounds {
                    name: declaration.name.clone(),
                    image_width: size.w,
                    image_height: size.h,
                });
            }

            let region = Region::new(declaration.name.clone(), rect, size);
            regions
                .try_insert(declaration.name.clone(), region)
                .map_err(|e| FormatError::DuplicateRegion(e.key))?;
        }

        let mut animations = IndexedMap::with_capacity(definition.animations.len());
        for declaration in &definition.animations {
            let animation = declaration.resolve(&regions, settings.time_unit)?;
            animations
                .try_insert(declaration.name.clone(), animation)
                .map_err(|e| FormatError::DuplicateAnimation(e.key))?;
        }

        log::debug!(
            "Parsed atlas `{}` ({}x{}): {} regions, {} animations",
            definition.texture,
            size.w,
            size.h,
            regions.len(),
            animations.len()
        );

        Ok(Self {
            texture: definition.texture.clone(),
            image,
            regions,
            animations,
        })
    }

    /// Decodes a YAML definition and parses it with default settings.
    pub fn from_yaml(yaml: &str, image: Rc<T>) -> Result<Self, FormatError> {
        Self::parse(&AtlasDefinition::decode_yaml(yaml)?, image)
    }
}

impl<T> Atlas<T> {
    /// Name of the source image as written in the definition.
    pub fn texture(&self) -> &str {
        &self.texture
    }

    pub fn image(&self) -> &T {
        &self.image
    }

    /// The shared image handle, for hosts that need to keep it alive on their own.
    pub fn image_handle(&self) -> &Rc<T> {
        &self.image
    }

    pub fn region(&self, name: &str) -> Result<&Region, NotFoundError> {
        self.region_key(name).map(|key| self.region_by_key(key))
    }

    pub fn animation(&self, name: &str) -> Result<&Animation, NotFoundError> {
        self.animation_key(name).map(|key| self.animation_by_key(key))
    }

    pub fn region_key(&self, name: &str) -> Result<RegionKey, NotFoundError> {
        self.regions
            .get_index(name)
            .map(RegionKey)
            .ok_or_else(|| NotFoundError::Region(name.to_owned()))
    }

    pub fn animation_key(&self, name: &str) -> Result<AnimationKey, NotFoundError> {
        self.animations
            .get_index(name)
            .map(AnimationKey)
            .ok_or_else(|| NotFoundError::Animation(name.to_owned()))
    }

    /// Panics if the key was issued by a different atlas holding fewer regions.
    #[inline]
    pub fn region_by_key(&self, key: RegionKey) -> &Region {
        &self.regions[key.0]
    }

    /// Panics if the key was issued by a different atlas holding fewer animations.
    #[inline]
    pub fn animation_by_key(&self, key: AnimationKey) -> &Animation {
        &self.animations[key.0]
    }

    pub fn regions(&self) -> impl ExactSizeIterator<Item = (RegionKey, &Region)> {
        self.regions.iter().map(|(i, _, r)| (RegionKey(i), r))
    }

    pub fn animations(&self) -> impl ExactSizeIterator<Item = (AnimationKey, &Animation)> {
        self.animations.iter().map(|(i, _, a)| (AnimationKey(i), a))
    }

    /// Frames of an animation as (region, seconds) pairs, in playback order.
    pub fn frames(&self, key: AnimationKey) -> impl ExactSizeIterator<Item = (&Region, f32)> {
        self.animation_by_key(key)
            .frames()
            .iter()
            .map(|f| (self.region_by_key(f.region), f.duration))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{animations::Playback, settings::TimeUnit};
    use float_cmp::approx_eq;
    use pellet_renderer_2d::ImageSize;

    const YAML: &str = r#"
texture: images/atlas.png
regions:
  - { name: bat, x: 64, y: 0, width: 32, height: 32 }
  - { name: slime-1, x: 0, y: 32, width: 16, height: 16 }
  - { name: slime-2, x: 16, y: 32, width: 16, height: 16 }
animations:
  - name: slime-animation
    delay: 200
    frames: [slime-1, slime-2]
  - name: blink
    playback: ping-pong
    frames:
      - { region: slime-1, delay: 100 }
      - { region: bat, delay: 300 }
"#;

    fn image() -> Rc<ImageSize> {
        Rc::new(ImageSize(Size::new(256, 256)))
    }

    #[test]
    fn test_parse() {
        let atlas = Atlas::from_yaml(YAML, image()).unwrap();

        assert_eq!(atlas.texture(), "images/atlas.png");
        assert_eq!(atlas.regions().len(), 3);
        assert_eq!(atlas.animations().len(), 2);

        let bat = atlas.region("bat").unwrap();
        assert_eq!(bat.rect(), Rect::new(64, 0, 32, 32));
        assert_eq!(bat.name(), "bat");

        let blink = atlas.animation("blink").unwrap();
        assert_eq!(blink.playback(), Playback::PingPong);
        assert!(approx_eq!(f32, blink.total_duration(), 0.4));
    }

    #[test]
    fn test_uv_is_normalized_pixel_rect() {
        let atlas = Atlas::from_yaml(YAML, image()).unwrap();

        for (_, region) in atlas.regions() {
            let rect = region.rect();
            let uv = region.uv();
            assert!(approx_eq!(f32, uv.left(), rect.x as f32 / 256.));
            assert!(approx_eq!(f32, uv.top(), rect.y as f32 / 256.));
            assert!(approx_eq!(f32, uv.right(), (rect.x + rect.w) as f32 / 256.));
            assert!(approx_eq!(f32, uv.bottom(), (rect.y + rect.h) as f32 / 256.));
        }
    }

    #[test]
    fn test_frames_resolve_to_regions() {
        let atlas = Atlas::from_yaml(YAML, image()).unwrap();
        let key = atlas.animation_key("slime-animation").unwrap();

        let frames: Vec<_> = atlas.frames(key).map(|(r, d)| (r.name(), d)).collect();
        assert_eq!(frames, [("slime-1", 0.2), ("slime-2", 0.2)]);
    }

    #[test]
    fn test_duplicate_region() {
        let yaml = r#"
texture: a.png
regions:
  - { name: bat, x: 0, y: 0, width: 8, height: 8 }
  - { name: bat, x: 8, y: 0, width: 8, height: 8 }
"#;
        let err = Atlas::from_yaml(yaml, image()).unwrap_err();
        assert!(matches!(err, FormatError::DuplicateRegion(name) if name == "bat"));
    }

    #[test]
    fn test_duplicate_animation() {
        let yaml = r#"
texture: a.png
regions:
  - { name: bat, x: 0, y: 0, width: 8, height: 8 }
animations:
  - { name: fly, delay: 100, frames: [bat] }
  - { name: fly, delay: 100, frames: [bat] }
"#;
        let err = Atlas::from_yaml(yaml, image()).unwrap_err();
        assert!(matches!(err, FormatError::DuplicateAnimation(name) if name == "fly"));
    }

    #[test]
    fn test_frame_referencing_undefined_region() {
        let yaml = r#"
texture: a.png
regions:
  - { name: bat, x: 0, y: 0, width: 8, height: 8 }
animations:
  - { name: fly, delay: 100, frames: [bat, bat-2] }
"#;
        let err = Atlas::from_yaml(yaml, image()).unwrap_err();
        assert!(matches!(err, FormatError::UnknownRegion { frame: 1, .. }));
    }

    #[test]
    fn test_region_out_of_bounds() {
        let yaml = "texture: a.png\nregions:\n  - { name: a, x: 250, y: 0, width: 8, height: 8 }\n";
        let def = AtlasDefinition::decode_yaml(yaml).unwrap();

        let err = Atlas::parse(&def, image()).unwrap_err();
        assert!(matches!(err, FormatError::RegionOutOfBounds { .. }));

        let settings = AtlasSettings {
            check_bounds: false,
            ..Default::default()
        };
        let atlas = Atlas::parse_with(&def, image(), &settings).unwrap();
        assert!(atlas.region("a").unwrap().uv().right() > 1.);
    }

    #[test]
    fn test_unchecked_region_past_u32_max() {
        let yaml = "texture: a.png\nregions:\n  - { name: a, x: 4294967295, y: 0, width: 2, height: 8 }\n";
        let def = AtlasDefinition::decode_yaml(yaml).unwrap();

        let err = Atlas::parse(&def, image()).unwrap_err();
        assert!(matches!(err, FormatError::RegionOutOfBounds { .. }));

        let settings = AtlasSettings {
            check_bounds: false,
            ..Default::default()
        };
        let atlas = Atlas::parse_with(&def, image(), &settings).unwrap();
        assert_eq!(atlas.region("a").unwrap().rect().right(), 4294967297);
    }

    #[test]
    fn test_seconds_time_unit() {
        let yaml = "texture: a.png\nregions:\n  - { name: a, x: 0, y: 0, width: 8, height: 8 }\nanimations:\n  - { name: idle, delay: 0.5, frames: [a] }\n";
        let def = AtlasDefinition::decode_yaml(yaml).unwrap();
        let settings = AtlasSettings {
            time_unit: TimeUnit::Seconds,
            ..Default::default()
        };

        let atlas = Atlas::parse_with(&def, image(), &settings).unwrap();
        assert_eq!(atlas.animation("idle").unwrap().frame(0).duration, 0.5);
    }

    #[test]
    fn test_empty_image() {
        let def = AtlasDefinition::decode_yaml("texture: a.png\nregions: []\n").unwrap();
        let err = Atlas::parse(&def, Rc::new(ImageSize(Size::new(0, 16)))).unwrap_err();
        assert!(matches!(err, FormatError::EmptyImage));
    }

    #[test]
    fn test_lookup_not_found() {
        let atlas = Atlas::from_yaml(YAML, image()).unwrap();

        assert_eq!(
            atlas.region("ghost").unwrap_err(),
            NotFoundError::Region("ghost".to_owned())
        );
        assert_eq!(
            atlas.animation_key("ghost").unwrap_err(),
            NotFoundError::Animation("ghost".to_owned())
        );
    }
}
