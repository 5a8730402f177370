use std::path::Path;

use pellet_geometry::{Rect, Size};
use serde::{Deserialize, Serialize};

use crate::{animations::file::AnimationDeclaration, error::FormatError};

/// Declarative description of an atlas: the image it slices, its named
/// regions and the animations built from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct AtlasDefinition {
    /// Name of the source image, resolved by the host's asset loader.
    pub texture: String,
    pub regions: Vec<RegionDeclaration>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub animations: Vec<AnimationDeclaration>,
}

/// A rectangle in source image pixels. Signed so negative values in a
/// definition are reported by region name instead of failing to decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RegionDeclaration {
    pub name: String,
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl RegionDeclaration {
    pub fn new(name: impl Into<String>, x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            width,
            height,
        }
    }

    pub(crate) fn rect(&self, image: Size<u32>) -> Result<Rect<u32>, FormatError> {
        if self.x < 0 || self.y < 0 {
            return Err(FormatError::NegativePosition {
                name: self.name.clone(),
                x: self.x,
                y: self.y,
            });
        }

        if self.width <= 0 || self.height <= 0 {
            return Err(FormatError::NonPositiveSize {
                name: self.name.clone(),
                width: self.width,
                height: self.height,
            });
        }

        let out_of_bounds = || FormatError::RegionOutOfBounds {
            name: self.name.clone(),
            image_width: image.w,
            image_height: image.h,
        };

        let [x, y, w, h] = [self.x, self.y, self.width, self.height];
        Ok(Rect::new(
            x.try_into().map_err(|_| out_of_bounds())?,
            y.try_into().map_err(|_| out_of_bounds())?,
            w.try_into().map_err(|_| out_of_bounds())?,
            h.try_into().map_err(|_| out_of_bounds())?,
        ))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionFormat {
    Yaml,
    Json,
}

impl DefinitionFormat {
    /// Picks the decoder by file extension (`yaml`, `yml` or `json`).
    pub fn from_extension(path: impl AsRef<Path>) -> Result<Self, FormatError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("yaml" | "yml") => Ok(DefinitionFormat::Yaml),
            Some("json") => Ok(DefinitionFormat::Json),
            _ => Err(FormatError::UnknownFormat(path.display().to_string())),
        }
    }
}

impl AtlasDefinition {
    pub fn decode(text: &str, format: DefinitionFormat) -> Result<AtlasDefinition, FormatError> {
        match format {
            DefinitionFormat::Yaml => Self::decode_yaml(text),
            DefinitionFormat::Json => Self::decode_json(text),
        }
    }

    pub fn decode_yaml(yaml: &str) -> Result<AtlasDefinition, FormatError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn decode_json(json: &str) -> Result<AtlasDefinition, FormatError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_yaml(&self) -> Result<String, FormatError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animations::{file::FrameDeclaration, Playback};

    const YAML: &str = r#"
texture: images/atlas.png
regions:
  - { name: slime-1, x: 340, y: 0, width: 20, height: 20 }
  - { name: slime-2, x: 340, y: 20, width: 20, height: 20 }
animations:
  - name: slime-animation
    delay: 200
    frames: [slime-1, slime-2]
  - name: hit
    playback: once
    frames:
      - { region: slime-1, delay: 50 }
      - slime-2
"#;

    #[test]
    fn test_decode_yaml() {
        let def = AtlasDefinition::decode_yaml(YAML).unwrap();

        assert_eq!(def.texture, "images/atlas.png");
        assert_eq!(def.regions[1], RegionDeclaration::new("slime-2", 340, 20, 20, 20));
        assert_eq!(def.animations[0].delay, Some(200.));
        assert_eq!(def.animations[0].playback, Playback::Loop);
        assert_eq!(def.animations[1].playback, Playback::Once);
        assert_eq!(def.animations[1].frames[0].delay(), Some(50.));
        assert_eq!(
            def.animations[1].frames[1],
            FrameDeclaration::Region("slime-2".to_owned())
        );
    }

    #[test]
    fn test_decode_json() {
        let json = r#"{
            "texture": "atlas.png",
            "regions": [{ "name": "bat", "x": 64, "y": 0, "width": 32, "height": 32 }]
        }"#;
        let def = AtlasDefinition::decode(json, DefinitionFormat::Json).unwrap();

        assert_eq!(def.regions.len(), 1);
        assert!(def.animations.is_empty());
    }

    #[test]
    fn test_unknown_attribute_is_rejected() {
        let yaml = "texture: a.png\nregions:\n  - { name: a, x: 0, y: 0, width: 1, height: 1, depth: 2 }\n";
        let err = AtlasDefinition::decode_yaml(yaml).unwrap_err();
        assert!(matches!(err, FormatError::Yaml(_)));
    }

    #[test]
    fn test_missing_attribute_is_rejected() {
        let yaml = "texture: a.png\nregions:\n  - { name: a, x: 0, y: 0, width: 1 }\n";
        assert!(AtlasDefinition::decode_yaml(yaml).is_err());
    }

    #[test]
    fn test_yaml_round_trip() {
        let def = AtlasDefinition::decode_yaml(YAML).unwrap();
        let yaml = def.to_yaml().unwrap();
        assert_eq!(AtlasDefinition::decode_yaml(&yaml).unwrap(), def);
    }

    #[test]
    fn test_rect_validation() {
        let size = Size::new(64, 64);

        let err = RegionDeclaration::new("a", -1, 0, 8, 8).rect(size).unwrap_err();
        assert!(matches!(err, FormatError::NegativePosition { x: -1, .. }));

        let err = RegionDeclaration::new("a", 0, 0, 0, 8).rect(size).unwrap_err();
        assert!(matches!(err, FormatError::NonPositiveSize { width: 0, .. }));

        let err = RegionDeclaration::new("a", 0, 0, 8, i64::MAX).rect(size).unwrap_err();
        assert!(matches!(err, FormatError::RegionOutOfBounds { .. }));

        let rect = RegionDeclaration::new("a", 8, 16, 4, 2).rect(size).unwrap();
        assert_eq!(rect, Rect::new(8, 16, 4, 2));
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            DefinitionFormat::from_extension("atlas.YML").unwrap(),
            DefinitionFormat::Yaml
        );
        assert_eq!(
            DefinitionFormat::from_extension("a/b/atlas.json").unwrap(),
            DefinitionFormat::Json
        );
        assert!(DefinitionFormat::from_extension("atlas.xml").is_err());
    }
}
