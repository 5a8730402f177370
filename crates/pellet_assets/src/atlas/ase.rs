use indexmap::IndexMap;
use serde::Deserialize;

use super::definition::{AtlasDefinition, RegionDeclaration};
use crate::{
    animations::{
        file::{AnimationDeclaration, FrameDeclaration, TimedFrame},
        Playback,
    },
    error::FormatError,
};

/// An atlas exported by Aseprite with `--format json-hash` or `json-array`.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AsepriteAtlas {
    pub frames: Frames,
    pub meta: Meta,
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum Frames {
    Hash(IndexMap<String, Sprite>),
    Array(Vec<NamedSprite>),
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Sprite {
    pub frame: Rect,
    #[serde(default)]
    pub rotated: bool,
    /// Frame duration in milliseconds.
    pub duration: u32,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct NamedSprite {
    pub filename: String,
    #[serde(flatten)]
    pub sprite: Sprite,
}

#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Forward,
    Reverse,
    Pingpong,
    PingpongReverse,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct FrameTag {
    pub name: String,
    pub from: usize,
    pub to: usize,
    #[serde(default)]
    pub direction: Direction,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    #[serde(default)]
    pub image: Option<String>,
    pub size: Size,
    #[serde(default)]
    pub frame_tags: Vec<FrameTag>,
}

#[derive(Deserialize, Debug, Clone, Copy)]
#[serde(rename_all = "camelCase")]
pub struct Size {
    pub w: u32,
    pub h: u32,
}

#[derive(Default, Deserialize, Debug, Clone, Copy)]
#[serde(rename_all = "camelCase")]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Frames {
    fn named(&self) -> Vec<(&str, &Sprite)> {
        match self {
            Frames::Hash(map) => map.iter().map(|(k, v)| (k.as_str(), v)).collect(),
            Frames::Array(list) => list
                .iter()
                .map(|f| (f.filename.as_str(), &f.sprite))
                .collect(),
        }
    }
}

impl AsepriteAtlas {
    pub fn decode(json: &str) -> Result<AsepriteAtlas, FormatError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Converts the export into a native definition: one region per frame,
    /// one animation per frame tag. Delays are in milliseconds, so the result
    /// must be parsed with [`TimeUnit::Milliseconds`](crate::settings::TimeUnit).
    pub fn to_definition(&self) -> Result<AtlasDefinition, FormatError> {
        let frames = self.frames.named();

        let regions: Vec<_> = frames
            .iter()
            .map(|(name, sprite)| {
                if sprite.rotated {
                    log::warn!("Aseprite frame `{name}` is rotated, rotation is ignored");
                }
                let f = sprite.frame;
                RegionDeclaration::new(*name, f.x.into(), f.y.into(), f.w.into(), f.h.into())
            })
            .collect();

        let animations = self
            .meta
            .frame_tags
            .iter()
            .map(|tag| tag_to_animation(tag, &frames))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(AtlasDefinition {
            texture: self.meta.image.clone().unwrap_or_default(),
            regions,
            animations,
        })
    }
}

fn tag_to_animation(
    tag: &FrameTag,
    frames: &[(&str, &Sprite)],
) -> Result<AnimationDeclaration, FormatError> {
    let out_of_range = |i: usize| FormatError::UnknownRegion {
        animation: tag.name.clone(),
        frame: i.saturating_sub(tag.from),
        region: format!("#{i}"),
    };

    if tag.from > tag.to {
        return Err(out_of_range(tag.from));
    }
    if tag.to >= frames.len() {
        return Err(out_of_range(tag.to));
    }

    let mut indexes: Vec<usize> = (tag.from..=tag.to).collect();
    if matches!(tag.direction, Direction::Reverse | Direction::PingpongReverse) {
        indexes.reverse();
    }

    let playback = match tag.direction {
        Direction::Forward | Direction::Reverse => Playback::Loop,
        Direction::Pingpong | Direction::PingpongReverse => Playback::PingPong,
    };

    Ok(AnimationDeclaration {
        name: tag.name.clone(),
        delay: None,
        playback,
        frames: indexes
            .into_iter()
            .map(|i| {
                let (name, sprite) = frames[i];
                FrameDeclaration::Timed(TimedFrame {
                    region: name.to_owned(),
                    delay: Some(sprite.duration as f32),
                })
            })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::atlas::Atlas;
    use float_cmp::approx_eq;
    use pellet_geometry::Size as ImageDimensions;
    use pellet_renderer_2d::ImageSize;

    const HASH: &str = r#"{
        "frames": {
            "slime 0.aseprite": { "frame": { "x": 0, "y": 0, "w": 16, "h": 16 }, "rotated": false, "trimmed": false,
                "spriteSourceSize": { "x": 0, "y": 0, "w": 16, "h": 16 }, "sourceSize": { "w": 16, "h": 16 }, "duration": 100 },
            "slime 1.aseprite": { "frame": { "x": 16, "y": 0, "w": 16, "h": 16 }, "rotated": false, "trimmed": false,
                "spriteSourceSize": { "x": 0, "y": 0, "w": 16, "h": 16 }, "sourceSize": { "w": 16, "h": 16 }, "duration": 150 },
            "slime 2.aseprite": { "frame": { "x": 32, "y": 0, "w": 16, "h": 16 }, "rotated": false, "trimmed": false,
                "spriteSourceSize": { "x": 0, "y": 0, "w": 16, "h": 16 }, "sourceSize": { "w": 16, "h": 16 }, "duration": 100 }
        },
        "meta": {
            "app": "https://www.aseprite.org/",
            "image": "slime.png",
            "size": { "w": 48, "h": 16 },
            "frameTags": [
                { "name": "idle", "from": 0, "to": 1, "direction": "forward" },
                { "name": "squish", "from": 0, "to": 2, "direction": "pingpong_reverse" }
            ]
        }
    }"#;

    #[test]
    fn test_hash_to_definition() {
        let ase = AsepriteAtlas::decode(HASH).unwrap();
        let def = ase.to_definition().unwrap();

        assert_eq!(def.texture, "slime.png");
        assert_eq!(def.regions.len(), 3);
        assert_eq!(def.regions[1], RegionDeclaration::new("slime 1.aseprite", 16, 0, 16, 16));

        let squish = &def.animations[1];
        assert_eq!(squish.playback, Playback::PingPong);
        assert_eq!(squish.frames[0].region(), "slime 2.aseprite");
        assert_eq!(squish.frames[2].region(), "slime 0.aseprite");
    }

    #[test]
    fn test_parsed_durations_are_per_frame() {
        let def = AsepriteAtlas::decode(HASH).unwrap().to_definition().unwrap();
        let atlas = Atlas::parse(&def, Rc::new(ImageSize(ImageDimensions::new(48, 16)))).unwrap();

        let idle = atlas.animation("idle").unwrap();
        assert!(approx_eq!(f32, idle.frame(0).duration, 0.1));
        assert!(approx_eq!(f32, idle.frame(1).duration, 0.15));
    }

    #[test]
    fn test_array_export() {
        let json = r#"{
            "frames": [
                { "filename": "bat_0", "frame": { "x": 0, "y": 0, "w": 8, "h": 8 }, "duration": 80 },
                { "filename": "bat_1", "frame": { "x": 8, "y": 0, "w": 8, "h": 8 }, "duration": 80 }
            ],
            "meta": { "size": { "w": 16, "h": 8 }, "frameTags": [{ "name": "fly", "from": 0, "to": 1 }] }
        }"#;
        let def = AsepriteAtlas::decode(json).unwrap().to_definition().unwrap();

        assert_eq!(def.texture, "");
        assert_eq!(def.animations[0].frames[1].region(), "bat_1");
        assert_eq!(def.animations[0].playback, Playback::Loop);
    }

    #[test]
    fn test_tag_out_of_range() {
        let json = r#"{
            "frames": { "a": { "frame": { "x": 0, "y": 0, "w": 8, "h": 8 }, "duration": 80 } },
            "meta": { "size": { "w": 8, "h": 8 }, "frameTags": [{ "name": "fly", "from": 0, "to": 3 }] }
        }"#;
        let err = AsepriteAtlas::decode(json).unwrap().to_definition().unwrap_err();

        assert!(matches!(err, FormatError::UnknownRegion { frame: 3, .. }));
    }
}
