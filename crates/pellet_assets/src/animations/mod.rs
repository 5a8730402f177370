use serde::{Deserialize, Serialize};

use crate::atlas::RegionKey;

pub mod file;

/// What happens when playback runs past the last frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Playback {
    /// Wrap around to the first frame.
    #[default]
    Loop,
    /// Bounce between the first and the last frame.
    PingPong,
    /// Stop on the last frame.
    Once,
}

/// A single region shown for `duration` seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub region: RegionKey,
    pub duration: f32,
}

/// This defines a single animation as an ordered relationship between
/// regions in the atlas. Always has at least one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    name: String,
    frames: Vec<Frame>,
    playback: Playback,
}

impl Animation {
    /// `frames` must not be empty, the parser guarantees this for every
    /// animation stored in an atlas.
    pub(crate) fn new(name: String, frames: Vec<Frame>, playback: Playback) -> Self {
        debug_assert!(!frames.is_empty(), "animation `{name}` has no frames");
        Self {
            name,
            frames,
            playback,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    #[inline]
    pub fn frame(&self, index: usize) -> &Frame {
        &self.frames[index]
    }

    #[inline]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn last_frame(&self) -> usize {
        self.frames.len() - 1
    }

    #[inline]
    pub fn is_last_frame(&self, index: usize) -> bool {
        self.last_frame() <= index
    }

    /// Default playback mode declared in the definition.
    pub fn playback(&self) -> Playback {
        self.playback
    }

    /// Sum of all frame durations in seconds, i.e. one pass over the frames.
    pub fn total_duration(&self) -> f32 {
        self.frames.iter().map(|f| f.duration).sum()
    }

    /// Returns the shared frame duration if every frame lasts equally long.
    pub fn uniform_duration(&self) -> Option<f32> {
        let first = self.frames[0].duration;
        self.frames
            .iter()
            .all(|f| f.duration == first)
            .then_some(first)
    }
}
