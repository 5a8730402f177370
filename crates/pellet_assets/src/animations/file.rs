use pellet_collections::IndexedMap;
use serde::{Deserialize, Serialize};

use super::{Animation, Frame, Playback};
use crate::{
    atlas::{Region, RegionKey},
    error::FormatError,
    settings::TimeUnit,
};

/// A frame is either a bare region name, timed by the animation's shared delay,
/// or a region with its own delay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FrameDeclaration {
    Region(String),
    Timed(TimedFrame),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimedFrame {
    pub region: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<f32>,
}

impl FrameDeclaration {
    pub fn region(&self) -> &str {
        match self {
            FrameDeclaration::Region(region) => region,
            FrameDeclaration::Timed(frame) => &frame.region,
        }
    }

    pub fn delay(&self) -> Option<f32> {
        match self {
            FrameDeclaration::Region(_) => None,
            FrameDeclaration::Timed(frame) => frame.delay,
        }
    }
}

impl From<&str> for FrameDeclaration {
    fn from(region: &str) -> Self {
        FrameDeclaration::Region(region.to_owned())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct AnimationDeclaration {
    pub name: String,
    /// Shared frame duration, used by frames which do not declare their own.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<f32>,
    #[serde(default)]
    pub playback: Playback,
    pub frames: Vec<FrameDeclaration>,
}

impl AnimationDeclaration {
    /// Resolves frame references against already parsed regions.
    /// Both the shared and the per-frame form end up as (region, seconds) pairs.
    pub(crate) fn resolve(
        &self,
        regions: &IndexedMap<String, Region>,
        time_unit: TimeUnit,
    ) -> Result<Animation, FormatError> {
        if self.frames.is_empty() {
            return Err(FormatError::EmptyAnimation(self.name.clone()));
        }

        let frames = self
            .frames
            .iter()
            .enumerate()
            .map(|(i, frame)| self.resolve_frame(i, frame, regions, time_unit))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Animation::new(self.name.clone(), frames, self.playback))
    }

    fn resolve_frame(
        &self,
        index: usize,
        frame: &FrameDeclaration,
        regions: &IndexedMap<String, Region>,
        time_unit: TimeUnit,
    ) -> Result<Frame, FormatError> {
        let region = regions
            .get_index(frame.region())
            .map(RegionKey)
            .ok_or_else(|| FormatError::UnknownRegion {
                animation: self.name.clone(),
                frame: index,
                region: frame.region().to_owned(),
            })?;

        let delay = match (frame.delay(), self.delay) {
            (Some(own), Some(shared)) => {
                if own != shared {
                    log::debug!(
                        "Animation `{}` frame {index}: delay {own} overrides shared delay {shared}",
                        self.name
                    );
                }
                own
            }
            (Some(own), None) => own,
            (None, Some(shared)) => shared,
            (None, None) => {
                return Err(FormatError::MissingDuration {
                    animation: self.name.clone(),
                    frame: index,
                })
            }
        };

        let duration = time_unit.to_seconds(delay);
        // Zero would stall the playback loop forever
        if !(delay.is_finite() && duration > 0.) {
            return Err(FormatError::InvalidDuration {
                animation: self.name.clone(),
                frame: index,
                duration: delay,
            });
        }

        Ok(Frame { region, duration })
    }
}
