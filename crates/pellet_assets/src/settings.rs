use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;

/// Unit of frame durations written in atlas definitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeUnit {
    #[default]
    Milliseconds,
    Seconds,
}

impl TimeUnit {
    /// Converts a duration in this unit into seconds.
    #[inline]
    pub fn to_seconds(self, value: f32) -> f32 {
        match self {
            TimeUnit::Milliseconds => value / 1000.,
            TimeUnit::Seconds => value,
        }
    }
}

/// Options applied while parsing an atlas definition.
#[derive(SmartDefault, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct AtlasSettings {
    pub time_unit: TimeUnit,
    /// Reject regions which extend past the image.
    #[default(true)]
    pub check_bounds: bool,
}
