use thiserror::Error;

/// A malformed or incomplete atlas definition. Fatal to the load attempt:
/// an atlas is either fully valid or not constructed at all.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("unable to decode YAML atlas definition: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("unable to decode JSON atlas definition: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown definition format `{0}`")]
    UnknownFormat(String),

    #[error("image has zero size")]
    EmptyImage,

    #[error("duplicate region `{0}`")]
    DuplicateRegion(String),

    #[error("duplicate animation `{0}`")]
    DuplicateAnimation(String),

    #[error("region `{name}` has a negative position ({x}, {y})")]
    NegativePosition { name: String, x: i64, y: i64 },

    #[error("region `{name}` has non-positive size {width}x{height}")]
    NonPositiveSize {
        name: String,
        width: i64,
        height: i64,
    },

    #[error("region `{name}` lies outside of the {image_width}x{image_height} image")]
    RegionOutOfBounds {
        name: String,
        image_width: u32,
        image_height: u32,
    },

    #[error("animation `{0}` has no frames")]
    EmptyAnimation(String),

    #[error("animation `{animation}` frame {frame} references unknown region `{region}`")]
    UnknownRegion {
        animation: String,
        frame: usize,
        region: String,
    },

    #[error("animation `{animation}` frame {frame} has no duration")]
    MissingDuration { animation: String, frame: usize },

    #[error("animation `{animation}` frame {frame} has invalid duration {duration}")]
    InvalidDuration {
        animation: String,
        frame: usize,
        duration: f32,
    },
}

/// Lookup of a name the atlas does not contain. Recoverable by the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotFoundError {
    #[error("region `{0}` not found")]
    Region(String),

    #[error("animation `{0}` not found")]
    Animation(String),
}

#[derive(Debug, Error)]
pub enum AtlasError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),
}
