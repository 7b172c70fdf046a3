//! Error taxonomy. Every variant is recovered locally and logged; none is fatal.

use std::path::PathBuf;

use crate::scene::EntityId;

/// Failure while computing one entity's pose for one frame.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnimationError {
    #[error("non-finite {field} for entity {id}")]
    NonFinite { id: EntityId, field: &'static str },
}

/// Failure while configuring the render host.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SetupError {
    #[error("no primary window to read the pixel ratio from")]
    NoPrimaryWindow,

    #[error("invalid pixel ratio {0}")]
    InvalidPixelRatio(f32),

    #[error("invalid colour {0:?}")]
    InvalidColor(String),
}

/// Failure while loading a content override file.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("content file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("content file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("content validation error: {0}")]
    Invalid(String),
}
