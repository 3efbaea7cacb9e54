use std::path::PathBuf;

use thiserror::Error;

use crate::geometry::GeometryError;

/// Errors raised while converting a UC3M-LP dataset.
///
/// Sample-level variants make the converter skip the sample and continue;
/// setup failures (manifests, output directories) abort the run.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("failed to load {}: {source}", .path.display())]
    SampleLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode image {}: {source}", .path.display())]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to parse annotation {}: {source}", .path.display())]
    AnnotationParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown character {char_id:?}, expected one of 0-9 or A-Z")]
    UnknownCharacter { char_id: String },

    #[error("plate {lp_id:?}: {source}")]
    Geometry {
        lp_id: String,
        #[source]
        source: GeometryError,
    },

    #[error("failed to write {}: {source}", .path.display())]
    IoWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write image {}: {source}", .path.display())]
    ImageWrite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to read manifest {}: {source}", .path.display())]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConvertError {
    pub(crate) fn io_write(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| ConvertError::IoWrite { path, source }
    }
}

pub type Result<T, E = ConvertError> = std::result::Result<T, E>;
