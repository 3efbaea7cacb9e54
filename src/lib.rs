//! UC3M-LP to YOLO dataset converter
//!
//! This library converts license plate annotations (plate polygons plus
//! per-character boxes) into two YOLO datasets: one for plate detection and
//! one for character detection on plate crops.

pub mod alphabet;
pub mod config;
pub mod conversion;
pub mod dataset;
pub mod error;
pub mod geometry;
pub mod io;
pub mod manifest;
pub mod types;
pub mod utils;

// Re-export commonly used types and functions
pub use alphabet::OcrAlphabet;
pub use config::{Args, CharCoords, ConvertConfig, ManifestArgs};
pub use dataset::process_dataset;
pub use error::ConvertError;
pub use geometry::{
    format_yolo_line, is_point_inside_polygon, polygon_to_bounding_box, BoundingBox,
};
pub use io::setup_output_directories;
pub use manifest::{read_manifest, write_manifest};
pub use types::{LicensePlate, OutputDirs, ProcessingStats, SampleAnnotation, Split};
