use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Name of the output directory created next to the input dataset.
pub const OUTPUT_DIR_NAME: &str = "UC3M-LP-yolo";

/// Command-line arguments for converting a UC3M-LP dataset to YOLO format.
#[derive(Parser, Debug, Clone)]
#[command(version, long_about = None)]
pub struct Args {
    /// Path to the input dataset (holding train.txt, test.txt, train/ and test/)
    pub input_directory: String,

    /// Longer side, in pixels, of the images written for plate detection
    #[arg(value_parser = validate_size)]
    pub lp_size: u32,

    /// Longer side, in pixels, of the plate crops written for character detection
    #[arg(value_parser = validate_size)]
    pub ocr_size: u32,

    /// Coordinate space of the character boxes in the annotations
    #[arg(long = "char-coords", value_enum, default_value = "crop")]
    pub char_coords: CharCoords,
}

/// Command-line arguments for regenerating split manifests of a YOLO tree.
#[derive(Parser, Debug, Clone)]
#[command(version, long_about = None)]
pub struct ManifestArgs {
    /// YOLO dataset directory containing images/train and images/val
    pub dataset_dir: String,
}

// Coordinate space of `bbox_coord` in character annotations
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default)]
pub enum CharCoords {
    /// Relative to the plate crop
    #[default]
    Crop,
    /// Relative to the full image
    Image,
}

/// Resolved settings for one conversion run.
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    pub input_dir: PathBuf,
    pub output_root: PathBuf,
    pub lp_size: u32,
    pub ocr_size: u32,
    pub char_coords: CharCoords,
}

impl ConvertConfig {
    pub fn from_args(args: &Args) -> Self {
        let input_dir = PathBuf::from(&args.input_directory);
        let output_root = default_output_root(&input_dir);
        Self {
            input_dir,
            output_root,
            lp_size: args.lp_size,
            ocr_size: args.ocr_size,
            char_coords: args.char_coords,
        }
    }
}

/// `UC3M-LP-yolo` next to the input directory.
pub fn default_output_root(input_dir: &Path) -> PathBuf {
    match input_dir.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(OUTPUT_DIR_NAME),
        _ => PathBuf::from(OUTPUT_DIR_NAME),
    }
}

// Validate that the size is a positive pixel count
fn validate_size(s: &str) -> Result<u32, String> {
    match u32::from_str(s) {
        Ok(val) if val > 0 => Ok(val),
        _ => Err("SIZE must be a positive integer".to_string()),
    }
}
