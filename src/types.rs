use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// Supported image formats
pub const IMG_FORMATS: &[&str] = &[
    "bmp", "dng", "jpeg", "jpg", "mpo", "png", "tif", "tiff", "webp", "pfm",
];

// Precomputed HashSet of image extensions for fast lookup
pub static IMAGE_EXTENSIONS_SET: OnceLock<HashSet<String>> = OnceLock::new();

/// Get the image extensions set
pub fn get_image_extensions_set() -> &'static HashSet<String> {
    IMAGE_EXTENSIONS_SET.get_or_init(|| IMG_FORMATS.iter().map(|ext| ext.to_lowercase()).collect())
}

/// Whether `path` has one of the known image extensions (case-insensitive).
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| get_image_extensions_set().contains(&ext.to_lowercase()))
}

// A single character box on a plate
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CharacterAnnotation {
    pub char_id: String,
    pub bbox_coord: Vec<(f64, f64)>,
}

// A license plate with its polygon and characters
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LicensePlate {
    pub lp_id: String,
    pub poly_coord: Vec<(f64, f64)>,
    #[serde(default)]
    pub characters: Vec<CharacterAnnotation>,
}

// The per-image annotation file
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct SampleAnnotation {
    #[serde(default)]
    pub lps: Vec<LicensePlate>,
}

/// Dataset split as named in the input tree; maps to the YOLO split name on output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Split {
    Train,
    Test,
}

impl Split {
    pub const ALL: [Split; 2] = [Split::Train, Split::Test];

    /// Directory and manifest name in the input dataset.
    pub fn input_name(self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Test => "test",
        }
    }

    /// Directory name in the YOLO output trees.
    pub fn yolo_name(self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Test => "val",
        }
    }
}

// Images and labels directories of one YOLO tree
#[derive(Debug, Clone)]
pub struct TreeDirs {
    pub root: PathBuf,
    pub train_images_dir: PathBuf,
    pub val_images_dir: PathBuf,
    pub train_labels_dir: PathBuf,
    pub val_labels_dir: PathBuf,
}

impl TreeDirs {
    pub fn images_dir(&self, split: Split) -> &Path {
        match split {
            Split::Train => &self.train_images_dir,
            Split::Test => &self.val_images_dir,
        }
    }

    pub fn labels_dir(&self, split: Split) -> &Path {
        match split {
            Split::Train => &self.train_labels_dir,
            Split::Test => &self.val_labels_dir,
        }
    }
}

// Struct to hold the paths of the LP and OCR output trees
#[derive(Debug, Clone)]
pub struct OutputDirs {
    pub root: PathBuf,
    pub lp: TreeDirs,
    pub ocr: TreeDirs,
}

// Struct to hold processing statistics
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProcessingStats {
    pub total_samples_processed: usize,
    pub successful_conversions: usize,
    pub skipped_no_plates: usize,
    pub failed_conversions: usize,
    pub plates_written: usize,
    pub characters_written: usize,
}

impl ProcessingStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_total(&mut self) {
        self.total_samples_processed += 1;
    }

    pub fn increment_successful(&mut self) {
        self.successful_conversions += 1;
    }

    pub fn increment_skipped_no_plates(&mut self) {
        self.skipped_no_plates += 1;
    }

    pub fn increment_failed(&mut self) {
        self.failed_conversions += 1;
    }

    pub fn merge(&mut self, other: &ProcessingStats) {
        self.total_samples_processed += other.total_samples_processed;
        self.successful_conversions += other.successful_conversions;
        self.skipped_no_plates += other.skipped_no_plates;
        self.failed_conversions += other.failed_conversions;
        self.plates_written += other.plates_written;
        self.characters_written += other.characters_written;
    }

    pub fn print_summary(&self) {
        log::info!("=== Processing Summary ===");
        log::info!("Total samples processed: {}", self.total_samples_processed);
        log::info!("Successful conversions: {}", self.successful_conversions);
        log::info!("Skipped (no plates annotated): {}", self.skipped_no_plates);
        log::info!("Failed conversions: {}", self.failed_conversions);
        log::info!("Plates written: {}", self.plates_written);
        log::info!("Characters written: {}", self.characters_written);

        if self.failed_conversions > 0 {
            log::warn!(
                "{} of {} samples failed and were left out of the output",
                self.failed_conversions,
                self.total_samples_processed
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sample_annotation() {
        let json = r#"{
            "imagePath": "ignored.jpg",
            "lps": [{
                "lp_id": "1",
                "lp_type": "car",
                "poly_coord": [[10, 20], [60, 22], [61, 40], [9, 38]],
                "characters": [{"char_id": "7", "bbox_coord": [[2.5, 3], [8, 15]]}]
            }]
        }"#;
        let annotation: SampleAnnotation = serde_json::from_str(json).unwrap();
        assert_eq!(annotation.lps.len(), 1);
        let lp = &annotation.lps[0];
        assert_eq!(lp.lp_id, "1");
        assert_eq!(lp.poly_coord[1], (60.0, 22.0));
        assert_eq!(lp.characters[0].char_id, "7");
        assert_eq!(lp.characters[0].bbox_coord[0], (2.5, 3.0));
    }

    #[test]
    fn test_split_names() {
        assert_eq!(Split::Train.input_name(), "train");
        assert_eq!(Split::Train.yolo_name(), "train");
        assert_eq!(Split::Test.input_name(), "test");
        assert_eq!(Split::Test.yolo_name(), "val");
    }

    #[test]
    fn test_is_image_file() {
        assert!(is_image_file(Path::new("a/b/0001.JPG")));
        assert!(is_image_file(Path::new("x.png")));
        assert!(!is_image_file(Path::new("x.json")));
        assert!(!is_image_file(Path::new("noext")));
    }
}
