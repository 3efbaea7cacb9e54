use image::imageops::FilterType;
use image::{DynamicImage, ImageDecoder, ImageError, ImageFormat, ImageReader};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::error::{ConvertError, Result};
use crate::types::SampleAnnotation;

/// Read and parse a sample's JSON annotation straight from the file stream.
pub fn read_and_parse_json(path: &Path) -> Result<SampleAnnotation> {
    let file = fs::File::open(path).map_err(|source| ConvertError::SampleLoad {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|source| {
        ConvertError::AnnotationParse {
            path: path.to_path_buf(),
            source,
        }
    })
}

fn image_load_error(path: &Path) -> impl Fn(ImageError) -> ConvertError + '_ {
    move |e| match e {
        ImageError::IoError(source) => ConvertError::SampleLoad {
            path: path.to_path_buf(),
            source,
        },
        source => ConvertError::ImageDecode {
            path: path.to_path_buf(),
            source,
        },
    }
}

/// Decode an image from disk, upright according to its EXIF orientation.
///
/// The format is guessed from the file contents, not the extension.
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    let load_error = image_load_error(path);
    let reader = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|source| ConvertError::SampleLoad {
            path: path.to_path_buf(),
            source,
        })?;

    let mut decoder = reader.into_decoder().map_err(&load_error)?;
    let orientation = decoder.orientation().map_err(&load_error)?;
    let mut image = DynamicImage::from_decoder(decoder).map_err(&load_error)?;
    image.apply_orientation(orientation);
    Ok(image)
}

/// Target dimensions so that the longer side equals `long_side`, keeping the aspect ratio.
///
/// Dimensions are truncated, never below one pixel.
pub fn scaled_dimensions(width: u32, height: u32, long_side: u32) -> (u32, u32) {
    let scale = long_side as f64 / width.max(height) as f64;
    let scaled_width = ((width as f64 * scale) as u32).max(1);
    let scaled_height = ((height as f64 * scale) as u32).max(1);
    (scaled_width, scaled_height)
}

/// Resize `image` so its longer side equals `long_side`.
pub fn resize_long_side(image: &DynamicImage, long_side: u32) -> DynamicImage {
    let (width, height) = scaled_dimensions(image.width(), image.height(), long_side);
    image.resize_exact(width, height, FilterType::Triangle)
}

/// Encode `image` as JPEG at `path`.
pub fn save_jpeg(image: &DynamicImage, path: &Path) -> Result<()> {
    image
        .to_rgb8()
        .save_with_format(path, ImageFormat::Jpeg)
        .map_err(|source| ConvertError::ImageWrite {
            path: path.to_path_buf(),
            source,
        })
}

/// Create a progress bar with the given length and label
pub fn create_progress_bar(len: u64, label: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(&format!(
                "{{spinner:.green}} [{}] [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} ({{eta}})",
                label
            ))
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb
}

/// Create an output directory if it does not exist yet and return its path
pub fn create_output_directory(path: &Path) -> Result<PathBuf> {
    if path.is_dir() {
        log::debug!("Directory {:?} already exists, reusing it.", path);
    } else {
        fs::create_dir_all(path).map_err(ConvertError::io_write(path))?;
    }
    Ok(path.to_path_buf())
}
