use image::{DynamicImage, GenericImageView};
use log::debug;
use std::path::{Path, PathBuf};

use crate::alphabet::OcrAlphabet;
use crate::config::{CharCoords, ConvertConfig};
use crate::error::{ConvertError, Result};
use crate::geometry::{
    format_yolo_line, polygon_to_bounding_box, try_format_yolo_line, GeometryError,
};
use crate::io::LabelBuffer;
use crate::types::{LicensePlate, OutputDirs, Split};
use crate::utils::{load_image, read_and_parse_json, resize_long_side, save_jpeg};

/// Class id of the single class in the plate detection tree.
pub const LP_CLASS_ID: usize = 0;

/// Class name of the plate detection tree.
pub const LP_CLASS_NAME: &str = "license_plate";

/// Everything a sample conversion needs besides the sample itself.
#[derive(Debug, Clone, Copy)]
pub struct ConversionContext<'a> {
    pub config: &'a ConvertConfig,
    pub output_dirs: &'a OutputDirs,
    pub alphabet: &'a OcrAlphabet,
}

/// What a converted sample contributed to the output trees.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SampleOutcome {
    pub plates: usize,
    pub characters: usize,
}

// A plate crop waiting to be encoded
struct PendingCrop {
    path: PathBuf,
    image: DynamicImage,
}

fn geometry_error(lp: &LicensePlate) -> impl FnOnce(GeometryError) -> ConvertError + '_ {
    move |source| ConvertError::Geometry {
        lp_id: lp.lp_id.clone(),
        source,
    }
}

/// Paths of the input image and annotation of sample `id` in `split`.
pub fn sample_paths(input_dir: &Path, split: Split, id: &str) -> (PathBuf, PathBuf) {
    let split_dir = input_dir.join(split.input_name());
    (
        split_dir.join(format!("{}.jpg", id)),
        split_dir.join(format!("{}.json", id)),
    )
}

/// Convert one sample into the LP and OCR trees.
///
/// Every plate and character is validated before anything is written, so a
/// failing sample leaves no partial output behind.
pub fn process_sample(ctx: &ConversionContext, split: Split, id: &str) -> Result<SampleOutcome> {
    let (image_path, json_path) = sample_paths(&ctx.config.input_dir, split, id);

    let image = load_image(&image_path)?;
    let (image_width, image_height) = image.dimensions();
    let annotation = read_and_parse_json(&json_path)?;

    if annotation.lps.is_empty() {
        debug!("No plates annotated in {}", json_path.display());
        return Ok(SampleOutcome::default());
    }

    let sample_name = sanitize_filename::sanitize(id);
    let lp_tree = &ctx.output_dirs.lp;
    let ocr_tree = &ctx.output_dirs.ocr;
    let lp_label_path = lp_tree
        .labels_dir(split)
        .join(format!("{}.txt", sample_name));

    let mut labels = LabelBuffer::new();
    let mut crops = Vec::with_capacity(annotation.lps.len());
    let mut outcome = SampleOutcome::default();

    for lp in &annotation.lps {
        let lp_bbox = polygon_to_bounding_box(&lp.poly_coord).map_err(geometry_error(lp))?;

        // Normalized coordinates hold for the resized image as well.
        let lp_line = try_format_yolo_line(LP_CLASS_ID, &lp_bbox, image_width, image_height)
            .map_err(geometry_error(lp))?;
        labels.push_line(&lp_label_path, lp_line);

        let crop_rect = lp_bbox
            .to_pixel_rect(image_width, image_height)
            .map_err(geometry_error(lp))?;
        let crop = image.crop_imm(crop_rect.x, crop_rect.y, crop_rect.width, crop_rect.height);

        // Character boxes are shifted into the whole-pixel crop, which may start
        // before a fractional plate corner or after one clamped to the image.
        let (char_dx, char_dy) = match ctx.config.char_coords {
            CharCoords::Crop => (
                crop_rect.x as f64 - lp_bbox.x_min,
                crop_rect.y as f64 - lp_bbox.y_min,
            ),
            CharCoords::Image => (crop_rect.x as f64, crop_rect.y as f64),
        };

        let ocr_name = sanitize_filename::sanitize(format!("{}_{}", id, lp.lp_id));
        let ocr_label_path = ocr_tree
            .labels_dir(split)
            .join(format!("{}.txt", ocr_name));

        for character in &lp.characters {
            let class_id = ctx.alphabet.index_of(&character.char_id)?;
            let char_bbox = polygon_to_bounding_box(&character.bbox_coord)
                .map_err(geometry_error(lp))?
                .translate(char_dx, char_dy);
            labels.push_line(
                &ocr_label_path,
                format_yolo_line(class_id, &char_bbox, crop_rect.width, crop_rect.height),
            );
            outcome.characters += 1;
        }

        crops.push(PendingCrop {
            path: ocr_tree
                .images_dir(split)
                .join(format!("{}.jpg", ocr_name)),
            image: resize_long_side(&crop, ctx.config.ocr_size),
        });
        outcome.plates += 1;
    }

    let lp_image_path = lp_tree
        .images_dir(split)
        .join(format!("{}.jpg", sample_name));
    save_jpeg(&resize_long_side(&image, ctx.config.lp_size), &lp_image_path)?;

    for crop in &crops {
        save_jpeg(&crop.image, &crop.path)?;
    }

    labels.flush()?;

    debug!(
        "Converted {} ({} plates, {} characters)",
        id, outcome.plates, outcome.characters
    );
    Ok(outcome)
}
