//! Bounding-box arithmetic and YOLO line formatting.

use geo::{Contains, LineString, Point, Polygon};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("polygon has no points")]
    EmptyPolygon,
    #[error("bounding box {0:?} has zero area inside a {1}x{2} image")]
    DegenerateBox(BoundingBox, u32, u32),
    #[error("image dimensions must be positive, got {0}x{1}")]
    ZeroDimension(u32, u32),
}

/// Axis-aligned box in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

/// Whole-pixel crop window clamped to an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    /// Shift the box by `(-dx, -dy)`, e.g. to move it into a crop's coordinate space.
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self {
            x_min: self.x_min - dx,
            y_min: self.y_min - dy,
            x_max: self.x_max - dx,
            y_max: self.y_max - dy,
        }
    }

    /// Round outward to whole pixels and clamp to a `width` x `height` image.
    pub fn to_pixel_rect(&self, width: u32, height: u32) -> Result<PixelRect, GeometryError> {
        let clamp = |v: f64, max: u32| v.max(0.0).min(max as f64) as u32;
        let x0 = clamp(self.x_min.floor(), width);
        let y0 = clamp(self.y_min.floor(), height);
        let x1 = clamp(self.x_max.ceil(), width);
        let y1 = clamp(self.y_max.ceil(), height);

        if x1 <= x0 || y1 <= y0 {
            return Err(GeometryError::DegenerateBox(*self, width, height));
        }

        Ok(PixelRect {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1 - y0,
        })
    }
}

/// Reduce a polygon to the tightest axis-aligned box containing all its points.
pub fn polygon_to_bounding_box(points: &[(f64, f64)]) -> Result<BoundingBox, GeometryError> {
    if points.is_empty() {
        return Err(GeometryError::EmptyPolygon);
    }

    let (x_min, y_min, x_max, y_max) = points.iter().fold(
        (f64::MAX, f64::MAX, f64::MIN, f64::MIN),
        |(x_min, y_min, x_max, y_max), &(x, y)| {
            (x_min.min(x), y_min.min(y), x_max.max(x), y_max.max(y))
        },
    );

    Ok(BoundingBox {
        x_min,
        y_min,
        x_max,
        y_max,
    })
}

/// Format `class_id center_x center_y width height`, normalized by the image size.
///
/// Values use `f64` debug formatting: whole numbers keep their `.0` and
/// magnitudes below `1e-4` switch to exponent form (`5e-10`).
///
/// `image_width` and `image_height` must be positive, otherwise the values are
/// infinite or NaN. Use [`try_format_yolo_line`] when that is not guaranteed.
pub fn format_yolo_line(
    class_id: usize,
    bbox: &BoundingBox,
    image_width: u32,
    image_height: u32,
) -> String {
    let image_width = image_width as f64;
    let image_height = image_height as f64;

    let x_center = (bbox.x_min + bbox.x_max) / (2.0 * image_width);
    let y_center = (bbox.y_min + bbox.y_max) / (2.0 * image_height);
    let width = (bbox.x_max - bbox.x_min) / image_width;
    let height = (bbox.y_max - bbox.y_min) / image_height;

    format!(
        "{} {:?} {:?} {:?} {:?}",
        class_id, x_center, y_center, width, height
    )
}

pub fn try_format_yolo_line(
    class_id: usize,
    bbox: &BoundingBox,
    image_width: u32,
    image_height: u32,
) -> Result<String, GeometryError> {
    if image_width == 0 || image_height == 0 {
        return Err(GeometryError::ZeroDimension(image_width, image_height));
    }
    Ok(format_yolo_line(class_id, bbox, image_width, image_height))
}

/// Whether the centroid of `points` lies strictly inside `polygon`.
///
/// Points on the polygon boundary are not contained. An empty `points` slice
/// has no centroid and is never inside.
pub fn is_point_inside_polygon(points: &[(f64, f64)], polygon: &[(f64, f64)]) -> bool {
    if points.is_empty() {
        return false;
    }

    let n = points.len() as f64;
    let (sum_x, sum_y) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), &(x, y)| (sx + x, sy + y));
    let centroid = Point::new(sum_x / n, sum_y / n);

    let polygon = Polygon::new(LineString::from(polygon.to_vec()), vec![]);
    polygon.contains(&centroid)
}
