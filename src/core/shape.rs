use crate::domain::model::{AnalysisFailure, ShapeLabel};
use image::{DynamicImage, GrayImage, Luma};
use imageproc::contours::{find_contours, BorderType, Contour};
use imageproc::point::Point;

/// Fixed binarization threshold. Assumes a dark subject on a light
/// background; known fragility of the heuristic, kept for compatibility.
pub const BINARY_THRESHOLD: u8 = 127;

/// Classifies raw image bytes, absorbing every failure into a degraded label:
/// unreadable bytes or processing failures become `Error`, a photo without
/// any contour becomes `Indeterminate`. Never panics, never propagates.
pub fn classify_bytes(bytes: &[u8]) -> ShapeLabel {
    match try_classify_bytes(bytes) {
        Ok(label) => label,
        Err(AnalysisFailure::NoHandDetected) => ShapeLabel::Indeterminate,
        Err(_) => ShapeLabel::Error,
    }
}

/// Same pipeline with explicit reason codes, for callers that need to tell
/// "no hand detected" apart from "image unreadable".
pub fn try_classify_bytes(bytes: &[u8]) -> Result<ShapeLabel, AnalysisFailure> {
    let image = image::load_from_memory(bytes)
        .map_err(|e| AnalysisFailure::ImageUnreadable(e.to_string()))?;
    try_classify(&image)
}

/// Classifies a decoded image. See `classify_bytes` for the degradation
/// policy.
pub fn classify(image: &DynamicImage) -> ShapeLabel {
    match try_classify(image) {
        Ok(label) => label,
        Err(AnalysisFailure::NoHandDetected) => ShapeLabel::Indeterminate,
        Err(_) => ShapeLabel::Error,
    }
}

fn try_classify(image: &DynamicImage) -> Result<ShapeLabel, AnalysisFailure> {
    let gray = image.to_luma8();
    let binary = binarize_inverted(&gray, BINARY_THRESHOLD);

    let contours: Vec<Contour<i32>> = find_contours(&binary);
    let hand = contours
        .iter()
        .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
        .max_by(|a, b| {
            contour_area(&a.points)
                .partial_cmp(&contour_area(&b.points))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .ok_or(AnalysisFailure::NoHandDetected)?;

    Ok(shape_from_ratio(bounding_box_ratio(&hand.points)))
}

/// Ratio thresholds are fixed, compatibility-critical behavior:
/// 0.9..=1.1 square, >1.3 philosophic, <0.9 spatulate, otherwise conic.
pub fn shape_from_ratio(ratio: f64) -> ShapeLabel {
    if (0.9..=1.1).contains(&ratio) {
        ShapeLabel::Square
    } else if ratio > 1.3 {
        ShapeLabel::Philosophic
    } else if ratio < 0.9 {
        ShapeLabel::Spatulate
    } else {
        ShapeLabel::Conic
    }
}

// Inverted binary threshold: the darker region becomes the "on" foreground.
fn binarize_inverted(gray: &GrayImage, threshold: u8) -> GrayImage {
    let mut out = GrayImage::new(gray.width(), gray.height());
    for (x, y, pixel) in gray.enumerate_pixels() {
        let value = if pixel[0] <= threshold { 255 } else { 0 };
        out.put_pixel(x, y, Luma([value]));
    }
    out
}

// Shoelace formula over the contour polygon.
fn contour_area(points: &[Point<i32>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut doubled = 0i64;
    for i in 0..points.len() {
        let p = points[i];
        let q = points[(i + 1) % points.len()];
        doubled += i64::from(p.x) * i64::from(q.y) - i64::from(q.x) * i64::from(p.y);
    }
    doubled.abs() as f64 / 2.0
}

// Axis-aligned bounding box, height over width. Degenerate width counts as
// ratio 1 so a single-column contour still classifies.
fn bounding_box_ratio(points: &[Point<i32>]) -> f64 {
    let min_x = points.iter().map(|p| p.x).min().unwrap_or(0);
    let max_x = points.iter().map(|p| p.x).max().unwrap_or(0);
    let min_y = points.iter().map(|p| p.y).min().unwrap_or(0);
    let max_y = points.iter().map(|p| p.y).max().unwrap_or(0);

    let width = f64::from(max_x - min_x + 1);
    let height = f64::from(max_y - min_y + 1);
    if width == 0.0 {
        1.0
    } else {
        height / width
    }
}
