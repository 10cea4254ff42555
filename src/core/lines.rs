use crate::domain::model::{AnalysisFailure, LinePresence, LineReading};
use image::{DynamicImage, GrayImage};
use imageproc::edges::canny;
use imageproc::hough::{detect_lines, LineDetectionOptions};

pub const EDGE_LOW_THRESHOLD: f32 = 50.0;
pub const EDGE_HIGH_THRESHOLD: f32 = 150.0;
pub const VOTE_THRESHOLD: u32 = 100;
pub const MIN_SEGMENT_LENGTH: f64 = 50.0;
pub const MAX_SEGMENT_GAP: u32 = 10;

/// A detected straight line segment on the edge map, in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub start: (u32, u32),
    pub end: (u32, u32),
}

impl Segment {
    pub fn length(&self) -> f64 {
        let dx = f64::from(self.end.0) - f64::from(self.start.0);
        let dy = f64::from(self.end.1) - f64::from(self.start.1);
        (dx * dx + dy * dy).sqrt()
    }
}

/// Detects the four palm lines in raw image bytes. Any failure degrades to a
/// fully indeterminate reading; the result always carries all four lines.
pub fn detect_bytes(bytes: &[u8]) -> LineReading {
    match try_detect_bytes(bytes) {
        Ok(reading) => reading,
        Err(_) => LineReading::indeterminate(),
    }
}

pub fn try_detect_bytes(bytes: &[u8]) -> Result<LineReading, AnalysisFailure> {
    let image = image::load_from_memory(bytes)
        .map_err(|e| AnalysisFailure::ImageUnreadable(e.to_string()))?;
    Ok(detect(&image))
}

/// Edge detection plus probabilistic segment extraction, then the fixed
/// reporting policy. The life/head/heart lines are reported present
/// regardless of what was detected; only the destiny line reflects the
/// segment count. Compatibility-critical behavior, flagged to product as a
/// likely unfinished heuristic.
pub fn detect(image: &DynamicImage) -> LineReading {
    let gray = image.to_luma8();
    let edges = canny(&gray, EDGE_LOW_THRESHOLD, EDGE_HIGH_THRESHOLD);
    let segments = extract_segments(&edges);
    reading_from_segment_count(segments.len())
}

/// Fixed reporting policy: destiny is present only above five segments.
pub fn reading_from_segment_count(count: usize) -> LineReading {
    LineReading {
        life: LinePresence::Present,
        head: LinePresence::Present,
        heart: LinePresence::Present,
        destiny: if count > 5 {
            LinePresence::Present
        } else {
            LinePresence::Absent
        },
    }
}

/// Extracts line segments from a binary edge map: a Hough vote over the edge
/// pixels selects candidate lines, then each candidate is walked across the
/// image collecting runs of edge pixels. Runs shorter than
/// `MIN_SEGMENT_LENGTH` are dropped; gaps up to `MAX_SEGMENT_GAP` pixels are
/// bridged.
pub fn extract_segments(edges: &GrayImage) -> Vec<Segment> {
    let options = LineDetectionOptions {
        vote_threshold: VOTE_THRESHOLD,
        suppression_radius: 8,
    };
    let candidates = detect_lines(edges, options);

    let (width, height) = edges.dimensions();
    let diagonal = f64::from(width).hypot(f64::from(height)) as i64 + 1;

    let mut segments = Vec::new();
    for line in candidates {
        let theta = f64::from(line.angle_in_degrees).to_radians();
        let (sin_t, cos_t) = theta.sin_cos();
        let r = f64::from(line.r);

        let mut run_start: Option<(u32, u32)> = None;
        let mut run_end: Option<(u32, u32)> = None;
        let mut gap = 0u32;

        for t in -diagonal..=diagonal {
            let x = r * cos_t - t as f64 * sin_t;
            let y = r * sin_t + t as f64 * cos_t;
            let (xi, yi) = (x.round() as i64, y.round() as i64);

            let on = xi >= 0
                && yi >= 0
                && (xi as u32) < width
                && (yi as u32) < height
                && edges.get_pixel(xi as u32, yi as u32)[0] > 0;

            if on {
                let point = (xi as u32, yi as u32);
                if run_start.is_none() {
                    run_start = Some(point);
                }
                run_end = Some(point);
                gap = 0;
            } else if run_start.is_some() {
                gap += 1;
                if gap > MAX_SEGMENT_GAP {
                    close_run(&mut segments, run_start.take(), run_end.take());
                    gap = 0;
                }
            }
        }
        close_run(&mut segments, run_start, run_end);
    }
    segments
}

fn close_run(segments: &mut Vec<Segment>, start: Option<(u32, u32)>, end: Option<(u32, u32)>) {
    if let (Some(start), Some(end)) = (start, end) {
        let segment = Segment { start, end };
        if segment.length() >= MIN_SEGMENT_LENGTH {
            segments.push(segment);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Luma, Rgb, RgbImage};

    #[test]
    fn test_blank_image_reading() {
        let blank = DynamicImage::ImageRgb8(RgbImage::from_pixel(200, 200, Rgb([255, 255, 255])));
        let reading = detect(&blank);
        assert_eq!(reading.life, LinePresence::Present);
        assert_eq!(reading.head, LinePresence::Present);
        assert_eq!(reading.heart, LinePresence::Present);
        assert_eq!(reading.destiny, LinePresence::Absent);
    }

    #[test]
    fn test_unreadable_bytes_fully_indeterminate() {
        let reading = detect_bytes(b"not an image at all");
        assert_eq!(reading, LineReading::indeterminate());
    }

    #[test]
    fn test_policy_threshold() {
        assert_eq!(
            reading_from_segment_count(5).destiny,
            LinePresence::Absent
        );
        assert_eq!(
            reading_from_segment_count(6).destiny,
            LinePresence::Present
        );
        assert_eq!(reading_from_segment_count(0).life, LinePresence::Present);
    }

    #[test]
    fn test_extract_segments_finds_long_horizontal_run() {
        // 161 collinear edge pixels: enough Hough votes, one long segment.
        let mut edges = GrayImage::new(200, 200);
        for x in 20..=180 {
            edges.put_pixel(x, 100, Luma([255]));
        }
        let segments = extract_segments(&edges);
        assert!(!segments.is_empty());
        assert!(segments.iter().any(|s| s.length() >= 150.0));
    }

    #[test]
    fn test_extract_segments_ignores_short_runs() {
        // 120 votes on the line, but a wide break splits it into two runs
        // of 60px each; both survive the minimum-length filter but the gap
        // is never bridged.
        let mut edges = GrayImage::new(300, 300);
        for x in 20..80 {
            edges.put_pixel(x, 150, Luma([255]));
        }
        for x in 120..180 {
            edges.put_pixel(x, 150, Luma([255]));
        }
        let segments = extract_segments(&edges);
        assert!(segments.iter().all(|s| s.length() < 100.0));
    }

    #[test]
    fn test_extract_segments_empty_edge_map() {
        let edges = GrayImage::new(150, 150);
        assert!(extract_segments(&edges).is_empty());
    }
}
