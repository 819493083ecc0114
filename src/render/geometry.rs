//! Path construction shared by the rasterizer
//!
//! Keeps tiny-skia path building in one place so the scene painter only
//! deals with paints and strokes.

use tiny_skia::{LineCap, LineJoin, PathBuilder, Stroke};

use crate::domain::Point;

/// Cubic bezier circle approximation constant: 4/3 * (sqrt(2) - 1)
pub const BEZIER_K: f32 = 0.552_284_8;

/// Build a single straight segment path
///
/// Returns `None` for segments tiny-skia cannot bound, such as non-finite
/// coordinates.
pub fn build_segment_path(start: Point, end: Point) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    pb.move_to(start.x, start.y);
    pb.line_to(end.x, end.y);
    pb.finish()
}

/// Build a circle path using four cubic bezier arcs
pub fn build_circle_path(center: Point, radius: f32) -> Option<tiny_skia::Path> {
    let (cx, cy) = (center.x, center.y);
    let r = radius.max(0.5);
    let k = r * BEZIER_K;

    let mut pb = PathBuilder::new();

    // Start at top
    pb.move_to(cx, cy - r);

    // Top to right
    pb.cubic_to(cx + k, cy - r, cx + r, cy - k, cx + r, cy);

    // Right to bottom
    pb.cubic_to(cx + r, cy + k, cx + k, cy + r, cx, cy + r);

    // Bottom to left
    pb.cubic_to(cx - k, cy + r, cx - r, cy + k, cx - r, cy);

    // Left to top
    pb.cubic_to(cx - r, cy - k, cx - k, cy - r, cx, cy - r);

    pb.close();
    pb.finish()
}

/// Round-capped stroke of the given width
pub fn round_stroke(width: f32) -> Stroke {
    Stroke {
        width: width.max(0.5),
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_path_bounds() {
        let path = build_segment_path(Point::new(10.0, 20.0), Point::new(50.0, 20.0)).unwrap();
        let bounds = path.bounds();
        assert_eq!(bounds.left(), 10.0);
        assert_eq!(bounds.right(), 50.0);
    }

    #[test]
    fn test_circle_path_bounds() {
        let path = build_circle_path(Point::new(100.0, 100.0), 8.0).unwrap();
        let bounds = path.bounds();
        assert!((bounds.left() - 92.0).abs() < 0.01);
        assert!((bounds.right() - 108.0).abs() < 0.01);
        assert!((bounds.top() - 92.0).abs() < 0.01);
        assert!((bounds.bottom() - 108.0).abs() < 0.01);
    }

    #[test]
    fn test_non_finite_segment_has_no_path() {
        assert!(build_segment_path(Point::new(f32::NAN, 0.0), Point::new(1.0, 1.0)).is_none());
    }
}
