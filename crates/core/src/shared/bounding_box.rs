use serde::{Deserialize, Serialize};

/// A pixel-space location, used as the person's position proxy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance in pixels.
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Axis-aligned box `[x1, y1, x2, y2]` as produced by the person detector.
///
/// Serialized as a plain four-element array so recorded detector output
/// can be read back without a wrapper object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[i32; 4]", into = "[i32; 4]")]
pub struct BoundingBox {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl BoundingBox {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn width(&self) -> i32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> i32 {
        self.y2 - self.y1
    }

    /// Area in square pixels; inverted boxes count as empty.
    pub fn area(&self) -> f64 {
        self.width().max(0) as f64 * self.height().max(0) as f64
    }

    /// Integer midpoint, truncated toward zero.
    pub fn center(&self) -> Point {
        Point::new((self.x1 + self.x2) / 2, (self.y1 + self.y2) / 2)
    }

    /// Intersection-over-Union. A zero-area union yields 0 (never a match).
    pub fn iou(&self, other: &BoundingBox) -> f64 {
        let ix1 = self.x1.max(other.x1);
        let iy1 = self.y1.max(other.y1);
        let ix2 = self.x2.min(other.x2);
        let iy2 = self.y2.min(other.y2);

        let inter = (ix2 - ix1).max(0) as f64 * (iy2 - iy1).max(0) as f64;
        if inter == 0.0 {
            return 0.0;
        }

        let union = self.area() + other.area() - inter;
        if union <= 0.0 {
            return 0.0;
        }
        inter / union
    }
}

impl From<[i32; 4]> for BoundingBox {
    fn from(v: [i32; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl From<BoundingBox> for [i32; 4] {
    fn from(b: BoundingBox) -> Self {
        [b.x1, b.y1, b.x2, b.y2]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn bbox(x1: i32, y1: i32, x2: i32, y2: i32) -> BoundingBox {
        BoundingBox::new(x1, y1, x2, y2)
    }

    // ── IoU ──────────────────────────────────────────────────────────

    #[test]
    fn test_iou_identical_boxes() {
        let a = bbox(10, 10, 110, 110);
        assert_relative_eq!(a.iou(&a), 1.0);
    }

    #[test]
    fn test_iou_no_overlap() {
        let a = bbox(0, 0, 50, 50);
        let b = bbox(100, 100, 150, 150);
        assert_relative_eq!(a.iou(&b), 0.0);
    }

    #[test]
    fn test_iou_partial_overlap() {
        // intersection 50*100 = 5000, union 10000 + 10000 - 5000
        let a = bbox(0, 0, 100, 100);
        let b = bbox(50, 0, 150, 100);
        assert_relative_eq!(a.iou(&b), 5000.0 / 15000.0);
    }

    #[test]
    fn test_iou_contained() {
        let a = bbox(0, 0, 100, 100);
        let b = bbox(25, 25, 75, 75);
        assert_relative_eq!(a.iou(&b), 2500.0 / 10000.0);
    }

    #[test]
    fn test_iou_touching_edges() {
        let a = bbox(0, 0, 50, 50);
        let b = bbox(50, 0, 100, 50);
        assert_relative_eq!(a.iou(&b), 0.0);
    }

    #[rstest]
    #[case::zero_width(bbox(0, 0, 0, 100), bbox(0, 0, 50, 50))]
    #[case::zero_height(bbox(0, 0, 100, 0), bbox(0, 0, 50, 50))]
    #[case::both_empty(bbox(5, 5, 5, 5), bbox(5, 5, 5, 5))]
    fn test_iou_degenerate_is_zero(#[case] a: BoundingBox, #[case] b: BoundingBox) {
        assert_relative_eq!(a.iou(&b), 0.0);
    }

    // ── Center ───────────────────────────────────────────────────────

    #[rstest]
    #[case(bbox(0, 0, 10, 20), Point::new(5, 10))]
    #[case(bbox(0, 0, 11, 21), Point::new(5, 10))]
    #[case(bbox(100, 80, 160, 230), Point::new(130, 155))]
    fn test_center_is_integer_midpoint(#[case] b: BoundingBox, #[case] expected: Point) {
        assert_eq!(b.center(), expected);
    }

    #[test]
    fn test_distance() {
        assert_relative_eq!(Point::new(0, 0).distance_to(&Point::new(3, 4)), 5.0);
    }

    #[test]
    fn test_deserializes_from_array() {
        let b: BoundingBox = serde_json::from_str("[1, 2, 3, 4]").unwrap();
        assert_eq!(b, bbox(1, 2, 3, 4));
        assert_eq!(serde_json::to_string(&b).unwrap(), "[1,2,3,4]");
    }
}
