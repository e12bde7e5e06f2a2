use serde::Serialize;
use thiserror::Error;

use crate::shared::bounding_box::Point;

#[derive(Error, Debug, PartialEq)]
pub enum ZoneError {
    #[error("zone '{name}' needs at least 3 vertices, got {count}")]
    TooFewVertices { name: String, count: usize },
    #[error("zone '{name}' has zero area")]
    Degenerate { name: String },
    #[error("zone '{name}' vertex coordinate {value} is outside 0.0-1.0")]
    FractionOutOfRange { name: String, value: f64 },
    #[error("cannot place zones on an empty {width}x{height} frame")]
    EmptyFrame { width: u32, height: u32 },
}

/// A fixed polygonal region with a maximum allowed head count.
///
/// Geometry is validated on construction and never changes afterwards.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Zone {
    name: String,
    polygon: Vec<Point>,
    max_occupancy: usize,
}

impl Zone {
    pub fn new(
        name: impl Into<String>,
        polygon: Vec<Point>,
        max_occupancy: usize,
    ) -> Result<Self, ZoneError> {
        let name = name.into();
        if polygon.len() < 3 {
            return Err(ZoneError::TooFewVertices {
                name,
                count: polygon.len(),
            });
        }
        if polygon_area(&polygon) == 0.0 {
            return Err(ZoneError::Degenerate { name });
        }
        Ok(Self {
            name,
            polygon,
            max_occupancy,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn polygon(&self) -> &[Point] {
        &self.polygon
    }

    pub fn max_occupancy(&self) -> usize {
        self.max_occupancy
    }

    /// Point-in-polygon test. Points on an edge or vertex count as inside.
    pub fn contains(&self, p: Point) -> bool {
        let n = self.polygon.len();
        let mut inside = false;
        for i in 0..n {
            let a = self.polygon[i];
            let b = self.polygon[(i + 1) % n];
            if on_segment(a, b, p) {
                return true;
            }
            // Even-odd rule, casting a ray toward +x.
            if (a.y > p.y) != (b.y > p.y) {
                let x_cross = a.x as f64
                    + (p.y - a.y) as f64 * (b.x - a.x) as f64 / (b.y - a.y) as f64;
                if (p.x as f64) < x_cross {
                    inside = !inside;
                }
            }
        }
        inside
    }
}

/// Absolute shoelace area.
fn polygon_area(polygon: &[Point]) -> f64 {
    let n = polygon.len();
    let twice: i64 = (0..n)
        .map(|i| {
            let a = polygon[i];
            let b = polygon[(i + 1) % n];
            a.x as i64 * b.y as i64 - b.x as i64 * a.y as i64
        })
        .sum();
    (twice as f64 / 2.0).abs()
}

fn on_segment(a: Point, b: Point, p: Point) -> bool {
    let cross = (b.x - a.x) as i64 * (p.y - a.y) as i64 - (b.y - a.y) as i64 * (p.x - a.x) as i64;
    cross == 0
        && p.x >= a.x.min(b.x)
        && p.x <= a.x.max(b.x)
        && p.y >= a.y.min(b.y)
        && p.y <= a.y.max(b.y)
}
