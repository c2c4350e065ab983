//! Normalized image-space points.

use serde::{Deserialize, Serialize};

/// A point in normalized image coordinates (0.0-1.0 on both axes).
///
/// Y grows downward, so "above" means a smaller `y`. Points are compared by
/// distance, never by equality.
///
/// Serializes as `[x, y]`. Deserializes from either `[x, y]` or
/// `{"x": .., "y": ..}`; extra fields such as a depth `z` are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "PointRepr", into = "[f64; 2]")]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    /// Create a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance(&self, other: &Point2D) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Midpoint between two points.
    #[inline]
    pub fn midpoint(&self, other: &Point2D) -> Point2D {
        Point2D::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Both coordinates are finite numbers.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PointRepr {
    Pair([f64; 2]),
    Object { x: f64, y: f64 },
}

impl From<PointRepr> for Point2D {
    fn from(repr: PointRepr) -> Self {
        match repr {
            PointRepr::Pair([x, y]) => Self::new(x, y),
            PointRepr::Object { x, y } => Self::new(x, y),
        }
    }
}

impl From<(f64, f64)> for Point2D {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<[f64; 2]> for Point2D {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<Point2D> for [f64; 2] {
    fn from(p: Point2D) -> Self {
        [p.x, p.y]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        let a = Point2D::new(0.0, 0.0);
        let b = Point2D::new(0.3, 0.4);
        assert!((a.distance(&b) - 0.5).abs() < 1e-12);
        assert!((b.distance(&a) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_midpoint() {
        let mid = Point2D::new(0.2, 0.4).midpoint(&Point2D::new(0.4, 0.8));
        assert!((mid.x - 0.3).abs() < 1e-12);
        assert!((mid.y - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_deserialize_object() {
        let p: Point2D = serde_json::from_str(r#"{"x":0.25,"y":0.75}"#).unwrap();
        assert_eq!(p.x, 0.25);
        assert_eq!(p.y, 0.75);
    }

    #[test]
    fn test_deserialize_pair_and_extra_fields() {
        let p: Point2D = serde_json::from_str("[0.5, 0.125]").unwrap();
        assert_eq!(p.x, 0.5);
        assert_eq!(p.y, 0.125);

        let q: Point2D = serde_json::from_str(r#"{"x":0.1,"y":0.2,"z":-0.03}"#).unwrap();
        assert_eq!(q.x, 0.1);
        assert_eq!(q.y, 0.2);
    }

    #[test]
    fn test_serialize_as_pair() {
        let json = serde_json::to_string(&Point2D::new(0.5, 0.25)).unwrap();
        assert_eq!(json, "[0.5,0.25]");
    }

    #[test]
    fn test_is_finite() {
        assert!(Point2D::new(0.1, 0.2).is_finite());
        assert!(!Point2D::new(f64::NAN, 0.2).is_finite());
        assert!(!Point2D::new(0.1, f64::INFINITY).is_finite());
    }
}
