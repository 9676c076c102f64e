//! Detected text regions

use serde::{Deserialize, Serialize};

use super::render::RenderError;

/// A point in image pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Quadrilateral outline of a detected text line (p0..p3, clockwise from top-left)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quad(pub [Point; 4]);

impl Quad {
    /// Build a quad from a polygon reported by an engine.
    ///
    /// Fails unless the polygon has exactly four finite points.
    pub fn from_polygon(polygon: &[[f32; 2]]) -> Result<Self, RenderError> {
        let points: [[f32; 2]; 4] = polygon
            .try_into()
            .map_err(|_| RenderError::InvalidRegion(format!("expected 4 points, got {}", polygon.len())))?;

        if points.iter().flatten().any(|c| !c.is_finite()) {
            return Err(RenderError::InvalidRegion(format!(
                "non-finite coordinate in {:?}",
                points
            )));
        }

        Ok(Quad(points.map(|[x, y]| Point::new(x, y))))
    }

    /// Axis-aligned quad for an (x, y, width, height) box
    pub fn from_rect(x: f32, y: f32, width: f32, height: f32) -> Self {
        Quad([
            Point::new(x, y),
            Point::new(x + width, y),
            Point::new(x + width, y + height),
            Point::new(x, y + height),
        ])
    }

    pub fn points(&self) -> &[Point; 4] {
        &self.0
    }

    /// The four edges p0→p1→p2→p3→p0
    pub fn edges(&self) -> [(Point, Point); 4] {
        let p = self.0;
        [(p[0], p[1]), (p[1], p[2]), (p[2], p[3]), (p[3], p[0])]
    }
}

/// A text region detected and recognized by an OCR engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingRegion {
    /// Outline of the text
    pub quad: Quad,
    /// Recognized text
    pub text: String,
    /// Recognition confidence (0.0 - 1.0)
    pub confidence: f32,
}

impl BoundingRegion {
    pub fn new(quad: Quad, text: impl Into<String>, confidence: f32) -> Self {
        Self {
            quad,
            text: text.into(),
            confidence: confidence.clamp(0.0, 1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_from_polygon() {
        let quad = Quad::from_polygon(&[[0.0, 0.0], [10.0, 0.0], [10.0, 5.0], [0.0, 5.0]]).unwrap();
        assert_eq!(quad.points()[2], Point::new(10.0, 5.0));
        assert_eq!(quad, Quad::from_rect(0.0, 0.0, 10.0, 5.0));
    }

    #[test]
    fn test_quad_rejects_wrong_arity() {
        let err = Quad::from_polygon(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]).unwrap_err();
        assert!(matches!(err, RenderError::InvalidRegion(_)));

        let five = [[0.0, 0.0]; 5];
        assert!(Quad::from_polygon(&five).is_err());
        assert!(Quad::from_polygon(&[]).is_err());
    }

    #[test]
    fn test_quad_rejects_non_finite() {
        let result = Quad::from_polygon(&[[0.0, 0.0], [f32::NAN, 0.0], [1.0, 1.0], [0.0, 1.0]]);
        assert!(result.is_err());
    }

    #[test]
    fn test_edges_close_the_outline() {
        let quad = Quad::from_rect(1.0, 2.0, 3.0, 4.0);
        let edges = quad.edges();
        assert_eq!(edges[0].0, edges[3].1);
        for i in 0..3 {
            assert_eq!(edges[i].1, edges[i + 1].0);
        }
    }

    #[test]
    fn test_confidence_is_clamped() {
        let quad = Quad::from_rect(0.0, 0.0, 1.0, 1.0);
        assert_eq!(BoundingRegion::new(quad, "a", 1.5).confidence, 1.0);
        assert_eq!(BoundingRegion::new(quad, "a", -0.1).confidence, 0.0);
    }
}
