use nalgebra::Point2;

/// A face after projection, ready for the rasterizer.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenPolygon {
    /// Screen-space corners in face order (pixels, origin top-left).
    pub points: Vec<Point2<f32>>,
    /// Mean NDC depth of the corners, `-1` at the near plane and `1` at the far plane.
    pub depth: f32,
}

impl ScreenPolygon {
    pub fn new(points: Vec<Point2<f32>>, depth: f32) -> Self {
        Self { points, depth }
    }
}
