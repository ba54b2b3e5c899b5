use crate::core::canvas::Canvas;
use crate::core::color::{self, Color};
use crate::core::geometry::ScreenPolygon;
use log::debug;

/// How projected faces are turned into pixels.
#[derive(PartialEq, Copy, Clone, Debug)]
pub enum RenderMode {
    /// Outline every face in input order.
    Wireframe,
    /// Painter's algorithm: fill back-to-front with depth shading, then outline.
    Solid,
}

impl RenderMode {
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "wireframe" => Some(Self::Wireframe),
            "solid" => Some(Self::Solid),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Wireframe => Self::Solid,
            Self::Solid => Self::Wireframe,
        }
    }
}

/// The Rasterizer draws screen-space polygons onto a Canvas.
/// It never sees 3D data; the projection pipeline hands it finished polygons.
pub struct Rasterizer {
    pub mode: RenderMode,
    /// Brightness kept at the far plane in solid mode.
    pub min_brightness: f32,
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new(RenderMode::Wireframe)
    }
}

impl Rasterizer {
    pub fn new(mode: RenderMode) -> Self {
        Self {
            mode,
            min_brightness: 0.25,
        }
    }

    pub fn set_mode(&mut self, mode: RenderMode) {
        self.mode = mode;
    }

    /// Draws every polygon of the sequence with `color`.
    /// Returns how many polygons reached the canvas.
    pub fn draw_polygons<I>(&self, canvas: &mut Canvas, polygons: I, color: &Color) -> usize
    where
        I: IntoIterator<Item = ScreenPolygon>,
    {
        match self.mode {
            RenderMode::Wireframe => {
                let packed = color::to_u32(color);
                let mut drawn = 0;
                for polygon in polygons {
                    canvas.draw_polygon(&polygon.points, packed);
                    drawn += 1;
                }
                drawn
            }
            RenderMode::Solid => {
                let mut sorted: Vec<ScreenPolygon> = polygons.into_iter().collect();
                // Farthest first.
                sorted.sort_by(|a, b| b.depth.total_cmp(&a.depth));

                let edge = color::to_u32(&(color * 0.2));
                for polygon in &sorted {
                    let fill = color::to_u32(&color::shade(color, polygon.depth, self.min_brightness));
                    canvas.fill_polygon(&polygon.points, fill);
                    canvas.draw_polygon(&polygon.points, edge);
                }
                debug!("Solid pass drew {} polygons", sorted.len());
                sorted.len()
            }
        }
    }
}
