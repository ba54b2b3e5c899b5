pub mod canvas;
pub mod color;
pub mod geometry;
pub mod math;
pub mod rasterizer;
