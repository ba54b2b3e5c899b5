use crate::core::math::transform::{TransformFactory, ndc_to_screen, perspective_divide};
use nalgebra::{Matrix4, Point2, Point3, Vector4};

/// A vertex that survived the perspective divide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenVertex {
    /// Pixel coordinates, origin top-left.
    pub point: Point2<f32>,
    /// NDC depth in `[-1, 1]`.
    pub depth: f32,
}

/// Perspective projection for a fixed-size viewport.
///
/// Built once per session. The vertical field of view follows the viewport
/// aspect: `v_fov = h_fov * height / width`.
#[derive(Debug, Clone)]
pub struct Projection {
    width: f32,
    height: f32,
    h_fov: f32,
    v_fov: f32,
    near: f32,
    far: f32,
    matrix: Matrix4<f32>,
}

impl Projection {
    pub fn new(width: usize, height: usize, h_fov_rad: f32, near: f32, far: f32) -> Self {
        let width = width.max(1) as f32;
        let height = height.max(1) as f32;
        let v_fov = h_fov_rad * (height / width);
        Self {
            width,
            height,
            h_fov: h_fov_rad,
            v_fov,
            near,
            far,
            matrix: TransformFactory::perspective(h_fov_rad, v_fov, near, far),
        }
    }

    pub fn matrix(&self) -> Matrix4<f32> {
        self.matrix
    }

    /// Maps normalized device coordinates to pixels (y grows downwards on screen).
    pub fn to_screen(&self, ndc: &Point3<f32>) -> Point2<f32> {
        ndc_to_screen(ndc.x, ndc.y, self.width, self.height)
    }

    /// Perspective divide, near/far rejection and viewport mapping.
    ///
    /// `None` means the vertex cannot be drawn: it is on or behind the camera
    /// plane, or outside the near/far depth range.
    pub fn project(&self, clip: &Vector4<f32>) -> Option<ScreenVertex> {
        let ndc = perspective_divide(clip)?;
        if !(-1.0..=1.0).contains(&ndc.z) {
            return None;
        }
        Some(ScreenVertex {
            point: self.to_screen(&ndc),
            depth: ndc.z,
        })
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn h_fov(&self) -> f32 {
        self.h_fov
    }

    pub fn v_fov(&self) -> f32 {
        self.v_fov
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }
}
