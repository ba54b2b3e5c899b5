use crate::core::math::transform::TransformFactory;
use nalgebra::{Matrix4, Point3, Vector3};
use std::f32::consts::FRAC_PI_2;

/// Below this length the cross product with world up is considered degenerate.
const DEGENERATE_CROSS: f32 = 0.01;

/// Bounds that keep the orbit well-defined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitLimits {
    /// Closest the camera may get to its target.
    pub min_distance: f32,
    /// Pitch stays within `±(π/2 - pitch_margin)` so the orbit never flips over a pole.
    pub pitch_margin: f32,
}

impl Default for OrbitLimits {
    fn default() -> Self {
        Self {
            min_distance: 2.0,
            pitch_margin: 0.1,
        }
    }
}

impl OrbitLimits {
    pub fn max_pitch(&self) -> f32 {
        FRAC_PI_2 - self.pitch_margin
    }

    pub fn min_pitch(&self) -> f32 {
        -FRAC_PI_2 + self.pitch_margin
    }
}

/// Camera orbiting a target point.
///
/// Position and orientation are derived from `(yaw, pitch, distance)` around
/// `target`. The basis `right`, `up`, `forward` is orthonormal with
/// `right × up = forward`, and `forward` always points at the target.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    position: Point3<f32>,
    target: Point3<f32>,

    forward: Vector3<f32>,
    up: Vector3<f32>,
    right: Vector3<f32>,

    yaw: f32,
    pitch: f32,
    distance: f32,

    limits: OrbitLimits,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(0.0, 0.0, 10.0, OrbitLimits::default())
    }
}

impl OrbitCamera {
    /// Creates a camera orbiting the origin. Pitch and distance are brought
    /// inside `limits` before the first position is derived.
    pub fn new(yaw: f32, pitch: f32, distance: f32, limits: OrbitLimits) -> Self {
        let mut camera = Self {
            position: Point3::origin(),
            target: Point3::origin(),
            forward: Vector3::z(),
            up: Vector3::y(),
            right: Vector3::x(),
            yaw,
            pitch: pitch.clamp(limits.min_pitch(), limits.max_pitch()),
            distance: distance.max(limits.min_distance),
            limits,
        };
        camera.update_position();
        camera
    }

    // --- Orbit parameters ---

    /// Turns around the target. Unbounded; the trigonometry wraps it.
    pub fn add_yaw(&mut self, delta: f32) {
        self.yaw += delta;
    }

    /// Tilts over the target, saturating just short of the poles.
    pub fn add_pitch(&mut self, delta: f32) {
        self.pitch = (self.pitch + delta).clamp(self.limits.min_pitch(), self.limits.max_pitch());
    }

    /// Zoom: moves towards (negative) or away from (positive) the target.
    pub fn add_distance(&mut self, delta: f32) {
        self.distance = (self.distance + delta).max(self.limits.min_distance);
    }

    /// Puts the orbit back to the given parameters, keeping the target.
    pub fn reset_orbit(&mut self, yaw: f32, pitch: f32, distance: f32) {
        self.yaw = yaw;
        self.pitch = pitch.clamp(self.limits.min_pitch(), self.limits.max_pitch());
        self.distance = distance.max(self.limits.min_distance);
        self.update_position();
    }

    /// Re-centres the orbit on the centroid of `vertices`, or on the origin
    /// when there are none.
    pub fn set_target<I>(&mut self, vertices: I)
    where
        I: IntoIterator<Item = Point3<f32>>,
    {
        let (sum, count) = vertices
            .into_iter()
            .fold((Vector3::zeros(), 0usize), |(sum, n), v| (sum + v.coords, n + 1));

        self.target = if count == 0 {
            Point3::origin()
        } else {
            Point3::from(sum / count as f32)
        };
    }

    // --- Derived state ---

    /// Recomputes position and `forward` from the spherical parameters, then
    /// refreshes the rest of the basis.
    pub fn update_position(&mut self) {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();

        let offset = Vector3::new(
            self.distance * cos_pitch * sin_yaw,
            self.distance * sin_pitch,
            self.distance * cos_pitch * cos_yaw,
        );
        self.position = self.target + offset;

        // distance >= min_distance > 0, so this only fails on a NaN state.
        if let Some(forward) = (self.target - self.position).try_normalize(f32::EPSILON) {
            self.forward = forward;
        }
        self.update_axes();
    }

    /// Rebuilds `right` and `up` from `forward`.
    ///
    /// When `forward` is (nearly) parallel to world up the cross product
    /// vanishes; the X axis is used as the reference instead so no
    /// zero-length vector reaches the view matrix.
    pub fn update_axes(&mut self) {
        let world_up = Vector3::y();
        let mut right = world_up.cross(&self.forward);
        if right.norm() < DEGENERATE_CROSS {
            right = Vector3::x().cross(&self.forward);
        }

        if let Some(right) = right.try_normalize(f32::EPSILON) {
            self.right = right;
        }
        if let Some(up) = self.forward.cross(&self.right).try_normalize(f32::EPSILON) {
            self.up = up;
        }
    }

    /// World → view transform: move the eye to the origin, then rotate into
    /// the camera basis.
    pub fn view_matrix(&self) -> Matrix4<f32> {
        TransformFactory::basis(&self.right, &self.up, &self.forward)
            * TransformFactory::translation(&-self.position.coords)
    }

    // --- Accessors ---

    pub fn position(&self) -> Point3<f32> {
        self.position
    }

    pub fn target(&self) -> Point3<f32> {
        self.target
    }

    pub fn forward(&self) -> Vector3<f32> {
        self.forward
    }

    pub fn up(&self) -> Vector3<f32> {
        self.up
    }

    pub fn right(&self) -> Vector3<f32> {
        self.right
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn limits(&self) -> OrbitLimits {
        self.limits
    }

    #[cfg(test)]
    pub(crate) fn set_forward(&mut self, forward: Vector3<f32>) {
        self.forward = forward.normalize();
    }
}
