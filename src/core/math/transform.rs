use nalgebra::{Matrix4, Point2, Point3, Vector3, Vector4};

/// Clip-space `w` at or below this value is treated as lying on (or behind)
/// the camera plane.
pub const W_EPSILON: f32 = 1e-6;

//=================================
// Transform Matrix Factory
//=================================

/// Factory for the transformation matrices used by the viewer.
///
/// All matrices use the column-vector convention (`M * v`), so a chain that
/// reads "model, then view, then projection" is written
/// `projection * view * model`.
///
/// View space is y-up and the camera looks down its own +Z, which means the
/// depth of visible geometry is positive.
pub struct TransformFactory;

#[rustfmt::skip]
impl TransformFactory {
    /// Creates a rotation matrix around the Y-axis.
    pub fn rotation_y(angle_rad: f32) -> Matrix4<f32> {
        let (s, c) = angle_rad.sin_cos();
        Matrix4::new(
            c,   0.0, s,   0.0,
            0.0, 1.0, 0.0, 0.0,
           -s,   0.0, c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Creates a translation matrix that adds `translation` to a point.
    ///
    /// The camera passes its negated position, so the view transform moves
    /// the eye to the origin before rotating.
    pub fn translation(translation: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new(
            1.0, 0.0, 0.0, translation.x,
            0.0, 1.0, 0.0, translation.y,
            0.0, 0.0, 1.0, translation.z,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Rotation from world axes into a camera basis.
    /// Rows are the basis vectors, so a world direction maps to
    /// `(dot(right), dot(up), dot(forward))`.
    pub fn basis(right: &Vector3<f32>, up: &Vector3<f32>, forward: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new(
            right.x,   right.y,   right.z,   0.0,
            up.x,      up.y,      up.z,      0.0,
            forward.x, forward.y, forward.z, 0.0,
            0.0,       0.0,       0.0,       1.0,
        )
    }

    /// Creates a symmetric-frustum perspective matrix from full field-of-view angles.
    ///
    /// Clip `w` receives the view-space depth. After the divide, x and y of
    /// visible points fall in [-1, 1] and depth `near..far` maps onto `-1..1`.
    pub fn perspective(h_fov_rad: f32, v_fov_rad: f32, near: f32, far: f32) -> Matrix4<f32> {
        let sx = 1.0 / (h_fov_rad / 2.0).tan();
        let sy = 1.0 / (v_fov_rad / 2.0).tan();
        let fn_ = 1.0 / (far - near);

        Matrix4::new(
            sx,  0.0, 0.0,                0.0,
            0.0, sy,  0.0,                0.0,
            0.0, 0.0, (far + near) * fn_, -2.0 * far * near * fn_,
            0.0, 0.0, 1.0,                0.0,
        )
    }
}

//=================================
// Core Transformation Functions
//=================================

/// Performs perspective division: Clip Space -> NDC.
///
/// Returns `None` when the point sits on or behind the camera plane.
#[inline]
pub fn perspective_divide(clip: &Vector4<f32>) -> Option<Point3<f32>> {
    let w = clip.w;
    if w > W_EPSILON {
        Some(Point3::new(clip.x / w, clip.y / w, clip.z / w))
    } else {
        None
    }
}

/// Converts NDC coordinates to Screen coordinates (Viewport Transform).
/// Note: Y-axis is flipped (NDC +Y is up, Screen +Y is down).
#[inline]
pub fn ndc_to_screen(ndc_x: f32, ndc_y: f32, width: f32, height: f32) -> Point2<f32> {
    let half_w = width / 2.0;
    let half_h = height / 2.0;
    Point2::new(ndc_x * half_w + half_w, -ndc_y * half_h + half_h)
}
