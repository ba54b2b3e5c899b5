use crate::core::geometry::ScreenPolygon;
use crate::core::math::transform::TransformFactory;
use crate::scene::mesh::{Face, Mesh};
use crate::scene::projection::{Projection, ScreenVertex};
use nalgebra::{Matrix4, Point3};

/// Anything the projection pipeline can draw.
///
/// Implementors only expose their geometry and model matrix; the transform
/// sequence itself is shared through [`Renderable::project`].
pub trait Renderable {
    /// Model-space vertex positions.
    fn vertices(&self) -> &[Point3<f32>];

    /// Polygons as indices into [`Renderable::vertices`].
    fn faces(&self) -> &[Face];

    /// Object-local transform (model → world).
    fn model_matrix(&self) -> &Matrix4<f32>;

    /// Runs every vertex through `projection * view * model`, the perspective
    /// divide and the viewport mapping.
    fn project(&self, view: &Matrix4<f32>, projection: &Projection) -> ProjectedMesh<'_> {
        let mvp = projection.matrix() * view * self.model_matrix();
        let screen = self
            .vertices()
            .iter()
            .map(|v| projection.project(&(mvp * v.to_homogeneous())))
            .collect();

        ProjectedMesh {
            faces: self.faces(),
            screen,
        }
    }
}

/// One frame's worth of projected geometry.
///
/// Vertices are transformed once; faces are assembled lazily by
/// [`ProjectedMesh::polygons`], which can be called as often as needed.
pub struct ProjectedMesh<'a> {
    faces: &'a [Face],
    screen: Vec<Option<ScreenVertex>>,
}

impl ProjectedMesh<'_> {
    /// Per-vertex result; `None` marks a vertex that could not be projected.
    pub fn vertices(&self) -> &[Option<ScreenVertex>] {
        &self.screen
    }

    /// Lazily yields one polygon per drawable face, in face order.
    ///
    /// Unprojectable corners are left out; a face with fewer than three
    /// remaining corners is skipped.
    pub fn polygons(&self) -> impl Iterator<Item = ScreenPolygon> + '_ {
        self.faces.iter().filter_map(move |face| self.assemble(face))
    }

    /// Faces that [`ProjectedMesh::polygons`] will skip this frame.
    pub fn skipped_faces(&self) -> usize {
        self.faces.len() - self.polygons().count()
    }

    fn assemble(&self, face: &[usize]) -> Option<ScreenPolygon> {
        let mut points = Vec::with_capacity(face.len());
        let mut depth = 0.0;
        for vertex in face.iter().filter_map(|&i| self.screen.get(i).copied().flatten()) {
            points.push(vertex.point);
            depth += vertex.depth;
        }

        if points.len() < 3 {
            return None;
        }
        let depth = depth / points.len() as f32;
        Some(ScreenPolygon::new(points, depth))
    }
}

/// A loaded mesh placed in the world.
pub struct SceneObject {
    pub name: String,
    pub mesh: Mesh,
    pub transform: Matrix4<f32>,
}

impl SceneObject {
    pub fn new(name: impl Into<String>, mesh: Mesh) -> Self {
        Self {
            name: name.into(),
            mesh,
            transform: Matrix4::identity(),
        }
    }

    /// Rotates the object about the world Y axis, on top of its current transform.
    pub fn rotate_y(&mut self, angle_rad: f32) {
        self.transform = TransformFactory::rotation_y(angle_rad) * self.transform;
    }

    /// Vertex positions with the model matrix applied.
    pub fn world_vertices(&self) -> impl Iterator<Item = Point3<f32>> + '_ {
        self.mesh
            .vertices
            .iter()
            .map(move |v| self.transform.transform_point(v))
    }

    pub fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    pub fn face_count(&self) -> usize {
        self.mesh.face_count()
    }
}

impl Renderable for SceneObject {
    fn vertices(&self) -> &[Point3<f32>] {
        &self.mesh.vertices
    }

    fn faces(&self) -> &[Face] {
        &self.mesh.faces
    }

    fn model_matrix(&self) -> &Matrix4<f32> {
        &self.transform
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::camera::OrbitCamera;
    use std::f32::consts::{FRAC_PI_3, FRAC_PI_4};

    /// Hand-built renderable that can hold faces `Mesh` would reject.
    struct RawGeometry {
        vertices: Vec<Point3<f32>>,
        faces: Vec<Face>,
        model: Matrix4<f32>,
    }

    impl Renderable for RawGeometry {
        fn vertices(&self) -> &[Point3<f32>] {
            &self.vertices
        }
        fn faces(&self) -> &[Face] {
            &self.faces
        }
        fn model_matrix(&self) -> &Matrix4<f32> {
            &self.model
        }
    }

    /// Unit-half-extent cube centred on the origin, six quad faces.
    fn cube() -> Mesh {
        let vertices = vec![
            Point3::new(-1.0, -1.0, -1.0),
            Point3::new(1.0, -1.0, -1.0),
            Point3::new(1.0, 1.0, -1.0),
            Point3::new(-1.0, 1.0, -1.0),
            Point3::new(-1.0, -1.0, 1.0),
            Point3::new(1.0, -1.0, 1.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(-1.0, 1.0, 1.0),
        ];
        let faces = vec![
            vec![0, 3, 2, 1], // back
            vec![4, 5, 6, 7], // front
            vec![0, 4, 7, 3], // left
            vec![1, 2, 6, 5], // right
            vec![3, 7, 6, 2], // top
            vec![0, 1, 5, 4], // bottom
        ];
        Mesh::new(vertices, faces)
    }

    fn setup() -> (OrbitCamera, Projection) {
        (
            OrbitCamera::default(),
            Projection::new(800, 600, FRAC_PI_3, 0.1, 100.0),
        )
    }

    #[test]
    fn cube_projects_every_face() {
        let (camera, projection) = setup();
        let object = SceneObject::new("cube", cube());
        let frame = object.project(&camera.view_matrix(), &projection);

        assert!(frame.vertices().iter().all(Option::is_some));
        let polygons: Vec<_> = frame.polygons().collect();
        assert_eq!(polygons.len(), 6);
        assert!(polygons.iter().all(|p| p.points.len() == 4));
        for p in &polygons {
            for point in &p.points {
                assert!(point.x > 0.0 && point.x < 800.0);
                assert!(point.y > 0.0 && point.y < 600.0);
            }
        }
    }

    #[test]
    fn polygons_can_be_restarted() {
        let (camera, projection) = setup();
        let object = SceneObject::new("cube", cube());
        let frame = object.project(&camera.view_matrix(), &projection);

        let first: Vec<_> = frame.polygons().collect();
        let second: Vec<_> = frame.polygons().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn target_projects_to_screen_centre() {
        let (camera, projection) = setup();
        let object = SceneObject::new(
            "point",
            Mesh::new(
                vec![
                    Point3::origin(),
                    Point3::new(0.5, 0.0, 0.0),
                    Point3::new(0.0, 0.5, 0.0),
                ],
                vec![vec![0, 1, 2]],
            ),
        );
        let frame = object.project(&camera.view_matrix(), &projection);
        let centre = frame.vertices()[0].unwrap();
        assert!((centre.point.x - 400.0).abs() < 1e-3);
        assert!((centre.point.y - 300.0).abs() < 1e-3);

        // World up stays up on screen.
        let above = frame.vertices()[2].unwrap();
        assert!(above.point.y < centre.point.y);
    }

    #[test]
    fn vertices_behind_camera_are_dropped_from_faces() {
        let (camera, projection) = setup();
        // Camera sits at z = 10 looking towards -z; z = 20 is behind it.
        let geometry = RawGeometry {
            vertices: vec![
                Point3::new(-1.0, -1.0, 0.0),
                Point3::new(1.0, -1.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(-1.0, 1.0, 0.0),
                Point3::new(0.0, 0.0, 20.0),
            ],
            faces: vec![
                vec![0, 1, 2, 3], // fully visible
                vec![0, 1, 4],    // one corner behind: 2 left, skipped
                vec![0, 1, 2, 4], // one corner behind: 3 left, drawn
            ],
            model: Matrix4::identity(),
        };
        let frame = geometry.project(&camera.view_matrix(), &projection);

        assert!(frame.vertices()[4].is_none());
        let polygons: Vec<_> = frame.polygons().collect();
        assert_eq!(polygons.len(), 2);
        assert_eq!(polygons[0].points.len(), 4);
        assert_eq!(polygons[1].points.len(), 3);
        assert_eq!(frame.skipped_faces(), 1);
    }

    #[test]
    fn out_of_range_index_does_not_stop_the_frame() {
        let (camera, projection) = setup();
        let geometry = RawGeometry {
            vertices: vec![
                Point3::new(-1.0, -1.0, 0.0),
                Point3::new(1.0, -1.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(-1.0, 1.0, 0.0),
            ],
            faces: vec![vec![0, 1, 5], vec![0, 1, 2], vec![1, 2, 3]],
            model: Matrix4::identity(),
        };
        let frame = geometry.project(&camera.view_matrix(), &projection);
        assert_eq!(frame.polygons().count(), 2);
    }

    #[test]
    fn rotate_y_changes_world_vertices_only() {
        let mut object = SceneObject::new(
            "triangle",
            Mesh::new(
                vec![
                    Point3::new(1.0, 0.0, 0.0),
                    Point3::new(0.0, 1.0, 0.0),
                    Point3::new(0.0, 0.0, 1.0),
                ],
                vec![vec![0, 1, 2]],
            ),
        );
        object.rotate_y(-FRAC_PI_4);

        assert_eq!(object.mesh.vertices[0], Point3::new(1.0, 0.0, 0.0));
        let world: Vec<_> = object.world_vertices().collect();
        let s = FRAC_PI_4.sin();
        assert!((world[0] - Point3::new(s, 0.0, s)).norm() < 1e-5);
        assert!((world[1] - Point3::new(0.0, 1.0, 0.0)).norm() < 1e-5);
    }

    #[test]
    fn depth_orders_near_faces_first() {
        let (camera, projection) = setup();
        let object = SceneObject::new("cube", cube());
        let frame = object.project(&camera.view_matrix(), &projection);
        let polygons: Vec<_> = frame.polygons().collect();
        // Face 1 (z = +1) faces the camera, face 0 (z = -1) is the far side.
        assert!(polygons[1].depth < polygons[0].depth);
    }
}
